mod cache;
mod path;
