use std::io::{self, Write};

pub fn print_json(value: &serde_json::Value) -> io::Result<()> {
    let rendered = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    let mut out = io::stdout().lock();
    writeln!(out, "{rendered}")
}

pub fn print_text(s: &str) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "{s}")
}
