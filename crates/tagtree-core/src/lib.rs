//! Incremental rendering of tagged templates into an in-memory DOM.
//!
//! Templates are written with [`html!`] or [`svg!`]: markup with `{}` holes,
//! followed by the values for this render. Each call site is parsed once;
//! rendering again with new values writes only what changed.
//!
//! ## Data flow
//!
//! ```text
//! html!(...) -> Hole ─┐
//!                     ├─> Renderer::render(container, hole)
//!                     │     └─> Instance::update
//!                     │           ├─> TemplateCache (parse once per site)
//!                     │           ├─> clone + resolve hole paths
//!                     │           └─> Binding::apply per hole
//!                     │                 ├─> attribute / property / listener writes
//!                     │                 └─> ContentSlot: text | node | nested hole | list
//!                     │                                                      └─> reconcile::diff
//!                     └─> container children replaced only when the root unit changes
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use tagtree_core::{Document, Renderer, html};
//!
//! let renderer = Renderer::new(Document::new());
//! let root = renderer.document().create_element("main");
//! for count in 0..3 {
//!     renderer.render(&root, html!("<p class={}>clicked {} times</p>", "counter", count))?;
//! }
//! ```

pub mod binding;
pub mod config;
pub mod dom;
pub mod engine;
pub mod error;
pub mod fragment;
pub mod hole;
pub mod instance;
pub mod reconcile;
pub mod render;
pub mod template;
pub mod value;

// Re-export commonly used types
pub use binding::Updater;
pub use config::EngineConfig;
pub use dom::{Document, DomError, Event, EventListener, Handle, MutationCounts};
pub use engine::Engine;
pub use error::{Result, TagtreeError};
pub use fragment::{Fragment, Unit};
pub use hole::Hole;
pub use instance::Instance;
pub use render::{RenderInput, Renderer};
pub use template::{Template, TemplateCache, TemplateError, TemplateId, TemplateSite};
pub use value::{NodeRef, Value};
