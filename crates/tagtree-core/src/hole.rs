//! Holes: a template site paired with the values for one render.

use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::engine::Engine;
use crate::error::Result;
use crate::fragment::Unit;
use crate::instance::Instance;
use crate::template::{TemplateId, TemplateSite};
use crate::value::Value;

/// The result of evaluating a tagged template: which template, and what
/// to put in its holes this time.
///
/// Usually built with [`html!`](crate::html) or [`svg!`](crate::svg).
#[derive(Debug, Clone)]
pub struct Hole {
    site: &'static TemplateSite,
    values: Rc<[Value]>,
}

impl Hole {
    pub fn new(site: &'static TemplateSite, values: Vec<Value>) -> Self {
        Self {
            site,
            values: values.into(),
        }
    }

    pub fn site(&self) -> &'static TemplateSite {
        self.site
    }

    pub fn id(&self) -> TemplateId {
        self.site.id()
    }

    pub fn is_svg(&self) -> bool {
        self.site.is_svg()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Renders through `instance`, creating its DOM on first use or when
    /// the template changed, and returns the node or fragment to place.
    pub fn to_dom(&self, engine: &Engine, instance: &mut Instance) -> Result<Unit> {
        instance.update(engine, self)
    }
}

impl PartialEq for Hole {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
            && (Rc::ptr_eq(&self.values, &other.values) || self.values == other.values)
    }
}

impl Eq for Hole {}

impl Hash for Hole {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
        self.values.hash(state);
    }
}

/// Builds an HTML [`Hole`]. Each `{}` in the literal is a hole filled by
/// the next argument; `{{` and `}}` are literal braces.
///
/// Every expansion owns a distinct static site, so the template is parsed
/// once per call site.
///
/// ```ignore
/// let greeting = tagtree_core::html!("<p class={}>Hello {}</p>", "big", name);
/// ```
#[macro_export]
macro_rules! html {
    ($source:literal $(, $value:expr)* $(,)?) => {{
        static SITE: $crate::template::TemplateSite = $crate::template::TemplateSite::html($source);
        $crate::Hole::new(&SITE, ::std::vec![$($crate::Value::from($value)),*])
    }};
}

/// Like [`html!`](crate::html), but the markup is parsed in SVG context.
#[macro_export]
macro_rules! svg {
    ($source:literal $(, $value:expr)* $(,)?) => {{
        static SITE: $crate::template::TemplateSite = $crate::template::TemplateSite::svg($source);
        $crate::Hole::new(&SITE, ::std::vec![$($crate::Value::from($value)),*])
    }};
}
