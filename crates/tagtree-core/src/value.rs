//! Dynamic values bound into template holes.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::dom::{EventListener, Handle};
use crate::hole::Hole;

/// A value supplied for a hole.
///
/// Equality is structural for data (numbers compare so that `NaN` equals
/// itself and `-0` equals `0`) and by identity for listeners, refs and
/// nodes. Equal values never cause a DOM write.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    Str(Rc<str>),
    Hole(Hole),
    List(Rc<[Value]>),
    Map(Rc<BTreeMap<String, Value>>),
    Listener(EventListener),
    Ref(NodeRef),
    Node(Handle),
}

impl Value {
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    pub fn map<I, K, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
        T: Into<Value>,
    {
        Value::Map(Rc::new(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        ))
    }

    pub fn listener(handler: impl Fn(&crate::dom::Event) + 'static) -> Self {
        Value::Listener(EventListener::new(handler))
    }

    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    /// Truthiness used by boolean attribute toggles.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Str(s) => !s.is_empty(),
            _ => true,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Hole(_) => "hole",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Listener(_) => "listener",
            Value::Ref(_) => "ref",
            Value::Node(_) => "node",
        }
    }

    /// True for null, undefined, booleans, numbers and strings.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            Value::Undefined | Value::Null | Value::Bool(_) | Value::Number(_) | Value::Str(_)
        )
    }

    /// String form used for text and attribute writes. Null and undefined
    /// become the empty string.
    pub fn to_text(&self) -> String {
        match self {
            Value::Undefined | Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => format_number(*n),
            Value::Str(s) => s.to_string(),
            Value::List(items) => items
                .iter()
                .map(Value::to_text)
                .collect::<Vec<_>>()
                .join(","),
            Value::Node(node) => node.text_content(),
            other => format!("[{}]", other.type_name()),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_ref()),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map.as_ref()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items.as_ref()),
            _ => None,
        }
    }

    pub fn as_hole(&self) -> Option<&Hole> {
        match self {
            Value::Hole(hole) => Some(hole),
            _ => None,
        }
    }
}

fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else {
        n.to_string()
    }
}

fn canonical_bits(n: f64) -> u64 {
    if n.is_nan() {
        f64::NAN.to_bits()
    } else if n == 0.0 {
        0
    } else {
        n.to_bits()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Hole(a), Value::Hole(b)) => a == b,
            (Value::List(a), Value::List(b)) => Rc::ptr_eq(a, b) || a == b,
            (Value::Map(a), Value::Map(b)) => Rc::ptr_eq(a, b) || a == b,
            (Value::Listener(a), Value::Listener(b)) => a == b,
            (Value::Ref(a), Value::Ref(b)) => a == b,
            (Value::Node(a), Value::Node(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Undefined | Value::Null => {}
            Value::Bool(b) => b.hash(state),
            Value::Number(n) => canonical_bits(*n).hash(state),
            Value::Str(s) => s.hash(state),
            Value::Hole(hole) => hole.hash(state),
            Value::List(items) => items.hash(state),
            Value::Map(map) => map.hash(state),
            Value::Listener(listener) => listener.identity().hash(state),
            Value::Ref(node_ref) => node_ref.identity().hash(state),
            Value::Node(node) => node.hash(state),
        }
    }
}

/// Receives the element a `ref` binding sits on.
#[derive(Clone)]
pub enum NodeRef {
    Callback(Rc<dyn Fn(&Handle)>),
    Cell(Rc<RefCell<Option<Handle>>>),
}

impl NodeRef {
    /// An empty slot, filled on the first render.
    pub fn new() -> Self {
        NodeRef::Cell(Rc::default())
    }

    pub fn callback(callback: impl Fn(&Handle) + 'static) -> Self {
        NodeRef::Callback(Rc::new(callback))
    }

    pub fn current(&self) -> Option<Handle> {
        match self {
            NodeRef::Cell(cell) => cell.borrow().clone(),
            NodeRef::Callback(_) => None,
        }
    }

    pub(crate) fn attach(&self, node: &Handle) {
        match self {
            NodeRef::Callback(callback) => callback(node),
            NodeRef::Cell(cell) => *cell.borrow_mut() = Some(node.clone()),
        }
    }

    fn identity(&self) -> usize {
        match self {
            NodeRef::Callback(callback) => Rc::as_ptr(callback).cast::<()>() as usize,
            NodeRef::Cell(cell) => Rc::as_ptr(cell) as usize,
        }
    }
}

impl Default for NodeRef {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeRef::Callback(_) => write!(f, "NodeRef::Callback({:#x})", self.identity()),
            NodeRef::Cell(cell) => write!(f, "NodeRef::Cell({:?})", cell.borrow()),
        }
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Number(n as f64)
                }
            }
        )*
    };
}

impl_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Undefined
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(Rc::from(s))
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Str(Rc::from(s.as_str()))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(Rc::from(s))
    }
}

impl From<Rc<str>> for Value {
    fn from(s: Rc<str>) -> Self {
        Value::Str(s)
    }
}

impl From<Hole> for Value {
    fn from(hole: Hole) -> Self {
        Value::Hole(hole)
    }
}

impl From<Handle> for Value {
    fn from(node: Handle) -> Self {
        Value::Node(node)
    }
}

impl From<&Handle> for Value {
    fn from(node: &Handle) -> Self {
        Value::Node(node.clone())
    }
}

impl From<EventListener> for Value {
    fn from(listener: EventListener) -> Self {
        Value::Listener(listener)
    }
}

impl From<&EventListener> for Value {
    fn from(listener: &EventListener) -> Self {
        Value::Listener(listener.clone())
    }
}

impl From<NodeRef> for Value {
    fn from(node_ref: NodeRef) -> Self {
        Value::Ref(node_ref)
    }
}

impl From<&NodeRef> for Value {
    fn from(node_ref: &NodeRef) -> Self {
        Value::Ref(node_ref.clone())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::list(items)
    }
}

impl<T: Into<Value>> From<BTreeMap<String, T>> for Value {
    fn from(map: BTreeMap<String, T>) -> Self {
        Value::map(map)
    }
}
