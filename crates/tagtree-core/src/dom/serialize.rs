//! HTML serialization through html5ever's serializer.

use std::collections::VecDeque;
use std::io;

use html5ever::serialize::{Serialize, SerializeOpts, Serializer, TraversalScope, serialize};
use markup5ever::QualName;

use super::{Handle, NodeData};

struct SerializableHandle(Handle);

enum SerializeOp {
    Open(Handle),
    Close(QualName),
}

impl Serialize for SerializableHandle {
    fn serialize<S>(&self, serializer: &mut S, traversal_scope: TraversalScope) -> io::Result<()>
    where
        S: Serializer,
    {
        let mut ops = VecDeque::new();
        match traversal_scope {
            TraversalScope::IncludeNode if !self.0.is_fragment() => {
                ops.push_back(SerializeOp::Open(self.0.clone()));
            }
            _ => ops.extend(self.0.children().into_iter().map(SerializeOp::Open)),
        }

        while let Some(op) = ops.pop_front() {
            match op {
                SerializeOp::Open(handle) => match &handle.0.data {
                    NodeData::Element(element) => {
                        {
                            let attrs = element.attrs.borrow();
                            serializer.start_elem(
                                element.name.clone(),
                                attrs.iter().map(|attr| (&attr.name, attr.value.as_str())),
                            )?;
                        }
                        ops.push_front(SerializeOp::Close(element.name.clone()));
                        for child in handle.children().into_iter().rev() {
                            ops.push_front(SerializeOp::Open(child));
                        }
                    }
                    NodeData::Text(text) => serializer.write_text(&text.borrow())?,
                    NodeData::Comment(text) => serializer.write_comment(&text.borrow())?,
                    NodeData::Fragment => {
                        for child in handle.children().into_iter().rev() {
                            ops.push_front(SerializeOp::Open(child));
                        }
                    }
                },
                SerializeOp::Close(name) => serializer.end_elem(name)?,
            }
        }
        Ok(())
    }
}

fn write_html(node: &Handle, traversal_scope: TraversalScope) -> String {
    let mut out = Vec::new();
    let opts = SerializeOpts {
        traversal_scope,
        ..Default::default()
    };
    match serialize(&mut out, &SerializableHandle(node.clone()), opts) {
        Ok(()) => String::from_utf8_lossy(&out).into_owned(),
        Err(err) => {
            log::warn!("serialization failed: {err}");
            String::new()
        }
    }
}

/// Markup of the children of `node`.
pub fn inner_html(node: &Handle) -> String {
    write_html(node, TraversalScope::ChildrenOnly(None))
}

/// Markup of `node` itself. Fragments serialize as their children.
pub fn outer_html(node: &Handle) -> String {
    write_html(node, TraversalScope::IncludeNode)
}
