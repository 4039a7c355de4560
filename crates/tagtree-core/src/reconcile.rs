//! List reconciliation.
//!
//! A content hole bound to a list keeps one [`ListItem`] per entry. On
//! update, new entries are matched to old items by value, old hole items
//! left over are recycled for new entries of the same template, the rest
//! is rendered fresh, and [`diff`] moves the DOM from the old unit order to
//! the new one with few insertions and removals.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::dom::{DomError, Handle};
use crate::engine::Engine;
use crate::error::{Result, TagtreeError};
use crate::fragment::Unit;
use crate::instance::Instance;
use crate::template::TemplateId;
use crate::value::Value;

/// One rendered list entry.
pub(crate) struct ListItem {
    key: Value,
    unit: Unit,
    instance: Option<Box<Instance>>,
}

impl ListItem {
    pub(crate) fn unit(&self) -> &Unit {
        &self.unit
    }

    fn template_id(&self) -> Option<TemplateId> {
        self.instance.as_ref().and_then(|instance| instance.template_id())
    }
}

/// Counts of the DOM operations one [`diff`] performed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffOps {
    pub inserted: usize,
    pub removed: usize,
    pub replaced: usize,
    pub swapped: usize,
}

/// Brings the children of `parent` that belong to the list in line with
/// `values`, inserting before `anchor`. `items` holds the rendered entries
/// in order and is left as it was when an entry fails to render.
pub(crate) fn reconcile(
    engine: &Engine,
    parent: &Handle,
    anchor: &Handle,
    items: &mut Vec<ListItem>,
    values: &[Value],
) -> Result<()> {
    if items.is_empty() && values.is_empty() {
        return Ok(());
    }

    let mut old_units: Vec<Unit> = items.iter().map(|item| item.unit.clone()).collect();
    let mut slots: Vec<Option<ListItem>> = std::mem::take(items).into_iter().map(Some).collect();

    let mut placed = Vec::with_capacity(values.len());
    let recycled = match place(engine, &mut slots, &mut placed, values) {
        Ok(recycled) => recycled,
        Err(err) => {
            // fresh entries were never inserted; old ones go back to their slots
            for (origin, item) in placed {
                if let Some(index) = origin {
                    slots[index] = Some(item);
                }
            }
            *items = slots.into_iter().flatten().collect();
            return Err(err);
        }
    };

    let new_units: Vec<Unit> = placed.iter().map(|(_, item)| item.unit.clone()).collect();
    let ops = diff(
        parent,
        &mut old_units,
        &new_units,
        anchor,
        engine.config().reconcile.swap_fast_path,
    )?;

    let mut dropped = 0;
    for item in slots.into_iter().flatten() {
        if item.unit.parent().as_ref() == Some(parent) {
            item.unit.remove()?;
        }
        dropped += 1;
    }

    *items = placed.into_iter().map(|(_, item)| item).collect();
    log::trace!(
        "reconciled list: {} items, {} recycled, {} dropped, {:?}",
        items.len(),
        recycled,
        dropped,
        ops
    );
    Ok(())
}

/// Fills `placed` with one item per value, each tagged with the old slot it
/// came from. Returns how many old items were recycled for a new value.
fn place(
    engine: &Engine,
    slots: &mut [Option<ListItem>],
    placed: &mut Vec<(Option<usize>, ListItem)>,
    values: &[Value],
) -> Result<usize> {
    // first come, first served among equal keys
    let claims: Vec<Option<usize>> = {
        let mut by_key: HashMap<&Value, VecDeque<usize>> = HashMap::new();
        for (index, item) in slots.iter().enumerate() {
            if let Some(item) = item {
                by_key.entry(&item.key).or_default().push_back(index);
            }
        }
        values
            .iter()
            .map(|value| by_key.get_mut(value).and_then(VecDeque::pop_front))
            .collect()
    };

    let mut claimed = vec![false; slots.len()];
    for index in claims.iter().flatten() {
        claimed[*index] = true;
    }
    let mut spare: HashMap<TemplateId, VecDeque<usize>> = HashMap::new();
    for (index, item) in slots.iter().enumerate() {
        if let (false, Some(id)) = (claimed[index], item.as_ref().and_then(ListItem::template_id)) {
            spare.entry(id).or_default().push_back(index);
        }
    }

    let mut seen_nodes = HashSet::new();
    let mut recycled = 0;

    for (index, (value, claim)) in values.iter().zip(&claims).enumerate() {
        if let Value::Node(node) = value
            && !seen_nodes.insert(node.clone())
        {
            return Err(TagtreeError::InvalidListItem {
                index,
                found: "node that is already in the list",
            });
        }

        if let Some(slot) = *claim
            && let Some(item) = slots[slot].take()
        {
            placed.push((Some(slot), item));
            continue;
        }

        let spare_slot = match value {
            Value::Hole(hole) => spare.get_mut(&hole.id()).and_then(VecDeque::pop_front),
            _ => None,
        };

        match (value, spare_slot.and_then(|slot| Some((slot, slots[slot].take()?)))) {
            (Value::Hole(hole), Some((slot, mut item))) => {
                if let Some(instance) = item.instance.as_mut() {
                    match instance.update(engine, hole) {
                        Ok(unit) => item.unit = unit,
                        Err(err) => {
                            slots[slot] = Some(item);
                            return Err(err);
                        }
                    }
                }
                item.key = value.clone();
                recycled += 1;
                placed.push((Some(slot), item));
            }
            _ => placed.push((None, render_item(engine, value, index)?)),
        }
    }
    Ok(recycled)
}

fn render_item(engine: &Engine, value: &Value, index: usize) -> Result<ListItem> {
    let (unit, instance) = match value {
        Value::Hole(hole) => {
            let (instance, unit) = Instance::create(engine, hole)?;
            (unit, Some(Box::new(instance)))
        }
        Value::Node(node) => (Unit::Node(node.clone()), None),
        Value::List(_) | Value::Map(_) | Value::Listener(_) | Value::Ref(_) => {
            return Err(TagtreeError::InvalidListItem {
                index,
                found: value.type_name(),
            });
        }
        primitive => (
            Unit::Node(engine.document().create_text(primitive.to_text())),
            None,
        ),
    };
    Ok(ListItem {
        key: value.clone(),
        unit,
        instance,
    })
}

/// Rewrites the DOM from unit order `a` to unit order `b`.
///
/// Units in `b` that are not in the DOM yet are inserted, units of `a`
/// missing from `b` are removed. `before` is the node the whole list sits
/// in front of. `a` is used as scratch space.
pub fn diff(
    parent: &Handle,
    a: &mut [Unit],
    b: &[Unit],
    before: &Handle,
    swap_fast_path: bool,
) -> std::result::Result<DiffOps, DomError> {
    let b_length = b.len();
    let mut a_end = a.len();
    let mut b_end = b_length;
    let mut a_start = 0;
    let mut b_start = 0;
    let mut future: Option<HashMap<Handle, usize>> = None;
    let mut ops = DiffOps::default();

    while a_start < a_end || b_start < b_end {
        if a_end == a_start {
            // whatever is left of `b` goes in one run
            let node = if b_end < b_length {
                if b_start > 0 {
                    b[b_start - 1].last().next_sibling()
                } else {
                    Some(b[b_end - b_start].first())
                }
            } else {
                Some(before.clone())
            };
            while b_start < b_end {
                b[b_start].insert_before(parent, node.as_ref())?;
                b_start += 1;
                ops.inserted += 1;
            }
        } else if b_end == b_start {
            // whatever is left of `a` goes, unless `b` still uses it
            while a_start < a_end {
                let live = future
                    .as_ref()
                    .is_some_and(|future| future.contains_key(&a[a_start].first()));
                if !live {
                    a[a_start].remove()?;
                    ops.removed += 1;
                }
                a_start += 1;
            }
        } else if a[a_start].same(&b[b_start]) {
            a_start += 1;
            b_start += 1;
        } else if a[a_end - 1].same(&b[b_end - 1]) {
            a_end -= 1;
            b_end -= 1;
        } else if swap_fast_path
            && a[a_start].same(&b[b_end - 1])
            && b[b_start].same(&a[a_end - 1])
        {
            a_end -= 1;
            let node = a[a_end].last().next_sibling();
            let reference = a[a_start].last().next_sibling();
            b[b_start].insert_before(parent, reference.as_ref())?;
            a_start += 1;
            b_start += 1;
            b_end -= 1;
            b[b_end].insert_before(parent, node.as_ref())?;
            // the slot now matches and will be skipped as a same tail
            a[a_end] = b[b_end].clone();
            ops.swapped += 1;
        } else {
            let future = future.get_or_insert_with(|| {
                (b_start..b_end).map(|i| (b[i].first(), i)).collect()
            });
            match future.get(&a[a_start].first()).copied() {
                Some(index) if b_start < index && index < b_end => {
                    let mut i = a_start;
                    let mut sequence = 1;
                    loop {
                        i += 1;
                        let continues = i < a_end
                            && i < b_end
                            && future.get(&a[i].first()) == Some(&(index + sequence));
                        if !continues {
                            break;
                        }
                        sequence += 1;
                    }

                    if sequence > index - b_start {
                        // cheaper to insert the gap and realign on the run
                        let node = a[a_start].first();
                        while b_start < index {
                            b[b_start].insert_before(parent, Some(&node))?;
                            b_start += 1;
                            ops.inserted += 1;
                        }
                    } else {
                        b[b_start].insert_before(parent, Some(&a[a_start].first()))?;
                        a[a_start].remove()?;
                        a_start += 1;
                        b_start += 1;
                        ops.replaced += 1;
                    }
                }
                Some(_) => a_start += 1,
                None => {
                    a[a_start].remove()?;
                    a_start += 1;
                    ops.removed += 1;
                }
            }
        }
    }
    Ok(ops)
}
