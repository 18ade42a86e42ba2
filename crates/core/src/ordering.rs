//! Dense display order for product lines.
//!
//! Product lines carry an `order` position chosen at creation time and
//! rewritten by explicit reorders. Records written before the field existed
//! have no position and are backfilled from their place in the file.
//!
//! Positions are not compacted: deleting a product line leaves a gap, and a
//! reorder may assign the same position twice. Sorting is stable, so ties
//! keep their stored order.

use std::collections::HashMap;

use crate::{ProductLine, ProductLineId};

/// Position for a newly created product line: one past the current maximum,
/// or zero for an empty collection.
#[must_use]
pub fn next_order<I>(orders: I) -> u32
where
    I: IntoIterator<Item = u32>,
{
    orders
        .into_iter()
        .max()
        .map_or(0, |max| max.saturating_add(1))
}

/// Sort product lines ascending by `order`, keeping ties in their current
/// relative order.
pub fn sort_by_order(lines: &mut [ProductLine]) {
    lines.sort_by_key(|line| line.order);
}

/// Apply a reorder map to the product lines it names.
///
/// Ids absent from `lines` are ignored. Returns how many records changed.
pub fn apply_reorder(lines: &mut [ProductLine], order_map: &HashMap<ProductLineId, u32>) -> usize {
    let mut changed = 0;
    for line in lines.iter_mut() {
        match order_map.get(&line.id) {
            Some(&order) if order != line.order => {
                line.order = order;
                changed += 1;
            }
            _ => {}
        }
    }
    changed
}

/// Fill empty slots with their index. Returns how many slots were filled.
pub fn backfill_missing<'a, I>(slots: I) -> usize
where
    I: IntoIterator<Item = &'a mut Option<u32>>,
{
    let mut filled = 0;
    for (index, slot) in slots.into_iter().enumerate() {
        if slot.is_none() {
            *slot = Some(u32::try_from(index).unwrap_or(u32::MAX));
            filled += 1;
        }
    }
    filled
}
