//! # Demo Seed
//!
//! The built-in demo board: twenty items stacked in the first column and
//! three empty columns to drag them into.

use crate::primitives::{DEMO_ITEM_COUNT, DEMO_ITEM_PREFIX};
use crate::{Column, EntityStore, Item, ItemId};

/// Column ids and titles of the demo board, in display order.
pub const DEMO_COLUMNS: [(&str, &str); 4] = [
    ("todo", "Disabled"),
    ("progress", "High Prio"),
    ("done", "Medium Prio"),
    ("last", "Low Prio"),
];

/// Build the demo board.
#[must_use]
pub fn demo_board() -> EntityStore {
    let items: Vec<Item> = (0..DEMO_ITEM_COUNT)
        .map(|n| {
            Item::new(
                format!("{}{}", DEMO_ITEM_PREFIX, n),
                format!("Translate to German {}", n),
            )
        })
        .collect();
    let all_ids: Vec<ItemId> = items.iter().map(|item| item.id.clone()).collect();

    let columns = DEMO_COLUMNS
        .iter()
        .enumerate()
        .map(|(position, (id, title))| {
            let item_ids = if position == 0 {
                all_ids.clone()
            } else {
                Vec::new()
            };
            Column::new(*id, *title, item_ids)
        })
        .collect();

    EntityStore::from_parts(columns, items)
}
