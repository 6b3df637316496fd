use std::collections::BTreeMap;

use nbt::Value;
use serde::{Deserialize, Serialize};

/// The root compound of an inventory file.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct InventoryRoot {
    /// Each entry in this list is a non-empty slot.
    #[serde(rename = "Items")]
    pub items: Vec<ItemSlot>,
}

/// An item stack together with the slot it sits in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSlot {
    /// Index of the slot within the inventory.
    #[serde(rename = "Slot")]
    pub slot: i8,
    /// The namespaced item ID.
    pub id: String,
    /// Number of items stacked in this slot.
    #[serde(rename = "Count")]
    pub count: i8,
    /// The data value for this item.
    #[serde(rename = "Damage", default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<i16>,
    /// This item's NBT data.
    #[serde(rename = "tag", default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<Value>,
}

/// Packs item data into a `tag` compound.
pub fn data_to_tag(data: &BTreeMap<String, Value>) -> Option<Value> {
    if data.is_empty() {
        return None;
    }
    Some(Value::Compound(
        data.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
    ))
}

/// Unpacks a `tag` compound. Anything but a compound carries no data.
pub fn tag_to_data(tag: Option<Value>) -> BTreeMap<String, Value> {
    match tag {
        Some(Value::Compound(compound)) => compound.into_iter().collect(),
        _ => BTreeMap::new(),
    }
}
