use std::{fs::File, io, path::PathBuf};

use ::nbt::{from_gzip_reader, to_gzip_writer, Value};
use crate::nbt::inventory::{data_to_tag, tag_to_data, InventoryRoot, ItemSlot};
use stockpile_inventory::Inventory;
use stockpile_primitives::{catalog::CatalogType, item::ItemTypes, stack::ItemStack};
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

pub mod nbt;

/// Item data key the `Damage` field is kept under.
const DAMAGE_KEY: &str = "Damage";

/// Represents a folder of saved inventories, one gzip NBT file each,
/// named after the inventory's unique id.
pub struct InventoryStore {
    /// The store directory.
    directory: PathBuf,
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    IOError(io::Error),
    #[error("NBT error: {0}")]
    NBTError(::nbt::Error),
    #[error("unknown item id {0}")]
    UnknownItem(String),
    #[error("slot {slot} out of range for an inventory of {capacity} slots")]
    SlotOutOfRange { slot: i64, capacity: usize },
    #[error("stack of {0} items does not fit in a byte")]
    QuantityOverflow(u32),
    #[error("inventory has no unique id")]
    MissingIdentity,
}
pub type StoreResult<T> = std::result::Result<T, StoreError>;

impl InventoryStore {
    pub fn open(directory: PathBuf) -> Self {
        Self { directory }
    }

    fn path(&self, id: Uuid) -> PathBuf {
        let mut path = self.directory.clone();
        path.push(format!("{id}.dat"));
        path
    }

    pub fn exists(&self, id: Uuid) -> bool {
        self.path(id).exists()
    }

    /// Saves an inventory under its unique id.
    pub fn save(&self, inventory: &Inventory) -> StoreResult<()> {
        let id = inventory.unique_id().ok_or(StoreError::MissingIdentity)?;
        self.save_as(id, inventory)
    }

    /// Saves an inventory under `id`.
    pub fn save_as(&self, id: Uuid, inventory: &Inventory) -> StoreResult<()> {
        let root = to_root(inventory)?;
        std::fs::create_dir_all(&self.directory).map_err(StoreError::IOError)?;
        let mut file = File::create(self.path(id)).map_err(StoreError::IOError)?;
        to_gzip_writer(&mut file, &root, None).map_err(StoreError::NBTError)?;
        debug!("saved {} stacks of inventory {}", root.items.len(), id);
        Ok(())
    }

    /// Restores the contents saved under the inventory's unique id.
    /// Returns `false` if nothing was saved.
    pub fn load_into(&self, inventory: &Inventory) -> StoreResult<bool> {
        let id = inventory.unique_id().ok_or(StoreError::MissingIdentity)?;
        self.load_into_as(id, inventory)
    }

    /// Restores the contents saved under `id` into `inventory`,
    /// replacing whatever it held. Returns `false` if nothing was saved.
    pub fn load_into_as(&self, id: Uuid, inventory: &Inventory) -> StoreResult<bool> {
        let path = self.path(id);
        if !path.exists() {
            return Ok(false);
        }
        let file = File::open(path).map_err(StoreError::IOError)?;
        let root: InventoryRoot = from_gzip_reader(file).map_err(StoreError::NBTError)?;
        apply_root(root, inventory)?;
        Ok(true)
    }
}

/// Captures the non-empty slots of an inventory.
pub fn to_root(inventory: &Inventory) -> StoreResult<InventoryRoot> {
    let capacity = inventory.capacity();
    let mut items = Vec::new();
    for (index, slot) in inventory.slots().into_iter().enumerate() {
        let stack = slot.stack();
        if stack.is_empty() {
            continue;
        }
        let slot = i8::try_from(index).map_err(|_| StoreError::SlotOutOfRange {
            slot: index as i64,
            capacity,
        })?;
        let count =
            i8::try_from(stack.quantity()).map_err(|_| StoreError::QuantityOverflow(stack.quantity()))?;
        let mut data = stack.data().clone();
        let damage = match data.remove(DAMAGE_KEY) {
            Some(Value::Short(damage)) => Some(damage),
            Some(other) => {
                data.insert(DAMAGE_KEY.to_string(), other);
                None
            }
            None => None,
        };
        items.push(ItemSlot {
            slot,
            id: stack.item_type().key().to_string(),
            count,
            damage,
            tag: data_to_tag(&data),
        });
    }
    Ok(InventoryRoot { items })
}

/// Replaces the contents of `inventory` with the stacks in `root`.
///
/// Every entry is checked before anything is changed, so a bad
/// entry leaves the inventory untouched.
pub fn apply_root(root: InventoryRoot, inventory: &Inventory) -> StoreResult<()> {
    let capacity = inventory.capacity();
    let mut stacks = Vec::with_capacity(root.items.len());
    for entry in root.items {
        if entry.slot < 0 || entry.slot as usize >= capacity {
            return Err(StoreError::SlotOutOfRange {
                slot: entry.slot.into(),
                capacity,
            });
        }
        let Some(item_type) = ItemTypes::registry().lookup(&entry.id) else {
            return Err(StoreError::UnknownItem(entry.id));
        };
        if entry.count <= 0 {
            warn!("skipping empty stack of {} in slot {}", entry.id, entry.slot);
            continue;
        }
        let mut stack = ItemStack::of(item_type.clone(), entry.count as u32);
        for (key, value) in tag_to_data(entry.tag) {
            // Cannot fail, the stack is not empty.
            let _ = stack.set_data(key, value);
        }
        if let Some(damage) = entry.damage {
            let _ = stack.set_data(DAMAGE_KEY, Value::Short(damage));
        }
        stacks.push((entry.slot as usize, stack));
    }

    let cleared = inventory.clear();
    debug!("cleared {} slots before loading", cleared.slot_transactions().len());
    for (index, stack) in stacks {
        let result = inventory.set(index, stack);
        for rejected in result.rejected_items() {
            warn!(
                "dropped {} x{} that did not fit in slot {}",
                rejected.item_type(),
                rejected.quantity(),
                index
            );
        }
    }
    Ok(())
}
