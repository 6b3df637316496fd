//! Catalogs describing inventory structure: container types,
//! inventory archetypes and equipment types.

use crate::catalog::{catalog, CatalogType, ResourceKey};

/// The kind of UI a container is shown as.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerType {
    key: ResourceKey,
    /// Slots backed by the viewed inventory. Zero for
    /// containers whose slots only exist in the container.
    size: u32,
}

impl ContainerType {
    pub const fn new(key: ResourceKey, size: u32) -> Self {
        Self { key, size }
    }

    pub fn size(&self) -> u32 {
        self.size
    }
}

impl CatalogType for ContainerType {
    fn key(&self) -> &ResourceKey {
        &self.key
    }
}

catalog! {
    /// Every vanilla container type.
    ContainerTypes: ContainerType {
        BLAST_FURNACE = ContainerType::new(ResourceKey::minecraft("blast_furnace"), 3),
        BREWING_STAND = ContainerType::new(ResourceKey::minecraft("brewing_stand"), 5),
        FURNACE = ContainerType::new(ResourceKey::minecraft("furnace"), 3),
        /// Dispenser and dropper.
        GENERIC_3X3 = ContainerType::new(ResourceKey::minecraft("generic_3x3"), 9),
        GENERIC_9X1 = ContainerType::new(ResourceKey::minecraft("generic_9x1"), 9),
        GENERIC_9X2 = ContainerType::new(ResourceKey::minecraft("generic_9x2"), 18),
        /// Single chest.
        GENERIC_9X3 = ContainerType::new(ResourceKey::minecraft("generic_9x3"), 27),
        GENERIC_9X4 = ContainerType::new(ResourceKey::minecraft("generic_9x4"), 36),
        GENERIC_9X5 = ContainerType::new(ResourceKey::minecraft("generic_9x5"), 45),
        /// Double chest.
        GENERIC_9X6 = ContainerType::new(ResourceKey::minecraft("generic_9x6"), 54),
        HOPPER = ContainerType::new(ResourceKey::minecraft("hopper"), 5),
        LECTERN = ContainerType::new(ResourceKey::minecraft("lectern"), 1),
        /// Shulker boxes may not be placed inside shulker boxes.
        SHULKER_BOX = ContainerType::new(ResourceKey::minecraft("shulker_box"), 27),
        SMOKER = ContainerType::new(ResourceKey::minecraft("smoker"), 3),
        ANVIL = ContainerType::new(ResourceKey::minecraft("anvil"), 0),
        BEACON = ContainerType::new(ResourceKey::minecraft("beacon"), 0),
        CARTOGRAPHY_TABLE = ContainerType::new(ResourceKey::minecraft("cartography_table"), 0),
        CRAFTING = ContainerType::new(ResourceKey::minecraft("crafting"), 0),
        ENCHANTMENT = ContainerType::new(ResourceKey::minecraft("enchantment"), 0),
        GRINDSTONE = ContainerType::new(ResourceKey::minecraft("grindstone"), 0),
        LOOM = ContainerType::new(ResourceKey::minecraft("loom"), 0),
        STONECUTTER = ContainerType::new(ResourceKey::minecraft("stonecutter"), 0),
        /// Only opened through a trader entity.
        MERCHANT = ContainerType::new(ResourceKey::minecraft("merchant"), 0),
    }
}

/// The structural class of an inventory node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InventoryArchetype {
    key: ResourceKey,
}

impl InventoryArchetype {
    pub const fn new(key: ResourceKey) -> Self {
        Self { key }
    }
}

impl CatalogType for InventoryArchetype {
    fn key(&self) -> &ResourceKey {
        &self.key
    }
}

catalog! {
    InventoryArchetypes: InventoryArchetype {
        /// Query results, unions and intersections.
        UNKNOWN = InventoryArchetype::new(ResourceKey::stockpile("unknown")),
        SLOT = InventoryArchetype::new(ResourceKey::stockpile("slot")),
        /// A linear run of slots.
        ROW = InventoryArchetype::new(ResourceKey::stockpile("row")),
        GRID = InventoryArchetype::new(ResourceKey::stockpile("grid")),
        EQUIPMENT = InventoryArchetype::new(ResourceKey::stockpile("equipment")),
        /// An inventory made of other inventories.
        COMPOSITE = InventoryArchetype::new(ResourceKey::stockpile("composite")),
        CONTAINER = InventoryArchetype::new(ResourceKey::stockpile("container")),
    }
}

/// Whether a piece of equipment is worn or held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EquipmentGroup {
    Worn,
    Held,
}

/// The kind of equipment a slot takes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EquipmentType {
    key: ResourceKey,
    group: EquipmentGroup,
}

impl EquipmentType {
    pub const fn new(key: ResourceKey, group: EquipmentGroup) -> Self {
        Self { key, group }
    }

    pub fn group(&self) -> EquipmentGroup {
        self.group
    }
}

impl CatalogType for EquipmentType {
    fn key(&self) -> &ResourceKey {
        &self.key
    }
}

catalog! {
    EquipmentTypes: EquipmentType {
        HEAD = EquipmentType::new(ResourceKey::minecraft("head"), EquipmentGroup::Worn),
        CHEST = EquipmentType::new(ResourceKey::minecraft("chest"), EquipmentGroup::Worn),
        LEGS = EquipmentType::new(ResourceKey::minecraft("legs"), EquipmentGroup::Worn),
        FEET = EquipmentType::new(ResourceKey::minecraft("feet"), EquipmentGroup::Worn),
        MAIN_HAND = EquipmentType::new(ResourceKey::minecraft("main_hand"), EquipmentGroup::Held),
        OFF_HAND = EquipmentType::new(ResourceKey::minecraft("off_hand"), EquipmentGroup::Held),
    }
}
