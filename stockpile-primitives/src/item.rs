//! Item types.

use std::fmt::Display;

use crate::catalog::{catalog, CatalogType, ResourceKey};

/// Represents a Minecraft item type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemType {
    key: ResourceKey,
    /// How many items of this type fit into one stack.
    max_stack_quantity: u32,
}

impl ItemType {
    pub const fn new(key: ResourceKey, max_stack_quantity: u32) -> Self {
        Self {
            key,
            max_stack_quantity,
        }
    }

    pub fn max_stack_quantity(&self) -> u32 {
        self.max_stack_quantity
    }

    /// Whether this is the type of the empty stack.
    pub fn is_air(&self) -> bool {
        self.key == ItemTypes::AIR.key
    }
}

impl CatalogType for ItemType {
    fn key(&self) -> &ResourceKey {
        &self.key
    }
}

impl Display for ItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.key, f)
    }
}

catalog! {
    /// Vanilla item types.
    ItemTypes: ItemType {
        /// The type of the empty stack.
        AIR = ItemType::new(ResourceKey::minecraft("air"), 64),
        STONE = ItemType::new(ResourceKey::minecraft("stone"), 64),
        COBBLESTONE = ItemType::new(ResourceKey::minecraft("cobblestone"), 64),
        DIRT = ItemType::new(ResourceKey::minecraft("dirt"), 64),
        OAK_LOG = ItemType::new(ResourceKey::minecraft("oak_log"), 64),
        TORCH = ItemType::new(ResourceKey::minecraft("torch"), 64),
        ARROW = ItemType::new(ResourceKey::minecraft("arrow"), 64),
        BREAD = ItemType::new(ResourceKey::minecraft("bread"), 64),
        COAL = ItemType::new(ResourceKey::minecraft("coal"), 64),
        IRON_INGOT = ItemType::new(ResourceKey::minecraft("iron_ingot"), 64),
        GOLD_INGOT = ItemType::new(ResourceKey::minecraft("gold_ingot"), 64),
        DIAMOND = ItemType::new(ResourceKey::minecraft("diamond"), 64),
        EGG = ItemType::new(ResourceKey::minecraft("egg"), 16),
        SNOWBALL = ItemType::new(ResourceKey::minecraft("snowball"), 16),
        ENDER_PEARL = ItemType::new(ResourceKey::minecraft("ender_pearl"), 16),
        BOW = ItemType::new(ResourceKey::minecraft("bow"), 1),
        SHIELD = ItemType::new(ResourceKey::minecraft("shield"), 1),
        DIAMOND_SWORD = ItemType::new(ResourceKey::minecraft("diamond_sword"), 1),
        DIAMOND_PICKAXE = ItemType::new(ResourceKey::minecraft("diamond_pickaxe"), 1),
        DIAMOND_HELMET = ItemType::new(ResourceKey::minecraft("diamond_helmet"), 1),
        DIAMOND_CHESTPLATE = ItemType::new(ResourceKey::minecraft("diamond_chestplate"), 1),
        DIAMOND_LEGGINGS = ItemType::new(ResourceKey::minecraft("diamond_leggings"), 1),
        DIAMOND_BOOTS = ItemType::new(ResourceKey::minecraft("diamond_boots"), 1),
    }
}

#[cfg(test)]
mod tests {
    use super::ItemTypes;

    #[test]
    fn registry_resolves_constants() {
        let registry = ItemTypes::registry();
        assert_eq!(registry.lookup("minecraft:stone"), Some(&ItemTypes::STONE));
        assert_eq!(registry.lookup("ender_pearl").map(|t| t.max_stack_quantity()), Some(16));
        assert!(registry.lookup("minecraft:nonexistent").is_none());
        assert!(ItemTypes::AIR.is_air());
        assert!(!ItemTypes::DIRT.is_air());
    }
}
