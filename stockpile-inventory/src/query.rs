//! Queries and set operations producing inventory views.

use std::{fmt::Debug, sync::Arc};

use ahash::AHashSet;
use stockpile_primitives::{
    archetype::InventoryArchetype,
    catalog::ResourceKey,
    item::ItemType,
    property::{Key, Operator, PropertyType, PropertyValue},
    stack::ItemStack,
};

use crate::{inventory::Inventory, slot::Slot};

pub type SlotPredicate = Arc<dyn Fn(&Slot) -> bool + Send + Sync>;

/// Selects nodes of an inventory tree.
///
/// Item queries only match slots. Other queries match any node, and a
/// matched node is taken as a whole without looking at its children.
#[derive(Clone)]
pub enum Query {
    /// Slots holding this item type.
    ItemType(ItemType),
    /// Slots holding exactly this stack.
    ItemStack(ItemStack),
    /// Slots holding a stack similar to this one.
    ItemStackIgnoreQuantity(ItemStack),
    Property {
        key: ResourceKey,
        value: PropertyValue,
        operator: Operator,
    },
    Archetype(InventoryArchetype),
    /// Nodes whose plain display name is this.
    Name(String),
    Predicate(SlotPredicate),
    All(Vec<Query>),
    Any(Vec<Query>),
}

impl Query {
    pub fn item_type(item_type: ItemType) -> Self {
        Self::ItemType(item_type)
    }

    pub fn stack(stack: ItemStack) -> Self {
        Self::ItemStack(stack)
    }

    pub fn stack_ignoring_quantity(stack: ItemStack) -> Self {
        Self::ItemStackIgnoreQuantity(stack)
    }

    pub fn property<V: PropertyType>(key: &Key<V>, value: V, operator: Operator) -> Self {
        Self::Property {
            key: key.key().clone(),
            value: value.into_property(),
            operator,
        }
    }

    pub fn archetype(archetype: InventoryArchetype) -> Self {
        Self::Archetype(archetype)
    }

    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    pub fn predicate(predicate: impl Fn(&Slot) -> bool + Send + Sync + 'static) -> Self {
        Self::Predicate(Arc::new(predicate))
    }

    pub fn and(self, other: Query) -> Self {
        match self {
            Self::All(mut queries) => {
                queries.push(other);
                Self::All(queries)
            }
            query => Self::All(vec![query, other]),
        }
    }

    pub fn or(self, other: Query) -> Self {
        match self {
            Self::Any(mut queries) => {
                queries.push(other);
                Self::Any(queries)
            }
            query => Self::Any(vec![query, other]),
        }
    }

    pub fn matches(&self, node: &Inventory) -> bool {
        match self {
            Self::ItemType(item_type) => held(node)
                .map(|stack| stack.item_type() == item_type)
                .unwrap_or(false),
            Self::ItemStack(expected) => held(node)
                .map(|stack| &stack == expected)
                .unwrap_or(false),
            Self::ItemStackIgnoreQuantity(expected) => held(node)
                .map(|stack| stack.is_similar(expected))
                .unwrap_or(false),
            Self::Property {
                key,
                value,
                operator,
            } => node
                .properties()
                .raw(key)
                .map(|stored| operator.matches(stored, value))
                .unwrap_or(false),
            Self::Archetype(archetype) => node.archetype() == archetype,
            Self::Name(name) => node
                .display_name()
                .map(|display| display.to_plain() == *name)
                .unwrap_or(false),
            Self::Predicate(predicate) => node.as_slot().map(|slot| predicate(&slot)).unwrap_or(false),
            Self::All(queries) => queries.iter().all(|query| query.matches(node)),
            Self::Any(queries) => queries.iter().any(|query| query.matches(node)),
        }
    }
}

/// The non-empty stack held by `node`, if it is a slot.
fn held(node: &Inventory) -> Option<ItemStack> {
    node.as_slot()
        .map(|slot| slot.stack())
        .filter(|stack| !stack.is_empty())
}

impl Debug for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ItemType(item_type) => f.debug_tuple("ItemType").field(item_type).finish(),
            Self::ItemStack(stack) => f.debug_tuple("ItemStack").field(stack).finish(),
            Self::ItemStackIgnoreQuantity(stack) => {
                f.debug_tuple("ItemStackIgnoreQuantity").field(stack).finish()
            }
            Self::Property {
                key,
                value,
                operator,
            } => f
                .debug_struct("Property")
                .field("key", key)
                .field("value", value)
                .field("operator", operator)
                .finish(),
            Self::Archetype(archetype) => f.debug_tuple("Archetype").field(archetype).finish(),
            Self::Name(name) => f.debug_tuple("Name").field(name).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
            Self::All(queries) => f.debug_tuple("All").field(queries).finish(),
            Self::Any(queries) => f.debug_tuple("Any").field(queries).finish(),
        }
    }
}

impl Inventory {
    /// A view over the nodes matching `query`, or the empty
    /// inventory if nothing matched.
    pub fn query(&self, query: &Query) -> Inventory {
        if self.is_empty_inventory() {
            return self.clone();
        }
        let mut matched = Vec::new();
        if self.as_slot().is_some() {
            if query.matches(self) {
                matched.push(self.clone());
            }
        } else {
            collect(self, query, &mut matched);
        }
        Inventory::view(self, matched)
    }

    /// The slots present in both inventories, in this inventory's order.
    pub fn intersect(&self, other: &Inventory) -> Inventory {
        if self.is_empty_inventory() {
            return self.clone();
        }
        let theirs: AHashSet<_> = other.slots().iter().map(|slot| slot.id()).collect();
        let common = self
            .slots()
            .into_iter()
            .filter(|slot| theirs.contains(&slot.id()))
            .map(Slot::into_inventory)
            .collect();
        Inventory::view(self, common)
    }

    /// This inventory's slots followed by those of `other`
    /// not already present.
    pub fn union(&self, other: &Inventory) -> Inventory {
        let slots = self
            .slots()
            .into_iter()
            .chain(other.slots())
            .map(Slot::into_inventory)
            .collect();
        Inventory::view(self, slots)
    }

    /// True if `other` is this node or one of its structural descendants.
    pub fn contains_inventory(&self, other: &Inventory) -> bool {
        self == other
            || self
                .children()
                .iter()
                .any(|child| child.contains_inventory(other))
    }
}

fn collect(node: &Inventory, query: &Query, matched: &mut Vec<Inventory>) {
    for child in node.children() {
        if query.matches(&child) {
            matched.push(child);
        } else {
            collect(&child, query, matched);
        }
    }
}

#[cfg(test)]
mod tests {
    use stockpile_primitives::{
        archetype::InventoryArchetypes,
        item::ItemTypes,
        property::{InventoryKeys, Operator},
        position::GridPos,
        stack::ItemStack,
        text::Text,
    };

    use super::Query;
    use crate::inventory::Inventory;

    fn chest() -> Inventory {
        let chest = Inventory::builder()
            .grid(9, 3)
            .title(Text::of("Chest"))
            .complete_structure()
            .unwrap()
            .build();
        assert!(chest.set(0, ItemStack::of(ItemTypes::STONE, 10)).is_success());
        assert!(chest.set(4, ItemStack::of(ItemTypes::DIRT, 3)).is_success());
        assert!(chest.set(9, ItemStack::of(ItemTypes::STONE, 64)).is_success());
        chest
    }

    #[test]
    fn item_queries() {
        let chest = chest();
        let stone = chest.query(&Query::item_type(ItemTypes::STONE));
        assert_eq!(stone.capacity(), 2);
        assert_eq!(stone.total_quantity(), 74);
        assert_eq!(stone.parent(), chest);
        assert_eq!(stone.archetype(), &InventoryArchetypes::UNKNOWN);

        let exact = chest.query(&Query::stack(ItemStack::of(ItemTypes::STONE, 10)));
        assert_eq!(exact.capacity(), 1);
        assert_eq!(exact.slots()[0], chest.slot(0).unwrap());

        let similar =
            chest.query(&Query::stack_ignoring_quantity(ItemStack::of(ItemTypes::STONE, 1)));
        assert_eq!(similar.capacity(), 2);
    }

    #[test]
    fn slots_query_themselves() {
        let row = Inventory::builder()
            .slots(3)
            .complete_structure()
            .unwrap()
            .build();
        assert!(row.set(1, ItemStack::of(ItemTypes::STONE, 5)).is_success());
        let slot = row.slot(1).unwrap();

        let found = slot.query(&Query::item_type(ItemTypes::STONE));
        assert_eq!(found.capacity(), 1);
        assert_eq!(found.slots()[0], slot);
        assert_eq!(found.total_quantity(), 5);
        assert_eq!(slot.query(&Query::item_type(ItemTypes::DIRT)), Inventory::empty());
        assert_eq!(
            row.slot(0).unwrap().query(&Query::item_type(ItemTypes::STONE)),
            Inventory::empty()
        );
    }

    #[test]
    fn views_share_slots() {
        let chest = chest();
        let dirt = chest.query(&Query::item_type(ItemTypes::DIRT));
        let polled = dirt.poll();
        assert!(polled.is_success());
        assert!(chest.peek_at(4).is_empty());
    }

    #[test]
    fn no_match_gives_the_empty_inventory() {
        let chest = chest();
        let none = chest.query(&Query::item_type(ItemTypes::DIAMOND));
        assert_eq!(none, Inventory::empty());
        assert!(!none.offer(ItemStack::of(ItemTypes::DIAMOND, 1)).is_success());
        assert_eq!(none.query(&Query::item_type(ItemTypes::STONE)), Inventory::empty());
    }

    #[test]
    fn property_queries() {
        let chest = chest();
        let second_row = chest.query(&Query::property(
            &InventoryKeys::SLOT_POSITION,
            GridPos::new(0, 1),
            Operator::GreaterOrEqual,
        ));
        assert_eq!(second_row.capacity(), 18);
        assert_eq!(second_row.slots()[0], chest.slot(9).unwrap());

        let first_three = chest.query(&Query::property(&InventoryKeys::SLOT_INDEX, 3, Operator::Less));
        assert_eq!(first_three.capacity(), 3);
    }

    #[test]
    fn structural_queries() {
        let chest = chest();
        let player = Inventory::builder()
            .grid(9, 3)
            .slots(9)
            .complete_structure()
            .unwrap()
            .build();
        let both = Inventory::builder()
            .inventory(&chest)
            .inventory(&player)
            .complete_structure()
            .unwrap()
            .build();

        let named = both.query(&Query::name("Chest"));
        assert_eq!(named.capacity(), 27);
        assert_eq!(named.children(), vec![chest.clone()]);

        // The chest is itself a grid; the player inventory holds one.
        let grids = both.query(&Query::archetype(InventoryArchetypes::GRID));
        assert_eq!(grids.capacity(), 54);
        assert_eq!(grids.children()[0], chest);
        let rows = both.query(&Query::archetype(InventoryArchetypes::ROW));
        assert_eq!(rows.capacity(), 9);
    }

    #[test]
    fn combined_queries() {
        let chest = chest();
        let query = Query::item_type(ItemTypes::STONE)
            .and(Query::predicate(|slot| slot.stack_size() > 32));
        assert_eq!(chest.query(&query).capacity(), 1);

        let query = Query::item_type(ItemTypes::DIRT).or(Query::item_type(ItemTypes::STONE));
        let found = chest.query(&query);
        assert_eq!(found.capacity(), 3);
        assert_eq!(found.slots()[1], chest.slot(4).unwrap());
    }

    #[test]
    fn set_operations() {
        let chest = chest();
        let stone = chest.query(&Query::item_type(ItemTypes::STONE));
        let first_five = chest.query(&Query::property(&InventoryKeys::SLOT_INDEX, 5, Operator::Less));

        let both = stone.intersect(&first_five);
        assert_eq!(both.capacity(), 1);
        assert_eq!(both.slots()[0], chest.slot(0).unwrap());

        let either = first_five.union(&stone);
        assert_eq!(either.capacity(), 6);
        assert_eq!(either.slots()[5], chest.slot(9).unwrap());

        let empty = Inventory::empty();
        assert_eq!(empty.intersect(&chest), empty);
        assert_eq!(chest.intersect(&empty), empty);
        assert_eq!(empty.union(&stone).slots(), stone.slots());
    }

    #[test]
    fn containment_is_structural() {
        let chest = chest();
        let slot = chest.slot(3).unwrap();
        assert!(chest.contains_inventory(&chest));
        assert!(chest.contains_inventory(&slot));
        assert!(!slot.contains_inventory(&chest));

        let view = chest.query(&Query::item_type(ItemTypes::STONE));
        assert!(!chest.contains_inventory(&view));
        assert!(view.contains_inventory(&chest.slot(0).unwrap()));
    }
}
