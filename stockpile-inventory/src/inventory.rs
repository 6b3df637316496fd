//! The inventory tree.

use std::{
    fmt::Debug,
    hash::Hash,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, OnceLock, Weak,
    },
};

use ahash::AHashSet;
use stockpile_primitives::{
    archetype::{InventoryArchetype, InventoryArchetypes},
    item::ItemType,
    property::{InventoryKeys, Key, Properties, PropertyType},
    stack::ItemStack,
    text::Text,
};
use uuid::Uuid;

use crate::{
    carrier::Carrier,
    config::Config,
    slot::{Slot, SlotState},
};

/// Process-unique identity of an inventory node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

pub(crate) enum Parent {
    Itself,
    /// Structural parent. Weak so that trees do not keep themselves alive.
    Tree(Weak<Node>),
    /// The inventory a view was derived from.
    View(Inventory),
}

pub(crate) enum NodeKind {
    Empty,
    Slot(SlotState),
    Branch {
        children: Vec<Inventory>,
        /// Flattened leaves, deduplicated.
        slots: Vec<Slot>,
    },
}

pub(crate) struct Node {
    pub(crate) id: NodeId,
    pub(crate) parent: Parent,
    pub(crate) kind: NodeKind,
    pub(crate) archetype: InventoryArchetype,
    pub(crate) properties: Properties,
    pub(crate) config: Config,
    pub(crate) carrier: Option<Carrier>,
}

/// A handle to an inventory node.
///
/// Handles are cheap to clone and compare by identity. Slots are shared
/// between every inventory and view that contains them, so a change
/// made through one handle is visible through all of them.
#[derive(Clone)]
pub struct Inventory(pub(crate) Arc<Node>);

impl Inventory {
    /// The inventory with no slots and no children.
    pub fn empty() -> Inventory {
        static EMPTY: OnceLock<Inventory> = OnceLock::new();
        EMPTY
            .get_or_init(|| {
                Inventory(Arc::new(Node {
                    id: NodeId::next(),
                    parent: Parent::Itself,
                    kind: NodeKind::Empty,
                    archetype: InventoryArchetypes::UNKNOWN,
                    properties: Properties::new(),
                    config: Config::default(),
                    carrier: None,
                }))
            })
            .clone()
    }

    /// A view over `children` derived from `source`.
    pub(crate) fn view(source: &Inventory, children: Vec<Inventory>) -> Inventory {
        let mut seen = AHashSet::new();
        let children: Vec<Inventory> = children
            .into_iter()
            .filter(|child| seen.insert(child.id()))
            .collect();
        let slots = flatten_slots(&children);
        if slots.is_empty() {
            return Inventory::empty();
        }
        Inventory(Arc::new(Node {
            id: NodeId::next(),
            parent: Parent::View(source.clone()),
            kind: NodeKind::Branch { children, slots },
            archetype: InventoryArchetypes::UNKNOWN,
            properties: Properties::new(),
            config: source.0.config,
            carrier: None,
        }))
    }

    pub fn id(&self) -> NodeId {
        self.0.id
    }

    /// True for [`Inventory::empty`].
    pub fn is_empty_inventory(&self) -> bool {
        matches!(self.0.kind, NodeKind::Empty)
    }

    pub fn archetype(&self) -> &InventoryArchetype {
        &self.0.archetype
    }

    pub fn config(&self) -> &Config {
        &self.0.config
    }

    /// The structural parent, or the inventory a view was derived from.
    /// Top level inventories are their own parent.
    pub fn parent(&self) -> Inventory {
        match &self.0.parent {
            Parent::Itself => self.clone(),
            Parent::Tree(parent) => match parent.upgrade() {
                Some(parent) => Inventory(parent),
                None => self.clone(),
            },
            Parent::View(source) => source.clone(),
        }
    }

    pub fn root(&self) -> Inventory {
        let mut current = self.clone();
        loop {
            let parent = current.parent();
            if parent == current {
                return current;
            }
            current = parent;
        }
    }

    pub fn children(&self) -> Vec<Inventory> {
        match &self.0.kind {
            NodeKind::Branch { children, .. } => children.clone(),
            NodeKind::Slot(_) | NodeKind::Empty => Vec::new(),
        }
    }

    /// Every leaf slot under this node, depth first.
    pub fn slots(&self) -> Vec<Slot> {
        match &self.0.kind {
            NodeKind::Branch { slots, .. } => slots.clone(),
            NodeKind::Slot(_) => vec![Slot(self.clone())],
            NodeKind::Empty => Vec::new(),
        }
    }

    pub fn slot(&self, index: usize) -> Option<Slot> {
        match &self.0.kind {
            NodeKind::Branch { slots, .. } => slots.get(index).cloned(),
            NodeKind::Slot(_) if index == 0 => Some(Slot(self.clone())),
            _ => None,
        }
    }

    /// This node as a slot, if it is one.
    pub fn as_slot(&self) -> Option<Slot> {
        match &self.0.kind {
            NodeKind::Slot(_) => Some(Slot(self.clone())),
            _ => None,
        }
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        match &self.0.kind {
            NodeKind::Branch { slots, .. } => slots.len(),
            NodeKind::Slot(_) => 1,
            NodeKind::Empty => 0,
        }
    }

    /// Number of slots holding something.
    pub fn size(&self) -> usize {
        self.slots().iter().filter(|slot| !slot.is_empty()).count()
    }

    /// Number of empty slots.
    pub fn free_capacity(&self) -> usize {
        self.capacity() - self.size()
    }

    pub fn total_quantity(&self) -> u32 {
        self.slots().iter().map(Slot::stack_size).sum()
    }

    /// True if at least `stack.quantity()` items similar to `stack` are held.
    pub fn contains(&self, stack: &ItemStack) -> bool {
        if stack.is_empty() {
            return true;
        }
        let mut found = 0u32;
        for slot in self.slots() {
            let held = slot.stack();
            if !held.is_empty() && held.is_similar(stack) {
                found = found.saturating_add(held.quantity());
                if found >= stack.quantity() {
                    return true;
                }
            }
        }
        false
    }

    /// True if any item similar to `stack` is held, in any quantity.
    pub fn contains_any(&self, stack: &ItemStack) -> bool {
        self.slots().iter().any(|slot| {
            let held = slot.stack();
            !held.is_empty() && held.is_similar(stack)
        })
    }

    pub fn contains_type(&self, item_type: &ItemType) -> bool {
        self.slots().iter().any(|slot| {
            let held = slot.stack();
            !held.is_empty() && held.item_type() == item_type
        })
    }

    pub fn properties(&self) -> &Properties {
        &self.0.properties
    }

    pub fn get<V: PropertyType>(&self, key: &Key<V>) -> Option<V> {
        self.0.properties.get(key)
    }

    pub fn display_name(&self) -> Option<Text> {
        self.get(&InventoryKeys::DISPLAY_NAME)
    }

    pub fn unique_id(&self) -> Option<Uuid> {
        self.get(&InventoryKeys::UNIQUE_ID)
    }

    pub fn carrier(&self) -> Option<&Carrier> {
        self.0.carrier.as_ref()
    }
}

pub(crate) fn flatten_slots(children: &[Inventory]) -> Vec<Slot> {
    let mut seen = AHashSet::new();
    let mut slots = Vec::new();
    for child in children {
        for slot in child.slots() {
            if seen.insert(slot.id()) {
                slots.push(slot);
            }
        }
    }
    slots
}

impl PartialEq for Inventory {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Inventory {}

impl Hash for Inventory {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.id.hash(state);
    }
}

impl Debug for Inventory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Inventory")
            .field("id", &self.0.id)
            .field("archetype", &self.0.archetype)
            .field("capacity", &self.capacity())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use stockpile_primitives::{
        archetype::InventoryArchetypes,
        item::ItemTypes,
        property::InventoryKeys,
        position::GridPos,
        stack::ItemStack,
    };

    use super::Inventory;

    fn player_like() -> Inventory {
        Inventory::builder()
            .grid(9, 3)
            .slots(9)
            .complete_structure()
            .unwrap()
            .build()
    }

    #[test]
    fn tree_navigation() {
        let inventory = player_like();
        assert_eq!(inventory.capacity(), 36);
        assert_eq!(inventory.children().len(), 2);
        assert_eq!(inventory.archetype(), &InventoryArchetypes::COMPOSITE);
        assert_eq!(inventory.parent(), inventory);

        let grid = &inventory.children()[0];
        assert_eq!(grid.archetype(), &InventoryArchetypes::GRID);
        assert_eq!(grid.parent(), inventory);
        assert_eq!(grid.get(&InventoryKeys::GRID_SIZE), Some(GridPos::new(9, 3)));

        let slot = grid.slot(10).unwrap();
        assert_eq!(slot.index(), 10);
        assert_eq!(slot.get(&InventoryKeys::SLOT_POSITION), Some(GridPos::new(1, 1)));
        assert_eq!(slot.parent(), *grid);
        assert_eq!(slot.root(), inventory);
        assert_eq!(slot.capacity(), 1);
        assert!(slot.children().is_empty());

        // Slot order is the depth first concatenation of the children.
        assert_eq!(inventory.slot(27).unwrap(), inventory.children()[1].slot(0).unwrap());
    }

    #[test]
    fn counting() {
        let inventory = player_like();
        assert!(inventory.set(0, ItemStack::of(ItemTypes::STONE, 10)).is_success());
        assert!(inventory.set(5, ItemStack::of(ItemTypes::DIRT, 3)).is_success());
        assert_eq!(inventory.size(), 2);
        assert_eq!(inventory.free_capacity(), 34);
        assert_eq!(inventory.total_quantity(), 13);
        assert!(inventory.contains(&ItemStack::of(ItemTypes::STONE, 10)));
        assert!(!inventory.contains(&ItemStack::of(ItemTypes::STONE, 11)));
        assert!(inventory.contains_any(&ItemStack::of(ItemTypes::DIRT, 50)));
        assert!(inventory.contains_type(&ItemTypes::DIRT));
        assert!(!inventory.contains_type(&ItemTypes::ARROW));
    }

    #[test]
    fn empty_inventory_is_a_singleton() {
        let empty = Inventory::empty();
        assert_eq!(empty, Inventory::empty());
        assert!(empty.is_empty_inventory());
        assert_eq!(empty.capacity(), 0);
        assert_eq!(empty.parent(), empty);
        assert_eq!(empty.root(), empty);
        assert!(empty.children().is_empty());
        assert!(empty.peek().is_empty());
        assert!(empty.slot(0).is_none());
    }
}
