//! Leaf inventories holding at most one stack.

use std::ops::Deref;

use parking_lot::Mutex;
use stockpile_primitives::stack::ItemStack;

use crate::inventory::{Inventory, NodeKind};

pub(crate) struct SlotState {
    index: u32,
    contents: Mutex<ItemStack>,
}

impl SlotState {
    pub(crate) fn new(index: u32) -> Self {
        Self {
            index,
            contents: Mutex::new(ItemStack::empty()),
        }
    }
}

/// An inventory node that holds a single stack.
///
/// Derefs to [`Inventory`], so a slot can be queried and
/// offered to like any other inventory.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Slot(pub(crate) Inventory);

impl Slot {
    fn state(&self) -> &SlotState {
        let NodeKind::Slot(state) = &(self.0).0.kind else {
            unreachable!()
        };
        state
    }

    /// Position within the direct parent.
    pub fn index(&self) -> u32 {
        self.state().index
    }

    /// A copy of the held stack, or the empty marker.
    pub fn stack(&self) -> ItemStack {
        self.state().contents.lock().clone()
    }

    /// Quantity held, zero when empty.
    pub fn stack_size(&self) -> u32 {
        let contents = self.state().contents.lock();
        if contents.is_empty() {
            0
        } else {
            contents.quantity()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.state().contents.lock().is_empty()
    }

    pub fn max_stack_size(&self) -> u32 {
        self.0.config().max_stack_size
    }

    /// How many items like `stack` this slot can hold.
    pub(crate) fn limit_for(&self, stack: &ItemStack) -> u32 {
        stack.max_stack_quantity().min(self.max_stack_size())
    }

    /// Stores `stack` unchecked and returns what was held before.
    pub(crate) fn replace(&self, stack: ItemStack) -> ItemStack {
        let stack = if stack.is_empty() {
            ItemStack::empty()
        } else {
            stack
        };
        std::mem::replace(&mut *self.state().contents.lock(), stack)
    }

    pub fn as_inventory(&self) -> &Inventory {
        &self.0
    }

    pub fn into_inventory(self) -> Inventory {
        self.0
    }
}

impl Deref for Slot {
    type Target = Inventory;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
