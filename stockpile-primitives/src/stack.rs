//! Item stacks and their immutable snapshots.

use std::collections::BTreeMap;

use nbt::Value;
use thiserror::Error;

use crate::item::{ItemType, ItemTypes};

#[derive(Error, Debug, PartialEq)]
pub enum ItemStackError {
    #[error("quantity {quantity} exceeds the maximum stack quantity of {max}")]
    QuantityAboveMaximum { quantity: u32, max: u32 },
    #[error("stack quantity must be at least 1")]
    ZeroQuantity,
    #[error("maximum stack quantity must be at least 1")]
    ZeroMaxStackQuantity,
    #[error("no item type was set")]
    MissingItemType,
    #[error("the empty stack cannot carry data (key {0:?})")]
    DataOnEmptyStack(String),
}
pub type ItemStackResult<T> = std::result::Result<T, ItemStackError>;

/// A mutable quantity of some item type, with keyed auxiliary data.
///
/// The quantity may exceed the maximum stack quantity. Inventories
/// split such stacks on insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemStack {
    item_type: ItemType,
    quantity: u32,
    max_stack_quantity: u32,
    data: BTreeMap<String, Value>,
}

impl ItemStack {
    /// The empty stack. Returned wherever "no item" has to be expressed.
    pub fn empty() -> Self {
        Self {
            item_type: ItemTypes::AIR,
            quantity: 0,
            max_stack_quantity: ItemTypes::AIR.max_stack_quantity(),
            data: BTreeMap::new(),
        }
    }

    /// A stack of `quantity` items of `item_type` without any data.
    pub fn of(item_type: ItemType, quantity: u32) -> Self {
        let max_stack_quantity = item_type.max_stack_quantity();
        Self {
            item_type,
            quantity,
            max_stack_quantity,
            data: BTreeMap::new(),
        }
    }

    pub fn builder() -> ItemStackBuilder {
        ItemStackBuilder::default()
    }

    pub fn item_type(&self) -> &ItemType {
        &self.item_type
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Sets the quantity of this stack.
    ///
    /// Fails if `quantity` exceeds [`ItemStack::max_stack_quantity`].
    pub fn set_quantity(&mut self, quantity: u32) -> ItemStackResult<()> {
        if quantity > self.max_stack_quantity {
            return Err(ItemStackError::QuantityAboveMaximum {
                quantity,
                max: self.max_stack_quantity,
            });
        }
        self.quantity = quantity;
        Ok(())
    }

    pub fn max_stack_quantity(&self) -> u32 {
        self.max_stack_quantity
    }

    /// Overrides the maximum stack quantity of the item type for this stack only.
    pub fn set_max_stack_quantity(&mut self, max: u32) -> ItemStackResult<()> {
        if max == 0 {
            return Err(ItemStackError::ZeroMaxStackQuantity);
        }
        self.max_stack_quantity = max;
        Ok(())
    }

    /// True if this stack holds nothing.
    pub fn is_empty(&self) -> bool {
        self.quantity == 0 || self.item_type.is_air()
    }

    /// Whether `other` could be merged into this stack:
    /// same type and same data, quantity ignored.
    pub fn is_similar(&self, other: &ItemStack) -> bool {
        self.item_type == other.item_type && self.data == other.data
    }

    /// A copy of this stack holding `quantity` items.
    /// Unlike [`ItemStack::set_quantity`], no maximum is enforced.
    pub fn with_quantity(&self, quantity: u32) -> Self {
        if quantity == 0 {
            return Self::empty();
        }
        Self {
            quantity,
            ..self.clone()
        }
    }

    pub fn data(&self) -> &BTreeMap<String, Value> {
        &self.data
    }

    pub fn get_data(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Attaches a data value, returning the previous value for `key`.
    pub fn set_data(&mut self, key: impl Into<String>, value: Value) -> ItemStackResult<Option<Value>> {
        let key = key.into();
        if self.is_empty() {
            return Err(ItemStackError::DataOnEmptyStack(key));
        }
        Ok(self.data.insert(key, value))
    }

    pub fn remove_data(&mut self, key: &str) -> Option<Value> {
        self.data.remove(key)
    }

    /// Captures the current state of this stack.
    pub fn snapshot(&self) -> ItemStackSnapshot {
        ItemStackSnapshot {
            stack: if self.is_empty() {
                Self::empty()
            } else {
                self.clone()
            },
        }
    }
}

impl Default for ItemStack {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<&ItemStackSnapshot> for ItemStack {
    fn from(snapshot: &ItemStackSnapshot) -> Self {
        snapshot.create_stack()
    }
}

/// An immutable capture of an [`ItemStack`].
///
/// Later changes to the stack it was taken from are not visible here.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemStackSnapshot {
    stack: ItemStack,
}

impl ItemStackSnapshot {
    pub fn empty() -> Self {
        Self {
            stack: ItemStack::empty(),
        }
    }

    pub fn item_type(&self) -> &ItemType {
        &self.stack.item_type
    }

    pub fn quantity(&self) -> u32 {
        self.stack.quantity
    }

    pub fn max_stack_quantity(&self) -> u32 {
        self.stack.max_stack_quantity
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn data(&self) -> &BTreeMap<String, Value> {
        &self.stack.data
    }

    /// Creates a fresh mutable stack from this snapshot.
    pub fn create_stack(&self) -> ItemStack {
        self.stack.clone()
    }
}

impl From<ItemStack> for ItemStackSnapshot {
    fn from(stack: ItemStack) -> Self {
        stack.snapshot()
    }
}

/// Builds [`ItemStack`]s. An item type must be set before building.
#[derive(Debug, Clone)]
pub struct ItemStackBuilder {
    item_type: Option<ItemType>,
    quantity: u32,
    max_stack_quantity: Option<u32>,
    data: BTreeMap<String, Value>,
}

impl Default for ItemStackBuilder {
    fn default() -> Self {
        Self {
            item_type: None,
            quantity: 1,
            max_stack_quantity: None,
            data: BTreeMap::new(),
        }
    }
}

impl ItemStackBuilder {
    pub fn item_type(&mut self, item_type: ItemType) -> &mut Self {
        self.item_type = Some(item_type);
        self
    }

    pub fn quantity(&mut self, quantity: u32) -> &mut Self {
        self.quantity = quantity;
        self
    }

    pub fn max_stack_quantity(&mut self, max: u32) -> &mut Self {
        self.max_stack_quantity = Some(max);
        self
    }

    pub fn data(&mut self, key: impl Into<String>, value: Value) -> &mut Self {
        self.data.insert(key.into(), value);
        self
    }

    /// Resets this builder to the state of a snapshot.
    pub fn from_snapshot(&mut self, snapshot: &ItemStackSnapshot) -> &mut Self {
        self.from_stack(&snapshot.stack)
    }

    /// Resets this builder to the state of a stack.
    pub fn from_stack(&mut self, stack: &ItemStack) -> &mut Self {
        self.item_type = Some(stack.item_type.clone());
        self.quantity = stack.quantity;
        self.max_stack_quantity = Some(stack.max_stack_quantity);
        self.data = stack.data.clone();
        self
    }

    pub fn reset(&mut self) -> &mut Self {
        *self = Self::default();
        self
    }

    pub fn build(&self) -> ItemStackResult<ItemStack> {
        let Some(item_type) = self.item_type.clone() else {
            return Err(ItemStackError::MissingItemType);
        };
        if self.quantity == 0 {
            return Err(ItemStackError::ZeroQuantity);
        }
        let mut stack = ItemStack::of(item_type, self.quantity);
        if let Some(max) = self.max_stack_quantity {
            stack.set_max_stack_quantity(max)?;
        }
        stack.data = self.data.clone();
        Ok(stack)
    }
}
