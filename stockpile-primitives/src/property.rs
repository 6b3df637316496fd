//! Typed properties attached to inventories and slots.

use std::{cmp::Ordering, marker::PhantomData};

use ahash::AHashMap;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    archetype::EquipmentType,
    catalog::ResourceKey,
    position::GridPos,
    text::Text,
};

/// A key for a property whose values are of type `V`.
#[derive(Debug)]
pub struct Key<V> {
    key: ResourceKey,
    _value: PhantomData<fn() -> V>,
}

impl<V> Key<V> {
    pub const fn new(key: ResourceKey) -> Self {
        Self {
            key,
            _value: PhantomData,
        }
    }

    pub fn key(&self) -> &ResourceKey {
        &self.key
    }
}

impl<V> Clone for Key<V> {
    fn clone(&self) -> Self {
        Self::new(self.key.clone())
    }
}

/// Keys of the properties inventories know about.
pub struct InventoryKeys;

impl InventoryKeys {
    pub const DISPLAY_NAME: Key<Text> = Key::new(ResourceKey::stockpile("display_name"));
    pub const EQUIPMENT_TYPE: Key<EquipmentType> = Key::new(ResourceKey::stockpile("equipment_type"));
    /// Columns and rows of a grid.
    pub const GRID_SIZE: Key<GridPos> = Key::new(ResourceKey::stockpile("grid_size"));
    pub const MAX_STACK_SIZE: Key<u32> = Key::new(ResourceKey::stockpile("max_stack_size"));
    /// Position of a slot within its parent.
    pub const SLOT_INDEX: Key<u32> = Key::new(ResourceKey::stockpile("slot_index"));
    /// Position of a slot within a grid.
    pub const SLOT_POSITION: Key<GridPos> = Key::new(ResourceKey::stockpile("slot_position"));
    pub const UNIQUE_ID: Key<Uuid> = Key::new(ResourceKey::stockpile("unique_id"));
}

/// A stored property value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Int(u32),
    Grid(GridPos),
    Equipment(EquipmentType),
    Uuid(Uuid),
    Text(Text),
}

impl PropertyValue {
    /// Orders two values of the same kind. Integers and grid positions are
    /// totally ordered, other kinds only compare equal or not at all.
    pub fn compare(&self, other: &PropertyValue) -> Option<Ordering> {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
            (Self::Grid(a), Self::Grid(b)) => Some((a.y, a.x).cmp(&(b.y, b.x))),
            (a, b) if a == b => Some(Ordering::Equal),
            _ => None,
        }
    }
}

/// Conversion between a Rust type and [`PropertyValue`].
pub trait PropertyType: Sized {
    fn into_property(self) -> PropertyValue;
    fn from_property(value: &PropertyValue) -> Option<Self>;
}

macro_rules! property_type {
    ($ty:ty, $variant:ident) => {
        impl PropertyType for $ty {
            fn into_property(self) -> PropertyValue {
                PropertyValue::$variant(self)
            }

            fn from_property(value: &PropertyValue) -> Option<Self> {
                if let PropertyValue::$variant(v) = value {
                    Some(v.clone())
                } else {
                    None
                }
            }
        }
    };
}

property_type!(u32, Int);
property_type!(GridPos, Grid);
property_type!(EquipmentType, Equipment);
property_type!(Uuid, Uuid);
property_type!(Text, Text);

/// How a queried property value is compared to the stored one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Equal,
    NotEqual,
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
}

impl Operator {
    /// Tests `stored <op> queried`.
    pub fn matches(self, stored: &PropertyValue, queried: &PropertyValue) -> bool {
        let ordering = stored.compare(queried);
        match self {
            Operator::Equal => ordering == Some(Ordering::Equal),
            Operator::NotEqual => ordering != Some(Ordering::Equal),
            Operator::Greater => ordering == Some(Ordering::Greater),
            Operator::GreaterOrEqual => {
                matches!(ordering, Some(Ordering::Greater | Ordering::Equal))
            }
            Operator::Less => ordering == Some(Ordering::Less),
            Operator::LessOrEqual => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
        }
    }
}

/// The property store.
#[derive(Default, Debug, Clone)]
pub struct Properties {
    values: AHashMap<ResourceKey, PropertyValue>,
}
pub type PropertyResult<T> = std::result::Result<T, PropertyError>;

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<V: PropertyType>(&mut self, key: &Key<V>, value: V) -> Option<PropertyValue> {
        self.values.insert(key.key().clone(), value.into_property())
    }

    pub fn get<V: PropertyType>(&self, key: &Key<V>) -> Option<V> {
        self.values.get(key.key()).and_then(V::from_property)
    }

    /// Like [`Properties::get`], but says why nothing was found.
    pub fn fetch<V: PropertyType>(&self, key: &Key<V>) -> PropertyResult<V> {
        let Some(value) = self.values.get(key.key()) else {
            return Err(PropertyError::NotPresent(key.key().clone()));
        };
        V::from_property(value).ok_or_else(|| PropertyError::WrongType(key.key().clone()))
    }

    pub fn raw(&self, key: &ResourceKey) -> Option<&PropertyValue> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &ResourceKey) -> bool {
        self.values.contains_key(key)
    }

    pub fn values(&self) -> impl Iterator<Item = (&ResourceKey, &PropertyValue)> {
        self.values.iter()
    }
}

#[derive(Error, Debug)]
pub enum PropertyError {
    #[error("property {0} not present")]
    NotPresent(ResourceKey),
    #[error("property {0} not of expected type")]
    WrongType(ResourceKey),
}

#[cfg(test)]
mod tests {
    use super::{InventoryKeys, Key, Operator, Properties, PropertyError, PropertyType};
    use crate::{catalog::ResourceKey, position::GridPos, text::Text};

    #[test]
    fn typed_access() {
        let mut properties = Properties::new();
        properties.insert(&InventoryKeys::SLOT_INDEX, 4);
        properties.insert(&InventoryKeys::DISPLAY_NAME, Text::of("Chest"));

        assert_eq!(properties.get(&InventoryKeys::SLOT_INDEX), Some(4));
        assert_eq!(
            properties.get(&InventoryKeys::DISPLAY_NAME).map(|t| t.to_plain()),
            Some("Chest".to_string())
        );
        assert!(properties.get(&InventoryKeys::GRID_SIZE).is_none());

        let mistyped: Key<GridPos> = Key::new(ResourceKey::stockpile("slot_index"));
        assert!(matches!(
            properties.fetch(&mistyped),
            Err(PropertyError::WrongType(_))
        ));
        assert!(matches!(
            properties.fetch(&InventoryKeys::UNIQUE_ID),
            Err(PropertyError::NotPresent(_))
        ));
    }

    #[test]
    fn operators() {
        let three = 3u32.into_property();
        let five = 5u32.into_property();
        assert!(Operator::Less.matches(&three, &five));
        assert!(Operator::LessOrEqual.matches(&three, &three));
        assert!(Operator::Greater.matches(&five, &three));
        assert!(Operator::NotEqual.matches(&five, &three));
        assert!(!Operator::Equal.matches(&five, &three));

        let title = Text::of("a").into_property();
        assert!(!Operator::Greater.matches(&title, &Text::of("b").into_property()));
        assert!(Operator::NotEqual.matches(&title, &five));
        assert!(Operator::Equal.matches(&title, &Text::of("a").into_property()));
    }
}
