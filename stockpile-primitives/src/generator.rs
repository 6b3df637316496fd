//! Randomised item stack generation.

use std::{fmt::Debug, ops::RangeInclusive};

use nbt::Value;
use rand::{seq::SliceRandom, Rng, RngCore};
use thiserror::Error;

use crate::{
    item::ItemType,
    stack::{ItemStack, ItemStackBuilder, ItemStackError, ItemStackSnapshot},
};

/// Modifies a builder, possibly using randomness.
pub type Populator = Box<dyn Fn(&mut ItemStackBuilder, &mut dyn RngCore) + Send + Sync>;

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("a generator needs a base item or at least one populator")]
    Unconfigured,
    #[error("generated stack is invalid: {0}")]
    InvalidStack(#[from] ItemStackError),
}
pub type GeneratorResult<T> = std::result::Result<T, GeneratorError>;

/// Generates item stacks from an optional base item
/// and an ordered list of populators.
pub struct ItemStackGenerator {
    base: Option<ItemStackSnapshot>,
    populators: Vec<Populator>,
}

impl Debug for ItemStackGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemStackGenerator")
            .field("base", &self.base)
            .field("populators", &self.populators.len())
            .finish()
    }
}

impl ItemStackGenerator {
    pub fn builder() -> GeneratorBuilder {
        GeneratorBuilder::default()
    }

    /// Generates one stack.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> GeneratorResult<ItemStackSnapshot> {
        let mut builder = ItemStack::builder();
        if let Some(base) = &self.base {
            builder.from_snapshot(base);
        }
        let mut rng = RngRef(rng);
        for populator in &self.populators {
            populator(&mut builder, &mut rng);
        }
        Ok(builder.build()?.snapshot())
    }
}

/// Lets a generic `Rng` be handed to populators as `&mut dyn RngCore`.
struct RngRef<'a, R: ?Sized>(&'a mut R);

impl<R: RngCore + ?Sized> RngCore for RngRef<'_, R> {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.0.try_fill_bytes(dest)
    }
}

#[derive(Default)]
pub struct GeneratorBuilder {
    base: Option<ItemStackSnapshot>,
    populators: Vec<Populator>,
}

impl GeneratorBuilder {
    pub fn base_item(mut self, item: ItemStackSnapshot) -> Self {
        self.base = Some(item);
        self
    }

    pub fn add(mut self, populator: Populator) -> Self {
        self.populators.push(populator);
        self
    }

    pub fn add_all(mut self, populators: impl IntoIterator<Item = Populator>) -> Self {
        self.populators.extend(populators);
        self
    }

    pub fn build(self) -> GeneratorResult<ItemStackGenerator> {
        if self.base.is_none() && self.populators.is_empty() {
            return Err(GeneratorError::Unconfigured);
        }
        Ok(ItemStackGenerator {
            base: self.base,
            populators: self.populators,
        })
    }
}

/// Sets a fixed item type.
pub fn item(item_type: ItemType) -> Populator {
    Box::new(move |builder: &mut ItemStackBuilder, _: &mut dyn RngCore| {
        builder.item_type(item_type.clone());
    })
}

/// Picks an item type uniformly from `pool`.
pub fn items(pool: Vec<ItemType>) -> Populator {
    Box::new(move |builder: &mut ItemStackBuilder, rng: &mut dyn RngCore| {
        if let Some(item_type) = pool.choose(rng) {
            builder.item_type(item_type.clone());
        }
    })
}

/// Picks a quantity uniformly from `range`.
pub fn quantity(range: RangeInclusive<u32>) -> Populator {
    Box::new(move |builder: &mut ItemStackBuilder, rng: &mut dyn RngCore| {
        if !range.is_empty() {
            builder.quantity(rng.gen_range(range.clone()));
        }
    })
}

/// Attaches a fixed data value.
pub fn data(key: impl Into<String>, value: Value) -> Populator {
    let key = key.into();
    Box::new(move |builder: &mut ItemStackBuilder, _: &mut dyn RngCore| {
        builder.data(key.clone(), value.clone());
    })
}

/// Replaces everything with the state of `snapshot`.
pub fn stack(snapshot: ItemStackSnapshot) -> Populator {
    Box::new(move |builder: &mut ItemStackBuilder, _: &mut dyn RngCore| {
        builder.from_snapshot(&snapshot);
    })
}

#[cfg(test)]
mod tests {
    use nbt::Value;
    use rand::{rngs::StdRng, SeedableRng};

    use super::{data, item, items, quantity, GeneratorError, ItemStackGenerator};
    use crate::{item::ItemTypes, stack::ItemStack};

    #[test]
    fn unconfigured_generator_is_rejected() {
        assert!(matches!(
            ItemStackGenerator::builder().build(),
            Err(GeneratorError::Unconfigured)
        ));
    }

    #[test]
    fn populators_apply_in_order() {
        let mut rng = StdRng::seed_from_u64(7);
        let generator = ItemStackGenerator::builder()
            .add(items(vec![ItemTypes::STONE, ItemTypes::DIRT]))
            .add(quantity(2..=9))
            .add(data("Unbreakable", Value::Byte(1)))
            .build()
            .unwrap();

        for _ in 0..64 {
            let generated = generator.generate(&mut rng).unwrap();
            assert!(
                generated.item_type() == &ItemTypes::STONE
                    || generated.item_type() == &ItemTypes::DIRT
            );
            assert!((2..=9).contains(&generated.quantity()));
            assert_eq!(generated.data().get("Unbreakable"), Some(&Value::Byte(1)));
        }
    }

    #[test]
    fn base_item_is_used_as_blueprint() {
        let mut rng = StdRng::seed_from_u64(1);
        let generator = ItemStackGenerator::builder()
            .base_item(ItemStack::of(ItemTypes::ARROW, 16).snapshot())
            .add(item(ItemTypes::SNOWBALL))
            .build()
            .unwrap();
        let generated = generator.generate(&mut rng).unwrap();
        assert_eq!(generated.item_type(), &ItemTypes::SNOWBALL);
        assert_eq!(generated.quantity(), 16);
    }

    #[test]
    fn missing_type_surfaces_as_error() {
        let mut rng = StdRng::seed_from_u64(1);
        let generator = ItemStackGenerator::builder()
            .add(quantity(1..=3))
            .build()
            .unwrap();
        assert!(matches!(
            generator.generate(&mut rng),
            Err(GeneratorError::InvalidStack(_))
        ));
    }
}
