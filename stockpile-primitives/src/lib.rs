//! Item and catalog primitives.

pub mod catalog;
pub mod archetype;
pub mod item;
pub mod stack;
pub mod generator;
pub mod property;
pub mod position;
pub mod text;

pub use nbt;
pub use uuid;
