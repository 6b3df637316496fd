//! Hierarchical item inventories.
//!
//! An [`Inventory`] is a node in a tree whose leaves are [`Slot`]s.
//! Queries and set operations produce views that share slots with the
//! inventories they were derived from.

pub mod builder;
pub mod carrier;
pub mod config;
pub mod container;
mod equipment;
pub mod inventory;
pub mod query;
pub mod slot;
pub mod transaction;
mod transfer;

pub use builder::{BuildError, BuildResult, InventoryBuilder, InventoryEndStep};
pub use carrier::Carrier;
pub use config::Config;
pub use container::{Container, ContainerError, ContainerResult, ContainerState};
pub use inventory::{Inventory, NodeId};
pub use query::Query;
pub use slot::Slot;
pub use transaction::{
    InventoryTransactionResult, PollTransactionResult, SlotTransaction, TransactionType,
};
