use std::ops::Deref;

use ahash::AHashSet;
use stockpile_primitives::{
    archetype::{ContainerType, InventoryArchetypes},
    catalog::CatalogType,
    stack::ItemStack,
};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::{
    builder::BuildError,
    inventory::{Inventory, NodeId},
    slot::Slot,
};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ContainerError {
    #[error("container is not open")]
    NotOpen,
    #[error("container is closed")]
    Closed,
    #[error("container is already open")]
    AlreadyOpen,
    #[error("{container_type} needs {expected} viewed slots, got {actual}")]
    SizeMismatch {
        container_type: String,
        expected: u32,
        actual: usize,
    },
    #[error("failed to build container inventory: {0}")]
    Build(#[from] BuildError),
}
pub type ContainerResult<T> = std::result::Result<T, ContainerError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerState {
    NotOpen,
    Open,
    Closed,
}

/// An open window onto one or more inventories, as seen by a viewer.
///
/// The slots are those of the viewed inventories followed by those of
/// the viewer's own inventory.
#[derive(Debug)]
pub struct Container {
    inventory: Inventory,
    container_type: ContainerType,
    viewer: Uuid,
    viewer_inventory: Inventory,
    viewed: Vec<Inventory>,
    viewed_slots: AHashSet<NodeId>,
    state: ContainerState,
    cursor: ItemStack,
}

impl Container {
    pub fn new(
        container_type: ContainerType,
        viewer: Uuid,
        viewer_inventory: Inventory,
        viewed: Vec<Inventory>,
    ) -> ContainerResult<Self> {
        let viewed_slots: AHashSet<NodeId> = viewed
            .iter()
            .flat_map(|inventory| inventory.slots())
            .map(|slot| slot.id())
            .collect();
        if container_type.size() > 0 && viewed_slots.len() != container_type.size() as usize {
            return Err(ContainerError::SizeMismatch {
                container_type: container_type.key().to_string(),
                expected: container_type.size(),
                actual: viewed_slots.len(),
            });
        }

        let inventory = viewed
            .iter()
            .fold(Inventory::builder(), |builder, inventory| {
                builder.inventory(inventory)
            })
            .inventory(&viewer_inventory)
            .archetype(InventoryArchetypes::CONTAINER)
            .config(*viewer_inventory.config())
            .complete_structure()?
            .build();

        Ok(Self {
            inventory,
            container_type,
            viewer,
            viewer_inventory,
            viewed,
            viewed_slots,
            state: ContainerState::NotOpen,
            cursor: ItemStack::empty(),
        })
    }

    pub fn container_type(&self) -> &ContainerType {
        &self.container_type
    }

    pub fn viewer(&self) -> Uuid {
        self.viewer
    }

    pub fn viewer_inventory(&self) -> &Inventory {
        &self.viewer_inventory
    }

    pub fn viewed(&self) -> &[Inventory] {
        &self.viewed
    }

    /// True if `slot` belongs to a viewed inventory
    /// rather than to the viewer.
    pub fn is_viewed_slot(&self, slot: &Slot) -> bool {
        self.viewed_slots.contains(&slot.id())
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn state(&self) -> ContainerState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == ContainerState::Open
    }

    pub fn open(&mut self) -> ContainerResult<()> {
        match self.state {
            ContainerState::NotOpen => {
                self.state = ContainerState::Open;
                debug!("{} opened {}", self.viewer, self.container_type.key());
                Ok(())
            }
            ContainerState::Open => Err(ContainerError::AlreadyOpen),
            ContainerState::Closed => Err(ContainerError::Closed),
        }
    }

    /// Closes the container and hands back whatever was on the cursor.
    pub fn close(&mut self) -> ContainerResult<ItemStack> {
        self.check_open()?;
        self.state = ContainerState::Closed;
        debug!("{} closed {}", self.viewer, self.container_type.key());
        Ok(std::mem::take(&mut self.cursor))
    }

    /// The stack held on the viewer's cursor.
    pub fn cursor(&self) -> ContainerResult<ItemStack> {
        self.check_open()?;
        Ok(self.cursor.clone())
    }

    /// Replaces the cursor stack, returning the previous one.
    pub fn set_cursor(&mut self, stack: ItemStack) -> ContainerResult<ItemStack> {
        self.check_open()?;
        let stack = if stack.is_empty() {
            ItemStack::empty()
        } else {
            stack
        };
        Ok(std::mem::replace(&mut self.cursor, stack))
    }

    fn check_open(&self) -> ContainerResult<()> {
        match self.state {
            ContainerState::Open => Ok(()),
            ContainerState::NotOpen => Err(ContainerError::NotOpen),
            ContainerState::Closed => Err(ContainerError::Closed),
        }
    }
}

impl Deref for Container {
    type Target = Inventory;

    fn deref(&self) -> &Self::Target {
        &self.inventory
    }
}
