//! Two-phase inventory construction.
//!
//! The structure of an inventory is described first and frozen by
//! [`InventoryBuilder::complete_structure`]. Identity and carrier are
//! attached afterwards.

use std::sync::{Arc, Weak};

use stockpile_primitives::{
    archetype::{EquipmentType, InventoryArchetype, InventoryArchetypes},
    position::GridPos,
    property::{InventoryKeys, Properties},
    text::Text,
};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::{
    carrier::Carrier,
    config::Config,
    inventory::{flatten_slots, Inventory, Node, NodeId, NodeKind, Parent},
    slot::SlotState,
};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BuildError {
    #[error("an inventory needs at least one slot")]
    NoSlots,
    #[error("max stack size must be at least 1")]
    ZeroStackSize,
}
pub type BuildResult<T> = std::result::Result<T, BuildError>;

#[derive(Debug, Clone)]
enum Part {
    Slots(u32),
    Grid(GridPos),
    Equipment(Vec<EquipmentType>),
    Inventory(Inventory),
}

impl Part {
    fn archetype(&self) -> InventoryArchetype {
        match self {
            Part::Slots(_) => InventoryArchetypes::ROW,
            Part::Grid(_) => InventoryArchetypes::GRID,
            Part::Equipment(_) => InventoryArchetypes::EQUIPMENT,
            Part::Inventory(_) => InventoryArchetypes::COMPOSITE,
        }
    }

    fn slot_count(&self) -> usize {
        match self {
            Part::Slots(count) => *count as usize,
            Part::Grid(size) => size.area() as usize,
            Part::Equipment(types) => types.len(),
            Part::Inventory(inventory) => inventory.capacity(),
        }
    }
}

/// The structure phase.
#[derive(Debug, Clone, Default)]
pub struct InventoryBuilder {
    parts: Vec<Part>,
    archetype: Option<InventoryArchetype>,
    title: Option<Text>,
    config: Config,
}

impl Inventory {
    pub fn builder() -> InventoryBuilder {
        InventoryBuilder::default()
    }
}

impl InventoryBuilder {
    /// Adds a row of `count` slots.
    pub fn slots(mut self, count: u32) -> Self {
        self.parts.push(Part::Slots(count));
        self
    }

    /// Adds a grid of `columns` by `rows` slots, filled row by row.
    pub fn grid(mut self, columns: u32, rows: u32) -> Self {
        self.parts.push(Part::Grid(GridPos::new(columns, rows)));
        self
    }

    /// Adds one slot per equipment type.
    pub fn equipment(mut self, types: impl IntoIterator<Item = EquipmentType>) -> Self {
        self.parts.push(Part::Equipment(types.into_iter().collect()));
        self
    }

    /// Adds an existing inventory as a child. Its slots are shared,
    /// and its own parent stays what it was.
    pub fn inventory(mut self, inventory: &Inventory) -> Self {
        self.parts.push(Part::Inventory(inventory.clone()));
        self
    }

    pub fn archetype(mut self, archetype: InventoryArchetype) -> Self {
        self.archetype = Some(archetype);
        self
    }

    pub fn title(mut self, title: impl Into<Text>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Freezes the structure.
    pub fn complete_structure(self) -> BuildResult<InventoryEndStep> {
        if self.config.max_stack_size == 0 {
            return Err(BuildError::ZeroStackSize);
        }
        if self.parts.iter().map(Part::slot_count).sum::<usize>() == 0 {
            return Err(BuildError::NoSlots);
        }
        Ok(InventoryEndStep {
            structure: self,
            identity: None,
            carrier: None,
        })
    }
}

/// The final phase, after the structure is fixed.
#[derive(Debug, Clone)]
pub struct InventoryEndStep {
    structure: InventoryBuilder,
    identity: Option<Uuid>,
    carrier: Option<Carrier>,
}

impl InventoryEndStep {
    pub fn identity(mut self, identity: Uuid) -> Self {
        self.identity = Some(identity);
        self
    }

    pub fn carrier(mut self, carrier: Carrier) -> Self {
        self.carrier = Some(carrier);
        self
    }

    pub fn build(self) -> Inventory {
        let InventoryBuilder {
            parts,
            archetype,
            title,
            config,
        } = self.structure;

        let mut properties = Properties::new();
        properties.insert(&InventoryKeys::MAX_STACK_SIZE, config.max_stack_size);
        if let Some(title) = title {
            properties.insert(&InventoryKeys::DISPLAY_NAME, title);
        }
        if let Some(identity) = self.identity {
            properties.insert(&InventoryKeys::UNIQUE_ID, identity);
        }

        // A lone run of slots is held directly instead of through a child.
        let flat = match parts.as_slice() {
            [Part::Inventory(_)] => None,
            [part] => Some(part.clone()),
            _ => None,
        };
        let default_archetype = match &flat {
            Some(part) => part.archetype(),
            None => InventoryArchetypes::COMPOSITE,
        };
        if let Some(Part::Grid(size)) = &flat {
            properties.insert(&InventoryKeys::GRID_SIZE, *size);
        }

        let carrier = self.carrier;
        let root = Arc::new_cyclic(|me: &Weak<Node>| {
            let children = match &flat {
                Some(part) => leaves(part, me, config),
                None => parts
                    .iter()
                    .map(|part| child(part, me, config))
                    .collect(),
            };
            let slots = flatten_slots(&children);
            Node {
                id: NodeId::next(),
                parent: Parent::Itself,
                kind: NodeKind::Branch { children, slots },
                archetype: archetype.unwrap_or(default_archetype),
                properties,
                config,
                carrier,
            }
        });
        let inventory = Inventory(root);
        debug!(
            "built {:?} inventory with {} slots",
            inventory.archetype(),
            inventory.capacity()
        );
        inventory
    }
}

fn child(part: &Part, parent: &Weak<Node>, config: Config) -> Inventory {
    if let Part::Inventory(existing) = part {
        return existing.clone();
    }
    let mut properties = Properties::new();
    if let Part::Grid(size) = part {
        properties.insert(&InventoryKeys::GRID_SIZE, *size);
    }
    let node = Arc::new_cyclic(|me: &Weak<Node>| {
        let children = leaves(part, me, config);
        let slots = flatten_slots(&children);
        Node {
            id: NodeId::next(),
            parent: Parent::Tree(parent.clone()),
            kind: NodeKind::Branch { children, slots },
            archetype: part.archetype(),
            properties,
            config,
            carrier: None,
        }
    });
    Inventory(node)
}

/// The slots of `part`, parented to `parent`.
fn leaves(part: &Part, parent: &Weak<Node>, config: Config) -> Vec<Inventory> {
    match part {
        Part::Slots(count) => (0..*count)
            .map(|index| slot(parent, index, config, Properties::new()))
            .collect(),
        Part::Grid(size) => (0..size.area())
            .map(|index| {
                let mut properties = Properties::new();
                properties.insert(
                    &InventoryKeys::SLOT_POSITION,
                    GridPos::from_index(index, size.x),
                );
                slot(parent, index, config, properties)
            })
            .collect(),
        Part::Equipment(types) => types
            .iter()
            .zip(0u32..)
            .map(|(equipment, index)| {
                let mut properties = Properties::new();
                properties.insert(&InventoryKeys::EQUIPMENT_TYPE, equipment.clone());
                slot(parent, index, config, properties)
            })
            .collect(),
        Part::Inventory(existing) => vec![existing.clone()],
    }
}

fn slot(parent: &Weak<Node>, index: u32, config: Config, mut properties: Properties) -> Inventory {
    properties.insert(&InventoryKeys::SLOT_INDEX, index);
    properties.insert(&InventoryKeys::MAX_STACK_SIZE, config.max_stack_size);
    Inventory(Arc::new(Node {
        id: NodeId::next(),
        parent: Parent::Tree(parent.clone()),
        kind: NodeKind::Slot(SlotState::new(index)),
        archetype: InventoryArchetypes::SLOT,
        properties,
        config,
        carrier: None,
    }))
}

#[cfg(test)]
mod tests {
    use stockpile_primitives::{
        archetype::{EquipmentTypes, InventoryArchetypes},
        position::{BlockPosition, Location},
        property::InventoryKeys,
        text::Text,
    };
    use uuid::Uuid;

    use super::BuildError;
    use crate::{carrier::Carrier, config::Config, inventory::Inventory};

    #[test]
    fn empty_structures_are_rejected() {
        assert_eq!(
            Inventory::builder().complete_structure().unwrap_err(),
            BuildError::NoSlots
        );
        assert_eq!(
            Inventory::builder().slots(0).complete_structure().unwrap_err(),
            BuildError::NoSlots
        );
        assert_eq!(
            Inventory::builder()
                .slots(3)
                .config(Config {
                    max_stack_size: 0,
                    ..Config::default()
                })
                .complete_structure()
                .unwrap_err(),
            BuildError::ZeroStackSize
        );
    }

    #[test]
    fn end_step_attaches_identity_and_carrier() {
        let id = Uuid::from_u128(0x5eed);
        let carrier = Carrier::Block {
            location: Location::new(0, 0),
            position: BlockPosition::new(10, 64, -3),
        };
        let chest = Inventory::builder()
            .grid(9, 3)
            .title(Text::of("Chest"))
            .complete_structure()
            .unwrap()
            .identity(id)
            .carrier(carrier)
            .build();
        assert_eq!(chest.unique_id(), Some(id));
        assert_eq!(chest.carrier(), Some(&carrier));
        assert_eq!(chest.display_name(), Some(Text::of("Chest")));
        assert_eq!(chest.archetype(), &InventoryArchetypes::GRID);
        assert_eq!(chest.children().len(), 27);
        assert_eq!(chest.get(&InventoryKeys::MAX_STACK_SIZE), Some(64));
    }

    #[test]
    fn existing_inventories_are_shared() {
        let hotbar = Inventory::builder()
            .slots(9)
            .complete_structure()
            .unwrap()
            .build();
        let composite = Inventory::builder()
            .inventory(&hotbar)
            .equipment([EquipmentTypes::HEAD, EquipmentTypes::CHEST])
            .archetype(InventoryArchetypes::CONTAINER)
            .complete_structure()
            .unwrap()
            .build();
        assert_eq!(composite.capacity(), 11);
        assert_eq!(composite.archetype(), &InventoryArchetypes::CONTAINER);
        assert_eq!(composite.slot(0).unwrap(), hotbar.slot(0).unwrap());
        // The hotbar keeps its own parent.
        assert_eq!(hotbar.parent(), hotbar);
        assert!(composite.contains_inventory(&hotbar));

        let equipment = &composite.children()[1];
        assert_eq!(equipment.archetype(), &InventoryArchetypes::EQUIPMENT);
        assert_eq!(equipment.parent(), composite);
        assert_eq!(
            equipment.slot(1).unwrap().get(&InventoryKeys::EQUIPMENT_TYPE),
            Some(EquipmentTypes::CHEST)
        );
    }
}
