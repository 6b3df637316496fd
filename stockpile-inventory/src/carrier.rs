use stockpile_primitives::position::{BlockPosition, Location};
use uuid::Uuid;

/// What an inventory belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Carrier {
    /// A block entity such as a chest.
    Block {
        location: Location,
        position: BlockPosition,
    },
    Entity(Uuid),
}
