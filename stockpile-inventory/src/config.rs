use serde::{Deserialize, Serialize};

/// Per-inventory behaviour, fixed when the inventory is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Upper bound on the quantity any slot holds, on top of
    /// the maximum stack quantity of the stack itself.
    pub max_stack_size: u32,
    /// When offering, top up matching stacks before using empty slots.
    /// Otherwise the first slot that can take the items is used.
    pub merge_partial_stacks: bool,
}

impl Config {
    pub const DEFAULT_MAX_STACK_SIZE: u32 = 64;
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_stack_size: Self::DEFAULT_MAX_STACK_SIZE,
            merge_partial_stacks: true,
        }
    }
}
