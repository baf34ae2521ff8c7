//! Host item stacks as seen by the overlay engine.
//!
//! The engine never interprets an item itself: resolving a stack to a
//! fertilizer or tool id is the job of the item identity service. A stack
//! here only carries what that service and inventory bookkeeping need.

use serde::{Deserialize, Serialize};

/// A stack of host items, optionally tagged with a custom item id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemStack {
    /// Host material name (e.g. `BONE_MEAL`).
    pub material: String,
    /// Number of items in the stack.
    pub amount: u32,
    /// Custom item id stamped on the stack by a content plugin, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<String>,
}

impl ItemStack {
    /// Create an untagged stack.
    pub fn new(material: impl Into<String>, amount: u32) -> Self {
        Self {
            material: material.into(),
            amount,
            custom_id: None,
        }
    }

    /// Tag the stack with a custom item id.
    pub fn with_custom_id(mut self, id: impl Into<String>) -> Self {
        self.custom_id = Some(id.into());
        self
    }

    /// Returns true when the stack holds no items.
    pub fn is_empty(&self) -> bool {
        self.amount == 0
    }

    /// Remove up to `count` items, returning how many were actually removed.
    pub fn shrink(&mut self, count: u32) -> u32 {
        let removed = count.min(self.amount);
        self.amount -= removed;
        removed
    }
}
