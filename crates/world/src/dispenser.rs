use crate::error::DispenseError;
use crate::host::ItemIdentity;
use overgrow_core::ItemStack;
use serde::{Deserialize, Serialize};

/// Number of slots in a dispenser inventory.
pub const DISPENSER_SLOT_COUNT: usize = 9;

/// Storage contents of the dispenser that fired a notification.
///
/// The glue copies the host inventory in, lets the engine take fertilizer out,
/// and writes the slots back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispenserInventory {
    pub slots: [Option<ItemStack>; DISPENSER_SLOT_COUNT],
}

impl Default for DispenserInventory {
    fn default() -> Self {
        Self::new()
    }
}

impl DispenserInventory {
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
        }
    }

    /// Put `stack` into `slot`, replacing what was there.
    pub fn set_slot(&mut self, slot: usize, stack: ItemStack) -> Result<(), DispenseError> {
        let entry = self
            .slots
            .get_mut(slot)
            .ok_or(DispenseError::InvalidSlot { slot })?;
        *entry = (!stack.is_empty()).then_some(stack);
        Ok(())
    }

    /// First slot holding a non-empty stack whose identity is `item_id`.
    pub fn find_matching(&self, item_id: &str, items: &dyn ItemIdentity) -> Option<usize> {
        self.slots.iter().position(|slot| {
            slot.as_ref()
                .is_some_and(|stack| !stack.is_empty() && items.identity_of(stack) == item_id)
        })
    }

    /// Remove exactly one item from `slot`, clearing the slot when it empties.
    pub fn take_one(&mut self, slot: usize) -> Result<(), DispenseError> {
        let entry = self
            .slots
            .get_mut(slot)
            .ok_or(DispenseError::InvalidSlot { slot })?;
        let Some(stack) = entry.as_mut() else {
            return Err(DispenseError::InvalidSlot { slot });
        };
        stack.shrink(1);
        if stack.is_empty() {
            *entry = None;
        }
        Ok(())
    }

    /// Total count of items whose identity is `item_id`.
    pub fn count_of(&self, item_id: &str, items: &dyn ItemIdentity) -> u32 {
        self.slots
            .iter()
            .flatten()
            .filter(|stack| items.identity_of(stack) == item_id)
            .map(|stack| stack.amount)
            .sum()
    }
}
