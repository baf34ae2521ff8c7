//! In-memory definition source.

use crate::host::DefinitionSource;
use overgrow_core::{CropDefinition, PotDefinition, RegistryKey, SprinklerDefinition};
use std::collections::BTreeMap;
use tracing::warn;

/// Loaded mechanic definitions, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct DefinitionRegistry {
    crops: BTreeMap<RegistryKey, CropDefinition>,
    pots: BTreeMap<RegistryKey, PotDefinition>,
    sprinklers: BTreeMap<RegistryKey, SprinklerDefinition>,
}

impl DefinitionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a crop, replacing any previous definition with the same id.
    pub fn register_crop(&mut self, definition: CropDefinition) {
        let id = definition.id().clone();
        if self.crops.insert(id.clone(), definition).is_some() {
            warn!(%id, "crop definition replaced");
        }
    }

    /// Register a pot, replacing any previous definition with the same id.
    pub fn register_pot(&mut self, definition: PotDefinition) {
        let id = definition.id.clone();
        if self.pots.insert(id.clone(), definition).is_some() {
            warn!(%id, "pot definition replaced");
        }
    }

    /// Register a sprinkler, replacing any previous definition with the same id.
    pub fn register_sprinkler(&mut self, definition: SprinklerDefinition) {
        let id = definition.id.clone();
        if self.sprinklers.insert(id.clone(), definition).is_some() {
            warn!(%id, "sprinkler definition replaced");
        }
    }

    /// Number of registered crops.
    pub fn crop_count(&self) -> usize {
        self.crops.len()
    }
}

impl DefinitionSource for DefinitionRegistry {
    fn crop_definition(&self, id: &RegistryKey) -> Option<&CropDefinition> {
        self.crops.get(id)
    }

    fn pot_definition(&self, id: &RegistryKey) -> Option<&PotDefinition> {
        self.pots.get(id)
    }

    fn sprinkler_definition(&self, id: &RegistryKey) -> Option<&SprinklerDefinition> {
        self.sprinklers.get(id)
    }

    fn crop_for_stage_item(&self, item_id: &str) -> Option<&CropDefinition> {
        self.crops.values().find(|crop| {
            crop.stages()
                .iter()
                .any(|stage| stage.model() == Some(item_id))
        })
    }

    fn pot_for_item(&self, item_id: &str) -> Option<&PotDefinition> {
        self.pots
            .values()
            .find(|pot| pot.dry_model == item_id || pot.wet_model == item_id)
    }
}
