//! Read-only mechanic definitions.
//!
//! Definitions are loaded elsewhere and handed to the engine fully formed.
//! [`CropDefinition::new`] validates the stage table once so the growth code
//! can rely on it: thresholds start at zero, strictly increase, never exceed
//! `max_points`, and at least one stage carries a visual model.

use crate::registry::RegistryKey;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A point amount that is either fixed or rolled uniformly from an inclusive range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RangeOrConstant {
    /// Always the same amount.
    Constant(u32),
    /// Uniform over `min..=max`. Reversed bounds are swapped.
    Range {
        /// Inclusive lower bound.
        min: u32,
        /// Inclusive upper bound.
        max: u32,
    },
}

impl RangeOrConstant {
    /// Draw one value.
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        match *self {
            RangeOrConstant::Constant(value) => value,
            RangeOrConstant::Range { min, max } => {
                let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
                rng.gen_range(lo..=hi)
            }
        }
    }

    /// Smallest value [`roll`](Self::roll) can return.
    pub fn min(&self) -> u32 {
        match *self {
            RangeOrConstant::Constant(value) => value,
            RangeOrConstant::Range { min, max } => min.min(max),
        }
    }

    /// Largest value [`roll`](Self::roll) can return.
    pub fn max(&self) -> u32 {
        match *self {
            RangeOrConstant::Constant(value) => value,
            RangeOrConstant::Range { min, max } => min.max(max),
        }
    }
}

/// Opaque list of action ids handed to the external action runner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionSet(Vec<String>);

impl ActionSet {
    /// An empty set; running it is a no-op.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a set from action ids, keeping their order.
    pub fn new<I, S>(actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(actions.into_iter().map(Into::into).collect())
    }

    /// Returns true when there is nothing to run.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Action ids in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// How a fertilizer application was triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stimulus {
    /// Fired from a dispenser facing the crop.
    Dispenser,
    /// Applied by a player's hand.
    Hand,
}

/// One growth stage of a crop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageDefinition {
    threshold: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    model: Option<String>,
    #[serde(default, skip_serializing_if = "ActionSet::is_empty")]
    grow_actions: ActionSet,
}

impl StageDefinition {
    /// A model-less stage that becomes active at `threshold` points.
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold,
            model: None,
            grow_actions: ActionSet::empty(),
        }
    }

    /// Give the stage a visual model id.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Actions run once when growth crosses into this stage.
    pub fn with_grow_actions(mut self, actions: ActionSet) -> Self {
        self.grow_actions = actions;
        self
    }

    /// Minimal accumulated point at which this stage is active.
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Visual model id, if the stage has its own appearance.
    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    /// Returns true when the stage carries a visual model.
    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    /// Actions fired when this stage is reached.
    pub fn grow_actions(&self) -> &ActionSet {
        &self.grow_actions
    }
}

/// A fertilizer rule attached to a crop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoneMealRule {
    /// Item id this rule reacts to; `None` accepts any fertilizer item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_item: Option<String>,
    /// Whether a dispenser may apply this rule.
    #[serde(default = "allowed")]
    pub allowed_via_dispenser: bool,
    /// Whether a player may apply this rule by hand.
    #[serde(default = "allowed")]
    pub allowed_via_hand: bool,
    /// Points granted per application.
    pub point_roll: RangeOrConstant,
    /// Actions run once per successful application.
    #[serde(default, skip_serializing_if = "ActionSet::is_empty")]
    pub actions: ActionSet,
}

fn allowed() -> bool {
    true
}

impl BoneMealRule {
    /// A rule accepting any item through both stimuli.
    pub fn new(point_roll: RangeOrConstant) -> Self {
        Self {
            required_item: None,
            allowed_via_dispenser: true,
            allowed_via_hand: true,
            point_roll,
            actions: ActionSet::empty(),
        }
    }

    /// Restrict the rule to one item id.
    pub fn for_item(mut self, item: impl Into<String>) -> Self {
        self.required_item = Some(item.into());
        self
    }

    /// Set which stimuli may trigger the rule.
    pub fn allow(mut self, dispenser: bool, hand: bool) -> Self {
        self.allowed_via_dispenser = dispenser;
        self.allowed_via_hand = hand;
        self
    }

    /// Actions to run when the rule applies.
    pub fn with_actions(mut self, actions: ActionSet) -> Self {
        self.actions = actions;
        self
    }

    /// Returns true when this rule accepts `item_id` delivered via `stimulus`.
    pub fn matches(&self, stimulus: Stimulus, item_id: &str) -> bool {
        let allowed = match stimulus {
            Stimulus::Dispenser => self.allowed_via_dispenser,
            Stimulus::Hand => self.allowed_via_hand,
        };
        allowed
            && self
                .required_item
                .as_deref()
                .map_or(true, |required| required == item_id)
    }
}

/// Validation failure for a [`CropDefinition`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    /// The stage table is empty.
    #[error("crop `{id}` has no stages")]
    NoStages {
        /// Offending crop.
        id: RegistryKey,
    },
    /// The first stage does not start at zero points.
    #[error("crop `{id}` must start with a stage at 0 points, found {found}")]
    FirstThresholdNotZero {
        /// Offending crop.
        id: RegistryKey,
        /// Threshold of the first stage.
        found: u32,
    },
    /// Thresholds are not strictly increasing.
    #[error("crop `{id}` stage {index} threshold {threshold} does not exceed {previous}")]
    UnorderedThresholds {
        /// Offending crop.
        id: RegistryKey,
        /// Index of the stage that breaks the order.
        index: usize,
        /// Threshold of the preceding stage.
        previous: u32,
        /// Threshold of the offending stage.
        threshold: u32,
    },
    /// A stage can never be reached because it lies above `max_points`.
    #[error("crop `{id}` stage threshold {threshold} exceeds max points {max_points}")]
    ThresholdAboveMax {
        /// Offending crop.
        id: RegistryKey,
        /// Unreachable threshold.
        threshold: u32,
        /// Crop ceiling.
        max_points: u32,
    },
    /// No stage has a visual model.
    #[error("crop `{id}` has no stage with a model")]
    NoModelStage {
        /// Offending crop.
        id: RegistryKey,
    },
}

/// Growth definition of a crop: ordered stages, point ceiling and fertilizer rules.
///
/// Deserialization goes through the same validation as [`CropDefinition::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CropDefinitionFile")]
pub struct CropDefinition {
    id: RegistryKey,
    max_points: u32,
    stages: Vec<StageDefinition>,
    bone_meals: Vec<BoneMealRule>,
    random_rotation: bool,
}

impl CropDefinition {
    /// Validate and build a definition.
    pub fn new(
        id: RegistryKey,
        max_points: u32,
        stages: Vec<StageDefinition>,
    ) -> Result<Self, DefinitionError> {
        let Some(first) = stages.first() else {
            return Err(DefinitionError::NoStages { id });
        };
        if first.threshold != 0 {
            let found = first.threshold;
            return Err(DefinitionError::FirstThresholdNotZero { id, found });
        }
        for (index, pair) in stages.windows(2).enumerate() {
            if pair[1].threshold <= pair[0].threshold {
                return Err(DefinitionError::UnorderedThresholds {
                    id,
                    index: index + 1,
                    previous: pair[0].threshold,
                    threshold: pair[1].threshold,
                });
            }
        }
        if let Some(last) = stages.last() {
            if last.threshold > max_points {
                let threshold = last.threshold;
                return Err(DefinitionError::ThresholdAboveMax {
                    id,
                    threshold,
                    max_points,
                });
            }
        }
        if !stages.iter().any(StageDefinition::has_model) {
            return Err(DefinitionError::NoModelStage { id });
        }

        Ok(Self {
            id,
            max_points,
            stages,
            bone_meals: Vec::new(),
            random_rotation: false,
        })
    }

    /// Append a fertilizer rule. Rules are matched in the order they are added.
    pub fn with_bone_meal(mut self, rule: BoneMealRule) -> Self {
        self.bone_meals.push(rule);
        self
    }

    /// Randomise the rotation of a visual that had none when it is swapped.
    pub fn with_random_rotation(mut self, enabled: bool) -> Self {
        self.random_rotation = enabled;
        self
    }

    /// Definition id.
    pub fn id(&self) -> &RegistryKey {
        &self.id
    }

    /// Point ceiling of the crop.
    pub fn max_points(&self) -> u32 {
        self.max_points
    }

    /// Stages in ascending threshold order; never empty.
    pub fn stages(&self) -> &[StageDefinition] {
        &self.stages
    }

    /// Fertilizer rules in declaration order.
    pub fn bone_meals(&self) -> &[BoneMealRule] {
        &self.bone_meals
    }

    /// Whether swapped visuals get a random rotation.
    pub fn random_rotation(&self) -> bool {
        self.random_rotation
    }
}

/// On-disk shape of a crop definition, before validation.
#[derive(Deserialize)]
struct CropDefinitionFile {
    id: RegistryKey,
    max_points: u32,
    stages: Vec<StageDefinition>,
    #[serde(default)]
    bone_meals: Vec<BoneMealRule>,
    #[serde(default)]
    random_rotation: bool,
}

impl TryFrom<CropDefinitionFile> for CropDefinition {
    type Error = DefinitionError;

    fn try_from(file: CropDefinitionFile) -> Result<Self, Self::Error> {
        let definition = CropDefinition::new(file.id, file.max_points, file.stages)?;
        Ok(file
            .bone_meals
            .into_iter()
            .fold(definition, CropDefinition::with_bone_meal)
            .with_random_rotation(file.random_rotation))
    }
}

/// Definition of a pot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotDefinition {
    /// Definition id.
    pub id: RegistryKey,
    /// Water units the pot can store.
    pub max_water: u32,
    /// Visual model when dry.
    pub dry_model: String,
    /// Visual model when holding water.
    pub wet_model: String,
}

/// Definition of a sprinkler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SprinklerDefinition {
    /// Definition id.
    pub id: RegistryKey,
    /// Watering cycles a full sprinkler holds.
    pub storage: u32,
    /// Horizontal watering radius in blocks.
    pub range: u32,
}
