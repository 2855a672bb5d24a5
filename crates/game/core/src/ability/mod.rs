//! Ability catalogue types.
//!
//! Definitions are loaded once and never mutated; per-battle state (cooldowns)
//! lives in [`crate::state::AbilitySlotState`].

pub mod formula;

pub use formula::{AbilityFormula, BuffFormula, Finisher, HealFormula, StrikeFormula};

/// Who an ability resolves against.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TargetKind {
    /// The caster.
    SelfOnly,
    /// The most injured living ally, the caster included.
    Ally,
    /// The most threatening living opponent.
    #[default]
    Enemy,
    /// Every living opponent.
    Area,
}

/// Immutable ability template.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityDefinition {
    pub slug: String,
    pub name: String,
    /// Flavor grouping (e.g. "martial", "pyromancy").
    #[cfg_attr(feature = "serde", serde(default))]
    pub school: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub target: TargetKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub base_power: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cooldown_turns: u32,
    /// Catalogue speed tag; initiative is rolled before abilities are chosen.
    #[cfg_attr(feature = "serde", serde(default))]
    pub speed_modifier: i32,
    pub formula: AbilityFormula,
}

impl AbilityDefinition {
    pub fn new(slug: impl Into<String>, name: impl Into<String>, formula: AbilityFormula) -> Self {
        Self {
            slug: slug.into(),
            name: name.into(),
            school: String::new(),
            target: TargetKind::default(),
            base_power: 0,
            cooldown_turns: 0,
            speed_modifier: 0,
            formula,
        }
    }

    #[must_use]
    pub fn with_target(mut self, target: TargetKind) -> Self {
        self.target = target;
        self
    }

    #[must_use]
    pub fn with_base_power(mut self, base_power: u32) -> Self {
        self.base_power = base_power;
        self
    }

    #[must_use]
    pub fn with_cooldown(mut self, cooldown_turns: u32) -> Self {
        self.cooldown_turns = cooldown_turns;
        self
    }

    #[must_use]
    pub fn with_school(mut self, school: impl Into<String>) -> Self {
        self.school = school.into();
        self
    }
}
