//! Append-only combat log.

use crate::state::ActorId;

/// Kind of event recorded in the combat log.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum LogAction {
    /// An actor used an ability; mechanical entries follow.
    Ability,
    Damage,
    Heal,
    /// A status landed on the target.
    Buff,
    StatusDamage,
    StatusHeal,
    StatusExpire,
    /// No action taken (prevented, nothing to use, or no valid target).
    Skip,
    /// Damage soaked by a shield.
    Absorb,
}

/// One resolved event.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogEntry {
    pub round: u32,
    pub actor: ActorId,
    pub action: LogAction,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub target: Option<ActorId>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub ability: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub status: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub value: Option<u32>,
}

impl LogEntry {
    pub fn new(round: u32, actor: ActorId, action: LogAction) -> Self {
        Self {
            round,
            actor,
            action,
            target: None,
            ability: None,
            status: None,
            value: None,
        }
    }

    #[must_use]
    pub fn target(mut self, target: ActorId) -> Self {
        self.target = Some(target);
        self
    }

    #[must_use]
    pub fn ability(mut self, name: impl Into<String>) -> Self {
        self.ability = Some(name.into());
        self
    }

    #[must_use]
    pub fn status(mut self, name: impl Into<String>) -> Self {
        self.status = Some(name.into());
        self
    }

    #[must_use]
    pub fn value(mut self, value: u32) -> Self {
        self.value = Some(value);
        self
    }
}
