//! Stat blocks, signed stat deltas and the pure functions over them.

use super::coefficients::StatCoefficients;

/// Identifies one numeric field of a [`StatBlock`].
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
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatKind {
    Health,
    Attack,
    Defense,
    Speed,
    Magic,
}

impl StatKind {
    pub const ALL: [StatKind; 5] = [
        StatKind::Health,
        StatKind::Attack,
        StatKind::Defense,
        StatKind::Speed,
        StatKind::Magic,
    ];
}

// ============================================================================
// StatBlock
// ============================================================================

/// Final, non-negative stats of an actor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatBlock {
    #[cfg_attr(feature = "serde", serde(deserialize_with = "super::lenient::unsigned"))]
    pub health: u32,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "super::lenient::unsigned"))]
    pub attack: u32,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "super::lenient::unsigned"))]
    pub defense: u32,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "super::lenient::unsigned"))]
    pub speed: u32,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "super::lenient::unsigned"))]
    pub magic: u32,
}

impl StatBlock {
    pub const ZERO: Self = Self {
        health: 0,
        attack: 0,
        defense: 0,
        speed: 0,
        magic: 0,
    };

    pub const fn new(health: u32, attack: u32, defense: u32, speed: u32, magic: u32) -> Self {
        Self {
            health,
            attack,
            defense,
            speed,
            magic,
        }
    }

    pub const fn get(&self, kind: StatKind) -> u32 {
        match kind {
            StatKind::Health => self.health,
            StatKind::Attack => self.attack,
            StatKind::Defense => self.defense,
            StatKind::Speed => self.speed,
            StatKind::Magic => self.magic,
        }
    }

    pub fn set(&mut self, kind: StatKind, value: u32) {
        match kind {
            StatKind::Health => self.health = value,
            StatKind::Attack => self.attack = value,
            StatKind::Defense => self.defense = value,
            StatKind::Speed => self.speed = value,
            StatKind::Magic => self.magic = value,
        }
    }

    /// Threat score used by enemy targeting: `attack×2 + magic×2 + speed`.
    pub fn threat(&self) -> u64 {
        u64::from(self.attack) * 2 + u64::from(self.magic) * 2 + u64::from(self.speed)
    }
}

// ============================================================================
// StatDelta
// ============================================================================

/// Signed stat contribution (equipment, flat status modifiers).
///
/// Deltas may be negative; only the merged [`StatBlock`] is clamped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatDelta {
    #[cfg_attr(feature = "serde", serde(deserialize_with = "super::lenient::signed"))]
    pub health: i64,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "super::lenient::signed"))]
    pub attack: i64,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "super::lenient::signed"))]
    pub defense: i64,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "super::lenient::signed"))]
    pub speed: i64,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "super::lenient::signed"))]
    pub magic: i64,
}

impl StatDelta {
    pub const ZERO: Self = Self {
        health: 0,
        attack: 0,
        defense: 0,
        speed: 0,
        magic: 0,
    };

    pub const fn get(&self, kind: StatKind) -> i64 {
        match kind {
            StatKind::Health => self.health,
            StatKind::Attack => self.attack,
            StatKind::Defense => self.defense,
            StatKind::Speed => self.speed,
            StatKind::Magic => self.magic,
        }
    }

    pub fn set(&mut self, kind: StatKind, value: i64) {
        match kind {
            StatKind::Health => self.health = value,
            StatKind::Attack => self.attack = value,
            StatKind::Defense => self.defense = value,
            StatKind::Speed => self.speed = value,
            StatKind::Magic => self.magic = value,
        }
    }

    /// Builds a delta from loosely named pairs.
    ///
    /// Unknown stat names and non-finite values are ignored; finite values
    /// are rounded to the nearest integer.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        let mut delta = Self::ZERO;
        for (name, value) in pairs {
            let Ok(kind) = name.parse::<StatKind>() else {
                continue;
            };
            if !value.is_finite() {
                continue;
            }
            delta.set(kind, delta.get(kind).saturating_add(value.round() as i64));
        }
        delta
    }

    fn saturating_add(self, other: Self) -> Self {
        let mut sum = self;
        for kind in StatKind::ALL {
            sum.set(kind, self.get(kind).saturating_add(other.get(kind)));
        }
        sum
    }
}

impl From<StatBlock> for StatDelta {
    fn from(block: StatBlock) -> Self {
        Self {
            health: i64::from(block.health),
            attack: i64::from(block.attack),
            defense: i64::from(block.defense),
            speed: i64::from(block.speed),
            magic: i64::from(block.magic),
        }
    }
}

// ============================================================================
// Pure stat functions
// ============================================================================

/// Merges stat contributions into a final block.
///
/// Starts from zero and adds every field of every input in order, then clamps
/// each field to `[0, u32::MAX]`. Addition makes the result independent of
/// input order, and merging [`StatDelta::ZERO`] is the identity.
pub fn merge_stats<I>(blocks: I) -> StatBlock
where
    I: IntoIterator,
    I::Item: Into<StatDelta>,
{
    let total = blocks
        .into_iter()
        .map(Into::into)
        .fold(StatDelta::ZERO, StatDelta::saturating_add);

    let mut merged = StatBlock::ZERO;
    for kind in StatKind::ALL {
        merged.set(kind, total.get(kind).clamp(0, i64::from(u32::MAX)) as u32);
    }
    merged
}

/// Scalar strength summary used to scale idle rewards.
///
/// `round(health×0.3 + attack×2 + defense×1.8 + speed×1.5 + magic×2.1)`
pub fn power_rating(stats: &StatBlock) -> u32 {
    let rating = f64::from(stats.health) * 0.3
        + f64::from(stats.attack) * 2.0
        + f64::from(stats.defense) * 1.8
        + f64::from(stats.speed) * 1.5
        + f64::from(stats.magic) * 2.1;
    rating.round() as u32
}

/// Projects base stats to a level using per-level growth.
///
/// Levels `<= 1` return `base` unchanged.
pub fn scale_stats_for_level(base: &StatBlock, growth: &StatCoefficients, level: u32) -> StatBlock {
    if level <= 1 {
        return *base;
    }
    let levels_gained = f64::from(level - 1);

    let mut scaled = *base;
    for kind in StatKind::ALL {
        let bonus = (growth.get(kind) * levels_gained).round();
        let value = (f64::from(base.get(kind)) + bonus).clamp(0.0, f64::from(u32::MAX));
        scaled.set(kind, value as u32);
    }
    scaled
}
