//! Stat model.
//!
//! ```text
//! [ base StatBlock ] + [ equipment StatDelta ... ]
//!        ↓ merge_stats (field-wise sum, clamp ≥ 0)
//! [ merged StatBlock ]            (immutable for the whole battle)
//!        ↓ StatusModifiers::apply (offsets, then multipliers)
//! [ effective StatBlock ]         (recomputed on every read in combat)
//! ```
//!
//! Every field is a non-negative integer after merging. Loosely typed inputs
//! (persisted JSON, hand-written RON) go through lenient deserialization:
//! unknown keys are ignored and non-numeric values count as zero.

pub mod block;
pub mod coefficients;

#[cfg(feature = "serde")]
pub(crate) mod lenient;

pub use block::{StatBlock, StatDelta, StatKind, merge_stats, power_rating, scale_stats_for_level};
pub use coefficients::{StatCoefficients, StatMultipliers};
