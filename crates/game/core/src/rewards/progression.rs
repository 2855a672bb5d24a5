//! Experience curve and level-ups.

/// Cumulative experience required to reach `level`: `floor(100 × level^1.6)`.
pub fn xp_for_level(level: u32) -> u64 {
    (100.0 * f64::from(level).powf(1.6)).floor() as u64
}

/// Highest level reachable with `experience`, starting from `current`.
///
/// Never returns less than `current` (or 1).
pub fn level_from_xp(current: u32, experience: u64) -> u32 {
    // The curve is monotone, so bisect for the last reachable level.
    let (mut low, mut high) = (current.max(1), u32::MAX);
    while low < high {
        let mid = low + (high - low).div_ceil(2);
        if xp_for_level(mid) <= experience {
            low = mid;
        } else {
            high = mid - 1;
        }
    }
    low
}

/// Outcome of applying accumulated experience to a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelProgress {
    pub previous: u32,
    pub current: u32,
    pub levels_gained: u32,
}

impl LevelProgress {
    pub fn leveled_up(&self) -> bool {
        self.levels_gained > 0
    }
}

pub fn apply_level_ups(level: u32, experience: u64) -> LevelProgress {
    let current = level_from_xp(level, experience);
    LevelProgress {
        previous: level,
        current,
        levels_gained: current - level.min(current),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_matches_reference_points() {
        assert_eq!(xp_for_level(1), 100);
        assert_eq!(xp_for_level(2), 303);
        assert_eq!(xp_for_level(3), 579);
    }

    #[test]
    fn level_from_xp_examples() {
        assert_eq!(level_from_xp(1, 0), 1);
        assert_eq!(level_from_xp(1, 100), 1);
        assert_eq!(level_from_xp(1, 303), 2);
        assert_eq!(level_from_xp(1, 579), 3);
    }

    #[test]
    fn level_never_decreases() {
        assert_eq!(level_from_xp(5, 0), 5);
        assert_eq!(level_from_xp(0, 0), 1);
        let mut previous = 1;
        for experience in (0..20_000).step_by(97) {
            let level = level_from_xp(1, experience);
            assert!(level >= previous);
            previous = level;
        }
    }

    #[test]
    fn bisection_agrees_with_stepping() {
        for experience in (0..50_000).step_by(131) {
            let mut stepped = 1;
            while experience >= xp_for_level(stepped + 1) {
                stepped += 1;
            }
            assert_eq!(level_from_xp(1, experience), stepped, "xp {experience}");
        }
    }

    #[test]
    fn huge_experience_resolves_quickly() {
        assert_eq!(level_from_xp(1, u64::MAX), u32::MAX);
        assert_eq!(level_from_xp(u32::MAX, 0), u32::MAX);
        assert_eq!(apply_level_ups(1, u64::MAX).levels_gained, u32::MAX - 1);
    }

    #[test]
    fn progress_reports_gained_levels() {
        let progress = apply_level_ups(1, 600);
        assert_eq!(progress.current, 3);
        assert_eq!(progress.levels_gained, 2);
        assert!(progress.leveled_up());
        assert!(!apply_level_ups(3, 600).leveled_up());
    }
}
