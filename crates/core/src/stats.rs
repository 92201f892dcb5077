use crate::record::ChampionStats;
use serde::{Deserialize, Serialize};

pub const FIRST_LEVEL: u32 = 1;
pub const MAX_LEVEL: u32 = 18;

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

impl ChampionStats {
    pub fn attack_damage_at(&self, level: u32) -> f64 {
        let steps = level.saturating_sub(1) as f64;
        self.attack_damage + self.attack_damage_per_level * steps
    }

    /// `attack_speed_per_level` is a percentage of the base rate.
    pub fn attack_speed_at(&self, level: u32) -> f64 {
        let steps = level.saturating_sub(1) as f64;
        self.attack_speed * (1.0 + (self.attack_speed_per_level / 100.0) * steps)
    }

    pub fn dps_at(&self, level: u32) -> f64 {
        finite_or_zero(self.attack_damage_at(level) * self.attack_speed_at(level))
    }

    pub fn health_at(&self, level: u32) -> f64 {
        let steps = level.saturating_sub(1) as f64;
        finite_or_zero(self.hp + self.hp_per_level * steps)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct DerivedStats {
    pub dps0: f64,
    pub dps18: f64,
}

impl DerivedStats {
    pub fn from_stats(stats: &ChampionStats) -> Self {
        Self {
            dps0: stats.dps_at(FIRST_LEVEL),
            dps18: stats.dps_at(MAX_LEVEL),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(ad: f64, ad_lvl: f64, as_base: f64, as_lvl: f64) -> ChampionStats {
        ChampionStats {
            attack_damage: ad,
            attack_damage_per_level: ad_lvl,
            attack_speed: as_base,
            attack_speed_per_level: as_lvl,
            ..ChampionStats::default()
        }
    }

    #[test]
    fn dps_at_reference_levels() {
        let derived = DerivedStats::from_stats(&stats(60.0, 3.0, 0.65, 2.5));
        assert!((derived.dps0 - 39.0).abs() < 1e-9);
        assert!((derived.dps18 - 102.81375).abs() < 1e-9);
    }

    #[test]
    fn non_negative_growth_never_lowers_dps() {
        for (ad, ad_lvl, as_base, as_lvl) in [
            (50.0, 0.0, 0.6, 0.0),
            (70.0, 4.5, 0.625, 3.0),
            (0.0, 0.0, 0.0, 0.0),
            (55.0, 2.0, 0.7, 1.5),
        ] {
            let derived = DerivedStats::from_stats(&stats(ad, ad_lvl, as_base, as_lvl));
            assert!(derived.dps0 <= derived.dps18);
        }
    }

    #[test]
    fn non_finite_stats_become_zero() {
        let derived = DerivedStats::from_stats(&stats(f64::NAN, 3.0, 0.65, 2.5));
        assert_eq!(derived.dps0, 0.0);
        assert_eq!(derived.dps18, 0.0);
        let derived = DerivedStats::from_stats(&stats(f64::INFINITY, 0.0, 0.0, 0.0));
        assert_eq!(derived.dps0, 0.0);
    }
}
