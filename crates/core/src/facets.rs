//! "What if" counts for every filter control.
//!
//! Each count re-runs [`matches`] over the whole list with a single control
//! flipped on and every other control left as the caller set it. A control
//! whose count is zero can never produce a result and is reported disabled.

use crate::champion::Champion;
use crate::filter::{count_matches, FilterState, FlagKey, RoleFlag, RoleMode};
use crate::range::max_finite_spell_ranges;
use crate::slots::{AbilitySlot, PerSlot};
use crate::tags::RoleKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlagFacet {
    pub key: FlagKey,
    pub any_count: usize,
    pub slot_counts: PerSlot<usize>,
    pub disabled: bool,
    pub slot_disabled: PerSlot<bool>,
    /// All four slot variants are impossible.
    pub row_disabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoleFacet {
    pub role: RoleKind,
    pub or_count: usize,
    pub and_count: usize,
    pub disabled: bool,
}

/// Upper ends for the numeric sliders, taken over the whole list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NumericBounds {
    pub max_attack_range: f64,
    pub max_spell_range: PerSlot<f64>,
    pub max_dps0: f64,
    pub max_dps18: f64,
}

impl NumericBounds {
    pub fn from_champions(champions: &[Champion]) -> Self {
        let max_of = |value: fn(&Champion) -> f64| {
            champions
                .iter()
                .map(value)
                .filter(|value| value.is_finite())
                .fold(0.0, f64::max)
        };
        Self {
            max_attack_range: max_of(|champion| champion.attack_range),
            max_spell_range: max_finite_spell_ranges(champions).map(|_, max| max.unwrap_or(0.0)),
            max_dps0: max_of(|champion| champion.dps0),
            max_dps18: max_of(|champion| champion.dps18),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FacetReport {
    pub total: usize,
    pub matching: usize,
    pub flags: Vec<FlagFacet>,
    pub roles: Vec<RoleFacet>,
    pub bounds: NumericBounds,
}

fn flag_facet(champions: &[Champion], filter: &FilterState, key: FlagKey) -> FlagFacet {
    let mut probe = filter.clone();
    probe.flag_mut(key).any = true;
    let any_count = count_matches(champions, &probe);

    let slot_counts = PerSlot::from_fn(|slot| {
        let mut probe = filter.clone();
        let flag = probe.flag_mut(key);
        flag.any = true;
        *flag.slots.get_mut(slot) = true;
        count_matches(champions, &probe)
    });
    let slot_disabled = slot_counts.map(|_, count| *count == 0);

    FlagFacet {
        key,
        any_count,
        disabled: any_count == 0,
        row_disabled: slot_disabled.all(),
        slot_counts,
        slot_disabled,
    }
}

fn role_facet(champions: &[Champion], filter: &FilterState, role: RoleKind) -> RoleFacet {
    let mut base = filter.clone();
    base.roles.remove(&role);
    let count_with = |mode: RoleMode| {
        let mut probe = base.clone();
        probe.set_role(
            role,
            RoleFlag {
                enabled: true,
                mode,
            },
        );
        count_matches(champions, &probe)
    };
    let or_count = count_with(RoleMode::Or);
    let and_count = count_with(RoleMode::And);
    RoleFacet {
        role,
        or_count,
        and_count,
        disabled: or_count.max(and_count) == 0,
    }
}

impl FacetReport {
    pub fn compute(champions: &[Champion], filter: &FilterState) -> Self {
        Self {
            total: champions.len(),
            matching: count_matches(champions, filter),
            flags: FlagKey::all()
                .into_iter()
                .map(|key| flag_facet(champions, filter, key))
                .collect(),
            roles: RoleKind::ALL
                .into_iter()
                .map(|role| role_facet(champions, filter, role))
                .collect(),
            bounds: NumericBounds::from_champions(champions),
        }
    }

    pub fn flag(&self, key: FlagKey) -> Option<&FlagFacet> {
        self.flags.iter().find(|facet| facet.key == key)
    }

    pub fn role(&self, role: RoleKind) -> Option<&RoleFacet> {
        self.roles.iter().find(|facet| facet.role == role)
    }

    /// Switches off every control this report marks disabled. Returns whether
    /// anything changed.
    pub fn apply_to(&self, filter: &mut FilterState) -> bool {
        let mut changed = false;
        for facet in &self.flags {
            let current = filter.flag(facet.key);
            if !current.is_active() {
                continue;
            }
            if facet.disabled || facet.row_disabled {
                filter.flag_mut(facet.key).clear();
                changed = true;
                continue;
            }
            for slot in AbilitySlot::ALL {
                if *current.slots.get(slot) && *facet.slot_disabled.get(slot) {
                    *filter.flag_mut(facet.key).slots.get_mut(slot) = false;
                    changed = true;
                }
            }
        }
        for facet in &self.roles {
            if facet.disabled && filter.role(facet.role).enabled {
                filter.roles.remove(&facet.role);
                changed = true;
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::champion::Localized;
    use crate::filter::SlotFlag;
    use crate::tags::TagKind;
    use std::collections::BTreeSet;

    fn champion(id: &str, tags_q: &[TagKind], roles: &[RoleKind]) -> Champion {
        let tags: BTreeSet<TagKind> = tags_q.iter().copied().collect();
        Champion {
            id: id.to_string(),
            name: Localized::new(id.to_string(), id.to_string()),
            tags: tags.clone(),
            tags_by_slot: PerSlot {
                q: tags,
                ..PerSlot::default()
            },
            roles: roles.iter().copied().collect(),
            ..Champion::default()
        }
    }

    fn roster() -> Vec<Champion> {
        vec![
            champion("Ashe", &[TagKind::Slow], &[RoleKind::Marksman, RoleKind::Support]),
            champion("Leona", &[TagKind::Stun], &[RoleKind::Tank, RoleKind::Support]),
            champion("Annie", &[TagKind::Stun], &[RoleKind::Mage]),
        ]
    }

    #[test]
    fn counts_and_disables_flags() {
        let roster = roster();
        let report = FacetReport::compute(&roster, &FilterState::default());
        assert_eq!(report.total, 3);
        assert_eq!(report.matching, 3);

        let stun = report.flag(FlagKey::Tag(TagKind::Stun)).expect("stun facet");
        assert_eq!(stun.any_count, 2);
        assert_eq!(stun.slot_counts.q, 2);
        assert_eq!(stun.slot_counts.e, 0);
        assert!(!stun.row_disabled);

        let stealth = report.flag(FlagKey::Tag(TagKind::Stealth)).expect("stealth facet");
        assert!(stealth.disabled);
        assert!(stealth.row_disabled);
    }

    #[test]
    fn role_counts_ignore_the_role_itself() {
        let roster = roster();
        let mut filter = FilterState::default();
        filter.set_role(RoleKind::Support, RoleFlag::and());
        let report = FacetReport::compute(&roster, &filter);

        let support = report.role(RoleKind::Support).expect("support facet");
        assert_eq!(support.and_count, 2);
        assert_eq!(support.or_count, 2);

        let mage = report.role(RoleKind::Mage).expect("mage facet");
        assert_eq!(mage.and_count, 0);
        assert_eq!(mage.or_count, 0);
        assert!(mage.disabled);

        let tank = report.role(RoleKind::Tank).expect("tank facet");
        assert_eq!(tank.and_count, 1);
        assert!(!tank.disabled);
    }

    #[test]
    fn apply_switches_off_impossible_controls() {
        let roster = roster();
        let mut filter = FilterState::default();
        filter.tags.insert(TagKind::Stun, SlotFlag::on_slot(AbilitySlot::E));
        let report = FacetReport::compute(&roster, &filter);
        assert_eq!(report.matching, 0);
        assert!(report.apply_to(&mut filter));
        assert!(!filter.flag(FlagKey::Tag(TagKind::Stun)).is_active());

        filter.set_role(RoleKind::Mage, RoleFlag::or());
        filter.set_role(RoleKind::Tank, RoleFlag::and());
        let report = FacetReport::compute(&roster, &filter);
        assert!(report.apply_to(&mut filter));
        assert!(!filter.role(RoleKind::Mage).enabled);
        assert!(filter.role(RoleKind::Tank).enabled);

        let report = FacetReport::compute(&roster, &filter);
        assert!(!report.apply_to(&mut filter));
    }

    #[test]
    fn bounds_skip_unbounded_ranges() {
        let mut roster = roster();
        roster[0].spell_ranges.r = 50_000.0;
        roster[1].spell_ranges.r = 1_100.0;
        roster[2].attack_range = 625.0;
        roster[2].dps18 = 90.0;
        let bounds = NumericBounds::from_champions(&roster);
        assert_eq!(bounds.max_spell_range.r, 1_100.0);
        assert_eq!(bounds.max_spell_range.q, 0.0);
        assert_eq!(bounds.max_attack_range, 625.0);
        assert_eq!(bounds.max_dps18, 90.0);
    }
}
