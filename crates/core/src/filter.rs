use crate::champion::Champion;
use crate::slots::{AbilitySlot, PerSlot};
use crate::tags::{DamageType, RoleKind, TagKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterParseError {
    #[error("unknown filter flag: {0}")]
    UnknownFlag(String),
    #[error("unknown ability slot: {0}")]
    UnknownSlot(String),
    #[error("unknown role: {0}")]
    UnknownRole(String),
    #[error("unknown role mode: {0}")]
    UnknownMode(String),
}

/// "Any slot" checkbox plus four per-slot overrides.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SlotFlag {
    #[serde(default)]
    pub any: bool,
    #[serde(default)]
    pub slots: PerSlot<bool>,
}

impl SlotFlag {
    pub fn any_slot() -> Self {
        Self {
            any: true,
            ..Self::default()
        }
    }

    pub fn on_slot(slot: AbilitySlot) -> Self {
        let mut flag = Self::default();
        *flag.slots.get_mut(slot) = true;
        flag
    }

    pub fn is_active(&self) -> bool {
        self.any || self.slots.any()
    }

    /// `has(None)` asks the aggregate, `has(Some(slot))` one slot.
    pub fn accepts(&self, has: impl Fn(Option<AbilitySlot>) -> bool) -> bool {
        if !self.is_active() {
            return true;
        }
        if !self.slots.any() {
            return has(None);
        }
        self.slots
            .iter()
            .filter(|(_, set)| **set)
            .all(|(slot, _)| has(Some(slot)))
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RoleMode {
    #[default]
    Or,
    And,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoleFlag {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub mode: RoleMode,
}

impl RoleFlag {
    pub fn or() -> Self {
        Self {
            enabled: true,
            mode: RoleMode::Or,
        }
    }

    pub fn and() -> Self {
        Self {
            enabled: true,
            mode: RoleMode::And,
        }
    }
}

/// Addresses one flag row of a [`FilterState`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FlagKey {
    Tag(TagKind),
    Damage(DamageType),
    HealthScaling,
}

impl FlagKey {
    pub fn all() -> Vec<FlagKey> {
        let mut keys: Vec<FlagKey> = TagKind::ALL.into_iter().map(FlagKey::Tag).collect();
        keys.extend(DamageType::ALL.into_iter().map(FlagKey::Damage));
        keys.push(FlagKey::HealthScaling);
        keys
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Tag(tag) => tag.key(),
            Self::Damage(kind) => kind.key(),
            Self::HealthScaling => "health_scaling",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let lowered = raw.trim().to_ascii_lowercase();
        if matches!(lowered.as_str(), "health" | "health_scaling" | "hp") {
            return Some(Self::HealthScaling);
        }
        DamageType::parse(&lowered)
            .map(Self::Damage)
            .or_else(|| TagKind::parse(&lowered).map(Self::Tag))
    }

    fn holds(self, champion: &Champion, slot: Option<AbilitySlot>) -> bool {
        match self {
            Self::Tag(tag) => champion.has_tag_in(tag, slot),
            Self::Damage(kind) => champion.has_damage_type_in(kind, slot),
            Self::HealthScaling => champion.scales_with_health_in(slot),
        }
    }
}

/// Everything a front end can constrain. Absent entries mean "off".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FilterState {
    pub search: String,
    pub tags: BTreeMap<TagKind, SlotFlag>,
    pub damage_types: BTreeMap<DamageType, SlotFlag>,
    pub health_scaling: SlotFlag,
    pub roles: BTreeMap<RoleKind, RoleFlag>,
    pub min_attack_range: f64,
    pub min_spell_range: PerSlot<f64>,
    pub min_dps0: f64,
    pub min_dps18: f64,
}

impl FilterState {
    pub fn flag(&self, key: FlagKey) -> SlotFlag {
        match key {
            FlagKey::Tag(tag) => self.tags.get(&tag).copied().unwrap_or_default(),
            FlagKey::Damage(kind) => self.damage_types.get(&kind).copied().unwrap_or_default(),
            FlagKey::HealthScaling => self.health_scaling,
        }
    }

    pub fn flag_mut(&mut self, key: FlagKey) -> &mut SlotFlag {
        match key {
            FlagKey::Tag(tag) => self.tags.entry(tag).or_default(),
            FlagKey::Damage(kind) => self.damage_types.entry(kind).or_default(),
            FlagKey::HealthScaling => &mut self.health_scaling,
        }
    }

    pub fn role(&self, role: RoleKind) -> RoleFlag {
        self.roles.get(&role).copied().unwrap_or_default()
    }

    pub fn set_role(&mut self, role: RoleKind, flag: RoleFlag) {
        if flag.enabled {
            self.roles.insert(role, flag);
        } else {
            self.roles.remove(&role);
        }
    }

    fn enabled_roles(&self, mode: RoleMode) -> impl Iterator<Item = RoleKind> + '_ {
        self.roles
            .iter()
            .filter(move |(_, flag)| flag.enabled && flag.mode == mode)
            .map(|(role, _)| *role)
    }

    /// Turns on a flag written as `name` or `name@Q,E`.
    pub fn enable_flag_spec(&mut self, spec: &str) -> Result<FlagKey, FilterParseError> {
        let (name, slots) = match spec.split_once('@') {
            Some((name, slots)) => (name, Some(slots)),
            None => (spec, None),
        };
        let key =
            FlagKey::parse(name).ok_or_else(|| FilterParseError::UnknownFlag(name.to_string()))?;
        let mut parsed = Vec::new();
        for raw in slots.into_iter().flat_map(|slots| slots.split(',')) {
            let slot =
                AbilitySlot::parse(raw).ok_or_else(|| FilterParseError::UnknownSlot(raw.to_string()))?;
            parsed.push(slot);
        }
        let flag = self.flag_mut(key);
        if parsed.is_empty() {
            flag.any = true;
        }
        for slot in parsed {
            *flag.slots.get_mut(slot) = true;
        }
        Ok(key)
    }

    /// Turns on a role written as `name` (OR group) or `name:and`.
    pub fn enable_role_spec(&mut self, spec: &str) -> Result<RoleKind, FilterParseError> {
        let (name, mode) = match spec.split_once(':') {
            Some((name, mode)) => (name, mode.trim().to_ascii_lowercase()),
            None => (spec, "or".to_string()),
        };
        let role =
            RoleKind::parse(name).ok_or_else(|| FilterParseError::UnknownRole(name.to_string()))?;
        let mode = match mode.as_str() {
            "or" | "any" => RoleMode::Or,
            "and" | "all" => RoleMode::And,
            _ => return Err(FilterParseError::UnknownMode(mode)),
        };
        self.set_role(
            role,
            RoleFlag {
                enabled: true,
                mode,
            },
        );
        Ok(role)
    }

    /// True when nothing narrows the list.
    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty()
            && FlagKey::all()
                .into_iter()
                .all(|key| !self.flag(key).is_active())
            && self.roles.values().all(|flag| !flag.enabled)
            && threshold(self.min_attack_range).is_none()
            && AbilitySlot::ALL
                .into_iter()
                .all(|slot| threshold(*self.min_spell_range.get(slot)).is_none())
            && threshold(self.min_dps0).is_none()
            && threshold(self.min_dps18).is_none()
    }
}

fn threshold(value: f64) -> Option<f64> {
    (value.is_finite() && value > 0.0).then_some(value)
}

fn meets(value: f64, minimum: f64) -> bool {
    threshold(minimum).map_or(true, |minimum| value >= minimum)
}

fn matches_search(champion: &Champion, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    champion.name.base.to_lowercase().contains(&query)
        || champion.name.local.to_lowercase().contains(&query)
}

fn matches_thresholds(champion: &Champion, filter: &FilterState) -> bool {
    meets(champion.attack_range, filter.min_attack_range)
        && AbilitySlot::ALL.into_iter().all(|slot| {
            meets(
                *champion.spell_ranges.get(slot),
                *filter.min_spell_range.get(slot),
            )
        })
        && meets(champion.dps0, filter.min_dps0)
        && meets(champion.dps18, filter.min_dps18)
}

fn matches_roles(champion: &Champion, filter: &FilterState) -> bool {
    let all_and = filter
        .enabled_roles(RoleMode::And)
        .all(|role| champion.roles.contains(&role));
    let mut or_group = filter.enabled_roles(RoleMode::Or).peekable();
    let any_or = or_group.peek().is_none() || or_group.any(|role| champion.roles.contains(&role));
    all_and && any_or
}

pub fn matches(champion: &Champion, filter: &FilterState) -> bool {
    matches_search(champion, &filter.search)
        && matches_thresholds(champion, filter)
        && filter
            .tags
            .iter()
            .all(|(tag, flag)| flag.accepts(|slot| champion.has_tag_in(*tag, slot)))
        && filter
            .damage_types
            .iter()
            .all(|(kind, flag)| flag.accepts(|slot| champion.has_damage_type_in(*kind, slot)))
        && filter
            .health_scaling
            .accepts(|slot| FlagKey::HealthScaling.holds(champion, slot))
        && matches_roles(champion, filter)
}

pub fn count_matches(champions: &[Champion], filter: &FilterState) -> usize {
    champions
        .iter()
        .filter(|champion| matches(champion, filter))
        .count()
}

pub fn filter_champions<'a>(champions: &'a [Champion], filter: &FilterState) -> Vec<&'a Champion> {
    champions
        .iter()
        .filter(|champion| matches(champion, filter))
        .collect()
}

/// `found N of M` line shown above a result list.
pub fn result_summary(shown: usize, total: usize) -> String {
    format!("found {shown} of {total}")
}
