//! Per-language champion records as they arrive from a catalog source.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Loosely typed scalar or list found in ability data.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum VarValue {
    #[default]
    Null,
    Number(f64),
    Text(String),
    List(Vec<VarValue>),
}

impl VarValue {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Number(value) => !value.is_finite(),
            Self::Text(text) => text.trim().is_empty(),
            Self::List(items) => items.iter().all(VarValue::is_empty),
        }
    }

    /// Human readable form: numbers compact, lists joined with `/`.
    pub fn display(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Number(value) => format_number(*value),
            Self::Text(text) => text.clone(),
            Self::List(items) => items
                .iter()
                .filter(|item| !matches!(item, VarValue::Null))
                .map(VarValue::display)
                .collect::<Vec<_>>()
                .join("/"),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    if (value - value.round()).abs() < 1e-6 {
        return format!("{}", value.round() as i64);
    }
    let fixed = format!("{value:.3}");
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Semantic category a structured variable scales with.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScalingLink {
    AttackDamage,
    BonusAttackDamage,
    SpellDamage,
    Armor,
    BonusArmor,
    SpellBlock,
    BonusSpellBlock,
    Health,
    MaxHealth,
    BonusHealth,
    Mana,
    Other(String),
}

impl ScalingLink {
    /// Returns `None` for blank and `unknown` links, which carry no meaning.
    pub fn parse(raw: &str) -> Option<Self> {
        let lowered = raw.trim().to_ascii_lowercase();
        let link = match lowered.as_str() {
            "" | "unknown" => return None,
            "attackdamage" => Self::AttackDamage,
            "bonusattackdamage" => Self::BonusAttackDamage,
            "spelldamage" => Self::SpellDamage,
            "armor" => Self::Armor,
            "bonusarmor" => Self::BonusArmor,
            "spellblock" => Self::SpellBlock,
            "bonusspellblock" => Self::BonusSpellBlock,
            "health" => Self::Health,
            "maxhealth" => Self::MaxHealth,
            "bonushealth" => Self::BonusHealth,
            "mana" => Self::Mana,
            _ => Self::Other(lowered),
        };
        Some(link)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::AttackDamage => "attackdamage",
            Self::BonusAttackDamage => "bonusattackdamage",
            Self::SpellDamage => "spelldamage",
            Self::Armor => "armor",
            Self::BonusArmor => "bonusarmor",
            Self::SpellBlock => "spellblock",
            Self::BonusSpellBlock => "bonusspellblock",
            Self::Health => "health",
            Self::MaxHealth => "maxhealth",
            Self::BonusHealth => "bonushealth",
            Self::Mana => "mana",
            Self::Other(raw) => raw,
        }
    }

    pub fn is_health(&self) -> bool {
        matches!(self, Self::Health | Self::MaxHealth | Self::BonusHealth)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SpellVar {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub coeff: VarValue,
    #[serde(default)]
    pub link: Option<String>,
}

impl SpellVar {
    pub fn scaling_link(&self) -> Option<ScalingLink> {
        self.link.as_deref().and_then(ScalingLink::parse)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LevelTip {
    #[serde(default)]
    pub label: Vec<String>,
    #[serde(default)]
    pub effect: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ImageRef {
    #[serde(default)]
    pub full: String,
}

/// One ability (spell slot or passive) after locale merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpellRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tooltip: String,
    #[serde(default)]
    pub leveltip: Option<LevelTip>,
    #[serde(default)]
    pub vars: Vec<SpellVar>,
    #[serde(default)]
    pub datavalues: BTreeMap<String, VarValue>,
    #[serde(default)]
    pub effect_burn: Vec<VarValue>,
    #[serde(default)]
    pub cooldown_burn: Option<String>,
    #[serde(default)]
    pub cost_burn: Option<String>,
    #[serde(default)]
    pub range_burn: Option<String>,
    #[serde(default)]
    pub range: Option<VarValue>,
    #[serde(default)]
    pub image: Option<ImageRef>,
}

impl SpellRecord {
    /// Tooltip when present, otherwise the short description.
    pub fn display_text(&self) -> &str {
        if self.tooltip.trim().is_empty() {
            &self.description
        } else {
            &self.tooltip
        }
    }

    pub fn level_labels(&self) -> String {
        self.leveltip
            .as_ref()
            .map(|tip| tip.label.join(" "))
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChampionStats {
    #[serde(default)]
    pub hp: f64,
    #[serde(default, rename = "hpperlevel")]
    pub hp_per_level: f64,
    #[serde(default)]
    pub mp: f64,
    #[serde(default, rename = "mpperlevel")]
    pub mp_per_level: f64,
    #[serde(default, rename = "movespeed")]
    pub move_speed: f64,
    #[serde(default)]
    pub armor: f64,
    #[serde(default, rename = "armorperlevel")]
    pub armor_per_level: f64,
    #[serde(default, rename = "spellblock")]
    pub spell_block: f64,
    #[serde(default, rename = "spellblockperlevel")]
    pub spell_block_per_level: f64,
    #[serde(default, rename = "attackrange")]
    pub attack_range: Option<f64>,
    #[serde(default, rename = "hpregen")]
    pub hp_regen: f64,
    #[serde(default, rename = "hpregenperlevel")]
    pub hp_regen_per_level: f64,
    #[serde(default, rename = "attackdamage")]
    pub attack_damage: f64,
    #[serde(default, rename = "attackdamageperlevel")]
    pub attack_damage_per_level: f64,
    #[serde(default, rename = "attackspeed")]
    pub attack_speed: f64,
    #[serde(default, rename = "attackspeedperlevel")]
    pub attack_speed_per_level: f64,
}

/// A catalog entry in one language.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChampionRecord {
    pub id: String,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub image: Option<ImageRef>,
    #[serde(default)]
    pub stats: ChampionStats,
    #[serde(default)]
    pub spells: Vec<SpellRecord>,
    #[serde(default)]
    pub passive: Option<SpellRecord>,
}

impl ChampionRecord {
    pub fn spell(&self, slot: crate::AbilitySlot) -> Option<&SpellRecord> {
        self.spells.get(slot.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_numbers_compactly() {
        assert_eq!(format_number(80.0), "80");
        assert_eq!(format_number(0.6), "0.6");
        assert_eq!(format_number(0.3 * 100.0), "30");
        assert_eq!(format_number(1.23456), "1.235");
        assert_eq!(format_number(-15.0), "-15");
    }

    #[test]
    fn var_value_lists_join_with_slash() {
        let value: VarValue = serde_json::from_str("[80, 120.5, \"x\", null]").expect("parse");
        assert_eq!(value.display(), "80/120.5/x");
    }

    #[test]
    fn unknown_links_are_dropped() {
        assert_eq!(ScalingLink::parse("Unknown"), None);
        assert_eq!(ScalingLink::parse(" "), None);
        assert_eq!(ScalingLink::parse("BonusHealth"), Some(ScalingLink::BonusHealth));
        assert_eq!(
            ScalingLink::parse("ap"),
            Some(ScalingLink::Other("ap".to_string()))
        );
    }

    #[test]
    fn spell_record_reads_camel_case_fields() {
        let raw = r#"{
            "id": "AnnieQ",
            "name": "Disintegrate",
            "tooltip": "Deals {{ totaldamage }} magic damage",
            "effectBurn": [null, "80/115/150"],
            "cooldownBurn": "4",
            "rangeBurn": "625",
            "range": [625, 625],
            "vars": [{"key": "damage", "coeff": [80, 120], "link": "spelldamage"}]
        }"#;
        let spell: SpellRecord = serde_json::from_str(raw).expect("parse spell");
        assert_eq!(spell.effect_burn.len(), 2);
        assert_eq!(spell.cooldown_burn.as_deref(), Some("4"));
        assert_eq!(spell.vars[0].scaling_link(), Some(ScalingLink::SpellDamage));
        assert_eq!(spell.display_text(), "Deals {{ totaldamage }} magic damage");
    }
}
