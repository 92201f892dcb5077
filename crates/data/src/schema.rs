use champscope_core::{ChampionStats, ImageRef, LevelTip, SpellVar, VarValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Language-independent part of a catalog entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChampionMeta {
    pub id: String,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub image: Option<ImageRef>,
    #[serde(default)]
    pub stats: ChampionStats,
    #[serde(default)]
    pub spells: Vec<SpellMeta>,
    #[serde(default)]
    pub passive: Option<SpellMeta>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpellMeta {
    #[serde(default)]
    pub id: String,
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

/// Per-language part of a catalog entry. Numeric fields are optional and only
/// fill gaps left by [`ChampionMeta`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChampionText {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub spells: Vec<SpellText>,
    #[serde(default)]
    pub passive: Option<SpellText>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpellText {
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
}

/// One row of the catalog index.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct IndexEntry {
    pub id: String,
    #[serde(default)]
    pub key: String,
}
