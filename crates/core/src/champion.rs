use crate::infer::profile_champion;
use crate::placeholder::PlaceholderTable;
use crate::range::{parse_spell_range, DEFAULT_ATTACK_RANGE};
use crate::record::{ChampionRecord, ChampionStats, SpellRecord};
use crate::slots::{AbilitySlot, PerSlot};
use crate::stats::DerivedStats;
use crate::tags::{DamageType, RoleKind, TagKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A value in the catalog's base language and in the displayed language.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Localized<T> {
    pub base: T,
    pub local: T,
}

impl<T> Localized<T> {
    pub fn new(base: T, local: T) -> Self {
        Self { base, local }
    }

    pub fn pick(&self, local: bool) -> &T {
        if local {
            &self.local
        } else {
            &self.base
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconKind {
    Champion,
    Spell,
    Passive,
}

impl IconKind {
    fn dir(self) -> &'static str {
        match self {
            Self::Champion => "champion",
            Self::Spell => "spell",
            Self::Passive => "passive",
        }
    }
}

/// `<asset_base>/images/<kind>/<file>`, or empty when there is no file.
pub fn icon_path(asset_base: &str, kind: IconKind, file: &str) -> String {
    if file.trim().is_empty() {
        return String::new();
    }
    let base = asset_base.trim_end_matches('/');
    let base = if base.is_empty() { "." } else { base };
    format!("{base}/images/{}/{file}", kind.dir())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AbilityText {
    /// `None` for the passive.
    pub slot: Option<AbilitySlot>,
    pub name: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AbilityTexts {
    pub passive: Option<AbilityText>,
    pub spells: Vec<AbilityText>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Champion {
    pub id: String,
    pub key: String,
    pub icon: String,
    pub name: Localized<String>,
    pub title: Localized<String>,
    pub stats: ChampionStats,
    pub attack_range: f64,
    pub spell_ranges: PerSlot<f64>,
    pub tags: BTreeSet<TagKind>,
    pub tags_by_slot: PerSlot<BTreeSet<TagKind>>,
    pub damage_types: BTreeSet<DamageType>,
    pub damage_types_by_slot: PerSlot<BTreeSet<DamageType>>,
    pub scales_with_own_health: bool,
    pub health_scaling_by_slot: PerSlot<bool>,
    pub roles: BTreeSet<RoleKind>,
    pub abilities: Localized<AbilityTexts>,
    pub dps0: f64,
    pub dps18: f64,
}

impl Champion {
    pub fn refresh_derived(&mut self) {
        let derived = DerivedStats::from_stats(&self.stats);
        self.dps0 = derived.dps0;
        self.dps18 = derived.dps18;
    }

    pub fn has_tag_in(&self, tag: TagKind, slot: Option<AbilitySlot>) -> bool {
        match slot {
            Some(slot) => self.tags_by_slot.get(slot).contains(&tag),
            None => self.tags.contains(&tag),
        }
    }

    pub fn has_damage_type_in(&self, kind: DamageType, slot: Option<AbilitySlot>) -> bool {
        match slot {
            Some(slot) => self.damage_types_by_slot.get(slot).contains(&kind),
            None => self.damage_types.contains(&kind),
        }
    }

    pub fn scales_with_health_in(&self, slot: Option<AbilitySlot>) -> bool {
        match slot {
            Some(slot) => *self.health_scaling_by_slot.get(slot),
            None => self.scales_with_own_health,
        }
    }
}

/// The finished, sorted entity list plus the versions it was built from.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    pub data_version: String,
    pub base_locale: String,
    pub local_locale: String,
    /// Prefix every icon path was built with.
    #[serde(default)]
    pub asset_base: String,
    pub champions: Vec<Champion>,
}

impl Catalog {
    /// Case-insensitive lookup by id.
    pub fn find(&self, id: &str) -> Option<&Champion> {
        let id = id.trim();
        self.champions
            .iter()
            .find(|champion| champion.id.eq_ignore_ascii_case(id))
    }

    pub fn len(&self) -> usize {
        self.champions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.champions.is_empty()
    }
}

/// Output of [`assemble_champion`]: the entity and every placeholder token that
/// stayed verbatim in either language.
#[derive(Debug, Clone, PartialEq)]
pub struct Assembled {
    pub champion: Champion,
    pub unresolved: BTreeSet<String>,
}

fn image_file(spell: &SpellRecord) -> &str {
    spell
        .image
        .as_ref()
        .map(|image| image.full.as_str())
        .unwrap_or_default()
}

fn render_ability(
    slot: Option<AbilitySlot>,
    base: &SpellRecord,
    shown: &SpellRecord,
    table: &PlaceholderTable,
    asset_base: &str,
    unresolved: &mut BTreeSet<String>,
) -> AbilityText {
    let resolved = table.resolve(shown.display_text());
    unresolved.extend(resolved.unresolved);
    let kind = if slot.is_some() {
        IconKind::Spell
    } else {
        IconKind::Passive
    };
    let file = match image_file(shown) {
        "" => image_file(base),
        file => file,
    };
    let name = if shown.name.trim().is_empty() {
        base.name.clone()
    } else {
        shown.name.clone()
    };
    AbilityText {
        slot,
        name,
        description: resolved.text,
        icon: icon_path(asset_base, kind, file),
    }
}

fn render_texts(
    base: &ChampionRecord,
    shown: &ChampionRecord,
    local: bool,
    asset_base: &str,
    unresolved: &mut BTreeSet<String>,
) -> AbilityTexts {
    let table_for = |base_spell: &SpellRecord, shown_spell: &SpellRecord| {
        if local {
            PlaceholderTable::build(Some(base_spell), Some(shown_spell))
        } else {
            PlaceholderTable::build(Some(base_spell), None)
        }
    };

    let passive = base.passive.as_ref().map(|base_passive| {
        let shown_passive = shown.passive.as_ref().unwrap_or(base_passive);
        let table = table_for(base_passive, shown_passive);
        render_ability(None, base_passive, shown_passive, &table, asset_base, unresolved)
    });

    let spells = AbilitySlot::ALL
        .into_iter()
        .filter_map(|slot| {
            let base_spell = base.spell(slot)?;
            let shown_spell = shown.spell(slot).unwrap_or(base_spell);
            let table = table_for(base_spell, shown_spell);
            Some(render_ability(
                Some(slot),
                base_spell,
                shown_spell,
                &table,
                asset_base,
                unresolved,
            ))
        })
        .collect();

    AbilityTexts { passive, spells }
}

fn text_or(value: &str, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

/// Builds one entity from the base-language record and the same entry in the
/// displayed language. Inference always reads the raw base-language text.
pub fn assemble_champion(
    base: &ChampionRecord,
    local: &ChampionRecord,
    asset_base: &str,
) -> Assembled {
    let mut unresolved = BTreeSet::new();
    let profile = profile_champion(base);

    let attack_range = base
        .stats
        .attack_range
        .filter(|range| range.is_finite())
        .unwrap_or(DEFAULT_ATTACK_RANGE);
    let spell_ranges = PerSlot::from_fn(|slot| {
        base.spell(slot)
            .map(|spell| parse_spell_range(spell.range.as_ref(), spell.range_burn.as_deref()))
            .unwrap_or(0.0)
    });
    let roles = base
        .tags
        .iter()
        .filter_map(|tag| RoleKind::parse(tag))
        .collect();
    let icon_file = base
        .image
        .as_ref()
        .map(|image| image.full.as_str())
        .unwrap_or_default();

    let abilities = Localized::new(
        render_texts(base, base, false, asset_base, &mut unresolved),
        render_texts(base, local, true, asset_base, &mut unresolved),
    );

    let mut champion = Champion {
        id: base.id.clone(),
        key: base.key.clone(),
        icon: icon_path(asset_base, IconKind::Champion, icon_file),
        name: Localized::new(base.name.clone(), text_or(&local.name, &base.name)),
        title: Localized::new(base.title.clone(), text_or(&local.title, &base.title)),
        stats: base.stats.clone(),
        attack_range,
        spell_ranges,
        tags: profile.tags,
        tags_by_slot: profile.tags_by_slot,
        damage_types: profile.damage_types,
        damage_types_by_slot: profile.damage_types_by_slot,
        scales_with_own_health: profile.scales_with_own_health,
        health_scaling_by_slot: profile.health_scaling_by_slot,
        roles,
        abilities,
        dps0: 0.0,
        dps18: 0.0,
    };
    champion.refresh_derived();
    Assembled {
        champion,
        unresolved,
    }
}
