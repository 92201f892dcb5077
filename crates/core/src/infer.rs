//! Keyword classifier for ability text.

use crate::record::{ChampionRecord, SpellRecord};
use crate::slots::{AbilitySlot, PerSlot};
use crate::tags::{DamageType, TagKind};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::LazyLock;

struct TagRule {
    tag: TagKind,
    patterns: Vec<Regex>,
}

fn rule(tag: TagKind, patterns: &[&str]) -> TagRule {
    TagRule {
        tag,
        patterns: patterns
            .iter()
            .map(|pattern| Regex::new(&format!("(?i){pattern}")).expect("invalid tag pattern"))
            .collect(),
    }
}

static TAG_RULES: LazyLock<Vec<TagRule>> = LazyLock::new(|| {
    vec![
        rule(
            TagKind::Mobility,
            &[r"\b(dash|dashes|blink|blinks|leap|leaps|jump|jumps|teleport|teleports|reposition|untargetable)\b"],
        ),
        rule(TagKind::Stun, &[r"\b(stun|stunned)\b"]),
        rule(
            TagKind::Root,
            &[r"\b(root|rooted|immobilize|immobilized|snare|snared)\b"],
        ),
        rule(
            TagKind::Knockup,
            &[
                r"\b(knock\s?up|airborne|launched)\b",
                r"\b(knock\s?back|pushed back|displace|displaced)\b",
            ],
        ),
        rule(TagKind::Silence, &[r"\b(silence|silenced)\b"]),
        rule(TagKind::Slow, &[r"\b(slow|slowed)\b"]),
        rule(
            TagKind::Pull,
            &[r"\b(pull|pulls|pulled|drag|drags|dragged|grab|grabs|grabbed)\b"],
        ),
        rule(
            TagKind::Stealth,
            &[r"\b(stealth|invisible|camouflage|camouflaged)\b"],
        ),
        rule(
            TagKind::AttackSpeed,
            &[r"\b(attack speed|bonus attack speed|increases attack speed)\b"],
        ),
        rule(
            TagKind::MoveSpeed,
            &[r"\b(movement speed|move speed|bonus movement speed|increases movement speed|gain movement speed)\b"],
        ),
        rule(TagKind::Shield, &[r"\b(shield|shielded)\b"]),
        rule(
            TagKind::Heal,
            &[r"\b(heal|heals|healed|restore health|restores health)\b"],
        ),
        rule(
            TagKind::Lifesteal,
            &[
                r"\b(lifesteal|life steal|omnivamp|spell vamp|vamp)\b",
                r"\{\{\s*(vamp|lifesteal|omnivamp)",
                r"(heal|healing|heals).{0,15}(for|from).{0,15}(damage dealt|damage)",
                r"(heal|healing|heals).{0,15}(% of|percent of).{0,15}damage",
                r"(damage dealt|damage).{0,15}(as health|as healing)",
            ],
        ),
    ]
});

/// Unresolved template keys that mean the ability scales with its owner's health.
const HEALTH_PLACEHOLDERS: &[&str] = &[
    "maxhealth",
    "bonushealth",
    "missinghealthpercent",
    "missinghealthdamage",
    "percenthealth",
    "percentmaxhealth",
    "maxhealthpercent",
    "maxhealthdamage",
    "percenthealthbase",
    "percenthealthempowered",
    "totalpercenthealth",
];

static HEALTH_PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\{{\{{\s*({})",
        HEALTH_PLACEHOLDERS.join("|")
    ))
    .expect("invalid health placeholder regex")
});

pub fn tags_in_text(text: &str) -> BTreeSet<TagKind> {
    if text.trim().is_empty() {
        return BTreeSet::new();
    }
    TAG_RULES
        .iter()
        .filter(|rule| rule.patterns.iter().any(|pattern| pattern.is_match(text)))
        .map(|rule| rule.tag)
        .collect()
}

pub fn damage_types_in_text(text: &str) -> BTreeSet<DamageType> {
    let lowered = text.to_lowercase();
    DamageType::ALL
        .into_iter()
        .filter(|kind| lowered.contains(kind.phrase()))
        .collect()
}

pub fn has_health_placeholder(text: &str) -> bool {
    HEALTH_PLACEHOLDER_RE.is_match(text)
}

pub fn spell_tags(spell: &SpellRecord) -> BTreeSet<TagKind> {
    let labels = spell.level_labels();
    [
        spell.name.as_str(),
        spell.description.as_str(),
        spell.tooltip.as_str(),
        labels.as_str(),
    ]
    .into_iter()
    .flat_map(tags_in_text)
    .collect()
}

pub fn spell_damage_types(spell: &SpellRecord) -> BTreeSet<DamageType> {
    let mut types = damage_types_in_text(&spell.tooltip);
    types.extend(damage_types_in_text(&spell.description));
    types
}

pub fn spell_scales_with_health(spell: &SpellRecord) -> bool {
    let linked = spell
        .vars
        .iter()
        .filter_map(|var| var.scaling_link())
        .any(|link| link.is_health());
    linked || has_health_placeholder(&spell.tooltip) || has_health_placeholder(&spell.description)
}

/// Everything the classifier derives for one champion.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AbilityProfile {
    pub tags: BTreeSet<TagKind>,
    pub tags_by_slot: PerSlot<BTreeSet<TagKind>>,
    pub damage_types: BTreeSet<DamageType>,
    pub damage_types_by_slot: PerSlot<BTreeSet<DamageType>>,
    pub scales_with_own_health: bool,
    pub health_scaling_by_slot: PerSlot<bool>,
}

/// Classifies a base-language record. Placeholders are read raw, so pass the
/// record before substitution.
pub fn profile_champion(record: &ChampionRecord) -> AbilityProfile {
    let mut profile = AbilityProfile::default();
    for slot in AbilitySlot::ALL {
        let Some(spell) = record.spell(slot) else {
            continue;
        };
        let tags = spell_tags(spell);
        profile.tags.extend(tags.iter().copied());
        *profile.tags_by_slot.get_mut(slot) = tags;

        let damage = spell_damage_types(spell);
        profile.damage_types.extend(damage.iter().copied());
        *profile.damage_types_by_slot.get_mut(slot) = damage;

        *profile.health_scaling_by_slot.get_mut(slot) = spell_scales_with_health(spell);
    }

    if let Some(passive) = &record.passive {
        profile.tags.extend(tags_in_text(&passive.name));
        profile.tags.extend(tags_in_text(&passive.description));
        profile
            .damage_types
            .extend(damage_types_in_text(&passive.description));
        if spell_scales_with_health(passive) {
            profile.health_scaling_by_slot = PerSlot::from_fn(|_| true);
        }
    }

    profile.scales_with_own_health = profile.health_scaling_by_slot.any();
    profile
}
