use crate::schema::{ChampionMeta, ChampionText, SpellMeta, SpellText};
use champscope_core::{ChampionRecord, ImageRef, SpellRecord};

fn fill<T: Clone>(meta: &Option<T>, text: &Option<T>) -> Option<T> {
    meta.clone().or_else(|| text.clone())
}

fn fill_burn(meta: &Option<String>, text: &Option<String>) -> Option<String> {
    meta.clone()
        .filter(|value| !value.trim().is_empty())
        .or_else(|| text.clone())
}

fn fill_vec<T: Clone>(meta: &[T], text: &[T]) -> Vec<T> {
    if meta.is_empty() {
        text.to_vec()
    } else {
        meta.to_vec()
    }
}

pub fn merge_spell(meta: &SpellMeta, text: Option<&SpellText>) -> SpellRecord {
    let empty = SpellText::default();
    let text = text.unwrap_or(&empty);
    let datavalues = if meta.datavalues.is_empty() {
        text.datavalues.clone()
    } else {
        meta.datavalues.clone()
    };
    SpellRecord {
        id: meta.id.clone(),
        name: text.name.clone(),
        description: text.description.clone(),
        tooltip: text.tooltip.clone(),
        leveltip: text.leveltip.clone(),
        vars: fill_vec(&meta.vars, &text.vars),
        datavalues,
        effect_burn: fill_vec(&meta.effect_burn, &text.effect_burn),
        cooldown_burn: fill_burn(&meta.cooldown_burn, &text.cooldown_burn),
        cost_burn: fill_burn(&meta.cost_burn, &text.cost_burn),
        range_burn: fill_burn(&meta.range_burn, &text.range_burn),
        range: fill(&meta.range, &text.range),
        image: meta.image.clone(),
    }
}

/// Combines metadata with one language's text. Spells pair by index; text
/// spells beyond the metadata list are dropped.
pub fn merge_locale(meta: &ChampionMeta, text: &ChampionText) -> ChampionRecord {
    let spells = meta
        .spells
        .iter()
        .enumerate()
        .map(|(index, spell)| merge_spell(spell, text.spells.get(index)))
        .collect();
    let passive = meta
        .passive
        .as_ref()
        .map(|passive| merge_spell(passive, text.passive.as_ref()));
    let name = if text.name.trim().is_empty() {
        meta.id.clone()
    } else {
        text.name.clone()
    };
    ChampionRecord {
        id: meta.id.clone(),
        key: meta.key.clone(),
        name,
        title: text.title.clone(),
        tags: meta.tags.clone(),
        image: meta.image.clone().or_else(|| {
            Some(ImageRef {
                full: format!("{}.png", meta.id),
            })
        }),
        stats: meta.stats.clone(),
        spells,
        passive,
    }
}

/// Picks the requested language, falling back to the default language text.
pub fn merge_with_fallback(
    meta: &ChampionMeta,
    text: Option<&ChampionText>,
    fallback: Option<&ChampionText>,
) -> ChampionRecord {
    let empty = ChampionText::default();
    let text = text.or(fallback).unwrap_or(&empty);
    merge_locale(meta, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use champscope_core::VarValue;

    fn meta() -> ChampionMeta {
        ChampionMeta {
            id: "Annie".to_string(),
            key: "1".to_string(),
            tags: vec!["Mage".to_string()],
            spells: vec![
                SpellMeta {
                    id: "AnnieQ".to_string(),
                    cooldown_burn: Some("4".to_string()),
                    range: Some(VarValue::Number(625.0)),
                    ..SpellMeta::default()
                },
                SpellMeta {
                    id: "AnnieW".to_string(),
                    ..SpellMeta::default()
                },
            ],
            ..ChampionMeta::default()
        }
    }

    fn text() -> ChampionText {
        ChampionText {
            name: "Энни".to_string(),
            title: "Дитя тьмы".to_string(),
            spells: vec![
                SpellText {
                    name: "Испепеление".to_string(),
                    tooltip: "Наносит {{ totaldamage }} магического урона".to_string(),
                    cooldown_burn: Some("99".to_string()),
                    ..SpellText::default()
                },
                SpellText {
                    name: "Огненный конус".to_string(),
                    cooldown_burn: Some("8".to_string()),
                    range: Some(VarValue::Number(600.0)),
                    ..SpellText::default()
                },
                SpellText {
                    name: "Лишнее".to_string(),
                    ..SpellText::default()
                },
            ],
            passive: None,
        }
    }

    #[test]
    fn metadata_wins_and_text_fills_gaps() {
        let record = merge_locale(&meta(), &text());
        assert_eq!(record.name, "Энни");
        assert_eq!(record.spells.len(), 2);
        assert_eq!(record.spells[0].cooldown_burn.as_deref(), Some("4"));
        assert_eq!(record.spells[0].range, Some(VarValue::Number(625.0)));
        assert_eq!(record.spells[0].id, "AnnieQ");
        assert_eq!(record.spells[1].cooldown_burn.as_deref(), Some("8"));
        assert_eq!(record.spells[1].range, Some(VarValue::Number(600.0)));
        assert_eq!(record.spells[1].name, "Огненный конус");
        assert_eq!(record.tags, vec!["Mage".to_string()]);
    }

    #[test]
    fn missing_language_uses_fallback_text() {
        let fallback = ChampionText {
            name: "Annie".to_string(),
            ..ChampionText::default()
        };
        let record = merge_with_fallback(&meta(), None, Some(&fallback));
        assert_eq!(record.name, "Annie");
        let record = merge_with_fallback(&meta(), None, None);
        assert_eq!(record.name, "Annie");
        assert_eq!(record.spells[0].name, "");
        assert_eq!(
            record.image.map(|image| image.full),
            Some("Annie.png".to_string())
        );
    }
}
