//! Spell range parsing and the catalog-wide range fixup.
//!
//! Source data writes unbounded abilities three ways: the keywords `global` /
//! `infinite`, huge literal numbers (25000, 30000), or nothing at all. They all
//! collapse onto [`GLOBAL_RANGE`], and anything at or above
//! [`UNBOUNDED_RANGE_THRESHOLD`] is treated as "no usable number".

use crate::champion::Champion;
use crate::record::VarValue;
use crate::slots::{AbilitySlot, PerSlot};
use serde::{Deserialize, Serialize};

/// Value assigned to `global` / `infinite` ranges.
pub const GLOBAL_RANGE: f64 = 50_000.0;
/// Ranges at or above this carry no usable distance.
pub const UNBOUNDED_RANGE_THRESHOLD: f64 = 20_000.0;
/// Auto-attack range assumed when stats omit it.
pub const DEFAULT_ATTACK_RANGE: f64 = 125.0;

pub fn is_unbounded(range: f64) -> bool {
    range >= UNBOUNDED_RANGE_THRESHOLD
}

fn is_global_keyword(text: &str) -> bool {
    let lowered = text.to_lowercase();
    lowered.contains("global") || lowered.contains("infinite")
}

fn digits_only(text: &str) -> Option<f64> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    digits.parse::<f64>().ok()
}

/// Optional sign and the digits that follow it: `"600 units"` -> 600.
fn leading_integer(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let (sign, rest) = match text.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, text.strip_prefix('+').unwrap_or(text)),
    };
    let end = rest
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(rest.len());
    rest[..end].parse::<f64>().ok().map(|value| sign * value)
}

fn list_numbers(items: &[VarValue]) -> Vec<f64> {
    items
        .iter()
        .filter_map(|item| match item {
            VarValue::Number(value) if value.is_finite() => Some(*value),
            VarValue::Text(text) => leading_integer(text),
            _ => None,
        })
        .collect()
}

fn burn_numbers(burn: &str) -> Vec<f64> {
    burn.split('/')
        .filter_map(|part| {
            let lowered = part.trim().to_lowercase();
            if lowered == "global" || lowered == "infinite" {
                Some(GLOBAL_RANGE)
            } else {
                digits_only(part)
            }
        })
        .collect()
}

/// Largest rank value of a spell's range, in game units. `0` means self or melee.
pub fn parse_spell_range(range: Option<&VarValue>, range_burn: Option<&str>) -> f64 {
    let range_text = range.and_then(VarValue::as_text).unwrap_or_default();
    let burn_text = range_burn.unwrap_or_default();
    if is_global_keyword(range_text) || is_global_keyword(burn_text) {
        return GLOBAL_RANGE;
    }

    let mut numbers = match range {
        Some(VarValue::List(items)) => list_numbers(items),
        _ => Vec::new(),
    };
    if numbers.is_empty() && !burn_text.is_empty() {
        numbers = burn_numbers(burn_text);
    }
    if numbers.is_empty() {
        if let Some(VarValue::Number(value)) = range {
            if value.is_finite() {
                numbers.push(*value);
            }
        }
    }
    if numbers.is_empty() && !range_text.trim().is_empty() {
        if range_text.trim().eq_ignore_ascii_case("self") {
            return 0.0;
        }
        numbers.extend(digits_only(range_text));
    }
    numbers.into_iter().fold(0.0, f64::max)
}

/// How a range should be presented.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RangeClass {
    None,
    Finite(f64),
    Global,
}

pub fn classify_range(range: f64) -> RangeClass {
    if !range.is_finite() || range <= 0.0 {
        RangeClass::None
    } else if is_unbounded(range) {
        RangeClass::Global
    } else {
        RangeClass::Finite(range)
    }
}

/// Per-slot maximum finite range across the catalog. `None` when a slot has
/// no finite value anywhere.
pub fn max_finite_spell_ranges(champions: &[Champion]) -> PerSlot<Option<f64>> {
    PerSlot::from_fn(|slot| {
        champions
            .iter()
            .map(|champion| *champion.spell_ranges.get(slot))
            .filter(|range| range.is_finite() && !is_unbounded(*range))
            .fold(None, |best: Option<f64>, range| {
                Some(best.map_or(range, |best| best.max(range)))
            })
    })
}

/// Rewrites unbounded spell ranges to the longest finite range seen for the
/// same slot. Returns the number of values changed. Running it twice changes
/// nothing the second time.
pub fn normalize_spell_ranges(champions: &mut [Champion]) -> usize {
    let maxima = max_finite_spell_ranges(champions);
    let mut changed = 0;
    for champion in champions.iter_mut() {
        for slot in AbilitySlot::ALL {
            let Some(max) = *maxima.get(slot) else {
                continue;
            };
            let range = champion.spell_ranges.get_mut(slot);
            if !range.is_finite() || is_unbounded(*range) {
                *range = max;
                changed += 1;
            }
        }
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(values: &[f64]) -> VarValue {
        VarValue::List(values.iter().copied().map(VarValue::Number).collect())
    }

    #[test]
    fn numeric_list_takes_the_max() {
        let range = numbers(&[600.0, 650.0, 700.0]);
        assert_eq!(parse_spell_range(Some(&range), Some("600/650/700")), 700.0);
    }

    #[test]
    fn list_text_items_read_their_leading_number() {
        let range = VarValue::List(vec![
            VarValue::Text("600 units".to_string()),
            VarValue::Text(" 725".to_string()),
            VarValue::Text("about 900".to_string()),
        ]);
        assert_eq!(parse_spell_range(Some(&range), None), 725.0);
        let junk = VarValue::List(vec![VarValue::Text("n/a".to_string())]);
        assert_eq!(parse_spell_range(Some(&junk), Some("550")), 550.0);
    }

    #[test]
    fn falls_back_to_burn_string() {
        assert_eq!(parse_spell_range(None, Some("1100/1200")), 1200.0);
        assert_eq!(parse_spell_range(Some(&numbers(&[])), Some("25000")), 25_000.0);
        assert_eq!(parse_spell_range(None, Some("Self")), 0.0);
    }

    #[test]
    fn keywords_map_to_global_or_self() {
        let global = VarValue::Text("Global".to_string());
        assert_eq!(parse_spell_range(Some(&global), None), GLOBAL_RANGE);
        assert_eq!(parse_spell_range(None, Some("infinite")), GLOBAL_RANGE);
        let own = VarValue::Text("self".to_string());
        assert_eq!(parse_spell_range(Some(&own), None), 0.0);
        assert_eq!(parse_spell_range(Some(&VarValue::Number(350.0)), None), 350.0);
        assert_eq!(parse_spell_range(None, None), 0.0);
    }

    #[test]
    fn classifies_for_display() {
        assert_eq!(classify_range(0.0), RangeClass::None);
        assert_eq!(classify_range(625.0), RangeClass::Finite(625.0));
        assert_eq!(classify_range(GLOBAL_RANGE), RangeClass::Global);
        assert_eq!(classify_range(25_000.0), RangeClass::Global);
    }
}
