//! `{{ token }}` substitution for ability text.
//!
//! A [`PlaceholderTable`] is built once per ability from the base-language
//! record and, optionally, the same ability in the displayed language. Sources
//! are layered in a fixed order and an entry, once filled, is never replaced by
//! a later source.

use crate::record::{format_number, SpellRecord, VarValue};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z0-9_*+\-./]+)\s*\}\}").expect("invalid token regex")
});

static WHITESPACE_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("invalid whitespace regex"));

/// Tokens the game client always renders as nothing.
const ALWAYS_EMPTY_TOKENS: &[&str] = &[
    "spellmodifierdescriptionappend",
    "spellmancost",
    "spelleffectfootnote",
];

const ALIAS_PREFIXES: &[&str] = &["total", "bonus", "base"];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceholderTable {
    entries: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolved {
    pub text: String,
    /// Tokens left verbatim in `text`, in order of appearance.
    pub unresolved: Vec<String>,
}

#[derive(Default)]
struct TableBuilder {
    entries: HashMap<String, String>,
}

impl TableBuilder {
    fn seed(&mut self, key: &str, value: String) {
        let key = key.trim().to_lowercase();
        if key.is_empty() || value.trim().is_empty() {
            return;
        }
        match self.entries.get(&key) {
            Some(existing) if !existing.trim().is_empty() => {}
            _ => {
                self.entries.insert(key, value);
            }
        }
    }

    fn add_datavalues(&mut self, spell: &SpellRecord) {
        for (key, value) in &spell.datavalues {
            self.seed(key, value.display());
        }
    }

    fn add_vars(&mut self, spell: &SpellRecord) {
        for var in &spell.vars {
            let value = var.coeff.display();
            self.seed(&var.key, value.clone());
            if let Some(link) = var.scaling_link() {
                self.seed(&format!("bonus{}", link.as_str()), value.clone());
                self.seed(&format!("total{}", link.as_str()), value);
            }
        }
    }

    fn add_effect_burn(&mut self, burn: &[VarValue]) {
        for (index, value) in burn.iter().enumerate().skip(1) {
            if matches!(value, VarValue::Null) {
                continue;
            }
            self.seed(&format!("e{index}"), value.display());
        }
    }

    fn add_alias_pair(&mut self, keys: [&str; 2], value: Option<&str>) {
        if let Some(value) = value.filter(|value| !value.trim().is_empty()) {
            for key in keys {
                self.seed(key, value.to_string());
            }
        }
    }

    fn expand_prefixes(&mut self) {
        let snapshot: Vec<(String, String)> = self
            .entries
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        for (key, value) in snapshot {
            if ALIAS_PREFIXES.iter().any(|prefix| key.starts_with(prefix)) {
                continue;
            }
            self.seed(&format!("total{key}"), value.clone());
            self.seed(&format!("bonus{key}"), value);
        }
    }
}

fn first_burn<'a>(
    base: Option<&'a SpellRecord>,
    local: Option<&'a SpellRecord>,
    pick: impl Fn(&'a SpellRecord) -> Option<&'a String>,
) -> Option<&'a str> {
    base.and_then(&pick)
        .filter(|value| !value.trim().is_empty())
        .or_else(|| local.and_then(&pick))
        .map(String::as_str)
}

impl PlaceholderTable {
    /// `base` is the ability in the catalog's base language, `local` the same
    /// ability in the language being rendered.
    pub fn build(base: Option<&SpellRecord>, local: Option<&SpellRecord>) -> Self {
        let mut builder = TableBuilder::default();
        for spell in [base, local].into_iter().flatten() {
            builder.add_datavalues(spell);
        }
        for spell in [base, local].into_iter().flatten() {
            builder.add_vars(spell);
        }

        let burn = base
            .map(|spell| spell.effect_burn.as_slice())
            .filter(|burn| !burn.is_empty())
            .or_else(|| local.map(|spell| spell.effect_burn.as_slice()))
            .unwrap_or_default();
        builder.add_effect_burn(burn);

        builder.add_alias_pair(
            ["cooldown", "cooldownburn"],
            first_burn(base, local, |spell| spell.cooldown_burn.as_ref()),
        );
        builder.add_alias_pair(
            ["cost", "costburn"],
            first_burn(base, local, |spell| spell.cost_burn.as_ref()),
        );
        builder.add_alias_pair(
            ["range", "rangeburn"],
            first_burn(base, local, |spell| spell.range_burn.as_ref()),
        );

        builder.expand_prefixes();
        Self {
            entries: builder.entries,
        }
    }

    pub fn from_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut builder = TableBuilder::default();
        for (key, value) in entries {
            builder.seed(key.as_ref(), value.into());
        }
        Self {
            entries: builder.entries,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(&key.to_lowercase()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Value for a single token (the text between the braces).
    pub fn lookup(&self, token: &str) -> Option<String> {
        let lowered = token.trim().to_lowercase();
        if ALWAYS_EMPTY_TOKENS.contains(&lowered.as_str()) {
            return Some(String::new());
        }
        let (stem, factor) = match lowered.split_once('*') {
            Some((stem, suffix)) => (stem, scale_factor(suffix)),
            None => (lowered.as_str(), None),
        };
        let value = self
            .entries
            .get(&lowered)
            .or_else(|| self.entries.get(stem))?;
        match factor {
            Some(factor) => Some(scale_value(value, factor).unwrap_or_else(|| value.clone())),
            None => Some(value.clone()),
        }
    }

    pub fn resolve(&self, text: &str) -> Resolved {
        let mut unresolved = Vec::new();
        let replaced = TOKEN_RE.replace_all(text, |caps: &regex::Captures<'_>| {
            let token = &caps[1];
            match self.lookup(token) {
                Some(value) => value,
                None => {
                    unresolved.push(token.to_string());
                    caps[0].to_string()
                }
            }
        });
        let collapsed = WHITESPACE_RUN_RE.replace_all(&replaced, " ");
        Resolved {
            text: collapsed.trim().to_string(),
            unresolved,
        }
    }
}

fn scale_factor(suffix: &str) -> Option<f64> {
    match suffix.trim() {
        "100" => Some(100.0),
        "-100" => Some(-100.0),
        _ => None,
    }
}

/// Multiplies every `/`-separated rank value; `None` if any part is not numeric.
fn scale_value(value: &str, factor: f64) -> Option<String> {
    let parts = value
        .split('/')
        .map(|part| part.trim().parse::<f64>().ok().map(|n| n * factor))
        .collect::<Option<Vec<f64>>>()?;
    Some(
        parts
            .into_iter()
            .map(format_number)
            .collect::<Vec<_>>()
            .join("/"),
    )
}

/// True when `text` still carries at least one `{{ token }}`.
pub fn has_placeholders(text: &str) -> bool {
    TOKEN_RE.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::SpellVar;
    use std::collections::BTreeMap;

    fn spell_with_var(key: &str, coeff: Vec<f64>, link: Option<&str>) -> SpellRecord {
        SpellRecord {
            vars: vec![SpellVar {
                key: key.to_string(),
                coeff: VarValue::List(coeff.into_iter().map(VarValue::Number).collect()),
                link: link.map(str::to_string),
            }],
            ..SpellRecord::default()
        }
    }

    #[test]
    fn resolves_total_alias_from_structured_var() {
        let spell = spell_with_var("damage", vec![80.0, 120.0, 160.0, 200.0, 240.0], Some("ap"));
        let table = PlaceholderTable::build(Some(&spell), None);
        let resolved = table.resolve("Deals {{ totaldamage }} magic damage");
        assert_eq!(resolved.text, "Deals 80/120/160/200/240 magic damage");
        assert!(resolved.unresolved.is_empty());
        assert_eq!(table.get("bonusap"), Some("80/120/160/200/240"));
        assert_eq!(table.get("totalap"), Some("80/120/160/200/240"));
    }

    #[test]
    fn leaves_unknown_tokens_verbatim() {
        let table = PlaceholderTable::default();
        let resolved = table.resolve("Heals {{ healamount }}  over   time");
        assert_eq!(resolved.text, "Heals {{ healamount }} over time");
        assert_eq!(resolved.unresolved, vec!["healamount".to_string()]);
    }

    #[test]
    fn scales_percent_suffixes() {
        let table = PlaceholderTable::from_entries([("slowamount", "0.3/0.35"), ("name", "x")]);
        assert_eq!(table.lookup("slowamount*100").as_deref(), Some("30/35"));
        assert_eq!(table.lookup("slowamount*-100").as_deref(), Some("-30/-35"));
        assert_eq!(table.lookup("name*100").as_deref(), Some("x"));
        assert_eq!(table.lookup("slowamount*2").as_deref(), Some("0.3/0.35"));
    }

    #[test]
    fn exact_key_with_star_wins_over_stem() {
        let table = PlaceholderTable::from_entries([("ratio*100", "custom"), ("ratio", "0.5")]);
        assert_eq!(table.lookup("Ratio*100").as_deref(), Some("custom"));
    }

    #[test]
    fn earlier_sources_are_not_overwritten() {
        let mut base = SpellRecord::default();
        base.datavalues.insert("damage".to_string(), VarValue::Number(10.0));
        let mut local = SpellRecord::default();
        local.datavalues.insert("Damage".to_string(), VarValue::Number(99.0));
        local.datavalues.insert("ratio".to_string(), VarValue::Number(0.4));
        let table = PlaceholderTable::build(Some(&base), Some(&local));
        assert_eq!(table.get("damage"), Some("10"));
        assert_eq!(table.get("ratio"), Some("0.4"));
        assert_eq!(table.get("totalratio"), Some("0.4"));
    }

    #[test]
    fn effect_burn_and_burn_aliases_seed_keys() {
        let spell = SpellRecord {
            effect_burn: vec![
                VarValue::Null,
                VarValue::Text("40/60/80".to_string()),
                VarValue::Null,
                VarValue::Text("2".to_string()),
            ],
            cooldown_burn: Some("12/11/10".to_string()),
            cost_burn: Some("50".to_string()),
            range_burn: Some("625".to_string()),
            ..SpellRecord::default()
        };
        let table = PlaceholderTable::build(Some(&spell), None);
        assert_eq!(table.get("e1"), Some("40/60/80"));
        assert_eq!(table.get("e2"), None);
        assert_eq!(table.get("e3"), Some("2"));
        assert_eq!(table.get("cooldownburn"), Some("12/11/10"));
        assert_eq!(table.get("cost"), Some("50"));
        assert_eq!(table.get("rangeburn"), Some("625"));
        assert_eq!(table.get("basecooldown"), None);
        let resolved = table.resolve("Cooldown {{ cooldown }}s, {{e1}} damage");
        assert_eq!(resolved.text, "Cooldown 12/11/10s, 40/60/80 damage");
    }

    #[test]
    fn local_burns_fill_missing_base_burns() {
        let base = SpellRecord::default();
        let local = SpellRecord {
            cooldown_burn: Some("8".to_string()),
            effect_burn: vec![VarValue::Null, VarValue::Number(5.0)],
            ..SpellRecord::default()
        };
        let table = PlaceholderTable::build(Some(&base), Some(&local));
        assert_eq!(table.get("cooldown"), Some("8"));
        assert_eq!(table.get("e1"), Some("5"));
    }

    #[test]
    fn always_empty_tokens_disappear() {
        let table = PlaceholderTable::default();
        let resolved = table.resolve("Fires a bolt. {{ spellmodifierdescriptionappend }}");
        assert_eq!(resolved.text, "Fires a bolt.");
        assert!(resolved.unresolved.is_empty());
    }

    #[test]
    fn resolution_is_idempotent() {
        let mut datavalues = BTreeMap::new();
        datavalues.insert("shield".to_string(), VarValue::Number(120.0));
        let spell = SpellRecord {
            datavalues,
            ..SpellRecord::default()
        };
        let table = PlaceholderTable::build(Some(&spell), None);
        let once = table.resolve("Gains a {{ shield }} shield and {{ missing }} more.");
        let twice = table.resolve(&once.text);
        assert_eq!(once.text, twice.text);
        assert!(has_placeholders(&twice.text));
    }
}
