use crate::config::normalize_locale;
use crate::schema::{ChampionMeta, ChampionText, IndexEntry};
use anyhow::{bail, Context};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const META_FILE: &str = "meta.json";
pub const INDEX_FILE: &str = "index.json";
pub const VERSION_FILE: &str = "version.txt";
pub const TEXT_FILE_PREFIX: &str = "text_";
/// Data version assumed when a bundle does not name one.
pub const FALLBACK_DATA_VERSION: &str = "15.21.1";

/// Everything a bundle directory holds, keyed by id and locale.
#[derive(Debug, Clone, Default)]
pub struct BundleParts {
    pub meta: BTreeMap<String, ChampionMeta>,
    pub texts: BTreeMap<String, BTreeMap<String, ChampionText>>,
    pub index: Option<Vec<IndexEntry>>,
    pub data_version: String,
}

pub fn load_bundle(dir: &Path) -> anyhow::Result<BundleParts> {
    if !dir.is_dir() {
        bail!("catalog bundle {} is not a directory", dir.display());
    }
    let mut meta: BTreeMap<String, ChampionMeta> = load_json(dir.join(META_FILE))?;
    for (id, entry) in meta.iter_mut() {
        if entry.id.trim().is_empty() {
            entry.id = id.clone();
        }
    }
    let index_path = dir.join(INDEX_FILE);
    let index = if index_path.exists() {
        Some(load_json::<Vec<IndexEntry>>(index_path)?)
    } else {
        None
    };
    Ok(BundleParts {
        meta,
        texts: load_text_files(dir)?,
        index,
        data_version: read_data_version(dir)?,
    })
}

fn load_text_files(dir: &Path) -> anyhow::Result<BTreeMap<String, BTreeMap<String, ChampionText>>> {
    let mut texts = BTreeMap::new();
    let entries = fs::read_dir(dir).with_context(|| format!("read {}", dir.display()))?;
    for entry in entries {
        let path = entry.with_context(|| format!("read {}", dir.display()))?.path();
        let Some(locale) = text_file_locale(&path) else {
            continue;
        };
        let table: BTreeMap<String, ChampionText> = load_json(&path)?;
        texts.insert(locale, table);
    }
    Ok(texts)
}

/// `text_ru.json` -> `ru_RU`.
pub fn text_file_locale(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    let locale = name.strip_prefix(TEXT_FILE_PREFIX)?.strip_suffix(".json")?;
    if locale.trim().is_empty() {
        return None;
    }
    Some(normalize_locale(Some(locale)))
}

pub fn read_data_version(dir: &Path) -> anyhow::Result<String> {
    let path = dir.join(VERSION_FILE);
    if !path.exists() {
        return Ok(FALLBACK_DATA_VERSION.to_string());
    }
    let raw = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let version = raw.trim();
    if version.is_empty() {
        Ok(FALLBACK_DATA_VERSION.to_string())
    } else {
        Ok(version.to_string())
    }
}

pub fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}
