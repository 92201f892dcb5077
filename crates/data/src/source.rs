//! Where catalog entries come from.

use crate::config::{normalize_locale, DEFAULT_BASE_LOCALE};
use crate::error::SourceError;
use crate::load::{load_bundle, BundleParts};
use crate::merge::merge_with_fallback;
use crate::schema::IndexEntry;
use async_trait::async_trait;
use champscope_core::ChampionRecord;
use std::path::Path;

/// Async boundary the catalog builder fetches through.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Every entry that should end up in the catalog. Failure here is fatal.
    async fn index(&self) -> Result<Vec<IndexEntry>, SourceError>;

    /// One entry merged for `locale`.
    async fn entry(&self, id: &str, locale: &str) -> Result<ChampionRecord, SourceError>;

    async fn data_version(&self) -> String;
}

/// Catalog backed by a bundle directory loaded into memory.
#[derive(Debug, Clone)]
pub struct BundleSource {
    parts: BundleParts,
    default_locale: String,
}

impl BundleSource {
    pub fn open(dir: &Path) -> anyhow::Result<Self> {
        Ok(Self::from_parts(load_bundle(dir)?))
    }

    pub fn from_parts(parts: BundleParts) -> Self {
        Self {
            parts,
            default_locale: DEFAULT_BASE_LOCALE.to_string(),
        }
    }

    pub fn with_default_locale(mut self, locale: &str) -> Self {
        self.default_locale = normalize_locale(Some(locale));
        self
    }

    /// Locales that have a text table in the bundle, normalized and sorted.
    pub fn locales(&self) -> Vec<String> {
        self.parts.texts.keys().cloned().collect()
    }
}

#[async_trait]
impl CatalogSource for BundleSource {
    async fn index(&self) -> Result<Vec<IndexEntry>, SourceError> {
        if let Some(index) = &self.parts.index {
            return Ok(index.clone());
        }
        if self.parts.meta.is_empty() {
            return Err(SourceError::Index("bundle has no entries".to_string()));
        }
        Ok(self
            .parts
            .meta
            .iter()
            .map(|(id, meta)| IndexEntry {
                id: id.clone(),
                key: meta.key.clone(),
            })
            .collect())
    }

    async fn entry(&self, id: &str, locale: &str) -> Result<ChampionRecord, SourceError> {
        let meta = self
            .parts
            .meta
            .get(id)
            .ok_or_else(|| SourceError::UnknownEntry(id.to_string()))?;
        let locale = normalize_locale(Some(locale));
        let text = self
            .parts
            .texts
            .get(&locale)
            .and_then(|table| table.get(id));
        let fallback = self
            .parts
            .texts
            .get(&self.default_locale)
            .and_then(|table| table.get(id));
        if text.is_none() && fallback.is_none() {
            return Err(SourceError::MissingText {
                id: id.to_string(),
                locale,
            });
        }
        Ok(merge_with_fallback(meta, text, fallback))
    }

    async fn data_version(&self) -> String {
        self.parts.data_version.clone()
    }
}
