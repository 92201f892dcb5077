use crate::build::CatalogBuilder;
use crate::error::{BuildError, CacheError};
use crate::source::CatalogSource;
use champscope_core::{normalize_spell_ranges, Catalog};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Bumped whenever the cached entity layout changes.
pub const CACHE_FORMAT_VERSION: &str = "champscope-cache-v2";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachePayload {
    pub format_version: String,
    pub data_version: String,
    pub catalog: Catalog,
}

/// Why a cached catalog was not used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheMiss {
    Absent,
    Unreadable(String),
    FormatVersion(String),
    DataVersion(String),
    Locale(String),
    AssetBase(String),
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogOrigin {
    Cache,
    Built,
}

#[derive(Debug, Clone)]
pub struct FileCache {
    path: PathBuf,
}

impl FileCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the cache and checks it against the expected versions, locales
    /// and asset base. Returns the catalog with derived fields recomputed.
    pub fn load(
        &self,
        data_version: &str,
        base_locale: &str,
        local_locale: &str,
        asset_base: &str,
    ) -> Result<Catalog, CacheMiss> {
        if !self.path.exists() {
            return Err(CacheMiss::Absent);
        }
        let raw = fs::read_to_string(&self.path)
            .map_err(|err| CacheMiss::Unreadable(err.to_string()))?;
        let payload: CachePayload =
            serde_json::from_str(&raw).map_err(|err| CacheMiss::Unreadable(err.to_string()))?;
        if payload.format_version != CACHE_FORMAT_VERSION {
            return Err(CacheMiss::FormatVersion(payload.format_version));
        }
        if payload.data_version != data_version {
            return Err(CacheMiss::DataVersion(payload.data_version));
        }
        let catalog = payload.catalog;
        if catalog.base_locale != base_locale || catalog.local_locale != local_locale {
            return Err(CacheMiss::Locale(format!(
                "{}/{}",
                catalog.base_locale, catalog.local_locale
            )));
        }
        if catalog.asset_base != asset_base {
            return Err(CacheMiss::AssetBase(catalog.asset_base));
        }
        if catalog.champions.is_empty() {
            return Err(CacheMiss::Empty);
        }
        Ok(revalidate(catalog))
    }

    pub fn store(&self, catalog: &Catalog) -> Result<(), CacheError> {
        let payload = CachePayload {
            format_version: CACHE_FORMAT_VERSION.to_string(),
            data_version: catalog.data_version.clone(),
            catalog: catalog.clone(),
        };
        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_string(&payload)?;
        fs::write(&self.path, body)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<(), CacheError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// Re-applies range normalization and recomputes DPS on a catalog that did not
/// come straight out of the builder.
pub fn revalidate(mut catalog: Catalog) -> Catalog {
    normalize_spell_ranges(&mut catalog.champions);
    for champion in &mut catalog.champions {
        champion.refresh_derived();
    }
    catalog
}

/// Cached catalog when it matches the source, otherwise a fresh build that is
/// then written back. Cache write failures are logged, not returned.
pub async fn load_or_build<S: CatalogSource>(
    builder: &CatalogBuilder<S>,
    cache: Option<&FileCache>,
) -> Result<(Catalog, CatalogOrigin), BuildError> {
    let Some(cache) = cache else {
        let report = builder.build().await?;
        return Ok((report.catalog, CatalogOrigin::Built));
    };

    let data_version = builder.data_version().await;
    let config = builder.config();
    match cache.load(
        &data_version,
        &config.base_locale,
        &config.local_locale,
        &config.asset_base,
    ) {
        Ok(catalog) => {
            info!(
                path = %cache.path().display(),
                champions = catalog.champions.len(),
                data_version = %data_version,
                "catalog loaded from cache"
            );
            return Ok((catalog, CatalogOrigin::Cache));
        }
        Err(CacheMiss::Absent) => {
            info!(path = %cache.path().display(), "no cached catalog");
        }
        Err(reason) => {
            warn!(path = %cache.path().display(), reason = ?reason, "cached catalog rejected");
        }
    }

    let report = builder.build().await?;
    if let Err(err) = cache.store(&report.catalog) {
        warn!(path = %cache.path().display(), error = %err, "failed to write catalog cache");
    }
    Ok((report.catalog, CatalogOrigin::Built))
}
