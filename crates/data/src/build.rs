use crate::config::BuildConfig;
use crate::error::{BuildError, SourceError};
use crate::schema::IndexEntry;
use crate::source::CatalogSource;
use champscope_core::{assemble_champion, normalize_spell_ranges, Assembled, Catalog, Champion};
use deunicode::deunicode;
use futures::future::join_all;
use std::cmp::Ordering;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Outcome of one full build.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub catalog: Catalog,
    pub attempted: usize,
    /// Ids that failed to load, in no particular order.
    pub dropped: Vec<String>,
    /// Entries that kept at least one `{{ token }}` after resolution.
    pub with_unresolved: usize,
}

#[derive(Default)]
struct WorkerOutput {
    champions: Vec<Champion>,
    dropped: Vec<String>,
    with_unresolved: usize,
}

pub struct CatalogBuilder<S> {
    source: S,
    config: BuildConfig,
}

impl<S: CatalogSource> CatalogBuilder<S> {
    pub fn new(source: S, config: BuildConfig) -> Self {
        Self { source, config }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    pub async fn data_version(&self) -> String {
        self.source.data_version().await
    }

    pub async fn build(&self) -> Result<BuildReport, BuildError> {
        let started = Instant::now();
        let entries = self.source.index().await.map_err(BuildError::Index)?;
        let data_version = self.source.data_version().await;
        info!(
            entries = entries.len(),
            workers = self.config.workers(),
            data_version = %data_version,
            "building catalog"
        );

        let cursor = AtomicUsize::new(0);
        let outputs = join_all(
            (0..self.config.workers()).map(|_| self.worker(&entries, &cursor)),
        )
        .await;

        let mut champions = Vec::with_capacity(entries.len());
        let mut dropped = Vec::new();
        let mut with_unresolved = 0;
        for output in outputs {
            champions.extend(output.champions);
            dropped.extend(output.dropped);
            with_unresolved += output.with_unresolved;
        }
        if champions.is_empty() && !entries.is_empty() {
            return Err(BuildError::Empty(entries.len()));
        }

        sort_champions(&mut champions);
        let replaced = normalize_spell_ranges(&mut champions);
        info!(
            champions = champions.len(),
            dropped = dropped.len(),
            ranges_replaced = replaced,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "catalog built"
        );

        Ok(BuildReport {
            catalog: Catalog {
                data_version,
                base_locale: self.config.base_locale.clone(),
                local_locale: self.config.local_locale.clone(),
                asset_base: self.config.asset_base.clone(),
                champions,
            },
            attempted: entries.len(),
            dropped,
            with_unresolved,
        })
    }

    async fn worker(&self, entries: &[IndexEntry], cursor: &AtomicUsize) -> WorkerOutput {
        let mut output = WorkerOutput::default();
        loop {
            let index = cursor.fetch_add(1, AtomicOrdering::Relaxed);
            let Some(entry) = entries.get(index) else {
                break;
            };
            match self.load_one(entry).await {
                Ok(assembled) => {
                    if !assembled.unresolved.is_empty() {
                        output.with_unresolved += 1;
                        debug!(
                            id = %entry.id,
                            keys = ?assembled.unresolved,
                            "unresolved placeholders"
                        );
                    }
                    output.champions.push(assembled.champion);
                }
                Err(err) => {
                    warn!(id = %entry.id, error = %err, "dropping catalog entry");
                    output.dropped.push(entry.id.clone());
                }
            }
        }
        output
    }

    async fn load_one(&self, entry: &IndexEntry) -> Result<Assembled, SourceError> {
        let (base, local) = futures::try_join!(
            self.source.entry(&entry.id, &self.config.base_locale),
            self.source.entry(&entry.id, &self.config.local_locale),
        )?;
        Ok(assemble_champion(&base, &local, &self.config.asset_base))
    }
}

fn folded(name: &str) -> String {
    deunicode(name).to_lowercase()
}

/// Diacritic-folded, case-insensitive order on the base name; the raw name and
/// then the id break ties.
pub fn compare_names(a: &Champion, b: &Champion) -> Ordering {
    folded(&a.name.base)
        .cmp(&folded(&b.name.base))
        .then_with(|| a.name.base.cmp(&b.name.base))
        .then_with(|| a.id.cmp(&b.id))
}

pub fn sort_champions(champions: &mut [Champion]) {
    champions.sort_by(compare_names);
}
