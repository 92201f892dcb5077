//! Command-line explorer for the champion catalog.
mod options;
mod render;

use anyhow::{anyhow, Context, Result};
use champscope_core::{filter_champions, result_summary, FacetReport};
use champscope_data::{load_or_build, BundleSource, CatalogBuilder, CatalogOrigin, FileCache};
use options::{parse_cli_options, USAGE};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut options = parse_cli_options(&args, |name| std::env::var(name).ok())?;
    if options.help {
        print!("{USAGE}");
        return Ok(());
    }

    let source = BundleSource::open(&options.data_dir)
        .with_context(|| format!("open catalog bundle {}", options.data_dir.display()))?
        .with_default_locale(&options.build.base_locale);
    let locales = source.locales();
    if !locales.contains(&options.build.local_locale) {
        warn!(
            locale = %options.build.local_locale,
            available = ?locales,
            "no text for the local language, falling back to base text"
        );
    }
    let builder = CatalogBuilder::new(source, options.build.clone());
    let cache = options.cache.as_ref().map(FileCache::new);
    if options.refresh {
        if let Some(cache) = &cache {
            cache.clear()?;
        }
    }
    let (catalog, origin) = load_or_build(&builder, cache.as_ref()).await?;
    info!(
        champions = catalog.champions.len(),
        cached = origin == CatalogOrigin::Cache,
        "catalog ready"
    );

    if let Some(id) = &options.show {
        let champion = catalog
            .find(id)
            .ok_or_else(|| anyhow!("no champion with id {id}"))?;
        print!("{}", render::champion_detail(champion, options.local_names));
        return Ok(());
    }

    if options.prune {
        let report = FacetReport::compute(&catalog.champions, &options.filter);
        if report.apply_to(&mut options.filter) {
            info!("switched off filters with no possible match");
        }
    }

    let matches = filter_champions(&catalog.champions, &options.filter);
    if options.json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
    } else {
        for champion in &matches {
            println!("{}", render::champion_row(champion, options.local_names));
        }
        println!("{}", result_summary(matches.len(), catalog.champions.len()));
    }

    if options.facets {
        let report = FacetReport::compute(&catalog.champions, &options.filter);
        print!("{}", render::facet_table(&report));
    }
    Ok(())
}
