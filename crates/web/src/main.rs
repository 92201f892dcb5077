mod api;

use anyhow::Context;
use api::{route, ApiMethod};
use champscope_core::Catalog;
use champscope_data::{
    default_cache_path, load_or_build, BuildConfig, BundleSource, CatalogBuilder, FileCache,
};
use std::io::Read;
use std::path::PathBuf;
use tiny_http::{Header, Method, Response, Server, StatusCode};
use tracing::{info, warn};

const DEFAULT_ADDR: &str = "0.0.0.0:7878";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let catalog = load_catalog()?;
    let addr = std::env::var("CHAMPSCOPE_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let server = Server::http(&addr)
        .map_err(|err| anyhow::anyhow!("start server on {addr}: {err}"))?;
    info!(addr = %addr, champions = catalog.champions.len(), "champscope web server listening");
    for request in server.incoming_requests() {
        if let Err(err) = handle_request(request, &catalog) {
            warn!(error = %err, "request error");
        }
    }
    Ok(())
}

fn load_catalog() -> anyhow::Result<Catalog> {
    let data_dir = std::env::var("CHAMPSCOPE_DATA").unwrap_or_else(|_| "data".to_string());
    let data_dir = PathBuf::from(data_dir);
    let config = BuildConfig::from_env();
    let source = BundleSource::open(&data_dir)
        .with_context(|| format!("open catalog bundle {}", data_dir.display()))?
        .with_default_locale(&config.base_locale);
    let builder = CatalogBuilder::new(source, config);
    let cache = FileCache::new(default_cache_path());
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("start async runtime")?;
    let (catalog, _) = runtime.block_on(load_or_build(&builder, Some(&cache)))?;
    Ok(catalog)
}

fn handle_request(
    mut request: tiny_http::Request,
    catalog: &Catalog,
) -> Result<(), Box<dyn std::error::Error>> {
    let method = match request.method() {
        Method::Get => ApiMethod::Get,
        Method::Post => ApiMethod::Post,
        _ => ApiMethod::Other,
    };
    let url = request.url().to_string();
    let mut body = String::new();
    if method == ApiMethod::Post {
        request.as_reader().read_to_string(&mut body)?;
    }
    let reply = route(catalog, method, &url, &body);
    let header = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
        .map_err(|_| "invalid content type header")?;
    let response = Response::from_data(reply.body)
        .with_status_code(StatusCode(reply.status))
        .with_header(header);
    request.respond(response)?;
    Ok(())
}
