use std::env;
use std::path::PathBuf;

pub const DEFAULT_BASE_LOCALE: &str = "en_US";
pub const DEFAULT_LOCAL_LOCALE: &str = "ru_RU";
pub const DEFAULT_CONCURRENCY: usize = 10;
pub const CACHE_FILE_NAME: &str = ".champscope_cache.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// Upper bound on entries fetched at once.
    pub concurrency: usize,
    /// Language used for inference and sorting.
    pub base_locale: String,
    /// Language shown next to the base one.
    pub local_locale: String,
    /// Prefix for icon paths.
    pub asset_base: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            base_locale: DEFAULT_BASE_LOCALE.to_string(),
            local_locale: DEFAULT_LOCAL_LOCALE.to_string(),
            asset_base: ".".to_string(),
        }
    }
}

impl BuildConfig {
    /// Defaults overridden by `CHAMPSCOPE_LANG`, `CHAMPSCOPE_CONCURRENCY` and
    /// `CHAMPSCOPE_ASSETS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(lang) = lookup("CHAMPSCOPE_LANG").filter(|value| !value.trim().is_empty()) {
            config.local_locale = normalize_locale(Some(&lang));
        }
        if let Some(concurrency) = lookup("CHAMPSCOPE_CONCURRENCY")
            .and_then(|value| value.trim().parse::<usize>().ok())
        {
            config.concurrency = concurrency;
        }
        if let Some(assets) = lookup("CHAMPSCOPE_ASSETS").filter(|value| !value.trim().is_empty())
        {
            config.asset_base = assets;
        }
        config
    }

    /// Worker count actually used; never zero.
    pub fn workers(&self) -> usize {
        self.concurrency.max(1)
    }
}

pub fn normalize_locale(locale: Option<&str>) -> String {
    let raw = locale.unwrap_or(DEFAULT_BASE_LOCALE).trim();
    if raw.is_empty() {
        return DEFAULT_BASE_LOCALE.to_string();
    }
    let lowered = raw.replace('-', "_").to_ascii_lowercase();
    match lowered.as_str() {
        "en" | "en_us" => "en_US".to_string(),
        "ru" | "ru_ru" => "ru_RU".to_string(),
        _ => raw.replace('-', "_"),
    }
}

/// `CHAMPSCOPE_CACHE`, else `$HOME/.champscope_cache.json`, else the working
/// directory.
pub fn default_cache_path() -> PathBuf {
    if let Some(path) = env::var_os("CHAMPSCOPE_CACHE").filter(|value| !value.is_empty()) {
        return PathBuf::from(path);
    }
    match env::var_os("HOME").filter(|value| !value.is_empty()) {
        Some(home) => PathBuf::from(home).join(CACHE_FILE_NAME),
        None => PathBuf::from(CACHE_FILE_NAME),
    }
}
