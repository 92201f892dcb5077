use anyhow::{anyhow, bail, Context};
use champscope_core::{AbilitySlot, FilterState};
use champscope_data::{default_cache_path, load_json, normalize_locale, BuildConfig};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct CliOptions {
    pub data_dir: PathBuf,
    pub build: BuildConfig,
    pub cache: Option<PathBuf>,
    pub refresh: bool,
    pub filter: FilterState,
    pub facets: bool,
    pub prune: bool,
    pub show: Option<String>,
    pub json: bool,
    pub local_names: bool,
    pub help: bool,
}

pub const USAGE: &str = "\
usage: champscope [options]

  --data <dir>            catalog bundle directory (CHAMPSCOPE_DATA, default ./data)
  --lang, -l <locale>     second language, e.g. ru (CHAMPSCOPE_LANG)
  --assets <path>         icon path prefix (CHAMPSCOPE_ASSETS)
  --concurrency <n>       parallel entry fetches (CHAMPSCOPE_CONCURRENCY)
  --cache <file>          cache file (CHAMPSCOPE_CACHE)
  --no-cache              always rebuild, never write the cache
  --refresh               rebuild and overwrite the cache
  --filter <file.json>    start from a saved filter state
  --search <text>         name contains text, either language
  --tag <name[@Q,W]>      ability flag: tag, physical/magic or health
  --role <name[:and]>     role, OR group unless :and
  --min-range <n>         minimum attack range
  --min-spell <SLOT=n>    minimum spell range for one slot
  --min-dps0 <n>          minimum level 1 DPS
  --min-dps18 <n>         minimum level 18 DPS
  --facets                print per-control counts
  --prune                 switch off controls that cannot match
  --show <id>             print one champion in full
  --json                  print matches as JSON
  --local                 list names in the second language
";

/// A filter flag from the command line, applied on top of any saved filter.
#[derive(Debug, Clone, PartialEq)]
enum FilterEdit {
    Search(String),
    Tag(String),
    Role(String),
    MinRange(f64),
    MinSpell(AbilitySlot, f64),
    MinDps0(f64),
    MinDps18(f64),
}

impl FilterEdit {
    fn apply(self, filter: &mut FilterState) -> anyhow::Result<()> {
        match self {
            Self::Search(text) => filter.search = text,
            Self::Tag(spec) => {
                filter.enable_flag_spec(&spec)?;
            }
            Self::Role(spec) => {
                filter.enable_role_spec(&spec)?;
            }
            Self::MinRange(amount) => filter.min_attack_range = amount,
            Self::MinSpell(slot, amount) => *filter.min_spell_range.get_mut(slot) = amount,
            Self::MinDps0(amount) => filter.min_dps0 = amount,
            Self::MinDps18(amount) => filter.min_dps18 = amount,
        }
        Ok(())
    }
}

fn value<'a>(args: &'a [String], idx: usize, flag: &str) -> anyhow::Result<&'a str> {
    args.get(idx + 1)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("{flag} needs a value"))
}

fn number(raw: &str, flag: &str) -> anyhow::Result<f64> {
    raw.trim()
        .parse::<f64>()
        .with_context(|| format!("{flag}: not a number: {raw}"))
}

fn parse_min_spell(raw: &str) -> anyhow::Result<(AbilitySlot, f64)> {
    let Some((slot, amount)) = raw.split_once('=') else {
        bail!("--min-spell expects SLOT=n, got {raw}");
    };
    let slot = AbilitySlot::parse(slot).ok_or_else(|| anyhow!("unknown ability slot: {slot}"))?;
    Ok((slot, number(amount, "--min-spell")?))
}

pub fn parse_cli_options(
    args: &[String],
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<CliOptions> {
    let mut build = BuildConfig::from_lookup(&lookup);
    let mut data_dir = lookup("CHAMPSCOPE_DATA")
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));
    let mut cache = Some(
        lookup("CHAMPSCOPE_CACHE")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_cache_path),
    );
    let mut refresh = false;
    let mut saved_filter: Option<&str> = None;
    let mut edits = Vec::new();
    let mut facets = false;
    let mut prune = false;
    let mut show = None;
    let mut json = false;
    let mut local_names = false;
    let mut help = false;

    let mut idx = 0usize;
    while idx < args.len() {
        let flag = args[idx].as_str();
        match flag {
            "--data" => {
                data_dir = PathBuf::from(value(args, idx, flag)?);
                idx += 1;
            }
            "--lang" | "-l" => {
                build.local_locale = normalize_locale(Some(value(args, idx, flag)?));
                idx += 1;
            }
            "--assets" => {
                build.asset_base = value(args, idx, flag)?.to_string();
                idx += 1;
            }
            "--concurrency" => {
                let raw = value(args, idx, flag)?;
                build.concurrency = raw
                    .parse::<usize>()
                    .with_context(|| format!("--concurrency: not a count: {raw}"))?;
                idx += 1;
            }
            "--cache" => {
                cache = Some(PathBuf::from(value(args, idx, flag)?));
                idx += 1;
            }
            "--no-cache" => cache = None,
            "--refresh" => refresh = true,
            "--filter" => {
                if saved_filter.is_some() {
                    bail!("--filter given more than once");
                }
                saved_filter = Some(value(args, idx, flag)?);
                idx += 1;
            }
            "--search" => {
                edits.push(FilterEdit::Search(value(args, idx, flag)?.to_string()));
                idx += 1;
            }
            "--tag" => {
                edits.push(FilterEdit::Tag(value(args, idx, flag)?.to_string()));
                idx += 1;
            }
            "--role" => {
                edits.push(FilterEdit::Role(value(args, idx, flag)?.to_string()));
                idx += 1;
            }
            "--min-range" => {
                edits.push(FilterEdit::MinRange(number(value(args, idx, flag)?, flag)?));
                idx += 1;
            }
            "--min-spell" => {
                let (slot, amount) = parse_min_spell(value(args, idx, flag)?)?;
                edits.push(FilterEdit::MinSpell(slot, amount));
                idx += 1;
            }
            "--min-dps0" => {
                edits.push(FilterEdit::MinDps0(number(value(args, idx, flag)?, flag)?));
                idx += 1;
            }
            "--min-dps18" => {
                edits.push(FilterEdit::MinDps18(number(value(args, idx, flag)?, flag)?));
                idx += 1;
            }
            "--facets" => facets = true,
            "--prune" => prune = true,
            "--show" => {
                show = Some(value(args, idx, flag)?.to_string());
                idx += 1;
            }
            "--json" => json = true,
            "--local" => local_names = true,
            "--help" | "-h" => help = true,
            other => bail!("unknown option: {other}"),
        }
        idx += 1;
    }

    // A saved filter is the base the other flags add to.
    let mut filter = match saved_filter {
        Some(path) => load_json(path)?,
        None => FilterState::default(),
    };
    for edit in edits {
        edit.apply(&mut filter)?;
    }

    Ok(CliOptions {
        data_dir,
        build,
        cache,
        refresh,
        filter,
        facets,
        prune,
        show,
        json,
        local_names,
        help,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use champscope_core::{FlagKey, RoleFlag, RoleKind, TagKind};

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|arg| arg.to_string()).collect()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn parses_filter_flags() {
        let options = parse_cli_options(
            &args(&[
                "--tag",
                "stun@Q",
                "--role",
                "support:and",
                "--min-spell",
                "r=1000",
                "--search",
                "leo",
                "-l",
                "ru",
                "--no-cache",
            ]),
            no_env,
        )
        .expect("options");
        assert!(options.filter.flag(FlagKey::Tag(TagKind::Stun)).slots.q);
        assert_eq!(options.filter.role(RoleKind::Support), RoleFlag::and());
        assert_eq!(options.filter.min_spell_range.r, 1000.0);
        assert_eq!(options.filter.search, "leo");
        assert_eq!(options.build.local_locale, "ru_RU");
        assert_eq!(options.cache, None);
    }

    #[test]
    fn environment_then_flags() {
        let options = parse_cli_options(&args(&["--data", "bundle"]), |name| match name {
            "CHAMPSCOPE_DATA" => Some("/srv/data".to_string()),
            "CHAMPSCOPE_CACHE" => Some("/tmp/cache.json".to_string()),
            "CHAMPSCOPE_CONCURRENCY" => Some("4".to_string()),
            _ => None,
        })
        .expect("options");
        assert_eq!(options.data_dir, PathBuf::from("bundle"));
        assert_eq!(options.cache, Some(PathBuf::from("/tmp/cache.json")));
        assert_eq!(options.build.concurrency, 4);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_cli_options(&args(&["--tag", "teleporter"]), no_env).is_err());
        assert!(parse_cli_options(&args(&["--min-spell", "T=5"]), no_env).is_err());
        assert!(parse_cli_options(&args(&["--min-range"]), no_env).is_err());
        assert!(parse_cli_options(&args(&["--wat"]), no_env).is_err());
    }

    #[test]
    fn saved_filter_is_extended_by_flags() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("filter.json");
        std::fs::write(&path, r#"{"min_dps18": 90, "tags": {"slow": {"any": true}}}"#)
            .expect("write filter");
        let path = path.to_string_lossy().to_string();
        let options = parse_cli_options(&args(&["--filter", &path, "--tag", "magic"]), no_env)
            .expect("options");
        assert_eq!(options.filter.min_dps18, 90.0);
        assert!(options.filter.flag(FlagKey::Tag(TagKind::Slow)).any);
        assert!(options.filter.flag(FlagKey::Damage(champscope_core::DamageType::Magic)).any);
    }

    #[test]
    fn filter_flag_is_read_in_argument_order() {
        let options = parse_cli_options(&args(&["--search", "--filter"]), no_env)
            .expect("search text that looks like a flag");
        assert_eq!(options.filter.search, "--filter");

        let err = parse_cli_options(
            &args(&["--filter", "a.json", "--filter", "b.json"]),
            no_env,
        )
        .expect_err("two saved filters");
        assert!(err.to_string().contains("more than once"));
        assert!(parse_cli_options(&args(&["--filter"]), no_env).is_err());
    }
}
