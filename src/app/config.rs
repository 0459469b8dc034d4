//! File configuration for CLI defaults.
//!
//! The file is a flat list of `key = value` lines. Strings are double-quoted,
//! numbers are bare, and `#` starts a comment outside of strings.
//!
//! ```text
//! api_base_url = "https://catalog.archives.gov/api/v2"
//! page_limit = 100
//! results_dir = "results"
//! download_dir = "./downloads"
//! delay_ms = 500          # between downloads
//! connect_timeout_secs = 30
//! read_timeout_secs = 300
//! verbosity = "verbose"
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

/// Directory name under the user config directory.
const CONFIG_DIR_NAME: &str = "catalog-harvester";

/// Values read from the config file. `None` means "not set in the file".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct FileConfig {
    pub(crate) api_base_url: Option<String>,
    pub(crate) page_limit: Option<u32>,
    pub(crate) results_dir: Option<PathBuf>,
    pub(crate) download_dir: Option<PathBuf>,
    pub(crate) delay_ms: Option<u64>,
    pub(crate) connect_timeout_secs: Option<u64>,
    pub(crate) read_timeout_secs: Option<u64>,
    pub(crate) verbosity: Option<VerbositySetting>,
}

impl FileConfig {
    /// Validates values against the same ranges the CLI enforces.
    pub(crate) fn validate(&self) -> Result<()> {
        if let Some(limit) = self.page_limit
            && !(1..=10_000).contains(&limit)
        {
            bail!("Invalid config value for `page_limit`: {limit}. Expected range: 1..=10000");
        }
        if let Some(delay) = self.delay_ms
            && delay > 60_000
        {
            bail!("Invalid config value for `delay_ms`: {delay}. Expected range: 0..=60000");
        }
        validate_timeout_secs("connect_timeout_secs", self.connect_timeout_secs)?;
        validate_timeout_secs("read_timeout_secs", self.read_timeout_secs)?;
        if let Some(url) = &self.api_base_url
            && url::Url::parse(url).is_err()
        {
            bail!("Invalid config value for `api_base_url`: '{url}' is not a URL");
        }
        Ok(())
    }
}

fn validate_timeout_secs(field: &str, value: Option<u64>) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    if !(1..=3600).contains(&value) {
        bail!("Invalid config value for `{field}`: {value}. Expected range: 1..=3600");
    }
    Ok(())
}

/// Supported config verbosity labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum VerbositySetting {
    Default,
    Verbose,
    Quiet,
    Debug,
}

impl VerbositySetting {
    /// Tracing level this setting stands for.
    pub(crate) fn level(self) -> &'static str {
        match self {
            Self::Default => "info",
            Self::Verbose => "debug",
            Self::Debug => "trace",
            Self::Quiet => "error",
        }
    }
}

/// Resolves the default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/catalog-harvester/config.toml`
/// 2. `$HOME/.config/catalog-harvester/config.toml`
pub(crate) fn resolve_default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(
            PathBuf::from(xdg_config_home)
                .join(CONFIG_DIR_NAME)
                .join("config.toml"),
        );
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join(CONFIG_DIR_NAME)
            .join("config.toml"),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads the config file.
///
/// An explicit path must exist. The default path is optional: when it is
/// missing, `Ok(None)` is returned.
pub(crate) fn load_file_config(explicit: Option<&Path>) -> Result<Option<FileConfig>> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match resolve_default_config_path() {
            Some(path) if path.exists() => path,
            _ => return Ok(None),
        },
    };

    let raw = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    let config = parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))?;
    Ok(Some(config))
}

pub(crate) fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let mut cfg = FileConfig::default();
    for (line_index, raw_line) in raw.lines().enumerate() {
        let line_no = line_index + 1;
        let line = strip_inline_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        let Some((raw_key, raw_value)) = line.split_once('=') else {
            bail!("Invalid config syntax on line {line_no}: expected key = value");
        };
        let key = raw_key.trim();
        let value = raw_value.trim();

        apply_key(&mut cfg, key, value)
            .with_context(|| format!("Invalid `{key}` value on line {line_no}"))?;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn apply_key(cfg: &mut FileConfig, key: &str, value: &str) -> Result<()> {
    match key {
        "api_base_url" => cfg.api_base_url = Some(parse_string_literal(value)?),
        "page_limit" => {
            let parsed = parse_integer_u64(value)?;
            cfg.page_limit = Some(
                u32::try_from(parsed)
                    .map_err(|_| anyhow::anyhow!("page_limit out of range for u32"))?,
            );
        }
        "results_dir" => cfg.results_dir = Some(PathBuf::from(parse_string_literal(value)?)),
        "download_dir" => cfg.download_dir = Some(PathBuf::from(parse_string_literal(value)?)),
        "delay_ms" => cfg.delay_ms = Some(parse_integer_u64(value)?),
        "connect_timeout_secs" => cfg.connect_timeout_secs = Some(parse_integer_u64(value)?),
        "read_timeout_secs" => cfg.read_timeout_secs = Some(parse_integer_u64(value)?),
        "verbosity" => {
            let parsed = parse_string_literal(value)?;
            cfg.verbosity = Some(parse_verbosity(&parsed)?);
        }
        unknown => bail!("Unknown configuration key: '{unknown}'"),
    }
    Ok(())
}

fn strip_inline_comment(line: &str) -> &str {
    let mut in_string = false;
    for (index, ch) in line.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..index],
            _ => {}
        }
    }
    line
}

fn parse_string_literal(raw_value: &str) -> Result<String> {
    if raw_value.len() < 2 || !raw_value.starts_with('"') || !raw_value.ends_with('"') {
        bail!("Expected double-quoted string");
    }
    Ok(raw_value[1..raw_value.len() - 1].to_string())
}

fn parse_integer_u64(raw_value: &str) -> Result<u64> {
    let token = raw_value.trim();
    if token.is_empty() {
        bail!("Expected integer value");
    }
    let value = token.parse::<i128>()?;
    if value < 0 {
        bail!("Expected non-negative integer");
    }
    u64::try_from(value).map_err(|_| anyhow::anyhow!("Integer value out of range for u64"))
}

fn parse_verbosity(value: &str) -> Result<VerbositySetting> {
    match value {
        "default" => Ok(VerbositySetting::Default),
        "verbose" => Ok(VerbositySetting::Verbose),
        "quiet" => Ok(VerbositySetting::Quiet),
        "debug" => Ok(VerbositySetting::Debug),
        _ => bail!("Expected one of: default, verbose, quiet, debug"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_config_all_fields() {
        let cfg = parse_config_str(
            r#"
api_base_url = "http://localhost:9000/api/v2"
page_limit = 250
results_dir = "out/results"
download_dir = "/data/downloads"
delay_ms = 500
connect_timeout_secs = 10
read_timeout_secs = 600
verbosity = "debug"
"#,
        )
        .expect("full config should parse");
        assert_eq!(cfg.api_base_url.as_deref(), Some("http://localhost:9000/api/v2"));
        assert_eq!(cfg.page_limit, Some(250));
        assert_eq!(cfg.results_dir, Some(PathBuf::from("out/results")));
        assert_eq!(cfg.download_dir, Some(PathBuf::from("/data/downloads")));
        assert_eq!(cfg.delay_ms, Some(500));
        assert_eq!(cfg.connect_timeout_secs, Some(10));
        assert_eq!(cfg.read_timeout_secs, Some(600));
        assert_eq!(cfg.verbosity, Some(VerbositySetting::Debug));
    }

    #[test]
    fn test_parse_config_partial_fields() {
        let cfg = parse_config_str("page_limit = 50\n").expect("partial config should parse");
        assert_eq!(cfg.page_limit, Some(50));
        assert!(cfg.results_dir.is_none());
        assert!(cfg.verbosity.is_none());
    }

    #[test]
    fn test_parse_config_supports_comments() {
        let cfg = parse_config_str(
            r##"
# whole-line comment
results_dir = "a#b" # the hash inside quotes stays
delay_ms = 10 # ms
"##,
        )
        .expect("config with comments should parse");
        assert_eq!(cfg.results_dir, Some(PathBuf::from("a#b")));
        assert_eq!(cfg.delay_ms, Some(10));
    }

    #[test]
    fn test_parse_config_rejects_out_of_range_values() {
        let err = parse_config_str("page_limit = 0").expect_err("invalid page_limit expected");
        assert!(err.to_string().contains("page_limit"));

        let err = parse_config_str("delay_ms = 60001").expect_err("invalid delay expected");
        assert!(err.to_string().contains("delay_ms"));

        let err = parse_config_str("read_timeout_secs = 3601").expect_err("invalid timeout expected");
        assert!(err.to_string().contains("read_timeout_secs"));
    }

    #[test]
    fn test_parse_config_rejects_malformed_values() {
        let err = parse_config_str("page_limit = ten").expect_err("non-numeric expected");
        assert!(err.to_string().contains("page_limit"));

        let err = parse_config_str("results_dir = unquoted").expect_err("unquoted expected");
        assert!(err.to_string().contains("results_dir"));

        let err = parse_config_str("delay_ms = -5").expect_err("negative expected");
        assert!(err.to_string().contains("delay_ms"));
    }

    #[test]
    fn test_parse_config_rejects_bad_url() {
        let err = parse_config_str(r#"api_base_url = "not a url""#).expect_err("bad url expected");
        assert!(err.to_string().contains("api_base_url"));
    }

    #[test]
    fn test_parse_config_rejects_unknown_keys_and_bad_syntax() {
        let err = parse_config_str("unknown_key = 123").expect_err("unknown key error expected");
        assert!(format!("{err:#}").contains("Unknown configuration key: 'unknown_key'"));

        let err = parse_config_str("just words").expect_err("syntax error expected");
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(VerbositySetting::Default.level(), "info");
        assert_eq!(VerbositySetting::Verbose.level(), "debug");
        assert_eq!(VerbositySetting::Debug.level(), "trace");
        assert_eq!(VerbositySetting::Quiet.level(), "error");
    }

    #[test]
    fn test_load_explicit_path() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "page_limit = 7\n").expect("write config");
        let cfg = load_file_config(Some(&path)).expect("load").expect("some config");
        assert_eq!(cfg.page_limit, Some(7));
    }

    #[test]
    fn test_load_missing_explicit_path_is_error() {
        let err = load_file_config(Some(Path::new("/no/such/config.toml")))
            .expect_err("missing explicit config is an error");
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
