//! Run settings resolved once at startup from CLI flags, the config file,
//! and built-in defaults, in that order of precedence.

use std::path::PathBuf;

use harvester_core::catalog::DEFAULT_API_BASE_URL;
use harvester_core::download::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};
use harvester_core::{ApiKey, CatalogConfig, EngineError, EngineOptions, HttpClient};

use super::config::FileConfig;
use crate::cli::{DownloadArgs, HarvestArgs};

pub(crate) const DEFAULT_PAGE_LIMIT: u32 = 100;
pub(crate) const DEFAULT_RESULTS_DIR: &str = "results";
pub(crate) const DEFAULT_DOWNLOAD_DIR: &str = "./downloads";

/// Values given explicitly on the command line.
#[derive(Debug, Clone, Default)]
pub(crate) struct CliOverrides {
    pub(crate) api_base_url: Option<String>,
    pub(crate) page_limit: Option<u32>,
    pub(crate) results_dir: Option<PathBuf>,
    pub(crate) download_dir: Option<PathBuf>,
    pub(crate) delay_ms: Option<u64>,
}

impl CliOverrides {
    pub(crate) fn from_harvest(args: &HarvestArgs) -> Self {
        Self {
            api_base_url: args.api_base_url.clone(),
            page_limit: args.limit,
            results_dir: args.outdir.clone(),
            download_dir: args.download_path.clone(),
            delay_ms: args.delay_ms,
        }
    }

    pub(crate) fn from_download(args: &DownloadArgs) -> Self {
        Self {
            download_dir: args.download_path.clone(),
            delay_ms: args.delay_ms,
            ..Self::default()
        }
    }
}

/// Everything a command needs, passed explicitly into constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RunContext {
    pub(crate) api_base_url: String,
    pub(crate) page_limit: u32,
    pub(crate) results_dir: PathBuf,
    pub(crate) download_dir: PathBuf,
    pub(crate) delay_ms: u64,
    pub(crate) connect_timeout_secs: u64,
    pub(crate) read_timeout_secs: u64,
    pub(crate) quiet: bool,
    pub(crate) use_progress_bar: bool,
}

impl RunContext {
    pub(crate) fn resolve(
        cli: &CliOverrides,
        file: Option<&FileConfig>,
        quiet: bool,
        use_progress_bar: bool,
    ) -> Self {
        let file = file.cloned().unwrap_or_default();
        Self {
            api_base_url: cli
                .api_base_url
                .clone()
                .or(file.api_base_url)
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            page_limit: cli
                .page_limit
                .or(file.page_limit)
                .unwrap_or(DEFAULT_PAGE_LIMIT),
            results_dir: cli
                .results_dir
                .clone()
                .or(file.results_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_RESULTS_DIR)),
            download_dir: cli
                .download_dir
                .clone()
                .or(file.download_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DOWNLOAD_DIR)),
            delay_ms: cli.delay_ms.or(file.delay_ms).unwrap_or(0),
            connect_timeout_secs: file.connect_timeout_secs.unwrap_or(CONNECT_TIMEOUT_SECS),
            read_timeout_secs: file.read_timeout_secs.unwrap_or(READ_TIMEOUT_SECS),
            quiet,
            use_progress_bar,
        }
    }

    pub(crate) fn catalog_config(&self, api_key: ApiKey) -> CatalogConfig {
        let mut config = CatalogConfig::new(api_key).with_base_url(self.api_base_url.clone());
        config.connect_timeout_secs = self.connect_timeout_secs;
        config.read_timeout_secs = self.read_timeout_secs;
        config
    }

    pub(crate) fn engine_options(&self) -> EngineOptions {
        EngineOptions::with_delay_ms(self.delay_ms)
    }

    pub(crate) fn http_client(&self) -> Result<HttpClient, EngineError> {
        HttpClient::new_with_timeouts(self.connect_timeout_secs, self.read_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_defaults_when_nothing_given() {
        let ctx = RunContext::resolve(&CliOverrides::default(), None, false, false);
        assert_eq!(ctx.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(ctx.page_limit, 100);
        assert_eq!(ctx.results_dir, PathBuf::from("results"));
        assert_eq!(ctx.download_dir, PathBuf::from("./downloads"));
        assert_eq!(ctx.delay_ms, 0);
        assert_eq!(ctx.connect_timeout_secs, 30);
        assert_eq!(ctx.read_timeout_secs, 300);
        assert_eq!(ctx.engine_options().item_delay, None);
    }

    #[test]
    fn test_file_values_fill_unset_cli_values() {
        let file = FileConfig {
            page_limit: Some(20),
            delay_ms: Some(750),
            download_dir: Some(PathBuf::from("/data")),
            read_timeout_secs: Some(60),
            ..FileConfig::default()
        };
        let ctx = RunContext::resolve(&CliOverrides::default(), Some(&file), false, false);
        assert_eq!(ctx.page_limit, 20);
        assert_eq!(ctx.download_dir, PathBuf::from("/data"));
        assert_eq!(ctx.read_timeout_secs, 60);
        assert_eq!(
            ctx.engine_options().item_delay,
            Some(Duration::from_millis(750))
        );
    }

    #[test]
    fn test_cli_values_win_over_file() {
        let file = FileConfig {
            page_limit: Some(20),
            results_dir: Some(PathBuf::from("from-file")),
            api_base_url: Some("http://file.example/api".to_string()),
            ..FileConfig::default()
        };
        let cli = CliOverrides {
            page_limit: Some(5),
            results_dir: Some(PathBuf::from("from-cli")),
            ..CliOverrides::default()
        };
        let ctx = RunContext::resolve(&cli, Some(&file), false, false);
        assert_eq!(ctx.page_limit, 5);
        assert_eq!(ctx.results_dir, PathBuf::from("from-cli"));
        assert_eq!(ctx.api_base_url, "http://file.example/api");
    }

    #[test]
    fn test_catalog_config_carries_timeouts() {
        let file = FileConfig {
            connect_timeout_secs: Some(5),
            ..FileConfig::default()
        };
        let ctx = RunContext::resolve(&CliOverrides::default(), Some(&file), false, false);
        let config = ctx.catalog_config(ApiKey::new("secret-key").unwrap());
        assert_eq!(config.connect_timeout_secs, 5);
        assert_eq!(config.base_url, DEFAULT_API_BASE_URL);
    }
}
