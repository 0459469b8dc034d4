//! Collision-free per-run output directories named `{YYYYMMDD}-{N}`.
//!
//! The allocator probes `N = 1, 2, ...` and claims the first name whose
//! creation succeeds. Creation itself is the existence check, so a name that
//! already exists is never reused. Two processes racing on the same base
//! directory are not coordinated beyond that.

use std::io::ErrorKind;
use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use super::constants::MAX_OUTPUT_DIR_SEQUENCE;
use super::error::EngineError;

/// Finds and creates the next free `{date}-{N}` directory under a base directory.
#[derive(Debug, Clone)]
pub struct OutputDirectoryAllocator {
    base: PathBuf,
    date: Option<NaiveDate>,
}

impl OutputDirectoryAllocator {
    /// Allocator for `base`, dated today (local time).
    #[must_use]
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            date: None,
        }
    }

    /// Pins the date used for the name prefix.
    #[must_use]
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// `YYYYMMDD` prefix for the configured date.
    #[must_use]
    pub fn date_stamp(&self) -> String {
        self.date
            .unwrap_or_else(|| Local::now().date_naive())
            .format("%Y%m%d")
            .to_string()
    }

    /// Creates missing parents, then claims the first unused `{date}-{N}` name.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::OutputDir`] when a directory cannot be created for
    /// a reason other than "already exists", and
    /// [`EngineError::OutputDirExhausted`] if every probed name is taken.
    pub async fn allocate(&self) -> Result<PathBuf, EngineError> {
        let date_stamp = self.date_stamp();

        tokio::fs::create_dir_all(&self.base)
            .await
            .map_err(|source| EngineError::OutputDir {
                path: self.base.clone(),
                source,
            })?;

        for sequence in 1..=MAX_OUTPUT_DIR_SEQUENCE {
            let candidate = self.base.join(format!("{date_stamp}-{sequence}"));
            match tokio::fs::create_dir(&candidate).await {
                Ok(()) => {
                    info!(dir = %candidate.display(), "allocated output directory");
                    return Ok(candidate);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    debug!(dir = %candidate.display(), "output directory name taken");
                }
                Err(source) => {
                    return Err(EngineError::OutputDir {
                        path: candidate,
                        source,
                    });
                }
            }
        }

        Err(EngineError::OutputDirExhausted {
            base: self.base.clone(),
            date_stamp,
        })
    }
}
