use super::{AppConfig, MAX_PREVIEW_DIMENSION};
use anyhow::{bail, Result};

impl AppConfig {
    /// Check CLI values.
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_PREVIEW_DIMENSION).contains(&self.rows) {
            bail!(
                "--rows must be between 1 and {MAX_PREVIEW_DIMENSION}, got {}",
                self.rows
            );
        }
        if !(1..=MAX_PREVIEW_DIMENSION).contains(&self.cols) {
            bail!(
                "--cols must be between 1 and {MAX_PREVIEW_DIMENSION}, got {}",
                self.cols
            );
        }
        Ok(())
    }
}
