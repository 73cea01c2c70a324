use crate::config::ConfigError;
use crate::report::ReportError;
use crate::seed::SeedError;
use thiserror::Error;

/// Top-level error for the `seed` and `inspect` commands.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Seeding failed: {0}")]
    Seed(#[from] SeedError),
    #[error("Report failed: {0}")]
    Report(#[from] ReportError),
}

impl AppError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Config(_) => 2,
            AppError::Seed(_) | AppError::Report(_) => 1,
        }
    }
}
