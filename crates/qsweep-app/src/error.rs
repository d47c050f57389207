//! # Design
//!
//! - Centralize application-level errors for bootstrap.
//! - Keep error messages constant while carrying context fields.
//! - Per-category and per-orphan failures are not represented here: the pass
//!   logs and absorbs them so the run always completes.

use thiserror::Error;

/// Result alias for application operations.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Telemetry operations failed.
    #[error("telemetry operation failed")]
    Telemetry {
        /// Operation identifier.
        operation: &'static str,
        /// Source telemetry error.
        source: qsweep_telemetry::TelemetryError,
    },
    /// Upstream client construction failed.
    #[error("client construction failed")]
    Client {
        /// Operation identifier.
        operation: &'static str,
        /// Source client error.
        source: qsweep_client::ClientError,
    },
}

impl AppError {
    pub(crate) const fn telemetry(
        operation: &'static str,
        source: qsweep_telemetry::TelemetryError,
    ) -> Self {
        Self::Telemetry { operation, source }
    }

    pub(crate) const fn client(
        operation: &'static str,
        source: qsweep_client::ClientError,
    ) -> Self {
        Self::Client { operation, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_error_helpers_build_variants() {
        let telemetry = AppError::telemetry(
            "init_logging",
            qsweep_telemetry::TelemetryError::Install {
                source: "already installed".into(),
            },
        );
        assert!(matches!(telemetry, AppError::Telemetry { .. }));

        let client = AppError::client(
            "client.new",
            qsweep_client::ClientError::InvalidUrl {
                operation: "list_categories",
                value: "data:text/plain,x".to_owned(),
            },
        );
        assert!(matches!(client, AppError::Client { .. }));
    }
}
