//! Service wrapping a validated configuration for per-request decisions.

use std::sync::Arc;

use crate::domain::decision::Decision;
use crate::domain::engine;
use crate::domain::options::DeepLinkOptions;
use crate::domain::request::RequestView;
use crate::domain::validator::DeepLinkConfig;
use crate::error::{AppError, ConfigError};

/// Validated deep link middleware, cheap to clone and share across requests.
///
/// Holds no mutable state: the configuration is validated once and only
/// read afterwards, so concurrent requests need no coordination.
#[derive(Debug, Clone)]
pub struct DeepLinkService {
    config: Arc<DeepLinkConfig>,
}

impl DeepLinkService {
    /// Validates `options` and builds the service.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] describing the first invalid option. No
    /// service is created in that case.
    pub fn new(options: DeepLinkOptions) -> Result<Self, ConfigError> {
        let config = DeepLinkConfig::from_options(&options)?;

        tracing::debug!(?config, "Deep link options validated");

        Ok(Self::from_config(config))
    }

    pub fn from_config(config: DeepLinkConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &DeepLinkConfig {
        &self.config
    }

    /// Decides how to handle `request`. See [`engine::decide`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ReturnUrlNotRelativeToBaseUrl`] for a return URL
    /// cookie pointing outside the configured base URL.
    pub async fn decide(&self, request: &RequestView) -> Result<Decision, AppError> {
        engine::decide(&self.config, request).await
    }
}
