use std::{path::PathBuf, sync::Arc, time::Duration};

use plant_ai::{GeminiClient, GeminiConfig, GenerativeModel, ModelError};
use plant_requirements::{DataSource, DirSource, HttpSource};

use crate::config::{AiConfig, DataConfig};

/// Reference data comes from `data.base_url` when set, otherwise from
/// `data.dir`.
pub fn data_source(config: &DataConfig) -> anyhow::Result<Arc<dyn DataSource>> {
    match config.base_url.as_deref().filter(|url| !url.trim().is_empty()) {
        Some(url) => {
            tracing::info!(url, "reference data served over http");
            let source = HttpSource::new(url, Duration::from_secs(config.fetch_timeout_secs))?;
            Ok(Arc::new(source))
        }
        None => {
            tracing::info!(dir = config.dir, "reference data read from disk");
            Ok(Arc::new(DirSource::new(PathBuf::from(&config.dir))))
        }
    }
}

/// Model client for the given key, or `None` when the key is blank.
pub fn generative_model(
    config: &AiConfig,
    api_key: &str,
) -> anyhow::Result<Option<Arc<dyn GenerativeModel>>> {
    let client = GeminiClient::new(GeminiConfig {
        api_key: api_key.to_owned(),
        model: config.model.to_owned(),
        base_url: config.base_url.to_owned(),
        timeout: config.timeout(),
    });

    match client {
        Ok(client) => Ok(Some(Arc::new(client))),
        Err(ModelError::MissingApiKey) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
