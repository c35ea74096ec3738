//! Model registry
//!
//! Maps logical model names to adapter instances. Adapters are built
//! lazily on first resolve and cached for the process lifetime, so a
//! misconfigured model only fails the requests that name it.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, instrument};

use crate::config::AdapterConfig;
use crate::error::AsrError;
use crate::ports::ModelAdapter;
use crate::providers::{ChunkformerAdapter, OmniLingualAdapter, QwenAdapter, WhisperHttpAdapter};

/// Logical names accepted by [`ModelRegistry::resolve`]
pub const KNOWN_MODELS: [&str; 4] = ["whisper_jax", "chunkformer", "omni_lingual", "qwen3"];

/// Lazily-constructed, process-wide adapter cache
#[derive(Default)]
pub struct ModelRegistry {
    cache: RwLock<HashMap<String, Arc<dyn ModelAdapter>>>,
}

impl ModelRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a logical model name to its adapter
    ///
    /// # Errors
    ///
    /// Returns [`AsrError::UnknownModel`] for names outside
    /// [`KNOWN_MODELS`], or the adapter's construction error.
    #[instrument(skip(self))]
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn ModelAdapter>, AsrError> {
        if let Some(adapter) = self.cache.read().get(name) {
            return Ok(Arc::clone(adapter));
        }

        let adapter = Self::construct(name)?;
        debug!(model = name, "Adapter constructed");

        // Two racing callers may both construct; the first insert
        // wins and the loser's copy is dropped.
        let mut cache = self.cache.write();
        let entry = cache
            .entry(name.to_string())
            .or_insert(adapter);
        Ok(Arc::clone(entry))
    }

    fn construct(name: &str) -> Result<Arc<dyn ModelAdapter>, AsrError> {
        match name {
            "whisper_jax" => Ok(Arc::new(WhisperHttpAdapter::new(
                AdapterConfig::whisper_from_env(),
            )?)),
            "chunkformer" => Ok(Arc::new(ChunkformerAdapter::new(
                AdapterConfig::chunkformer_from_env(),
            )?)),
            "omni_lingual" => Ok(Arc::new(OmniLingualAdapter::new(
                AdapterConfig::omni_lingual_from_env(),
            )?)),
            "qwen3" => Ok(Arc::new(QwenAdapter::new(AdapterConfig::qwen_from_env())?)),
            other => Err(AsrError::UnknownModel {
                name: other.to_string(),
                known: KNOWN_MODELS.iter().map(ToString::to_string).collect(),
            }),
        }
    }
}

impl std::fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("cached", &self.cache.read().len())
            .finish()
    }
}
