//! ASR model routing and provider adapters
//!
//! A uniform transcription contract over heterogeneous speech
//! recognition backends. Callers talk to [`AsrService`], which
//! routes each request by logical model name through a lazily
//! populated [`ModelRegistry`] to one of the provider adapters.
//! Each adapter owns its wire protocol: multipart layout, auth,
//! language code spelling, and response parsing.

pub mod config;
pub mod error;
pub mod ports;
pub mod providers;
pub mod registry;
pub mod service;
pub mod types;

mod response;

pub use config::AdapterConfig;
pub use error::AsrError;
pub use ports::ModelAdapter;
pub use registry::{KNOWN_MODELS, ModelRegistry};
pub use service::AsrService;
pub use types::{ModelInfo, Task, TranscriptionResult, TuningParams};
