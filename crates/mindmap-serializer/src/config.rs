//! Configuration for the document serializer

use serde::{Deserialize, Serialize};

use crate::coords::SCALE;
use crate::error::{SerializerError, SerializerResult};

/// Serializer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializerConfig {
    /// Fixed-point factor applied to node coordinates
    #[serde(default = "default_scale")]
    pub scale: f64,

    /// Version stamped on the root element of saved documents
    #[serde(default = "default_application_version")]
    pub application_version: String,
}

fn default_scale() -> f64 {
    SCALE
}

fn default_application_version() -> String {
    crate::version().to_string()
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            scale: default_scale(),
            application_version: default_application_version(),
        }
    }
}

impl SerializerConfig {
    /// Default configuration stamping the given application version
    pub fn new(application_version: impl Into<String>) -> Self {
        Self {
            application_version: application_version.into(),
            ..Self::default()
        }
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Check that the configuration can produce readable documents
    pub fn validate(&self) -> SerializerResult<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(SerializerError::InvalidConfig(format!(
                "scale must be a positive finite number, got {}",
                self.scale
            )));
        }
        if self.application_version.trim().is_empty() {
            return Err(SerializerError::InvalidConfig(
                "application_version must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
