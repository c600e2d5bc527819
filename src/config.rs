// src/config.rs

use std::{fmt, path::PathBuf};
use tracing::debug;

use crate::error::IngestError;

/// Env var holding a service-account key as inline JSON.
pub const INLINE_CREDENTIALS_ENV: &str = "GOOGLE_CREDENTIALS_JSON";
/// Env var holding a path to a service-account key file.
pub const CREDENTIALS_FILE_ENV: &str = "GOOGLE_APPLICATION_CREDENTIALS";

/// Credential options recognised by the sheet fetcher. Blank values count as absent.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CredentialConfig {
    pub inline_credential_json: Option<String>,
    pub credential_file_path: Option<PathBuf>,
}

/// The credential material actually chosen for a fetch.
#[derive(Clone, PartialEq, Eq)]
pub enum CredentialSource {
    Inline(String),
    File(PathBuf),
}

impl CredentialConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key → value lookup, using the same keys as [`from_env`](Self::from_env).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            inline_credential_json: non_blank(INLINE_CREDENTIALS_ENV),
            credential_file_path: non_blank(CREDENTIALS_FILE_ENV).map(PathBuf::from),
        }
    }

    /// Pick the credential to use: inline JSON first, then the key file.
    pub fn resolve(&self) -> Result<CredentialSource, IngestError> {
        if let Some(json) = &self.inline_credential_json {
            let value: serde_json::Value = serde_json::from_str(json).map_err(|e| {
                IngestError::Configuration(format!("{} is not valid JSON: {}", INLINE_CREDENTIALS_ENV, e))
            })?;
            if !value.is_object() {
                return Err(IngestError::Configuration(format!(
                    "{} must hold a JSON object",
                    INLINE_CREDENTIALS_ENV
                )));
            }
            debug!("using inline service-account credentials");
            return Ok(CredentialSource::Inline(json.clone()));
        }

        if let Some(path) = &self.credential_file_path {
            if !path.is_file() {
                return Err(IngestError::Configuration(format!(
                    "{} points at {}, which is not a readable file",
                    CREDENTIALS_FILE_ENV,
                    path.display()
                )));
            }
            debug!(path = %path.display(), "using service-account key file");
            return Ok(CredentialSource::File(path.clone()));
        }

        Err(IngestError::Configuration(format!(
            "neither {} nor {} is set; provide service account credentials",
            INLINE_CREDENTIALS_ENV, CREDENTIALS_FILE_ENV
        )))
    }
}

// Keys never end up in logs.
impl fmt::Debug for CredentialConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialConfig")
            .field(
                "inline_credential_json",
                &self.inline_credential_json.as_ref().map(|_| "<redacted>"),
            )
            .field("credential_file_path", &self.credential_file_path)
            .finish()
    }
}

impl fmt::Debug for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialSource::Inline(_) => f.write_str("Inline(<redacted>)"),
            CredentialSource::File(path) => f.debug_tuple("File").field(path).finish(),
        }
    }
}
