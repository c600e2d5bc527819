// src/fetch/auth.rs

use google_cloud_auth::{
    credentials::CredentialsFile,
    project::{create_token_source_from_credentials, Config},
    token_source::TokenSource,
};
use tracing::{debug, instrument};

use crate::config::CredentialSource;
use crate::error::IngestError;

/// Read-only access to spreadsheet values.
pub const SHEETS_READONLY_SCOPES: &[&str] = &["https://www.googleapis.com/auth/spreadsheets.readonly"];

/// Service-account bearer tokens for the Sheets API.
pub struct ServiceAccountAuth {
    source: Box<dyn TokenSource>,
}

impl ServiceAccountAuth {
    #[instrument(level = "debug", skip_all)]
    pub async fn from_credentials(credentials: &CredentialSource) -> Result<Self, IngestError> {
        let file = match credentials {
            CredentialSource::Inline(json) => CredentialsFile::new_from_str(json).await,
            CredentialSource::File(path) => {
                CredentialsFile::new_from_file(path.to_string_lossy().into_owned()).await
            }
        }
        .map_err(|e| {
            IngestError::Configuration(format!("unusable service-account credentials: {}", e))
        })?;

        let config = Config::default().with_scopes(SHEETS_READONLY_SCOPES);
        let source = create_token_source_from_credentials(&file, &config)
            .await
            .map_err(|e| IngestError::transport("creating token source", &e))?;
        debug!("token source ready");
        Ok(Self { source })
    }

    /// A current access token, refreshed by the token source when expired.
    pub async fn bearer_token(&self) -> Result<String, IngestError> {
        let token = self
            .source
            .token()
            .await
            .map_err(|e| IngestError::transport("obtaining access token", &e))?;
        Ok(token.access_token)
    }
}
