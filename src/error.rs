// src/error.rs

use std::fmt::Display;
use thiserror::Error;

/// Everything that can abort one fetch-and-normalize invocation.
///
/// Per-cell and per-row irregularities never show up here: they degrade to
/// `None` fields or skipped rows instead.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("invalid cell range `{range}`: {reason}")]
    InvalidRange { range: String, reason: String },

    #[error(
        "failed to fetch data from Google Sheets; check the spreadsheet id and that the \
         service account has Viewer access: {0}"
    )]
    Transport(String),

    #[error(
        "could not find a header row containing '{marker}'; make sure that column header \
         is present in {location}"
    )]
    SchemaDiscovery { marker: String, location: String },

    #[error("record `{agent_id}` violates the performance schema: {reason}")]
    InvalidRecord { agent_id: String, reason: String },
}

impl IngestError {
    /// Wrap a lower-level failure, keeping its whole source chain in the message
    /// so permission problems can be told apart from connectivity ones.
    pub(crate) fn transport(context: impl Display, err: &(dyn std::error::Error + 'static)) -> Self {
        let mut msg = format!("{}: {}", context, err);
        let mut source = err.source();
        while let Some(cause) = source {
            msg.push_str(": ");
            msg.push_str(&cause.to_string());
            source = cause.source();
        }
        IngestError::Transport(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[derive(Debug, Error)]
    #[error("request failed")]
    struct Outer(#[source] io::Error);

    #[test]
    fn transport_message_includes_source_chain() {
        let err = Outer(io::Error::new(io::ErrorKind::PermissionDenied, "403 forbidden"));
        let wrapped = IngestError::transport("GET values", &err);
        let msg = wrapped.to_string();
        assert!(msg.contains("GET values: request failed: 403 forbidden"), "{msg}");
        assert!(msg.contains("Viewer access"));
    }

    #[test]
    fn schema_discovery_names_marker_and_location() {
        let err = IngestError::SchemaDiscovery {
            marker: "agent name".into(),
            location: "row 2 of `Team Performance!A2:P100`".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("'agent name'"));
        assert!(msg.contains("row 2 of `Team Performance!A2:P100`"));
    }
}
