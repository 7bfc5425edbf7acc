//! Per-import state, threaded through the stages by value.
//!
//! The type parameter records how far the import has progressed. Each
//! transition consumes the context and returns it in the next state, so a
//! field can only be set once and cannot be read before the stage that
//! produces it has run.

use reqwest::header::HeaderMap;
use tcpbi_clients::headers::bearer_headers;
use tcpbi_core::stage::Stage;
use tcpbi_core::types::{DatasetId, Row};

use crate::error::ImportError;

/// The two tokens produced by the authentication stage, in order.
pub struct AuthTokens {
    pub powerbi: String,
    pub timecockpit: String,
}

impl std::fmt::Debug for AuthTokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AuthTokens { .. }")
    }
}

/// Headers are assembled, nothing fetched yet.
#[derive(Debug)]
pub struct Authenticated;

/// Rows fetched from time cockpit.
#[derive(Debug)]
pub struct Fetched {
    rows: Vec<Row>,
}

/// Dataset lookup done; `None` means no dataset with the target name.
#[derive(Debug)]
pub struct Resolved {
    rows: Vec<Row>,
    dataset_id: Option<DatasetId>,
}

/// A dataset id is known, either found or just created.
#[derive(Debug)]
pub struct Provisioned {
    rows: Vec<Row>,
    dataset_id: DatasetId,
    created: bool,
}

#[derive(Debug)]
pub struct ImportContext<S> {
    powerbi_headers: HeaderMap,
    timecockpit_headers: HeaderMap,
    state: S,
}

impl<S> ImportContext<S> {
    pub fn powerbi_headers(&self) -> &HeaderMap {
        &self.powerbi_headers
    }

    pub fn timecockpit_headers(&self) -> &HeaderMap {
        &self.timecockpit_headers
    }

    fn map_state<T>(self, f: impl FnOnce(S) -> T) -> ImportContext<T> {
        ImportContext {
            powerbi_headers: self.powerbi_headers,
            timecockpit_headers: self.timecockpit_headers,
            state: f(self.state),
        }
    }
}

impl ImportContext<Authenticated> {
    /// Build both header sets from the authentication result. No I/O.
    pub fn assemble(tokens: &AuthTokens) -> Result<Self, ImportError> {
        let powerbi_headers = bearer_headers(&tokens.powerbi).map_err(|source| {
            ImportError::InvalidToken {
                stage: Stage::StoreToken,
                source,
            }
        })?;
        let timecockpit_headers = bearer_headers(&tokens.timecockpit).map_err(|source| {
            ImportError::InvalidToken {
                stage: Stage::QueryServiceToken,
                source,
            }
        })?;

        Ok(Self {
            powerbi_headers,
            timecockpit_headers,
            state: Authenticated,
        })
    }

    pub fn with_rows(self, rows: Vec<Row>) -> ImportContext<Fetched> {
        self.map_state(|_| Fetched { rows })
    }
}

impl ImportContext<Fetched> {
    pub fn rows(&self) -> &[Row] {
        &self.state.rows
    }

    pub fn with_resolved(self, dataset_id: Option<DatasetId>) -> ImportContext<Resolved> {
        self.map_state(|s| Resolved {
            rows: s.rows,
            dataset_id,
        })
    }
}

impl ImportContext<Resolved> {
    pub fn dataset_id(&self) -> Option<&str> {
        self.state.dataset_id.as_deref()
    }

    /// Carry a dataset found by the lookup forward unchanged. Returns the
    /// context untouched when the lookup found nothing.
    pub fn into_existing(mut self) -> Result<ImportContext<Provisioned>, Self> {
        match self.state.dataset_id.take() {
            Some(dataset_id) => Ok(self.map_state(|s| Provisioned {
                rows: s.rows,
                dataset_id,
                created: false,
            })),
            None => Err(self),
        }
    }

    /// Record the id of a dataset created because the lookup found nothing.
    pub fn with_created(self, dataset_id: DatasetId) -> ImportContext<Provisioned> {
        self.map_state(|s| Provisioned {
            rows: s.rows,
            dataset_id,
            created: true,
        })
    }
}

impl ImportContext<Provisioned> {
    pub fn dataset_id(&self) -> &str {
        &self.state.dataset_id
    }

    pub fn rows(&self) -> &[Row] {
        &self.state.rows
    }

    /// Whether the dataset was created during this import.
    pub fn created(&self) -> bool {
        self.state.created
    }
}

#[cfg(test)]
mod tests {
    use reqwest::header::AUTHORIZATION;

    use super::*;

    fn tokens() -> AuthTokens {
        AuthTokens {
            powerbi: "pbi-token".into(),
            timecockpit: "tc-token".into(),
        }
    }

    fn rows() -> Vec<Row> {
        serde_json::from_value(serde_json::json!([{ "a": 1 }, { "a": 2 }])).unwrap()
    }

    #[test]
    fn assemble_maps_tokens_positionally() {
        let ctx = ImportContext::assemble(&tokens()).unwrap();
        assert_eq!(ctx.powerbi_headers()[AUTHORIZATION], "Bearer pbi-token");
        assert_eq!(ctx.timecockpit_headers()[AUTHORIZATION], "Bearer tc-token");
    }

    #[test]
    fn bad_token_names_its_stage() {
        let err = ImportContext::assemble(&AuthTokens {
            powerbi: "ok".into(),
            timecockpit: "bad\ntoken".into(),
        })
        .unwrap_err();
        assert_eq!(err.stage(), Some(Stage::QueryServiceToken));
    }

    #[test]
    fn existing_dataset_is_carried_forward() {
        let ctx = ImportContext::assemble(&tokens())
            .unwrap()
            .with_rows(rows())
            .with_resolved(Some("d1".into()));
        assert_eq!(ctx.dataset_id(), Some("d1"));

        let ctx = ctx.into_existing().unwrap();
        assert_eq!(ctx.dataset_id(), "d1");
        assert!(!ctx.created());
        assert_eq!(ctx.rows(), rows().as_slice());
    }

    #[test]
    fn missing_dataset_needs_creation() {
        let ctx = ImportContext::assemble(&tokens())
            .unwrap()
            .with_rows(rows())
            .with_resolved(None);

        let ctx = ctx.into_existing().unwrap_err();
        assert_eq!(ctx.dataset_id(), None);

        let ctx = ctx.with_created("d2".into());
        assert_eq!(ctx.dataset_id(), "d2");
        assert!(ctx.created());
        assert_eq!(ctx.rows(), rows().as_slice());
    }

    #[test]
    fn token_debug_is_redacted() {
        assert_eq!(format!("{:?}", tokens()), "AuthTokens { .. }");
    }
}
