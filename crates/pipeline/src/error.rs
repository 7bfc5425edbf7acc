use tcpbi_clients::headers::InvalidToken;
use tcpbi_clients::ClientError;
use tcpbi_core::error::CoreError;
use tcpbi_core::stage::Stage;

/// A stage received a status other than the one it expects.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("FAILURE DURING STEP {stage} (HTTP {status})")]
pub struct StageFailure {
    pub stage: Stage,
    pub status: u16,
    /// Raw response body, when the service sent one.
    pub body: Option<String>,
}

/// Any reason an import stopped early. Every variant aborts the remaining
/// stages in the same way.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error(transparent)]
    Stage(#[from] StageFailure),

    /// The call never produced a response.
    #[error("FAILURE DURING STEP {stage}: {source}")]
    Transport {
        stage: Stage,
        #[source]
        source: ClientError,
    },

    /// Expected status, but the body did not contain what the stage reads.
    #[error("FAILURE DURING STEP {stage}: {reason}")]
    Decode { stage: Stage, reason: String },

    #[error("FAILURE DURING STEP {stage}: {source}")]
    InvalidToken {
        stage: Stage,
        #[source]
        source: InvalidToken,
    },

    /// Rejected before any call was made.
    #[error("Invalid import request: {0}")]
    Invalid(#[from] CoreError),
}

impl ImportError {
    /// The stage that failed, if the import got as far as making calls.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::Stage(failure) => Some(failure.stage),
            Self::Transport { stage, .. }
            | Self::Decode { stage, .. }
            | Self::InvalidToken { stage, .. } => Some(*stage),
            Self::Invalid(_) => None,
        }
    }

    /// The HTTP status observed, for status mismatches.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Stage(failure) => Some(failure.status),
            _ => None,
        }
    }
}
