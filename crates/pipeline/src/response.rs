//! The single place where a service response is judged.

use tcpbi_clients::{ClientError, RawResponse};
use tcpbi_core::stage::Stage;

use crate::error::{ImportError, StageFailure};

/// Judge the outcome of one stage's call.
///
/// The status must equal [`Stage::expected_status`]; anything else is a
/// [`StageFailure`] carrying the status and body. On the expected status,
/// `extract` pulls the stage's result out of the response. Success and
/// failure are both logged with the stage label.
pub fn classify<T, F>(
    stage: Stage,
    result: Result<RawResponse, ClientError>,
    extract: F,
) -> Result<T, ImportError>
where
    F: FnOnce(&RawResponse) -> Result<T, String>,
{
    let response = match result {
        Ok(response) => response,
        Err(source) => {
            tracing::error!(stage = %stage, error = %source, "FAILURE DURING STEP {stage}");
            return Err(ImportError::Transport { stage, source });
        }
    };

    let expected = stage.expected_status();
    if response.status != expected {
        tracing::error!(
            stage = %stage,
            status = response.status,
            expected,
            body = response.body().unwrap_or_default(),
            "FAILURE DURING STEP {stage}",
        );
        return Err(StageFailure {
            stage,
            status: response.status,
            body: response.body().map(str::to_owned),
        }
        .into());
    }

    match extract(&response) {
        Ok(value) => {
            tracing::info!(stage = %stage, status = response.status, "Step {stage} succeeded.");
            Ok(value)
        }
        Err(reason) => {
            tracing::error!(
                stage = %stage,
                status = response.status,
                %reason,
                "FAILURE DURING STEP {stage}"
            );
            Err(ImportError::Decode { stage, reason })
        }
    }
}

/// Extractor for stages whose only output is "it worked".
pub fn ignore_body(_: &RawResponse) -> Result<(), String> {
    Ok(())
}
