pub mod auth_service;
pub mod driver_service;
pub mod fob_service;
pub mod lead_service;
pub mod lookup_service;
pub mod project_service;
pub mod route_service;
pub mod trip_service;
pub mod user_service;
pub mod vehicle_service;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::entities::envelope::Envelope;
use crate::usecase::ports::transport::ApiError;

/// Decodes a raw envelope body into the typed payload. `isSuccess: false`
/// becomes `ApiError::Rejected` so the failure branch of every caller lines
/// up with the actual outcome.
pub(crate) fn decode_envelope<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    let envelope: Envelope<T> =
        serde_json::from_value(value).map_err(|err| ApiError::Decode(err.to_string()))?;
    envelope
        .into_result()
        .map_err(|message| ApiError::Rejected { message })
}

/// For mutations the payload is irrelevant; only the outcome and the server
/// message (shown in the toast) matter.
pub(crate) fn envelope_message(value: Value) -> Result<String, ApiError> {
    let envelope: Envelope<Value> =
        serde_json::from_value(value).map_err(|err| ApiError::Decode(err.to_string()))?;
    if envelope.is_success {
        Ok(envelope.message)
    } else {
        Err(ApiError::Rejected {
            message: envelope.message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rejected_envelope_becomes_typed_error() {
        let outcome: Result<Vec<i64>, ApiError> =
            decode_envelope(json!({"isSuccess": false, "message": "X", "result": null}));

        match outcome {
            Err(ApiError::Rejected { message }) => assert_eq!(message, "X"),
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn mutation_message_passes_through_on_success() {
        let message = envelope_message(json!({"isSuccess": true, "message": "Driver saved"}))
            .expect("success envelope should yield message");

        assert_eq!(message, "Driver saved");
    }

    #[test]
    fn mutation_with_null_result_still_succeeds() {
        let outcome = envelope_message(json!({"isSuccess": true, "message": "", "result": null}));

        assert!(outcome.is_ok(), "mutations carry no payload; null result is fine");
    }
}
