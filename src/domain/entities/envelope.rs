use serde::Deserialize;

/// Wire wrapper every backend endpoint uses. A 2xx response with
/// `isSuccess: false` is an application-level failure and must never be
/// treated as success by callers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub is_success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default = "Option::default")]
    pub result: Option<T>,
}

impl<T> Envelope<T> {
    /// Collapses the envelope into the payload, or the server message on
    /// rejection. A success envelope with a missing `result` is also a
    /// rejection.
    pub fn into_result(self) -> Result<T, String> {
        if !self.is_success {
            return Err(self.message);
        }
        match self.result {
            Some(result) => Ok(result),
            None => Err(if self.message.is_empty() {
                "response contained no result".to_string()
            } else {
                self.message
            }),
        }
    }

    /// The server message, regardless of outcome. Used for toasts.
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_yields_result() {
        let envelope: Envelope<i64> = serde_json::from_str(
            r#"{"isSuccess": true, "message": "ok", "result": 7}"#,
        )
        .expect("envelope should deserialize");

        assert_eq!(envelope.into_result(), Ok(7));
    }

    #[test]
    fn rejected_envelope_yields_server_message() {
        let envelope: Envelope<i64> = serde_json::from_str(
            r#"{"isSuccess": false, "message": "X", "result": null}"#,
        )
        .expect("envelope should deserialize");

        assert_eq!(envelope.into_result(), Err("X".to_string()));
    }

    #[test]
    fn success_without_result_is_a_rejection() {
        let envelope: Envelope<i64> = serde_json::from_str(
            r#"{"isSuccess": true, "message": "", "result": null}"#,
        )
        .expect("envelope should deserialize");

        assert!(envelope.into_result().is_err(), "missing result should reject");
    }

    #[test]
    fn missing_optional_fields_default() {
        let envelope: Envelope<i64> =
            serde_json::from_str(r#"{"isSuccess": false}"#).expect("envelope should deserialize");

        assert_eq!(envelope.message(), "");
        assert!(envelope.into_result().is_err());
    }
}
