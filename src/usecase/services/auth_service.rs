use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::domain::entities::resource::UserAccount;
use crate::domain::entities::session::{Session, SessionStore};
use crate::infra::http::endpoints;
use crate::usecase::ports::transport::{ApiError, ApiTransport};
use crate::usecase::services::{decode_envelope, envelope_message};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResult {
    token: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    role: Option<String>,
}

#[derive(Clone)]
pub struct AuthService {
    transport: Arc<dyn ApiTransport>,
    session: Arc<SessionStore>,
}

impl AuthService {
    pub fn new(transport: Arc<dyn ApiTransport>, session: Arc<SessionStore>) -> Self {
        Self { transport, session }
    }

    /// Authenticates and persists the resulting session. The stored token is
    /// what the transport attaches to every subsequent request.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let value = self
            .transport
            .post(
                endpoints::LOGIN,
                json!({ "email": email, "password": password }),
            )
            .await?;
        let result: LoginResult = decode_envelope(value)?;
        let session = Session {
            token: Some(result.token),
            user_name: result.name,
            user_email: result.email,
            role: result.role,
        };
        self.session.store(session.clone());
        Ok(session)
    }

    pub fn logout(&self) {
        self.session.clear();
    }

    pub async fn get_profile(&self) -> Result<UserAccount, ApiError> {
        let value = self.transport.get(endpoints::GET_PROFILE, "").await?;
        decode_envelope(value)
    }

    pub async fn change_password(&self, payload: Value) -> Result<String, ApiError> {
        let value = self
            .transport
            .post(endpoints::CHANGE_PASSWORD, payload)
            .await?;
        envelope_message(value)
    }

    /// The reset endpoint takes the address as a raw text body.
    pub async fn forgot_password(&self, email: &str) -> Result<String, ApiError> {
        let value = self
            .transport
            .post_text_plain(endpoints::FORGOT_PASSWORD, email.to_string())
            .await?;
        envelope_message(value)
    }
}
