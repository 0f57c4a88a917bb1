use api_types::{
    auth::{ADMIN_PIN_HEADER, PinStatus},
    child::Child,
    expense::{Expense, ExpenseDeleted, ExpenseNew, ExpenseUpdate},
    totals::TotalsSnapshot,
};
use reqwest::{RequestBuilder, Response, Url};
use serde::{Deserialize, de::DeserializeOwned};
use thiserror::Error;

use crate::{
    error::{AppError, Result},
    session::AdminSession,
};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("invalid data: {0}")]
    Validation(String),
    #[error("server error: {0}")]
    Server(String),
    #[error("connection error: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

/// Typed client for the holiday tracker REST API.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    /// `base_url` must end with `/`, see [`crate::config::resolve_base_url`].
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|err| AppError::Failed(format!("invalid base_url: {err}")))?;
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn children(&self) -> std::result::Result<Vec<Child>, ClientError> {
        let endpoint = self.endpoint("children")?;
        self.send(self.http.get(endpoint)).await
    }

    pub async fn expenses(&self, child_id: i32) -> std::result::Result<Vec<Expense>, ClientError> {
        let endpoint = self.endpoint(&format!("children/{child_id}/expenses"))?;
        self.send(self.http.get(endpoint)).await
    }

    pub async fn total(&self, child_id: i32) -> std::result::Result<TotalsSnapshot, ClientError> {
        let endpoint = self.endpoint(&format!("children/{child_id}/total"))?;
        self.send(self.http.get(endpoint)).await
    }

    /// Check `pin` against the server and open an admin session with it.
    pub async fn verify_pin(&self, pin: &str) -> std::result::Result<AdminSession, ClientError> {
        let endpoint = self.endpoint("verify-pin")?;
        let _status: PinStatus = self
            .send(self.http.post(endpoint).header(ADMIN_PIN_HEADER, pin))
            .await?;
        tracing::debug!("admin pin accepted");
        Ok(AdminSession::new(pin))
    }

    pub async fn create_expense(
        &self,
        session: &AdminSession,
        payload: &ExpenseNew,
    ) -> std::result::Result<Expense, ClientError> {
        let endpoint = self.endpoint("expenses")?;
        let request = self.http.post(endpoint).json(payload);
        self.send(admin(request, session)).await
    }

    pub async fn update_expense(
        &self,
        session: &AdminSession,
        id: i32,
        payload: &ExpenseUpdate,
    ) -> std::result::Result<Expense, ClientError> {
        let endpoint = self.endpoint(&format!("expenses/{id}"))?;
        let request = self.http.put(endpoint).json(payload);
        self.send(admin(request, session)).await
    }

    pub async fn delete_expense(
        &self,
        session: &AdminSession,
        id: i32,
    ) -> std::result::Result<ExpenseDeleted, ClientError> {
        let endpoint = self.endpoint(&format!("expenses/{id}"))?;
        self.send(admin(self.http.delete(endpoint), session)).await
    }

    fn endpoint(&self, path: &str) -> std::result::Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::Server(format!("invalid base_url: {err}")))
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> std::result::Result<T, ClientError> {
        let res = request.send().await?;
        decode(res).await
    }
}

fn admin(request: RequestBuilder, session: &AdminSession) -> RequestBuilder {
    request.header(ADMIN_PIN_HEADER, session.pin())
}

async fn decode<T: DeserializeOwned>(res: Response) -> std::result::Result<T, ClientError> {
    if res.status().is_success() {
        return res.json::<T>().await.map_err(ClientError::Transport);
    }

    let status = res.status();
    let body = res
        .json::<ErrorResponse>()
        .await
        .map(|err| err.error)
        .unwrap_or_else(|_| "unknown error".to_string());
    tracing::debug!(status = status.as_u16(), "request failed: {body}");

    let err = match status.as_u16() {
        401 | 403 => ClientError::Unauthorized,
        404 => ClientError::NotFound(body),
        409 => ClientError::Conflict(body),
        400 | 422 => ClientError::Validation(body),
        _ => ClientError::Server(body),
    };
    Err(err)
}
