use crate::actors::messages::AppError;
use crate::actors::traits::Responder;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info, instrument};
use url::Url;

/// Shown when the backend replies without an answer.
pub const NO_ANSWER: &str = "No answer returned";

#[derive(Debug, Serialize)]
struct AskRequest<'a> {
    question: &'a str,
}

#[derive(Debug, Deserialize)]
struct AskResponse {
    #[serde(default)]
    answer: Option<String>,
}

/// Responder that forwards questions to an HTTP backend.
///
/// Sends `POST <endpoint>` with `{"question": ...}` and expects `{"answer": ...}`.
pub struct RemoteResponder {
    client: Client,
    endpoint: Url,
}

impl RemoteResponder {
    pub fn new(endpoint: &str, request_timeout: Duration) -> Result<Self, AppError> {
        let endpoint = Url::parse(endpoint)?;
        let client = Client::builder().timeout(request_timeout).build()?;
        info!("Remote responder configured for {}", endpoint);
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl Responder for RemoteResponder {
    #[instrument(skip(self, question), fields(endpoint = %self.endpoint))]
    async fn respond(&self, question: String) -> Result<String, AppError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&AskRequest {
                question: &question,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            error!("Backend answered with status {}", status);
            return Err(AppError::Backend(format!(
                "Backend returned status {}",
                status
            )));
        }

        let body: AskResponse = response.json().await?;
        Ok(body
            .answer
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| NO_ANSWER.to_string()))
    }
}
