//! HTTP client for a running study organizer server.

pub mod session;

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::api::error::{ApiError, VALIDATION_ERROR};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::task::{Task, TaskId, TaskPayload};

pub use session::Session;

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET /`, returning the liveness banner.
    pub async fn liveness(&self) -> Result<String> {
        let response = self.client.get(self.url("/")).send().await?;
        let response = check_status(response).await?;
        Ok(response.text().await?)
    }

    pub async fn list(&self) -> Result<Vec<Task>> {
        let response = self.client.get(self.url("/tasks")).send().await?;
        parse_json(response).await
    }

    pub async fn create(&self, payload: &TaskPayload) -> Result<Task> {
        let response = self
            .client
            .post(self.url("/tasks"))
            .json(payload)
            .send()
            .await?;
        parse_json(response).await
    }

    /// Full-record replacement of task `id`.
    pub async fn replace(&self, id: TaskId, payload: &TaskPayload) -> Result<Task> {
        let response = self
            .client
            .put(self.url(&format!("/tasks/{id}")))
            .json(payload)
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::TaskNotFound(id));
        }
        parse_json(response).await
    }

    pub async fn delete(&self, id: TaskId) -> Result<()> {
        let response = self
            .client
            .delete(self.url(&format!("/tasks/{id}")))
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let response = check_status(response).await?;
    Ok(response.json().await?)
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ApiError>(&body) {
        Ok(error) if error.code == VALIDATION_ERROR => {
            Err(Error::Validation(error.details.unwrap_or_default()))
        }
        Ok(error) => Err(Error::Api {
            status: status.as_u16(),
            message: error.message,
        }),
        Err(_) => Err(Error::Api {
            status: status.as_u16(),
            message: if body.is_empty() {
                status.to_string()
            } else {
                body
            },
        }),
    }
}
