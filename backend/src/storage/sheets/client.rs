//! Thin HTTP client for the remote spreadsheet's values API.

use log::debug;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::storage::config::RemoteConfig;
use crate::storage::traits::StoreError;

/// Raw cell grid returned by the values API. The first row is the header.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorksheetValues {
    #[serde(default)]
    pub values: Vec<Vec<serde_json::Value>>,
}

/// HTTP client bound to one spreadsheet document.
#[derive(Clone)]
pub struct SheetClient {
    http: reqwest::Client,
    endpoint: String,
    token: String,
}

impl SheetClient {
    pub fn new(config: &RemoteConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            token: config.credentials.token.clone(),
        }
    }

    /// Fetch every row of one worksheet.
    pub async fn fetch_worksheet(&self, worksheet: &str) -> Result<WorksheetValues, StoreError> {
        let url = format!("{}/values/{}", self.endpoint, worksheet);
        debug!("GET {}", url);

        let response = self.http.get(&url).bearer_auth(&self.token).send().await?;
        if let Some(error) = classify_error(response.status(), worksheet) {
            return Err(error);
        }
        Ok(response.json().await?)
    }

    /// Append one row to the bottom of a worksheet.
    pub async fn append_row(&self, worksheet: &str, row: &[String]) -> Result<(), StoreError> {
        let url = format!("{}/values/{}:append", self.endpoint, worksheet);
        debug!("POST {}", url);

        let body = serde_json::json!({ "values": [row] });
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;
        if let Some(error) = classify_error(response.status(), worksheet) {
            return Err(error);
        }
        Ok(())
    }
}

/// Map the interesting HTTP statuses onto store errors. None means success.
fn classify_error(status: StatusCode, worksheet: &str) -> Option<StoreError> {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Some(StoreError::Auth(status.as_u16())),
        StatusCode::NOT_FOUND => Some(StoreError::MissingWorksheet(worksheet.to_string())),
        status if status.is_success() => None,
        status => Some(StoreError::BadPayload(format!(
            "unexpected status {} from the values API",
            status
        ))),
    }
}
