use std::collections::HashMap;

use serde::de::DeserializeOwned;
use tf_itemdb_core::Settings;

use crate::error::FetchError;
use crate::types::{
    SchemaItemsEnvelope, SchemaItemsResult, UpToDateEnvelope, UpToDateResponse,
};

const BASE_URL: &str = "https://api.steampowered.com";
const APP_ID: &str = "440";

/// HTTP client for the Steam Web API.
///
/// Request pacing is the caller's job: the catalog fetcher spaces out page
/// requests itself.
pub struct SteamClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl SteamClient {
    /// Create a client from settings. Fails if no API key is configured.
    pub fn new(settings: &Settings) -> Result<Self, FetchError> {
        let api_key = settings.require_api_key()?.to_string();
        let http = reqwest::Client::builder()
            .timeout(settings.request_timeout)
            .build()?;

        Ok(Self {
            http,
            api_key,
            base_url: BASE_URL.to_string(),
        })
    }

    /// Fetch one page of the item schema starting at `start`.
    pub async fn get_schema_items(&self, start: u64) -> Result<SchemaItemsResult, FetchError> {
        let mut params = self.base_params();
        params.insert("start", start.to_string());

        let envelope: SchemaItemsEnvelope = self
            .get_json("/IEconItems_440/GetSchemaItems/v0001/", &params)
            .await?;

        let result = envelope.result;
        if result.status != 1 {
            return Err(FetchError::api(format!(
                "GetSchemaItems returned status {}{}",
                result.status,
                result
                    .note
                    .as_deref()
                    .map(|n| format!(": {n}"))
                    .unwrap_or_default()
            )));
        }
        Ok(result)
    }

    /// Ask whether `version` is the current schema version.
    pub async fn up_to_date_check(&self, version: u64) -> Result<UpToDateResponse, FetchError> {
        let mut params = self.base_params();
        params.insert("appid", APP_ID.to_string());
        params.insert("version", version.to_string());

        let envelope: UpToDateEnvelope = self
            .get_json("/ISteamApps/UpToDateCheck/v1/", &params)
            .await?;
        Ok(envelope.response)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &HashMap<&str, String>,
    ) -> Result<T, FetchError> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, endpoint))
            .query(params)
            .send()
            .await?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(FetchError::Unauthorized);
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(FetchError::RateLimit);
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
            });
        }

        let text = resp.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            FetchError::api(format!(
                "Failed to parse {endpoint} response: {e}. Response: {}",
                truncate(&text, 200)
            ))
        })
    }

    fn base_params(&self) -> HashMap<&'static str, String> {
        let mut params = HashMap::new();
        params.insert("key", self.api_key.clone());
        params.insert("format", "json".to_string());
        params
    }
}

/// Cut `text` to at most `max` bytes on a char boundary.
fn truncate(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
