//! Low-level HTTP plumbing for the PostgREST API.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde::Serialize;

use pitstop_core::config::SupabaseConfig;
use pitstop_core::error::PitstopError;

/// Authenticated client for one Supabase project.
///
/// Holds a shared [`reqwest::Client`] for connection pooling; every request
/// carries the `apikey` and `Authorization: Bearer` headers expected by
/// PostgREST when using the service-role key.
pub struct SupabaseClient {
    base_url: String,
    client: reqwest::Client,
}

impl SupabaseClient {
    /// Create a client from backend configuration.
    ///
    /// Fails only when the service-role key contains bytes that cannot be
    /// placed in an HTTP header.
    pub fn new(config: &SupabaseConfig) -> Result<Self, PitstopError> {
        let key = HeaderValue::from_str(&config.service_role_key)
            .map_err(|e| PitstopError::Config(format!("invalid service role key: {e}")))?;
        let bearer =
            HeaderValue::from_str(&format!("Bearer {}", config.service_role_key))
                .map_err(|e| PitstopError::Config(format!("invalid service role key: {e}")))?;

        let mut headers = HeaderMap::new();
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub(crate) fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    pub(crate) fn rpc_url(&self, function: &str) -> String {
        format!("{}/rest/v1/rpc/{}", self.base_url, function)
    }

    /// GET rows from a table endpoint with PostgREST filter params.
    pub(crate) async fn get_rows<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, PitstopError> {
        let response = self.client.get(url).query(query).send().await?;
        Self::parse_rows(response).await
    }

    /// POST a JSON body and deserialize the returned rows.
    pub(crate) async fn post_rows<B: Serialize, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
        prefer_representation: bool,
    ) -> Result<Vec<T>, PitstopError> {
        let mut request = self.client.post(url).json(body);
        if prefer_representation {
            request = request.header("Prefer", "return=representation");
        }
        let response = request.send().await?;
        Self::parse_rows(response).await
    }

    async fn parse_rows<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<Vec<T>, PitstopError> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(PitstopError::Api {
                status: status.as_u16(),
                message,
            });
        }
        // PostgREST may answer an insert with an empty body unless
        // representation was requested.
        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(url: &str) -> SupabaseClient {
        SupabaseClient::new(&SupabaseConfig {
            url: url.to_string(),
            service_role_key: "service-key".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn table_url_joins_rest_path() {
        let c = client("https://xyz.supabase.co");
        assert_eq!(
            c.table_url("services"),
            "https://xyz.supabase.co/rest/v1/services"
        );
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let c = client("https://xyz.supabase.co/");
        assert_eq!(
            c.rpc_url("get_vehicles_for_reminder"),
            "https://xyz.supabase.co/rest/v1/rpc/get_vehicles_for_reminder"
        );
    }

    #[test]
    fn key_with_control_bytes_is_rejected() {
        let result = SupabaseClient::new(&SupabaseConfig {
            url: "https://xyz.supabase.co".to_string(),
            service_role_key: "bad\nkey".to_string(),
        });
        assert!(matches!(result, Err(PitstopError::Config(_))));
    }
}
