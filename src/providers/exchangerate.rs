use std::collections::HashMap;
use std::env;

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::core::error::{QuoteError, Result};
use crate::core::rate::{FiatRate, FiatRateProvider};

/// Environment variable holding the exchangerate-api.com key.
pub const API_KEY_ENV_VAR: &str = "EXCHANGERATE_API_KEY";

pub const DEFAULT_BASE_URL: &str = "https://v6.exchangerate-api.com";

const SOURCE: &str = "v6.exchangerate-api.com";

/// Raw payload from the v6 "latest" endpoint. The API signals business
/// failures through the `result` field inside a 200 response, in which
/// case the other fields are absent.
#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    result: String,
    #[serde(default)]
    base_code: String,
    #[serde(default)]
    conversion_rates: HashMap<String, f64>,
}

// ExchangeRateApiProvider implementation for FiatRateProvider
#[derive(Debug)]
pub struct ExchangeRateApiProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ExchangeRateApiProvider {
    pub fn new(client: reqwest::Client, base_url: &str, api_key: impl Into<String>) -> Self {
        ExchangeRateApiProvider {
            client,
            base_url: base_url.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Builds a provider with the key from EXCHANGERATE_API_KEY. Fails
    /// before any network traffic when the variable is unset.
    pub fn from_env(client: reqwest::Client, base_url: &str) -> Result<Self> {
        Self::from_env_var(client, base_url, API_KEY_ENV_VAR)
    }

    fn from_env_var(client: reqwest::Client, base_url: &str, var: &str) -> Result<Self> {
        let api_key = env::var(var)
            .map_err(|_| QuoteError::Config(format!("API key not set: {var} is missing")))?;
        Ok(Self::new(client, base_url, api_key))
    }

    fn latest_url(&self, base: &str) -> String {
        format!("{}/v6/{}/latest/{}", self.base_url, self.api_key, base)
    }
}

#[async_trait]
impl FiatRateProvider for ExchangeRateApiProvider {
    #[instrument(
        name = "FiatRateFetch",
        skip(self),
        fields(base = %base, quote = %quote)
    )]
    async fn fetch_rate(&self, base: &str, quote: &str) -> Result<FiatRate> {
        let url = self.latest_url(base);
        debug!("Requesting rate table for {}", base);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(QuoteError::HttpStatus { status, body });
        }

        let table: LatestRatesResponse =
            serde_json::from_str(&body).map_err(|e| QuoteError::Decode {
                reason: e.to_string(),
                body: body.clone(),
            })?;

        if table.result != "success" {
            return Err(QuoteError::Api {
                result: table.result,
                body,
            });
        }

        let rate = match table.conversion_rates.get(quote) {
            Some(rate) => *rate,
            None => {
                let mut available: Vec<String> =
                    table.conversion_rates.keys().cloned().collect();
                available.sort();
                return Err(QuoteError::CurrencyNotFound {
                    currency: quote.to_string(),
                    base: table.base_code,
                    available,
                });
            }
        };

        Ok(FiatRate {
            // Use the base code echoed by the API, not the requested one
            base_currency: table.base_code,
            quote_currency: quote.to_string(),
            rate,
            source: SOURCE.to_string(),
            fetched_at: Utc::now(),
        })
    }

    fn name(&self) -> &str {
        SOURCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TEST_KEY: &str = "test-key";

    async fn create_mock_server(base: &str, response: ResponseTemplate) -> MockServer {
        let mock_server = MockServer::start().await;
        let request_path = format!("/v6/{TEST_KEY}/latest/{base}");

        Mock::given(method("GET"))
            .and(path(request_path))
            .respond_with(response)
            .mount(&mock_server)
            .await;

        mock_server
    }

    fn provider_for(mock_server: &MockServer) -> ExchangeRateApiProvider {
        ExchangeRateApiProvider::new(reqwest::Client::new(), &mock_server.uri(), TEST_KEY)
    }

    #[tokio::test]
    async fn test_successful_rate_fetch() {
        let response = ResponseTemplate::new(200).set_body_string(
            r#"{"result":"success","base_code":"USD","conversion_rates":{"CNY":7.2,"EUR":0.92}}"#,
        );
        let mock_server = create_mock_server("USD", response).await;

        let provider = provider_for(&mock_server);
        let rate = provider.fetch_rate("USD", "CNY").await.unwrap();

        assert_eq!(rate.base_currency, "USD");
        assert_eq!(rate.quote_currency, "CNY");
        assert_eq!(rate.rate, 7.2);
        assert_eq!(rate.source, "v6.exchangerate-api.com");
    }

    #[tokio::test]
    async fn test_missing_currency_lists_available() {
        let response = ResponseTemplate::new(200).set_body_string(
            r#"{"result":"success","base_code":"USD","conversion_rates":{"EUR":0.92,"GBP":0.79}}"#,
        );
        let mock_server = create_mock_server("USD", response).await;

        let provider = provider_for(&mock_server);
        let result = provider.fetch_rate("USD", "CNY").await;

        match result {
            Err(QuoteError::CurrencyNotFound {
                currency,
                base,
                available,
            }) => {
                assert_eq!(currency, "CNY");
                assert_eq!(base, "USD");
                assert_eq!(available, vec!["EUR".to_string(), "GBP".to_string()]);
            }
            other => panic!("Expected CurrencyNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_business_error_inside_200_response() {
        let response = ResponseTemplate::new(200)
            .set_body_string(r#"{"result":"error","error-type":"invalid-key"}"#);
        let mock_server = create_mock_server("USD", response).await;

        let provider = provider_for(&mock_server);
        let result = provider.fetch_rate("USD", "CNY").await;

        match result {
            Err(QuoteError::Api { result, body }) => {
                assert_eq!(result, "error");
                assert!(body.contains("invalid-key"));
            }
            other => panic!("Expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_http_error_includes_body() {
        let response = ResponseTemplate::new(403).set_body_string("forbidden");
        let mock_server = create_mock_server("USD", response).await;

        let provider = provider_for(&mock_server);
        let result = provider.fetch_rate("USD", "CNY").await;

        match result {
            Err(QuoteError::HttpStatus { status, body }) => {
                assert_eq!(status.as_u16(), 403);
                assert_eq!(body, "forbidden");
            }
            other => panic!("Expected HttpStatus, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_payload_is_decode_error() {
        let response = ResponseTemplate::new(200).set_body_string("not json at all");
        let mock_server = create_mock_server("USD", response).await;

        let provider = provider_for(&mock_server);
        let result = provider.fetch_rate("USD", "CNY").await;

        assert!(matches!(result, Err(QuoteError::Decode { .. })));
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_before_any_request() {
        let mock_server = MockServer::start().await;

        let result = ExchangeRateApiProvider::from_env_var(
            reqwest::Client::new(),
            &mock_server.uri(),
            "COINFX_TEST_UNSET_API_KEY",
        );

        match result {
            Err(QuoteError::Config(msg)) => {
                assert!(msg.contains("API key not set"));
            }
            other => panic!("Expected Config error, got {other:?}"),
        }
        assert!(mock_server.received_requests().await.unwrap().is_empty());
    }
}
