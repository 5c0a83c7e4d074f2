//! Prediction service client implementation

use async_trait::async_trait;
use predictor_protocol::{
    ErrorBody, ExplainResponse, PredictRequest, ReferenceKind, ReferenceListBody,
};
use serde::de::DeserializeOwned;

use crate::api::PredictorApi;
use crate::http_client::create_client;
use crate::{ClientConfig, PredictorError, Result};

/// Client for the prediction service's HTTP API
#[derive(Clone)]
pub struct PredictorClient {
    client: reqwest::Client,
    base_url: String,
}

impl PredictorClient {
    /// Create a client from configuration. No request is made.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            client: create_client(config)?,
            base_url: config.api_url.clone(),
        })
    }

    /// Create a client for `base_url` with default timeouts.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let config = ClientConfig {
            api_url: base_url.into(),
            ..Default::default()
        };
        Self::new(&config)
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Fetch one reference list (`/regions`, `/cities` or `/categories`).
    pub async fn fetch_reference(&self, kind: ReferenceKind) -> Result<Vec<String>> {
        let url = self.url(kind.path());
        tracing::debug!(%url, "fetching {kind}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| PredictorError::Transport {
                url: url.clone(),
                source,
            })?;

        let body: ReferenceListBody = read_json(&url, response).await?;
        Ok(body.into_options(kind))
    }

    /// Send `POST /predict/explain`.
    pub async fn predict_explain(&self, request: &PredictRequest) -> Result<ExplainResponse> {
        let url = self.url("/predict/explain");
        tracing::debug!(
            %url,
            region = %request.region,
            city = %request.city,
            categories = %request.category_list,
            founded_year = request.founded_year,
            "submitting prediction request"
        );

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|source| PredictorError::Transport {
                url: url.clone(),
                source,
            })?;

        read_json(&url, response).await
    }
}

/// Read the body and decode it, turning non-2xx statuses into API errors.
///
/// An error body that cannot be read still yields `API Error: <status>`.
async fn read_json<T: DeserializeOwned>(url: &str, response: reqwest::Response) -> Result<T> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_else(|e| {
            tracing::debug!(%url, error = %e, "could not read error body");
            String::new()
        });
        let message = ErrorBody::message_from_body(&body, status.as_u16());
        tracing::debug!(%url, status = status.as_u16(), %message, "service returned error");
        return Err(PredictorError::Api {
            status: status.as_u16(),
            message,
        });
    }

    let body = response
        .text()
        .await
        .map_err(|source| PredictorError::Transport {
            url: url.to_string(),
            source,
        })?;
    serde_json::from_str(&body).map_err(|e| PredictorError::InvalidResponse(e.to_string()))
}

#[async_trait]
impl PredictorApi for PredictorClient {
    async fn fetch_reference(&self, kind: ReferenceKind) -> Result<Vec<String>> {
        PredictorClient::fetch_reference(self, kind).await
    }

    async fn predict_explain(&self, request: &PredictRequest) -> Result<ExplainResponse> {
        PredictorClient::predict_explain(self, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use predictor_protocol::ConfidenceTier;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn json_response(status: u16, body: serde_json::Value) -> ResponseTemplate {
        ResponseTemplate::new(status).set_body_raw(body.to_string(), "application/json")
    }

    fn sample_request() -> PredictRequest {
        PredictRequest {
            country_code: "USA".to_string(),
            region: "California".to_string(),
            city: "San Francisco".to_string(),
            category_list: "software".to_string(),
            founded_year: 2010,
        }
    }

    #[tokio::test]
    async fn test_fetch_regions_happy_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/regions"))
            .respond_with(json_response(
                200,
                serde_json::json!({"regions": ["California", "New York"]}),
            ))
            .expect(1)
            .mount(&server)
            .await;

        let client = PredictorClient::with_base_url(server.uri()).unwrap();
        let regions = client
            .fetch_reference(ReferenceKind::Regions)
            .await
            .expect("fetch regions");
        assert_eq!(regions, vec!["California", "New York"]);
    }

    #[tokio::test]
    async fn test_trailing_slash_in_base_url() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/categories"))
            .respond_with(json_response(
                200,
                serde_json::json!({"categories": ["software"]}),
            ))
            .mount(&server)
            .await;

        let client = PredictorClient::with_base_url(format!("{}/", server.uri())).unwrap();
        let categories = client
            .fetch_reference(ReferenceKind::Categories)
            .await
            .unwrap();
        assert_eq!(categories, vec!["software"]);
    }

    #[tokio::test]
    async fn test_missing_key_is_empty_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cities"))
            .respond_with(json_response(200, serde_json::json!({"unexpected": 1})))
            .mount(&server)
            .await;

        let client = PredictorClient::with_base_url(server.uri()).unwrap();
        let cities = client.fetch_reference(ReferenceKind::Cities).await.unwrap();
        assert!(cities.is_empty());
    }

    #[tokio::test]
    async fn test_reference_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cities"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = PredictorClient::with_base_url(server.uri()).unwrap();
        let err = client
            .fetch_reference(ReferenceKind::Cities)
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), "API Error: 500");
    }

    #[tokio::test]
    async fn test_predict_explain_sends_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict/explain"))
            .and(body_json(serde_json::json!({
                "country_code": "USA",
                "region": "California",
                "city": "San Francisco",
                "category_list": "software",
                "founded_year": 2010
            })))
            .respond_with(json_response(
                200,
                serde_json::json!({
                    "prediction": {
                        "success_probability": 0.82,
                        "prediction": 1,
                        "model_used": "xgboost",
                        "confidence": "high"
                    },
                    "feature_importance": {"founded_year": 0.3},
                    "top_factors": [
                        {"feature": "founded_year", "importance": 0.3, "impact": "positive"}
                    ]
                }),
            ))
            .expect(1)
            .mount(&server)
            .await;

        let client = PredictorClient::with_base_url(server.uri()).unwrap();
        let resp = client.predict_explain(&sample_request()).await.unwrap();
        assert_eq!(resp.prediction.success_probability, 0.82);
        assert_eq!(resp.prediction.confidence, ConfidenceTier::High);
        assert_eq!(resp.top_factors.len(), 1);
    }

    #[tokio::test]
    async fn test_predict_explain_detail_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict/explain"))
            .respond_with(json_response(
                503,
                serde_json::json!({"detail": "Model not loaded"}),
            ))
            .mount(&server)
            .await;

        let client = PredictorClient::with_base_url(server.uri()).unwrap();
        let err = client.predict_explain(&sample_request()).await.unwrap_err();
        assert!(matches!(
            err,
            PredictorError::Api { status: 503, ref message } if message == "Model not loaded"
        ));
    }

    #[tokio::test]
    async fn test_predict_explain_undecodable_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict/explain"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = PredictorClient::with_base_url(server.uri()).unwrap();
        let err = client.predict_explain(&sample_request()).await.unwrap_err();
        assert!(matches!(err, PredictorError::InvalidResponse(_)));
        assert!(
            err.to_string()
                .starts_with("Invalid response from prediction service:")
        );
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        let uri = {
            let server = MockServer::start().await;
            server.uri()
        };

        let client = PredictorClient::with_base_url(uri).unwrap();
        let err = client.predict_explain(&sample_request()).await.unwrap_err();
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_unreadable_error_body_is_api_error() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            // Promise 64 bytes, send a few, then hang up.
            socket
                .write_all(
                    b"HTTP/1.1 500 Internal Server Error\r\n\
                      content-type: application/json\r\n\
                      content-length: 64\r\n\r\n{\"deta",
                )
                .await
                .unwrap();
            socket.shutdown().await.unwrap();
        });

        let client = PredictorClient::with_base_url(format!("http://{addr}")).unwrap();
        let err = client
            .fetch_reference(ReferenceKind::Cities)
            .await
            .unwrap_err();
        server.await.unwrap();

        assert!(!err.is_transport());
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), "API Error: 500");
    }
}
