//! HTTP access to the crop-recommendation service.

use crate::config::{AppConfig, GENERIC_SERVICE_ERROR, HEALTH_PATH, PREDICT_PATH};
use crate::error::ClientError;
use crate::model::{HealthReport, HealthStatus, MeasurementInput, PredictionResponse, ServiceFailure};
use log::{debug, warn};
use std::future::Future;
use std::time::Duration;

/// The remote service as seen by the workflow. Futures are not `Send`; they
/// run on the page's single event loop.
#[allow(async_fn_in_trait)]
pub trait PredictionService {
    /// Issue exactly one prediction request. No retries.
    async fn predict(&self, input: &MeasurementInput) -> Result<PredictionResponse, ClientError>;

    /// Lightweight reachability check.
    async fn health(&self) -> Result<HealthReport, ClientError>;
}

/// [`PredictionService`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpPredictionClient {
    http: reqwest::Client,
    config: AppConfig,
}

impl HttpPredictionClient {
    pub fn new(config: AppConfig) -> Result<Self, ClientError> {
        let builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(config.request_timeout);
        let http = builder
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl PredictionService for HttpPredictionClient {
    async fn predict(&self, input: &MeasurementInput) -> Result<PredictionResponse, ClientError> {
        let url = self.config.endpoint(PREDICT_PATH);
        debug!("POST {}", url);

        // The limit covers the body as well as the headers.
        let exchange = async {
            let response = self.http.post(&url).json(input).send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok::<_, reqwest::Error>((status, body))
        };
        let (status, body) = with_timeout(exchange, self.config.request_timeout)
            .await?
            .map_err(transport_error)?;
        classify_response(status, &body)
    }

    async fn health(&self) -> Result<HealthReport, ClientError> {
        let url = self.config.endpoint(HEALTH_PATH);
        debug!("GET {}", url);

        let exchange = async {
            let response = self.http.get(&url).send().await?;
            let status = response.status().as_u16();
            // The body is informational; an unreadable one is not a failure.
            let body = match response.text().await {
                Ok(body) => Some(body),
                Err(e) => {
                    debug!("health body unreadable: {}", e);
                    None
                }
            };
            Ok::<_, reqwest::Error>((status, body))
        };
        let (status, body) = with_timeout(exchange, self.config.request_timeout)
            .await?
            .map_err(transport_error)?;

        let details = body.and_then(|body| serde_json::from_str::<HealthStatus>(&body).ok());
        Ok(HealthReport { status, details })
    }
}

fn transport_error(e: reqwest::Error) -> ClientError {
    ClientError::Network(e.to_string())
}

/// Map an HTTP status and body onto the service's success or failure shape.
pub fn classify_response(status: u16, body: &str) -> Result<PredictionResponse, ClientError> {
    if (200..300).contains(&status) {
        return serde_json::from_str::<PredictionResponse>(body).map_err(|e| {
            warn!("malformed prediction body (status {}): {}", status, e);
            ClientError::MalformedResponse(e.to_string())
        });
    }

    let message = serde_json::from_str::<ServiceFailure>(body)
        .ok()
        .and_then(|failure| failure.error)
        .filter(|msg| !msg.trim().is_empty())
        .unwrap_or_else(|| GENERIC_SERVICE_ERROR.to_string());
    warn!("prediction failed with status {}: {}", status, message);
    Err(ClientError::Service { status, message })
}

/// Resolve `fut`, or fail with a timeout once `deadline` fires first.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
async fn race_deadline<F, D, T>(fut: F, deadline: D, limit: Duration) -> Result<T, ClientError>
where
    F: Future<Output = T>,
    D: Future<Output = ()>,
{
    use futures::future::{select, Either};

    futures::pin_mut!(fut);
    futures::pin_mut!(deadline);
    match select(fut, deadline).await {
        Either::Left((out, _)) => Ok(out),
        Either::Right(_) => Err(ClientError::Network(format!(
            "request timed out after {}s",
            limit.as_secs()
        ))),
    }
}

#[cfg(target_arch = "wasm32")]
async fn with_timeout<F, T>(fut: F, limit: Duration) -> Result<T, ClientError>
where
    F: Future<Output = T>,
{
    race_deadline(fut, gloo_timers::future::sleep(limit), limit).await
}

// Native builds enforce the limit through `reqwest::ClientBuilder::timeout`.
#[cfg(not(target_arch = "wasm32"))]
async fn with_timeout<F, T>(fut: F, _limit: Duration) -> Result<T, ClientError>
where
    F: Future<Output = T>,
{
    Ok(fut.await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_body_is_parsed() {
        let body = r#"{
            "best_crop": "rice",
            "confidence": 94,
            "message": "Recommended crop: rice",
            "top_predictions": [
                {"crop": "rice", "probability": 94},
                {"crop": "jute", "probability": 3},
                {"crop": "maize", "probability": 2}
            ]
        }"#;
        let response = classify_response(200, body).unwrap();
        assert_eq!(response.best_crop, "rice");
        assert_eq!(response.confidence, Some(94.0));
        assert_eq!(response.top_predictions.unwrap().len(), 3);
        assert_eq!(response.message.as_deref(), Some("Recommended crop: rice"));
    }

    #[test]
    fn service_error_message_is_passed_through() {
        let err = classify_response(500, r#"{"error":"model unavailable"}"#).unwrap_err();
        assert_eq!(
            err,
            ClientError::Service {
                status: 500,
                message: "model unavailable".into()
            }
        );
    }

    #[test]
    fn service_error_without_message_falls_back() {
        for body in ["{}", r#"{"error":null}"#, "<html>Bad Gateway</html>", ""] {
            let err = classify_response(502, body).unwrap_err();
            assert_eq!(err.user_message(), GENERIC_SERVICE_ERROR, "body {:?}", body);
        }
    }

    #[test]
    fn success_status_with_wrong_shape_is_malformed() {
        for body in ["not json", r#"{"confidence": 90}"#, r#"{"best_crop": 7}"#] {
            let err = classify_response(200, body).unwrap_err();
            assert!(
                matches!(err, ClientError::MalformedResponse(_)),
                "body {:?} gave {:?}",
                body,
                err
            );
        }
    }

    #[test]
    fn stalled_body_read_times_out() {
        use futures::channel::oneshot;
        use futures::executor::block_on;

        // Headers have arrived; the body never does.
        let (_body_tx, body_rx) = oneshot::channel::<String>();
        let exchange = async {
            let status = 200u16;
            let body = body_rx.await;
            (status, body)
        };
        let err = block_on(race_deadline(
            exchange,
            futures::future::ready(()),
            Duration::from_secs(30),
        ))
        .unwrap_err();
        assert_eq!(
            err.user_message(),
            "Network error: request timed out after 30s. Please ensure the backend server is running."
        );
    }

    #[test]
    fn completed_exchange_beats_deadline() {
        use futures::executor::block_on;

        let exchange = async { (200u16, String::from("{}")) };
        let out = block_on(race_deadline(
            exchange,
            futures::future::pending::<()>(),
            Duration::from_secs(30),
        ))
        .unwrap();
        assert_eq!(out, (200, "{}".to_string()));
    }

    #[test]
    fn client_builds_from_default_config() {
        let client = HttpPredictionClient::new(AppConfig::default()).unwrap();
        assert_eq!(client.config().endpoint(PREDICT_PATH), "http://localhost:5000/predict");
    }
}
