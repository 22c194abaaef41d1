//! Async HTTP client wrapping the Panorama intake API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use panorama_core::{submission::SubmitPayload, validate::FieldError};
use reqwest::Client;
use serde::Deserialize;

/// Connection settings for the intake API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// Decoded `data` payload of a successful submission.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitData {
  pub message:      String,
  pub protocol:     String,
  #[serde(rename = "redirectUrl")]
  pub redirect_url: String,
}

#[derive(Debug, Deserialize)]
struct SuccessEnvelope {
  data: SubmitData,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
  error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
  code:    String,
  message: String,
  #[serde(default)]
  details: Vec<FieldError>,
}

/// Async HTTP client for the intake endpoint.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{path}", self.config.base_url.trim_end_matches('/'))
  }

  /// `POST /api/external/contact`
  pub async fn submit(&self, payload: &SubmitPayload) -> Result<SubmitData> {
    let resp = self
      .client
      .post(self.url("/api/external/contact"))
      .json(payload)
      .send()
      .await
      .context("POST /api/external/contact failed")?;

    if resp.status().is_success() {
      let envelope: SuccessEnvelope =
        resp.json().await.context("deserialising submit response")?;
      return Ok(envelope.data);
    }

    let status = resp.status();
    match resp.json::<ErrorEnvelope>().await {
      Ok(envelope) => {
        let mut lines =
          vec![format!("{}: {}", envelope.error.code, envelope.error.message)];
        for d in &envelope.error.details {
          lines.push(format!("  {}: {}", d.field, d.message));
        }
        Err(anyhow!(lines.join("\n")))
      }
      Err(_) => Err(anyhow!("POST /api/external/contact → {status}")),
    }
  }
}
