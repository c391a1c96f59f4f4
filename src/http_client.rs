use std::future::Future;
use std::time::Duration;

use log::{debug, error};
use reqwest::StatusCode;
use thiserror::Error;

use crate::form::City;
use crate::images::EncodedImage;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Request client pointed at the portal backend. JSON bodies, 10 second
/// timeout, base address from `CAR_PORTAL_URL` unless given explicitly.
#[derive(Clone)]
pub struct HttpClient {
	client: reqwest::Client,
	base_url: String,
}

impl HttpClient {
	pub fn new(base_url: impl Into<String>) -> reqwest::Result<Self> {
		let client = reqwest::Client::builder().timeout(Duration::from_secs(10)).build()?;
		Ok(HttpClient { client, base_url: base_url.into() })
	}

	pub fn from_env() -> reqwest::Result<Self> {
		let base_url = std::env::var("CAR_PORTAL_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
		Self::new(base_url)
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	pub(crate) fn url(&self, path: &str) -> String {
		format!("{}{}", self.base_url.trim_end_matches('/'), path)
	}

	pub async fn post_json<T: serde::Serialize>(&self, path: &str, body: &T) -> reqwest::Result<reqwest::Response> {
		let url = self.url(path);
		debug!("POST {}", url);
		self.client
			.post(url)
			.header(reqwest::header::CONTENT_TYPE, "application/json")
			.json(body)
			.send()
			.await
	}
}

/// Wire shape of `POST /submission`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
	pub car_model: String,
	pub price: String,
	pub phone_number: String,
	pub city: City,
	pub max_images: u8,
	pub images: Vec<EncodedImage>,
}

#[derive(Debug, Error)]
pub enum SubmissionError {
	#[error("submission request failed: {0}")]
	Transport(#[from] reqwest::Error),
	#[error("submission rejected with status {0}")]
	Status(StatusCode),
}

/// Seam over the submission call so the form can be driven against a double.
pub trait SubmissionBackend {
	fn submit_listing(&self, payload: &SubmissionPayload) -> impl Future<Output = Result<(), SubmissionError>> + Send;
}

impl SubmissionBackend for HttpClient {
	async fn submit_listing(&self, payload: &SubmissionPayload) -> Result<(), SubmissionError> {
		let response = self.post_json("/submission", payload).await?;
		let status = response.status();
		if !status.is_success() {
			error!("submission rejected: {}", status);
			return Err(SubmissionError::Status(status));
		}
		debug!("submission accepted: {}", status);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn url_join_strips_trailing_slash() {
		let client = HttpClient::new("http://localhost:5000/").unwrap();
		assert_eq!(client.url("/submission"), "http://localhost:5000/submission");
	}

	#[test]
	fn from_env_falls_back_to_default() {
		// Only meaningful when CAR_PORTAL_URL is unset, which is the usual
		// test environment.
		if std::env::var("CAR_PORTAL_URL").is_err() {
			let client = HttpClient::from_env().unwrap();
			assert_eq!(client.base_url(), DEFAULT_BASE_URL);
		}
	}

	#[test]
	fn payload_serializes_with_camel_case_keys() {
		let payload = SubmissionPayload {
			car_model: "Civic".to_string(),
			price: "2500000".to_string(),
			phone_number: "03001234567".to_string(),
			city: City::Karachi,
			max_images: 3,
			images: vec![crate::images::encode_bytes(b"\x89PNG\r\n\x1a\n")],
		};
		let value = serde_json::to_value(&payload).unwrap();
		assert_eq!(value["carModel"], "Civic");
		assert_eq!(value["phoneNumber"], "03001234567");
		assert_eq!(value["city"], "Karachi");
		assert_eq!(value["maxImages"], 3);
		assert!(value["images"][0].as_str().unwrap().starts_with("data:image/png;base64,"));
	}
}
