use log::{error, info};
use reqwest::StatusCode;
use thiserror::Error;

use crate::http_client::HttpClient;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Credentials {
	pub email: String,
	pub password: String,
}

#[derive(Debug, Error)]
pub enum AuthError {
	#[error("enter a valid email")]
	InvalidEmail,
	#[error("auth request failed: {0}")]
	Transport(#[from] reqwest::Error),
	#[error("invalid login credentials (status {0})")]
	LoginRejected(StatusCode),
	#[error("signup failed (status {0})")]
	SignupRejected(StatusCode),
}

/// Same shape check the login form applies before posting: one `@`, no
/// whitespace, and a dot somewhere inside the domain.
pub fn valid_email(email: &str) -> bool {
	let mut parts = email.split('@');
	let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
		(Some(local), Some(domain), None) => (local, domain),
		_ => return false,
	};
	if local.is_empty() || local.chars().any(char::is_whitespace) {
		return false;
	}
	if domain.chars().any(char::is_whitespace) {
		return false;
	}
	match domain.rfind('.') {
		Some(dot) => dot > 0 && dot + 1 < domain.len(),
		None => false,
	}
}

/// `POST /login`; any 200-range status is a successful login.
pub async fn login(client: &HttpClient, creds: &Credentials) -> Result<(), AuthError> {
	if !valid_email(&creds.email) {
		return Err(AuthError::InvalidEmail);
	}
	let response = client.post_json("/login", creds).await?;
	let status = response.status();
	if status.is_success() {
		info!("login successful for {}", creds.email);
		Ok(())
	} else {
		error!("login rejected for {}: {}", creds.email, status);
		Err(AuthError::LoginRejected(status))
	}
}

/// `POST /signup`; the backend signals success with 201 only.
pub async fn signup(client: &HttpClient, creds: &Credentials) -> Result<(), AuthError> {
	if !valid_email(&creds.email) {
		return Err(AuthError::InvalidEmail);
	}
	let response = client.post_json("/signup", creds).await?;
	let status = response.status();
	if status == StatusCode::CREATED {
		info!("signup successful for {}", creds.email);
		Ok(())
	} else {
		error!("signup rejected for {}: {}", creds.email, status);
		Err(AuthError::SignupRejected(status))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn accepts_ordinary_addresses() {
		assert!(valid_email("m@example.com"));
		assert!(valid_email("first.last@mail.example.co"));
	}

	#[test]
	fn rejects_malformed_addresses() {
		assert!(!valid_email(""));
		assert!(!valid_email("plainaddress"));
		assert!(!valid_email("@example.com"));
		assert!(!valid_email("user@example"));
		assert!(!valid_email("user@.com"));
		assert!(!valid_email("user@example."));
		assert!(!valid_email("two@@example.com"));
		assert!(!valid_email("spaced user@example.com"));
		assert!(!valid_email("user@exam ple.com"));
	}
}
