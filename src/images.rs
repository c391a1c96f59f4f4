use std::path::PathBuf;

use base64::{engine::general_purpose::STANDARD, Engine};
use thiserror::Error;

/// A binary image rendered as a data URL, safe for JSON transport and
/// inline preview.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct EncodedImage(String);

impl EncodedImage {
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

#[derive(Debug, Error)]
pub enum EncodingError {
	#[error("failed to read {path}: {source}")]
	Read {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("image read task failed: {0}")]
	Task(#[from] tokio::task::JoinError),
}

/// Encodes one blob to `data:<mime>;base64,<payload>`. The mime type is
/// sniffed from the bytes; anything unrecognised ships as octet-stream.
pub fn encode_bytes(bytes: &[u8]) -> EncodedImage {
	let mime = match image::guess_format(bytes) {
		Ok(format) => format.to_mime_type(),
		Err(_) => "application/octet-stream",
	};
	EncodedImage(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
}

/// Encodes a batch of files, keeping at most `remaining_capacity` of them in
/// input order; files beyond capacity are dropped without error. All accepted
/// files are read concurrently, but the result keeps the input order and the
/// whole batch fails if any single read does.
pub async fn encode_files(paths: &[PathBuf], remaining_capacity: usize) -> Result<Vec<EncodedImage>, EncodingError> {
	let mut handles = Vec::new();
	for path in paths.iter().take(remaining_capacity).cloned() {
		handles.push(tokio::spawn(async move {
			let bytes = tokio::fs::read(&path).await;
			(path, bytes)
		}));
	}

	let mut encoded = Vec::with_capacity(handles.len());
	for handle in handles {
		let (path, bytes) = handle.await?;
		let bytes = bytes.map_err(|source| EncodingError::Read { path, source })?;
		encoded.push(encode_bytes(&bytes));
	}
	Ok(encoded)
}
