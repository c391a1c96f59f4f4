use std::collections::HashMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use log::{info, warn};
use uuid::Uuid;

use crate::http_client::{SubmissionBackend, SubmissionPayload};
use crate::images::{self, EncodedImage};
use crate::notify::{Toast, ToastSink};
use crate::validation::{validate, Field, ValidationError};

pub const MAX_IMAGE_LIMIT: u8 = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum City {
	#[default]
	Lahore,
	Karachi,
}

impl City {
	pub fn from_name(name: &str) -> Option<City> {
		match name {
			"Lahore" => Some(City::Lahore),
			"Karachi" => Some(City::Karachi),
			_ => None,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			City::Lahore => "Lahore",
			City::Karachi => "Karachi",
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormValues {
	pub car_model: String,
	pub price: String,
	pub phone_number: String,
	pub city: City,
	pub max_images: u8,
}

impl Default for FormValues {
	fn default() -> Self {
		FormValues {
			car_model: String::new(),
			price: String::new(),
			phone_number: String::new(),
			city: City::Lahore,
			max_images: 1,
		}
	}
}

/// One accepted submission. Immutable once it lands in the table.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionRecord {
	pub id: Uuid,
	pub submitted_at: DateTime<Utc>,
	pub values: FormValues,
	pub images: Vec<EncodedImage>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
	Editing,
	Submitting,
}

/// Owns the form state: field values, per-field errors, the accepted image
/// sequence and the in-memory submission table. Each instance is independent;
/// nothing here is shared across forms.
pub struct SubmissionForm<B, N> {
	backend: B,
	sink: N,
	values: FormValues,
	errors: HashMap<Field, ValidationError>,
	images: Vec<EncodedImage>,
	table: Vec<SubmissionRecord>,
	phase: Phase,
}

impl<B: SubmissionBackend, N: ToastSink> SubmissionForm<B, N> {
	pub fn new(backend: B, sink: N) -> Self {
		SubmissionForm {
			backend,
			sink,
			values: FormValues::default(),
			errors: HashMap::new(),
			images: Vec::new(),
			table: Vec::new(),
			phase: Phase::Editing,
		}
	}

	pub fn values(&self) -> &FormValues {
		&self.values
	}

	pub fn field_error(&self, field: Field) -> Option<&ValidationError> {
		self.errors.get(&field)
	}

	pub fn images(&self) -> &[EncodedImage] {
		&self.images
	}

	pub fn table(&self) -> &[SubmissionRecord] {
		&self.table
	}

	pub fn is_submitting(&self) -> bool {
		self.phase == Phase::Submitting
	}

	/// Stores a raw field value and re-validates that field only.
	pub fn set_field(&mut self, field: Field, raw: &str) {
		match field {
			Field::CarModel => self.values.car_model = raw.to_string(),
			Field::Price => self.values.price = raw.to_string(),
			Field::PhoneNumber => self.values.phone_number = raw.to_string(),
			Field::City => {
				if let Some(city) = City::from_name(raw) {
					self.values.city = city;
				}
			}
		}
		self.apply_verdict(field, validate(field, raw));
	}

	/// Clamps the limit into [1, 10] and truncates the accepted images to the
	/// new bound. Raising the limit never adds images back.
	pub fn set_max_images(&mut self, limit: u8) {
		self.values.max_images = limit.clamp(1, MAX_IMAGE_LIMIT);
		self.images.truncate(self.values.max_images as usize);
	}

	pub fn remaining_capacity(&self) -> usize {
		self.values.max_images as usize - self.images.len()
	}

	/// Encodes a batch of files and appends the result. Files beyond the
	/// remaining capacity are silently dropped; a failed batch leaves the
	/// accepted sequence untouched and raises a destructive toast.
	pub async fn attach_images(&mut self, paths: &[PathBuf]) {
		match images::encode_files(paths, self.remaining_capacity()).await {
			Ok(batch) => {
				self.images.extend(batch);
				// the limit may have been lowered while the reads ran
				self.images.truncate(self.values.max_images as usize);
			}
			Err(err) => {
				warn!("image encoding failed: {}", err);
				self.sink.toast(Toast::destructive("Error", "Failed to process the images. Please try again."));
			}
		}
	}

	pub fn remove_image(&mut self, index: usize) {
		if index < self.images.len() {
			self.images.remove(index);
		}
	}

	pub fn preview(&self, index: usize) -> Option<&EncodedImage> {
		self.images.get(index)
	}

	/// Runs the full submit sequence: re-validate the required fields, post
	/// the payload, and on success append to the table and reset the form.
	/// A failed submission leaves every piece of state in place for retry.
	/// Ignored while another submission is in flight.
	pub async fn submit(&mut self) {
		if self.phase == Phase::Submitting {
			return;
		}

		// Re-check the required fields even if they were never touched, so a
		// pristine form cannot slip past stale per-field state.
		let mut required_ok = true;
		for field in [Field::CarModel, Field::Price, Field::PhoneNumber] {
			let raw = self.raw_value(field).to_string();
			if !self.apply_verdict(field, validate(field, &raw)) {
				required_ok = false;
			}
		}

		if !required_ok || !self.errors.is_empty() {
			self.sink.toast(Toast::destructive("Validation Error", "Please fill out all required fields correctly."));
			return;
		}

		let payload = SubmissionPayload {
			car_model: self.values.car_model.clone(),
			price: self.values.price.clone(),
			phone_number: self.values.phone_number.clone(),
			city: self.values.city,
			max_images: self.values.max_images,
			images: self.images.clone(),
		};

		self.phase = Phase::Submitting;
		info!("submitting listing: {} ({} images)", payload.car_model, payload.images.len());
		let result = self.backend.submit_listing(&payload).await;
		self.phase = Phase::Editing;

		match result {
			Ok(()) => {
				self.table.push(SubmissionRecord {
					id: Uuid::new_v4(),
					submitted_at: Utc::now(),
					values: self.values.clone(),
					images: std::mem::take(&mut self.images),
				});
				self.values = FormValues::default();
				self.errors.clear();
				self.sink.toast(Toast::success("Success", "Car details have been submitted successfully."));
			}
			Err(err) => {
				warn!("submission error: {}", err);
				self.sink.toast(Toast::destructive("Submission Error", "Failed to submit the car details. Please try again."));
			}
		}
	}

	/// Clears the table; the form in progress is untouched.
	pub fn reset_table(&mut self) {
		self.table.clear();
	}

	fn raw_value(&self, field: Field) -> &str {
		match field {
			Field::CarModel => &self.values.car_model,
			Field::Price => &self.values.price,
			Field::PhoneNumber => &self.values.phone_number,
			Field::City => self.values.city.as_str(),
		}
	}

	fn apply_verdict(&mut self, field: Field, verdict: Result<(), ValidationError>) -> bool {
		match verdict {
			Ok(()) => {
				self.errors.remove(&field);
				true
			}
			Err(err) => {
				self.errors.insert(field, err);
				false
			}
		}
	}
}
