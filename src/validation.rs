use thiserror::Error;

use crate::form::City;

/// Form fields subject to validation. Wire names are camelCase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
	CarModel,
	Price,
	PhoneNumber,
	City,
}

impl Field {
	pub fn as_str(self) -> &'static str {
		match self {
			Field::CarModel => "carModel",
			Field::Price => "price",
			Field::PhoneNumber => "phoneNumber",
			Field::City => "city",
		}
	}
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
	#[error("Car model must be at least 3 characters long.")]
	CarModelTooShort,
	#[error("Price is required.")]
	PriceRequired,
	#[error("Price must be a valid number.")]
	PriceNotNumeric,
	#[error("Phone number must be exactly 11 digits.")]
	PhoneNotElevenDigits,
	#[error("Please select a city.")]
	CityMissing,
}

/// Validates a single raw field value. Pure, no cross-field rules; the same
/// entry point is used on every field change and again on submit.
pub fn validate(field: Field, raw: &str) -> Result<(), ValidationError> {
	match field {
		Field::CarModel => {
			if raw.chars().count() < 3 {
				return Err(ValidationError::CarModelTooShort);
			}
			Ok(())
		}
		Field::Price => {
			if raw.is_empty() {
				return Err(ValidationError::PriceRequired);
			}
			if raw.trim().parse::<f64>().is_err() {
				return Err(ValidationError::PriceNotNumeric);
			}
			Ok(())
		}
		Field::PhoneNumber => {
			if raw.len() == 11 && raw.bytes().all(|b| b.is_ascii_digit()) {
				Ok(())
			} else {
				Err(ValidationError::PhoneNotElevenDigits)
			}
		}
		Field::City => {
			if City::from_name(raw).is_some() {
				Ok(())
			} else {
				Err(ValidationError::CityMissing)
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn car_model_needs_three_chars() {
		assert_eq!(validate(Field::CarModel, ""), Err(ValidationError::CarModelTooShort));
		assert_eq!(validate(Field::CarModel, "ab"), Err(ValidationError::CarModelTooShort));
		assert_eq!(validate(Field::CarModel, "BMW"), Ok(()));
		assert_eq!(validate(Field::CarModel, "Civic 2019"), Ok(()));
	}

	#[test]
	fn price_required_before_numeric() {
		assert_eq!(validate(Field::Price, ""), Err(ValidationError::PriceRequired));
		assert_eq!(validate(Field::Price, "abc"), Err(ValidationError::PriceNotNumeric));
		assert_eq!(validate(Field::Price, "12abc"), Err(ValidationError::PriceNotNumeric));
		assert_eq!(validate(Field::Price, "2500000"), Ok(()));
		assert_eq!(validate(Field::Price, "12.5"), Ok(()));
		assert_eq!(validate(Field::Price, " 12 "), Ok(()));
	}

	#[test]
	fn phone_number_is_exactly_eleven_digits() {
		assert_eq!(validate(Field::PhoneNumber, "03001234567"), Ok(()));
		assert_eq!(validate(Field::PhoneNumber, ""), Err(ValidationError::PhoneNotElevenDigits));
		assert_eq!(validate(Field::PhoneNumber, "0300123456"), Err(ValidationError::PhoneNotElevenDigits));
		assert_eq!(validate(Field::PhoneNumber, "030012345678"), Err(ValidationError::PhoneNotElevenDigits));
		assert_eq!(validate(Field::PhoneNumber, "0300123456a"), Err(ValidationError::PhoneNotElevenDigits));
		assert_eq!(validate(Field::PhoneNumber, "+3001234567"), Err(ValidationError::PhoneNotElevenDigits));
	}

	#[test]
	fn city_must_be_known() {
		assert_eq!(validate(Field::City, "Lahore"), Ok(()));
		assert_eq!(validate(Field::City, "Karachi"), Ok(()));
		assert_eq!(validate(Field::City, ""), Err(ValidationError::CityMissing));
		assert_eq!(validate(Field::City, "Islamabad"), Err(ValidationError::CityMissing));
	}

	#[test]
	fn validation_is_idempotent() {
		for _ in 0..3 {
			assert_eq!(validate(Field::Price, "12x"), Err(ValidationError::PriceNotNumeric));
			assert_eq!(validate(Field::CarModel, "Corolla"), Ok(()));
		}
	}
}
