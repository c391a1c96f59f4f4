//! Client core for a car listing portal.
//!
//! Field validation, base64 image batching and the submission form state
//! machine, plus the HTTP calls to the portal backend (`/login`, `/signup`,
//! `/submission`). The interactive shell in `main.rs` drives all of it.

pub mod form;
pub mod http_client;
pub mod images;
pub mod notify;
pub mod users;
pub mod validation;

pub use form::{City, FormValues, SubmissionForm, SubmissionRecord};
pub use http_client::{HttpClient, SubmissionBackend, SubmissionError, SubmissionPayload};
pub use images::{EncodedImage, EncodingError};
pub use notify::{Toast, ToastSink, ToastVariant};
pub use users::{AuthError, Credentials};
pub use validation::{validate, Field, ValidationError};
