use log::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastVariant {
	Default,
	Destructive,
}

/// The payload handed to whatever notification channel is wired in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
	pub title: String,
	pub description: String,
	pub variant: ToastVariant,
}

impl Toast {
	pub fn success(title: &str, description: &str) -> Self {
		Toast {
			title: title.to_string(),
			description: description.to_string(),
			variant: ToastVariant::Default,
		}
	}

	pub fn destructive(title: &str, description: &str) -> Self {
		Toast {
			title: title.to_string(),
			description: description.to_string(),
			variant: ToastVariant::Destructive,
		}
	}
}

/// Injected notification capability; the form never talks to a global
/// channel, so tests can substitute a recording sink.
pub trait ToastSink {
	fn toast(&self, toast: Toast);
}

/// Sink that forwards toasts to the log.
pub struct LogSink;

impl ToastSink for LogSink {
	fn toast(&self, toast: Toast) {
		match toast.variant {
			ToastVariant::Default => info!("{}: {}", toast.title, toast.description),
			ToastVariant::Destructive => warn!("{}: {}", toast.title, toast.description),
		}
	}
}
