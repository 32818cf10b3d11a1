//! Demo-request form handler.
//!
//! Accepts the `application/x-www-form-urlencoded` body of the booking form,
//! validates it and logs the request. Nothing is persisted or sent.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What the visitor asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
	/// Product demo.
	Demo,
	/// Sales call.
	Call,
}

impl fmt::Display for RequestKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			RequestKind::Demo => "demo",
			RequestKind::Call => "call",
		})
	}
}

/// Validation failures.
#[derive(Debug, thiserror::Error)]
pub enum DemoRequestError {
	/// The body is not valid form encoding.
	#[error("Invalid form data: {0}")]
	Encoding(#[from] serde_urlencoded::de::Error),
	/// A required field is absent or blank.
	#[error("Missing required field: {0}")]
	MissingField(&'static str),
	/// `type` is neither `demo` nor `call`.
	#[error("Invalid request type: {0}")]
	InvalidKind(String),
	/// `email` is not an address.
	#[error("Invalid email address: {0}")]
	InvalidEmail(String),
}

#[derive(Debug, Default, Deserialize)]
struct FormFields {
	#[serde(rename = "type")]
	kind: Option<String>,
	name: Option<String>,
	email: Option<String>,
	phone: Option<String>,
	company: Option<String>,
	date: Option<String>,
	time: Option<String>,
}

/// A validated demo request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DemoRequest {
	/// Demo or call.
	#[serde(rename = "type")]
	pub kind: RequestKind,
	/// Contact name.
	pub name: String,
	/// Contact email.
	pub email: String,
	/// Optional phone number.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub phone: Option<String>,
	/// Company name.
	pub company: String,
	/// Requested date as entered.
	pub date: String,
	/// Requested time as entered.
	pub time: String,
}

fn required(value: Option<String>, field: &'static str) -> Result<String, DemoRequestError> {
	value
		.map(|v| v.trim().to_string())
		.filter(|v| !v.is_empty())
		.ok_or(DemoRequestError::MissingField(field))
}

fn is_email(email: &str) -> bool {
	let mut parts = email.split('@');
	let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
		return false;
	};
	!local.is_empty()
		&& !email.contains(char::is_whitespace)
		&& domain.contains('.')
		&& domain.split('.').all(|label| !label.is_empty())
}

impl DemoRequest {
	/// Parse and validate a form-encoded body.
	pub fn from_form(body: &str) -> Result<Self, DemoRequestError> {
		let fields: FormFields = serde_urlencoded::from_str(body)?;

		let kind = match required(fields.kind, "type")?.as_str() {
			"demo" => RequestKind::Demo,
			"call" => RequestKind::Call,
			other => return Err(DemoRequestError::InvalidKind(other.to_string())),
		};
		let name = required(fields.name, "name")?;
		let email = required(fields.email, "email")?;
		if !is_email(&email) {
			return Err(DemoRequestError::InvalidEmail(email));
		}
		let company = required(fields.company, "company")?;
		let date = required(fields.date, "date")?;
		let time = required(fields.time, "time")?;
		let phone = fields
			.phone
			.map(|p| p.trim().to_string())
			.filter(|p| !p.is_empty());

		Ok(Self {
			kind,
			name,
			email,
			phone,
			company,
			date,
			time,
		})
	}
}

/// Response body of the form endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResult {
	/// Whether the request was accepted.
	pub success: bool,
	/// Why it was rejected.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}

impl SubmitResult {
	/// Accepted.
	pub fn ok() -> Self {
		Self {
			success: true,
			error: None,
		}
	}

	/// Rejected with `error`.
	pub fn failed(error: impl Into<String>) -> Self {
		Self {
			success: false,
			error: Some(error.into()),
		}
	}
}

/// Handle a submitted form body.
pub fn submit_demo_request(body: &str) -> SubmitResult {
	match DemoRequest::from_form(body) {
		Ok(request) => {
			tracing::info!(
				kind = %request.kind,
				name = %request.name,
				email = %request.email,
				phone = ?request.phone,
				company = %request.company,
				date = %request.date,
				time = %request.time,
				"demo request received"
			);
			SubmitResult::ok()
		}
		Err(error) => {
			tracing::warn!(error = %error, "demo request rejected");
			SubmitResult::failed(error.to_string())
		}
	}
}
