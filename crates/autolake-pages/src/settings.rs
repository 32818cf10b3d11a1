//! Site settings.
//!
//! Settings come from TOML (embedded in the page or read from a file when
//! rendering natively) and may be overridden from the environment:
//!
//! ```toml
//! [router]
//! unknown_paths = "normalize"   # or "keep"
//!
//! [logging]
//! level = "info,autolake_router=debug"
//!
//! [data]
//! pricing = "data/initial.json"
//! ```

use std::path::PathBuf;

use autolake_router::{RouterOptions, UnknownPathPolicy};
use serde::{Deserialize, Serialize};

/// Errors raised while loading settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	/// The settings file could not be read.
	#[error("File error: {0}")]
	FileError(String),
	/// The document is not valid TOML or has the wrong shape.
	#[error("Parse error: {0}")]
	ParseError(String),
	/// A value is out of range.
	#[error("Validation error: {0}")]
	ValidationError(String),
}

/// All site settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
	/// Router behavior.
	pub router: RouterOptions,
	/// Log output.
	pub logging: LoggingSettings,
	/// Initial-data sources.
	pub data: DataSettings,
}

/// `[logging]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
	/// `EnvFilter` directive, e.g. `info` or `warn,autolake_router=debug`.
	pub level: String,
}

impl Default for LoggingSettings {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
		}
	}
}

/// `[data]`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
	/// JSON file with the initial-data bag. Built-in data when unset.
	pub pricing: Option<PathBuf>,
}

impl SiteSettings {
	/// Parse and validate a TOML document.
	pub fn from_toml_str(toml: &str) -> Result<Self, SettingsError> {
		let settings: SiteSettings = toml::from_str(toml)
			.map_err(|e| SettingsError::ParseError(format!("TOML parse error: {}", e)))?;
		settings.validate()?;
		Ok(settings)
	}

	/// Read, parse and validate a TOML file.
	#[cfg(not(target_arch = "wasm32"))]
	pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
		let path = path.into();
		let contents = std::fs::read_to_string(&path).map_err(|e| {
			SettingsError::FileError(format!("Failed to read {}: {}", path.display(), e))
		})?;
		Self::from_toml_str(&contents)
	}

	/// Apply `AUTOLAKE_LOG` and `AUTOLAKE_UNKNOWN_PATHS` overrides.
	#[cfg(not(target_arch = "wasm32"))]
	pub fn with_env_overrides(self) -> Result<Self, SettingsError> {
		self.with_overrides(|key| std::env::var(key).ok())
	}

	/// Apply overrides from `lookup`, keyed like the environment variables.
	pub fn with_overrides(
		mut self,
		lookup: impl Fn(&str) -> Option<String>,
	) -> Result<Self, SettingsError> {
		if let Some(level) = lookup("AUTOLAKE_LOG") {
			self.logging.level = level;
		}
		if let Some(policy) = lookup("AUTOLAKE_UNKNOWN_PATHS") {
			self.router.unknown_paths = match policy.trim().to_lowercase().as_str() {
				"normalize" => UnknownPathPolicy::Normalize,
				"keep" => UnknownPathPolicy::Keep,
				other => {
					return Err(SettingsError::ValidationError(format!(
						"AUTOLAKE_UNKNOWN_PATHS must be \"normalize\" or \"keep\", got \"{}\"",
						other
					)));
				}
			};
		}
		self.validate()?;
		Ok(self)
	}

	/// Check values that deserialize but are unusable.
	pub fn validate(&self) -> Result<(), SettingsError> {
		if self.logging.level.trim().is_empty() {
			return Err(SettingsError::ValidationError(
				"logging.level must not be empty".to_string(),
			));
		}
		tracing_subscriber::EnvFilter::try_new(&self.logging.level).map_err(|e| {
			SettingsError::ValidationError(format!(
				"logging.level \"{}\" is not a valid filter: {}",
				self.logging.level, e
			))
		})?;
		Ok(())
	}
}
