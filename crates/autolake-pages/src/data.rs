//! Initial-data bag supplied once at boot.
//!
//! Only the pricing page reads it. The bag can be embedded in the host page
//! as JSON (see [`InitialData::from_json`]); [`InitialData::default`] carries
//! the built-in plan list.

use serde::{Deserialize, Serialize};

/// Errors raised while reading initial data.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
	/// The JSON document is malformed or has the wrong shape.
	#[error("Invalid initial data: {0}")]
	Json(#[from] serde_json::Error),
	/// The data file could not be read.
	#[error("Failed to read initial data from {path}: {source}")]
	Io {
		/// File that was read.
		path: String,
		/// Underlying error.
		source: std::io::Error,
	},
	/// A comparison row does not have one cell per plan.
	#[error("Invalid initial data: comparison row \"{feature}\" has {found} values for {expected} plans")]
	RaggedComparison {
		/// Feature name of the row.
		feature: String,
		/// Cells in the row.
		found: usize,
		/// Number of plans.
		expected: usize,
	},
}

/// Everything pages receive besides the route.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialData {
	/// Plans and the comparison table for `/pricing`.
	pub pricing: PricingData,
}

impl InitialData {
	/// Parse and validate a JSON document. Missing sections fall back to the
	/// built-in data.
	pub fn from_json(json: &str) -> Result<Self, DataError> {
		let data: InitialData = serde_json::from_str(json)?;
		data.pricing.validate()?;
		Ok(data)
	}

	/// Read a JSON file.
	#[cfg(not(target_arch = "wasm32"))]
	pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, DataError> {
		let path = path.as_ref();
		let json = std::fs::read_to_string(path).map_err(|source| DataError::Io {
			path: path.display().to_string(),
			source,
		})?;
		Self::from_json(&json)
	}
}

/// Pricing plans and feature comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingData {
	/// Plans in display order.
	pub plans: Vec<PricingPlan>,
	/// Comparison rows; each row has one cell per plan.
	#[serde(default)]
	pub comparison: Vec<FeatureRow>,
}

/// One plan card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingPlan {
	/// Stable identifier.
	pub id: String,
	/// Display name.
	pub name: String,
	/// Price as displayed, e.g. `$2,500`.
	pub price: String,
	/// Billing period, e.g. `/month`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub period: Option<String>,
	/// One-line pitch.
	pub description: String,
	/// Bullet points.
	#[serde(default)]
	pub features: Vec<String>,
	/// Whether the card is emphasized.
	#[serde(default)]
	pub highlighted: bool,
}

/// A row of the comparison table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
	/// Feature name.
	pub feature: String,
	/// One cell per plan.
	pub values: Vec<FeatureValue>,
}

/// A comparison cell: a check mark or free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
	/// Included or not.
	Included(bool),
	/// Limit or note, e.g. `10 TB`.
	Text(String),
}

impl PricingData {
	/// Check that every comparison row has one cell per plan.
	pub fn validate(&self) -> Result<(), DataError> {
		let expected = self.plans.len();
		match self.comparison.iter().find(|row| row.values.len() != expected) {
			Some(row) => Err(DataError::RaggedComparison {
				feature: row.feature.clone(),
				found: row.values.len(),
				expected,
			}),
			None => Ok(()),
		}
	}
}

impl Default for PricingData {
	fn default() -> Self {
		let plan = |id: &str, name: &str, price: &str, description: &str, features: &[&str]| {
			PricingPlan {
				id: id.to_string(),
				name: name.to_string(),
				price: price.to_string(),
				period: Some("/month".to_string()),
				description: description.to_string(),
				features: features.iter().map(|f| f.to_string()).collect(),
				highlighted: false,
			}
		};
		let row = |feature: &str, values: [FeatureValue; 3]| FeatureRow {
			feature: feature.to_string(),
			values: values.to_vec(),
		};
		let text = |s: &str| FeatureValue::Text(s.to_string());

		let mut growth = plan(
			"growth",
			"Growth",
			"$4,900",
			"Automated curation for scaling data teams.",
			&[
				"Unlimited sources",
				"Automated curation",
				"Data quality monitoring",
			],
		);
		growth.highlighted = true;

		let mut enterprise = plan(
			"enterprise",
			"Enterprise",
			"Custom",
			"Dedicated infrastructure and support.",
			&["Private deployment", "SLA-backed support", "Custom connectors"],
		);
		enterprise.period = None;

		Self {
			plans: vec![
				plan(
					"starter",
					"Starter",
					"$1,500",
					"Managed ingestion for a single team.",
					&["Up to 10 sources", "Daily syncs", "Email support"],
				),
				growth,
				enterprise,
			],
			comparison: vec![
				row("Storage", [text("5 TB"), text("50 TB"), text("Unlimited")]),
				row(
					"Ingestion",
					[
						FeatureValue::Included(true),
						FeatureValue::Included(true),
						FeatureValue::Included(true),
					],
				),
				row(
					"Curation",
					[
						FeatureValue::Included(false),
						FeatureValue::Included(true),
						FeatureValue::Included(true),
					],
				),
				row(
					"Distribution APIs",
					[
						FeatureValue::Included(false),
						FeatureValue::Included(false),
						FeatureValue::Included(true),
					],
				),
			],
		}
	}
}
