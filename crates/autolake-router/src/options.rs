//! Router configuration.

use serde::{Deserialize, Serialize};

/// What to do with the visible URL when it does not match any route.
///
/// The route always falls back to [`Route::DEFAULT`](crate::Route::DEFAULT);
/// this only decides whether the address bar is rewritten to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownPathPolicy {
	/// Rewrite the URL to `/` with `replaceState` (no new history entry).
	#[default]
	Normalize,
	/// Leave the unknown URL in the address bar.
	Keep,
}

/// Options accepted by [`Router::new`](crate::Router::new).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterOptions {
	/// Unknown-path URL handling at mount and on back/forward.
	pub unknown_paths: UnknownPathPolicy,
}

impl RouterOptions {
	/// Options with the given unknown-path policy.
	pub fn with_unknown_paths(mut self, policy: UnknownPathPolicy) -> Self {
		self.unknown_paths = policy;
		self
	}
}
