//! Error types for client-side routing.

/// Error type for router operations.
///
/// An unrecognized URL path is deliberately *not* represented here: it
/// resolves to [`Route::DEFAULT`](crate::Route::DEFAULT).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouterError {
	/// A route id that is not part of the route set (e.g. from `FromStr`).
	#[error("Unknown route: {0}")]
	UnknownRoute(String),
	/// The history backend rejected a push or replace.
	#[error("Navigation failed: {0}")]
	NavigationFailed(String),
	/// A browser API needed by the router is not available.
	#[error("Browser API unavailable: {0}")]
	Unavailable(&'static str),
}
