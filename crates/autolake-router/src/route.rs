//! The closed route set and its URL mapping.
//!
//! Every [`Route`] has exactly one canonical path ([`path_for_route`]), and
//! every path in that table resolves back to its route ([`route_for_path`]).
//! Matching is exact string equality: no prefixes, parameters or trailing-slash
//! folding. Anything else resolves to [`Route::DEFAULT`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RouterError;

/// A logical page of the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Route {
	/// `/`
	Home,
	/// `/pricing`
	Pricing,
	/// `/services/ingestion`
	ServicesIngestion,
	/// `/services/curation`
	ServicesCuration,
	/// `/services/distribution`
	ServicesDistribution,
	/// `/industries`
	Industries,
	/// `/architecture`
	Architecture,
	/// `/about-us`
	AboutUs,
}

impl Route {
	/// Route used for every unrecognized path.
	pub const DEFAULT: Route = Route::Home;

	/// Every route, in navigation order.
	pub const ALL: [Route; 8] = [
		Route::Home,
		Route::Pricing,
		Route::ServicesIngestion,
		Route::ServicesCuration,
		Route::ServicesDistribution,
		Route::Industries,
		Route::Architecture,
		Route::AboutUs,
	];

	/// Canonical URL path.
	pub const fn path(self) -> &'static str {
		match self {
			Route::Home => "/",
			Route::Pricing => "/pricing",
			Route::ServicesIngestion => "/services/ingestion",
			Route::ServicesCuration => "/services/curation",
			Route::ServicesDistribution => "/services/distribution",
			Route::Industries => "/industries",
			Route::Architecture => "/architecture",
			Route::AboutUs => "/about-us",
		}
	}

	/// Stable identifier, e.g. `services-ingestion`.
	pub const fn id(self) -> &'static str {
		match self {
			Route::Home => "home",
			Route::Pricing => "pricing",
			Route::ServicesIngestion => "services-ingestion",
			Route::ServicesCuration => "services-curation",
			Route::ServicesDistribution => "services-distribution",
			Route::Industries => "industries",
			Route::Architecture => "architecture",
			Route::AboutUs => "about-us",
		}
	}

	/// Label used in navigation chrome.
	pub const fn label(self) -> &'static str {
		match self {
			Route::Home => "Home",
			Route::Pricing => "Pricing",
			Route::ServicesIngestion => "Ingestion",
			Route::ServicesCuration => "Curation",
			Route::ServicesDistribution => "Distribution",
			Route::Industries => "Industries",
			Route::Architecture => "Architecture",
			Route::AboutUs => "About us",
		}
	}

	/// Document title for the page.
	pub const fn title(self) -> &'static str {
		match self {
			Route::Home => "AutoLake | The automated data lake",
			Route::Pricing => "Pricing | AutoLake",
			Route::ServicesIngestion => "Data Ingestion | AutoLake",
			Route::ServicesCuration => "Data Curation | AutoLake",
			Route::ServicesDistribution => "Data Distribution | AutoLake",
			Route::Industries => "Industries | AutoLake",
			Route::Architecture => "Architecture | AutoLake",
			Route::AboutUs => "About Us | AutoLake",
		}
	}

	/// Whether the route is one of the `/services/*` pages.
	pub const fn is_service(self) -> bool {
		matches!(
			self,
			Route::ServicesIngestion | Route::ServicesCuration | Route::ServicesDistribution
		)
	}
}

impl Default for Route {
	fn default() -> Self {
		Route::DEFAULT
	}
}

impl fmt::Display for Route {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.id())
	}
}

impl FromStr for Route {
	type Err = RouterError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Route::ALL
			.into_iter()
			.find(|route| route.id() == s)
			.ok_or_else(|| RouterError::UnknownRoute(s.to_string()))
	}
}

/// Resolve a URL path to its route, falling back to [`Route::DEFAULT`].
pub fn route_for_path(path: &str) -> Route {
	lookup(path).unwrap_or(Route::DEFAULT)
}

/// Canonical URL path of a route.
pub const fn path_for_route(route: Route) -> &'static str {
	route.path()
}

/// Whether `path` is exactly one of the canonical paths.
pub fn recognizes(path: &str) -> bool {
	lookup(path).is_some()
}

fn lookup(path: &str) -> Option<Route> {
	Route::ALL.into_iter().find(|route| route.path() == path)
}
