//! Route state store.
//!
//! [`RouteStore`] owns the one mutable cell holding the current [`Route`]
//! and the [`History`] it mirrors. The cell is written only by
//! [`RouteStore::try_navigate_to`] and by the history bridge, through
//! crate-private methods; everything else reads it.

use std::fmt;
use std::rc::Rc;

use autolake_reactive::Signal;

use crate::error::RouterError;
use crate::history::History;
use crate::options::{RouterOptions, UnknownPathPolicy};
use crate::route::{Route, path_for_route, recognizes, route_for_path};

/// Reactive holder of the current route.
pub struct RouteStore {
	current: Signal<Route>,
	location: Signal<String>,
	history: Rc<dyn History>,
	options: RouterOptions,
}

impl RouteStore {
	/// Initialize from the history's current path.
	///
	/// The initial route is resolved before this returns, so the first render
	/// already shows the right page. An unknown path is rewritten to `/` when
	/// the policy is [`UnknownPathPolicy::Normalize`].
	pub fn new(history: Rc<dyn History>, options: RouterOptions) -> Self {
		let path = history.current_path();
		let route = route_for_path(&path);
		let location = normalize_location(history.as_ref(), options, path);
		tracing::debug!(route = %route, path = %location, "route store initialized");

		Self {
			current: Signal::new(route),
			location: Signal::new(location),
			history,
			options,
		}
	}

	/// Current route, tracked by the running effect.
	pub fn current_route(&self) -> Route {
		self.current.get()
	}

	/// Current route without dependency tracking.
	pub fn current_route_untracked(&self) -> Route {
		self.current.get_untracked()
	}

	/// Last URL path the store observed or wrote.
	pub fn location(&self) -> String {
		self.location.get_untracked()
	}

	/// The history this store mirrors.
	pub fn history(&self) -> Rc<dyn History> {
		Rc::clone(&self.history)
	}

	/// Options the store was built with.
	pub fn options(&self) -> RouterOptions {
		self.options
	}

	/// Navigate to `route`, logging instead of returning failures.
	pub fn navigate_to(&self, route: Route) {
		if let Err(error) = self.try_navigate_to(route) {
			tracing::warn!(route = %route, error = %error, "navigation failed");
		}
	}

	/// Navigate to `route`.
	///
	/// Returns `Ok(false)` without touching history or state when `route` is
	/// already current. Otherwise pushes a history entry, updates the route,
	/// resets the scroll position and returns `Ok(true)`. If the push fails
	/// nothing else changes.
	pub fn try_navigate_to(&self, route: Route) -> Result<bool, RouterError> {
		if self.current.get_untracked() == route {
			tracing::trace!(route = %route, "already current");
			return Ok(false);
		}

		let path = path_for_route(route);
		self.history.push(path)?;
		self.current.set(route);
		// Confirm the URL after the route so the bridge finds nothing to do.
		self.location.set(path.to_string());
		self.history.scroll_to_top();

		tracing::debug!(route = %route, path, "navigated");
		Ok(true)
	}

	pub(crate) fn location_signal(&self) -> Signal<String> {
		self.location.clone()
	}

	/// Record a path the browser moved to on its own.
	pub(crate) fn observe_location(&self, path: String) {
		let path = normalize_location(self.history.as_ref(), self.options, path);
		self.location.set(path);
	}

	/// Align the route with `path`. Returns whether the route changed.
	pub(crate) fn sync_from_location(&self, path: &str) -> bool {
		let route = route_for_path(path);
		if self.current.get_untracked() == route {
			return false;
		}
		tracing::debug!(route = %route, path, "route synced from location");
		self.current.set(route);
		true
	}
}

fn normalize_location(history: &dyn History, options: RouterOptions, path: String) -> String {
	if options.unknown_paths == UnknownPathPolicy::Keep || recognizes(&path) {
		return path;
	}

	let canonical = path_for_route(Route::DEFAULT);
	match history.replace(canonical) {
		Ok(()) => {
			tracing::debug!(path = %path, "unknown path normalized");
			canonical.to_string()
		}
		Err(error) => {
			tracing::warn!(path = %path, error = %error, "failed to normalize unknown path");
			path
		}
	}
}

impl fmt::Debug for RouteStore {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RouteStore")
			.field("current", &self.current.get_untracked())
			.field("location", &self.location.get_untracked())
			.field("options", &self.options)
			.finish()
	}
}
