//! Router handle and provider.
//!
//! [`Router`] bundles a [`RouteStore`] with its [`HistoryBridge`] and is what
//! the rest of the application sees. It is handed down through
//! [`RouterProvider`]; components fetch it with [`use_router`].

use std::fmt;
use std::rc::Rc;

use autolake_reactive::{ContextGuard, provide_context, use_context};

use crate::bridge::HistoryBridge;
use crate::error::RouterError;
use crate::history::{History, MemoryHistory};
use crate::options::RouterOptions;
use crate::route::Route;
use crate::store::RouteStore;

struct RouterInner {
	store: Rc<RouteStore>,
	_bridge: HistoryBridge,
}

/// Shared router handle. Clones refer to the same router.
#[derive(Clone)]
pub struct Router {
	inner: Rc<RouterInner>,
}

impl Router {
	/// Build a router over `history`, resolving the initial route immediately.
	pub fn new(history: Rc<dyn History>, options: RouterOptions) -> Self {
		let store = Rc::new(RouteStore::new(history, options));
		let bridge = HistoryBridge::attach(&store);
		Self {
			inner: Rc::new(RouterInner {
				store,
				_bridge: bridge,
			}),
		}
	}

	/// Router over an in-memory history starting at `path`.
	pub fn in_memory(path: &str, options: RouterOptions) -> (Self, MemoryHistory) {
		let history = MemoryHistory::new(path);
		(Self::new(Rc::new(history.clone()), options), history)
	}

	/// Router over `window.history`.
	#[cfg(target_arch = "wasm32")]
	pub fn browser(options: RouterOptions) -> Result<Self, RouterError> {
		let history = crate::browser::BrowserHistory::new()?;
		Ok(Self::new(Rc::new(history), options))
	}

	/// Current route, tracked by the running effect.
	pub fn current_route(&self) -> Route {
		self.inner.store.current_route()
	}

	/// Current route without dependency tracking.
	pub fn current_route_untracked(&self) -> Route {
		self.inner.store.current_route_untracked()
	}

	/// Navigate to `route`. Failures are logged.
	pub fn navigate_to(&self, route: Route) {
		self.inner.store.navigate_to(route);
	}

	/// Navigate to `route`, reporting whether anything changed.
	pub fn try_navigate_to(&self, route: Route) -> Result<bool, RouterError> {
		self.inner.store.try_navigate_to(route)
	}

	/// The history this router drives.
	pub fn history(&self) -> Rc<dyn History> {
		self.inner.store.history()
	}

	/// Whether two handles refer to the same router.
	pub fn ptr_eq(&self, other: &Router) -> bool {
		Rc::ptr_eq(&self.inner, &other.inner)
	}
}

impl fmt::Debug for Router {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Router")
			.field("store", &self.inner.store)
			.finish()
	}
}

/// Makes a [`Router`] available to [`use_router`].
#[derive(Debug, Clone)]
pub struct RouterProvider {
	router: Router,
}

impl RouterProvider {
	/// Wrap `router`.
	pub fn new(router: Router) -> Self {
		Self { router }
	}

	/// Provide the router until the returned guard is dropped.
	pub fn provide(&self) -> ContextGuard<Router> {
		provide_context(self.router.clone())
	}

	/// Run `f` with the router provided.
	pub fn scope<R>(&self, f: impl FnOnce() -> R) -> R {
		let _guard = self.provide();
		f()
	}

	/// The wrapped router.
	pub fn router(&self) -> &Router {
		&self.router
	}
}

/// The router of the enclosing [`RouterProvider`].
///
/// # Panics
///
/// Panics when called outside a provider. That is a wiring bug, not a
/// runtime condition; use [`try_use_router`] to check first.
#[track_caller]
pub fn use_router() -> Router {
	match try_use_router() {
		Some(router) => router,
		None => panic!(
			"use_router() called outside of a RouterProvider; wrap the application in RouterProvider::provide() or RouterProvider::scope()"
		),
	}
}

/// The router of the enclosing [`RouterProvider`], if any.
pub fn try_use_router() -> Option<Router> {
	use_context::<Router>()
}
