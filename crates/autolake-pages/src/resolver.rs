//! Lazy route → page resolution.
//!
//! [`ViewResolver::render`] returns the page for a route once its module is
//! loaded and a loading indicator until then. Loads go through a
//! [`PageLoader`] on a [`Spawner`]; each route is loaded at most once and
//! kept for the rest of the session. When a load finishes the resolver bumps
//! its [`revision`](ViewResolver::revision) signal so the shell re-renders.
//!
//! A failed load renders an error view with a way home until the route is
//! loaded again through [`retry`](ViewResolver::retry) or
//! [`preload`](ViewResolver::preload). Rendering never changes load state
//! except to start the first load of a route.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::rc::Rc;

use autolake_reactive::Signal;
use autolake_router::Route;
use futures::future::{self, LocalBoxFuture};

use crate::components::Link;
use crate::data::InitialData;
use crate::view::{ElementView, IntoView, View};

/// A page rendered for one route.
pub trait PageComponent {
	/// Build the page.
	fn render(&self, data: &InitialData) -> View;

	/// Name used in logs.
	fn name(&self) -> &'static str;
}

/// Error raised when a page module cannot be loaded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
	/// The loader reported a failure (network error, missing chunk, ...).
	#[error("Failed to load page for {route}: {reason}")]
	Failed {
		/// Route whose page was requested.
		route: Route,
		/// Loader-specific description.
		reason: String,
	},
}

/// Future yielded by a [`PageLoader`].
pub type PageFuture = LocalBoxFuture<'static, Result<Rc<dyn PageComponent>, LoadError>>;

/// Loads page modules.
pub trait PageLoader {
	/// Start loading the page for `route`.
	fn load(&self, route: Route) -> PageFuture;
}

/// Pages compiled into the binary, handed out asynchronously.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledPages;

impl PageLoader for BundledPages {
	fn load(&self, route: Route) -> PageFuture {
		let page: Result<Rc<dyn PageComponent>, LoadError> = Ok(crate::pages::page_for(route));
		Box::pin(future::ready(page))
	}
}

/// Runs `!Send` futures on the UI thread.
pub trait Spawner {
	/// Run `future` to completion on the current thread.
	fn spawn_local(&self, future: LocalBoxFuture<'static, ()>);
}

impl Spawner for futures::executor::LocalSpawner {
	fn spawn_local(&self, future: LocalBoxFuture<'static, ()>) {
		if let Err(error) = futures::task::LocalSpawnExt::spawn_local(self, future) {
			tracing::error!(error = %error, "failed to spawn page load");
		}
	}
}

/// Spawns onto the browser's micro-task queue.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct WasmSpawner;

#[cfg(target_arch = "wasm32")]
impl Spawner for WasmSpawner {
	fn spawn_local(&self, future: LocalBoxFuture<'static, ()>) {
		wasm_bindgen_futures::spawn_local(future);
	}
}

/// Load progress of one route's page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
	/// Never requested.
	NotLoaded,
	/// Load in flight.
	Loading,
	/// Loaded and cached.
	Ready,
	/// Last load failed; shown until retried.
	Failed,
}

#[derive(Default)]
struct ResolverState {
	cache: HashMap<Route, Rc<dyn PageComponent>>,
	pending: HashSet<Route>,
	failed: HashMap<Route, LoadError>,
}

/// Resolves routes to page views, loading page modules on first use.
#[derive(Clone)]
pub struct ViewResolver {
	loader: Rc<dyn PageLoader>,
	spawner: Rc<dyn Spawner>,
	data: Rc<InitialData>,
	state: Rc<RefCell<ResolverState>>,
	revision: Signal<u64>,
}

impl ViewResolver {
	/// Resolver using `loader` on `spawner`.
	pub fn new(
		loader: Rc<dyn PageLoader>,
		spawner: Rc<dyn Spawner>,
		data: Rc<InitialData>,
	) -> Self {
		Self {
			loader,
			spawner,
			data,
			state: Rc::new(RefCell::new(ResolverState::default())),
			revision: Signal::new(0),
		}
	}

	/// Resolver over the bundled pages.
	pub fn bundled(spawner: Rc<dyn Spawner>, data: Rc<InitialData>) -> Self {
		Self::new(Rc::new(BundledPages), spawner, data)
	}

	/// View for `route`: the page, the loading indicator or the error view.
	///
	/// Reads [`revision`](Self::revision), so an effect rendering through
	/// this re-runs when a load completes.
	pub fn render(&self, route: Route) -> View {
		self.revision.get();

		if let Some(page) = self.cached(route) {
			return page.render(&self.data);
		}

		let failure = self.state.borrow().failed.get(&route).cloned();
		if let Some(error) = failure {
			return error_view(&error);
		}

		self.start_load(route);
		// A spawner may complete the load before returning.
		match self.cached(route) {
			Some(page) => page.render(&self.data),
			None => loading_view(route),
		}
	}

	/// Start loading `route` without rendering it. A failed route is retried.
	pub fn preload(&self, route: Route) {
		match self.load_state(route) {
			LoadState::NotLoaded => self.start_load(route),
			LoadState::Failed => self.retry(route),
			LoadState::Loading | LoadState::Ready => {}
		}
	}

	/// Forget a failed load of `route` and load it again. Does nothing unless
	/// the last load failed.
	pub fn retry(&self, route: Route) {
		if self.state.borrow_mut().failed.remove(&route).is_none() {
			return;
		}
		tracing::debug!(route = %route, "retrying page load");
		self.start_load(route);
		self.revision.update(|n| *n += 1);
	}

	/// Load progress for `route`.
	pub fn load_state(&self, route: Route) -> LoadState {
		let state = self.state.borrow();
		if state.cache.contains_key(&route) {
			LoadState::Ready
		} else if state.pending.contains(&route) {
			LoadState::Loading
		} else if state.failed.contains_key(&route) {
			LoadState::Failed
		} else {
			LoadState::NotLoaded
		}
	}

	/// Counter bumped whenever a load finishes.
	pub fn revision(&self) -> Signal<u64> {
		self.revision.clone()
	}

	/// The initial-data bag handed to pages.
	pub fn data(&self) -> &InitialData {
		&self.data
	}

	fn cached(&self, route: Route) -> Option<Rc<dyn PageComponent>> {
		self.state.borrow().cache.get(&route).cloned()
	}

	fn start_load(&self, route: Route) {
		if !self.state.borrow_mut().pending.insert(route) {
			return;
		}
		tracing::debug!(route = %route, "loading page");

		let load = self.loader.load(route);
		let state = Rc::clone(&self.state);
		let revision = self.revision.clone();
		self.spawner.spawn_local(Box::pin(async move {
			let result = load.await;
			{
				let mut state = state.borrow_mut();
				state.pending.remove(&route);
				match result {
					Ok(page) => {
						tracing::debug!(route = %route, page = page.name(), "page loaded");
						state.cache.insert(route, page);
					}
					Err(error) => {
						tracing::error!(route = %route, error = %error, "page failed to load");
						state.failed.insert(route, error);
					}
				}
			}
			revision.update(|n| *n += 1);
		}));
	}
}

impl fmt::Debug for ViewResolver {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let state = self.state.borrow();
		f.debug_struct("ViewResolver")
			.field("ready", &state.cache.keys().collect::<Vec<_>>())
			.field("pending", &state.pending)
			.field("failed", &state.failed.keys().collect::<Vec<_>>())
			.field("revision", &self.revision.get_untracked())
			.finish()
	}
}

/// Placeholder shown in the outlet while a page loads.
pub fn loading_view(route: Route) -> View {
	ElementView::new("div")
		.class("route-loading")
		.attr("role", "status")
		.attr("aria-busy", "true")
		.attr("data-route", route.id())
		.child(ElementView::new("span").class("route-loading__spinner"))
		.child(
			ElementView::new("span")
				.class("visually-hidden")
				.child("Loading..."),
		)
		.into_view()
}

/// Shown in the outlet when a page could not be loaded.
pub fn error_view(error: &LoadError) -> View {
	let LoadError::Failed { route, .. } = error;
	ElementView::new("section")
		.class("route-error")
		.attr("role", "alert")
		.attr("data-route", route.id())
		.child(ElementView::new("h1").child("Something went wrong"))
		.child(ElementView::new("p").child("This page could not be loaded."))
		.child(
			Link::new(Route::DEFAULT)
				.content("Return home")
				.class("button"),
		)
		.into_view()
}

#[cfg(test)]
mod tests {
	use super::*;
	use futures::executor::LocalPool;
	use rstest::rstest;
	use serial_test::serial;

	fn resolver(pool: &LocalPool) -> ViewResolver {
		ViewResolver::bundled(Rc::new(pool.spawner()), Rc::new(InitialData::default()))
	}

	fn is_loading(view: &View) -> bool {
		view.find(&|el| el.attr_value("aria-busy") == Some("true"))
			.is_some()
	}

	fn is_error(view: &View) -> bool {
		view.find(&|el| el.attr_value("role") == Some("alert"))
			.is_some()
	}

	struct Offline;

	impl PageLoader for Offline {
		fn load(&self, route: Route) -> PageFuture {
			Box::pin(future::ready(Err(LoadError::Failed {
				route,
				reason: "offline".to_string(),
			})))
		}
	}

	#[rstest]
	#[serial(reactive)]
	fn test_first_render_shows_loading_then_page() {
		let mut pool = LocalPool::new();
		let resolver = resolver(&pool);

		let first = resolver.render(Route::Pricing);
		assert!(is_loading(&first));
		assert_eq!(resolver.load_state(Route::Pricing), LoadState::Loading);

		pool.run_until_stalled();

		assert_eq!(resolver.load_state(Route::Pricing), LoadState::Ready);
		assert_eq!(resolver.revision().get_untracked(), 1);
		let second = resolver.render(Route::Pricing);
		assert!(!is_loading(&second));
		assert!(second.render_to_string().contains("data-page=\"pricing\""));
	}

	#[rstest]
	#[serial(reactive)]
	fn test_loading_markup() {
		let html = loading_view(Route::AboutUs).render_to_string();
		assert!(html.starts_with(
			"<div class=\"route-loading\" role=\"status\" aria-busy=\"true\""
		));
	}

	#[rstest]
	#[serial(reactive)]
	fn test_concurrent_renders_start_one_load() {
		let mut pool = LocalPool::new();
		let resolver = resolver(&pool);

		resolver.render(Route::Industries);
		resolver.render(Route::Industries);
		resolver.preload(Route::Industries);
		pool.run_until_stalled();

		assert_eq!(resolver.revision().get_untracked(), 1);
	}

	#[rstest]
	#[serial(reactive)]
	fn test_failed_route_keeps_error_until_retried() {
		let mut pool = LocalPool::new();
		let resolver = ViewResolver::new(
			Rc::new(Offline),
			Rc::new(pool.spawner()),
			Rc::new(InitialData::default()),
		);
		resolver.render(Route::AboutUs);
		pool.run_until_stalled();

		assert!(is_error(&resolver.render(Route::AboutUs)));
		assert!(is_error(&resolver.render(Route::AboutUs)));
		assert_eq!(resolver.load_state(Route::AboutUs), LoadState::Failed);
		assert_eq!(resolver.revision().get_untracked(), 1);

		resolver.retry(Route::AboutUs);

		assert_eq!(resolver.load_state(Route::AboutUs), LoadState::Loading);
		assert!(is_loading(&resolver.render(Route::AboutUs)));
		pool.run_until_stalled();
		assert_eq!(resolver.load_state(Route::AboutUs), LoadState::Failed);
		assert_eq!(resolver.revision().get_untracked(), 3);
	}

	#[rstest]
	#[serial(reactive)]
	fn test_retry_ignores_routes_that_did_not_fail() {
		let mut pool = LocalPool::new();
		let resolver = resolver(&pool);
		resolver.render(Route::Home);
		pool.run_until_stalled();

		resolver.retry(Route::Home);
		resolver.retry(Route::Pricing);
		pool.run_until_stalled();

		assert_eq!(resolver.load_state(Route::Home), LoadState::Ready);
		assert_eq!(resolver.load_state(Route::Pricing), LoadState::NotLoaded);
		assert_eq!(resolver.revision().get_untracked(), 1);
	}

	#[rstest]
	#[serial(reactive)]
	fn test_error_view_links_home() {
		let error = LoadError::Failed {
			route: Route::Architecture,
			reason: "chunk missing".to_string(),
		};

		let view = error_view(&error);

		let html = view.render_to_string();
		assert!(html.contains("role=\"alert\""));
		assert!(html.contains("href=\"/\""));
		assert_eq!(
			error.to_string(),
			"Failed to load page for architecture: chunk missing"
		);
	}
}
