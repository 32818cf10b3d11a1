//! The application shell.
//!
//! [`SpaApp`] wires the router, the view resolver and the navigation chrome
//! together. Natively it renders to a string (tests, pre-rendering); in the
//! browser [`SpaApp::mount`] keeps an element in sync with the current route
//! and intercepts `data-link` clicks.

use std::rc::Rc;

use autolake_reactive::Effect;
use autolake_router::{History, Route, Router, RouterProvider, recognizes, route_for_path, use_router};

use crate::components::NavBar;
use crate::data::InitialData;
use crate::resolver::{BundledPages, PageLoader, Spawner, ViewResolver};
use crate::settings::SiteSettings;
use crate::view::{Component, ElementView, IntoView, View};

/// Id of the `<main>` element pages render into.
pub const OUTLET_ID: &str = "outlet";

/// Router, resolver and chrome for one page session.
#[derive(Debug)]
pub struct SpaApp {
	router: Router,
	resolver: ViewResolver,
	settings: SiteSettings,
	_retry_on_enter: Effect,
}

impl SpaApp {
	/// Build the shell over `history`. The initial route is resolved here.
	pub fn new(
		history: Rc<dyn History>,
		spawner: Rc<dyn Spawner>,
		settings: SiteSettings,
		data: InitialData,
	) -> Self {
		Self::with_loader(history, Rc::new(BundledPages), spawner, settings, data)
	}

	/// Like [`new`](Self::new), loading pages through `loader`.
	pub fn with_loader(
		history: Rc<dyn History>,
		loader: Rc<dyn PageLoader>,
		spawner: Rc<dyn Spawner>,
		settings: SiteSettings,
		data: InitialData,
	) -> Self {
		let router = Router::new(history, settings.router);
		let resolver = ViewResolver::new(loader, spawner, Rc::new(data));
		// A page that failed to load is loaded again when its route is entered.
		let retry_on_enter = Effect::new({
			let router = router.clone();
			let resolver = resolver.clone();
			move || resolver.retry(router.current_route())
		});
		tracing::info!(
			route = %router.current_route_untracked(),
			unknown_paths = ?settings.router.unknown_paths,
			"application shell created"
		);
		Self {
			router,
			resolver,
			settings,
			_retry_on_enter: retry_on_enter,
		}
	}

	/// Like [`new`](Self::new), reading initial data from `settings.data`.
	#[cfg(not(target_arch = "wasm32"))]
	pub fn from_settings(
		history: Rc<dyn History>,
		spawner: Rc<dyn Spawner>,
		settings: SiteSettings,
	) -> Result<Self, crate::data::DataError> {
		let data = match &settings.data.pricing {
			Some(path) => InitialData::load(path)?,
			None => InitialData::default(),
		};
		Ok(Self::new(history, spawner, settings, data))
	}

	/// The router.
	pub fn router(&self) -> &Router {
		&self.router
	}

	/// The view resolver.
	pub fn resolver(&self) -> &ViewResolver {
		&self.resolver
	}

	/// Settings the shell was built with.
	pub fn settings(&self) -> &SiteSettings {
		&self.settings
	}

	/// Document title for the current route.
	pub fn title(&self) -> &'static str {
		self.router.current_route_untracked().title()
	}

	/// Render the shell with the router provided to everything inside it.
	///
	/// Reads the current route and the resolver revision, so an effect
	/// calling this re-runs on navigation and when a page finishes loading.
	pub fn render(&self) -> View {
		RouterProvider::new(self.router.clone()).scope(|| self.shell())
	}

	/// HTML of [`render`](Self::render).
	pub fn render_to_string(&self) -> String {
		self.render().render_to_string()
	}

	/// Navigate for a clicked `href`. Returns `false` for paths the router
	/// does not own, which are left to the browser.
	pub fn handle_link(&self, href: &str) -> bool {
		if !recognizes(href) {
			return false;
		}
		self.router.navigate_to(route_for_path(href));
		true
	}

	fn shell(&self) -> View {
		let route: Route = use_router().current_route();
		ElementView::new("div")
			.class("app")
			.child(NavBar::new(route).render())
			.child(
				ElementView::new("main")
					.attr("id", OUTLET_ID)
					.attr("data-route", route.id())
					.child(self.resolver.render(route)),
			)
			.into_view()
	}
}

#[cfg(target_arch = "wasm32")]
mod browser {
	use std::rc::Rc;

	use autolake_reactive::{Effect, set_scheduler};
	use wasm_bindgen::JsCast;
	use wasm_bindgen::prelude::*;
	use web_sys::{Element, Event, MouseEvent};

	use super::SpaApp;
	use crate::data::InitialData;
	use crate::logging::init_logging;
	use crate::resolver::WasmSpawner;
	use crate::settings::SiteSettings;

	/// Keeps a mounted shell alive. Dropping it stops re-rendering and
	/// removes the click handler.
	pub struct MountHandle {
		_effect: Effect,
		document: web_sys::Document,
		on_click: Closure<dyn Fn(Event)>,
	}

	impl Drop for MountHandle {
		fn drop(&mut self) {
			let _ = self
				.document
				.remove_event_listener_with_callback("click", self.on_click.as_ref().unchecked_ref());
		}
	}

	fn is_plain_left_click(event: &Event) -> bool {
		match event.dyn_ref::<MouseEvent>() {
			Some(mouse) => {
				mouse.button() == 0
					&& !mouse.ctrl_key()
					&& !mouse.meta_key()
					&& !mouse.shift_key()
					&& !mouse.alt_key()
			}
			None => true,
		}
	}

	impl SpaApp {
		/// Render into the element with id `element_id` and keep it current.
		pub fn mount(self: Rc<Self>, element_id: &str) -> Result<MountHandle, JsValue> {
			let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window object"))?;
			let document = window
				.document()
				.ok_or_else(|| JsValue::from_str("No document object"))?;
			let root = document
				.get_element_by_id(element_id)
				.ok_or_else(|| JsValue::from_str(&format!("No #{element_id} element found")))?;

			set_scheduler(|task| wasm_bindgen_futures::spawn_local(async move { task() }));

			// render_to_string() escapes all text and attribute values.
			let effect = Effect::new({
				let app = Rc::clone(&self);
				let document = document.clone();
				move || {
					root.set_inner_html(&app.render_to_string());
					document.set_title(app.title());
				}
			});

			let on_click = Closure::<dyn Fn(Event)>::new({
				let app = Rc::clone(&self);
				move |event: Event| {
					if event.default_prevented() || !is_plain_left_click(&event) {
						return;
					}
					let anchor = event
						.target()
						.and_then(|target| target.dyn_into::<Element>().ok())
						.and_then(|element| element.closest("a[data-link]").ok().flatten());
					if let Some(href) = anchor.and_then(|a| a.get_attribute("href"))
						&& app.handle_link(&href)
					{
						event.prevent_default();
					}
				}
			});
			document.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;

			tracing::info!(element_id, route = %self.router.current_route_untracked(), "application mounted");
			Ok(MountHandle {
				_effect: effect,
				document,
				on_click,
			})
		}
	}

	fn to_js(error: impl std::fmt::Display) -> JsValue {
		JsValue::from_str(&error.to_string())
	}

	/// Boot the site into `element_id`.
	///
	/// `settings_toml` and `initial_data_json` are usually embedded in the
	/// host page; the built-in defaults apply when absent.
	#[wasm_bindgen]
	pub fn boot(
		element_id: &str,
		settings_toml: Option<String>,
		initial_data_json: Option<String>,
	) -> Result<(), JsValue> {
		#[cfg(feature = "console_error_panic_hook")]
		console_error_panic_hook::set_once();

		let settings = match settings_toml {
			Some(toml) => SiteSettings::from_toml_str(&toml).map_err(to_js)?,
			None => SiteSettings::default(),
		};
		init_logging(&settings.logging).map_err(to_js)?;
		let data = match initial_data_json {
			Some(json) => InitialData::from_json(&json).map_err(to_js)?,
			None => InitialData::default(),
		};

		let history = autolake_router::BrowserHistory::new().map_err(to_js)?;
		let app = Rc::new(SpaApp::new(
			Rc::new(history),
			Rc::new(WasmSpawner),
			settings,
			data,
		));
		let handle = app.mount(element_id)?;
		// The shell lives as long as the page.
		std::mem::forget(handle);
		Ok(())
	}
}

#[cfg(target_arch = "wasm32")]
pub use browser::{MountHandle, boot};
