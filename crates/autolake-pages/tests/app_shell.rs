//! Application shell scenarios
//!
//! Covers:
//! 1. Navigation re-renders the outlet and the navigation chrome
//! 2. The chrome stays rendered while a page loads
//! 3. Back/forward through the shell
//! 4. Links outside the route set are left to the browser
//! 5. A page that failed to load is loaded again when its route is entered

use autolake_pages::{
	BundledPages, InitialData, LoadError, PageFuture, PageLoader, SiteSettings, SpaApp, View,
};
use autolake_reactive::{Effect, with_runtime};
use autolake_router::{History, MemoryHistory, Route, RouterOptions, UnknownPathPolicy};
use futures::executor::LocalPool;
use futures::future;
use rstest::rstest;
use serial_test::serial;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

struct Mounted {
	app: Rc<SpaApp>,
	history: MemoryHistory,
	pool: LocalPool,
	html: Rc<RefCell<View>>,
	_effect: Effect,
}

impl Mounted {
	fn at(path: &str, settings: SiteSettings) -> Self {
		Self::with_loader(path, settings, Rc::new(BundledPages))
	}

	fn with_loader(path: &str, settings: SiteSettings, loader: Rc<dyn PageLoader>) -> Self {
		let pool = LocalPool::new();
		let history = MemoryHistory::new(path);
		let app = Rc::new(SpaApp::with_loader(
			Rc::new(history.clone()),
			loader,
			Rc::new(pool.spawner()),
			settings,
			InitialData::default(),
		));
		let html = Rc::new(RefCell::new(View::Empty));
		let effect = Effect::new({
			let app = Rc::clone(&app);
			let html = Rc::clone(&html);
			move || *html.borrow_mut() = app.render()
		});
		Self {
			app,
			history,
			pool,
			html,
			_effect: effect,
		}
	}

	/// Let pending loads finish and re-render.
	fn settle(&mut self) {
		with_runtime(|rt| rt.flush_updates());
		self.pool.run_until_stalled();
		with_runtime(|rt| rt.flush_updates());
	}

	fn view(&self) -> View {
		self.html.borrow().clone()
	}
}

fn current_nav_link(view: &View) -> Option<&str> {
	view.find(&|el| el.tag_name() == "a" && el.attr_value("aria-current") == Some("page"))
		.and_then(|el| el.attr_value("data-route"))
}

fn outlet_page(view: &View) -> Option<&str> {
	view.find(&|el| el.attr_value("data-page").is_some())
		.and_then(|el| el.attr_value("data-page"))
}

fn is_loading(view: &View) -> bool {
	view.find(&|el| el.attr_value("aria-busy") == Some("true"))
		.is_some()
}

fn is_error(view: &View) -> bool {
	view.find(&|el| el.attr_value("role") == Some("alert"))
		.is_some()
}

/// Bundled pages, except that the first pricing load fails.
#[derive(Default)]
struct FlakyPricing {
	failed: Cell<bool>,
}

impl PageLoader for FlakyPricing {
	fn load(&self, route: Route) -> PageFuture {
		if route == Route::Pricing && !self.failed.replace(true) {
			return Box::pin(future::ready(Err(LoadError::Failed {
				route,
				reason: "chunk missing".to_string(),
			})));
		}
		BundledPages.load(route)
	}
}

// ============================================================================
// Navigation
// ============================================================================

#[rstest]
#[serial(reactive)]
fn test_navigate_to_about_us() {
	let mut shell = Mounted::at("/", SiteSettings::default());
	shell.settle();
	assert_eq!(outlet_page(&shell.view()), Some("home"));

	shell.app.router().navigate_to(Route::AboutUs);
	shell.settle();

	let view = shell.view();
	assert_eq!(shell.history.current_path(), "/about-us");
	assert_eq!(outlet_page(&view), Some("about-us"));
	assert_eq!(current_nav_link(&view), Some("about-us"));
	assert_eq!(shell.app.title(), "About Us | AutoLake");
}

#[rstest]
#[serial(reactive)]
fn test_chrome_stays_while_page_loads() {
	let mut shell = Mounted::at("/", SiteSettings::default());
	shell.settle();

	shell.app.router().navigate_to(Route::Pricing);
	with_runtime(|rt| rt.flush_updates());

	let loading = shell.view();
	assert!(is_loading(&loading));
	assert_eq!(outlet_page(&loading), None);
	assert!(loading.find(&|el| el.tag_name() == "nav").is_some());
	assert_eq!(current_nav_link(&loading), Some("pricing"));

	shell.settle();
	let loaded = shell.view();
	assert!(!is_loading(&loaded));
	assert_eq!(outlet_page(&loaded), Some("pricing"));
}

#[rstest]
#[serial(reactive)]
fn test_back_and_forward_through_shell() {
	let mut shell = Mounted::at("/", SiteSettings::default());
	shell.app.router().navigate_to(Route::ServicesCuration);
	shell.app.router().navigate_to(Route::Industries);
	shell.settle();

	shell.history.back();
	shell.settle();
	assert_eq!(outlet_page(&shell.view()), Some("services-curation"));

	shell.history.back();
	shell.settle();
	assert_eq!(outlet_page(&shell.view()), Some("home"));

	shell.history.forward();
	shell.settle();
	assert_eq!(outlet_page(&shell.view()), Some("services-curation"));
}

// ============================================================================
// Links and unknown paths
// ============================================================================

#[rstest]
#[case("/services/ingestion", Some("services-ingestion"))]
#[case("/careers", Some("home"))]
#[case("mailto:sales@autolake.io", Some("home"))]
#[serial(reactive)]
fn test_link_clicks(#[case] href: &str, #[case] page: Option<&str>) {
	let mut shell = Mounted::at("/", SiteSettings::default());
	shell.settle();

	shell.app.handle_link(href);
	shell.settle();

	assert_eq!(outlet_page(&shell.view()), page);
}

#[rstest]
#[case(UnknownPathPolicy::Normalize, "/")]
#[case(UnknownPathPolicy::Keep, "/no-such-page")]
#[serial(reactive)]
fn test_unknown_initial_path(#[case] policy: UnknownPathPolicy, #[case] path: &str) {
	let settings = SiteSettings {
		router: RouterOptions::default().with_unknown_paths(policy),
		..SiteSettings::default()
	};
	let mut shell = Mounted::at("/no-such-page", settings);
	shell.settle();

	assert_eq!(shell.history.current_path(), path);
	assert_eq!(outlet_page(&shell.view()), Some("home"));
}

// ============================================================================
// Load failures
// ============================================================================

#[rstest]
#[serial(reactive)]
fn test_failed_page_is_reloaded_when_entered_again() {
	let mut shell = Mounted::with_loader("/", SiteSettings::default(), Rc::new(FlakyPricing::default()));
	shell.settle();

	shell.app.router().navigate_to(Route::Pricing);
	shell.settle();

	let failed = shell.view();
	assert!(is_error(&failed));
	assert_eq!(current_nav_link(&failed), Some("pricing"));
	assert!(is_error(&shell.app.render()));
	assert!(is_error(&shell.app.render()));

	shell.app.router().navigate_to(Route::Home);
	shell.settle();
	shell.app.router().navigate_to(Route::Pricing);
	shell.settle();

	let recovered = shell.view();
	assert!(!is_error(&recovered));
	assert_eq!(outlet_page(&recovered), Some("pricing"));
}
