//! Routing properties and user scenarios over an in-memory history
//!
//! Covers:
//! 1. Path mapping round trip for every route
//! 2. Idempotent navigation and history growth
//! 3. Back/forward synchronization
//! 4. Scroll reset after navigation
//! 5. Unknown-path handling under both policies

use autolake_reactive::{Effect, with_runtime};
use autolake_router::{
	History, MemoryHistory, Route, Router, RouterOptions, UnknownPathPolicy, path_for_route,
	route_for_path,
};
use rstest::{fixture, rstest};
use serial_test::serial;
use std::cell::Cell;
use std::rc::Rc;

#[fixture]
fn home() -> (Router, MemoryHistory) {
	Router::in_memory("/", RouterOptions::default())
}

// ============================================================================
// Path mapping
// ============================================================================

#[rstest]
fn test_round_trip_for_every_route(
	#[values(
		Route::Home,
		Route::Pricing,
		Route::ServicesIngestion,
		Route::ServicesCuration,
		Route::ServicesDistribution,
		Route::Industries,
		Route::Architecture,
		Route::AboutUs
	)]
	route: Route,
) {
	assert_eq!(route_for_path(path_for_route(route)), route);
}

// ============================================================================
// Navigation
// ============================================================================

#[rstest]
#[serial(reactive)]
fn test_navigate_to_current_route_changes_nothing(home: (Router, MemoryHistory)) {
	let (router, history) = home;
	router.navigate_to(Route::Pricing);
	let length = history.len();
	let notifications = Rc::new(Cell::new(0));
	let _effect = Effect::new({
		let router = router.clone();
		let notifications = Rc::clone(&notifications);
		move || {
			router.current_route();
			notifications.set(notifications.get() + 1);
		}
	});

	assert_eq!(router.try_navigate_to(Route::Pricing), Ok(false));
	with_runtime(|rt| rt.flush_updates());

	assert_eq!(history.len(), length);
	assert_eq!(router.current_route_untracked(), Route::Pricing);
	assert_eq!(notifications.get(), 1);
}

#[rstest]
#[case(Route::Pricing, Route::AboutUs)]
#[case(Route::ServicesIngestion, Route::ServicesDistribution)]
#[case(Route::Industries, Route::Architecture)]
#[serial(reactive)]
fn test_two_navigations_add_two_entries(
	home: (Router, MemoryHistory),
	#[case] first: Route,
	#[case] second: Route,
) {
	let (router, history) = home;
	let length = history.len();

	router.navigate_to(first);
	router.navigate_to(second);

	assert_eq!(history.len(), length + 2);
	assert_eq!(history.current_path(), path_for_route(second));
	assert_eq!(router.current_route_untracked(), second);
}

#[rstest]
#[serial(reactive)]
fn test_scroll_reset_after_every_navigation(home: (Router, MemoryHistory)) {
	let (router, history) = home;

	for route in Route::ALL.into_iter().rev() {
		history.set_scroll(0.0, 640.0);
		router.navigate_to(route);
		assert_eq!(history.scroll_position(), (0.0, 0.0), "after {route}");
	}
}

// ============================================================================
// Back/forward
// ============================================================================

#[rstest]
#[serial(reactive)]
fn test_back_returns_home(home: (Router, MemoryHistory)) {
	let (router, history) = home;
	router.navigate_to(Route::Pricing);

	history.back();

	assert_eq!(router.current_route_untracked(), Route::Home);
	assert_eq!(history.current_path(), "/");
}

#[rstest]
#[serial(reactive)]
fn test_back_then_navigate_discards_forward_entries(home: (Router, MemoryHistory)) {
	let (router, history) = home;
	router.navigate_to(Route::Pricing);
	router.navigate_to(Route::Industries);
	history.back();

	router.navigate_to(Route::AboutUs);

	assert_eq!(history.entries(), vec!["/", "/pricing", "/about-us"]);
	assert!(!history.forward());
}

#[rstest]
#[serial(reactive)]
fn test_passive_observers_see_synced_route(home: (Router, MemoryHistory)) {
	let (router, history) = home;
	router.navigate_to(Route::Architecture);
	let seen = Rc::new(Cell::new(Route::Architecture));
	let _effect = Effect::new({
		let router = router.clone();
		let seen = Rc::clone(&seen);
		move || seen.set(router.current_route())
	});

	history.back();
	with_runtime(|rt| rt.flush_updates());

	assert_eq!(seen.get(), Route::Home);
}

// ============================================================================
// Scenarios
// ============================================================================

#[rstest]
#[serial(reactive)]
fn test_initial_load_at_service_path() {
	let (router, history) = Router::in_memory("/services/ingestion", RouterOptions::default());

	assert_eq!(router.current_route_untracked(), Route::ServicesIngestion);
	assert_eq!(history.len(), 1);
}

#[rstest]
#[case(UnknownPathPolicy::Normalize, "/")]
#[case(UnknownPathPolicy::Keep, "/nonexistent")]
#[serial(reactive)]
fn test_initial_load_at_unknown_path(#[case] policy: UnknownPathPolicy, #[case] url: &str) {
	let options = RouterOptions::default().with_unknown_paths(policy);
	let (router, history) = Router::in_memory("/nonexistent", options);

	assert_eq!(router.current_route_untracked(), Route::Home);
	assert_eq!(history.current_path(), url);
	assert_eq!(history.len(), 1);
}

#[rstest]
#[serial(reactive)]
fn test_navigate_from_home_to_about_us(home: (Router, MemoryHistory)) {
	let (router, history) = home;
	history.set_scroll(0.0, 900.0);

	router.navigate_to(Route::AboutUs);

	assert_eq!(history.current_path(), "/about-us");
	assert_eq!(history.len(), 2);
	assert_eq!(router.current_route_untracked(), Route::AboutUs);
	assert_eq!(history.scroll_position(), (0.0, 0.0));
}

#[rstest]
#[serial(reactive)]
fn test_pricing_twice_adds_one_entry(home: (Router, MemoryHistory)) {
	let (router, history) = home;

	router.navigate_to(Route::Pricing);
	router.navigate_to(Route::Pricing);

	assert_eq!(history.len(), 2);
	assert_eq!(history.entries(), vec!["/", "/pricing"]);
}
