//! Browser back/forward synchronization.
//!
//! The bridge listens to the history for paths the browser moved to on its
//! own and writes them into the store's location signal. A layout effect
//! derives the route from that signal, so the route is already updated when
//! the `popstate` handler returns.
//!
//! In-app navigation writes the route first and the location second; when the
//! effect re-runs it finds the two already agree and writes nothing.

use std::fmt;
use std::rc::Rc;

use autolake_reactive::Effect;

use crate::history::HistoryListener;
use crate::store::RouteStore;

/// Keeps a [`RouteStore`] in sync with external URL changes while alive.
#[must_use = "synchronization stops when the bridge is dropped"]
pub struct HistoryBridge {
	_listener: HistoryListener,
	effect: Effect,
}

impl HistoryBridge {
	/// Start synchronizing `store` with its history.
	pub fn attach(store: &Rc<RouteStore>) -> Self {
		let listener = store.history().listen(Box::new({
			let store = Rc::downgrade(store);
			move |path| {
				if let Some(store) = store.upgrade() {
					tracing::debug!(path = %path, "history traversal observed");
					store.observe_location(path);
				}
			}
		}));

		let effect = Effect::layout({
			let location = store.location_signal();
			let store = Rc::downgrade(store);
			move || {
				let path = location.get();
				if let Some(store) = store.upgrade() {
					store.sync_from_location(&path);
				}
			}
		});

		Self {
			_listener: listener,
			effect,
		}
	}

	/// Whether the bridge is still synchronizing.
	pub fn is_attached(&self) -> bool {
		!self.effect.is_disposed()
	}
}

impl fmt::Debug for HistoryBridge {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("HistoryBridge")
			.field("effect", &self.effect.id())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::history::{History, MemoryHistory};
	use crate::options::{RouterOptions, UnknownPathPolicy};
	use crate::route::Route;
	use rstest::rstest;
	use serial_test::serial;
	use std::cell::RefCell;

	fn attached(
		path: &str,
		options: RouterOptions,
	) -> (MemoryHistory, Rc<RouteStore>, HistoryBridge) {
		let history = MemoryHistory::new(path);
		let store = Rc::new(RouteStore::new(Rc::new(history.clone()), options));
		let bridge = HistoryBridge::attach(&store);
		(history, store, bridge)
	}

	#[rstest]
	#[serial(reactive)]
	fn test_back_restores_previous_route() {
		let (history, store, _bridge) = attached("/", RouterOptions::default());
		store.navigate_to(Route::Pricing);

		assert!(history.back());

		assert_eq!(store.current_route_untracked(), Route::Home);
		assert_eq!(history.current_path(), "/");
	}

	#[rstest]
	#[serial(reactive)]
	fn test_forward_after_back() {
		let (history, store, _bridge) = attached("/", RouterOptions::default());
		store.navigate_to(Route::Industries);
		history.back();

		assert!(history.forward());

		assert_eq!(store.current_route_untracked(), Route::Industries);
	}

	#[rstest]
	#[serial(reactive)]
	fn test_sync_is_visible_to_layout_effects_before_listener_returns() {
		let (history, store, _bridge) = attached("/", RouterOptions::default());
		store.navigate_to(Route::AboutUs);
		let seen = Rc::new(RefCell::new(Vec::new()));
		let _effect = Effect::layout({
			let store = Rc::clone(&store);
			let seen = Rc::clone(&seen);
			move || seen.borrow_mut().push(store.current_route())
		});

		history.back();

		assert_eq!(*seen.borrow(), vec![Route::AboutUs, Route::Home]);
	}

	#[rstest]
	#[serial(reactive)]
	fn test_in_app_navigation_writes_route_once() {
		let (_history, store, _bridge) = attached("/", RouterOptions::default());
		let writes = Rc::new(RefCell::new(0));
		let _effect = Effect::layout({
			let store = Rc::clone(&store);
			let writes = Rc::clone(&writes);
			move || {
				store.current_route();
				*writes.borrow_mut() += 1;
			}
		});

		store.navigate_to(Route::Architecture);

		// Initial run plus exactly one change.
		assert_eq!(*writes.borrow(), 2);
	}

	#[rstest]
	#[serial(reactive)]
	fn test_back_to_unknown_path_normalizes() {
		let (history, store, _bridge) = attached("/", RouterOptions::default());
		history.push("/legacy-page").unwrap();
		store.navigate_to(Route::Pricing);

		history.back();

		assert_eq!(store.current_route_untracked(), Route::Home);
		assert_eq!(history.current_path(), "/");
		assert_eq!(history.len(), 3);
	}

	#[rstest]
	#[serial(reactive)]
	fn test_back_to_unknown_path_kept() {
		let options = RouterOptions::default().with_unknown_paths(UnknownPathPolicy::Keep);
		let (history, store, _bridge) = attached("/", options);
		history.push("/legacy-page").unwrap();
		store.navigate_to(Route::Pricing);

		history.back();

		assert_eq!(store.current_route_untracked(), Route::Home);
		assert_eq!(history.current_path(), "/legacy-page");
	}

	#[rstest]
	#[serial(reactive)]
	fn test_dropping_bridge_stops_sync() {
		let (history, store, bridge) = attached("/", RouterOptions::default());
		store.navigate_to(Route::Pricing);
		assert!(bridge.is_attached());

		drop(bridge);
		history.back();

		assert_eq!(history.listener_count(), 0);
		assert_eq!(store.current_route_untracked(), Route::Pricing);
	}
}
