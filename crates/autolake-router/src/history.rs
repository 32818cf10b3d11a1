//! History API abstraction.
//!
//! [`History`] is everything the router needs from the browser: read the
//! current path, write entries without a reload, observe back/forward
//! navigation and reset the scroll position. [`MemoryHistory`] implements it
//! in memory with browser semantics; `BrowserHistory` (WASM only) wraps
//! `window.history`.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::error::RouterError;

/// Callback invoked with the new path when the URL changes outside the app.
pub type LocationCallback = Box<dyn Fn(String) + 'static>;

/// Browser-history collaborator.
pub trait History {
	/// Current URL path (`location.pathname`).
	fn current_path(&self) -> String;

	/// Add a new entry without reloading (`pushState`).
	fn push(&self, path: &str) -> Result<(), RouterError>;

	/// Rewrite the current entry without reloading (`replaceState`).
	fn replace(&self, path: &str) -> Result<(), RouterError>;

	/// Number of entries in the session history (`history.length`).
	fn len(&self) -> usize;

	/// Whether the session history has no entries.
	fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Observe back/forward navigation (`popstate`). The callback receives the
	/// path the browser moved to. Dropping the returned handle unsubscribes.
	fn listen(&self, callback: LocationCallback) -> HistoryListener;

	/// Scroll the viewport to its origin.
	fn scroll_to_top(&self);
}

/// Subscription handle returned by [`History::listen`].
#[must_use = "the listener is removed when the handle is dropped"]
pub struct HistoryListener {
	unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl HistoryListener {
	/// Create a handle that runs `unsubscribe` when dropped.
	pub fn new(unsubscribe: impl FnOnce() + 'static) -> Self {
		Self {
			unsubscribe: Some(Box::new(unsubscribe)),
		}
	}

	/// A handle with nothing to unsubscribe.
	pub fn detached() -> Self {
		Self { unsubscribe: None }
	}
}

impl Drop for HistoryListener {
	fn drop(&mut self) {
		if let Some(unsubscribe) = self.unsubscribe.take() {
			unsubscribe();
		}
	}
}

impl fmt::Debug for HistoryListener {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("HistoryListener")
			.field("active", &self.unsubscribe.is_some())
			.finish()
	}
}

type ListenerList = RefCell<Vec<(usize, Rc<dyn Fn(String)>)>>;

struct MemoryState {
	entries: RefCell<Vec<String>>,
	cursor: Cell<usize>,
	scroll: Cell<(f64, f64)>,
	listeners: ListenerList,
	next_listener_id: Cell<usize>,
}

/// In-memory session history with browser semantics.
///
/// Pushing truncates forward entries, [`back`](Self::back) /
/// [`forward`](Self::forward) / [`go`](Self::go) move the cursor and notify
/// listeners like `popstate` does, and the scroll position is recorded.
/// Clones share the same history.
#[derive(Clone)]
pub struct MemoryHistory {
	state: Rc<MemoryState>,
}

impl MemoryHistory {
	/// A session with a single entry at `initial_path`.
	pub fn new(initial_path: impl Into<String>) -> Self {
		Self {
			state: Rc::new(MemoryState {
				entries: RefCell::new(vec![initial_path.into()]),
				cursor: Cell::new(0),
				scroll: Cell::new((0.0, 0.0)),
				listeners: RefCell::new(Vec::new()),
				next_listener_id: Cell::new(0),
			}),
		}
	}

	/// Go one entry back. Returns `false` at the start of the session.
	pub fn back(&self) -> bool {
		self.go(-1)
	}

	/// Go one entry forward. Returns `false` at the end of the session.
	pub fn forward(&self) -> bool {
		self.go(1)
	}

	/// Move `delta` entries and notify listeners. Out-of-range moves are
	/// ignored, as in browsers.
	pub fn go(&self, delta: isize) -> bool {
		let len = self.state.entries.borrow().len();
		let Some(target) = self.state.cursor.get().checked_add_signed(delta) else {
			return false;
		};
		if delta == 0 || target >= len {
			return false;
		}

		self.state.cursor.set(target);
		let path = self.current_path();
		tracing::trace!(path = %path, delta, "memory history traversal");
		self.notify(&path);
		true
	}

	/// Index of the current entry.
	pub fn index(&self) -> usize {
		self.state.cursor.get()
	}

	/// Snapshot of every entry.
	pub fn entries(&self) -> Vec<String> {
		self.state.entries.borrow().clone()
	}

	/// Last scroll position set through [`History::scroll_to_top`] or [`set_scroll`](Self::set_scroll).
	pub fn scroll_position(&self) -> (f64, f64) {
		self.state.scroll.get()
	}

	/// Simulate the user scrolling.
	pub fn set_scroll(&self, x: f64, y: f64) {
		self.state.scroll.set((x, y));
	}

	/// Number of active listeners.
	pub fn listener_count(&self) -> usize {
		self.state.listeners.borrow().len()
	}

	fn notify(&self, path: &str) {
		// Callbacks may push or replace, so call them without the list borrowed.
		let listeners: Vec<_> = self
			.state
			.listeners
			.borrow()
			.iter()
			.map(|(_, callback)| Rc::clone(callback))
			.collect();
		for callback in listeners {
			callback(path.to_string());
		}
	}
}

impl Default for MemoryHistory {
	fn default() -> Self {
		Self::new("/")
	}
}

impl fmt::Debug for MemoryHistory {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MemoryHistory")
			.field("entries", &self.state.entries.borrow())
			.field("cursor", &self.state.cursor.get())
			.field("listeners", &self.listener_count())
			.finish()
	}
}

impl History for MemoryHistory {
	fn current_path(&self) -> String {
		self.state.entries.borrow()[self.state.cursor.get()].clone()
	}

	fn push(&self, path: &str) -> Result<(), RouterError> {
		let mut entries = self.state.entries.borrow_mut();
		let cursor = self.state.cursor.get();
		entries.truncate(cursor + 1);
		entries.push(path.to_string());
		self.state.cursor.set(cursor + 1);
		Ok(())
	}

	fn replace(&self, path: &str) -> Result<(), RouterError> {
		let mut entries = self.state.entries.borrow_mut();
		entries[self.state.cursor.get()] = path.to_string();
		Ok(())
	}

	fn len(&self) -> usize {
		self.state.entries.borrow().len()
	}

	fn listen(&self, callback: LocationCallback) -> HistoryListener {
		let id = self.state.next_listener_id.get();
		self.state.next_listener_id.set(id + 1);
		self.state
			.listeners
			.borrow_mut()
			.push((id, Rc::from(callback)));

		let state: Weak<MemoryState> = Rc::downgrade(&self.state);
		HistoryListener::new(move || {
			if let Some(state) = state.upgrade() {
				let removed: Vec<_> = {
					let mut listeners = state.listeners.borrow_mut();
					let (removed, kept) = std::mem::take(&mut *listeners)
						.into_iter()
						.partition(|(listener_id, _)| *listener_id == id);
					*listeners = kept;
					removed
				};
				drop(removed);
			}
		})
	}

	fn scroll_to_top(&self) {
		self.state.scroll.set((0.0, 0.0));
	}
}
