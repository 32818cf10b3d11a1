//! `window.history` backend (WASM only).

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, Window};

use crate::error::RouterError;
use crate::history::{History, HistoryListener, LocationCallback};

/// The browser's session history.
#[derive(Debug, Clone)]
pub struct BrowserHistory {
	window: Window,
}

impl BrowserHistory {
	/// Bind to the global `window`.
	pub fn new() -> Result<Self, RouterError> {
		let window = web_sys::window().ok_or(RouterError::Unavailable("window"))?;
		Ok(Self { window })
	}

	fn history(&self) -> Result<web_sys::History, RouterError> {
		self.window
			.history()
			.map_err(|_| RouterError::Unavailable("history"))
	}
}

fn js_error(error: JsValue) -> RouterError {
	RouterError::NavigationFailed(
		error
			.as_string()
			.unwrap_or_else(|| format!("{error:?}")),
	)
}

impl History for BrowserHistory {
	fn current_path(&self) -> String {
		self.window
			.location()
			.pathname()
			.unwrap_or_else(|_| "/".to_string())
	}

	fn push(&self, path: &str) -> Result<(), RouterError> {
		self.history()?
			.push_state_with_url(&JsValue::NULL, "", Some(path))
			.map_err(js_error)
	}

	fn replace(&self, path: &str) -> Result<(), RouterError> {
		self.history()?
			.replace_state_with_url(&JsValue::NULL, "", Some(path))
			.map_err(js_error)
	}

	fn len(&self) -> usize {
		self.history()
			.ok()
			.and_then(|history| history.length().ok())
			.map_or(0, |length| length as usize)
	}

	fn listen(&self, callback: LocationCallback) -> HistoryListener {
		let window = self.window.clone();
		let handler = Closure::<dyn Fn(Event)>::new({
			let window = window.clone();
			move |_event: Event| {
				let path = window
					.location()
					.pathname()
					.unwrap_or_else(|_| "/".to_string());
				callback(path);
			}
		});

		if let Err(error) =
			window.add_event_listener_with_callback("popstate", handler.as_ref().unchecked_ref())
		{
			tracing::error!(error = ?error, "failed to register popstate listener");
			return HistoryListener::detached();
		}

		// The closure must outlive the registration; it is dropped after removal.
		HistoryListener::new(move || {
			let _ = window
				.remove_event_listener_with_callback("popstate", handler.as_ref().unchecked_ref());
			drop(handler);
		})
	}

	fn scroll_to_top(&self) {
		self.window.scroll_to_with_x_and_y(0.0, 0.0);
	}
}
