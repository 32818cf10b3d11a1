//! Log output.
//!
//! [`init_logging`] installs the global `tracing` subscriber: the `fmt`
//! layer on native targets and a [`ConsoleLayer`] writing to the browser
//! console on `wasm32`. Both are filtered by the configured `EnvFilter`
//! directive.

use std::fmt::{self, Write as _};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

use crate::settings::LoggingSettings;

/// Errors raised while installing the subscriber.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
	/// The filter directive does not parse.
	#[error("Invalid log filter: {0}")]
	InvalidFilter(#[from] tracing_subscriber::filter::ParseError),
	/// A global subscriber is already set.
	#[error("Logging already initialized: {0}")]
	AlreadyInitialized(#[from] TryInitError),
}

/// Install the global subscriber for `settings`.
pub fn init_logging(settings: &LoggingSettings) -> Result<(), LoggingError> {
	let filter = EnvFilter::try_new(&settings.level)?;

	#[cfg(not(target_arch = "wasm32"))]
	tracing_subscriber::registry()
		.with(filter)
		.with(tracing_subscriber::fmt::layer().with_target(true))
		.try_init()?;

	#[cfg(target_arch = "wasm32")]
	tracing_subscriber::registry()
		.with(filter)
		.with(ConsoleLayer::new(BrowserConsole))
		.try_init()?;

	tracing::debug!(level = %settings.level, "logging initialized");
	Ok(())
}

/// Destination of formatted console lines.
pub trait ConsoleSink: Send + Sync + 'static {
	/// Write one line at `level`.
	fn write(&self, level: Level, line: &str);
}

/// `console.error` / `console.warn` / `console.info` / `console.debug`.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserConsole;

#[cfg(target_arch = "wasm32")]
impl ConsoleSink for BrowserConsole {
	fn write(&self, level: Level, line: &str) {
		let line = wasm_bindgen::JsValue::from_str(line);
		match level {
			Level::ERROR => web_sys::console::error_1(&line),
			Level::WARN => web_sys::console::warn_1(&line),
			Level::INFO => web_sys::console::info_1(&line),
			_ => web_sys::console::debug_1(&line),
		}
	}
}

/// Layer formatting each event as one line for a [`ConsoleSink`].
#[derive(Debug, Clone)]
pub struct ConsoleLayer<W> {
	sink: W,
}

impl<W: ConsoleSink> ConsoleLayer<W> {
	/// Layer writing to `sink`.
	pub fn new(sink: W) -> Self {
		Self { sink }
	}
}

impl<S, W> Layer<S> for ConsoleLayer<W>
where
	S: Subscriber,
	W: ConsoleSink,
{
	fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
		let metadata = event.metadata();
		let mut line = LineVisitor::default();
		event.record(&mut line);
		self.sink.write(
			*metadata.level(),
			&line.finish(*metadata.level(), metadata.target()),
		);
	}
}

#[derive(Default)]
struct LineVisitor {
	message: String,
	fields: String,
}

impl LineVisitor {
	fn finish(self, level: Level, target: &str) -> String {
		let mut line = format!("{level} {target}: {}", self.message);
		line.push_str(&self.fields);
		line
	}
}

impl Visit for LineVisitor {
	fn record_str(&mut self, field: &Field, value: &str) {
		if field.name() == "message" {
			self.message.push_str(value);
		} else {
			let _ = write!(self.fields, " {}={}", field.name(), value);
		}
	}

	fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
		if field.name() == "message" {
			let _ = write!(self.message, "{value:?}");
		} else {
			let _ = write!(self.fields, " {}={:?}", field.name(), value);
		}
	}
}
