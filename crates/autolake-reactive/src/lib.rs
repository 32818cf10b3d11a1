//! # AutoLake Reactive
//!
//! Fine-grained reactivity for the AutoLake site shell, in the style of
//! Leptos/Solid.js signals:
//!
//! - [`Signal`]: shared reactive cell with automatic dependency tracking
//! - [`Effect`]: side effect re-run when the signals it read change, either
//!   synchronously ([`EffectTiming::Layout`]) or on the next flush
//!   ([`EffectTiming::Passive`])
//! - [`provide_context`] / [`use_context`]: scoped, type-keyed dependency injection
//!
//! Everything is single-threaded and thread-local, matching the browser's
//! event loop.

#![warn(missing_docs)]

pub mod context;
pub mod effect;
pub mod runtime;
pub mod signal;

pub use context::{ContextGuard, has_context, provide_context, use_context};
pub use effect::{Effect, use_effect, use_layout_effect};
pub use runtime::{
	EffectTiming, NodeId, Runtime, ScheduledTask, clear_scheduler, set_scheduler, with_runtime,
};
pub use signal::Signal;
