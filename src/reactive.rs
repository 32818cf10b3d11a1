//! Fine-grained reactivity
//!
//! This module provides access to autolake-reactive.

pub use autolake_reactive::*;
