//! Page shell: resolver, pages, chrome, settings and logging
//!
//! This module provides access to autolake-pages.

pub use autolake_pages::*;
