//! History-API client router
//!
//! This module provides access to autolake-router.
//!
//! ## Example
//!
//! ```
//! use autolake::router::{History, Route, Router, RouterOptions};
//!
//! let (router, history) = Router::in_memory("/", RouterOptions::default());
//! router.navigate_to(Route::Industries);
//! router.navigate_to(Route::Architecture);
//! history.back();
//!
//! assert_eq!(router.current_route_untracked(), Route::Industries);
//! assert_eq!(history.current_path(), "/industries");
//! ```

pub use autolake_router::*;
