//! # AutoLake Router
//!
//! History-API client router for the AutoLake site.
//!
//! - [`Route`]: the closed set of pages, with [`route_for_path`] /
//!   [`path_for_route`] mapping them to URL paths
//! - [`History`]: the browser-history collaborator, backed by
//!   [`MemoryHistory`] or, on `wasm32`, `BrowserHistory`
//! - [`RouteStore`]: the reactive current route and `navigate_to`
//! - [`HistoryBridge`]: back/forward synchronization
//! - [`Router`] / [`RouterProvider`] / [`use_router`]: the handle the
//!   application receives through context
//!
//! ## Example
//!
//! ```
//! use autolake_router::{Route, Router, RouterOptions, History};
//!
//! let (router, history) = Router::in_memory("/", RouterOptions::default());
//! router.navigate_to(Route::Pricing);
//! assert_eq!(history.current_path(), "/pricing");
//!
//! history.back();
//! assert_eq!(router.current_route_untracked(), Route::Home);
//! ```

#![warn(missing_docs)]

pub mod bridge;
#[cfg(target_arch = "wasm32")]
pub mod browser;
pub mod context;
pub mod error;
pub mod history;
pub mod options;
pub mod route;
pub mod store;

pub use bridge::HistoryBridge;
#[cfg(target_arch = "wasm32")]
pub use browser::BrowserHistory;
pub use context::{Router, RouterProvider, try_use_router, use_router};
pub use error::RouterError;
pub use history::{History, HistoryListener, LocationCallback, MemoryHistory};
pub use options::{RouterOptions, UnknownPathPolicy};
pub use route::{Route, path_for_route, recognizes, route_for_path};
pub use store::RouteStore;
