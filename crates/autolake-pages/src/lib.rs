//! # AutoLake Pages
//!
//! The single-page shell of the AutoLake marketing site.
//!
//! - [`SpaApp`]: router, view resolver and navigation chrome, rendered to a
//!   string natively or mounted into the DOM on `wasm32`
//! - [`ViewResolver`]: lazy route → page loading with a loading indicator
//!   and an error fallback
//! - [`pages`]: one [`PageComponent`] per route
//! - [`components`]: [`Link`] and [`NavBar`]
//! - [`SiteSettings`] and [`init_logging`]: configuration and log output
//! - [`submit_demo_request`]: the booking-form handler
//!
//! ## Example
//!
//! ```
//! use std::rc::Rc;
//!
//! use autolake_pages::{InitialData, SiteSettings, SpaApp};
//! use autolake_router::{History, MemoryHistory, Route};
//! use futures::executor::LocalPool;
//!
//! let mut pool = LocalPool::new();
//! let history = MemoryHistory::new("/");
//! let app = SpaApp::new(
//!     Rc::new(history.clone()),
//!     Rc::new(pool.spawner()),
//!     SiteSettings::default(),
//!     InitialData::default(),
//! );
//!
//! app.router().navigate_to(Route::AboutUs);
//! app.render();
//! pool.run_until_stalled();
//!
//! assert_eq!(history.current_path(), "/about-us");
//! assert!(app.render_to_string().contains("data-page=\"about-us\""));
//! ```

#![warn(missing_docs)]

pub mod app;
pub mod components;
pub mod data;
pub mod demo_request;
pub mod logging;
pub mod pages;
pub mod resolver;
pub mod settings;
pub mod view;

#[cfg(target_arch = "wasm32")]
pub use app::{MountHandle, boot};
pub use app::{OUTLET_ID, SpaApp};
pub use components::{LINK_ATTR, Link, NavBar, ROUTE_ATTR};
pub use data::{DataError, FeatureRow, FeatureValue, InitialData, PricingData, PricingPlan};
pub use demo_request::{
	DemoRequest, DemoRequestError, RequestKind, SubmitResult, submit_demo_request,
};
#[cfg(target_arch = "wasm32")]
pub use logging::BrowserConsole;
pub use logging::{ConsoleLayer, ConsoleSink, LoggingError, init_logging};
pub use pages::page_for;
#[cfg(target_arch = "wasm32")]
pub use resolver::WasmSpawner;
pub use resolver::{
	BundledPages, LoadError, LoadState, PageComponent, PageFuture, PageLoader, Spawner,
	ViewResolver, error_view, loading_view,
};
pub use settings::{DataSettings, LoggingSettings, SettingsError, SiteSettings};
pub use view::{Component, ElementView, IntoView, View, html_escape};
