//! # AutoLake
//!
//! Client-side single-page shell of the AutoLake marketing site.
//!
//! The site serves one HTML document; every page after that is rendered in
//! the browser. This crate re-exports the three layers the shell is built
//! from:
//!
//! - [`reactive`]: signals, effects and context
//! - [`router`]: the closed route set, the reactive route store and the
//!   back/forward bridge over the History API
//! - [`pages`]: lazily resolved page components, navigation chrome,
//!   settings, logging and the demo-request handler
//!
//! ## Quick Start
//!
//! ```
//! use std::rc::Rc;
//!
//! use autolake::prelude::*;
//! use futures::executor::LocalPool;
//!
//! let mut pool = LocalPool::new();
//! let history = MemoryHistory::new("/services/curation");
//! let app = SpaApp::new(
//!     Rc::new(history.clone()),
//!     Rc::new(pool.spawner()),
//!     SiteSettings::default(),
//!     InitialData::default(),
//! );
//! app.render();
//! pool.run_until_stalled();
//!
//! assert_eq!(app.router().current_route_untracked(), Route::ServicesCuration);
//! assert_eq!(app.title(), "Data Curation | AutoLake");
//! ```
//!
//! In the browser the shell is started with `autolake::pages::boot`, which
//! reads the embedded settings and initial data and mounts into the page.

pub mod pages;
pub mod reactive;
pub mod router;

pub use autolake_pages::{InitialData, SiteSettings, SpaApp};
pub use autolake_router::{Route, Router, RouterOptions, UnknownPathPolicy};

/// Commonly used types.
pub mod prelude {
	pub use crate::pages::{
		Component, InitialData, IntoView, Link, NavBar, SiteSettings, SpaApp, View, ViewResolver,
		init_logging,
	};
	pub use crate::reactive::{Effect, Signal};
	pub use crate::router::{
		History, MemoryHistory, Route, Router, RouterOptions, RouterProvider, UnknownPathPolicy,
		use_router,
	};
}
