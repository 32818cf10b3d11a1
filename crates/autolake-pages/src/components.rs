//! Navigation chrome.
//!
//! [`Link`] renders an anchor the shell's click interceptor recognizes
//! (`data-link`); [`NavBar`] renders one link per route and marks the current
//! one.

use std::borrow::Cow;

use autolake_router::Route;

use crate::view::{Component, ElementView, IntoView, View};

/// Attribute marking anchors handled by the router.
pub const LINK_ATTR: &str = "data-link";

/// Attribute carrying the target route id.
pub const ROUTE_ATTR: &str = "data-route";

/// An in-app link to a route.
#[derive(Debug, Clone)]
pub struct Link {
	to: Route,
	content: Cow<'static, str>,
	class: Option<Cow<'static, str>>,
	current: bool,
}

impl Link {
	/// Link to `to`, labelled with the route's label.
	pub fn new(to: Route) -> Self {
		Self {
			to,
			content: Cow::Borrowed(to.label()),
			class: None,
			current: false,
		}
	}

	/// Replace the link text.
	pub fn content(mut self, content: impl Into<Cow<'static, str>>) -> Self {
		self.content = content.into();
		self
	}

	/// Set the CSS class.
	pub fn class(mut self, class: impl Into<Cow<'static, str>>) -> Self {
		self.class = Some(class.into());
		self
	}

	/// Mark the link as pointing at the current page.
	pub fn current(mut self, current: bool) -> Self {
		self.current = current;
		self
	}

	/// Target route.
	pub fn to(&self) -> Route {
		self.to
	}
}

impl Component for Link {
	fn render(&self) -> View {
		let mut element = ElementView::new("a")
			.attr("href", self.to.path())
			.attr(LINK_ATTR, "true")
			.attr(ROUTE_ATTR, self.to.id());
		if let Some(class) = &self.class {
			element = element.class(class.clone());
		}
		element
			.attr_if(self.current, "aria-current", "page")
			.child(View::text(self.content.clone()))
			.into_view()
	}
}

impl IntoView for Link {
	fn into_view(self) -> View {
		self.render()
	}
}

/// Top navigation.
#[derive(Debug, Clone, Copy)]
pub struct NavBar {
	current: Route,
}

impl NavBar {
	/// Navigation highlighting `current`.
	pub fn new(current: Route) -> Self {
		Self { current }
	}
}

impl Component for NavBar {
	fn render(&self) -> View {
		let brand = Link::new(Route::Home)
			.content("AutoLake")
			.class("navbar__brand");

		// Services are grouped under a submenu at the position of the first one.
		let mut items = Vec::new();
		for route in Route::ALL {
			match route {
				Route::Home => {}
				Route::ServicesIngestion => items.push(self.services_group()),
				r if r.is_service() => {}
				r => items.push(self.item(r)),
			}
		}

		ElementView::new("nav")
			.class("navbar")
			.attr("aria-label", "Main")
			.child(brand)
			.child(ElementView::new("ul").class("navbar__links").children(items))
			.into_view()
	}
}

impl NavBar {
	fn services_group(&self) -> ElementView {
		ElementView::new("li")
			.class("navbar__group")
			.child(ElementView::new("span").class("navbar__group-label").child("Services"))
			.child(
				ElementView::new("ul").class("navbar__submenu").children(
					Route::ALL
						.into_iter()
						.filter(|route| route.is_service())
						.map(|route| self.item(route)),
				),
			)
	}

	fn item(&self, route: Route) -> ElementView {
		ElementView::new("li").child(
			Link::new(route)
				.class("navbar__link")
				.current(route == self.current),
		)
	}
}
