//! Page components, one per route.
//!
//! Pages are static markup except [`PricingPage`], which renders the plans
//! from the initial-data bag. [`page_for`] is the route → page table used by
//! the bundled loader.

use std::rc::Rc;

use autolake_router::Route;

use crate::components::Link;
use crate::data::{FeatureValue, InitialData, PricingPlan};
use crate::resolver::PageComponent;
use crate::view::{ElementView, IntoView, View};

/// The page component for `route`.
pub fn page_for(route: Route) -> Rc<dyn PageComponent> {
	match route {
		Route::Home => Rc::new(HomePage),
		Route::Pricing => Rc::new(PricingPage),
		Route::ServicesIngestion => Rc::new(ServicesPage::new(ServiceKind::Ingestion)),
		Route::ServicesCuration => Rc::new(ServicesPage::new(ServiceKind::Curation)),
		Route::ServicesDistribution => Rc::new(ServicesPage::new(ServiceKind::Distribution)),
		Route::Industries => Rc::new(IndustriesPage),
		Route::Architecture => Rc::new(ArchitecturePage),
		Route::AboutUs => Rc::new(AboutUsPage),
	}
}

fn page(route: Route) -> ElementView {
	ElementView::new("article")
		.class(format!("page page--{}", route.id()))
		.attr("data-page", route.id())
}

fn header(title: &'static str, lead: &'static str) -> ElementView {
	ElementView::new("header")
		.class("page__header")
		.child(ElementView::new("h1").child(title))
		.child(ElementView::new("p").class("page__lead").child(lead))
}

fn cards(items: &[(&'static str, &'static str)]) -> ElementView {
	ElementView::new("ul").class("cards").children(items.iter().map(|(title, body)| {
		ElementView::new("li")
			.class("card")
			.child(ElementView::new("h3").child(*title))
			.child(ElementView::new("p").child(*body))
	}))
}

fn demo_cta() -> ElementView {
	ElementView::new("a")
		.class("button button--primary")
		.attr("href", "#book-demo")
		.child("Book a demo")
}

/// `/`
#[derive(Debug, Clone, Copy, Default)]
pub struct HomePage;

impl PageComponent for HomePage {
	fn render(&self, _data: &InitialData) -> View {
		let services = ElementView::new("ul").class("home__services").children(
			Route::ALL
				.into_iter()
				.filter(|route| route.is_service())
				.map(|route| ElementView::new("li").child(Link::new(route).class("card-link"))),
		);

		page(Route::Home)
			.child(
				ElementView::new("section")
					.class("hero")
					.child(header(
						"The automated data lake",
						"AutoLake ingests, curates and distributes your data without a platform team.",
					))
					.child(demo_cta())
					.child(Link::new(Route::Pricing).content("See pricing").class("button")),
			)
			.child(services)
			.into_view()
	}

	fn name(&self) -> &'static str {
		"HomePage"
	}
}

/// `/pricing`
#[derive(Debug, Clone, Copy, Default)]
pub struct PricingPage;

impl PricingPage {
	fn plan_card(plan: &PricingPlan) -> ElementView {
		let price = ElementView::new("p")
			.class("plan__price")
			.child(plan.price.clone())
			.child(
				plan.period
					.clone()
					.map(|period| ElementView::new("span").class("plan__period").child(period)),
			);

		ElementView::new("li")
			.class(if plan.highlighted {
				"plan plan--highlighted"
			} else {
				"plan"
			})
			.attr("data-plan", plan.id.clone())
			.child(ElementView::new("h2").child(plan.name.clone()))
			.child(price)
			.child(ElementView::new("p").child(plan.description.clone()))
			.child(
				ElementView::new("ul").class("plan__features").children(
					plan.features
						.iter()
						.map(|feature| ElementView::new("li").child(feature.clone())),
				),
			)
	}

	fn comparison(data: &InitialData) -> ElementView {
		let head = ElementView::new("tr")
			.child(ElementView::new("th").attr("scope", "col").child("Feature"))
			.children(data.pricing.plans.iter().map(|plan| {
				ElementView::new("th")
					.attr("scope", "col")
					.child(plan.name.clone())
			}));

		let rows = data.pricing.comparison.iter().map(|row| {
			ElementView::new("tr")
				.child(
					ElementView::new("th")
						.attr("scope", "row")
						.child(row.feature.clone()),
				)
				.children(row.values.iter().map(|value| match value {
					FeatureValue::Included(true) => ElementView::new("td")
						.attr("aria-label", "Included")
						.child("\u{2713}"),
					FeatureValue::Included(false) => ElementView::new("td")
						.attr("aria-label", "Not included")
						.child("\u{2014}"),
					FeatureValue::Text(text) => ElementView::new("td").child(text.clone()),
				}))
		});

		ElementView::new("table")
			.class("comparison")
			.child(ElementView::new("thead").child(head))
			.child(ElementView::new("tbody").children(rows))
	}
}

impl PageComponent for PricingPage {
	fn render(&self, data: &InitialData) -> View {
		page(Route::Pricing)
			.child(header(
				"Pricing",
				"Plans that grow with your data. No per-seat fees.",
			))
			.child(
				ElementView::new("ul")
					.class("plans")
					.children(data.pricing.plans.iter().map(Self::plan_card)),
			)
			.child(Self::comparison(data))
			.child(demo_cta())
			.into_view()
	}

	fn name(&self) -> &'static str {
		"PricingPage"
	}
}

/// The three service offerings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
	/// `/services/ingestion`
	Ingestion,
	/// `/services/curation`
	Curation,
	/// `/services/distribution`
	Distribution,
}

impl ServiceKind {
	/// Route of the service page.
	pub const fn route(self) -> Route {
		match self {
			ServiceKind::Ingestion => Route::ServicesIngestion,
			ServiceKind::Curation => Route::ServicesCuration,
			ServiceKind::Distribution => Route::ServicesDistribution,
		}
	}

	fn copy(self) -> (&'static str, &'static str, [(&'static str, &'static str); 3]) {
		match self {
			ServiceKind::Ingestion => (
				"Data Ingestion",
				"Connect every source once and keep it flowing.",
				[
					("Connectors", "Databases, SaaS tools, files and event streams."),
					("Change capture", "Incremental syncs instead of full reloads."),
					("Schema drift", "New columns land without breaking pipelines."),
				],
			),
			ServiceKind::Curation => (
				"Data Curation",
				"Turn raw tables into trusted, documented datasets.",
				[
					("Cleansing", "Deduplication, typing and normalization."),
					("Quality checks", "Freshness and volume monitors on every table."),
					("Lineage", "See where each column came from."),
				],
			),
			ServiceKind::Distribution => (
				"Data Distribution",
				"Deliver curated data where it is needed.",
				[
					("Warehouses", "Publish to the warehouse your analysts already use."),
					("APIs", "Serve datasets to applications over HTTP."),
					("Sharing", "Governed access for partners and customers."),
				],
			),
		}
	}
}

/// `/services/*`
#[derive(Debug, Clone, Copy)]
pub struct ServicesPage {
	kind: ServiceKind,
}

impl ServicesPage {
	/// Page for one service.
	pub fn new(kind: ServiceKind) -> Self {
		Self { kind }
	}

	/// The service shown.
	pub fn kind(&self) -> ServiceKind {
		self.kind
	}
}

impl PageComponent for ServicesPage {
	fn render(&self, _data: &InitialData) -> View {
		let (title, lead, features) = self.kind.copy();
		let siblings = ElementView::new("nav")
			.class("services__siblings")
			.attr("aria-label", "Services")
			.children(
				Route::ALL
					.into_iter()
					.filter(|route| route.is_service() && *route != self.kind.route())
					.map(Link::new),
			);

		page(self.kind.route())
			.child(header(title, lead))
			.child(cards(&features))
			.child(siblings)
			.child(demo_cta())
			.into_view()
	}

	fn name(&self) -> &'static str {
		"ServicesPage"
	}
}

/// `/industries`
#[derive(Debug, Clone, Copy, Default)]
pub struct IndustriesPage;

impl PageComponent for IndustriesPage {
	fn render(&self, _data: &InitialData) -> View {
		page(Route::Industries)
			.child(header(
				"Industries",
				"Built for teams whose data never stops arriving.",
			))
			.child(cards(&[
				("Financial services", "Reconcile transactions across ledgers daily."),
				("Healthcare", "Unify clinical and operational records."),
				("Retail", "Join inventory, orders and marketing spend."),
				("Logistics", "Track shipments from every carrier feed."),
			]))
			.into_view()
	}

	fn name(&self) -> &'static str {
		"IndustriesPage"
	}
}

/// `/architecture`
#[derive(Debug, Clone, Copy, Default)]
pub struct ArchitecturePage;

impl PageComponent for ArchitecturePage {
	fn render(&self, _data: &InitialData) -> View {
		let stages = ElementView::new("ol").class("architecture__flow").children(
			Route::ALL
				.into_iter()
				.filter(|route| route.is_service())
				.map(|route| {
					ElementView::new("li")
						.attr("data-stage", route.id())
						.child(Link::new(route))
				}),
		);

		page(Route::Architecture)
			.child(header(
				"Architecture",
				"Sources flow through ingestion, curation and distribution into one lake.",
			))
			.child(stages)
			.into_view()
	}

	fn name(&self) -> &'static str {
		"ArchitecturePage"
	}
}

/// `/about-us`
#[derive(Debug, Clone, Copy, Default)]
pub struct AboutUsPage;

impl PageComponent for AboutUsPage {
	fn render(&self, _data: &InitialData) -> View {
		page(Route::AboutUs)
			.child(header(
				"About us",
				"We are data engineers who got tired of rebuilding the same pipelines.",
			))
			.child(demo_cta())
			.into_view()
	}

	fn name(&self) -> &'static str {
		"AboutUsPage"
	}
}
