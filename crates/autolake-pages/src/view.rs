//! View tree and HTML rendering.
//!
//! Pages and chrome build a [`View`] with the [`ElementView`] builder; the
//! shell turns it into markup with [`View::render_to_string`]. Text and
//! attribute values are always escaped.

use std::borrow::Cow;
use std::fmt;

/// Renderable content.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
	/// An element with attributes and children.
	Element(ElementView),
	/// Escaped text.
	Text(Cow<'static, str>),
	/// Siblings without a wrapper element.
	Fragment(Vec<View>),
	/// Nothing.
	Empty,
}

/// An element node.
#[derive(Clone, PartialEq)]
pub struct ElementView {
	tag: Cow<'static, str>,
	attrs: Vec<(Cow<'static, str>, Cow<'static, str>)>,
	children: Vec<View>,
}

const VOID_ELEMENTS: &[&str] = &[
	"area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
	"wbr",
];

impl ElementView {
	/// Start an element with the given tag name.
	pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
		Self {
			tag: tag.into(),
			attrs: Vec::new(),
			children: Vec::new(),
		}
	}

	/// Add an attribute.
	pub fn attr(
		mut self,
		name: impl Into<Cow<'static, str>>,
		value: impl Into<Cow<'static, str>>,
	) -> Self {
		self.attrs.push((name.into(), value.into()));
		self
	}

	/// Add an attribute only when `condition` holds.
	pub fn attr_if(
		self,
		condition: bool,
		name: impl Into<Cow<'static, str>>,
		value: impl Into<Cow<'static, str>>,
	) -> Self {
		if condition {
			self.attr(name, value)
		} else {
			self
		}
	}

	/// Shorthand for the `class` attribute.
	pub fn class(self, class: impl Into<Cow<'static, str>>) -> Self {
		self.attr("class", class)
	}

	/// Append a child.
	pub fn child(mut self, child: impl IntoView) -> Self {
		self.children.push(child.into_view());
		self
	}

	/// Append several children.
	pub fn children(mut self, children: impl IntoIterator<Item = impl IntoView>) -> Self {
		self.children
			.extend(children.into_iter().map(IntoView::into_view));
		self
	}

	/// Tag name.
	pub fn tag_name(&self) -> &str {
		&self.tag
	}

	/// Value of the first attribute called `name`.
	pub fn attr_value(&self, name: &str) -> Option<&str> {
		self.attrs
			.iter()
			.find(|(key, _)| key == name)
			.map(|(_, value)| value.as_ref())
	}

	/// All attributes in insertion order.
	pub fn attrs(&self) -> &[(Cow<'static, str>, Cow<'static, str>)] {
		&self.attrs
	}

	/// Child views.
	pub fn child_views(&self) -> &[View] {
		&self.children
	}

	/// Whether the element has no closing tag.
	pub fn is_void(&self) -> bool {
		VOID_ELEMENTS.contains(&self.tag.as_ref())
	}
}

impl fmt::Debug for ElementView {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ElementView")
			.field("tag", &self.tag)
			.field("attrs", &self.attrs)
			.field("children", &self.children.len())
			.finish()
	}
}

impl View {
	/// Start an element.
	pub fn element(tag: impl Into<Cow<'static, str>>) -> ElementView {
		ElementView::new(tag)
	}

	/// A text node.
	pub fn text(content: impl Into<Cow<'static, str>>) -> Self {
		Self::Text(content.into())
	}

	/// A fragment.
	pub fn fragment(children: impl IntoIterator<Item = impl IntoView>) -> Self {
		Self::Fragment(children.into_iter().map(IntoView::into_view).collect())
	}

	/// Render to HTML.
	pub fn render_to_string(&self) -> String {
		let mut output = String::new();
		self.write_html(&mut output);
		output
	}

	/// Concatenated text of this view and its descendants, unescaped.
	pub fn text_content(&self) -> String {
		let mut output = String::new();
		self.write_text(&mut output);
		output
	}

	/// First element in document order matching `predicate`.
	pub fn find(&self, predicate: &dyn Fn(&ElementView) -> bool) -> Option<&ElementView> {
		match self {
			View::Element(element) => {
				if predicate(element) {
					return Some(element);
				}
				element
					.children
					.iter()
					.find_map(|child| child.find(predicate))
			}
			View::Fragment(children) => children.iter().find_map(|child| child.find(predicate)),
			View::Text(_) | View::Empty => None,
		}
	}

	fn write_html(&self, output: &mut String) {
		match self {
			View::Element(element) => {
				output.push('<');
				output.push_str(&element.tag);
				for (name, value) in &element.attrs {
					output.push(' ');
					output.push_str(name);
					output.push_str("=\"");
					output.push_str(&html_escape(value));
					output.push('"');
				}
				output.push('>');
				if element.is_void() {
					return;
				}
				for child in &element.children {
					child.write_html(output);
				}
				output.push_str("</");
				output.push_str(&element.tag);
				output.push('>');
			}
			View::Text(text) => output.push_str(&html_escape(text)),
			View::Fragment(children) => {
				for child in children {
					child.write_html(output);
				}
			}
			View::Empty => {}
		}
	}

	fn write_text(&self, output: &mut String) {
		match self {
			View::Element(element) => {
				for child in &element.children {
					child.write_text(output);
				}
			}
			View::Text(text) => output.push_str(text),
			View::Fragment(children) => {
				for child in children {
					child.write_text(output);
				}
			}
			View::Empty => {}
		}
	}
}

impl fmt::Display for View {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.render_to_string())
	}
}

/// Conversion into a [`View`].
pub trait IntoView {
	/// Convert.
	fn into_view(self) -> View;
}

impl IntoView for View {
	fn into_view(self) -> View {
		self
	}
}

impl IntoView for ElementView {
	fn into_view(self) -> View {
		View::Element(self)
	}
}

impl IntoView for String {
	fn into_view(self) -> View {
		View::Text(Cow::Owned(self))
	}
}

impl IntoView for &'static str {
	fn into_view(self) -> View {
		View::Text(Cow::Borrowed(self))
	}
}

impl<T: IntoView> IntoView for Option<T> {
	fn into_view(self) -> View {
		self.map_or(View::Empty, IntoView::into_view)
	}
}

impl<T: IntoView> IntoView for Vec<T> {
	fn into_view(self) -> View {
		View::fragment(self)
	}
}

/// A reusable piece of UI.
pub trait Component {
	/// Build the component's view.
	fn render(&self) -> View;
}

/// Escape `&`, `<`, `>`, `"` and `'`.
pub fn html_escape(s: &str) -> Cow<'_, str> {
	if !s.contains(['&', '<', '>', '"', '\'']) {
		return Cow::Borrowed(s);
	}
	let mut escaped = String::with_capacity(s.len() + 8);
	for c in s.chars() {
		match c {
			'&' => escaped.push_str("&amp;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			'"' => escaped.push_str("&quot;"),
			'\'' => escaped.push_str("&#x27;"),
			_ => escaped.push(c),
		}
	}
	Cow::Owned(escaped)
}
