//! Scoped, type-keyed context
//!
//! A provider pushes a value for its type and receives a [`ContextGuard`];
//! while the guard lives, [`use_context`] anywhere on the same thread returns
//! the innermost provided value. Dropping the guard restores the outer one.
//!
//! ```
//! use autolake_reactive::{provide_context, use_context};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Theme(&'static str);
//!
//! assert_eq!(use_context::<Theme>(), None);
//! {
//!     let _guard = provide_context(Theme("dark"));
//!     assert_eq!(use_context::<Theme>(), Some(Theme("dark")));
//! }
//! assert_eq!(use_context::<Theme>(), None);
//! ```

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::rc::Rc;

thread_local! {
	static CONTEXTS: RefCell<HashMap<TypeId, Vec<Box<dyn Any>>>> = RefCell::new(HashMap::new());
}

/// Keeps a provided context value alive. Dropping it pops the value.
#[must_use = "the context is removed as soon as the guard is dropped"]
pub struct ContextGuard<T: 'static> {
	depth: usize,
	_marker: PhantomData<(fn() -> T, Rc<()>)>,
}

impl<T: 'static> std::fmt::Debug for ContextGuard<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ContextGuard")
			.field("type", &std::any::type_name::<T>())
			.field("depth", &self.depth)
			.finish()
	}
}

impl<T: 'static> Drop for ContextGuard<T> {
	fn drop(&mut self) {
		// Values are moved out before being dropped so their destructors run
		// without the registry borrowed.
		let popped = CONTEXTS
			.try_with(|contexts| {
				let mut contexts = contexts.borrow_mut();
				contexts
					.get_mut(&TypeId::of::<T>())
					.map(|stack| stack.split_off(self.depth.min(stack.len())))
			})
			.ok()
			.flatten();
		drop(popped);
	}
}

/// Provide `value` to every [`use_context::<T>`] call made while the guard lives.
pub fn provide_context<T: Clone + 'static>(value: T) -> ContextGuard<T> {
	let depth = CONTEXTS.with(|contexts| {
		let mut contexts = contexts.borrow_mut();
		let stack = contexts.entry(TypeId::of::<T>()).or_default();
		stack.push(Box::new(value));
		stack.len() - 1
	});
	ContextGuard {
		depth,
		_marker: PhantomData,
	}
}

/// Read the innermost provided value of type `T`, if any.
pub fn use_context<T: Clone + 'static>() -> Option<T> {
	CONTEXTS.with(|contexts| {
		contexts
			.borrow()
			.get(&TypeId::of::<T>())
			.and_then(|stack| stack.last())
			.and_then(|value| value.downcast_ref::<T>())
			.cloned()
	})
}

/// Whether a value of type `T` is currently provided.
pub fn has_context<T: 'static>() -> bool {
	CONTEXTS.with(|contexts| {
		contexts
			.borrow()
			.get(&TypeId::of::<T>())
			.is_some_and(|stack| !stack.is_empty())
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serial_test::serial;

	#[derive(Clone, Debug, PartialEq)]
	struct Locale(&'static str);

	#[rstest]
	#[serial(reactive)]
	fn test_use_context_without_provider() {
		assert!(use_context::<Locale>().is_none());
		assert!(!has_context::<Locale>());
	}

	#[rstest]
	#[serial(reactive)]
	fn test_nested_providers_shadow_and_restore() {
		let _outer = provide_context(Locale("en"));
		{
			let _inner = provide_context(Locale("ja"));
			assert_eq!(use_context::<Locale>(), Some(Locale("ja")));
		}
		assert_eq!(use_context::<Locale>(), Some(Locale("en")));
	}

	#[rstest]
	#[serial(reactive)]
	fn test_contexts_are_keyed_by_type() {
		let _locale = provide_context(Locale("fr"));
		let _count = provide_context(3_u32);

		assert_eq!(use_context::<u32>(), Some(3));
		assert_eq!(use_context::<Locale>(), Some(Locale("fr")));
		assert!(use_context::<String>().is_none());
	}

	#[rstest]
	#[serial(reactive)]
	fn test_guard_drop_clears_provider() {
		let guard = provide_context(Locale("de"));
		assert!(has_context::<Locale>());
		drop(guard);
		assert!(!has_context::<Locale>());
	}
}
