//! Effect - Reactive Side Effects
//!
//! `Effect` represents a side effect that automatically re-runs when its dependencies change.
//! Any Signal read with `get()` inside the effect closure becomes a dependency.
//!
//! ## Example
//!
//! ```
//! use autolake_reactive::{Effect, Signal, with_runtime};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let count = Signal::new(0);
//! let seen = Rc::new(Cell::new(0));
//!
//! let _effect = Effect::new({
//!     let count = count.clone();
//!     let seen = Rc::clone(&seen);
//!     move || seen.set(count.get())
//! });
//!
//! count.set(42);
//! with_runtime(|rt| rt.flush_updates());
//! assert_eq!(seen.get(), 42);
//! ```

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use crate::runtime::{EffectTiming, NodeId, try_with_runtime, with_runtime};

type EffectFn = Box<dyn FnMut() + 'static>;

struct EffectSlot {
	timing: EffectTiming,
	/// `None` while the effect is running.
	func: Option<EffectFn>,
}

thread_local! {
	static EFFECTS: RefCell<BTreeMap<NodeId, EffectSlot>> = const { RefCell::new(BTreeMap::new()) };
}

pub(crate) fn effect_timing(effect_id: NodeId) -> Option<EffectTiming> {
	EFFECTS
		.try_with(|storage| storage.borrow().get(&effect_id).map(|slot| slot.timing))
		.ok()
		.flatten()
}

/// Run an effect by id, re-tracking its dependencies.
///
/// The closure is taken out of storage while it runs, so an effect that
/// (indirectly) re-triggers itself is skipped instead of recursing, and
/// effects may freely create, run or drop other effects.
pub(crate) fn execute_effect(effect_id: NodeId) {
	let func = EFFECTS.with(|storage| {
		storage
			.borrow_mut()
			.get_mut(&effect_id)
			.and_then(|slot| slot.func.take())
	});
	let Some(mut func) = func else {
		return;
	};

	with_runtime(|rt| {
		rt.clear_dependencies(effect_id);
		rt.push_observer(effect_id);
	});

	func();

	with_runtime(|rt| rt.pop_observer());

	// Disposed while running: hand the closure back so it is dropped outside the borrow.
	let orphan = EFFECTS.with(|storage| match storage.borrow_mut().get_mut(&effect_id) {
		Some(slot) => {
			slot.func = Some(func);
			None
		}
		None => Some(func),
	});
	drop(orphan);
}

/// A reactive effect that automatically re-runs when its dependencies change
///
/// Effects run immediately when created. Dropping the handle disposes the
/// effect and unsubscribes it from every signal it read.
pub struct Effect {
	id: NodeId,
	disposed: Cell<bool>,
}

impl Effect {
	/// Create a passive effect
	pub fn new<F>(f: F) -> Self
	where
		F: FnMut() + 'static,
	{
		Self::new_with_timing(f, EffectTiming::Passive)
	}

	/// Create a layout effect, re-run synchronously inside the signal write
	/// that invalidated it.
	pub fn layout<F>(f: F) -> Self
	where
		F: FnMut() + 'static,
	{
		Self::new_with_timing(f, EffectTiming::Layout)
	}

	/// Create an effect with explicit timing
	pub fn new_with_timing<F>(f: F, timing: EffectTiming) -> Self
	where
		F: FnMut() + 'static,
	{
		let id = NodeId::new();
		EFFECTS.with(|storage| {
			storage.borrow_mut().insert(
				id,
				EffectSlot {
					timing,
					func: Some(Box::new(f)),
				},
			);
		});

		execute_effect(id);

		Self {
			id,
			disposed: Cell::new(false),
		}
	}

	/// Get the NodeId of this effect
	pub fn id(&self) -> NodeId {
		self.id
	}

	/// Whether [`dispose`](Self::dispose) has run
	pub fn is_disposed(&self) -> bool {
		self.disposed.get()
	}

	/// Dispose this effect. It never runs again.
	pub fn dispose(&self) {
		if self.disposed.replace(true) {
			return;
		}

		let _ = try_with_runtime(|rt| rt.remove_node(self.id));

		let removed = EFFECTS
			.try_with(|storage| storage.borrow_mut().remove(&self.id))
			.ok()
			.flatten();
		drop(removed);
	}
}

impl Drop for Effect {
	fn drop(&mut self) {
		self.dispose();
	}
}

impl std::fmt::Debug for Effect {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Effect")
			.field("id", &self.id)
			.field("disposed", &self.disposed.get())
			.finish()
	}
}

/// Runs a passive side effect. Equivalent to [`Effect::new`].
pub fn use_effect<F>(f: F) -> Effect
where
	F: FnMut() + 'static,
{
	Effect::new(f)
}

/// Runs a side effect synchronously with the signal write that invalidated it,
/// before the browser gets a chance to paint. Equivalent to [`Effect::layout`].
///
/// Use this when observers must never see two sources of truth disagree,
/// e.g. keeping router state aligned with the URL after `popstate`.
pub fn use_layout_effect<F>(f: F) -> Effect
where
	F: FnMut() + 'static,
{
	Effect::layout(f)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::Signal;
	use rstest::rstest;
	use serial_test::serial;
	use std::rc::Rc;

	fn flush() {
		with_runtime(|rt| rt.flush_updates());
	}

	#[rstest]
	#[serial(reactive)]
	fn test_effect_runs_immediately() {
		let run_count = Rc::new(Cell::new(0));

		let _effect = Effect::new({
			let run_count = Rc::clone(&run_count);
			move || run_count.set(run_count.get() + 1)
		});

		assert_eq!(run_count.get(), 1);
	}

	#[rstest]
	#[serial(reactive)]
	fn test_passive_effect_waits_for_flush() {
		let signal = Signal::new(0);
		let values = Rc::new(RefCell::new(Vec::new()));

		let _effect = Effect::new({
			let signal = signal.clone();
			let values = Rc::clone(&values);
			move || values.borrow_mut().push(signal.get())
		});

		signal.set(10);
		assert_eq!(*values.borrow(), vec![0]);

		flush();
		assert_eq!(*values.borrow(), vec![0, 10]);
	}

	#[rstest]
	#[serial(reactive)]
	fn test_layout_effect_runs_inside_set() {
		let signal = Signal::new(0);
		let values = Rc::new(RefCell::new(Vec::new()));

		let _effect = use_layout_effect({
			let signal = signal.clone();
			let values = Rc::clone(&values);
			move || values.borrow_mut().push(signal.get())
		});

		signal.set(7);
		assert_eq!(*values.borrow(), vec![0, 7]);
		assert_eq!(with_runtime(|rt| rt.pending_count()), 0);
	}

	#[rstest]
	#[serial(reactive)]
	fn test_layout_effect_chain() {
		let source = Signal::new(1);
		let doubled = Signal::new(0);
		let observed = Rc::new(Cell::new(0));

		let _double = Effect::layout({
			let source = source.clone();
			let doubled = doubled.clone();
			move || doubled.set(source.get() * 2)
		});
		let _observe = Effect::layout({
			let doubled = doubled.clone();
			let observed = Rc::clone(&observed);
			move || observed.set(doubled.get())
		});

		source.set(21);
		assert_eq!(observed.get(), 42);
	}

	#[rstest]
	#[serial(reactive)]
	fn test_effect_writing_own_dependency_does_not_recurse() {
		let signal = Signal::new(0);

		let _effect = Effect::layout({
			let signal = signal.clone();
			move || {
				let value = signal.get();
				if value < 100 {
					signal.set(value + 1);
				}
			}
		});

		assert_eq!(signal.get_untracked(), 1);
	}

	#[rstest]
	#[serial(reactive)]
	fn test_effect_dispose() {
		let signal = Signal::new(0);
		let run_count = Rc::new(Cell::new(0));

		let effect = Effect::new({
			let signal = signal.clone();
			let run_count = Rc::clone(&run_count);
			move || {
				let _ = signal.get();
				run_count.set(run_count.get() + 1);
			}
		});

		effect.dispose();
		assert!(effect.is_disposed());

		signal.set(10);
		flush();
		assert_eq!(run_count.get(), 1);
	}

	#[rstest]
	#[serial(reactive)]
	fn test_effect_drop_cleans_up() {
		let signal = Signal::new(0);
		let run_count = Rc::new(Cell::new(0));

		{
			let _effect = Effect::new({
				let signal = signal.clone();
				let run_count = Rc::clone(&run_count);
				move || {
					let _ = signal.get();
					run_count.set(run_count.get() + 1);
				}
			});
		}

		signal.set(10);
		flush();
		assert_eq!(run_count.get(), 1);
		assert_eq!(with_runtime(|rt| rt.subscriber_count(signal.id())), 0);
	}
}
