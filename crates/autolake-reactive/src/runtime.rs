//! Reactive Runtime
//!
//! This module provides the core reactive runtime for managing Signal dependencies,
//! Effect execution, and update scheduling.
//!
//! ## Architecture
//!
//! 1. **Observer Stack**: Tracks currently executing Effects
//! 2. **Dependency Tracking**: Records dependencies when `Signal::get()` is called
//! 3. **Layout Effects**: Re-run synchronously inside the `set()` that changed them
//! 4. **Passive Effects**: Queued and flushed by the installed scheduler (a browser
//!    micro-task in WASM) or manually via [`Runtime::flush_updates`]
//!
//! The runtime is thread-local. In WASM there is only one thread, so this
//! effectively provides a single runtime per page.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Unique identifier for reactive nodes (Signals and Effects)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
	/// Create a new unique NodeId
	pub fn new() -> Self {
		static COUNTER: AtomicUsize = AtomicUsize::new(0);
		Self(COUNTER.fetch_add(1, Ordering::Relaxed))
	}
}

impl Default for NodeId {
	fn default() -> Self {
		Self::new()
	}
}

/// Effect execution timing.
///
/// - Layout effects run synchronously when a dependency changes, before the
///   `set()` call returns (and therefore before the browser can paint)
/// - Passive effects are queued and run when updates are flushed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EffectTiming {
	/// Runs synchronously inside the signal write
	Layout,
	/// Runs on the next flush
	#[default]
	Passive,
}

/// Dependency graph node
#[derive(Debug, Default)]
pub(crate) struct DependencyNode {
	/// IDs of nodes that depend on this node
	pub(crate) subscribers: Vec<NodeId>,
	/// IDs of nodes this node depends on
	pub(crate) dependencies: Vec<NodeId>,
}

/// A deferred flush handed to the scheduler.
pub type ScheduledTask = Box<dyn FnOnce() + 'static>;

type SchedulerFn = Box<dyn Fn(ScheduledTask) + 'static>;

thread_local! {
	static SCHEDULER: RefCell<Option<SchedulerFn>> = const { RefCell::new(None) };
}

/// Set the scheduler used to flush passive effects.
///
/// In WASM this is typically a micro-task:
///
/// ```ignore
/// autolake_reactive::set_scheduler(|task| {
///     wasm_bindgen_futures::spawn_local(async move { task() });
/// });
/// ```
///
/// Without a scheduler, passive updates stay queued until
/// [`Runtime::flush_updates`] is called. Tests rely on this.
pub fn set_scheduler<F>(scheduler: F)
where
	F: Fn(ScheduledTask) + 'static,
{
	SCHEDULER.with(|s| *s.borrow_mut() = Some(Box::new(scheduler)));
}

/// Remove the installed scheduler, if any.
pub fn clear_scheduler() {
	SCHEDULER.with(|s| s.borrow_mut().take());
}

/// Reactive runtime
///
/// Manages the dependency graph, the observer stack and the queue of pending
/// passive effects.
pub struct Runtime {
	/// Observer stack for tracking currently executing effects
	observer_stack: RefCell<Vec<NodeId>>,
	/// Dependency graph: NodeId -> DependencyNode
	pub(crate) dependency_graph: RefCell<BTreeMap<NodeId, DependencyNode>>,
	/// Pending passive updates
	pub(crate) pending_updates: RefCell<Vec<NodeId>>,
	/// Whether a flush has been handed to the scheduler
	update_scheduled: Cell<bool>,
}

impl Runtime {
	/// Create a new Runtime instance
	pub fn new() -> Self {
		Self {
			observer_stack: RefCell::new(Vec::new()),
			dependency_graph: RefCell::new(BTreeMap::new()),
			pending_updates: RefCell::new(Vec::new()),
			update_scheduled: Cell::new(false),
		}
	}

	/// Get the currently executing observer
	pub fn current_observer(&self) -> Option<NodeId> {
		self.observer_stack.borrow().last().copied()
	}

	pub(crate) fn push_observer(&self, id: NodeId) {
		self.observer_stack.borrow_mut().push(id);
	}

	pub(crate) fn pop_observer(&self) -> Option<NodeId> {
		self.observer_stack.borrow_mut().pop()
	}

	/// Track a dependency between the current observer and a signal
	///
	/// Called automatically by `Signal::get()`. Outside of an effect this is a no-op.
	pub fn track_dependency(&self, signal_id: NodeId) {
		let Some(observer_id) = self.current_observer() else {
			return;
		};
		let mut graph = self.dependency_graph.borrow_mut();

		let signal_node = graph.entry(signal_id).or_default();
		if !signal_node.subscribers.contains(&observer_id) {
			signal_node.subscribers.push(observer_id);
		}

		let observer_node = graph.entry(observer_id).or_default();
		if !observer_node.dependencies.contains(&signal_id) {
			observer_node.dependencies.push(signal_id);
		}
	}

	/// Notify that a Signal has changed
	///
	/// Layout subscribers are executed before this returns, passive subscribers
	/// are queued.
	pub fn notify_signal_change(&self, signal_id: NodeId) {
		let subscribers = match self.dependency_graph.borrow().get(&signal_id) {
			Some(node) => node.subscribers.clone(),
			None => return,
		};

		let mut layout_effects = Vec::new();
		for subscriber_id in subscribers {
			match crate::effect::effect_timing(subscriber_id) {
				Some(EffectTiming::Layout) => layout_effects.push(subscriber_id),
				Some(EffectTiming::Passive) => self.schedule_update(subscriber_id),
				None => {}
			}
		}

		for effect_id in layout_effects {
			crate::effect::execute_effect(effect_id);
		}
	}

	/// Queue a passive node for re-execution
	pub fn schedule_update(&self, node_id: NodeId) {
		{
			let mut pending = self.pending_updates.borrow_mut();
			if !pending.contains(&node_id) {
				pending.push(node_id);
			}
		}

		if self.update_scheduled.replace(true) {
			return;
		}

		let handed_off = SCHEDULER.with(|s| match s.borrow().as_ref() {
			Some(scheduler) => {
				scheduler(Box::new(|| with_runtime(|rt| rt.flush_updates())));
				true
			}
			None => false,
		});
		if !handed_off {
			self.update_scheduled.set(false);
		}
	}

	/// Run every queued passive effect
	///
	/// Effects that write signals while flushing may queue further effects;
	/// those run in the same call until the queue is empty.
	pub fn flush_updates(&self) {
		self.update_scheduled.set(false);
		loop {
			let pending = std::mem::take(&mut *self.pending_updates.borrow_mut());
			if pending.is_empty() {
				break;
			}
			tracing::trace!(count = pending.len(), "flushing passive effects");
			for node_id in pending {
				crate::effect::execute_effect(node_id);
			}
		}
	}

	/// Number of passive updates waiting for a flush
	pub fn pending_count(&self) -> usize {
		self.pending_updates.borrow().len()
	}

	/// Clear dependencies for a node before it re-executes
	pub fn clear_dependencies(&self, node_id: NodeId) {
		let mut graph = self.dependency_graph.borrow_mut();

		let dependencies = match graph.get_mut(&node_id) {
			Some(node) => std::mem::take(&mut node.dependencies),
			None => return,
		};

		for dep_id in dependencies {
			if let Some(dep_node) = graph.get_mut(&dep_id) {
				dep_node.subscribers.retain(|&id| id != node_id);
			}
		}
	}

	/// Remove a node from the dependency graph
	pub fn remove_node(&self, node_id: NodeId) {
		self.clear_dependencies(node_id);
		self.dependency_graph.borrow_mut().remove(&node_id);
		self.pending_updates.borrow_mut().retain(|&id| id != node_id);
	}

	/// Check if a node exists in the dependency graph
	pub fn has_node(&self, node_id: NodeId) -> bool {
		self.dependency_graph.borrow().contains_key(&node_id)
	}

	/// Get the number of subscribers for a node
	pub fn subscriber_count(&self, node_id: NodeId) -> usize {
		self.dependency_graph
			.borrow()
			.get(&node_id)
			.map(|node| node.subscribers.len())
			.unwrap_or(0)
	}
}

impl Default for Runtime {
	fn default() -> Self {
		Self::new()
	}
}

thread_local! {
	static RUNTIME: Runtime = Runtime::new();
}

/// Run a closure against the thread's runtime
pub fn with_runtime<F, R>(f: F) -> R
where
	F: FnOnce(&Runtime) -> R,
{
	RUNTIME.with(f)
}

/// Like [`with_runtime`], but returns `None` once thread-local storage is gone.
/// Used from `Drop` implementations.
pub(crate) fn try_with_runtime<F, R>(f: F) -> Option<R>
where
	F: FnOnce(&Runtime) -> R,
{
	RUNTIME.try_with(f).ok()
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serial_test::serial;
	use std::rc::Rc;

	#[rstest]
	#[serial(reactive)]
	fn test_node_id_uniqueness() {
		let id1 = NodeId::new();
		let id2 = NodeId::new();
		let id3 = NodeId::new();

		assert_ne!(id1, id2);
		assert_ne!(id2, id3);
		assert_ne!(id1, id3);
	}

	#[rstest]
	#[serial(reactive)]
	fn test_observer_stack() {
		let runtime = Runtime::new();
		assert!(runtime.current_observer().is_none());

		let outer = NodeId::new();
		let inner = NodeId::new();
		runtime.push_observer(outer);
		runtime.push_observer(inner);
		assert_eq!(runtime.current_observer(), Some(inner));

		runtime.pop_observer();
		assert_eq!(runtime.current_observer(), Some(outer));
		runtime.pop_observer();
		assert!(runtime.current_observer().is_none());
	}

	#[rstest]
	#[serial(reactive)]
	fn test_dependency_tracking() {
		let runtime = Runtime::new();
		let signal_id = NodeId::new();
		let effect_id = NodeId::new();

		runtime.push_observer(effect_id);
		runtime.track_dependency(signal_id);
		runtime.track_dependency(signal_id);
		runtime.pop_observer();

		let graph = runtime.dependency_graph.borrow();
		assert_eq!(graph[&signal_id].subscribers, vec![effect_id]);
		assert_eq!(graph[&effect_id].dependencies, vec![signal_id]);
	}

	#[rstest]
	#[serial(reactive)]
	fn test_track_without_observer_is_noop() {
		let runtime = Runtime::new();
		let signal_id = NodeId::new();

		runtime.track_dependency(signal_id);

		assert!(!runtime.has_node(signal_id));
	}

	#[rstest]
	#[serial(reactive)]
	fn test_clear_dependencies() {
		let runtime = Runtime::new();
		let signal_id = NodeId::new();
		let effect_id = NodeId::new();

		runtime.push_observer(effect_id);
		runtime.track_dependency(signal_id);
		runtime.pop_observer();

		runtime.clear_dependencies(effect_id);

		assert_eq!(runtime.subscriber_count(signal_id), 0);
		assert!(runtime.dependency_graph.borrow()[&effect_id].dependencies.is_empty());
	}

	#[rstest]
	#[serial(reactive)]
	fn test_scheduler_receives_flush_once() {
		let handed = Rc::new(RefCell::new(0));
		set_scheduler({
			let handed = Rc::clone(&handed);
			move |_task| *handed.borrow_mut() += 1
		});

		let runtime = Runtime::new();
		runtime.schedule_update(NodeId::new());
		runtime.schedule_update(NodeId::new());

		assert_eq!(*handed.borrow(), 1);
		assert_eq!(runtime.pending_count(), 2);
		clear_scheduler();
	}
}
