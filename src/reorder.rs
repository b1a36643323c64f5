//! Wiring of drag and touch listeners for a reorderable container.

use crate::{
	describe::describe,
	gesture::{DragState, Finished, Gesture, DRAGGING_CLASS},
	handle::{find_drag_handle, handle_is_active, DEFAULT_HANDLE_SELECTOR},
	listener::{ListenOptions, ListenerTable, Slot},
	pointer::{drag_gesture, prepare_data_transfer, touch_gestures},
};
use core::cell::RefCell;
use std::{borrow::Cow, rc::Rc};
use tracing::{debug, error, instrument, trace_span, warn};
use wasm_bindgen::JsCast;

/// Invoked with the dropped item once the DOM reflects its new position.
pub type DropCallback = Rc<dyn Fn(&web_sys::Element)>;

/// Configuration of a [`Reorderable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderOptions {
	pub dragging_class: Cow<'static, str>,
	pub handle_selector: Cow<'static, str>,
	pub drag_image_offset: (i32, i32),
	pub touch: bool,
}
impl Default for ReorderOptions {
	fn default() -> Self {
		Self {
			dragging_class: Cow::Borrowed(DRAGGING_CLASS),
			handle_selector: Cow::Borrowed(DEFAULT_HANDLE_SELECTOR),
			drag_image_offset: (-20, -20),
			touch: true,
		}
	}
}
impl ReorderOptions {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn with_dragging_class(self, dragging_class: impl Into<Cow<'static, str>>) -> Self {
		Self {
			dragging_class: dragging_class.into(),
			..self
		}
	}

	#[must_use]
	pub fn with_handle_selector(self, handle_selector: impl Into<Cow<'static, str>>) -> Self {
		Self {
			handle_selector: handle_selector.into(),
			..self
		}
	}

	#[must_use]
	pub fn with_drag_image_offset(self, drag_image_offset: (i32, i32)) -> Self {
		Self { drag_image_offset, ..self }
	}

	#[must_use]
	pub fn with_touch(self, touch: bool) -> Self {
		Self { touch, ..self }
	}
}

struct Shared {
	container: web_sys::Element,
	options: ReorderOptions,
	state: RefCell<DragState>,
	on_drop: RefCell<Option<DropCallback>>,
}
impl Shared {
	fn gesture(&self, gesture: Gesture) {
		let span = trace_span!("gesture", ?gesture);
		let _enter = span.enter();

		let finished = {
			let mut state = self.state.borrow_mut();
			match gesture {
				Gesture::Start(item) => {
					state.start(&item);
					None
				}
				Gesture::Over(over) => {
					state.over(&over);
					None
				}
				Gesture::Drop => {
					state.record_drop();
					None
				}
				Gesture::End => state.finish(false),
				Gesture::Cancel => state.finish(true),
			}
		};

		// The callback runs without any borrows held, so it may rebuild the list and call `enable_reordering` again.
		if let Some(Finished::Committed(item)) = finished {
			let on_drop = self.on_drop.borrow().clone();
			if let Some(on_drop) = on_drop {
				on_drop(&item);
			}
		}
	}
}

/// Makes the child elements of one container reorderable by dragging them around.
///
/// Listeners are removed when this instance is dropped.
/// While an item is dragged, it carries [`ReorderOptions::dragging_class`].
pub struct Reorderable {
	shared: Rc<Shared>,
	listeners: ListenerTable,
}
impl core::fmt::Debug for Reorderable {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("Reorderable")
			.field("container", &self.shared.container)
			.field("options", &self.shared.options)
			.field("state", &self.shared.state)
			.field("listeners", &self.listeners)
			.finish_non_exhaustive()
	}
}
impl Reorderable {
	/// Registers listeners on `container` and its current children.
	///
	/// `on_drop` is called once per committed drop with the dropped item.
	#[must_use]
	pub fn new(container: web_sys::Element, on_drop: Option<DropCallback>) -> Self {
		Self::with_options(container, on_drop, ReorderOptions::default())
	}

	#[must_use]
	#[instrument(skip(on_drop))]
	pub fn with_options(container: web_sys::Element, on_drop: Option<DropCallback>, options: ReorderOptions) -> Self {
		let state = DragState::new(options.dragging_class.clone().into_owned());
		let mut this = Self {
			shared: Rc::new(Shared {
				container,
				options,
				state: RefCell::new(state),
				on_drop: RefCell::new(on_drop),
			}),
			listeners: ListenerTable::new(),
		};
		this.bind_container();
		this.bind_items();
		this
	}

	#[must_use]
	pub fn container(&self) -> &web_sys::Element {
		&self.shared.container
	}

	#[must_use]
	pub fn options(&self) -> &ReorderOptions {
		&self.shared.options
	}

	/// Whether a drag is currently in progress.
	#[must_use]
	pub fn is_dragging(&self) -> bool {
		self.shared.state.borrow().is_dragging()
	}

	/// The number of attached event listeners.
	#[must_use]
	pub fn listener_count(&self) -> usize {
		self.listeners.len()
	}

	pub fn set_on_drop(&self, on_drop: Option<DropCallback>) {
		*self.shared.on_drop.borrow_mut() = on_drop;
	}

	/// Feeds a gesture phase into this instance as if it had come from an input event.
	pub fn gesture(&self, gesture: Gesture) {
		self.shared.gesture(gesture);
	}

	/// Replaces the item listeners after the container's children were rebuilt.
	///
	/// A drag in progress is reverted first, without calling the drop callback.
	#[instrument]
	pub fn rebind(&mut self) {
		{
			let mut state = self.shared.state.borrow_mut();
			if let Some(finished) = state.finish(true) {
				warn!("Rebound during an active drag. Reverted it: {:?}", finished);
			}
		}
		self.listeners.retain(|slot| slot == Slot::Container);
		self.bind_items();
	}

	fn bind_container(&mut self) {
		let target: &web_sys::EventTarget = self.shared.container.as_ref();

		let shared = Rc::downgrade(&self.shared);
		self.listeners.listen(Slot::Container, target, "drop", ListenOptions::new(), move |event| {
			event.prevent_default();
			if let Some(shared) = shared.upgrade() {
				debug!("Drop on {}", describe(&shared.container));
				shared.gesture(Gesture::Drop);
			}
		});

		// Accepting `"dragover"` is what makes the container a drop target.
		self.listeners.listen(Slot::Container, target, "dragover", ListenOptions::new(), |event| event.prevent_default());

		let shared = Rc::downgrade(&self.shared);
		self.listeners.listen(Slot::Container, target, "dragend", ListenOptions::new(), move |_| {
			if let Some(shared) = shared.upgrade() {
				debug!("Drag end on {}", describe(&shared.container));
				shared.gesture(Gesture::End);
			}
		});
	}

	fn bind_items(&mut self) {
		let children = self.shared.container.children();
		for index in 0..children.length() {
			let item = match children.item(index) {
				Some(item) => item,
				None => continue,
			};
			self.bind_item(index, &item);
		}
	}

	fn bind_item(&mut self, index: u32, item: &web_sys::Element) {
		let target: &web_sys::EventTarget = item.as_ref();

		for &event_type in &["dragstart", "dragover"] {
			let shared = Rc::downgrade(&self.shared);
			let item = item.clone();
			self.listeners.listen(Slot::Item(index), target, event_type, ListenOptions::new(), move |event| {
				let shared = match shared.upgrade() {
					Some(shared) => shared,
					None => return,
				};
				match drag_gesture(&event, &item) {
					Some(Gesture::Start(item)) => {
						prepare_data_transfer(&event, &item, shared.options.drag_image_offset);
						shared.gesture(Gesture::Start(item));
					}
					Some(gesture) => {
						event.prevent_default();
						shared.gesture(gesture);
					}
					None => (),
				}
			});
		}

		if !self.shared.options.touch {
			return;
		}

		let handle = match find_drag_handle(item, &self.shared.options.handle_selector) {
			Some(handle) => handle,
			None => return error!("No drag handle found in {}. Skipping touch support for it.", describe(item)),
		};
		let handle_target: &web_sys::EventTarget = handle.as_ref();

		for &event_type in &["touchstart", "touchmove", "touchcancel", "touchend"] {
			let shared = Rc::downgrade(&self.shared);
			let item = item.clone();
			let handle = handle.clone();
			self.listeners.listen(Slot::Handle(index), handle_target, event_type, ListenOptions::active(), move |event| {
				let shared = match shared.upgrade() {
					Some(shared) => shared,
					None => return,
				};
				let event = match event.dyn_into::<web_sys::TouchEvent>() {
					Ok(event) => event,
					Err(event) => return warn!("Expected `TouchEvent` but received {:?}.", event),
				};

				if event_type == "touchstart" && !handle_is_active(&handle) {
					return debug!("Ignoring touch start on currently inactive handle of {}.", describe(&item));
				}

				let dragging = shared.state.borrow().is_dragging_item(&item);
				// Not preventing the default of `"touchend"` keeps the synthesized `"click"`.
				if dragging && (event_type == "touchmove" || event_type == "touchcancel") {
					event.prevent_default();
				}

				for gesture in touch_gestures(&event, &shared.container, &item, dragging) {
					shared.gesture(gesture);
				}
			});
		}
	}
}
impl Drop for Reorderable {
	fn drop(&mut self) {
		let mut state = self.shared.state.borrow_mut();
		if state.is_dragging() {
			drop(state.finish(true));
		}
	}
}

thread_local! {
	static REGISTRY: RefCell<Vec<Reorderable>> = RefCell::new(Vec::new());
}

/// Makes the children of `container` reorderable, calling `on_drop` with each dropped item.
///
/// Calling this again for the same container (for example after its items were rebuilt) replaces the callback
/// and re-registers the item listeners instead of adding more of them.
///
/// Containers that were enabled earlier but are no longer connected to a document are released here.
/// Call [`disable_reordering`] to release a container explicitly, for example before detaching it temporarily.
pub fn enable_reordering(container: &web_sys::Element, on_drop: Option<DropCallback>) {
	enable_reordering_with_options(container, on_drop, ReorderOptions::default());
}

/// Like [`enable_reordering`], with explicit options.
///
/// Options of an already enabled container are only replaced if they differ, which discards any active drag.
pub fn enable_reordering_with_options(container: &web_sys::Element, on_drop: Option<DropCallback>, options: ReorderOptions) {
	// Dropping replaced or pruned instances happens outside the registry borrow, since that removes listeners.
	let (replaced, pruned) = REGISTRY.with(|registry| {
		let mut registry = registry.borrow_mut();

		let (kept, pruned): (Vec<_>, Vec<_>) = registry.drain(..).partition(|reorderable| reorderable.container() == container || reorderable.container().is_connected());
		*registry = kept;
		if !pruned.is_empty() {
			debug!("Releasing {} detached container(s).", pruned.len());
		}

		let replaced = match registry.iter().position(|reorderable| reorderable.container() == container) {
			Some(index) if registry[index].options() == &options => {
				let reorderable = &mut registry[index];
				reorderable.set_on_drop(on_drop);
				reorderable.rebind();
				None
			}
			Some(index) => Some(core::mem::replace(&mut registry[index], Reorderable::with_options(container.clone(), on_drop, options))),
			None => {
				registry.push(Reorderable::with_options(container.clone(), on_drop, options));
				None
			}
		};
		(replaced, pruned)
	});
	drop(replaced);
	drop(pruned);
}

/// Removes all reordering listeners from `container`, reverting any active drag.
///
/// Returns whether reordering was enabled.
pub fn disable_reordering(container: &web_sys::Element) -> bool {
	let removed = REGISTRY.with(|registry| {
		let mut registry = registry.borrow_mut();
		registry
			.iter()
			.position(|reorderable| reorderable.container() == container)
			.map(|index| registry.swap_remove(index))
	});
	removed.is_some()
}
