//! Event listener subscriptions that are removed again when dropped.

use hashbrown::{hash_map::Entry, HashMap};
use js_sys::Function;
use tracing::{error, instrument, trace};
use wasm_bindgen::{closure::Closure, JsCast, JsValue, UnwrapThrowExt};

/// A subset of [***AddEventListenerOptions***](https://developer.mozilla.org/en-US/docs/Web/API/EventTarget/addEventListener#options).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ListenOptions {
	pub capture: bool,
	/// `true` promises not to call `preventDefault`, which browsers may assume anyway for some touch listeners unless this is explicitly `false`.
	pub passive: bool,
}
impl ListenOptions {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Explicitly non-passive, so that `preventDefault` is honoured.
	#[must_use]
	pub fn active() -> Self {
		Self { capture: false, passive: false }
	}

	fn cache_index(self) -> usize {
		self.capture as usize + self.passive as usize * 2
	}
}

/// An attached event listener.
///
/// Dropping this removes the listener from its target.
pub struct Subscription {
	target: web_sys::EventTarget,
	event_type: &'static str,
	capture: bool,
	handler: Closure<dyn FnMut(web_sys::Event)>,
}
impl core::fmt::Debug for Subscription {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("Subscription")
			.field("target", &self.target)
			.field("event_type", &self.event_type)
			.field("capture", &self.capture)
			.finish_non_exhaustive()
	}
}
impl Subscription {
	/// Attaches `handler` to `target` for events of `event_type`.
	///
	/// # Errors
	///
	/// Iff `addEventListener` throws.
	pub fn listen(
		target: &web_sys::EventTarget,
		event_type: &'static str,
		options: &web_sys::AddEventListenerOptions,
		capture: bool,
		handler: impl 'static + FnMut(web_sys::Event),
	) -> Result<Self, JsValue> {
		let handler = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web_sys::Event)>);
		target.add_event_listener_with_callback_and_add_event_listener_options(event_type, handler.as_ref().unchecked_ref::<Function>(), options)?;
		trace!("Added {:?} listener.", event_type);
		Ok(Self {
			target: target.clone(),
			event_type,
			capture,
			handler,
		})
	}
}
impl Drop for Subscription {
	fn drop(&mut self) {
		if let Err(error) = self
			.target
			.remove_event_listener_with_callback_and_bool(self.event_type, self.handler.as_ref().unchecked_ref::<Function>(), self.capture)
		{
			error!("Failed to remove event listener {:?}: {:?}", self.event_type, error)
		}
		trace!("Removed {:?} listener.", self.event_type);
	}
}

/// Which element of a reorderable list a listener is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
	Container,
	Item(u32),
	Handle(u32),
}

/// Active subscriptions, at most one per [`Slot`] and event type.
///
/// Inserting under an occupied key replaces (and so removes) the previous listener, so listeners never stack.
#[derive(Debug, Default)]
pub struct ListenerTable {
	subscriptions: HashMap<(Slot, &'static str), Subscription>,
	options_cache: [Option<web_sys::AddEventListenerOptions>; 4],
}
impl ListenerTable {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	fn get_cached_add_event_listener_options(options_cache: &mut [Option<web_sys::AddEventListenerOptions>; 4], options: ListenOptions) -> &web_sys::AddEventListenerOptions {
		let entry = options_cache.get_mut(options.cache_index()).unwrap_throw();

		if entry.is_none() {
			let web_options = web_sys::AddEventListenerOptions::new();
			web_options.set_capture(options.capture);
			web_options.set_passive(options.passive);
			*entry = Some(web_options)
		}

		entry.as_ref().unwrap_throw()
	}

	/// Attaches `handler` to `target` under `slot`, replacing any previous listener for the same slot and event type.
	///
	/// Returns whether a listener was replaced. Failures are logged and leave any previous listener in place.
	#[instrument(skip(self, handler))]
	pub fn listen(&mut self, slot: Slot, target: &web_sys::EventTarget, event_type: &'static str, options: ListenOptions, handler: impl 'static + FnMut(web_sys::Event)) -> bool {
		let web_options = Self::get_cached_add_event_listener_options(&mut self.options_cache, options);
		let subscription = match Subscription::listen(target, event_type, web_options, options.capture, handler) {
			Ok(subscription) => subscription,
			Err(error) => {
				error!("Failed to add event listener {:?}: {:?}", event_type, error);
				return false;
			}
		};

		match self.subscriptions.entry((slot, event_type)) {
			Entry::Occupied(mut occupied) => {
				trace!("Replacing {:?} listener on {:?}.", event_type, slot);
				drop(occupied.insert(subscription));
				true
			}
			Entry::Vacant(vacant) => {
				vacant.insert(subscription);
				false
			}
		}
	}

	/// Removes every listener whose slot doesn't satisfy `keep`.
	pub fn retain(&mut self, mut keep: impl FnMut(Slot) -> bool) {
		self.subscriptions.retain(|&(slot, _), _| keep(slot));
	}

	/// Removes every listener.
	pub fn clear(&mut self) {
		self.subscriptions.clear();
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.subscriptions.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.subscriptions.is_empty()
	}
}
