//! Adapters from native input events to [`Gesture`]s.

use crate::gesture::Gesture;
use tracing::trace;
use wasm_bindgen::JsCast;

/// Translates a native HTML drag-and-drop event on `item` into a [`Gesture`].
///
/// `"dragover"` is translated regardless of which item is being dragged. Other event types yield [`None`].
#[must_use]
pub fn drag_gesture(event: &web_sys::Event, item: &web_sys::Element) -> Option<Gesture> {
	match event.type_().as_str() {
		"dragstart" => Some(Gesture::Start(item.clone())),
		"dragover" => Some(Gesture::Over(item.clone())),
		_ => None,
	}
}

/// Configures the native drag operation started by a `"dragstart"` event.
///
/// Synthetic events often lack a [`web_sys::DataTransfer`], in which case this does nothing.
pub fn prepare_data_transfer(event: &web_sys::Event, item: &web_sys::Element, (x, y): (i32, i32)) {
	if let Some(data_transfer) = event.dyn_ref::<web_sys::DragEvent>().and_then(web_sys::DragEvent::data_transfer) {
		data_transfer.set_effect_allowed("move");
		data_transfer.set_drag_image(item, x, y);
	}
}

/// Reads the viewport coordinates of the first touch point targeting the listener's element.
#[must_use]
pub fn touch_point(event: &web_sys::TouchEvent) -> Option<(i32, i32)> {
	let touch = event.target_touches().get(0)?;
	Some((touch.client_x(), touch.client_y()))
}

/// Finds the item of `container` that's currently under the first touch point of `event`.
#[must_use]
pub fn item_under_touch(container: &web_sys::Element, event: &web_sys::TouchEvent) -> Option<web_sys::Element> {
	let (x, y) = touch_point(event)?;
	#[allow(clippy::cast_precision_loss)]
	let hit = container.owner_document()?.element_from_point(x as f32, y as f32)?;
	owning_item(container, hit)
}

/// Walks up from `element` to the ancestor (or self) that is a direct child of `container`.
///
/// Returns [`None`] if `element` isn't inside `container`, including when the walk reaches the document body.
#[must_use]
pub fn owning_item(container: &web_sys::Element, mut element: web_sys::Element) -> Option<web_sys::Element> {
	let body: Option<web_sys::Element> = container.owner_document().and_then(|document| document.body()).map(Into::into);
	loop {
		let parent = element.parent_element()?;
		if &parent == container {
			return Some(element);
		}
		if Some(&parent) == body.as_ref() {
			trace!("Reached the document body outside of the container.");
			return None;
		}
		element = parent;
	}
}

/// Translates a touch event on the handle of `item` into a [`Gesture`].
///
/// `dragging` tells whether `item` is the item currently being dragged: move, cancel and end phases are ignored otherwise.
/// `"touchend"` becomes a [`Drop`](`Gesture::Drop`) followed by [`End`](`Gesture::End`), since lifting the finger is always a deliberate release.
#[must_use]
pub fn touch_gestures(event: &web_sys::TouchEvent, container: &web_sys::Element, item: &web_sys::Element, dragging: bool) -> Vec<Gesture> {
	let event_type = event.type_();
	if event_type == "touchstart" {
		return vec![Gesture::Start(item.clone())];
	}
	if !dragging {
		return Vec::new();
	}
	match event_type.as_str() {
		"touchmove" => item_under_touch(container, event).map(Gesture::Over).into_iter().collect(),
		"touchcancel" => vec![Gesture::Cancel],
		"touchend" => vec![Gesture::Drop, Gesture::End],
		_ => Vec::new(),
	}
}
