//! Drag handle lookup.

use tracing::{error, trace};

/// The default selector for drag handles.
pub const DEFAULT_HANDLE_SELECTOR: &str = "[draggable]";

/// Finds the part of `item` that must be grabbed to drag it.
///
/// That's `item` itself if it matches `selector`, otherwise its first matching descendant.
/// An invalid selector is logged and treated like a missing handle.
#[must_use]
pub fn find_drag_handle(item: &web_sys::Element, selector: &str) -> Option<web_sys::Element> {
	match item.matches(selector) {
		Ok(true) => return Some(item.clone()),
		Ok(false) => (),
		Err(error) => {
			error!("Invalid drag handle selector {:?}: {:?}", selector, error);
			return None;
		}
	}

	match item.query_selector(selector) {
		Ok(handle) => handle,
		Err(error) => {
			error!("Invalid drag handle selector {:?}: {:?}", selector, error);
			None
		}
	}
}

/// Checks whether `handle` is currently rendered, that is neither `display: none` nor `visibility: hidden`.
///
/// Pages hide handles to temporarily disable reordering.
/// Where computed style isn't available, the handle counts as active.
#[must_use]
pub fn handle_is_active(handle: &web_sys::Element) -> bool {
	let style = match web_sys::window().map(|window| window.get_computed_style(handle)) {
		Some(Ok(Some(style))) => style,
		_ => {
			trace!("No computed style available.");
			return true;
		}
	};

	let display = style.get_property_value("display").unwrap_or_default();
	let visibility = style.get_property_value("visibility").unwrap_or_default();
	display != "none" && visibility != "hidden"
}
