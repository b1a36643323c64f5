//! Relocation of a child element within its parent.
//!
//! Both operations are a single DOM mutation at most.
//! They return `Ok(false)` without touching the DOM if the node already sits where it was asked to go,
//! so repeated pointer events over the same position don't cause further mutations.

use tracing::{instrument, trace};
use wasm_bindgen::JsValue;

/// Moves `node` so that it directly precedes `reference`, or to the end of `parent` if `reference` is [`None`].
///
/// # Errors
///
/// Iff the underlying `insertBefore` or `appendChild` call throws, for example because `reference` isn't a child of `parent`.
#[instrument]
pub fn move_before(parent: &web_sys::Element, node: &web_sys::Element, reference: Option<&web_sys::Element>) -> Result<bool, JsValue> {
	if node.parent_element().as_ref() == Some(parent) && node.next_element_sibling().as_ref() == reference {
		trace!("Already in place.");
		return Ok(false);
	}

	match reference {
		Some(reference) => {
			let reference: &web_sys::Node = reference;
			parent.insert_before(node, Some(reference))?
		}
		None => parent.append_child(node)?,
	};
	Ok(true)
}

/// Moves `node` so that it directly follows `reference` within `parent`.
///
/// # Errors
///
/// Iff the underlying `insertBefore` or `appendChild` call throws.
#[instrument]
pub fn move_after(parent: &web_sys::Element, node: &web_sys::Element, reference: &web_sys::Element) -> Result<bool, JsValue> {
	if node == reference {
		return Ok(false);
	}

	let next = reference.next_element_sibling();
	match next.as_ref() {
		Some(next) if next == node => {
			trace!("Already in place.");
			Ok(false)
		}
		next => move_before(parent, node, next),
	}
}
