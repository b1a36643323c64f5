//! Tracking of a single in-progress drag.

use crate::{
	describe::describe,
	moves::{move_after, move_before},
	order::{compare_order, Order},
};
use tracing::{debug, error, trace, warn};

/// The default CSS class applied to an item while it's being dragged.
pub const DRAGGING_CLASS: &str = "dragging";

/// One phase of a pointer gesture, independent of whether it came from mouse drag events or touch events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gesture {
	/// The pointer grabbed this item.
	Start(web_sys::Element),
	/// The pointer moved over this element.
	Over(web_sys::Element),
	/// The item was released over a valid drop target.
	Drop,
	/// The drag ended. Commits iff a [`Drop`](`Gesture::Drop`) was seen first, reverts otherwise.
	End,
	/// The drag was aborted.
	Cancel,
}

/// How a drag ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finished {
	/// The item stays where it was dropped.
	Committed(web_sys::Element),
	/// The item was moved back to its original position.
	Reverted(web_sys::Element),
}

/// The state of the drag gesture of one container.
///
/// Idle until [`start`](`DragState::start`), then active until [`finish`](`DragState::finish`).
/// While active, the dragged item carries the dragging marker class.
#[derive(Debug)]
pub struct DragState {
	marker: String,
	item: Option<web_sys::Element>,
	original_next_sibling: Option<web_sys::Element>,
	last_hovered: Option<web_sys::Element>,
	dropped: bool,
}
impl Default for DragState {
	fn default() -> Self {
		Self::new(DRAGGING_CLASS)
	}
}
impl DragState {
	#[must_use]
	pub fn new(marker: impl Into<String>) -> Self {
		Self {
			marker: marker.into(),
			item: None,
			original_next_sibling: None,
			last_hovered: None,
			dropped: false,
		}
	}

	/// The item currently being dragged, if any.
	#[must_use]
	pub fn item(&self) -> Option<&web_sys::Element> {
		self.item.as_ref()
	}

	#[must_use]
	pub fn is_dragging(&self) -> bool {
		self.item.is_some()
	}

	#[must_use]
	pub fn is_dragging_item(&self, item: &web_sys::Element) -> bool {
		self.item.as_ref() == Some(item)
	}

	#[must_use]
	pub fn dropped(&self) -> bool {
		self.dropped
	}

	/// Begins dragging `item`, remembering its current next sibling for a later revert.
	///
	/// A drag that is still active is reverted first.
	pub fn start(&mut self, item: &web_sys::Element) {
		if let Some(stale) = self.finish(true) {
			warn!("Drag started while another was active. Reverted the previous one: {:?}", stale);
		}

		debug!("Drag start on {}", describe(item));
		if let Err(error) = item.class_list().add_1(&self.marker) {
			error!("Failed to add dragging marker {:?}: {:?}", self.marker, error);
		}
		self.item = Some(item.clone());
		self.original_next_sibling = item.next_element_sibling();
		self.last_hovered = None;
		self.dropped = false;
	}

	/// Records that a drop happened, so that the next [`finish`](`DragState::finish`) of this drag commits.
	pub fn record_drop(&mut self) {
		if self.is_dragging() {
			debug!("Drop recorded.");
			self.dropped = true;
		}
	}

	/// Repositions the dragged item next to `over`, on the side it currently isn't on.
	///
	/// Returns whether the DOM changed.
	/// Hovering the same element as during the previous call, the dragged item itself or an element that isn't a sibling does nothing.
	pub fn over(&mut self, over: &web_sys::Element) -> bool {
		let item = match &self.item {
			Some(item) => item.clone(),
			None => return false,
		};

		if self.last_hovered.as_ref() == Some(over) {
			return false;
		}
		self.last_hovered = Some(over.clone());

		let parent = match item.parent_element() {
			Some(parent) => parent,
			None => {
				warn!("Dragged item {} has no parent element.", describe(&item));
				return false;
			}
		};

		let moved = match compare_order(over, &item) {
			Order::Before => move_before(&parent, &item, Some(over)),
			Order::After => move_after(&parent, &item, over),
			Order::Same | Order::Unrelated => return false,
		};

		match moved {
			Ok(moved) => {
				if moved {
					trace!("Moved {} next to {}", describe(&item), describe(over));
				}
				moved
			}
			Err(error) => {
				error!("Failed to move {}: {:?}", describe(&item), error);
				false
			}
		}
	}

	/// Ends the active drag, reverting it if `cancelled` or if no drop was recorded.
	///
	/// Returns [`None`] iff no drag was active, which makes repeated calls harmless.
	pub fn finish(&mut self, cancelled: bool) -> Option<Finished> {
		let item = self.item.take()?;
		let original_next_sibling = self.original_next_sibling.take();
		let dropped = self.dropped && !cancelled;
		self.last_hovered = None;
		self.dropped = false;

		if !dropped {
			self.revert(&item, original_next_sibling.as_ref());
		}

		if let Err(error) = item.class_list().remove_1(&self.marker) {
			error!("Failed to remove dragging marker {:?}: {:?}", self.marker, error);
		}

		Some(if dropped {
			debug!("Drag committed on {}", describe(&item));
			Finished::Committed(item)
		} else {
			debug!("Drag reverted on {}", describe(&item));
			Finished::Reverted(item)
		})
	}

	fn revert(&self, item: &web_sys::Element, original_next_sibling: Option<&web_sys::Element>) {
		let parent = match item.parent_element() {
			Some(parent) => parent,
			None => return warn!("Can't revert detached item {}.", describe(item)),
		};

		// A former next sibling that left the container can't anchor the item anymore.
		let anchor = original_next_sibling.filter(|next| next.parent_element().as_ref() == Some(&parent));
		if anchor.is_none() && original_next_sibling.is_some() {
			warn!("Original next sibling of {} is gone. Appending instead.", describe(item));
		}

		if let Err(error) = move_before(&parent, item, anchor) {
			error!("Failed to revert {}: {:?}", describe(item), error);
		}
	}
}
