//! Relative document order of sibling elements.

use tracing::trace;

/// Where the first argument of [`compare_order`] sits relative to the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
	/// The first element precedes the second.
	Before,
	/// The first element follows the second.
	After,
	/// Both arguments are the same element.
	Same,
	/// The elements don't share a parent element.
	Unrelated,
}
impl Order {
	/// Swaps [`Before`](`Order::Before`) and [`After`](`Order::After`).
	#[must_use]
	pub fn reverse(self) -> Self {
		match self {
			Order::Before => Order::After,
			Order::After => Order::Before,
			other => other,
		}
	}
}

/// Determines whether `a` comes before or after `b` among their shared parent's children.
///
/// This has no side effects and is safe to call with detached elements, which are [`Unrelated`](`Order::Unrelated`) to anything but themselves.
#[must_use]
pub fn compare_order(a: &web_sys::Element, b: &web_sys::Element) -> Order {
	if a == b {
		return Order::Same;
	}

	match (a.parent_element(), b.parent_element()) {
		(Some(parent_a), Some(parent_b)) if parent_a == parent_b => (),
		_ => {
			trace!("Elements don't share a parent.");
			return Order::Unrelated;
		}
	}

	if a.compare_document_position(b) & web_sys::Node::DOCUMENT_POSITION_FOLLOWING != 0 {
		Order::Before
	} else {
		Order::After
	}
}
