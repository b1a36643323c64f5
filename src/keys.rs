//! Reading a container's item order back out as domain keys.

use core::fmt::{self, Display, Formatter};
use tracing::error;

/// The attribute read by owners that don't configure one.
pub const ITEM_ID_ATTRIBUTE: &str = "data-item-id";

/// A child of the container lacked the key attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingItemKey {
	pub index: u32,
	pub attribute: String,
}
impl Display for MissingItemKey {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "item #{} has no {:?} attribute", self.index, self.attribute)
	}
}
impl std::error::Error for MissingItemKey {}

/// Collects the `attribute` value of each child element of `container`, in DOM order.
///
/// # Errors
///
/// Iff any child lacks `attribute`.
/// Owners should then not persist anything, since the order can't be fully mapped back onto their state.
pub fn item_keys(container: &web_sys::Element, attribute: &str) -> Result<Vec<String>, MissingItemKey> {
	let children = container.children();
	(0..children.length())
		.filter_map(|index| children.item(index).map(|child| (index, child)))
		.map(|(index, child)| {
			child.get_attribute(attribute).ok_or_else(|| {
				error!("Failed to determine item order: Item #{} has no {:?} attribute.", index, attribute);
				MissingItemKey { index, attribute: attribute.to_owned() }
			})
		})
		.collect()
}
