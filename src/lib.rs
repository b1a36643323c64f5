#![doc(html_root_url = "https://docs.rs/reorder-dom/0.0.1")]
#![warn(clippy::pedantic)]
//! Drag-and-drop reordering of a DOM container's child elements.
//!
//! Items are moved live while the pointer travels over their siblings.
//! A drop keeps the new order and notifies the owner, any other ending of the gesture restores the order from before the drag.
//! Mouse drag events and touch events feed the same [`Gesture`](`gesture::Gesture`) pipeline.
//!
//! See [`enable_reordering`] for the usual entry point and [`Reorderable`] for explicit ownership.

#[cfg(doctest)]
pub mod readme {
	doc_comment::doctest!("../README.md");
}

mod describe;

pub mod gesture;
pub mod handle;
pub mod keys;
pub mod listener;
pub mod moves;
pub mod order;
pub mod pointer;
pub mod reorder;

pub use reorder::{disable_reordering, enable_reordering, enable_reordering_with_options, DropCallback, ReorderOptions, Reorderable};
