#![cfg(target_arch = "wasm32")]

use reorder_dom::{disable_reordering, enable_reordering, gesture::DRAGGING_CLASS, DropCallback, ReorderOptions, Reorderable};
use std::{cell::RefCell, rc::Rc};
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};

wasm_bindgen_test_configure!(run_in_browser);

use web_list_::{fill, fire, get, init_log, list, order};

fn recorder() -> (Rc<RefCell<Vec<String>>>, DropCallback) {
	let dropped = Rc::new(RefCell::new(Vec::new()));
	let callback: DropCallback = {
		let dropped = Rc::clone(&dropped);
		Rc::new(move |item: &web_sys::Element| dropped.borrow_mut().push(item.get_attribute("data-item-id").unwrap()))
	};
	(dropped, callback)
}

#[wasm_bindgen_test]
fn dragend_without_drop_reverts() {
	init_log();
	let list = list(&["A", "B", "C", "D"]);
	let (dropped, callback) = recorder();
	let reorderable = Reorderable::new(list.clone(), Some(callback));
	let (b, d) = (get(&list, "B"), get(&list, "D"));

	fire(&b, "dragstart");
	assert!(reorderable.is_dragging());
	assert!(b.class_list().contains(DRAGGING_CLASS));

	fire(&d, "dragover");
	assert_eq!(order(&list), ["A", "C", "D", "B"]);

	fire(&b, "dragend");
	assert_eq!(order(&list), ["A", "B", "C", "D"]);
	assert!(!b.class_list().contains(DRAGGING_CLASS));
	assert!(!reorderable.is_dragging());
	assert!(dropped.borrow().is_empty());

	drop(reorderable);
	list.remove();
}

#[wasm_bindgen_test]
fn drop_commits() {
	init_log();
	let list = list(&["A", "B", "C", "D"]);
	let (dropped, callback) = recorder();
	let reorderable = Reorderable::new(list.clone(), Some(callback));
	let (b, d) = (get(&list, "B"), get(&list, "D"));

	fire(&b, "dragstart");
	fire(&d, "dragover");
	fire(&d, "drop");
	fire(&b, "dragend");

	assert_eq!(order(&list), ["A", "C", "D", "B"]);
	assert_eq!(*dropped.borrow(), ["B"]);
	assert!(!b.class_list().contains(DRAGGING_CLASS));

	// A second end of the same drag does nothing.
	fire(&b, "dragend");
	assert_eq!(order(&list), ["A", "C", "D", "B"]);
	assert_eq!(*dropped.borrow(), ["B"]);

	drop(reorderable);
	list.remove();
}

#[wasm_bindgen_test]
fn callback_sees_the_new_order() {
	init_log();
	let list = list(&["A", "B", "C"]);
	let seen = Rc::new(RefCell::new(Vec::new()));
	let callback: DropCallback = {
		let seen = Rc::clone(&seen);
		let list = list.clone();
		Rc::new(move |_: &web_sys::Element| *seen.borrow_mut() = order(&list))
	};
	let reorderable = Reorderable::new(list.clone(), Some(callback));

	fire(&get(&list, "C"), "dragstart");
	fire(&get(&list, "A"), "dragover");
	fire(&list, "drop");
	fire(&get(&list, "C"), "dragend");

	assert_eq!(*seen.borrow(), ["C", "A", "B"]);

	drop(reorderable);
	list.remove();
}

#[wasm_bindgen_test]
fn repeated_dragover_is_idempotent() {
	init_log();
	let list = list(&["A", "B", "C", "D"]);
	let reorderable = Reorderable::new(list.clone(), None);
	let (b, d) = (get(&list, "B"), get(&list, "D"));

	fire(&b, "dragstart");
	for _ in 0..4 {
		fire(&d, "dragover");
		assert_eq!(order(&list), ["A", "C", "D", "B"]);
	}
	fire(&list, "drop");
	fire(&b, "dragend");
	assert_eq!(order(&list), ["A", "C", "D", "B"]);

	drop(reorderable);
	list.remove();
}

#[wasm_bindgen_test]
fn every_item_survives_wandering() {
	init_log();
	let keys = ["A", "B", "C", "D", "E"];
	let list = list(&keys);
	let reorderable = Reorderable::new(list.clone(), None);

	for &(dragged, path, commit) in &[("A", &["E", "C", "B", "E", "A", "D"][..], false), ("D", &["A", "B", "E", "C"][..], true), ("B", &["D", "B", "A"][..], false)] {
		let before = order(&list);
		fire(&get(&list, dragged), "dragstart");
		for over in path {
			fire(&get(&list, over), "dragover");
		}
		if commit {
			fire(&list, "drop");
		}
		fire(&get(&list, dragged), "dragend");

		let mut after = order(&list);
		if !commit {
			assert_eq!(after, before);
		}
		after.sort();
		assert_eq!(after, keys);
		assert_eq!(list.children().length(), 5);
	}

	drop(reorderable);
	list.remove();
}

#[wasm_bindgen_test]
fn rebinding_replaces_listeners() {
	init_log();
	let list = list(&["A", "B", "C"]);
	let mut reorderable = Reorderable::new(list.clone(), None);

	// 3 on the container, 2 per item, 4 per handle.
	assert_eq!(reorderable.listener_count(), 3 + 3 * 2 + 3 * 4);
	reorderable.rebind();
	assert_eq!(reorderable.listener_count(), 3 + 3 * 2 + 3 * 4);

	fill(&list, &["A", "B"]);
	reorderable.rebind();
	assert_eq!(reorderable.listener_count(), 3 + 2 * 2 + 2 * 4);

	drop(reorderable);
	list.remove();
}

#[wasm_bindgen_test]
fn reenabling_does_not_stack_listeners() {
	init_log();
	let list = list(&["A", "B", "C"]);
	let (dropped, callback) = recorder();

	enable_reordering(&list, Some(Rc::clone(&callback)));
	fill(&list, &["A", "B", "C", "D"]);
	enable_reordering(&list, Some(Rc::clone(&callback)));

	fire(&get(&list, "A"), "dragstart");
	fire(&get(&list, "D"), "dragover");
	fire(&list, "drop");
	fire(&get(&list, "A"), "dragend");
	assert_eq!(order(&list), ["B", "C", "D", "A"]);
	assert_eq!(*dropped.borrow(), ["A"]);

	fire(&get(&list, "B"), "dragstart");
	fire(&get(&list, "C"), "dragover");
	fire(&list, "drop");
	fire(&get(&list, "B"), "dragend");
	assert_eq!(order(&list), ["C", "B", "D", "A"]);
	assert_eq!(*dropped.borrow(), ["A", "B"]);

	assert!(disable_reordering(&list));
	assert!(!disable_reordering(&list));

	fire(&get(&list, "D"), "dragstart");
	fire(&get(&list, "C"), "dragover");
	fire(&list, "drop");
	fire(&get(&list, "D"), "dragend");
	assert_eq!(order(&list), ["C", "B", "D", "A"]);
	assert_eq!(*dropped.borrow(), ["A", "B"]);

	list.remove();
}

#[wasm_bindgen_test]
fn reenabling_from_the_callback() {
	init_log();
	let list = list(&["A", "B", "C"]);
	let drops = Rc::new(RefCell::new(0));

	fn rebuild(list: web_sys::Element, drops: Rc<RefCell<u32>>) -> DropCallback {
		Rc::new(move |_: &web_sys::Element| {
			*drops.borrow_mut() += 1;
			let keys = order(&list);
			let keys: Vec<&str> = keys.iter().map(String::as_str).collect();
			fill(&list, &keys);
			enable_reordering(&list, Some(rebuild(list.clone(), Rc::clone(&drops))));
		})
	}
	enable_reordering(&list, Some(rebuild(list.clone(), Rc::clone(&drops))));

	fire(&get(&list, "A"), "dragstart");
	fire(&get(&list, "C"), "dragover");
	fire(&list, "drop");
	fire(&get(&list, "A"), "dragend");
	assert_eq!(order(&list), ["B", "C", "A"]);
	assert_eq!(*drops.borrow(), 1);

	// The rebuilt items are wired up as well.
	fire(&get(&list, "C"), "dragstart");
	fire(&get(&list, "B"), "dragover");
	fire(&list, "drop");
	fire(&get(&list, "C"), "dragend");
	assert_eq!(order(&list), ["C", "B", "A"]);
	assert_eq!(*drops.borrow(), 2);

	assert!(disable_reordering(&list));
	list.remove();
}

#[wasm_bindgen_test]
fn containers_are_independent() {
	init_log();
	let first = list(&["A", "B"]);
	let second = list(&["C", "D"]);
	let (first_dropped, first_callback) = recorder();
	let (second_dropped, second_callback) = recorder();
	let first_reorderable = Reorderable::new(first.clone(), Some(first_callback));
	let second_reorderable = Reorderable::new(second.clone(), Some(second_callback));

	fire(&get(&first, "A"), "dragstart");
	fire(&get(&second, "D"), "dragover");
	fire(&get(&first, "B"), "dragover");
	fire(&second, "drop");
	assert!(first_reorderable.is_dragging());
	assert!(!second_reorderable.is_dragging());
	fire(&get(&first, "A"), "dragend");

	assert_eq!(order(&first), ["A", "B"]);
	assert_eq!(order(&second), ["C", "D"]);
	assert!(first_dropped.borrow().is_empty());
	assert!(second_dropped.borrow().is_empty());

	drop(first_reorderable);
	drop(second_reorderable);
	first.remove();
	second.remove();
}

#[wasm_bindgen_test]
fn custom_marker_and_no_touch() {
	init_log();
	let list = list(&["A", "B"]);
	let reorderable = Reorderable::with_options(list.clone(), None, ReorderOptions::new().with_dragging_class("lifted").with_touch(false));

	assert_eq!(reorderable.listener_count(), 3 + 2 * 2);

	let a = get(&list, "A");
	fire(&a, "dragstart");
	assert!(a.class_list().contains("lifted"));
	assert!(!a.class_list().contains(DRAGGING_CLASS));
	fire(&a, "dragend");
	assert!(!a.class_list().contains("lifted"));

	drop(reorderable);
	list.remove();
}

#[wasm_bindgen_test]
fn dropping_the_coordinator_reverts_and_unbinds() {
	init_log();
	let list = list(&["A", "B", "C"]);
	let reorderable = Reorderable::new(list.clone(), None);
	let a = get(&list, "A");

	fire(&a, "dragstart");
	fire(&get(&list, "C"), "dragover");
	assert_eq!(order(&list), ["B", "C", "A"]);

	drop(reorderable);
	assert_eq!(order(&list), ["A", "B", "C"]);
	assert!(!a.class_list().contains(DRAGGING_CLASS));

	fire(&a, "dragstart");
	assert!(!a.class_list().contains(DRAGGING_CLASS));

	list.remove();
}

#[wasm_bindgen_test]
fn reenabling_mid_drag_reverts() {
	init_log();
	let list = list(&["A", "B", "C", "D"]);
	let (dropped, callback) = recorder();
	enable_reordering(&list, Some(Rc::clone(&callback)));
	let (b, d) = (get(&list, "B"), get(&list, "D"));

	fire(&b, "dragstart");
	fire(&d, "dragover");
	assert_eq!(order(&list), ["A", "C", "D", "B"]);

	enable_reordering(&list, Some(Rc::clone(&callback)));
	assert_eq!(order(&list), ["A", "B", "C", "D"]);
	assert!(!b.class_list().contains(DRAGGING_CLASS));

	// The browser still reports the end of the abandoned drag.
	fire(&list, "drop");
	fire(&b, "dragend");
	assert_eq!(order(&list), ["A", "B", "C", "D"]);
	assert!(dropped.borrow().is_empty());

	assert!(disable_reordering(&list));
	list.remove();
}

#[wasm_bindgen_test]
fn detached_containers_are_released() {
	init_log();
	let removed = list(&["A", "B"]);
	let kept = list(&["C", "D"]);
	let offscreen = list(&["E"]);
	enable_reordering(&removed, None);
	enable_reordering(&kept, None);
	offscreen.remove();
	enable_reordering(&offscreen, None);

	removed.remove();
	enable_reordering(&offscreen, None);

	assert!(!disable_reordering(&removed));
	assert!(disable_reordering(&kept));
	assert!(disable_reordering(&offscreen));

	kept.remove();
}
