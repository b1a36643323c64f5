use wasm_bindgen::JsCast;

/// Formats `element` for log messages.
///
/// With the `"dangerous-logging"` feature this includes the element's rendered text, which may contain personal data.
pub(crate) fn describe(element: &web_sys::Element) -> String {
	let id = element.id();
	let mut description = if id.is_empty() { format!("<{}>", element.tag_name()) } else { format!("<{} id={:?}>", element.tag_name(), id) };

	if cfg!(feature = "dangerous-logging") {
		if let Some(html_element) = element.dyn_ref::<web_sys::HtmlElement>() {
			description.push_str(&format!(" {:?}", html_element.inner_text()));
		}
	}

	description
}
