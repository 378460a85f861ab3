const MAX_NAME_LEN: usize = 255;

/// Whether `name` is a valid bus interface name.
///
/// Interface names are two or more dot-separated elements, each starting
/// with a letter or underscore and continuing with letters, digits, or
/// underscores, with a 255-byte total length ceiling.
pub fn is_valid_interface_name(name: &str) -> bool {
	if name.is_empty() || name.len() > MAX_NAME_LEN {
		return false;
	}
	let mut elements = 0;
	for element in name.split('.') {
		if !is_valid_element(element) {
			return false;
		}
		elements += 1;
	}
	elements >= 2
}

/// Whether `component` is a valid single object-path component.
///
/// Components are non-empty runs of letters, digits, and underscores; the
/// separator slashes belong to the path, not the component.
pub fn is_valid_path_component(component: &str) -> bool {
	!component.is_empty() && component.bytes().all(|byte| byte.is_ascii_alphanumeric() || byte == b'_')
}

fn is_valid_element(element: &str) -> bool {
	let mut bytes = element.bytes();
	let Some(first) = bytes.next() else {
		return false;
	};
	if !first.is_ascii_alphabetic() && first != b'_' {
		return false;
	}
	bytes.all(|byte| byte.is_ascii_alphanumeric() || byte == b'_')
}

#[cfg(test)]
mod tests {
	use super::{is_valid_interface_name, is_valid_path_component};

	#[test]
	fn well_formed_interface_names_pass() {
		assert!(is_valid_interface_name("org.example.Widget"));
		assert!(is_valid_interface_name("_private.iface1"));
	}

	#[test]
	fn malformed_interface_names_fail() {
		assert!(!is_valid_interface_name(""));
		assert!(!is_valid_interface_name("single"));
		assert!(!is_valid_interface_name("org..Widget"));
		assert!(!is_valid_interface_name("org.1digit"));
		assert!(!is_valid_interface_name("org.exa mple"));
	}

	#[test]
	fn overlong_interface_name_fails() {
		let long = format!("a.{}", "b".repeat(300));
		assert!(!is_valid_interface_name(&long));
	}

	#[test]
	fn path_components_accept_word_characters_only() {
		assert!(is_valid_path_component("widget_0"));
		assert!(!is_valid_path_component(""));
		assert!(!is_valid_path_component("with/slash"));
		assert!(!is_valid_path_component("with-dash"));
	}
}
