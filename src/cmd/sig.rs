use buscodec::bus::{Result, SigNode, parse};

/// Parse a signature and print its type trees.
pub fn run(signature: &str, json: bool) -> Result<()> {
	let nodes = parse(signature)?;

	if json {
		let payload = SigJson {
			signature: signature.to_owned(),
			types: nodes.iter().map(type_json).collect(),
		};
		match serde_json::to_string_pretty(&payload) {
			Ok(rendered) => println!("{rendered}"),
			Err(err) => eprintln!("error: {err}"),
		}
		return Ok(());
	}

	println!("signature: {signature}");
	println!("types: {}", nodes.len());
	for node in &nodes {
		for line in render_lines(node, 0) {
			println!("{line}");
		}
	}

	Ok(())
}

#[derive(serde::Serialize)]
struct SigJson {
	signature: String,
	types: Vec<TypeJson>,
}

#[derive(serde::Serialize)]
struct TypeJson {
	kind: &'static str,
	signature: String,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	children: Vec<TypeJson>,
}

fn type_json(node: &SigNode) -> TypeJson {
	let (kind, children) = match node {
		SigNode::Array(element) => match element.as_ref() {
			SigNode::DictEntry(key, value) => ("dict", vec![type_json(key), type_json(value)]),
			element => ("array", vec![type_json(element)]),
		},
		SigNode::Struct(fields) => ("struct", fields.iter().map(type_json).collect()),
		SigNode::DictEntry(key, value) => ("dict-entry", vec![type_json(key), type_json(value)]),
		leaf => (leaf_label(leaf), Vec::new()),
	};
	TypeJson {
		kind,
		signature: node.signature(),
		children,
	}
}

fn render_lines(node: &SigNode, indent: usize) -> Vec<String> {
	let pad = "  ".repeat(indent);
	match node {
		SigNode::Array(element) => match element.as_ref() {
			SigNode::DictEntry(key, value) => {
				let mut lines = vec![format!("{pad}dict ({})", node.signature())];
				lines.extend(labeled_lines("key", key, indent + 1));
				lines.extend(labeled_lines("value", value, indent + 1));
				lines
			}
			element => {
				let mut lines = vec![format!("{pad}array ({})", node.signature())];
				lines.extend(render_lines(element, indent + 1));
				lines
			}
		},
		SigNode::Struct(fields) => {
			let mut lines = vec![format!("{pad}struct ({})", node.signature())];
			for field in fields {
				lines.extend(render_lines(field, indent + 1));
			}
			lines
		}
		SigNode::DictEntry(key, value) => {
			let mut lines = vec![format!("{pad}dict-entry ({})", node.signature())];
			lines.extend(labeled_lines("key", key, indent + 1));
			lines.extend(labeled_lines("value", value, indent + 1));
			lines
		}
		leaf => vec![format!("{pad}{}", leaf_label(leaf))],
	}
}

fn labeled_lines(label: &str, node: &SigNode, indent: usize) -> Vec<String> {
	let mut lines = render_lines(node, indent);
	if let Some(first) = lines.first_mut() {
		let pad = "  ".repeat(indent);
		*first = format!("{pad}{label}: {}", first.trim_start());
	}
	lines
}

fn leaf_label(node: &SigNode) -> &'static str {
	match node {
		SigNode::Byte => "byte",
		SigNode::Bool => "bool",
		SigNode::Int16 => "int16",
		SigNode::UInt16 => "uint16",
		SigNode::Int32 => "int32",
		SigNode::UInt32 => "uint32",
		SigNode::Int64 => "int64",
		SigNode::UInt64 => "uint64",
		SigNode::Double => "double",
		SigNode::Str => "string",
		SigNode::ObjectPath => "object path",
		SigNode::Signature => "signature",
		SigNode::Variant => "variant",
		_ => "container",
	}
}
