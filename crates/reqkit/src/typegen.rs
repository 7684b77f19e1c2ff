//! Rust type generation from JSON samples
//!
//! Turns a sample JSON object into Rust struct declarations, one per nested
//! object, so a caller can paste a typed shape for
//! [`Request::send_as`](crate::Request::send_as) instead of working with
//! loose maps. Generation is driven entirely by the sample value; nested
//! struct names derive from the field path, so output is deterministic for
//! a given input.

use serde_json::{Map, Value};

/// Generate Rust struct declarations for a sample JSON object
///
/// Emits one `pub struct` for `root_name` plus one for every nested object
/// (including objects inside arrays). Field names are snake_cased with a
/// `#[serde(rename = "...")]` attribute wherever the JSON key differs, and
/// reserved words become raw identifiers. The generated source is returned
/// as text.
pub fn generate(root_name: &str, object: &Map<String, Value>) -> String {
    let mut out = String::new();
    emit_struct(&mut out, &pascal_case(root_name), object);
    out
}

fn emit_struct(out: &mut String, name: &str, object: &Map<String, Value>) {
    let mut nested: Vec<(String, &Map<String, Value>)> = Vec::new();

    if !out.is_empty() {
        out.push('\n');
    }
    out.push_str("#[derive(Debug, Serialize, Deserialize)]\n");
    out.push_str(&format!("pub struct {name} {{\n"));
    for (key, value) in object {
        let snake = snake_case(key);
        if snake != *key {
            out.push_str(&format!("    #[serde(rename = \"{key}\")]\n"));
        }
        let ident = if is_keyword(&snake) {
            format!("r#{snake}")
        } else {
            snake
        };
        let ty = rust_type(name, key, value, &mut nested);
        out.push_str(&format!("    pub {ident}: {ty},\n"));
    }
    out.push_str("}\n");

    for (nested_name, nested_object) in nested {
        emit_struct(out, &nested_name, nested_object);
    }
}

fn rust_type<'a>(
    parent: &str,
    key: &str,
    value: &'a Value,
    nested: &mut Vec<(String, &'a Map<String, Value>)>,
) -> String {
    match value {
        Value::Null => "Option<serde_json::Value>".to_string(),
        Value::Bool(_) => "bool".to_string(),
        Value::Number(number) => {
            if number.is_i64() {
                "i64".to_string()
            } else if number.is_u64() {
                "u64".to_string()
            } else {
                "f64".to_string()
            }
        }
        Value::String(_) => "String".to_string(),
        // The first element decides the element type; an empty array gives
        // nothing to sample.
        Value::Array(items) => match items.first() {
            Some(first) => format!("Vec<{}>", rust_type(parent, key, first, nested)),
            None => "Vec<serde_json::Value>".to_string(),
        },
        Value::Object(object) => {
            let name = format!("{parent}{}", pascal_case(key));
            nested.push((name.clone(), object));
            name
        }
    }
}

fn pascal_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = true;
    for ch in name.chars() {
        if matches!(ch, '_' | '-' | ' ' | '.') {
            upper_next = true;
        } else if upper_next {
            out.push(ch.to_ascii_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    if out.is_empty() {
        "Structure".to_string()
    } else {
        out
    }
}

fn snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut prev_lower = false;
    for ch in key.chars() {
        if matches!(ch, '-' | ' ' | '.') {
            if !out.ends_with('_') {
                out.push('_');
            }
            prev_lower = false;
        } else if ch.is_ascii_uppercase() {
            if prev_lower {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
            prev_lower = false;
        } else {
            prev_lower = ch.is_ascii_lowercase() || ch.is_ascii_digit();
            out.push(ch);
        }
    }
    if out.chars().next().is_some_and(|ch| ch.is_ascii_digit()) {
        out.insert(0, '_');
    }
    if out.is_empty() {
        "field".to_string()
    } else {
        out
    }
}

fn is_keyword(ident: &str) -> bool {
    matches!(
        ident,
        "as" | "async"
            | "await"
            | "box"
            | "break"
            | "const"
            | "continue"
            | "dyn"
            | "else"
            | "enum"
            | "fn"
            | "for"
            | "if"
            | "impl"
            | "in"
            | "let"
            | "loop"
            | "match"
            | "mod"
            | "move"
            | "mut"
            | "pub"
            | "ref"
            | "return"
            | "static"
            | "struct"
            | "trait"
            | "type"
            | "unsafe"
            | "use"
            | "where"
            | "while"
    )
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn as_object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(object) => object,
            other => panic!("expected object, found {other:?}"),
        }
    }

    #[test]
    fn test_flat_object() {
        let object = as_object(json!({
            "id": 7,
            "name": "x",
            "ok": true,
            "ratio": 0.5
        }));
        let generated = generate("user", &object);
        assert_eq!(
            generated,
            "#[derive(Debug, Serialize, Deserialize)]\n\
             pub struct User {\n\
             \x20   pub id: i64,\n\
             \x20   pub name: String,\n\
             \x20   pub ok: bool,\n\
             \x20   pub ratio: f64,\n\
             }\n"
        );
    }

    #[test]
    fn test_nested_object_gets_its_own_struct() {
        let object = as_object(json!({
            "tags": ["a"],
            "user": {"id": 1}
        }));
        let generated = generate("report", &object);
        assert_eq!(
            generated,
            "#[derive(Debug, Serialize, Deserialize)]\n\
             pub struct Report {\n\
             \x20   pub tags: Vec<String>,\n\
             \x20   pub user: ReportUser,\n\
             }\n\
             \n\
             #[derive(Debug, Serialize, Deserialize)]\n\
             pub struct ReportUser {\n\
             \x20   pub id: i64,\n\
             }\n"
        );
    }

    #[test]
    fn test_array_of_objects() {
        let object = as_object(json!({
            "items": [{"id": 1}]
        }));
        let generated = generate("list", &object);
        assert!(generated.contains("pub items: Vec<ListItems>,"));
        assert!(generated.contains("pub struct ListItems {"));
    }

    #[test]
    fn test_renames_and_keywords() {
        let object = as_object(json!({
            "type": "y",
            "userName": "x"
        }));
        let generated = generate("payload", &object);
        assert_eq!(
            generated,
            "#[derive(Debug, Serialize, Deserialize)]\n\
             pub struct Payload {\n\
             \x20   pub r#type: String,\n\
             \x20   #[serde(rename = \"userName\")]\n\
             \x20   pub user_name: String,\n\
             }\n"
        );
    }

    #[test]
    fn test_null_and_empty_array_fall_back_to_value() {
        let object = as_object(json!({
            "empty": [],
            "missing": null
        }));
        let generated = generate("sparse", &object);
        assert!(generated.contains("pub empty: Vec<serde_json::Value>,"));
        assert!(generated.contains("pub missing: Option<serde_json::Value>,"));
    }

    #[test]
    fn test_numeric_leading_key_is_prefixed() {
        let object = as_object(json!({"2fa": true}));
        let generated = generate("settings", &object);
        assert!(generated.contains("#[serde(rename = \"2fa\")]"));
        assert!(generated.contains("pub _2fa: bool,"));
    }
}
