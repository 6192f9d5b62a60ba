use l10n_gen_core::Node;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("unsupported file extension {0:?}")]
    UnsupportedExtension(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("mapping key is not a string")]
    NonStringKey,
    #[error("invalid field type {0}, expected \"table\"")]
    RootNotTable(&'static str),
}

pub fn decode_messages(ext: &str, contents: &str) -> Result<Vec<(String, Node)>, DecodeError> {
    let node = match ext {
        "json" => json_node(serde_json::from_str(contents)?),
        "yaml" | "yml" => yaml_node(serde_yaml::from_str(contents)?)?,
        "toml" => toml_node(contents.parse::<toml::Value>()?),
        _ => return Err(DecodeError::UnsupportedExtension(ext.to_string())),
    };

    match node {
        Node::Table(entries) => Ok(entries),
        other => Err(DecodeError::RootNotTable(other.kind())),
    }
}

fn json_node(value: serde_json::Value) -> Node {
    match value {
        serde_json::Value::String(text) => Node::Str(text),
        serde_json::Value::Object(map) => Node::Table(
            map.into_iter()
                .map(|(key, value)| (key, json_node(value)))
                .collect(),
        ),
        serde_json::Value::Null => Node::Other("null"),
        serde_json::Value::Bool(_) => Node::Other("boolean"),
        serde_json::Value::Number(_) => Node::Other("number"),
        serde_json::Value::Array(_) => Node::Other("array"),
    }
}

fn yaml_node(value: serde_yaml::Value) -> Result<Node, DecodeError> {
    match value {
        serde_yaml::Value::String(text) => Ok(Node::Str(text)),
        serde_yaml::Value::Mapping(mapping) => {
            let mut entries = Vec::with_capacity(mapping.len());
            for (key, value) in mapping {
                let serde_yaml::Value::String(key) = key else {
                    return Err(DecodeError::NonStringKey);
                };
                entries.push((key, yaml_node(value)?));
            }
            Ok(Node::Table(entries))
        }
        serde_yaml::Value::Null => Ok(Node::Other("null")),
        serde_yaml::Value::Bool(_) => Ok(Node::Other("boolean")),
        serde_yaml::Value::Number(_) => Ok(Node::Other("number")),
        serde_yaml::Value::Sequence(_) => Ok(Node::Other("array")),
        serde_yaml::Value::Tagged(_) => Ok(Node::Other("tagged value")),
    }
}

fn toml_node(value: toml::Value) -> Node {
    match value {
        toml::Value::String(text) => Node::Str(text),
        toml::Value::Table(table) => Node::Table(
            table
                .into_iter()
                .map(|(key, value)| (key, toml_node(value)))
                .collect(),
        ),
        toml::Value::Integer(_) => Node::Other("integer"),
        toml::Value::Float(_) => Node::Other("float"),
        toml::Value::Boolean(_) => Node::Other("boolean"),
        toml::Value::Datetime(_) => Node::Other("datetime"),
        toml::Value::Array(_) => Node::Other("array"),
    }
}

#[cfg(test)]
mod tests {
    use super::{decode_messages, DecodeError};
    use l10n_gen_core::Node;

    #[test]
    fn decodes_json_table() {
        let entries = decode_messages("json", r#"{"hello": "Hi", "nested": {"string": "x"}}"#)
            .expect("decode");
        assert_eq!(entries.len(), 2);
        assert!(entries
            .iter()
            .any(|(key, node)| key == "hello" && *node == Node::Str("Hi".to_string())));
    }

    #[test]
    fn decodes_yaml_table() {
        let entries = decode_messages("yaml", "hello: Hi\napples:\n  string: some\n")
            .expect("decode");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, "hello");
    }

    #[test]
    fn decodes_toml_table() {
        let entries = decode_messages("toml", "hello = \"Hi\"\n[apples]\nstring = \"some\"\n")
            .expect("decode");
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn keeps_unsupported_shapes_for_diagnostics() {
        let entries = decode_messages("json", r#"{"hello": 42}"#).expect("decode");
        assert_eq!(entries[0].1, Node::Other("number"));
    }

    #[test]
    fn rejects_unknown_extension() {
        let err = decode_messages("ini", "").expect_err("should fail");
        match err {
            DecodeError::UnsupportedExtension(ext) => assert_eq!(ext, "ini"),
            err => panic!("unexpected error {err:?}"),
        }
    }

    #[test]
    fn rejects_non_table_root() {
        let err = decode_messages("json", r#""just a string""#).expect_err("should fail");
        assert!(matches!(err, DecodeError::RootNotTable("string")));
    }

    #[test]
    fn rejects_malformed_input() {
        let err = decode_messages("json", "{").expect_err("should fail");
        assert!(matches!(err, DecodeError::Json(_)));
    }
}
