//! Config nodes.
//!
//! A [`ConfigNode`] is the only data format this crate reads and writes: a
//! named, ordered list of string `(key, value)` pairs. Keys may repeat; list
//! fields are spelled as repeated keys in document order. Nothing is typed at
//! rest. Types are imposed by the field parser (see `field.rs`).
//!
//! ## Text format
//!
//! ```text
//! // comment
//! REQUIREMENT
//! {
//!     type = CompleteContract
//!     contractType = SatelliteContract
//! }
//! ```
//!
//! Nodes are flat: a block inside a block is rejected, and so is a value that
//! sits outside any block.

use crate::error::NodeError;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigNode {
    name: String,
    values: Vec<(String, String)>,
}

impl ConfigNode {
    /// Create an empty node called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        ConfigNode { name: name.into(), values: Vec::new() }
    }

    /// Build a node from `(key, value)` pairs, keeping their order.
    pub fn with_values<K, V>(name: impl Into<String>, values: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        ConfigNode { name: name.into(), values: values.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a value. Existing values with the same key are kept.
    pub fn add_value(&mut self, key: impl Into<String>, value: impl ToString) {
        self.values.push((key.into(), value.to_string()));
    }

    /// First value stored under `key`.
    pub fn get_value(&self, key: &str) -> Option<&str> {
        self.values.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Every value stored under `key`, in node order.
    pub fn get_values(&self, key: &str) -> Vec<&str> {
        self.values.iter().filter(|(k, _)| k == key).map(|(_, v)| v.as_str()).collect()
    }

    pub fn has_value(&self, key: &str) -> bool {
        self.values.iter().any(|(k, _)| k == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Parse a document made of zero or more named blocks.
    pub fn parse_document(text: &str) -> Result<Vec<ConfigNode>, NodeError> {
        let key_value = regex!(r"^([^=]+?)\s*=\s*(.*)$");
        let block_name = regex!(r"^([A-Za-z_][A-Za-z0-9_\-]*)\s*(\{)?$");

        let mut nodes = Vec::new();
        let mut current: Option<ConfigNode> = None;
        // Name seen on its own line, waiting for `{`.
        let mut pending: Option<(usize, String)> = None;

        for (idx, raw_line) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = strip_comment(raw_line).trim();
            if line.is_empty() {
                continue;
            }

            if let Some((open_line, name)) = pending.take() {
                if line == "{" {
                    current = Some(ConfigNode::new(name));
                    continue;
                }
                return Err(NodeError::MissingOpen { line: open_line, name });
            }

            if line == "}" {
                match current.take() {
                    Some(node) => nodes.push(node),
                    None => return Err(NodeError::UnbalancedClose { line: line_no }),
                }
                continue;
            }

            if let Some(caps) = block_name.captures(line) {
                let name = caps[1].to_string();
                if current.is_some() {
                    return Err(NodeError::NestedBlock { line: line_no, name });
                }
                if caps.get(2).is_some() {
                    current = Some(ConfigNode::new(name));
                } else {
                    pending = Some((line_no, name));
                }
                continue;
            }

            if let Some(caps) = key_value.captures(line) {
                let Some(node) = current.as_mut() else {
                    return Err(NodeError::ValueOutsideBlock { line: line_no });
                };
                node.add_value(caps[1].trim(), caps[2].trim());
                continue;
            }

            return Err(NodeError::Malformed { line: line_no, text: line.to_string() });
        }

        if let Some((line, name)) = pending {
            return Err(NodeError::MissingOpen { line, name });
        }
        if let Some(node) = current {
            return Err(NodeError::Unclosed { name: node.name });
        }

        Ok(nodes)
    }
}

/// Everything from the first `//` on is a comment, inside values too.
fn strip_comment(line: &str) -> &str {
    match line.find("//") {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Renders the block text format.
///
/// Values are written unescaped, so the output parses back to an equal node
/// only when no value contains `//` or has surrounding whitespace.
impl fmt::Display for ConfigNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "{{")?;
        for (key, value) in &self.values {
            writeln!(f, "    {key} = {value}")?;
        }
        writeln!(f, "}}")
    }
}
