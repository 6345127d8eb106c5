//! Structured HCL builder
//!
//! Resources are assembled as a tree of [`Block`]s and serialized in one
//! pass. Items keep the order they were added in, and every literal goes
//! through [`normalize`], so quoting and ordering rules live in one place.

use super::value::{Scalar, Value, normalize};

/// Indentation unit for nested bodies
const INDENT: &str = "    ";

/// An HCL block: `<kind> "<label>"... { <body> }`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    kind: String,
    labels: Vec<String>,
    body: Body,
}

/// Ordered content of a block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Body {
    items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq)]
enum Item {
    Attribute { key: String, expr: String },
    Block(Block),
}

impl Block {
    /// Create an unlabeled block
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            labels: Vec::new(),
            body: Body::default(),
        }
    }

    /// Append a quoted label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    /// Replace the body
    pub fn with_body(mut self, body: Body) -> Self {
        self.body = body;
        self
    }

    /// Mutable access to the body
    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    /// Serialize the block, including its trailing newline.
    pub fn to_hcl(&self) -> String {
        let mut out = String::new();
        self.write_into(&mut out, 0);
        out
    }

    fn write_into(&self, out: &mut String, depth: usize) {
        push_indent(out, depth);
        out.push_str(&self.kind);
        for label in &self.labels {
            out.push(' ');
            out.push_str(&super::value::quote(label));
        }
        out.push_str(" {\n");

        for item in &self.body.items {
            match item {
                Item::Attribute { key, expr } => {
                    push_indent(out, depth + 1);
                    out.push_str(key);
                    out.push_str(" = ");
                    out.push_str(expr);
                    out.push('\n');
                }
                Item::Block(block) => block.write_into(out, depth + 1),
            }
        }

        push_indent(out, depth);
        out.push_str("}\n");
    }
}

impl Body {
    /// Create an empty body
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `key = <scalar>`
    pub fn attribute(&mut self, key: impl Into<String>, value: &Scalar) -> &mut Self {
        self.items.push(Item::Attribute {
            key: key.into(),
            expr: normalize(value),
        });
        self
    }

    /// Add `key = "<value>"`
    pub fn string_attribute(&mut self, key: impl Into<String>, value: &str) -> &mut Self {
        self.attribute(key, &Scalar::String(value.to_string()))
    }

    /// Add a value: scalars become attributes, mappings become a nested
    /// block named `key` with one attribute per entry.
    pub fn value(&mut self, key: impl Into<String>, value: &Value) -> &mut Self {
        match value {
            Value::Scalar(scalar) => self.attribute(key, scalar),
            Value::Mapping(mapping) => {
                let mut nested = Block::new(key);
                for (k, v) in mapping {
                    nested.body_mut().attribute(k.clone(), v);
                }
                self.block(nested)
            }
        }
    }

    /// Add a nested block
    pub fn block(&mut self, block: Block) -> &mut Self {
        self.items.push(Item::Block(block));
        self
    }
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}
