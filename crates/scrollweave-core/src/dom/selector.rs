//! Minimal selector grammar
//!
//! Supports exactly the forms the effect modules use to address markup:
//! `.class-name`, `[data-attr]`, and `[data-attr=value]`. Anything else
//! matches nothing.

use super::Node;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Selector {
    Class(String),
    Attr(String),
    AttrEq(String, String),
}

impl Selector {
    pub(crate) fn parse(input: &str) -> Option<Self> {
        if let Some(class) = input.strip_prefix('.') {
            if class.is_empty() {
                return None;
            }
            return Some(Self::Class(class.to_owned()));
        }
        let inner = input.strip_prefix('[')?.strip_suffix(']')?;
        if inner.is_empty() {
            return None;
        }
        match inner.split_once('=') {
            Some((name, value)) => Some(Self::AttrEq(name.to_owned(), value.to_owned())),
            None => Some(Self::Attr(inner.to_owned())),
        }
    }

    pub(crate) fn matches(&self, node: &Node) -> bool {
        match self {
            Self::Class(class) => node.classes.contains(class),
            Self::Attr(name) => node.attrs.contains_key(name),
            Self::AttrEq(name, value) => node.attrs.get(name).is_some_and(|v| v == value),
        }
    }
}
