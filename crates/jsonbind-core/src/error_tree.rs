//! Path-annotated validation errors.
//!
//! An [`ErrorTree`] collects every problem found while deserializing one JSON
//! value. Messages that concern the value itself sit at the root; messages that
//! concern a member or an element sit below the corresponding [`PathSegment`].
//! [`ErrorTree::flatten`] turns the tree into the `(path, message)` list that
//! callers and tests key on.

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Message for a declared record field that is absent from the JSON object.
pub const MISSING_PROPERTY: &str = "missing property";

/// Message for a JSON object key that the record does not declare.
pub const UNEXPECTED_PROPERTY: &str = "unexpected property";

/// Message standing in for a failure reported without any message.
pub const INVALID_VALUE: &str = "invalid value";

/// One step from a value to one of its parts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Record field or object key.
    Field(String),
    /// Array element.
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => f.write_str(name),
            PathSegment::Index(index) => write!(f, "[{}]", index),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(name: &str) -> Self {
        PathSegment::Field(name.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(name: String) -> Self {
        PathSegment::Field(name)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// Renders a path as `outer.items[1].name`. The root path renders as `""`.
pub fn path_to_string(path: &[PathSegment]) -> String {
    let mut out = String::new();
    for segment in path {
        match segment {
            PathSegment::Field(name) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(name);
            }
            PathSegment::Index(index) => {
                out.push_str(&format!("[{}]", index));
            }
        }
    }
    out
}

/// A tree of validation messages keyed by path segment.
///
/// A tree without children is a leaf. Children keep insertion order, which is
/// the order they are reported in by [`ErrorTree::flatten`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorTree {
    messages: Vec<String>,
    children: IndexMap<PathSegment, ErrorTree>,
}

impl ErrorTree {
    /// An empty tree, meaning "no errors".
    pub fn new() -> Self {
        Self::default()
    }

    /// A leaf holding a single message about the value itself.
    pub fn message(message: impl Into<String>) -> Self {
        ErrorTree {
            messages: vec![message.into()],
            children: IndexMap::new(),
        }
    }

    /// A tree holding `child` below `segment`.
    pub fn at(segment: impl Into<PathSegment>, child: ErrorTree) -> Self {
        let mut tree = ErrorTree::new();
        tree.add_child(segment, child);
        tree
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn children(&self) -> &IndexMap<PathSegment, ErrorTree> {
        &self.children
    }

    pub fn child(&self, segment: impl Into<PathSegment>) -> Option<&ErrorTree> {
        self.children.get(&segment.into())
    }

    /// True if neither this node nor any descendant holds a message.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.children.values().all(ErrorTree::is_empty)
    }

    pub fn push_message(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    /// Adds `child` below `segment`, merging with any tree already there.
    pub fn add_child(&mut self, segment: impl Into<PathSegment>, child: ErrorTree) {
        let segment = segment.into();
        match self.children.get_mut(&segment) {
            Some(existing) => existing.merge_from(child),
            None => {
                self.children.insert(segment, child);
            }
        }
    }

    /// Adds the error of a part that failed to convert. A failure always
    /// carries a message, so an empty tree is recorded as [`INVALID_VALUE`].
    pub fn add_failure(&mut self, segment: impl Into<PathSegment>, child: ErrorTree) {
        self.add_child(segment, child.or_invalid());
    }

    /// This tree, or an [`INVALID_VALUE`] leaf if it holds no message.
    pub fn or_invalid(self) -> ErrorTree {
        if self.is_empty() {
            ErrorTree::message(INVALID_VALUE)
        } else {
            self
        }
    }

    /// Adds a single message below `segment`.
    pub fn add_message_at(&mut self, segment: impl Into<PathSegment>, message: impl Into<String>) {
        self.add_child(segment, ErrorTree::message(message));
    }

    /// Combines two trees describing the same subject. `self`'s messages come
    /// first; children present in both are merged recursively.
    pub fn merge(mut self, other: ErrorTree) -> ErrorTree {
        self.merge_from(other);
        self
    }

    pub fn merge_from(&mut self, other: ErrorTree) {
        self.messages.extend(other.messages);
        for (segment, child) in other.children {
            self.add_child(segment, child);
        }
    }

    /// Depth-first list of every message with the path leading to it. A
    /// node's own messages are reported before its children's.
    pub fn flatten(&self) -> Vec<FlattenedError> {
        let mut out = Vec::new();
        let mut path = Vec::new();
        self.flatten_into(&mut path, &mut out);
        out
    }

    fn flatten_into(&self, path: &mut Vec<PathSegment>, out: &mut Vec<FlattenedError>) {
        for message in &self.messages {
            out.push(FlattenedError {
                path: path.clone(),
                message: message.clone(),
            });
        }
        for (segment, child) in &self.children {
            path.push(segment.clone());
            child.flatten_into(path, out);
            path.pop();
        }
    }
}

impl fmt::Display for ErrorTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.flatten().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

/// One message of a flattened [`ErrorTree`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlattenedError {
    pub path: Vec<PathSegment>,
    pub message: String,
}

impl FlattenedError {
    pub fn new(path: Vec<PathSegment>, message: impl Into<String>) -> Self {
        FlattenedError {
            path,
            message: message.into(),
        }
    }

    /// Error at a single-segment field path, the common case in tests.
    pub fn field(name: &str, message: impl Into<String>) -> Self {
        FlattenedError::new(vec![PathSegment::from(name)], message)
    }

    pub fn path_string(&self) -> String {
        path_to_string(&self.path)
    }
}

impl fmt::Display for FlattenedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.path_string(), self.message)
        }
    }
}
