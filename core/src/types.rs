//! Domain DTOs for the todo API.
//!
//! # Design
//! These types mirror the gateway's schema but are defined independently of
//! the mock-server crate. Integration tests catch any schema drift between the
//! two. Identifiers are opaque: the gateway may hand out JSON strings or JSON
//! integers, and the client only ever compares and prints them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier assigned by the gateway.
///
/// Kept in whichever JSON shape the gateway used so it serializes back
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TodoId {
    Int(i64),
    Text(String),
}

impl TodoId {
    /// Interpret user-typed text as an id. Digit-only input becomes `Int`.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.parse::<i64>() {
            Ok(n) => TodoId::Int(n),
            Err(_) => TodoId::Text(raw.to_string()),
        }
    }

    /// Compare against user-typed text by display form, so `"7"` matches both
    /// `Int(7)` and `Text("7")`.
    pub fn matches_key(&self, key: &str) -> bool {
        self.to_string() == key.trim()
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TodoId::Int(n) => write!(f, "{n}"),
            TodoId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for TodoId {
    fn from(n: i64) -> Self {
        TodoId::Int(n)
    }
}

impl From<&str> for TodoId {
    fn from(s: &str) -> Self {
        TodoId::Text(s.to_string())
    }
}

/// A single todo record as returned by the gateway.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

/// Request payload for creating a new todo. An absent description is sent as
/// JSON `null`, never as an empty string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateTodo {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl CreateTodo {
    /// Normalize raw input fields. Returns `None` when the trimmed title is
    /// empty; an all-whitespace description becomes absent.
    pub fn from_input(title: &str, description: &str) -> Option<Self> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        let description = description.trim();
        Some(Self {
            title: title.to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
        })
    }
}

/// Request payload for updating an existing todo. Only the fields present in
/// the JSON are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateTodo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl UpdateTodo {
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }
}
