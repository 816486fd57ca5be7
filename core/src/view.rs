//! Display model derived from `TodoState`.

use std::fmt;

use crate::state::TodoState;
use crate::types::{Todo, TodoId};

pub const LOADING_TEXT: &str = "Loading todos...";
pub const EMPTY_TEXT: &str = "No todos yet. Add one above to get started!";

/// What the list area should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoView {
    Loading,
    Empty,
    Items(Vec<TodoItemView>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItemView {
    pub id: TodoId,
    pub title: String,
    /// Only set when the record has a non-empty description.
    pub description: Option<String>,
    pub completed: bool,
}

impl From<&Todo> for TodoItemView {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id.clone(),
            title: todo.title.clone(),
            description: todo.description.clone().filter(|d| !d.is_empty()),
            completed: todo.completed,
        }
    }
}

impl TodoView {
    pub fn from_state(state: &TodoState) -> Self {
        if state.is_loading() {
            TodoView::Loading
        } else if state.is_empty() {
            TodoView::Empty
        } else {
            TodoView::Items(state.todos().iter().map(TodoItemView::from).collect())
        }
    }
}

impl fmt::Display for TodoView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TodoView::Loading => writeln!(f, "{LOADING_TEXT}"),
            TodoView::Empty => writeln!(f, "{EMPTY_TEXT}"),
            TodoView::Items(items) => items.iter().try_for_each(|item| write!(f, "{item}")),
        }
    }
}

impl fmt::Display for TodoItemView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.completed { 'x' } else { ' ' };
        writeln!(f, "[{mark}] {}  (#{})", self.title, self.id)?;
        if let Some(description) = &self.description {
            writeln!(f, "      {description}")?;
        }
        Ok(())
    }
}
