//! Local mirror of the remote todo collection.
//!
//! # Design
//! `TodoState` is owned by the session and only ever changed through
//! `TodoState::reduce`. Each `Event` carries the outcome of one gateway round
//! trip; the reducer applies it in full or not at all. Nothing is written
//! before the gateway confirms, so a failed event needs no rollback.

use std::collections::HashSet;

use tracing::warn;

use crate::error::{ApiError, Mutation, SyncError};
use crate::types::{Todo, TodoId};

/// Unsubmitted input fields of the "add todo" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub description: String,
}

impl Draft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn clear(&mut self) {
        self.title.clear();
        self.description.clear();
    }
}

/// Result of one gateway round trip, ready to fold into state.
#[derive(Debug)]
pub enum Event {
    Loaded(Result<Vec<Todo>, ApiError>),
    Created(Result<Todo, ApiError>),
    Updated {
        id: TodoId,
        result: Result<Todo, ApiError>,
    },
    Deleted {
        id: TodoId,
        result: Result<(), ApiError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoState {
    todos: Vec<Todo>,
    loading: bool,
    load_failed: bool,
    pub draft: Draft,
}

impl Default for TodoState {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoState {
    /// Fresh state for a page load: empty and loading.
    pub fn new() -> Self {
        Self {
            todos: Vec::new(),
            loading: true,
            load_failed: false,
            draft: Draft::default(),
        }
    }

    /// Records newest first.
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether the last list request failed. The list is then shown empty.
    pub fn load_failed(&self) -> bool {
        self.load_failed
    }

    pub fn get(&self, id: &TodoId) -> Option<&Todo> {
        self.todos.iter().find(|todo| &todo.id == id)
    }

    /// Look up a record by the text a user typed for its id.
    pub fn find_by_key(&self, key: &str) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id.matches_key(key))
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|todo| todo.completed).count()
    }

    /// Fold one gateway outcome into state.
    ///
    /// Failures leave the collection untouched and are returned so the caller
    /// can notify the user. A successful response for an id that is no longer
    /// present is a no-op.
    pub fn reduce(&mut self, event: Event) -> Result<(), SyncError> {
        match event {
            Event::Loaded(result) => {
                self.loading = false;
                match result {
                    Ok(todos) => {
                        self.todos = dedup_by_id(todos);
                        self.load_failed = false;
                        Ok(())
                    }
                    Err(err) => {
                        warn!(error = %err, "error fetching todos");
                        self.todos.clear();
                        self.load_failed = true;
                        Err(SyncError::LoadFailure)
                    }
                }
            }
            Event::Created(Ok(todo)) => {
                if self.get(&todo.id).is_some() {
                    self.todos = reconcile(std::mem::take(&mut self.todos), todo);
                } else {
                    self.todos.insert(0, todo);
                }
                self.draft.clear();
                Ok(())
            }
            Event::Created(Err(err)) => Err(mutation_failed(Mutation::Create, &err)),
            Event::Updated { id, result: Ok(todo) } => {
                if todo.id != id {
                    let err = ApiError::DeserializationError(format!(
                        "response id {} does not match requested id {id}",
                        todo.id
                    ));
                    return Err(mutation_failed(Mutation::Update, &err));
                }
                self.todos = reconcile(std::mem::take(&mut self.todos), todo);
                Ok(())
            }
            Event::Updated { result: Err(err), .. } => Err(mutation_failed(Mutation::Update, &err)),
            Event::Deleted { id, result: Ok(()) } => {
                self.todos.retain(|todo| todo.id != id);
                Ok(())
            }
            Event::Deleted { result: Err(err), .. } => Err(mutation_failed(Mutation::Delete, &err)),
        }
    }
}

/// Replace the record whose id matches `updated.id` with `updated`.
///
/// Order is preserved. If nothing matches, the collection comes back as is.
pub fn reconcile(todos: Vec<Todo>, updated: Todo) -> Vec<Todo> {
    todos
        .into_iter()
        .map(|todo| if todo.id == updated.id { updated.clone() } else { todo })
        .collect()
}

fn dedup_by_id(todos: Vec<Todo>) -> Vec<Todo> {
    let mut seen = HashSet::with_capacity(todos.len());
    let total = todos.len();
    let unique: Vec<Todo> = todos
        .into_iter()
        .filter(|todo| seen.insert(todo.id.clone()))
        .collect();
    if unique.len() != total {
        warn!(dropped = total - unique.len(), "list response contained duplicate ids");
    }
    unique
}

fn mutation_failed(kind: Mutation, err: &ApiError) -> SyncError {
    warn!(error = %err, "{}", kind.failure_message());
    SyncError::MutationFailure(kind)
}
