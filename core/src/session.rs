//! Drives `TodoState` against the gateway.
//!
//! # Design
//! The session owns the state, a `TodoClient`, and two host-supplied seams:
//! a `Transport` that executes one `HttpRequest`, and an `Interaction` that
//! asks the user to confirm and shows blocking notices. Every operation is
//! build request -> execute -> parse -> `TodoState::reduce`, so the state only
//! changes after the gateway has answered.

use tracing::{debug, info};

use crate::client::TodoClient;
use crate::error::{ApiError, SyncError};
use crate::http::{HttpRequest, HttpResponse};
use crate::state::{Draft, Event, TodoState};
use crate::types::{CreateTodo, TodoId, UpdateTodo};
use crate::view::TodoView;

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this todo?";

/// Executes one HTTP round trip. Non-2xx statuses are returned as data, not
/// as errors; only failures that produce no response are `Err`.
pub trait Transport {
    fn execute(&mut self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn execute(&mut self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}

/// User-facing side effects the session needs from its host.
pub trait Interaction {
    /// Synchronous yes/no question. `false` aborts the action.
    fn confirm(&mut self, prompt: &str) -> bool;

    /// Blocking, non-persistent notice (an alert).
    fn notify(&mut self, message: &str);
}

impl<I: Interaction + ?Sized> Interaction for &mut I {
    fn confirm(&mut self, prompt: &str) -> bool {
        (**self).confirm(prompt)
    }

    fn notify(&mut self, message: &str) {
        (**self).notify(message)
    }
}

/// How a mutation ended when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The gateway confirmed and local state was patched.
    Applied,
    /// Blank title; nothing was sent.
    InvalidInput,
    /// No local record has that id; nothing was sent.
    UnknownId,
    /// The user declined the confirmation; nothing was sent.
    Declined,
}

pub struct TodoSession<T, I> {
    client: TodoClient,
    transport: T,
    interaction: I,
    state: TodoState,
}

impl<T: Transport, I: Interaction> TodoSession<T, I> {
    pub fn new(client: TodoClient, transport: T, interaction: I) -> Self {
        Self {
            client,
            transport,
            interaction,
            state: TodoState::new(),
        }
    }

    pub fn state(&self) -> &TodoState {
        &self.state
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn interaction(&self) -> &I {
        &self.interaction
    }

    pub fn interaction_mut(&mut self) -> &mut I {
        &mut self.interaction
    }

    pub fn view(&self) -> TodoView {
        TodoView::from_state(&self.state)
    }

    pub fn draft(&self) -> &Draft {
        &self.state.draft
    }

    pub fn set_draft(&mut self, title: &str, description: &str) {
        self.state.draft = Draft::new(title, description);
    }

    /// Fetch the whole collection and replace local state with it.
    ///
    /// A failure degrades to an empty list; it is logged and recorded in
    /// `TodoState::load_failed` but never returned.
    pub fn load_all(&mut self) {
        let request = self.client.build_list_todos();
        let result = self
            .round_trip(request)
            .and_then(|response| self.client.parse_list_todos(response));
        if self.state.reduce(Event::Loaded(result)).is_ok() {
            info!(count = self.state.len(), "loaded todos");
        }
    }

    /// Fill the draft with `title` / `description` and submit it.
    pub fn create(&mut self, title: &str, description: &str) -> Result<Outcome, SyncError> {
        self.set_draft(title, description);
        self.submit_draft()
    }

    /// Submit the current draft. The draft is cleared only on success.
    pub fn submit_draft(&mut self) -> Result<Outcome, SyncError> {
        let draft = &self.state.draft;
        let Some(input) = CreateTodo::from_input(&draft.title, &draft.description) else {
            debug!("blank title, nothing submitted");
            return Ok(Outcome::InvalidInput);
        };
        let result = self
            .client
            .build_create_todo(&input)
            .and_then(|request| self.round_trip(request))
            .and_then(|response| self.client.parse_create_todo(response));
        self.apply(Event::Created(result))
    }

    /// Flip `completed` relative to the local copy of `id`.
    pub fn toggle_complete(&mut self, id: &TodoId) -> Result<Outcome, SyncError> {
        let Some(current) = self.state.get(id) else {
            debug!(%id, "toggle for unknown id ignored");
            return Ok(Outcome::UnknownId);
        };
        let input = UpdateTodo::completed(!current.completed);
        let result = self
            .client
            .build_update_todo(id, &input)
            .and_then(|request| self.round_trip(request))
            .and_then(|response| self.client.parse_update_todo(response));
        self.apply(Event::Updated {
            id: id.clone(),
            result,
        })
    }

    /// Delete `id` after the user confirms.
    pub fn delete(&mut self, id: &TodoId) -> Result<Outcome, SyncError> {
        if self.state.get(id).is_none() {
            debug!(%id, "delete for unknown id ignored");
            return Ok(Outcome::UnknownId);
        }
        if !self.interaction.confirm(DELETE_PROMPT) {
            return Ok(Outcome::Declined);
        }
        let request = self.client.build_delete_todo(id);
        let result = self
            .round_trip(request)
            .and_then(|response| self.client.parse_delete_todo(response));
        self.apply(Event::Deleted {
            id: id.clone(),
            result,
        })
    }

    fn round_trip(&mut self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = %request.method, path = %request.path, "sending request");
        let response = self.transport.execute(request)?;
        debug!(status = response.status, "received response");
        Ok(response)
    }

    fn apply(&mut self, event: Event) -> Result<Outcome, SyncError> {
        match self.state.reduce(event) {
            Ok(()) => Ok(Outcome::Applied),
            Err(err) => {
                self.interaction.notify(&err.to_string());
                Err(err)
            }
        }
    }
}
