//! Synchronization core for the todo client.
//!
//! # Overview
//! Keeps a local, newest-first copy of a remote todo collection in step with
//! user actions. The gateway is the only source of truth: local state changes
//! only after the gateway answers, and a failed request leaves it untouched.
//!
//! # Design
//! - `TodoClient` is stateless. It builds `HttpRequest` values and parses
//!   `HttpResponse` values without touching the network (host-does-IO).
//! - `TodoState::reduce` folds one round-trip `Event` into state; `reconcile`
//!   is the pure replace-by-id step it uses.
//! - `TodoSession` wires the two together over a host `Transport` and a host
//!   `Interaction` (confirm / notify).
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod session;
pub mod state;
pub mod types;
pub mod view;

pub use client::TodoClient;
pub use error::{ApiError, Mutation, SyncError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use session::{Interaction, Outcome, TodoSession, Transport, DELETE_PROMPT};
pub use state::{reconcile, Draft, Event, TodoState};
pub use types::{CreateTodo, Todo, TodoId, UpdateTodo};
pub use view::{TodoItemView, TodoView};
