//! goquiz-core: Validation engine, async actions, and the quiz state machine.
//!
//! This crate holds everything the goquiz screens do that is independent of
//! how requests reach the service or how the user interacts: validated form
//! fields, the login/registration orchestration, the quiz session and its
//! scoring. Collaborators are injected through the traits in [`traits`].

pub mod action;
pub mod auth;
pub mod bank;
pub mod error;
pub mod field;
pub mod form;
pub mod model;
pub mod quiz;
pub mod runner;
pub mod scoring;
pub mod session;
pub mod traits;

#[cfg(test)]
mod testing;

pub use action::{ActionOutcome, AsyncAction};
pub use error::{ActionError, FormError, QuizError};
pub use traits::{Endpoints, Method, Navigator, RemoteRequest, Screen, Services, SessionStore, Transport};
