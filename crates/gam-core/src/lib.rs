//! Core domain and console logic for the GAM administrative console.
//!
//! Sits between the raw HTTP client (`gam-api`) and any frontend. Owns
//! the canonical entity model, the keyed query cache, list view state,
//! the mutation set with its invalidation scopes, and the session
//! store. The [`console::Console`] type composes all of it.

pub mod console;
pub mod convert;
pub mod error;
pub mod model;
pub mod mutation;
pub mod query;
pub mod session;

pub use console::{AlarmPoller, Console, Page};
pub use error::CoreError;
pub use mutation::{Action, MutationHandle, Navigation};
pub use query::{ColumnSpec, InvalidationScope, ListController, PageSummary, QueryCache, QueryKey, Resource};
pub use session::{SessionState, SessionStore};
