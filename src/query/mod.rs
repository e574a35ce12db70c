//! Binding asynchronous requests to render state.
//!
//! A [`QueryBinder`] owns a [`RequestState`] and keeps it synchronized with
//! the most recent request implied by its inputs:
//!
//! ```text
//! observe(query, variables) ──deep-equal?──▶ no-op
//!          │ changed
//!          ▼
//!   Issue ──▶ client.request ──▶ Succeeded(normalize(raw)) | Failed(error)
//!                                      │
//!                      live? latest? ──┴──▶ reducer ──▶ observers / render
//! ```
//!
//! All transitions go through [`QueryReducer`], so the state is always one
//! of the shapes the reducer can produce.

mod binder;
mod client;
mod input;
mod intent;
mod liveness;
mod reducer;
mod state;

pub use binder::{Normalize, Observer, QueryBinder, QueryOptions};
pub use client::{RequestClient, RequestError};
pub use input::{deep_equal, InputError, QueryInput};
pub use intent::QueryIntent;
pub use liveness::{Liveness, LivenessToken};
pub use reducer::QueryReducer;
pub use state::RequestState;
