//! Model-View-Intent primitives shared by screens and query binders.
//!
//! ```text
//! key press / response ──▶ Intent ──▶ Reducer ──▶ State ──▶ draw
//!          ▲                                                  │
//!          └──────────────────────────────────────────────────┘
//! ```
//!
//! Reducers are pure; side effects (requests, navigation) live in the owner
//! that dispatches intents.

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
