//! Terminal front end: a home prompt and a per-user profile screen.

pub mod app;
pub mod events;
pub mod footer;
pub mod header;
pub mod home;
pub mod input;
pub mod layout;
pub mod mvi;
pub mod render;
pub mod runtime;
pub mod terminal_guard;
pub mod theme;
pub mod user;

pub use runtime::run;
