pub mod cli;
pub mod config;
pub mod github;
pub mod logging;
pub mod query;
pub mod router;
pub mod ui;
