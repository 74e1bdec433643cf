//! API handlers.

pub mod api;
pub mod commands;
pub mod health;
pub mod install;
pub mod options;
