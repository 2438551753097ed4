//! Rolodex TUI library exports.

pub mod api_client;
pub mod cache;
pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod form;
pub mod keys;
pub mod notifications;
pub mod persistence;
pub mod state;
pub mod table;
pub mod theme;
pub mod views;
