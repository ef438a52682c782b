//! Rising Herb Backend Library
//!
//! Exposes core modules for use by the server binary and integration tests.

pub mod app;
pub mod auth;
pub mod catalog;
pub mod chat;
pub mod config;
pub mod content;
pub mod middleware;
