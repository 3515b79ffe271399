//! Storyteller - Interactive storytelling backend
//!
//! This library crate exposes the HTTP layer, configuration, and upload
//! storage for integration testing. Story generation lives in
//! `storyteller-llm`.

pub mod config;
pub mod server;
pub mod uploads;
