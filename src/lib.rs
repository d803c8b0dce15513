//! bahth: a search launcher.
//!
//! Builds search URLs for a handful of engines, keeps a bounded search
//! history and a favorites list, and supports voice queries through an
//! external speech-to-text command. State lives in a SQLite key-value store.

pub mod config;
pub mod controller;
pub mod engine;
pub mod favorites;
pub mod history;
pub mod i18n;
pub mod launcher;
pub mod navigator;
pub mod repl;
pub mod settings;
pub mod storage;
pub mod view;
pub mod voice;

#[cfg(test)]
mod testing;
