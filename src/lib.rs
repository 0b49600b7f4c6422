// ABOUTME: Library crate for stepwise - wizard state machine, step validation, and TUI renderer

#![allow(missing_docs)]

pub mod app;
pub mod components;
pub mod config;
pub mod dialog;
pub mod persistence;
pub mod validation;
pub mod wizard;

pub use validation::create_validator;
pub use wizard::create_wizard;
