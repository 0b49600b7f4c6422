// ABOUTME: Terminal application built on the wizard controller

pub mod events;
pub mod state;

pub use events::{AppEvent, EventHandler};
pub use state::{AppState, PendingDecision};
