// ABOUTME: Toast notifications with auto-dismiss durations

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use uuid::Uuid;

pub type ToastId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Info,
    Success,
    Warning,
    Error,
}

/// Screen corner or edge a toast stacks at
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToastPosition {
    #[default]
    TopRight,
    TopLeft,
    TopCenter,
    BottomRight,
    BottomLeft,
    BottomCenter,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    pub kind: ToastKind,
    /// Zero means sticky
    pub duration: Duration,
    pub position: ToastPosition,
    pub created_at: Instant,
}

impl Toast {
    pub fn is_expired(&self, now: Instant) -> bool {
        !self.duration.is_zero() && now.saturating_duration_since(self.created_at) >= self.duration
    }
}

#[derive(Debug)]
pub struct ToastManager {
    toasts: Vec<Toast>,
    default_duration: Duration,
    default_position: ToastPosition,
}

impl Default for ToastManager {
    fn default() -> Self {
        Self::new(Duration::from_millis(3000), ToastPosition::default())
    }
}

impl ToastManager {
    pub fn new(default_duration: Duration, default_position: ToastPosition) -> Self {
        Self {
            toasts: Vec::new(),
            default_duration,
            default_position,
        }
    }

    pub fn add(
        &mut self,
        message: impl Into<String>,
        kind: ToastKind,
        duration: Duration,
        position: ToastPosition,
    ) -> ToastId {
        let id = Uuid::new_v4();
        self.toasts.push(Toast {
            id,
            message: message.into(),
            kind,
            duration,
            position,
            created_at: Instant::now(),
        });
        id
    }

    pub fn success(&mut self, message: impl Into<String>) -> ToastId {
        self.add_default(message, ToastKind::Success)
    }

    pub fn error(&mut self, message: impl Into<String>) -> ToastId {
        self.add_default(message, ToastKind::Error)
    }

    pub fn warning(&mut self, message: impl Into<String>) -> ToastId {
        self.add_default(message, ToastKind::Warning)
    }

    pub fn info(&mut self, message: impl Into<String>) -> ToastId {
        self.add_default(message, ToastKind::Info)
    }

    /// Returns whether a toast was removed
    pub fn remove(&mut self, id: ToastId) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }

    pub fn clear_all(&mut self) {
        self.toasts.clear();
    }

    /// Drop toasts whose duration has elapsed; returns how many were removed
    pub fn expire(&mut self, now: Instant) -> usize {
        let before = self.toasts.len();
        self.toasts.retain(|t| !t.is_expired(now));
        before - self.toasts.len()
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    fn add_default(&mut self, message: impl Into<String>, kind: ToastKind) -> ToastId {
        self.add(message, kind, self.default_duration, self.default_position)
    }
}
