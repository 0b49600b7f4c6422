// ABOUTME: Dialog and toast managers used by renderers
// Presentation-side state only; no wizard invariant depends on it

pub mod modal;
pub mod toast;

pub use modal::{ActiveDialog, DialogHandle, DialogKind, DialogManager, DialogRequest};
pub use toast::{Toast, ToastId, ToastKind, ToastManager, ToastPosition};
