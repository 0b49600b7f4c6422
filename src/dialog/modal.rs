// ABOUTME: Modal dialog manager - alert, confirm, and prompt requests
// Each request resolves exactly once through a oneshot channel

use tokio::sync::oneshot::{self, error::TryRecvError};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Alert,
    Confirm,
    Prompt,
}

/// What the renderer needs to draw a dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogRequest {
    pub kind: DialogKind,
    pub title: String,
    pub message: String,
    pub placeholder: String,
    pub confirm_text: String,
    pub cancel_text: String,
}

impl DialogRequest {
    fn new(kind: DialogKind, title: &str, message: &str) -> Self {
        Self {
            kind,
            title: title.to_string(),
            message: message.to_string(),
            placeholder: String::new(),
            confirm_text: "OK".to_string(),
            cancel_text: "Cancel".to_string(),
        }
    }
}

enum Responder {
    Flag(oneshot::Sender<bool>),
    Text(oneshot::Sender<Option<String>>),
}

/// The dialog currently on screen
pub struct ActiveDialog {
    request: DialogRequest,
    input: String,
    responder: Responder,
}

impl std::fmt::Debug for ActiveDialog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActiveDialog")
            .field("request", &self.request)
            .field("input", &self.input)
            .finish_non_exhaustive()
    }
}

impl ActiveDialog {
    pub fn request(&self) -> &DialogRequest {
        &self.request
    }

    /// Text typed into a prompt so far
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Pending answer to a dialog. A dialog closed without an answer yields `T::default()`.
#[derive(Debug)]
pub struct DialogHandle<T> {
    rx: oneshot::Receiver<T>,
}

impl<T: Default> DialogHandle<T> {
    /// Wait for the user's answer
    pub async fn wait(self) -> T {
        self.rx.await.unwrap_or_default()
    }

    /// Non-blocking poll for render loops. Drop the handle once this yields.
    pub fn try_take(&mut self) -> Option<T> {
        match self.rx.try_recv() {
            Ok(value) => Some(value),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => Some(T::default()),
        }
    }
}

/// Holds at most one open dialog
#[derive(Debug, Default)]
pub struct DialogManager {
    active: Option<ActiveDialog>,
}

impl DialogManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<&ActiveDialog> {
        self.active.as_ref()
    }

    /// Informational dialog; resolves to `true` once dismissed
    pub fn alert(&mut self, title: &str, message: &str) -> DialogHandle<bool> {
        let (tx, rx) = oneshot::channel();
        self.open(DialogRequest::new(DialogKind::Alert, title, message), Responder::Flag(tx));
        DialogHandle { rx }
    }

    /// Yes/no question; resolves to whether the user confirmed
    pub fn confirm(&mut self, title: &str, message: &str) -> DialogHandle<bool> {
        let (tx, rx) = oneshot::channel();
        self.open(DialogRequest::new(DialogKind::Confirm, title, message), Responder::Flag(tx));
        DialogHandle { rx }
    }

    /// Text input; resolves to the submitted text, or `None` when cancelled
    pub fn prompt(
        &mut self,
        title: &str,
        message: &str,
        placeholder: &str,
    ) -> DialogHandle<Option<String>> {
        let (tx, rx) = oneshot::channel();
        let mut request = DialogRequest::new(DialogKind::Prompt, title, message);
        request.placeholder = placeholder.to_string();
        self.open(request, Responder::Text(tx));
        DialogHandle { rx }
    }

    /// Relabel the open dialog's buttons
    pub fn set_button_labels(&mut self, confirm_text: &str, cancel_text: &str) {
        if let Some(active) = &mut self.active {
            active.request.confirm_text = confirm_text.to_string();
            active.request.cancel_text = cancel_text.to_string();
        }
    }

    pub fn input_char(&mut self, c: char) {
        let prompt = self
            .active
            .as_mut()
            .filter(|a| a.request.kind == DialogKind::Prompt);
        if let Some(active) = prompt {
            active.input.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(active) = &mut self.active {
            active.input.pop();
        }
    }

    /// Resolve the open dialog with its confirm action. Returns whether one was open.
    pub fn confirm_active(&mut self) -> bool {
        let Some(active) = self.active.take() else {
            return false;
        };
        match active.responder {
            Responder::Flag(tx) => {
                let _ = tx.send(true);
            }
            Responder::Text(tx) => {
                let _ = tx.send(Some(active.input));
            }
        }
        true
    }

    /// Resolve the open dialog with its cancel action. Alerts have no cancel, so dismissing
    /// one acknowledges it.
    pub fn cancel_active(&mut self) -> bool {
        let Some(active) = self.active.take() else {
            return false;
        };
        match active.responder {
            Responder::Flag(tx) => {
                let _ = tx.send(active.request.kind == DialogKind::Alert);
            }
            Responder::Text(tx) => {
                let _ = tx.send(None);
            }
        }
        true
    }

    fn open(&mut self, request: DialogRequest, responder: Responder) {
        if let Some(previous) = self.active.take() {
            // Dropping the sender resolves the old handle to its default
            debug!(title = %previous.request.title, "Dialog superseded");
        }
        self.active = Some(ActiveDialog {
            request,
            input: String::new(),
            responder,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_confirm_resolves_true() {
        let mut dialogs = DialogManager::new();
        let handle = dialogs.confirm("Quit", "Discard progress?");
        assert_eq!(dialogs.active().unwrap().request().kind, DialogKind::Confirm);

        assert!(dialogs.confirm_active());
        assert!(!dialogs.is_open());
        assert!(handle.wait().await);
    }

    #[tokio::test]
    async fn test_confirm_cancel_resolves_false() {
        let mut dialogs = DialogManager::new();
        let handle = dialogs.confirm("Quit", "Discard progress?");
        dialogs.cancel_active();
        assert!(!handle.wait().await);
    }

    #[tokio::test]
    async fn test_alert_dismiss_acknowledges() {
        let mut dialogs = DialogManager::new();
        let handle = dialogs.alert("Saved", "Progress saved");
        dialogs.cancel_active();
        assert!(handle.wait().await);
    }

    #[tokio::test]
    async fn test_prompt_returns_typed_text() {
        let mut dialogs = DialogManager::new();
        let handle = dialogs.prompt("Rename", "New name?", "Enter your input...");
        assert_eq!(dialogs.active().unwrap().request().placeholder, "Enter your input...");

        for c in "abcd".chars() {
            dialogs.input_char(c);
        }
        dialogs.backspace();
        assert_eq!(dialogs.active().unwrap().input(), "abc");

        dialogs.confirm_active();
        assert_eq!(handle.wait().await, Some("abc".to_string()));
    }

    #[tokio::test]
    async fn test_prompt_cancel_returns_none() {
        let mut dialogs = DialogManager::new();
        let handle = dialogs.prompt("Rename", "New name?", "");
        dialogs.input_char('x');
        dialogs.cancel_active();
        assert_eq!(handle.wait().await, None);
    }

    #[test]
    fn test_new_dialog_supersedes_old() {
        let mut dialogs = DialogManager::new();
        let mut first = dialogs.confirm("First", "?");
        let mut second = dialogs.confirm("Second", "?");

        assert_eq!(first.try_take(), Some(false));
        assert_eq!(second.try_take(), None);
        assert_eq!(dialogs.active().unwrap().request().title, "Second");

        dialogs.confirm_active();
        assert_eq!(second.try_take(), Some(true));
    }

    #[test]
    fn test_resolving_without_dialog_is_noop() {
        let mut dialogs = DialogManager::new();
        assert!(!dialogs.confirm_active());
        assert!(!dialogs.cancel_active());
    }

    #[test]
    fn test_button_labels() {
        let mut dialogs = DialogManager::new();
        let _handle = dialogs.confirm("Reset", "Start over?");
        dialogs.set_button_labels("Yes", "No");

        let request = dialogs.active().unwrap().request();
        assert_eq!(request.confirm_text, "Yes");
        assert_eq!(request.cancel_text, "No");
    }
}
