// ABOUTME: Terminal renderer components for the wizard screen and its overlays

pub mod dialog_view;
pub mod layout;
pub mod theme;
pub mod toast_view;
pub mod wizard_view;

pub use dialog_view::DialogComponent;
pub use layout::LayoutComponent;
pub use toast_view::ToastComponent;
pub use wizard_view::WizardViewComponent;
