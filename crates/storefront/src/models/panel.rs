//! Login / registration panel state.

use serde::{Deserialize, Serialize};

/// Which form the panel shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelMode {
    #[default]
    Login,
    Register,
}

/// The collapsible login/registration panel in the header.
///
/// The email and name typed by the visitor stick across submissions so a
/// failed attempt does not clear the form. Passwords are never kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginPanel {
    pub open: bool,
    pub mode: PanelMode,
    pub error: Option<String>,
    pub email: String,
    pub name: String,
}

impl LoginPanel {
    /// Show or hide the panel. Clears any error message.
    pub fn toggle(&mut self) {
        self.open = !self.open;
        self.error = None;
    }

    /// Switch between the login and registration forms. Clears any error message.
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            PanelMode::Login => PanelMode::Register,
            PanelMode::Register => PanelMode::Login,
        };
        self.error = None;
    }

    /// Hide the panel after a successful sign-in.
    pub fn close(&mut self) {
        self.open = false;
        self.error = None;
    }

    /// Show a user-facing error message.
    pub fn fail(&mut self, message: &str) {
        self.error = Some(message.to_owned());
    }

    /// Whether the panel shows the registration form.
    #[must_use]
    pub fn is_registering(&self) -> bool {
        self.mode == PanelMode::Register
    }

    /// Label of the button that opens and closes the panel.
    #[must_use]
    pub const fn toggle_label(&self) -> &'static str {
        if self.open { "Close" } else { "Login / Register" }
    }
}
