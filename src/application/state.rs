//! Application state management for the course catalog browser.
//!
//! This module ties the catalog manager and the registration form together
//! with the interaction state of the terminal interface.

use super::catalog::Catalog;
use super::registration::{FormStatus, RegistrationForm, RegistrationTimings, SubmitOutcome};
use crate::domain::FormField;
use std::time::{Duration, Instant};

/// Upper bound on how long the event loop waits for input, so that loading
/// progress and timer transitions are redrawn promptly.
pub const MAX_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Represents the current mode of the application.
///
/// The mode decides how key presses are interpreted and which pane has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Browsing the catalog - filter, sort and page keys are active
    Browse,
    /// Filling in the registration form
    Register,
    /// Help screen is displayed
    Help,
}

/// Control of the registration form that receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    Name,
    Email,
    Course,
    Submit,
}

impl FormFocus {
    pub fn next(self) -> Self {
        match self {
            FormFocus::Name => FormFocus::Email,
            FormFocus::Email => FormFocus::Course,
            FormFocus::Course => FormFocus::Submit,
            FormFocus::Submit => FormFocus::Name,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            FormFocus::Name => FormFocus::Submit,
            FormFocus::Email => FormFocus::Name,
            FormFocus::Course => FormFocus::Email,
            FormFocus::Submit => FormFocus::Course,
        }
    }

    /// The form field behind this control, if it edits one.
    pub fn field(self) -> Option<FormField> {
        match self {
            FormFocus::Name => Some(FormField::Name),
            FormFocus::Email => Some(FormField::Email),
            FormFocus::Course => Some(FormField::Course),
            FormFocus::Submit => None,
        }
    }
}

/// Main application state containing the catalog, the form and UI state.
///
/// # Examples
///
/// ```
/// use coursedeck::application::{App, AppMode};
///
/// let app = App::default();
/// assert_eq!(app.mode, AppMode::Browse);
/// assert!(app.catalog.is_loading());
/// ```
#[derive(Debug)]
pub struct App {
    /// Course list with filter, sort and page state
    pub catalog: Catalog,
    /// Registration form state machine
    pub form: RegistrationForm,
    /// Current application mode
    pub mode: AppMode,
    /// Mode to return to when the help screen closes
    pub previous_mode: AppMode,
    /// Focused control of the registration form
    pub focus: FormFocus,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Temporary status message to display
    pub status_message: Option<String>,
}

impl Default for App {
    fn default() -> Self {
        Self::new(Catalog::default(), RegistrationForm::default())
    }
}

impl App {
    pub fn new(catalog: Catalog, form: RegistrationForm) -> Self {
        Self {
            catalog,
            form,
            mode: AppMode::Browse,
            previous_mode: AppMode::Browse,
            focus: FormFocus::Name,
            help_scroll: 0,
            status_message: None,
        }
    }

    /// Builds the state for a session with the given page size and delays.
    pub fn with_settings(items_per_page: usize, timings: RegistrationTimings) -> Self {
        Self::new(Catalog::new(items_per_page), RegistrationForm::new(timings))
    }

    /// Moves focus to the registration form.
    pub fn start_registration(&mut self) {
        self.mode = AppMode::Register;
        self.focus = FormFocus::Name;
        self.status_message = None;
    }

    /// Returns to the catalog, keeping whatever was typed into the form.
    pub fn stop_registration(&mut self) {
        self.mode = AppMode::Browse;
    }

    pub fn show_help(&mut self) {
        if self.mode != AppMode::Help {
            self.previous_mode = self.mode;
        }
        self.mode = AppMode::Help;
        self.help_scroll = 0;
    }

    pub fn close_help(&mut self) {
        self.mode = self.previous_mode;
    }

    /// Submits the registration form and reports the outcome in the status bar.
    ///
    /// # Arguments
    ///
    /// * `now` - Current time, used to schedule the simulated registration
    pub fn submit_registration(&mut self, now: Instant) {
        self.status_message = match self.form.submit(now) {
            SubmitOutcome::Accepted => Some("Submitting registration...".to_string()),
            SubmitOutcome::Rejected(errors) => Some(format!(
                "Please fix {} field{} before submitting",
                errors.len(),
                if errors.len() == 1 { "" } else { "s" }
            )),
            SubmitOutcome::Ignored => return,
        };
    }

    /// Advances time-driven state. Returns whether anything changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let changed = self.form.tick(now);
        if changed {
            self.status_message = match self.form.status() {
                FormStatus::Success => Some("Registration successful".to_string()),
                _ => None,
            };
        }
        changed
    }

    /// How long the event loop may block waiting for input.
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        match self.form.next_deadline() {
            Some(deadline) => deadline.saturating_duration_since(now).min(MAX_POLL_INTERVAL),
            None => MAX_POLL_INTERVAL,
        }
    }

    /// Cancels anything still scheduled before the application exits.
    pub fn shutdown(&mut self) {
        self.form.cancel_pending();
    }
}
