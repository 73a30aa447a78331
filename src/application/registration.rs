//! Registration form state machine.
//!
//! The simulated registration is modelled as an explicit chain of scheduled
//! steps owned by the form: `submitting` completes after the submit delay,
//! then `success` reverts to `idle` after the display delay. The caller
//! drives time through [`RegistrationForm::tick`]. A pending step lives only
//! as long as the form, so nothing can fire once the form is gone.

use crate::domain::{Course, FieldError, FormField, RegistrationFields, Validation, validate};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub const DEFAULT_SUBMIT_DELAY: Duration = Duration::from_millis(1500);
pub const DEFAULT_SUCCESS_DISPLAY: Duration = Duration::from_millis(3000);

/// Delays of the simulated registration call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistrationTimings {
    /// Time spent in `submitting` before the registration succeeds
    pub submit_delay: Duration,
    /// Time the success message stays up before the form resets
    pub success_display: Duration,
}

impl Default for RegistrationTimings {
    fn default() -> Self {
        Self {
            submit_delay: DEFAULT_SUBMIT_DELAY,
            success_display: DEFAULT_SUCCESS_DISPLAY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormStatus {
    #[default]
    Idle,
    Submitting,
    Success,
    Error,
}

/// What happened to a submit request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation passed and the registration is in flight
    Accepted,
    /// Validation failed; the errors are stored on the form
    Rejected(Vec<FieldError>),
    /// The submit control is disabled in the current status
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Complete,
    Reset,
}

#[derive(Debug, Clone, Copy)]
struct ScheduledStep {
    due: Instant,
    step: Step,
}

#[derive(Debug, Default)]
pub struct RegistrationForm {
    fields: RegistrationFields,
    errors: BTreeMap<FormField, &'static str>,
    status: FormStatus,
    timings: RegistrationTimings,
    pending: Option<ScheduledStep>,
}

impl RegistrationForm {
    pub fn new(timings: RegistrationTimings) -> Self {
        Self {
            timings,
            ..Self::default()
        }
    }

    pub fn fields(&self) -> &RegistrationFields {
        &self.fields
    }

    pub fn name(&self) -> &str {
        &self.fields.name
    }

    pub fn email(&self) -> &str {
        &self.fields.email
    }

    pub fn selected_course_id(&self) -> &str {
        &self.fields.selected_course_id
    }

    /// Messages from the last failed submit, keyed by field.
    pub fn errors(&self) -> &BTreeMap<FormField, &'static str> {
        &self.errors
    }

    pub fn error_for(&self, field: FormField) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn timings(&self) -> RegistrationTimings {
        self.timings
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        matches!(self.status, FormStatus::Idle | FormStatus::Error)
    }

    /// Whether field edits are currently accepted.
    pub fn accepts_input(&self) -> bool {
        self.can_submit()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.edit(|fields| fields.name = name);
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        let email = email.into();
        self.edit(|fields| fields.email = email);
    }

    pub fn set_selected_course(&mut self, course_id: impl Into<String>) {
        let course_id = course_id.into();
        self.edit(|fields| fields.selected_course_id = course_id);
    }

    /// Appends `c` to a text field. The course selector is not free text.
    pub fn push_char(&mut self, field: FormField, c: char) {
        match field {
            FormField::Name => self.edit(|fields| fields.name.push(c)),
            FormField::Email => self.edit(|fields| fields.email.push(c)),
            FormField::Course => {}
        }
    }

    pub fn pop_char(&mut self, field: FormField) {
        match field {
            FormField::Name => self.edit(|fields| {
                fields.name.pop();
            }),
            FormField::Email => self.edit(|fields| {
                fields.email.pop();
            }),
            FormField::Course => {}
        }
    }

    /// Selects the course after the current one in `courses`, starting from
    /// the first when nothing is selected yet.
    pub fn select_next_course(&mut self, courses: &[Course]) {
        if courses.is_empty() {
            return;
        }
        let next = match self.selected_index(courses) {
            Some(index) => (index + 1) % courses.len(),
            None => 0,
        };
        self.set_selected_course(courses[next].course_id.clone());
    }

    pub fn select_previous_course(&mut self, courses: &[Course]) {
        if courses.is_empty() {
            return;
        }
        let previous = match self.selected_index(courses) {
            Some(0) | None => courses.len() - 1,
            Some(index) => index - 1,
        };
        self.set_selected_course(courses[previous].course_id.clone());
    }

    /// The selected course, looked up by identifier in `courses`.
    pub fn selected_course<'a>(&self, courses: &'a [Course]) -> Option<&'a Course> {
        self.selected_index(courses).map(|index| &courses[index])
    }

    /// Validates the fields and, when valid, starts the simulated registration.
    ///
    /// # Arguments
    ///
    /// * `now` - Current time; the completion step is scheduled relative to it
    pub fn submit(&mut self, now: Instant) -> SubmitOutcome {
        if !self.can_submit() {
            warn!(status = ?self.status, "submit ignored while the control is disabled");
            return SubmitOutcome::Ignored;
        }

        match validate(&self.fields) {
            Validation::Invalid(errors) => {
                debug!(count = errors.len(), "registration form failed validation");
                self.errors = errors.iter().map(|e| (e.field, e.message)).collect();
                self.status = FormStatus::Error;
                SubmitOutcome::Rejected(errors)
            }
            Validation::Valid => {
                info!(course_id = %self.fields.selected_course_id, "registration submitted");
                self.errors.clear();
                self.status = FormStatus::Submitting;
                self.pending = Some(ScheduledStep {
                    due: now + self.timings.submit_delay,
                    step: Step::Complete,
                });
                SubmitOutcome::Accepted
            }
        }
    }

    /// Fires every scheduled step due at or before `now`. Returns whether the
    /// form changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;
        while let Some(scheduled) = self.pending {
            if scheduled.due > now {
                break;
            }
            self.pending = None;
            match scheduled.step {
                Step::Complete => {
                    info!("registration succeeded");
                    self.status = FormStatus::Success;
                    self.pending = Some(ScheduledStep {
                        due: scheduled.due + self.timings.success_display,
                        step: Step::Reset,
                    });
                }
                Step::Reset => {
                    debug!("registration form reset");
                    self.status = FormStatus::Idle;
                    self.fields = RegistrationFields::default();
                    self.errors.clear();
                }
            }
            changed = true;
        }
        changed
    }

    /// When the next scheduled step is due, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.map(|scheduled| scheduled.due)
    }

    /// Drops any scheduled step so it never fires.
    pub fn cancel_pending(&mut self) {
        if let Some(scheduled) = self.pending.take() {
            debug!(step = ?scheduled.step, "cancelled pending registration step");
        }
    }

    fn edit(&mut self, apply: impl FnOnce(&mut RegistrationFields)) {
        if !self.accepts_input() {
            return;
        }
        apply(&mut self.fields);
        if self.status == FormStatus::Error {
            self.status = FormStatus::Idle;
        }
    }

    fn selected_index(&self, courses: &[Course]) -> Option<usize> {
        courses
            .iter()
            .position(|course| course.course_id == self.fields.selected_course_id)
    }
}
