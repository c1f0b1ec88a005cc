// 📋 Forms - create and edit state for the roster screen
//
// The compensation field goes through `money::normalize` on every edit and
// `money::validate` on submit. Both forms share that path; only the set of
// fields differs.

use crate::entities::{CompensationUpdate, NewAgent, MAX_CATEGORY_LEN, MAX_NAME_LEN};
use crate::money::{self, ValidationOutcome};

/// Keep at most `max` characters, like an input's maxLength.
fn cap_chars(raw: &str, max: usize) -> String {
    raw.chars().take(max).collect()
}

/// Keystroke path shared by both forms. A refused edit leaves `field` as is.
fn apply_compensation(field: &mut String, raw: &str) -> bool {
    match money::normalize(raw) {
        Some(value) => {
            *field = value;
            true
        }
        None => false,
    }
}

/// Submit-time compensation check shared by both forms.
fn check_compensation(text: &str) -> Result<(), String> {
    match money::validate(text) {
        ValidationOutcome::Accepted(_) => Ok(()),
        ValidationOutcome::Rejected(reason) => Err(reason.message().to_string()),
    }
}

// ============================================================================
// CREATE FORM
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateForm {
    pub name: String,
    pub category: String,
    pub tenure: u32,
    pub compensation: String,
    /// Inline error shown above the fields
    pub error: Option<String>,
    /// Set between a successful `submit` and `finish`
    pub loading: bool,
}

impl CreateForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input_name(&mut self, raw: &str) {
        self.name = cap_chars(raw, MAX_NAME_LEN);
    }

    pub fn input_category(&mut self, raw: &str) {
        self.category = cap_chars(raw, MAX_CATEGORY_LEN);
    }

    /// Empty text means 0; anything non-numeric leaves the value alone.
    pub fn input_tenure(&mut self, raw: &str) {
        let raw = raw.trim();
        if raw.is_empty() {
            self.tenure = 0;
        } else if let Ok(years) = raw.parse::<u32>() {
            self.tenure = years;
        }
    }

    /// Returns false when the edit was refused and the value kept.
    pub fn input_compensation(&mut self, raw: &str) -> bool {
        apply_compensation(&mut self.compensation, raw)
    }

    /// Run the submit-time checks. Returns the payload to send, or `None`
    /// with `error` set (no request should be issued).
    pub fn submit(&mut self) -> Option<NewAgent> {
        self.error = None;
        if self.loading {
            return None;
        }

        let draft = NewAgent {
            name: self.name.clone(),
            category: self.category.clone(),
            tenure: self.tenure,
            compensation: self.compensation.clone(),
        };

        if let Err(message) = draft.check_text_fields() {
            self.error = Some(message.to_string());
            return None;
        }
        if let Err(message) = check_compensation(&draft.compensation) {
            self.error = Some(message);
            return None;
        }

        self.loading = true;
        Some(draft)
    }

    /// Called when the create request has completed. Fields are cleared only
    /// when it succeeded, so a refused submission can be corrected.
    pub fn finish(&mut self, succeeded: bool) {
        self.loading = false;
        if succeeded {
            *self = CreateForm::default();
        }
    }
}

// ============================================================================
// EDIT FORM
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditForm {
    pub compensation: String,
    pub error: Option<String>,
    pub loading: bool,
}

impl EditForm {
    /// Seeded with the stored value as-is; it is only trusted after `submit`.
    pub fn new(initial: &str) -> Self {
        EditForm {
            compensation: initial.to_string(),
            error: None,
            loading: false,
        }
    }

    pub fn input_compensation(&mut self, raw: &str) -> bool {
        apply_compensation(&mut self.compensation, raw)
    }

    pub fn submit(&mut self) -> Option<CompensationUpdate> {
        self.error = None;
        if self.loading {
            return None;
        }

        if let Err(message) = check_compensation(&self.compensation) {
            self.error = Some(message);
            return None;
        }

        self.loading = true;
        Some(CompensationUpdate::new(self.compensation.clone()))
    }

    pub fn finish(&mut self) {
        self.loading = false;
    }
}
