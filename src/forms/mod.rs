//! Input forms. Each form holds raw field values and turns them into a
//! normalized draft, or a list of field errors, on `validate`.

pub mod client_form;
pub mod order_form;
pub mod product_form;

pub use client_form::ClientForm;
pub use order_form::{available_products, LineItemError, OrderForm, OrderLine};
pub use product_form::ProductForm;

use std::fmt;

/// Whether the form creates a record or edits the one with this id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode<I> {
    Create,
    Edit(I),
}

impl<I> Default for FormMode<I> {
    fn default() -> Self {
        FormMode::Create
    }
}

impl<I> FormMode<I> {
    pub fn title(&self, noun: &str) -> String {
        match self {
            FormMode::Create => format!("New {noun}"),
            FormMode::Edit(_) => format!("Edit {noun}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every problem found in one submission; submission is blocked while non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(pub Vec<FieldError>);

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self.0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ");
        write!(f, "{} field error(s): {joined}", self.0.len())
    }
}

impl std::error::Error for FormErrors {}

impl FormErrors {
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError::new(field, message));
    }

    pub fn for_field(&self, field: &str) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field == field)
    }

    /// `Ok(value)` when nothing was pushed.
    pub fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FormErrors> {
        if self.0.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

/// Trims and maps blank input to `None`.
pub(crate) fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
