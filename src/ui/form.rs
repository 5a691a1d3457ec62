use crate::error::UiError;
use core_types::dates::parse_date;
use core_types::{Customer, CustomerId, CustomerPayload};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    DateOfBirth,
    MemberNumber,
    Interests,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Name,
        FormField::DateOfBirth,
        FormField::MemberNumber,
        FormField::Interests,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::DateOfBirth => "Date of Birth",
            FormField::MemberNumber => "Member Number",
            FormField::Interests => "Interests",
        }
    }

    pub fn is_required(&self) -> bool {
        !matches!(self, FormField::Interests)
    }
}

/// Whether a submission creates a record or updates the one being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Create,
    Edit(CustomerId),
}

/// Raw text of each input, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pub name: String,
    pub date_of_birth: String,
    pub member_number: String,
    pub interests: String,
}

impl FormValues {
    fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::DateOfBirth => &self.date_of_birth,
            FormField::MemberNumber => &self.member_number,
            FormField::Interests => &self.interests,
        }
    }
}

impl From<&Customer> for FormValues {
    fn from(customer: &Customer) -> Self {
        Self {
            name: customer.name.clone(),
            // Date inputs take YYYY-MM-DD.
            date_of_birth: customer.date_of_birth.format("%Y-%m-%d").to_string(),
            member_number: customer.member_number.to_string(),
            interests: customer.interests.clone().unwrap_or_default(),
        }
    }
}

/// What a valid form turns into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Create(CustomerPayload),
    /// The payload carries the identifier of the record being edited.
    Update(CustomerPayload),
}

/// The single form shared by "add" and "edit".
#[derive(Debug, Clone, Default)]
pub struct CustomerForm {
    mode: FormMode,
    values: FormValues,
}

impl CustomerForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    pub fn title(&self) -> &'static str {
        if self.is_editing() { "Edit Customer" } else { "Add New Customer" }
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Name => self.values.name = value,
            FormField::DateOfBirth => self.values.date_of_birth = value,
            FormField::MemberNumber => self.values.member_number = value,
            FormField::Interests => self.values.interests = value,
        }
    }

    /// Loads a row's current values and switches to edit mode.
    pub fn start_edit(&mut self, customer: &Customer) {
        self.values = FormValues::from(customer);
        self.mode = FormMode::Edit(customer.id);
    }

    /// Leaves edit mode and blanks every input. No request is involved.
    pub fn cancel_edit(&mut self) {
        self.values = FormValues::default();
        self.mode = FormMode::Create;
    }

    /// Call after the API accepted a submission.
    pub fn submitted(&mut self) {
        if self.is_editing() {
            self.cancel_edit();
        }
    }

    pub fn missing_required(&self) -> Vec<FormField> {
        FormField::ALL
            .into_iter()
            .filter(|field| field.is_required() && self.values.get(*field).trim().is_empty())
            .collect()
    }

    /// Turns the inputs into a request payload; refuses while a required input is empty.
    pub fn submission(&self) -> Result<Submission, UiError> {
        let missing = self.missing_required();
        if !missing.is_empty() {
            return Err(UiError::MissingFields(
                missing.iter().map(FormField::label).collect(),
            ));
        }

        let date_of_birth =
            parse_date(&self.values.date_of_birth).map_err(|e| UiError::InvalidField {
                field: FormField::DateOfBirth.label(),
                reason: format!("expected YYYY-MM-DD ({e})"),
            })?;
        let member_number = self
            .values
            .member_number
            .trim()
            .parse::<i64>()
            .map_err(|e| UiError::InvalidField {
                field: FormField::MemberNumber.label(),
                reason: e.to_string(),
            })?;
        let interests = self.values.interests.trim();

        let mut payload = CustomerPayload {
            id: None,
            name: Some(self.values.name.trim().to_string()),
            date_of_birth: Some(date_of_birth.format("%Y-%m-%d").to_string()),
            member_number: Some(member_number.to_string()),
            interests: None,
        };

        match self.mode {
            FormMode::Create => {
                if !interests.is_empty() {
                    payload.interests = Some(Some(interests.to_string()));
                }
                Ok(Submission::Create(payload))
            }
            FormMode::Edit(id) => {
                payload.id = Some(id.to_string());
                // A blanked input clears the stored value.
                payload.interests = Some((!interests.is_empty()).then(|| interests.to_string()));
                Ok(Submission::Update(payload))
            }
        }
    }
}
