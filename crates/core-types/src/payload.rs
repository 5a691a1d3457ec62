use crate::customer::{CustomerId, CustomerPatch, NewCustomer};
use crate::dates::parse_date;
use crate::error::ValidationError;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// The request body accepted by create and update.
///
/// Every field is optional on the wire, and the fields that need parsing (`id`,
/// `dateOfBirth`, `memberNumber`) are kept as raw text. Presence and format are
/// both checked by [`CustomerPayload::into_new_customer`] and
/// [`CustomerPayload::into_update`], so a bad value is reported against its field
/// instead of failing inside the JSON extractor. Fields outside this allow-list are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPayload {
    #[serde(
        default,
        alias = "_id",
        deserialize_with = "scalar_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(
        default,
        deserialize_with = "scalar_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_of_birth: Option<String>,

    // Number inputs submit strings; JSON clients send numbers.
    #[serde(
        default,
        deserialize_with = "scalar_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub member_number: Option<String>,

    #[serde(
        default,
        with = "::serde_with::rust::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub interests: Option<Option<String>>,
}

impl CustomerPayload {
    /// Checks the required fields of a create request.
    pub fn into_new_customer(self) -> Result<NewCustomer, ValidationError> {
        let name = required_text(self.name, "name")?;
        let date_of_birth =
            date_of_birth(self.date_of_birth)?.ok_or(ValidationError::Missing("dateOfBirth"))?;
        let member_number =
            member_number(self.member_number)?.ok_or(ValidationError::Missing("memberNumber"))?;

        Ok(NewCustomer {
            name,
            date_of_birth,
            member_number,
            interests: self.interests.flatten().and_then(non_blank),
        })
    }

    /// Splits an update request into its target identifier and the patch to apply.
    pub fn into_update(self) -> Result<(CustomerId, CustomerPatch), ValidationError> {
        let id = self
            .id
            .and_then(non_blank)
            .ok_or(ValidationError::Missing("id"))?
            .parse::<CustomerId>()
            .map_err(|_| ValidationError::Invalid("id"))?;
        let name = match self.name {
            Some(name) => Some(required_text(Some(name), "name")?),
            None => None,
        };

        let patch = CustomerPatch {
            name,
            date_of_birth: date_of_birth(self.date_of_birth)?,
            member_number: member_number(self.member_number)?,
            interests: self.interests.map(|value| value.and_then(non_blank)),
        };
        Ok((id, patch))
    }
}

/// Reads a JSON scalar as text; `null` means absent. Numbers keep their JSON
/// spelling so that `1001` and `"1001"` parse alike later on.
fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text),
        Some(other) => Some(other.to_string()),
    })
}

/// A blank date is absent; anything else must be `YYYY-MM-DD` or RFC 3339.
fn date_of_birth(raw: Option<String>) -> Result<Option<NaiveDate>, ValidationError> {
    match raw.and_then(non_blank) {
        Some(raw) => parse_date(&raw)
            .map(Some)
            .map_err(|_| ValidationError::Invalid("dateOfBirth")),
        None => Ok(None),
    }
}

fn member_number(raw: Option<String>) -> Result<Option<i64>, ValidationError> {
    match raw.and_then(non_blank) {
        Some(raw) => raw
            .parse::<i64>()
            .map(Some)
            .map_err(|_| ValidationError::Invalid("memberNumber")),
        None => Ok(None),
    }
}

fn required_text(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    let value = value.ok_or(ValidationError::Missing(field))?;
    non_blank(value).ok_or(ValidationError::Empty(field))
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == value.len() {
        Some(value)
    } else {
        Some(trimmed.to_string())
    }
}
