use crate::dates;
use crate::error::CoreError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Store-assigned identifier of a customer record. Immutable once assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(Uuid);

impl CustomerId {
    /// Mints a fresh identifier for a record about to be inserted.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for CustomerId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for CustomerId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| CoreError::InvalidId(s.to_string()))
    }
}

/// A persisted customer record, as returned by every API operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    #[serde(deserialize_with = "dates::deserialize")]
    pub date_of_birth: NaiveDate,
    pub member_number: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interests: Option<String>,
}

impl Customer {
    pub fn from_new(id: CustomerId, new: NewCustomer) -> Self {
        Self {
            id,
            name: new.name,
            date_of_birth: new.date_of_birth,
            member_number: new.member_number,
            interests: new.interests,
        }
    }

    /// Applies a patch in place. The identifier is never touched.
    pub fn apply(&mut self, patch: CustomerPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(date_of_birth) = patch.date_of_birth {
            self.date_of_birth = date_of_birth;
        }
        if let Some(member_number) = patch.member_number {
            self.member_number = member_number;
        }
        if let Some(interests) = patch.interests {
            self.interests = interests;
        }
    }

    /// Age in whole years on the given day; zero for birth dates in the future.
    pub fn age_on(&self, today: NaiveDate) -> u32 {
        today.years_since(self.date_of_birth).unwrap_or(0)
    }
}

/// A validated customer without an identifier, ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub member_number: i64,
    pub interests: Option<String>,
}

/// A validated set of field replacements.
///
/// `None` leaves a field untouched. For `interests`, `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerPatch {
    pub name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub member_number: Option<i64>,
    pub interests: Option<Option<String>>,
}

impl CustomerPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.date_of_birth.is_none()
            && self.member_number.is_none()
            && self.interests.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ann() -> Customer {
        Customer::from_new(
            CustomerId::generate(),
            NewCustomer {
                name: "Ann Lee".to_string(),
                date_of_birth: NaiveDate::from_ymd_opt(1990, 5, 1).unwrap(),
                member_number: 1001,
                interests: Some("gym".to_string()),
            },
        )
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let customer = ann();
        let json = serde_json::to_value(&customer).unwrap();
        assert_eq!(json["id"], customer.id.to_string());
        assert_eq!(json["name"], "Ann Lee");
        assert_eq!(json["dateOfBirth"], "1990-05-01");
        assert_eq!(json["memberNumber"], 1001);
        assert_eq!(json["interests"], "gym");
    }

    #[test]
    fn omits_absent_interests() {
        let mut customer = ann();
        customer.interests = None;
        let json = serde_json::to_value(&customer).unwrap();
        assert!(json.get("interests").is_none());
    }

    #[test]
    fn patch_keeps_omitted_fields_and_id() {
        let mut customer = ann();
        let id = customer.id;
        customer.apply(CustomerPatch {
            member_number: Some(2002),
            interests: Some(None),
            ..CustomerPatch::default()
        });
        assert_eq!(customer.id, id);
        assert_eq!(customer.name, "Ann Lee");
        assert_eq!(customer.member_number, 2002);
        assert_eq!(customer.interests, None);
    }

    #[test]
    fn age_counts_completed_years() {
        let customer = ann();
        let day_before = NaiveDate::from_ymd_opt(2020, 4, 30).unwrap();
        let birthday = NaiveDate::from_ymd_opt(2020, 5, 1).unwrap();
        assert_eq!(customer.age_on(day_before), 29);
        assert_eq!(customer.age_on(birthday), 30);
        assert_eq!(customer.age_on(NaiveDate::from_ymd_opt(1980, 1, 1).unwrap()), 0);
    }

    #[test]
    fn ids_parse_from_their_display_form() {
        let id = CustomerId::generate();
        assert_eq!(id.to_string().parse::<CustomerId>().unwrap(), id);
        assert!("not-an-id".parse::<CustomerId>().is_err());
    }
}
