use api_client::error::ApiError;
use chrono::NaiveDate;
use comfy_table::{Table, presets::UTF8_FULL};
use core_types::Customer;

pub const LOADING_MESSAGE: &str = "Loading customer details...";
pub const INTERESTS_PLACEHOLDER: &str = "Not specified";

/// The customer profile screen once the lookup has settled. While the request is
/// pending, a spinner shows [`LOADING_MESSAGE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailState {
    NotFound,
    Loaded(Customer),
}

impl DetailState {
    /// Any failure, not only a 404, shows the not-found screen.
    pub fn from_result(result: Result<Customer, ApiError>) -> Self {
        match result {
            Ok(customer) => DetailState::Loaded(customer),
            Err(e) => {
                tracing::debug!(error = %e, "Customer lookup failed.");
                DetailState::NotFound
            }
        }
    }

    pub fn render(&self, today: NaiveDate) -> String {
        match self {
            DetailState::NotFound => [
                "Customer Not Found",
                "The customer you're looking for doesn't exist.",
                "<- Back to Customer List: memberdesk list",
            ]
            .join("\n"),
            DetailState::Loaded(customer) => render_profile(customer, today),
        }
    }
}

/// `May 1, 1990`
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

fn render_profile(customer: &Customer, today: NaiveDate) -> String {
    let interests = customer
        .interests
        .as_deref()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or(INTERESTS_PLACEHOLDER);

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.add_row(vec!["Name".to_string(), customer.name.clone()]);
    table.add_row(vec!["Member Number".to_string(), customer.member_number.to_string()]);
    table.add_row(vec![
        "Date of Birth".to_string(),
        format_long_date(customer.date_of_birth),
    ]);
    table.add_row(vec!["Age".to_string(), customer.age_on(today).to_string()]);
    table.add_row(vec!["Interests".to_string(), interests.to_string()]);

    format!(
        "Customer Profile\n{table}\n<- Back to Customer List: memberdesk list"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{CustomerId, NewCustomer};

    fn ann(interests: Option<&str>) -> Customer {
        Customer::from_new(
            CustomerId::generate(),
            NewCustomer {
                name: "Ann Lee".to_string(),
                date_of_birth: NaiveDate::from_ymd_opt(1990, 5, 1).unwrap(),
                member_number: 1001,
                interests: interests.map(str::to_string),
            },
        )
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[test]
    fn formats_dates_long_form() {
        assert_eq!(format_long_date(NaiveDate::from_ymd_opt(1990, 5, 1).unwrap()), "May 1, 1990");
    }

    #[test]
    fn renders_every_field() {
        let rendered = DetailState::Loaded(ann(Some("gym"))).render(today());
        assert!(rendered.contains("Customer Profile"));
        assert!(rendered.contains("Ann Lee"));
        assert!(rendered.contains("1001"));
        assert!(rendered.contains("May 1, 1990"));
        assert!(rendered.contains("36"));
        assert!(rendered.contains("gym"));
    }

    #[test]
    fn shows_placeholder_for_absent_interests() {
        let rendered = DetailState::Loaded(ann(None)).render(today());
        assert!(rendered.contains(INTERESTS_PLACEHOLDER));
    }

    #[test]
    fn every_failure_is_not_found() {
        assert_eq!(DetailState::from_result(Err(ApiError::NotFound)), DetailState::NotFound);
        let rejected = ApiError::Rejected {
            status: 500,
            body: "Internal Server Error".to_string(),
        };
        let state = DetailState::from_result(Err(rejected));
        assert!(state.render(today()).contains("Customer Not Found"));
    }
}
