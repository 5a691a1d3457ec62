use crate::error::UiError;
use comfy_table::{Table, presets::UTF8_FULL};
use configuration::{DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS};
use core_types::Customer;
use std::ops::Range;

/// One table row. `id` is the row alias the view/edit/delete actions address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerRow {
    pub id: String,
    pub name: String,
    pub date_of_birth: String,
    pub member_number: i64,
    pub interests: String,
}

impl From<&Customer> for CustomerRow {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id.to_string(),
            name: customer.name.clone(),
            date_of_birth: customer.date_of_birth.format("%m/%d/%Y").to_string(),
            member_number: customer.member_number,
            interests: customer.interests.clone().unwrap_or_default(),
        }
    }
}

/// Client-side paging over the full customer list. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page_size: usize,
    page: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page: 1,
        }
    }
}

impl Pagination {
    pub fn new(page_size: usize, page: usize) -> Result<Self, UiError> {
        if !PAGE_SIZE_OPTIONS.contains(&page_size) {
            return Err(UiError::InvalidPageSize {
                got: page_size,
                options: &PAGE_SIZE_OPTIONS,
            });
        }
        Ok(Self {
            page_size,
            page: page.max(1),
        })
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Always at least one, so an empty table still has a page to show.
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size).max(1)
    }

    /// The requested page, clamped to the last page.
    pub fn current_page(&self, total: usize) -> usize {
        self.page.min(self.page_count(total))
    }

    /// Indices of the rows shown on the current page.
    pub fn range(&self, total: usize) -> Range<usize> {
        let start = (self.current_page(total) - 1) * self.page_size;
        start.min(total)..(start + self.page_size).min(total)
    }
}

/// The customer table together with its paging state.
#[derive(Debug, Clone)]
pub struct CustomerListView {
    rows: Vec<CustomerRow>,
    pagination: Pagination,
}

impl CustomerListView {
    pub fn new(customers: &[Customer], pagination: Pagination) -> Self {
        Self {
            rows: customers.iter().map(CustomerRow::from).collect(),
            pagination,
        }
    }

    pub fn total(&self) -> usize {
        self.rows.len()
    }

    pub fn visible_rows(&self) -> &[CustomerRow] {
        &self.rows[self.pagination.range(self.total())]
    }

    pub fn render(&self) -> String {
        let total = self.total();
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_header(vec!["ID", "Name", "Date of Birth", "Member Number", "Interests"]);
        for row in self.visible_rows() {
            table.add_row(vec![
                row.id.clone(),
                row.name.clone(),
                row.date_of_birth.clone(),
                row.member_number.to_string(),
                row.interests.clone(),
            ]);
        }

        let range = self.pagination.range(total);
        let shown = if range.is_empty() {
            "No rows".to_string()
        } else {
            format!("Rows {}-{} of {}", range.start + 1, range.end, total)
        };

        format!(
            "Customer List ({total})    Total Members: {total}\n{table}\n{shown} | Page {page}/{pages} | Page size {size} (options: {options:?})\nActions: show <id> | edit <id> | delete <id>",
            page = self.pagination.current_page(total),
            pages = self.pagination.page_count(total),
            size = self.pagination.page_size(),
            options = PAGE_SIZE_OPTIONS,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::{CustomerId, NewCustomer};

    fn customers(n: usize) -> Vec<Customer> {
        (0..n)
            .map(|i| {
                Customer::from_new(
                    CustomerId::generate(),
                    NewCustomer {
                        name: format!("Customer {i}"),
                        date_of_birth: NaiveDate::from_ymd_opt(1990, 5, 1).unwrap(),
                        member_number: 1000 + i as i64,
                        interests: None,
                    },
                )
            })
            .collect()
    }

    #[test]
    fn default_page_size_is_ten() {
        assert_eq!(Pagination::default().page_size(), 10);
    }

    #[test]
    fn rejects_page_sizes_outside_the_options() {
        assert!(Pagination::new(7, 1).is_err());
        for size in PAGE_SIZE_OPTIONS {
            assert!(Pagination::new(size, 1).is_ok());
        }
    }

    #[test]
    fn pages_cover_every_row_once() {
        let pagination = Pagination::new(5, 1).unwrap();
        assert_eq!(pagination.page_count(12), 3);
        assert_eq!(pagination.range(12), 0..5);
        assert_eq!(Pagination::new(5, 3).unwrap().range(12), 10..12);
        // Past the end clamps to the last page.
        assert_eq!(Pagination::new(5, 9).unwrap().range(12), 10..12);
        assert_eq!(pagination.range(0), 0..0);
        assert_eq!(pagination.page_count(0), 1);
    }

    #[test]
    fn rows_alias_the_store_identifier() {
        let all = customers(1);
        let row = CustomerRow::from(&all[0]);
        assert_eq!(row.id, all[0].id.to_string());
        assert_eq!(row.date_of_birth, "05/01/1990");
        assert_eq!(row.interests, "");
    }

    #[test]
    fn renders_only_the_current_page() {
        let all = customers(12);
        let view = CustomerListView::new(&all, Pagination::new(10, 2).unwrap());
        assert_eq!(view.visible_rows().len(), 2);

        let rendered = view.render();
        assert!(rendered.contains("Customer List (12)"));
        assert!(rendered.contains("Total Members: 12"));
        assert!(rendered.contains("Customer 11"));
        assert!(!rendered.contains("Customer 3 "));
        assert!(rendered.contains("Rows 11-12 of 12 | Page 2/2"));
    }
}
