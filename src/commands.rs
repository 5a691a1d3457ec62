//! The user-facing flows: each one talks to the API, drives the views in
//! [`crate::ui`], and writes the result to `out`.

use crate::error::UiError;
use crate::ui::detail::LOADING_MESSAGE;
use crate::ui::{CustomerForm, CustomerListView, DetailState, FormField, Pagination, Submission};
use api_client::CustomerApi;
use chrono::{Local, NaiveDate};
use core_types::{CoreError, Customer, CustomerId};
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::io::{BufRead, Write};
use std::time::Duration;

/// Field values given on the command line, in the order they should be applied.
pub type FieldChanges = Vec<(FormField, String)>;

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Runs `work` behind a spinner on stderr. The spinner is hidden when stderr is not
/// a terminal.
async fn with_spinner<F: Future>(message: &str, work: F) -> Result<F::Output, UiError> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));

    let output = work.await;
    spinner.finish_and_clear();
    Ok(output)
}

fn parse_id(raw: &str) -> Result<CustomerId, UiError> {
    raw.parse().map_err(|e: CoreError| UiError::InvalidField {
        field: "id",
        reason: e.to_string(),
    })
}

fn confirm(prompt: &str, input: &mut impl BufRead, out: &mut impl Write) -> Result<bool, UiError> {
    write!(out, "{prompt}? [y/N] ")?;
    out.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

/// Fetches every customer and prints the requested page. Returns the total count.
pub async fn show_list(
    api: &dyn CustomerApi,
    pagination: Pagination,
    out: &mut impl Write,
) -> Result<usize, UiError> {
    let customers = with_spinner("Loading customers...", api.list_customers()).await??;
    let view = CustomerListView::new(&customers, pagination);
    writeln!(out, "{}", view.render())?;
    Ok(view.total())
}

/// Prints a customer profile. Malformed identifiers and failed lookups both end on
/// the not-found screen rather than an error.
pub async fn show_detail(
    api: &dyn CustomerApi,
    raw_id: &str,
    today: NaiveDate,
    out: &mut impl Write,
) -> Result<DetailState, UiError> {
    let state = match raw_id.parse::<CustomerId>() {
        Ok(id) => DetailState::from_result(with_spinner(LOADING_MESSAGE, api.get_customer(id)).await?),
        Err(e) => {
            tracing::debug!(error = %e, "Not a customer identifier.");
            DetailState::NotFound
        }
    };
    writeln!(out, "{}", state.render(today))?;
    Ok(state)
}

/// Sends the form to the API, resets it as the mode requires, and refreshes the list.
pub async fn submit_form(
    api: &dyn CustomerApi,
    form: &mut CustomerForm,
    pagination: Pagination,
    out: &mut impl Write,
) -> Result<Customer, UiError> {
    let submission = form.submission()?;
    writeln!(out, "{}", form.title())?;
    let (verb, customer) = match submission {
        Submission::Create(payload) => ("Added", api.create_customer(&payload).await?),
        Submission::Update(payload) => ("Updated", api.update_customer(&payload).await?),
    };
    form.submitted();

    writeln!(out, "{verb} customer {} ({})", customer.name, customer.id)?;
    show_list(api, pagination, out).await?;
    Ok(customer)
}

pub async fn add_customer(
    api: &dyn CustomerApi,
    changes: FieldChanges,
    pagination: Pagination,
    out: &mut impl Write,
) -> Result<Customer, UiError> {
    let mut form = CustomerForm::new();
    for (field, value) in changes {
        form.set(field, value);
    }
    submit_form(api, &mut form, pagination, out).await
}

/// Loads the record into the form, applies `changes`, and submits. With nothing
/// changed the edit is cancelled and no update is sent.
pub async fn edit_customer(
    api: &dyn CustomerApi,
    raw_id: &str,
    changes: FieldChanges,
    pagination: Pagination,
    out: &mut impl Write,
) -> Result<Option<Customer>, UiError> {
    let id = parse_id(raw_id)?;
    let current = with_spinner(LOADING_MESSAGE, api.get_customer(id)).await??;

    let mut form = CustomerForm::new();
    form.start_edit(&current);
    let loaded = form.values().clone();
    for (field, value) in changes {
        form.set(field, value);
    }

    if form.values() == &loaded {
        form.cancel_edit();
        writeln!(out, "No changes; edit cancelled.")?;
        return Ok(None);
    }
    submit_form(api, &mut form, pagination, out).await.map(Some)
}

/// Asks for confirmation unless `assume_yes`, deletes, and refreshes the list.
pub async fn delete_customer(
    api: &dyn CustomerApi,
    raw_id: &str,
    assume_yes: bool,
    input: &mut impl BufRead,
    pagination: Pagination,
    out: &mut impl Write,
) -> Result<Option<Customer>, UiError> {
    let id = parse_id(raw_id)?;
    let current = with_spinner(LOADING_MESSAGE, api.get_customer(id)).await??;

    let prompt = format!("Are you sure to delete [{}]", current.name);
    if !assume_yes && !confirm(&prompt, input, out)? {
        writeln!(out, "Delete cancelled.")?;
        return Ok(None);
    }

    let deleted = api.delete_customer(id).await?;
    writeln!(out, "Deleted customer {} ({})", deleted.name, deleted.id)?;
    show_list(api, pagination, out).await?;
    Ok(Some(deleted))
}
