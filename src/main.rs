use anyhow::Context;
use api_client::HttpCustomerClient;
use clap::{Args, Parser, Subcommand};
use configuration::{ClientSettings, LogFormat};
use memberdesk::commands::{self, FieldChanges};
use memberdesk::ui::{FormField, Pagination};
use std::io;

/// The main entry point for the memberdesk application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command-line arguments
    let cli = Cli::parse();

    let mut settings = configuration::load_settings().context("Failed to load settings")?;
    if let Some(format) = cli.log_format {
        settings.logging.format = format;
    }
    if let Some(api_url) = cli.api_url {
        settings.client.api_base_url = api_url;
    }
    let _log_guard = configuration::init_tracing(&settings.logging)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Serve { in_memory } => web_server::run_server(settings, in_memory).await,
        command => run_ui(command, &settings.client)
            .await
            .context("Customer command failed"),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Customer records: an HTTP API and a terminal client for it.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the customer API (overrides API_BASE_URL).
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Log line format.
    #[arg(long, value_enum, global = true)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the customer API server.
    Serve {
        /// Keep records in memory instead of PostgreSQL.
        #[arg(long)]
        in_memory: bool,
    },
    /// Show the customer table.
    List(PageArgs),
    /// Show one customer's profile.
    Show {
        id: String,
    },
    /// Add a customer.
    Add {
        #[command(flatten)]
        fields: FieldArgs,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Edit a customer; only the given fields change.
    Edit {
        id: String,
        #[command(flatten)]
        fields: FieldArgs,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Delete a customer after confirmation.
    Delete {
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
        #[command(flatten)]
        page: PageArgs,
    },
}

#[derive(Args)]
struct PageArgs {
    /// Page to show, starting at 1.
    #[arg(long, default_value_t = 1)]
    page: usize,

    /// Rows per page: 5, 10 or 25. Defaults to client.page_size.
    #[arg(long)]
    page_size: Option<usize>,
}

#[derive(Args)]
struct FieldArgs {
    #[arg(long)]
    name: Option<String>,

    /// Date of birth, YYYY-MM-DD.
    #[arg(long = "dob")]
    date_of_birth: Option<String>,

    #[arg(long)]
    member_number: Option<String>,

    /// Free text; pass an empty string to clear.
    #[arg(long)]
    interests: Option<String>,
}

impl PageArgs {
    fn pagination(&self, client: &ClientSettings) -> anyhow::Result<Pagination> {
        let page_size = self.page_size.unwrap_or(client.page_size);
        Ok(Pagination::new(page_size, self.page)?)
    }
}

impl FieldArgs {
    fn changes(self) -> FieldChanges {
        [
            (FormField::Name, self.name),
            (FormField::DateOfBirth, self.date_of_birth),
            (FormField::MemberNumber, self.member_number),
            (FormField::Interests, self.interests),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|value| (field, value)))
        .collect()
    }
}

// ==============================================================================
// Terminal UI
// ==============================================================================

async fn run_ui(command: Commands, client: &ClientSettings) -> anyhow::Result<()> {
    let api = HttpCustomerClient::new(&client.api_base_url)?;
    tracing::debug!(api = api.base_url(), "Using customer API.");
    let mut out = io::stdout().lock();

    match command {
        Commands::List(page) => {
            commands::show_list(&api, page.pagination(client)?, &mut out).await?;
        }
        Commands::Show { id } => {
            commands::show_detail(&api, &id, commands::today(), &mut out).await?;
        }
        Commands::Add { fields, page } => {
            commands::add_customer(&api, fields.changes(), page.pagination(client)?, &mut out)
                .await?;
        }
        Commands::Edit { id, fields, page } => {
            commands::edit_customer(&api, &id, fields.changes(), page.pagination(client)?, &mut out)
                .await?;
        }
        Commands::Delete { id, yes, page } => {
            let mut input = io::stdin().lock();
            commands::delete_customer(
                &api,
                &id,
                yes,
                &mut input,
                page.pagination(client)?,
                &mut out,
            )
            .await?;
        }
        Commands::Serve { .. } => anyhow::bail!("`serve` is not a client command"),
    }
    Ok(())
}
