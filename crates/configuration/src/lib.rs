use crate::error::ConfigError;
use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File, FileFormat};
use std::env;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;
pub mod telemetry;

// Re-export the core types to provide a clean public API.
pub use settings::{
    ClientSettings, DatabaseSettings, DEFAULT_PAGE_SIZE, LogFormat, LoggingSettings,
    PAGE_SIZE_OPTIONS, ServerSettings, Settings,
};
pub use telemetry::init_tracing;

const ENV_PREFIX: &str = "MEMBERDESK";

/// Loads the application settings.
///
/// Sources, lowest precedence first: built-in defaults, an optional `config.toml` in
/// the working directory, `MEMBERDESK__<SECTION>__<KEY>` environment variables, and
/// finally `DATABASE_URL` and `API_BASE_URL`. A `.env` file is read before any of
/// the environment is consulted.
pub fn load_settings() -> Result<Settings, ConfigError> {
    dotenvy::dotenv().ok();

    let builder = defaults()?
        .add_source(File::with_name("config").required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .set_override_option("database.url", env::var("DATABASE_URL").ok())?
        .set_override_option("client.api_base_url", env::var("API_BASE_URL").ok())?;

    finish(builder)
}

/// Builds settings from the defaults plus an inline TOML document, ignoring the
/// environment entirely.
pub fn settings_from_toml(contents: &str) -> Result<Settings, ConfigError> {
    finish(defaults()?.add_source(File::from_str(contents, FileFormat::Toml)))
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = config::Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 3000)?
        .set_default("server.body_limit_bytes", 1024 * 1024)?
        .set_default("database.max_connections", 10)?
        .set_default("database.acquire_timeout_secs", 5)?
        .set_default("client.api_base_url", "http://127.0.0.1:3000")?
        .set_default("client.page_size", DEFAULT_PAGE_SIZE as i64)?
        .set_default("logging.filter", "info,tower_http=debug,sqlx=warn")?
        .set_default("logging.format", "full")?;
    Ok(builder)
}

fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Settings, ConfigError> {
    let settings = builder.build()?.try_deserialize::<Settings>()?;
    settings.validate()?;
    Ok(settings)
}
