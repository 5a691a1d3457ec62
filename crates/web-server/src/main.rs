// This main function is the entry point when running `cargo run -p web-server`.
// It serves the API against PostgreSQL using the regular settings sources.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = configuration::load_settings()?;
    let _guard = configuration::init_tracing(&settings.logging)?;
    web_server::run_server(settings, false).await
}
