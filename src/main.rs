use anyhow::Result;
use clap::Parser;
use storefront_cli::{
    cli::{args::Args, commands::CliApp},
    utils::Config,
};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load(args.catalog)?;

    // Logs go to stderr so rendered tables on stdout stay clean.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.log_filter(args.verbose)))
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("🛒 Storefront starting...");
    tracing::info!(
        "Configuration loaded for {} environment ({} locale)",
        config.environment,
        config.locale
    );

    let app = CliApp::new(&config).await?;
    app.run(args.command)?;

    tracing::info!("🛒 Storefront stopped");
    Ok(())
}
