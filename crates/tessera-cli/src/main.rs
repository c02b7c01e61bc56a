use std::process::exit;

use clap::Parser;
use garde::Validate;
use tessera_fs::toml::FromToml;
use tessera_telemetry::Telemetry;
use tracing::{error, info};

use crate::{args::Cli, config::Config};

mod args;
mod cmd;
mod config;
mod encoding;
mod error;
mod key;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let cfg = {
        let _g = Telemetry::bootstrap();

        let (cfg, path) = Config::from_toml_path_or_default(cli.config.clone())
            .await
            .unwrap_or_else(|e| {
                error!("failed to load config: {e}");
                exit(2)
            });

        if let Err(report) = cfg.validate() {
            error!(%report, "invalid config");
            exit(2)
        }

        info!(path = ?path, "loaded config");
        cfg
    };

    Telemetry::new(&cfg.telemetry).init()?;

    let ok = cmd::run(cli.command, &cfg, &mut std::io::stdout().lock()).await?;
    if !ok {
        exit(1)
    }

    Ok(())
}
