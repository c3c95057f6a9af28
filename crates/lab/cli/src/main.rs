mod cli;

use crate::cli::{
    Cli,
    Commands,
};
use clap::Parser;
use color_eyre::{
    Result,
    eyre::Report,
};
use lab_common::error_json;
use lab_core::vcs::GitCli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install()?;

    if let Err(err) = lab_common::tracing::init_tracing() {
        eprintln!("{err}");
    }

    let cli = Cli::parse();

    let result = async {
        match &cli.command {
            Commands::Archive(archive) => {
                archive.run(&cli.args, &GitCli::default())?;
            }
            Commands::ProbeGas(probe) => {
                if let Err(err) = probe.run(&cli.args).await {
                    // Missing node or artifact: one line and exit 1, nothing was sent.
                    if err.is_precondition() && !cli.args.json_output() {
                        eprintln!("Error: {err}");
                        std::process::exit(1);
                    }
                    return Err(Report::new(err));
                }
            }
        }
        Ok::<_, Report>(())
    }
    .await;

    if let Err(err) = result {
        if cli.args.json_output() {
            eprintln!("{}", error_json(err.to_string()));
            std::process::exit(1);
        }
        return Err(err);
    }

    Ok(())
}
