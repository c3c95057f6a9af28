use clap::Parser;
use lab_common::args::CliArgs;
use lab_core::{
    calldata_gas::ProbeGasArgs,
    report_archive::ArchiveArgs,
};

#[derive(Parser)]
#[command(
    name = "lab",
    version,
    about = "Report archiving and calldata gas probing for the lab project"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
    #[command(flatten)]
    pub args: CliArgs,
}

#[derive(clap::Subcommand)]
pub enum Commands {
    #[command(name = "archive")]
    Archive(ArchiveArgs),
    #[command(name = "probe-gas")]
    ProbeGas(ProbeGasArgs),
}
