use clap::Parser;

#[derive(Debug, Parser, Clone, Default)]
pub struct CliArgs {
    /// Print machine-readable JSON instead of human-readable text
    #[clap(short, long, global = true)]
    pub json: bool,
}

impl CliArgs {
    pub fn json_output(&self) -> bool {
        self.json
    }
}
