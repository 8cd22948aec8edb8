//! Check-config command
//!
//! Usage: deferlog check-config --config <FILE> [--file <FILE>] [--level <LEVEL>]

use super::ConfigArgs;
use clap::Args;

#[derive(Debug, Args)]
pub struct CheckConfigArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Execute check-config command
pub fn execute(args: CheckConfigArgs) -> Result<(), Box<dyn std::error::Error>> {
    let resolved = args.config.to_config()?.resolve()?;
    print!("{}", resolved.to_toml_string()?);
    Ok(())
}
