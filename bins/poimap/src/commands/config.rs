//! Config command - print the effective configuration

use super::Context;
use crate::output;
use anyhow::Result;
use owo_colors::OwoColorize;

/// Run config command
pub fn run(ctx: &Context) -> Result<()> {
    if ctx.is_json() {
        return output::print_json(&ctx.config.schema);
    }

    if ctx.verbose {
        match &ctx.config.path {
            Some(path) => eprintln!("{} {}", "# loaded from".dimmed(), path.display()),
            None => eprintln!("{}", "# built-in defaults".dimmed()),
        }
    }

    print!("{}", ctx.config.to_toml_string()?);
    Ok(())
}
