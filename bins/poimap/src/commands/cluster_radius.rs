//! Cluster-radius command - marker cluster radius for a record count

use super::Context;
use crate::output;
use anyhow::Result;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct JsonClusterOutput {
    count: usize,
    radius: u32,
}

/// Run cluster-radius command
pub fn run(ctx: &Context, count: usize) -> Result<()> {
    let radius = ctx.config.schema.cluster.radius_for(count);

    if ctx.is_json() {
        return output::print_json(&JsonClusterOutput { count, radius });
    }

    println!("{radius}");
    Ok(())
}
