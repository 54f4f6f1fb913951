//! Distance command - Levenshtein distance between two strings

use super::Context;
use crate::output;
use anyhow::Result;
use owo_colors::OwoColorize;
use poimap_search::{levenshtein_distance, FuzzyMatcher};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct JsonDistanceOutput<'a> {
    a: &'a str,
    b: &'a str,
    distance: usize,
    fuzzy_match: bool,
}

/// Run distance command
pub fn run(ctx: &Context, a: &str, b: &str) -> Result<()> {
    let distance = levenshtein_distance(a, b);
    let fuzzy_match = FuzzyMatcher::new(ctx.config.schema.search.clone()).is_match(a, b);

    if ctx.is_json() {
        return output::print_json(&JsonDistanceOutput {
            a,
            b,
            distance,
            fuzzy_match,
        });
    }

    println!("{}", distance.bold());
    if ctx.verbose {
        let verdict = if fuzzy_match {
            "matches".green().to_string()
        } else {
            "does not match".red().to_string()
        };
        println!("'{}' {} query '{}'", a, verdict, b);
    }
    Ok(())
}
