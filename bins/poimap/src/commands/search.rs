//! Search command - fuzzy-filter a dataset

use super::{load_dataset, Context};
use crate::output;
use anyhow::Result;
use owo_colors::OwoColorize;
use poimap_core::record::Record;
use poimap_search::{filter_records, FuzzyConfig, FuzzyMatcher};
use poimap_telemetry::Timer;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
struct JsonSearchOutput<'a> {
    query: &'a str,
    total: usize,
    matched: usize,
    records: Vec<&'a Record>,
}

/// Run search command
pub fn run(
    ctx: &Context,
    dataset_path: &Path,
    base_url: Option<&str>,
    query: &str,
    case_sensitive: bool,
    exact: bool,
) -> Result<()> {
    let dataset = load_dataset(ctx, dataset_path, base_url)?;

    let config = if exact {
        FuzzyConfig::exact_only()
    } else {
        ctx.config.schema.search.clone()
    };
    let matcher = FuzzyMatcher::new(config).normalize_case(!case_sensitive);

    let timer = Timer::start("search");
    let records = filter_records(&dataset.records, query, &matcher);
    let elapsed = timer.stop();

    if ctx.is_json() {
        return output::print_json(&JsonSearchOutput {
            query,
            total: dataset.len(),
            matched: records.len(),
            records,
        });
    }

    output::header(&format!(
        "{} of {} for '{}'",
        output::format_count(records.len(), "match", "matches"),
        dataset.len(),
        query
    ));
    output::print_records(&records);

    if ctx.verbose {
        eprintln!("{} search took {:.2}ms", "perf".dimmed(), elapsed.as_secs_f64() * 1000.0);
    }
    Ok(())
}
