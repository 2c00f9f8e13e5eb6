//! Unify command - merge the datasets and write the canonical CSV.

use std::path::PathBuf;

use colored::Colorize;
use unisink::{write_annotations, AnnotationStats, Origin, SourceOrSink, Unifier, UnifyResult};

use crate::cli::InputArgs;

pub fn run(
    inputs: InputArgs,
    output: PathBuf,
    json_output: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    inputs.check()?;

    let unifier = Unifier::with_config(inputs.to_config()?);
    if verbose && !json_output {
        super::print_config(unifier.config());
    }
    let result = unifier.unify(&inputs.to_inputs())?;

    write_annotations(&output, &result.annotations)?;
    tracing::debug!(path = %output.display(), rows = result.annotations.len(), "wrote annotations");

    if json_output {
        let report = serde_json::json!({
            "output": output,
            "summary": result.summary,
            "sources": result.sources,
            "stats": result.stats,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_sources(&result, verbose);
    print_stats(&result.stats);

    println!();
    if result.conflicts.is_empty() {
        println!("{}", "No conflicting annotations.".green());
    } else {
        println!(
            "{} conflicting annotations. Run {} to list them.",
            result.conflicts.len().to_string().yellow().bold(),
            "unisink conflicts".cyan().bold()
        );
    }

    println!(
        "{} {} annotations to {}",
        "Saved".green().bold(),
        result.annotations.len().to_string().white().bold(),
        output.display().to_string().white()
    );

    Ok(())
}

fn print_sources(result: &UnifyResult, verbose: bool) {
    println!("{}", "Inputs:".yellow().bold());
    for source in &result.sources {
        println!(
            "  {:<40} {:>8} {:>8} records",
            source.file,
            source.origin.as_str(),
            source.record_count
        );
        if verbose {
            println!(
                "    {} entries, {} skipped, {}",
                source.entry_count,
                source.skipped(),
                source.hash
            );
        }
    }
    println!(
        "Collected {} records, {} unique methods",
        result.summary.collected.to_string().white().bold(),
        result.summary.unique.to_string().white().bold()
    );
}

fn print_stats(stats: &AnnotationStats) {
    println!();
    println!("{}", "Annotation counts:".yellow().bold());
    println!(
        "  Sinks: {:<10} Sources: {:<10} None: {:<10} Unannotated: {}",
        stats.count(SourceOrSink::Sink).to_string().red(),
        stats.count(SourceOrSink::Source).to_string().green(),
        stats.count(SourceOrSink::Neither),
        stats.count(SourceOrSink::Unannotated)
    );
    println!(
        "  From DroidSafe: {:<10} From SuSi: {:<10} From permission map: {}",
        stats.origin_count(Origin::FrameworkScan),
        stats.origin_count(Origin::Catalog),
        stats.origin_count(Origin::PermissionMap)
    );

    println!();
    println!("{}", "By category:".yellow().bold());
    for (category, count) in &stats.categories {
        println!("  {:<30}{:>10}", category, count);
    }

    for (label, kind) in [("sources", SourceOrSink::Source), ("sinks", SourceOrSink::Sink)] {
        println!();
        println!("{}", format!("Categories grouped by {}:", label).yellow().bold());
        for (category, count) in stats.categories_for(kind) {
            println!("  {:<30}{:>10}", category, count);
        }
    }

    // The permission map has no categories.
    for origin in [Origin::FrameworkScan, Origin::Catalog] {
        println!();
        println!(
            "{}",
            format!("Category counts from {}:", origin.label()).yellow().bold()
        );
        for (category, count) in stats.categories_from(origin) {
            println!("  {:<30}{:>10}", category, count);
        }
    }
}
