//! Conflicts command - list disagreements between datasets.

use colored::Colorize;
use unisink::{ConflictField, Outcome, Unifier};

use crate::cli::InputArgs;

pub fn run(
    inputs: InputArgs,
    json_output: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    inputs.check()?;

    let unifier = Unifier::with_config(inputs.to_config()?);
    if verbose && !json_output {
        super::print_config(unifier.config());
    }
    let result = unifier.unify(&inputs.to_inputs())?;

    if json_output {
        let conflicts: Vec<_> = result
            .conflicts
            .iter()
            .map(|c| {
                serde_json::json!({
                    "method": c.key.to_string(),
                    "field": c.field,
                    "current": c.current,
                    "challenger": c.challenger,
                    "outcome": c.outcome,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&conflicts)?);
        return Ok(());
    }

    if result.conflicts.is_empty() {
        println!("{}", "No conflicting annotations.".green());
        return Ok(());
    }

    let kind_count = result
        .conflicts
        .iter()
        .filter(|c| c.field == ConflictField::SourceOrSink)
        .count();
    println!(
        "Found {} conflicts ({} source/sink, {} category)",
        result.conflicts.len().to_string().white().bold(),
        kind_count.to_string().red(),
        (result.conflicts.len() - kind_count).to_string().yellow()
    );
    println!();

    for conflict in &result.conflicts {
        println!("{}", conflict.key.to_string().white().bold());
        println!(
            "  {:<12} {} vs {}",
            conflict.field.label(),
            conflict.current.to_string().cyan(),
            conflict.challenger.to_string().cyan()
        );
        let kept = match conflict.outcome {
            Outcome::Retained => conflict.winner().to_string().normal(),
            Outcome::Overridden => format!("{} (override)", conflict.winner()).magenta(),
        };
        println!("  {:<12} {}", "kept", kept);
    }

    Ok(())
}
