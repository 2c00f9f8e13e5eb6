//! CLI command implementations.

pub mod conflicts;
pub mod unify;

use colored::Colorize;
use unisink::UnifyConfig;

/// Print the active resolution settings (shown with `--verbose`).
pub fn print_config(config: &UnifyConfig) {
    println!("{}", "Settings:".yellow().bold());
    for line in describe_config(config) {
        println!("  {}", line);
    }
    println!();
}

fn describe_config(config: &UnifyConfig) -> Vec<String> {
    let mut lines = Vec::new();

    match &config.normalizer {
        Some(normalizer) if !normalizer.fragments().is_empty() => {
            lines.push(format!("category cleanup: strip {}", normalizer.fragments().join(", ")))
        }
        _ => lines.push("category cleanup: off".to_string()),
    }

    if config.strict_catalog_kind {
        lines.push("catalog kind: strict".to_string());
    }

    if config.overrides.is_empty() {
        lines.push("overrides: none".to_string());
    } else {
        for (key, origin) in config.overrides.iter() {
            lines.push(format!("override: {} -> {}", key, origin));
        }
    }

    lines
}
