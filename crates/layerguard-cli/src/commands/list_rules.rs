//! List rules command implementation.

use layerguard_ts::all_rules;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<22} {:<48} Codes", "Name", "Description");
    println!("{}", "-".repeat(100));

    for rule in all_rules() {
        let codes: Vec<&str> = rule.codes().iter().map(|c| c.as_str()).collect();
        println!(
            "{:<22} {:<48} {}",
            rule.name(),
            rule.description(),
            codes.join(", ")
        );
    }

    println!("\nDisable a rule in layerguard.toml, e.g.:");
    println!("  [rules.type-quality]");
    println!("  enabled = false");
}
