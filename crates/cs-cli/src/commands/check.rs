use std::path::Path;

use colored::Colorize;

pub fn run(dir: &Path) -> Result<(), String> {
    let content = super::load_content(dir)?;
    let findings = content.validate();

    for finding in &findings {
        let line = finding.to_string();
        if finding.is_error() {
            eprintln!("  {}", line.red());
        } else {
            eprintln!("  {}", line.yellow());
        }
    }

    let errors = findings.iter().filter(|f| f.is_error()).count();
    let warnings = findings.len() - errors;
    if errors > 0 {
        return Err(format!(
            "{} error{}, {} warning{}",
            errors,
            if errors == 1 { "" } else { "s" },
            warnings,
            if warnings == 1 { "" } else { "s" },
        ));
    }

    println!(
        "  All checks passed: {} NPCs, {} dialogue trees, {} puzzles, {} locations",
        content.npcs().count(),
        content.dialogues().count(),
        content.puzzles().count(),
        content.locations().count(),
    );
    if warnings > 0 {
        println!(
            "  {} warning{}",
            warnings,
            if warnings == 1 { "" } else { "s" }
        );
    }
    Ok(())
}
