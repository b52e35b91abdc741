use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;
use cs_core::{Item, PuzzleOutcome, UNKNOWN_NPC_NAME, Value};
use cs_dialogue::PlayerState;
use cs_shell::{GameShell, ShellConfig};
use tracing::debug;

pub fn run(
    dir: &Path,
    npc_id: &str,
    stats: &[String],
    flags: &[String],
    items: &[String],
) -> Result<(), String> {
    let config = ShellConfig::default()
        .with_data_dir(dir)
        .with_autosave(false);
    let shell = GameShell::load(config).map_err(|e| e.to_string())?;
    let player = build_player(&shell, stats, flags, items)?;
    let mut shell = shell.with_player(player);

    shell.start_dialogue(npc_id);
    print_message(&mut shell);

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        if let Some(request) = shell.active_puzzle() {
            println!("  {} {}", "Puzzle:".bold(), request.description);
            println!("  {}", "[s]uccess, [f]ailure, s[k]ip, [q]uit".dimmed());
        } else if let Some(node) = shell.current_node() {
            let name = shell
                .session()
                .active_npc_id()
                .and_then(|id| shell.content().npc(id.as_str()))
                .map_or(UNKNOWN_NPC_NAME, |npc| npc.display_name());
            println!("  {}: \"{}\"", name.bold(), node.npc_text);
            for (i, choice) in node.player_choices.iter().enumerate() {
                println!("    {}. {}", i + 1, choice.text);
            }
        } else {
            break;
        }

        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }
        let input = line.trim();

        if input.is_empty() || input.eq_ignore_ascii_case("q") {
            shell.dismiss_dialogue();
            break;
        }

        if let Some(request) = shell.active_puzzle() {
            let puzzle_id = request.puzzle_id.to_string();
            match input.parse::<PuzzleOutcome>() {
                Ok(outcome) => shell.resolve_puzzle(&puzzle_id, outcome),
                Err(e) => println!("  {}", e.to_string().yellow()),
            }
        } else {
            match input.parse::<usize>() {
                Ok(n) if n >= 1 => {
                    if let Err(e) = shell.select_choice(n - 1) {
                        println!("  {}", e.to_string().yellow());
                    }
                }
                _ => println!("  {}", "Pick a choice by number.".yellow()),
            }
        }
        print_message(&mut shell);
        println!();
    }

    println!("  {}", "(conversation over)".dimmed());
    print_resources(shell.player());
    Ok(())
}

fn build_player(
    shell: &GameShell,
    stats: &[String],
    flags: &[String],
    items: &[String],
) -> Result<PlayerState, String> {
    let mut player = shell.player().clone();
    for raw in stats {
        let (name, value) = super::split_pair(raw)?;
        player = player.with_stat(name, Value::parse_literal(value));
    }
    for raw in flags {
        let (name, value) = super::split_pair(raw)?;
        player = player.with_flag(name, Value::parse_literal(value));
    }
    for id in items {
        let item = shell
            .content()
            .item(id)
            .cloned()
            .unwrap_or_else(|| Item::new(id.as_str(), id.as_str()));
        debug!(item = %item.id, "starting item");
        player = player.with_item(item);
    }
    Ok(player)
}

fn print_message(shell: &mut GameShell) {
    if let Some(message) = shell.take_message() {
        println!("  {}", message.italic());
    }
}

fn print_resources(player: &PlayerState) {
    let summary: Vec<String> = player
        .resources
        .iter()
        .map(|(name, amount)| format!("{name} {amount}"))
        .collect();
    println!("  {}", summary.join(", ").dimmed());
}
