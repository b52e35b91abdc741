use std::path::Path;

use colored::Colorize;
use cs_core::{Effect, Target, UNKNOWN_NPC_NAME};

pub fn run(dir: &Path, npc_id: &str) -> Result<(), String> {
    let content = super::load_content(dir)?;
    let tree = content
        .tree(npc_id)
        .ok_or_else(|| format!("no dialogue tree for \"{npc_id}\""))?;
    let name = content
        .npc(npc_id)
        .map_or(UNKNOWN_NPC_NAME, |npc| npc.display_name());

    println!("  {} [{}]", name.bold(), npc_id.dimmed());
    for (i, node) in tree.nodes().enumerate() {
        println!();
        let marker = if i == 0 { " (start)" } else { "" };
        println!("  {}{}", node.id.to_string().cyan(), marker.dimmed());
        for line in node.npc_text.lines() {
            println!("    \"{}\"", line.trim());
        }
        for (n, choice) in node.player_choices.iter().enumerate() {
            let target = match choice.target() {
                Target::End => "END".to_string(),
                Target::Node(next) => next.to_string(),
            };
            println!("    {}. {} -> {}", n + 1, choice.text, target);
            if let Some(condition) = &choice.condition {
                println!("         {} {condition}", "if".dimmed());
            }
            for effect in &choice.effects {
                println!("         {} {}", "do".dimmed(), describe_effect(effect));
            }
        }
    }
    Ok(())
}

fn describe_effect(effect: &Effect) -> String {
    match effect {
        Effect::UpdatePlayerStat {
            stat,
            change,
            value,
        } => match (value, change) {
            (Some(value), _) => format!("set stat {stat} = {value}"),
            (None, Some(change)) => format!("change stat {stat} by {change}"),
            (None, None) => format!("touch stat {stat}"),
        },
        Effect::SetGameState { variable, value } => format!("set flag {variable} = {value}"),
        Effect::GameEvent { event_name, .. } => format!("event {event_name}"),
        Effect::TriggerPuzzle { puzzle_id } => match puzzle_id {
            Some(id) => format!("puzzle {id}"),
            None => "puzzle (missing id)".to_string(),
        },
        Effect::AddItem { item } => format!("give {}", item.id),
        Effect::RemoveItem { item_id } => format!("take {item_id}"),
        Effect::UpdateResources { resources } => resources
            .iter()
            .map(|(name, delta)| format!("{name} {delta:+}"))
            .collect::<Vec<_>>()
            .join(", "),
        Effect::Unknown => "unknown effect".to_string(),
    }
}
