use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use cs_core::UNKNOWN_NPC_NAME;

pub fn run(dir: &Path) -> Result<(), String> {
    let content = super::load_content(dir)?;

    let mut rows: Vec<[String; 4]> = content
        .npcs()
        .map(|npc| {
            let nodes = content.tree(npc.id.as_str()).map_or(0, |tree| tree.len());
            [
                npc.id.to_string(),
                npc.display_name().to_string(),
                npc.alignment.clone().unwrap_or_else(|| "—".to_string()),
                nodes.to_string(),
            ]
        })
        .collect();
    // Trees without details still talk, under the fallback name.
    rows.extend(
        content
            .dialogues()
            .filter(|(npc_id, _)| content.npc(npc_id.as_str()).is_none())
            .map(|(npc_id, tree)| {
                [
                    npc_id.to_string(),
                    UNKNOWN_NPC_NAME.to_string(),
                    "—".to_string(),
                    tree.len().to_string(),
                ]
            }),
    );

    if rows.is_empty() {
        println!("  No NPCs found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Name", "Alignment", "Nodes"]);
    for row in &rows {
        table.add_row(row.to_vec());
    }

    println!("{table}");
    println!();
    println!("  {} NPCs", rows.len());
    Ok(())
}
