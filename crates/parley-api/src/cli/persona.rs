//! `parley personas` - list the configured persona set.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use parley_core::persona::registry::PersonaRegistry;

/// Print persona profiles as a table, or as JSON with `--json`.
pub fn list_personas(registry: &PersonaRegistry, json: bool) -> Result<()> {
    let profiles = registry.profiles();

    if json {
        println!("{}", serde_json::to_string_pretty(&profiles)?);
        return Ok(());
    }

    let default_id = &registry.default_persona().id;

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Id").fg(Color::White),
        Cell::new("Name").fg(Color::White),
        Cell::new("Tagline").fg(Color::White),
        Cell::new("Description").fg(Color::White),
    ]);

    for profile in &profiles {
        let id_cell = if &profile.id == default_id {
            Cell::new(format!("{} (default)", profile.id)).fg(Color::Green)
        } else {
            Cell::new(&profile.id)
        };
        table.add_row(vec![
            id_cell,
            Cell::new(&profile.name).fg(Color::Cyan),
            Cell::new(&profile.tagline),
            Cell::new(&profile.description),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {}",
        style(format!("{} persona(s)", profiles.len())).dim()
    );
    println!();

    Ok(())
}
