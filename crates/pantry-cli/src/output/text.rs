//! Text and table output formatting for items.

use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{CellAlignment, ContentArrangement, Table};
use owo_colors::OwoColorize;

use pantry_core::InventoryItem;

use super::json::{item_json, items_json};
use super::{use_color, OutputFormat};

const EMPTY_MESSAGE: &str = "No items found.";

/// Print a filtered item list as JSON, a table or plain lines.
pub fn print_item_list(
    items: &[&InventoryItem],
    json: bool,
    format: Option<OutputFormat>,
    quiet: bool,
) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&items_json(items))?);
        return Ok(());
    }

    if items.is_empty() {
        if !quiet {
            println!("{}", EMPTY_MESSAGE);
        }
        return Ok(());
    }

    match format.unwrap_or(OutputFormat::Table) {
        OutputFormat::Table => println!("{}", item_table(items)),
        OutputFormat::Plain => {
            for item in items {
                println!("{}", plain_line(item));
            }
        }
    }
    Ok(())
}

/// Print one item in detail.
pub fn print_item(item: &InventoryItem, json: bool, quiet: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&item_json(item))?);
        return Ok(());
    }
    if quiet {
        println!("{}", item.quantity);
        return Ok(());
    }

    let color = use_color();
    let label = |text: &'static str| {
        if color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    };
    println!("{} {}", label("Name:"), item.display_name());
    println!("{} {}", label("Key:"), item.name);
    println!("{} {}", label("Quantity:"), item.quantity);
    if let Some(url) = &item.image_url {
        println!("{} {}", label("Photo:"), url);
    }
    Ok(())
}

/// Print a one-line status message unless quiet.
pub fn print_status(message: &str, quiet: bool) {
    if quiet {
        return;
    }
    if use_color() {
        println!("{}", message.green());
    } else {
        println!("{}", message);
    }
}

fn item_table(items: &[&InventoryItem]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ITEM", "QTY", "PHOTO"]);
    for item in items {
        table.add_row(vec![
            item.display_name(),
            item.quantity.to_string(),
            item.image_url.clone().unwrap_or_default(),
        ]);
    }
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    table
}

fn plain_line(item: &InventoryItem) -> String {
    match &item.image_url {
        Some(url) => format!("{}\t{}\t{}", item.name, item.quantity, url),
        None => format!("{}\t{}", item.name, item.quantity),
    }
}
