use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use kletype::layout::{KeyboardMetadata, LayoutModel};
use kletype::render::row_columns;

pub fn print_metadata(meta: &KeyboardMetadata) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Field").add_attribute(Attribute::Bold),
        Cell::new("Value").add_attribute(Attribute::Bold),
    ]);

    let fields = [
        ("Name", &meta.name),
        ("Author", &meta.author),
        ("Notes", &meta.notes),
        ("Background", &meta.backcolor),
        ("Radii", &meta.radii),
        ("Switch Mount", &meta.switch_mount),
        ("Switch Brand", &meta.switch_brand),
        ("Switch Type", &meta.switch_type),
    ];
    for (field, value) in fields {
        if value.is_empty() {
            continue;
        }
        table.add_row(vec![Cell::new(field).fg(Color::Cyan), Cell::new(value)]);
    }

    println!("\n📋 === METADATA === 📋");
    println!("{}", table);
}

pub fn print_rows(layout: &LayoutModel) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Row").add_attribute(Attribute::Bold),
        Cell::new("Keys"),
        Cell::new("Width (u)").fg(Color::Cyan),
        Cell::new("Columns"),
        Cell::new("Legends"),
    ]);
    for i in 0..4 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    let widths = layout.row_widths();
    for (row, keys) in layout.rows() {
        let columns = row_columns(&keys);
        let legends: Vec<&str> = keys
            .iter()
            .map(|k| k.primary_legend().unwrap_or("·"))
            .collect();

        table.add_row(vec![
            Cell::new(row).add_attribute(Attribute::Bold),
            Cell::new(keys.len()),
            Cell::new(format!("{:.2}", widths.get(&row).copied().unwrap_or(0.0))).fg(Color::Cyan),
            Cell::new(columns),
            Cell::new(legends.join(" ")),
        ]);
    }

    println!("\n🎹 === ROWS === 🎹");
    println!("{}", table);
    println!(
        "{} keys in {} rows, widest row {:.2}u",
        layout.key_count(),
        layout.row_count(),
        layout.max_row_width()
    );
}
