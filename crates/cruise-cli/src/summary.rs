//! Run summary rendering.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use cruise_model::{ArrayValues, PRES_DIM};

use crate::commands::ProcessResult;

pub fn print_process_summary(result: &ProcessResult) {
    let ds = &result.dataset;
    println!("Profiles: {}", result.profile_count);
    println!("Output: {}", result.output_path.display());

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Variable"),
        header_cell("Dims"),
        header_cell("Kind"),
        header_cell("Units"),
        header_cell("Attrs"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 4, CellAlignment::Right);
    for (name, var) in ds.coords.iter().chain(ds.data_vars.iter()) {
        let kind = match &var.values {
            ArrayValues::F64(_) if var.has_dim(PRES_DIM) => "profile",
            ArrayValues::F64(_) => "scalar",
            ArrayValues::Str(_) => "text",
        };
        table.add_row(vec![
            Cell::new(name),
            Cell::new(var.dims.join(", ")),
            Cell::new(kind),
            Cell::new(var.unit().unwrap_or("-")),
            Cell::new(var.attrs.len()),
        ]);
    }
    println!("{table}");

    if result.violation_count > 0 {
        println!(
            "{} controlled-vocabulary value(s) left untouched (see warnings)",
            result.violation_count
        );
    }
    if result.audit_finding_count > 0 {
        println!("{} audit line(s) above", result.audit_finding_count);
    }
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}
