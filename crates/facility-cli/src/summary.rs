use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use facility_model::{Priority, ScheduledTask};
use facility_schedule::NextOccurrence;

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

pub fn print_tasks(tasks: &[ScheduledTask]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Checklist"),
        header_cell("Scheduled for"),
        header_cell("Priority"),
        header_cell("Points"),
        header_cell("Minutes"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    let mut total_points = 0u64;
    let mut total_minutes = 0u64;
    for task in tasks {
        total_points += u64::from(task.points);
        total_minutes += u64::from(task.estimated_duration);
        table.add_row(vec![
            Cell::new(&task.checklist_title),
            Cell::new(task.scheduled_for.format(DATETIME_FORMAT)),
            priority_cell(task.priority),
            Cell::new(task.points),
            Cell::new(task.estimated_duration),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{} tasks", tasks.len())).add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(total_points).add_attribute(Attribute::Bold),
        Cell::new(total_minutes).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

pub fn print_next(rows: &[(String, NextOccurrence)]) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Checklist"), header_cell("Next occurrence")]);
    apply_table_style(&mut table);
    for (title, next) in rows {
        let cell = match next {
            NextOccurrence::Found(at) => Cell::new(at.format(DATETIME_FORMAT)),
            NextOccurrence::NoneWithin { until } => {
                Cell::new(format!("none before {until}")).fg(Color::Yellow)
            }
            NextOccurrence::NotScheduled => dim_cell("not calendar scheduled"),
        };
        table.add_row(vec![Cell::new(title), cell]);
    }
    println!("{table}");
}

fn priority_cell(priority: Priority) -> Cell {
    let cell = Cell::new(priority.as_str());
    match priority {
        Priority::Urgent => cell.fg(Color::Red).add_attribute(Attribute::Bold),
        Priority::High => cell.fg(Color::Red),
        Priority::Medium => cell.fg(Color::Yellow),
        Priority::Low => cell.fg(Color::DarkGrey),
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
