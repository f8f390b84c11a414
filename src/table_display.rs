use crate::config::config::DisplayConfig;
use crate::view::actions::ActionMenu;
use crate::view::column::Rendered;
use crate::view::render::{RenderedTable, TableBody};
use crate::view::sort::SortOrder;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};
use crossterm::style::Stylize;

/// Text of one rendered cell for the terminal
pub fn cell_text(cell: &Rendered) -> String {
    match cell {
        Rendered::Text(s) => s.clone(),
        Rendered::Badge { label, .. } => format!("[{}]", label),
        Rendered::Empty => "-".to_string(),
        Rendered::Actions(menu) => action_text(menu),
    }
}

fn action_text(menu: &ActionMenu) -> String {
    let mut parts: Vec<String> = menu
        .inline
        .iter()
        .map(|action| {
            if action.is_disabled() {
                format!("({})", action.label())
            } else {
                action.label().to_string()
            }
        })
        .collect();
    if !menu.overflow.is_empty() {
        parts.push(format!("+{}", menu.overflow.len()));
    }
    parts.join(" | ")
}

/// Build the comfy-table for the current page
pub fn build_table<K>(rendered: &RenderedTable<K>, display: &DisplayConfig) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let mut headers: Vec<Cell> = Vec::new();
    if display.show_row_numbers {
        headers.push(Cell::new("#").add_attribute(Attribute::Bold));
    }
    if rendered.selection_enabled {
        headers.push(Cell::new(""));
    }
    for header in &rendered.headers {
        let label = match header.sort {
            SortOrder::Ascending => format!("{} {}", header.label, display.icons.sort_ascending),
            SortOrder::Descending => {
                format!("{} {}", header.label, display.icons.sort_descending)
            }
            SortOrder::None => header.label.clone(),
        };
        headers.push(Cell::new(label).add_attribute(Attribute::Bold));
    }
    let width = headers.len();
    table.set_header(headers);

    match &rendered.body {
        TableBody::Loading(message) | TableBody::Empty(message) => {
            let mut row = vec![Cell::new(message).set_alignment(CellAlignment::Center)];
            row.extend((1..width).map(|_| Cell::new("")));
            table.add_row(row);
        }
        TableBody::Rows(rows) => {
            let first_number = rendered
                .pager
                .as_ref()
                .map(|p| p.page_index * p.page_size)
                .unwrap_or(0);

            for (offset, row) in rows.iter().enumerate() {
                let mut cells: Vec<Cell> = Vec::new();
                if display.show_row_numbers {
                    cells.push(Cell::new(first_number + offset + 1));
                }
                if rendered.selection_enabled {
                    let marker = if row.selected {
                        display.icons.selected.as_str()
                    } else {
                        ""
                    };
                    cells.push(Cell::new(marker));
                }
                cells.extend(row.cells.iter().map(|c| Cell::new(cell_text(c))));
                table.add_row(cells);
            }
        }
    }

    table
}

/// Print title, stats, the page and pager lines
pub fn display_table<K>(rendered: &RenderedTable<K>, display: &DisplayConfig) {
    if let Some(title) = &rendered.title {
        println!("{}", title.as_str().bold());
    }
    if let Some(description) = &rendered.description {
        println!("{}", description.as_str().dark_grey());
    }
    if let Some(search) = &rendered.search {
        if !search.query.trim().is_empty() {
            println!("{} {}", "Busca:".dark_grey(), search.query);
        }
    }
    println!("{}", rendered.stats_line().cyan());

    println!("{}", build_table(rendered, display));

    if let Some(pager) = &rendered.pager {
        println!("{}", pager.label().green());
    }
    if let Some(reveal) = &rendered.reveal {
        let line = format!("Mostrando {} de {}", reveal.visible, reveal.total);
        if reveal.has_more {
            println!("{} {}", line.green(), "(--more para ver mais)".dark_grey());
        } else {
            println!("{}", line.green());
        }
    }
    if let Some(confirm) = &rendered.pending_confirmation {
        println!("{}", confirm.title.as_str().yellow());
        println!("{}", confirm.description);
    }
}
