use anyhow::{bail, Context, Result};
use chrono::Utc;
use crossterm::style::Stylize;
use std::path::{Path, PathBuf};
use tabview::cli::CliOptions;
use tabview::config::config::Config;
use tabview::data::cell_value::CellValue;
use tabview::data::record::Record;
use tabview::data::row_loaders::load_records;
use tabview::export::export_filename;
use tabview::table_display::display_table;
use tabview::view::{ColumnDescriptor, PagingMode, TableView};
use tracing::{debug, warn};

fn print_help() {
    println!("{}", "tabview - filter, sort and page tabular data".blue().bold());
    println!();
    println!("{}", "Usage:".yellow());
    println!("  tabview [OPTIONS] FILE.csv|FILE.json");
    println!();
    println!("{}", "Options:".yellow());
    println!("  {}        - Fuzzy search across all columns", "--search TEXT".green());
    println!(
        "  {}    - Column filter: col=text, col==text, col~regex",
        "--filter EXPR".green()
    );
    println!("  {}  - Sort by column (asc or desc)", "--sort COL[:DIR]".green());
    println!("  {}            - Page to show (one-based)", "--page N".green());
    println!("  {}       - Rows per page", "--page-size N".green());
    println!("  {}         - Reveal mode, showing N more steps", "--more [N]".green());
    println!("  {}          - Mark a source row as selected", "--select N".green());
    println!("  {}      - Table title (used in export filenames)", "--title TEXT".green());
    println!("  {}   - Export filtered rows to CSV", "--export [TITLE]".green());
    println!(
        "  {}     - Write default config file",
        "--init-config".green()
    );
    println!(
        "  {} - Print path and write commented config file",
        "--generate-config".green()
    );
    println!();
}

/// One data column per field of the loaded file
fn record_columns(names: &[String]) -> Vec<ColumnDescriptor<Record>> {
    names
        .iter()
        .map(|name| {
            let field = name.clone();
            ColumnDescriptor::new(name.clone(), name.clone(), move |record: &Record| {
                record.get(&field).cloned().unwrap_or(CellValue::Null)
            })
        })
        .collect()
}

fn default_title(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(|stem| stem.to_string())
}

fn generate_config() -> Result<PathBuf> {
    let path = Config::get_config_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).context("Error creating config directory")?;
    }
    std::fs::write(&path, Config::create_default_with_comments())
        .context("Error writing config file")?;
    Ok(path)
}

fn run(options: CliOptions) -> Result<()> {
    let Some(file) = options.file.as_deref() else {
        print_help();
        bail!("No data file given");
    };
    let path = Path::new(file);

    let config = Config::load().unwrap_or_else(|e| {
        warn!(target: "config", "Using default config: {:#}", e);
        Config::default()
    });

    let loaded = load_records(path)?;
    debug!(target: "main", "Loaded {} rows from {:?}", loaded.records.len(), path);

    let mut table_options = config.table.to_options();
    table_options.title = options.title.clone().or_else(|| default_title(path));
    if options.more.is_some() {
        table_options.paging = PagingMode::Reveal;
    }

    let mut view = TableView::new(record_columns(&loaded.columns), table_options)
        .with_rows(loaded.records);

    if let Some(page_size) = options.page_size {
        view.set_page_size(page_size)?;
    }
    if let Some(query) = &options.search {
        view.set_global_filter(query.as_str());
    }
    for arg in &options.filters {
        if !loaded.columns.contains(&arg.column) {
            bail!("Unknown column in filter: {}", arg.column);
        }
        view.set_column_filter(&arg.column, arg.filter.clone());
    }
    if let Some((column, order)) = &options.sort {
        if !loaded.columns.contains(column) {
            warn!(target: "main", "Ignoring sort on unknown column '{}'", column);
        }
        view.set_sort(column, *order);
    }
    for row in &options.select {
        view.toggle_selection(&(row - 1));
    }
    if let Some(page) = options.page {
        view.set_page_index(page - 1);
    }
    if let Some(steps) = options.more {
        for _ in 0..steps {
            view.show_more();
        }
    }

    display_table(&view.render(), &config.display);

    if let Some(export_title) = &options.export {
        let date = Utc::now().date_naive();
        let mut export = view.export_csv(date)?;
        let title = export_title
            .as_deref()
            .or(view.options().title.as_deref());
        export.filename = export_filename(Some(config.export_title(title)), date);

        let dir = config
            .export
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        let written = export.write_to_dir(&dir)?;
        println!(
            "{}",
            format!(
                "{} Exported {} rows to {}",
                config.display.icons.success,
                export.row_count,
                written.display()
            )
            .green()
        );
    }

    Ok(())
}

fn main() {
    tabview::utils::logging::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match CliOptions::parse(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{}", format!("Error: {:#}", e).red());
            eprintln!("Run with --help for usage.");
            std::process::exit(2);
        }
    };

    if options.show_help {
        print_help();
        return;
    }

    if options.init_config {
        match Config::init_default() {
            Ok(path) => {
                println!("Configuration initialized at: {:?}", path);
                return;
            }
            Err(e) => {
                eprintln!("Error initializing config: {}", e);
                std::process::exit(1);
            }
        }
    }

    if options.generate_config {
        match generate_config() {
            Ok(path) => {
                println!("Configuration file created at: {:?}", path);
                println!("Edit this file to customize tabview.");
                return;
            }
            Err(e) => {
                eprintln!("Error: {:#}", e);
                std::process::exit(1);
            }
        }
    }

    if let Err(e) = run(options) {
        eprintln!("{}", format!("Error: {:#}", e).red());
        std::process::exit(1);
    }
}
