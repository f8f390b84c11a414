use crate::export::DEFAULT_EXPORT_TITLE;
use crate::view::pagination::{
    DEFAULT_PAGE_SIZE, DEFAULT_REVEAL_INCREMENT, DEFAULT_REVEAL_INITIAL, PAGE_SIZE_OPTIONS,
};
use crate::view::table_view::{
    PagingMode, TableOptions, DEFAULT_EMPTY_MESSAGE, DEFAULT_LOADING_MESSAGE,
    DEFAULT_SEARCH_PLACEHOLDER,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub table: TableConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Use Unicode glyphs for sort and selection markers
    pub use_glyphs: bool,

    /// Show row numbers in the terminal table
    pub show_row_numbers: bool,

    /// Markers (can be overridden)
    pub icons: IconConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IconConfig {
    pub sort_ascending: String,
    pub sort_descending: String,
    pub selected: String,
    pub success: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub default_page_size: usize,
    pub page_size_options: Vec<usize>,
    /// "pages", "reveal" or "all"
    pub paging: String,
    pub reveal_initial: usize,
    pub reveal_increment: usize,
    pub empty_message: String,
    pub loading_message: String,
    pub search_placeholder: String,
    /// Minimum skim score for non-substring search matches
    pub fuzzy_min_score: i64,
    pub enable_filters: bool,
    pub enable_export: bool,
    pub enable_selection: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Filename prefix when the table has no title
    pub default_title: String,

    /// Where exports are written (current directory when unset)
    pub output_dir: Option<PathBuf>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            use_glyphs: true,
            show_row_numbers: false,
            icons: IconConfig::default(),
        }
    }
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            sort_ascending: "↑".to_string(),
            sort_descending: "↓".to_string(),
            selected: "●".to_string(),
            success: "✅".to_string(),
            error: "❌".to_string(),
        }
    }
}

impl IconConfig {
    /// ASCII markers for terminals without glyph support
    pub fn simple() -> Self {
        Self {
            sort_ascending: "^".to_string(),
            sort_descending: "v".to_string(),
            selected: "*".to_string(),
            success: "[OK]".to_string(),
            error: "[X]".to_string(),
        }
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            page_size_options: PAGE_SIZE_OPTIONS.to_vec(),
            paging: "pages".to_string(),
            reveal_initial: DEFAULT_REVEAL_INITIAL,
            reveal_increment: DEFAULT_REVEAL_INCREMENT,
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
            loading_message: DEFAULT_LOADING_MESSAGE.to_string(),
            search_placeholder: DEFAULT_SEARCH_PLACEHOLDER.to_string(),
            fuzzy_min_score: 0,
            enable_filters: true,
            enable_export: true,
            enable_selection: true,
        }
    }
}

impl TableConfig {
    pub fn paging_mode(&self) -> PagingMode {
        match self.paging.to_ascii_lowercase().as_str() {
            "reveal" => PagingMode::Reveal,
            "all" | "none" | "disabled" => PagingMode::Disabled,
            _ => PagingMode::Pages,
        }
    }

    /// Engine options seeded from this section
    pub fn to_options(&self) -> TableOptions {
        TableOptions {
            empty_message: self.empty_message.clone(),
            loading_message: self.loading_message.clone(),
            search_placeholder: self.search_placeholder.clone(),
            page_size: self.default_page_size.max(1),
            page_size_options: self.page_size_options.clone(),
            paging: self.paging_mode(),
            reveal_initial: self.reveal_initial,
            reveal_increment: self.reveal_increment,
            enable_filters: self.enable_filters,
            enable_export: self.enable_export,
            enable_selection: self.enable_selection,
            fuzzy_min_score: self.fuzzy_min_score,
            ..TableOptions::default()
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            default_title: DEFAULT_EXPORT_TITLE.to_string(),
            output_dir: None,
        }
    }
}

impl Config {
    /// Load config from the default location, creating it on first use
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            let default_config = Self::default();
            default_config.save()?;
            return Ok(default_config);
        }

        Self::load_from(&config_path)
    }

    /// Load config from an explicit file
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let mut config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;

        if !config.display.use_glyphs {
            config.display.icons = IconConfig::simple();
        }

        debug!(target: "config", "Loaded config from {:?}", path);
        Ok(config)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;

        Ok(())
    }

    /// Get the default config file path
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("tabview").join("config.toml"))
    }

    /// Write the default config to its usual location, returning the path
    pub fn init_default() -> Result<PathBuf> {
        let path = Self::get_config_path()?;
        Self::default().save_to(&path)?;
        Ok(path)
    }

    /// Export title for a table, falling back to the configured default
    pub fn export_title<'a>(&'a self, title: Option<&'a str>) -> &'a str {
        title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(&self.export.default_title)
    }

    /// Default config file with comments
    pub fn create_default_with_comments() -> String {
        r#"# tabview configuration file
# Location: ~/.config/tabview/config.toml (Linux)
#           ~/Library/Application Support/tabview/config.toml (macOS)
#           %APPDATA%\tabview\config.toml (Windows)

[display]
# Use Unicode glyphs for sort and selection markers
# Set to false for ASCII-only output
use_glyphs = true

# Show row numbers in the terminal table
show_row_numbers = false

# Markers, switched to ASCII automatically when use_glyphs = false
[display.icons]
sort_ascending = "↑"
sort_descending = "↓"
selected = "●"
success = "✅"
error = "❌"

[table]
# Rows per page and the sizes offered in the page-size picker
default_page_size = 10
page_size_options = [10, 20, 50, 100]

# "pages" (pager), "reveal" (show more) or "all"
paging = "pages"

# Reveal mode: rows shown at first and rows added per "show more"
reveal_initial = 10
reveal_increment = 10

empty_message = "Nenhum registro encontrado"
loading_message = "Carregando dados..."
search_placeholder = "Buscar..."

# Minimum fuzzy score for search matches that are not plain substrings
fuzzy_min_score = 0

enable_filters = true
enable_export = true
enable_selection = true

[export]
# Filename prefix when the table has no title: <title>_<YYYY-MM-DD>.csv
default_title = "dados"

# Directory for exported files (leave commented for the current directory)
# output_dir = "/path/to/exports"
"#
        .to_string()
    }
}
