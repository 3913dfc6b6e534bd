//! Runtime configuration for dashboard front-ends.

/// Configuration options for running a dashboard.
///
/// ```ignore
/// let config = Config::default().auto_reload(false).table_rows(50);
/// ```
#[derive(Clone, Debug)]
pub struct Config {
    /// Watch the dataset file and reload it automatically on change.
    pub auto_reload: bool,

    /// Debounce delay for the dataset watcher in milliseconds.
    pub debounce_ms: u32,

    /// Maximum number of rows the table output prints.
    pub table_rows: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auto_reload: true,
            debounce_ms: 500,
            table_rows: 20,
        }
    }
}

impl Config {
    pub fn auto_reload(mut self, enabled: bool) -> Self {
        self.auto_reload = enabled;
        self
    }

    pub fn debounce_ms(mut self, ms: u32) -> Self {
        self.debounce_ms = ms;
        self
    }

    pub fn table_rows(mut self, rows: usize) -> Self {
        self.table_rows = rows;
        self
    }
}
