/// Settings for loading a delimited product catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    delimiter: char,
    echo_inserts: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        LoaderConfig::new()
    }
}

impl LoaderConfig {
    /// Comma separated, quiet.
    pub fn new() -> LoaderConfig {
        LoaderConfig {
            delimiter: ',',
            echo_inserts: false,
        }
    }

    /// Field separator of the catalog rows.
    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Whether every inserted product is logged at info level.
    pub fn echo_inserts(&self) -> bool {
        self.echo_inserts
    }

    pub(crate) fn set_delimiter(&mut self, delimiter: char) {
        self.delimiter = delimiter;
    }

    pub(crate) fn set_echo_inserts(&mut self, echo_inserts: bool) {
        self.echo_inserts = echo_inserts;
    }
}
