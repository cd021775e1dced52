use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::{Duration, Instant};

use super::{parse_product, LoaderConfig};
use crate::errors::{IndexError, IndexResult};
use crate::record::Product;
use crate::tree::RedBlackTree;

/// Outcome of a catalog load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Products added to the tree.
    pub inserted: usize,
    /// Ids rejected because they were already present, in file order.
    pub duplicates: Vec<String>,
    /// 1-based line numbers of rows that could not be parsed.
    pub malformed: Vec<usize>,
    /// Wall time spent reading, parsing and inserting.
    pub elapsed: Duration,
}

/// Feeds the rows of a delimited product catalog into a tree.
///
/// Duplicate ids and malformed rows are logged, recorded in the
/// [`LoadReport`] and skipped; only I/O failures abort a load.
///
/// # Examples
///
/// ```rust
/// use rbindex::catalog::CatalogLoader;
/// use rbindex::tree::RedBlackTree;
///
/// let data = "A-1,Kettle,Kitchen,24.50\nA-2,Mug,4.00\nA-1,Kettle,Kitchen,19.00\n";
/// let mut tree = RedBlackTree::new();
/// let report = CatalogLoader::with_config().build().load(data.as_bytes(), &mut tree)?;
///
/// assert_eq!(report.inserted, 2);
/// assert_eq!(report.duplicates, vec!["A-1".to_string()]);
/// assert_eq!(tree.search("A-1").map(|p| p.price()), Some("24.50"));
/// # Ok::<(), rbindex::errors::IndexError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct CatalogLoader {
    config: LoaderConfig,
}

impl CatalogLoader {
    pub fn new(config: LoaderConfig) -> CatalogLoader {
        CatalogLoader { config }
    }

    /// Starts a builder with the default configuration.
    #[inline]
    pub fn with_config() -> CatalogLoaderBuilder {
        CatalogLoaderBuilder::new()
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Reads catalog rows from `reader` and inserts them into `tree`.
    ///
    /// Blank lines are ignored. Rows that are not valid UTF-8 are decoded
    /// lossily and loaded like any other row.
    ///
    /// # Errors
    ///
    /// Returns an I/O kind error if reading fails; rows inserted before the
    /// failure stay in the tree.
    pub fn load<B: BufRead>(&self, mut reader: B, tree: &mut RedBlackTree<Product>) -> IndexResult<LoadReport> {
        let start = Instant::now();
        let mut report = LoadReport::default();

        let mut buf = Vec::new();
        let mut line_no = 0;
        loop {
            buf.clear();
            line_no += 1;
            let read = reader.read_until(b'\n', &mut buf).map_err(|err| {
                let cause = IndexError::from(err);
                IndexError::new_with_cause(
                    &format!("Failed to read catalog line {}", line_no),
                    cause.kind().clone(),
                    cause,
                )
            })?;
            if read == 0 {
                break;
            }

            // bytes that are not UTF-8 become U+FFFD instead of failing the load
            let line = String::from_utf8_lossy(&buf);
            if line.trim().is_empty() {
                continue;
            }

            let product = match parse_product(&line, self.config.delimiter()) {
                Ok(product) => product,
                Err(err) => {
                    log::warn!("Skipping line {}: {}", line_no, err);
                    report.malformed.push(line_no);
                    continue;
                }
            };

            if self.config.echo_inserts() {
                log::info!("Inserting: {}", product);
            }

            let id = product.id().to_string();
            match tree.insert(product) {
                Ok(()) => report.inserted += 1,
                Err(err) if err.is_duplicate_key() => {
                    log::warn!("Product with id {} already exists (line {})", id, line_no);
                    report.duplicates.push(id);
                }
                Err(err) => return Err(err),
            }
        }

        report.elapsed = start.elapsed();
        log::info!(
            "Loaded {} products in {:?} ({} duplicates, {} malformed rows)",
            report.inserted,
            report.elapsed,
            report.duplicates.len(),
            report.malformed.len()
        );
        Ok(report)
    }

    /// Opens `path` and loads it with [`load`](Self::load).
    pub fn load_path(&self, path: impl AsRef<Path>, tree: &mut RedBlackTree<Product>) -> IndexResult<LoadReport> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| {
            let cause = IndexError::from(err);
            IndexError::new_with_cause(
                &format!("Cannot open catalog {}", path.display()),
                cause.kind().clone(),
                cause,
            )
        })?;
        log::debug!("Loading catalog from {}", path.display());
        self.load(BufReader::new(file), tree)
    }
}

/// Fluent builder for a [`CatalogLoader`].
pub struct CatalogLoaderBuilder {
    config: LoaderConfig,
}

impl Default for CatalogLoaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogLoaderBuilder {
    #[inline]
    pub fn new() -> CatalogLoaderBuilder {
        CatalogLoaderBuilder {
            config: LoaderConfig::new(),
        }
    }

    #[inline]
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.config.set_delimiter(delimiter);
        self
    }

    #[inline]
    pub fn echo_inserts(mut self, echo_inserts: bool) -> Self {
        self.config.set_echo_inserts(echo_inserts);
        self
    }

    #[inline]
    pub fn build(self) -> CatalogLoader {
        CatalogLoader::new(self.config)
    }
}
