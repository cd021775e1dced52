//! Product catalog shell
//!
//! Loads a delimited product file into a red-black tree, prints a load report
//! and then answers interactive search and insert requests.
//!
//! # Example
//!
//! ```bash
//! catalog --data amazon-product-data.csv --echo --log-level debug
//! ```

mod session;

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rbindex::catalog::{CatalogLoader, LoadReport};
use rbindex::record::Product;
use rbindex::tree::RedBlackTree;

use crate::session::Session;

/// Product catalog backed by a red-black tree
#[derive(Parser, Debug)]
#[command(name = "catalog")]
#[command(about = "Load a product catalog into a red-black tree and query it")]
struct Args {
    /// Delimited catalog file with `id,name[,category],price` rows
    #[arg(long, default_value = "amazon-product-data.csv")]
    data: PathBuf,

    /// Field separator
    #[arg(long, default_value_t = ',')]
    delimiter: char,

    /// Log every inserted product
    #[arg(long)]
    echo: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: log::LevelFilter,

    /// Load and report, then exit without prompting
    #[arg(long)]
    no_prompt: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    colog::default_builder().filter_level(args.log_level).init();

    let loader = CatalogLoader::with_config()
        .delimiter(args.delimiter)
        .echo_inserts(args.echo)
        .build();

    let mut tree = RedBlackTree::new();
    let report = loader
        .load_path(&args.data, &mut tree)
        .with_context(|| format!("failed to load catalog {}", args.data.display()))?;
    println!("{}", render_report(&report, &tree));

    if args.no_prompt {
        return Ok(());
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let summary = Session::new(&mut tree, stdin.lock(), stdout.lock()).run()?;
    log::info!(
        "Session finished: {} searches ({} found), {} inserts, {} rejected",
        summary.searches,
        summary.hits,
        summary.inserts,
        summary.rejected
    );
    Ok(())
}

fn render_report(report: &LoadReport, tree: &RedBlackTree<Product>) -> String {
    let mut lines = vec![
        format!("Inserted {} products in {:?}", report.inserted, report.elapsed),
        format!("Tree size {}, height {}", tree.size(), tree.height()),
    ];
    if !report.duplicates.is_empty() {
        lines.push(format!(
            "Skipped {} duplicate ids: {}",
            report.duplicates.len(),
            report.duplicates.join(", ")
        ));
    }
    if !report.malformed.is_empty() {
        let rows: Vec<String> = report.malformed.iter().map(|n| n.to_string()).collect();
        lines.push(format!(
            "Skipped {} malformed rows (lines {})",
            rows.len(),
            rows.join(", ")
        ));
    }
    lines.join("\n")
}
