//! Line-oriented search/insert prompt over a product tree.

use std::io::{BufRead, Write};
use std::ops::ControlFlow;
use std::time::Instant;

use rbindex::errors::IndexResult;
use rbindex::record::Product;
use rbindex::tree::RedBlackTree;

/// What happened during a [`Session`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub searches: usize,
    pub hits: usize,
    pub inserts: usize,
    pub rejected: usize,
}

/// Interactive request/response loop.
///
/// Reads answers line by line from `input` and writes prompts and results to
/// `output`. The session ends when the user answers `no` to the "again"
/// question or when the input runs out.
pub struct Session<'t, I, O> {
    tree: &'t mut RedBlackTree<Product>,
    input: I,
    output: O,
    summary: SessionSummary,
}

impl<'t, I: BufRead, O: Write> Session<'t, I, O> {
    pub fn new(tree: &'t mut RedBlackTree<Product>, input: I, output: O) -> Self {
        Session {
            tree,
            input,
            output,
            summary: SessionSummary::default(),
        }
    }

    pub fn run(mut self) -> IndexResult<SessionSummary> {
        loop {
            let Some(answer) = self.ask("Do you want to search or insert a product? (search/insert)")? else {
                break;
            };

            let flow = match answer.as_str() {
                "search" => self.search()?,
                "insert" => self.insert()?,
                _ => {
                    self.say("Invalid input")?;
                    ControlFlow::Continue(())
                }
            };
            if flow.is_break() {
                break;
            }

            match self.ask("Do you want to search or insert again? (yes/no)")? {
                Some(answer) if answer != "no" => continue,
                _ => break,
            }
        }

        self.output.flush()?;
        Ok(self.summary)
    }

    fn search(&mut self) -> IndexResult<ControlFlow<()>> {
        let Some(id) = self.ask("Type the product id you want to search:")? else {
            return Ok(ControlFlow::Break(()));
        };

        let start = Instant::now();
        let line = match self.tree.search(id.as_str()) {
            Some(product) => {
                self.summary.hits += 1;
                format!("Found: {}", product)
            }
            None => "Not found".to_string(),
        };
        log::debug!("Search for {:?} took {:?}", id, start.elapsed());

        self.summary.searches += 1;
        self.say(&line)?;
        Ok(ControlFlow::Continue(()))
    }

    fn insert(&mut self) -> IndexResult<ControlFlow<()>> {
        let Some(id) = self.ask("Type the product id you want to insert:")? else {
            return Ok(ControlFlow::Break(()));
        };
        let Some(name) = self.ask("Type the product name you want to insert:")? else {
            return Ok(ControlFlow::Break(()));
        };
        let Some(category) = self.ask("Type the product category you want to insert:")? else {
            return Ok(ControlFlow::Break(()));
        };
        let Some(price) = self.ask("Type the product price you want to insert:")? else {
            return Ok(ControlFlow::Break(()));
        };

        if id.is_empty() {
            self.summary.rejected += 1;
            self.say("Product id must not be empty")?;
            return Ok(ControlFlow::Continue(()));
        }

        let product = Product::new(id, name, category, price);
        let line = format!("Product inserted: {}", product);
        let duplicate = format!("Product with id {} already exists", product.id());

        let start = Instant::now();
        let result = self.tree.insert(product);
        log::debug!("Insert took {:?}", start.elapsed());

        match result {
            Ok(()) => {
                self.summary.inserts += 1;
                self.say(&line)?;
            }
            Err(err) if err.is_duplicate_key() => {
                self.summary.rejected += 1;
                self.say(&duplicate)?;
            }
            Err(err) => return Err(err),
        }
        Ok(ControlFlow::Continue(()))
    }

    // None once the input is exhausted
    fn ask(&mut self, question: &str) -> IndexResult<Option<String>> {
        self.say(question)?;
        self.output.flush()?;

        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&line).trim().to_string()))
    }

    fn say(&mut self, line: &str) -> IndexResult<()> {
        writeln!(self.output, "{}", line)?;
        Ok(())
    }
}
