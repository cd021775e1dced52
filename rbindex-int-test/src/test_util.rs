use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rbindex::errors::IndexResult;
use rbindex::record::{KeyedRecord, Product, Record};
use rbindex::shared::SharedIndex;
use rbindex::tree::{RedBlackTree, TreeReport};
use std::path::{Path, PathBuf};
use std::{env, fs};

/// Runs `test` between `before` and `after`.
///
/// `after` also runs when the test fails or panics, so temporary directories
/// are removed either way. Failures are reported with the error chain.
pub fn run_test<T, B, A>(before: B, test: T, after: A)
where
    T: Fn(TestContext) -> IndexResult<()> + std::panic::UnwindSafe + std::panic::RefUnwindSafe,
    B: Fn() -> IndexResult<TestContext>,
    A: Fn(TestContext) -> IndexResult<()>,
{
    let ctx = match before() {
        Ok(ctx) => ctx,
        Err(e) => panic!("Before run failed: {:?}", e),
    };

    let test_ctx = ctx.clone();
    let result = std::panic::catch_unwind(move || test(test_ctx));

    let after_result = after(ctx);

    match result {
        Ok(Ok(())) => {}
        Ok(Err(e)) => panic!("Test failed: {:?}", e),
        Err(panic) => std::panic::resume_unwind(panic),
    }

    if let Err(e) = after_result {
        panic!("After run failed: {:?}", e);
    }
}

/// Per-test scratch space: a private directory and an empty shared index.
#[derive(Clone)]
pub struct TestContext {
    dir: PathBuf,
    index: SharedIndex<Product>,
}

impl std::panic::RefUnwindSafe for TestContext {}
impl std::panic::UnwindSafe for TestContext {}

impl TestContext {
    pub fn new(dir: PathBuf, index: SharedIndex<Product>) -> Self {
        Self { dir, index }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn index(&self) -> SharedIndex<Product> {
        self.index.clone()
    }

    /// Writes `rows` as lines of a catalog file called `name` and returns
    /// its path.
    pub fn write_catalog(&self, name: &str, rows: &[&str]) -> IndexResult<PathBuf> {
        let path = self.dir.join(name);
        let mut contents = rows.join("\n");
        contents.push('\n');
        fs::write(&path, contents)?;
        Ok(path)
    }
}

pub fn random_path() -> PathBuf {
    let id = uuid::Uuid::new_v4();
    env::temp_dir().join(format!("rbindex-{}", id))
}

pub fn create_test_context() -> IndexResult<TestContext> {
    let dir = random_path();
    fs::create_dir_all(&dir)?;
    Ok(TestContext::new(dir, SharedIndex::new()))
}

pub fn cleanup(ctx: TestContext) -> IndexResult<()> {
    if ctx.dir().exists() {
        fs::remove_dir_all(ctx.dir())?;
    }
    Ok(())
}

/// `0..n` in a shuffled order that is stable for a given seed.
pub fn shuffled_keys(n: u64, seed: u64) -> Vec<u64> {
    let mut keys: Vec<u64> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    keys.shuffle(&mut rng);
    keys
}

/// Builds a tree of `KeyedRecord`s whose payload is the key rendered as text.
pub fn tree_from_keys<K, I>(keys: I) -> IndexResult<RedBlackTree<KeyedRecord<K, String>>>
where
    K: Ord + ToString,
    I: IntoIterator<Item = K>,
{
    let mut tree = RedBlackTree::new();
    for key in keys {
        let fields = key.to_string();
        tree.insert(KeyedRecord::new(key, fields))?;
    }
    Ok(tree)
}

/// Checks every invariant plus the agreement of all the ways of counting.
pub fn assert_red_black<R: Record>(tree: &RedBlackTree<R>) -> IndexResult<TreeReport> {
    let report = tree.check_invariants()?;
    assert_eq!(report.size, tree.size());
    assert_eq!(tree.count_nodes(), tree.size());
    assert_eq!(tree.iter().count(), tree.size());
    Ok(report)
}

/// The red-black height guarantee, `2 * log2(n + 1)`.
pub fn height_bound(n: usize) -> f64 {
    2.0 * ((n + 1) as f64).log2()
}

pub fn product(id: &str) -> Product {
    Product::new(id, format!("Product {}", id), "Test", "1.00")
}
