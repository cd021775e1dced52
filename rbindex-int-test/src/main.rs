use rbindex::errors::IndexResult;
use rbindex::record::Product;
use rbindex::tree::Order;
use rbindex_int_test::test_util::{cleanup, create_test_context};

fn main() -> IndexResult<()> {
    colog::init();
    log::info!("Starting stress test...");
    let ctx = create_test_context()?;
    let index = ctx.index();

    let count = 1_000_000;
    let start = std::time::Instant::now();
    for i in 0..count {
        let id = uuid::Uuid::new_v4().to_string();
        index.insert(Product::new(id, format!("item {}", i), "stress", "0.00"))?;
    }
    log::info!("Inserted {} products in {:?}", count, start.elapsed());

    let start = std::time::Instant::now();
    let report = index.check_invariants()?;
    log::info!(
        "Checked {} nodes in {:?} (height {}, black height {})",
        report.size,
        start.elapsed(),
        report.height,
        report.black_height
    );

    let start = std::time::Instant::now();
    let products = index.snapshot(Order::InOrder);
    let hits = products
        .iter()
        .filter(|product| index.contains_key(product.id()))
        .count();
    log::info!("Looked up {} products in {:?}", hits, start.elapsed());

    cleanup(ctx)?;
    Ok(())
}
