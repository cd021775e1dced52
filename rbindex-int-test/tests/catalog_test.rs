use rbindex::catalog::CatalogLoader;
use rbindex::errors::ErrorKind;
use rbindex::record::Product;
use rbindex::tree::{Order, RedBlackTree};
use rbindex_int_test::test_util::{assert_red_black, cleanup, create_test_context, run_test};

#[ctor::ctor]
fn init() {
    colog::init();
}

const ROWS: &[&str] = &[
    "B00-3,Desk Lamp,Home,19.99",
    "A00-1,Kettle,Kitchen,24.50",
    "",
    "C00-7,Cable,5.00",
    "not a product",
    "A00-1,Kettle Deluxe,Kitchen,39.00",
    "A00-2, Mug , Kitchen , 4.00 ",
];

#[test]
fn test_load_catalog_from_disk() {
    run_test(
        create_test_context,
        |ctx| {
            let path = ctx.write_catalog("products.csv", ROWS)?;
            let mut tree = RedBlackTree::new();
            let report = CatalogLoader::default().load_path(&path, &mut tree)?;

            assert_eq!(report.inserted, 4);
            assert_eq!(report.duplicates, vec!["A00-1".to_string()]);
            assert_eq!(report.malformed, vec![5]);
            assert_red_black(&tree)?;

            let ids: Vec<&str> = tree.iter().map(Product::id).collect();
            assert_eq!(ids, vec!["A00-1", "A00-2", "B00-3", "C00-7"]);

            let kettle = tree.get("A00-1")?;
            assert_eq!(kettle.price(), "24.50");
            let cable = tree.get("C00-7")?;
            assert_eq!(cable.category(), "");
            let mug = tree.get("A00-2")?;
            assert_eq!(mug.name(), "Mug");
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_load_into_shared_index() {
    run_test(
        create_test_context,
        |ctx| {
            let rows: Vec<String> = (0..200)
                .map(|i| format!("P-{:04}|Item {}|Bulk|{}.00", i, i, i))
                .collect();
            let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
            let path = ctx.write_catalog("products.psv", &rows)?;

            let loader = CatalogLoader::with_config().delimiter('|').build();
            let index = ctx.index();
            let report = index.write(|tree| loader.load_path(&path, tree))?;

            assert_eq!(report.inserted, 200);
            assert_eq!(index.size(), 200);
            assert!(index.contains_key("P-0199"));
            assert_eq!(index.get("P-0042")?.price(), "42.00");

            let snapshot = index.snapshot(Order::InOrder);
            assert_eq!(snapshot.first().map(Product::id), Some("P-0000"));
            assert_eq!(snapshot.last().map(Product::id), Some("P-0199"));
            index.check_invariants()?;
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_loading_twice_rejects_every_row() {
    run_test(
        create_test_context,
        |ctx| {
            let path = ctx.write_catalog("products.csv", ROWS)?;
            let loader = CatalogLoader::default();
            let mut tree = RedBlackTree::new();
            loader.load_path(&path, &mut tree)?;
            let stats = tree.stats();

            let report = loader.load_path(&path, &mut tree)?;
            assert_eq!(report.inserted, 0);
            assert_eq!(report.duplicates.len(), 5);
            assert_eq!(tree.size(), 4);
            assert_eq!(tree.stats(), stats);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_missing_catalog() {
    run_test(
        create_test_context,
        |ctx| {
            let path = ctx.dir().join("absent.csv");
            let mut tree = RedBlackTree::new();
            let err = CatalogLoader::default()
                .load_path(&path, &mut tree)
                .expect_err("missing file must fail");

            assert_eq!(err.kind(), &ErrorKind::FileNotFound);
            assert!(err.message().contains("absent.csv"));
            assert!(tree.is_empty());
            Ok(())
        },
        cleanup,
    )
}
