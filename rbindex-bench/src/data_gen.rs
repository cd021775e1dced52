//! Data generators for benchmarks

use fake::faker::company::en::{CompanyName, Industry};
use fake::Fake;
use rand::seq::SliceRandom;
use rand::Rng;
use rbindex::record::Product;
use rbindex::tree::RedBlackTree;

/// Product id for position `i`; ids sort in the same order as `i`.
pub fn product_id(i: usize) -> String {
    format!("B{:09}", i)
}

/// Generate products with ascending ids
pub fn generate_products(count: usize) -> Vec<Product> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|i| {
            let name: String = CompanyName().fake();
            let category: String = Industry().fake();
            let price: f64 = rng.gen_range(1.0..500.0);
            Product::new(product_id(i), name, category, format!("{:.2}", price))
        })
        .collect()
}

/// Same products as [`generate_products`] in a random order
pub fn generate_shuffled_products(count: usize) -> Vec<Product> {
    let mut products = generate_products(count);
    products.shuffle(&mut rand::thread_rng());
    products
}

/// Build a tree holding `products`
pub fn build_tree(products: &[Product]) -> RedBlackTree<Product> {
    let mut tree = RedBlackTree::with_capacity(products.len());
    for product in products {
        tree.insert(product.clone()).expect("generated product ids are unique");
    }
    tree
}

/// Random ids, roughly half of which exist among `count` generated products
pub fn lookup_ids(count: usize, lookups: usize) -> Vec<String> {
    let mut rng = rand::thread_rng();
    (0..lookups)
        .map(|_| product_id(rng.gen_range(0..count * 2)))
        .collect()
}
