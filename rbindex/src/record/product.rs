use std::fmt::{Display, Formatter};

use super::Record;

/// A catalog product keyed by its id.
///
/// All fields are kept as text exactly as they were read; the price in
/// particular is not parsed. Products order lexicographically by id.
///
/// # Examples
///
/// ```rust
/// use rbindex::record::{Product, Record};
///
/// let product = Product::new("B07-1", "Desk Lamp", "Home", "19.99");
/// assert_eq!(product.key(), "B07-1");
/// assert_eq!(
///     product.to_string(),
///     "Product ID: B07-1, Name: Desk Lamp, Category: Home, Price: 19.99"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Product {
    id: String,
    name: String,
    category: String,
    price: String,
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        price: impl Into<String>,
    ) -> Self {
        Product {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            price: price.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The category; empty when the source row had none.
    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn price(&self) -> &str {
        &self.price
    }
}

impl Record for Product {
    type Key = String;

    #[inline]
    fn key(&self) -> &String {
        &self.id
    }
}

impl Display for Product {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Product ID: {}, Name: {}, Category: {}, Price: {}",
            self.id, self.name, self.category, self.price
        )
    }
}
