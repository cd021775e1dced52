use smallvec::SmallVec;

use crate::errors::{ErrorKind, IndexError, IndexResult};
use crate::record::Product;

/// Parses one delimited catalog row into a [`Product`].
///
/// Rows carry either `id, name, category, price` or, when the category is
/// missing, `id, name, price`; the category then defaults to empty. Fields are
/// trimmed. Any other field count, or an empty id, is rejected with
/// [`ErrorKind::MalformedRecord`]. No quoting or escaping is recognised.
///
/// # Examples
///
/// ```rust
/// use rbindex::catalog::parse_product;
///
/// let product = parse_product("B01,USB Cable,9.99", ',')?;
/// assert_eq!(product.category(), "");
/// assert_eq!(product.price(), "9.99");
/// # Ok::<(), rbindex::errors::IndexError>(())
/// ```
pub fn parse_product(line: &str, delimiter: char) -> IndexResult<Product> {
    let fields: SmallVec<[&str; 4]> = line.split(delimiter).map(str::trim).collect();

    let (id, name, category, price) = match fields.as_slice() {
        [id, name, category, price] => (*id, *name, *category, *price),
        [id, name, price] => (*id, *name, "", *price),
        _ => {
            return Err(IndexError::new(
                &format!("expected 3 or 4 fields but found {}", fields.len()),
                ErrorKind::MalformedRecord,
            ))
        }
    };

    if id.is_empty() {
        return Err(IndexError::new("product id is empty", ErrorKind::MalformedRecord));
    }

    Ok(Product::new(id, name, category, price))
}
