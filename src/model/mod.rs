//! Data model shared by the workflow, the stores and the views.
//!
//! Records are immutable once received from the backend; the only product
//! built on the client is the one a successful scan produces.

mod identifiers;
mod ingredient;
mod product;

pub use identifiers::{Identifier, ProductId};
pub use ingredient::{clamp_score, Category, Ingredient};
pub use product::{parse_scan_date, CapturedImage, NewProduct, Product, DEFAULT_PRODUCT_NAME};

pub(crate) use ingredient::deserialize_score;
