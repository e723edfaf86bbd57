pub mod category;
pub mod error;
pub mod types;

pub use category::{Category, category_labels};
pub use error::{GroceryError, Result};
pub use types::{Filter, Item, ItemPatch, Stats, now};
