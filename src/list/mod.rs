pub mod config;
pub mod manager;
pub mod view;

pub use config::ListConfig;
pub use manager::{GroceryList, Phase};
pub use view::{compute_stats, filter_items};
