pub mod health;
pub mod items;
pub mod pages;

pub use health::health_handler;
pub use items::{delete_item_handler, delete_layer_handler, list_handler};
pub use pages::page_handler;
