//! Saved grocery lists and the endpoints for saving and retrieving them.

mod models;
mod save_endpoint;
mod user_lists_endpoint;

pub use models::{GroceryItem, GroceryList, GroceryListId, NewGroceryList, round_to_cents};
pub use save_endpoint::save_list_endpoint;
pub use user_lists_endpoint::get_user_lists_endpoint;

#[cfg(test)]
pub(crate) use save_endpoint::SaveListResponse;
