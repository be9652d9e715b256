pub mod favorites;
pub use favorites::{FavoriteError, FavoriteService};
