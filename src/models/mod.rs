pub mod catalog;
pub mod favorite;
pub mod user;

pub use catalog::{Person, Planet};
pub use favorite::{Favorite, FavoriteTarget, FavoriteTargetError, SerializeError, TargetKind};
pub use user::User;
