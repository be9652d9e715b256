pub mod favorite;
pub mod people;
pub mod planets;
pub mod user;
