pub mod prelude;

pub mod favorites;
pub mod people;
pub mod planets;
pub mod users;
