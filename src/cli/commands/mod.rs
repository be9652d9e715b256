mod init;
mod routes;
mod seed;
mod serve;

pub use init::cmd_init;
pub use routes::cmd_routes;
pub use seed::cmd_seed;
pub use serve::cmd_serve;
