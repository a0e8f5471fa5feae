pub mod dispatcher;
pub mod errors;
pub mod handlers;
pub mod router;
pub mod server;
pub mod utils;
