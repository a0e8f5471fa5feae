pub mod generate;
pub mod providers;
pub mod response_handler;
