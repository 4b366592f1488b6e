pub mod repositories;
pub mod secrets;
