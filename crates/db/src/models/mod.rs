pub mod member;
pub mod profile;
pub mod server;
