pub mod members;
pub mod servers;
