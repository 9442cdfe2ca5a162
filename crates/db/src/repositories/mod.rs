//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&SqlitePool` (or an open connection) as the first argument.

pub mod member_repo;
pub mod profile_repo;
pub mod server_repo;

pub use member_repo::MemberRepo;
pub use profile_repo::ProfileRepo;
pub use server_repo::ServerRepo;
