//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod redirect_link_repo;

pub use redirect_link_repo::RedirectLinkRepo;
