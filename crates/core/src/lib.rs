//! Redirect resolution core.
//!
//! Turns "page not found" failures into redirects using a curated table of
//! old-to-new URL rules, and records unmatched URLs so administrators can
//! curate them later. Storage and HTTP are kept behind traits so the
//! resolution policy can be exercised without a database or a server.

pub mod config;
pub mod curation;
pub mod error;
pub mod request;
pub mod resolver;
pub mod routing;
pub mod store;
pub mod types;
