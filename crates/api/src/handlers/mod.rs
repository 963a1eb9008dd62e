pub mod fallback;
pub mod redirects;
