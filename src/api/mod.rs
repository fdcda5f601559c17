mod client;
mod error;
mod types;

pub use client::{DEFAULT_API_BASE, PostClient};
pub use error::ApiError;
pub use types::{PAGE_SIZE, Page, Post};
