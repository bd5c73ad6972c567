// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod api;
pub mod config;
pub mod record;
pub mod scrape;

// ---- Re-exports for stable public API ----
pub use crate::api::{router, AppState};
pub use crate::record::{ProductRecord, Source};
pub use crate::scrape::{HttpFetcher, PageFetcher};
