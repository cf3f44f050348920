pub mod fetch;
pub mod queue;
pub mod web;

pub use fetch::{FetchResult, Fetcher};
pub use queue::WorkQueue;
pub use web::{ExtractionRun, RunState};
