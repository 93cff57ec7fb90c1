pub mod fetch;

pub use fetch::{fetch_url, FetchError, FetchResult};
