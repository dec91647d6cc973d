pub mod fs;
pub mod http;
pub mod source;
#[cfg(test)]
pub(crate) mod testing;

pub use fs::FsSource;
pub use http::HttpSource;
pub use source::{AvailabilitySource, RecordLookup};
