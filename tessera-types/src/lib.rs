//! Tessera-specific error, configuration, and connector metadata types shared across crates.
#![warn(missing_docs)]

mod capability;
mod config;
mod connector;
mod error;

pub use capability::Capability;
pub use config::{
    DEFAULT_OVERFLOW_COLOR, FetchStrategy, TesseraConfig, TotalsPolicy, WeekAnchor,
};
pub use connector::SourceKey;
pub use error::TesseraError;
