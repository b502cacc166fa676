//! Re-export of foundational types from `tessera-types`.
// Consolidated re-exports so downstream crates can depend on `tessera-core` only

pub use tessera_types::{Capability, SourceKey, TesseraError};
pub use tessera_types::{
    DEFAULT_OVERFLOW_COLOR, FetchStrategy, TesseraConfig, TotalsPolicy, WeekAnchor,
};
