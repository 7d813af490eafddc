//! Cinescope-Common: Shared types, identifiers, and error taxonomy.
//!
//! This crate provides functionality used across cinescope:
//!
//! - **Typed IDs**: A wrapper for metadata-provider title identifiers
//! - **Core Types**: Media kinds, release types, quality labels and badge colours
//! - **Error Handling**: The provider error taxonomy and result alias
//!
//! # Examples
//!
//! ```
//! use cinescope_common::{BadgeColor, Error, MediaKind, QualityLabel, Result, TitleId};
//!
//! let id = TitleId::new(27205);
//! assert_eq!(id.get(), 27205);
//!
//! assert_eq!(MediaKind::Movie.path_segment(), "movie");
//! assert_eq!(QualityLabel::CamQuality.color(), BadgeColor::Red);
//!
//! fn example() -> Result<()> {
//!     Err(Error::malformed("missing `results`"))
//! }
//! assert!(example().is_err());
//! ```

pub mod error;
pub mod ids;
pub mod types;

pub use error::{Error, FailureKind, Result};
pub use ids::*;
pub use types::*;
