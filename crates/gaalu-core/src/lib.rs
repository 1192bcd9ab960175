//! # gaalu-core
//!
//! Blade arithmetic engine for the GAALU generator.
//!
//! Provides the fixed 5-generator conformal algebra with:
//! - Bitmask-encoded basis blades (32 blades, grade = popcount)
//! - Exact integer geometric product via sequential vector insertion
//! - Full 32×32 product table plus wedge/dot derivations
//! - Even-grade sub-algebra restriction with a fixed 16-lane layout

pub mod coeffs;
pub mod error;
pub mod even;
pub mod product;
pub mod space;
pub mod table;

pub use coeffs::CoeffMap;
pub use error::GaaluError;
pub use even::{EvenLanes, LaneTable};
pub use space::{Blade, BladeSpace};
pub use table::{DotKind, Table};

pub type Result<T> = std::result::Result<T, GaaluError>;
