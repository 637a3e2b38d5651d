//! In-place signal operations.
//!
//! Each operation is available as a trait-first kernel (generic over the
//! sample type, see [`traits`]) and as a free function with the precision the
//! measurement pipeline uses: single precision for spectra and correlations,
//! double precision for [`power`].

pub mod traits;

mod analysis;
mod correlate;
mod power;
mod spectrum;

pub use analysis::*;
pub use correlate::*;
pub use power::*;
pub use spectrum::*;
