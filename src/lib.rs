//! # tagstream
//!
//! Self-describing binary stream for lightweight object persistence.
//!
//! Values are written as tagged records into a flat byte buffer and read
//! back with the tag checked at every step. Primitives, strings, sequences,
//! maps, sets and user aggregates (via [`serializable!`]) all go through the
//! same recursive [`Encode`]/[`Decode`] machinery.

pub mod io;
pub use io::*;
