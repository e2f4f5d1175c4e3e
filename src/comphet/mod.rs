//! Compound-heterozygous pair reconstruction
//!
//! Tokens are parsed at the boundary; the reconciler buffers one pass of the
//! stream, matches halves by pair id, and emits only completed pairs.

mod reconciler;
mod token;

pub use reconciler::CompHetReconciler;
pub use token::CompHetToken;
