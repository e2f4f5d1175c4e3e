//! VEP CSQ consequence handling
//!
//! Schema discovery from the header, per-transcript record parsing, and the
//! tie-break cascades that pick one representative record per variant.

mod schema;
mod select;
mod severity;

pub use schema::{CsqRecord, CsqSchema, INFO_CSQ};
pub use select::{select_representative, SelectionPolicy};
pub use severity::{appris_tier, consequence_severity, tsl_tier};
