//! VCF (Variant Call Format) support
//!
//! This module provides the record model and streaming reader/writer the
//! triage commands are built on. Parsing is header-driven: INFO values are
//! typed through the `##INFO` declarations and survive round-trips so the
//! tool can sit in the middle of an annotation pipeline.

mod header;
mod parser;
mod record;
mod writer;

pub use header::{InfoDef, InfoType, VcfHeader};
pub use parser::{parse_vcf_string, Records, VcfReader};
pub use record::{InfoValue, VcfRecord};
pub use writer::VcfWriter;
