// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! ferro-triage: variant prioritization for annotated VCFs
//!
//! Part of the ferro bioinformatics toolkit.
//!
//! Takes VCF streams already annotated by upstream tools (VEP, gnomAD,
//! SpliceAI, slivar, PSAP) and triages them for clinical review: an ordered
//! rule hierarchy assigns each variant a severity rank, compound-het halves
//! are paired and the orphans discarded, and one representative transcript
//! consequence is chosen per variant.
//!
//! # Example
//!
//! ```
//! use ferro_triage::{Classifier, InfoValue, VcfRecord};
//!
//! // a rare loss-of-function variant in a constrained gene
//! let mut record = VcfRecord::snv("chr17", 43045712, 'T', 'C')
//!     .with_info("vep_IMPACT", InfoValue::String("HIGH".into()))
//!     .with_info("eAF_popmax", InfoValue::Float(0.00002))
//!     .with_info("TOPMed_AF", InfoValue::Float(0.0001))
//!     .with_info("gnomAD_pLI", InfoValue::Float(0.8));
//!
//! let classifier = Classifier::new(Vec::<String>::new());
//! classifier.annotate(&mut record);
//! assert_eq!(record.info_float("rank"), Some(2.0));
//! ```

pub mod commands;
pub mod comphet;
pub mod csq;
pub mod error;
pub mod rank;
pub mod vcf;

// Re-export commonly used types
pub use comphet::{CompHetReconciler, CompHetToken};
pub use csq::{select_representative, CsqRecord, CsqSchema, SelectionPolicy};
pub use error::TriageError;
pub use rank::{Classifier, Rank, RankThresholds};
pub use vcf::{parse_vcf_string, InfoType, InfoValue, VcfHeader, VcfReader, VcfRecord, VcfWriter};

/// Result type alias for ferro-triage operations
pub type Result<T> = std::result::Result<T, TriageError>;
