//! Variant rank classification
//!
//! The predicate layer turns annotation fields into boolean evidence; the
//! classifier walks an ordered rule table over that evidence and writes the
//! `rank` and `comphet_rank` INFO fields.

mod classifier;
mod predicates;

pub use classifier::{Classifier, Rank};
pub use predicates::{
    is_constrained_gene, is_damaging_missense, is_loss_of_function, is_rare, is_splice_damaging,
    population_frequency, RankThresholds, INFO_CADD, INFO_COMPHET, INFO_COMPHET_RANK,
    INFO_CONSEQUENCE, INFO_DENOVO, INFO_EXOME_AF, INFO_GENE_SYMBOL, INFO_GENOME_AF, INFO_HQ_DENOVO,
    INFO_IMPACT, INFO_PCHET, INFO_PHOM, INFO_PLI, INFO_RANK, INFO_RECESSIVE, INFO_REVEL,
    INFO_SPLICEAI, INFO_TOPMED_AF, INFO_X_RECESSIVE, MISSING_CATEGORY, MISSING_POPSCORE,
    MISSING_SCORE,
};
