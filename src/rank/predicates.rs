//! Boolean classifiers over variant annotations
//!
//! Every predicate is a pure, total function of one record. Absent keys —
//! and present values of the wrong type — read as the documented default
//! below, so variants from sparsely annotated pipelines still classify.

use crate::vcf::VcfRecord;

/// VEP consequence category for the scored transcript
pub const INFO_CONSEQUENCE: &str = "vep_Consequence";
/// VEP impact category
pub const INFO_IMPACT: &str = "vep_IMPACT";
/// VEP gene symbol
pub const INFO_GENE_SYMBOL: &str = "vep_SYMBOL";
/// CADD phred-scaled pathogenicity score
pub const INFO_CADD: &str = "CADD_phred";
/// REVEL missense pathogenicity score
pub const INFO_REVEL: &str = "REVEL_score";
/// gnomAD loss-of-function intolerance score for the gene
pub const INFO_PLI: &str = "gnomAD_pLI";
/// gnomAD exome popmax allele frequency (preferred estimate)
pub const INFO_EXOME_AF: &str = "eAF_popmax";
/// gnomAD genome popmax allele frequency (fallback estimate)
pub const INFO_GENOME_AF: &str = "gAF_popmax";
/// TOPMed allele frequency (independent source)
pub const INFO_TOPMED_AF: &str = "TOPMed_AF";
/// Maximum SpliceAI delta score
pub const INFO_SPLICEAI: &str = "spliceAI_max";
/// Recessive-inheritance flag from the pedigree filter
pub const INFO_RECESSIVE: &str = "recessive";
/// X-linked-recessive flag from the pedigree filter
pub const INFO_X_RECESSIVE: &str = "x_recessive";
/// De novo call
pub const INFO_DENOVO: &str = "denovo";
/// High-quality de novo call
pub const INFO_HQ_DENOVO: &str = "hq_denovo";
/// PSAP popScore under the homozygous disease model
pub const INFO_PHOM: &str = "phom";
/// PSAP popScore under the compound-het disease model
pub const INFO_PCHET: &str = "pchet";
/// slivar compound-het link token(s)
pub const INFO_COMPHET: &str = "slivar_comphet";
/// Output: primary rank
pub const INFO_RANK: &str = "rank";
/// Output: secondary rank for compound-het halves
pub const INFO_COMPHET_RANK: &str = "comphet_rank";

/// Default for absent numeric scores and frequencies
pub const MISSING_SCORE: f64 = 0.0;
/// Default for absent categorical strings
pub const MISSING_CATEGORY: &str = ".";
/// Default for absent popScores. These are compared with `< threshold`, so
/// the default must fail the comparison, not pass it.
pub const MISSING_POPSCORE: f64 = 1.0;

/// Threshold constants for the ranking rules.
///
/// Observed versions of the rule set disagree on some of these (splice
/// threshold 0.2 vs 0.5, catch-all buckets), so they live in one struct
/// instead of being scattered as literals. The defaults are the refined set.
#[derive(Debug, Clone, PartialEq)]
pub struct RankThresholds {
    /// CADD phred at or above which a missense call is damaging
    pub cadd_damaging: f64,
    /// REVEL score at or above which a missense call is damaging
    pub revel_damaging: f64,
    /// SpliceAI delta at or above which splicing is considered damaged
    pub splice_damaging: f64,
    /// pLI at or above which the gene counts as constrained
    pub constrained_pli: f64,
    /// popmax frequency at or below which a variant is rare
    pub rare_popmax_af: f64,
    /// TOPMed frequency below which a variant is rare
    pub rare_topmed_af: f64,
    /// frequency ceiling for the recessive rules
    pub recessive_af: f64,
    /// low-frequency band for the moderate-evidence rule
    pub lowfreq_min_af: f64,
    pub lowfreq_max_af: f64,
    /// popScore below which the disease model is strong evidence
    pub popscore_strong: f64,
    /// popScore below which the disease model is weak evidence
    pub popscore_weak: f64,
}

impl Default for RankThresholds {
    fn default() -> Self {
        Self {
            cadd_damaging: 25.0,
            revel_damaging: 0.5,
            splice_damaging: 0.2,
            constrained_pli: 0.5,
            rare_popmax_af: 0.0001,
            rare_topmed_af: 0.001,
            recessive_af: 0.01,
            lowfreq_min_af: 0.0001,
            lowfreq_max_af: 0.001,
            popscore_strong: 0.002,
            popscore_weak: 0.05,
        }
    }
}

/// Preferred population frequency: the exome popmax estimate when present,
/// the genome estimate otherwise, 0.0 when neither annotator ran.
pub fn population_frequency(v: &VcfRecord) -> f64 {
    v.info_float(INFO_EXOME_AF)
        .or_else(|| v.info_float(INFO_GENOME_AF))
        .unwrap_or(MISSING_SCORE)
}

/// Rare in both the popmax and TOPMed estimates
pub fn is_rare(v: &VcfRecord, t: &RankThresholds) -> bool {
    let topmed = v.info_float(INFO_TOPMED_AF).unwrap_or(MISSING_SCORE);
    population_frequency(v) <= t.rare_popmax_af && topmed < t.rare_topmed_af
}

/// Missense consequence backed by a damaging CADD or REVEL score
pub fn is_damaging_missense(v: &VcfRecord, t: &RankThresholds) -> bool {
    let consequence = v.info_str(INFO_CONSEQUENCE).unwrap_or(MISSING_CATEGORY);
    if consequence != "missense_variant" {
        return false;
    }
    let cadd = v.info_float(INFO_CADD).unwrap_or(MISSING_SCORE);
    let revel = v.info_float(INFO_REVEL).unwrap_or(MISSING_SCORE);
    cadd >= t.cadd_damaging || revel >= t.revel_damaging
}

/// Likely gene-disrupting: VEP called the impact HIGH
pub fn is_loss_of_function(v: &VcfRecord) -> bool {
    v.info_str(INFO_IMPACT).unwrap_or(MISSING_CATEGORY) == "HIGH"
}

/// SpliceAI predicts splice disruption
pub fn is_splice_damaging(v: &VcfRecord, t: &RankThresholds) -> bool {
    v.info_float(INFO_SPLICEAI).unwrap_or(MISSING_SCORE) >= t.splice_damaging
}

/// The gene is intolerant to loss of function
pub fn is_constrained_gene(v: &VcfRecord, t: &RankThresholds) -> bool {
    v.info_float(INFO_PLI).unwrap_or(MISSING_SCORE) >= t.constrained_pli
}
