//! Consequence severity and transcript-metadata tiers
//!
//! The consequence vocabulary and its ordering follow the Ensembl VEP
//! calculated-consequence table; the tier functions score the APPRIS and
//! transcript-support-level labels VEP attaches to each transcript.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// VEP consequence terms, most severe first. Unknown terms score 0.
static CONSEQUENCE_SEVERITY: Lazy<HashMap<&'static str, u32>> = Lazy::new(|| {
    [
        ("transcript_ablation", 36),
        ("splice_acceptor_variant", 35),
        ("splice_donor_variant", 34),
        ("stop_gained", 33),
        ("frameshift_variant", 32),
        ("stop_lost", 31),
        ("start_lost", 30),
        ("transcript_amplification", 29),
        ("inframe_insertion", 28),
        ("inframe_deletion", 27),
        ("missense_variant", 26),
        ("protein_altering_variant", 25),
        ("splice_region_variant", 24),
        ("incomplete_terminal_codon_variant", 23),
        ("start_retained_variant", 22),
        ("stop_retained_variant", 21),
        ("synonymous_variant", 20),
        ("coding_sequence_variant", 19),
        ("mature_miRNA_variant", 18),
        ("5_prime_UTR_variant", 17),
        ("3_prime_UTR_variant", 16),
        ("non_coding_transcript_exon_variant", 15),
        ("intron_variant", 14),
        ("NMD_transcript_variant", 13),
        ("non_coding_transcript_variant", 12),
        ("upstream_gene_variant", 11),
        ("downstream_gene_variant", 10),
        ("TFBS_ablation", 9),
        ("TFBS_amplification", 8),
        ("TF_binding_site_variant", 7),
        ("regulatory_region_ablation", 6),
        ("regulatory_region_amplification", 5),
        ("feature_elongation", 4),
        ("regulatory_region_variant", 3),
        ("feature_truncation", 2),
        ("intergenic_variant", 1),
    ]
    .into_iter()
    .collect()
});

/// Severity score of a consequence annotation.
///
/// A record can list several `&`-joined terms; only the first is scored,
/// since upstream convention places the most severe term first.
pub fn consequence_severity(annotation: &str) -> u32 {
    let first = annotation.split('&').next().unwrap_or(annotation);
    CONSEQUENCE_SEVERITY.get(first).copied().unwrap_or(0)
}

/// APPRIS principal-isoform tier. P1 is best; unranked scores 0.
pub fn appris_tier(label: &str) -> u32 {
    match label {
        "P1" => 7,
        "P2" => 6,
        "P3" => 5,
        "P4" => 4,
        "P5" => 3,
        "ALT1" => 2,
        "ALT2" => 1,
        _ => 0,
    }
}

/// Transcript support level tier. 1 is best; unranked scores 0.
pub fn tsl_tier(label: &str) -> u32 {
    match label {
        "1" => 6,
        "2" => 5,
        "3" => 4,
        "4" => 3,
        "5" => 2,
        "NA" => 1,
        _ => 0,
    }
}
