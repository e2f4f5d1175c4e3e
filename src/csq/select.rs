//! Representative-record selection
//!
//! A variant that overlaps many transcripts carries one CSQ record per
//! transcript; downstream consumers want one. Selection is a cascade of
//! guarded narrowing steps: each step scores the remaining candidates and
//! keeps the max-scorers. A step where every candidate scores alike narrows
//! nothing, so the cascade can never empty the set — the "keep the previous
//! set if a filter would reject everyone" fallback comes for free.

use super::schema::CsqRecord;
use super::severity::{appris_tier, consequence_severity, tsl_tier};

/// Which criterion leads the tie-break cascade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// Prefer the annotated canonical transcript, then transcript metadata,
    /// then consequence severity
    CanonicalFirst,
    /// Prefer the most severe consequence, then the canonical transcript and
    /// its metadata
    SeverityFirst,
}

fn canonical_score(record: &CsqRecord) -> u32 {
    (record.get("CANONICAL") == "YES") as u32
}

fn appris_score(record: &CsqRecord) -> u32 {
    appris_tier(record.get("APPRIS"))
}

fn tsl_score(record: &CsqRecord) -> u32 {
    tsl_tier(record.get("TSL"))
}

fn biotype_score(record: &CsqRecord) -> u32 {
    (record.get("BIOTYPE") == "protein_coding") as u32
}

fn severity_score(record: &CsqRecord) -> u32 {
    consequence_severity(record.get("Consequence"))
}

/// Keep only the max-scoring candidates, preserving input order
fn refine<'a>(
    candidates: Vec<&'a CsqRecord>,
    score: fn(&CsqRecord) -> u32,
) -> Vec<&'a CsqRecord> {
    let Some(max) = candidates.iter().map(|r| score(r)).max() else {
        return candidates;
    };
    candidates.into_iter().filter(|r| score(r) == max).collect()
}

/// Pick one representative record from a variant's CSQ set.
///
/// Returns None only for an empty input. Ties surviving every step resolve
/// to the first candidate in input order.
pub fn select_representative(
    records: &[CsqRecord],
    policy: SelectionPolicy,
) -> Option<&CsqRecord> {
    let steps: [fn(&CsqRecord) -> u32; 5] = match policy {
        SelectionPolicy::CanonicalFirst => [
            canonical_score,
            appris_score,
            tsl_score,
            biotype_score,
            severity_score,
        ],
        SelectionPolicy::SeverityFirst => [
            severity_score,
            canonical_score,
            appris_score,
            tsl_score,
            biotype_score,
        ],
    };

    let mut candidates: Vec<&CsqRecord> = records.iter().collect();
    for step in steps {
        if candidates.len() <= 1 {
            break;
        }
        candidates = refine(candidates, step);
    }
    candidates.into_iter().next()
}
