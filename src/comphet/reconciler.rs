//! Pairing and merging of compound-het halves
//!
//! Both halves of a compound het arrive as independent records, anywhere in
//! the stream, so the whole stream is buffered once: each link token files
//! its record under the token's pair id, and only groups that saw a second
//! sighting are emitted. A variant can complete several groups at once; it
//! is emitted exactly once, carrying the union of the tokens that matched.

use std::collections::HashMap;

use crate::error::TriageError;
use crate::rank::{INFO_COMPHET, INFO_COMPHET_RANK};
use crate::vcf::{InfoValue, VcfRecord};

use super::token::CompHetToken;

/// One sighting of a pair id: the record plus the token that filed it
struct Half {
    record: VcfRecord,
    token: String,
}

/// Up to two sightings of the same pair id. Complete once `second` is set.
struct PairGroup {
    first: Half,
    second: Option<Half>,
}

/// Streaming reconciliation of compound-het pairs
#[derive(Default)]
pub struct CompHetReconciler {
    groups: HashMap<String, PairGroup>,
    /// pair ids in first-seen order, so output is deterministic
    order: Vec<String>,
}

impl CompHetReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one record from the stream.
    ///
    /// Records without a `comphet_rank` annotation are not compound-het
    /// halves and are dropped. A record that carries the rank but no
    /// `slivar_comphet` token is a fatal input-format error: the upstream
    /// pairing step was evidently skipped.
    pub fn observe(&mut self, record: VcfRecord) -> Result<(), TriageError> {
        if !record.has_info(INFO_COMPHET_RANK) {
            return Ok(());
        }

        let tokens: Vec<String> = match record.info.get(INFO_COMPHET) {
            Some(InfoValue::String(s)) => vec![s.clone()],
            Some(InfoValue::StringArray(list)) => list.clone(),
            _ => {
                return Err(TriageError::MissingCompHetToken {
                    variant: record.variant_key(),
                })
            }
        };

        for raw in tokens {
            let token: CompHetToken = raw.parse()?;
            match self.groups.get_mut(&token.pair_id) {
                Some(group) => {
                    group.second = Some(Half {
                        record: record.clone(),
                        token: raw,
                    });
                }
                None => {
                    self.order.push(token.pair_id.clone());
                    self.groups.insert(
                        token.pair_id,
                        PairGroup {
                            first: Half {
                                record: record.clone(),
                                token: raw,
                            },
                            second: None,
                        },
                    );
                }
            }
        }

        Ok(())
    }

    /// Emit both members of every completed group.
    ///
    /// Output is deduplicated by variant identity; a variant in several
    /// completed groups appears once with its `slivar_comphet` field rewritten
    /// to the comma-joined union of the matching tokens. The union is sorted
    /// so the merged string does not depend on input record order. Unpaired
    /// halves are gone entirely.
    pub fn finish(mut self) -> Vec<VcfRecord> {
        let mut emitted: Vec<(VcfRecord, Vec<String>)> = Vec::new();
        let mut by_key: HashMap<String, usize> = HashMap::new();

        for pair_id in &self.order {
            let Some(group) = self.groups.remove(pair_id) else {
                continue;
            };
            let Some(second) = group.second else {
                continue; // never paired
            };

            for half in [group.first, second] {
                let key = half.record.variant_key();
                match by_key.get(&key) {
                    Some(&i) => emitted[i].1.push(half.token),
                    None => {
                        by_key.insert(key, emitted.len());
                        emitted.push((half.record, vec![half.token]));
                    }
                }
            }
        }

        emitted
            .into_iter()
            .map(|(mut record, mut tokens)| {
                tokens.sort();
                record.set_info(INFO_COMPHET, InfoValue::String(tokens.join(",")));
                record
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rank::INFO_PCHET;

    fn half(chrom: &str, pos: u64, tokens: &[&str]) -> VcfRecord {
        let token_value = if tokens.len() == 1 {
            InfoValue::String(tokens[0].to_string())
        } else {
            InfoValue::StringArray(tokens.iter().map(|t| t.to_string()).collect())
        };
        VcfRecord::snv(chrom, pos, 'A', 'G')
            .with_info(INFO_COMPHET_RANK, InfoValue::Float(3.0))
            .with_info(INFO_COMPHET, token_value)
            .with_info(INFO_PCHET, InfoValue::Float(0.001))
    }

    #[test]
    fn test_pairs_emitted_unpaired_dropped() {
        let mut reconciler = CompHetReconciler::new();
        reconciler
            .observe(half("chr1", 100, &["grpA/GENE1/pair7/h1"]))
            .unwrap();
        reconciler
            .observe(half("chr1", 200, &["grpA/GENE1/pair7/h2"]))
            .unwrap();
        reconciler
            .observe(half("chr1", 300, &["grpA/GENE1/pair9/h1"]))
            .unwrap();

        let out = reconciler.finish();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].pos, 100);
        assert_eq!(out[1].pos, 200);
        assert_eq!(out[0].info_str(INFO_COMPHET), Some("grpA/GENE1/pair7/h1"));
        assert_eq!(out[1].info_str(INFO_COMPHET), Some("grpA/GENE1/pair7/h2"));
    }

    #[test]
    fn test_records_without_comphet_rank_are_dropped() {
        let mut reconciler = CompHetReconciler::new();
        reconciler
            .observe(VcfRecord::snv("chr1", 100, 'A', 'G'))
            .unwrap();
        assert!(reconciler.finish().is_empty());
    }

    #[test]
    fn test_missing_token_is_fatal() {
        let mut reconciler = CompHetReconciler::new();
        let record = VcfRecord::snv("chr1", 100, 'A', 'G')
            .with_info(INFO_COMPHET_RANK, InfoValue::Float(3.0));
        let err = reconciler.observe(record).unwrap_err();
        assert!(matches!(err, TriageError::MissingCompHetToken { .. }));
    }

    #[test]
    fn test_malformed_token_is_fatal() {
        let mut reconciler = CompHetReconciler::new();
        let record = VcfRecord::snv("chr1", 100, 'A', 'G')
            .with_info(INFO_COMPHET_RANK, InfoValue::Float(3.0))
            .with_info(INFO_COMPHET, InfoValue::String("no-slashes".to_string()));
        let err = reconciler.observe(record).unwrap_err();
        assert!(matches!(err, TriageError::MalformedCompHetToken { .. }));
    }

    #[test]
    fn test_shared_variant_merges_tokens_and_emits_once() {
        // pos 200 participates in two pairs; both complete
        let mut reconciler = CompHetReconciler::new();
        reconciler
            .observe(half("chr2", 100, &["g/GENE2/pairA/h1"]))
            .unwrap();
        reconciler
            .observe(half(
                "chr2",
                200,
                &["g/GENE2/pairA/h2", "g/GENE2/pairB/h1"],
            ))
            .unwrap();
        reconciler
            .observe(half("chr2", 300, &["g/GENE2/pairB/h2"]))
            .unwrap();

        let out = reconciler.finish();
        assert_eq!(out.len(), 3);

        let shared = out.iter().find(|r| r.pos == 200).unwrap();
        assert_eq!(
            shared.info_str(INFO_COMPHET),
            Some("g/GENE2/pairA/h2,g/GENE2/pairB/h1")
        );
    }

    #[test]
    fn test_pairing_is_order_independent() {
        let records = [
            half("chr3", 10, &["g/G/p1/h1"]),
            half("chr3", 20, &["g/G/p1/h2"]),
            half("chr3", 30, &["g/G/p2/h1"]),
            half("chr3", 40, &["g/G/p2/h2"]),
            half("chr3", 50, &["g/G/p3/h1"]),
        ];

        let forward = {
            let mut r = CompHetReconciler::new();
            for rec in records.iter().cloned() {
                r.observe(rec).unwrap();
            }
            r.finish()
        };
        let reversed = {
            let mut r = CompHetReconciler::new();
            for rec in records.iter().rev().cloned() {
                r.observe(rec).unwrap();
            }
            r.finish()
        };

        let mut forward_lines: Vec<String> = forward.iter().map(|r| r.to_string()).collect();
        let mut reversed_lines: Vec<String> = reversed.iter().map(|r| r.to_string()).collect();
        forward_lines.sort();
        reversed_lines.sort();
        assert_eq!(forward_lines, reversed_lines);
        assert_eq!(forward.len(), 4); // p3 never completed
    }
}
