//! `psap-to-vcf` subcommand: lift PSAP popScores out of a report table

use std::collections::HashMap;
use std::io::{BufRead, Write};

use crate::error::TriageError;
use crate::rank::{INFO_PCHET, INFO_PHOM};
use crate::vcf::{InfoType, InfoValue, VcfHeader, VcfRecord, VcfWriter};
use crate::Result;

/// PSAP popScore under the dominant disease model
pub const INFO_PDOM: &str = "pdom";

/// popScores for one reported variant, one slot per disease model
#[derive(Debug, Default)]
struct PopScores {
    dominant: Option<f64>,
    homozygous: Option<f64>,
    comp_het: Option<f64>,
}

#[derive(Debug)]
struct ReportVariant {
    chrom: String,
    pos: u64,
    reference: String,
    alternate: String,
    scores: PopScores,
}

/// Convert a tab-separated PSAP report into a fresh VCF whose records carry
/// `pdom`/`phom`/`pchet` INFO scores for the named proband. The report lists
/// one row per (variant, disease model); rows for the same variant merge
/// into one record.
pub fn run_psap_to_vcf<R: BufRead, W: Write>(report: R, output: W, proband: &str) -> Result<()> {
    let mut lines = report.lines();
    let header_line = lines
        .next()
        .ok_or_else(|| TriageError::parse(1, "empty report"))??;
    let columns: Vec<&str> = header_line.split('\t').collect();

    let model_column = format!("Dz.Model.{}", proband);
    let score_column = format!("popScore.{}", proband);
    let model_idx = find_column(&columns, &model_column)?;
    let score_idx = find_column(&columns, &score_column)?;

    let mut variants: HashMap<String, ReportVariant> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for (i, line) in lines.enumerate() {
        let line_no = i + 2;
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() <= model_idx.max(score_idx) || fields.len() < 5 {
            return Err(TriageError::parse(line_no, "truncated report line"));
        }

        let model = fields[model_idx];
        if !matches!(model, "DOM-het" | "REC-hom" | "REC-chet") {
            continue;
        }
        let score: f64 = fields[score_idx].parse().map_err(|_| {
            TriageError::parse(
                line_no,
                format!("invalid popScore '{}'", fields[score_idx]),
            )
        })?;

        let pos: u64 = fields[1].parse().map_err(|_| {
            TriageError::parse(line_no, format!("invalid position '{}'", fields[1]))
        })?;

        let key = format!("{}-{}-{}-{}", fields[0], pos, fields[3], fields[4]);
        let entry = variants.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            ReportVariant {
                chrom: fields[0].to_string(),
                pos,
                reference: fields[3].to_string(),
                alternate: fields[4].to_string(),
                scores: PopScores::default(),
            }
        });
        match model {
            "DOM-het" => entry.scores.dominant = Some(score),
            "REC-hom" => entry.scores.homozygous = Some(score),
            "REC-chet" => entry.scores.comp_het = Some(score),
            _ => unreachable!(),
        }
    }

    let mut header = VcfHeader::new();
    header.add_info(INFO_PDOM, "1", InfoType::Float, "psap dominant popScore");
    header.add_info(INFO_PHOM, "1", InfoType::Float, "psap homozygous popScore");
    header.add_info(
        INFO_PCHET,
        "1",
        InfoType::Float,
        "psap compound het popScore",
    );

    let mut writer = VcfWriter::new(output, &header)?;
    for key in &order {
        let variant = &variants[key];
        let mut record = VcfRecord::new(
            variant.chrom.clone(),
            variant.pos,
            variant.reference.clone(),
            vec![variant.alternate.clone()],
        );
        if let Some(score) = variant.scores.dominant {
            record.set_info(INFO_PDOM, InfoValue::Float(score));
        }
        if let Some(score) = variant.scores.homozygous {
            record.set_info(INFO_PHOM, InfoValue::Float(score));
        }
        if let Some(score) = variant.scores.comp_het {
            record.set_info(INFO_PCHET, InfoValue::Float(score));
        }
        writer.write_record(&record)?;
    }
    writer.flush()
}

fn find_column(columns: &[&str], name: &str) -> Result<usize> {
    columns
        .iter()
        .position(|c| *c == name)
        .ok_or_else(|| TriageError::MissingReportColumn {
            column: name.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = "\
Chrom\tPos\tGene\tRef\tAlt\tDz.Model.kid1\tpopScore.kid1
chr1\t1000\tGENE1\tA\tG\tDOM-het\t0.004
chr1\t1000\tGENE1\tA\tG\tREC-hom\t0.0005
chr2\t2000\tGENE2\tC\tT\tREC-chet\t0.03
chr3\t3000\tGENE3\tG\tA\tnone\tNA
";

    #[test]
    fn test_scores_merge_per_variant() {
        let mut out = Vec::new();
        run_psap_to_vcf(REPORT.as_bytes(), &mut out, "kid1").unwrap();
        let text = String::from_utf8(out).unwrap();
        let data: Vec<&str> = text.lines().filter(|l| !l.starts_with('#')).collect();

        assert_eq!(data.len(), 2);
        assert!(data[0].starts_with("chr1\t1000\t.\tA\tG"));
        assert!(data[0].contains("pdom=0.004"));
        assert!(data[0].contains("phom=0.0005"));
        assert!(!data[0].contains("pchet"));
        assert!(data[1].contains("pchet=0.03"));
    }

    #[test]
    fn test_declares_score_fields() {
        let mut out = Vec::new();
        run_psap_to_vcf(REPORT.as_bytes(), &mut out, "kid1").unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("##INFO=<ID=pdom,Number=1,Type=Float,"));
        assert!(text.contains("##INFO=<ID=phom,Number=1,Type=Float,"));
        assert!(text.contains("##INFO=<ID=pchet,Number=1,Type=Float,"));
    }

    #[test]
    fn test_unknown_proband_aborts() {
        let mut out = Vec::new();
        let err = run_psap_to_vcf(REPORT.as_bytes(), &mut out, "nobody").unwrap_err();
        assert!(matches!(err, TriageError::MissingReportColumn { .. }));
    }
}
