//! `make-vcf` subcommand: build a VCF from dashed variant identifiers

use std::io::{BufRead, Write};

use crate::error::TriageError;
use crate::vcf::{InfoType, InfoValue, VcfHeader, VcfRecord, VcfWriter};
use crate::Result;

/// Read `chrom-pos-ref-alt-sampleId` lines and emit a minimal VCF carrying
/// the sample id in a `sample` INFO field. Comment lines are skipped.
pub fn run_make_vcf<R: BufRead, W: Write>(input: R, output: W) -> Result<()> {
    let mut header = VcfHeader::new();
    header.add_info("sample", ".", InfoType::String, "samples");

    let mut writer = VcfWriter::new(output, &header)?;

    for (i, line) in input.lines().enumerate() {
        let line_no = i + 1;
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.contains('#') {
            continue;
        }

        let fields: Vec<&str> = trimmed.split('-').collect();
        if fields.len() < 5 {
            return Err(TriageError::parse(
                line_no,
                "expected chrom-pos-ref-alt-sample",
            ));
        }
        let pos: u64 = fields[1].parse().map_err(|_| {
            TriageError::parse(line_no, format!("invalid position '{}'", fields[1]))
        })?;

        let mut record = VcfRecord::new(
            fields[0].to_string(),
            pos,
            fields[2].to_string(),
            vec![fields[3].to_string()],
        );
        record.set_info("sample", InfoValue::String(fields[4].to_string()));
        writer.write_record(&record)?;
    }
    writer.flush()
}
