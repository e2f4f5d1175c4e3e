//! `rank` subcommand: write rank annotations onto every variant

use std::io::{BufRead, Write};

use crate::rank::{Classifier, INFO_COMPHET_RANK, INFO_RANK};
use crate::vcf::{InfoType, VcfReader, VcfWriter};
use crate::Result;

/// Classify every variant in the stream, writing `rank` and `comphet_rank`
/// INFO fields. Unmatched variants pass through without a rank — the absence
/// is itself the "not prioritized" signal.
pub fn run_rank<R: BufRead, W: Write>(input: R, output: W, risk_genes: &[String]) -> Result<()> {
    let mut reader = VcfReader::new(input)?;

    let mut header = reader.header().clone();
    header.add_info(INFO_RANK, "1", InfoType::Float, "variant classification");
    header.add_info(
        INFO_COMPHET_RANK,
        "1",
        InfoType::Float,
        "variant classification for half of a compound het",
    );

    let mut writer = VcfWriter::new(output, &header)?;
    let classifier = Classifier::new(risk_genes.iter().cloned());

    while let Some(mut record) = reader.read_record()? {
        classifier.annotate(&mut record);
        writer.write_record(&record)?;
    }
    writer.flush()
}
