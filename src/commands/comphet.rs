//! `filter-comphet` subcommand: keep only completed compound-het pairs

use std::io::{BufRead, Write};

use crate::comphet::CompHetReconciler;
use crate::vcf::{VcfReader, VcfWriter};
use crate::Result;

/// Buffer the whole stream, reconstruct compound-het pairs, and re-emit only
/// the variants whose pair completed. This is the one command that cannot
/// stream record-by-record: halves are not adjacent in input order.
pub fn run_filter_comphet<R: BufRead, W: Write>(input: R, output: W) -> Result<()> {
    let mut reader = VcfReader::new(input)?;
    let header = reader.header().clone();

    let mut reconciler = CompHetReconciler::new();
    while let Some(record) = reader.read_record()? {
        reconciler.observe(record)?;
    }

    let mut writer = VcfWriter::new(output, &header)?;
    for record in reconciler.finish() {
        writer.write_record(&record)?;
    }
    writer.flush()
}
