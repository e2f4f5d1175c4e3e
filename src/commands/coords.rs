//! `coords` subcommand: stash coordinates in INFO before a liftover

use std::io::{BufRead, Write};

use crate::vcf::{InfoType, InfoValue, VcfReader, VcfWriter};
use crate::Result;

/// Copy each record's chromosome and position into `<label>_chr` /
/// `<label>_pos` INFO fields, so the original coordinates survive a later
/// liftover to another build.
pub fn run_coords<R: BufRead, W: Write>(input: R, output: W, label: &str) -> Result<()> {
    let mut reader = VcfReader::new(input)?;

    let chr_key = format!("{}_chr", label);
    let pos_key = format!("{}_pos", label);

    let mut header = reader.header().clone();
    header.add_info(
        &chr_key,
        "1",
        InfoType::String,
        &format!("chromosome from {}", label),
    );
    header.add_info(
        &pos_key,
        "1",
        InfoType::Integer,
        &format!("position from {}", label),
    );

    let mut writer = VcfWriter::new(output, &header)?;

    while let Some(mut record) = reader.read_record()? {
        let chrom = record.chrom.clone();
        let pos = record.pos;
        record.set_info(&chr_key, InfoValue::String(chrom));
        record.set_info(&pos_key, InfoValue::Integer(pos as i64));
        writer.write_record(&record)?;
    }
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coords_added() {
        let input = "\
##fileformat=VCFv4.2
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO
chr7\t117559590\t.\tG\tA\t.\tPASS\t.
";
        let mut out = Vec::new();
        run_coords(input.as_bytes(), &mut out, "hg19").unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("##INFO=<ID=hg19_chr,Number=1,Type=String,"));
        assert!(text.contains("##INFO=<ID=hg19_pos,Number=1,Type=Integer,"));
        assert!(text.contains("hg19_chr=chr7;hg19_pos=117559590"));
    }
}
