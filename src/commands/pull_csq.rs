//! `pull-csq` subcommand: promote representative CSQ fields to INFO

use std::io::{BufRead, Write};

use crate::csq::{select_representative, CsqRecord, CsqSchema, SelectionPolicy, INFO_CSQ};
use crate::vcf::{InfoType, InfoValue, VcfReader, VcfWriter};
use crate::Result;

/// For every requested CSQ field, write the canonical-first representative's
/// value under `canonical_<field>` and the severity-first representative's
/// under `<field>`. Records without a CSQ annotation pass through untouched;
/// a header without the CSQ declaration aborts the run.
pub fn run_pull_csq<R: BufRead, W: Write>(
    input: R,
    output: W,
    fields: &[String],
) -> Result<()> {
    let mut reader = VcfReader::new(input)?;
    let schema = CsqSchema::from_header(reader.header())?;

    let mut header = reader.header().clone();
    for field in fields {
        header.add_info(
            &format!("canonical_{}", field),
            "1",
            InfoType::String,
            &format!("canonical {} pulled from CSQ", field),
        );
        header.add_info(
            field,
            "1",
            InfoType::String,
            &format!("most severe {} pulled from CSQ", field),
        );
    }

    let mut writer = VcfWriter::new(output, &header)?;

    while let Some(mut record) = reader.read_record()? {
        let entries: Vec<String> = match record.info_string_list(INFO_CSQ) {
            Some(entries) => entries.iter().map(|e| e.to_string()).collect(),
            None => {
                writer.write_record(&record)?;
                continue;
            }
        };

        let parsed: Vec<CsqRecord> = entries.iter().map(|e| schema.parse(e)).collect();
        let canonical = select_representative(&parsed, SelectionPolicy::CanonicalFirst).cloned();
        let severe = select_representative(&parsed, SelectionPolicy::SeverityFirst).cloned();

        for field in fields {
            if let Some(rep) = &canonical {
                let value = rep.get(field);
                if !value.is_empty() {
                    record.set_info(
                        &format!("canonical_{}", field),
                        InfoValue::String(value.to_string()),
                    );
                }
            }
            if let Some(rep) = &severe {
                let value = rep.get(field);
                if !value.is_empty() {
                    record.set_info(field, InfoValue::String(value.to_string()));
                }
            }
        }
        writer.write_record(&record)?;
    }
    writer.flush()
}
