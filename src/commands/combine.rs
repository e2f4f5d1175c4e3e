//! `combine-info` subcommand: derive one INFO field from several

use std::io::{BufRead, Write};
use std::str::FromStr;

use crate::error::TriageError;
use crate::vcf::{InfoType, InfoValue, VcfReader, VcfWriter};
use crate::Result;

/// How the source fields are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombineOp {
    Max,
    Min,
    Mean,
}

impl CombineOp {
    /// Suffix used in the derived field names (`<prefix>_max`, ...)
    pub fn suffix(self) -> &'static str {
        match self {
            CombineOp::Max => "max",
            CombineOp::Min => "min",
            CombineOp::Mean => "mean",
        }
    }
}

impl FromStr for CombineOp {
    type Err = TriageError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "max" => Ok(CombineOp::Max),
            "min" => Ok(CombineOp::Min),
            "mean" => Ok(CombineOp::Mean),
            other => Err(TriageError::UnknownOperator {
                operator: other.to_string(),
            }),
        }
    }
}

/// Combine the named numeric INFO fields into `<prefix>_<op>`, recording
/// which source won in `<prefix>_<op>_name` (the literal `mean` for means).
/// Records where none of the sources carry a numeric value pass through
/// unchanged.
pub fn run_combine_info<R: BufRead, W: Write>(
    input: R,
    output: W,
    op: CombineOp,
    prefix: &str,
    fields: &[String],
) -> Result<()> {
    let mut reader = VcfReader::new(input)?;

    let value_key = format!("{}_{}", prefix, op.suffix());
    let name_key = format!("{}_name", value_key);

    let mut header = reader.header().clone();
    header.add_info(
        &value_key,
        "1",
        InfoType::Float,
        &format!("{} {}", prefix, op.suffix()),
    );
    header.add_info(
        &name_key,
        "1",
        InfoType::String,
        &format!("which {} was the {}", prefix, op.suffix()),
    );

    let mut writer = VcfWriter::new(output, &header)?;

    while let Some(mut record) = reader.read_record()? {
        let present: Vec<(&str, f64)> = fields
            .iter()
            .filter_map(|f| record.info_float(f).map(|v| (f.as_str(), v)))
            .collect();

        if let Some((name, value)) = combine(&present, op) {
            record.set_info(&value_key, InfoValue::Float(value));
            record.set_info(&name_key, InfoValue::String(name));
        }
        writer.write_record(&record)?;
    }
    writer.flush()
}

/// Combine present values; ties keep the first-listed field
fn combine(present: &[(&str, f64)], op: CombineOp) -> Option<(String, f64)> {
    let (first, rest) = present.split_first()?;
    match op {
        CombineOp::Max => {
            let best = rest
                .iter()
                .fold(*first, |acc, &x| if x.1 > acc.1 { x } else { acc });
            Some((best.0.to_string(), best.1))
        }
        CombineOp::Min => {
            let best = rest
                .iter()
                .fold(*first, |acc, &x| if x.1 < acc.1 { x } else { acc });
            Some((best.0.to_string(), best.1))
        }
        CombineOp::Mean => {
            let total: f64 = present.iter().map(|(_, v)| v).sum();
            Some(("mean".to_string(), total / present.len() as f64))
        }
    }
}
