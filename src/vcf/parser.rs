//! VCF stream parsing
//!
//! Reads records from any `BufRead`, typing INFO values through the header's
//! `##INFO` declarations. Values that fail to parse as their declared type
//! degrade to raw strings — downstream accessors then treat them as absent,
//! which is the tolerance the predicates rely on.

use std::io::BufRead;

use crate::error::TriageError;

use super::header::{InfoType, VcfHeader};
use super::record::{InfoValue, VcfRecord};

/// VCF reader that yields [`VcfRecord`] instances
#[derive(Debug)]
pub struct VcfReader<R> {
    inner: R,
    header: VcfHeader,
    line: usize,
}

impl<R: BufRead> VcfReader<R> {
    /// Create a reader, consuming the header up to and including `#CHROM`
    pub fn new(mut inner: R) -> Result<Self, TriageError> {
        let mut header = VcfHeader::default();
        let mut line = String::new();
        let mut line_no = 0usize;

        loop {
            line.clear();
            let n = inner.read_line(&mut line)?;
            if n == 0 {
                return Err(TriageError::parse(line_no, "missing #CHROM header line"));
            }
            line_no += 1;

            let trimmed = line.trim_end_matches(['\r', '\n']);
            if trimmed.starts_with("##") {
                header.push_meta(trimmed);
            } else if trimmed.starts_with('#') {
                header.set_column_line(trimmed);
                break;
            } else {
                return Err(TriageError::parse(
                    line_no,
                    "data line before the #CHROM header line",
                ));
            }
        }

        Ok(Self {
            inner,
            header,
            line: line_no,
        })
    }

    /// Get a reference to the parsed header
    pub fn header(&self) -> &VcfHeader {
        &self.header
    }

    /// Read the next VCF record, or None at end of stream
    pub fn read_record(&mut self) -> Result<Option<VcfRecord>, TriageError> {
        let mut line = String::new();
        loop {
            line.clear();
            let n = self.inner.read_line(&mut line)?;
            if n == 0 {
                return Ok(None);
            }
            self.line += 1;

            let trimmed = line.trim_end_matches(['\r', '\n']);
            if trimmed.is_empty() {
                continue;
            }
            return parse_record_line(trimmed, &self.header, self.line).map(Some);
        }
    }

    /// Iterate over all records in the stream
    pub fn records(self) -> Records<R> {
        Records {
            reader: self,
            done: false,
        }
    }
}

/// Iterator over VCF records
pub struct Records<R> {
    reader: VcfReader<R>,
    done: bool,
}

impl<R: BufRead> Iterator for Records<R> {
    type Item = Result<VcfRecord, TriageError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.reader.read_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Parse VCF content from a string (convenience for tests and small inputs)
pub fn parse_vcf_string(content: &str) -> Result<VcfReader<&[u8]>, TriageError> {
    VcfReader::new(content.as_bytes())
}

/// Parse one tab-separated VCF data line
fn parse_record_line(
    line: &str,
    header: &VcfHeader,
    line_no: usize,
) -> Result<VcfRecord, TriageError> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < 5 {
        return Err(TriageError::parse(
            line_no,
            format!("expected at least 5 columns, got {}", fields.len()),
        ));
    }

    let pos: u64 = fields[1].parse().map_err(|_| {
        TriageError::parse(
            line_no,
            format!("invalid position '{}': not a valid integer", fields[1]),
        )
    })?;

    let mut record = VcfRecord::new(
        fields[0].to_string(),
        pos,
        fields[3].to_string(),
        fields[4].split(',').map(|s| s.to_string()).collect(),
    );

    if fields[2] != "." {
        record.id = Some(fields[2].to_string());
    }
    if let Some(qual) = fields.get(5) {
        if *qual != "." {
            record.quality = qual.parse().ok();
        }
    }
    if let Some(filter) = fields.get(6) {
        if *filter != "." {
            record.filter = Some(filter.to_string());
        }
    }
    if let Some(info) = fields.get(7) {
        if *info != "." {
            for pair in info.split(';').filter(|p| !p.is_empty()) {
                match pair.split_once('=') {
                    None => record.set_info(pair, InfoValue::Flag),
                    Some((key, value)) => {
                        record.set_info(key, typed_info_value(key, value, header));
                    }
                }
            }
        }
    }
    if let Some(format) = fields.get(8) {
        record.format = Some(format.to_string());
        record.samples = fields[9..].iter().map(|s| s.to_string()).collect();
    }

    Ok(record)
}

/// Type an INFO value through its header declaration.
///
/// Undeclared keys and string-typed keys keep string shape; comma-separated
/// values become arrays, matching how multi-valued annotations (CSQ entries,
/// slivar link tokens) arrive.
fn typed_info_value(key: &str, value: &str, header: &VcfHeader) -> InfoValue {
    let ty = header.info(key).map(|def| def.ty).unwrap_or_default();

    match ty {
        InfoType::Integer => {
            if value.contains(',') {
                match value.split(',').map(str::parse).collect() {
                    Ok(ints) => InfoValue::IntegerArray(ints),
                    Err(_) => degrade(key, value, ty),
                }
            } else {
                match value.parse() {
                    Ok(int) => InfoValue::Integer(int),
                    Err(_) => degrade(key, value, ty),
                }
            }
        }
        InfoType::Float => {
            if value.contains(',') {
                match value.split(',').map(str::parse).collect() {
                    Ok(floats) => InfoValue::FloatArray(floats),
                    Err(_) => degrade(key, value, ty),
                }
            } else {
                match value.parse() {
                    Ok(float) => InfoValue::Float(float),
                    Err(_) => degrade(key, value, ty),
                }
            }
        }
        InfoType::Flag => InfoValue::Flag,
        InfoType::Character | InfoType::String => string_info_value(value),
    }
}

fn string_info_value(value: &str) -> InfoValue {
    if value.contains(',') {
        InfoValue::StringArray(value.split(',').map(|s| s.to_string()).collect())
    } else {
        InfoValue::String(value.to_string())
    }
}

fn degrade(key: &str, value: &str, ty: InfoType) -> InfoValue {
    log::warn!("INFO {}='{}' does not parse as {}; keeping raw string", key, value, ty);
    string_info_value(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL_VCF: &str = "\
##fileformat=VCFv4.2
##contig=<ID=chr1,length=249250621>
##INFO=<ID=DP,Number=1,Type=Integer,Description=\"Total Depth\">
##INFO=<ID=eAF_popmax,Number=1,Type=Float,Description=\"exome popmax AF\">
##INFO=<ID=recessive,Number=0,Type=Flag,Description=\"fits recessive inheritance\">
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO
chr1\t12345\trs123\tA\tG\t30\tPASS\tDP=100;eAF_popmax=0.00005
chr1\t12346\t.\tAT\tA\t20\t.\trecessive
chr1\t12347\t.\tA\tG,T\t40\tPASS\t.
";

    #[test]
    fn test_read_records() {
        let mut reader = parse_vcf_string(MINIMAL_VCF).unwrap();

        let record1 = reader.read_record().unwrap().unwrap();
        assert_eq!(record1.chrom, "chr1");
        assert_eq!(record1.pos, 12345);
        assert_eq!(record1.id, Some("rs123".to_string()));
        assert_eq!(record1.info_float("DP"), Some(100.0));
        assert_eq!(record1.info_float("eAF_popmax"), Some(0.00005));

        let record2 = reader.read_record().unwrap().unwrap();
        assert!(record2.id.is_none());
        assert!(record2.filter.is_none());
        assert!(record2.has_info("recessive"));

        let record3 = reader.read_record().unwrap().unwrap();
        assert_eq!(record3.alternate, vec!["G", "T"]);
        assert!(record3.info.is_empty());

        assert!(reader.read_record().unwrap().is_none());
    }

    #[test]
    fn test_records_iterator() {
        let reader = parse_vcf_string(MINIMAL_VCF).unwrap();
        let records: Vec<_> = reader.records().collect();
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.is_ok()));
    }

    #[test]
    fn test_untyped_info_is_string() {
        let content = "\
##fileformat=VCFv4.2
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO
chr1\t1\t.\tA\tG\t.\t.\tmystery=hello;multi=a,b
";
        let mut reader = parse_vcf_string(content).unwrap();
        let record = reader.read_record().unwrap().unwrap();
        assert_eq!(record.info_str("mystery"), Some("hello"));
        assert_eq!(record.info_string_list("multi"), Some(vec!["a", "b"]));
    }

    #[test]
    fn test_mistyped_value_degrades_to_string() {
        let content = "\
##fileformat=VCFv4.2
##INFO=<ID=score,Number=1,Type=Float,Description=\"a score\">
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO
chr1\t1\t.\tA\tG\t.\t.\tscore=not-a-number
";
        let mut reader = parse_vcf_string(content).unwrap();
        let record = reader.read_record().unwrap().unwrap();
        // wrong shape is preserved, and the float accessor reads it as absent
        assert_eq!(record.info_float("score"), None);
        assert_eq!(record.info_str("score"), Some("not-a-number"));
    }

    #[test]
    fn test_samples_pass_through() {
        let content = "\
##fileformat=VCFv4.2
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\ts1\ts2
chr1\t1\t.\tA\tG\t.\t.\t.\tGT:DP\t0/1:10\t1/1:7
";
        let mut reader = parse_vcf_string(content).unwrap();
        assert_eq!(reader.header().samples(), &["s1", "s2"]);
        let record = reader.read_record().unwrap().unwrap();
        assert_eq!(record.format.as_deref(), Some("GT:DP"));
        assert_eq!(record.samples, vec!["0/1:10", "1/1:7"]);
    }

    #[test]
    fn test_missing_header_is_fatal() {
        let err = parse_vcf_string("chr1\t1\t.\tA\tG\t.\t.\t.\n").unwrap_err();
        assert!(matches!(err, TriageError::Parse { .. }));
    }

    #[test]
    fn test_truncated_line_is_fatal() {
        let content = "\
##fileformat=VCFv4.2
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO
chr1\t1\t.
";
        let mut reader = parse_vcf_string(content).unwrap();
        assert!(reader.read_record().is_err());
    }
}
