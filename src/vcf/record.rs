//! VCF record representation
//!
//! A variant is its coordinate/allele identity plus a typed, named annotation
//! map (the INFO column). Everything this tool does — ranking, pairing,
//! consequence selection — reads and writes that map; the rest of the record
//! is carried through untouched.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single VCF record representing one variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VcfRecord {
    /// Chromosome name (e.g., "chr1", "1", "X", "chrM")
    pub chrom: String,

    /// 1-based position of the first base in the reference allele
    pub pos: u64,

    /// Variant identifier (e.g., rsID), None if "."
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Reference allele
    pub reference: String,

    /// Alternate allele(s)
    pub alternate: Vec<String>,

    /// Phred-scaled quality score, None if "."
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<f32>,

    /// Filter column, None if "."
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,

    /// INFO field key-value pairs, ordered so output is deterministic
    #[serde(default)]
    pub info: BTreeMap<String, InfoValue>,

    /// FORMAT field specification (e.g., "GT:DP:GQ"), passed through verbatim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Raw per-sample columns, passed through verbatim
    #[serde(default)]
    pub samples: Vec<String>,
}

/// INFO field value types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InfoValue {
    /// Flag (presence indicates true)
    Flag,
    /// Integer value
    Integer(i64),
    /// Float value
    Float(f64),
    /// String value
    String(String),
    /// Multiple integer values
    IntegerArray(Vec<i64>),
    /// Multiple float values
    FloatArray(Vec<f64>),
    /// Multiple string values
    StringArray(Vec<String>),
}

impl fmt::Display for InfoValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InfoValue::Flag => Ok(()),
            InfoValue::Integer(v) => write!(f, "{}", v),
            InfoValue::Float(v) => write!(f, "{}", v),
            InfoValue::String(v) => write!(f, "{}", v),
            InfoValue::IntegerArray(v) => {
                let s: Vec<_> = v.iter().map(|x| x.to_string()).collect();
                write!(f, "{}", s.join(","))
            }
            InfoValue::FloatArray(v) => {
                let s: Vec<_> = v.iter().map(|x| x.to_string()).collect();
                write!(f, "{}", s.join(","))
            }
            InfoValue::StringArray(v) => write!(f, "{}", v.join(",")),
        }
    }
}

impl VcfRecord {
    /// Create a new VCF record with minimal required fields
    pub fn new(chrom: String, pos: u64, reference: String, alternate: Vec<String>) -> Self {
        Self {
            chrom,
            pos,
            id: None,
            reference,
            alternate,
            quality: None,
            filter: None,
            info: BTreeMap::new(),
            format: None,
            samples: Vec::new(),
        }
    }

    /// Create a VCF record for a SNV (single nucleotide variant)
    pub fn snv(chrom: &str, pos: u64, reference: char, alternate: char) -> Self {
        Self::new(
            chrom.to_string(),
            pos,
            reference.to_string(),
            vec![alternate.to_string()],
        )
    }

    /// Add an INFO field
    pub fn with_info(mut self, key: &str, value: InfoValue) -> Self {
        self.info.insert(key.to_string(), value);
        self
    }

    /// Set the variant ID (e.g., rsID)
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// Identity key over coordinates and alleles: `chrom-pos-ref-alt`.
    ///
    /// Compound-het output is deduplicated by this key, because the same
    /// physical variant can complete several pair groups.
    pub fn variant_key(&self) -> String {
        format!(
            "{}-{}-{}-{}",
            self.chrom,
            self.pos,
            self.reference,
            self.alternate.first().map(String::as_str).unwrap_or(".")
        )
    }

    /// Insert or overwrite an INFO field
    pub fn set_info(&mut self, key: &str, value: InfoValue) {
        self.info.insert(key.to_string(), value);
    }

    /// Whether the INFO map carries the key at all, regardless of its type
    pub fn has_info(&self, key: &str) -> bool {
        self.info.contains_key(key)
    }

    /// Numeric INFO lookup. Integers widen to float; any other shape
    /// (including a present-but-string value) reads as absent.
    pub fn info_float(&self, key: &str) -> Option<f64> {
        match self.info.get(key) {
            Some(InfoValue::Float(v)) => Some(*v),
            Some(InfoValue::Integer(v)) => Some(*v as f64),
            _ => None,
        }
    }

    /// String INFO lookup; non-string shapes read as absent.
    pub fn info_str(&self, key: &str) -> Option<&str> {
        match self.info.get(key) {
            Some(InfoValue::String(v)) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Multi-valued string INFO lookup. A scalar string reads as a
    /// one-element list; non-string shapes read as absent.
    pub fn info_string_list(&self, key: &str) -> Option<Vec<&str>> {
        match self.info.get(key) {
            Some(InfoValue::String(v)) => Some(vec![v.as_str()]),
            Some(InfoValue::StringArray(v)) => Some(v.iter().map(String::as_str).collect()),
            _ => None,
        }
    }

    /// Check if the variant passes all filters
    pub fn passes_filters(&self) -> bool {
        self.filter.is_none() || self.filter.as_deref() == Some("PASS")
    }
}

impl fmt::Display for VcfRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.chrom,
            self.pos,
            self.id.as_deref().unwrap_or("."),
            self.reference,
            self.alternate.join(","),
            self.quality.map_or(".".to_string(), |q| q.to_string()),
            self.filter.as_deref().unwrap_or("."),
        )?;

        if self.info.is_empty() {
            write!(f, "\t.")?;
        } else {
            let info_str: Vec<String> = self
                .info
                .iter()
                .map(|(k, v)| {
                    if matches!(v, InfoValue::Flag) {
                        k.clone()
                    } else {
                        format!("{}={}", k, v)
                    }
                })
                .collect();
            write!(f, "\t{}", info_str.join(";"))?;
        }

        if let Some(format) = &self.format {
            write!(f, "\t{}", format)?;
            for sample in &self.samples {
                write!(f, "\t{}", sample)?;
            }
        }

        Ok(())
    }
}
