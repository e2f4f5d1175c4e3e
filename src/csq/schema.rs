//! CSQ schema and per-transcript records
//!
//! VEP declares the layout of its per-transcript annotation once, in the CSQ
//! INFO description (`... Format: Allele|Consequence|SYMBOL|...`). The
//! schema is parsed from the header once per run and shared read-only; each
//! pipe-delimited CSQ entry is then materialized into a key/value record.

use std::collections::HashMap;

use crate::error::TriageError;
use crate::vcf::VcfHeader;

/// INFO field carrying VEP's per-transcript annotations
pub const INFO_CSQ: &str = "CSQ";

/// Field layout of the CSQ annotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsqSchema {
    keys: Vec<String>,
}

impl CsqSchema {
    /// Extract the schema from the header's CSQ declaration.
    ///
    /// Missing declaration or a description without a `Format: ` list is a
    /// fatal error: consequence extraction cannot proceed without it.
    pub fn from_header(header: &VcfHeader) -> Result<Self, TriageError> {
        let def = header.info(INFO_CSQ).ok_or(TriageError::MissingCsqSchema)?;
        let format = def
            .description
            .split("Format: ")
            .nth(1)
            .ok_or_else(|| TriageError::MalformedCsqSchema {
                description: def.description.clone(),
            })?;

        let keys: Vec<String> = format
            .trim_end()
            .trim_end_matches('"')
            .split('|')
            .map(|k| k.trim().to_string())
            .collect();

        Ok(Self { keys })
    }

    /// Build a schema directly from field names (tests, non-VCF callers)
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// The declared field names, in pipe order
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Parse one pipe-delimited CSQ entry.
    ///
    /// Entries shorter than the schema leave trailing keys empty; extra
    /// trailing values are ignored.
    pub fn parse(&self, entry: &str) -> CsqRecord {
        let mut parts = entry.split('|');
        let values = self
            .keys
            .iter()
            .map(|key| (key.clone(), parts.next().unwrap_or("").to_string()))
            .collect();
        CsqRecord { values }
    }
}

/// One transcript-consequence record
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CsqRecord {
    values: HashMap<String, String>,
}

impl CsqRecord {
    /// Value for a schema key; "" when the key is absent or empty
    pub fn get(&self, key: &str) -> &str {
        self.values.get(key).map(String::as_str).unwrap_or("")
    }
}
