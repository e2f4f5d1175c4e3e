//! VCF header model
//!
//! The header serves three purposes here: it is replayed verbatim on output,
//! its `##INFO` declarations type the INFO values on read, and new output
//! fields must be declared through [`VcfHeader::add_info`] before the first
//! record is written.

use std::collections::BTreeMap;
use std::fmt;

/// Value type of an `##INFO` declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InfoType {
    Integer,
    Float,
    Flag,
    Character,
    #[default]
    String,
}

impl InfoType {
    fn parse(s: &str) -> Self {
        match s {
            "Integer" => InfoType::Integer,
            "Float" => InfoType::Float,
            "Flag" => InfoType::Flag,
            "Character" => InfoType::Character,
            _ => InfoType::String,
        }
    }
}

impl fmt::Display for InfoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InfoType::Integer => "Integer",
            InfoType::Float => "Float",
            InfoType::Flag => "Flag",
            InfoType::Character => "Character",
            InfoType::String => "String",
        };
        write!(f, "{}", s)
    }
}

/// One parsed `##INFO` declaration
#[derive(Debug, Clone, PartialEq)]
pub struct InfoDef {
    pub id: String,
    /// The Number field, kept as declared ("1", "A", ".", ...)
    pub number: String,
    pub ty: InfoType,
    pub description: String,
}

/// A parsed VCF header
#[derive(Debug, Clone, Default)]
pub struct VcfHeader {
    /// All `##` meta lines, in input order
    lines: Vec<String>,
    /// Parsed `##INFO` declarations by ID
    infos: BTreeMap<String, InfoDef>,
    /// Sample names from the `#CHROM` line
    samples: Vec<String>,
}

impl VcfHeader {
    /// A minimal header for VCFs this tool creates from scratch
    pub fn new() -> Self {
        let mut header = Self::default();
        header.push_meta("##fileformat=VCFv4.2");
        header
    }

    /// Record one `##` meta line, parsing it when it declares an INFO field
    pub(crate) fn push_meta(&mut self, line: &str) {
        if let Some(def) = parse_info_meta(line) {
            self.infos.insert(def.id.clone(), def);
        }
        self.lines.push(line.to_string());
    }

    /// Record the `#CHROM` column line, capturing sample names
    pub(crate) fn set_column_line(&mut self, line: &str) {
        let columns: Vec<&str> = line.split('\t').collect();
        // fixed columns are CHROM..INFO, then FORMAT, then one per sample
        if columns.len() > 9 {
            self.samples = columns[9..].iter().map(|s| s.to_string()).collect();
        }
    }

    /// Look up an INFO declaration by ID
    pub fn info(&self, id: &str) -> Option<&InfoDef> {
        self.infos.get(id)
    }

    /// Declare a new INFO field, to be written by this run.
    ///
    /// Re-declaring an existing ID updates the typing but does not emit a
    /// duplicate header line.
    pub fn add_info(&mut self, id: &str, number: &str, ty: InfoType, description: &str) {
        let fresh = !self.infos.contains_key(id);
        self.infos.insert(
            id.to_string(),
            InfoDef {
                id: id.to_string(),
                number: number.to_string(),
                ty,
                description: description.to_string(),
            },
        );
        if fresh {
            self.lines.push(format!(
                "##INFO=<ID={},Number={},Type={},Description=\"{}\">",
                id, number, ty, description
            ));
        }
    }

    /// Sample names declared on the `#CHROM` line
    pub fn samples(&self) -> &[String] {
        &self.samples
    }

    /// All `##` meta lines, in output order
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The `#CHROM` column line matching this header's samples
    pub fn column_line(&self) -> String {
        let mut line = String::from("#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO");
        if !self.samples.is_empty() {
            line.push_str("\tFORMAT");
            for sample in &self.samples {
                line.push('\t');
                line.push_str(sample);
            }
        }
        line
    }
}

/// Parse `##INFO=<ID=...,Number=...,Type=...,Description="...">`.
///
/// Returns None for any other meta line. Commas inside the quoted
/// Description (where VEP hides the CSQ field list) do not split fields.
fn parse_info_meta(line: &str) -> Option<InfoDef> {
    let body = line.strip_prefix("##INFO=<")?.strip_suffix('>')?;

    let mut def = InfoDef {
        id: String::new(),
        number: ".".to_string(),
        ty: InfoType::String,
        description: String::new(),
    };

    for field in split_quoted(body) {
        let (key, value) = field.split_once('=')?;
        match key {
            "ID" => def.id = value.to_string(),
            "Number" => def.number = value.to_string(),
            "Type" => def.ty = InfoType::parse(value),
            "Description" => {
                def.description = value.trim_matches('"').to_string();
            }
            _ => {}
        }
    }

    if def.id.is_empty() {
        None
    } else {
        Some(def)
    }
}

/// Split a meta-line body on commas, except inside double quotes
fn split_quoted(s: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    for c in s.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                current.push(c);
            }
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    if !current.is_empty() {
        fields.push(current);
    }
    fields
}
