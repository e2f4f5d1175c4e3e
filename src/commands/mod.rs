//! Subcommand implementations
//!
//! Each subcommand is a function over generic `BufRead`/`Write` handles, so
//! the whole surface is unit-testable against in-memory buffers without
//! spawning the binary. The binary only parses arguments and opens streams.

mod combine;
mod comphet;
mod coords;
mod make_vcf;
mod psap;
mod pull_csq;
mod rank;

pub use combine::{run_combine_info, CombineOp};
pub use comphet::run_filter_comphet;
pub use coords::run_coords;
pub use make_vcf::run_make_vcf;
pub use psap::run_psap_to_vcf;
pub use pull_csq::run_pull_csq;
pub use rank::run_rank;

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::error::TriageError;

/// Open an input stream: `-` is stdin, `.gz` paths are decompressed
pub fn open_input(path: &Path) -> Result<Box<dyn BufRead>, TriageError> {
    if path.as_os_str() == "-" {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    let file = File::open(path).map_err(|e| TriageError::Io {
        msg: format!("failed to open {}: {}", path.display(), e),
    })?;
    if path.extension().and_then(|e| e.to_str()) == Some("gz") {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Open an output stream: None or `-` is stdout
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>, TriageError> {
    match path {
        Some(p) if p.as_os_str() != "-" => {
            let file = File::create(p).map_err(|e| TriageError::Io {
                msg: format!("failed to create {}: {}", p.display(), e),
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        _ => Ok(Box::new(BufWriter::new(io::stdout()))),
    }
}
