// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! ferro-triage CLI
//!
//! Command-line interface for variant prioritization, compound-het
//! filtering, and consequence extraction over annotated VCF streams.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use ferro_triage::commands::{
    open_input, open_output, run_combine_info, run_coords, run_filter_comphet, run_make_vcf,
    run_psap_to_vcf, run_pull_csq, run_rank, CombineOp,
};

#[derive(Parser)]
#[command(name = "ferro-triage")]
#[command(author, version, about = "Variant prioritization and compound-het filtering for annotated VCFs")]
#[command(
    long_about = "Triage annotated VCF streams for clinical review.

Examples:
  ferro-triage rank BRCA1 BRCA2 < annotated.vcf > ranked.vcf
  ferro-triage filter-comphet -i ranked.vcf.gz -o pairs.vcf
  ferro-triage pull-csq --extract SYMBOL,Consequence < vep.vcf
  ferro-triage combine-info --operator max --prefix splice DS_AG DS_AL DS_DG DS_DL"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write rank/comphet_rank INFO fields from the annotation hierarchy
    Rank {
        /// Gene symbols of a priori interest; rare damaging hits in them
        /// take the strongest rank
        risk_genes: Vec<String>,

        /// Input VCF (plain or .gz, use - for stdin)
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// Output VCF (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Keep only completed compound-het pairs, merging their link tokens
    FilterComphet {
        /// Input VCF (plain or .gz, use - for stdin)
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// Output VCF (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Pull representative transcript-consequence fields out of CSQ
    PullCsq {
        /// Comma-separated CSQ fields to extract
        #[arg(long, value_delimiter = ',', required = true)]
        extract: Vec<String>,

        /// Input VCF (plain or .gz, use - for stdin)
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// Output VCF (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Combine numeric INFO fields into a new field by max, min, or mean
    CombineInfo {
        /// How to combine the fields
        #[arg(long, value_parser = ["max", "min", "mean"])]
        operator: String,

        /// Prefix of the derived field names
        #[arg(long)]
        prefix: String,

        /// INFO fields to combine
        fields: Vec<String>,

        /// Input VCF (plain or .gz, use - for stdin)
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// Output VCF (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Record the current coordinates in INFO before a liftover
    Coords {
        /// Label of the coordinates, e.g. hg19 -> hg19_chr/hg19_pos
        #[arg(long)]
        label: String,

        /// Input VCF (plain or .gz, use - for stdin)
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// Output VCF (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Convert a PSAP report into a VCF of popScore INFO fields
    PsapToVcf {
        /// PSAP report table (tab-separated)
        #[arg(long)]
        report: PathBuf,

        /// Proband name used in the report's column headers
        #[arg(long)]
        proband: String,

        /// Output VCF (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build a minimal VCF from chrom-pos-ref-alt-sample lines
    MakeVcf {
        /// Input list (use - for stdin)
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// Output VCF (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> ferro_triage::Result<()> {
    match cli.command {
        Commands::Rank {
            risk_genes,
            input,
            output,
        } => run_rank(
            open_input(&input)?,
            open_output(output.as_deref())?,
            &risk_genes,
        ),
        Commands::FilterComphet { input, output } => {
            run_filter_comphet(open_input(&input)?, open_output(output.as_deref())?)
        }
        Commands::PullCsq {
            extract,
            input,
            output,
        } => run_pull_csq(
            open_input(&input)?,
            open_output(output.as_deref())?,
            &extract,
        ),
        Commands::CombineInfo {
            operator,
            prefix,
            fields,
            input,
            output,
        } => {
            let op: CombineOp = operator.parse()?;
            run_combine_info(
                open_input(&input)?,
                open_output(output.as_deref())?,
                op,
                &prefix,
                &fields,
            )
        }
        Commands::Coords {
            label,
            input,
            output,
        } => run_coords(
            open_input(&input)?,
            open_output(output.as_deref())?,
            &label,
        ),
        Commands::PsapToVcf {
            report,
            proband,
            output,
        } => run_psap_to_vcf(
            open_input(&report)?,
            open_output(output.as_deref())?,
            &proband,
        ),
        Commands::MakeVcf { input, output } => {
            run_make_vcf(open_input(&input)?, open_output(output.as_deref())?)
        }
    }
}
