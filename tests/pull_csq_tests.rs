//! End-to-end tests for the pull-csq subcommand

use ferro_triage::commands::run_pull_csq;
use ferro_triage::TriageError;
use rstest::rstest;

const HEADER: &str = "\
##fileformat=VCFv4.2
##INFO=<ID=CSQ,Number=.,Type=String,Description=\"Consequence annotations from Ensembl VEP. Format: Allele|Consequence|SYMBOL|Feature|CANONICAL|APPRIS|TSL|BIOTYPE\">
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO
";

fn pull(csq_entries: &[&str], fields: &[&str]) -> Vec<String> {
    let input = format!(
        "{}chr1\t100\t.\tA\tG\t.\t.\tCSQ={}\n",
        HEADER,
        csq_entries.join(",")
    );
    let fields: Vec<String> = fields.iter().map(|f| f.to_string()).collect();

    let mut out = Vec::new();
    run_pull_csq(input.as_bytes(), &mut out, &fields).unwrap();
    let text = String::from_utf8(out).unwrap();

    let data_line = text
        .lines()
        .find(|l| !l.starts_with('#'))
        .expect("one data line")
        .to_string();
    data_line
        .split('\t')
        .nth(7)
        .unwrap()
        .split(';')
        .map(|s| s.to_string())
        .collect()
}

fn value_of<'a>(tokens: &'a [String], key: &str) -> Option<&'a str> {
    let prefix = format!("{}=", key);
    tokens.iter().find_map(|t| t.strip_prefix(prefix.as_str()))
}

#[test]
fn test_canonical_and_severe_policies_diverge() {
    // canonical transcript carries the milder consequence
    let tokens = pull(
        &[
            "G|missense_variant|GENE|tx1|YES|P1|1|protein_coding",
            "G|stop_gained|GENE|tx2|||||",
        ],
        &["Feature", "Consequence"],
    );

    assert_eq!(value_of(&tokens, "canonical_Feature"), Some("tx1"));
    assert_eq!(
        value_of(&tokens, "canonical_Consequence"),
        Some("missense_variant")
    );
    assert_eq!(value_of(&tokens, "Feature"), Some("tx2"));
    assert_eq!(value_of(&tokens, "Consequence"), Some("stop_gained"));
}

#[test]
fn test_unique_canonical_wins_whatever_else_is_set() {
    let tokens = pull(
        &[
            "G|transcript_ablation|GENE|tx1||P1|1|protein_coding",
            "G|intergenic_variant|GENE|tx2|YES||NA|processed_transcript",
            "G|stop_gained|GENE|tx3||P2|2|protein_coding",
        ],
        &["Feature"],
    );
    assert_eq!(value_of(&tokens, "canonical_Feature"), Some("tx2"));
}

#[rstest]
#[case::appris_breaks_tie(
    &[
        "G|missense_variant|GENE|tx1||P3|1|protein_coding",
        "G|missense_variant|GENE|tx2||P1|1|protein_coding",
    ],
    "tx2"
)]
#[case::tsl_after_appris(
    &[
        "G|missense_variant|GENE|tx1||P1|5|protein_coding",
        "G|missense_variant|GENE|tx2||P1|1|protein_coding",
    ],
    "tx2"
)]
#[case::biotype_after_tsl(
    &[
        "G|missense_variant|GENE|tx1||P1|1|retained_intron",
        "G|missense_variant|GENE|tx2||P1|1|protein_coding",
    ],
    "tx2"
)]
#[case::input_order_breaks_full_tie(
    &[
        "G|missense_variant|GENE|tx1|YES|P1|1|protein_coding",
        "G|missense_variant|GENE|tx2|YES|P1|1|protein_coding",
    ],
    "tx1"
)]
fn test_canonical_first_cascade(#[case] entries: &[&str], #[case] expected: &str) {
    let tokens = pull(entries, &["Feature"]);
    assert_eq!(value_of(&tokens, "canonical_Feature"), Some(expected));
}

#[test]
fn test_empty_field_values_are_not_written() {
    let tokens = pull(&["G|missense_variant||tx1|YES|P1|1|protein_coding"], &["SYMBOL"]);
    assert_eq!(value_of(&tokens, "canonical_SYMBOL"), None);
    assert_eq!(value_of(&tokens, "SYMBOL"), None);
}

#[test]
fn test_record_without_csq_passes_through() {
    let input = format!("{}chr1\t100\t.\tA\tG\t.\t.\t.\n", HEADER);
    let mut out = Vec::new();
    run_pull_csq(input.as_bytes(), &mut out, &["SYMBOL".to_string()]).unwrap();
    let text = String::from_utf8(out).unwrap();
    let data: Vec<&str> = text.lines().filter(|l| !l.starts_with('#')).collect();
    assert_eq!(data, vec!["chr1\t100\t.\tA\tG\t.\t.\t."]);
}

#[test]
fn test_missing_csq_declaration_is_fatal() {
    let input = "\
##fileformat=VCFv4.2
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO
chr1\t100\t.\tA\tG\t.\t.\t.
";
    let mut out = Vec::new();
    let err = run_pull_csq(input.as_bytes(), &mut out, &["SYMBOL".to_string()]).unwrap_err();
    assert_eq!(err, TriageError::MissingCsqSchema);
}
