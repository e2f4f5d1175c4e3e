//! End-to-end tests for the rank subcommand
//!
//! Each case drives a full VCF stream through `run_rank` and inspects the
//! emitted INFO column, so header declaration, INFO typing, classification,
//! and re-serialization are all exercised together.

use ferro_triage::commands::run_rank;
use rstest::rstest;

const HEADER: &str = "\
##fileformat=VCFv4.2
##INFO=<ID=vep_Consequence,Number=1,Type=String,Description=\"VEP consequence\">
##INFO=<ID=vep_IMPACT,Number=1,Type=String,Description=\"VEP impact\">
##INFO=<ID=vep_SYMBOL,Number=1,Type=String,Description=\"VEP gene symbol\">
##INFO=<ID=CADD_phred,Number=1,Type=Float,Description=\"CADD phred score\">
##INFO=<ID=REVEL_score,Number=1,Type=Float,Description=\"REVEL score\">
##INFO=<ID=gnomAD_pLI,Number=1,Type=Float,Description=\"gnomAD pLI\">
##INFO=<ID=eAF_popmax,Number=1,Type=Float,Description=\"gnomAD exome popmax AF\">
##INFO=<ID=gAF_popmax,Number=1,Type=Float,Description=\"gnomAD genome popmax AF\">
##INFO=<ID=TOPMed_AF,Number=1,Type=Float,Description=\"TOPMed AF\">
##INFO=<ID=spliceAI_max,Number=1,Type=Float,Description=\"max SpliceAI delta\">
##INFO=<ID=phom,Number=1,Type=Float,Description=\"psap homozygous popScore\">
##INFO=<ID=pchet,Number=1,Type=Float,Description=\"psap compound het popScore\">
##INFO=<ID=denovo,Number=1,Type=String,Description=\"de novo call\">
##INFO=<ID=hq_denovo,Number=1,Type=String,Description=\"high quality de novo call\">
##INFO=<ID=recessive,Number=0,Type=Flag,Description=\"fits recessive inheritance\">
##INFO=<ID=x_recessive,Number=0,Type=Flag,Description=\"fits x-linked recessive inheritance\">
##INFO=<ID=slivar_comphet,Number=.,Type=String,Description=\"slivar compound het link\">
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO
";

/// Run one variant through the command and return its output INFO tokens
fn rank_variant(info: &str, risk_genes: &[&str]) -> Vec<String> {
    let input = format!("{}chr1\t1000\t.\tA\tG\t50\tPASS\t{}\n", HEADER, info);
    let genes: Vec<String> = risk_genes.iter().map(|g| g.to_string()).collect();

    let mut out = Vec::new();
    run_rank(input.as_bytes(), &mut out, &genes).unwrap();
    let text = String::from_utf8(out).unwrap();

    let data_line = text
        .lines()
        .find(|l| !l.starts_with('#'))
        .expect("one data line");
    data_line
        .split('\t')
        .nth(7)
        .unwrap()
        .split(';')
        .map(|s| s.to_string())
        .collect()
}

fn rank_value(info_tokens: &[String]) -> Option<String> {
    info_tokens
        .iter()
        .find_map(|t| t.strip_prefix("rank=").map(|v| v.to_string()))
}

fn comphet_rank_value(info_tokens: &[String]) -> Option<String> {
    info_tokens
        .iter()
        .find_map(|t| t.strip_prefix("comphet_rank=").map(|v| v.to_string()))
}

#[test]
fn test_risk_gene_scenario_ranks_one() {
    let tokens = rank_variant(
        "vep_Consequence=missense_variant;CADD_phred=30;eAF_popmax=0.00005;TOPMed_AF=0.0005;vep_SYMBOL=BRCA1",
        &["BRCA1"],
    );
    assert_eq!(rank_value(&tokens).as_deref(), Some("1"));
}

#[test]
fn test_constrained_lof_scenario_ranks_two() {
    let tokens = rank_variant(
        "vep_IMPACT=HIGH;eAF_popmax=0.00002;TOPMed_AF=0.0001;gnomAD_pLI=0.8;vep_SYMBOL=NOT_IN_LIST",
        &["BRCA1"],
    );
    assert_eq!(rank_value(&tokens).as_deref(), Some("2"));
}

#[rstest]
#[case::constrained_splice(
    "spliceAI_max=0.4;eAF_popmax=0.00005;TOPMed_AF=0.0005;gnomAD_pLI=0.9",
    "2.5"
)]
#[case::recessive_hom("recessive;eAF_popmax=0.005;TOPMed_AF=0.004;phom=0.001", "3")]
#[case::rare_damaging_splice("spliceAI_max=0.3;eAF_popmax=0.00005;TOPMed_AF=0.0005", "4")]
#[case::lowfreq_missense("vep_Consequence=missense_variant;eAF_popmax=0.0005", "5")]
#[case::de_novo("denovo=proband;eAF_popmax=0.005", "5.5")]
#[case::recessive_candidate("x_recessive;eAF_popmax=0.02;phom=0.01", "6")]
fn test_rank_tiers(#[case] info: &str, #[case] expected: &str) {
    let tokens = rank_variant(info, &[]);
    assert_eq!(rank_value(&tokens).as_deref(), Some(expected), "{}", info);
}

#[test]
fn test_first_match_wins() {
    // satisfies constrained-lof (2.0), rare-damaging (4.0) and de novo (5.5)
    let tokens = rank_variant(
        "vep_IMPACT=HIGH;eAF_popmax=0.00002;TOPMed_AF=0.0001;gnomAD_pLI=1.0;denovo=kid",
        &[],
    );
    assert_eq!(rank_value(&tokens).as_deref(), Some("2"));
}

#[test]
fn test_unprioritized_variant_has_no_rank_key() {
    let tokens = rank_variant("eAF_popmax=0.3", &[]);
    assert_eq!(rank_value(&tokens), None);
    assert_eq!(comphet_rank_value(&tokens), None);
}

#[rstest]
#[case::strong("slivar_comphet=grpA/GENE1/pair7/h1;pchet=0.001", Some("3"))]
#[case::weak("slivar_comphet=grpA/GENE1/pair7/h1;pchet=0.01", Some("6"))]
#[case::unconvincing("slivar_comphet=grpA/GENE1/pair7/h1;pchet=0.5", None)]
#[case::unscored("slivar_comphet=grpA/GENE1/pair7/h1", None)]
#[case::no_token("pchet=0.001", None)]
fn test_comphet_secondary_rank(#[case] info: &str, #[case] expected: Option<&str>) {
    let tokens = rank_variant(info, &[]);
    assert_eq!(comphet_rank_value(&tokens).as_deref(), expected, "{}", info);
}

#[test]
fn test_rerank_is_idempotent() {
    let input = format!(
        "{}chr1\t1000\t.\tA\tG\t50\tPASS\tvep_IMPACT=HIGH;eAF_popmax=0.00002;TOPMed_AF=0.0001;gnomAD_pLI=0.8\n",
        HEADER
    );

    let mut first = Vec::new();
    run_rank(input.as_bytes(), &mut first, &[]).unwrap();
    let first_text = String::from_utf8(first).unwrap();

    // feed the ranked output straight back through the command
    let mut second = Vec::new();
    run_rank(first_text.as_bytes(), &mut second, &[]).unwrap();
    let second_text = String::from_utf8(second).unwrap();

    let first_data: Vec<&str> = first_text.lines().filter(|l| !l.starts_with('#')).collect();
    let second_data: Vec<&str> = second_text
        .lines()
        .filter(|l| !l.starts_with('#'))
        .collect();
    assert_eq!(first_data, second_data);

    let rank_count = second_data[0].matches("rank=").count();
    assert_eq!(rank_count, 1, "rank must be overwritten, not appended");
}
