//! Ordered rank classification
//!
//! The rank hierarchy is an explicit table of (rank, rule) pairs walked
//! top-to-bottom; the first satisfied rule wins and evaluation stops. Rules
//! are ordered from most to least specific, so a variant satisfying several
//! always gets the strongest claim.

use std::collections::HashSet;
use std::fmt;

use crate::vcf::{InfoValue, VcfRecord};

use super::predicates::{
    is_constrained_gene, is_damaging_missense, is_loss_of_function, is_rare, is_splice_damaging,
    population_frequency, RankThresholds, INFO_COMPHET, INFO_COMPHET_RANK, INFO_CONSEQUENCE,
    INFO_DENOVO, INFO_GENE_SYMBOL, INFO_HQ_DENOVO, INFO_PCHET, INFO_PHOM, INFO_RANK,
    INFO_RECESSIVE, INFO_TOPMED_AF, INFO_X_RECESSIVE, MISSING_CATEGORY, MISSING_POPSCORE,
    MISSING_SCORE,
};

/// A review-priority tier. Lower scores are stronger candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rank {
    /// Rare damaging variant in a caller-supplied risk gene
    RiskGene,
    /// Rare loss of function in a constrained gene
    ConstrainedLof,
    /// Rare damaging missense or splice damage in a constrained gene
    ConstrainedDamaging,
    /// Recessive inheritance with a strong homozygous popScore
    RecessiveHom,
    /// Rare and damaging, without gene-level support
    RareDamaging,
    /// Damaging but only low-frequency rather than rare
    LowFreqDamaging,
    /// De novo call
    DeNovo,
    /// Recessive inheritance with weaker supporting evidence
    RecessiveCandidate,
}

impl Rank {
    /// The numeric tier written to the `rank` INFO field
    pub fn score(self) -> f64 {
        match self {
            Rank::RiskGene => 1.0,
            Rank::ConstrainedLof => 2.0,
            Rank::ConstrainedDamaging => 2.5,
            Rank::RecessiveHom => 3.0,
            Rank::RareDamaging => 4.0,
            Rank::LowFreqDamaging => 5.0,
            Rank::DeNovo => 5.5,
            Rank::RecessiveCandidate => 6.0,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.score())
    }
}

/// The ordered rule table. First match wins.
const RULES: [(Rank, fn(&Classifier, &VcfRecord) -> bool); 8] = [
    (Rank::RiskGene, Classifier::matches_risk_gene),
    (Rank::ConstrainedLof, Classifier::matches_constrained_lof),
    (
        Rank::ConstrainedDamaging,
        Classifier::matches_constrained_damaging,
    ),
    (Rank::RecessiveHom, Classifier::matches_recessive_hom),
    (Rank::RareDamaging, Classifier::matches_rare_damaging),
    (Rank::LowFreqDamaging, Classifier::matches_lowfreq_damaging),
    (Rank::DeNovo, Classifier::matches_de_novo),
    (
        Rank::RecessiveCandidate,
        Classifier::matches_recessive_candidate,
    ),
];

/// Stateless per-record rank classifier
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    thresholds: RankThresholds,
    risk_genes: HashSet<String>,
}

impl Classifier {
    /// Create a classifier for the given risk-gene symbols
    pub fn new<I, S>(risk_genes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            thresholds: RankThresholds::default(),
            risk_genes: risk_genes.into_iter().map(Into::into).collect(),
        }
    }

    /// Override the threshold constants
    pub fn with_thresholds(mut self, thresholds: RankThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Evaluate the rule table; None means "not prioritized"
    pub fn classify(&self, v: &VcfRecord) -> Option<Rank> {
        RULES
            .iter()
            .find(|(_, rule)| rule(self, v))
            .map(|(rank, _)| *rank)
    }

    /// Secondary rank for compound-het halves, evaluated independently of
    /// the primary rank. Only meaningful when the variant carries a link
    /// token; the absent popScore defaults to 1.0 and assigns nothing.
    pub fn comphet_rank(&self, v: &VcfRecord) -> Option<Rank> {
        if !v.has_info(INFO_COMPHET) {
            return None;
        }
        let pchet = v.info_float(INFO_PCHET).unwrap_or(MISSING_POPSCORE);
        if pchet < self.thresholds.popscore_strong {
            Some(Rank::RecessiveHom)
        } else if pchet < self.thresholds.popscore_weak {
            Some(Rank::RecessiveCandidate)
        } else {
            None
        }
    }

    /// Write both rank annotations onto the record. Existing values are
    /// overwritten, so re-running the classifier is idempotent.
    pub fn annotate(&self, v: &mut VcfRecord) {
        if let Some(rank) = self.classify(v) {
            v.set_info(INFO_RANK, InfoValue::Float(rank.score()));
        }
        if let Some(rank) = self.comphet_rank(v) {
            v.set_info(INFO_COMPHET_RANK, InfoValue::Float(rank.score()));
        }
    }

    fn matches_risk_gene(&self, v: &VcfRecord) -> bool {
        (is_damaging_missense(v, &self.thresholds) || is_loss_of_function(v))
            && is_rare(v, &self.thresholds)
            && self
                .risk_genes
                .contains(v.info_str(INFO_GENE_SYMBOL).unwrap_or(MISSING_CATEGORY))
    }

    fn matches_constrained_lof(&self, v: &VcfRecord) -> bool {
        is_loss_of_function(v)
            && is_rare(v, &self.thresholds)
            && is_constrained_gene(v, &self.thresholds)
    }

    fn matches_constrained_damaging(&self, v: &VcfRecord) -> bool {
        (is_damaging_missense(v, &self.thresholds) || is_splice_damaging(v, &self.thresholds))
            && is_rare(v, &self.thresholds)
            && is_constrained_gene(v, &self.thresholds)
    }

    fn matches_recessive_hom(&self, v: &VcfRecord) -> bool {
        let topmed = v.info_float(INFO_TOPMED_AF).unwrap_or(MISSING_SCORE);
        if population_frequency(v) > self.thresholds.recessive_af
            || topmed > self.thresholds.recessive_af
        {
            return false;
        }
        if !self.fits_recessive_inheritance(v) {
            return false;
        }
        v.info_float(INFO_PHOM).unwrap_or(MISSING_POPSCORE) < self.thresholds.popscore_strong
    }

    fn matches_rare_damaging(&self, v: &VcfRecord) -> bool {
        (is_damaging_missense(v, &self.thresholds)
            || is_loss_of_function(v)
            || is_splice_damaging(v, &self.thresholds))
            && is_rare(v, &self.thresholds)
    }

    fn matches_lowfreq_damaging(&self, v: &VcfRecord) -> bool {
        let consequence = v.info_str(INFO_CONSEQUENCE).unwrap_or(MISSING_CATEGORY);
        if !(is_loss_of_function(v)
            || consequence == "missense_variant"
            || is_splice_damaging(v, &self.thresholds))
        {
            return false;
        }
        let af = population_frequency(v);
        af >= self.thresholds.lowfreq_min_af && af <= self.thresholds.lowfreq_max_af
    }

    fn matches_de_novo(&self, v: &VcfRecord) -> bool {
        v.has_info(INFO_DENOVO) || v.has_info(INFO_HQ_DENOVO)
    }

    fn matches_recessive_candidate(&self, v: &VcfRecord) -> bool {
        if !self.fits_recessive_inheritance(v) {
            return false;
        }
        if population_frequency(v) < self.thresholds.recessive_af
            && (is_damaging_missense(v, &self.thresholds)
                || is_splice_damaging(v, &self.thresholds)
                || is_loss_of_function(v))
        {
            return true;
        }
        let phom = v.info_float(INFO_PHOM).unwrap_or(MISSING_POPSCORE);
        phom >= self.thresholds.popscore_strong && phom < self.thresholds.popscore_weak
    }

    fn fits_recessive_inheritance(&self, v: &VcfRecord) -> bool {
        v.has_info(INFO_RECESSIVE) || v.has_info(INFO_X_RECESSIVE)
    }
}
