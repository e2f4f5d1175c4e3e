//! Compound-het link tokens
//!
//! Upstream pairing encodes pair membership as a slash-delimited string,
//! `group/gene/pair-id[/...]`. The token is parsed once here, at the
//! boundary, rather than re-split at every point of use; anything with
//! fewer than three fields is a structural input error.

use std::fmt;
use std::str::FromStr;

use crate::error::TriageError;

/// A parsed compound-het link token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompHetToken {
    raw: String,
    /// Sample/family grouping (first field)
    pub group: String,
    /// Gene the pair lives in (second field)
    pub gene: String,
    /// Pairing key (third field); both halves of a pair carry the same one
    pub pair_id: String,
}

impl CompHetToken {
    /// The original token string, kept for re-emission
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

impl FromStr for CompHetToken {
    type Err = TriageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s.split('/');
        match (fields.next(), fields.next(), fields.next()) {
            (Some(group), Some(gene), Some(pair_id))
                if !group.is_empty() && !gene.is_empty() && !pair_id.is_empty() =>
            {
                Ok(CompHetToken {
                    raw: s.to_string(),
                    group: group.to_string(),
                    gene: gene.to_string(),
                    pair_id: pair_id.to_string(),
                })
            }
            _ => Err(TriageError::MalformedCompHetToken {
                token: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for CompHetToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_token() {
        let token: CompHetToken = "grpA/GENE1/pair7/h1".parse().unwrap();
        assert_eq!(token.group, "grpA");
        assert_eq!(token.gene, "GENE1");
        assert_eq!(token.pair_id, "pair7");
        assert_eq!(token.raw(), "grpA/GENE1/pair7/h1");
        assert_eq!(token.to_string(), "grpA/GENE1/pair7/h1");
    }

    #[test]
    fn test_parse_token_minimal_three_fields() {
        let token: CompHetToken = "fam1/ABCA4/12".parse().unwrap();
        assert_eq!(token.pair_id, "12");
    }

    #[test]
    fn test_malformed_tokens_rejected() {
        for bad in ["", "one", "one/two", "a//b", "//x"] {
            let err = bad.parse::<CompHetToken>().unwrap_err();
            assert!(
                matches!(err, TriageError::MalformedCompHetToken { .. }),
                "expected malformed-token error for '{}'",
                bad
            );
        }
    }
}
