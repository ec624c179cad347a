//! Translation of search criteria into store predicates.
//!
//! The builder is pure: equal criteria always produce equal predicates, so the
//! exact query shape can be asserted without a database.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use jobstore_core::{
    error::StoreError,
    query::{Filter, Predicate},
};

use crate::models::{COMPANY_NAME_FIELD, LOCATION_FIELD, SearchCriteria, TITLE_FIELD};

/// How keywords are compared against the title and company name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordMatch {
    /// The field must equal the keywords exactly.
    #[default]
    Exact,
    /// The field must contain the keywords, ignoring case.
    Contains,
}

impl KeywordMatch {
    fn predicate(self, field: &str, keywords: &str) -> Predicate {
        match self {
            KeywordMatch::Exact => Filter::eq(field, keywords),
            KeywordMatch::Contains => Filter::contains(field, keywords),
        }
    }
}

impl FromStr for KeywordMatch {
    type Err = StoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "exact" => Ok(KeywordMatch::Exact),
            "contains" => Ok(KeywordMatch::Contains),
            other => Err(StoreError::Configuration(format!(
                "unknown keyword match mode {other:?}, expected \"exact\" or \"contains\""
            ))),
        }
    }
}

/// Builds the predicate for a job search using exact keyword matching.
pub fn build_filter(criteria: Option<&SearchCriteria>) -> Predicate {
    build_filter_with(criteria, KeywordMatch::Exact)
}

/// Builds the predicate for a job search.
///
/// - absent or empty criteria match every job;
/// - otherwise keywords must match the title or the company name;
/// - a non-empty location is additionally required to match exactly.
pub fn build_filter_with(criteria: Option<&SearchCriteria>, matching: KeywordMatch) -> Predicate {
    let Some(criteria) = criteria.filter(|criteria| !criteria.is_empty()) else {
        return Predicate::All;
    };

    let keywords = Filter::or([
        matching.predicate(TITLE_FIELD, &criteria.keywords),
        matching.predicate(COMPANY_NAME_FIELD, &criteria.keywords),
    ]);

    if criteria.location.is_empty() {
        return keywords;
    }

    Filter::and([Filter::eq(LOCATION_FIELD, criteria.location.as_str()), keywords])
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobstore_core::query::FieldOp;

    fn mentions_location(expr: &Predicate) -> bool {
        match expr {
            Predicate::All => false,
            Predicate::And(list) | Predicate::Or(list) => list.iter().any(mentions_location),
            Predicate::Field { field, .. } => field == LOCATION_FIELD,
        }
    }

    #[test]
    fn absent_and_default_criteria_match_everything() {
        assert_eq!(build_filter(None), Predicate::All);
        assert_eq!(build_filter(Some(&SearchCriteria::default())), Predicate::All);
    }

    #[test]
    fn empty_location_never_constrains_location() {
        for keywords in ["", "Engineer", "Acme"] {
            let criteria = SearchCriteria::new("", keywords);

            assert!(!mentions_location(&build_filter(Some(&criteria))));
            assert!(!mentions_location(&build_filter_with(
                Some(&criteria),
                KeywordMatch::Contains
            )));
        }
    }

    #[test]
    fn keywords_only_is_a_title_or_company_disjunction() {
        assert_eq!(
            build_filter(Some(&SearchCriteria::new("", "Engineer"))),
            Filter::or([
                Filter::eq("title", "Engineer"),
                Filter::eq("companyName", "Engineer"),
            ])
        );
    }

    #[test]
    fn location_yields_one_location_term_and_one_disjunction() {
        for keywords in ["", "Engineer"] {
            let expr = build_filter(Some(&SearchCriteria::new("NYC", keywords)));

            let Predicate::And(terms) = expr else {
                panic!("expected a conjunction");
            };
            assert_eq!(terms.len(), 2);
            assert_eq!(terms[0], Filter::eq("location", "NYC"));
            assert!(matches!(&terms[1], Predicate::Or(list) if list.len() == 2));
            assert!(!mentions_location(&terms[1]));
        }
    }

    #[test]
    fn contains_mode_changes_keyword_terms_only() {
        let expr = build_filter_with(
            Some(&SearchCriteria::new("NYC", "engineer")),
            KeywordMatch::Contains,
        );

        let Predicate::And(terms) = expr else {
            panic!("expected a conjunction");
        };
        assert!(matches!(&terms[0], Predicate::Field { op: FieldOp::Eq, .. }));
        let Predicate::Or(keywords) = &terms[1] else {
            panic!("expected a disjunction");
        };
        assert!(keywords
            .iter()
            .all(|term| matches!(term, Predicate::Field { op: FieldOp::Contains, .. })));
    }

    #[test]
    fn builder_is_deterministic() {
        let criteria = SearchCriteria::new("LA", "Acme");

        assert_eq!(build_filter(Some(&criteria)), build_filter(Some(&criteria.clone())));
    }

    #[test]
    fn keyword_match_parses_from_config_strings() {
        assert_eq!("Exact".parse::<KeywordMatch>().unwrap(), KeywordMatch::Exact);
        assert_eq!(" contains ".parse::<KeywordMatch>().unwrap(), KeywordMatch::Contains);
        assert!(matches!(
            "fuzzy".parse::<KeywordMatch>(),
            Err(StoreError::Configuration(_))
        ));
    }
}
