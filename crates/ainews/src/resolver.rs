//! Term-to-taxonomy resolution
//!
//! Unknown terms are dropped rather than rejected, so callers can pass
//! approximate or extra terms without failing the whole request.

use serde_json::Value;

use crate::request::FilterRequest;
use crate::vocabulary::{Dimension, TaxonomyId, VocabularyTable, normalize};

/// Outcome of resolving one dimension's terms
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Resolved ids, deduplicated, in first-occurrence order
    pub ids: Vec<TaxonomyId>,
    /// Normalized terms with no match in the table, deduplicated
    pub unrecognized: Vec<String>,
}

impl Resolution {
    /// Whether nothing resolved, i.e. the dimension applies no filter
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Resolve terms against a table, keeping only the ids
///
/// Absent input yields an empty list.
pub fn resolve<I, S>(terms: Option<I>, table: &VocabularyTable) -> Vec<TaxonomyId>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    resolve_terms(terms, table).ids
}

/// Resolve terms against a table, also reporting the terms that did not match
pub fn resolve_terms<I, S>(terms: Option<I>, table: &VocabularyTable) -> Resolution
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut resolution = Resolution::default();

    for term in terms.into_iter().flatten() {
        match table.lookup(term.as_ref()) {
            Some(id) => {
                if !resolution.ids.contains(&id) {
                    resolution.ids.push(id);
                }
            }
            None => {
                let normalized = normalize(term.as_ref());
                if !normalized.is_empty() && !resolution.unrecognized.contains(&normalized) {
                    resolution.unrecognized.push(normalized);
                }
            }
        }
    }

    resolution
}

/// Extract a term list from an arbitrary JSON value
///
/// Anything but an array is treated as absent; non-string elements are skipped.
pub fn terms_from_value(value: &Value) -> Option<Vec<String>> {
    value.as_array().map(|items| {
        items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect()
    })
}

/// Resolutions of all three dimensions of a request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedFilters {
    pub categories: Resolution,
    pub networks: Resolution,
    pub tokens: Resolution,
}

impl ResolvedFilters {
    /// Resolve every dimension of `request` against its vocabulary
    pub fn resolve(request: &FilterRequest) -> Self {
        Self {
            categories: resolve_terms(
                request.terms(Dimension::Category),
                Dimension::Category.table(),
            ),
            networks: resolve_terms(request.terms(Dimension::Network), Dimension::Network.table()),
            tokens: resolve_terms(request.terms(Dimension::Token), Dimension::Token.table()),
        }
    }

    /// Resolution for one dimension
    pub fn get(&self, dimension: Dimension) -> &Resolution {
        match dimension {
            Dimension::Category => &self.categories,
            Dimension::Network => &self.networks,
            Dimension::Token => &self.tokens,
        }
    }

    /// Human-readable notes for terms that were ignored
    pub fn warnings(&self) -> Vec<String> {
        Dimension::ALL
            .iter()
            .flat_map(|&dimension| {
                self.get(dimension).unrecognized.iter().map(move |term| {
                    format!(
                        "Unrecognized {} term '{}' was ignored",
                        dimension.noun(),
                        term
                    )
                })
            })
            .collect()
    }
}
