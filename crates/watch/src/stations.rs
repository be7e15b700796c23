//! Station-name resolution against the canonical TGVmax station list.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::client::{FetchError, DEFAULT_TIMEOUT_SECS};

/// Minimum similarity (scaled to 0..=10) for a fuzzy match to be accepted.
const MIN_SIMILARITY: usize = 6;

/// Error returned when an input cannot be matched to any canonical station.
#[derive(Debug, Error)]
#[error("station '{input}' not found, available stations: {available:?}")]
pub struct UnknownStation {
    pub input: String,
    pub available: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct FacetsResponse {
    facets: Vec<FacetGroup>,
}

#[derive(Debug, Deserialize)]
struct FacetGroup {
    facets: Vec<FacetValue>,
}

#[derive(Debug, Deserialize)]
struct FacetValue {
    name: String,
}

/// The canonical station list, fetched once at startup (or injected as a
/// fixture in tests) and owned explicitly by the caller.
pub struct StationDirectory {
    names: Vec<String>,
}

impl StationDirectory {
    /// Create a directory from an explicit station list.
    #[must_use]
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    /// Download the canonical station list from the dataset's origin facet.
    pub async fn fetch(base_url: &str) -> Result<Self, FetchError> {
        let url = format!("{base_url}/facets?facet=origine");
        debug!(url = %url, "fetching station list");

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;

        let body = client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let response: FacetsResponse = serde_json::from_str(&body)?;
        let names = response
            .facets
            .into_iter()
            .next()
            .map(|group| group.facets.into_iter().map(|f| f.name).collect())
            .unwrap_or_default();

        Ok(Self::new(names))
    }

    /// All canonical station names, in upstream order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Resolve a free-text station name to its canonical form.
    ///
    /// Candidates are uppercased and truncated to the input's length, so
    /// `paris` matches `PARIS (intramuros)`. Among candidates the smallest
    /// Levenshtein distance wins; ties go to the first station in canonical
    /// list order.
    pub fn resolve(&self, input: &str) -> Result<&str, UnknownStation> {
        let needle = input.to_uppercase();
        let needle_len = needle.chars().count();

        let mut best: Option<(usize, usize)> = None;
        for (index, name) in self.names.iter().enumerate() {
            let candidate: String = name.to_uppercase().chars().take(needle_len).collect();
            let distance = levenshtein(&needle, &candidate);

            let max_len = needle_len.max(candidate.chars().count());
            if max_len == 0 || (max_len - distance) * 10 < max_len * MIN_SIMILARITY {
                continue;
            }
            if best.map_or(true, |(best_distance, _)| distance < best_distance) {
                best = Some((distance, index));
            }
        }

        best.map(|(_, index)| self.names[index].as_str())
            .ok_or_else(|| UnknownStation {
                input: input.to_string(),
                available: self.names.clone(),
            })
    }
}

/// Edit distance between two strings, over characters.
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> StationDirectory {
        StationDirectory::new(vec![
            "PARIS (intramuros)".to_string(),
            "LYON (intramuros)".to_string(),
            "MARSEILLE ST CHARLES".to_string(),
            "BORDEAUX ST JEAN".to_string(),
        ])
    }

    #[test]
    fn levenshtein_basics() {
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("PARIS", "PARIS"), 0);
        assert_eq!(levenshtein("PARIS", "PARIT"), 1);
        assert_eq!(levenshtein("LYON", ""), 4);
        assert_eq!(levenshtein("KITTEN", "SITTING"), 3);
    }

    #[test]
    fn resolves_case_insensitive_prefix() {
        let directory = directory();
        assert_eq!(directory.resolve("paris").unwrap(), "PARIS (intramuros)");
        assert_eq!(directory.resolve("Lyon").unwrap(), "LYON (intramuros)");
        assert_eq!(
            directory.resolve("marseille").unwrap(),
            "MARSEILLE ST CHARLES"
        );
    }

    #[test]
    fn resolves_close_misspellings() {
        let directory = directory();
        assert_eq!(directory.resolve("bordaux").unwrap(), "BORDEAUX ST JEAN");
        assert_eq!(directory.resolve("marseile").unwrap(), "MARSEILLE ST CHARLES");
    }

    #[test]
    fn ties_break_to_first_in_canonical_order() {
        let directory = StationDirectory::new(vec![
            "NANTES".to_string(),
            "NANCY".to_string(),
        ]);
        // "NAN" prefixes both equally well.
        assert_eq!(directory.resolve("nan").unwrap(), "NANTES");
    }

    #[test]
    fn unmatched_input_lists_available_stations() {
        let directory = directory();
        let err = directory.resolve("zzzzzz").unwrap_err();
        assert_eq!(err.input, "zzzzzz");
        assert_eq!(err.available.len(), 4);
    }

    #[test]
    fn empty_directory_never_matches() {
        let directory = StationDirectory::new(Vec::new());
        assert!(directory.resolve("paris").is_err());
    }
}
