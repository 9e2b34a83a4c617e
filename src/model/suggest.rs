//! Fuzzy "Did you mean ...?" suggestions for failed name lookups.
//!
//! Every identifier resolution failure in this crate tries to append a
//! suggestion drawn from the vocabulary that was valid at that position.
//! Matching is case insensitive and uses normalized Levenshtein
//! similarity with a single best candidate above a moderate cutoff.

use strsim::normalized_levenshtein;

/// Minimum similarity for a candidate to be offered at all.
pub const SIMILARITY_CUTOFF: f64 = 0.5;

/// Return the single closest candidate to `input`, or `None` when no
/// candidate reaches the cutoff.
///
/// Candidates are compared lowercase; the returned string keeps the
/// candidate's original casing. Ties are broken deterministically by
/// picking the lexicographically smallest candidate.
pub fn closest<'a, I>(input: &str, candidates: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let needle = input.to_lowercase();

    let mut pool: Vec<(String, &str)> = candidates
        .into_iter()
        .map(|c| (c.to_lowercase(), c))
        .collect();
    pool.sort();
    pool.dedup_by(|a, b| a.0 == b.0);

    let mut best: Option<(f64, &str)> = None;
    for (lowered, original) in &pool {
        let score = normalized_levenshtein(&needle, lowered);
        if score >= SIMILARITY_CUTOFF && best.map_or(true, |(top, _)| score > top) {
            best = Some((score, *original));
        }
    }
    best.map(|(_, original)| original.to_string())
}

/// Format the suggestion clause appended to lookup error messages.
///
/// Returns `" Did you mean '<candidate>'?"` or an empty string when
/// nothing is close enough.
pub fn did_you_mean<'a, I>(input: &str, candidates: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    match closest(input, candidates) {
        Some(candidate) => format!(" Did you mean '{}'?", candidate),
        None => String::new(),
    }
}
