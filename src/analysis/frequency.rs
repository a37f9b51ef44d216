use std::collections::HashMap;

/// Occurrence count per word for one document.
pub type WordFrequencies = HashMap<String, u32>;

/// Counts how often each token occurs. The result depends only on the multiset
/// of tokens, not on their order.
pub fn count_frequencies<S: AsRef<str>>(tokens: &[S]) -> WordFrequencies {
    let mut frequencies = WordFrequencies::new();

    for token in tokens {
        frequencies
            .entry(token.as_ref().to_string())
            .and_modify(|count| *count += 1)
            .or_insert(1);
    }

    frequencies
}

/// Sum of all counts, i.e. the number of tokens the map was built from.
pub fn total_occurrences(frequencies: &WordFrequencies) -> u64 {
    frequencies.values().map(|&count| u64::from(count)).sum()
}
