//! "Did you mean" suggestions for unknown option names.

/// Registered names close enough to `name` to be worth suggesting,
/// nearest first.
pub fn suggest<'a, I>(name: &str, candidates: I, limit: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let max_distance = (name.chars().count() / 3).max(1);

    let mut scored: Vec<(usize, &str)> = candidates
        .into_iter()
        .filter(|candidate| candidate.chars().count() > 1)
        .map(|candidate| (levenshtein_distance(name, candidate), candidate))
        .filter(|(distance, _)| *distance <= max_distance)
        .collect();

    scored.sort();
    scored.dedup();
    scored
        .into_iter()
        .take(limit)
        .map(|(_, candidate)| candidate.to_string())
        .collect()
}

/// Calculate Levenshtein distance
pub fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        current[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            current[j] = (previous[j] + 1)
                .min(current[j - 1] + 1)
                .min(previous[j - 1] + cost);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_distance() {
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("verbose", "verbose"), 0);
    }

    #[test]
    fn test_suggest_orders_by_distance() {
        let names = ["verbose", "version", "output", "v"];
        assert_eq!(suggest("verbos", names, 3), vec!["verbose"]);
        assert_eq!(suggest("versio", names, 3), vec!["version"]);
        assert!(suggest("zzz", names, 3).is_empty());
    }

    #[test]
    fn test_suggest_respects_limit() {
        let names = ["aab", "aac", "aad"];
        assert_eq!(suggest("aaa", names, 2), vec!["aab", "aac"]);
    }
}
