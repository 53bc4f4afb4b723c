// Fuzzy matching utilities for field and category suggestions

/// Calculate Levenshtein distance between two strings
/// Returns the minimum number of single-character edits (insertions, deletions, substitutions)
/// needed to transform one string into another
pub fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();
    let s1_len = s1_chars.len();
    let s2_len = s2_chars.len();

    if s1_len == 0 {
        return s2_len;
    }
    if s2_len == 0 {
        return s1_len;
    }

    // Two-row dynamic programming table
    let mut prev: Vec<usize> = (0..=s2_len).collect();
    let mut curr = vec![0; s2_len + 1];

    for i in 1..=s1_len {
        curr[0] = i;
        for j in 1..=s2_len {
            let cost = if s1_chars[i - 1] == s2_chars[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1)
                .min(curr[j - 1] + 1)
                .min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[s2_len]
}

/// Suggest the closest option to `input` (case-insensitive), if any is within `max_distance`
///
/// Ties go to the option listed first.
pub fn suggest<'a, I>(input: &str, options: I, max_distance: usize) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let input_lower = input.to_lowercase();
    let mut best: Option<(&str, usize)> = None;

    for option in options {
        let distance = levenshtein_distance(&input_lower, &option.to_lowercase());
        if distance > max_distance {
            continue;
        }
        match best {
            Some((_, best_dist)) if distance >= best_dist => {}
            _ => best = Some((option, distance)),
        }
    }

    best.map(|(option, _)| option)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_distance() {
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("abc", ""), 3);
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("same", "same"), 0);
        assert_eq!(levenshtein_distance("abc", "def"), 3);
    }

    #[test]
    fn test_suggest() {
        let fields = ["title", "category", "priority", "repeat"];
        assert_eq!(suggest("priorty", fields.iter().copied(), 3), Some("priority"));
        assert_eq!(suggest("Titel", fields.iter().copied(), 3), Some("title"));
        assert_eq!(suggest("zzzzzzzz", fields.iter().copied(), 3), None);
    }
}
