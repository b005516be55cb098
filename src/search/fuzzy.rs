//! Approximate substring matching
//!
//! Finds the closest occurrence of a pattern anywhere inside a text, counting
//! edits (insertions, deletions, substitutions). Patterns up to 64 characters
//! use the Myers bit-parallel search; longer patterns fall back to the
//! column-wise dynamic program. Matching is position independent: where in
//! the text the occurrence sits does not change its score.

use ahash::AHashMap;
use smallvec::SmallVec;
use unicode_normalization::UnicodeNormalization;

/// Maximum pattern length for the bit-parallel search (64 bits per word)
const MYERS_BLOCK_SIZE: usize = 64;

/// Normalize text for matching: NFC composition, then case folding
pub fn normalize_for_matching(text: &str) -> String {
    text.nfc().collect::<String>().to_lowercase()
}

/// A compiled search pattern
#[derive(Debug, Clone)]
pub struct Pattern {
    chars: Vec<char>,
    /// Per-character match masks, bit `i` set where `chars[i] == c`
    peq: AHashMap<char, u64>,
}

impl Pattern {
    pub fn new(query: &str) -> Self {
        let chars: Vec<char> = normalize_for_matching(query.trim()).chars().collect();

        let mut peq = AHashMap::new();
        if chars.len() <= MYERS_BLOCK_SIZE {
            for (i, &c) in chars.iter().enumerate() {
                *peq.entry(c).or_insert(0u64) |= 1u64 << i;
            }
        }

        Self { chars, peq }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn as_chars(&self) -> &[char] {
        &self.chars
    }
}

/// Closest occurrence of a pattern in a text
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyMatch {
    /// Edits needed to turn the occurrence into the pattern
    pub errors: usize,
    /// `errors / pattern length`; 0.0 is an exact occurrence
    pub score: f64,
    /// Character range of the occurrence in the normalized text, end exclusive
    pub span: (usize, usize),
}

/// Bounded approximate matcher
#[derive(Debug, Clone)]
pub struct FuzzyMatcher {
    threshold: f64,
    min_match_char_length: usize,
}

impl FuzzyMatcher {
    /// `threshold` is the fraction of pattern characters that may be edited;
    /// `min_match_char_length` is the shortest pattern or occurrence accepted.
    pub fn new(threshold: f64, min_match_char_length: usize) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            min_match_char_length: min_match_char_length.max(1),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn min_match_char_length(&self) -> usize {
        self.min_match_char_length
    }

    /// Edits allowed for a pattern of `pattern_len` characters.
    ///
    /// Always leaves at least one character that must match exactly.
    pub fn max_errors(&self, pattern_len: usize) -> usize {
        let allowed = (self.threshold * pattern_len as f64 + 1e-9).floor() as usize;
        allowed.min(pattern_len.saturating_sub(1))
    }

    /// Find the closest occurrence of `pattern` in already-normalized `text`
    pub fn find(&self, pattern: &Pattern, text: &[char]) -> Option<FuzzyMatch> {
        let m = pattern.len();
        if m == 0 || m < self.min_match_char_length || text.is_empty() {
            return None;
        }

        let max_errors = self.max_errors(m);
        let (errors, end) = if m <= MYERS_BLOCK_SIZE {
            myers_search(pattern, text)
        } else {
            dp_search(pattern.as_chars(), text)
        };

        if errors > max_errors {
            return None;
        }

        let start = locate_start(pattern.as_chars(), text, end, errors);
        let span = (start, end + 1);
        if span.1 - span.0 < self.min_match_char_length {
            return None;
        }

        Some(FuzzyMatch {
            errors,
            score: errors as f64 / m as f64,
            span,
        })
    }

    /// Normalize `haystack` and match `needle` against it
    pub fn match_str(&self, haystack: &str, needle: &str) -> Option<FuzzyMatch> {
        let text: Vec<char> = normalize_for_matching(haystack).chars().collect();
        self.find(&Pattern::new(needle), &text)
    }
}

/// Myers bit-parallel search. Returns the fewest errors over all end
/// positions and the earliest end position reaching it.
fn myers_search(pattern: &Pattern, text: &[char]) -> (usize, usize) {
    let m = pattern.len();
    let mask = 1u64 << (m - 1);

    let mut vp: u64 = !0u64;
    let mut vn: u64 = 0u64;
    let mut score = m;
    let mut best = (m, 0usize);

    for (j, tc) in text.iter().enumerate() {
        let eq = pattern.peq.get(tc).copied().unwrap_or(0);

        let xv = eq | vn;
        let xh = ((eq & vp).wrapping_add(vp) ^ vp) | eq;

        let hp = vn | !(xh | vp);
        let hn = vp & xh;

        if (hp & mask) != 0 {
            score += 1;
        } else if (hn & mask) != 0 {
            score -= 1;
        }

        // First row is all zeros when searching, so nothing is shifted in
        let hp_shifted = hp << 1;
        let hn_shifted = hn << 1;

        vp = hn_shifted | !(xv | hp_shifted);
        vn = hp_shifted & xv;

        if score < best.0 {
            best = (score, j);
            if score == 0 {
                break;
            }
        }
    }

    best
}

/// Column-wise dynamic program for patterns longer than one machine word
fn dp_search(pattern: &[char], text: &[char]) -> (usize, usize) {
    let m = pattern.len();
    let mut column: Vec<usize> = (0..=m).collect();
    let mut best = (m, 0usize);

    for (j, &tc) in text.iter().enumerate() {
        let mut diagonal = column[0];
        column[0] = 0;

        for i in 1..=m {
            let cost = usize::from(pattern[i - 1] != tc);
            let substitution = diagonal + cost;
            let deletion = column[i] + 1;
            let insertion = column[i - 1] + 1;

            diagonal = column[i];
            column[i] = substitution.min(deletion).min(insertion);
        }

        if column[m] < best.0 {
            best = (column[m], j);
            if best.0 == 0 {
                break;
            }
        }
    }

    best
}

/// Walk backwards from `end` to find where an occurrence with `errors` edits
/// begins. Picks the shortest such occurrence.
fn locate_start(pattern: &[char], text: &[char], end: usize, errors: usize) -> usize {
    let m = pattern.len();
    let reach = (end + 1).min(m + errors);

    let mut previous: SmallVec<[usize; 64]> = (0..=m).collect();
    let mut current: SmallVec<[usize; 64]> = SmallVec::from_elem(0, m + 1);

    for t in 1..=reach {
        let tc = text[end + 1 - t];
        current[0] = t;
        for i in 1..=m {
            let cost = usize::from(pattern[m - i] != tc);
            current[i] = (previous[i - 1] + cost)
                .min(previous[i] + 1)
                .min(current[i - 1] + 1);
        }
        if current[m] <= errors {
            return end + 1 - t;
        }
        std::mem::swap(&mut previous, &mut current);
    }

    end + 1 - reach.min(m)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        normalize_for_matching(s).chars().collect()
    }

    #[test]
    fn test_exact_occurrence() {
        let matcher = FuzzyMatcher::new(0.3, 2);
        let m = matcher.match_str("We study M82 in detail", "m82").unwrap();
        assert_eq!(m.errors, 0);
        assert_eq!(m.score, 0.0);
        assert_eq!(m.span, (9, 12));
    }

    #[test]
    fn test_case_insensitive() {
        let matcher = FuzzyMatcher::new(0.3, 2);
        assert!(matcher.match_str("NIRSPEC IFU", "nirspec").is_some());
        assert!(matcher.match_str("nirspec ifu", "NIRSpec").is_some());
    }

    #[test]
    fn test_typo_tolerated() {
        let matcher = FuzzyMatcher::new(0.3, 2);
        let m = matcher.match_str("galaxy evolution survey", "galaxxy").unwrap();
        assert_eq!(m.errors, 1);
        assert!(m.score > 0.0 && m.score <= 0.3);
    }

    #[test]
    fn test_partial_word() {
        let matcher = FuzzyMatcher::new(0.3, 2);
        assert!(matcher.match_str("spectroscopy of exoplanets", "spectro").is_some());
    }

    #[test]
    fn test_too_many_errors_rejected() {
        let matcher = FuzzyMatcher::new(0.3, 2);
        assert!(matcher.match_str("hello world", "xyz").is_none());
        assert!(matcher.match_str("no relevant keywords here", "999").is_none());
    }

    #[test]
    fn test_short_pattern_needs_exact() {
        let matcher = FuzzyMatcher::new(0.3, 2);
        // three characters allow zero edits at this threshold
        assert_eq!(matcher.max_errors(3), 0);
        assert!(matcher.match_str("m83 nucleus", "m82").is_none());
    }

    #[test]
    fn test_single_character_never_matches() {
        let matcher = FuzzyMatcher::new(0.3, 2);
        assert!(matcher.match_str("aaaa", "a").is_none());
    }

    #[test]
    fn test_max_errors_keeps_one_exact_char() {
        let matcher = FuzzyMatcher::new(1.0, 1);
        assert_eq!(matcher.max_errors(4), 3);
        assert_eq!(matcher.max_errors(1), 0);
    }

    #[test]
    fn test_position_independent() {
        let matcher = FuzzyMatcher::new(0.3, 2);
        let filler = "lorem ipsum ".repeat(200);
        let early = matcher.match_str(&format!("quasar {}", filler), "quasar").unwrap();
        let late = matcher.match_str(&format!("{} quasar", filler), "quasar").unwrap();
        assert_eq!(early.score, late.score);
    }

    #[test]
    fn test_long_pattern_uses_dp() {
        let matcher = FuzzyMatcher::new(0.3, 2);
        let needle = "a study of the circumgalactic medium around star forming galaxies at cosmic noon";
        assert!(needle.chars().count() > MYERS_BLOCK_SIZE);
        let haystack = format!("Abstract: {} with JWST.", needle.replace("medium", "medum"));
        let m = matcher.match_str(&haystack, needle).unwrap();
        assert_eq!(m.errors, 1);
    }

    #[test]
    fn test_myers_agrees_with_dp() {
        let text = chars("the andromeda galaxy and the triangulum galaxy");
        for needle in ["galaxy", "andromda", "triangulumm", "xyzzy", "the"] {
            let pattern = Pattern::new(needle);
            let (myers_errors, _) = myers_search(&pattern, &text);
            let (dp_errors, _) = dp_search(pattern.as_chars(), &text);
            assert_eq!(myers_errors, dp_errors, "needle {}", needle);
        }
    }

    #[test]
    fn test_span_covers_occurrence() {
        let matcher = FuzzyMatcher::new(0.3, 2);
        let text = chars("observations of ngc 1068 nucleus");
        let m = matcher.find(&Pattern::new("NGC 1068"), &text).unwrap();
        let found: String = text[m.span.0..m.span.1].iter().collect();
        assert_eq!(found, "ngc 1068");
    }

    #[test]
    fn test_unicode_normalization() {
        let matcher = FuzzyMatcher::new(0.3, 2);
        // decomposed e + combining acute against precomposed é
        assert!(matcher.match_str("cafe\u{301} society", "café").map(|m| m.errors) == Some(0));
    }

    #[test]
    fn test_empty_inputs() {
        let matcher = FuzzyMatcher::new(0.3, 2);
        assert!(matcher.match_str("hello", "").is_none());
        assert!(matcher.match_str("hello", "   ").is_none());
        assert!(matcher.match_str("", "hello").is_none());
    }
}
