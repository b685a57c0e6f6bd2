//! Bigram similarity between translatable strings.
//!
//! Strings are compared by the Dice coefficient over the adjacent letter pairs of
//! their words, ignoring case. It rewards shared fragments regardless of word
//! order, which suits spotting lightly reworded UI strings.

/// Scores how similar `a` and `b` are, from `0.0` (nothing shared) to `1.0`.
///
/// Two strings without any letter pair (empty, or only one-letter words) score
/// `0.0`.
///
/// ```
/// use i18n_catalog_updater::similarity::similarity;
///
/// assert_eq!(similarity("Save file", "save FILE"), 1.0);
/// assert_eq!(similarity("", ""), 0.0);
/// ```
#[must_use]
#[allow(clippy::float_arithmetic, clippy::cast_precision_loss)]
pub fn similarity(a: &str, b: &str) -> f64 {
    let pairs_a = word_letter_pairs(a);
    let mut pairs_b = word_letter_pairs(b);
    let total = pairs_a.len() + pairs_b.len();
    if total == 0 {
        return 0.0;
    }

    let mut shared = 0_usize;
    for pair in &pairs_a {
        if let Some(index) = pairs_b.iter().position(|candidate| candidate == pair) {
            pairs_b.swap_remove(index);
            shared += 1;
        }
    }

    (2 * shared) as f64 / total as f64
}

/// ASCII separators only; a no-break space stays inside its word.
const fn is_word_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

/// Upper-cased letter pairs of every whitespace-separated word.
fn word_letter_pairs(text: &str) -> Vec<[char; 2]> {
    let upper = text.to_uppercase();
    upper
        .split(is_word_separator)
        .flat_map(|word| {
            let chars: Vec<char> = word.chars().collect();
            chars
                .windows(2)
                .filter_map(|pair| match pair {
                    [first, second] => Some([*first, *second]),
                    _ => None,
                })
                .collect::<Vec<_>>()
        })
        .collect()
}
