//! Alias normalization.
//!
//! Plant names arrive in many spellings ("Neem / Azadirachta indica",
//! "TULSI; Holy basil"). These helpers reduce them to comparable lookup keys.

/// Lowercases `text`, collapses every run of characters outside `[a-z0-9]`
/// into one space, and trims the ends.
///
/// Empty or punctuation-only input yields an empty string, which never
/// matches anything.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(c);
        } else {
            pending_space = true;
        }
    }

    out
}

/// Splits a multi-name field on `/`, `,`, `;` and `|`, trimming each piece
/// and skipping empty ones.
///
/// The iterator is lazy and `Clone`, so callers can walk it more than once.
pub fn split_aliases(text: &str) -> impl Iterator<Item = &str> + Clone + '_ {
    text.split(['/', ',', ';', '|'])
        .map(str::trim)
        .filter(|alias| !alias.is_empty())
}

/// Lookup key for a label: the first alias it contains, normalized.
///
/// A label with no alias pieces falls back to the label itself, and an
/// empty label to `"plant"`.
pub fn canonical_key(label: &str) -> String {
    let base = split_aliases(label)
        .next()
        .unwrap_or(if label.is_empty() { "plant" } else { label });
    normalize(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_punctuation() {
        assert_eq!(normalize("Azadirachta  indica (A. Juss.)"), "azadirachta indica a juss");
        assert_eq!(normalize("  Aloe-Vera!! "), "aloe vera");
        assert_eq!(normalize("Tulsi_2"), "tulsi 2");
    }

    #[test]
    fn test_normalize_empty_and_symbols() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" -- / "), "");
    }

    #[test]
    fn test_normalize_non_ascii_letters_become_separators() {
        assert_eq!(normalize("Café Plant"), "caf plant");
    }

    #[test]
    fn test_split_aliases_on_all_separators() {
        let aliases: Vec<&str> = split_aliases("Neem / Azadirachta indica").collect();
        assert_eq!(aliases, vec!["Neem", "Azadirachta indica"]);

        let aliases: Vec<&str> = split_aliases("Tulsi;; Holy basil|Ocimum ,").collect();
        assert_eq!(aliases, vec!["Tulsi", "Holy basil", "Ocimum"]);
    }

    #[test]
    fn test_split_aliases_is_restartable() {
        let iter = split_aliases("a/b");
        let first: Vec<&str> = iter.clone().collect();
        let second: Vec<&str> = iter.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_split_aliases_empty() {
        assert_eq!(split_aliases("").count(), 0);
        assert_eq!(split_aliases(" / ; ").count(), 0);
    }

    #[test]
    fn test_canonical_key_uses_first_alias() {
        assert_eq!(canonical_key("Neem / Azadirachta indica"), "neem");
        assert_eq!(canonical_key("Holy Basil"), "holy basil");
        assert_eq!(canonical_key(""), "plant");
    }
}
