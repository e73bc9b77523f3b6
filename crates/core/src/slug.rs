//! Slug generation from content titles.

/// Maximum slug length, matching the `contents.slug` column.
pub const MAX_SLUG_LENGTH: usize = 160;

/// Generate a URL slug from a title.
///
/// Lowercases, folds common Latin accented characters to ASCII, maps every
/// other non-alphanumeric character to a hyphen, collapses runs of hyphens,
/// trims them from the ends, and truncates to [`MAX_SLUG_LENGTH`].
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut prev_hyphen = true; // suppress leading hyphens

    for c in title.to_lowercase().chars() {
        let mapped = fold_accent(c);
        if mapped.is_ascii_alphanumeric() {
            slug.push(mapped);
            prev_hyphen = false;
        } else if !prev_hyphen {
            slug.push('-');
            prev_hyphen = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }
    slug.truncate(MAX_SLUG_LENGTH);
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Fold a lowercase Latin accented character to its ASCII base letter.
fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_title() {
        assert_eq!(slugify("Root content title"), "root-content-title");
    }

    #[test]
    fn accents_are_folded() {
        assert_eq!(slugify("Não é possível"), "nao-e-possivel");
    }

    #[test]
    fn punctuation_collapses_to_single_hyphens() {
        assert_eq!(slugify("Hello, world!! (again)"), "hello-world-again");
    }

    #[test]
    fn leading_and_trailing_separators_are_trimmed() {
        assert_eq!(slugify("  --title--  "), "title");
    }

    #[test]
    fn long_titles_are_truncated() {
        let title = "a".repeat(400);
        assert_eq!(slugify(&title).len(), MAX_SLUG_LENGTH);
    }

    #[test]
    fn truncation_does_not_leave_a_trailing_hyphen() {
        let title = format!("{} b", "a".repeat(MAX_SLUG_LENGTH - 1));
        let slug = slugify(&title);
        assert!(!slug.ends_with('-'));
    }
}
