//! URL-safe slug derivation.
//!
//! A slug is a pure function of the title at creation time plus a numeric
//! disambiguation suffix. Once assigned it is immutable: updates never
//! re-derive it, so project URLs stay stable across title edits.

/// Fallback for titles that contain no ASCII alphanumerics at all.
const EMPTY_TITLE_SLUG: &str = "project";

/// Derive the base slug for a title.
///
/// Lowercases, maps every non-alphanumeric character to a hyphen, collapses
/// consecutive hyphens, and trims leading/trailing hyphens.
pub fn slugify(title: &str) -> String {
    let mapped: String = title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();

    let mut slug = String::with_capacity(mapped.len());
    let mut prev_hyphen = false;
    for c in mapped.chars() {
        if c == '-' {
            if !prev_hyphen {
                slug.push('-');
            }
            prev_hyphen = true;
        } else {
            slug.push(c);
            prev_hyphen = false;
        }
    }

    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        EMPTY_TITLE_SLUG.to_string()
    } else {
        slug.to_string()
    }
}

/// The n-th disambiguation candidate for a base slug (`base-1`, `base-2`, ...).
pub fn numbered(base: &str, n: u32) -> String {
    format!("{base}-{n}")
}

/// Check that a string is a well-formed slug (lowercase alphanumerics and
/// hyphens only, non-empty).
pub fn is_valid(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_the_documented_example() {
        assert_eq!(slugify("My Portfolio Site!!"), "my-portfolio-site");
    }

    #[test]
    fn collapses_runs_of_punctuation_and_whitespace() {
        assert_eq!(slugify("  Hello,   World --- 2024  "), "hello-world-2024");
    }

    #[test]
    fn is_deterministic() {
        assert_eq!(slugify("Same Title"), slugify("Same Title"));
    }

    #[test]
    fn falls_back_for_titles_without_alphanumerics() {
        assert_eq!(slugify("!!!"), "project");
        assert_eq!(slugify(""), "project");
    }

    #[test]
    fn numbered_candidates_append_a_suffix() {
        assert_eq!(numbered("my-portfolio-site", 1), "my-portfolio-site-1");
        assert_eq!(numbered("my-portfolio-site", 12), "my-portfolio-site-12");
    }

    #[test]
    fn generated_slugs_are_always_valid() {
        for title in ["Plain", "With Spaces", "Ünicode Töö", "123 go", "!!!"] {
            assert!(is_valid(&slugify(title)), "slugify({title:?}) produced an invalid slug");
        }
    }
}
