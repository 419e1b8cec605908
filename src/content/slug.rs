//! Slug derivation and the collation used for slug uniqueness.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::models::article::Article;

/// Slug assigned when a title produces an empty slug.
pub const FALLBACK_SLUG: &str = "artikel-baru";

/// Comparison used for slug uniqueness and lookups.
///
/// Kept behind a trait so the collation is an explicit dependency of the
/// store and repository rather than an implicit detail of string equality.
pub trait SlugCollation: Send + Sync {
    fn eq(&self, left: &str, right: &str) -> bool;
}

/// Case- and diacritic-insensitive comparison: NFKD decomposition with
/// combining marks stripped, then lowercased.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseCollation;

impl BaseCollation {
    fn fold(value: &str) -> String {
        value
            .nfkd()
            .filter(|c| !is_combining_mark(*c))
            .flat_map(char::to_lowercase)
            .collect()
    }
}

impl SlugCollation for BaseCollation {
    fn eq(&self, left: &str, right: &str) -> bool {
        BaseCollation::fold(left) == BaseCollation::fold(right)
    }
}

/// Derive a URL-safe slug from a title: lowercase, diacritics stripped,
/// non-alphanumerics removed, whitespace runs to hyphens, hyphen runs
/// collapsed.
pub fn slugify(value: &str) -> String {
    let folded: String = value
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || *c == '-')
        .collect();

    let mut slug = String::with_capacity(folded.len());
    let mut last_was_hyphen = false;
    for c in folded.trim().chars() {
        let mapped = if c.is_whitespace() { '-' } else { c };
        if mapped == '-' {
            if !last_was_hyphen {
                slug.push('-');
            }
            last_was_hyphen = true;
        } else {
            slug.push(mapped);
            last_was_hyphen = false;
        }
    }
    slug
}

/// Resolve slug collisions against the existing collection by appending
/// `-2`, `-3`, ... until unique.
pub fn unique_slug(base: &str, existing: &[Article], collation: &dyn SlugCollation) -> String {
    let fallback = if base.is_empty() { FALLBACK_SLUG } else { base };
    let mut next = fallback.to_string();
    let mut counter = 2u32;

    while existing.iter().any(|article| collation.eq(&article.slug, &next)) {
        next = format!("{fallback}-{counter}");
        counter += 1;
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::models::article::ArticleStatus;

    fn article_with_slug(slug: &str) -> Article {
        let now = Utc::now();
        Article {
            id: slug.to_string(),
            slug: slug.to_string(),
            title: slug.to_string(),
            excerpt: "e".to_string(),
            body: "b".to_string(),
            tags: vec![],
            status: ArticleStatus::Draft,
            author: "a".to_string(),
            read_time_minutes: 1,
            created_at: now,
            updated_at: now,
            published_at: None,
        }
    }

    #[test]
    fn slugify_lowercases_and_hyphenates() {
        assert_eq!(slugify("Napas 90 detik saat pikiran ramai"), "napas-90-detik-saat-pikiran-ramai");
    }

    #[test]
    fn slugify_strips_diacritics_and_symbols() {
        assert_eq!(slugify("Café, résumé & méditasi!"), "cafe-resume-meditasi");
    }

    #[test]
    fn slugify_collapses_hyphen_runs() {
        assert_eq!(slugify("Grounding 5-4-3-2-1 -- cepat"), "grounding-5-4-3-2-1-cepat");
    }

    #[test]
    fn slugify_empty_title_yields_empty_slug() {
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn unique_slug_falls_back_when_empty() {
        assert_eq!(unique_slug("", &[], &BaseCollation), FALLBACK_SLUG);
    }

    #[test]
    fn unique_slug_appends_counters() {
        let existing = vec![article_with_slug("napas-dulu"), article_with_slug("napas-dulu-2")];
        assert_eq!(unique_slug("napas-dulu", &existing, &BaseCollation), "napas-dulu-3");
    }

    #[test]
    fn collation_ignores_case_and_diacritics() {
        let collation = BaseCollation;
        assert!(collation.eq("cafe", "CAFÉ"));
        assert!(collation.eq("resume", "résumé"));
        assert!(!collation.eq("cafe", "cafes"));
    }

    #[test]
    fn unique_slug_collides_across_diacritics() {
        let existing = vec![article_with_slug("café")];
        assert_eq!(unique_slug("cafe", &existing, &BaseCollation), "cafe-2");
    }
}
