use once_cell::sync::Lazy;
use regex::Regex;

static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"http\S+|www\S+").expect("valid regex"));
static NON_ALNUM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9\s]+").expect("valid regex"));

/// Strip URLs and punctuation, lower-case and trim.
/// Idempotent: cleaning already-clean text is a no-op.
pub fn clean_text(text: &str) -> String {
    let stripped = URL_RE.replace_all(text, "");
    let stripped = NON_ALNUM_RE.replace_all(&stripped, "");
    stripped.to_lowercase().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_urls_and_punctuation() {
        let cleaned = clean_text("Breaking: markets rally! https://example.com/x?y=1");
        assert_eq!(cleaned, "breaking markets rally");
    }

    #[test]
    fn strips_www_links() {
        assert_eq!(clean_text("see www.example.com for more"), "see  for more");
    }

    #[test]
    fn lowercases_and_trims() {
        assert_eq!(clean_text("  Fed Holds RATES  "), "fed holds rates");
    }

    #[test]
    fn idempotent_on_clean_input() {
        let once = clean_text("tech layoffs continue in 2024");
        let twice = clean_text(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(clean_text(""), "");
        assert_eq!(clean_text("!!!"), "");
    }
}
