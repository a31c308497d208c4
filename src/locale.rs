use regex::Regex;
use std::sync::LazyLock;

pub const SUPPORTED_LANGUAGES: &[&str] = &["pt", "en"];
pub const DEFAULT_LANGUAGE: &str = "pt";

/// Prefix used for API requests when the path carries none.
pub const API_FALLBACK_PREFIX: &str = "en";

static PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/([a-z]{2})/").expect("valid prefix pattern"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocaleAction {
    NoOp,
    SetLanguage(String),
    /// Replace the current history entry with this path.
    Redirect(String),
}

/// Two-letter language segment at the start of `path`, if any.
///
/// Only the shape is checked, so `/fr/page` yields `fr` even though it is
/// not a supported language.
pub fn path_language(path: &str) -> Option<&str> {
    PREFIX_RE
        .captures(path)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Language segment used to build API URLs.
pub fn language_prefix(path: &str) -> &str {
    path_language(path).unwrap_or(API_FALLBACK_PREFIX)
}

pub fn primary_subtag(locale: &str) -> &str {
    locale.split('-').next().unwrap_or_default()
}

pub fn is_supported(code: &str) -> bool {
    SUPPORTED_LANGUAGES.contains(&code)
}

/// Language a prefix-less path is redirected to.
pub fn default_language_for(browser_language: &str) -> &'static str {
    let primary = primary_subtag(browser_language);
    SUPPORTED_LANGUAGES
        .iter()
        .copied()
        .find(|code| *code == primary)
        .unwrap_or(DEFAULT_LANGUAGE)
}

pub fn resolve(current_path: &str, current_language: &str, browser_language: &str) -> LocaleAction {
    if let Some(code) = path_language(current_path) {
        return if code == current_language {
            LocaleAction::NoOp
        } else {
            LocaleAction::SetLanguage(code.to_string())
        };
    }

    let lang = default_language_for(browser_language);
    let new_path = if current_path.starts_with('/') {
        format!("/{lang}{current_path}")
    } else {
        format!("/{lang}/{current_path}")
    };
    LocaleAction::Redirect(new_path)
}

/// Same path with its language segment swapped for `lang`.
pub fn with_language(path: &str, lang: &str) -> String {
    match path_language(path) {
        // prefix match guarantees "/xx" is three ASCII bytes
        Some(_) => format!("/{lang}{}", &path[3..]),
        None if path.starts_with('/') => format!("/{lang}{path}"),
        None => format!("/{lang}/{path}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_prefix_is_noop() {
        assert_eq!(resolve("/en/blog", "en", "en"), LocaleAction::NoOp);
        assert_eq!(resolve("/pt/", "pt", "en-US"), LocaleAction::NoOp);
    }

    #[test]
    fn differing_prefix_switches_without_whitelist_check() {
        assert_eq!(
            resolve("/fr/blog", "en", "en"),
            LocaleAction::SetLanguage("fr".to_string())
        );
        assert_eq!(
            resolve("/pt/sobre", "en", "de"),
            LocaleAction::SetLanguage("pt".to_string())
        );
    }

    #[test]
    fn missing_prefix_redirects_to_browser_language_or_default() {
        assert_eq!(
            resolve("/blog", "en", "de"),
            LocaleAction::Redirect("/pt/blog".to_string())
        );
        assert_eq!(
            resolve("/blog", "en", "pt"),
            LocaleAction::Redirect("/pt/blog".to_string())
        );
        assert_eq!(
            resolve("/blog", "pt", "en-GB"),
            LocaleAction::Redirect("/en/blog".to_string())
        );
        // primary subtag keeps its case, so this is not "en"
        assert_eq!(
            resolve("/blog", "pt", "EN-us"),
            LocaleAction::Redirect("/pt/blog".to_string())
        );
    }

    #[test]
    fn prefix_shape_must_be_exact() {
        for path in ["/abc/page", "/en", "/EN/page", "/e/page", "en/page", "", "/"] {
            match resolve(path, "en", "en") {
                LocaleAction::Redirect(new_path) => {
                    assert!(new_path.starts_with("/en/"), "{path} -> {new_path}");
                    assert!(new_path.ends_with(path.trim_start_matches('/')));
                }
                other => panic!("{path} should redirect, got {other:?}"),
            }
        }
    }

    #[test]
    fn redirect_appends_the_requested_path() {
        let LocaleAction::Redirect(new_path) = resolve("/blog/7?x=1", "pt", "pt-BR") else {
            panic!("expected redirect");
        };
        assert_eq!(new_path, "/pt/blog/7?x=1");
        assert!(matches!(
            resolve(&new_path, "pt", "pt-BR"),
            LocaleAction::NoOp
        ));
    }

    #[test]
    fn api_prefix_falls_back_to_english() {
        assert_eq!(language_prefix("/pt/blog"), "pt");
        assert_eq!(language_prefix("/fr/blog"), "fr");
        assert_eq!(language_prefix("/blog"), "en");
    }

    #[test]
    fn swaps_language_segment() {
        assert_eq!(with_language("/pt/blog/3", "en"), "/en/blog/3");
        assert_eq!(with_language("/pt/", "en"), "/en/");
        assert_eq!(with_language("/faq", "en"), "/en/faq");
    }
}
