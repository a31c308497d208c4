use crate::locale::{DEFAULT_LANGUAGE, is_supported};
use crate::utils::log_msg;
use std::env;

pub use rust_i18n::t;

/// The browser-style language tag of this session, e.g. `pt-BR`.
pub fn detect_browser_language(preferred: Option<&str>) -> String {
    first_language([
        preferred.map(str::to_string),
        sys_locale::get_locale(),
        env::var("LANG").ok(),
    ])
}

/// First candidate that names a language; `C`-style locales are skipped.
fn first_language<I>(candidates: I) -> String
where
    I: IntoIterator<Item = Option<String>>,
{
    candidates
        .into_iter()
        .flatten()
        .find_map(|raw| normalize_tag(&raw))
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string())
}

/// `pt_BR.UTF-8` -> `pt-BR`. `C` and `POSIX` carry no language.
fn normalize_tag(raw: &str) -> Option<String> {
    let tag = raw.split(['.', '@']).next().unwrap_or_default().trim();
    if tag.is_empty() || tag == "C" || tag == "POSIX" {
        return None;
    }
    Some(tag.replace('_', "-"))
}

/// Switches the translation catalog. Codes outside the whitelist are still
/// applied; lookups then fall back to the default catalog.
pub fn activate(code: &str) {
    if !is_supported(code) {
        log_msg("warn", &format!("Activating unsupported language {code}"));
    }
    rust_i18n::set_locale(code);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn posix_locales_become_language_tags() {
        assert_eq!(normalize_tag("pt_BR.UTF-8").as_deref(), Some("pt-BR"));
        assert_eq!(normalize_tag("en_US@euro").as_deref(), Some("en-US"));
        assert_eq!(normalize_tag("en-GB").as_deref(), Some("en-GB"));
        assert_eq!(normalize_tag("C.UTF-8"), None);
        assert_eq!(normalize_tag(""), None);
    }

    #[test]
    fn posix_placeholder_falls_through_to_next_source() {
        let lang = first_language([None, Some("C".to_string()), Some("en_US.UTF-8".to_string())]);
        assert_eq!(lang, "en-US");
        assert_eq!(
            first_language([Some("POSIX".to_string()), None]),
            DEFAULT_LANGUAGE
        );
    }

    #[test]
    fn explicit_preference_wins() {
        assert_eq!(detect_browser_language(Some("en_GB.UTF-8")), "en-GB");
        assert_eq!(detect_browser_language(Some("C")), DEFAULT_LANGUAGE);
    }
}
