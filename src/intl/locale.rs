//! Locale tag helpers

/// Locale used when none of the available locales satisfies a request
///
/// English is the most common second language, and en-GB is more
/// representative of the English used in other locales than en-US.
pub fn last_ditch_locale() -> &'static str {
    "en-GB"
}

/// Map a BCP 47 tag to the formatting library's locale name
///
/// `und` is the library's root locale, spelled as the empty string.
pub fn icu_locale(locale: &str) -> &str {
    if locale == "und" {
        ""
    } else {
        locale
    }
}

/// Old tags lacking a script subtag that nonetheless imply one
pub const OLD_STYLE_LANGUAGE_TAG_MAPPINGS: [(&str, &str); 5] = [
    ("pa-PK", "pa-Arab-PK"),
    ("zh-CN", "zh-Hans-CN"),
    ("zh-HK", "zh-Hant-HK"),
    ("zh-SG", "zh-Hans-SG"),
    ("zh-TW", "zh-Hant-TW"),
];

/// The modern equivalent of an old-style tag, if `tag` is one
pub fn modern_language_tag(tag: &str) -> Option<&'static str> {
    OLD_STYLE_LANGUAGE_TAG_MAPPINGS
        .iter()
        .find(|(old, _)| old.eq_ignore_ascii_case(tag))
        .map(|(_, modern)| *modern)
}
