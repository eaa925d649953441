//! Index tab entries: a hyperlink row per month tab, newest first.

use std::sync::OnceLock;

use regex::Regex;

use workdiary_core::TabTitle;

use crate::error::ReferenceError;

/// Extract the `#gid=<digits>` fragment identifying a tab from its URL.
pub fn tab_reference(url: &str) -> Result<String, ReferenceError> {
    gid_pattern()
        .find(url)
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| ReferenceError {
            url: url.to_string(),
        })
}

/// `=HYPERLINK("<reference>", "<title>")`, with quotes doubled for the formula parser.
pub fn hyperlink_formula(reference: &str, title: &TabTitle) -> String {
    format!(
        "=HYPERLINK(\"{}\", \"{}\")",
        escape(reference),
        escape(title.as_str())
    )
}

fn escape(text: &str) -> String {
    text.replace('"', "\"\"")
}

fn gid_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"#gid=\d+").expect("static gid pattern"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://docs.google.com/spreadsheets/d/abc/edit#gid=0", "#gid=0")]
    #[case("https://docs.google.com/spreadsheets/d/abc/edit#gid=1520337", "#gid=1520337")]
    #[case("memory://diary#gid=7&range=A1", "#gid=7")]
    fn reference_from_url(#[case] url: &str, #[case] expected: &str) {
        assert_eq!(tab_reference(url).expect("reference"), expected);
    }

    #[rstest]
    #[case("https://docs.google.com/spreadsheets/d/abc/edit")]
    #[case("https://docs.google.com/spreadsheets/d/abc/edit#gid=")]
    #[case("https://docs.google.com/spreadsheets/d/abc/edit#gid=abc")]
    fn url_without_gid_fails(#[case] url: &str) {
        let err = tab_reference(url).unwrap_err();
        assert_eq!(err.url, url);
        assert!(err.to_string().contains("#gid"));
    }

    #[test]
    fn formula_links_reference_and_title() {
        let formula = hyperlink_formula("#gid=42", &TabTitle::from("2024年02月"));
        assert_eq!(formula, r##"=HYPERLINK("#gid=42", "2024年02月")"##);
    }

    #[test]
    fn formula_escapes_quotes() {
        let formula = hyperlink_formula("#gid=1", &TabTitle::from("a\"b"));
        assert_eq!(formula, r##"=HYPERLINK("#gid=1", "a""b")"##);
    }
}
