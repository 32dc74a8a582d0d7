use once_cell::sync::Lazy;
use regex::Regex;

/// Structured result of parsing a combined display-name field.
///
/// The upstream feed writes the field as `"<Last>, <First> (<email>)"`;
/// older exports used `"(<email>): <Last>, <First>"`. Both shapes parse.
/// Absent pieces come back as `None` rather than failing the row: a record
/// without parentheses simply has no email, and a single-token name has no
/// first name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEmailName {
    pub email: Option<String>,
    pub last_name: Option<String>,
    pub first_name: Option<String>,
}

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(([^)]+)\)").unwrap());
static NAME_AFTER_PAREN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\):\s*(.*)").unwrap());

/// Parses a combined display-name value into email and name parts.
pub fn parse_email_name(raw: &str) -> ParsedEmailName {
    let email = EMAIL_RE
        .captures(raw)
        .map(|caps| caps[1].trim().to_string())
        .filter(|s| !s.is_empty());

    // Name text lives after a "):" marker in the old layout, otherwise
    // before the first parenthesis.
    let name_text = match NAME_AFTER_PAREN_RE.captures(raw) {
        Some(caps) => caps[1].trim().to_string(),
        None => match raw.split_once('(') {
            Some((before, _)) => before.trim().to_string(),
            None => raw.trim().to_string(),
        },
    };

    let (last_name, first_name) = split_name(&name_text);

    ParsedEmailName {
        email,
        last_name,
        first_name,
    }
}

/// Splits `"Last, First"` on the first comma. A single token is a last name
/// with no first name; this is tolerated, not an error.
fn split_name(name_text: &str) -> (Option<String>, Option<String>) {
    if name_text.is_empty() {
        return (None, None);
    }
    match name_text.split_once(',') {
        Some((last, first)) => {
            let last = last.trim();
            let first = first.trim();
            (
                (!last.is_empty()).then(|| last.to_string()),
                (!first.is_empty()).then(|| first.to_string()),
            )
        }
        None => (Some(name_text.to_string()), None),
    }
}
