//! Query construction for the Solr-backed verification service.
//!
//! Two filter shapes are produced: a wildcard substring match over the
//! instrument identifiers and an exact phrase over the verifying organization.
//! The query language needs a literal `*`, so query strings are percent-encoded
//! and then have `%2A` restored.

/// Solr fields holding the instrument serial and type registry number.
pub const SERIAL_FIELD: &str = "mi.number";
pub const TYPE_NUMBER_FIELD: &str = "mi.mitnumber";
pub const ORG_FIELD: &str = "org_title";

/// Fields requested from the verification service.
pub const VERIFICATION_FIELDS: &[&str] = &[
    "vri_id",
    "org_title",
    "mi.mitnumber",
    "mi.mititle",
    "mi.mitype",
    "mi.modification",
    "mi.number",
    "verification_date",
    "valid_date",
];

/// Newest verification first, so the first document is the latest event.
pub const VERIFICATION_SORT: &str = "verification_date desc";

/// Characters with meaning in the Solr standard query parser.
const SOLR_SPECIAL: &[char] = &[
    '\\', '+', '-', '!', '(', ')', '{', '}', '[', ']', '^', '"', '~', '*', '?', ':', '/', '&',
    '|', ' ',
];

/// Backslash-escape every Solr operator in a term meant for a wildcard query.
#[must_use]
pub fn escape_term(term: &str) -> String {
    let mut out = String::with_capacity(term.len() + 8);
    for c in term.trim().chars() {
        if SOLR_SPECIAL.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Escape `"` and `\` for use inside a quoted phrase.
#[must_use]
pub fn escape_phrase(phrase: &str) -> String {
    let mut out = String::with_capacity(phrase.len() + 4);
    for c in phrase.trim().chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// `(mi.number:*term* OR mi.mitnumber:*term*)`
#[must_use]
pub fn wildcard_filter(term: &str) -> String {
    let escaped = escape_term(term);
    format!("({SERIAL_FIELD}:*{escaped}* OR {TYPE_NUMBER_FIELD}:*{escaped}*)")
}

/// `org_title:"phrase"`
#[must_use]
pub fn org_filter(org_name: &str) -> String {
    format!("{ORG_FIELD}:\"{}\"", escape_phrase(org_name))
}

/// Percent-encode a query value but keep `*` literal.
#[must_use]
pub fn encode_keep_wildcard(value: &str) -> String {
    urlencoding::encode(value).replace("%2A", "*")
}

/// Full `select` query string (without the leading `?`).
#[must_use]
pub fn select_query(filter: &str, rows: u32, start: u32) -> String {
    format!(
        "q=*&fq={}&fl={}&sort={}&rows={rows}&start={start}&wt=json",
        encode_keep_wildcard(filter),
        encode_keep_wildcard(&VERIFICATION_FIELDS.join(",")),
        encode_keep_wildcard(VERIFICATION_SORT),
    )
}

/// Start offsets of the pages after the first one.
///
/// `total_found` is capped at `max_total`; the first page (offset 0) is
/// assumed already fetched.
#[must_use]
pub fn remaining_offsets(total_found: u64, max_total: u32, page_size: u32) -> Vec<u32> {
    if page_size == 0 {
        return Vec::new();
    }
    let wanted = u32::try_from(total_found.min(u64::from(max_total))).unwrap_or(max_total);
    (1..wanted.div_ceil(page_size))
        .map(|page| page * page_size)
        .collect()
}
