//! Mapping of raw registry documents onto normalized records.
//!
//! Two source schemas are understood:
//! - VRI verification documents from the Solr service (`vri_id`, `mi.number`,
//!   `mi.mitnumber`, `valid_date`, ...)
//! - MIT type-approval items (`mit_uuid`, `number`, `title`, `notation`)
//!
//! Every function here is total: missing or oddly-typed fields become empty
//! strings or `None`. A document is dropped only when it has no name, serial
//! or registry number to identify it by.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

use verisync_core::entities::{ExternalVerificationRecord, TypeApprovalRecord};

/// Normalize a VRI verification document.
#[must_use]
pub fn match_verification(doc: &Value) -> Option<ExternalVerificationRecord> {
    let record = ExternalVerificationRecord {
        instrument_name: text(doc, &["mi.mititle", "mit_title"]),
        instrument_type: text(doc, &["mi.mitype", "mit_notation", "mi.modification"]),
        serial_number: text(doc, &["mi.number", "mi_number"]),
        type_registry_number: text(doc, &["mi.mitnumber", "mit_number"]),
        organization: text(doc, &["org_title"]),
        verification_date: date(doc, &["verification_date"]),
        valid_until_date: date(doc, &["valid_date", "valid_until"]),
        source_record_id: text(doc, &["vri_id"]),
    };

    let identifiable = !(record.instrument_name.is_empty()
        && record.serial_number.is_empty()
        && record.type_registry_number.is_empty());
    identifiable.then_some(record)
}

/// Normalize every usable document of a VRI page, keeping order.
#[must_use]
pub fn match_verifications(docs: &[Value]) -> Vec<ExternalVerificationRecord> {
    docs.iter().filter_map(match_verification).collect()
}

/// Normalize an MIT type-approval item.
#[must_use]
pub fn match_type_approval(doc: &Value) -> Option<TypeApprovalRecord> {
    let record = TypeApprovalRecord {
        registry_number: text(doc, &["number", "mit_number"]),
        title: text(doc, &["title", "mit_title"]),
        notation: text(doc, &["notation", "mit_notation"]),
        source_record_id: text(doc, &["mit_uuid", "mit_id"]),
    };

    let identifiable = !(record.title.is_empty() && record.registry_number.is_empty());
    identifiable.then_some(record)
}

/// Pick the authoritative record among search results.
///
/// The latest `verification_date` wins; undated records rank last; ties keep
/// the earlier position, i.e. the registry's own relevance order.
#[must_use]
pub fn select_best_match(
    records: impl IntoIterator<Item = ExternalVerificationRecord>,
) -> Option<ExternalVerificationRecord> {
    let mut best: Option<ExternalVerificationRecord> = None;
    for record in records {
        let better = match &best {
            None => true,
            Some(current) => record.verification_date > current.verification_date,
        };
        if better {
            best = Some(record);
        }
    }
    best
}

/// Parse the date formats the registry has been seen to emit.
#[must_use]
pub fn parse_registry_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d.%m.%Y"))
        .ok()
}

/// First non-blank value among `keys`, stringified.
fn text(doc: &Value, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|key| doc.get(*key))
        .map(stringify)
        .find(|s| !s.is_empty())
        .unwrap_or_default()
}

fn date(doc: &Value, keys: &[&str]) -> Option<NaiveDate> {
    keys.iter()
        .filter_map(|key| doc.get(*key))
        .find_map(|value| parse_registry_date(&stringify(value)))
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => items
            .iter()
            .map(stringify)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Value::Null | Value::Object(_) => String::new(),
    }
}
