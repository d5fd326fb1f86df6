//! JSON output emitter.
//!
//! The output byte format is a compatibility contract consumed by downstream
//! tooling, so it is emitted by hand rather than through serde_json:
//! `{}` for an empty result, otherwise the first document only, with a
//! `DOCTYPE` key followed by one key per text field in field order. Values
//! escape embedded double quotes and nothing else; this narrow policy is
//! part of the contract.

use crate::engine::result::DocResult;

/// Render a recognition result to its JSON line (without trailing newline).
pub fn result_to_json(result: &DocResult) -> String {
    let doc = match result.first_document() {
        Some(doc) => doc,
        None => return "{}".to_string(),
    };

    let mut out = String::new();
    out.push_str("{\"DOCTYPE\": \"");
    out.push_str(doc.doc_type());
    out.push('"');
    for field in doc.fields() {
        out.push_str(",\"");
        out.push_str(field.key());
        out.push_str("\": \"");
        out.push_str(&escape_quotes(field.value().first_string()));
        out.push('"');
    }
    out.push('}');
    out
}

fn escape_quotes(value: &str) -> String {
    value.replace('"', "\\\"")
}
