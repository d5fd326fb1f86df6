//! Recognition result model: a result holds zero or more recognized
//! documents; each document carries an attribute map (always including
//! `type`) and an ordered list of named text fields. Field values are OCR
//! strings with one or more candidate readings.

use std::collections::HashMap;

/// A recognized text value: one or more candidate readings, best first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcrString {
    candidates: Vec<String>,
}

impl OcrString {
    /// Build from candidate readings. At least one candidate is expected;
    /// an empty list yields an empty first string.
    pub fn new(candidates: Vec<String>) -> Self {
        OcrString { candidates }
    }

    /// The primary (first) candidate reading.
    pub fn first_string(&self) -> &str {
        self.candidates.first().map(String::as_str).unwrap_or("")
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }
}

impl From<String> for OcrString {
    fn from(s: String) -> Self {
        OcrString { candidates: vec![s] }
    }
}

/// A named recognized field on a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextField {
    key: String,
    value: OcrString,
}

impl TextField {
    pub fn new(key: impl Into<String>, value: OcrString) -> Self {
        TextField {
            key: key.into(),
            value,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &OcrString {
        &self.value
    }
}

/// One recognized document: attributes plus ordered text fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    attributes: HashMap<String, String>,
    fields: Vec<TextField>,
}

impl Document {
    /// Create a document of the given type. The `type` attribute is always
    /// present.
    pub fn new(doc_type: impl Into<String>) -> Self {
        let mut attributes = HashMap::new();
        attributes.insert("type".to_string(), doc_type.into());
        Document {
            attributes,
            fields: Vec::new(),
        }
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// The `type` attribute.
    pub fn doc_type(&self) -> &str {
        self.attribute("type").unwrap_or("")
    }

    pub fn push_field(&mut self, field: TextField) {
        self.fields.push(field);
    }

    /// Fields in recognition order.
    pub fn fields(&self) -> &[TextField] {
        &self.fields
    }
}

/// Result of one processing invocation. Owned by the session; cloned out by
/// callers that need it past the session's lifetime.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocResult {
    documents: Vec<Document>,
}

impl DocResult {
    pub fn new(documents: Vec<Document>) -> Self {
        DocResult { documents }
    }

    pub fn documents_count(&self) -> usize {
        self.documents.len()
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// The best-ranked document, if any.
    pub fn first_document(&self) -> Option<&Document> {
        self.documents.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_attribute_is_always_present() {
        let doc = Document::new("passport");
        assert_eq!(doc.doc_type(), "passport");
        assert_eq!(doc.attribute("type"), Some("passport"));
        assert_eq!(doc.attribute("country"), None);
    }

    #[test]
    fn first_string_of_empty_ocr_string_is_empty() {
        assert_eq!(OcrString::new(vec![]).first_string(), "");
        let s = OcrString::new(vec!["JOHN".into(), "J0HN".into()]);
        assert_eq!(s.first_string(), "JOHN");
        assert_eq!(s.candidates().len(), 2);
    }

    #[test]
    fn fields_keep_insertion_order() {
        let mut doc = Document::new("passport");
        doc.push_field(TextField::new("surname", OcrString::from("DOE".to_string())));
        doc.push_field(TextField::new("name", OcrString::from("JOHN".to_string())));
        let keys: Vec<&str> = doc.fields().iter().map(TextField::key).collect();
        assert_eq!(keys, ["surname", "name"]);
    }
}
