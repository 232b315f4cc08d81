//! Document domain model.

use rand::Rng;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Title given to new documents and to documents renamed to a blank title.
pub const DEFAULT_DOCUMENT_TITLE: &str = "Untitled Document";

const ID_SUFFIX_LEN: usize = 8;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// The platform or format a document is written for.
///
/// The type conditions how action instructions are phrased to the backend.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum DocumentType {
    Blog,
    Essay,
    LinkedIn,
    X,
    Threads,
    Reddit,
    #[default]
    Custom,
    Email,
    Newsletter,
}

impl DocumentType {
    /// Types offered by default in the allowlist.
    pub const CORE: [DocumentType; 7] = [
        DocumentType::Blog,
        DocumentType::Essay,
        DocumentType::LinkedIn,
        DocumentType::X,
        DocumentType::Threads,
        DocumentType::Reddit,
        DocumentType::Custom,
    ];

    /// Short description shown next to the type in pickers.
    pub fn description(&self) -> &'static str {
        match self {
            DocumentType::Blog => "Blog posts with clear sections and engaging flow",
            DocumentType::Essay => "Formal, structured pieces with thesis and arguments",
            DocumentType::LinkedIn => "Professional content for the LinkedIn platform",
            DocumentType::X => "Short-form content for X (Twitter)",
            DocumentType::Threads => "Content for Instagram's Threads platform",
            DocumentType::Reddit => "Content for Reddit with clear points for discussion",
            DocumentType::Custom => "Custom document type with no specific format",
            DocumentType::Email => "Email messages with a clear ask",
            DocumentType::Newsletter => "Newsletter issues for a subscriber audience",
        }
    }
}

/// A single user-authored document in the history.
///
/// Timestamps are Unix epoch milliseconds. `last_modified` never decreases
/// for a given document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Unique identifier, stable for the document's lifetime
    pub id: String,
    pub title: String,
    /// Raw markdown/HTML text
    pub content: String,
    /// Creation time
    pub timestamp: i64,
    pub last_modified: i64,
    #[serde(rename = "document_type", default)]
    pub document_type: DocumentType,
}

impl Document {
    /// Creates an empty, untitled document of the given type.
    pub fn new(document_type: DocumentType, now_millis: i64) -> Self {
        Self {
            id: generate_document_id(now_millis),
            title: DEFAULT_DOCUMENT_TITLE.to_string(),
            content: String::new(),
            timestamp: now_millis,
            last_modified: now_millis,
            document_type,
        }
    }

    /// Applies a rename, coercing blank titles to the default title.
    pub fn rename(&mut self, title: &str) {
        let trimmed = title.trim();
        self.title = if trimmed.is_empty() {
            DEFAULT_DOCUMENT_TITLE.to_string()
        } else {
            title.to_string()
        };
    }

    /// Writes new content and bumps `last_modified`.
    ///
    /// `last_modified` is clamped so that it never moves backwards even if
    /// the wall clock does.
    pub fn commit_content(&mut self, content: String, now_millis: i64) {
        self.content = content;
        self.last_modified = self.last_modified.max(now_millis);
    }
}

/// Builds a document id of the form `{millis}-{8 base36 chars}`.
pub fn generate_document_id(now_millis: i64) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("{}-{}", now_millis, suffix)
}

/// Returns the document with the greatest `last_modified`, if any.
///
/// Ties resolve to the earliest document in collection order.
pub fn most_recent(documents: &[Document]) -> Option<&Document> {
    documents.iter().fold(None, |best: Option<&Document>, doc| match best {
        Some(current) if doc.last_modified <= current.last_modified => Some(current),
        _ => Some(doc),
    })
}

/// Current wall-clock time in Unix milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_new_document_defaults() {
        let doc = Document::new(DocumentType::Blog, 1_000);
        assert_eq!(doc.title, DEFAULT_DOCUMENT_TITLE);
        assert!(doc.content.is_empty());
        assert_eq!(doc.timestamp, 1_000);
        assert_eq!(doc.last_modified, 1_000);
        assert_eq!(doc.document_type, DocumentType::Blog);
        assert!(doc.id.starts_with("1000-"));
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = generate_document_id(42);
        let b = generate_document_id(42);
        assert_ne!(a, b);
        assert_eq!(a.len(), "42-".len() + ID_SUFFIX_LEN);
    }

    #[test]
    fn test_rename_blank_title_uses_default() {
        let mut doc = Document::new(DocumentType::Custom, 1);
        doc.rename("Draft");
        assert_eq!(doc.title, "Draft");
        doc.rename("   ");
        assert_eq!(doc.title, DEFAULT_DOCUMENT_TITLE);
        doc.rename("");
        assert_eq!(doc.title, DEFAULT_DOCUMENT_TITLE);
    }

    #[test]
    fn test_commit_content_never_moves_backwards() {
        let mut doc = Document::new(DocumentType::Custom, 500);
        doc.commit_content("hello".into(), 100);
        assert_eq!(doc.content, "hello");
        assert_eq!(doc.last_modified, 500);
        doc.commit_content("hello world".into(), 900);
        assert_eq!(doc.last_modified, 900);
    }

    #[test]
    fn test_most_recent() {
        let mut a = Document::new(DocumentType::Custom, 100);
        a.id = "a".into();
        let mut b = Document::new(DocumentType::Custom, 200);
        b.id = "b".into();
        let docs = vec![a, b];
        assert_eq!(most_recent(&docs).unwrap().id, "b");
        assert!(most_recent(&[]).is_none());
    }

    #[test]
    fn test_serde_shape() {
        let mut doc = Document::new(DocumentType::LinkedIn, 7);
        doc.id = "7-abc".into();
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["lastModified"], 7);
        assert_eq!(json["document_type"], "LinkedIn");

        let legacy = r#"{"id":"1","title":"t","content":"c","timestamp":1,"lastModified":2}"#;
        let parsed: Document = serde_json::from_str(legacy).unwrap();
        assert_eq!(parsed.document_type, DocumentType::Custom);
    }

    #[test]
    fn test_document_type_parsing() {
        assert_eq!(DocumentType::from_str("linkedin").unwrap(), DocumentType::LinkedIn);
        assert_eq!(DocumentType::from_str("X").unwrap(), DocumentType::X);
        assert!(DocumentType::from_str("Tweet").is_err());
        assert_eq!(DocumentType::Newsletter.to_string(), "Newsletter");
    }
}
