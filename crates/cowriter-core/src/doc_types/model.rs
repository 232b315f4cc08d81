//! Document-type allowlist model.

use serde::{Deserialize, Serialize};

use crate::document::DocumentType;

/// Outcome of toggling a type in the allowlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    /// The type was the last member; nothing changed.
    Refused,
}

/// The user-curated subset of document types offered when creating or
/// retyping documents.
///
/// Never empty: construction from an empty list fails and removing the last
/// member is refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DocumentTypeAllowlist(Vec<DocumentType>);

impl DocumentTypeAllowlist {
    /// Builds an allowlist, dropping duplicates. `None` if `types` is empty.
    pub fn new(types: Vec<DocumentType>) -> Option<Self> {
        let mut unique: Vec<DocumentType> = Vec::with_capacity(types.len());
        for t in types {
            if !unique.contains(&t) {
                unique.push(t);
            }
        }
        (!unique.is_empty()).then_some(Self(unique))
    }

    pub fn types(&self) -> &[DocumentType] {
        &self.0
    }

    pub fn contains(&self, document_type: DocumentType) -> bool {
        self.0.contains(&document_type)
    }

    /// The type given to newly created documents.
    pub fn first(&self) -> DocumentType {
        self.0.first().copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Adds the type if absent, removes it if present.
    ///
    /// Removing the last remaining member is refused.
    pub fn toggle(&mut self, document_type: DocumentType) -> ToggleOutcome {
        if let Some(pos) = self.0.iter().position(|t| *t == document_type) {
            if self.0.len() <= 1 {
                return ToggleOutcome::Refused;
            }
            self.0.remove(pos);
            ToggleOutcome::Removed
        } else {
            self.0.push(document_type);
            ToggleOutcome::Added
        }
    }

    /// Options to offer when editing a specific document.
    ///
    /// A document keeps its type even after that type leaves the allowlist;
    /// such a type is offered first, ahead of the normal options.
    pub fn selectable_for(&self, current: DocumentType) -> Vec<DocumentType> {
        if self.contains(current) {
            self.0.clone()
        } else {
            std::iter::once(current).chain(self.0.iter().copied()).collect()
        }
    }
}

impl Default for DocumentTypeAllowlist {
    fn default() -> Self {
        Self(DocumentType::CORE.to_vec())
    }
}

impl<'de> Deserialize<'de> for DocumentTypeAllowlist {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let types = Vec::<DocumentType>::deserialize(deserializer)?;
        DocumentTypeAllowlist::new(types)
            .ok_or_else(|| serde::de::Error::custom("document type allowlist is empty"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_core_types() {
        let list = DocumentTypeAllowlist::default();
        assert_eq!(list.len(), 7);
        assert_eq!(list.first(), DocumentType::Blog);
        assert!(!list.contains(DocumentType::Email));
    }

    #[test]
    fn test_empty_is_rejected() {
        assert!(DocumentTypeAllowlist::new(vec![]).is_none());
        assert!(serde_json::from_str::<DocumentTypeAllowlist>("[]").is_err());
    }

    #[test]
    fn test_toggle_never_empties() {
        let mut list = DocumentTypeAllowlist::new(vec![DocumentType::X, DocumentType::Blog]).unwrap();
        assert_eq!(list.toggle(DocumentType::X), ToggleOutcome::Removed);
        assert_eq!(list.toggle(DocumentType::Blog), ToggleOutcome::Refused);
        assert_eq!(list.types(), &[DocumentType::Blog]);
        assert_eq!(list.toggle(DocumentType::Email), ToggleOutcome::Added);
        assert_eq!(list.types(), &[DocumentType::Blog, DocumentType::Email]);
    }

    #[test]
    fn test_selectable_for_out_of_allowlist_type() {
        let list = DocumentTypeAllowlist::new(vec![DocumentType::Blog, DocumentType::Essay]).unwrap();
        assert_eq!(
            list.selectable_for(DocumentType::Reddit),
            vec![DocumentType::Reddit, DocumentType::Blog, DocumentType::Essay]
        );
        assert_eq!(
            list.selectable_for(DocumentType::Essay),
            vec![DocumentType::Blog, DocumentType::Essay]
        );
    }

    #[test]
    fn test_duplicates_are_dropped() {
        let list =
            DocumentTypeAllowlist::new(vec![DocumentType::X, DocumentType::X, DocumentType::Blog])
                .unwrap();
        assert_eq!(list.types(), &[DocumentType::X, DocumentType::Blog]);
    }
}
