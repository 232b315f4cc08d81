//! Document-type specific phrasing of action instructions.

use crate::document::DocumentType;

/// Elaborates an action instruction for the target document type.
///
/// Short-form types get length constraints and thread-style types get
/// numbering instructions; types without special handling name the format.
pub fn describe_action(instruction: &str, document_type: DocumentType) -> String {
    match document_type {
        DocumentType::X => format!(
            "{} optimized for Twitter/X (under 280 characters, engaging, shareable)",
            instruction
        ),
        DocumentType::LinkedIn => {
            format!("{} formatted for a professional LinkedIn post", instruction)
        }
        DocumentType::Blog => {
            format!("{} formatted as a blog post with proper structure", instruction)
        }
        DocumentType::Essay => format!("{} formatted as a formal essay", instruction),
        DocumentType::Threads => format!(
            "{} formatted as a Twitter/X thread with numbered points",
            instruction
        ),
        DocumentType::Reddit => format!("{} formatted for a Reddit post", instruction),
        other => format!("{} for a {} format", instruction, other),
    }
}
