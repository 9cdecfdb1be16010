//! Request and response bodies of the HTTP API.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::conversation::{ConversationState, Prompt};
use crate::documents::RenderedDocument;

/// One chat message from the user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageRequest {
    #[schema(example = "/carta")]
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    pub filename: String,
    pub mime_type: String,
    pub size_bytes: usize,
    /// Creation timestamp in RFC 3339 format
    pub created_at: String,
}

/// File with its bytes base64-encoded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileContent {
    pub metadata: FileMetadata,
    pub data: String,
}

impl FileContent {
    pub fn pdf(filename: impl Into<String>, data: &[u8]) -> Self {
        Self {
            metadata: FileMetadata {
                filename: filename.into(),
                mime_type: "application/pdf".to_string(),
                size_bytes: data.len(),
                created_at: Utc::now().to_rfc3339(),
            },
            data: BASE64.encode(data),
        }
    }

    pub fn decode_data(&self) -> Result<Vec<u8>, base64::DecodeError> {
        BASE64.decode(&self.data)
    }
}

impl From<RenderedDocument> for FileContent {
    fn from(document: RenderedDocument) -> Self {
        FileContent::pdf(document.filename, &document.pdf)
    }
}

/// What the transport should send back after one message.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ChatResponse {
    pub chat_id: String,
    pub state: ConversationState,
    pub reply: Option<Prompt>,
    pub document: Option<FileContent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_content_round_trip() {
        let content = FileContent::pdf("Carta_Mario Rossi.pdf", b"%PDF-1.5");
        assert_eq!(content.metadata.size_bytes, 8);
        assert_eq!(content.metadata.mime_type, "application/pdf");
        assert_eq!(content.decode_data().unwrap(), b"%PDF-1.5");
    }

    #[test]
    fn test_file_content_serializes_camel_case() {
        let content = FileContent::pdf("a.pdf", b"x");
        let json = serde_json::to_value(&content).unwrap();
        assert_eq!(json["metadata"]["mimeType"], "application/pdf");
        assert_eq!(json["metadata"]["sizeBytes"], 1);
    }
}
