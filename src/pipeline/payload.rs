//! Multipart payload encoding: `UploadDraft` → `EncodedPayload`.
//!
//! Encoding is a pure function: the same draft always yields the same part
//! list, and nothing here touches the network. The payload keeps its parts
//! inspectable so tests (and logging) can assert what will go on the wire;
//! conversion to a `reqwest::multipart::Form` happens once, at the transport
//! boundary.
//!
//! One part per present field — absent optional fields produce no part at
//! all, never an empty string.

use crate::error::ClientError;
use crate::pipeline::draft::UploadDraft;
use reqwest::multipart::{Form, Part};
use std::fmt;

const PDF_MIME: &str = "application/pdf";

/// One multipart part: a field name and its body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadPart {
    pub name: &'static str,
    pub body: PartBody,
}

/// Body of a multipart part.
#[derive(Clone, PartialEq, Eq)]
pub enum PartBody {
    Text(String),
    File { filename: String, bytes: Vec<u8> },
}

impl fmt::Debug for PartBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartBody::Text(value) => f.debug_tuple("Text").field(value).finish(),
            PartBody::File { filename, bytes } => f
                .debug_struct("File")
                .field("filename", filename)
                .field("bytes", &format_args!("{} bytes", bytes.len()))
                .finish(),
        }
    }
}

/// A transmission-ready multipart payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPayload {
    parts: Vec<PayloadPart>,
}

impl EncodedPayload {
    pub fn parts(&self) -> &[PayloadPart] {
        &self.parts
    }

    pub fn contains_part(&self, name: &str) -> bool {
        self.parts.iter().any(|part| part.name == name)
    }

    /// Convert into the reqwest form that actually crosses the wire.
    pub(crate) fn into_form(self) -> Result<Form, ClientError> {
        let mut form = Form::new();
        for part in self.parts {
            form = match part.body {
                PartBody::Text(value) => form.text(part.name, value),
                PartBody::File { filename, bytes } => {
                    let file_part = Part::bytes(bytes)
                        .file_name(filename)
                        .mime_str(PDF_MIME)
                        .map_err(|e| {
                            ClientError::Internal(format!("multipart file part: {e}"))
                        })?;
                    form.part(part.name, file_part)
                }
            };
        }
        Ok(form)
    }
}

/// Encode a draft into its multipart payload, consuming it.
pub fn encode(draft: UploadDraft) -> EncodedPayload {
    let mut parts = vec![
        PayloadPart {
            name: "file",
            body: PartBody::File {
                filename: draft.file.filename,
                bytes: draft.file.bytes,
            },
        },
        PayloadPart {
            name: "doc_title",
            body: PartBody::Text(draft.doc_title),
        },
    ];

    if let Some(page) = draft.toc_start {
        parts.push(PayloadPart {
            name: "toc_start",
            body: PartBody::Text(page.to_string()),
        });
    }
    if let Some(page) = draft.toc_end {
        parts.push(PayloadPart {
            name: "toc_end",
            body: PartBody::Text(page.to_string()),
        });
    }
    if let Some(pages) = draft.toc_pages {
        parts.push(PayloadPart {
            name: "toc_pages",
            body: PartBody::Text(pages.to_string()),
        });
    }
    if draft.use_llm {
        parts.push(PayloadPart {
            name: "use_llm",
            body: PartBody::Text("true".to_string()),
        });
    }

    EncodedPayload { parts }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::draft::DraftBuilder;

    fn draft_with_bounds(start: Option<u32>, end: Option<u32>) -> UploadDraft {
        let mut builder = DraftBuilder::new()
            .file_bytes("spec.pdf", b"%PDF-1.7\n".to_vec())
            .expect("valid pdf bytes");
        if let Some(page) = start {
            builder = builder.toc_start(page);
        }
        if let Some(page) = end {
            builder = builder.toc_end(page);
        }
        builder.build().expect("draft")
    }

    #[test]
    fn file_and_title_are_always_present() {
        let payload = encode(draft_with_bounds(None, None));
        assert!(payload.contains_part("file"));
        assert!(payload.contains_part("doc_title"));
    }

    #[test]
    fn both_bounds_set_produce_both_parts() {
        let payload = encode(draft_with_bounds(Some(13), Some(34)));
        assert!(payload.contains_part("toc_start"));
        assert!(payload.contains_part("toc_end"));
        let start = payload
            .parts()
            .iter()
            .find(|part| part.name == "toc_start")
            .expect("toc_start part");
        assert_eq!(start.body, PartBody::Text("13".to_string()));
    }

    #[test]
    fn unset_bound_produces_no_part_at_all() {
        let payload = encode(draft_with_bounds(Some(13), None));
        assert!(payload.contains_part("toc_start"));
        assert!(!payload.contains_part("toc_end"));

        let payload = encode(draft_with_bounds(None, None));
        assert!(!payload.contains_part("toc_start"));
        assert!(!payload.contains_part("toc_end"));
        assert!(!payload.contains_part("toc_pages"));
        assert!(!payload.contains_part("use_llm"));
    }

    #[test]
    fn use_llm_only_travels_when_enabled() {
        let draft = DraftBuilder::new()
            .file_bytes("spec.pdf", b"%PDF-1.7\n".to_vec())
            .expect("valid pdf bytes")
            .use_llm(true)
            .build()
            .expect("draft");
        let payload = encode(draft);
        let part = payload
            .parts()
            .iter()
            .find(|part| part.name == "use_llm")
            .expect("use_llm part");
        assert_eq!(part.body, PartBody::Text("true".to_string()));
    }

    #[test]
    fn encoding_is_deterministic() {
        let draft = draft_with_bounds(Some(13), Some(34));
        let first = encode(draft.clone());
        let second = encode(draft);
        assert_eq!(first, second);
    }
}
