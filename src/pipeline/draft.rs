//! Upload draft construction: collect user selections into a validated draft.
//!
//! ## Why validate the file at the input boundary?
//!
//! The service rejects non-PDF uploads with a 400, but only after the whole
//! file has crossed the wire. Checking existence, readability, and the
//! `%PDF` magic bytes while the draft is being built gives the user a
//! meaningful local error instead of a round-trip failure. The file is read
//! into memory here — drafts are single-shot and discarded after encoding,
//! so there is no streaming concern.
//!
//! Page-bound fields are typed `u32`; non-numeric input never reaches the
//! builder (the CLI's argument parser rejects it first). The client does not
//! check `toc_start <= toc_end` — the service validates the range and its
//! answer is authoritative.

use crate::config::DEFAULT_DOC_TITLE;
use crate::error::ClientError;
use std::fmt;
use std::path::Path;
use tracing::debug;

/// A file selected for upload: its multipart filename and raw bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct FileAttachment {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for FileAttachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileAttachment")
            .field("filename", &self.filename)
            .field("bytes", &format_args!("{} bytes", self.bytes.len()))
            .finish()
    }
}

/// A validated, not-yet-transmitted upload.
///
/// Created fresh per submission attempt and consumed by
/// [`crate::pipeline::payload::encode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadDraft {
    pub file: FileAttachment,
    pub doc_title: String,
    pub toc_start: Option<u32>,
    pub toc_end: Option<u32>,
    pub toc_pages: Option<u32>,
    pub use_llm: bool,
}

/// Builder for [`UploadDraft`].
///
/// The file is the only mandatory field. The title falls back to
/// [`DEFAULT_DOC_TITLE`]; unset page bounds stay out of the draft entirely
/// rather than travelling as empty values.
///
/// # Example
/// ```rust,no_run
/// use pdspec_client::DraftBuilder;
///
/// # fn main() -> Result<(), pdspec_client::ClientError> {
/// let draft = DraftBuilder::new()
///     .file_path("usb_pd_r3.pdf")?
///     .toc_start(13)
///     .toc_end(34)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct DraftBuilder {
    file: Option<FileAttachment>,
    doc_title: Option<String>,
    toc_start: Option<u32>,
    toc_end: Option<u32>,
    toc_pages: Option<u32>,
    use_llm: bool,
}

impl DraftBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a PDF from the local filesystem, validating existence,
    /// readability, and magic bytes.
    pub fn file_path(mut self, path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let path = path.as_ref();
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ClientError::FileNotFound {
                    path: path.to_path_buf(),
                })
            }
            Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
                return Err(ClientError::PermissionDenied {
                    path: path.to_path_buf(),
                })
            }
            Err(e) => {
                return Err(ClientError::Internal(format!(
                    "reading '{}': {}",
                    path.display(),
                    e
                )))
            }
        };

        check_pdf_magic(path, &bytes)?;

        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.pdf".to_string());

        debug!("attached local PDF '{}' ({} bytes)", path.display(), bytes.len());
        self.file = Some(FileAttachment { filename, bytes });
        Ok(self)
    }

    /// Attach a PDF already held in memory (e.g. received over another
    /// channel). The same magic-byte validation applies.
    pub fn file_bytes(
        mut self,
        filename: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<Self, ClientError> {
        let filename = filename.into();
        check_pdf_magic(Path::new(&filename), &bytes)?;
        self.file = Some(FileAttachment { filename, bytes });
        Ok(self)
    }

    pub fn doc_title(mut self, title: impl Into<String>) -> Self {
        self.doc_title = Some(title.into());
        self
    }

    /// First page of the table of contents (1-indexed).
    pub fn toc_start(mut self, page: u32) -> Self {
        self.toc_start = Some(page);
        self
    }

    /// Last page of the table of contents (1-indexed, inclusive).
    pub fn toc_end(mut self, page: u32) -> Self {
        self.toc_end = Some(page);
        self
    }

    /// Number of ToC pages to scan when no explicit range is given.
    pub fn toc_pages(mut self, pages: u32) -> Self {
        self.toc_pages = Some(pages);
        self
    }

    /// Ask the service to run its LLM-assisted extraction pass.
    pub fn use_llm(mut self, enabled: bool) -> Self {
        self.use_llm = enabled;
        self
    }

    /// Build the draft.
    ///
    /// Fails with [`ClientError::MissingFile`] when no file has been
    /// attached, regardless of any other field.
    pub fn build(self) -> Result<UploadDraft, ClientError> {
        let file = self.file.ok_or(ClientError::MissingFile)?;
        Ok(UploadDraft {
            file,
            doc_title: self
                .doc_title
                .unwrap_or_else(|| DEFAULT_DOC_TITLE.to_string()),
            toc_start: self.toc_start,
            toc_end: self.toc_end,
            toc_pages: self.toc_pages,
            use_llm: self.use_llm,
        })
    }
}

/// Reject content that is readable but clearly not a PDF.
///
/// Files shorter than the magic prefix pass through; the service gives the
/// final verdict on truncated input.
fn check_pdf_magic(path: &Path, bytes: &[u8]) -> Result<(), ClientError> {
    if bytes.len() >= 4 && &bytes[..4] != b"%PDF" {
        let mut magic = [0u8; 4];
        magic.copy_from_slice(&bytes[..4]);
        return Err(ClientError::NotAPdf {
            path: path.to_path_buf(),
            magic,
        });
    }
    Ok(())
}
