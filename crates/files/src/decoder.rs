//! Content classification and decoding.
//!
//! Every decode materializes the whole file first: images are base64-encoded as a unit, PDFs are
//! parsed from memory, and text is decoded in one pass.

use base64::Engine;
use std::io::Read;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::Mutex;

use crate::config::{normalize_extension, FileTypes};
use crate::error::{ExplorerError, Result};

/// Inserted between the text of consecutive document pages.
pub const PAGE_SEPARATOR: &str = "\n\n--- page break ---\n\n";

/// Serializes extraction: the stdout gag is process-wide and only one may be held at a time.
static PDF_EXTRACT_LOCK: Mutex<()> = Mutex::new(());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCategory {
    Text,
    Document,
    Image,
    UnsupportedBinary,
}

impl FileCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Document => "document",
            Self::Image => "image",
            Self::UnsupportedBinary => "unsupported-binary",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Latin1,
}

impl TextEncoding {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Latin1 => "latin-1",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text { text: String, encoding: TextEncoding },
    Document { text: String, pages: usize },
    Image { extension: String, base64: String },
}

impl Content {
    pub fn category(&self) -> FileCategory {
        match self {
            Self::Text { .. } => FileCategory::Text,
            Self::Document { .. } => FileCategory::Document,
            Self::Image { .. } => FileCategory::Image,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ContentDecoder {
    types: FileTypes,
}

impl ContentDecoder {
    pub fn new(types: FileTypes) -> Self {
        Self { types }
    }

    /// Extension-based classification. Text candidates are refined by [`Self::decode`].
    pub fn classify(&self, path: &Path) -> FileCategory {
        let extension = extension_of(path);
        if self.types.is_image(&extension) {
            FileCategory::Image
        } else if self.types.is_document(&extension) {
            FileCategory::Document
        } else {
            FileCategory::Text
        }
    }

    /// [`Self::classify`] refined by sniffing the file prefix: text candidates holding a NUL byte
    /// are `UnsupportedBinary`. An unreadable file stays `Text` and fails later in `decode`.
    pub fn detect(&self, path: &Path) -> FileCategory {
        let category = self.classify(path);
        if category != FileCategory::Text {
            return category;
        }
        let sample_len = self.types.binary_check_bytes();
        let mut prefix = Vec::with_capacity(sample_len);
        let sampled = std::fs::File::open(path)
            .and_then(|file| file.take(sample_len as u64).read_to_end(&mut prefix));
        match sampled {
            Ok(_) if looks_binary(&prefix, sample_len) => FileCategory::UnsupportedBinary,
            _ => category,
        }
    }

    pub fn decode(&self, path: &Path) -> Result<Content> {
        let bytes = std::fs::read(path).map_err(|err| {
            log::error!("Failed to read {}: {err}", path.display());
            ExplorerError::file_read(path, &err)
        })?;

        match self.classify(path) {
            FileCategory::Image => Ok(encode_image(path, &bytes)),
            FileCategory::Document => extract_document(path, &bytes),
            FileCategory::Text | FileCategory::UnsupportedBinary => {
                self.decode_text(path, bytes)
            }
        }
    }

    fn decode_text(&self, path: &Path, bytes: Vec<u8>) -> Result<Content> {
        if looks_binary(&bytes, self.types.binary_check_bytes()) {
            return Err(ExplorerError::InvalidFileType {
                path: path.to_path_buf(),
                file_type: FileCategory::UnsupportedBinary.as_str().to_string(),
                reason: "File contains null bytes and cannot be read as text".to_string(),
            });
        }

        let (text, encoding) = decode_with_fallback(bytes);
        log::info!(
            "Read text file {} with {} encoding",
            path.display(),
            encoding.as_str()
        );
        Ok(Content::Text { text, encoding })
    }
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| normalize_extension(&ext.to_string_lossy()))
        .unwrap_or_default()
}

/// NUL byte within the first `sample_len` bytes.
pub fn looks_binary(bytes: &[u8], sample_len: usize) -> bool {
    let end = bytes.len().min(sample_len);
    bytes[..end].contains(&0)
}

/// UTF-8 first; otherwise Latin-1, which maps every byte to the code point of the same value.
pub fn decode_with_fallback(bytes: Vec<u8>) -> (String, TextEncoding) {
    match String::from_utf8(bytes) {
        Ok(text) => (text, TextEncoding::Utf8),
        Err(err) => {
            log::debug!("UTF-8 decode failed ({}), falling back to Latin-1", err.utf8_error());
            let text = err.into_bytes().into_iter().map(char::from).collect();
            (text, TextEncoding::Latin1)
        }
    }
}

fn encode_image(path: &Path, bytes: &[u8]) -> Content {
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    log::info!("Encoded image file {} ({} bytes)", path.display(), bytes.len());
    Content::Image {
        extension: extension_of(path),
        base64: encoded,
    }
}

/// Runs the extractor with stdout silenced; pdf-extract prints font diagnostics with `println!`.
fn extract_pages_quietly(
    bytes: &[u8],
) -> std::thread::Result<std::result::Result<Vec<String>, pdf_extract::OutputError>> {
    let _serial = PDF_EXTRACT_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    let _gag = match gag::Gag::stdout() {
        Ok(gag) => Some(gag),
        Err(err) => {
            log::debug!("Could not silence stdout during PDF extraction: {err}");
            None
        }
    };
    // The extractor can panic on malformed input; treat that as a corrupt file.
    panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
    }))
}

fn extract_document(path: &Path, bytes: &[u8]) -> Result<Content> {
    let extracted = extract_pages_quietly(bytes);

    let pages = match extracted {
        Ok(Ok(pages)) => pages,
        Ok(Err(err)) => {
            return Err(ExplorerError::FileRead {
                path: path.to_path_buf(),
                reason: format!("PDF extraction failed: {err}"),
            });
        }
        Err(_) => {
            return Err(ExplorerError::FileRead {
                path: path.to_path_buf(),
                reason: "PDF extraction failed: malformed document".to_string(),
            });
        }
    };

    let page_count = pages.len();
    let mut texts: Vec<&str> = Vec::with_capacity(page_count);
    for (idx, page) in pages.iter().enumerate() {
        let text = page.trim();
        log::debug!("Extracted {} chars from page {}", text.len(), idx + 1);
        if !text.is_empty() {
            texts.push(text);
        }
    }

    if texts.is_empty() {
        log::warn!("No text extracted from PDF: {}", path.display());
        return Err(ExplorerError::InvalidFileType {
            path: path.to_path_buf(),
            file_type: FileCategory::Document.as_str().to_string(),
            reason: format!(
                "no extractable text in {page_count} page(s); the document may contain only images"
            ),
        });
    }

    log::info!(
        "Extracted text from PDF {} ({page_count} pages)",
        path.display()
    );
    Ok(Content::Document {
        text: texts.join(PAGE_SEPARATOR),
        pages: page_count,
    })
}
