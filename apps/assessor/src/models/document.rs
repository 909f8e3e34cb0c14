use bytes::Bytes;

pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// A CV as handed to the pipeline: already-decoded text, or raw bytes tagged
/// with the media type they arrived under.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    Text(String),
    Binary { content: Bytes, media_type: String },
}

impl Document {
    pub fn text(text: impl Into<String>) -> Self {
        Document::Text(text.into())
    }

    pub fn upload(content: impl Into<Bytes>, media_type: impl Into<String>) -> Self {
        Document::Binary {
            content: content.into(),
            media_type: media_type.into(),
        }
    }

    pub fn pdf(content: impl Into<Bytes>) -> Self {
        Self::upload(content, PDF_MEDIA_TYPE)
    }
}

impl From<String> for Document {
    fn from(text: String) -> Self {
        Document::Text(text)
    }
}

impl From<&str> for Document {
    fn from(text: &str) -> Self {
        Document::Text(text.to_string())
    }
}

/// True when the MIME essence (type/subtype, parameters dropped) is `application/pdf`.
pub fn is_pdf_media_type(media_type: &str) -> bool {
    media_type
        .split(';')
        .next()
        .map(|essence| essence.trim().eq_ignore_ascii_case(PDF_MEDIA_TYPE))
        .unwrap_or(false)
}
