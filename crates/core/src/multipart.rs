//! Transport-neutral model of a multipart form submission.
//!
//! File-bearing writes (business logo and image galleries, profile avatar)
//! are submitted as `multipart/form-data`. Drafts build a [`FormPayload`];
//! the HTTP layer turns it into a real multipart body.

/// A file attached to a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    /// File name reported to the server.
    pub file_name: String,
    /// MIME type, e.g. `image/png`.
    pub mime_type: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl FileUpload {
    /// Create an upload, guessing the MIME type from the file extension.
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime_type = mime_for(&file_name).to_string();
        Self {
            file_name,
            mime_type,
            bytes,
        }
    }
}

/// One part of a multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart {
    /// A plain text field.
    Text(String),
    /// A file field.
    File(FileUpload),
}

/// Ordered list of named form parts. Names may repeat (image galleries).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormPayload {
    parts: Vec<(String, FormPart)>,
}

impl FormPayload {
    /// Empty payload.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text field.
    pub fn text(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        self.parts
            .push((name.to_string(), FormPart::Text(value.into())));
        self
    }

    /// Append a text field only when it is present and non-blank.
    pub fn optional_text(&mut self, name: &str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
            self.text(name, value);
        }
        self
    }

    /// Append a file field.
    pub fn file(&mut self, name: &str, file: FileUpload) -> &mut Self {
        self.parts.push((name.to_string(), FormPart::File(file)));
        self
    }

    /// Append one file part per file, all under the same name.
    pub fn files<'a>(&mut self, name: &str, files: impl IntoIterator<Item = &'a FileUpload>) -> &mut Self {
        for file in files {
            self.file(name, file.clone());
        }
        self
    }

    /// All parts in insertion order.
    #[must_use]
    pub fn parts(&self) -> &[(String, FormPart)] {
        &self.parts
    }

    /// First text value for `name`.
    #[must_use]
    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|(n, part)| match part {
            FormPart::Text(value) if n == name => Some(value.as_str()),
            _ => None,
        })
    }

    /// Number of file parts named `name`.
    #[must_use]
    pub fn file_count(&self, name: &str) -> usize {
        self.parts
            .iter()
            .filter(|(n, part)| n == name && matches!(part, FormPart::File(_)))
            .count()
    }

    /// Whether the payload has no parts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

fn mime_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_guess() {
        assert_eq!(FileUpload::new("logo.PNG", vec![]).mime_type, "image/png");
        assert_eq!(FileUpload::new("scan.pdf", vec![]).mime_type, "application/pdf");
        assert_eq!(
            FileUpload::new("noext", vec![]).mime_type,
            "application/octet-stream"
        );
    }

    #[test]
    fn test_optional_text_skips_blank() {
        let mut form = FormPayload::new();
        form.optional_text("phone", Some("  "))
            .optional_text("taxCode", None)
            .optional_text("website", Some("https://x.com"));
        assert_eq!(form.parts().len(), 1);
        assert_eq!(form.text_value("website"), Some("https://x.com"));
    }

    #[test]
    fn test_repeated_file_parts() {
        let slides = vec![
            FileUpload::new("a.jpg", vec![1]),
            FileUpload::new("b.jpg", vec![2]),
        ];
        let mut form = FormPayload::new();
        form.files("slideImages", &slides);
        assert_eq!(form.file_count("slideImages"), 2);
        assert_eq!(form.file_count("introImages"), 0);
    }
}
