//! Multipart form submissions posted by the journal page.

use std::collections::HashMap;

use actix_multipart::Multipart;
use futures::TryStreamExt;

use journal_core::domain::{Intent, PostInput};
use journal_core::error::DomainError;

use crate::middleware::error::{AppError, AppResult};

pub const INTENT_FIELD: &str = "_intent";
pub const IMAGE_FIELD: &str = "image";

/// A file part of the submission.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Decoded form: text fields by name plus the optional image part.
#[derive(Debug, Default)]
pub struct Submission {
    fields: HashMap<String, String>,
    image: Option<UploadedFile>,
}

impl Submission {
    /// Drain a multipart payload, refusing any part larger than `max_part_bytes`.
    pub async fn read(mut payload: Multipart, max_part_bytes: usize) -> AppResult<Self> {
        let mut submission = Submission::default();

        while let Some(mut field) = payload.try_next().await? {
            let disposition = field.content_disposition();
            let name = disposition
                .and_then(|cd| cd.get_name())
                .map(str::to_owned);
            let file_name = disposition
                .and_then(|cd| cd.get_filename())
                .map(str::to_owned);

            let mut bytes = Vec::new();
            while let Some(chunk) = field.try_next().await? {
                if bytes.len() + chunk.len() > max_part_bytes {
                    return Err(AppError::PayloadTooLarge(format!(
                        "form field exceeds {} bytes",
                        max_part_bytes
                    )));
                }
                bytes.extend_from_slice(&chunk);
            }

            let Some(name) = name else { continue };
            match file_name {
                Some(file_name) if name == IMAGE_FIELD => {
                    submission.image = Some(UploadedFile { file_name, bytes });
                }
                _ => {
                    submission
                        .fields
                        .insert(name, String::from_utf8_lossy(&bytes).into_owned());
                }
            }
        }

        Ok(submission)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// The requested mutation; `None` when the form carries no intent.
    pub fn intent(&self) -> Option<Result<Intent, DomainError>> {
        self.text(INTENT_FIELD).map(str::parse)
    }

    /// Id of the post an update or delete targets.
    pub fn post_id(&self) -> Result<i32, DomainError> {
        let raw = self.text("id").unwrap_or_default().trim();
        raw.parse()
            .map_err(|_| DomainError::Validation(format!("invalid post id '{}'", raw)))
    }

    /// Title, content and author name with the form defaults applied.
    pub fn post_input(&self) -> PostInput {
        PostInput::new(
            self.text("title").unwrap_or_default(),
            self.text("content").map(str::to_owned),
            self.text("userName").unwrap_or_default(),
        )
    }

    /// Whether the "remove image" checkbox was ticked.
    pub fn remove_image(&self) -> bool {
        self.text("removeImage") == Some("on")
    }

    /// The uploaded image, if a non-empty file was attached.
    pub fn take_image(&mut self) -> Option<UploadedFile> {
        self.image.take().filter(|file| !file.bytes.is_empty())
    }

    #[cfg(test)]
    pub fn from_fields(fields: &[(&str, &str)]) -> Self {
        Self {
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            image: None,
        }
    }

    #[cfg(test)]
    pub fn with_image(mut self, file_name: &str, bytes: &[u8]) -> Self {
        self.image = Some(UploadedFile {
            file_name: file_name.to_string(),
            bytes: bytes.to_vec(),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use journal_core::domain::ANONYMOUS;

    use super::*;

    #[test]
    fn test_defaults_for_missing_fields() {
        let input = Submission::from_fields(&[]).post_input();
        assert_eq!(input.title, "");
        assert_eq!(input.content, None);
        assert_eq!(input.user_name, ANONYMOUS);
    }

    #[test]
    fn test_intent_parsing() {
        let submission = Submission::from_fields(&[(INTENT_FIELD, "delete")]);
        assert_eq!(submission.intent().unwrap().unwrap(), Intent::Delete);

        assert!(Submission::from_fields(&[]).intent().is_none());

        let submission = Submission::from_fields(&[(INTENT_FIELD, "archive")]);
        assert!(submission.intent().unwrap().is_err());
    }

    #[test]
    fn test_post_id_must_be_numeric() {
        assert_eq!(Submission::from_fields(&[("id", "7")]).post_id().unwrap(), 7);
        assert!(Submission::from_fields(&[("id", "seven")]).post_id().is_err());
        assert!(Submission::from_fields(&[]).post_id().is_err());
    }

    #[test]
    fn test_remove_image_requires_checkbox_value() {
        assert!(Submission::from_fields(&[("removeImage", "on")]).remove_image());
        assert!(!Submission::from_fields(&[("removeImage", "off")]).remove_image());
        assert!(!Submission::from_fields(&[]).remove_image());
    }

    #[test]
    fn test_empty_file_is_ignored() {
        let mut submission = Submission::from_fields(&[]).with_image("", b"");
        assert!(submission.take_image().is_none());

        let mut submission = Submission::from_fields(&[]).with_image("a.png", b"data");
        let file = submission.take_image().unwrap();
        assert_eq!(file.file_name, "a.png");
        assert!(submission.take_image().is_none());
    }
}
