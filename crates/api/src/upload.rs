//! Multipart form collection.
//!
//! Handlers that accept `multipart/form-data` drain the stream into a
//! [`MultipartForm`] first, then read text fields and validated files by
//! name.

use std::collections::HashMap;

use axum::extract::Multipart;
use fundify_core::uploads::validate_upload;

use crate::error::{AppError, AppResult};
use crate::storage::LocalStorage;

/// A file part received in a multipart form.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl UploadedFile {
    /// Check mime type and size against an allow-list.
    pub fn validate(&self, allowed: &[&str], max_bytes: usize) -> AppResult<()> {
        validate_upload(&self.content_type, self.data.len(), allowed, max_bytes)
            .map_err(AppError::validation)
    }

    /// Store the file under `destination` and return `(storage_key, url)`.
    pub async fn store(
        &self,
        storage: &LocalStorage,
        destination: &str,
    ) -> AppResult<(String, String)> {
        let key = fundify_core::uploads::storage_key(destination, &self.file_name);
        let url = storage.save(&key, &self.data).await?;
        Ok((key, url))
    }
}

/// Text fields and files of a drained multipart request.
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl MultipartForm {
    /// Drain every part. Parts with a filename are files; the rest are text.
    pub async fn collect(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?
        {
            let name = field.name().unwrap_or("").to_string();
            if name.is_empty() {
                continue;
            }

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field
                        .content_type()
                        .unwrap_or("application/octet-stream")
                        .to_string();
                    let data = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?;
                    // Browsers send an empty part for an untouched file input.
                    if !data.is_empty() {
                        form.files.insert(
                            name,
                            UploadedFile {
                                file_name,
                                content_type,
                                data: data.to_vec(),
                            },
                        );
                    }
                }
                None => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?;
                    form.fields.insert(name, text);
                }
            }
        }

        Ok(form)
    }

    /// A text field, trimmed; `None` when missing or blank.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// A text field that must be present and non-blank.
    pub fn required(&self, name: &str, label: &str) -> AppResult<String> {
        fundify_core::validation::require_non_blank(label, self.text(name))
            .map_err(AppError::validation)
    }

    pub fn file(&self, name: &str) -> Option<&UploadedFile> {
        self.files.get(name)
    }
}
