//! multipart 表单收集
//!
//! 先把文本字段和指定字段的文件完整读入内存，再由调用方做校验和落盘，
//! 这样任何校验失败都不会留下磁盘文件。

use std::collections::HashMap;

use actix_multipart::Multipart;
use futures_util::{StreamExt, TryStreamExt};
use tracing::debug;

use crate::models::{ApiError, ErrorCode};

// 单个文本字段的上限
const MAX_TEXT_FIELD_SIZE: usize = 64 * 1024;

/// 上传的单个文件（尚未校验）
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Default)]
pub struct MultipartForm {
    pub fields: HashMap<String, String>,
    pub files: Vec<UploadedFile>,
}

impl MultipartForm {
    /// 取文本字段，去除首尾空白，空值视为缺失
    pub fn text(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

/// 读取 multipart 请求
///
/// * `file_field` - 文件字段名，`name` 与 `name[]` 都接受
/// * `max_files` - 超过时返回 UPLOAD_ERROR
/// * `max_size` - 单文件字节上限，读取过程中超限立即返回 FILE_TOO_LARGE
pub async fn collect_form(
    mut payload: Multipart,
    file_field: &str,
    max_files: usize,
    max_size: usize,
) -> Result<MultipartForm, ApiError> {
    let array_field = format!("{file_field}[]");
    let mut form = MultipartForm::default();
    let mut parts = 0usize;

    loop {
        let mut field = match payload.try_next().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            // 空请求体或没有任何分段，按空表单交给调用方校验必填字段
            Err(e) if parts == 0 => {
                debug!("Multipart body has no parts: {}", e);
                break;
            }
            Err(e) => {
                debug!("Malformed multipart body: {}", e);
                return Err(ApiError::new(
                    ErrorCode::UploadError,
                    "Malformed multipart request",
                ));
            }
        };

        parts += 1;

        let (name, file_name) = match field.content_disposition() {
            Some(cd) => (
                cd.get_name().unwrap_or_default().to_string(),
                cd.get_filename().map(|s| s.to_string()),
            ),
            None => (String::new(), None),
        };

        let is_file = file_name.is_some();
        let wanted_file = is_file && (name == file_field || name == array_field);
        let limit = if is_file { max_size } else { MAX_TEXT_FIELD_SIZE };

        if is_file && !wanted_file {
            // 其他文件字段直接丢弃
            while let Some(chunk) = field.next().await {
                chunk.map_err(|_| {
                    ApiError::new(ErrorCode::UploadError, "Failed to read upload")
                })?;
            }
            continue;
        }

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk
                .map_err(|_| ApiError::new(ErrorCode::UploadError, "Failed to read upload"))?;
            if data.len() + chunk.len() > limit {
                return Err(if is_file {
                    ApiError::new(
                        ErrorCode::FileTooLarge,
                        format!("File exceeds the maximum size of {max_size} bytes"),
                    )
                } else {
                    ApiError::new(ErrorCode::UploadError, format!("Field '{name}' is too large"))
                });
            }
            data.extend_from_slice(&chunk);
        }

        if wanted_file {
            let file_name = file_name.unwrap_or_default();
            // 空的文件输入框
            if file_name.is_empty() && data.is_empty() {
                continue;
            }
            if form.files.len() >= max_files {
                return Err(ApiError::new(
                    ErrorCode::UploadError,
                    format!("At most {max_files} files can be uploaded"),
                ));
            }
            let content_type = field
                .content_type()
                .map(|ct| ct.essence_str().to_string())
                .unwrap_or_else(|| "application/octet-stream".to_string());
            form.files.push(UploadedFile {
                file_name,
                content_type,
                data,
            });
        } else if !name.is_empty() {
            let value = String::from_utf8(data)
                .map_err(|_| ApiError::new(ErrorCode::UploadError, "Field is not valid UTF-8"))?;
            form.fields.insert(name, value);
        }
    }

    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::error::PayloadError;
    use actix_web::http::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
    use actix_web::web::Bytes;

    fn multipart(body: &'static [u8]) -> Multipart {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("multipart/form-data; boundary=abc"),
        );
        let stream =
            futures_util::stream::iter(vec![Ok::<_, PayloadError>(Bytes::from_static(body))]);
        Multipart::new(&headers, stream)
    }

    #[actix_web::test]
    async fn body_without_parts_is_an_empty_form() {
        for body in [&b""[..], &b"--abc--\r\n"[..]] {
            let form = collect_form(multipart(body), "files", 5, 1024)
                .await
                .unwrap();
            assert!(form.fields.is_empty());
            assert!(form.files.is_empty());
        }
    }

    #[actix_web::test]
    async fn collects_text_and_wanted_files() {
        let body = b"--abc\r\n\
Content-Disposition: form-data; name=\"title\"\r\n\r\n\
Tarea\r\n\
--abc\r\n\
Content-Disposition: form-data; name=\"files[]\"; filename=\"a.pdf\"\r\n\
Content-Type: application/pdf\r\n\r\n\
%PDF-1.4\r\n\
--abc\r\n\
Content-Disposition: form-data; name=\"other\"; filename=\"b.pdf\"\r\n\r\n\
ignored\r\n\
--abc--\r\n";
        let form = collect_form(multipart(body), "files", 5, 1024)
            .await
            .unwrap();
        assert_eq!(form.text("title").as_deref(), Some("Tarea"));
        assert_eq!(form.files.len(), 1);
        assert_eq!(form.files[0].file_name, "a.pdf");
        assert_eq!(form.files[0].content_type, "application/pdf");
        assert_eq!(form.files[0].data, b"%PDF-1.4");
    }

    #[actix_web::test]
    async fn oversized_file_is_rejected_while_reading() {
        let body = b"--abc\r\n\
Content-Disposition: form-data; name=\"files\"; filename=\"big.pdf\"\r\n\r\n\
%PDF-1.4 far too long\r\n\
--abc--\r\n";
        let err = collect_form(multipart(body), "files", 5, 8)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::FileTooLarge);
    }

    #[test]
    fn text_trims_and_drops_blank_values() {
        let mut form = MultipartForm::default();
        form.fields.insert("title".into(), "  Tarea 1 ".into());
        form.fields.insert("description".into(), "   ".into());

        assert_eq!(form.text("title").as_deref(), Some("Tarea 1"));
        assert_eq!(form.text("description"), None);
        assert_eq!(form.text("missing"), None);
    }
}
