//! 上传文件的落盘与清理

pub mod staged;

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::UploadConfig;
use crate::errors::ClassConnectError;
use crate::models::files::entities::StoredFile;
use crate::models::{ApiError, ErrorCode};
use crate::utils::multipart::UploadedFile;
use crate::utils::validate_magic_bytes;

pub use staged::StagedUploads;

/// 静态文件的访问前缀
pub const UPLOADS_URL_PREFIX: &str = "/uploads";

// 扩展名最长保留的字符数
const MAX_EXTENSION_LEN: usize = 10;

/// 上传目录，以 `web::Data<FileStorage>` 注入
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
    max_size: usize,
    max_files: usize,
    allowed_types: Vec<String>,
}

impl FileStorage {
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            dir: PathBuf::from(&config.dir),
            max_size: config.max_size,
            max_files: config.max_files,
            allowed_types: config
                .allowed_types
                .iter()
                .map(|t| t.trim().to_ascii_lowercase())
                .collect(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn max_files(&self) -> usize {
        self.max_files
    }

    /// 校验单个文件：大小、MIME 白名单、魔术字节
    pub fn validate(&self, file: &UploadedFile) -> Result<(), ApiError> {
        if file.data.len() > self.max_size {
            return Err(ApiError::new(
                ErrorCode::FileTooLarge,
                format!("File exceeds the maximum size of {} bytes", self.max_size),
            ));
        }

        let mime = file.content_type.to_ascii_lowercase();
        if !self.allowed_types.iter().any(|t| *t == mime) {
            return Err(ApiError::new(
                ErrorCode::UnsupportedType,
                format!("File type '{}' is not allowed", file.content_type),
            ));
        }

        if !validate_magic_bytes(&file.data, &mime) {
            return Err(ApiError::new(
                ErrorCode::UnsupportedType,
                format!("Content of '{}' does not match its type", file.file_name),
            ));
        }

        Ok(())
    }

    /// 先校验全部文件再逐个写盘，返回暂存守卫
    ///
    /// 守卫在未调用 `persist` 的情况下被丢弃时会删除已写入的文件。
    pub async fn store_all(&self, files: Vec<UploadedFile>) -> Result<StagedUploads, ApiError> {
        for file in &files {
            self.validate(file)?;
        }

        let mut staged = StagedUploads::new(self.dir.clone());
        if files.is_empty() {
            return Ok(staged);
        }

        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            ApiError::from(ClassConnectError::file_operation(format!(
                "创建上传目录失败: {e}"
            )))
        })?;

        for file in files {
            let stored_name = format!("{}{}", Uuid::new_v4(), sanitized_extension(&file.file_name));
            let path = self.dir.join(&stored_name);

            tokio::fs::write(&path, &file.data).await.map_err(|e| {
                ApiError::from(ClassConnectError::file_operation(format!(
                    "写入文件 {} 失败: {e}",
                    path.display()
                )))
            })?;
            debug!("Stored upload {} as {}", file.file_name, stored_name);

            staged.push(StoredFile {
                original_name: file.file_name,
                url: format!("{UPLOADS_URL_PREFIX}/{stored_name}"),
                stored_name,
                size: file.data.len() as i64,
                mime_type: file.content_type,
            });
        }

        Ok(staged)
    }

    /// 尽力删除，失败只记录警告
    pub async fn delete(&self, stored_name: &str) {
        let Some(file_name) = Path::new(stored_name).file_name() else {
            warn!("Refusing to delete suspicious upload name {:?}", stored_name);
            return;
        };
        let path = self.dir.join(file_name);
        if let Err(e) = tokio::fs::remove_file(&path).await {
            warn!("Failed to delete upload {}: {}", path.display(), e);
        }
    }

    pub async fn delete_all(&self, stored_names: &[String]) {
        for name in stored_names {
            self.delete(name).await;
        }
    }
}

/// 原文件名的扩展名：小写，仅保留字母数字，带前导点；没有时为空
fn sanitized_extension(file_name: &str) -> String {
    let ext: String = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(MAX_EXTENSION_LEN)
        .collect::<String>()
        .to_ascii_lowercase();

    if ext.is_empty() {
        String::new()
    } else {
        format!(".{ext}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x01];

    fn storage(dir: &Path) -> FileStorage {
        FileStorage::new(&UploadConfig {
            dir: dir.to_string_lossy().into_owned(),
            ..UploadConfig::default()
        })
    }

    fn upload(name: &str, content_type: &str, data: &[u8]) -> UploadedFile {
        UploadedFile {
            file_name: name.to_string(),
            content_type: content_type.to_string(),
            data: data.to_vec(),
        }
    }

    #[test]
    fn extension_is_lowercased_and_sanitized() {
        assert_eq!(sanitized_extension("Foto.PNG"), ".png");
        assert_eq!(sanitized_extension("informe.p$df"), ".pdf");
        assert_eq!(sanitized_extension("README"), "");
        assert_eq!(sanitized_extension("../../etc/passwd"), "");
    }

    #[test]
    fn validate_rejects_types_outside_allow_list() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(dir.path());

        let err = storage
            .validate(&upload("notes.txt", "text/plain", b"hola"))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::UnsupportedType);

        let err = storage
            .validate(&upload("fake.png", "image/png", b"%PDF-1.7"))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::UnsupportedType);

        assert!(storage.validate(&upload("ok.png", "image/png", PNG)).is_ok());
    }

    #[actix_web::test]
    async fn store_all_is_all_or_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(dir.path());

        let err = storage
            .store_all(vec![
                upload("a.png", "image/png", PNG),
                upload("b.png", "image/png", b"not a png"),
            ])
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::UnsupportedType);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[actix_web::test]
    async fn dropped_guard_removes_files_and_persist_keeps_them() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(dir.path());

        let staged = storage
            .store_all(vec![upload("a.png", "image/png", PNG)])
            .await
            .unwrap();
        let name = staged.files()[0].stored_name.clone();
        assert!(name.ends_with(".png"));
        assert_eq!(staged.files()[0].url, format!("/uploads/{name}"));
        assert!(dir.path().join(&name).exists());
        drop(staged);
        assert!(!dir.path().join(&name).exists());

        let staged = storage
            .store_all(vec![upload("b.png", "image/png", PNG)])
            .await
            .unwrap();
        let name = staged.files()[0].stored_name.clone();
        staged.persist();
        assert!(dir.path().join(&name).exists());

        storage.delete(&name).await;
        assert!(!dir.path().join(&name).exists());
        // 再删一次只记录警告
        storage.delete(&name).await;
    }
}
