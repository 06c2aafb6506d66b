use std::path::PathBuf;

use tracing::warn;

use crate::models::files::entities::StoredFile;

/// 一次请求写入的文件
///
/// 事务提交后调用 [`persist`](Self::persist)；其余任何退出路径（错误、`?`、panic 展开）
/// 都会在 drop 时删除这些文件。
#[derive(Debug)]
pub struct StagedUploads {
    dir: PathBuf,
    files: Vec<StoredFile>,
    persisted: bool,
}

impl StagedUploads {
    pub(crate) fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            files: Vec::new(),
            persisted: false,
        }
    }

    pub(crate) fn push(&mut self, file: StoredFile) {
        self.files.push(file);
    }

    pub fn files(&self) -> &[StoredFile] {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// 保留文件
    pub fn persist(mut self) {
        self.persisted = true;
    }
}

impl Drop for StagedUploads {
    fn drop(&mut self) {
        if self.persisted {
            return;
        }
        for file in &self.files {
            let path = self.dir.join(&file.stored_name);
            if let Err(e) = std::fs::remove_file(&path) {
                warn!("Failed to clean up staged upload {}: {}", path.display(), e);
            }
        }
    }
}
