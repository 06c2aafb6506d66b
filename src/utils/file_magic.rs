/// 验证文件内容的魔术字节是否与声明的 MIME 类型匹配
///
/// # Arguments
/// * `data` - 文件内容的前几个字节
/// * `mime_type` - 客户端声明的类型，如 "image/png"
///
/// # Returns
/// * `true` - 魔术字节匹配或该类型不需要验证
/// * `false` - 魔术字节不匹配或类型未知
pub fn validate_magic_bytes(data: &[u8], mime_type: &str) -> bool {
    if data.is_empty() {
        return false;
    }

    let mime = mime_type.to_ascii_lowercase();
    match mime.as_str() {
        // 图片格式
        "image/png" => data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]),
        "image/jpeg" | "image/jpg" => data.starts_with(&[0xFF, 0xD8, 0xFF]),
        "image/gif" => data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a"),
        "image/webp" => data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP",
        "image/bmp" => data.starts_with(b"BM"),

        // 文档格式
        "application/pdf" => data.starts_with(b"%PDF"),
        "application/msword" | "application/vnd.ms-excel" | "application/vnd.ms-powerpoint" => {
            // MS Office 旧格式 (OLE Compound Document)
            data.starts_with(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1])
        }
        m if m.starts_with("application/vnd.openxmlformats-officedocument.") => {
            // MS Office 新格式 (ZIP-based OOXML)
            data.starts_with(&[0x50, 0x4B, 0x03, 0x04])
        }

        // 压缩格式
        "application/zip" | "application/x-zip-compressed" => {
            data.starts_with(&[0x50, 0x4B, 0x03, 0x04])
        }
        "application/gzip" => data.starts_with(&[0x1F, 0x8B]),

        // 文本格式 - 不检查魔术字节
        m if m.starts_with("text/") => true,
        "application/json" => true,

        // 未知格式 - 默认拒绝
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_magic() {
        let png_header = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        assert!(validate_magic_bytes(&png_header, "image/png"));
        assert!(validate_magic_bytes(&png_header, "IMAGE/PNG"));
        assert!(!validate_magic_bytes(&png_header, "image/jpeg"));
    }

    #[test]
    fn test_jpeg_magic() {
        let jpeg_header = [0xFF, 0xD8, 0xFF, 0xE0];
        assert!(validate_magic_bytes(&jpeg_header, "image/jpeg"));
        assert!(!validate_magic_bytes(&jpeg_header, "image/png"));
    }

    #[test]
    fn test_pdf_magic() {
        let pdf_header = b"%PDF-1.4";
        assert!(validate_magic_bytes(pdf_header, "application/pdf"));
        assert!(!validate_magic_bytes(pdf_header, "image/gif"));
    }

    #[test]
    fn test_renamed_executable_is_rejected() {
        let elf = [0x7F, 0x45, 0x4C, 0x46, 0x02, 0x01];
        assert!(!validate_magic_bytes(&elf, "application/pdf"));
        assert!(!validate_magic_bytes(&elf, "application/x-executable"));
    }

    #[test]
    fn test_text_files() {
        assert!(validate_magic_bytes(b"Hello, World!", "text/plain"));
    }

    #[test]
    fn test_empty_data() {
        assert!(!validate_magic_bytes(&[], "image/png"));
        assert!(!validate_magic_bytes(&[], "text/plain"));
    }
}
