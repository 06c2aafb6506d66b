//! 路径参数提取器
//!
//! 只接受字母、数字、`-`、`_` 组成的 ID，避免把任意字符串带进查询。
//! 不校验 UUID 格式：不存在的 ID 交给服务层返回对应的 NOT_FOUND。

use actix_web::{FromRequest, HttpRequest, dev::Payload};
use std::future::{Ready, ready};

use crate::models::{ApiError, ErrorCode};

const MAX_ID_LEN: usize = 64;

fn extract_safe_id(req: &HttpRequest, param: &str) -> Result<String, ApiError> {
    let raw = req.match_info().get(param).unwrap_or_default();
    let valid = !raw.is_empty()
        && raw.len() <= MAX_ID_LEN
        && raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(raw.to_string())
    } else {
        Err(ApiError::new(
            ErrorCode::MissingFields,
            format!("Invalid path parameter: {param}"),
        ))
    }
}

macro_rules! define_safe_id_extractor {
    ($($name:ident => $param:literal),* $(,)?) => {
        $(
            #[derive(Debug, Clone)]
            pub struct $name(pub String);

            impl FromRequest for $name {
                type Error = ApiError;
                type Future = Ready<Result<Self, Self::Error>>;

                fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                    ready(extract_safe_id(req, $param).map($name))
                }
            }
        )*
    };
}

define_safe_id_extractor! {
    SafeId => "id",
    SafeClassId => "class_id",
    SafeStudentId => "student_id",
    SafeSubmissionId => "submission_id",
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn accepts_uuid_and_rejects_unsafe_segments() {
        let req = TestRequest::default()
            .param("class_id", "0b7f3c8e-6a44-4a1e-9d2c-1f0e5b7d9a11")
            .to_http_request();
        let id = SafeClassId::extract(&req).await.unwrap();
        assert_eq!(id.0, "0b7f3c8e-6a44-4a1e-9d2c-1f0e5b7d9a11");

        let req = TestRequest::default()
            .param("id", "1 OR 1=1")
            .to_http_request();
        let err = SafeId::extract(&req).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingFields);
    }
}
