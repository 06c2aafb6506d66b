use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::models::users::entities::User;

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub id: String,    // 用户ID
    pub name: String,  // 用户名称
    pub email: String, // 邮箱
    pub role: String,  // 用户角色，校验时再解析
    pub exp: usize,    // Expiration time (时间戳)
    pub iat: usize,    // Issued at (签发时间)
}

/// 令牌签发与校验（HS256）
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry: Duration,
}

impl JwtService {
    pub fn new(secret: &str, expiry: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiry,
        }
    }

    pub fn expiry(&self) -> Duration {
        self.expiry
    }

    // 为用户签发令牌
    pub fn generate_token(&self, user: &User) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let expiration = now
            .checked_add_signed(self.expiry)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        let claims = Claims {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.to_string(),
            exp: expiration.timestamp().max(0) as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
    }

    // 验证 JWT token（签名与过期时间）
    pub fn verify_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let validation = Validation::default();
        decode::<Claims>(token, &self.decoding_key, &validation).map(|data| data.claims)
    }
}

/// 解析有效期：纯数字为秒，支持 s/m/h/d 后缀
pub fn parse_ttl(value: &str) -> Option<Duration> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    let (digits, unit) = match value.char_indices().last() {
        Some((idx, c)) if c.is_ascii_alphabetic() => (&value[..idx], c.to_ascii_lowercase()),
        _ => (value, 's'),
    };
    let amount: i64 = digits.trim().parse().ok()?;
    if amount <= 0 {
        return None;
    }

    let ttl = match unit {
        's' => Duration::try_seconds(amount),
        'm' => Duration::try_minutes(amount),
        'h' => Duration::try_hours(amount),
        'd' => Duration::try_days(amount),
        _ => None,
    }?;
    // 过期时间必须落在可表示的时间范围内
    Utc::now().checked_add_signed(ttl)?;
    Some(ttl)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;

    fn user() -> User {
        User {
            id: "3f1c1a0e-0000-4000-8000-000000000001".to_string(),
            name: "Laura".to_string(),
            email: "laura@example.com".to_string(),
            password_hash: String::new(),
            role: UserRole::Teacher,
            avatar_url: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn token_round_trip_carries_identity() {
        let service = JwtService::new("test-secret", Duration::days(1));
        let token = service.generate_token(&user()).unwrap();
        let claims = service.verify_token(&token).unwrap();

        assert_eq!(claims.id, "3f1c1a0e-0000-4000-8000-000000000001");
        assert_eq!(claims.email, "laura@example.com");
        assert_eq!(claims.role, "teacher");
        assert_eq!(claims.exp - claims.iat, 86400);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let signer = JwtService::new("secret-a", Duration::hours(1));
        let verifier = JwtService::new("secret-b", Duration::hours(1));
        let token = signer.generate_token(&user()).unwrap();
        assert!(verifier.verify_token(&token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let service = JwtService::new("test-secret", Duration::hours(-2));
        let token = service.generate_token(&user()).unwrap();
        assert!(service.verify_token(&token).is_err());
    }

    #[test]
    fn ttl_formats() {
        assert_eq!(parse_ttl("3600"), Some(Duration::seconds(3600)));
        assert_eq!(parse_ttl("30m"), Some(Duration::minutes(30)));
        assert_eq!(parse_ttl("12h"), Some(Duration::hours(12)));
        assert_eq!(parse_ttl("1d"), Some(Duration::days(1)));
        assert_eq!(parse_ttl("7D"), Some(Duration::days(7)));
        assert_eq!(parse_ttl(""), None);
        assert_eq!(parse_ttl("0"), None);
        assert_eq!(parse_ttl("2w"), None);
        assert_eq!(parse_ttl("abc"), None);
    }

    #[test]
    fn ttl_overflow_is_rejected() {
        assert_eq!(parse_ttl(&format!("{}d", i64::MAX)), None);
        assert_eq!(parse_ttl(&format!("{}s", i64::MAX)), None);
        assert_eq!(parse_ttl("100000000000d"), None);
        assert_eq!(parse_ttl("36500d"), Some(Duration::days(36500)));
    }
}
