use rand::Rng;

const CLASS_CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
pub const CLASS_CODE_LEN: usize = 6;

/// 生成 6 位大写字母数字班级邀请码
pub fn generate_class_code() -> String {
    let mut rng = rand::rng();
    (0..CLASS_CODE_LEN)
        .map(|_| {
            let idx = rng.random_range(0..CLASS_CODE_CHARSET.len());
            CLASS_CODE_CHARSET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_code_shape() {
        for _ in 0..200 {
            let code = generate_class_code();
            assert_eq!(code.len(), CLASS_CODE_LEN);
            assert!(
                code.chars()
                    .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
            );
        }
    }
}
