//! # 문자열 유틸리티
//!
//! 쿼리 파라미터/프로바이더 응답 정리와 로그용 마스킹 함수들입니다.

use serde::Deserialize;

/// 공백만 있는 문자열을 `None`으로 정리합니다.
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// `clean_optional_string`을 적용하는 serde 역직렬화 헬퍼
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}

/// 토큰/코드 같은 비밀값을 로그에 남길 때 앞 4글자만 보여줍니다.
pub fn mask_secret(value: &str) -> String {
    let visible: String = value.chars().take(4).collect();
    if value.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("{}****", visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_optional_string() {
        assert_eq!(clean_optional_string(Some("Hello".to_string())), Some("Hello".to_string()));
        assert_eq!(clean_optional_string(Some("  World  ".to_string())), Some("World".to_string()));
        assert_eq!(clean_optional_string(Some("".to_string())), None);
        assert_eq!(clean_optional_string(Some("   ".to_string())), None);
        assert_eq!(clean_optional_string(None), None);
    }

    #[test]
    fn test_deserialize_optional_string() {
        #[derive(Deserialize)]
        struct TestStruct {
            #[serde(default, deserialize_with = "deserialize_optional_string")]
            optional_field: Option<String>,
        }

        let result: TestStruct = serde_json::from_str(r#"{"optional_field": "  Hello World  "}"#).unwrap();
        assert_eq!(result.optional_field, Some("Hello World".to_string()));

        let result: TestStruct = serde_json::from_str(r#"{"optional_field": "\t\n  "}"#).unwrap();
        assert_eq!(result.optional_field, None);

        let result: TestStruct = serde_json::from_str(r#"{"optional_field": null}"#).unwrap();
        assert_eq!(result.optional_field, None);

        // 필드가 없으면 default
        let result: TestStruct = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(result.optional_field, None);
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("6qrZcUqja7812RVdnEKjpzOL4CvHBFG"), "6qrZ****");
        assert_eq!(mask_secret("abcd"), "****");
        assert_eq!(mask_secret(""), "****");
    }
}
