use serde::{Deserialize, Deserializer};

/// 区分“字段缺失”和“显式置空”
///
/// 配合 `#[serde(default, deserialize_with = "deserialize_patch")]` 使用：
/// - 字段缺失 => `None`（保持原值）
/// - `null` => `Some(None)`（清空）
/// - 具体值 => `Some(Some(v))`
pub fn deserialize_patch<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "deserialize_patch")]
        earned: Option<Option<f64>>,
    }

    #[test]
    fn test_missing_field_keeps_value() {
        let patch: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(patch.earned, None);
    }

    #[test]
    fn test_null_clears_value() {
        let patch: Patch = serde_json::from_str(r#"{"earned": null}"#).unwrap();
        assert_eq!(patch.earned, Some(None));
    }

    #[test]
    fn test_value_sets_value() {
        let patch: Patch = serde_json::from_str(r#"{"earned": 42.5}"#).unwrap();
        assert_eq!(patch.earned, Some(Some(42.5)));
    }
}
