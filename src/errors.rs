//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_rakutan_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum RakutanError {
            $($variant(String),)*
        }

        impl RakutanError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(RakutanError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(RakutanError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(RakutanError::$variant(msg) => msg,)*
                }
            }
        }

        paste::paste! {
            impl RakutanError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        RakutanError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_rakutan_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    Validation("E006", "Validation Error"),
    NotFound("E007", "Resource Not Found"),
    Serialization("E008", "Serialization Error"),
    DateParse("E009", "Date Parse Error"),
    Authentication("E010", "Authentication Error"),
    Authorization("E011", "Authorization Error"),
    InvalidTree("E012", "Invalid Evaluation Tree"),
}

impl RakutanError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 是否为调用方输入导致的错误
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            RakutanError::Validation(_)
                | RakutanError::NotFound(_)
                | RakutanError::DateParse(_)
                | RakutanError::Authentication(_)
                | RakutanError::Authorization(_)
        )
    }
}

impl fmt::Display for RakutanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for RakutanError {}

impl From<sea_orm::DbErr> for RakutanError {
    fn from(err: sea_orm::DbErr) -> Self {
        RakutanError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for RakutanError {
    fn from(err: std::io::Error) -> Self {
        RakutanError::DatabaseConnection(err.to_string())
    }
}

impl From<serde_json::Error> for RakutanError {
    fn from(err: serde_json::Error) -> Self {
        RakutanError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for RakutanError {
    fn from(err: chrono::ParseError) -> Self {
        RakutanError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RakutanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(RakutanError::cache_connection("test").code(), "E001");
        assert_eq!(RakutanError::database_config("test").code(), "E003");
        assert_eq!(RakutanError::validation("test").code(), "E006");
        assert_eq!(RakutanError::invalid_tree("test").code(), "E012");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            RakutanError::invalid_tree("cycle").error_type(),
            "Invalid Evaluation Tree"
        );
        assert_eq!(
            RakutanError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_client_error_classification() {
        assert!(RakutanError::validation("bad weight").is_client_error());
        assert!(RakutanError::not_found("node").is_client_error());
        assert!(!RakutanError::invalid_tree("cycle").is_client_error());
        assert!(!RakutanError::database_operation("locked").is_client_error());
    }

    #[test]
    fn test_date_parse_conversion() {
        let err: RakutanError = chrono::NaiveDate::parse_from_str("2025-13-40", "%Y-%m-%d")
            .unwrap_err()
            .into();
        assert_eq!(err.code(), "E009");
    }

    #[test]
    fn test_format_simple() {
        let err = RakutanError::validation("Weight must be non-negative");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Weight must be non-negative"));
    }
}
