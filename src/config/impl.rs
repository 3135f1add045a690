use config::{Config, ConfigError, Environment, File};
use std::sync::OnceLock;

use super::AppConfig;

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

impl AppConfig {
    /// 加载配置
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            // 首先加载默认配置文件
            .add_source(File::with_name("config").required(false))
            // 然后根据环境加载特定配置文件
            .add_source(
                File::with_name(&format!(
                    "config.{}",
                    std::env::var("APP_ENV").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            // 最后加载环境变量覆盖
            .add_source(
                Environment::with_prefix("RAKUTAN")
                    .separator("_")
                    .try_parsing(true),
            );

        // 支持从环境变量加载
        builder = builder
            .set_override_option("app.environment", std::env::var("APP_ENV").ok())?
            .set_override_option("app.log_level", std::env::var("RUST_LOG").ok())?
            .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
            .set_override_option("server.port", std::env::var("SERVER_PORT").ok())?
            .set_override_option("server.unix_socket_path", std::env::var("UNIX_SOCKET").ok())?
            .set_override_option("server.workers", std::env::var("CPU_COUNT").ok())?
            .set_override_option("jwt.secret", std::env::var("JWT_SECRET").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("cache.redis.url", std::env::var("REDIS_URL").ok())?
            .set_override_option(
                "cache.redis.key_prefix",
                std::env::var("REDIS_KEY_PREFIX").ok(),
            )?
            .set_override_option("cache.default_ttl", std::env::var("REDIS_TTL").ok())?;

        let config = builder.build()?;
        let mut app_config: AppConfig = config.try_deserialize()?;

        // 处理工作线程数
        if app_config.server.workers == 0 {
            app_config.server.workers = num_cpus::get().min(app_config.server.max_workers);
        }

        app_config.validate()?;

        Ok(app_config)
    }

    /// 获取全局配置实例
    pub fn get() -> &'static AppConfig {
        APP_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                eprintln!("Failed to load configuration: {e}");
                std::process::exit(1);
            })
        })
    }

    /// 初始化配置 (在应用启动时调用)
    pub fn init() -> Result<(), ConfigError> {
        let config = Self::load()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))?;
        Ok(())
    }

    /// 启动前的合法性检查
    fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.trim().is_empty() {
            return Err(ConfigError::Message(
                "jwt.secret must be set (JWT_SECRET)".to_string(),
            ));
        }
        if self.grading.max_tree_depth == 0 || self.grading.max_nodes_per_course == 0 {
            return Err(ConfigError::Message(
                "grading limits must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// 检查是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app.environment == "production"
    }

    /// 检查是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }

    /// 获取服务器绑定地址
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 获取 Unix 套接字路径 (如果配置了)
    #[cfg(unix)]
    pub fn unix_socket_path(&self) -> Option<&str> {
        if self.server.unix_socket_path.is_empty() {
            None
        } else {
            Some(&self.server.unix_socket_path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    const BASE: &str = r#"
        [app]
        system_name = "test"
        environment = "development"
        log_level = "debug"

        [server]
        host = "127.0.0.1"
        port = 8080
        unix_socket_path = ""
        workers = 2
        max_workers = 4
        timeouts = { client_request = 5000, client_disconnect = 1000, keep_alive = 30 }
        limits = { max_payload_size = 1024 }

        [jwt]
        secret = "secret"

        [database]
        url = "test.db"
        pool_size = 1
        timeout = 5

        [cache]
        type = "moka"
        default_ttl = 60
        redis = { url = "redis://127.0.0.1:6379", key_prefix = "t:", pool_size = 1 }
        memory = { max_capacity = 100 }

        [cors]
        allowed_origins = []
        allowed_methods = ["GET"]
        allowed_headers = []
        max_age = 0
    "#;

    fn parse(extra: &str) -> AppConfig {
        Config::builder()
            .add_source(File::from_str(&format!("{BASE}\n{extra}"), FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_grading_section_defaults() {
        let config = parse("");
        assert_eq!(config.grading.max_tree_depth, 8);
        assert_eq!(config.grading.max_nodes_per_course, 500);
        assert_eq!(config.jwt.leeway, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_grading_section_override() {
        let config = parse("[grading]\nmax_tree_depth = 3\nmax_nodes_per_course = 20");
        assert_eq!(config.grading.max_tree_depth, 3);
        assert_eq!(config.grading.max_nodes_per_course, 20);
    }

    #[test]
    fn test_validate_rejects_empty_secret() {
        let mut config = parse("");
        config.jwt.secret = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_depth() {
        let config = parse("[grading]\nmax_tree_depth = 0\nmax_nodes_per_course = 20");
        assert!(config.validate().is_err());
    }
}
