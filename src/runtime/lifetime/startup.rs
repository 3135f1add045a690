use crate::cache::{ObjectCache, register::create_object_cache};
use crate::config::AppConfig;
use crate::errors::{RakutanError, Result};
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
}

/// 准备服务器启动的上下文
/// 包括存储（含迁移）和缓存
pub async fn prepare_server_startup() -> Result<StartupContext> {
    // redis 和数据库驱动共用 rustls，重复安装时忽略
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }

    let config = AppConfig::get();

    let storage = crate::storage::create_storage().await?;
    warn!("Storage backend initialized and migrations completed");

    let cache = create_object_cache(&config.cache.cache_type)
        .await
        .map_err(|e| RakutanError::cache_connection(format!("Failed to create cache: {e}")))?;
    warn!("Cache backend initialized");

    Ok(StartupContext { storage, cache })
}
