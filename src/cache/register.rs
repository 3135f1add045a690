use crate::cache::ObjectCache;
use crate::errors::{RakutanError, Result};
use once_cell::sync::Lazy;
use std::{
    collections::HashMap,
    future::Future,
    pin::Pin,
    sync::{Arc, RwLock},
};
use tracing::{debug, info, warn};

pub type BoxedObjectCacheFuture =
    Pin<Box<dyn Future<Output = Result<Box<dyn ObjectCache>>> + Send>>;
pub type ObjectCacheConstructor = Arc<dyn Fn() -> BoxedObjectCacheFuture + Send + Sync>;

/// 回退用的内存缓存
pub const FALLBACK_CACHE: &str = "moka";

static OBJECT_CACHE_REGISTRY: Lazy<RwLock<HashMap<String, ObjectCacheConstructor>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

pub fn register_object_cache_plugin<S: Into<String>>(name: S, constructor: ObjectCacheConstructor) {
    let mut registry = OBJECT_CACHE_REGISTRY
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    registry.insert(name.into(), constructor);
}

pub fn get_object_cache_plugin(name: &str) -> Option<ObjectCacheConstructor> {
    OBJECT_CACHE_REGISTRY
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .get(name)
        .cloned()
}

pub fn registered_object_cache_plugins() -> Vec<String> {
    let mut names: Vec<String> = OBJECT_CACHE_REGISTRY
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .keys()
        .cloned()
        .collect();
    names.sort();
    names
}

/// 按名称创建缓存；失败或未注册时回退到内存缓存
pub async fn create_object_cache(cache_type: &str) -> Result<Arc<dyn ObjectCache>> {
    debug!(
        "Registered object cache plugins: {:?}",
        registered_object_cache_plugins()
    );

    match get_object_cache_plugin(cache_type) {
        Some(constructor) => match constructor().await {
            Ok(cache) => {
                info!("Using {} cache backend", cache_type);
                return Ok(Arc::from(cache));
            }
            Err(e) => warn!("Failed to create {} cache: {}", cache_type, e),
        },
        None => warn!("Cache backend '{}' not found in registry", cache_type),
    }

    if cache_type != FALLBACK_CACHE
        && let Some(fallback) = get_object_cache_plugin(FALLBACK_CACHE)
    {
        warn!("Falling back to {} (in-memory) cache", FALLBACK_CACHE);
        return fallback().await.map(Arc::from);
    }

    Err(RakutanError::cache_plugin_not_found(format!(
        "No cache backend available (tried: {cache_type})"
    )))
}
