//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。
//! 每个子模块以 `*_impl` 方法实现一组存储操作，`Storage` trait 只做转发。

mod courses;
mod entries;
mod nodes;
mod thresholds;

use crate::config::{AppConfig, DatabaseConfig};
use crate::errors::{RakutanError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 按全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        Self::connect(&AppConfig::get().database).await
    }

    /// 连接数据库并运行迁移
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| RakutanError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| RakutanError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| RakutanError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| RakutanError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(RakutanError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    courses::{
        entities::Course,
        requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
        responses::CourseListResponse,
    },
    entries::{entities::Entry, requests::UpsertEntryRequest},
    events::responses::CourseEvent,
    nodes::{
        entities::EvaluationNode,
        requests::{CreateNodeRequest, UpdateNodeRequest},
    },
    thresholds::entities::Threshold,
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 课程模块
    async fn create_course(&self, owner_id: i64, course: CreateCourseRequest) -> Result<Course> {
        self.create_course_impl(owner_id, course).await
    }

    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>> {
        self.get_course_by_id_impl(course_id).await
    }

    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        self.list_courses_with_pagination_impl(query).await
    }

    async fn update_course(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        self.update_course_impl(course_id, update).await
    }

    async fn delete_course(&self, course_id: i64) -> Result<bool> {
        self.delete_course_impl(course_id).await
    }

    // 节点模块
    async fn create_node(
        &self,
        course_id: i64,
        node: CreateNodeRequest,
    ) -> Result<EvaluationNode> {
        self.create_node_impl(course_id, node).await
    }

    async fn get_node_by_id(&self, node_id: i64) -> Result<Option<EvaluationNode>> {
        self.get_node_by_id_impl(node_id).await
    }

    async fn list_course_nodes(&self, course_id: i64) -> Result<Vec<EvaluationNode>> {
        self.list_course_nodes_impl(course_id).await
    }

    async fn update_node(
        &self,
        node_id: i64,
        update: UpdateNodeRequest,
    ) -> Result<Option<EvaluationNode>> {
        self.update_node_impl(node_id, update).await
    }

    async fn delete_node(&self, node_id: i64) -> Result<bool> {
        self.delete_node_impl(node_id).await
    }

    async fn list_events(&self, owner_id: i64) -> Result<Vec<CourseEvent>> {
        self.list_events_impl(owner_id).await
    }

    // 录入模块
    async fn list_course_entries(&self, user_id: i64, course_id: i64) -> Result<Vec<Entry>> {
        self.list_course_entries_impl(user_id, course_id).await
    }

    async fn get_entry(&self, user_id: i64, node_id: i64) -> Result<Option<Entry>> {
        self.get_entry_impl(user_id, node_id).await
    }

    async fn upsert_entry(&self, user_id: i64, entry: UpsertEntryRequest) -> Result<Entry> {
        self.upsert_entry_impl(user_id, entry).await
    }

    // 及格线模块
    async fn get_threshold(&self, course_id: i64) -> Result<Option<Threshold>> {
        self.get_threshold_impl(course_id).await
    }

    async fn ensure_threshold(&self, course_id: i64) -> Result<Threshold> {
        self.ensure_threshold_impl(course_id).await
    }

    async fn set_threshold(&self, course_id: i64, value: f64) -> Result<Threshold> {
        self.set_threshold_impl(course_id, value).await
    }
}
