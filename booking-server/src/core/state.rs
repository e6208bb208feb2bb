use std::path::PathBuf;
use std::sync::Arc;

use sqlx::SqlitePool;

use crate::booking::BookingManager;
use crate::core::Config;
use crate::db::DbService;
use crate::db::repository::time_slot;

/// 服务器状态 - 持有所有服务的共享引用
///
/// ServerState 是预订节点的核心数据结构，作为 axum Router 的状态注入。
/// Clone 成本低：池和 manager 都是 Arc 语义的浅拷贝。
///
/// # 组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | DbService | SQLite 连接池 |
/// | booking | Arc<BookingManager> | 预订生命周期管理 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 数据库服务
    pub db: DbService,
    /// 预订管理器
    pub booking: Arc<BookingManager>,
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    ///
    /// 通常使用 [`ServerState::initialize`] 代替
    pub fn new(config: Config, db: DbService, booking: Arc<BookingManager>) -> Self {
        Self {
            config,
            db,
            booking,
        }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (确保目录存在)
    /// 2. 数据库 (work_dir/database/mesa.db)
    /// 3. 默认时段 (时段表为空时播种)
    /// 4. 预订管理器
    ///
    /// # Panics
    ///
    /// 工作目录或数据库初始化失败时 panic
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db_path = config.database_dir().join("mesa.db");
        let db_path_str = db_path.to_string_lossy();

        let db = DbService::new(&db_path_str)
            .await
            .expect("Failed to initialize database");

        let policy = config.booking_policy();
        time_slot::ensure_defaults(&db.pool, policy.open_hour, policy.close_hour)
            .await
            .expect("Failed to seed default time slots");

        let booking = Arc::new(BookingManager::new(db.pool.clone(), policy));

        Self::new(config.clone(), db, booking)
    }

    /// 初始化内存态服务器状态
    ///
    /// 测试和一次性运行使用：同样播种默认时段，但数据不落盘。
    pub async fn initialize_in_memory(config: &Config) -> Self {
        let db = DbService::new_in_memory()
            .await
            .expect("Failed to initialize in-memory database");

        let policy = config.booking_policy();
        time_slot::ensure_defaults(&db.pool, policy.open_hour, policy.close_hour)
            .await
            .expect("Failed to seed default time slots");

        let booking = Arc::new(BookingManager::new(db.pool.clone(), policy));

        Self::new(config.clone(), db, booking)
    }

    /// 获取数据库连接池
    pub fn pool(&self) -> &SqlitePool {
        &self.db.pool
    }

    /// 获取工作目录
    pub fn work_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.work_dir)
    }
}
