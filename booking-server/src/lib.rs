//! Mesa Booking Server - 餐厅预订管理系统
//!
//! # 架构概述
//!
//! 本模块是预订服务的主入口，提供以下核心功能：
//!
//! - **空桌查询** (`booking/availability`): 按区域、日期、时段解析可用桌台
//! - **拼桌选择** (`booking/combinations`): 枚举并挑选可坐下聚会的桌台组合
//! - **预订生命周期** (`booking/manager`): 创建、变更、状态流转、取消
//! - **预点餐定价** (`booking/preorder`): 菜品快照和折扣结算
//! - **HTTP API** (`api`): RESTful API 接口
//! - **数据库** (`db`): SQLite (WAL) 存储
//!
//! # 模块结构
//!
//! ```text
//! booking-server/src/
//! ├── core/          # 配置、状态、启动
//! ├── api/           # HTTP 路由和处理器
//! ├── booking/       # 预订域逻辑
//! ├── db/            # 数据库层
//! └── utils/         # 工具函数
//! ```

pub mod api;
pub mod booking;
pub mod core;
pub mod db;
pub mod utils;

// Re-export 公共类型
pub use booking::{BookingError, BookingManager, BookingPolicy, BookingResult};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境
///
/// 依次：加载 `.env`、创建工作目录结构、初始化日志。
/// 生产环境日志输出 JSON 格式，开发环境输出易读格式。
pub fn setup_environment() -> anyhow::Result<()> {
    // .env 文件是可选的
    dotenv::dotenv().ok();

    let config = Config::from_env();
    config.ensure_work_dir_structure()?;

    let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into());
    let log_dir = config.resolved_log_dir();
    utils::logger::init_logger_with_file(&level, config.is_production(), log_dir.to_str())?;

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    __  ___
   /  |/  /__  _________ _
  / /|_/ / _ \/ ___/ __ `/
 / /  / /  __(__  ) /_/ /
/_/  /_/\___/____/\__,_/
    "#
    );
}
