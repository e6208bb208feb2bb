use std::path::PathBuf;

use chrono_tz::Tz;
use tracing::warn;

use crate::booking::manager::BookingPolicy;
use crate::booking::SelectionStrategy;

/// 服务器配置 - 预订节点的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | /var/lib/mesa | 工作目录 (数据库、日志) |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | TIMEZONE | Europe/Madrid | 餐厅本地时区 |
/// | OPEN_HOUR | 6 | 默认时段的起始小时 |
/// | CLOSE_HOUR | 22 | 默认时段的结束小时 |
/// | MIN_LEAD_MINUTES | 60 | 预订的最短提前量(分钟) |
/// | MAX_PARTY_SIZE | 23 | 达到该人数须致电餐厅 |
/// | MAX_TABLES_PER_RESERVATION | 3 | 单个预订的拼桌上限 |
/// | SELECTION_STRATEGY | first_fit | 自动选桌策略 |
/// | PRE_ORDER_DISCOUNT_PERCENT | 15 | 预点餐折扣(百分比) |
/// | LOG_DIR | (work_dir)/logs | 日志目录 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/mesa HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、日志等文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,

    // === 预订策略配置 ===
    /// 餐厅本地时区 (IANA 名称)
    pub timezone: String,
    /// 默认时段的起始小时
    pub open_hour: u32,
    /// 默认时段的结束小时
    pub close_hour: u32,
    /// 预订的最短提前量 (分钟)
    pub min_lead_minutes: i64,
    /// 达到该人数的聚会须致电餐厅
    pub max_party_size: i32,
    /// 单个预订的拼桌上限
    pub max_tables_per_reservation: usize,
    /// 自动选桌策略: first_fit | minimal_waste
    pub selection_strategy: String,
    /// 预点餐折扣 (百分比)
    pub pre_order_discount_percent: u32,
    /// 日志目录 (未设置时使用 work_dir/logs)
    pub log_dir: Option<String>,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/mesa".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),

            timezone: std::env::var("TIMEZONE").unwrap_or_else(|_| "Europe/Madrid".into()),
            open_hour: std::env::var("OPEN_HOUR")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(6),
            close_hour: std::env::var("CLOSE_HOUR")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(22),
            min_lead_minutes: std::env::var("MIN_LEAD_MINUTES")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(60),
            max_party_size: std::env::var("MAX_PARTY_SIZE")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(23),
            max_tables_per_reservation: std::env::var("MAX_TABLES_PER_RESERVATION")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3),
            selection_strategy: std::env::var("SELECTION_STRATEGY")
                .unwrap_or_else(|_| "first_fit".into()),
            pre_order_discount_percent: std::env::var("PRE_ORDER_DISCOUNT_PERCENT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(15),
            log_dir: std::env::var("LOG_DIR").ok(),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// 构建预订策略
    ///
    /// 时区或选桌策略无法解析时回退到默认值并告警，
    /// 其余数值字段原样透传。
    pub fn booking_policy(&self) -> BookingPolicy {
        let defaults = BookingPolicy::default();

        let timezone: Tz = match self.timezone.parse() {
            Ok(tz) => tz,
            Err(_) => {
                warn!(
                    timezone = %self.timezone,
                    "Unknown TIMEZONE, falling back to {}",
                    defaults.timezone
                );
                defaults.timezone
            }
        };

        let strategy: SelectionStrategy = match self.selection_strategy.parse() {
            Ok(s) => s,
            Err(_) => {
                warn!(
                    strategy = %self.selection_strategy,
                    "Unknown SELECTION_STRATEGY, falling back to first_fit"
                );
                SelectionStrategy::FirstFit
            }
        };

        BookingPolicy {
            timezone,
            open_hour: self.open_hour,
            close_hour: self.close_hour,
            min_lead_minutes: self.min_lead_minutes,
            max_party_size: self.max_party_size,
            max_tables: self.max_tables_per_reservation,
            strategy,
            pre_order_discount_percent: self.pre_order_discount_percent,
        }
    }

    /// 确保工作目录结构存在
    ///
    /// ```text
    /// work_dir/
    /// ├── database/   # SQLite 数据库文件
    /// └── logs/       # 滚动日志
    /// ```
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.resolved_log_dir())?;
        Ok(())
    }

    /// 数据库目录
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// 日志目录 (LOG_DIR 或 work_dir/logs)
    pub fn resolved_log_dir(&self) -> PathBuf {
        match &self.log_dir {
            Some(dir) => PathBuf::from(dir),
            None => PathBuf::from(&self.work_dir).join("logs"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
