// ==========================================
// 药品目录提取工具 - 数据库连接配置
// ==========================================
// 职责: 连接串 → ConnectionConfig
// 支持: postgresql:// / mysql:// / sqlite:// / 裸路径（SQLite）
// 红线: 解析永不失败，格式错误回退到固定默认配置
// ==========================================

use crate::i18n::bilingual_with_args;
use std::fmt;
use thiserror::Error;
use tracing::{error, warn};

/// 连接串环境变量（命令行未提供时读取）
pub const DB_URL_ENV: &str = "PHARMA_EXTRACT_DB_URL";

const POSTGRES_PREFIX: &str = "postgresql://";
const MYSQL_PREFIX: &str = "mysql://";
const SQLITE_PREFIX: &str = "sqlite://";

// ==========================================
// StoreKind - 数据库类型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKind {
    Postgresql,
    Mysql,
    Sqlite,
}

impl StoreKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKind::Postgresql => "postgresql",
            StoreKind::Mysql => "mysql",
            StoreKind::Sqlite => "sqlite",
        }
    }

    /// 网络型数据库的默认值: (端口, 用户, 密码, 库名)
    fn network_defaults(&self) -> (u16, &'static str, &'static str, &'static str) {
        match self {
            StoreKind::Mysql => (3306, "root", "", "pharmaceutical_db"),
            _ => (5432, "postgres", "password", "Uqar"),
        }
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==========================================
// NetworkConfig - 网络型数据库连接参数
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

// ==========================================
// ConnectionConfig - 连接配置（启动时解析一次，运行期只读）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionConfig {
    Postgresql(NetworkConfig),
    Mysql(NetworkConfig),
    Sqlite { path: String },
}

impl Default for ConnectionConfig {
    /// 固定默认配置: 本机 PostgreSQL
    fn default() -> Self {
        ConnectionConfig::Postgresql(NetworkConfig {
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: "password".to_string(),
            database: "Uqar".to_string(),
        })
    }
}

impl ConnectionConfig {
    pub fn kind(&self) -> StoreKind {
        match self {
            ConnectionConfig::Postgresql(_) => StoreKind::Postgresql,
            ConnectionConfig::Mysql(_) => StoreKind::Mysql,
            ConnectionConfig::Sqlite { .. } => StoreKind::Sqlite,
        }
    }

    pub fn network(&self) -> Option<&NetworkConfig> {
        match self {
            ConnectionConfig::Postgresql(net) | ConnectionConfig::Mysql(net) => Some(net),
            ConnectionConfig::Sqlite { .. } => None,
        }
    }

    /// 日志用描述（密码脱敏）
    pub fn redacted(&self) -> String {
        match self {
            ConnectionConfig::Sqlite { path } => format!("sqlite://{}", path),
            ConnectionConfig::Postgresql(net) | ConnectionConfig::Mysql(net) => format!(
                "{}://{}:***@{}:{}/{}",
                self.kind(),
                net.user,
                net.host,
                net.port,
                net.database
            ),
        }
    }
}

/// 连接串格式错误
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConnectionStringError {
    #[error("authority contains more than one '@': {0}")]
    MultipleAt(String),

    #[error("credentials must be user:password, got: {0}")]
    InvalidCredentials(String),

    #[error("invalid port: {0}")]
    InvalidPort(String),
}

/// 解析连接串
///
/// # 参数
/// - raw: 连接串（None 表示使用固定默认配置）
///
/// # 返回
/// - ConnectionConfig: 解析结果；格式错误时记录日志并回退到默认配置
pub fn parse_connection_string(raw: Option<&str>) -> ConnectionConfig {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return ConnectionConfig::default();
    };

    match try_parse_connection_string(raw) {
        Ok(config) => config,
        Err(e) => {
            error!(
                error = %e,
                "{}",
                bilingual_with_args("config.parse_failed", &[("error", &e.to_string())])
            );
            ConnectionConfig::default()
        }
    }
}

/// 严格解析连接串（格式错误返回 Err）
pub fn try_parse_connection_string(raw: &str) -> Result<ConnectionConfig, ConnectionStringError> {
    if let Some(rest) = raw.strip_prefix(POSTGRES_PREFIX) {
        return parse_network(StoreKind::Postgresql, rest).map(ConnectionConfig::Postgresql);
    }
    if let Some(rest) = raw.strip_prefix(MYSQL_PREFIX) {
        return parse_network(StoreKind::Mysql, rest).map(ConnectionConfig::Mysql);
    }
    if let Some(path) = raw.strip_prefix(SQLITE_PREFIX) {
        return Ok(ConnectionConfig::Sqlite {
            path: path.to_string(),
        });
    }

    // 无法识别的前缀一律视为 SQLite 文件路径
    Ok(ConnectionConfig::Sqlite {
        path: raw.to_string(),
    })
}

/// 解析 `user:pass@host:port/database`
fn parse_network(kind: StoreKind, rest: &str) -> Result<NetworkConfig, ConnectionStringError> {
    let (default_port, default_user, default_password, default_database) = kind.network_defaults();

    let mut segments = rest.split('/');
    let authority = segments.next().unwrap_or_default();
    let database = segments
        .next()
        .filter(|db| !db.is_empty())
        .unwrap_or(default_database)
        .to_string();

    let (user, password, host_port) = match authority.split_once('@') {
        Some((credentials, host_port)) => {
            if host_port.contains('@') {
                return Err(ConnectionStringError::MultipleAt(authority.to_string()));
            }
            let (user, password) = credentials
                .split_once(':')
                .filter(|(_, password)| !password.contains(':'))
                .ok_or_else(|| ConnectionStringError::InvalidCredentials(credentials.to_string()))?;
            (user.to_string(), password.to_string(), host_port)
        }
        None => (
            default_user.to_string(),
            default_password.to_string(),
            authority,
        ),
    };

    let (host, port) = match host_port.split_once(':') {
        Some((host, port)) => {
            let port = port
                .parse::<u16>()
                .map_err(|_| ConnectionStringError::InvalidPort(port.to_string()))?;
            (host, port)
        }
        None => (host_port, default_port),
    };

    let host = if host.is_empty() {
        warn!(kind = %kind, "empty host in connection string, using localhost");
        "localhost"
    } else {
        host
    };

    Ok(NetworkConfig {
        host: host.to_string(),
        port,
        user,
        password,
        database,
    })
}

/// 选择连接串来源: 命令行参数优先，其次环境变量
///
/// # 参数
/// - cli_arg: 命令行第二个参数
/// - env_value: 环境变量 PHARMA_EXTRACT_DB_URL 的值
pub fn select_connection_string(cli_arg: Option<String>, env_value: Option<String>) -> Option<String> {
    non_blank(cli_arg).or_else(|| non_blank(env_value))
}

/// TRIM 后为空视为未提供
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// 解析本次运行的连接配置（命令行 → 环境变量 → 固定默认）
pub fn resolve_connection_config(cli_arg: Option<String>) -> ConnectionConfig {
    let raw = select_connection_string(cli_arg, std::env::var(DB_URL_ENV).ok());
    parse_connection_string(raw.as_deref())
}
