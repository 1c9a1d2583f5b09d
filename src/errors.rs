use std::fmt;

use crate::storage::StoreError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkdashError {
    NotAuthenticated,
    DuplicateAlias(String),
    StoreQuery(String),
    StoreWrite(String),
    Validation(String),
    DatabaseConfig(String),
    DatabaseConnection(String),
    Serialization(String),
    FileOperation(String),
}

impl LinkdashError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            LinkdashError::NotAuthenticated => "E001",
            LinkdashError::DuplicateAlias(_) => "E002",
            LinkdashError::StoreQuery(_) => "E003",
            LinkdashError::StoreWrite(_) => "E004",
            LinkdashError::Validation(_) => "E005",
            LinkdashError::DatabaseConfig(_) => "E006",
            LinkdashError::DatabaseConnection(_) => "E007",
            LinkdashError::Serialization(_) => "E008",
            LinkdashError::FileOperation(_) => "E009",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            LinkdashError::NotAuthenticated => "Not Authenticated",
            LinkdashError::DuplicateAlias(_) => "Duplicate Alias",
            LinkdashError::StoreQuery(_) => "Store Query Error",
            LinkdashError::StoreWrite(_) => "Store Write Error",
            LinkdashError::Validation(_) => "Validation Error",
            LinkdashError::DatabaseConfig(_) => "Database Configuration Error",
            LinkdashError::DatabaseConnection(_) => "Database Connection Error",
            LinkdashError::Serialization(_) => "Serialization Error",
            LinkdashError::FileOperation(_) => "File Operation Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            LinkdashError::NotAuthenticated => "User not authenticated",
            LinkdashError::DuplicateAlias(alias) => alias,
            LinkdashError::StoreQuery(msg) => msg,
            LinkdashError::StoreWrite(msg) => msg,
            LinkdashError::Validation(msg) => msg,
            LinkdashError::DatabaseConfig(msg) => msg,
            LinkdashError::DatabaseConnection(msg) => msg,
            LinkdashError::Serialization(msg) => msg,
            LinkdashError::FileOperation(msg) => msg,
        }
    }

    /// The alias carried by a duplicate-alias failure.
    pub fn duplicate_alias(&self) -> Option<&str> {
        match self {
            LinkdashError::DuplicateAlias(alias) => Some(alias),
            _ => None,
        }
    }

    /// 格式化为彩色输出
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出（用于 CLI）
    pub fn format_simple(&self) -> String {
        match self {
            LinkdashError::DuplicateAlias(alias) => {
                format!("{}: '{}' is already taken", self.error_type(), alias)
            }
            _ => format!("{}: {}", self.error_type(), self.message()),
        }
    }
}

impl fmt::Display for LinkdashError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for LinkdashError {}

// 便捷的构造函数
impl LinkdashError {
    pub fn duplicate<T: Into<String>>(alias: T) -> Self {
        LinkdashError::DuplicateAlias(alias.into())
    }

    pub fn store_query<T: Into<String>>(msg: T) -> Self {
        LinkdashError::StoreQuery(msg.into())
    }

    pub fn store_write<T: Into<String>>(msg: T) -> Self {
        LinkdashError::StoreWrite(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        LinkdashError::Validation(msg.into())
    }

    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        LinkdashError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        LinkdashError::DatabaseConnection(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        LinkdashError::Serialization(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        LinkdashError::FileOperation(msg.into())
    }

    /// Wrap a failed read against the remote store.
    pub fn from_query(err: StoreError) -> Self {
        LinkdashError::StoreQuery(err.to_string())
    }
}

impl From<std::io::Error> for LinkdashError {
    fn from(err: std::io::Error) -> Self {
        LinkdashError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for LinkdashError {
    fn from(err: serde_json::Error) -> Self {
        LinkdashError::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for LinkdashError {
    fn from(err: toml::ser::Error) -> Self {
        LinkdashError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LinkdashError>;
