use serde::{Deserialize, Serialize};

/// Default configuration file name, read from the working directory
pub const DEFAULT_CONFIG_FILE: &str = "linkdash.toml";

/// Prefix of environment overrides, e.g. `LINKDASH__STORE__URL`
pub const ENV_PREFIX: &str = "LINKDASH";

/// 静态配置（从 TOML 加载，启动时使用）
///
/// - store: 链接表所在的存储（REST、SQL 或内存）
/// - session: 当前用户身份
/// - links: 别名和列表展示
/// - logging: 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub links: LinksConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > TOML 文件 > 默认值
    /// ENV 前缀：LINKDASH，分隔符：__
    /// 示例：LINKDASH__STORE__URL=https://project.example.co
    pub fn try_load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        use config::{Config, Environment, File};

        let path = path.unwrap_or(DEFAULT_CONFIG_FILE);

        Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<StaticConfig>()
    }

    /// Like [`StaticConfig::try_load`], falling back to defaults on error.
    ///
    /// Runs before logging is up, so problems go to stderr.
    pub fn load(path: Option<&str>) -> Self {
        match Self::try_load(path) {
            Ok(config) => {
                let shown = path.unwrap_or(DEFAULT_CONFIG_FILE);
                if std::path::Path::new(shown).exists() {
                    eprintln!("[INFO] Configuration loaded from: {}", shown);
                }
                config
            }
            Err(e) => {
                eprintln!("[ERROR] Failed to load config: {}", e);
                Self::default()
            }
        }
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> crate::errors::Result<()> {
        let content = toml::to_string_pretty(self)?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

/// 链接存储配置
///
/// `url` 决定存储类型：`memory`、`http(s)://`（托管 REST 表）或数据库 URL。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_url")]
    pub url: String,
    /// Project API key sent with every REST request
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_store_table")]
    pub table: String,
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// 会话配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SessionConfig {
    /// Fixed principal id; takes precedence over `access_token`
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
    /// HS256 secret; without it the token is decoded unverified
    #[serde(default)]
    pub jwt_secret: Option<String>,
    #[serde(default)]
    pub audience: Option<String>,
}

/// 链接配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinksConfig {
    #[serde(default = "default_alias_length")]
    pub alias_length: usize,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Base under which aliases are served, e.g. `https://sho.rt`
    #[serde(default)]
    pub public_base_url: Option<String>,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

// ============================================================
// Default value functions
// ============================================================

fn default_store_url() -> String {
    "linkdash.db".to_string()
}

fn default_store_table() -> String {
    "links".to_string()
}

fn default_pool_size() -> u32 {
    10
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_alias_length() -> usize {
    crate::utils::DEFAULT_ALIAS_LENGTH
}

fn default_page_size() -> usize {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

// ============================================================
// Default implementations
// ============================================================

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: default_store_url(),
            api_key: None,
            table: default_store_table(),
            pool_size: default_pool_size(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            alias_length: default_alias_length(),
            page_size: default_page_size(),
            public_base_url: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = StaticConfig::default();
        assert_eq!(config.store.url, "linkdash.db");
        assert_eq!(config.store.table, "links");
        assert_eq!(config.store.pool_size, 10);
        assert_eq!(config.links.alias_length, 6);
        assert_eq!(config.links.page_size, 10);
        assert_eq!(config.logging.level, "info");
        assert!(config.session.user_id.is_none());
    }

    #[test]
    fn test_sample_config_round_trips() {
        let sample = StaticConfig::generate_sample_config();
        assert!(sample.contains("[store]"));
        assert!(sample.contains("[links]"));

        let parsed: StaticConfig = toml::from_str(&sample).unwrap();
        assert_eq!(parsed.store.url, "linkdash.db");
        assert_eq!(parsed.links.alias_length, 6);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[store]\nurl = \"memory\"\n\n[session]\nuser_id = \"u-1\"\n\n[links]\nalias_length = 8"
        )
        .unwrap();

        let config = StaticConfig::try_load(file.path().to_str()).unwrap();
        assert_eq!(config.store.url, "memory");
        assert_eq!(config.store.table, "links");
        assert_eq!(config.session.user_id.as_deref(), Some("u-1"));
        assert_eq!(config.links.alias_length, 8);
        assert_eq!(config.links.page_size, 10);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let config = StaticConfig::load(path.to_str());
        assert_eq!(config.store.url, "linkdash.db");
    }

    #[test]
    fn test_save_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("linkdash.toml");

        let mut config = StaticConfig::default();
        config.links.public_base_url = Some("https://sho.rt".to_string());
        config.save_to_file(&path).unwrap();

        let loaded = StaticConfig::try_load(path.to_str()).unwrap();
        assert_eq!(
            loaded.links.public_base_url.as_deref(),
            Some("https://sho.rt")
        );
    }
}
