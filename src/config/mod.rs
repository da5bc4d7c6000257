// 配置管理模块

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::fs;

use crate::selector::{
    skip_hidden_files, DropStrategy, FileFilter, FileSelector, HostCapabilities,
    TraversalOptions, UnsupportedEntryPolicy,
};

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "config/app.toml";

/// 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// 文件选择配置
    #[serde(default)]
    pub selector: SelectorConfig,
    /// 本地文件系统宿主配置
    #[serde(default)]
    pub local: LocalHostConfig,
    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 拖放策略模式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyMode {
    /// 根据 user_agent 自动检测，未配置 user_agent 时使用条目图
    #[default]
    Auto,
    EntryTree,
    FlatFiles,
}

/// 文件选择配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// 拖放策略
    #[serde(default)]
    pub strategy: StrategyMode,
    /// 用于自动检测的宿主 User-Agent
    #[serde(default)]
    pub user_agent: Option<String>,
    /// 不支持的条目类型如何处理
    #[serde(default)]
    pub unsupported_entries: UnsupportedEntryPolicy,
    /// 跳过隐藏文件（路径中任意一段以 . 开头）
    #[serde(default)]
    pub skip_hidden: bool,
}

impl SelectorConfig {
    /// 确定拖放策略
    pub fn drop_strategy(&self) -> DropStrategy {
        match self.strategy {
            StrategyMode::EntryTree => DropStrategy::EntryTree,
            StrategyMode::FlatFiles => DropStrategy::FlatFiles,
            StrategyMode::Auto => {
                let capabilities = self
                    .user_agent
                    .as_deref()
                    .map(HostCapabilities::from_user_agent)
                    .unwrap_or(HostCapabilities::new(true));
                DropStrategy::detect(&capabilities)
            }
        }
    }

    pub fn traversal_options(&self) -> TraversalOptions {
        TraversalOptions {
            unsupported_entries: self.unsupported_entries,
        }
    }

    /// 拖放结果使用的过滤器
    pub fn filter(&self) -> Option<FileFilter<'static>> {
        if self.skip_hidden {
            Some(&skip_hidden_files)
        } else {
            None
        }
    }

    pub fn build_selector(&self) -> FileSelector {
        FileSelector::with_options(self.drop_strategy(), self.traversal_options())
    }
}

/// 本地文件系统宿主配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalHostConfig {
    /// 每次目录读取最多返回的条目数（默认 100）
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// 是否跟随符号链接
    #[serde(default)]
    pub follow_symlinks: bool,
}

fn default_batch_size() -> usize {
    100
}

impl Default for LocalHostConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            follow_symlinks: false,
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// 是否启用日志文件持久化
    #[serde(default)]
    pub enabled: bool,
    /// 日志文件保存目录
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
    /// 日志保留天数（默认 7 天）
    #[serde(default = "default_log_retention_days")]
    pub retention_days: u32,
    /// 日志级别（默认 info）
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

fn default_log_retention_days() -> u32 {
    7
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_dir: default_log_dir(),
            retention_days: default_log_retention_days(),
            level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// 从文件加载配置
    pub async fn load_from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .context("Failed to read config file")?;

        let config: AppConfig = toml::from_str(&content).context("Failed to parse config file")?;

        if config.local.batch_size == 0 {
            anyhow::bail!("配置错误: local.batch_size 必须大于 0");
        }

        Ok(config)
    }

    /// 保存配置到文件
    pub async fn save_to_file(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        // 确保父目录存在
        if let Some(parent) = std::path::Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .context("Failed to create config directory")?;
            }
        }

        fs::write(path, content)
            .await
            .context("Failed to write config file")?;

        tracing::info!("配置已保存: {}", path);

        Ok(())
    }

    /// 加载配置，失败时使用默认配置
    pub async fn load_or_default(path: &str) -> Self {
        match Self::load_from_file(path).await {
            Ok(config) => {
                tracing::info!("配置文件加载成功: {}", path);
                config
            }
            Err(e) => {
                tracing::warn!("配置文件加载失败，使用默认配置: {:#}", e);
                Self::default()
            }
        }
    }
}
