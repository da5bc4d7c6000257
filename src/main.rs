use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use file_drop_walker::{
    config::{AppConfig, LogConfig, DEFAULT_CONFIG_PATH},
    host::{LocalDropEvent, LocalFileInput},
    logging, TraversalResult,
};
use std::path::PathBuf;
use tracing::info;

/// 输入方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// 模拟拖放
    Drop,
    /// 模拟目录选择框
    Directory,
    /// 模拟普通文件选择框
    Files,
}

#[derive(Parser, Debug)]
#[command(name = "file-drop-walker")]
#[command(about = "将拖放 / 目录选择 / 文件选择归一化为根目录 + 文件列表（JSON 输出）", long_about = None)]
struct CliArgs {
    /// 输入方式
    #[arg(long, value_enum, default_value = "drop")]
    mode: Mode,

    /// 配置文件路径
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// 要处理的路径（目录模式只接受一个）
    #[arg(required = true, value_name = "PATH")]
    paths: Vec<PathBuf>,
}

impl CliArgs {
    fn validate(&self) -> Result<()> {
        if self.mode == Mode::Directory && self.paths.len() != 1 {
            anyhow::bail!("目录模式只接受一个路径，实际为 {} 个", self.paths.len());
        }
        Ok(())
    }
}

/// 加载日志配置
///
/// 尝试从配置文件加载，失败时返回默认配置
async fn load_log_config(config_path: &str) -> LogConfig {
    if let Ok(content) = tokio::fs::read_to_string(config_path).await {
        if let Ok(config) = toml::from_str::<toml::Value>(&content) {
            if let Some(log_table) = config.get("log") {
                if let Ok(log_config) = log_table.clone().try_into::<LogConfig>() {
                    return log_config;
                }
            }
        }
    }

    LogConfig::default()
}

async fn run(args: &CliArgs, config: &AppConfig) -> Result<TraversalResult> {
    let selector = config.selector.build_selector();

    let result = match args.mode {
        Mode::Drop => {
            info!("拖放模式: {} 个路径, 策略={:?}", args.paths.len(), selector.strategy());
            let event = LocalDropEvent::from_paths(&args.paths, &config.local)
                .await
                .context("读取拖放路径失败")?;
            selector
                .from_drop_event(&event, config.selector.filter())
                .await
                .context("解析拖放内容失败")?
        }
        Mode::Directory => {
            let input = LocalFileInput::directory(&args.paths[0], &config.local)
                .context("读取目录失败")?;
            selector.from_directory_input(&input).await
        }
        Mode::Files => {
            let input = LocalFileInput::files(&args.paths).context("读取文件失败")?;
            selector.from_file_input(&input).await
        }
    };

    Ok(result)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    args.validate()?;

    // 先加载日志配置（必须保持 _log_guard 存活）
    let log_config = load_log_config(&args.config).await;
    let _log_guard = logging::init_logging(&log_config);

    info!("File Drop Walker v{} 启动", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load_or_default(&args.config).await;
    let result = run(&args, &config).await?;

    info!(
        "共 {} 个文件, 总大小 {} bytes",
        result.len(),
        result.total_size()
    );

    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
