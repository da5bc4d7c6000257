// 文件选择错误定义

use thiserror::Error;

/// 宿主能力调用失败（读取目录批次、解析文件句柄等）
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct HostError {
    pub message: String,
}

impl HostError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// 遍历错误
///
/// 任意子树失败都会使整次调用失败，不返回部分结果
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SelectorError {
    /// 目录枚举失败
    #[error("读取目录失败: {path}: {source}")]
    Enumeration {
        path: String,
        #[source]
        source: HostError,
    },

    /// 文件句柄解析失败
    #[error("读取文件失败: {path}: {source}")]
    FileAccess {
        path: String,
        #[source]
        source: HostError,
    },

    /// 既不是文件也不是目录的条目（仅在 UnsupportedEntryPolicy::Error 下产生）
    #[error("不支持的条目类型 {kind}: {path}")]
    UnsupportedEntry { path: String, kind: String },
}

impl SelectorError {
    /// 出错条目的相对路径
    pub fn path(&self) -> &str {
        match self {
            Self::Enumeration { path, .. }
            | Self::FileAccess { path, .. }
            | Self::UnsupportedEntry { path, .. } => path,
        }
    }
}
