// 文件选择模块数据类型定义

use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// 宿主提供的文件句柄
///
/// 只读取元数据，不读取文件内容，也不复制底层数据
pub trait FileHandle: fmt::Debug {
    /// 文件名（不含目录）
    fn name(&self) -> &str;

    /// 文件大小（字节）
    fn size(&self) -> u64;

    /// 最后修改时间（Unix 毫秒时间戳）
    fn last_modified(&self) -> i64;

    /// 目录选择框提供的相对路径（形如 `root/sub/file.txt`）
    fn relative_path(&self) -> Option<&str> {
        None
    }
}

/// 共享的文件句柄
pub type SharedFile = Arc<dyn FileHandle>;

/// 文件描述
///
/// 每个叶子文件生成一个，生成后不再修改
#[derive(Debug, Clone, Serialize)]
pub struct FileDescriptor {
    /// 文件名
    pub name: String,
    /// 文件大小（字节）
    pub size: u64,
    /// 最后修改时间（Unix 毫秒时间戳）
    #[serde(rename = "lastModified")]
    pub last_modified: i64,
    /// 相对于根目录的路径，使用 `/` 分隔
    pub path: String,
    /// 原始文件句柄
    #[serde(skip)]
    pub file: SharedFile,
}

impl FileDescriptor {
    /// 以给定的相对路径描述文件，元数据取自句柄
    pub fn new(file: SharedFile, path: impl Into<String>) -> Self {
        Self {
            name: file.name().to_string(),
            size: file.size(),
            last_modified: file.last_modified(),
            path: path.into(),
            file,
        }
    }
}

/// 一次选择的归一化结果
#[derive(Debug, Clone, Default, Serialize)]
pub struct TraversalResult {
    /// 根目录名（仅当拖入单个目录或使用目录选择框时非空）
    #[serde(rename = "rootDir")]
    pub root_dir: String,
    /// 扁平化后的文件列表
    pub files: Vec<FileDescriptor>,
}

impl TraversalResult {
    pub fn new(root_dir: impl Into<String>, files: Vec<FileDescriptor>) -> Self {
        Self {
            root_dir: root_dir.into(),
            files,
        }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// 所有文件大小之和
    pub fn total_size(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }

    /// 所有文件的相对路径（按结果顺序）
    pub fn paths(&self) -> Vec<&str> {
        self.files.iter().map(|f| f.path.as_str()).collect()
    }
}
