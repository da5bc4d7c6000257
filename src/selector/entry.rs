// 宿主条目图接口
//
// 拖放事件暴露的层级条目：文件、目录（分批枚举子条目）以及其它类型

use async_trait::async_trait;
use std::fmt;

use super::error::HostError;
use super::types::SharedFile;

/// 条目图中的一个节点
pub enum EntryNode {
    File(Box<dyn FileEntry>),
    Directory(Box<dyn DirectoryEntry>),
    /// 既不是文件也不是目录（符号链接、设备文件等）
    Unsupported { name: String, kind: String },
}

impl EntryNode {
    pub fn name(&self) -> &str {
        match self {
            Self::File(f) => f.name(),
            Self::Directory(d) => d.name(),
            Self::Unsupported { name, .. } => name,
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Self::File(_))
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, Self::Directory(_))
    }
}

impl fmt::Debug for EntryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(entry) => f.debug_tuple("File").field(&entry.name()).finish(),
            Self::Directory(entry) => f.debug_tuple("Directory").field(&entry.name()).finish(),
            Self::Unsupported { name, kind } => f
                .debug_struct("Unsupported")
                .field("name", name)
                .field("kind", kind)
                .finish(),
        }
    }
}

/// 文件条目
#[async_trait(?Send)]
pub trait FileEntry {
    fn name(&self) -> &str;

    /// 解析出底层文件句柄（宿主 I/O）
    async fn file(&self) -> Result<SharedFile, HostError>;
}

/// 目录条目
pub trait DirectoryEntry {
    fn name(&self) -> &str;

    /// 创建该目录的枚举游标，每个游标只被一个遍历任务使用
    fn create_reader(&self) -> Box<dyn DirectoryReader>;
}

/// 目录枚举游标
///
/// 每次调用返回一批子条目，可能只是部分结果；返回空批次表示枚举结束
#[async_trait(?Send)]
pub trait DirectoryReader {
    async fn read_entries(&mut self) -> Result<Vec<EntryNode>, HostError>;
}

/// 拖放事件中的一项
pub trait DataTransferItem {
    /// 获取条目节点，非文件类的拖放项（如文本）返回 None
    fn get_as_entry(&self) -> Option<EntryNode>;
}

/// 拖放事件
pub trait DropEvent {
    /// 按事件顺序返回所有拖放项
    fn items(&self) -> Vec<&dyn DataTransferItem>;

    /// 扁平的文件列表（不支持条目图的宿主只能使用它）
    fn files(&self) -> Vec<SharedFile>;
}

/// 文件选择框（普通或目录模式）
pub trait FileInput {
    fn files(&self) -> Vec<SharedFile>;
}
