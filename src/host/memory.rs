//! 内存条目图
//!
//! 在内存中模拟浏览器拖放条目图，支持:
//! - 可配置的批次大小（模拟分批枚举）
//! - 目录读取延迟（模拟乱序完成）
//! - 第 N 次读取失败、文件解析失败等故障注入
//! - 读取次数统计

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::selector::{
    DataTransferItem, DirectoryEntry, DirectoryReader, DropEvent, EntryNode, FileEntry,
    FileHandle, FileInput, HostError, SharedFile,
};

/// 浏览器默认每批返回 100 个条目
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// 内存文件句柄
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryFile {
    pub name: String,
    pub size: u64,
    pub last_modified: i64,
    pub relative_path: Option<String>,
}

impl MemoryFile {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
            last_modified: 0,
            relative_path: None,
        }
    }

    pub fn with_last_modified(mut self, last_modified: i64) -> Self {
        self.last_modified = last_modified;
        self
    }

    pub fn with_relative_path(mut self, relative_path: impl Into<String>) -> Self {
        self.relative_path = Some(relative_path.into());
        self
    }
}

impl FileHandle for MemoryFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn last_modified(&self) -> i64 {
        self.last_modified
    }

    fn relative_path(&self) -> Option<&str> {
        self.relative_path.as_deref()
    }
}

/// 内存文件条目
#[derive(Debug, Clone)]
pub struct MemoryFileEntry {
    file: Arc<MemoryFile>,
    fail_access: bool,
}

#[async_trait(?Send)]
impl FileEntry for MemoryFileEntry {
    fn name(&self) -> &str {
        &self.file.name
    }

    async fn file(&self) -> Result<SharedFile, HostError> {
        tokio::task::yield_now().await;

        if self.fail_access {
            return Err(HostError::new(format!("模拟文件读取失败: {}", self.file.name)));
        }

        let file: SharedFile = self.file.clone();
        Ok(file)
    }
}

/// 内存目录
///
/// 克隆体共享读取计数
#[derive(Debug, Clone)]
pub struct MemoryDirectory {
    name: String,
    children: Arc<Vec<MemoryNode>>,
    batch_size: usize,
    fail_on_read: Option<usize>,
    delay: Option<Duration>,
    reads: Arc<AtomicUsize>,
}

impl MemoryDirectory {
    pub fn new(name: impl Into<String>, children: Vec<MemoryNode>) -> Self {
        Self {
            name: name.into(),
            children: Arc::new(children),
            batch_size: DEFAULT_BATCH_SIZE,
            fail_on_read: None,
            delay: None,
            reads: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// 每批最多返回的条目数
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// 第 `call` 次读取（从 1 开始）返回错误
    pub fn fail_on_read(mut self, call: usize) -> Self {
        self.fail_on_read = Some(call);
        self
    }

    /// 每次读取前等待
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// 该目录（所有游标合计）被读取的次数
    pub fn read_calls(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl DirectoryEntry for MemoryDirectory {
    fn name(&self) -> &str {
        &self.name
    }

    fn create_reader(&self) -> Box<dyn DirectoryReader> {
        Box::new(MemoryDirectoryReader {
            directory: self.clone(),
            cursor: 0,
            calls: 0,
        })
    }
}

struct MemoryDirectoryReader {
    directory: MemoryDirectory,
    cursor: usize,
    calls: usize,
}

#[async_trait(?Send)]
impl DirectoryReader for MemoryDirectoryReader {
    async fn read_entries(&mut self) -> Result<Vec<EntryNode>, HostError> {
        self.calls += 1;
        self.directory.reads.fetch_add(1, Ordering::SeqCst);

        match self.directory.delay {
            Some(delay) => tokio::time::sleep(delay).await,
            None => tokio::task::yield_now().await,
        }

        if self.directory.fail_on_read == Some(self.calls) {
            return Err(HostError::new(format!(
                "模拟目录读取失败: {} (第 {} 次读取)",
                self.directory.name, self.calls
            )));
        }

        let children = &self.directory.children;
        let end = (self.cursor + self.directory.batch_size).min(children.len());
        let batch = children[self.cursor..end]
            .iter()
            .map(MemoryNode::to_entry)
            .collect();
        self.cursor = end;

        Ok(batch)
    }
}

/// 内存条目树节点
#[derive(Debug, Clone)]
pub enum MemoryNode {
    File(MemoryFileEntry),
    Directory(MemoryDirectory),
    Other { name: String, kind: String },
}

impl MemoryNode {
    pub fn file(name: impl Into<String>, size: u64) -> Self {
        Self::from_file(MemoryFile::new(name, size))
    }

    pub fn from_file(file: MemoryFile) -> Self {
        Self::File(MemoryFileEntry {
            file: Arc::new(file),
            fail_access: false,
        })
    }

    /// 解析句柄时必定失败的文件
    pub fn unreadable_file(name: impl Into<String>) -> Self {
        Self::File(MemoryFileEntry {
            file: Arc::new(MemoryFile::new(name, 0)),
            fail_access: true,
        })
    }

    pub fn directory(name: impl Into<String>, children: Vec<MemoryNode>) -> Self {
        Self::Directory(MemoryDirectory::new(name, children))
    }

    /// 既不是文件也不是目录的条目
    pub fn other(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self::Other {
            name: name.into(),
            kind: kind.into(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::File(f) => &f.file.name,
            Self::Directory(d) => &d.name,
            Self::Other { name, .. } => name,
        }
    }

    /// 转换为条目图节点
    pub fn to_entry(&self) -> EntryNode {
        match self {
            Self::File(f) => EntryNode::File(Box::new(f.clone())),
            Self::Directory(d) => EntryNode::Directory(Box::new(d.clone())),
            Self::Other { name, kind } => EntryNode::Unsupported {
                name: name.clone(),
                kind: kind.clone(),
            },
        }
    }
}

impl From<MemoryDirectory> for MemoryNode {
    fn from(directory: MemoryDirectory) -> Self {
        Self::Directory(directory)
    }
}

/// 内存拖放项
#[derive(Debug, Clone)]
pub struct MemoryItem {
    node: Option<MemoryNode>,
}

impl DataTransferItem for MemoryItem {
    fn get_as_entry(&self) -> Option<EntryNode> {
        self.node.as_ref().map(MemoryNode::to_entry)
    }
}

/// 内存拖放事件
#[derive(Debug, Clone, Default)]
pub struct MemoryDropEvent {
    items: Vec<MemoryItem>,
    files: Vec<SharedFile>,
}

impl MemoryDropEvent {
    /// 按顺序拖入若干条目
    ///
    /// 扁平文件列表只包含顶层文件，目录不会出现在其中
    pub fn new(nodes: Vec<MemoryNode>) -> Self {
        let files = nodes
            .iter()
            .filter_map(|node| match node {
                MemoryNode::File(f) => {
                    let file: SharedFile = f.file.clone();
                    Some(file)
                }
                _ => None,
            })
            .collect();

        let items = nodes
            .into_iter()
            .map(|node| MemoryItem { node: Some(node) })
            .collect();

        Self { items, files }
    }

    /// 追加一个没有条目的拖放项（如拖入的文本）
    pub fn with_text_item(mut self) -> Self {
        self.items.push(MemoryItem { node: None });
        self
    }
}

impl DropEvent for MemoryDropEvent {
    fn items(&self) -> Vec<&dyn DataTransferItem> {
        self.items
            .iter()
            .map(|item| item as &dyn DataTransferItem)
            .collect()
    }

    fn files(&self) -> Vec<SharedFile> {
        self.files.clone()
    }
}

/// 内存文件选择框
#[derive(Debug, Clone, Default)]
pub struct MemoryFileInput {
    files: Vec<SharedFile>,
}

impl MemoryFileInput {
    pub fn new(files: Vec<MemoryFile>) -> Self {
        Self {
            files: files
                .into_iter()
                .map(|f| {
                    let file: SharedFile = Arc::new(f);
                    file
                })
                .collect(),
        }
    }
}

impl FileInput for MemoryFileInput {
    fn files(&self) -> Vec<SharedFile> {
        self.files.clone()
    }
}
