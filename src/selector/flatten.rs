//! 条目树递归扁平化
//!
//! 负责:
//! - 递归读取目录子条目
//! - 并发处理同级条目，按枚举顺序拼接结果
//! - 累积相对路径（根目录名可被省略）

use async_recursion::async_recursion;
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::descriptor::{build_file_descriptor, join_path};
use super::entry::EntryNode;
use super::error::SelectorError;
use super::reader::read_all_entries;
use super::types::FileDescriptor;

/// 遇到既不是文件也不是目录的条目时的处理方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnsupportedEntryPolicy {
    /// 跳过并记录警告
    #[default]
    Skip,
    /// 使整次遍历失败
    Error,
}

/// 遍历配置
#[derive(Debug, Clone, Default)]
pub struct TraversalOptions {
    pub unsupported_entries: UnsupportedEntryPolicy,
}

/// 条目树扁平化器
#[derive(Debug, Clone, Default)]
pub struct TreeFlattener {
    options: TraversalOptions,
}

impl TreeFlattener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: TraversalOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &TraversalOptions {
        &self.options
    }

    /// 将一个条目（及其全部子孙）扁平化为文件描述列表
    ///
    /// # 参数
    /// - `node`: 要处理的条目
    /// - `base_path`: 条目所在目录的相对路径
    /// - `is_traversal_root`: 为 true 时目录自身的名字不计入子条目路径
    ///
    /// # 返回
    /// - 子树中所有文件，同一目录下按枚举顺序排列，子目录的文件占据该子目录的位置
    #[async_recursion(?Send)]
    pub async fn flatten(
        &self,
        node: &EntryNode,
        base_path: &str,
        is_traversal_root: bool,
    ) -> Result<Vec<FileDescriptor>, SelectorError> {
        match node {
            EntryNode::File(entry) => {
                let file = entry
                    .file()
                    .await
                    .map_err(|source| SelectorError::FileAccess {
                        path: join_path(base_path, entry.name()),
                        source,
                    })?;

                let descriptor = build_file_descriptor(file, base_path);
                debug!("发现文件: {} ({} B)", descriptor.path, descriptor.size);
                Ok(vec![descriptor])
            }
            EntryNode::Directory(directory) => {
                let directory_path = join_path(base_path, directory.name());
                let child_base = if is_traversal_root {
                    base_path.to_string()
                } else {
                    directory_path.clone()
                };

                let children = read_all_entries(&**directory).await.map_err(|source| {
                    SelectorError::Enumeration {
                        path: directory_path.clone(),
                        source,
                    }
                })?;

                // 同级条目并发处理，按子条目下标（而非完成顺序）拼接
                let nested = try_join_all(
                    children
                        .iter()
                        .map(|child| self.flatten(child, &child_base, false)),
                )
                .await?;

                Ok(nested.into_iter().flatten().collect())
            }
            EntryNode::Unsupported { name, kind } => {
                let path = join_path(base_path, name);
                match self.options.unsupported_entries {
                    UnsupportedEntryPolicy::Skip => {
                        warn!("跳过不支持的条目: {} (类型: {})", path, kind);
                        Ok(Vec::new())
                    }
                    UnsupportedEntryPolicy::Error => Err(SelectorError::UnsupportedEntry {
                        path,
                        kind: kind.clone(),
                    }),
                }
            }
        }
    }
}
