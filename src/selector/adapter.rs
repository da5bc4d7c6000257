//! 文件选择入口
//!
//! 负责:
//! - 拖放事件：根目录检测、并发扁平化每个顶层条目、拼接与过滤
//! - 不支持条目图的宿主：只使用扁平文件列表
//! - 目录选择框 / 普通文件选择框

use futures::future::try_join_all;
use tracing::{debug, info};

use super::capability::DropStrategy;
use super::descriptor::build_file_descriptor;
use super::entry::{DropEvent, EntryNode, FileInput};
use super::error::SelectorError;
use super::filter::{apply_filter, FileFilter};
use super::flatten::{TraversalOptions, TreeFlattener};
use super::input;
use super::types::TraversalResult;

/// 文件选择器
///
/// 拖放策略在创建时确定，之后不再改变
#[derive(Debug, Clone)]
pub struct FileSelector {
    strategy: DropStrategy,
    flattener: TreeFlattener,
}

impl FileSelector {
    pub fn new(strategy: DropStrategy) -> Self {
        Self {
            strategy,
            flattener: TreeFlattener::new(),
        }
    }

    pub fn with_options(strategy: DropStrategy, options: TraversalOptions) -> Self {
        Self {
            strategy,
            flattener: TreeFlattener::with_options(options),
        }
    }

    pub fn strategy(&self) -> DropStrategy {
        self.strategy
    }

    /// 处理拖放事件，按创建时确定的策略分派
    pub async fn from_drop_event(
        &self,
        event: &dyn DropEvent,
        filter: Option<FileFilter<'_>>,
    ) -> Result<TraversalResult, SelectorError> {
        match self.strategy {
            DropStrategy::EntryTree => self.webkit_from_drop_event(event, filter).await,
            DropStrategy::FlatFiles => self.non_webkit_from_drop_event(event, filter).await,
        }
    }

    /// 递归遍历拖放事件中的条目图
    ///
    /// 只拖入一个目录时，该目录作为根目录，其名字不出现在文件路径中；
    /// 其余情况每个顶层条目独立处理，根目录为空
    pub async fn webkit_from_drop_event(
        &self,
        event: &dyn DropEvent,
        filter: Option<FileFilter<'_>>,
    ) -> Result<TraversalResult, SelectorError> {
        let items = event.items();
        let item_count = items.len();

        let entries: Vec<EntryNode> = items
            .into_iter()
            .filter_map(|item| item.get_as_entry())
            .collect();

        if entries.len() < item_count {
            debug!("忽略 {} 个不含条目的拖放项", item_count - entries.len());
        }

        let single_root = entries.len() == 1 && entries[0].is_directory();
        let root_dir = if single_root {
            entries[0].name().to_string()
        } else {
            String::new()
        };

        let nested = try_join_all(
            entries
                .iter()
                .map(|entry| self.flattener.flatten(entry, "", single_root)),
        )
        .await?;

        let files: Vec<_> = nested.into_iter().flatten().collect();
        let scanned = files.len();
        let files = apply_filter(files, filter);

        info!(
            "拖放解析完成: 根目录={:?}, {} 个文件（过滤掉 {} 个）",
            root_dir,
            files.len(),
            scanned - files.len()
        );

        Ok(TraversalResult::new(root_dir, files))
    }

    /// 不支持条目图时只读取扁平文件列表，拖入的目录不会被展开
    pub async fn non_webkit_from_drop_event(
        &self,
        event: &dyn DropEvent,
        filter: Option<FileFilter<'_>>,
    ) -> Result<TraversalResult, SelectorError> {
        let files = event
            .files()
            .into_iter()
            .map(|file| build_file_descriptor(file, ""))
            .collect();
        let files = apply_filter(files, filter);

        info!("拖放解析完成（扁平模式）: {} 个文件", files.len());

        Ok(TraversalResult::new("", files))
    }

    /// 目录选择框
    pub async fn from_directory_input(&self, input: &dyn FileInput) -> TraversalResult {
        let result = input::from_directory_files(input.files());
        info!(
            "目录选择解析完成: 根目录={:?}, {} 个文件",
            result.root_dir,
            result.len()
        );
        result
    }

    /// 普通文件选择框
    pub async fn from_file_input(&self, input: &dyn FileInput) -> TraversalResult {
        let result = input::from_plain_files(input.files());
        info!("文件选择解析完成: {} 个文件", result.len());
        result
    }
}

impl Default for FileSelector {
    fn default() -> Self {
        Self::new(DropStrategy::default())
    }
}
