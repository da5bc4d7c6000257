//! 本地文件系统条目图
//!
//! 负责:
//! - 将本地路径包装为拖放条目（目录按 batch_size 分批枚举）
//! - 模拟目录选择框（walkdir 遍历，生成 `root/相对路径`）
//! - 模拟普通文件选择框

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fs::{FileType, Metadata};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::debug;
use walkdir::WalkDir;

use crate::config::LocalHostConfig;
use crate::selector::{
    DataTransferItem, DirectoryEntry, DirectoryReader, DropEvent, EntryNode, FileEntry,
    FileHandle, FileInput, HostError, SharedFile,
};

/// 本地文件句柄
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    name: String,
    size: u64,
    last_modified: i64,
    path: PathBuf,
    relative_path: Option<String>,
}

impl LocalFile {
    fn from_metadata(path: PathBuf, metadata: &Metadata) -> Self {
        let last_modified = metadata
            .modified()
            .map(|t| DateTime::<Utc>::from(t).timestamp_millis())
            .unwrap_or(0);

        Self {
            name: entry_name(&path),
            size: metadata.len(),
            last_modified,
            path,
            relative_path: None,
        }
    }

    /// 本地绝对/原始路径
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FileHandle for LocalFile {
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

/// 获取本地路径对应的条目
pub async fn local_entry(
    path: impl AsRef<Path>,
    config: &LocalHostConfig,
) -> Result<EntryNode, HostError> {
    let path = path.as_ref();
    let file_type = lookup_file_type(path, config.follow_symlinks).await?;
    Ok(classify(path.to_path_buf(), entry_name(path), file_type, config))
}

async fn lookup_file_type(path: &Path, follow_symlinks: bool) -> Result<FileType, HostError> {
    let metadata = if follow_symlinks {
        fs::metadata(path).await
    } else {
        fs::symlink_metadata(path).await
    }
    .map_err(|e| HostError::new(format!("读取文件元数据失败: {}: {}", path.display(), e)))?;

    Ok(metadata.file_type())
}

fn entry_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

fn classify(path: PathBuf, name: String, file_type: FileType, config: &LocalHostConfig) -> EntryNode {
    if file_type.is_dir() {
        EntryNode::Directory(Box::new(LocalDirectory {
            name,
            path,
            config: config.clone(),
        }))
    } else if file_type.is_file() {
        EntryNode::File(Box::new(LocalFileEntry { name, path }))
    } else {
        let kind = if file_type.is_symlink() {
            "symlink"
        } else {
            "special"
        };
        EntryNode::Unsupported {
            name,
            kind: kind.to_string(),
        }
    }
}

struct LocalFileEntry {
    name: String,
    path: PathBuf,
}

#[async_trait(?Send)]
impl FileEntry for LocalFileEntry {
    fn name(&self) -> &str {
        &self.name
    }

    async fn file(&self) -> Result<SharedFile, HostError> {
        let metadata = fs::metadata(&self.path).await.map_err(|e| {
            HostError::new(format!("读取文件元数据失败: {}: {}", self.path.display(), e))
        })?;

        let file: SharedFile = Arc::new(LocalFile::from_metadata(self.path.clone(), &metadata));
        Ok(file)
    }
}

struct LocalDirectory {
    name: String,
    path: PathBuf,
    config: LocalHostConfig,
}

impl DirectoryEntry for LocalDirectory {
    fn name(&self) -> &str {
        &self.name
    }

    fn create_reader(&self) -> Box<dyn DirectoryReader> {
        Box::new(LocalDirectoryReader {
            path: self.path.clone(),
            config: self.config.clone(),
            read_dir: None,
            exhausted: false,
        })
    }
}

/// 本地目录游标，首次读取时才打开目录
struct LocalDirectoryReader {
    path: PathBuf,
    config: LocalHostConfig,
    read_dir: Option<fs::ReadDir>,
    exhausted: bool,
}

#[async_trait(?Send)]
impl DirectoryReader for LocalDirectoryReader {
    async fn read_entries(&mut self) -> Result<Vec<EntryNode>, HostError> {
        if self.exhausted {
            return Ok(Vec::new());
        }

        if self.read_dir.is_none() {
            let read_dir = fs::read_dir(&self.path).await.map_err(|e| {
                HostError::new(format!("读取目录失败: {}: {}", self.path.display(), e))
            })?;
            self.read_dir = Some(read_dir);
        }

        let Some(read_dir) = self.read_dir.as_mut() else {
            return Ok(Vec::new());
        };

        let batch_size = self.config.batch_size.max(1);
        let mut batch = Vec::with_capacity(batch_size);

        while batch.len() < batch_size {
            let entry = read_dir.next_entry().await.map_err(|e| {
                HostError::new(format!("读取目录条目失败: {}: {}", self.path.display(), e))
            })?;

            let Some(entry) = entry else {
                self.exhausted = true;
                break;
            };

            let path = entry.path();
            let name = entry.file_name().to_string_lossy().into_owned();
            let mut file_type = entry.file_type().await.map_err(|e| {
                HostError::new(format!("读取文件类型失败: {}: {}", path.display(), e))
            })?;

            if file_type.is_symlink() && self.config.follow_symlinks {
                file_type = lookup_file_type(&path, true).await?;
            }

            batch.push(classify(path, name, file_type, &self.config));
        }

        debug!("本地目录批次: {} ({} 个条目)", self.path.display(), batch.len());

        Ok(batch)
    }
}

struct LocalItem {
    path: PathBuf,
    file_type: FileType,
    config: LocalHostConfig,
}

impl DataTransferItem for LocalItem {
    fn get_as_entry(&self) -> Option<EntryNode> {
        Some(classify(
            self.path.clone(),
            entry_name(&self.path),
            self.file_type,
            &self.config,
        ))
    }
}

/// 由本地路径组成的拖放事件
pub struct LocalDropEvent {
    items: Vec<LocalItem>,
    files: Vec<SharedFile>,
}

impl LocalDropEvent {
    /// 按给定顺序"拖入"若干本地路径
    pub async fn from_paths(paths: &[PathBuf], config: &LocalHostConfig) -> Result<Self, HostError> {
        let mut items = Vec::with_capacity(paths.len());
        let mut files = Vec::new();

        for path in paths {
            let file_type = lookup_file_type(path, config.follow_symlinks).await?;

            if file_type.is_file() {
                let metadata = fs::metadata(path).await.map_err(|e| {
                    HostError::new(format!("读取文件元数据失败: {}: {}", path.display(), e))
                })?;
                let file: SharedFile = Arc::new(LocalFile::from_metadata(path.clone(), &metadata));
                files.push(file);
            }

            items.push(LocalItem {
                path: path.clone(),
                file_type,
                config: config.clone(),
            });
        }

        Ok(Self { items, files })
    }
}

impl DropEvent for LocalDropEvent {
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

/// 本地文件选择框
pub struct LocalFileInput {
    files: Vec<SharedFile>,
}

impl LocalFileInput {
    /// 模拟目录选择框：每个文件带有 `根目录名/相对路径`
    pub fn directory(root: impl AsRef<Path>, config: &LocalHostConfig) -> Result<Self, HostError> {
        let root = root.as_ref();
        let metadata = std::fs::metadata(root).map_err(|e| {
            HostError::new(format!("读取文件元数据失败: {}: {}", root.display(), e))
        })?;

        if !metadata.is_dir() {
            return Err(HostError::new(format!("不是目录: {}", root.display())));
        }

        let root_name = entry_name(root);

        let mut files = Vec::new();
        for entry in WalkDir::new(root)
            .follow_links(config.follow_symlinks)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| {
                HostError::new(format!("遍历目录失败: {}: {}", root.display(), e))
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let metadata = entry.metadata().map_err(|e| {
                HostError::new(format!(
                    "读取文件元数据失败: {}: {}",
                    entry.path().display(),
                    e
                ))
            })?;

            let relative: Vec<String> = entry
                .path()
                .strip_prefix(root)
                .unwrap_or(entry.path())
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();

            let mut file = LocalFile::from_metadata(entry.path().to_path_buf(), &metadata);
            file.relative_path = Some(format!("{}/{}", root_name, relative.join("/")));

            let file: SharedFile = Arc::new(file);
            files.push(file);
        }

        Ok(Self { files })
    }

    /// 模拟普通文件选择框
    pub fn files(paths: &[PathBuf]) -> Result<Self, HostError> {
        let mut files = Vec::with_capacity(paths.len());

        for path in paths {
            let metadata = std::fs::metadata(path).map_err(|e| {
                HostError::new(format!("读取文件元数据失败: {}: {}", path.display(), e))
            })?;

            if !metadata.is_file() {
                return Err(HostError::new(format!("不是文件: {}", path.display())));
            }

            let file: SharedFile = Arc::new(LocalFile::from_metadata(path.clone(), &metadata));
            files.push(file);
        }

        Ok(Self { files })
    }
}

impl FileInput for LocalFileInput {
    fn files(&self) -> Vec<SharedFile> {
        self.files.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::{read_all_entries, skip_hidden_files, DropStrategy, FileSelector};
    use std::fs as std_fs;
    use tempfile::TempDir;

    /// 创建测试目录结构:
    /// project/
    /// ├── file1.txt
    /// ├── .hidden
    /// ├── sub/
    /// │   ├── file2.txt
    /// │   └── deeper/
    /// │       └── file3.txt
    /// └── many/
    ///     └── m0.txt ... m6.txt
    fn create_project() -> (TempDir, PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("project");

        std_fs::create_dir_all(root.join("sub/deeper")).unwrap();
        std_fs::create_dir_all(root.join("many")).unwrap();
        std_fs::write(root.join("file1.txt"), "content1").unwrap();
        std_fs::write(root.join(".hidden"), "h").unwrap();
        std_fs::write(root.join("sub/file2.txt"), "content2").unwrap();
        std_fs::write(root.join("sub/deeper/file3.txt"), "content3").unwrap();
        for i in 0..7 {
            std_fs::write(root.join(format!("many/m{}.txt", i)), "m").unwrap();
        }

        (temp_dir, root)
    }

    fn small_batches() -> LocalHostConfig {
        LocalHostConfig {
            batch_size: 2,
            ..Default::default()
        }
    }

    fn sorted(paths: Vec<&str>) -> Vec<String> {
        let mut paths: Vec<String> = paths.into_iter().map(String::from).collect();
        paths.sort();
        paths
    }

    #[tokio::test]
    async fn test_local_directory_batches() {
        let (_temp, root) = create_project();
        let config = small_batches();

        let entry = local_entry(root.join("many"), &config).await.unwrap();
        let EntryNode::Directory(dir) = entry else {
            panic!("应该是目录");
        };

        let mut reader = dir.create_reader();
        assert_eq!(reader.read_entries().await.unwrap().len(), 2);

        let all = read_all_entries(&*dir).await.unwrap();
        assert_eq!(all.len(), 7);
    }

    #[tokio::test]
    async fn test_drop_single_local_directory() {
        let (_temp, root) = create_project();
        let event = LocalDropEvent::from_paths(&[root.clone()], &small_batches())
            .await
            .unwrap();

        let result = FileSelector::new(DropStrategy::EntryTree)
            .from_drop_event(&event, None)
            .await
            .unwrap();

        assert_eq!(result.root_dir, "project");

        let walked = WalkDir::new(&root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .count();
        assert_eq!(result.len(), walked, "文件数量应与实际文件数一致");

        let paths = sorted(result.paths());
        assert!(paths.contains(&"file1.txt".to_string()));
        assert!(paths.contains(&"sub/file2.txt".to_string()));
        assert!(paths.contains(&"sub/deeper/file3.txt".to_string()));
        assert!(paths.contains(&"many/m6.txt".to_string()));

        let file3 = result
            .files
            .iter()
            .find(|f| f.path == "sub/deeper/file3.txt")
            .unwrap();
        assert_eq!(file3.size, 8);
        assert!(file3.last_modified > 0);
    }

    #[tokio::test]
    async fn test_drop_local_siblings_with_filter() {
        let (_temp, root) = create_project();
        let paths = vec![root.join("sub"), root.join("file1.txt"), root.join(".hidden")];
        let event = LocalDropEvent::from_paths(&paths, &small_batches())
            .await
            .unwrap();

        let result = FileSelector::default()
            .from_drop_event(&event, Some(&skip_hidden_files))
            .await
            .unwrap();

        assert_eq!(result.root_dir, "");
        assert_eq!(
            sorted(result.paths()),
            vec!["file1.txt", "sub/deeper/file3.txt", "sub/file2.txt"]
        );
        // 顶层顺序：sub 子树在前，file1.txt 在后
        assert_eq!(result.files.last().unwrap().path, "file1.txt");
    }

    #[tokio::test]
    async fn test_flat_files_local_drop() {
        let (_temp, root) = create_project();
        let paths = vec![root.join("sub"), root.join("file1.txt")];
        let event = LocalDropEvent::from_paths(&paths, &LocalHostConfig::default())
            .await
            .unwrap();

        let result = FileSelector::new(DropStrategy::FlatFiles)
            .from_drop_event(&event, None)
            .await
            .unwrap();

        assert_eq!(result.paths(), vec!["file1.txt"]);
    }

    #[tokio::test]
    async fn test_missing_path() {
        let temp_dir = TempDir::new().unwrap();
        let result =
            LocalDropEvent::from_paths(&[temp_dir.path().join("nope")], &LocalHostConfig::default())
                .await;

        assert!(result.is_err());
        assert!(result.err().unwrap().message.contains("读取文件元数据失败"));
    }

    #[tokio::test]
    async fn test_local_directory_input() {
        let (_temp, root) = create_project();
        let input = LocalFileInput::directory(&root, &LocalHostConfig::default()).unwrap();

        let result = FileSelector::default().from_directory_input(&input).await;

        assert_eq!(result.root_dir, "project");
        assert_eq!(result.len(), 11);
        assert!(result.paths().contains(&"sub/deeper/file3.txt"));
    }

    #[tokio::test]
    async fn test_local_file_input() {
        let (_temp, root) = create_project();
        let input = LocalFileInput::files(&[root.join("sub/file2.txt")]).unwrap();

        let result = FileSelector::default().from_file_input(&input).await;

        assert_eq!(result.paths(), vec!["file2.txt"]);
        assert_eq!(result.files[0].size, 8);
    }

    #[test]
    fn test_file_input_rejects_directory() {
        let (_temp, root) = create_project();
        assert!(LocalFileInput::files(&[root.join("sub")]).is_err());
    }

    #[test]
    fn test_directory_input_rejects_file() {
        let (_temp, root) = create_project();
        let result = LocalFileInput::directory(root.join("file1.txt"), &LocalHostConfig::default());

        assert!(result.is_err());
        assert!(result.err().unwrap().message.contains("不是目录"));
    }

    #[test]
    fn test_directory_input_missing_root() {
        let temp_dir = TempDir::new().unwrap();
        let result =
            LocalFileInput::directory(temp_dir.path().join("nope"), &LocalHostConfig::default());

        assert!(result.is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlink_skipped_unless_followed() {
        let (_temp, root) = create_project();
        std::os::unix::fs::symlink(root.join("file1.txt"), root.join("sub/link.txt")).unwrap();

        let event = LocalDropEvent::from_paths(&[root.join("sub")], &LocalHostConfig::default())
            .await
            .unwrap();
        let result = FileSelector::default()
            .from_drop_event(&event, None)
            .await
            .unwrap();
        assert!(!result.paths().contains(&"link.txt"));

        let follow = LocalHostConfig {
            follow_symlinks: true,
            ..Default::default()
        };
        let event = LocalDropEvent::from_paths(&[root.join("sub")], &follow)
            .await
            .unwrap();
        let result = FileSelector::default()
            .from_drop_event(&event, None)
            .await
            .unwrap();
        assert!(result.paths().contains(&"link.txt"));
    }
}
