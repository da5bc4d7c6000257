// 文件选择框解析
//
// 两种选择框都直接映射，不涉及递归

use super::types::{FileDescriptor, SharedFile, TraversalResult};

/// 目录选择框：根目录取第一个文件相对路径的第一段，并从所有路径中去掉
pub(crate) fn from_directory_files(files: Vec<SharedFile>) -> TraversalResult {
    let root_dir = files
        .first()
        .and_then(|f| f.relative_path())
        .and_then(|p| p.split('/').next())
        .unwrap_or_default()
        .to_string();

    let files = files
        .into_iter()
        .map(|file| {
            let path = match file.relative_path().filter(|p| !p.is_empty()) {
                Some(relative) => strip_root(relative, &root_dir).to_string(),
                None => file.name().to_string(),
            };
            FileDescriptor::new(file, path)
        })
        .collect();

    TraversalResult::new(root_dir, files)
}

/// 普通文件选择框：路径即文件名
pub(crate) fn from_plain_files(files: Vec<SharedFile>) -> TraversalResult {
    let files = files
        .into_iter()
        .map(|file| {
            let path = file.name().to_string();
            FileDescriptor::new(file, path)
        })
        .collect();

    TraversalResult::new("", files)
}

fn strip_root<'a>(relative: &'a str, root_dir: &str) -> &'a str {
    if root_dir.is_empty() {
        return relative;
    }

    relative
        .strip_prefix(root_dir)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(relative)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::{MemoryFile, MemoryFileInput};
    use crate::selector::{DropStrategy, FileInput, FileSelector};

    #[tokio::test]
    async fn test_directory_input() {
        let input = MemoryFileInput::new(vec![
            MemoryFile::new("a.txt", 1).with_relative_path("photos/a.txt"),
            MemoryFile::new("b.jpg", 2).with_relative_path("photos/2024/b.jpg"),
        ]);

        let result = FileSelector::new(DropStrategy::EntryTree)
            .from_directory_input(&input)
            .await;

        assert_eq!(result.root_dir, "photos");
        assert_eq!(result.paths(), vec!["a.txt", "2024/b.jpg"]);
        assert_eq!(result.files[1].name, "b.jpg");
        assert_eq!(result.files[1].size, 2);
    }

    #[test]
    fn test_directory_input_root_only_stripped_as_prefix() {
        let input = MemoryFileInput::new(vec![
            MemoryFile::new("x", 1).with_relative_path("docs/x"),
            MemoryFile::new("y", 1).with_relative_path("docs/sub/docs/y"),
            MemoryFile::new("z", 1).with_relative_path("docsz/z"),
        ]);

        let result = from_directory_files(input.files());

        assert_eq!(result.paths(), vec!["x", "sub/docs/y", "docsz/z"]);
    }

    #[tokio::test]
    async fn test_directory_input_without_relative_path() {
        let input = MemoryFileInput::new(vec![MemoryFile::new("loose.txt", 1)]);

        let result = FileSelector::default().from_directory_input(&input).await;

        assert_eq!(result.root_dir, "");
        assert_eq!(result.paths(), vec!["loose.txt"]);
    }

    #[tokio::test]
    async fn test_empty_directory_input() {
        let input = MemoryFileInput::new(vec![]);

        let result = FileSelector::default().from_directory_input(&input).await;

        assert_eq!(result.root_dir, "");
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_file_input() {
        let input = MemoryFileInput::new(vec![
            MemoryFile::new("a.txt", 1).with_last_modified(10),
            MemoryFile::new("b.txt", 2).with_relative_path("ignored/b.txt"),
        ]);

        let result = FileSelector::default().from_file_input(&input).await;

        assert_eq!(result.root_dir, "");
        assert_eq!(result.paths(), vec!["a.txt", "b.txt"]);
        assert_eq!(result.files[0].last_modified, 10);
    }
}
