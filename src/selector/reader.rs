//! 分批目录枚举
//!
//! 宿主的目录游标每次只保证返回一部分子条目，
//! 必须反复读取直到返回空批次为止

use tracing::debug;

use super::entry::{DirectoryEntry, EntryNode};
use super::error::HostError;

/// 读取目录的全部直接子条目，保持宿主返回的顺序
///
/// 任意一次批量读取失败都会丢弃已读取的部分并返回该错误
pub async fn read_all_entries(directory: &dyn DirectoryEntry) -> Result<Vec<EntryNode>, HostError> {
    let mut reader = directory.create_reader();
    let mut entries = Vec::new();
    let mut batches = 0usize;

    loop {
        let batch = reader.read_entries().await?;
        if batch.is_empty() {
            break;
        }

        batches += 1;
        debug!(
            "读取目录批次: {} 第 {} 批，{} 个条目",
            directory.name(),
            batches,
            batch.len()
        );
        entries.extend(batch);
    }

    debug!(
        "目录枚举完成: {} ({} 个条目，{} 批)",
        directory.name(),
        entries.len(),
        batches
    );

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::{MemoryDirectory, MemoryNode};

    fn numbered_files(count: usize) -> Vec<MemoryNode> {
        (0..count)
            .map(|i| MemoryNode::file(format!("file{}.txt", i), i as u64))
            .collect()
    }

    #[tokio::test]
    async fn test_reads_until_empty_batch() {
        // 3 个非空批次 + 1 个空批次
        let dir = MemoryDirectory::new("docs", numbered_files(7)).with_batch_size(3);

        let entries = read_all_entries(&dir).await.unwrap();

        let names: Vec<_> = entries.iter().map(|e| e.name().to_string()).collect();
        assert_eq!(
            names,
            vec![
                "file0.txt", "file1.txt", "file2.txt", "file3.txt", "file4.txt", "file5.txt",
                "file6.txt"
            ]
        );
        assert_eq!(dir.read_calls(), 4, "应该在空批次后立即停止");
    }

    #[tokio::test]
    async fn test_empty_directory_single_call() {
        let dir = MemoryDirectory::new("empty", vec![]);

        let entries = read_all_entries(&dir).await.unwrap();

        assert!(entries.is_empty());
        assert_eq!(dir.read_calls(), 1);
    }

    #[tokio::test]
    async fn test_single_batch_still_polls_again() {
        let dir = MemoryDirectory::new("small", numbered_files(2)).with_batch_size(100);

        let entries = read_all_entries(&dir).await.unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(dir.read_calls(), 2, "单次非空批次不能视为枚举结束");
    }

    #[tokio::test]
    async fn test_batch_error_discards_partial_results() {
        let dir = MemoryDirectory::new("broken", numbered_files(5))
            .with_batch_size(2)
            .fail_on_read(2);

        let result = read_all_entries(&dir).await;

        let err = result.unwrap_err();
        assert!(err.message.contains("broken"));
        assert_eq!(dir.read_calls(), 2, "失败后不应继续读取");
    }

    #[tokio::test]
    async fn test_preserves_enumeration_order() {
        let dir = MemoryDirectory::new(
            "mixed",
            vec![
                MemoryNode::file("b", 1),
                MemoryNode::file("a", 1),
                MemoryNode::directory("c", vec![]),
            ],
        )
        .with_batch_size(1);

        let entries = read_all_entries(&dir).await.unwrap();

        let names: Vec<_> = entries.iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
        assert!(entries[2].is_directory());
    }
}
