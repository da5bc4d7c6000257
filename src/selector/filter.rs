// 结果过滤

use super::types::FileDescriptor;

/// 文件过滤谓词，返回 true 的文件被保留
pub type FileFilter<'a> = &'a dyn Fn(&FileDescriptor) -> bool;

/// 过滤隐藏文件：路径中任意一段以 `.` 开头即视为隐藏
pub fn skip_hidden_files(file: &FileDescriptor) -> bool {
    !file.path.split('/').any(|segment| segment.starts_with('.'))
}

/// 按顺序保留满足谓词的文件
pub(crate) fn apply_filter(
    files: Vec<FileDescriptor>,
    filter: Option<FileFilter<'_>>,
) -> Vec<FileDescriptor> {
    match filter {
        Some(keep) => files.into_iter().filter(|f| keep(f)).collect(),
        None => files,
    }
}
