//! 文件描述构建

use super::types::{FileDescriptor, SharedFile};

/// 拼接相对路径，base 为空时直接返回 name
pub fn join_path(base: &str, name: &str) -> String {
    if base.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", base, name)
    }
}

/// 根据文件句柄和所在目录路径构建文件描述
pub fn build_file_descriptor(file: SharedFile, base_path: &str) -> FileDescriptor {
    let path = join_path(base_path, file.name());
    FileDescriptor::new(file, path)
}
