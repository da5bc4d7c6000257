// 文件选择归一化模块
//
// 将拖放事件、目录选择框、普通文件选择框统一转换为
// 根目录名 + 扁平有序的文件描述列表

mod adapter;
mod capability;
mod descriptor;
mod entry;
mod error;
mod filter;
mod flatten;
mod input;
mod reader;
mod types;

pub use adapter::FileSelector;
pub use capability::{DropStrategy, HostCapabilities};
pub use descriptor::{build_file_descriptor, join_path};
pub use entry::{
    DataTransferItem, DirectoryEntry, DirectoryReader, DropEvent, EntryNode, FileEntry, FileInput,
};
pub use error::{HostError, SelectorError};
pub use filter::{skip_hidden_files, FileFilter};
pub use flatten::{TraversalOptions, TreeFlattener, UnsupportedEntryPolicy};
pub use reader::read_all_entries;
pub use types::*;
