// 条目图宿主实现
//
// memory: 内存条目树，用于测试和嵌入方模拟拖放
// local: 本地文件系统

pub mod local;
pub mod memory;

pub use local::{local_entry, LocalDropEvent, LocalFile, LocalFileInput};
pub use memory::{MemoryDirectory, MemoryDropEvent, MemoryFile, MemoryFileInput, MemoryNode};
