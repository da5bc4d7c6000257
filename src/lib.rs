// File Drop Walker Library
// 将拖放事件、目录选择框、文件选择框归一化为根目录 + 扁平文件列表

// 配置管理模块
pub mod config;

// 日志模块
pub mod logging;

// 文件选择归一化模块（条目图遍历核心）
pub mod selector;

// 条目图宿主实现（内存 / 本地文件系统）
pub mod host;

// 导出常用类型
pub use config::AppConfig;
pub use selector::{
    DropStrategy, FileDescriptor, FileSelector, HostCapabilities, SelectorError, TraversalResult,
};
