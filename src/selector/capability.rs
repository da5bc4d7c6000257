// 宿主能力检测
//
// 在构建 FileSelector 时一次性决定拖放事件的处理策略

use serde::{Deserialize, Serialize};

/// 宿主能力
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostCapabilities {
    /// 是否支持层级条目图（webkitGetAsEntry）
    pub supports_entry_tree: bool,
}

impl HostCapabilities {
    pub fn new(supports_entry_tree: bool) -> Self {
        Self {
            supports_entry_tree,
        }
    }

    /// 根据 User-Agent 判断，Chrome 系浏览器支持层级条目
    pub fn from_user_agent(user_agent: &str) -> Self {
        let supports_entry_tree = ["Chrome/", "Chromium/", "CriOS/"]
            .iter()
            .any(|marker| user_agent.contains(marker));

        Self {
            supports_entry_tree,
        }
    }
}

/// 拖放事件处理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropStrategy {
    /// 递归遍历条目图
    EntryTree,
    /// 只使用扁平文件列表
    FlatFiles,
}

impl DropStrategy {
    pub fn detect(capabilities: &HostCapabilities) -> Self {
        if capabilities.supports_entry_tree {
            Self::EntryTree
        } else {
            Self::FlatFiles
        }
    }
}

impl Default for DropStrategy {
    fn default() -> Self {
        Self::EntryTree
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHROME_UA: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
    const FIREFOX_UA: &str =
        "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0";

    #[test]
    fn test_detect_from_user_agent() {
        assert!(HostCapabilities::from_user_agent(CHROME_UA).supports_entry_tree);
        assert!(!HostCapabilities::from_user_agent(FIREFOX_UA).supports_entry_tree);
        assert!(!HostCapabilities::from_user_agent("").supports_entry_tree);
    }

    #[test]
    fn test_strategy_detection() {
        assert_eq!(
            DropStrategy::detect(&HostCapabilities::new(true)),
            DropStrategy::EntryTree
        );
        assert_eq!(
            DropStrategy::detect(&HostCapabilities::from_user_agent(FIREFOX_UA)),
            DropStrategy::FlatFiles
        );
    }
}
