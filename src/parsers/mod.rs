//! # 解析器模块
//!
//! 这个模块包含提取阶段的全部解析功能：
//!
//! - 标记文本的容错扫描
//! - srcset 微语法解析
//! - 源属性规则匹配
//!
//! # 模块组织
//!
//! - `html` - 标签/属性扫描器、srcset 解析、源规则表

pub mod html;

// Re-export commonly used items for convenience
pub use html::{
    parse_srcset, scan, AttributeKind, AttributeMatch, Quoting, SourceRecord, SourceRule,
    SourceRules, SrcsetCandidate, SrcsetError,
};
