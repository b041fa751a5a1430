//! HTML 解析和提取模块
//!
//! 这个模块按职责拆分为三个子模块：
//!
//! - `tokenizer`: 容错的标签/属性扫描器
//! - `srcset`: srcset 候选列表微语法解析
//! - `sources`: 源属性规则表和提取记录类型

pub mod sources;
pub mod srcset;
pub mod tokenizer;

// 重新导出主要的公共 API
pub use sources::{AttributeKind, SourceRecord, SourceRule, SourceRules};
pub use srcset::{parse_srcset, SrcsetCandidate, SrcsetError};
pub use tokenizer::{scan, AttributeMatch, Quoting};
