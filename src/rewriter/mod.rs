//! # 重写模块
//!
//! 提取结果到最终文本之间的三个阶段：
//!
//! - `registry` - 导入请求与替换渲染的两级去重
//! - `splicer` - 带累计偏移修正的单遍文本拼接
//! - `resolver` - 压缩后的占位符解析

pub mod registry;
pub mod resolver;
pub mod splicer;

// Re-export commonly used items for convenience
pub use registry::{ImportRequest, ReplacementEntry, ReplacementRegistry};
pub use resolver::resolve;
pub use splicer::{splice, Splice};
