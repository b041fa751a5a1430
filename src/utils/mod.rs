//! # 工具模块
//!
//! 这个模块包含各种工具函数和实用程序：
//!
//! - URL 分类和资源请求归一化
//! - 字节偏移到行列位置的换算
//!
//! # 模块组织
//!
//! - `url` - URL 分类、片段剥离、请求路径归一化
//! - `position` - 诊断信息的行列定位

pub mod position;
pub mod url;

// Re-export commonly used items for convenience
pub use position::line_and_column;
pub use url::{classify, is_protocol_relative, is_url_and_has_protocol, ResourceRequest};
