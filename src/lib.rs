//! # Modulith Library
//!
//! 一个构建期源转换库，把原始标记文本变成可被宿主模块系统消费的模块：
//! 文本中内嵌的资源引用（图片、脚本、样式表 URL、嵌套模板导入）被改写
//! 为由宿主导入机制解析的间接引用，外部引用从不透明字符串升级为被追踪
//! 的依赖。
//!
//! ## 模块组织
//!
//! - `core` - 转换流程驱动、选项、错误与诊断
//! - `parsers` - 容错扫描器、srcset 微语法、源属性规则表
//! - `rewriter` - 请求注册表、偏移安全拼接、占位符解析
//! - `utils` - URL 分类与行列定位工具

pub mod core;
pub mod parsers;
pub mod rewriter;
pub mod utils;

// Re-export commonly used items for convenience
pub use crate::core::{
    render_import_manifest, transform, Diagnostic, Minifier, TransformError, TransformOptions,
    TransformOutput, UrlFilter,
};
pub use crate::parsers::*;
pub use crate::rewriter::{ImportRequest, ReplacementEntry};
