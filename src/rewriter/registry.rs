//! 资源请求注册表
//!
//! 在一次转换调用内对资源请求和替换渲染做两级去重：
//!
//! - **导入请求**按解析后的请求路径去重，首次出现时分配稳定的导入
//!   标识符，重复出现复用同一条记录；
//! - **替换条目**按 `(导入, 引用方式, 片段)` 三元组去重，不同的引号
//!   上下文或片段后缀渲染结果不同，必须各占一个占位符，但它们背后
//!   共享同一个导入。
//!
//! 标识符和占位符都由注册表自有的递增计数器生成，生命周期严格限定在
//! 一次调用之内：并发调用各自持有独立注册表，无需任何跨调用同步。

use std::collections::HashMap;

use crate::parsers::html::tokenizer::Quoting;

/// 占位符令牌的前后哨兵片段
///
/// 选用不可能出现在正常标记内容中的形态，保证占位符能原样穿过外部
/// 压缩器，也不会误匹配用户文本里的相似子串。
pub const PLACEHOLDER_PREFIX: &str = "___MODULITH_REPLACEMENT_";
pub const PLACEHOLDER_SUFFIX: &str = "___";

/// 导入标识符的前后哨兵片段
pub const IMPORT_PREFIX: &str = "___MODULITH_IMPORT_";
pub const IMPORT_SUFFIX: &str = "___";

/// 一条去重后的导入请求
///
/// 同一请求路径在一次调用内只产生一条记录，创建后不再变更。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRequest {
    /// 归一化后的资源请求路径
    pub request: String,
    /// 分配给宿主模块系统的稳定标识符
    pub identifier: String,
}

/// 一条去重后的替换渲染条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementEntry {
    /// 插入文本的占位符令牌
    pub placeholder: String,
    /// 指向导入请求列表的下标
    pub import: usize,
    /// 渲染时原样拼回的片段（含 `#`）
    pub fragment: Option<String>,
    /// 原始属性值的引用方式
    pub quoting: Quoting,
}

/// 调用级注册表
///
/// 所有可变状态都在这里，转换函数结束时通过 [`into_parts`] 交出
/// 有序的导入和替换列表。
///
/// [`into_parts`]: ReplacementRegistry::into_parts
#[derive(Debug, Default)]
pub struct ReplacementRegistry {
    imports: Vec<ImportRequest>,
    import_by_request: HashMap<String, usize>,
    replacements: Vec<ReplacementEntry>,
    replacement_by_key: HashMap<(usize, Quoting, Option<String>), usize>,
}

impl ReplacementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册一个导入请求（幂等）
    ///
    /// 返回请求在导入列表中的下标。路径首次出现时分配
    /// `___MODULITH_IMPORT_{n}___` 形式的标识符。
    pub fn register_import(&mut self, request: &str) -> usize {
        if let Some(&index) = self.import_by_request.get(request) {
            return index;
        }

        let index = self.imports.len();
        self.imports.push(ImportRequest {
            request: request.to_string(),
            identifier: format!("{}{}{}", IMPORT_PREFIX, index, IMPORT_SUFFIX),
        });
        self.import_by_request.insert(request.to_string(), index);
        index
    }

    /// 注册一条替换渲染（按键元组幂等）
    ///
    /// 返回替换条目在列表中的下标；占位符序号与下标一致。
    pub fn register_replacement(
        &mut self,
        import: usize,
        quoting: Quoting,
        fragment: Option<&str>,
    ) -> usize {
        let key = (import, quoting, fragment.map(str::to_string));
        if let Some(&index) = self.replacement_by_key.get(&key) {
            return index;
        }

        let index = self.replacements.len();
        self.replacements.push(ReplacementEntry {
            placeholder: format!("{}{}{}", PLACEHOLDER_PREFIX, index, PLACEHOLDER_SUFFIX),
            import,
            fragment: fragment.map(str::to_string),
            quoting,
        });
        self.replacement_by_key.insert(key, index);
        index
    }

    /// 按下标取替换条目（占位符解析阶段使用）
    pub fn replacement(&self, index: usize) -> Option<&ReplacementEntry> {
        self.replacements.get(index)
    }

    /// 按下标取替换条目对应的导入标识符
    pub fn import_identifier(&self, entry: &ReplacementEntry) -> &str {
        &self.imports[entry.import].identifier
    }

    pub fn imports(&self) -> &[ImportRequest] {
        &self.imports
    }

    pub fn replacements(&self) -> &[ReplacementEntry] {
        &self.replacements
    }

    /// 交出有序的导入与替换列表
    pub fn into_parts(self) -> (Vec<ImportRequest>, Vec<ReplacementEntry>) {
        (self.imports, self.replacements)
    }
}
