//! 核心转换流程
//!
//! 这里是整条流水线的驱动器：扫描 → 分类 → 注册 → 拼接 →
//! [可选的外部压缩器] → 占位符解析 → 最终文本。
//!
//! 一次调用处理一份不可变的输入文本，产出一份改写后的文本、有序的
//! 导入请求列表、有序的替换条目列表和一组非致命诊断信息。除规则表等
//! 只读配置外，调用之间不共享任何可变状态。

use std::fmt;

use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::parsers::html::sources::{AttributeKind, SourceRecord, SourceRules};
use crate::parsers::html::srcset::parse_srcset;
use crate::parsers::html::tokenizer::{scan, AttributeMatch};
use crate::rewriter::registry::{ImportRequest, ReplacementEntry, ReplacementRegistry};
use crate::rewriter::resolver::resolve;
use crate::rewriter::splicer::{splice, Splice};
use crate::utils::position::line_and_column;
use crate::utils::url::classify;

/// Represents fatal errors that can occur during a transform invocation
///
/// Non-fatal conditions (malformed srcset descriptors, unmatched input)
/// never surface here; they are collected as [`Diagnostic`] values on the
/// output instead.
#[derive(Error, Debug)]
pub enum TransformError {
    /// 选项形态非法，在任何扫描开始之前抛出
    #[error("invalid configuration: {0}")]
    Configuration(String),
    /// 改写后的文本中出现了没有注册条目的占位符（内部不变量被破坏）
    #[error("unresolved placeholder `{placeholder}` in rewritten document")]
    UnresolvedPlaceholder { placeholder: String },
}

/// 一条非致命诊断信息
///
/// 始终附着在原始文本的一个字节区间上，行列号按区间起点计算。
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// 人类可读的错误描述
    pub message: String,
    /// 区间起始字节偏移（指向原始文本）
    pub start: usize,
    /// 区间终止字节偏移（不含）
    pub end: usize,
    /// 1 起始的行号
    pub line: usize,
    /// 1 起始的列号
    pub column: usize,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.line, self.column, self.message)
    }
}

/// 外部压缩器接口
///
/// 压缩发生在占位符拼接之后、解析之前，因此实现必须原样保留
/// 占位符令牌（它们的形态刻意避开了常见压缩器会剥除或改写的语法）。
/// 本库不自带任何压缩实现。
pub trait Minifier {
    fn minify(&self, markup: &str) -> String;
}

/// 调用方自定义的值过滤谓词，参数为 `(属性名, 属性值, 请求路径)`
pub type UrlFilter = Box<dyn Fn(&str, &str, &str) -> bool + Send + Sync>;

/// Configuration options for a transform invocation
///
/// 与规则表一样，选项在调用之间只读共享。
pub struct TransformOptions {
    /// 源属性规则表
    pub sources: SourceRules,
    /// 根相对路径（`/...`）的解析基底；缺省时此类引用原样保留
    pub root: Option<String>,
    /// 结构上合格的值也可以被此谓词额外排除
    pub url_filter: Option<UrlFilter>,
    /// 是否在拼接与解析之间调用外部压缩器
    pub minimize: bool,
    /// 外部压缩器实现；`minimize` 为真时必须提供
    pub minifier: Option<Box<dyn Minifier + Send + Sync>>,
}

impl Default for TransformOptions {
    fn default() -> Self {
        TransformOptions {
            sources: SourceRules::default(),
            root: None,
            url_filter: None,
            minimize: false,
            minifier: None,
        }
    }
}

impl TransformOptions {
    /// 选项形态校验，在任何扫描开始之前执行
    fn validate(&self) -> Result<(), TransformError> {
        if self.minimize && self.minifier.is_none() {
            return Err(TransformError::Configuration(
                "minimize is enabled but no minifier was supplied".to_string(),
            ));
        }
        Ok(())
    }
}

/// 一次转换的完整产出
#[derive(Debug)]
pub struct TransformOutput {
    /// 占位符解析完成的最终文本
    pub markup: String,
    /// 有序的导入请求列表（请求路径 → 标识符）
    pub imports: Vec<ImportRequest>,
    /// 有序的替换条目列表（占位符 → 渲染规则）
    pub replacements: Vec<ReplacementEntry>,
    /// 非致命诊断信息
    pub diagnostics: Vec<Diagnostic>,
}

/// 转换一份标记文本
///
/// 这是本库的主入口。扫描 `markup` 中所有被规则表覆盖的属性值，把
/// 可重写的资源引用替换为指向宿主导入机制的稳定标识符，返回改写后
/// 的文本和依赖清单。
///
/// # Errors
///
/// 只有配置错误和内部不变量破坏是致命的；畸形输入从不导致 `Err`。
///
/// # 示例
///
/// ```rust
/// use modulith::core::{transform, TransformOptions};
///
/// let output = transform(r#"Text <img src="image.png">"#, &TransformOptions::default()).unwrap();
/// assert_eq!(output.imports.len(), 1);
/// assert_eq!(output.imports[0].request, "./image.png");
/// ```
pub fn transform(
    markup: &str,
    options: &TransformOptions,
) -> Result<TransformOutput, TransformError> {
    options.validate()?;

    debug!(
        length = markup.len(),
        rules = options.sources.len(),
        "starting markup transform"
    );

    let matches = scan(markup, |tag, attribute| {
        options.sources.is_relevant(tag, attribute)
    });
    trace!(matches = matches.len(), "attribute scan complete");

    let mut registry = ReplacementRegistry::new();
    let mut splices: Vec<Splice> = Vec::new();
    let mut diagnostics: Vec<Diagnostic> = Vec::new();

    for attribute_match in &matches {
        let rule = match options
            .sources
            .lookup(&attribute_match.tag, &attribute_match.attribute)
        {
            Some(rule) => rule,
            None => continue,
        };

        if let Some(filter) = &rule.filter {
            if !filter(&attribute_match.tag, &attribute_match.value) {
                continue;
            }
        }

        // 两种提取方式都汇入统一的 SourceRecord 形状
        let records = match rule.kind {
            AttributeKind::Src => extract_src(attribute_match),
            AttributeKind::Srcset => {
                extract_srcset(markup, attribute_match, &mut diagnostics)
            }
        };

        for record in records {
            register_record(options, &mut registry, &mut splices, &record);
        }
    }

    // 提取按文档顺序进行，区间天然有序；排序兜底保证拼接器的前置条件
    splices.sort_by_key(|s| s.start);

    let spliced = splice(markup, &splices);

    let minified = if options.minimize {
        // validate() 保证了压缩器存在
        options.minifier.as_ref().unwrap().minify(&spliced)
    } else {
        spliced
    };

    let resolved = resolve(&minified, &registry)?;

    let (imports, replacements) = registry.into_parts();
    debug!(
        imports = imports.len(),
        replacements = replacements.len(),
        diagnostics = diagnostics.len(),
        "markup transform complete"
    );

    Ok(TransformOutput {
        markup: resolved,
        imports,
        replacements,
        diagnostics,
    })
}

/// `Src` 变体的提取处理：整个属性值就是一个 URL
fn extract_src(attribute_match: &AttributeMatch) -> Vec<SourceRecord> {
    // 值两侧的空白不属于 URL，记录区间收缩到修剪后的子串
    let trimmed = attribute_match.value.trim();
    let leading = attribute_match.value.len() - attribute_match.value.trim_start().len();

    vec![SourceRecord {
        tag: Some(attribute_match.tag.clone()),
        attribute: attribute_match.attribute.clone(),
        start: attribute_match.value_start + leading,
        length: trimmed.len(),
        value: trimmed.to_string(),
        quoting: attribute_match.quoting,
    }]
}

/// `Srcset` 变体的提取处理：每个候选 URL 是属性值区间内的独立子区间
///
/// 描述符语法错误使整个属性被跳过，并记录一条指向属性值区间的诊断。
fn extract_srcset(
    markup: &str,
    attribute_match: &AttributeMatch,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<SourceRecord> {
    let candidates = match parse_srcset(&attribute_match.value) {
        Ok(candidates) => candidates,
        Err(error) => {
            let start = attribute_match.value_start;
            let end = start + attribute_match.value.len();
            let (line, column) = line_and_column(markup, start);
            warn!(%error, line, column, "skipping srcset attribute");
            diagnostics.push(Diagnostic {
                message: error.to_string(),
                start,
                end,
                line,
                column,
            });
            return Vec::new();
        }
    };

    candidates
        .into_iter()
        .map(|candidate| SourceRecord {
            tag: Some(attribute_match.tag.clone()),
            attribute: attribute_match.attribute.clone(),
            start: attribute_match.value_start + candidate.url_offset,
            length: candidate.url.len(),
            value: candidate.url,
            quoting: attribute_match.quoting,
        })
        .collect()
}

/// 对一条提取记录做分类、注册与占位符拼接准备
fn register_record(
    options: &TransformOptions,
    registry: &mut ReplacementRegistry,
    splices: &mut Vec<Splice>,
    record: &SourceRecord,
) {
    let request = match classify(&record.value, options.root.as_deref()) {
        Some(request) => request,
        None => return,
    };

    if let Some(filter) = &options.url_filter {
        if !filter(&record.attribute, &record.value, &request.request) {
            return;
        }
    }

    trace!(
        attribute = %record.attribute,
        request = %request.request,
        offset = record.start,
        "registering resource request"
    );

    let import = registry.register_import(&request.request);
    let replacement =
        registry.register_replacement(import, record.quoting, request.fragment.as_deref());
    splices.push(Splice {
        start: record.start,
        end: record.start + record.length,
        replacement: registry
            .replacement(replacement)
            .unwrap()
            .placeholder
            .clone(),
    });
}

/// 把导入清单渲染成宿主可读的行
///
/// 每行一条 `identifier = request`，供 CLI 输出或宿主日志使用；
/// 真正的模块语法由宿主模块系统生成。
pub fn render_import_manifest(imports: &[ImportRequest]) -> String {
    let mut manifest = String::new();
    for import in imports {
        manifest.push_str(&import.identifier);
        manifest.push_str(" = ");
        manifest.push_str(&import.request);
        manifest.push('\n');
    }
    manifest
}
