//! 源属性规则表
//!
//! 定义哪些 `(标签, 属性)` 组合的值会被当作资源引用处理，以及每个组合
//! 采用哪种提取逻辑（普通 URL 还是 srcset 候选列表）。
//!
//! 规则表支持三种来源：内置默认列表、完全关闭、调用方自定义列表。
//! 自定义规则里标签名可以省略（等价于 `"*"` 通配），表示该属性在任何
//! 标签上都相关。查找时精确标签匹配优先于通配规则。

use std::collections::HashSet;

use crate::core::TransformError;
use crate::parsers::html::tokenizer::Quoting;

/// 属性值的提取方式
///
/// 以带标签的枚举分派取代按类型字符串的动态分派：`Src` 走普通 URL
/// 提取，`Srcset` 走候选列表微语法解析。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    /// 单一 URL 值（`src`、`href`、`poster` 等）
    Src,
    /// srcset 候选列表
    Srcset,
}

/// 规则级别的值过滤谓词，参数为 `(标签名, 属性值)`
pub type SourceFilter = Box<dyn Fn(&str, &str) -> bool + Send + Sync>;

/// 一条源属性规则
pub struct SourceRule {
    /// 标签名（小写）；`None` 表示 `"*"` 通配，匹配任何标签
    pub tag: Option<String>,
    /// 属性名（小写）
    pub attribute: String,
    /// 提取方式
    pub kind: AttributeKind,
    /// 可选的规则级过滤谓词
    pub filter: Option<SourceFilter>,
}

impl SourceRule {
    /// 创建一条精确标签规则
    pub fn new(tag: &str, attribute: &str, kind: AttributeKind) -> Self {
        SourceRule {
            tag: Some(tag.to_ascii_lowercase()),
            attribute: attribute.to_ascii_lowercase(),
            kind,
            filter: None,
        }
    }

    /// 创建一条 `"*"` 通配规则
    pub fn wildcard(attribute: &str, kind: AttributeKind) -> Self {
        SourceRule {
            tag: None,
            attribute: attribute.to_ascii_lowercase(),
            kind,
            filter: None,
        }
    }

    /// 为规则附加过滤谓词
    pub fn with_filter(mut self, filter: SourceFilter) -> Self {
        self.filter = Some(filter);
        self
    }
}

/// 已验证的源属性规则表
///
/// 只能通过 [`SourceRules::default`]、[`SourceRules::none`] 或
/// [`SourceRules::from_rules`] 构造，保证表内不存在形态非法的规则。
pub struct SourceRules {
    rules: Vec<SourceRule>,
}

impl Default for SourceRules {
    /// 内置默认规则列表（布尔简写 `true` 的含义）
    fn default() -> Self {
        SourceRules {
            rules: vec![
                SourceRule::new("img", "src", AttributeKind::Src),
                SourceRule::new("img", "srcset", AttributeKind::Srcset),
                SourceRule::new("source", "src", AttributeKind::Src),
                SourceRule::new("source", "srcset", AttributeKind::Srcset),
                SourceRule::new("audio", "src", AttributeKind::Src),
                SourceRule::new("video", "src", AttributeKind::Src),
                SourceRule::new("video", "poster", AttributeKind::Src),
                SourceRule::new("track", "src", AttributeKind::Src),
                SourceRule::new("embed", "src", AttributeKind::Src),
                SourceRule::new("input", "src", AttributeKind::Src),
                SourceRule::new("iframe", "src", AttributeKind::Src),
                SourceRule::new("script", "src", AttributeKind::Src),
                SourceRule::new("link", "href", AttributeKind::Src),
            ],
        }
    }
}

impl SourceRules {
    /// 空规则表（布尔简写 `false` 的含义）：不重写任何属性
    pub fn none() -> Self {
        SourceRules { rules: Vec::new() }
    }

    /// 从调用方提供的规则列表构造规则表
    ///
    /// 在任何扫描开始之前校验规则形态；非法形态是致命的配置错误：
    ///
    /// - 属性名为空
    /// - 标签名为空字符串（应当省略或写 `"*"`）
    /// - 同一 `(标签, 属性)` 组合出现多次
    ///
    /// 标签名 `"*"` 与省略标签等价，构造时统一归一化为 `None`。
    pub fn from_rules(rules: Vec<SourceRule>) -> Result<Self, TransformError> {
        let mut seen: HashSet<(Option<String>, String)> = HashSet::new();
        let mut normalized: Vec<SourceRule> = Vec::with_capacity(rules.len());

        for mut rule in rules {
            if rule.attribute.is_empty() {
                return Err(TransformError::Configuration(
                    "source rule attribute name must not be empty".to_string(),
                ));
            }
            if let Some(tag) = &rule.tag {
                if tag.is_empty() {
                    return Err(TransformError::Configuration(
                        "source rule tag name must not be empty; omit it or use \"*\""
                            .to_string(),
                    ));
                }
                if tag == "*" {
                    rule.tag = None;
                }
            }
            if !seen.insert((rule.tag.clone(), rule.attribute.clone())) {
                return Err(TransformError::Configuration(format!(
                    "duplicate source rule for ({}, {})",
                    rule.tag.as_deref().unwrap_or("*"),
                    rule.attribute
                )));
            }
            normalized.push(rule);
        }

        Ok(SourceRules { rules: normalized })
    }

    /// 相关性谓词：`(标签名, 属性名)` 是否被任何规则覆盖
    pub fn is_relevant(&self, tag: &str, attribute: &str) -> bool {
        self.lookup(tag, attribute).is_some()
    }

    /// 查找匹配的规则，精确标签匹配优先于通配规则
    pub fn lookup(&self, tag: &str, attribute: &str) -> Option<&SourceRule> {
        let mut wildcard: Option<&SourceRule> = None;
        for rule in &self.rules {
            if rule.attribute != attribute {
                continue;
            }
            match &rule.tag {
                Some(rule_tag) if rule_tag == tag => return Some(rule),
                Some(_) => {}
                None => wildcard = wildcard.or(Some(rule)),
            }
        }
        wildcard
    }

    /// 规则数量（日志用）
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// 规则表是否为空
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// 原文中的一个属性值区间
///
/// 偏移量始终指向未经修改的原始文本。srcset 候选是同一属性区间内的
/// 子区间，各自独立携带偏移。
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRecord {
    /// 所属标签名（小写）；来自通配规则时仍然记录实际标签
    pub tag: Option<String>,
    /// 属性名（小写）
    pub attribute: String,
    /// 值区间起始字节偏移
    pub start: usize,
    /// 值区间字节长度
    pub length: usize,
    /// 区间原文
    pub value: String,
    /// 引用方式（重写阶段渲染替换表达式时使用）
    pub quoting: Quoting,
}
