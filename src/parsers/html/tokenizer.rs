//! 容错标签/属性扫描器
//!
//! 这是提取阶段的核心：一个手写的两态扫描器，从左到右走完整个文档，
//! 在「标签外」与「标签内」两种模式之间切换，报告每一个通过相关性
//! 谓词筛选的属性值及其在原文中的字节区间。
//!
//! 扫描器刻意保持宽容：注释、CDATA、声明和结束标签被当作不透明区间
//! 跳过；任何无法匹配已知模式的输入都按普通文本处理，向前跳一个字符
//! 继续扫描。它对任意字节序列都不会失败，这是设计要求——真实世界的
//! 标记文本经常是畸形的。
//!
//! ## 架构
//!
//! 每个模式对应一张有序的 `(模式, 动作)` 规则表，在当前游标处按
//! 先匹配先生效的顺序求值。规则用 [`regex`] 编写，通过
//! [`std::sync::LazyLock`] 只编译一次。
//!
//! 属性值的三种写法（双引号、单引号、无引号）各有一条规则，闭合引号
//! 必须与起始引号同型——不同型引号的匹配是历史实现中的一个缺陷，
//! 这里不予复现。

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

/// 属性值在原文中的引用方式
///
/// 重写阶段据此决定最终引用表达式是否需要补上引号：无引号的属性值
/// 被替换后必须带双引号，否则生成的标记可能因替换文本含特殊字符而破损。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quoting {
    /// 双引号包裹: `src="value"`
    Double,
    /// 单引号包裹: `src='value'`
    Single,
    /// 无引号: `src=value`
    Unquoted,
}

/// 一次属性匹配
///
/// `value_start` 与 `value.len()` 界定属性值本体（不含引号）在
/// 原始文本中的字节区间。标签名和属性名都已转为小写。
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeMatch {
    /// 所属标签名（小写）
    pub tag: String,
    /// 属性名（小写）
    pub attribute: String,
    /// 属性值原文（未解码）
    pub value: String,
    /// 属性值在原文中的起始字节偏移
    pub value_start: usize,
    /// 引用方式
    pub quoting: Quoting,
}

// ---------------------------------------------------------------------------
// 「标签外」模式的规则表
// ---------------------------------------------------------------------------

static COMMENT_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^<!--").unwrap());
static CDATA_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^<!\[CDATA\[").unwrap());
static DECLARATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^<![^>]*>?").unwrap());
static PROCESSING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^<\?[^>]*>?").unwrap());
static CLOSING_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^</[A-Za-z][^>]*>?").unwrap());
static TAG_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<([A-Za-z][A-Za-z0-9:._-]*)").unwrap());

// ---------------------------------------------------------------------------
// 「标签内」模式的规则表
// ---------------------------------------------------------------------------

static TAG_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s+").unwrap());
static TAG_END: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^/?>").unwrap());
static ATTR_DOUBLE_QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^([^\s"'<>/=]+)\s*=\s*"([^"]*)""#).unwrap());
static ATTR_SINGLE_QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^([^\s"'<>/=]+)\s*=\s*'([^']*)'"#).unwrap());
// 无引号值不允许包含引号、等号和反引号（HTML 语法同样禁止），
// 这样引号不匹配的畸形属性会整体落空而不是被误读成无引号值
static ATTR_UNQUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^([^\s"'<>/=]+)\s*=\s*([^\s"'<>=`]+)"#).unwrap());
static ATTR_BARE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^[^\s"'<>/=]+"#).unwrap());

// script/style 的内容是原始文本，其中出现的 `<img src=...>` 之类
// 只是字符数据，不能被当作标签扫描
static SCRIPT_END: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)</script").unwrap());
static STYLE_END: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)</style").unwrap());

#[derive(Debug, Clone, Copy, PartialEq)]
enum ScanMode {
    Outside,
    InsideTag,
}

/// 扫描文本并收集所有相关属性
///
/// `relevant` 以 `(标签名, 属性名)` 为键筛选需要报告的属性，两者均为
/// 小写。返回的匹配按文档顺序排列。
///
/// 本函数对任何输入都不会失败。
pub fn scan<F>(text: &str, relevant: F) -> Vec<AttributeMatch>
where
    F: Fn(&str, &str) -> bool,
{
    let mut matches: Vec<AttributeMatch> = Vec::new();
    let mut mode = ScanMode::Outside;
    let mut current_tag = String::new();
    let mut pos: usize = 0;

    while pos < text.len() {
        let rest = &text[pos..];

        match mode {
            ScanMode::Outside => {
                if COMMENT_OPEN.is_match(rest) {
                    // 注释整体跳过；未闭合的注释吞掉剩余全文
                    pos = match rest.find("-->") {
                        Some(end) => pos + end + "-->".len(),
                        None => text.len(),
                    };
                } else if CDATA_OPEN.is_match(rest) {
                    pos = match rest.find("]]>") {
                        Some(end) => pos + end + "]]>".len(),
                        None => text.len(),
                    };
                } else if let Some(m) = CLOSING_TAG.find(rest) {
                    pos += m.end();
                } else if let Some(m) = DECLARATION.find(rest) {
                    pos += m.end();
                } else if let Some(m) = PROCESSING.find(rest) {
                    pos += m.end();
                } else if let Some(captures) = TAG_OPEN.captures(rest) {
                    current_tag = captures[1].to_ascii_lowercase();
                    pos += captures.get(0).unwrap().end();
                    mode = ScanMode::InsideTag;
                    trace!(tag = %current_tag, offset = pos, "entering tag");
                } else {
                    pos += advance(rest);
                }
            }
            ScanMode::InsideTag => {
                if let Some(m) = TAG_WHITESPACE.find(rest) {
                    pos += m.end();
                } else if let Some(m) = TAG_END.find(rest) {
                    let self_closing = m.as_str().starts_with('/');
                    pos += m.end();
                    mode = ScanMode::Outside;
                    if !self_closing {
                        pos = skip_raw_text(text, pos, &current_tag);
                    }
                } else if let Some(captures) = ATTR_DOUBLE_QUOTED.captures(rest) {
                    record_attribute(
                        &mut matches,
                        &relevant,
                        &current_tag,
                        &captures,
                        pos,
                        Quoting::Double,
                    );
                    pos += captures.get(0).unwrap().end();
                } else if let Some(captures) = ATTR_SINGLE_QUOTED.captures(rest) {
                    record_attribute(
                        &mut matches,
                        &relevant,
                        &current_tag,
                        &captures,
                        pos,
                        Quoting::Single,
                    );
                    pos += captures.get(0).unwrap().end();
                } else if let Some(captures) = ATTR_UNQUOTED.captures(rest) {
                    record_attribute(
                        &mut matches,
                        &relevant,
                        &current_tag,
                        &captures,
                        pos,
                        Quoting::Unquoted,
                    );
                    pos += captures.get(0).unwrap().end();
                } else if let Some(m) = ATTR_BARE.find(rest) {
                    pos += m.end();
                } else {
                    // 标签内无法识别的字符（孤立的 <、= 等）按文本跳过
                    pos += advance(rest);
                }
            }
        }
    }

    matches
}

/// 记录一次属性匹配（若相关性谓词通过）
fn record_attribute<F>(
    matches: &mut Vec<AttributeMatch>,
    relevant: &F,
    tag: &str,
    captures: &regex::Captures<'_>,
    base: usize,
    quoting: Quoting,
) where
    F: Fn(&str, &str) -> bool,
{
    let attribute = captures[1].to_ascii_lowercase();
    if !relevant(tag, &attribute) {
        return;
    }

    let value = captures.get(2).unwrap();
    matches.push(AttributeMatch {
        tag: tag.to_string(),
        attribute,
        value: value.as_str().to_string(),
        value_start: base + value.start(),
        quoting,
    });
}

/// script/style 元素的原始文本内容直接跳到对应的结束标签前
fn skip_raw_text(text: &str, pos: usize, tag: &str) -> usize {
    let end_pattern: &Regex = match tag {
        "script" => &SCRIPT_END,
        "style" => &STYLE_END,
        _ => return pos,
    };

    match end_pattern.find(&text[pos..]) {
        Some(m) => pos + m.start(),
        None => text.len(),
    }
}

/// 向前跳过一个字符（按 UTF-8 边界）
fn advance(rest: &str) -> usize {
    rest.chars().next().map(char::len_utf8).unwrap_or(1)
}
