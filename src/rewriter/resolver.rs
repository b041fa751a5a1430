//! 占位符解析阶段
//!
//! 在可选的外部压缩器处理之后，扫描文本中残存的全部占位符令牌，
//! 替换为对应替换条目的最终引用表达式：导入标识符加上注册时记录的
//! 片段后缀；原始属性值无引号时整体补上双引号。
//!
//! 压缩器可能移动甚至丢弃占位符（比如整个属性被剥除），因此这里不
//! 要求每个注册过的占位符都出现。反过来，出现了占位符形态的令牌却
//! 在注册表中找不到条目，说明注册表与拼接器失去同步，这是内部不变量
//! 被破坏，立即以致命错误终止。

use std::sync::LazyLock;

use regex::Regex;

use crate::core::TransformError;
use crate::parsers::html::tokenizer::Quoting;
use crate::rewriter::registry::ReplacementRegistry;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"___MODULITH_REPLACEMENT_([0-9]+)___").unwrap());

/// 解析文本中的全部占位符
///
/// 返回最终文本；遇到注册表中不存在的占位符返回
/// [`TransformError::UnresolvedPlaceholder`]。
pub fn resolve(text: &str, registry: &ReplacementRegistry) -> Result<String, TransformError> {
    let mut output = String::with_capacity(text.len());
    let mut cursor: usize = 0;

    for found in PLACEHOLDER.captures_iter(text) {
        let token = found.get(0).unwrap();
        let index: usize = found[1].parse().map_err(|_| {
            TransformError::UnresolvedPlaceholder {
                placeholder: token.as_str().to_string(),
            }
        })?;

        let entry = registry.replacement(index).ok_or_else(|| {
            TransformError::UnresolvedPlaceholder {
                placeholder: token.as_str().to_string(),
            }
        })?;

        output.push_str(&text[cursor..token.start()]);
        render(&mut output, registry.import_identifier(entry), entry.fragment.as_deref(), entry.quoting);
        cursor = token.end();
    }

    output.push_str(&text[cursor..]);
    Ok(output)
}

/// 渲染一条替换的最终引用表达式
fn render(output: &mut String, identifier: &str, fragment: Option<&str>, quoting: Quoting) {
    match quoting {
        Quoting::Double | Quoting::Single => {
            output.push_str(identifier);
            if let Some(fragment) = fragment {
                output.push_str(fragment);
            }
        }
        Quoting::Unquoted => {
            // 无引号的原始值替换后必须带引号，否则标识符之后的片段
            // 或宿主替换进来的路径可能破坏标签结构
            output.push('"');
            output.push_str(identifier);
            if let Some(fragment) = fragment {
                output.push_str(fragment);
            }
            output.push('"');
        }
    }
}
