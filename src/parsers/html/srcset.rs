//! srcset 属性微语法解析模块
//!
//! 解析 HTML `srcset` 属性的候选图片列表，提取每个候选项的 URL、
//! URL 在属性值内的字节偏移量以及宽度/密度/高度描述符。
//!
//! 与浏览器的容错行为不同，这里的描述符是严格校验的：任何一个候选项
//! 出现非法描述符，整个属性的解析都会失败，调用方据此跳过该属性的重写
//! 并记录一条非致命诊断信息。
//!
//! ## 语法支持
//!
//! - **宽度描述符**: `image.jpg 480w` - 正整数，不允许为零
//! - **像素密度描述符**: `image.jpg 2x` - 非负浮点数
//! - **高度描述符**: `image.jpg 300h` - 正整数，不允许为零
//! - **括号内容**: `(...)` 中的字符原样收集，不按空白或逗号切分
//! - **逗号分隔**: 候选项之间用逗号分隔，URL 末尾的逗号同样终止候选项
//!
//! ## 使用示例
//!
//! ```rust
//! use modulith::parsers::html::srcset::parse_srcset;
//!
//! let candidates = parse_srcset("small.jpg 480w, large.jpg 800w").unwrap();
//! assert_eq!(candidates.len(), 2);
//! assert_eq!(candidates[0].url, "small.jpg");
//! assert_eq!(candidates[0].width, Some(480));
//! ```

use thiserror::Error;

/// srcset 描述符语法错误
///
/// 每个变体都携带导致解析失败的描述符原文，便于在诊断信息中指认出错位置。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SrcsetError {
    /// 同一候选项中出现了重复或互斥的描述符类别
    #[error("duplicate or conflicting descriptor `{0}` in image candidate")]
    Conflicting(String),
    /// 宽度描述符不是正整数
    #[error("width descriptor `{0}` must be a positive integer")]
    InvalidWidth(String),
    /// 密度描述符不是非负数
    #[error("density descriptor `{0}` must be a non-negative number")]
    InvalidDensity(String),
    /// 高度描述符不是正整数
    #[error("height descriptor `{0}` must be a positive integer")]
    InvalidHeight(String),
    /// 无法识别的描述符形态
    #[error("unknown descriptor `{0}` in image candidate")]
    Unknown(String),
}

/// srcset 候选项
///
/// 表示 `srcset` 属性逗号分隔列表中的一个图片候选，`url_offset` 是 URL
/// 在整个属性值字符串内的字节偏移量，供重写阶段定位子区间使用。
#[derive(Debug, Clone, PartialEq)]
pub struct SrcsetCandidate {
    /// 图片文件的路径或 URL
    pub url: String,
    /// URL 在属性值内的起始字节偏移
    pub url_offset: usize,
    /// 宽度描述符（如 `480w`）
    pub width: Option<u32>,
    /// 像素密度描述符（如 `2x`）
    pub density: Option<f64>,
    /// 高度描述符（如 `300h`）
    pub height: Option<u32>,
}

/// 描述符收集状态机的状态集
///
/// `InParens` 中的内容是不透明的：既不在空白处断开，也不在逗号处结束候选项。
#[derive(Debug, Clone, Copy, PartialEq)]
enum DescriptorState {
    InDescriptor,
    InParens,
    AfterDescriptor,
}

fn is_srcset_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0c')
}

/// 解析 srcset 属性值
///
/// 返回按出现顺序排列的候选项列表。任何候选项出现描述符错误时整体返回
/// `Err`，调用方应当放弃重写这一属性并把错误转为诊断信息。
///
/// 空字符串和只含空白/逗号的输入返回空列表。
pub fn parse_srcset(value: &str) -> Result<Vec<SrcsetCandidate>, SrcsetError> {
    let mut candidates: Vec<SrcsetCandidate> = Vec::new();
    let bytes = value.as_bytes();
    let mut pos: usize = 0;

    loop {
        // 跳过候选项之间的空白和逗号
        while pos < bytes.len()
            && (is_srcset_whitespace(bytes[pos] as char) || bytes[pos] == b',')
        {
            pos += 1;
        }
        if pos >= bytes.len() {
            break;
        }

        // 收集一段连续的非空白字符作为候选 URL
        let url_start = pos;
        while pos < bytes.len() && !is_srcset_whitespace(bytes[pos] as char) {
            pos += 1;
        }
        let mut url = &value[url_start..pos];

        let mut descriptors: Vec<String> = Vec::new();
        if url.ends_with(',') {
            // URL 以逗号结尾表示候选项到此结束，没有描述符。
            // 多个尾随逗号按一个处理（宽容但不严格合法）。
            url = url.trim_end_matches(',');
        } else {
            pos = collect_descriptors(value, pos, &mut descriptors);
        }

        if url.is_empty() {
            continue;
        }

        candidates.push(finalize_candidate(url, url_start, &descriptors)?);
    }

    Ok(candidates)
}

/// 描述符收集：四状态小型状态机
///
/// 从 `pos` 开始消费字符，直到候选项结束（逗号或输入末尾）。
/// 返回下一候选项的起始扫描位置。
fn collect_descriptors(value: &str, mut pos: usize, descriptors: &mut Vec<String>) -> usize {
    let mut state = DescriptorState::InDescriptor;
    let mut current = String::new();

    loop {
        let c = value[pos..].chars().next();

        match state {
            DescriptorState::InDescriptor => match c {
                None => {
                    if !current.is_empty() {
                        descriptors.push(std::mem::take(&mut current));
                    }
                    break;
                }
                Some(ch) if is_srcset_whitespace(ch) => {
                    if !current.is_empty() {
                        descriptors.push(std::mem::take(&mut current));
                        state = DescriptorState::AfterDescriptor;
                    }
                    pos += ch.len_utf8();
                }
                Some(',') => {
                    // 逗号终止整个候选项，逗号本身被消费
                    pos += 1;
                    if !current.is_empty() {
                        descriptors.push(std::mem::take(&mut current));
                    }
                    break;
                }
                Some('(') => {
                    current.push('(');
                    state = DescriptorState::InParens;
                    pos += 1;
                }
                Some(ch) => {
                    current.push(ch);
                    pos += ch.len_utf8();
                }
            },
            DescriptorState::InParens => match c {
                None => {
                    // 未闭合的括号按已闭合处理
                    if !current.is_empty() {
                        descriptors.push(std::mem::take(&mut current));
                    }
                    break;
                }
                Some(')') => {
                    current.push(')');
                    state = DescriptorState::InDescriptor;
                    pos += 1;
                }
                Some(ch) => {
                    current.push(ch);
                    pos += ch.len_utf8();
                }
            },
            DescriptorState::AfterDescriptor => match c {
                None => break,
                Some(ch) if is_srcset_whitespace(ch) => {
                    pos += ch.len_utf8();
                }
                Some(_) => {
                    // 非空白字符回到描述符状态，字符留待下一轮重新消费
                    state = DescriptorState::InDescriptor;
                }
            },
        }
    }

    pos
}

/// 对收集到的描述符逐个分类并校验互斥关系
fn finalize_candidate(
    url: &str,
    url_offset: usize,
    descriptors: &[String],
) -> Result<SrcsetCandidate, SrcsetError> {
    let mut width: Option<u32> = None;
    let mut density: Option<f64> = None;
    let mut height: Option<u32> = None;

    for descriptor in descriptors {
        match descriptor.chars().last() {
            Some('w') => {
                let body = &descriptor[..descriptor.len() - 1];
                if width.is_some() || density.is_some() {
                    return Err(SrcsetError::Conflicting(descriptor.clone()));
                }
                let parsed: u32 = body
                    .parse()
                    .map_err(|_| SrcsetError::InvalidWidth(descriptor.clone()))?;
                if parsed == 0 {
                    return Err(SrcsetError::InvalidWidth(descriptor.clone()));
                }
                width = Some(parsed);
            }
            Some('x') => {
                let body = &descriptor[..descriptor.len() - 1];
                if width.is_some() || density.is_some() || height.is_some() {
                    return Err(SrcsetError::Conflicting(descriptor.clone()));
                }
                let parsed: f64 = body
                    .parse()
                    .map_err(|_| SrcsetError::InvalidDensity(descriptor.clone()))?;
                if parsed.is_sign_negative() || parsed.is_nan() {
                    return Err(SrcsetError::InvalidDensity(descriptor.clone()));
                }
                density = Some(parsed);
            }
            Some('h') => {
                let body = &descriptor[..descriptor.len() - 1];
                if height.is_some() || density.is_some() {
                    return Err(SrcsetError::Conflicting(descriptor.clone()));
                }
                let parsed: u32 = body
                    .parse()
                    .map_err(|_| SrcsetError::InvalidHeight(descriptor.clone()))?;
                if parsed == 0 {
                    return Err(SrcsetError::InvalidHeight(descriptor.clone()));
                }
                height = Some(parsed);
            }
            _ => return Err(SrcsetError::Unknown(descriptor.clone())),
        }
    }

    Ok(SrcsetCandidate {
        url: url.to_string(),
        url_offset,
        width,
        density,
        height,
    })
}
