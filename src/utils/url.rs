//! URL 分类与资源请求归一化
//!
//! 判定一个属性值是不是可重写的本地资源引用，并把可重写的值归一化为
//! 模块请求路径。绝对 URL、带协议的 URL、协议相对 URL 以及纯片段值
//! 都不属于本地资源，原样保留。
//!
//! 片段（`#...`）从不参与资源请求：分类前剥离，渲染最终引用表达式时
//! 原样拼回。

use percent_encoding::percent_decode_str;
use url::Url;

/// 分类结果：一个可重写的资源请求
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceRequest {
    /// 归一化后的请求路径（含 `./` 前缀，不含片段）
    pub request: String,
    /// 剥离下来的片段，含 `#` 前缀
    pub fragment: Option<String>,
}

/// 值是否带有 URL 协议（`scheme:` 形式）
///
/// `http://`、`data:`、`mailto:`、`javascript:` 等一概视为带协议。
pub fn is_url_and_has_protocol(value: &str) -> bool {
    Url::parse(value).is_ok()
}

/// 值是否为协议相对 URL（`//host/...`）
pub fn is_protocol_relative(value: &str) -> bool {
    value.starts_with("//")
}

/// 把值按第一个 `#` 拆成 (主体, 片段)
///
/// 片段带着 `#` 一起返回，后续原样拼接，不做任何转义处理。
pub fn split_fragment(value: &str) -> (&str, Option<&str>) {
    match value.find('#') {
        Some(index) => (&value[..index], Some(&value[index..])),
        None => (value, None),
    }
}

/// 对属性值分类
///
/// 返回 `Some(ResourceRequest)` 表示这个值是可重写的本地资源引用；
/// `None` 表示应当原样保留。`root` 是根相对路径（`/...`）的解析基底，
/// 未配置时根相对路径不被重写。
///
/// 分类是纯函数：同一输入与配置下结论恒定。
pub fn classify(value: &str, root: Option<&str>) -> Option<ResourceRequest> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    let (body, fragment) = split_fragment(trimmed);
    if body.is_empty() {
        // 纯片段引用（`#top`）指向文档自身
        return None;
    }

    if is_url_and_has_protocol(body) || is_protocol_relative(body) {
        return None;
    }

    let request = if let Some(stripped) = body.strip_prefix('/') {
        // 根相对路径只有在配置了 root 时才可解析
        let root = root?;
        format!("{}/{}", root.trim_end_matches('/'), decode_request(stripped))
    } else {
        requestify(&decode_request(body))
    };

    Some(ResourceRequest {
        request,
        fragment: fragment.map(str::to_string),
    })
}

/// 解码请求路径里的百分号转义
///
/// 磁盘上的文件名是未转义的，`a%20b.png` 指向 `a b.png`。
/// 无效的 UTF-8 转义序列保留原文。
fn decode_request(path: &str) -> String {
    match percent_decode_str(path).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => path.to_string(),
    }
}

/// 给相对路径补上 `./` 前缀
///
/// 宿主模块系统用它区分相对文件请求与裸模块说明符。
fn requestify(path: &str) -> String {
    if path.starts_with("./") || path.starts_with("../") {
        path.to_string()
    } else {
        format!("./{}", path)
    }
}
