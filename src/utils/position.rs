//! 偏移量到行列位置的换算

/// 把字节偏移换算为 1 起始的 `(行, 列)`
///
/// 扫描偏移之前的换行符计数得到行号，列号按最后一个换行符之后的
/// 字符数计算。偏移越界时按文本末尾处理。
pub fn line_and_column(text: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(text.len());
    let before = &text[..offset];

    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let column = before[line_start..].chars().count() + 1;

    (line, column)
}
