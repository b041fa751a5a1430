//! 偏移安全的文本拼接器
//!
//! 把一组按起始偏移升序、互不重叠的替换区间一次性应用到原文上。
//! 每次替换都会使后续区间在已改写文本中的位置发生偏移，因此维护一个
//! 累计有符号偏移量：第 i 个替换在当前文本中的生效位置是
//! `原始位置 + 累计偏移`，应用后累计偏移增加
//! `替换文本长度 - 原区间长度`。整个过程是一次线性遍历。
//!
//! 区间重叠违反提取阶段的不变量，属于编程错误，以调试断言处理，
//! 不作为可恢复条件。

/// 一个待应用的替换区间
///
/// `start`/`end` 是原始文本中的字节偏移，`end` 为区间终点（不含）。
#[derive(Debug, Clone, PartialEq)]
pub struct Splice {
    pub start: usize,
    pub end: usize,
    pub replacement: String,
}

/// 应用全部替换，返回改写后的文本
///
/// `splices` 必须按 `start` 升序且互不重叠，区间须落在文本边界内。
pub fn splice(original: &str, splices: &[Splice]) -> String {
    let mut output = String::with_capacity(original.len());
    let mut offset: isize = 0;
    let mut previous_end: usize = 0;
    output.push_str(original);

    for splice in splices {
        debug_assert!(splice.start >= previous_end, "splice spans must not overlap");
        debug_assert!(splice.end >= splice.start);
        debug_assert!(splice.end <= original.len());
        previous_end = splice.end;

        let start = (splice.start as isize + offset) as usize;
        let end = (splice.end as isize + offset) as usize;
        output.replace_range(start..end, &splice.replacement);

        offset += splice.replacement.len() as isize - (splice.end - splice.start) as isize;
    }

    output
}
