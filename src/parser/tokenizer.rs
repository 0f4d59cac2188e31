//! 单行题目文本的词法切分
//!
//! 行格式：`<编号><空白><题干>*<选项>*<选项>...`，
//! 选项中任意位置出现 `[X]` 表示正确答案。

/// 字段分隔符，同时也是选项边界
pub const SEPARATOR: char = '*';

/// 正确答案标记
pub const CORRECT_MARKER: &str = "[X]";

/// 一行切分出的片段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineTokens<'a> {
    /// 片段 0：编号 + 题干
    pub head: &'a str,
    /// 其余片段，每个是一个选项
    pub answers: Vec<AnswerToken<'a>>,
}

/// 单个选项片段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerToken<'a> {
    pub raw: &'a str,
    pub marked: bool,
}

impl AnswerToken<'_> {
    /// 去掉标记和分隔符后的选项文本
    pub fn clean_text(&self) -> String {
        self.raw
            .replace(CORRECT_MARKER, "")
            .replace(SEPARATOR, "")
            .trim()
            .to_string()
    }
}

/// 把一行切成片段
pub fn tokenize_line(line: &str) -> LineTokens<'_> {
    let mut segments = line.split(SEPARATOR);
    // split 至少产出一个片段
    let head = segments.next().unwrap_or_default();
    let answers = segments
        .map(|raw| AnswerToken {
            raw,
            marked: raw.contains(CORRECT_MARKER),
        })
        .collect();

    LineTokens { head, answers }
}

/// 按第一段空白把片段 0 拆成 (编号, 题干)
///
/// 题干首尾空白都会去掉，分隔符 `*` 前的空格不进入题干。
/// 没有空白或空白后没有内容时返回 `None`
pub fn split_head(head: &str) -> Option<(&str, &str)> {
    let head = head.trim_start();
    let split_at = head.find(char::is_whitespace)?;
    let (id, rest) = head.split_at(split_at);
    let title = rest.trim();
    if title.is_empty() {
        return None;
    }
    Some((id, title))
}
