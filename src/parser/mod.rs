//! 题库文本解析 - 把原始文本转换为 `Vec<Question>`
//!
//! 任意一行格式错误都会返回 [`ParseError`]，不产生部分结果。

pub mod tokenizer;

use std::collections::HashMap;
use tracing::debug;

use crate::error::ParseError;
use crate::models::{Answer, Question};
pub use tokenizer::{tokenize_line, CORRECT_MARKER, SEPARATOR};

/// 解析整份题库文本
///
/// 空行被跳过，`\r\n` 行尾也可以接受
pub fn parse_questions(content: &str) -> Result<Vec<Question>, ParseError> {
    let mut questions = Vec::new();
    let mut seen: HashMap<u32, usize> = HashMap::new();

    for (index, raw_line) in content.lines().enumerate() {
        let line_no = index + 1;
        let line = raw_line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        let question = parse_line(line, line_no)?;

        if let Some(&first_line) = seen.get(&question.question_id) {
            return Err(ParseError::DuplicateId {
                line: line_no,
                id: question.question_id,
                first_line,
            });
        }
        seen.insert(question.question_id, line_no);
        questions.push(question);
    }

    debug!(
        "解析完成，共 {} 道题目，{} 个正确选项",
        questions.len(),
        questions.iter().map(Question::correct_count).sum::<usize>()
    );
    Ok(questions)
}

/// 解析单行
pub fn parse_line(line: &str, line_no: usize) -> Result<Question, ParseError> {
    let tokens = tokenize_line(line);

    let (id_token, title) =
        tokenizer::split_head(tokens.head).ok_or_else(|| ParseError::MissingTitle {
            line: line_no,
            content: tokens.head.trim().to_string(),
        })?;

    let question_id = id_token
        .parse::<u32>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| ParseError::InvalidId {
            line: line_no,
            token: id_token.to_string(),
        })?;

    let answers = tokens
        .answers
        .iter()
        .map(|token| Answer::new(token.clean_text(), token.marked))
        .collect();

    Ok(Question::new(question_id, title, answers))
}
