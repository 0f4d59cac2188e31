use serde::{Deserialize, Serialize};

/// 单个选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub text: String,
    pub is_correct: bool,
}

impl Answer {
    pub fn new(text: impl Into<String>, is_correct: bool) -> Self {
        Self {
            text: text.into(),
            is_correct,
        }
    }
}

/// 题目记录
///
/// `answers` 的顺序就是展示顺序，任何阶段都不能重排。
/// `clue` 在解析时计算一次，修改 `answers` 时必须调用 [`Question::recount_clue`] 保持同步。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub question_id: u32,
    pub title: String,
    pub answers: Vec<Answer>,
    pub clue: usize,
    #[serde(default)]
    pub is_starred: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(
        rename = "key_takeaways",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub key_takeaways: Option<Vec<String>>,
}

impl Question {
    /// 创建未经补充的题目，`clue` 由选项推导
    pub fn new(question_id: u32, title: impl Into<String>, answers: Vec<Answer>) -> Self {
        let clue = count_correct(&answers);
        Self {
            question_id,
            title: title.into(),
            answers,
            clue,
            is_starred: false,
            explanation: None,
            key_takeaways: None,
        }
    }

    /// 正确选项数量
    pub fn correct_count(&self) -> usize {
        count_correct(&self.answers)
    }

    /// 重新同步 `clue`
    pub fn recount_clue(&mut self) {
        self.clue = self.correct_count();
    }

    /// 写入补充结果（解释 + 要点）
    pub fn apply_enrichment(&mut self, explanation: String, key_takeaways: Vec<String>) {
        self.explanation = Some(explanation);
        self.key_takeaways = Some(key_takeaways);
    }

    /// 是否已经有可用的解释（不是缺失，也不是兜底文本）
    pub fn has_generated_explanation(&self) -> bool {
        matches!(
            self.explanation.as_deref(),
            Some(text) if text != crate::services::FALLBACK_EXPLANATION
        )
    }
}

fn count_correct(answers: &[Answer]) -> usize {
    answers.iter().filter(|a| a.is_correct).count()
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.title, self.question_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_field_names() {
        let question = Question::new(
            7,
            "Czym jest phishing?",
            vec![Answer::new("Oszustwo e-mailowe", true)],
        );
        let value = serde_json::to_value(&question).unwrap();

        assert_eq!(value["questionId"], 7);
        assert_eq!(value["answers"][0]["isCorrect"], true);
        assert_eq!(value["clue"], 1);
        assert_eq!(value["isStarred"], false);
        // 补充前不输出这两个字段
        assert!(value.get("explanation").is_none());
        assert!(value.get("key_takeaways").is_none());
    }

    #[test]
    fn test_enriched_fields_use_snake_case_takeaways() {
        let mut question = Question::new(1, "t", Vec::new());
        question.apply_enrichment("wyjaśnienie".to_string(), vec!["- a".to_string()]);
        let value = serde_json::to_value(&question).unwrap();

        assert_eq!(value["explanation"], "wyjaśnienie");
        assert_eq!(value["key_takeaways"][0], "- a");
    }

    #[test]
    fn test_recount_clue_after_edit() {
        let mut question = Question::new(1, "t", vec![Answer::new("a", false)]);
        assert_eq!(question.clue, 0);

        question.answers.push(Answer::new("b", true));
        question.answers.push(Answer::new("c", true));
        question.recount_clue();

        assert_eq!(question.clue, 2);
        assert_eq!(question.clue, question.correct_count());
    }

    #[test]
    fn test_has_generated_explanation() {
        let mut question = Question::new(1, "t", Vec::new());
        assert!(!question.has_generated_explanation());

        question.apply_enrichment(crate::services::FALLBACK_EXPLANATION.to_string(), Vec::new());
        assert!(!question.has_generated_explanation());

        question.apply_enrichment("ok".to_string(), Vec::new());
        assert!(question.has_generated_explanation());
    }
}
