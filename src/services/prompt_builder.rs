//! 提示词构建 - 业务能力层
//!
//! 只处理单个 Question，纯字符串拼接。
//! 题干和选项原样嵌入，不做转义：内容里如果含有标签或双引号会破坏提示词结构。

use std::fmt::Write;

use crate::config::Config;
use crate::models::Question;

/// 私下推理的标签
pub const ANALYSIS_TAG: &str = "analysis";
/// 面向学生的解释标签
pub const EXPLANATION_TAG: &str = "explanation";
/// 要点列表标签
pub const KEY_TAKEAWAYS_TAG: &str = "key_takeaways";

/// 提示词参数
#[derive(Debug, Clone)]
pub struct PromptOptions {
    /// 解释和要点使用的语言
    pub target_language: String,
    /// 课程名称，给模型提供上下文
    pub course_subject: String,
}

impl Default for PromptOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for PromptOptions {
    fn from(config: &Config) -> Self {
        Self {
            target_language: config.target_language.clone(),
            course_subject: config.course_subject.clone(),
        }
    }
}

/// 为一道题构建提示词
pub fn build_prompt(question: &Question, options: &PromptOptions) -> String {
    let mut prompt = String::with_capacity(4096);
    let _ = write!(
        prompt,
        "You are an expert in {} education tasked with explaining multiple-choice \
         questions to students. Your goal is to provide clear, comprehensive explanations that \
         help students understand fundamental concepts.\n\n\
         Here is the question data you need to analyze:\n\n",
        options.course_subject
    );
    prompt.push_str(&question_data_block(question));
    prompt.push_str(&instructions(options));
    prompt
}

/// `<question_data>` 块，手写的 JSON 风格视图
fn question_data_block(question: &Question) -> String {
    let answers = question
        .answers
        .iter()
        .map(|answer| {
            format!(
                "        {{\n            \"text\": \"{}\",\n            \"isCorrect\": {}\n        }}",
                answer.text, answer.is_correct
            )
        })
        .collect::<Vec<_>>()
        .join(",\n");

    let mut block = String::new();
    // 写入 String 不会失败
    let _ = write!(
        block,
        "<question_data>\n{{\n    \"questionId\": {},\n    \"title\": \"{}\",\n    \"answers\": [\n{}\n    ]\n}}\n</question_data>\n\n",
        question.question_id, question.title, answers
    );
    block
}

fn instructions(options: &PromptOptions) -> String {
    let language = &options.target_language;
    format!(
        r#"Please follow these steps to create your explanation:

1. Analyze the question and its answers carefully, considering the context of "{subject}".

2. Wrap your analysis and planning process inside <{analysis}> tags. Consider:
   - The main topic or concept being tested
   - Key concepts present in the question
   - Potential misconceptions students might have about these concepts
   - Why each answer option is correct or incorrect
   - Any relevant additional information that would enhance understanding
   - An outline for the structure of your explanation

3. Based on your analysis, create a comprehensive explanation in {language} that includes:
   - A brief introduction to the topic of the question
   - An explanation of why each correct answer is correct
   - An explanation of why each incorrect answer is incorrect
   - Clarification of potential misconceptions
   - Any relevant additional information that would help students better understand the concept

4. Format your explanation within <{explanation}> tags.

5. Identify 2-3 key points that students should remember about this topic and list them in {language} within <{takeaways}> tags, one point per line.

Maintain a professional yet approachable tone suitable for educational purposes.
Example output structure (do not copy the content, only the format):

<{analysis}>
[Your detailed analysis and planning in English]
</{analysis}>

<{explanation}>
[Your detailed explanation in {language}, markdown formatted]
</{explanation}>

<{takeaways}>
- [Key point 1 in {language}]
- [Key point 2 in {language}]
- [Key point 3 in {language}]
</{takeaways}>

Remember to write all student-facing content (explanation and key takeaways) in {language}.
"#,
        subject = options.course_subject,
        analysis = ANALYSIS_TAG,
        explanation = EXPLANATION_TAG,
        takeaways = KEY_TAKEAWAYS_TAG,
        language = language,
    )
}
