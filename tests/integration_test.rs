use async_trait::async_trait;
use quiz_explainer::app::{convert_file, enrich_file};
use quiz_explainer::models::load_questions;
use quiz_explainer::orchestrator::{EnrichOutcome, Position};
use quiz_explainer::{
    AppError, Enricher, LlmError, ParseError, PromptOptions, ProgressSink, Question, TextGenerator,
    FALLBACK_EXPLANATION,
};
use std::sync::{Arc, Mutex};

const DUMP: &str = "\
1 What is phishing?*Email fraud[X]*Physical theft
2 Which are symmetric ciphers?*AES[X]*RSA*ChaCha20[X]
3 Czym jest zapora sieciowa?*Filtr ruchu sieciowego[X]*Program antywirusowy
4 Title without answers
";

/// 第 3 题调用失败，其余正常
struct FakeGemini;

#[async_trait]
impl TextGenerator for FakeGemini {
    fn model_name(&self) -> &str {
        "fake-gemini"
    }

    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        if prompt.contains("\"questionId\": 3,") {
            return Err(LlmError::EmptyContent {
                model: "fake-gemini".to_string(),
            });
        }
        Ok("<key_takeaways>\n- Zapamiętaj to\n</key_takeaways>\n\
            <explanation>\nTo jest wyjaśnienie.\n</explanation>"
            .to_string())
    }
}

#[derive(Default)]
struct CollectingSink {
    events: Mutex<Vec<(usize, EnrichOutcome)>>,
}

impl ProgressSink for CollectingSink {
    fn question_started(&self, _position: Position, _question: &Question) {}

    fn question_finished(&self, position: Position, _question: &Question, outcome: EnrichOutcome) {
        self.events.lock().unwrap().push((position.index, outcome));
    }
}

#[test]
fn test_convert_writes_expected_document() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("pyta.dat");
    let output = dir.path().join("questions.json");
    std::fs::write(&input, DUMP).unwrap();

    let count = tokio_test::block_on(convert_file(&input, &output)).unwrap();
    assert_eq!(count, 4);

    let json = std::fs::read_to_string(&output).unwrap();
    assert!(json.contains("Czym jest zapora sieciowa?"));
    assert!(!json.contains("explanation"));

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(
        value[0],
        serde_json::json!({
            "questionId": 1,
            "title": "What is phishing?",
            "answers": [
                {"text": "Email fraud", "isCorrect": true},
                {"text": "Physical theft", "isCorrect": false}
            ],
            "clue": 1,
            "isStarred": false
        })
    );
    assert_eq!(value[1]["clue"], 2);
    assert_eq!(value[3]["answers"], serde_json::json!([]));
}

#[test]
fn test_convert_malformed_input_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("pyta.dat");
    let output = dir.path().join("questions.json");
    std::fs::write(&input, "1 Good*a[X]\n2\n3 Good*b").unwrap();

    let err = tokio_test::block_on(convert_file(&input, &output)).unwrap_err();

    assert!(matches!(
        err,
        AppError::Parse(ParseError::MissingTitle { line: 2, .. })
    ));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_full_pipeline_with_fake_model() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("pyta.dat");
    let output = dir.path().join("questions.json");
    std::fs::write(&input, DUMP).unwrap();
    convert_file(&input, &output).await.unwrap();

    let sink = Arc::new(CollectingSink::default());
    let enricher = Enricher::new(Arc::new(FakeGemini), sink.clone(), PromptOptions::default(), 2);

    let report = enrich_file(&output, &enricher).await.unwrap();
    assert_eq!(report.total, 4);
    assert_eq!(report.generated, 3);
    assert_eq!(report.fallback, 1);

    let questions = load_questions(&output).await.unwrap();
    let ids: Vec<u32> = questions.iter().map(|q| q.question_id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);

    for q in &questions {
        assert_eq!(q.clue, q.answers.iter().filter(|a| a.is_correct).count());
        assert!(!q.is_starred);
        assert!(q.explanation.is_some());
        assert!(q.key_takeaways.is_some());
    }
    assert_eq!(questions[0].explanation.as_deref(), Some("To jest wyjaśnienie."));
    assert_eq!(
        questions[0].key_takeaways.as_deref(),
        Some(&["- Zapamiętaj to".to_string()][..])
    );
    assert_eq!(questions[2].explanation.as_deref(), Some(FALLBACK_EXPLANATION));
    assert_eq!(questions[2].key_takeaways, Some(Vec::new()));
    assert_eq!(questions[3].explanation.as_deref(), Some("To jest wyjaśnienie."));

    let json = std::fs::read_to_string(&output).unwrap();
    assert!(json.contains("Nie udało się wygenerować wyjaśnienia."));
    assert!(json.contains("\"key_takeaways\": ["));

    let mut events = sink.events.lock().unwrap().clone();
    events.sort_by_key(|(index, _)| *index);
    assert_eq!(events.len(), 4);
    assert_eq!(events[2], (3, EnrichOutcome::ServiceFailed));
}
