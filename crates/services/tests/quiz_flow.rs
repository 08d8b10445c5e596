use quiz_core::model::{Navigation, SessionConfig};
use quiz_core::time::fixed_now;
use quiz_core::{QuizError, QuizPhase};
use quiz_services::{
    Clock, LoadPoolError, QuizService, QuizServiceError, StaticQuestionSource, Verdict,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::{Value, json};

fn bank() -> Value {
    let mut records = Vec::new();
    for i in 0..6 {
        records.push(json!({
            "question": format!("Values question {i}"),
            "section": "Australian values",
            "options": ["A", "B", "C", "D"],
            "answer": i % 4
        }));
    }
    for i in 0..14 {
        records.push(json!({
            "question": format!("Geography question {i}"),
            "section": "Geography",
            "options": ["Sydney", "Melbourne", "Canberra", "Perth"],
            "answer": 2
        }));
    }
    Value::Array(records)
}

async fn loaded_service(config: SessionConfig) -> QuizService {
    let mut service = QuizService::new(config).with_clock(Clock::fixed(fixed_now()));
    service
        .load(&StaticQuestionSource::new(bank()))
        .await
        .unwrap();
    service
}

#[tokio::test]
async fn full_quiz_round_trip() {
    let mut service = loaded_service(SessionConfig::default()).await;
    assert_eq!(service.phase(), QuizPhase::Ready);
    assert_eq!(service.view().pool_size, Some(20));

    let view = service
        .start_with_rng(&SessionConfig::default(), &mut StdRng::seed_from_u64(5))
        .unwrap();
    assert_eq!(view.phase, QuizPhase::Active);
    assert_eq!(view.questions.len(), 10);
    assert!(!view.can_finish);

    // Answer everything correctly except the first question.
    let questions = service.controller().session().unwrap().questions().to_vec();
    for (index, question) in questions.iter().enumerate() {
        let correct = question.correct().value();
        let option = if index == 0 { (correct + 1) % 4 } else { correct };
        service.select_answer(index, option).unwrap();
    }
    assert!(service.view().can_finish);

    let review = service.finish().unwrap();
    assert_eq!(review.score, 9);
    assert_eq!(review.total, 10);
    assert_eq!(review.verdict, Verdict::Great);
    assert_eq!(review.mistakes().count(), 1);
    assert_eq!(service.view().score, Some(9));
    assert_eq!(service.review(), Some(review));

    service.reset().unwrap();
    let view = service.view();
    assert_eq!(view.phase, QuizPhase::Ready);
    assert!(view.questions.is_empty());
    assert_eq!(view.score, None);
}

#[tokio::test]
async fn stratified_session_draws_fixed_section_count() {
    let config = SessionConfig::stratified(10, "Australian values", 5).unwrap();
    let mut service = loaded_service(config).await;
    assert_eq!(service.view().question_count, 15);
    service.start().unwrap();

    let session = service.controller().session().unwrap();
    let values = session
        .questions()
        .iter()
        .filter(|q| q.section() == "Australian values")
        .count();
    assert_eq!(values, 5);
    assert_eq!(session.len() - values, 10);
    assert_eq!(session.len(), 15);
}

#[tokio::test]
async fn stratified_session_with_short_remainder_stays_ready() {
    let config = SessionConfig::stratified(15, "Australian values", 5).unwrap();
    let mut service = loaded_service(config).await;
    let err = service.start().unwrap_err();
    assert!(matches!(
        err,
        QuizServiceError::Quiz(QuizError::InsufficientQuestions {
            requested: 15,
            available: 14,
            ..
        })
    ));
    assert_eq!(service.phase(), QuizPhase::Ready);
}

#[tokio::test]
async fn oversized_request_leaves_service_ready() {
    let mut service = loaded_service(SessionConfig::flat(21).unwrap()).await;
    let err = service.start().unwrap_err();
    assert!(matches!(
        err,
        QuizServiceError::Quiz(QuizError::InsufficientQuestions {
            requested: 21,
            available: 20,
            ..
        })
    ));
    assert_eq!(service.phase(), QuizPhase::Ready);
}

#[tokio::test]
async fn finish_is_refused_until_all_answered() {
    let mut service = loaded_service(SessionConfig::flat(3).unwrap()).await;
    service.start().unwrap();
    service.select_answer(0, 1).unwrap();
    service.select_answer(2, 1).unwrap();

    let err = service.finish().unwrap_err();
    assert!(matches!(
        err,
        QuizServiceError::Quiz(QuizError::IncompleteAnswers { unanswered: 1 })
    ));
    assert_eq!(service.phase(), QuizPhase::Active);
    assert_eq!(service.view().progress.unwrap().answered, 2);
}

#[tokio::test]
async fn navigation_follows_single_question_flow() {
    let mut service = loaded_service(SessionConfig::flat(3).unwrap()).await;
    service.start().unwrap();
    assert_eq!(service.navigate(Navigation::Next).unwrap(), 1);
    assert_eq!(service.navigate(Navigation::JumpTo(2)).unwrap(), 2);
    assert_eq!(service.navigate(Navigation::Next).unwrap(), 2);
    assert_eq!(service.view().current, Some(2));
}

#[tokio::test]
async fn invalid_bank_keeps_service_idle() {
    let mut service = QuizService::default();
    let source = StaticQuestionSource::new(json!([{
        "question": "Q",
        "section": "S",
        "options": ["A", "B", "C"],
        "answer": 0
    }]));
    let err = service.load(&source).await.unwrap_err();
    assert!(matches!(
        err,
        QuizServiceError::Load(LoadPoolError::Validation(_))
    ));
    assert_eq!(service.phase(), QuizPhase::Idle);
    assert!(service.select_answer(0, 0).is_err());
}

#[tokio::test]
async fn second_load_is_rejected() {
    let mut service = loaded_service(SessionConfig::default()).await;
    let err = service
        .load(&StaticQuestionSource::new(json!([])))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        QuizServiceError::Quiz(QuizError::InvalidOperation { .. })
    ));
    assert_eq!(service.view().pool_size, Some(20));
}
