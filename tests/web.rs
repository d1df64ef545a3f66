// Browser-side tests for the wasm-bindgen surface.
// Run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use vocab_quiz::QuizApp;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

const SAMPLE: &str = include_str!("../data/sample.json");

#[wasm_bindgen_test]
fn from_data_exposes_chapters_and_counts() {
    let app = QuizApp::from_data(SAMPLE, None).unwrap();
    assert_eq!(app.chapters().length(), 5);
    assert_eq!(app.entry_count(), 20);
    assert_eq!(app.question_count_options(), vec![10, 20, 30, 20]);
    assert_eq!(app.phase(), "configuring");
}

#[wasm_bindgen_test]
fn quiz_runs_to_completion() {
    let mut app = QuizApp::from_data(SAMPLE, Some("{}".into())).unwrap();
    app.start_quiz(
        r#"{"questionCount":2,"chapters":["Ch-1"],"questionField":"romaji","answerField":"meaning"}"#,
    )
    .unwrap();
    assert_eq!(app.phase(), "in_progress");
    app.submit_answer("teacher").unwrap();
    app.advance().unwrap();
    app.submit_answer("teacher").unwrap();
    assert_eq!(app.advance().unwrap(), "finished");
    assert!(app.result().unwrap().contains("\"total\":2"));
}

#[wasm_bindgen_test]
fn empty_selection_is_thrown() {
    let mut app = QuizApp::from_data(SAMPLE, None).unwrap();
    let err = app
        .start_quiz(r#"{"questionCount":5,"chapters":["Ch-5"],"questionField":"kanji","answerField":"meaning"}"#)
        .unwrap_err();
    let err: js_sys::Error = wasm_bindgen::JsCast::dyn_into(err).unwrap();
    assert_eq!(String::from(err.name()), "empty_selection");
}

#[wasm_bindgen_test]
async fn missing_data_file_is_load_error() {
    let err = match QuizApp::load(Some(r#"{"dataUrl":"missing.json"}"#.into())).await {
        Ok(_) => panic!("loading a missing file succeeded"),
        Err(err) => err,
    };
    let err: js_sys::Error = wasm_bindgen::JsCast::dyn_into(err).unwrap();
    assert_eq!(String::from(err.name()), "load_error");
}
