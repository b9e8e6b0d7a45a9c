use super::*;

fn sample_metrics() -> ResponseMetrics {
    ResponseMetrics { confidence: 90, relevant_cases: 30, avg_resolution_time_mins: 60 }
}

#[test]
fn ids_are_unique_and_increasing() {
    let mut history = TurnHistory::new();
    let a = history.push_user("first", 1);
    let b = history.push_warning("wait".into(), 2);
    let c = history.push_fin_streaming(vec![], sample_metrics(), 3);
    assert!(a < b && b < c);
    assert_eq!(history.len(), 3);
}

#[test]
fn fin_streaming_turn_starts_empty_with_metadata() {
    let mut history = TurnHistory::new();
    let id = history.push_fin_streaming(vec!["Guide".into()], sample_metrics(), 10);
    let turn = history.get(id).unwrap();
    assert_eq!(turn.sender, TurnSender::Fin);
    assert_eq!(turn.text, "");
    assert!(turn.is_streaming);
    assert_eq!(turn.sources, vec!["Guide".to_string()]);
    assert_eq!(turn.metrics, Some(sample_metrics()));
    assert!(!turn.is_warning && !turn.is_error);
}

#[test]
fn streaming_updates_mutate_in_place() {
    let mut history = TurnHistory::new();
    let id = history.push_fin_streaming(vec![], sample_metrics(), 0);
    history.set_streaming_text(id, "partial");
    assert_eq!(history.get(id).unwrap().text, "partial");
    assert!(history.is_revealing());
    history.finalize(id, "partial answer");
    let turn = history.get(id).unwrap();
    assert_eq!(turn.text, "partial answer");
    assert!(!turn.is_streaming);
    assert!(!history.is_revealing());
}

#[test]
fn unknown_id_updates_are_noops() {
    let mut history = TurnHistory::new();
    history.push_user("q", 0);
    history.set_streaming_text(999, "ghost");
    history.finalize(999, "ghost");
    assert_eq!(history.len(), 1);
    assert_eq!(history.turns()[0].text, "q");
}

#[test]
fn warning_and_error_turns_are_flagged() {
    let mut history = TurnHistory::new();
    let w = history.push_warning("slow down".into(), 0);
    let e = history.push_error("oops".into(), 0);
    assert!(history.get(w).unwrap().is_warning);
    assert!(history.get(e).unwrap().is_error);
    assert!(history.get(w).unwrap().sources.is_empty());
}

#[test]
fn turn_serde_round_trip() {
    let mut history = TurnHistory::new();
    let id = history.push_fin_streaming(vec!["Doc".into()], sample_metrics(), 42);
    let json = serde_json::to_string(history.get(id).unwrap()).unwrap();
    let restored: CopilotTurn = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.id, id);
    assert_eq!(restored.sender, TurnSender::Fin);
    assert_eq!(restored.metrics, Some(sample_metrics()));
    assert!(restored.is_streaming);
}

#[test]
fn now_ms_is_after_2020() {
    assert!(now_ms().unwrap() > 1_577_836_800_000);
}
