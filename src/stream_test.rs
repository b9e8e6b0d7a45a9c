use super::*;
use crate::sources;
use crate::turn::TurnHistory;

async fn seed_streaming_turn(history: &SharedHistory) -> u64 {
    history
        .write()
        .await
        .push_fin_streaming(vec![], sources::metrics(""), 0)
}

#[test]
fn prefixes_grow_word_by_word() {
    assert_eq!(word_prefixes("a b c"), vec!["a", "a b", "a b c"]);
}

#[test]
fn single_word_has_single_prefix() {
    assert_eq!(word_prefixes("hello"), vec!["hello"]);
}

#[test]
fn empty_input_has_no_prefixes() {
    assert!(word_prefixes("").is_empty());
}

#[test]
fn consecutive_spaces_are_preserved() {
    assert_eq!(word_prefixes("a  b"), vec!["a", "a ", "a  b"]);
}

#[tokio::test]
async fn reveal_walks_prefixes_in_order() {
    let history = TurnHistory::shared();
    let turn_id = seed_streaming_turn(&history).await;

    let handle = reveal(history.clone(), turn_id, "a b c".to_string());

    // Poll faster than the minimum 30ms word delay so no state is missed.
    let mut observed: Vec<String> = Vec::new();
    loop {
        let (text, streaming) = {
            let guard = history.read().await;
            let turn = guard.get(turn_id).unwrap();
            (turn.text.clone(), turn.is_streaming)
        };
        if observed.last().map(String::as_str) != Some(text.as_str()) && !text.is_empty() {
            observed.push(text);
        }
        if !streaming {
            break;
        }
        tokio::time::sleep(Duration::from_millis(3)).await;
    }
    handle.await.unwrap();

    assert_eq!(observed, vec!["a", "a b", "a b c"]);
    let guard = history.read().await;
    let turn = guard.get(turn_id).unwrap();
    assert_eq!(turn.text, "a b c");
    assert!(!turn.is_streaming);
}

#[tokio::test]
async fn reveal_of_empty_text_finalizes_immediately() {
    let history = TurnHistory::shared();
    let turn_id = seed_streaming_turn(&history).await;

    reveal(history.clone(), turn_id, String::new()).await.unwrap();

    let guard = history.read().await;
    let turn = guard.get(turn_id).unwrap();
    assert_eq!(turn.text, "");
    assert!(!turn.is_streaming);
}

#[tokio::test]
async fn reveal_against_discarded_history_is_harmless() {
    let old_history = TurnHistory::shared();
    let turn_id = seed_streaming_turn(&old_history).await;
    let handle = reveal(old_history.clone(), turn_id, "one two three".to_string());

    // Conversation switch: the session replaces the container wholesale.
    let new_history = TurnHistory::shared();

    handle.await.unwrap();
    assert!(new_history.read().await.is_empty());
    // The abandoned container still finalized, which nothing observes.
    assert_eq!(old_history.read().await.get(turn_id).unwrap().text, "one two three");
}
