use super::*;

fn msg(id: u64, sender: MessageSender, text: &str) -> ConversationMessage {
    ConversationMessage::new(id, sender, text, 1_000 + id)
}

#[test]
fn label_parses_name_and_company() {
    let ctx = ConversationContext::new("Luis · Github", vec![]);
    assert_eq!(ctx.customer_name(), Some("Luis"));
    assert_eq!(ctx.company(), Some("Github"));
}

#[test]
fn bare_label_has_no_company() {
    let ctx = ConversationContext::new("Lead from New York", vec![]);
    assert_eq!(ctx.customer_name(), Some("Lead from New York"));
    assert_eq!(ctx.company(), None);
}

#[test]
fn empty_label_yields_no_name() {
    let ctx = ConversationContext::new("", vec![]);
    assert_eq!(ctx.customer_name(), None);
    assert_eq!(ctx.company(), None);
}

#[test]
fn last_user_message_skips_agent_replies() {
    let ctx = ConversationContext::new(
        "Ivan · Nike",
        vec![
            msg(1, MessageSender::User, "wrong color shoes"),
            msg(2, MessageSender::Agent, "let me check"),
        ],
    );
    assert_eq!(ctx.last_user_message().unwrap().id, 1);
}

#[test]
fn sentiment_flips_on_frustrated() {
    let ctx = ConversationContext::new(
        "Luis · Github",
        vec![msg(1, MessageSender::User, "I'm really frustrated with this order")],
    );
    assert_eq!(ctx.sentiment(), Sentiment::Frustrated);
}

#[test]
fn sentiment_flips_on_disappointed() {
    let ctx = ConversationContext::new(
        "Luis · Github",
        vec![msg(1, MessageSender::User, "honestly quite disappointed here")],
    );
    assert_eq!(ctx.sentiment(), Sentiment::Frustrated);
}

#[test]
fn sentiment_ignores_agent_wording() {
    // Only user-sender messages feed the sentiment check.
    let ctx = ConversationContext::new(
        "Luis · Github",
        vec![
            msg(1, MessageSender::User, "where is my order"),
            msg(2, MessageSender::Agent, "sorry you're frustrated"),
        ],
    );
    assert_eq!(ctx.sentiment(), Sentiment::Neutral);
}

#[test]
fn sentiment_defaults_to_neutral_when_empty() {
    let ctx = ConversationContext::new("Luis · Github", vec![]);
    assert_eq!(ctx.sentiment(), Sentiment::Neutral);
}

#[test]
fn suggested_questions_follow_last_message() {
    let refund = ConversationContext::new("A", vec![msg(1, MessageSender::User, "I want a Refund please")]);
    assert_eq!(refund.suggested_questions()[0], "How do I process a refund?");
    assert_eq!(refund.suggested_questions().len(), 3);

    let shipping = ConversationContext::new("A", vec![msg(1, MessageSender::User, "my order is late")]);
    assert_eq!(shipping.suggested_questions()[0], "Track order status");

    let account = ConversationContext::new("A", vec![msg(1, MessageSender::Agent, "reset your password here")]);
    assert_eq!(account.suggested_questions()[0], "Account recovery steps");

    let generic = ConversationContext::new("A", vec![]);
    assert_eq!(generic.suggested_questions(), &["How do I process a refund?"]);
}

#[test]
fn message_serde_round_trip() {
    let original = msg(7, MessageSender::Fin, "hello");
    let json = serde_json::to_string(&original).unwrap();
    assert!(json.contains("\"fin\""));
    let restored: ConversationMessage = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.id, 7);
    assert_eq!(restored.sender, MessageSender::Fin);
    assert!(!restored.seen);
}
