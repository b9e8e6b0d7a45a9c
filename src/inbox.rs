//! Hardcoded demo inbox so the session driver runs with no backend.

use crate::conversation::{ConversationContext, ConversationMessage, MessageSender};
use crate::turn::now_ms;

/// The demo conversations, in inbox order.
#[must_use]
pub fn sample_inbox() -> Vec<ConversationContext> {
    let now = now_ms().unwrap_or_default();
    let at = |secs_ago: u64| now.saturating_sub(secs_ago * 1000);
    let seen = |mut m: ConversationMessage| {
        m.seen = true;
        m
    };

    vec![
        ConversationContext::new(
            "Luis · Github",
            vec![
                ConversationMessage::new(
                    1,
                    MessageSender::User,
                    "I bought a product from your store in November as a Christmas gift for a member of my \
                     family. However, it turns out they have something very similar already. I was hoping \
                     you'd be able to refund me, as it is un-opened.",
                    at(60),
                ),
                seen(ConversationMessage::new(
                    2,
                    MessageSender::Agent,
                    "Let me just look into this for you, Luis.",
                    at(45),
                )),
            ],
        ),
        ConversationContext::new(
            "Ivan · Nike",
            vec![
                ConversationMessage::new(
                    1,
                    MessageSender::User,
                    "Hi there, I have a question about my recent order. The shoes I received are a different \
                     color than what I ordered.",
                    at(30),
                ),
                seen(ConversationMessage::new(
                    2,
                    MessageSender::Agent,
                    "I'm sorry to hear about that, Ivan. Let me check your order details and we'll get this \
                     sorted out for you right away.",
                    at(25),
                )),
            ],
        ),
        ConversationContext::new(
            "Lead from New York",
            vec![
                ConversationMessage::new(
                    1,
                    MessageSender::User,
                    "Good morning, let me know if you have any enterprise packages available for our company.",
                    at(40),
                ),
                seen(ConversationMessage::new(
                    2,
                    MessageSender::Agent,
                    "Good morning! Yes, we do have several enterprise solutions. I'd be happy to discuss the \
                     options that would work best for your company size and needs.",
                    at(35),
                )),
            ],
        ),
        ConversationContext::new(
            "Miracle · Exemplary Bank",
            vec![
                ConversationMessage::new(
                    1,
                    MessageSender::User,
                    "Hey there, I'm here to discuss integrating your payment solution with our banking \
                     platform. We're looking for a secure and compliant API.",
                    at(50),
                ),
                seen(ConversationMessage::new(
                    2,
                    MessageSender::Agent,
                    "Hello Miracle! That sounds like an exciting opportunity. Our payment API is fully PCI \
                     compliant and designed specifically for financial institutions. Let me connect you with \
                     our enterprise integration specialist.",
                    at(45),
                )),
            ],
        ),
    ]
}
