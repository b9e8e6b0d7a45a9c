//! Canned response catalog — the deterministic fallback answer path.
//!
//! DESIGN
//! ======
//! An explicit ordered rule table of (predicate, builder) pairs evaluated
//! first-match-wins over the lowercased question. The ordering is load
//! bearing: a question containing both "refund" and "password" must take
//! the refund template, so later rules are intentionally unreachable when
//! an earlier one matches. The final rule matches everything, which makes
//! `answer` total — it always returns a string and never fails.

use std::fmt::Write;

use rand::Rng;

use crate::conversation::{ConversationContext, Sentiment};

/// Inputs shared by every template builder.
struct CatalogInput<'a> {
    /// Original question text, used verbatim by the generic template.
    question: &'a str,
    /// Lowercased question the predicates match against.
    lowered: &'a str,
    /// Customer display name, `"the customer"` when unknown.
    customer_name: &'a str,
    sentiment: Sentiment,
}

struct Rule {
    matches: fn(&str) -> bool,
    build: fn(&CatalogInput<'_>) -> String,
}

/// Priority-ordered dispatch table. First match wins.
static RULES: &[Rule] = &[
    Rule { matches: matches_refund, build: build_refund },
    Rule { matches: matches_account_creation, build: build_account_creation },
    Rule { matches: matches_template_request, build: build_template_skeleton },
    Rule { matches: matches_password, build: build_password_reset },
    Rule { matches: matches_billing, build: build_billing },
    Rule { matches: matches_shipping, build: build_shipping },
    Rule { matches: matches_technical, build: build_technical },
    Rule { matches: |_| true, build: build_general },
];

/// Answer a free-text question from the canned catalog. Deterministic for
/// a given question and context, except for the display-flavor numbers in
/// the generic fallback.
#[must_use]
pub fn answer(question: &str, context: &ConversationContext) -> String {
    let lowered = question.to_lowercase();
    let input = CatalogInput {
        question,
        lowered: &lowered,
        customer_name: context.customer_name().unwrap_or("the customer"),
        sentiment: context.sentiment(),
    };
    for rule in RULES {
        if (rule.matches)(input.lowered) {
            return (rule.build)(&input);
        }
    }
    // The catch-all rule makes this unreachable; kept so the signature
    // stays total if the table is ever edited.
    build_general(&input)
}

// =============================================================================
// PREDICATES
// =============================================================================

fn matches_refund(q: &str) -> bool {
    q.contains("refund") || q.contains("return")
}

fn matches_account_creation(q: &str) -> bool {
    q.contains("create") && q.contains("account")
}

fn matches_template_request(q: &str) -> bool {
    q.contains("generate") || q.contains("template") || q.contains("response")
}

fn matches_password(q: &str) -> bool {
    q.contains("password") || q.contains("login") || q.contains("forgot")
}

fn matches_billing(q: &str) -> bool {
    q.contains("billing") || q.contains("payment") || q.contains("charge")
}

fn matches_shipping(q: &str) -> bool {
    q.contains("shipping") || q.contains("delivery") || q.contains("track")
}

fn matches_technical(q: &str) -> bool {
    q.contains("bug") || q.contains("error") || q.contains("not working")
}

// =============================================================================
// TEMPLATES
// =============================================================================

/// Empathy clause prefixed to the refund template for frustrated customers.
pub const EMPATHY_CLAUSE: &str =
    "I completely understand your frustration, and I sincerely apologize for any inconvenience this has caused. ";

const REFUND_BODY: &str = "\
We understand that sometimes a purchase may not meet your expectations, and you may need to request a refund.

To assist you with your refund request, could you please provide your order ID and proof of purchase.

Please note:
We can only refund orders placed within the last 60 days, and your item must meet our requirements for condition to be returned. Please check when you placed your order before proceeding.

Once I've checked these details, if everything looks OK, I will send a returns QR code which you can use to post the item back to us. Your refund will be automatically issued once you put it in the post.

**Quick Actions:**
• Check order eligibility ✓
• Generate return label ✓
• Send confirmation email ✓";

fn build_refund(input: &CatalogInput<'_>) -> String {
    let empathy = match input.sentiment {
        Sentiment::Frustrated => EMPATHY_CLAUSE,
        Sentiment::Neutral => "",
    };
    format!("{empathy}{REFUND_BODY}")
}

fn build_account_creation(input: &CatalogInput<'_>) -> String {
    format!(
        "I'd be happy to help {} create an account!

Here's how to get started:
1. Visit our website and click on \"Sign Up\" in the top right corner
2. Enter your email address and create a secure password
3. Fill in your personal details (name and phone number)
4. Check your email for a verification link
5. Click the link to activate your account

**Benefits of creating an account:**
• Track orders in real-time
• Save favorite products
• Faster checkout
• Exclusive member offers

Once your account is created, you'll be able to track orders, save your preferences, and enjoy faster checkout. Would you like me to guide you through any specific step?",
        input.customer_name
    )
}

fn build_template_skeleton(input: &CatalogInput<'_>) -> String {
    let opener = match input.sentiment {
        Sentiment::Frustrated => "I understand your concerns and I'm here to help resolve this immediately.",
        Sentiment::Neutral => "I'd be happy to assist you with this.",
    };
    format!(
        "Based on the conversation, here's a professional response template:

\"Hi {},

Thank you for reaching out to us. {opener}

[Personalize based on their specific issue]

Next steps:
1. [First action item]
2. [Second action item]
3. [Timeline expectation]

Is there anything else I can help you with today?

Best regards,
[Your name]\"

**Tone suggestions:**
• Empathetic and understanding
• Solution-focused
• Clear on next steps",
        input.customer_name
    )
}

fn build_password_reset(_input: &CatalogInput<'_>) -> String {
    "I understand you're having trouble accessing your account. Let me help you reset your password.

To reset your password:
1. Go to our login page and click \"Forgot Password?\"
2. Enter the email address associated with your account
3. Check your email for a password reset link (it should arrive within 5 minutes)
4. Click the link and create a new password

If you don't receive the email, please check your spam folder. If you're still having issues, I can help verify your identity and manually reset your password for you."
        .to_string()
}

fn build_billing(_input: &CatalogInput<'_>) -> String {
    "I'll be happy to help you with your billing inquiry.

To better assist you, could you please let me know:
- The specific charge or billing issue you're experiencing
- The date and amount of the charge in question
- The email address associated with your account

Once I have this information, I can review your payment history and help resolve any billing concerns you may have."
        .to_string()
}

fn build_shipping(_input: &CatalogInput<'_>) -> String {
    "I can definitely help you track your order!

To track your shipment:
- If you have your order confirmation email, you'll find the tracking number there
- You can also log into your account and view your order history
- Standard shipping typically takes 3-7 business days

Could you please provide your order number or the email address used for the purchase? I'll look up the current status of your delivery right away."
        .to_string()
}

fn build_technical(_input: &CatalogInput<'_>) -> String {
    "I'm sorry to hear you're experiencing technical difficulties. Let me help troubleshoot this issue.

To better assist you:
1. Could you describe exactly what error message or issue you're seeing?
2. What device and browser are you using?
3. When did this issue first start occurring?

In the meantime, you can try:
- Clearing your browser cache and cookies
- Trying a different browser or incognito/private mode
- Checking if you have any browser extensions that might interfere

I'll make sure we get this resolved for you quickly."
        .to_string()
}

fn build_general(input: &CatalogInput<'_>) -> String {
    let mut rng = rand::rng();
    let kb_id: u32 = rng.random_range(1000..=9999);
    let similar_cases: u32 = rng.random_range(10..=59);
    let resolution_hours: u32 = rng.random_range(1..=24);

    let mut out = String::new();
    let _ = write!(
        out,
        "Thank you for your question about \"{}\".

Based on the current conversation with {}, here are my recommendations:

**Immediate Actions:**
1. Acknowledge their concern
2. Gather any missing information
3. Provide clear next steps

**Suggested Response Framework:**
• Opening: Acknowledge and empathize
• Middle: Explain the solution/process
• Closing: Set expectations and offer further help

**Resources:**
• Knowledge base article: #KB-{kb_id}
• Similar cases: {similar_cases} resolved this week
• Average resolution time: {resolution_hours} hours

Would you like me to generate a specific response template?",
        input.question, input.customer_name
    );
    out
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
