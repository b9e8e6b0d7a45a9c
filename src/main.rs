//! Terminal session driver for the copilot pipeline.
//!
//! Stands in for the inbox UI: pick a conversation, ask questions, watch
//! the reply stream in, and manage saved responses. Blank input and
//! queries during an active reveal are rejected here, at the UI boundary,
//! exactly like the panel's disabled submit button.

use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use fincopilot::inbox::sample_inbox;
use fincopilot::orchestrator::{CopilotSession, SubmitOutcome};
use fincopilot::turn::SharedHistory;
use fincopilot::{SavedResponseStore, llm};

const RENDER_POLL_MS: u64 = 25;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let provider = llm::provider_from_env();
    let inbox = sample_inbox();
    let mut store = SavedResponseStore::from_env();
    let mut session = CopilotSession::new(inbox[0].clone(), provider)
        .with_composer(Arc::new(|text: &str| println!("\n[composer] {text}\n")));

    info!(conversations = inbox.len(), saved = store.len(), "fincopilot session ready");
    println!("Hi, I'm Fin AI Copilot. Ask me anything about this conversation.");
    print_conversations(&inbox, &session);
    print_help();

    let mut last_fin_turn: Option<u64> = None;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print_prompt(&session).await;
    while let Ok(Some(line)) = lines.next_line().await {
        let input = line.trim();
        if input.is_empty() {
            print_prompt(&session).await;
            continue;
        }

        match input {
            "/quit" => break,
            "/help" => print_help(),
            "/chats" => print_conversations(&inbox, &session),
            "/clear" => {
                session.clear_chat();
                last_fin_turn = None;
                println!("(chat cleared)");
            }
            "/saved" => print_saved(&store),
            "/save" => match last_fin_turn {
                Some(turn_id) => {
                    let history = session.history();
                    let guard = history.read().await;
                    if let Some(turn) = guard.get(turn_id) {
                        let entry = store.save(&turn.text);
                        println!("(saved #{} under {:?})", entry.id, entry.category);
                    }
                }
                None => println!("(nothing to save yet)"),
            },
            "/compose" => {
                let handed_off = match last_fin_turn {
                    Some(turn_id) => session.add_to_composer(turn_id).await,
                    None => false,
                };
                if !handed_off {
                    println!("(no finalized response to reuse)");
                }
            }
            _ if input.starts_with("/switch ") => {
                match input
                    .trim_start_matches("/switch ")
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| inbox.get(n.saturating_sub(1)))
                {
                    Some(context) => {
                        session.switch_conversation(context.clone());
                        last_fin_turn = None;
                        println!("(switched to {})", context.label);
                    }
                    None => println!("(no such conversation — see /chats)"),
                }
            }
            _ if input.starts_with("/delete ") => {
                match input.trim_start_matches("/delete ").parse::<u64>() {
                    Ok(id) if store.delete(id) => println!("(deleted #{id})"),
                    _ => println!("(no saved response with that id)"),
                }
            }
            question => {
                if session.is_revealing().await {
                    println!("(AI is responding — wait for the current answer)");
                } else {
                    last_fin_turn = ask(&session, question).await.or(last_fin_turn);
                }
            }
        }
        print_prompt(&session).await;
    }
}

/// Submit one question and render the streaming answer as it reveals.
async fn ask(session: &CopilotSession, question: &str) -> Option<u64> {
    match session.submit_query(question).await {
        SubmitOutcome::Throttled { turn_id } | SubmitOutcome::Failed { turn_id } => {
            let history = session.history();
            let guard = history.read().await;
            if let Some(turn) = guard.get(turn_id) {
                println!("\nFin: {}\n", turn.text);
            }
            None
        }
        SubmitOutcome::Accepted { turn_id, reveal } => {
            print!("\nFin: ");
            render_streaming(&session.history(), turn_id).await;
            let _ = reveal.await;
            print_turn_metadata(&session.history(), turn_id).await;
            Some(turn_id)
        }
    }
}

/// Poll the shared history and print each newly revealed suffix.
async fn render_streaming(history: &SharedHistory, turn_id: u64) {
    use std::io::Write;

    let mut printed = 0;
    loop {
        let (text, streaming) = {
            let guard = history.read().await;
            match guard.get(turn_id) {
                Some(turn) => (turn.text.clone(), turn.is_streaming),
                None => return,
            }
        };
        if text.len() > printed {
            print!("{}", &text[printed..]);
            let _ = std::io::stdout().flush();
            printed = text.len();
        }
        if !streaming {
            break;
        }
        tokio::time::sleep(Duration::from_millis(RENDER_POLL_MS)).await;
    }
    println!("\n");
}

async fn print_turn_metadata(history: &SharedHistory, turn_id: u64) {
    let guard = history.read().await;
    let Some(turn) = guard.get(turn_id) else {
        return;
    };
    if let Some(metrics) = turn.metrics {
        println!(
            "  confidence {}% · {} similar cases · ~{} min avg resolution",
            metrics.confidence, metrics.relevant_cases, metrics.avg_resolution_time_mins
        );
    }
    if !turn.sources.is_empty() {
        println!("  {} relevant sources found:", turn.sources.len());
        for source in &turn.sources {
            println!("    - {source}");
        }
    }
    println!();
}

fn print_conversations(inbox: &[fincopilot::ConversationContext], session: &CopilotSession) {
    println!("\nConversations:");
    for (i, conversation) in inbox.iter().enumerate() {
        let marker = if conversation.label == session.context().label { "*" } else { " " };
        println!("  {marker} {}. {}", i + 1, conversation.label);
    }
    println!();
}

fn print_saved(store: &SavedResponseStore) {
    if store.is_empty() {
        println!("(no saved responses)");
        return;
    }
    println!("Saved responses ({}):", store.len());
    for entry in store.list() {
        let preview: String = entry.text.chars().take(60).collect();
        println!("  #{} [{:?}] {preview}…", entry.id, entry.category);
    }
}

fn print_help() {
    println!(
        "Commands: /chats, /switch N, /clear, /save, /saved, /delete N, /compose, /help, /quit.\n\
         Anything else is sent to the copilot."
    );
}

/// Surface suggested questions only while the chat is still empty, the
/// way the panel shows its starter chips.
async fn print_prompt(session: &CopilotSession) {
    let history = session.history();
    if !history.read().await.is_empty() {
        return;
    }
    let suggestions = session.context().suggested_questions();
    println!("Suggested: {}", suggestions.join(" | "));
}
