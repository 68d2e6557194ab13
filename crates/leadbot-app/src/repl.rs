//! Terminal front end: one chat session over stdin/stdout.

use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};

use leadbot_chat::{ChatError, SessionManager};
use leadbot_core::types::Message;
use leadbot_notify::Mailer;

/// Run a single session until stdin closes or the visitor types `quit`.
pub async fn run(sessions: Arc<SessionManager>, mailer: Arc<Mailer>) -> Result<(), ChatError> {
    let (session_id, greeting) = sessions.open_session()?;
    print_bot(&greeting);
    let mut options = greeting.options;

    let delay = Duration::from_millis(sessions.config().reply_delay_ms);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stdin");
                break;
            }
        };
        if matches!(line.trim(), "quit" | "exit") {
            break;
        }
        let text = resolve_quick_reply(&line, &options);

        let turn = match sessions.handle_message(&text, Some(session_id)) {
            Ok(turn) => turn,
            Err(ChatError::EmptyMessage) => continue,
            Err(e @ ChatError::MessageTooLong(_)) => {
                println!("! {}", e);
                continue;
            }
            Err(e) => return Err(e),
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        print_bot(&turn.reply);
        options = turn.reply.options;

        if let Some(notification) = turn.notification {
            mailer.dispatch_detached(notification);
        }
    }

    tracing::info!(session_id = %session_id, "Terminal session ended");
    Ok(())
}

/// A bare number picks the matching quick reply; anything else is sent as typed.
fn resolve_quick_reply(input: &str, options: &[String]) -> String {
    input
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| options.get(i))
        .cloned()
        .unwrap_or_else(|| input.to_string())
}

fn print_bot(message: &Message) {
    println!("\nbot> {}", message.content);
    for (i, option) in message.options.iter().enumerate() {
        println!("  [{}] {}", i + 1, option);
    }
    println!();
}
