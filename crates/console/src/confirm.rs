//! Interactive confirmation on stdin.

use std::io::{BufRead, Write};

use async_trait::async_trait;
use projdesk_core::confirm::{Confirmer, Decision};

/// Asks `Proceed? [y/N]` on stderr and reads the answer from stdin.
pub struct TerminalConfirmer;

#[async_trait]
impl Confirmer for TerminalConfirmer {
    async fn confirm_destroy(&self, subject: &str) -> Decision {
        let prompt =
            format!("¿Estás seguro? Se eliminará {subject}. No podrás deshacer esta acción.");
        let answer = tokio::task::spawn_blocking(move || {
            let mut stderr = std::io::stderr();
            let _ = write!(stderr, "{prompt} [y/N] ");
            let _ = stderr.flush();
            let mut input = String::new();
            std::io::stdin().lock().read_line(&mut input).map(|_| input)
        })
        .await;

        match answer {
            Ok(Ok(input)) => parse_answer(&input),
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Could not read confirmation");
                Decision::Cancelled
            }
            Err(e) => {
                tracing::warn!(error = %e, "Confirmation prompt failed");
                Decision::Cancelled
            }
        }
    }
}

/// Only an explicit yes confirms.
fn parse_answer(input: &str) -> Decision {
    let answer = input.trim();
    if answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes") {
        Decision::Confirmed
    } else {
        Decision::Cancelled
    }
}
