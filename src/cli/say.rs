//! TUI-less "say" command

use std::error::Error;
use std::io::{self, Write};
use std::time::Duration;

use tracing::warn;

use crate::cli::ResolvedSettings;
use crate::core::completion::{build_request, request_completion};
use crate::core::constants::TYPING_TICK;

pub async fn run_say(prompt: &[String], settings: &ResolvedSettings) -> Result<(), Box<dyn Error>> {
    let prompt = prompt.join(" ");
    if prompt.trim().is_empty() {
        eprintln!("Usage: cutie say <prompt>");
        std::process::exit(1);
    }

    let client = reqwest::Client::new();
    let request = build_request(&settings.model, &[], &prompt);

    match request_completion(&client, &settings.base_url, &settings.api_key, &request).await {
        Ok(reply) => {
            let mut stdout = io::stdout();
            type_out(&mut stdout, &reply, TYPING_TICK).await?;
            Ok(())
        }
        Err(err) => {
            warn!(%err, "say request failed");
            eprintln!("❌ Error: {err}");
            std::process::exit(1);
        }
    }
}

/// Write `text` one character per `tick`, then a newline.
pub async fn type_out<W: Write>(out: &mut W, text: &str, tick: Duration) -> io::Result<()> {
    for ch in text.chars() {
        write!(out, "{ch}")?;
        out.flush()?;
        if !tick.is_zero() {
            tokio::time::sleep(tick).await;
        }
    }
    writeln!(out)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn type_out_writes_every_character_then_newline() {
        let mut out = Vec::new();
        type_out(&mut out, "nope, é", Duration::ZERO)
            .await
            .expect("write");
        assert_eq!(String::from_utf8(out).expect("utf8"), "nope, é\n");
    }
}
