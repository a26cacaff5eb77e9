//! Interactive read-eval-print loop over [`Agent::handle`].

use std::io::{self, BufRead, Write};

use anyhow::Context;
use weather_agent_core::{Agent, Conversation};

/// Chat on the terminal until `exit` or end of input.
pub async fn run(agent: &Agent) -> anyhow::Result<()> {
    let stdin = io::stdin();
    run_with(agent, stdin.lock(), io::stdout()).await?;
    Ok(())
}

/// Drives the loop over arbitrary input and output. Returns the session transcript.
pub async fn run_with(
    agent: &Agent,
    input: impl BufRead,
    mut out: impl Write,
) -> anyhow::Result<Conversation> {
    writeln!(out, "Agent is running.")?;
    writeln!(out, "Ask about current weather or forecast. Type 'history' to review, 'exit' to quit.")?;
    writeln!(out, "Questions without a recognisable city use {}.\n", agent.default_city())?;

    let mut conversation = Conversation::new();
    let mut lines = input.lines();

    loop {
        write!(out, "You: ")?;
        out.flush().context("Failed to flush output")?;

        let Some(line) = lines.next() else {
            writeln!(out)?;
            break;
        };
        let line = line.context("Failed to read input")?;
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("exit") {
            writeln!(out, "Agent: Goodbye!")?;
            break;
        }

        if line.eq_ignore_ascii_case("history") {
            for turn in conversation.turns() {
                writeln!(out, "  {turn}")?;
            }
            writeln!(out)?;
            continue;
        }

        let reply = agent.handle(line).await;
        writeln!(out, "Agent: {reply}\n")?;
        conversation.record_exchange(line, &reply);
    }

    Ok(conversation)
}
