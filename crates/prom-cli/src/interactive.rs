//! Line-driven swipe deck on stdin/stdout.

use std::io::Write;

use anyhow::Result;
use prom_api::ApiClient;
use prom_core::{
    AdvanceError, AuthContext, DeckController, DeckError, DeckEvent, Notice, PREVIEW_DEPTH,
    SubmissionResult, SwipeIntent, SwipeSubmitter, hint,
};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::render;

const LOAD_PROFILES_FAILED: &str = "Error loading profiles. Please try again.";

const HELP: &str = "commands: like (l), pass (p), super (s), drag <offset> <velocity>, \
                    undo (u), dismiss, refresh (r), quit (q)";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Swipe(SwipeIntent),
    Drag { offset: f64, velocity: f64 },
    Undo,
    Dismiss,
    Refresh,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(Command::Help);
    };
    let command = match verb.to_ascii_lowercase().as_str() {
        "l" | "like" => Command::Swipe(SwipeIntent::Like),
        "p" | "pass" => Command::Swipe(SwipeIntent::Pass),
        "s" | "super" => Command::Swipe(SwipeIntent::SuperLike),
        "drag" => {
            let mut number = |name: &str| -> Result<f64, String> {
                words
                    .next()
                    .ok_or_else(|| format!("drag needs <offset> <velocity>, missing {name}"))?
                    .parse::<f64>()
                    .map_err(|e| format!("bad {name}: {e}"))
            };
            let offset = number("offset")?;
            let velocity = number("velocity")?;
            Command::Drag { offset, velocity }
        }
        "u" | "undo" => Command::Undo,
        "dismiss" | "close" => Command::Dismiss,
        "r" | "refresh" => Command::Refresh,
        "h" | "help" | "?" => Command::Help,
        "q" | "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command '{other}'")),
    };
    Ok(command)
}

fn print_event(event: &DeckEvent) {
    match event {
        DeckEvent::Notice(notice) => println!("{}", render::notice(notice)),
        other => tracing::debug!("{other:?}"),
    }
}

fn show<S: SwipeSubmitter>(deck: &DeckController<S>) {
    if let Some(overlay) = render::overlay(deck.overlay()) {
        print!("{overlay}");
    } else if let Some(current) = deck.current() {
        print!(
            "{}",
            render::card(
                current,
                deck.deck().position(),
                deck.peek_next(PREVIEW_DEPTH)
            )
        );
    } else if let Some(status) = render::status(deck.status()) {
        print!("{status}");
    }
}

fn report(result: Result<SubmissionResult, AdvanceError>) {
    match result {
        Ok(outcome) if !outcome.match_created => println!("swiped"),
        Ok(_) => {}
        Err(AdvanceError::Deck(DeckError::Exhausted)) => {
            println!("no more cards, try `refresh`");
        }
        // Already shown as a notice.
        Err(e) => tracing::warn!("{e}"),
    }
}

/// Fetch a batch of recommendations and run the deck until `quit` or EOF.
/// A failed fetch starts the deck empty so `refresh` can retry.
pub async fn run(client: ApiClient, auth: AuthContext) -> Result<()> {
    let candidates = match client.recommendations(auth.user_id()).await {
        Ok(candidates) => candidates,
        Err(e) => {
            tracing::warn!("failed to fetch recommendations: {e}");
            println!("{}", render::notice(&Notice::error(LOAD_PROFILES_FAILED)));
            Vec::new()
        }
    };
    let mut deck = DeckController::new(auth, client, candidates);
    deck.subscribe(print_event);

    println!("{HELP}");
    show(&deck);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        let _ = std::io::stdout().flush();
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        if deck.overlay().is_visible()
            && !matches!(command, Command::Dismiss | Command::Quit | Command::Help)
        {
            println!("close the match first with `dismiss`");
            continue;
        }

        match command {
            Command::Swipe(intent) => {
                report(deck.advance(intent).await);
            }
            Command::Drag { offset, velocity } => {
                if let Some(badge) = render::badge(hint(offset)) {
                    println!("[{badge}]");
                }
                match deck.release(offset, velocity).await {
                    Some(result) => report(result),
                    None => println!("card snapped back"),
                }
            }
            Command::Undo => match deck.undo() {
                Ok(_) => {}
                Err(e) => println!("{e}"),
            },
            Command::Dismiss => deck.dismiss_match(),
            Command::Refresh => {
                let user_id = deck.auth().user_id().to_string();
                match deck.submitter().recommendations(&user_id).await {
                    Ok(candidates) => deck.reload(candidates),
                    Err(e) => {
                        tracing::warn!("refresh failed: {e}");
                        println!("{}", render::notice(&Notice::error(LOAD_PROFILES_FAILED)));
                    }
                }
            }
            Command::Help => {
                println!("{HELP}");
                continue;
            }
            Command::Quit => break,
        }
        show(&deck);
    }
    Ok(())
}
