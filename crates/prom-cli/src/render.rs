//! Plain-text rendering of cards, the match overlay, notices and the
//! dashboard. Everything returns a `String` so it can be tested directly.

use std::fmt::Write;

use prom_core::{
    Candidate, DashboardSummary, DeckStatus, Gesture, MatchPresentation, Notice, NoticeLevel,
    Profile,
};

const HOBBY_PREVIEW: usize = 3;

fn socials_block(out: &mut String, profile: &Profile, indent: &str) {
    for (platform, url) in profile.socials.links() {
        let _ = writeln!(out, "{indent}{}: {url}", platform.label());
    }
}

/// The top card, with its `k/n` position and the card beneath it.
pub fn card(candidate: &Candidate, position: Option<(usize, usize)>, next: &[Candidate]) -> String {
    let profile = &candidate.profile;
    let mut out = String::new();
    if let Some((k, n)) = position {
        let _ = write!(out, "[{k}/{n}] ");
    }
    let _ = writeln!(
        out,
        "{}, {} - {}% match",
        profile.name,
        profile.grade.label(),
        candidate.compatibility_percentage.round()
    );
    if !profile.bio.is_empty() {
        let _ = writeln!(out, "  {}", profile.bio);
    }
    let (shown, more) = profile.hobby_preview(HOBBY_PREVIEW);
    if !shown.is_empty() {
        let _ = write!(out, "  Hobbies: {}", shown.join(", "));
        if more > 0 {
            let _ = write!(out, " +{more} more");
        }
        out.push('\n');
    }
    if let Some(url) = profile.picture().filter(|u| !u.starts_with("data:")) {
        let _ = writeln!(out, "  Photo: {url}");
    }
    if let Some(up_next) = next.first() {
        let _ = writeln!(out, "  Next up: {}", up_next.profile.name);
    }
    out
}

/// Heading and subtitle of an empty or finished deck.
pub fn status(status: DeckStatus) -> Option<String> {
    status
        .message()
        .map(|(heading, subtitle)| format!("{heading}\n  {subtitle}\n"))
}

/// Overlay contents while it is visible.
pub fn overlay(overlay: &MatchPresentation) -> Option<String> {
    let profile = overlay.profile()?;
    let mut out = String::new();
    let _ = writeln!(out, "*** {} ***", overlay.headline());
    let _ = writeln!(out, "You and {} liked each other!", profile.name);
    let links = profile.socials.links();
    if links.is_empty() {
        let _ = writeln!(out, "  No social links shared.");
    } else {
        socials_block(&mut out, profile, "  ");
    }
    let _ = writeln!(out, "(type `dismiss` to keep swiping)");
    Some(out)
}

/// Live badge while a card is dragged.
pub fn badge(gesture: Gesture) -> Option<&'static str> {
    match gesture {
        Gesture::Like => Some("LIKE"),
        Gesture::Pass => Some("NOPE"),
        Gesture::None => None,
    }
}

pub fn notice(notice: &Notice) -> String {
    match notice.level {
        NoticeLevel::Success => format!("✓ {}", notice.message),
        NoticeLevel::Error => format!("✗ {}", notice.message),
    }
}

pub fn dashboard(summary: &DashboardSummary) -> String {
    let stats = &summary.stats;
    let mut out = String::new();
    let _ = writeln!(out, "Total Matches:   {}", stats.total_matches);
    let _ = writeln!(out, "Super Matches:   {}", stats.super_matches);
    let _ = writeln!(out, "Regular Matches: {}", stats.regular_matches);
    out.push('\n');

    if summary.matches.is_empty() {
        let _ = writeln!(out, "No matches yet. Start swiping to find your prom date!");
        return out;
    }

    let _ = writeln!(out, "Your Matches");
    for m in &summary.matches {
        let marker = if m.is_super_match { "*" } else { "-" };
        let Some(profile) = &m.other_user else {
            let _ = writeln!(out, "{marker} (profile unavailable)");
            continue;
        };
        let _ = write!(out, "{marker} {}, {}", profile.name, profile.grade.label());
        if m.is_super_match {
            out.push_str(" SUPER MATCH");
        }
        out.push('\n');
        if !profile.bio.is_empty() {
            let _ = writeln!(out, "    {}", profile.bio);
        }
        socials_block(&mut out, profile, "    ");
    }
    out
}
