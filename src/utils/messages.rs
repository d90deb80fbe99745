//! Chat texts sent by the bot.

use crate::voting::StatsReport;

pub const POLL_QUESTION: &str = "Shall we play tonight?";

/// Option 0 is "yes", option 1 is "no"; `Vote::from_poll_option` relies on this order.
pub fn poll_options() -> Vec<String> {
    vec!["Yes".to_string(), "No, I'm chicken".to_string()]
}

/// Mentions every participant, space-separated.
pub fn mention_all(mentions: &[String]) -> String {
    mentions.join(" ")
}

pub fn reminder_text(mentions: &[String], lead: chrono::Duration) -> String {
    format!("{}\n{} left", mention_all(mentions), describe_lead(lead))
}

/// Spells out the reminder lead, e.g. "One hour", "30 minutes", "2 hours 15 minutes".
pub fn describe_lead(lead: chrono::Duration) -> String {
    let total = lead.num_minutes().max(1);
    let (hours, minutes) = (total / 60, total % 60);

    let hours_part = match hours {
        0 => None,
        1 => Some("One hour".to_string()),
        n => Some(format!("{n} hours")),
    };
    let minutes_part = match minutes {
        0 => None,
        1 => Some("1 minute".to_string()),
        n => Some(format!("{n} minutes")),
    };

    match (hours_part, minutes_part) {
        (Some(h), Some(m)) => format!("{h} {m}"),
        (Some(h), None) => h,
        (None, Some(m)) => m,
        (None, None) => "1 minute".to_string(),
    }
}

pub fn stats_text(report: &StatsReport) -> String {
    let mut text = format!(
        "Ready to play: {}\nChickened out: {}\nStill silent: {}",
        report.counts.yes, report.counts.no, report.counts.abstain
    );

    if !report.ranking.is_empty() {
        text.push_str("\n\nAll-time (yes / no / silent):");
        for (i, p) in report.ranking.iter().enumerate() {
            text.push_str(&format!(
                "\n{}. {} {} / {} / {}",
                i + 1,
                p.key(),
                p.history.yes,
                p.history.no,
                p.history.abstain
            ));
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voting::{Participant, Tally};

    #[test]
    fn test_reminder_mentions_everyone() {
        let mentions = vec!["@alice".to_string(), "@bob".to_string()];
        assert_eq!(
            reminder_text(&mentions, chrono::Duration::hours(1)),
            "@alice @bob\nOne hour left"
        );
    }

    #[test]
    fn test_reminder_follows_configured_lead() {
        let mentions = vec!["@alice".to_string()];
        assert_eq!(
            reminder_text(&mentions, chrono::Duration::minutes(30)),
            "@alice\n30 minutes left"
        );
        assert_eq!(describe_lead(chrono::Duration::minutes(135)), "2 hours 15 minutes");
        assert_eq!(describe_lead(chrono::Duration::minutes(61)), "One hour 1 minute");
        assert_eq!(describe_lead(chrono::Duration::seconds(20)), "1 minute");
    }

    #[test]
    fn test_stats_text_lists_counts_then_ranking() {
        let report = StatsReport {
            counts: Tally::new(1, 0, 1),
            ranking: vec![
                Participant::new("bob", Tally::new(5, 1, 0)),
                Participant::new("@alice", Tally::new(2, 0, 3)),
            ],
            active: true,
        };
        let text = stats_text(&report);
        assert!(text.starts_with("Ready to play: 1\nChickened out: 0\nStill silent: 1"));
        assert!(text.contains("\n1. bob 5 / 1 / 0"));
        assert!(text.contains("\n2. alice 2 / 0 / 3"));
    }
}
