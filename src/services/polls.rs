// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Poll vote tallying.

use crate::models::{OptionTally, Poll, PollOption, PollResults, PollVote};
use std::collections::HashMap;

/// Minimum number of options a poll must offer.
pub const MIN_POLL_OPTIONS: usize = 2;

/// Share of `count` in `total`, in percent rounded to one decimal place.
pub fn percentage(count: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (f64::from(count) / f64::from(total) * 1000.0).round() / 10.0
}

/// Count votes per option.
///
/// Options keep their input order. Every vote counts toward the total, even
/// one whose option is no longer listed.
pub fn tally(options: &[PollOption], votes: &[PollVote]) -> (Vec<OptionTally>, u32) {
    let mut counts: HashMap<&str, u32> = HashMap::new();
    for vote in votes {
        *counts.entry(vote.poll_option_id.as_str()).or_default() += 1;
    }

    let total = u32::try_from(votes.len()).unwrap_or(u32::MAX);

    let tallies = options
        .iter()
        .map(|option| {
            let vote_count = counts.get(option.id.as_str()).copied().unwrap_or(0);
            OptionTally {
                id: option.id.clone(),
                option_text: option.option_text.clone(),
                vote_count,
                percentage: percentage(vote_count, total),
            }
        })
        .collect();

    (tallies, total)
}

/// Assemble the flat results view for a poll.
pub fn build_results(poll: Poll, options: &[PollOption], votes: &[PollVote]) -> PollResults {
    let (options, total_votes) = tally(options, votes);
    PollResults {
        id: poll.id,
        question: poll.question,
        description: poll.description,
        created_at: poll.created_at,
        closes_at: poll.closes_at,
        status: poll.status,
        author_id: poll.author_id,
        options,
        total_votes,
    }
}

/// Trim option texts and drop blank ones.
pub fn normalize_options(options: &[String]) -> Vec<String> {
    options
        .iter()
        .map(|o| o.trim())
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(id: &str, text: &str) -> PollOption {
        PollOption {
            id: id.to_string(),
            option_text: text.to_string(),
            created_at: None,
        }
    }

    fn votes(ids: &[&str]) -> Vec<PollVote> {
        ids.iter()
            .map(|id| PollVote {
                poll_option_id: id.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_percentage_rounds_to_one_decimal() {
        assert_eq!(percentage(1, 3), 33.3);
        assert_eq!(percentage(2, 3), 66.7);
        assert_eq!(percentage(1, 8), 12.5);
        assert_eq!(percentage(3, 3), 100.0);
    }

    #[test]
    fn test_percentage_with_no_votes_is_zero() {
        assert_eq!(percentage(0, 0), 0.0);
    }

    #[test]
    fn test_tally_counts_and_keeps_option_order() {
        let options = vec![option("b", "Blue"), option("a", "Amber"), option("c", "Cyan")];
        let (tallies, total) = tally(&options, &votes(&["a", "b", "a", "a"]));

        assert_eq!(total, 4);
        let ids: Vec<&str> = tallies.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
        assert_eq!(tallies[0].vote_count, 1);
        assert_eq!(tallies[0].percentage, 25.0);
        assert_eq!(tallies[1].vote_count, 3);
        assert_eq!(tallies[1].percentage, 75.0);
        assert_eq!(tallies[2].vote_count, 0);
        assert_eq!(tallies[2].percentage, 0.0);
    }

    #[test]
    fn test_votes_for_unlisted_option_count_toward_total() {
        let options = vec![option("a", "Yes")];
        let (tallies, total) = tally(&options, &votes(&["a", "gone"]));
        assert_eq!(total, 2);
        assert_eq!(tallies[0].percentage, 50.0);
    }

    #[test]
    fn test_build_results_copies_poll_fields() {
        let poll = Poll {
            id: "p1".to_string(),
            question: "Favourite colour?".to_string(),
            description: None,
            created_at: "2025-01-01T00:00:00Z".to_string(),
            closes_at: Some("2025-02-01T00:00:00Z".to_string()),
            status: "open".to_string(),
            author_id: Some("agent-1".to_string()),
        };
        let results = build_results(poll, &[option("a", "Red")], &[]);
        assert_eq!(results.id, "p1");
        assert_eq!(results.status, "open");
        assert_eq!(results.total_votes, 0);
        assert_eq!(results.options[0].percentage, 0.0);
    }

    #[test]
    fn test_normalize_options_drops_blanks() {
        let raw = vec![" Yes ".to_string(), "".to_string(), "  ".to_string(), "No".to_string()];
        assert_eq!(normalize_options(&raw), vec!["Yes", "No"]);
    }
}
