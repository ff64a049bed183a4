use itertools::Itertools;

/// One contributor on the board. `score` is whichever metric the list is
/// ranked by; the caller decides what it means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub username: String,
    pub avatar_url: Option<String>,
    pub score: i64,
}

/// Bounded ranked list. Keeps the `capacity` highest-scoring entries,
/// one per username.
#[derive(Debug, Clone, Copy)]
pub struct RankedList {
    capacity: usize,
}

impl RankedList {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Folds one incoming entry into the current standings: an existing
    /// username has its score overwritten in place, a new one is appended.
    /// The list is then re-ranked and truncated, evicting anything past
    /// `capacity`. The sort is stable, so ties keep their insertion order.
    pub fn apply(&self, standings: &mut Vec<Entry>, incoming: Entry) {
        match standings
            .iter()
            .find_position(|entry| entry.username == incoming.username)
        {
            Some((index, _)) => standings[index].score = incoming.score,
            None => standings.push(incoming),
        }

        standings.sort_by(|a, b| b.score.cmp(&a.score));
        standings.truncate(self.capacity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(username: &str, score: i64) -> Entry {
        Entry {
            username: username.to_string(),
            avatar_url: Some(format!("https://github.com/{username}.png")),
            score,
        }
    }

    fn usernames(standings: &[Entry]) -> Vec<&str> {
        standings
            .iter()
            .map(|entry| entry.username.as_str())
            .collect()
    }

    #[test]
    fn keeps_top_five_sorted_and_evicts_lowest() {
        let list = RankedList::new(5);
        let mut standings = Vec::new();

        for (name, score) in [
            ("a", 30),
            ("b", 10),
            ("c", 50),
            ("d", 20),
            ("e", 40),
            ("f", 60),
        ] {
            list.apply(&mut standings, entry(name, score));
        }

        assert_eq!(standings.len(), 5);
        assert_eq!(usernames(&standings), vec!["f", "c", "e", "a", "d"]);
        // "b" had the lowest score and was evicted.
        assert!(standings.iter().all(|e| e.username != "b"));
    }

    #[test]
    fn updating_existing_username_never_duplicates() {
        let list = RankedList::new(5);
        let mut standings = Vec::new();

        list.apply(&mut standings, entry("a", 10));
        list.apply(&mut standings, entry("b", 20));
        list.apply(&mut standings, entry("a", 30));

        assert_eq!(standings.len(), 2);
        assert_eq!(usernames(&standings), vec!["a", "b"]);
        assert_eq!(standings[0].score, 30);
    }

    #[test]
    fn score_update_leaves_avatar_untouched() {
        let list = RankedList::new(5);
        let mut standings = vec![entry("a", 10)];

        list.apply(
            &mut standings,
            Entry {
                username: "a".to_string(),
                avatar_url: None,
                score: 15,
            },
        );

        assert_eq!(standings[0].score, 15);
        assert_eq!(
            standings[0].avatar_url.as_deref(),
            Some("https://github.com/a.png")
        );
    }

    #[test]
    fn ties_keep_insertion_order() {
        let list = RankedList::new(5);
        let mut standings = Vec::new();

        list.apply(&mut standings, entry("first", 10));
        list.apply(&mut standings, entry("second", 10));
        list.apply(&mut standings, entry("third", 10));

        assert_eq!(usernames(&standings), vec!["first", "second", "third"]);
    }

    #[test]
    fn honors_configured_capacity() {
        let list = RankedList::new(2);
        let mut standings = Vec::new();

        for (name, score) in [("a", 1), ("b", 2), ("c", 3)] {
            list.apply(&mut standings, entry(name, score));
        }

        assert_eq!(usernames(&standings), vec!["c", "b"]);

        // A top-1 list is two-slot "best of" behavior for a single metric.
        let best_of = RankedList::new(1);
        let mut slot = Vec::new();
        best_of.apply(&mut slot, entry("x", 100));
        best_of.apply(&mut slot, entry("y", 50));
        assert_eq!(usernames(&slot), vec!["x"]);
        best_of.apply(&mut slot, entry("z", 150));
        assert_eq!(usernames(&slot), vec!["z"]);
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let list = RankedList::new(0);
        let mut standings = Vec::new();
        list.apply(&mut standings, entry("a", 1));
        assert_eq!(standings.len(), 1);
    }
}
