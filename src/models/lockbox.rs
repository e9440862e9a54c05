use serde::Serialize;

#[derive(Debug, Clone, PartialEq)]
pub struct Lockbox {
    pub id: &'static str,
    pub name: &'static str,
    words: &'static [&'static str],
}

pub static LOCKBOXES: [Lockbox; 3] = [
    Lockbox {
        id: "a7b3c9d2",
        name: "Lockbox 1",
        words: &["will", "from", "yields", "are"],
    },
    Lockbox {
        id: "e5f1g8h4",
        name: "Lockbox 2",
        words: &["all", "establishes", "be", "former"],
    },
    Lockbox {
        id: "k2m6n9p3",
        name: "Lockbox 3",
        words: &["called", "the", "travel"],
    },
];

/// What a visitor is allowed to see about a lockbox. Never includes the words.
#[derive(Debug, Serialize)]
pub struct LockboxInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub word_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnlockResult {
    Success,
    Failure,
}

pub fn find_lockbox(id: &str) -> Option<&'static Lockbox> {
    LOCKBOXES.iter().find(|lockbox| lockbox.id == id)
}

impl Lockbox {
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn info(&self) -> LockboxInfo {
        LockboxInfo {
            id: self.id,
            name: self.name,
            word_count: self.word_count(),
        }
    }

    /// Order does not matter, but the number of non-blank entries must match
    /// exactly and every secret word must be among them.
    pub fn unlocks<S: AsRef<str>>(&self, entered: &[S]) -> bool {
        let entered: Vec<String> = entered
            .iter()
            .map(|word| word.as_ref().trim().to_lowercase())
            .filter(|word| !word.is_empty())
            .collect();

        entered.len() == self.words.len()
            && self
                .words
                .iter()
                .all(|word| entered.iter().any(|e| e == &word.to_lowercase()))
    }

    pub fn check<S: AsRef<str>>(&self, entered: &[S]) -> UnlockResult {
        if self.unlocks(entered) {
            UnlockResult::Success
        } else {
            UnlockResult::Failure
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lockbox(id: &str) -> &'static Lockbox {
        find_lockbox(id).expect("known lockbox")
    }

    #[test]
    fn unlocks_in_any_order_and_ignores_case_and_padding() {
        let lb = lockbox("a7b3c9d2");
        assert!(lb.unlocks(&["will", "from", "yields", "are"]));
        assert!(lb.unlocks(&["are", "yields", "will", "from"]));
        assert!(lb.unlocks(&[" ARE ", "Yields", "wiLL", "from\t"]));
    }

    #[test]
    fn rejects_subset_superset_and_wrong_words() {
        let lb = lockbox("k2m6n9p3");
        assert!(lb.unlocks(&["travel", "called", "the"]));

        assert!(!lb.unlocks(&["called", "the"]));
        assert!(!lb.unlocks(&["called", "the", "travel", "far"]));
        assert!(!lb.unlocks(&["called", "the", "traveled"]));
        assert!(!lb.unlocks(&["called", "called", "the"]));
    }

    #[test]
    fn blank_entries_do_not_count() {
        let lb = lockbox("k2m6n9p3");
        assert!(!lb.unlocks(&["called", "the", ""]));
        assert!(lb.unlocks(&["called", "", "the", "travel", " "]));
        assert!(!lb.unlocks::<&str>(&[]));
    }

    #[test]
    fn unknown_lockbox_is_not_found() {
        assert!(find_lockbox("zzzzzzzz").is_none());
        assert_eq!(lockbox("e5f1g8h4").info().word_count, 4);
    }

    #[test]
    fn check_maps_to_result() {
        let lb = lockbox("e5f1g8h4");
        assert_eq!(
            lb.check(&["former", "be", "establishes", "all"]),
            UnlockResult::Success
        );
        assert_eq!(lb.check(&["former", "be", "all"]), UnlockResult::Failure);
    }
}
