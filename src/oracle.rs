/// Host capability answering per-quest completion for the current player.
///
/// Implementations must be infallible: when no player session is available
/// they return `false` instead of failing. Answers are volatile — the same
/// id may flip between calls as the player progresses — so callers consult
/// the oracle per candidate on every query and never cache results.
pub trait CompletionOracle {
    fn is_complete(&self, quest_id: u32) -> bool;
}

impl<T: CompletionOracle + ?Sized> CompletionOracle for &T {
    fn is_complete(&self, quest_id: u32) -> bool {
        (**self).is_complete(quest_id)
    }
}

/// The logged-out oracle: reports nothing as complete.
#[derive(Debug, Clone, Copy, Default)]
pub struct Disconnected;

impl CompletionOracle for Disconnected {
    fn is_complete(&self, _quest_id: u32) -> bool {
        false
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::CompletionOracle;
    use std::collections::HashSet;

    /// Fixed-answer oracle for unit tests.
    pub struct StubOracle {
        complete: HashSet<u32>,
    }

    impl StubOracle {
        pub fn with(ids: impl IntoIterator<Item = u32>) -> Self {
            Self {
                complete: ids.into_iter().collect(),
            }
        }

        pub fn empty() -> Self {
            Self::with([])
        }
    }

    impl CompletionOracle for StubOracle {
        fn is_complete(&self, quest_id: u32) -> bool {
            self.complete.contains(&quest_id)
        }
    }
}
