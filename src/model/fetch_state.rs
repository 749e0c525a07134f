//! Request lifecycle of a single remote view

/// Where a view's last request stands
#[derive(Clone, Debug, PartialEq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    /// Diagnostic text for the failure
    Error(String),
}

/// Status, payload and the query that produced them
#[derive(Clone, Debug)]
pub struct FetchState<T> {
    pub status: FetchStatus,
    /// Last successful payload. Kept while a newer request is loading or failed.
    pub data: Option<T>,
    pub query: String,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            status: FetchStatus::Idle,
            data: None,
            query: String::new(),
        }
    }
}

impl<T> FetchState<T> {
    pub fn begin(&mut self, query: &str) {
        self.status = FetchStatus::Loading;
        self.query = query.to_string();
    }

    pub fn succeed(&mut self, data: T) {
        self.status = FetchStatus::Ready;
        self.data = Some(data);
    }

    pub fn fail(&mut self, diagnostic: String) {
        self.status = FetchStatus::Error(diagnostic);
    }
}

/// What a renderer gets for one view: the raw input plus the fetch state
#[derive(Clone, Debug)]
pub struct ViewSnapshot<T> {
    pub input: String,
    pub state: FetchState<T>,
}

impl<T> Default for ViewSnapshot<T> {
    fn default() -> Self {
        Self {
            input: String::new(),
            state: FetchState::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions() {
        let mut state: FetchState<u32> = FetchState::default();
        assert_eq!(state.status, FetchStatus::Idle);

        state.begin("btc");
        assert_eq!(state.status, FetchStatus::Loading);
        assert_eq!(state.query, "btc");

        state.succeed(7);
        assert_eq!(state.status, FetchStatus::Ready);
        assert_eq!(state.data, Some(7));
    }

    #[test]
    fn test_failure_keeps_previous_data() {
        let mut state = FetchState::default();
        state.begin("octocat");
        state.succeed("profile");
        state.begin("nobody");
        state.fail("404 Not Found".to_string());

        assert_eq!(state.status, FetchStatus::Error("404 Not Found".to_string()));
        assert_eq!(state.data, Some("profile"));
    }
}
