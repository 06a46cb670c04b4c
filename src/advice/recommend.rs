/// Shown when the recommendation request fails.
pub const RECOMMEND_FALLBACK: &str = "Could not fetch a recommendation right now.";

/// Holistic recommendation text, refreshed on every history change.
///
/// Each refresh gets a monotonic generation number; a completion carrying
/// anything but the latest generation is discarded. In-flight requests
/// cannot be aborted, so this is what keeps a slow early response from
/// overwriting a newer one.
pub struct RecommendationFetcher {
    generation: u64,
    text: Option<String>,
    busy: bool,
}

impl RecommendationFetcher {
    pub fn new() -> Self {
        Self {
            generation: 0,
            text: None,
            busy: false,
        }
    }

    /// Start a refresh, returning the generation the eventual completion
    /// must present.
    pub fn begin_refresh(&mut self) -> u64 {
        self.generation += 1;
        self.busy = true;
        self.generation
    }

    /// Install the response for `generation`. Returns false (and changes
    /// nothing) when a newer refresh has been issued since.
    pub fn complete(&mut self, generation: u64, result: Result<String, String>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.text = Some(result.unwrap_or_else(|_| RECOMMEND_FALLBACK.to_string()));
        self.busy = false;
        true
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Drop any pending refresh and displayed text (history was cleared).
    pub fn reset(&mut self) {
        self.generation += 1;
        self.text = None;
        self.busy = false;
    }
}

impl Default for RecommendationFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_generation_wins() {
        let mut fetcher = RecommendationFetcher::new();
        let first = fetcher.begin_refresh();
        let second = fetcher.begin_refresh();

        // The older request resolves after the newer one was issued.
        assert!(!fetcher.complete(first, Ok("stale advice".to_string())));
        assert!(fetcher.text().is_none());

        assert!(fetcher.complete(second, Ok("fresh advice".to_string())));
        assert_eq!(fetcher.text(), Some("fresh advice"));
        assert!(!fetcher.is_busy());
    }

    #[test]
    fn test_failure_installs_fallback_text() {
        let mut fetcher = RecommendationFetcher::new();
        let generation = fetcher.begin_refresh();
        fetcher.complete(generation, Err("timeout".to_string()));
        assert_eq!(fetcher.text(), Some(RECOMMEND_FALLBACK));
    }

    #[test]
    fn test_reset_discards_pending_refresh() {
        let mut fetcher = RecommendationFetcher::new();
        let generation = fetcher.begin_refresh();
        fetcher.reset();
        assert!(!fetcher.complete(generation, Ok("late".to_string())));
        assert!(fetcher.text().is_none());
        assert!(!fetcher.is_busy());
    }
}
