use tracing::{debug, warn};

use crate::collaborators::PlaceSearch;
use crate::error::LookupError;
use crate::geo::Coordinate;
use crate::models::Suggestion;

/// Text-driven place lookup state behind the search input.
///
/// Every edit bumps `generation`; suggestion results carry the generation
/// they were requested for so a slow, stale lookup cannot overwrite a newer
/// one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    value: String,
    suggestions: Vec<Suggestion>,
    highlighted: Option<usize>,
    generation: u64,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Record an edit. Returns the generation token to fetch suggestions
    /// with, or `None` when the text is blank and no lookup is needed.
    pub fn on_text_changed(&mut self, text: &str) -> Option<u64> {
        self.value = text.to_string();
        self.generation += 1;
        self.highlighted = None;
        if text.trim().is_empty() {
            self.suggestions.clear();
            return None;
        }
        Some(self.generation)
    }

    /// Store a suggestion lookup result. Stale results are dropped.
    pub fn apply_suggestions(
        &mut self,
        generation: u64,
        result: Result<Vec<Suggestion>, LookupError>,
    ) -> bool {
        if !self.is_current(generation) {
            debug!(generation, current = self.generation, "dropping stale suggestions");
            return false;
        }
        match result {
            Ok(suggestions) => self.suggestions = suggestions,
            Err(e) => {
                warn!(error = %e, query = %self.value, "suggestion lookup failed");
                self.suggestions.clear();
            }
        }
        self.highlighted = None;
        true
    }

    /// Take a suggestion: the input shows its description and the list closes.
    pub fn choose(&mut self, description: &str) {
        self.value = description.to_string();
        self.dismiss();
    }

    /// Close the list and invalidate any lookup still pending for the
    /// current text. The input keeps its value.
    pub fn dismiss(&mut self) {
        self.generation += 1;
        self.suggestions.clear();
        self.highlighted = None;
    }

    /// Move the keyboard highlight by `delta`, wrapping around the list.
    pub fn move_highlight(&mut self, delta: isize) {
        let len = self.suggestions.len() as isize;
        if len == 0 {
            self.highlighted = None;
            return;
        }
        let next = match self.highlighted {
            None if delta >= 0 => 0,
            None => len - 1,
            Some(i) => (i as isize + delta).rem_euclid(len),
        };
        self.highlighted = Some(next as usize);
    }

    /// Description of the highlighted suggestion.
    pub fn highlighted_description(&self) -> Option<&str> {
        self.highlighted
            .and_then(|i| self.suggestions.get(i))
            .map(|s| s.description.as_str())
    }
}

/// Geocode a chosen description. Failures are logged and swallowed.
pub async fn resolve_choice<P: PlaceSearch>(places: &P, description: &str) -> Option<Coordinate> {
    match places.resolve(description).await {
        Ok(coordinate) => {
            debug!(%description, %coordinate, "resolved place");
            Some(coordinate)
        }
        Err(e) => {
            warn!(error = %e, %description, "could not resolve place");
            None
        }
    }
}
