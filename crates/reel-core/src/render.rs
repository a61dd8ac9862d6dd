use crate::view::ViewState;

/// A watchlist membership change on a record that is already on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleUpdate {
    pub id: String,
    pub in_watchlist: bool,
    /// Accessible label for the toggle after the change.
    pub label: &'static str,
    pub count_label: String,
}

/// Where view state ends up. Implemented by the terminal client and by test doubles.
pub trait RenderSink {
    /// Draw the whole state. Called after every screen-level transition.
    fn render(&mut self, state: &ViewState);

    /// Update one toggle in place without redrawing the screen.
    fn toggle_changed(&mut self, update: &ToggleUpdate);
}
