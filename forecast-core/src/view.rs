use std::collections::HashMap;

use crate::{
    Config,
    dom::{Element, NodeId},
    model::HistoryEntry,
};

/// What a history control does when clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Show the weather for the row's city again.
    Show,
    /// Remove the row's city from the history.
    Delete,
}

/// One rendered history row and the controls bound to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRow {
    pub entry: HistoryEntry,
    pub show: NodeId,
    pub delete: NodeId,
}

/// The page state the render and event layers work on.
///
/// Holds the search input, the three panels, and the mapping from
/// interactive nodes to the history entry they act on.
#[derive(Debug, Clone)]
pub struct View {
    icon_base_url: String,
    search_input: String,
    today: Element,
    forecast: Element,
    history: Element,
    rows: Vec<HistoryRow>,
    bindings: HashMap<NodeId, (Control, usize)>,
    next_node: u64,
}

impl View {
    pub fn new(config: &Config) -> Self {
        Self {
            icon_base_url: config.icon_base_url.trim_end_matches('/').to_string(),
            search_input: String::new(),
            today: Element::new("div").attr("id", "today"),
            forecast: Element::new("div").attr("id", "forecast"),
            history: Element::new("div").attr("id", "history"),
            rows: Vec::new(),
            bindings: HashMap::new(),
            next_node: 0,
        }
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn set_search_input(&mut self, value: impl Into<String>) {
        self.search_input = value.into();
    }

    pub fn clear_search_input(&mut self) {
        self.search_input.clear();
    }

    pub fn today(&self) -> &Element {
        &self.today
    }

    pub fn forecast(&self) -> &Element {
        &self.forecast
    }

    pub fn history(&self) -> &Element {
        &self.history
    }

    /// History rows in display order (most recent first).
    pub fn history_rows(&self) -> &[HistoryRow] {
        &self.rows
    }

    /// Row whose id matches `query`, or whose city name matches it ignoring case.
    pub fn find_history_row(&self, query: &str) -> Option<&HistoryRow> {
        let query = query.trim();
        self.rows
            .iter()
            .find(|row| row.entry.id == query)
            .or_else(|| self.rows.iter().find(|row| row.entry.name.eq_ignore_ascii_case(query)))
    }

    /// The control bound to `node` and the entry it acts on.
    pub fn binding(&self, node: NodeId) -> Option<(Control, &HistoryEntry)> {
        self.bindings
            .get(&node)
            .and_then(|(control, index)| self.rows.get(*index).map(|row| (*control, &row.entry)))
    }

    pub fn icon_url(&self, icon: &str) -> String {
        format!("{}/{icon}.png", self.icon_base_url)
    }

    /// Whole page as markup.
    pub fn to_html(&self) -> String {
        format!("{}{}{}", self.today, self.forecast, self.history)
    }

    pub(crate) fn today_mut(&mut self) -> &mut Element {
        &mut self.today
    }

    pub(crate) fn forecast_mut(&mut self) -> &mut Element {
        &mut self.forecast
    }

    pub(crate) fn history_mut(&mut self) -> &mut Element {
        &mut self.history
    }

    pub(crate) fn next_node(&mut self) -> NodeId {
        self.next_node += 1;
        NodeId(self.next_node)
    }

    /// Forget every row; the history panel is about to be rebuilt.
    pub(crate) fn unbind_history(&mut self) {
        self.rows.clear();
        self.bindings.clear();
    }

    pub(crate) fn bind_history_row(&mut self, row: HistoryRow) {
        let index = self.rows.len();
        self.bindings.insert(row.show, (Control::Show, index));
        self.bindings.insert(row.delete, (Control::Delete, index));
        self.rows.push(row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, name: &str) -> HistoryEntry {
        HistoryEntry { id: id.into(), name: name.into() }
    }

    #[test]
    fn new_view_has_empty_panels() {
        let view = View::new(&Config::default());

        assert!(view.today().is_empty());
        assert!(view.forecast().is_empty());
        assert!(view.history().is_empty());
        assert_eq!(view.history().get_attr("id"), Some("history"));
        assert_eq!(
            view.to_html(),
            "<div id=\"today\"></div><div id=\"forecast\"></div><div id=\"history\"></div>"
        );
    }

    #[test]
    fn icon_url_uses_configured_host() {
        let mut cfg = Config::default();
        assert_eq!(
            View::new(&cfg).icon_url("10n"),
            "https://openweathermap.org/img/w/10n.png"
        );

        cfg.set_icon_base_url("https://cdn.example.net/icons/").unwrap();
        assert_eq!(View::new(&cfg).icon_url("10n"), "https://cdn.example.net/icons/10n.png");
    }

    #[test]
    fn bindings_resolve_to_their_entry() {
        let mut view = View::new(&Config::default());
        let show = view.next_node();
        let delete = view.next_node();
        view.bind_history_row(HistoryRow { entry: entry("a1", "Lima"), show, delete });

        assert_eq!(view.binding(show), Some((Control::Show, &entry("a1", "Lima"))));
        assert_eq!(view.binding(delete), Some((Control::Delete, &entry("a1", "Lima"))));

        view.unbind_history();
        assert!(view.binding(show).is_none());
        assert!(view.history_rows().is_empty());
    }

    #[test]
    fn node_ids_are_never_reused() {
        let mut view = View::new(&Config::default());
        let first = view.next_node();
        view.unbind_history();
        assert_ne!(first, view.next_node());
    }

    #[test]
    fn find_history_row_prefers_id_then_name() {
        let mut view = View::new(&Config::default());
        for (id, name) in [("2", "Rome"), ("Rome", "Milan")] {
            let show = view.next_node();
            let delete = view.next_node();
            view.bind_history_row(HistoryRow { entry: entry(id, name), show, delete });
        }

        assert_eq!(view.find_history_row("Rome").unwrap().entry.name, "Milan");
        assert_eq!(view.find_history_row(" rome ").unwrap().entry.id, "2");
        assert!(view.find_history_row("Paris").is_none());
    }
}
