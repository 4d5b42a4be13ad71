//! Terminal rendering of the page panels.

use forecast_core::{Element, View};

/// The whole page as markup or as plain text.
pub fn format_view(view: &View, html: bool) -> String {
    if html {
        return view.to_html();
    }

    let mut sections = Vec::new();
    if !view.today().is_empty() {
        sections.push(today_text(view.today()));
    }
    if !view.forecast().is_empty() {
        sections.push(forecast_text(view.forecast()));
    }
    sections.push(history_text(view.history()));

    sections.join("\n\n")
}

fn today_text(today: &Element) -> String {
    let mut lines = Vec::new();
    for child in today.children() {
        let mut line = child.own_text().unwrap_or_default().to_string();
        // The heading carries the weather icon; show its description instead.
        if let Some(alt) = child.children().iter().find_map(|c| c.get_attr("alt")) {
            line.push_str(&format!("  [{alt}]"));
        }
        lines.push(line);
    }
    lines.join("\n")
}

fn forecast_text(forecast: &Element) -> String {
    let mut lines = Vec::new();
    for child in forecast.children() {
        let cards = child.query_class("card-body");
        match cards.first() {
            Some(body) => lines.push(format!("  {}", card_line(body))),
            None => lines.push(child.text_content()),
        }
    }
    lines.join("\n")
}

fn card_line(body: &Element) -> String {
    body.children()
        .iter()
        .filter_map(|part| match part.get_attr("alt") {
            Some(alt) => Some(format!("[{alt}]")),
            None => part.own_text().map(str::to_string),
        })
        .collect::<Vec<_>>()
        .join("  ")
}

fn history_text(history: &Element) -> String {
    let mut lines = vec!["Search history:".to_string()];

    let buttons = history.query_class("history-btn");
    if buttons.is_empty() {
        let placeholder = history.text_content();
        if !placeholder.is_empty() {
            lines.push(format!("  {placeholder}"));
        }
    } else {
        lines.extend(buttons.iter().map(|b| format!("  - {}", b.text_content())));
    }

    lines.join("\n")
}
