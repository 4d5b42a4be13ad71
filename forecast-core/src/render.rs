//! Turns backend payloads into panel content.
//!
//! Every function here rebuilds its panel from scratch: the container is
//! cleared before new content goes in.

use tracing::{debug, error};

use crate::{
    dom::Element,
    model::{HistoryEntry, HistoryResponse, WeatherRecord},
    view::{HistoryRow, View},
};

pub const FORECAST_HEADING: &str = "5-Day Forecast:";
pub const EMPTY_HISTORY_MESSAGE: &str = "No Previous Search History";

/// Fill the "today" panel with the current conditions.
pub fn render_current_weather(view: &mut View, record: &WeatherRecord) {
    let icon = Element::new("img")
        .attr("id", "weather-img")
        .attr("src", view.icon_url(&record.icon))
        .attr("alt", record.icon_description.as_str())
        .class("weather-img");

    let heading = Element::new("h2")
        .attr("id", "search-title")
        .text(format!("{} ({})", record.city, record.date))
        .child(icon);

    let temp = Element::new("p")
        .attr("id", "temp")
        .text(format!("Temp: {}°F", reading(record.temp_f)));
    let wind = Element::new("p").attr("id", "wind").text(wind_text(record));
    let humidity = Element::new("p").attr("id", "humidity").text(humidity_text(record));

    let today = view.today_mut();
    today.clear();
    today.append(heading);
    today.append(temp);
    today.append(wind);
    today.append(humidity);
}

/// Replace the forecast panel with a heading and one card per record.
pub fn render_forecast(view: &mut View, records: &[WeatherRecord]) {
    let heading_col = Element::new("div")
        .class("col-12")
        .child(Element::new("h4").text(FORECAST_HEADING));

    let forecast = view.forecast_mut();
    forecast.clear();
    forecast.append(heading_col);

    for record in records {
        render_forecast_card(view, record);
    }
}

/// Build a single forecast card and append it to the forecast panel.
pub fn render_forecast_card(view: &mut View, record: &WeatherRecord) {
    let card = forecast_card(view, record);
    view.forecast_mut().append(card);
}

fn forecast_card(view: &View, record: &WeatherRecord) -> Element {
    let body = Element::new("div")
        .classes(&["card-body", "p-2"])
        .child(Element::new("h5").class("card-title").text(record.date.as_str()))
        .child(
            Element::new("img")
                .attr("src", view.icon_url(&record.icon))
                .attr("alt", record.icon_description.as_str()),
        )
        .child(card_text(format!("Temp: {} °F", reading(record.temp_f))))
        .child(card_text(wind_text(record)))
        .child(card_text(humidity_text(record)));

    let card = Element::new("div")
        .classes(&["forecast-card", "card", "text-white", "bg-primary", "h-100"])
        .child(body);

    Element::new("div").class("col-auto").child(card)
}

fn card_text(text: String) -> Element {
    Element::new("p").class("card-text").text(text)
}

fn wind_text(record: &WeatherRecord) -> String {
    format!("Wind: {} MPH", reading(record.wind_speed))
}

fn humidity_text(record: &WeatherRecord) -> String {
    format!("Humidity: {} %", reading(record.humidity))
}

/// Measurement ready for display; `-0` prints as `0`.
fn reading(value: f64) -> f64 {
    if value == 0.0 { 0.0 } else { value }
}

/// Decode the history body and rebuild the history panel, newest first.
///
/// A body that does not decode is logged and the panel is left as it was.
pub fn render_search_history(view: &mut View, response: &HistoryResponse) {
    let history = match response.json() {
        Ok(history) => history,
        Err(err) => {
            error!(error = %err, "Error rendering search history");
            return;
        }
    };

    view.history_mut().clear();
    view.unbind_history();

    if history.is_empty() {
        view.history_mut()
            .append(Element::new("p").class("text-center").text(EMPTY_HISTORY_MESSAGE));
        return;
    }

    debug!(entries = history.len(), "rendering search history");
    for entry in history.into_iter().rev() {
        let item = build_history_list_item(view, entry);
        view.history_mut().append(item);
    }
}

/// A history row: a button re-running the search and a delete button, both
/// bound to `entry` in the view.
fn build_history_list_item(view: &mut View, entry: HistoryEntry) -> Element {
    let show = view.next_node();
    let delete = view.next_node();

    let history_btn = Element::new("button")
        .with_node(show)
        .attr("type", "button")
        .attr("aria-controls", "today forecast")
        .classes(&["history-btn", "btn", "btn-secondary", "col-10"])
        .text(entry.name.as_str());

    let delete_btn = Element::new("button")
        .with_node(delete)
        .attr("type", "button")
        .classes(&["fas", "fa-trash-alt", "delete-city", "btn", "btn-danger", "col-2"]);

    view.bind_history_row(HistoryRow { entry, show, delete });

    Element::new("div")
        .classes(&["display-flex", "gap-2", "col-12", "m-1"])
        .child(history_btn)
        .child(delete_btn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Config, view::Control};

    fn record(city: &str, date: &str, temp_f: f64) -> WeatherRecord {
        WeatherRecord {
            city: city.into(),
            date: date.into(),
            icon: "04d".into(),
            icon_description: "broken clouds".into(),
            temp_f,
            wind_speed: 7.5,
            humidity: 62.0,
        }
    }

    fn history_body(names: &[(&str, &str)]) -> HistoryResponse {
        let entries: Vec<HistoryEntry> = names
            .iter()
            .map(|(id, name)| HistoryEntry { id: (*id).into(), name: (*name).into() })
            .collect();
        HistoryResponse::new(serde_json::to_string(&entries).unwrap())
    }

    fn row_names(view: &View) -> Vec<String> {
        view.history()
            .query_class("history-btn")
            .into_iter()
            .map(Element::text_content)
            .collect()
    }

    #[test]
    fn current_weather_fills_today_panel() {
        let mut view = View::new(&Config::default());
        render_current_weather(&mut view, &record("Denver", "10/16/2026", 55.0));

        let today = view.today();
        assert_eq!(today.children().len(), 4);

        let heading = &today.children()[0];
        assert_eq!(heading.own_text(), Some("Denver (10/16/2026)"));
        let icon = &heading.children()[0];
        assert_eq!(icon.get_attr("src"), Some("https://openweathermap.org/img/w/04d.png"));
        assert_eq!(icon.get_attr("alt"), Some("broken clouds"));
        assert!(icon.has_class("weather-img"));

        assert_eq!(today.children()[1].own_text(), Some("Temp: 55°F"));
        assert_eq!(today.children()[2].own_text(), Some("Wind: 7.5 MPH"));
        assert_eq!(today.children()[3].own_text(), Some("Humidity: 62 %"));
    }

    #[test]
    fn negative_zero_readings_print_as_zero() {
        let mut view = View::new(&Config::default());
        let chilly = WeatherRecord {
            temp_f: -0.0,
            wind_speed: -0.0,
            humidity: -0.0,
            ..record("Fargo", "10/16/2026", 0.0)
        };
        render_current_weather(&mut view, &chilly);
        render_forecast(&mut view, &[chilly.clone()]);

        assert_eq!(view.today().children()[1].own_text(), Some("Temp: 0°F"));
        assert_eq!(view.today().children()[2].own_text(), Some("Wind: 0 MPH"));
        assert_eq!(view.today().children()[3].own_text(), Some("Humidity: 0 %"));

        let texts: Vec<String> = view
            .forecast()
            .query_class("card-text")
            .into_iter()
            .map(Element::text_content)
            .collect();
        assert_eq!(texts, ["Temp: 0 °F", "Wind: 0 MPH", "Humidity: 0 %"]);
        assert!(!view.to_html().contains(": -0"));
    }

    #[test]
    fn current_weather_replaces_previous_content() {
        let mut view = View::new(&Config::default());
        render_current_weather(&mut view, &record("Denver", "10/16/2026", 55.0));
        render_current_weather(&mut view, &record("Boise", "10/16/2026", 48.0));

        assert_eq!(view.today().children().len(), 4);
        assert!(view.today().text_content().starts_with("Boise"));
        assert!(!view.today().text_content().contains("Denver"));
    }

    #[test]
    fn forecast_has_heading_then_cards_in_order() {
        let mut view = View::new(&Config::default());
        let days: Vec<_> = (17..=21)
            .map(|d| record("Denver", &format!("10/{d}/2026"), 50.0 + d as f64))
            .collect();
        render_forecast(&mut view, &days);

        let forecast = view.forecast();
        assert_eq!(forecast.children().len(), 6);
        assert_eq!(forecast.children()[0].text_content(), FORECAST_HEADING);

        let titles: Vec<String> = forecast
            .query_class("card-title")
            .into_iter()
            .map(Element::text_content)
            .collect();
        assert_eq!(titles, ["10/17/2026", "10/18/2026", "10/19/2026", "10/20/2026", "10/21/2026"]);
    }

    #[test]
    fn forecast_card_structure() {
        let mut view = View::new(&Config::default());
        render_forecast(&mut view, &[]);
        render_forecast_card(&mut view, &record("Denver", "10/17/2026", 61.3));

        let col = &view.forecast().children()[1];
        assert!(col.has_class("col-auto"));
        let card = &col.children()[0];
        for class in ["forecast-card", "card", "text-white", "bg-primary", "h-100"] {
            assert!(card.has_class(class), "missing {class}");
        }

        let texts: Vec<String> =
            card.query_class("card-text").into_iter().map(Element::text_content).collect();
        assert_eq!(texts, ["Temp: 61.3 °F", "Wind: 7.5 MPH", "Humidity: 62 %"]);
    }

    #[test]
    fn empty_history_shows_only_placeholder() {
        let mut view = View::new(&Config::default());
        render_search_history(&mut view, &history_body(&[("1", "Austin")]));
        render_search_history(&mut view, &HistoryResponse::new("[]"));

        let history = view.history();
        assert_eq!(history.children().len(), 1);
        assert_eq!(history.text_content(), EMPTY_HISTORY_MESSAGE);
        assert!(history.query_class("btn").is_empty());
        assert!(view.history_rows().is_empty());
    }

    #[test]
    fn history_renders_newest_first() {
        let mut view = View::new(&Config::default());
        render_search_history(&mut view, &history_body(&[("a", "A"), ("b", "B"), ("c", "C")]));

        assert_eq!(row_names(&view), ["C", "B", "A"]);
        let ids: Vec<&str> = view.history_rows().iter().map(|r| r.entry.id.as_str()).collect();
        assert_eq!(ids, ["c", "b", "a"]);
    }

    #[test]
    fn history_buttons_are_bound_to_their_entries() {
        let mut view = View::new(&Config::default());
        render_search_history(&mut view, &history_body(&[("a", "Athens"), ("b", "Berlin")]));

        let row = view.find_history_row("Athens").unwrap().clone();
        let (control, entry) = view.binding(row.show).unwrap();
        assert_eq!(control, Control::Show);
        assert_eq!(entry.name, "Athens");

        let (control, entry) = view.binding(row.delete).unwrap();
        assert_eq!(control, Control::Delete);
        assert_eq!(entry.id, "a");

        let button = view.history().find(row.show).unwrap();
        assert_eq!(button.get_attr("aria-controls"), Some("today forecast"));
        assert!(view.history().find(row.delete).unwrap().has_class("delete-city"));
    }

    #[test]
    fn malformed_history_leaves_panel_untouched() {
        let mut view = View::new(&Config::default());
        render_search_history(&mut view, &history_body(&[("a", "A")]));
        let before = view.history().clone();
        let rows_before = view.history_rows().to_vec();

        render_search_history(&mut view, &HistoryResponse::new("{not json"));

        assert_eq!(view.history(), &before);
        assert_eq!(view.history_rows(), rows_before.as_slice());
    }
}
