//! User interactions: search submission, history clicks and deletes.
//!
//! Every failure below is logged and swallowed. The only thing surfaced to
//! the user is the empty-input alert.

use std::fmt;
use tracing::{debug, error, info, warn};

use crate::{
    api::WeatherApi,
    dom::NodeId,
    render::{render_current_weather, render_forecast, render_search_history},
    view::{Control, View},
};

pub const EMPTY_SEARCH_ALERT: &str = "Please enter a city name";

/// Blocking notice shown to the user.
pub trait Alert: Send + Sync {
    fn alert(&self, message: &str);
}

impl<F> Alert for F
where
    F: Fn(&str) + Send + Sync,
{
    fn alert(&self, message: &str) {
        self(message)
    }
}

/// Something the user did on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// The search form was submitted with the current input value.
    Submit,
    /// A node was clicked.
    Click(NodeId),
}

pub struct App<A> {
    api: A,
    view: View,
    alert: Box<dyn Alert>,
}

impl<A: fmt::Debug> fmt::Debug for App<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("api", &self.api)
            .field("view", &self.view)
            .finish_non_exhaustive()
    }
}

impl<A: WeatherApi> App<A> {
    pub fn new(api: A, view: View, alert: impl Alert + 'static) -> Self {
        Self { api, view, alert: Box::new(alert) }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut View {
        &mut self.view
    }

    /// Initial page load: show whatever history the backend has.
    pub async fn init(&mut self) {
        self.get_and_render_history().await;
    }

    pub async fn dispatch(&mut self, event: Event) {
        match event {
            Event::Submit => self.handle_search_form_submit().await,
            Event::Click(node) => {
                // The delete control consumes its click; the row's search
                // handler never sees it.
                if !self.handle_delete_history_click(node).await {
                    self.handle_search_history_click(node).await;
                }
            }
        }
    }

    pub async fn handle_search_form_submit(&mut self) {
        let search_value = self.view.search_input().trim().to_string();

        if search_value.is_empty() {
            self.alert.alert(EMPTY_SEARCH_ALERT);
            return;
        }

        self.fetch_weather(&search_value).await;
        self.get_and_render_history().await;
        self.view.clear_search_input();
    }

    /// Re-run the search for a clicked history button. Other nodes are ignored.
    pub async fn handle_search_history_click(&mut self, target: NodeId) {
        let city = match self.view.binding(target) {
            Some((Control::Show, entry)) => entry.name.clone(),
            _ => {
                debug!(%target, "click outside a history button");
                return;
            }
        };

        self.fetch_weather(&city).await;
        self.get_and_render_history().await;
    }

    /// Delete the entry bound to a clicked delete button.
    ///
    /// Returns `true` when `target` was a delete control, whether or not the
    /// backend call succeeded.
    pub async fn handle_delete_history_click(&mut self, target: NodeId) -> bool {
        let entry = match self.view.binding(target) {
            Some((Control::Delete, entry)) => entry.clone(),
            _ => return false,
        };

        info!(id = %entry.id, city = %entry.name, "deleting city from history");
        self.delete_city_from_history(&entry.id).await;
        self.get_and_render_history().await;
        true
    }

    /// Look up a city and show today plus the forecast.
    ///
    /// An empty response leaves both panels as they were.
    pub async fn fetch_weather(&mut self, city_name: &str) {
        let records = match self.api.fetch_weather(city_name).await {
            Ok(records) => records,
            Err(err) => {
                error!(error = %err, city = city_name, "Error fetching weather");
                return;
            }
        };

        match records.split_first() {
            Some((current, forecast)) => {
                render_current_weather(&mut self.view, current);
                render_forecast(&mut self.view, forecast);
            }
            None => warn!(city = city_name, "weather response contained no records"),
        }
    }

    pub async fn get_and_render_history(&mut self) {
        match self.api.fetch_search_history().await {
            Ok(history) => render_search_history(&mut self.view, &history),
            Err(err) => error!(error = %err, "Error getting history"),
        }
    }

    pub async fn delete_city_from_history(&mut self, id: &str) {
        if let Err(err) = self.api.delete_city_from_history(id).await {
            error!(error = %err, id, "Error deleting city");
        }
    }
}
