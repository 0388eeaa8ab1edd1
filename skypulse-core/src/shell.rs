//! Headless dashboard state: what is loaded, what is loading, what went wrong.
//!
//! Front ends call one of the trigger methods, get back a [`FetchTicket`],
//! run the fetch however they like, and hand the result to
//! [`Dashboard::complete`]. Only the most recently issued ticket is applied,
//! so a slow response can never overwrite a newer one.

use crate::{
    FetchError, LocationQuery, SourceCitation, WeatherRecord, WeatherReport,
    location::DEFAULT_CITY, provider::WeatherProvider,
};

/// Handle for one issued fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchTicket {
    id: u64,
    query: LocationQuery,
}

impl FetchTicket {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn query(&self) -> &LocationQuery {
        &self.query
    }
}

/// What a front end should render right now.
#[derive(Debug, PartialEq)]
pub enum View<'a> {
    /// Nothing requested yet.
    Idle,
    /// First load, no data to show in the meantime.
    Loading { location: String },
    /// Takes precedence over stale data.
    Error { message: String, needs_setup: bool },
    Ready {
        weather: &'a WeatherRecord,
        sources: &'a [SourceCitation],
        refreshing: bool,
    },
}

#[derive(Debug)]
pub struct Dashboard {
    default_city: String,
    loading: bool,
    error: Option<FetchError>,
    weather: Option<WeatherRecord>,
    sources: Vec<SourceCitation>,
    search_text: String,
    latest_request: u64,
    pending: Option<LocationQuery>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new(DEFAULT_CITY)
    }
}

impl Dashboard {
    pub fn new(default_city: impl Into<String>) -> Self {
        Self {
            default_city: default_city.into(),
            loading: false,
            error: None,
            weather: None,
            sources: Vec::new(),
            search_text: String::new(),
            latest_request: 0,
            pending: None,
        }
    }

    pub fn default_city(&self) -> &str {
        &self.default_city
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    pub fn weather(&self) -> Option<&WeatherRecord> {
        self.weather.as_ref()
    }

    pub fn sources(&self) -> &[SourceCitation] {
        &self.sources
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
    }

    /// Initial load of the default city.
    pub fn activate(&mut self) -> FetchTicket {
        self.begin(LocationQuery::city(self.default_city.clone()))
    }

    /// Fetch the typed search text; `None` when it is blank.
    pub fn submit_search(&mut self) -> Option<FetchTicket> {
        let text = self.search_text.trim().to_string();
        if text.is_empty() {
            return None;
        }
        self.search_text.clear();
        Some(self.begin(LocationQuery::city(text)))
    }

    /// One of the preset city shortcuts was picked.
    pub fn select_city(&mut self, city: &str) -> FetchTicket {
        self.search_text.clear();
        self.begin(LocationQuery::city(city))
    }

    /// Re-fetch whatever is on screen, or the default city if nothing is.
    pub fn refresh(&mut self) -> FetchTicket {
        let city = self
            .weather
            .as_ref()
            .map(|w| w.location.clone())
            .unwrap_or_else(|| self.default_city.clone());
        self.begin(LocationQuery::city(city))
    }

    /// "Try again" from the error screen: back to the default city.
    pub fn retry(&mut self) -> FetchTicket {
        self.activate()
    }

    fn begin(&mut self, query: LocationQuery) -> FetchTicket {
        self.latest_request += 1;
        self.loading = true;
        self.error = None;
        self.pending = Some(query.clone());

        tracing::debug!(request = self.latest_request, location = %query, "fetch started");
        FetchTicket { id: self.latest_request, query }
    }

    /// Apply a finished fetch. Returns `false` when a newer ticket has been
    /// issued since, in which case the result is dropped.
    pub fn complete(
        &mut self,
        ticket: &FetchTicket,
        result: Result<WeatherReport, FetchError>,
    ) -> bool {
        if ticket.id != self.latest_request {
            tracing::debug!(
                request = ticket.id,
                latest = self.latest_request,
                "discarding stale fetch result"
            );
            return false;
        }

        self.loading = false;
        self.pending = None;

        match result {
            Ok(report) => {
                self.weather = Some(report.record);
                self.sources = report.sources;
                self.error = None;
            }
            Err(err) => {
                // Last good weather stays around; the error view hides it.
                self.error = Some(err);
            }
        }
        true
    }

    /// Run `ticket` against `provider` and apply the result.
    pub async fn load(&mut self, provider: &dyn WeatherProvider, ticket: &FetchTicket) -> bool {
        let result = provider.fetch(ticket.query()).await;
        self.complete(ticket, result)
    }

    pub fn view(&self) -> View<'_> {
        if let (Some(err), false) = (&self.error, self.loading) {
            return View::Error { message: err.user_message(), needs_setup: err.needs_setup() };
        }

        match &self.weather {
            Some(weather) => View::Ready {
                weather,
                sources: &self.sources,
                refreshing: self.loading,
            },
            None if self.loading => View::Loading {
                location: self.pending.as_ref().map(LocationQuery::resolve).unwrap_or_default(),
            },
            None => View::Idle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_record;
    use async_trait::async_trait;

    fn report(location: &str) -> WeatherReport {
        let mut record = sample_record();
        record.location = location.to_string();
        WeatherReport {
            record,
            sources: vec![SourceCitation {
                title: "IQAir".into(),
                uri: "https://www.iqair.com/vietnam".into(),
            }],
        }
    }

    #[test]
    fn activation_targets_default_city() {
        let mut dash = Dashboard::default();
        let ticket = dash.activate();

        assert_eq!(ticket.query().resolve(), "Hà Nội");
        assert!(dash.is_loading());
        assert_eq!(dash.view(), View::Loading { location: "Hà Nội".into() });
    }

    #[test]
    fn success_replaces_weather_and_clears_loading() {
        let mut dash = Dashboard::default();
        let ticket = dash.activate();

        assert!(dash.complete(&ticket, Ok(report("Hà Nội"))));
        assert!(!dash.is_loading());
        assert_eq!(dash.weather().unwrap().location, "Hà Nội");
        assert_eq!(dash.sources().len(), 1);
        assert!(matches!(dash.view(), View::Ready { refreshing: false, .. }));
    }

    #[test]
    fn blank_search_does_nothing() {
        let mut dash = Dashboard::default();
        dash.set_search_text("   ");
        assert!(dash.submit_search().is_none());
        assert!(!dash.is_loading());
    }

    #[test]
    fn search_trims_and_clears_field() {
        let mut dash = Dashboard::default();
        dash.set_search_text("  Hội An ");

        let ticket = dash.submit_search().unwrap();
        assert_eq!(ticket.query().resolve(), "Hội An");
        assert_eq!(dash.search_text(), "");
    }

    #[test]
    fn select_city_clears_search_text() {
        let mut dash = Dashboard::default();
        dash.set_search_text("half-typed");

        let ticket = dash.select_city("Huế");
        assert_eq!(ticket.query().resolve(), "Huế");
        assert!(dash.search_text().is_empty());
    }

    #[test]
    fn refresh_uses_displayed_location_or_default() {
        let mut dash = Dashboard::new("Vinh");
        assert_eq!(dash.refresh().query().resolve(), "Vinh");

        let ticket = dash.select_city("Cần Thơ");
        dash.complete(&ticket, Ok(report("Cần Thơ")));
        assert_eq!(dash.refresh().query().resolve(), "Cần Thơ");
    }

    #[test]
    fn stale_completion_is_discarded() {
        let mut dash = Dashboard::default();
        let slow = dash.select_city("Huế");
        let fast = dash.select_city("Vinh");

        assert!(dash.complete(&fast, Ok(report("Vinh"))));
        assert!(!dash.complete(&slow, Ok(report("Huế"))));
        assert_eq!(dash.weather().unwrap().location, "Vinh");
    }

    #[test]
    fn stale_completion_does_not_end_loading() {
        let mut dash = Dashboard::default();
        let old = dash.select_city("Huế");
        let _new = dash.select_city("Vinh");

        assert!(!dash.complete(&old, Err(FetchError::EmptyResult)));
        assert!(dash.is_loading());
        assert!(dash.error().is_none());
    }

    #[test]
    fn error_view_takes_precedence_over_stale_data() {
        let mut dash = Dashboard::default();
        let first = dash.activate();
        dash.complete(&first, Ok(report("Hà Nội")));

        let second = dash.select_city("Sa Pa");
        dash.complete(&second, Err(FetchError::UpstreamUnavailable("down".into())));

        assert!(dash.weather().is_some(), "last good data is kept");
        match dash.view() {
            View::Error { needs_setup, .. } => assert!(!needs_setup),
            other => panic!("expected error view, got {other:?}"),
        }
    }

    #[test]
    fn new_fetch_clears_error_and_shows_refreshing_data() {
        let mut dash = Dashboard::default();
        let first = dash.activate();
        dash.complete(&first, Ok(report("Hà Nội")));
        let second = dash.refresh();
        dash.complete(&second, Err(FetchError::EmptyResult));

        let _third = dash.refresh();
        assert!(dash.error().is_none());
        assert!(matches!(dash.view(), View::Ready { refreshing: true, .. }));
    }

    #[test]
    fn config_error_requests_setup() {
        let mut dash = Dashboard::default();
        let ticket = dash.activate();
        dash.complete(&ticket, Err(FetchError::missing_api_key()));

        match dash.view() {
            View::Error { message, needs_setup } => {
                assert!(needs_setup);
                assert!(message.contains("API_KEY"));
            }
            other => panic!("expected error view, got {other:?}"),
        }
    }

    #[test]
    fn retry_goes_back_to_default_city() {
        let mut dash = Dashboard::new("Đà Nẵng");
        let ticket = dash.select_city("Hà Giang");
        dash.complete(&ticket, Err(FetchError::EmptyResult));

        assert_eq!(dash.retry().query().resolve(), "Đà Nẵng");
    }

    #[derive(Debug)]
    struct FixedProvider(Result<WeatherReport, FetchError>);

    #[async_trait]
    impl WeatherProvider for FixedProvider {
        async fn fetch(&self, _query: &LocationQuery) -> Result<WeatherReport, FetchError> {
            self.0.clone()
        }
    }

    #[tokio::test]
    async fn load_runs_provider_and_applies_result() {
        let provider = FixedProvider(Ok(report("Nha Trang")));
        let mut dash = Dashboard::default();
        let ticket = dash.select_city("Nha Trang");

        assert!(dash.load(&provider, &ticket).await);
        assert_eq!(dash.weather().unwrap().location, "Nha Trang");
    }
}
