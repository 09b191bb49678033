//! Behavioural tests for filtering and searching the feedback list.

#[path = "support/records.rs"]
mod records;
#[path = "support/runtime.rs"]
mod runtime;

use bubbletea_rs::Model;
use records::feedback_json;
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};
use runtime::{SharedRuntime, ensure_runtime_and_server, gateway_for};
use ulasan::Sentiment;
use ulasan::tui::messages::AppMsg;
use ulasan::tui::{ActiveView, FeedbackApp};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

#[derive(ScenarioState, Default)]
struct ListingState {
    runtime: Slot<SharedRuntime>,
    server: Slot<MockServer>,
    app: Slot<FeedbackApp>,
}

#[fixture]
fn listing_state() -> ListingState {
    ListingState::default()
}

fn runtime_for(state: &ListingState) -> SharedRuntime {
    ensure_runtime_and_server(&state.runtime, &state.server)
        .unwrap_or_else(|error| panic!("failed to start stub service: {error}"))
}

fn mount(state: &ListingState, mock: Mock) {
    let runtime = runtime_for(state);
    state
        .server
        .with_ref(|server| runtime.block_on(mock.mount(server)))
        .unwrap_or_else(|| panic!("mock server not initialised"));
}

/// Sends a message and feeds the result of its fetch back into the app.
fn send_and_settle(state: &ListingState, msg: &AppMsg) {
    let runtime = runtime_for(state);
    let cmd = state
        .app
        .with_mut(|app| app.handle_message(msg))
        .unwrap_or_else(|| panic!("app not initialised"));
    let Some(reply) = cmd.and_then(|cmd| runtime.resolve(cmd)) else {
        return;
    };
    state
        .app
        .with_mut(|app| {
            app.handle_message(&reply);
        })
        .unwrap_or_else(|| panic!("app not initialised"));
}

fn listing_requests(state: &ListingState) -> Vec<Request> {
    let runtime = runtime_for(state);
    state
        .server
        .with_ref(|server| runtime.block_on(server.received_requests()))
        .flatten()
        .unwrap_or_default()
        .into_iter()
        .filter(|request| request.method.as_str() == "GET" && request.url.path() == "/feedback")
        .collect()
}

// --- Given steps ---

#[given("a feedback service holding mixed feedback")]
fn service_with_mixed_feedback(listing_state: &ListingState) {
    let negatives = serde_json::json!([
        feedback_json(1, "Rina", 2, "negatif"),
        feedback_json(2, "Budi", 1, "negatif"),
    ]);
    let everything = serde_json::json!([
        feedback_json(1, "Rina", 2, "negatif"),
        feedback_json(2, "Budi", 1, "negatif"),
        feedback_json(3, "Sari", 5, "positif"),
    ]);

    mount(
        listing_state,
        Mock::given(method("GET"))
            .and(path("/feedback"))
            .and(query_param("sentiment", "negatif"))
            .respond_with(ResponseTemplate::new(200).set_body_json(negatives))
            .with_priority(1),
    );
    mount(
        listing_state,
        Mock::given(method("GET"))
            .and(path("/feedback"))
            .respond_with(ResponseTemplate::new(200).set_body_json(everything)),
    );
}

#[given("a feedback service that fails listing requests")]
fn service_failing(listing_state: &ListingState) {
    mount(
        listing_state,
        Mock::given(method("GET"))
            .and(path("/feedback"))
            .respond_with(ResponseTemplate::new(503)),
    );
}

#[given("the feedback client is showing the feedback list")]
fn client_on_list(listing_state: &ListingState) {
    let gateway = gateway_for(&listing_state.server)
        .unwrap_or_else(|error| panic!("failed to build gateway: {error}"));
    let mut app = FeedbackApp::new(gateway).with_size(100, 30);
    app.handle_message(&AppMsg::ShowView(ActiveView::List));
    listing_state.app.set(app);
}

// --- When steps ---

#[when("the list is loaded")]
fn list_loaded(listing_state: &ListingState) {
    send_and_settle(listing_state, &AppMsg::ListRefreshRequested);
}

#[when("the sentiment filter is set to {label}")]
fn set_sentiment(listing_state: &ListingState, label: String) {
    let sentiment = Sentiment::from_label(&label);
    send_and_settle(listing_state, &AppMsg::SetSentimentFilter(Some(sentiment)));
}

#[when("the user searches for \"{term}\"")]
fn search(listing_state: &ListingState, term: String) {
    send_and_settle(listing_state, &AppMsg::SetSearch(term));
}

// --- Then steps ---

#[then("the service was asked for sentiment \"{label}\"")]
fn assert_sentiment_param(listing_state: &ListingState, label: String) {
    let requests = listing_requests(listing_state);
    let last = requests
        .last()
        .unwrap_or_else(|| panic!("no listing request received"));
    let sentiment = last
        .url
        .query_pairs()
        .find(|(key, _)| key == "sentiment")
        .map(|(_, value)| value.into_owned());
    assert_eq!(sentiment, Some(label));
}

#[then("the list shows {count:usize} records")]
fn assert_visible_count(listing_state: &ListingState, count: usize) {
    let actual = listing_state
        .app
        .with_ref(|app| app.list().visible_count())
        .unwrap_or_else(|| panic!("app not initialised"));
    assert_eq!(actual, count);
}

#[then("the summary counts {count:usize} negative records")]
fn assert_negative_count(listing_state: &ListingState, count: usize) {
    let summary = listing_state
        .app
        .with_ref(|app| app.list().summary())
        .unwrap_or_else(|| panic!("app not initialised"));
    assert_eq!(summary.negative, count);
    assert_eq!(summary.positive, 0);
}

#[then("the service received {count:usize} listing requests")]
fn assert_request_count(listing_state: &ListingState, count: usize) {
    assert_eq!(listing_requests(listing_state).len(), count);
}

#[then("the screen shows \"{text}\"")]
fn assert_screen(listing_state: &ListingState, text: String) {
    let frame = listing_state
        .app
        .with_ref(FeedbackApp::view)
        .unwrap_or_else(|| panic!("app not initialised"));
    assert!(frame.contains(&text), "'{text}' missing from:\n{frame}");
}

// --- Scenario bindings ---

#[scenario(path = "tests/features/feedback_list.feature", index = 0)]
fn sentiment_filter_queries_backend(listing_state: ListingState) {
    let _ = listing_state;
}

#[scenario(path = "tests/features/feedback_list.feature", index = 1)]
fn search_is_local(listing_state: ListingState) {
    let _ = listing_state;
}

#[scenario(path = "tests/features/feedback_list.feature", index = 2)]
fn failed_fetch_is_reported(listing_state: ListingState) {
    let _ = listing_state;
}
