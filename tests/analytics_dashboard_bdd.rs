//! Behavioural tests for the analytics dashboard and sentiment maintenance.

#[path = "support/runtime.rs"]
mod runtime;

use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};
use runtime::{SharedRuntime, ensure_runtime_and_server, gateway_for};
use ulasan::tui::messages::AppMsg;
use ulasan::tui::state::{FixOutcome, sentiment_slices};
use ulasan::tui::{ActiveView, FeedbackApp};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Upper bound on follow-up commands driven per user action.
const MAX_FOLLOW_UPS: usize = 4;

#[derive(ScenarioState, Default)]
struct DashboardScenario {
    runtime: Slot<SharedRuntime>,
    server: Slot<MockServer>,
    app: Slot<FeedbackApp>,
}

#[fixture]
fn dashboard_scenario() -> DashboardScenario {
    DashboardScenario::default()
}

fn runtime_for(state: &DashboardScenario) -> SharedRuntime {
    ensure_runtime_and_server(&state.runtime, &state.server)
        .unwrap_or_else(|error| panic!("failed to start stub service: {error}"))
}

fn mount(state: &DashboardScenario, mock: Mock) {
    let runtime = runtime_for(state);
    state
        .server
        .with_ref(|server| runtime.block_on(mock.mount(server)))
        .unwrap_or_else(|| panic!("mock server not initialised"));
}

/// Sends a message and keeps feeding command results back until the app
/// settles.
fn drive(state: &DashboardScenario, msg: AppMsg) {
    let runtime = runtime_for(state);
    let mut next = Some(msg);
    for _ in 0..MAX_FOLLOW_UPS {
        let Some(current) = next.take() else {
            return;
        };
        let cmd = state
            .app
            .with_mut(|app| app.handle_message(&current))
            .unwrap_or_else(|| panic!("app not initialised"));
        next = cmd.and_then(|cmd| runtime.resolve(cmd));
    }
}

fn request_count(state: &DashboardScenario, request_path: &str) -> usize {
    let runtime = runtime_for(state);
    state
        .server
        .with_ref(|server| runtime.block_on(server.received_requests()))
        .flatten()
        .unwrap_or_default()
        .iter()
        .filter(|request| request.url.path() == request_path)
        .count()
}

// --- Given steps ---

#[given("a feedback service with analytics for {total:u64} records")]
fn service_with_analytics(dashboard_scenario: &DashboardScenario, total: u64) {
    let body = serde_json::json!({
        "total_feedback": total,
        "average_rating": 3.5,
        "sentiment_distribution": {"positif": total.saturating_sub(1), "negatif": 1},
        "rating_distribution": {"1": 1, "4": total.saturating_sub(1)},
        "recent_feedback": [
            {"id": total, "name": "Sari", "rating": 4, "sentiment": "positif",
             "created_at": "2025-03-02T10:00:00"}
        ]
    });
    mount(
        dashboard_scenario,
        Mock::given(method("GET"))
            .and(path("/feedback/analytics"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body)),
    );
}

#[given("the service recomputes {count:u64} sentiments when asked")]
fn service_recomputes(dashboard_scenario: &DashboardScenario, count: u64) {
    mount(
        dashboard_scenario,
        Mock::given(method("PUT"))
            .and(path("/feedback/fix-sentiments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "message": "Sentiments recomputed",
                "updated_count": count
            }))),
    );
}

#[given("the service fails to recompute sentiments")]
fn service_fails_fix(dashboard_scenario: &DashboardScenario) {
    mount(
        dashboard_scenario,
        Mock::given(method("PUT"))
            .and(path("/feedback/fix-sentiments"))
            .respond_with(ResponseTemplate::new(500)),
    );
}

#[given("the feedback client is showing the dashboard")]
fn client_on_dashboard(dashboard_scenario: &DashboardScenario) {
    let gateway = gateway_for(&dashboard_scenario.server)
        .unwrap_or_else(|error| panic!("failed to build gateway: {error}"));
    let mut app = FeedbackApp::new(gateway);
    app.handle_message(&AppMsg::ShowView(ActiveView::Dashboard));
    dashboard_scenario.app.set(app);
}

// --- When steps ---

#[when("the dashboard is loaded")]
fn dashboard_loaded(dashboard_scenario: &DashboardScenario) {
    drive(dashboard_scenario, AppMsg::DashboardRefreshRequested);
}

#[when("the user fixes sentiments")]
fn fix_sentiments(dashboard_scenario: &DashboardScenario) {
    drive(dashboard_scenario, AppMsg::FixSentimentsRequested);
}

// --- Then steps ---

#[then("the dashboard reports {total:u64} records with an average rating of {average}")]
fn assert_cards(dashboard_scenario: &DashboardScenario, total: u64, average: String) {
    let cards = dashboard_scenario
        .app
        .with_ref(|app| app.dashboard().cards())
        .flatten()
        .unwrap_or_else(|| panic!("dashboard has no snapshot"));
    assert_eq!(cards.total, total);
    assert_eq!(cards.average_rating, average);
}

#[then("the sentiment chart has {count:usize} slices")]
fn assert_slices(dashboard_scenario: &DashboardScenario, count: usize) {
    let slices = dashboard_scenario
        .app
        .with_ref(|app| app.dashboard().snapshot.as_ref().map(sentiment_slices))
        .flatten()
        .unwrap_or_else(|| panic!("dashboard has no snapshot"));
    assert_eq!(slices.len(), count);
}

#[then("the fix outcome reports {count:u64} updated records")]
fn assert_fix_updated(dashboard_scenario: &DashboardScenario, count: u64) {
    let outcome = dashboard_scenario
        .app
        .with_ref(|app| app.dashboard().fix_outcome.clone())
        .flatten();
    assert_eq!(outcome, Some(FixOutcome::Updated(count)));
}

#[then("the fix outcome is a failure")]
fn assert_fix_failed(dashboard_scenario: &DashboardScenario) {
    let outcome = dashboard_scenario
        .app
        .with_ref(|app| app.dashboard().fix_outcome.clone())
        .flatten();
    assert!(
        matches!(outcome, Some(FixOutcome::Failed(_))),
        "expected a failed outcome, got {outcome:?}"
    );
}

#[then("the service received {count:usize} analytics requests")]
fn assert_analytics_requests(dashboard_scenario: &DashboardScenario, count: usize) {
    assert_eq!(
        request_count(dashboard_scenario, "/feedback/analytics"),
        count
    );
}

// --- Scenario bindings ---

#[scenario(path = "tests/features/analytics_dashboard.feature", index = 0)]
fn dashboard_shows_aggregates(dashboard_scenario: DashboardScenario) {
    let _ = dashboard_scenario;
}

#[scenario(path = "tests/features/analytics_dashboard.feature", index = 1)]
fn fixing_sentiments_reloads(dashboard_scenario: DashboardScenario) {
    let _ = dashboard_scenario;
}

#[scenario(path = "tests/features/analytics_dashboard.feature", index = 2)]
fn failed_fix_is_reported(dashboard_scenario: DashboardScenario) {
    let _ = dashboard_scenario;
}
