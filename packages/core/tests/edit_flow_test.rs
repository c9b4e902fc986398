//! End-to-end editing scenarios: controller, HTTP transport, and an
//! in-process update endpoint working together.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};

use fieldsync_core::{
    BackButton, Binding, DispatchMetrics, EditController, History, HttpUpdateTransport,
    InputEvent, SelectWidget, Surface, SyncConfig, TextWidget, UpdateAck, UpdateRequest,
};

/// Endpoint double: records decoded requests, answers with a fixed ack.
#[derive(Clone)]
struct Endpoint {
    seen: Arc<Mutex<Vec<UpdateRequest>>>,
    ack: UpdateAck,
}

async fn update_handler(
    State(endpoint): State<Endpoint>,
    Json(request): Json<UpdateRequest>,
) -> Json<UpdateAck> {
    endpoint.seen.lock().unwrap().push(request);
    Json(endpoint.ack.clone())
}

/// History double recording navigations.
#[derive(Default)]
struct RecordingHistory {
    calls: Mutex<Vec<u32>>,
}

impl History for RecordingHistory {
    fn back(&self, steps: u32) {
        self.calls.lock().unwrap().push(steps);
    }
}

struct TestEnv {
    controller: EditController,
    endpoint: Endpoint,
    history: Arc<RecordingHistory>,
}

/// Spin up an in-process update endpoint and a controller wired to it over
/// real HTTP.
async fn create_test_env(surface: Surface, ack: UpdateAck) -> Result<TestEnv> {
    let endpoint = Endpoint {
        seen: Arc::new(Mutex::new(Vec::new())),
        ack,
    };
    let app = Router::new()
        .route("/update", post(update_handler))
        .with_state(endpoint.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let base = format!("http://{}", listener.local_addr()?);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let transport = Arc::new(HttpUpdateTransport::new(&SyncConfig::with_endpoint(base))?);
    let history = Arc::new(RecordingHistory::default());
    let controller = EditController::new(surface, transport, history.clone());

    Ok(TestEnv {
        controller,
        endpoint,
        history,
    })
}

async fn wait_for_completion(metrics: &DispatchMetrics, expected: u64) {
    for _ in 0..500 {
        if metrics.completed() >= expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!(
        "expected {} completed deliveries, saw {}",
        expected,
        metrics.completed()
    );
}

#[tokio::test]
async fn test_dropdown_rejection_scenario() {
    // Dropdown bound to u1/status; the server answers success=false.
    let mut surface = Surface::new();
    surface.push(SelectWidget::new(
        "status-select",
        Binding::new("u1", "status"),
        "Open",
    ));
    let mut env = create_test_env(surface, UpdateAck::rejected("stale"))
        .await
        .unwrap();

    env.controller.handle(InputEvent::Change {
        target: "status-select".to_string(),
        value: "Done".to_string(),
    });

    let metrics = env.controller.metrics();
    wait_for_completion(&metrics, 1).await;

    // Exactly one POST, with the selected value.
    let seen = env.endpoint.seen.lock().unwrap().clone();
    assert_eq!(
        seen,
        vec![UpdateRequest {
            uuid: "u1".to_string(),
            var_name: "status".to_string(),
            value: "Done".to_string(),
        }]
    );

    // Rejection is logged and counted; nothing retries, the selection stays.
    assert_eq!(metrics.rejected(), 1);
    assert_eq!(metrics.issued(), 1);
    assert_eq!(
        env.controller.surface().select("status-select").unwrap().value,
        "Done"
    );
}

#[tokio::test]
async fn test_inline_text_edit_scenario() {
    // Text widget bound to u2/title showing "Draft"; click, retype, Enter.
    let mut surface = Surface::new();
    surface.push(TextWidget::new(
        "title-span",
        Binding::new("u2", "title"),
        "Draft",
    ));
    let mut env = create_test_env(surface, UpdateAck::accepted()).await.unwrap();

    env.controller.handle(InputEvent::Click {
        target: "title-span".to_string(),
    });
    env.controller.handle(InputEvent::Input {
        target: "title-span".to_string(),
        text: "Final".to_string(),
    });
    env.controller.handle(InputEvent::Enter {
        target: "title-span".to_string(),
    });
    // The projection blurs the element after Enter; no second commit.
    env.controller.handle(InputEvent::Blur {
        target: "title-span".to_string(),
    });

    let metrics = env.controller.metrics();
    wait_for_completion(&metrics, 1).await;

    let seen = env.endpoint.seen.lock().unwrap().clone();
    assert_eq!(
        seen,
        vec![UpdateRequest {
            uuid: "u2".to_string(),
            var_name: "title".to_string(),
            value: "Final".to_string(),
        }]
    );
    assert_eq!(metrics.accepted(), 1);

    let widget = env.controller.surface().text("title-span").unwrap();
    assert!(!widget.is_editing());
    assert_eq!(widget.value, "Final");
}

#[tokio::test]
async fn test_back_flush_scenario() {
    // Two identified dropdowns, one without identity, and a three-step back
    // button. The flush must issue both updates before navigating.
    let mut surface = Surface::new();
    surface.push(SelectWidget::new("s1", Binding::new("u1", "status"), "Open"));
    surface.push(SelectWidget::new("s2", Binding::default(), "Ignored"));
    surface.push(SelectWidget::new(
        "s3",
        Binding::new("u3", "priority"),
        "High",
    ));
    surface.push(BackButton::new("back", Some("3")));
    let mut env = create_test_env(surface, UpdateAck::accepted()).await.unwrap();

    env.controller.handle(InputEvent::Click {
        target: "back".to_string(),
    });

    // Navigation does not wait for deliveries.
    assert_eq!(env.history.calls.lock().unwrap().clone(), vec![3]);
    assert_eq!(env.controller.metrics().issued(), 2);

    let metrics = env.controller.metrics();
    wait_for_completion(&metrics, 2).await;

    let mut uuids: Vec<String> = env
        .endpoint
        .seen
        .lock()
        .unwrap()
        .iter()
        .map(|r| r.uuid.clone())
        .collect();
    uuids.sort();
    assert_eq!(uuids, vec!["u1".to_string(), "u3".to_string()]);
}
