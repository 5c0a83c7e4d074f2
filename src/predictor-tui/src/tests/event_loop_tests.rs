//! The loop's channel plumbing, driven without a terminal.

use std::sync::Arc;

use crossterm::event::{Event, KeyCode, KeyEventKind};
use predictor_engine::SubmissionStatus;

use super::support::{FakeApi, ctrl, key};
use crate::app::Field;
use crate::event_loop::EventLoop;

async fn loaded_loop() -> EventLoop {
    let mut event_loop = EventLoop::new(Arc::new(FakeApi));
    event_loop.start_reference_loads();
    assert!(event_loop.app().references().is_loading());
    for _ in 0..3 {
        let update = event_loop.reference_rx.recv().await.expect("reference update");
        event_loop.app.apply_reference(update);
    }
    event_loop
}

#[tokio::test]
async fn test_reference_loads_arrive_over_channel() {
    let event_loop = loaded_loop().await;
    let references = event_loop.app().references();
    assert!(!references.is_loading());
    assert_eq!(references.regions.options.len(), 3);
    assert_eq!(references.categories.options, vec!["ai", "fintech", "software"]);
}

#[tokio::test]
async fn test_submission_round_trip() {
    let mut event_loop = loaded_loop().await;
    event_loop.app.form.set_region("California");
    event_loop.app.form.set_city("San Francisco");
    event_loop.app.form.toggle_category("software");

    event_loop.handle_event(Event::Key(ctrl('s')));
    assert!(event_loop.app().form().is_submitting());

    // A second submit while in flight spawns nothing.
    event_loop.handle_event(Event::Key(ctrl('s')));

    let reply = event_loop.prediction_rx.recv().await.expect("prediction reply");
    event_loop.app.finish_prediction(reply);
    assert_eq!(event_loop.app().form().status(), SubmissionStatus::Succeeded);
    let result = event_loop.app().form().result().expect("result");
    assert_eq!(result.success_probability, 0.82);

    assert!(event_loop.prediction_rx.try_recv().is_err());
}

#[tokio::test]
async fn test_key_release_is_ignored() {
    let mut event_loop = loaded_loop().await;
    let mut release = key(KeyCode::Tab);
    release.kind = KeyEventKind::Release;
    event_loop.handle_event(Event::Key(release));
    assert_eq!(event_loop.app().focused(), Some(Field::Country));

    event_loop.handle_event(Event::Key(key(KeyCode::Tab)));
    assert_eq!(event_loop.app().focused(), Some(Field::Region));
}

#[tokio::test]
async fn test_paste_event_reaches_focused_field() {
    let mut event_loop = loaded_loop().await;
    event_loop.handle_event(Event::Key(key(KeyCode::Tab)));
    event_loop.handle_event(Event::Paste("tex".to_string()));
    assert_eq!(event_loop.app().region.filtered_labels(), vec!["Texas"]);
}
