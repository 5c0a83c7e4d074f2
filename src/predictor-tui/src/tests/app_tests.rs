//! Keyboard routing and state synchronisation.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pretty_assertions::assert_eq;
use predictor_client::PredictorError;
use predictor_engine::{ReferenceUpdate, SubmissionStatus};
use predictor_protocol::{ConfidenceTier, FormRecord, ReferenceKind};
use predictor_tui_components::component::Component;

use super::support::{ctrl, explain_response, key, loaded_app, press, type_text};
use crate::app::{App, AppAction, Field};

fn complete(app: &mut App) {
    app.form.set_region("California");
    app.form.set_city("San Francisco");
    app.form.toggle_category("software");
}

#[test]
fn test_initial_state() {
    let app = App::new();
    assert_eq!(app.focused(), Some(Field::Country));
    assert!(app.country.is_focused());
    assert_eq!(app.country.selected_value(), Some("USA"));
    assert_eq!(app.form().record(), &FormRecord::default());
    assert_eq!(app.founded_year.value(), 2015);
    assert!(!app.should_quit());
}

#[test]
fn test_reference_loads_reach_widgets() {
    let mut app = App::new();
    app.begin_reference_load();
    assert!(app.region.is_loading());
    assert!(app.city.is_loading());
    assert!(app.categories.is_loading());

    app.apply_reference(ReferenceUpdate {
        kind: ReferenceKind::Cities,
        result: Err(PredictorError::Api {
            status: 500,
            message: "API Error: 500".to_string(),
        }),
    });
    assert!(!app.city.is_loading());
    assert!(app.city.options().is_empty());
    assert!(app.region.is_loading());

    let app = loaded_app();
    assert_eq!(app.region.options().len(), 3);
    assert_eq!(app.categories.options().len(), 3);
    assert!(!app.references().is_loading());
}

#[test]
fn test_country_arrows_update_record() {
    let mut app = App::new();
    app.handle_key(key(KeyCode::Right));
    assert_eq!(app.form().record().country_code, "CAN");
    app.handle_key(key(KeyCode::Left));
    app.handle_key(key(KeyCode::Left));
    assert_eq!(app.form().record().country_code, "MYS");
}

#[test]
fn test_tab_moves_focus_and_dismisses_combobox() {
    let mut app = loaded_app();
    app.handle_key(key(KeyCode::Tab));
    assert_eq!(app.focused(), Some(Field::Region));
    assert!(app.region.is_open());
    assert!(!app.country.is_focused());

    app.handle_key(key(KeyCode::Tab));
    assert_eq!(app.focused(), Some(Field::City));
    assert!(!app.region.is_open());
    assert!(!app.region.is_focused());

    app.handle_key(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT));
    assert_eq!(app.focused(), Some(Field::Region));
}

#[test]
fn test_search_and_commit_region() {
    let mut app = loaded_app();
    app.focus_field(Field::Region);
    type_text(&mut app, "NEW");
    assert_eq!(app.region.filtered_labels(), vec!["New York"]);
    assert_eq!(app.region.highlighted(), None);

    app.handle_key(key(KeyCode::Down));
    app.handle_key(key(KeyCode::Enter));
    assert_eq!(app.form().record().region, "New York");
    assert!(!app.region.is_open());
    assert_eq!(app.region.display_text(), "New York");
}

#[test]
fn test_typing_after_commit_clears_record_value() {
    let mut app = loaded_app();
    app.focus_field(Field::City);
    app.handle_key(key(KeyCode::Down));
    app.handle_key(key(KeyCode::Enter));
    assert_eq!(app.form().record().city, "Austin");

    type_text(&mut app, "x");
    assert_eq!(app.form().record().city, "");
    assert_eq!(app.city.search_text(), "Austinx");
    assert!(app.city.is_open());
}

#[test]
fn test_backspace_on_empty_search_clears_commit() {
    let mut app = loaded_app();
    app.focus_field(Field::Region);
    app.handle_key(key(KeyCode::Down));
    app.handle_key(key(KeyCode::Enter));
    assert_eq!(app.form().record().region, "California");

    // Reopen with an empty search buffer, then Backspace.
    app.handle_key(key(KeyCode::Down));
    assert_eq!(app.region.search_text(), "");
    app.handle_key(key(KeyCode::Backspace));
    assert_eq!(app.form().record().region, "");
}

#[test]
fn test_categories_keyboard_selection() {
    let mut app = loaded_app();
    app.focus_field(Field::Categories);

    app.handle_key(key(KeyCode::Enter));
    assert!(app.categories.is_open());
    app.handle_key(key(KeyCode::Char(' ')));
    app.handle_key(key(KeyCode::Down));
    app.handle_key(key(KeyCode::Char(' ')));
    app.handle_key(key(KeyCode::Esc));
    assert!(!app.categories.is_open());
    assert_eq!(app.form().record().categories, vec!["ai", "fintech"]);

    app.handle_key(key(KeyCode::Backspace));
    assert_eq!(app.form().record().categories, vec!["ai"]);
}

#[test]
fn test_category_panel_toggles_only_on_trigger() {
    let mut app = loaded_app();
    app.focus_field(Field::Categories);
    app.handle_key(key(KeyCode::Enter));
    assert!(app.categories.is_open());

    app.handle_key(key(KeyCode::Tab));
    assert_eq!(app.focused(), Some(Field::FoundedYear));
    assert!(app.categories.is_open());

    app.focus_field(Field::Region);
    assert!(app.categories.is_open());
    app.handle_mouse(press(99, 0));
    assert!(app.categories.is_open());

    app.focus_field(Field::Categories);
    assert!(app.categories.is_open());
    app.handle_key(key(KeyCode::Esc));
    assert!(!app.categories.is_open());
}

#[test]
fn test_year_is_clamped_on_blur() {
    let mut app = App::new();
    app.focus_field(Field::FoundedYear);
    for _ in 0..4 {
        app.handle_key(key(KeyCode::Backspace));
    }
    type_text(&mut app, "1980");
    assert_eq!(app.founded_year.text(), "1980");

    app.handle_key(key(KeyCode::Tab));
    assert_eq!(app.focused(), Some(Field::Submit));
    assert_eq!(app.form().record().founded_year, 1995);
    assert_eq!(app.founded_year.text(), "1995");

    app.focus_field(Field::FoundedYear);
    app.handle_key(key(KeyCode::Up));
    assert_eq!(app.form().record().founded_year, 1996);
}

#[test]
fn test_submit_blocked_by_validation() {
    let mut app = loaded_app();
    assert_eq!(app.handle_key(ctrl('s')), AppAction::None);
    assert_eq!(app.form().status(), SubmissionStatus::Failed);
    assert_eq!(
        app.form().error().map(|e| e.message.as_str()),
        Some("Please select at least one category")
    );
}

#[test]
fn test_submit_and_in_flight_guard() {
    let mut app = loaded_app();
    complete(&mut app);

    let AppAction::Submit(request) = app.handle_key(ctrl('s')) else {
        panic!("expected a request");
    };
    assert_eq!(request.category_list, "software");
    assert_eq!(request.founded_year, 2015);
    assert!(app.form().is_submitting());

    app.focus_field(Field::Submit);
    assert_eq!(app.handle_key(key(KeyCode::Enter)), AppAction::None);

    app.finish_prediction(Ok(explain_response(0.82, ConfidenceTier::High)));
    assert_eq!(app.form().status(), SubmissionStatus::Succeeded);
    assert!(app.form().result().is_some());
}

#[test]
fn test_submit_commits_typed_year() {
    let mut app = loaded_app();
    complete(&mut app);
    app.focus_field(Field::FoundedYear);
    app.handle_key(key(KeyCode::Backspace));
    type_text(&mut app, "0");

    let AppAction::Submit(request) = app.handle_key(ctrl('s')) else {
        panic!("expected a request");
    };
    assert_eq!(request.founded_year, 2010);
}

#[test]
fn test_spinner_ticks_only_while_submitting() {
    let mut app = loaded_app();
    let first = app.spinner.current_frame();
    app.tick();
    assert_eq!(app.spinner.current_frame(), first);

    complete(&mut app);
    app.request_submit();
    app.tick();
    assert_ne!(app.spinner.current_frame(), first);
}

#[test]
fn test_blurred_combobox_ignores_typing() {
    let mut app = loaded_app();
    app.focus_field(Field::Region);
    type_text(&mut app, "cal");
    app.handle_key(key(KeyCode::Esc));
    assert_eq!(app.focused(), Some(Field::Region));
    assert!(!app.region.is_focused());

    type_text(&mut app, "x");
    app.handle_paste("tex");
    assert!(!app.region.is_open());
    assert_eq!(app.region.search_text(), "");
    assert_eq!(app.form().record().region, "");

    app.handle_key(key(KeyCode::Enter));
    assert!(app.region.is_focused());
    assert!(app.region.is_open());
    type_text(&mut app, "tex");
    assert_eq!(app.region.filtered_labels(), vec!["Texas"]);
}

#[test]
fn test_paste_into_combobox() {
    let mut app = loaded_app();
    app.focus_field(Field::City);
    app.handle_paste("san\nignored");
    assert_eq!(app.city.search_text(), "san");
    assert_eq!(app.city.filtered_labels(), vec!["San Francisco"]);
}

#[test]
fn test_quit_keys() {
    let mut app = App::new();
    assert_eq!(app.handle_key(ctrl('q')), AppAction::Quit);
    assert!(app.should_quit());

    let mut app = App::new();
    assert_eq!(app.handle_key(ctrl('c')), AppAction::Quit);
}

#[test]
fn test_key_hints_follow_focus() {
    let mut app = loaded_app();
    assert_eq!(app.key_hints()[0], ("←→", "Change"));
    app.focus_field(Field::Region);
    assert_eq!(app.key_hints()[0], ("↑↓", "Navigate"));
    assert!(app.key_hints().contains(&("Ctrl+Q", "Quit")));
}
