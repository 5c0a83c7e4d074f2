//! Application state: the form widgets, the engine state behind them and the
//! routing of keyboard and mouse input between the two.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use predictor_client::PredictorError;
use predictor_engine::{PredictionForm, ReferenceData, ReferenceUpdate, SubmitStart};
use predictor_protocol::{
    COUNTRIES, DEFAULT_COUNTRY_CODE, ExplainResponse, FOUNDED_YEAR_MAX, FOUNDED_YEAR_MIN,
    FormRecord, PredictRequest, ReferenceKind,
};
use predictor_tui_components::prelude::*;
use tracing::debug;

use crate::zones::{ClickZoneRegistry, ZoneId};

/// Focusable parts of the form, in Tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Country,
    Region,
    City,
    Categories,
    FoundedYear,
    Submit,
}

impl Field {
    pub const ORDER: [Field; 6] = [
        Field::Country,
        Field::Region,
        Field::City,
        Field::Categories,
        Field::FoundedYear,
        Field::Submit,
    ];
}

/// What the event loop has to do after an input event.
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    None,
    /// Send this request to the prediction service.
    Submit(PredictRequest),
    Quit,
}

/// State of the prediction form screen.
pub struct App {
    pub(crate) form: PredictionForm,
    pub(crate) references: ReferenceData,
    pub(crate) focus: FocusRing<Field>,
    pub(crate) country: ChoiceField,
    pub(crate) region: ComboboxState,
    pub(crate) city: ComboboxState,
    pub(crate) categories: MultiSelectState,
    pub(crate) founded_year: YearInput,
    pub(crate) spinner: LoadingSpinner,
    pub(crate) zones: ClickZoneRegistry,
    hub: PointerHub,
    should_quit: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        let record = FormRecord::default();
        let hub = PointerHub::new();

        let choices = COUNTRIES
            .iter()
            .map(|c| Choice::new(c.code, c.name))
            .collect();
        let country = ChoiceField::new("Country", choices).with_value(DEFAULT_COUNTRY_CODE);
        let region =
            ComboboxState::new("Region", "Search regions...").with_outside_press(&hub);
        let city = ComboboxState::new("City", "Search cities...").with_outside_press(&hub);
        let categories = MultiSelectState::new("Categories", "categories");
        let founded_year = YearInput::new(
            "Founded Year",
            record.founded_year,
            FOUNDED_YEAR_MIN,
            FOUNDED_YEAR_MAX,
        );

        let mut app = Self {
            form: PredictionForm::with_record(record),
            references: ReferenceData::default(),
            focus: FocusRing::new(Field::ORDER.to_vec()),
            country,
            region,
            city,
            categories,
            founded_year,
            spinner: LoadingSpinner::new().with_label("Analyzing..."),
            zones: ClickZoneRegistry::new(),
            hub,
            should_quit: false,
        };
        app.country.set_focus(true);
        app
    }

    pub fn form(&self) -> &PredictionForm {
        &self.form
    }

    pub fn references(&self) -> &ReferenceData {
        &self.references
    }

    pub fn focused(&self) -> Option<Field> {
        self.focus.current()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    // ------------------------------------------------------------------
    // Reference data
    // ------------------------------------------------------------------

    /// Mark every reference list as loading.
    pub fn begin_reference_load(&mut self) {
        self.references.begin_all();
        for kind in ReferenceKind::ALL {
            self.sync_reference(kind);
        }
    }

    /// Apply one finished reference load to the engine state and its widget.
    pub fn apply_reference(&mut self, update: ReferenceUpdate) {
        let kind = update.kind;
        self.references.apply(update);
        self.sync_reference(kind);
    }

    fn sync_reference(&mut self, kind: ReferenceKind) {
        let list = self.references.list(kind);
        let (loading, options) = (list.loading, list.options.clone());
        match kind {
            ReferenceKind::Regions => {
                self.region.set_options(options);
                self.region.set_loading(loading);
            }
            ReferenceKind::Cities => {
                self.city.set_options(options);
                self.city.set_loading(loading);
            }
            ReferenceKind::Categories => {
                self.categories.set_options(options);
                self.categories.set_loading(loading);
            }
        }
    }

    // ------------------------------------------------------------------
    // Submission
    // ------------------------------------------------------------------

    /// Start a submission. The request is only returned when validation
    /// passes and nothing is in flight.
    pub fn request_submit(&mut self) -> AppAction {
        if !self.form.is_submitting()
            && let Some(year) = self.founded_year.commit()
        {
            self.form.set_founded_year(year);
        }
        match self.form.begin_submit() {
            SubmitStart::Ready(request) => AppAction::Submit(request),
            SubmitStart::Invalid(err) => {
                debug!(message = %err.message, "submission blocked by validation");
                AppAction::None
            }
            SubmitStart::InFlight => {
                debug!("submission ignored, a request is in flight");
                AppAction::None
            }
        }
    }

    /// Deliver the answer of the prediction service.
    pub fn finish_prediction(&mut self, result: Result<ExplainResponse, PredictorError>) {
        self.form.finish_submit(result);
    }

    /// Periodic tick: advance the spinner while a request is in flight.
    pub fn tick(&mut self) {
        if self.form.is_submitting() {
            self.spinner.tick();
        }
    }

    // ------------------------------------------------------------------
    // Focus
    // ------------------------------------------------------------------

    /// Move focus to `field`, blurring the previous field.
    pub fn focus_field(&mut self, field: Field) {
        self.blur_other(field);
        self.focus.focus(field);
        self.set_field_focus(field, true);
    }

    fn blur_other(&mut self, field: Field) {
        if let Some(current) = self.focus.current()
            && current != field
        {
            self.set_field_focus(current, false);
        }
    }

    fn move_focus(&mut self, direction: FocusDirection) {
        if let Some(current) = self.focus.current() {
            self.set_field_focus(current, false);
        }
        if let Some(next) = self.focus.move_focus(direction) {
            self.set_field_focus(next, true);
        }
    }

    fn set_field_focus(&mut self, field: Field, focused: bool) {
        match field {
            Field::Country => {
                self.country.set_focus(focused);
            }
            Field::Region | Field::City => {
                if let Some(change) = self.combo_mut(field).set_focus(focused) {
                    self.apply_combo_change(field, change);
                }
            }
            Field::Categories => {
                self.categories.set_focus(focused);
            }
            Field::FoundedYear => {
                if let Some(year) = self.founded_year.set_focus(focused) {
                    self.form.set_founded_year(year);
                }
            }
            Field::Submit => {}
        }
    }

    fn combo_mut(&mut self, field: Field) -> &mut ComboboxState {
        match field {
            Field::City => &mut self.city,
            _ => &mut self.region,
        }
    }

    fn apply_combo_change(&mut self, field: Field, change: ComboboxChange) {
        let value = match change {
            ComboboxChange::Committed(value) => value,
            ComboboxChange::Cleared => String::new(),
        };
        match field {
            Field::Region => self.form.set_region(value),
            Field::City => self.form.set_city(value),
            _ => {}
        }
    }

    // ------------------------------------------------------------------
    // Keyboard
    // ------------------------------------------------------------------

    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') | KeyCode::Char('q') => {
                    self.should_quit = true;
                    return AppAction::Quit;
                }
                KeyCode::Char('s') => return self.request_submit(),
                _ => {}
            }
        }

        match key.code {
            KeyCode::Tab => {
                self.move_focus(FocusDirection::Forward);
                return AppAction::None;
            }
            KeyCode::BackTab => {
                self.move_focus(FocusDirection::Backward);
                return AppAction::None;
            }
            _ => {}
        }

        let Some(field) = self.focus.current() else {
            return AppAction::None;
        };
        match field {
            Field::Country => {
                if let Some(code) = self.country.handle_key(key).changed() {
                    self.form.set_country(code);
                }
            }
            Field::Region | Field::City => {
                // Blurred by Esc or an outside press: edits wait until the
                // field is focused again.
                if !self.combo_mut(field).is_focused() {
                    if matches!(key.code, KeyCode::Enter | KeyCode::Down) {
                        self.focus_field(field);
                    }
                    return AppAction::None;
                }
                if let Some(change) = self.combo_mut(field).handle_key(key).changed() {
                    self.apply_combo_change(field, change);
                }
            }
            Field::Categories => {
                if let Some(selected) = self.categories.handle_key(key).changed() {
                    self.form.set_categories(selected);
                }
            }
            Field::FoundedYear => {
                if let Some(year) = self.founded_year.handle_key(key).changed() {
                    self.form.set_founded_year(year);
                }
            }
            Field::Submit => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                    return self.request_submit();
                }
            }
        }
        AppAction::None
    }

    pub fn handle_paste(&mut self, text: &str) {
        match self.focus.current() {
            Some(field @ (Field::Region | Field::City)) => {
                if !self.combo_mut(field).is_focused() {
                    return;
                }
                if let Some(change) = self.combo_mut(field).handle_paste(text).changed() {
                    self.apply_combo_change(field, change);
                }
            }
            Some(Field::FoundedYear) => {
                self.founded_year.handle_paste(text);
            }
            _ => {}
        }
    }

    // ------------------------------------------------------------------
    // Mouse
    // ------------------------------------------------------------------

    /// Handle a mouse event against the zones of the last rendered frame.
    pub fn handle_mouse(&mut self, event: MouseEvent) -> AppAction {
        let (x, y) = (event.column, event.row);
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => self.press(x, y),
            MouseEventKind::Moved => {
                self.hover(x, y);
                AppAction::None
            }
            MouseEventKind::ScrollDown => {
                self.scroll(x, y, 1);
                AppAction::None
            }
            MouseEventKind::ScrollUp => {
                self.scroll(x, y, -1);
                AppAction::None
            }
            _ => AppAction::None,
        }
    }

    fn press(&mut self, x: u16, y: u16) -> AppAction {
        let dismissed = self.hub.press_outside(x, y);
        for field in [Field::Region, Field::City] {
            let combo = self.combo_mut(field);
            if combo
                .subscription_id()
                .is_some_and(|id| dismissed.contains(&id))
            {
                combo.dismiss();
            }
        }

        let Some(zone) = self.zones.find(x, y) else {
            return AppAction::None;
        };
        match zone {
            ZoneId::Field(Field::Submit) => {
                self.focus_field(Field::Submit);
                return self.request_submit();
            }
            ZoneId::Field(Field::Categories) => {
                self.focus_field(Field::Categories);
                if !self.categories.is_loading() {
                    self.categories.toggle_open();
                }
            }
            ZoneId::Field(field) => self.focus_field(field),
            ZoneId::CountryPrev | ZoneId::CountryNext => {
                self.focus_field(Field::Country);
                let code = if zone == ZoneId::CountryPrev {
                    self.country.select_prev()
                } else {
                    self.country.select_next()
                };
                if let Some(code) = code {
                    self.form.set_country(code);
                }
            }
            ZoneId::ComboClear(field) => {
                // Clearing keeps the panel as it was, so no set_focus(true).
                self.blur_other(field);
                self.focus.focus(field);
                if let Some(change) = self.combo_mut(field).clear() {
                    self.apply_combo_change(field, change);
                }
            }
            ZoneId::ComboRow(field, position) => {
                if let Some(change) = self.combo_mut(field).select(position) {
                    self.apply_combo_change(field, change);
                }
            }
            ZoneId::ComboPanel(_) | ZoneId::CategoryPanel => {}
            ZoneId::Chip(position) => {
                let label = self.categories.selected().get(position).cloned();
                if let Some(selected) = label.and_then(|l| self.categories.remove(&l)) {
                    self.form.set_categories(selected);
                }
            }
            ZoneId::CategoryRow(index) => {
                if let Some(label) = self.categories.options().get(index).cloned() {
                    self.categories.hover(index);
                    let selected = self.categories.toggle(&label);
                    self.form.set_categories(selected);
                }
            }
        }
        AppAction::None
    }

    fn hover(&mut self, x: u16, y: u16) {
        match self.zones.find(x, y) {
            Some(ZoneId::ComboRow(field, position)) => self.combo_mut(field).hover(position),
            Some(ZoneId::CategoryRow(index)) => self.categories.hover(index),
            _ => {}
        }
    }

    fn scroll(&mut self, x: u16, y: u16, delta: isize) {
        match self.zones.find(x, y) {
            Some(ZoneId::ComboPanel(field) | ZoneId::ComboRow(field, _)) => {
                self.combo_mut(field).scroll(delta)
            }
            Some(ZoneId::CategoryPanel | ZoneId::CategoryRow(_)) => self.categories.scroll(delta),
            _ => {}
        }
    }

    // ------------------------------------------------------------------
    // Footer
    // ------------------------------------------------------------------

    /// Hints for the focused field followed by the global ones.
    pub fn key_hints(&self) -> Vec<(&'static str, &'static str)> {
        let mut hints = match self.focus.current() {
            Some(Field::Country) => self.country.key_hints(),
            Some(Field::Region) => self.region.key_hints(),
            Some(Field::City) => self.city.key_hints(),
            Some(Field::Categories) => self.categories.key_hints(),
            Some(Field::FoundedYear) => self.founded_year.key_hints(),
            Some(Field::Submit) => vec![("Enter", "Predict")],
            None => Vec::new(),
        };
        hints.extend([("Tab", "Next"), ("Ctrl+S", "Predict"), ("Ctrl+Q", "Quit")]);
        hints
    }
}
