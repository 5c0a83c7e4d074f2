//! Shared fixtures: a canned `PredictorApi`, input events and screen helpers.

use std::collections::BTreeMap;

use async_trait::async_trait;
use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use predictor_client::{PredictorApi, Result};
use predictor_engine::ReferenceUpdate;
use predictor_protocol::{
    ConfidenceTier, ExplainResponse, FactorDto, Impact, PredictRequest, PredictionSummary,
    ReferenceKind,
};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;

use crate::app::App;
use crate::views;

pub fn regions() -> Vec<String> {
    vec!["California".into(), "New York".into(), "Texas".into()]
}

pub fn cities() -> Vec<String> {
    vec!["Austin".into(), "New York".into(), "San Francisco".into()]
}

pub fn categories() -> Vec<String> {
    vec!["ai".into(), "fintech".into(), "software".into()]
}

pub fn explain_response(probability: f64, confidence: ConfidenceTier) -> ExplainResponse {
    ExplainResponse {
        prediction: PredictionSummary {
            success_probability: probability,
            prediction: u8::from(probability >= 0.5),
            model_used: "xgboost".to_string(),
            confidence,
        },
        feature_importance: BTreeMap::from([
            ("founded_year".to_string(), 0.21),
            ("region_other".to_string(), -0.04),
        ]),
        top_factors: vec![
            FactorDto {
                feature: "founded_year".to_string(),
                importance: 0.21,
                impact: Impact::Positive,
            },
            FactorDto {
                feature: "region_other".to_string(),
                importance: -0.04,
                impact: Impact::Negative,
            },
        ],
    }
}

/// Service that always answers with the fixtures above.
pub struct FakeApi;

#[async_trait]
impl PredictorApi for FakeApi {
    async fn fetch_reference(&self, kind: ReferenceKind) -> Result<Vec<String>> {
        Ok(match kind {
            ReferenceKind::Regions => regions(),
            ReferenceKind::Cities => cities(),
            ReferenceKind::Categories => categories(),
        })
    }

    async fn predict_explain(&self, _request: &PredictRequest) -> Result<ExplainResponse> {
        Ok(explain_response(0.82, ConfidenceTier::High))
    }
}

/// An app whose three reference lists have finished loading.
pub fn loaded_app() -> App {
    let mut app = App::new();
    app.begin_reference_load();
    for (kind, options) in [
        (ReferenceKind::Regions, regions()),
        (ReferenceKind::Cities, cities()),
        (ReferenceKind::Categories, categories()),
    ] {
        app.apply_reference(ReferenceUpdate {
            kind,
            result: Ok(options),
        });
    }
    app
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

pub fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        app.handle_key(key(KeyCode::Char(c)));
    }
}

pub fn press(x: u16, y: u16) -> MouseEvent {
    MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column: x,
        row: y,
        modifiers: KeyModifiers::NONE,
    }
}

pub fn moved(x: u16, y: u16) -> MouseEvent {
    MouseEvent {
        kind: MouseEventKind::Moved,
        column: x,
        row: y,
        modifiers: KeyModifiers::NONE,
    }
}

/// Render one 100x30 frame and return its buffer.
pub fn draw(app: &mut App) -> Buffer {
    let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
    terminal.draw(|frame| views::render(frame, app)).unwrap();
    terminal.backend().buffer().clone()
}

/// Screen content, one line per row.
pub fn screen_text(buf: &Buffer) -> String {
    let area = buf.area;
    (area.top()..area.bottom())
        .map(|y| {
            (area.left()..area.right())
                .map(|x| buf[(x, y)].symbol())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Position of the first cell where `needle` starts, one char per cell.
pub fn find_text(buf: &Buffer, needle: &str) -> Option<(u16, u16)> {
    let area = buf.area;
    let chars: Vec<String> = needle.chars().map(|c| c.to_string()).collect();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            let fits = chars.iter().enumerate().all(|(i, c)| {
                let cx = x + i as u16;
                cx < area.right() && buf[(cx, y)].symbol() == c
            });
            if fits {
                return Some((x, y));
            }
        }
    }
    None
}
