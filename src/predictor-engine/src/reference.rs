//! Reference data loading (regions, cities, categories).
//!
//! The three lists load independently. Each list carries its own loading
//! flag, and a failed load leaves that list empty without affecting the
//! others or blocking the form.

use std::sync::Arc;

use predictor_client::{PredictorApi, PredictorError};
use predictor_protocol::ReferenceKind;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// One reference list and its load state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceList {
    pub options: Vec<String>,
    pub loading: bool,
    /// Message of the last failed load, cleared by the next success.
    pub last_error: Option<String>,
}

impl ReferenceList {
    /// `Loading regions...` / `12 regions available`.
    pub fn status_line(&self, kind: ReferenceKind) -> String {
        if self.loading {
            format!("Loading {kind}...")
        } else {
            format!("{} {kind} available", self.options.len())
        }
    }
}

/// Result of one reference load, sent from a loader task to the UI.
#[derive(Debug)]
pub struct ReferenceUpdate {
    pub kind: ReferenceKind,
    pub result: Result<Vec<String>, PredictorError>,
}

/// The three reference lists used by the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceData {
    pub regions: ReferenceList,
    pub cities: ReferenceList,
    pub categories: ReferenceList,
}

impl ReferenceData {
    pub fn list(&self, kind: ReferenceKind) -> &ReferenceList {
        match kind {
            ReferenceKind::Regions => &self.regions,
            ReferenceKind::Cities => &self.cities,
            ReferenceKind::Categories => &self.categories,
        }
    }

    fn list_mut(&mut self, kind: ReferenceKind) -> &mut ReferenceList {
        match kind {
            ReferenceKind::Regions => &mut self.regions,
            ReferenceKind::Cities => &mut self.cities,
            ReferenceKind::Categories => &mut self.categories,
        }
    }

    /// Mark `kind` as loading before its request is dispatched.
    pub fn begin(&mut self, kind: ReferenceKind) {
        self.list_mut(kind).loading = true;
    }

    pub fn begin_all(&mut self) {
        for kind in ReferenceKind::ALL {
            self.begin(kind);
        }
    }

    /// Apply a finished load. Failures empty the list and are only logged.
    pub fn finish(&mut self, kind: ReferenceKind, result: Result<Vec<String>, PredictorError>) {
        let list = self.list_mut(kind);
        list.loading = false;
        match result {
            Ok(options) => {
                tracing::debug!(count = options.len(), "loaded {kind}");
                list.options = options;
                list.last_error = None;
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to load {kind}; continuing with an empty list");
                list.options.clear();
                list.last_error = Some(err.to_string());
            }
        }
    }

    pub fn apply(&mut self, update: ReferenceUpdate) {
        self.finish(update.kind, update.result);
    }

    /// Whether any list is still loading.
    pub fn is_loading(&self) -> bool {
        ReferenceKind::ALL.iter().any(|k| self.list(*k).loading)
    }
}

/// Load all three lists concurrently and wait for them.
pub async fn load_all(api: &dyn PredictorApi) -> ReferenceData {
    let mut data = ReferenceData::default();
    data.begin_all();

    let (regions, cities, categories) = tokio::join!(
        api.fetch_reference(ReferenceKind::Regions),
        api.fetch_reference(ReferenceKind::Cities),
        api.fetch_reference(ReferenceKind::Categories),
    );

    data.finish(ReferenceKind::Regions, regions);
    data.finish(ReferenceKind::Cities, cities);
    data.finish(ReferenceKind::Categories, categories);
    data
}

/// Spawn one task per list; each reports through `tx` when done.
///
/// Call [`ReferenceData::begin_all`] first so the lists show as loading.
pub fn spawn_loads(
    api: Arc<dyn PredictorApi>,
    tx: mpsc::UnboundedSender<ReferenceUpdate>,
) -> Vec<JoinHandle<()>> {
    ReferenceKind::ALL
        .into_iter()
        .map(|kind| {
            let api = Arc::clone(&api);
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = api.fetch_reference(kind).await;
                if tx.send(ReferenceUpdate { kind, result }).is_err() {
                    tracing::debug!("reference receiver dropped before {kind} finished loading");
                }
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_line() {
        let mut list = ReferenceList {
            loading: true,
            ..Default::default()
        };
        assert_eq!(list.status_line(ReferenceKind::Regions), "Loading regions...");

        list.loading = false;
        list.options = vec!["A".into(), "B".into()];
        assert_eq!(list.status_line(ReferenceKind::Cities), "2 cities available");
    }

    #[test]
    fn test_finish_failure_empties_list() {
        let mut data = ReferenceData::default();
        data.begin_all();
        data.finish(ReferenceKind::Cities, Ok(vec!["Austin".into()]));
        assert!(data.is_loading());

        data.begin(ReferenceKind::Cities);
        data.finish(
            ReferenceKind::Cities,
            Err(PredictorError::Api {
                status: 500,
                message: "API Error: 500".into(),
            }),
        );
        assert!(data.cities.options.is_empty());
        assert!(!data.cities.loading);
        assert_eq!(data.cities.last_error.as_deref(), Some("API Error: 500"));
    }
}
