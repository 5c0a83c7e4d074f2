//! `predictor reference`: print the reference lists.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::process::ExitCode;

use anyhow::Result;
use predictor_client::PredictorApi;
use predictor_engine::{ReferenceData, load_all};
use predictor_protocol::ReferenceKind;
use tracing::warn;

use crate::cli::{ReferenceArgs, ReferenceTarget};

impl ReferenceArgs {
    /// Fetch the requested lists and print them.
    ///
    /// A failed list prints as empty, the same way the form treats it.
    pub async fn run(self, api: &dyn PredictorApi) -> Result<ExitCode> {
        let data = fetch(api, self.list).await;
        let kinds = self.list.kinds();

        for kind in &kinds {
            if let Some(err) = &data.list(*kind).last_error {
                warn!(error = %err, "could not load {kind}");
            }
        }

        if self.json {
            println!("{}", serde_json::to_string_pretty(&to_json(&data, &kinds))?);
        } else {
            print!("{}", render_text(&data, &kinds));
        }
        Ok(ExitCode::SUCCESS)
    }
}

async fn fetch(api: &dyn PredictorApi, target: ReferenceTarget) -> ReferenceData {
    if target == ReferenceTarget::All {
        return load_all(api).await;
    }

    let mut data = ReferenceData::default();
    for kind in target.kinds() {
        data.begin(kind);
        let result = api.fetch_reference(kind).await;
        data.finish(kind, result);
    }
    data
}

fn to_json<'a>(
    data: &'a ReferenceData,
    kinds: &[ReferenceKind],
) -> BTreeMap<&'static str, &'a [String]> {
    kinds
        .iter()
        .map(|kind| (kind.key(), data.list(*kind).options.as_slice()))
        .collect()
}

/// One heading per list with its entries indented below.
pub fn render_text(data: &ReferenceData, kinds: &[ReferenceKind]) -> String {
    let mut out = String::new();
    for (i, kind) in kinds.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let list = data.list(*kind);
        let _ = writeln!(out, "{}", list.status_line(*kind));
        for option in &list.options {
            let _ = writeln!(out, "  {option}");
        }
    }
    out
}
