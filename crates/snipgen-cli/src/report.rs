use snipgen_core::{EvaluationRecord, Snippet, Strategy};
use std::time::{SystemTime, UNIX_EPOCH};

/// Everything one strategy produced for the run, ready to print or to
/// serialize into the JSON artifact.
pub struct StrategyRun {
    pub strategy: Strategy,
    pub records: Vec<EvaluationRecord>,
    pub warnings: Vec<String>,
    pub elapsed_ms: u128,
}

impl StrategyRun {
    /// Collect per-URL degradation notes (fetch failures and the like)
    /// so the report can say why a snippet is degenerate.
    pub fn warnings_from(snippets: &[Snippet]) -> Vec<String> {
        snippets
            .iter()
            .filter_map(|s| s.warning.as_ref().map(|w| format!("{}: {w}", s.url)))
            .collect()
    }
}

pub fn now_epoch_s() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Human-readable listing for one strategy: heading, then per URL the
/// index, URL, both snippets, and the distance (or "not computable").
pub fn render_strategy(run: &StrategyRun) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "\n{}. {}\n   ({})\n",
        run.strategy.number(),
        run.strategy.name(),
        run.strategy.description()
    ));
    for (i, r) in run.records.iter().enumerate() {
        out.push_str(&format!("\n{}. {}\n", i + 1, r.url));
        out.push_str(&format!("Reference Snippet: {}\n", r.reference_snippet));
        out.push_str(&format!("Generated Snippet: {}\n", r.generated_snippet));
        match r.distance {
            Some(d) => out.push_str(&format!("Word Mover's Distance: {d:.4}\n")),
            None => out.push_str("Word Mover's Distance: not computable\n"),
        }
    }
    for w in &run.warnings {
        out.push_str(&format!("warning: {w}\n"));
    }
    out
}

/// JSON artifact mirroring the printed report (schema_version 1).
pub fn artifact(
    query: &str,
    provider: &str,
    runs: &[StrategyRun],
    generated_at_epoch_s: u64,
) -> serde_json::Value {
    let strategies: Vec<serde_json::Value> = runs
        .iter()
        .map(|run| {
            serde_json::json!({
                "number": run.strategy.number(),
                "name": run.strategy.name(),
                "query_dependent": run.strategy.is_query_dependent(),
                "elapsed_ms": run.elapsed_ms,
                "records": run.records,
                "warnings": run.warnings,
            })
        })
        .collect();

    serde_json::json!({
        "schema_version": 1,
        "kind": "snipgen_report",
        "generated_at_epoch_s": generated_at_epoch_s,
        "query": query,
        "provider": provider,
        "strategies": strategies,
    })
}
