//! Chart specifications and their lifecycle.
//!
//! A chart is built from [`ChartData`] into a backend-neutral [`ChartSpec`]
//! (the `type`/`data`/`options` shape plotting libraries such as Chart.js
//! take). [`ChartRegistry`] keeps at most one live chart per slot and
//! destroys the old one before a redraw creates its replacement.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use serde_json::json;

use crate::ui::summary::ChartData;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartSlot {
    Completion,
    Velocity,
}

impl ChartSlot {
    pub const ALL: [ChartSlot; 2] = [ChartSlot::Completion, ChartSlot::Velocity];

    /// DOM id of the canvas this chart draws into.
    pub fn canvas_id(self) -> &'static str {
        match self {
            ChartSlot::Completion => "completionChart",
            ChartSlot::Velocity => "velocityChart",
        }
    }

    pub fn spec(self, data: &ChartData) -> ChartSpec {
        match self {
            ChartSlot::Completion => completion_chart(data),
            ChartSlot::Velocity => velocity_chart(data),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Doughnut,
    Line,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: Vec<usize>,
    #[serde(flatten)]
    pub style: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartSeries,
    pub options: serde_json::Value,
}

pub fn completion_chart(data: &ChartData) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Doughnut,
        data: ChartSeries {
            labels: vec!["Completed".to_string(), "Pending".to_string()],
            datasets: vec![Dataset {
                label: None,
                data: vec![data.completion.completed, data.completion.pending],
                style: json!({
                    "backgroundColor": ["#34d399", "#fcd34d"],
                    "borderWidth": 0,
                }),
            }],
        },
        options: json!({
            "plugins": { "legend": { "display": true, "labels": { "color": "#cbd5f5" } } }
        }),
    }
}

pub fn velocity_chart(data: &ChartData) -> ChartSpec {
    let axis = json!({
        "ticks": { "color": "#cbd5f5" },
        "grid": { "color": "rgba(148, 163, 184, 0.1)" },
    });
    let mut y_axis = axis.clone();
    y_axis["beginAtZero"] = json!(true);

    ChartSpec {
        kind: ChartKind::Line,
        data: ChartSeries {
            labels: data.due_dates.iter().map(|p| p.date.to_string()).collect(),
            datasets: vec![Dataset {
                label: Some("Scheduled tasks".to_string()),
                data: data.due_dates.iter().map(|p| p.count).collect(),
                style: json!({
                    "fill": true,
                    "borderColor": "#818cf8",
                    "backgroundColor": "rgba(129, 140, 248, 0.2)",
                    "tension": 0.4,
                }),
            }],
        },
        options: json!({
            "plugins": { "legend": { "display": false } },
            "scales": { "x": axis, "y": y_axis },
        }),
    }
}

/// Something that can draw a chart and later tear it down.
pub trait ChartBackend {
    type Handle;

    fn create(&mut self, slot: ChartSlot, spec: &ChartSpec) -> Self::Handle;

    fn destroy(&mut self, handle: Self::Handle);
}

pub struct ChartRegistry<B: ChartBackend> {
    backend: B,
    live: HashMap<ChartSlot, B::Handle>,
}

impl<B: ChartBackend> ChartRegistry<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            live: HashMap::new(),
        }
    }

    pub fn redraw(&mut self, slot: ChartSlot, spec: &ChartSpec) {
        if let Some(previous) = self.live.remove(&slot) {
            self.backend.destroy(previous);
        }
        let handle = self.backend.create(slot, spec);
        self.live.insert(slot, handle);
    }

    pub fn redraw_all(&mut self, data: &ChartData) {
        for slot in ChartSlot::ALL {
            self.redraw(slot, &slot.spec(data));
        }
    }

    pub fn clear(&mut self) {
        for (_, handle) in self.live.drain() {
            self.backend.destroy(handle);
        }
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

const BAR_WIDTH: usize = 20;

/// Draws charts as plain-text bars for terminal output.
#[derive(Debug, Default)]
pub struct TextCharts {
    drawn: BTreeMap<ChartSlot, Vec<String>>,
    created: usize,
    destroyed: usize,
}

impl TextCharts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines of every live chart, completion first.
    pub fn lines(&self) -> Vec<String> {
        self.drawn.values().flatten().cloned().collect()
    }

    pub fn created(&self) -> usize {
        self.created
    }

    pub fn destroyed(&self) -> usize {
        self.destroyed
    }
}

fn bar(value: usize, max: usize) -> String {
    let filled = if max == 0 { 0 } else { value * BAR_WIDTH / max };
    format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

impl ChartBackend for TextCharts {
    type Handle = ChartSlot;

    fn create(&mut self, slot: ChartSlot, spec: &ChartSpec) -> ChartSlot {
        let values = spec
            .data
            .datasets
            .first()
            .map(|dataset| dataset.data.clone())
            .unwrap_or_default();
        let max = match spec.kind {
            ChartKind::Doughnut => values.iter().sum(),
            ChartKind::Line => values.iter().copied().max().unwrap_or(0),
        };
        let width = spec.data.labels.iter().map(String::len).max().unwrap_or(0);

        let lines = spec
            .data
            .labels
            .iter()
            .zip(values.iter())
            .map(|(label, value)| format!("{label:<width$} {} {value}", bar(*value, max)))
            .collect();
        self.drawn.insert(slot, lines);
        self.created += 1;
        slot
    }

    fn destroy(&mut self, handle: ChartSlot) {
        self.drawn.remove(&handle);
        self.destroyed += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::summary::{CompletionRatio, DueDateCount};
    use chrono::NaiveDate;

    fn data() -> ChartData {
        ChartData {
            completion: CompletionRatio {
                completed: 1,
                pending: 3,
            },
            due_dates: vec![DueDateCount {
                date: NaiveDate::from_ymd_opt(2026, 10, 20).expect("date"),
                count: 2,
            }],
        }
    }

    #[test]
    fn completion_spec_serializes_for_plotting_library() {
        let value = serde_json::to_value(completion_chart(&data())).expect("json");
        assert_eq!(value["type"], "doughnut");
        assert_eq!(value["data"]["labels"][0], "Completed");
        assert_eq!(value["data"]["datasets"][0]["data"], json!([1, 3]));
        assert_eq!(value["data"]["datasets"][0]["borderWidth"], 0);
    }

    #[test]
    fn velocity_spec_uses_dates_as_labels() {
        let spec = velocity_chart(&data());
        assert_eq!(spec.data.labels, vec!["2026-10-20".to_string()]);
        assert_eq!(spec.data.datasets[0].data, vec![2]);
        assert_eq!(spec.options["scales"]["y"]["beginAtZero"], true);
    }

    #[test]
    fn redraw_destroys_previous_chart_in_slot() {
        let mut registry = ChartRegistry::new(TextCharts::new());
        registry.redraw_all(&data());
        registry.redraw_all(&data());
        assert_eq!(registry.live_count(), 2);
        assert_eq!(registry.backend().created(), 4);
        assert_eq!(registry.backend().destroyed(), 2);
    }

    #[test]
    fn clear_destroys_every_live_chart() {
        let mut registry = ChartRegistry::new(TextCharts::new());
        registry.redraw_all(&data());
        registry.clear();
        assert_eq!(registry.live_count(), 0);
        assert!(registry.backend().lines().is_empty());
    }

    #[test]
    fn text_bars_scale_to_largest_value() {
        let mut registry = ChartRegistry::new(TextCharts::new());
        registry.redraw(ChartSlot::Completion, &completion_chart(&data()));
        let lines = registry.backend().lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Completed"));
        assert!(lines[0].ends_with(" 1"));
        assert!(lines[1].contains(&"#".repeat(15)));
    }
}
