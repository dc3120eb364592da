//! Stage reporting for pipeline runs.

use serde::Serialize;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    WordFilter,
    SyllableSplit,
    Flatten,
    SubwordFilter,
    CharacterSplit,
    Reassembly,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WordFilter => "word_filter",
            Self::SyllableSplit => "syllable_split",
            Self::Flatten => "flatten",
            Self::SubwordFilter => "subword_filter",
            Self::CharacterSplit => "character_split",
            Self::Reassembly => "reassembly",
        }
    }
}

/// What a stage produced and how long it took. `items` counts the stage's
/// main output: vocabulary entries for filters, rewritten words for
/// splitters, tokens for flatten, bytes for reassembly.
#[derive(Debug, Clone, Serialize)]
pub struct StageReport {
    pub stage: Stage,
    pub items: usize,
    pub elapsed: Duration,
}

/// Receives a report after each pipeline stage.
pub trait StageObserver: Send + Sync {
    fn on_stage(&self, report: &StageReport);
}

/// Emits each report as a `tracing` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl StageObserver for TracingObserver {
    fn on_stage(&self, report: &StageReport) {
        tracing::info!(
            stage = report.stage.as_str(),
            items = report.items,
            elapsed_us = report.elapsed.as_micros() as u64,
            "stage complete"
        );
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl StageObserver for NullObserver {
    fn on_stage(&self, _report: &StageReport) {}
}

/// Keeps every report; handy for inspecting a run after the fact.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    reports: Mutex<Vec<StageReport>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<StageReport> {
        self.reports.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn stages(&self) -> Vec<Stage> {
        self.reports().iter().map(|r| r.stage).collect()
    }
}

impl StageObserver for RecordingObserver {
    fn on_stage(&self, report: &StageReport) {
        if let Ok(mut reports) = self.reports.lock() {
            reports.push(report.clone());
        }
    }
}
