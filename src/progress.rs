use crate::catalog::Catalog;
use crate::context::PlayerContext;
use crate::model::QuestRecord;
use crate::oracle::CompletionOracle;
use serde::Serialize;
use tracing::debug;

/// Drawer holding the main scenario; everything under the `2-` prefix is a
/// secondary story arc.
pub const MAIN_SCENARIO_DRAWER: &str = "1-msq";
const SECONDARY_DRAWER_PREFIX: &str = "2-";

/// Filtered completion totals for one report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ProgressReport {
    pub total: usize,
    pub completed: usize,
    /// `completed / total * 100`, or 0 for an empty candidate set.
    pub percentage: f64,
}

impl ProgressReport {
    fn new(total: usize, completed: usize) -> Self {
        let percentage = if total > 0 {
            completed as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        Self {
            total,
            completed,
            percentage,
        }
    }
}

/// Which records a progress query runs over.
#[derive(Debug, Clone, Default)]
pub struct ProgressQuery {
    /// Restrict to one drawer; `None` spans the whole catalog.
    pub drawer: Option<String>,
    pub context: PlayerContext,
}

impl ProgressQuery {
    pub fn new(drawer: Option<String>, context: PlayerContext) -> Self {
        Self { drawer, context }
    }

    fn matches(&self, record: &QuestRecord) -> bool {
        self.drawer
            .as_deref()
            .is_none_or(|drawer| record.drawer == drawer)
            && constraint_matches(&record.start, &self.context.start_city)
            && constraint_matches(&record.gc, &self.context.grand_company)
    }
}

/// Empty on either side is a wildcard: an unconstrained record matches any
/// player, and an undetected player matches any record.
fn constraint_matches(constraint: &str, value: &str) -> bool {
    constraint.is_empty() || value.is_empty() || constraint == value
}

/// Count candidate and completed records for one query.
///
/// The oracle is consulted per candidate on every call; completion state
/// is volatile and never cached here.
pub fn compute_progress(
    catalog: &Catalog,
    query: &ProgressQuery,
    oracle: &impl CompletionOracle,
) -> ProgressReport {
    let mut total = 0;
    let mut completed = 0;
    for record in catalog.records() {
        if !query.matches(record) {
            continue;
        }
        total += 1;
        if record.is_complete(oracle) {
            completed += 1;
        }
    }
    debug!(
        "progress for drawer {:?}: {completed}/{total}",
        query.drawer
    );
    ProgressReport::new(total, completed)
}

/// First `limit` incomplete candidates in catalog order, for debugging
/// output.
pub fn incomplete_quests<'a>(
    catalog: &'a Catalog,
    query: &ProgressQuery,
    oracle: &impl CompletionOracle,
    limit: usize,
) -> Vec<&'a QuestRecord> {
    catalog
        .records()
        .iter()
        .filter(|record| query.matches(record) && !record.is_complete(oracle))
        .take(limit)
        .collect()
}

/// The named reports the presentation layer asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// Every record in the catalog.
    Overall,
    /// The `1-msq` drawer only.
    MainScenario,
    /// Every drawer under the `2-` prefix, aggregated.
    SecondaryArcs,
}

/// Compute one of the named reports for the given player context.
pub fn report(
    catalog: &Catalog,
    kind: ReportKind,
    context: &PlayerContext,
    oracle: &impl CompletionOracle,
) -> ProgressReport {
    match kind {
        ReportKind::Overall => compute_progress(
            catalog,
            &ProgressQuery::new(None, context.clone()),
            oracle,
        ),
        ReportKind::MainScenario => compute_progress(
            catalog,
            &ProgressQuery::new(Some(MAIN_SCENARIO_DRAWER.to_string()), context.clone()),
            oracle,
        ),
        ReportKind::SecondaryArcs => {
            let query = ProgressQuery::new(None, context.clone());
            let mut total = 0;
            let mut completed = 0;
            for record in catalog.records() {
                if !record.drawer.starts_with(SECONDARY_DRAWER_PREFIX) || !query.matches(record) {
                    continue;
                }
                total += 1;
                if record.is_complete(oracle) {
                    completed += 1;
                }
            }
            ProgressReport::new(total, completed)
        }
    }
}
