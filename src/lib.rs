/*!
# memoria-quests

Quest catalog, milestone table, and progress queries for a long-running
story campaign organized into expansions, patches, and drawers.

- **Catalog**: merges every quest collection document under a data root
  into one immutable index, stamping provenance (expansion, patch,
  drawer) onto each record.
- **Milestone table**: the ordered patch-boundary checkpoints, answering
  "what is the furthest milestone this player has reached?".
- **Progress queries**: filtered totals and completion percentages per
  drawer and player context, plus a bounded incomplete-quest listing.

Completion state comes from a host-injected [`CompletionOracle`]; the
crate never reads game state itself and never caches oracle answers.

## Example

```rust,no_run
use memoria_quests::{
    Catalog, CatalogConfig, CompletionOracle, MilestoneTable, PlayerContext, ReportKind,
};

struct HostOracle;

impl CompletionOracle for HostOracle {
    fn is_complete(&self, quest_id: u32) -> bool {
        // Ask the game client about `quest_id` here.
        false
    }
}

let config = CatalogConfig::with_data_dir("Data");
let (catalog, warnings) = Catalog::load(&config);
let (toc, _) = MilestoneTable::load(&config.toc_path());
for warning in &warnings {
    eprintln!("{warning}");
}

let oracle = HostOracle;
let context = PlayerContext::detect(&config, &oracle);
let msq = memoria_quests::report(&catalog, ReportKind::MainScenario, &context, &oracle);
println!(
    "MSQ: {}/{} ({:.2}%), milestone {:?}",
    msq.completed,
    msq.total,
    msq.percentage,
    toc.highest_completed_milestone(&oracle),
);
```
*/

mod catalog;
mod config;
mod context;
mod error;
mod model;
mod oracle;
mod progress;
mod toc;

pub use catalog::{Catalog, LoadWarning};
pub use config::{CatalogConfig, Landmark};
pub use context::PlayerContext;
pub use error::{QuestDataError, Result};
pub use model::{CollectionDoc, Provenance, QuestRecord, RawQuest};
pub use oracle::{CompletionOracle, Disconnected};
pub use progress::{
    MAIN_SCENARIO_DRAWER, ProgressQuery, ProgressReport, ReportKind, compute_progress,
    incomplete_quests, report,
};
pub use toc::{MilestoneEntry, MilestoneRole, MilestoneTable};
