use crate::config::CatalogConfig;
use crate::config::Landmark;
use crate::oracle::CompletionOracle;
use tracing::debug;

/// Facts about the current player used to narrow progress filters.
///
/// Empty strings mean "unknown" and match every record-side constraint, so
/// an undetected player still gets correct unconstrained totals (including
/// every per-city quest variant) rather than a failed query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerContext {
    pub start_city: String,
    pub grand_company: String,
}

impl PlayerContext {
    /// Context with nothing detected; every filter becomes a wildcard.
    pub fn unknown() -> Self {
        Self::default()
    }

    pub fn new(start_city: impl Into<String>, grand_company: impl Into<String>) -> Self {
        Self {
            start_city: start_city.into(),
            grand_company: grand_company.into(),
        }
    }

    /// Detect starting city and grand company by probing the configured
    /// landmark quests in priority order; the first complete landmark
    /// wins. Facts with no complete landmark stay empty.
    pub fn detect(config: &CatalogConfig, oracle: &impl CompletionOracle) -> Self {
        let context = Self {
            start_city: detect_value(&config.start_city_landmarks, oracle),
            grand_company: detect_value(&config.grand_company_landmarks, oracle),
        };
        debug!(
            "detected player context: city={:?} gc={:?}",
            context.start_city, context.grand_company
        );
        context
    }
}

fn detect_value(landmarks: &[Landmark], oracle: &impl CompletionOracle) -> String {
    landmarks
        .iter()
        .find(|mark| mark.ids.iter().any(|&id| oracle.is_complete(id)))
        .map(|mark| mark.value.clone())
        .unwrap_or_default()
}
