use serde::{Deserialize, Serialize};

/// Scoring-rule toggles for the double-valued yakuman variants.
///
/// The defaults follow the common ruleset where the limit-hand bonuses are
/// enabled: thirteen-sided kokushi, pair-wait suuankou, and pure nine-sided
/// chuuren score double, and daisuushii is always double.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoringRule {
    pub is_kokushi_13_wait_double: bool,
    pub is_suuankou_tanki_double: bool,
    pub is_junsei_chuuren_double: bool,
    pub is_daisuushii_double: bool,
}

impl Default for ScoringRule {
    fn default() -> Self {
        Self {
            is_kokushi_13_wait_double: true,
            is_suuankou_tanki_double: true,
            is_junsei_chuuren_double: true,
            is_daisuushii_double: true,
        }
    }
}

impl ScoringRule {
    /// Every yakuman scores single, as under Tenhou rules.
    pub fn single_yakuman() -> Self {
        Self {
            is_kokushi_13_wait_double: false,
            is_suuankou_tanki_double: false,
            is_junsei_chuuren_double: false,
            is_daisuushii_double: false,
        }
    }
}
