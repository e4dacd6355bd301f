use crate::errors::FeatureError;

// Hand-tuned constants carried over from the fitted model. Changing any of
// them changes what a trained model's coefficients mean, so they are named
// and overridable rather than buried in the math.
#[derive(Debug, Clone, Copy)]
pub struct FeatureParams {
    // Trailing weeks averaged into a team's "recent form".
    pub window: usize,
    // Games with fewer prior weeks than this on either side are skipped.
    pub min_history_weeks: usize,
    // Multiplier on the defensive/negative-indicator differentials.
    pub defensive_weight: f64,
}

impl Default for FeatureParams {
    fn default() -> Self {
        Self {
            window: 5,
            min_history_weeks: 3,
            defensive_weight: 2.0,
        }
    }
}

impl FeatureParams {
    pub fn validate(&self) -> Result<(), FeatureError> {
        if self.window == 0 {
            return Err(FeatureError::InvalidWindow(self.window));
        }
        Ok(())
    }
}
