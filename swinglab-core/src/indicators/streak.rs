//! Up/down streak counter.
//!
//! Each position is classified "up" when its value exceeds the previous one
//! (the first position is never up). A run of equal classifications counts
//! 1, 2, 3, ...; the stored value is negative for runs that are not up.
//!
//! The counter is explicit scan state: a fresh [`StreakState`] is created per
//! pass, so repeated or concurrent passes never share state.

/// Accumulator threaded through a single left-to-right pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreakState {
    previous_direction: Option<bool>,
    run_length: u32,
}

impl StreakState {
    /// Advance by one classification and return the signed streak value.
    pub fn advance(&mut self, up: bool) -> f64 {
        self.run_length = if self.previous_direction == Some(up) {
            self.run_length + 1
        } else {
            1
        };
        self.previous_direction = Some(up);

        let magnitude = f64::from(self.run_length);
        if up {
            magnitude
        } else {
            -magnitude
        }
    }

    pub fn run_length(&self) -> u32 {
        self.run_length
    }
}

/// Signed streak value for every position of `values`.
pub fn streak_of_series(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .enumerate()
        .scan(StreakState::default(), |state, (t, &v)| {
            let up = t > 0 && v > values[t - 1];
            Some(state.advance(up))
        })
        .collect()
}
