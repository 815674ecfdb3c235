//! Conway's B3/S23 transition rule

/// Game of Life rules engine
pub struct GameOfLifeRules;

impl GameOfLifeRules {
    /// Counts for which a live cell survives
    pub const SURVIVAL_COUNTS: [u8; 2] = [2, 3];

    /// Counts for which a dead cell is born
    pub const BIRTH_COUNTS: [u8; 1] = [3];

    /// Check if a cell should be alive in the next generation given its current state and
    /// neighbor count
    pub fn should_be_alive(current_state: bool, neighbor_count: u8) -> bool {
        if current_state {
            Self::SURVIVAL_COUNTS.contains(&neighbor_count)
        } else {
            Self::BIRTH_COUNTS.contains(&neighbor_count)
        }
    }

    /// Get the maximum possible neighbor count for any cell, used to size the neighbor tally
    pub fn max_neighbor_count() -> u8 {
        8 // Moore neighborhood
    }
}
