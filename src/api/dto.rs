//! Wire Types
//!
//! JSON bodies exchanged with the planner server.

use serde::{Deserialize, Serialize};

/// `GET /api/profile` response.
///
/// The server returns the whole profile row; only `level` and `xp` are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub level: u32,
    pub xp: u32,
}

impl Profile {
    /// Progress through the current XP band, in percent (`0.0..100.0`)
    pub fn band_progress(&self, xp_per_level: u32) -> f64 {
        let band = xp_per_level.max(1);
        // Multiply before dividing so whole percentages stay exact
        f64::from(self.xp % band) * 100.0 / f64::from(band)
    }
}

/// `POST /api/chat` request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// `POST /api/chat` response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}
