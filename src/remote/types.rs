use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Number of equalizer bands the player exposes.
pub const NUM_BANDS: usize = 10;

/// Nominal equalizer gain range in dB, shared by the preamp and every band.
/// The player clamps; this crate forwards values as given.
pub const BAND_MIN: f32 = -20.0;
pub const BAND_MAX: f32 = 20.0;

/// Nominal volume range. Out-of-range values are forwarded uncapped.
pub const VOL_MIN: i32 = 0;
pub const VOL_MAX: i32 = 100;

/// Selects which running player instance a handle addresses.
///
/// Session 0 is the first instance and the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Session(pub u32);

impl Session {
    pub fn id(self) -> u32 {
        self.0
    }
}

impl From<u32> for Session {
    fn from(id: u32) -> Self {
        Session(id)
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One playlist slot as the player reported it at call time.
///
/// Entries are views, never cached: reading the playlist again re-queries
/// the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistEntry {
    pub title: String,
    pub file: String,
    /// `None` when the player does not know the length (streams).
    pub duration: Option<Duration>,
}

/// Equalizer state: overall preamp gain plus the ten band gains, in dB.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Equalizer {
    pub preamp: f32,
    pub bands: [f32; NUM_BANDS],
}

/// Stream facts for whatever is currently playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackInfo {
    /// Bitrate in bits per second.
    pub bitrate: u32,
    /// Sample frequency in Hz.
    pub frequency: u32,
    pub channels: u32,
}
