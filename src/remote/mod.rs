pub mod session;
pub mod types;

pub use session::RemoteSession;
pub use types::{
    Equalizer, PlaybackInfo, PlaylistEntry, Session, BAND_MAX, BAND_MIN, NUM_BANDS, VOL_MAX,
    VOL_MIN,
};

use std::time::Duration;

use crate::error::Result;

/// The player's remote-control capability surface.
///
/// Every method takes the [`Session`] key so one transport can serve any
/// number of player instances. [`crate::wire::SocketControl`] implements this
/// over the control socket; tests substitute an in-memory player.
///
/// Implementations own all connectivity concerns. Nothing here prechecks
/// whether the addressed instance is alive; a dead session fails (or answers
/// degenerately) on the call itself.
pub trait ControlSurface {
    // Transport control.
    fn play(&self, session: Session) -> Result<()>;
    fn pause(&self, session: Session) -> Result<()>;
    fn stop(&self, session: Session) -> Result<()>;
    /// The player's eject button: opens or closes the add-file dialog.
    fn eject(&self, session: Session) -> Result<()>;
    fn quit(&self, session: Session) -> Result<()>;
    fn play_pause(&self, session: Session) -> Result<()>;
    fn is_playing(&self, session: Session) -> Result<bool>;
    fn is_paused(&self, session: Session) -> Result<bool>;

    // Playlist.
    fn playlist_length(&self, session: Session) -> Result<u32>;
    fn playlist_title(&self, session: Session, position: u32) -> Result<String>;
    fn playlist_file(&self, session: Session, position: u32) -> Result<String>;
    fn playlist_time(&self, session: Session, position: u32) -> Result<Option<Duration>>;
    /// Loads `paths` into the playlist; `enqueue` appends instead of
    /// replacing.
    fn playlist_add(&self, session: Session, paths: &[&str], enqueue: bool) -> Result<()>;
    fn add_url(&self, session: Session, url: &str) -> Result<()>;
    fn insert_url(&self, session: Session, url: &str, position: u32) -> Result<()>;
    fn delete(&self, session: Session, position: u32) -> Result<()>;
    fn clear(&self, session: Session) -> Result<()>;
    fn get_position(&self, session: Session) -> Result<u32>;
    fn set_position(&self, session: Session, position: u32) -> Result<()>;

    // Time and track seeking.
    fn output_time(&self, session: Session) -> Result<Duration>;
    fn jump_to_time(&self, session: Session, position: Duration) -> Result<()>;
    fn previous(&self, session: Session) -> Result<()>;
    fn next(&self, session: Session) -> Result<()>;

    // Volume and balance.
    fn stereo_volume(&self, session: Session) -> Result<(i32, i32)>;
    fn set_stereo_volume(&self, session: Session, left: i32, right: i32) -> Result<()>;
    fn main_volume(&self, session: Session) -> Result<i32>;
    fn set_main_volume(&self, session: Session, volume: i32) -> Result<()>;
    fn balance(&self, session: Session) -> Result<i32>;
    fn set_balance(&self, session: Session, balance: i32) -> Result<()>;

    // Skin.
    fn skin(&self, session: Session) -> Result<String>;
    fn set_skin(&self, session: Session, path: &str) -> Result<()>;

    // Window visibility and chrome.
    fn set_main_window_visible(&self, session: Session, visible: bool) -> Result<()>;
    fn set_playlist_window_visible(&self, session: Session, visible: bool) -> Result<()>;
    fn set_equalizer_window_visible(&self, session: Session, visible: bool) -> Result<()>;
    fn is_main_window_visible(&self, session: Session) -> Result<bool>;
    fn is_playlist_window_visible(&self, session: Session) -> Result<bool>;
    fn is_equalizer_window_visible(&self, session: Session) -> Result<bool>;
    fn show_preferences(&self, session: Session) -> Result<()>;
    fn set_always_on_top(&self, session: Session, on_top: bool) -> Result<()>;

    // Repeat and shuffle carry no direct setter in the protocol, only a
    // toggle plus a separate query.
    fn toggle_repeat(&self, session: Session) -> Result<()>;
    fn is_repeat(&self, session: Session) -> Result<bool>;
    fn toggle_shuffle(&self, session: Session) -> Result<()>;
    fn is_shuffle(&self, session: Session) -> Result<bool>;

    // Equalizer.
    fn equalizer(&self, session: Session) -> Result<Equalizer>;
    fn set_equalizer(&self, session: Session, eq: &Equalizer) -> Result<()>;
    fn preamp(&self, session: Session) -> Result<f32>;
    fn set_preamp(&self, session: Session, preamp: f32) -> Result<()>;
    fn band(&self, session: Session, index: usize) -> Result<f32>;
    fn set_band(&self, session: Session, index: usize, value: f32) -> Result<()>;

    // Introspection.
    fn playback_info(&self, session: Session) -> Result<PlaybackInfo>;
    /// Whether the addressed instance answers at all. Connectivity failures
    /// are the negative answer here, never an error.
    fn is_running(&self, session: Session) -> bool;
    /// The control protocol version the player speaks.
    fn version(&self, session: Session) -> Result<u32>;
}
