use std::time::Duration;

use crate::error::{Error, Result};
use crate::remote::{ControlSurface, Equalizer, PlaybackInfo, PlaylistEntry, Session, NUM_BANDS};
use crate::wire::SocketControl;

/// A handle bound to one running player instance.
///
/// The session identifier is fixed at construction; every call forwards it to
/// the control surface. The handle holds no player state of its own, so calls
/// are independent and reads always reflect the player at call time.
///
/// Construction never probes whether the instance exists. The first call that
/// actually needs the player reports the failure (see
/// [`crate::Error::Transport`]), and [`RemoteSession::is_running`] answers the
/// liveness question without erroring.
///
/// ```no_run
/// use amp_remote::RemoteSession;
///
/// let remote = RemoteSession::local();
/// remote.add(&["intro.flac", "main.flac"], false)?;
/// remote.play()?;
/// println!("now playing: {}", remote.current_title()?);
/// # Ok::<(), amp_remote::Error>(())
/// ```
pub struct RemoteSession<C> {
    session: Session,
    control: C,
}

impl RemoteSession<SocketControl> {
    /// Handle for the first local instance (session 0) over the default
    /// control socket directory.
    pub fn local() -> Self {
        Self::new(SocketControl::default())
    }

    /// Handle for local instance `session`.
    pub fn local_session(session: u32) -> Self {
        Self::with_session(SocketControl::default(), session)
    }
}

impl<C: ControlSurface> RemoteSession<C> {
    /// Binds session 0, the conventional first instance.
    pub fn new(control: C) -> Self {
        Self::with_session(control, Session::default())
    }

    pub fn with_session(control: C, session: impl Into<Session>) -> Self {
        Self {
            session: session.into(),
            control,
        }
    }

    pub fn session(&self) -> Session {
        self.session
    }

    pub fn control(&self) -> &C {
        &self.control
    }

    // ── Transport control ──────────────────────────────────────────────

    pub fn play(&self) -> Result<()> {
        self.control.play(self.session)
    }

    pub fn pause(&self) -> Result<()> {
        self.control.pause(self.session)
    }

    pub fn stop(&self) -> Result<()> {
        self.control.stop(self.session)
    }

    /// Press the eject button (toggles the add-file dialog).
    pub fn eject(&self) -> Result<()> {
        self.control.eject(self.session)
    }

    /// Ask the player process to exit.
    pub fn quit(&self) -> Result<()> {
        self.control.quit(self.session)
    }

    pub fn play_pause(&self) -> Result<()> {
        self.control.play_pause(self.session)
    }

    pub fn is_playing(&self) -> Result<bool> {
        self.control.is_playing(self.session)
    }

    pub fn is_paused(&self) -> Result<bool> {
        self.control.is_paused(self.session)
    }

    // ── Playlist ───────────────────────────────────────────────────────

    /// The whole playlist, assembled entry by entry from the player.
    pub fn playlist(&self) -> Result<Vec<PlaylistEntry>> {
        let len = self.control.playlist_length(self.session)?;
        (0..len).map(|position| self.entry(position)).collect()
    }

    /// The entry at an explicit position. Out-of-range positions are
    /// forwarded as-is; the player decides what they yield.
    pub fn entry(&self, position: u32) -> Result<PlaylistEntry> {
        Ok(PlaylistEntry {
            title: self.control.playlist_title(self.session, position)?,
            file: self.control.playlist_file(self.session, position)?,
            duration: self.control.playlist_time(self.session, position)?,
        })
    }

    /// Loads `paths` into the playlist. `enqueue = false` replaces the
    /// current playlist, `true` appends. At least one path is required.
    pub fn add<S: AsRef<str>>(&self, paths: &[S], enqueue: bool) -> Result<()> {
        if paths.is_empty() {
            return Err(Error::EmptyAdd);
        }
        let paths: Vec<&str> = paths.iter().map(|p| p.as_ref()).collect();
        self.control.playlist_add(self.session, &paths, enqueue)
    }

    /// Appends a URL to the playlist.
    pub fn add_url(&self, url: &str) -> Result<()> {
        self.control.add_url(self.session, url)
    }

    /// Inserts a URL at an explicit playlist position.
    pub fn insert_url(&self, url: &str, position: u32) -> Result<()> {
        self.control.insert_url(self.session, url, position)
    }

    pub fn delete(&self, position: u32) -> Result<()> {
        self.control.delete(self.session, position)
    }

    pub fn clear(&self) -> Result<()> {
        self.control.clear(self.session)
    }

    pub fn position(&self) -> Result<u32> {
        self.control.get_position(self.session)
    }

    pub fn set_position(&self, position: u32) -> Result<()> {
        self.control.set_position(self.session, position)
    }

    pub fn current_file(&self) -> Result<String> {
        let position = self.position()?;
        self.control.playlist_file(self.session, position)
    }

    pub fn file_at(&self, position: u32) -> Result<String> {
        self.control.playlist_file(self.session, position)
    }

    pub fn current_title(&self) -> Result<String> {
        let position = self.position()?;
        self.control.playlist_title(self.session, position)
    }

    pub fn title_at(&self, position: u32) -> Result<String> {
        self.control.playlist_title(self.session, position)
    }

    pub fn current_duration(&self) -> Result<Option<Duration>> {
        let position = self.position()?;
        self.control.playlist_time(self.session, position)
    }

    pub fn duration_at(&self, position: u32) -> Result<Option<Duration>> {
        self.control.playlist_time(self.session, position)
    }

    // ── Time and track seeking ─────────────────────────────────────────

    /// Elapsed output time of the current track.
    pub fn output_time(&self) -> Result<Duration> {
        self.control.output_time(self.session)
    }

    /// Seeks within the current track.
    pub fn jump_to_time(&self, position: Duration) -> Result<()> {
        self.control.jump_to_time(self.session, position)
    }

    pub fn previous(&self) -> Result<()> {
        self.control.previous(self.session)
    }

    pub fn next(&self) -> Result<()> {
        self.control.next(self.session)
    }

    // ── Volume and balance ─────────────────────────────────────────────

    /// Independent left/right levels, nominally 0..=100.
    pub fn stereo_volume(&self) -> Result<(i32, i32)> {
        self.control.stereo_volume(self.session)
    }

    /// Values outside 0..=100 are passed through uncapped; the player
    /// reconciles them.
    pub fn set_stereo_volume(&self, left: i32, right: i32) -> Result<()> {
        self.control.set_stereo_volume(self.session, left, right)
    }

    pub fn volume(&self) -> Result<i32> {
        self.control.main_volume(self.session)
    }

    pub fn set_volume(&self, volume: i32) -> Result<()> {
        self.control.set_main_volume(self.session, volume)
    }

    /// Signed balance; the sign convention belongs to the player.
    pub fn balance(&self) -> Result<i32> {
        self.control.balance(self.session)
    }

    pub fn set_balance(&self, balance: i32) -> Result<()> {
        self.control.set_balance(self.session, balance)
    }

    // ── Skin ───────────────────────────────────────────────────────────

    pub fn skin(&self) -> Result<String> {
        self.control.skin(self.session)
    }

    pub fn set_skin(&self, path: &str) -> Result<()> {
        self.control.set_skin(self.session, path)
    }

    // ── Windows ────────────────────────────────────────────────────────

    pub fn set_main_window_visible(&self, visible: bool) -> Result<()> {
        self.control.set_main_window_visible(self.session, visible)
    }

    pub fn set_playlist_window_visible(&self, visible: bool) -> Result<()> {
        self.control.set_playlist_window_visible(self.session, visible)
    }

    pub fn set_equalizer_window_visible(&self, visible: bool) -> Result<()> {
        self.control.set_equalizer_window_visible(self.session, visible)
    }

    pub fn is_main_window_visible(&self) -> Result<bool> {
        self.control.is_main_window_visible(self.session)
    }

    pub fn is_playlist_window_visible(&self) -> Result<bool> {
        self.control.is_playlist_window_visible(self.session)
    }

    pub fn is_equalizer_window_visible(&self) -> Result<bool> {
        self.control.is_equalizer_window_visible(self.session)
    }

    pub fn show_preferences(&self) -> Result<()> {
        self.control.show_preferences(self.session)
    }

    pub fn set_always_on_top(&self, on_top: bool) -> Result<()> {
        self.control.set_always_on_top(self.session, on_top)
    }

    // ── Repeat and shuffle ─────────────────────────────────────────────

    /// Flips the repeat flag. There is no direct setter in the protocol;
    /// read the flag back with [`RemoteSession::is_repeat`].
    pub fn toggle_repeat(&self) -> Result<()> {
        self.control.toggle_repeat(self.session)
    }

    pub fn is_repeat(&self) -> Result<bool> {
        self.control.is_repeat(self.session)
    }

    pub fn toggle_shuffle(&self) -> Result<()> {
        self.control.toggle_shuffle(self.session)
    }

    pub fn is_shuffle(&self) -> Result<bool> {
        self.control.is_shuffle(self.session)
    }

    // ── Equalizer ──────────────────────────────────────────────────────

    pub fn equalizer(&self) -> Result<Equalizer> {
        self.control.equalizer(self.session)
    }

    pub fn set_equalizer(&self, preamp: f32, bands: [f32; NUM_BANDS]) -> Result<()> {
        self.control
            .set_equalizer(self.session, &Equalizer { preamp, bands })
    }

    pub fn preamp(&self) -> Result<f32> {
        self.control.preamp(self.session)
    }

    pub fn set_preamp(&self, preamp: f32) -> Result<()> {
        self.control.set_preamp(self.session, preamp)
    }

    /// Gain of one band; `index` must be below [`NUM_BANDS`].
    pub fn band(&self, index: usize) -> Result<f32> {
        check_band(index)?;
        self.control.band(self.session, index)
    }

    pub fn set_band(&self, index: usize, value: f32) -> Result<()> {
        check_band(index)?;
        self.control.set_band(self.session, index, value)
    }

    // ── Introspection ──────────────────────────────────────────────────

    pub fn playback_info(&self) -> Result<PlaybackInfo> {
        self.control.playback_info(self.session)
    }

    /// Whether the bound instance answers at all. Never errors.
    pub fn is_running(&self) -> bool {
        self.control.is_running(self.session)
    }

    /// Control protocol version spoken by the player.
    pub fn version(&self) -> Result<u32> {
        self.control.version(self.session)
    }
}

fn check_band(index: usize) -> Result<()> {
    if index >= NUM_BANDS {
        return Err(Error::BandOutOfRange(index));
    }
    Ok(())
}
