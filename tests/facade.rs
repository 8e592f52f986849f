//! Facade behavior against an in-memory player model.
//!
//! The stub stands in for a running player instance: it keeps playlist,
//! flags, volume and equalizer state behind a mutex and records which
//! session every call addressed.

use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use amp_remote::remote::{ControlSurface, Equalizer, PlaybackInfo, Session, NUM_BANDS};
use amp_remote::{Error, RemoteSession, Result};

#[derive(Default)]
struct Model {
    seen: Vec<Session>,
    playing: bool,
    paused: bool,
    playlist: Vec<String>,
    position: u32,
    output: Duration,
    volume: (i32, i32),
    balance: i32,
    skin: String,
    main_window: bool,
    playlist_window: bool,
    equalizer_window: bool,
    always_on_top: bool,
    repeat: bool,
    shuffle: bool,
    eq: Equalizer,
}

impl Model {
    fn file(&self, position: u32) -> String {
        // A real player answers garbage for out-of-range positions; empty
        // string is our garbage.
        self.playlist
            .get(position as usize)
            .cloned()
            .unwrap_or_default()
    }

    fn title(&self, position: u32) -> String {
        match self.playlist.get(position as usize) {
            Some(file) => format!("Title of {file}"),
            None => String::new(),
        }
    }

    fn time(&self, position: u32) -> Option<Duration> {
        self.playlist
            .get(position as usize)
            .map(|_| Duration::from_secs(60 + position as u64))
    }
}

#[derive(Default)]
struct StubControl(Mutex<Model>);

impl StubControl {
    fn model(&self, session: Session) -> MutexGuard<'_, Model> {
        let mut model = self.0.lock().unwrap();
        model.seen.push(session);
        model
    }

    fn sessions_seen(&self) -> Vec<Session> {
        self.0.lock().unwrap().seen.clone()
    }
}

impl ControlSurface for StubControl {
    fn play(&self, session: Session) -> Result<()> {
        let mut m = self.model(session);
        m.playing = true;
        m.paused = false;
        Ok(())
    }

    fn pause(&self, session: Session) -> Result<()> {
        self.model(session).paused = true;
        Ok(())
    }

    fn stop(&self, session: Session) -> Result<()> {
        let mut m = self.model(session);
        m.playing = false;
        m.paused = false;
        Ok(())
    }

    fn eject(&self, session: Session) -> Result<()> {
        self.model(session);
        Ok(())
    }

    fn quit(&self, session: Session) -> Result<()> {
        self.model(session);
        Ok(())
    }

    fn play_pause(&self, session: Session) -> Result<()> {
        let mut m = self.model(session);
        if m.playing {
            m.paused = !m.paused;
        } else {
            m.playing = true;
        }
        Ok(())
    }

    fn is_playing(&self, session: Session) -> Result<bool> {
        let playing = self.model(session).playing;
        Ok(playing)
    }

    fn is_paused(&self, session: Session) -> Result<bool> {
        let paused = self.model(session).paused;
        Ok(paused)
    }

    fn playlist_length(&self, session: Session) -> Result<u32> {
        let len = self.model(session).playlist.len();
        Ok(len as u32)
    }

    fn playlist_title(&self, session: Session, position: u32) -> Result<String> {
        let title = self.model(session).title(position);
        Ok(title)
    }

    fn playlist_file(&self, session: Session, position: u32) -> Result<String> {
        let file = self.model(session).file(position);
        Ok(file)
    }

    fn playlist_time(&self, session: Session, position: u32) -> Result<Option<Duration>> {
        let time = self.model(session).time(position);
        Ok(time)
    }

    fn playlist_add(&self, session: Session, paths: &[&str], enqueue: bool) -> Result<()> {
        let mut m = self.model(session);
        if !enqueue {
            m.playlist.clear();
            m.position = 0;
        }
        m.playlist.extend(paths.iter().map(|p| p.to_string()));
        Ok(())
    }

    fn add_url(&self, session: Session, url: &str) -> Result<()> {
        self.model(session).playlist.push(url.to_string());
        Ok(())
    }

    fn insert_url(&self, session: Session, url: &str, position: u32) -> Result<()> {
        let mut m = self.model(session);
        let at = (position as usize).min(m.playlist.len());
        m.playlist.insert(at, url.to_string());
        Ok(())
    }

    fn delete(&self, session: Session, position: u32) -> Result<()> {
        let mut m = self.model(session);
        if (position as usize) < m.playlist.len() {
            m.playlist.remove(position as usize);
        }
        Ok(())
    }

    fn clear(&self, session: Session) -> Result<()> {
        let mut m = self.model(session);
        m.playlist.clear();
        m.position = 0;
        Ok(())
    }

    fn get_position(&self, session: Session) -> Result<u32> {
        let position = self.model(session).position;
        Ok(position)
    }

    fn set_position(&self, session: Session, position: u32) -> Result<()> {
        self.model(session).position = position;
        Ok(())
    }

    fn output_time(&self, session: Session) -> Result<Duration> {
        let output = self.model(session).output;
        Ok(output)
    }

    fn jump_to_time(&self, session: Session, position: Duration) -> Result<()> {
        self.model(session).output = position;
        Ok(())
    }

    fn previous(&self, session: Session) -> Result<()> {
        let mut m = self.model(session);
        m.position = m.position.saturating_sub(1);
        Ok(())
    }

    fn next(&self, session: Session) -> Result<()> {
        self.model(session).position += 1;
        Ok(())
    }

    fn stereo_volume(&self, session: Session) -> Result<(i32, i32)> {
        let volume = self.model(session).volume;
        Ok(volume)
    }

    fn set_stereo_volume(&self, session: Session, left: i32, right: i32) -> Result<()> {
        self.model(session).volume = (left, right);
        Ok(())
    }

    fn main_volume(&self, session: Session) -> Result<i32> {
        let (left, right) = self.model(session).volume;
        Ok(left.max(right))
    }

    fn set_main_volume(&self, session: Session, volume: i32) -> Result<()> {
        self.model(session).volume = (volume, volume);
        Ok(())
    }

    fn balance(&self, session: Session) -> Result<i32> {
        let balance = self.model(session).balance;
        Ok(balance)
    }

    fn set_balance(&self, session: Session, balance: i32) -> Result<()> {
        self.model(session).balance = balance;
        Ok(())
    }

    fn skin(&self, session: Session) -> Result<String> {
        let skin = self.model(session).skin.clone();
        Ok(skin)
    }

    fn set_skin(&self, session: Session, path: &str) -> Result<()> {
        self.model(session).skin = path.to_string();
        Ok(())
    }

    fn set_main_window_visible(&self, session: Session, visible: bool) -> Result<()> {
        self.model(session).main_window = visible;
        Ok(())
    }

    fn set_playlist_window_visible(&self, session: Session, visible: bool) -> Result<()> {
        self.model(session).playlist_window = visible;
        Ok(())
    }

    fn set_equalizer_window_visible(&self, session: Session, visible: bool) -> Result<()> {
        self.model(session).equalizer_window = visible;
        Ok(())
    }

    fn is_main_window_visible(&self, session: Session) -> Result<bool> {
        let visible = self.model(session).main_window;
        Ok(visible)
    }

    fn is_playlist_window_visible(&self, session: Session) -> Result<bool> {
        let visible = self.model(session).playlist_window;
        Ok(visible)
    }

    fn is_equalizer_window_visible(&self, session: Session) -> Result<bool> {
        let visible = self.model(session).equalizer_window;
        Ok(visible)
    }

    fn show_preferences(&self, session: Session) -> Result<()> {
        self.model(session);
        Ok(())
    }

    fn set_always_on_top(&self, session: Session, on_top: bool) -> Result<()> {
        self.model(session).always_on_top = on_top;
        Ok(())
    }

    fn toggle_repeat(&self, session: Session) -> Result<()> {
        let mut m = self.model(session);
        m.repeat = !m.repeat;
        Ok(())
    }

    fn is_repeat(&self, session: Session) -> Result<bool> {
        let repeat = self.model(session).repeat;
        Ok(repeat)
    }

    fn toggle_shuffle(&self, session: Session) -> Result<()> {
        let mut m = self.model(session);
        m.shuffle = !m.shuffle;
        Ok(())
    }

    fn is_shuffle(&self, session: Session) -> Result<bool> {
        let shuffle = self.model(session).shuffle;
        Ok(shuffle)
    }

    fn equalizer(&self, session: Session) -> Result<Equalizer> {
        let eq = self.model(session).eq;
        Ok(eq)
    }

    fn set_equalizer(&self, session: Session, eq: &Equalizer) -> Result<()> {
        self.model(session).eq = *eq;
        Ok(())
    }

    fn preamp(&self, session: Session) -> Result<f32> {
        let preamp = self.model(session).eq.preamp;
        Ok(preamp)
    }

    fn set_preamp(&self, session: Session, preamp: f32) -> Result<()> {
        self.model(session).eq.preamp = preamp;
        Ok(())
    }

    fn band(&self, session: Session, index: usize) -> Result<f32> {
        let value = self.model(session).eq.bands[index];
        Ok(value)
    }

    fn set_band(&self, session: Session, index: usize, value: f32) -> Result<()> {
        self.model(session).eq.bands[index] = value;
        Ok(())
    }

    fn playback_info(&self, session: Session) -> Result<PlaybackInfo> {
        self.model(session);
        Ok(PlaybackInfo {
            bitrate: 192_000,
            frequency: 44_100,
            channels: 2,
        })
    }

    fn is_running(&self, session: Session) -> bool {
        self.model(session);
        true
    }

    fn version(&self, session: Session) -> Result<u32> {
        self.model(session);
        Ok(1)
    }
}

fn remote() -> RemoteSession<StubControl> {
    RemoteSession::new(StubControl::default())
}

#[test]
fn defaults_to_session_zero() {
    let remote = remote();
    assert_eq!(remote.session(), Session(0));
    remote.play().unwrap();
    assert_eq!(remote.control().sessions_seen(), vec![Session(0)]);
}

#[test]
fn bound_session_is_forwarded_on_every_call() {
    let remote = RemoteSession::with_session(StubControl::default(), 3);
    assert_eq!(remote.session(), Session(3));
    remote.play().unwrap();
    remote.set_volume(40).unwrap();
    assert!(remote.is_playing().unwrap());
    let seen = remote.control().sessions_seen();
    assert!(!seen.is_empty());
    assert!(seen.iter().all(|s| *s == Session(3)));
}

#[test]
fn add_replaces_then_enqueues() {
    let remote = remote();

    remote.add(&["a.mp3", "b.mp3"], false).unwrap();
    let files: Vec<String> = remote
        .playlist()
        .unwrap()
        .into_iter()
        .map(|e| e.file)
        .collect();
    assert_eq!(files, ["a.mp3", "b.mp3"]);

    remote.add(&["c.mp3"], true).unwrap();
    let files: Vec<String> = remote
        .playlist()
        .unwrap()
        .into_iter()
        .map(|e| e.file)
        .collect();
    assert_eq!(files, ["a.mp3", "b.mp3", "c.mp3"]);

    remote.set_position(1).unwrap();
    assert_eq!(remote.position().unwrap(), 1);
}

#[test]
fn replace_mode_discards_previous_playlist() {
    let remote = remote();
    remote.add(&["old.mp3"], true).unwrap();
    remote.add(&["new.mp3"], false).unwrap();
    let files: Vec<String> = remote
        .playlist()
        .unwrap()
        .into_iter()
        .map(|e| e.file)
        .collect();
    assert_eq!(files, ["new.mp3"]);
}

#[test]
fn add_with_no_paths_is_rejected() {
    let remote = remote();
    let err = remote.add::<&str>(&[], false).unwrap_err();
    assert!(matches!(err, Error::EmptyAdd));
    // Nothing reached the player.
    assert!(remote.control().sessions_seen().is_empty());
}

#[test]
fn band_index_bounds() {
    let remote = remote();
    assert!(remote.band(0).is_ok());
    assert!(remote.band(9).is_ok());
    assert!(matches!(remote.band(10), Err(Error::BandOutOfRange(10))));

    assert!(remote.set_band(9, 3.0).is_ok());
    assert_eq!(remote.band(9).unwrap(), 3.0);
    assert!(matches!(
        remote.set_band(10, 3.0),
        Err(Error::BandOutOfRange(10))
    ));
}

#[test]
fn set_equalizer_round_trips() {
    let remote = remote();
    let bands = [0.0, -0.5, 0.9, 0.0, 0.0, 0.0, 0.2, 0.5, -0.1, 0.0];
    remote.set_equalizer(1.5, bands).unwrap();

    let eq = remote.equalizer().unwrap();
    assert_eq!(eq.preamp, 1.5);
    assert_eq!(eq.bands, bands);
    assert_eq!(remote.preamp().unwrap(), 1.5);
    assert_eq!(remote.band(2).unwrap(), 0.9);
    assert_eq!(NUM_BANDS, bands.len());
}

#[test]
fn toggling_twice_restores_flags() {
    let remote = remote();
    for _ in 0..2 {
        remote.toggle_repeat().unwrap();
        remote.toggle_shuffle().unwrap();
    }
    assert!(!remote.is_repeat().unwrap());
    assert!(!remote.is_shuffle().unwrap());

    remote.toggle_repeat().unwrap();
    assert!(remote.is_repeat().unwrap());
    assert!(!remote.is_shuffle().unwrap());
}

#[test]
fn current_reads_match_explicit_position() {
    let remote = remote();
    remote.add(&["a.mp3", "b.mp3", "c.mp3"], false).unwrap();
    remote.set_position(2).unwrap();

    assert_eq!(remote.current_file().unwrap(), remote.file_at(2).unwrap());
    assert_eq!(remote.current_title().unwrap(), remote.title_at(2).unwrap());
    assert_eq!(
        remote.current_duration().unwrap(),
        remote.duration_at(2).unwrap()
    );
}

#[test]
fn entry_always_takes_an_explicit_position() {
    let remote = remote();
    remote.add(&["a.mp3", "b.mp3"], false).unwrap();

    let entry = remote.entry(1).unwrap();
    assert_eq!(entry.file, "b.mp3");
    assert_eq!(entry.title, "Title of b.mp3");
    assert!(entry.duration.is_some());

    // Out of range is forwarded, not validated; the player's degenerate
    // answer comes back as-is.
    let garbage = remote.entry(99).unwrap();
    assert_eq!(garbage.file, "");
    assert_eq!(garbage.duration, None);
}

#[test]
fn urls_insert_and_delete_at_positions() {
    let remote = remote();
    remote.add(&["a.mp3", "b.mp3"], false).unwrap();

    remote.insert_url("http://radio.example/stream", 1).unwrap();
    let files: Vec<String> = remote
        .playlist()
        .unwrap()
        .into_iter()
        .map(|e| e.file)
        .collect();
    assert_eq!(files, ["a.mp3", "http://radio.example/stream", "b.mp3"]);

    remote.delete(1).unwrap();
    remote.add_url("http://radio.example/other").unwrap();
    let files: Vec<String> = remote
        .playlist()
        .unwrap()
        .into_iter()
        .map(|e| e.file)
        .collect();
    assert_eq!(files, ["a.mp3", "b.mp3", "http://radio.example/other"]);

    remote.clear().unwrap();
    assert!(remote.playlist().unwrap().is_empty());
    assert_eq!(remote.position().unwrap(), 0);
}

#[test]
fn window_flags_are_independent() {
    let remote = remote();
    remote.set_main_window_visible(true).unwrap();
    remote.set_equalizer_window_visible(true).unwrap();

    assert!(remote.is_main_window_visible().unwrap());
    assert!(!remote.is_playlist_window_visible().unwrap());
    assert!(remote.is_equalizer_window_visible().unwrap());

    remote.set_main_window_visible(false).unwrap();
    assert!(!remote.is_main_window_visible().unwrap());
    assert!(remote.is_equalizer_window_visible().unwrap());
}

#[test]
fn volume_and_balance_pass_through_uncapped() {
    let remote = remote();

    remote.set_stereo_volume(30, 70).unwrap();
    assert_eq!(remote.stereo_volume().unwrap(), (30, 70));
    assert_eq!(remote.volume().unwrap(), 70);

    // Out-of-range values are the player's problem, not ours.
    remote.set_volume(150).unwrap();
    assert_eq!(remote.volume().unwrap(), 150);

    remote.set_balance(-12).unwrap();
    assert_eq!(remote.balance().unwrap(), -12);
}

#[test]
fn playback_state_queries() {
    let remote = remote();
    assert!(!remote.is_playing().unwrap());

    remote.play().unwrap();
    assert!(remote.is_playing().unwrap());
    assert!(!remote.is_paused().unwrap());

    remote.play_pause().unwrap();
    assert!(remote.is_paused().unwrap());

    remote.stop().unwrap();
    assert!(!remote.is_playing().unwrap());
    assert!(!remote.is_paused().unwrap());
}

#[test]
fn seek_and_track_stepping() {
    let remote = remote();
    remote.add(&["a.mp3", "b.mp3", "c.mp3"], false).unwrap();

    remote.jump_to_time(Duration::from_secs(45)).unwrap();
    assert_eq!(remote.output_time().unwrap(), Duration::from_secs(45));

    remote.next().unwrap();
    remote.next().unwrap();
    remote.previous().unwrap();
    assert_eq!(remote.position().unwrap(), 1);
}

#[test]
fn introspection_passes_through() {
    let remote = remote();
    assert!(remote.is_running());
    assert_eq!(remote.version().unwrap(), 1);

    let info = remote.playback_info().unwrap();
    assert_eq!(info.frequency, 44_100);
    assert_eq!(info.channels, 2);

    remote.set_skin("skins/steel.zip").unwrap();
    assert_eq!(remote.skin().unwrap(), "skins/steel.zip");
}
