use std::io;
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::remote::{ControlSurface, Equalizer, PlaybackInfo, Session, NUM_BANDS};
use crate::wire::{Command, Frame, PayloadReader, PayloadWriter};

/// Default directory where player instances bind their control sockets.
pub const DEFAULT_SOCKET_DIR: &str = "/tmp";

/// [`ControlSurface`] over the player's Unix control socket.
///
/// Each call is one blocking round trip on a fresh connection, which is how
/// the player's own control protocol works: connect, send one request frame,
/// read one reply frame, hang up. There is no shared connection, so the
/// transport itself is stateless and one `SocketControl` can serve any
/// number of sessions.
#[derive(Debug, Clone)]
pub struct SocketControl {
    socket_dir: PathBuf,
}

impl Default for SocketControl {
    fn default() -> Self {
        Self::new(DEFAULT_SOCKET_DIR)
    }
}

impl SocketControl {
    pub fn new(socket_dir: impl Into<PathBuf>) -> Self {
        Self {
            socket_dir: socket_dir.into(),
        }
    }

    /// Control socket path for `session`: `{dir}/amp_{euid}.{session}`.
    pub fn socket_path(&self, session: Session) -> PathBuf {
        let uid = unsafe { libc::geteuid() };
        self.socket_dir.join(format!("amp_{uid}.{session}"))
    }

    pub fn socket_dir(&self) -> &Path {
        &self.socket_dir
    }

    fn request(&self, session: Session, frame: Frame) -> Result<Frame> {
        let command = frame.command;
        trace!(?command, %session, "control request");
        let path = self.socket_path(session);
        let reply = (|| -> io::Result<Frame> {
            let mut stream = UnixStream::connect(&path)?;
            debug!(%session, path = %path.display(), "connected to control socket");
            frame.write_to(&mut stream)?;
            Frame::read_from(&mut stream)
        })()
        .map_err(|e| wrap_io(session, e))?;
        if reply.command != command {
            return Err(Error::Protocol(format!(
                "reply command {:?} does not match request {:?}",
                reply.command, command
            )));
        }
        Ok(reply)
    }

    /// Fire-and-forget command; the empty ack reply is discarded.
    fn command(&self, session: Session, command: Command) -> Result<()> {
        self.request(session, Frame::empty(command)).map(|_| ())
    }

    fn command_with(&self, session: Session, command: Command, payload: Vec<u8>) -> Result<()> {
        self.request(session, Frame::new(command, payload))
            .map(|_| ())
    }

    fn query<T>(
        &self,
        session: Session,
        command: Command,
        payload: Vec<u8>,
        parse: impl FnOnce(&mut PayloadReader<'_>) -> io::Result<T>,
    ) -> Result<T> {
        let reply = self.request(session, Frame::new(command, payload))?;
        let mut reader = PayloadReader::new(&reply.payload);
        parse(&mut reader).map_err(|e| Error::Protocol(e.to_string()))
    }

    fn query_bool(&self, session: Session, command: Command) -> Result<bool> {
        self.query(session, command, Vec::new(), |r| r.bool())
    }
}

fn wrap_io(session: Session, e: io::Error) -> Error {
    if e.kind() == io::ErrorKind::InvalidData {
        Error::Protocol(e.to_string())
    } else {
        Error::Transport { session, source: e }
    }
}

fn position_payload(position: u32) -> Vec<u8> {
    PayloadWriter::new().put_u32(position).finish()
}

impl ControlSurface for SocketControl {
    fn play(&self, session: Session) -> Result<()> {
        self.command(session, Command::Play)
    }

    fn pause(&self, session: Session) -> Result<()> {
        self.command(session, Command::Pause)
    }

    fn stop(&self, session: Session) -> Result<()> {
        self.command(session, Command::Stop)
    }

    fn eject(&self, session: Session) -> Result<()> {
        self.command(session, Command::Eject)
    }

    fn quit(&self, session: Session) -> Result<()> {
        self.command(session, Command::Quit)
    }

    fn play_pause(&self, session: Session) -> Result<()> {
        self.command(session, Command::PlayPause)
    }

    fn is_playing(&self, session: Session) -> Result<bool> {
        self.query_bool(session, Command::IsPlaying)
    }

    fn is_paused(&self, session: Session) -> Result<bool> {
        self.query_bool(session, Command::IsPaused)
    }

    fn playlist_length(&self, session: Session) -> Result<u32> {
        self.query(session, Command::PlaylistLength, Vec::new(), |r| r.u32())
    }

    fn playlist_title(&self, session: Session, position: u32) -> Result<String> {
        self.query(session, Command::PlaylistTitle, position_payload(position), |r| {
            r.rest_str()
        })
    }

    fn playlist_file(&self, session: Session, position: u32) -> Result<String> {
        self.query(session, Command::PlaylistFile, position_payload(position), |r| {
            r.rest_str()
        })
    }

    fn playlist_time(&self, session: Session, position: u32) -> Result<Option<Duration>> {
        let ms = self.query(session, Command::PlaylistTime, position_payload(position), |r| {
            r.i32()
        })?;
        // -1 means the player cannot know the length (streams).
        Ok(u64::try_from(ms).ok().map(Duration::from_millis))
    }

    fn playlist_add(&self, session: Session, paths: &[&str], enqueue: bool) -> Result<()> {
        let mut payload = PayloadWriter::new().put_bool(enqueue).put_u32(paths.len() as u32);
        for path in paths {
            payload = payload.put_str(path);
        }
        self.command_with(session, Command::PlaylistAdd, payload.finish())
    }

    fn add_url(&self, session: Session, url: &str) -> Result<()> {
        let payload = PayloadWriter::new().put_str_raw(url).finish();
        self.command_with(session, Command::PlaylistAddUrl, payload)
    }

    fn insert_url(&self, session: Session, url: &str, position: u32) -> Result<()> {
        let payload = PayloadWriter::new().put_u32(position).put_str_raw(url).finish();
        self.command_with(session, Command::PlaylistInsertUrl, payload)
    }

    fn delete(&self, session: Session, position: u32) -> Result<()> {
        self.command_with(session, Command::PlaylistDelete, position_payload(position))
    }

    fn clear(&self, session: Session) -> Result<()> {
        self.command(session, Command::PlaylistClear)
    }

    fn get_position(&self, session: Session) -> Result<u32> {
        self.query(session, Command::GetPosition, Vec::new(), |r| r.u32())
    }

    fn set_position(&self, session: Session, position: u32) -> Result<()> {
        self.command_with(session, Command::SetPosition, position_payload(position))
    }

    fn output_time(&self, session: Session) -> Result<Duration> {
        let ms = self.query(session, Command::OutputTime, Vec::new(), |r| r.i32())?;
        Ok(Duration::from_millis(ms.max(0) as u64))
    }

    fn jump_to_time(&self, session: Session, position: Duration) -> Result<()> {
        // Saturate rather than wrap; the wire carries u32 milliseconds.
        let ms = u32::try_from(position.as_millis()).unwrap_or(u32::MAX);
        let payload = PayloadWriter::new().put_u32(ms).finish();
        self.command_with(session, Command::JumpToTime, payload)
    }

    fn previous(&self, session: Session) -> Result<()> {
        self.command(session, Command::Previous)
    }

    fn next(&self, session: Session) -> Result<()> {
        self.command(session, Command::Next)
    }

    fn stereo_volume(&self, session: Session) -> Result<(i32, i32)> {
        self.query(session, Command::GetVolume, Vec::new(), |r| {
            Ok((r.i32()?, r.i32()?))
        })
    }

    fn set_stereo_volume(&self, session: Session, left: i32, right: i32) -> Result<()> {
        let payload = PayloadWriter::new().put_i32(left).put_i32(right).finish();
        self.command_with(session, Command::SetVolume, payload)
    }

    // The player only speaks stereo; the main volume is derived client-side
    // from the pair, louder channel wins.
    fn main_volume(&self, session: Session) -> Result<i32> {
        let (left, right) = self.stereo_volume(session)?;
        Ok(left.max(right))
    }

    fn set_main_volume(&self, session: Session, volume: i32) -> Result<()> {
        self.set_stereo_volume(session, volume, volume)
    }

    fn balance(&self, session: Session) -> Result<i32> {
        self.query(session, Command::GetBalance, Vec::new(), |r| r.i32())
    }

    fn set_balance(&self, session: Session, balance: i32) -> Result<()> {
        let payload = PayloadWriter::new().put_i32(balance).finish();
        self.command_with(session, Command::SetBalance, payload)
    }

    fn skin(&self, session: Session) -> Result<String> {
        self.query(session, Command::GetSkin, Vec::new(), |r| r.rest_str())
    }

    fn set_skin(&self, session: Session, path: &str) -> Result<()> {
        let payload = PayloadWriter::new().put_str_raw(path).finish();
        self.command_with(session, Command::SetSkin, payload)
    }

    fn set_main_window_visible(&self, session: Session, visible: bool) -> Result<()> {
        let payload = PayloadWriter::new().put_bool(visible).finish();
        self.command_with(session, Command::MainWindowToggle, payload)
    }

    fn set_playlist_window_visible(&self, session: Session, visible: bool) -> Result<()> {
        let payload = PayloadWriter::new().put_bool(visible).finish();
        self.command_with(session, Command::PlaylistWindowToggle, payload)
    }

    fn set_equalizer_window_visible(&self, session: Session, visible: bool) -> Result<()> {
        let payload = PayloadWriter::new().put_bool(visible).finish();
        self.command_with(session, Command::EqualizerWindowToggle, payload)
    }

    fn is_main_window_visible(&self, session: Session) -> Result<bool> {
        self.query_bool(session, Command::IsMainWindow)
    }

    fn is_playlist_window_visible(&self, session: Session) -> Result<bool> {
        self.query_bool(session, Command::IsPlaylistWindow)
    }

    fn is_equalizer_window_visible(&self, session: Session) -> Result<bool> {
        self.query_bool(session, Command::IsEqualizerWindow)
    }

    fn show_preferences(&self, session: Session) -> Result<()> {
        self.command(session, Command::ShowPreferences)
    }

    fn set_always_on_top(&self, session: Session, on_top: bool) -> Result<()> {
        let payload = PayloadWriter::new().put_bool(on_top).finish();
        self.command_with(session, Command::SetAlwaysOnTop, payload)
    }

    fn toggle_repeat(&self, session: Session) -> Result<()> {
        self.command(session, Command::ToggleRepeat)
    }

    fn is_repeat(&self, session: Session) -> Result<bool> {
        self.query_bool(session, Command::IsRepeat)
    }

    fn toggle_shuffle(&self, session: Session) -> Result<()> {
        self.command(session, Command::ToggleShuffle)
    }

    fn is_shuffle(&self, session: Session) -> Result<bool> {
        self.query_bool(session, Command::IsShuffle)
    }

    fn equalizer(&self, session: Session) -> Result<Equalizer> {
        self.query(session, Command::GetEqualizer, Vec::new(), |r| {
            let preamp = r.f32()?;
            let mut bands = [0.0; NUM_BANDS];
            for band in &mut bands {
                *band = r.f32()?;
            }
            Ok(Equalizer { preamp, bands })
        })
    }

    fn set_equalizer(&self, session: Session, eq: &Equalizer) -> Result<()> {
        let mut payload = PayloadWriter::new().put_f32(eq.preamp);
        for band in eq.bands {
            payload = payload.put_f32(band);
        }
        self.command_with(session, Command::SetEqualizer, payload.finish())
    }

    fn preamp(&self, session: Session) -> Result<f32> {
        self.query(session, Command::GetPreamp, Vec::new(), |r| r.f32())
    }

    fn set_preamp(&self, session: Session, preamp: f32) -> Result<()> {
        let payload = PayloadWriter::new().put_f32(preamp).finish();
        self.command_with(session, Command::SetPreamp, payload)
    }

    fn band(&self, session: Session, index: usize) -> Result<f32> {
        let payload = PayloadWriter::new().put_u32(index as u32).finish();
        self.query(session, Command::GetBand, payload, |r| r.f32())
    }

    fn set_band(&self, session: Session, index: usize, value: f32) -> Result<()> {
        let payload = PayloadWriter::new()
            .put_u32(index as u32)
            .put_f32(value)
            .finish();
        self.command_with(session, Command::SetBand, payload)
    }

    fn playback_info(&self, session: Session) -> Result<PlaybackInfo> {
        self.query(session, Command::GetInfo, Vec::new(), |r| {
            Ok(PlaybackInfo {
                bitrate: r.u32()?,
                frequency: r.u32()?,
                channels: r.u32()?,
            })
        })
    }

    fn is_running(&self, session: Session) -> bool {
        self.command(session, Command::Ping).is_ok()
    }

    fn version(&self, session: Session) -> Result<u32> {
        self.query(session, Command::GetVersion, Vec::new(), |r| r.u32())
    }
}
