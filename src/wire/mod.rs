//! Client side of the player's control-socket protocol.
//!
//! Each request is one frame on a fresh Unix-socket connection and yields
//! exactly one reply frame. A frame is a fixed 8-byte little-endian header
//! (protocol version `u16`, command `u16`, payload length `u32`) followed by
//! the payload. Replies echo the request's command code.
//!
//! Payload encodings: `u32`/`i32`/`f32` little-endian, booleans as `u32`
//! 0/1, a lone string as the raw UTF-8 remainder of the payload, string
//! lists as a `u32` count followed by `u32`-length-prefixed entries, times
//! in milliseconds (`i32 -1` where the player cannot know).

pub mod client;

pub use client::{SocketControl, DEFAULT_SOCKET_DIR};

use std::io::{self, Read, Write};

/// Version of the control protocol this client speaks. Sent in every request
/// header; replies carrying a different version are rejected.
pub const PROTOCOL_VERSION: u16 = 1;

/// Upper bound on a frame payload. The largest legitimate payload is a
/// playlist add, and even huge playlists stay far under this; anything
/// bigger is a corrupt or hostile header, not a real frame.
pub const MAX_PAYLOAD: usize = 1 << 20;

/// Command codes of the control protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum Command {
    Ping = 0,
    GetVersion = 1,

    Play = 10,
    Pause = 11,
    Stop = 12,
    Eject = 13,
    Quit = 14,
    PlayPause = 15,
    IsPlaying = 16,
    IsPaused = 17,

    PlaylistLength = 30,
    PlaylistTitle = 31,
    PlaylistFile = 32,
    PlaylistTime = 33,
    PlaylistAdd = 34,
    PlaylistAddUrl = 35,
    PlaylistInsertUrl = 36,
    PlaylistDelete = 37,
    PlaylistClear = 38,
    GetPosition = 39,
    SetPosition = 40,

    OutputTime = 50,
    JumpToTime = 51,
    Previous = 52,
    Next = 53,

    GetVolume = 60,
    SetVolume = 61,
    GetBalance = 62,
    SetBalance = 63,

    GetSkin = 70,
    SetSkin = 71,

    MainWindowToggle = 80,
    PlaylistWindowToggle = 81,
    EqualizerWindowToggle = 82,
    IsMainWindow = 83,
    IsPlaylistWindow = 84,
    IsEqualizerWindow = 85,
    ShowPreferences = 86,
    SetAlwaysOnTop = 87,

    ToggleRepeat = 90,
    IsRepeat = 91,
    ToggleShuffle = 92,
    IsShuffle = 93,

    GetEqualizer = 100,
    SetEqualizer = 101,
    GetPreamp = 102,
    SetPreamp = 103,
    GetBand = 104,
    SetBand = 105,

    GetInfo = 110,
}

impl Command {
    pub fn from_code(code: u16) -> Option<Command> {
        use Command::*;
        Some(match code {
            0 => Ping,
            1 => GetVersion,
            10 => Play,
            11 => Pause,
            12 => Stop,
            13 => Eject,
            14 => Quit,
            15 => PlayPause,
            16 => IsPlaying,
            17 => IsPaused,
            30 => PlaylistLength,
            31 => PlaylistTitle,
            32 => PlaylistFile,
            33 => PlaylistTime,
            34 => PlaylistAdd,
            35 => PlaylistAddUrl,
            36 => PlaylistInsertUrl,
            37 => PlaylistDelete,
            38 => PlaylistClear,
            39 => GetPosition,
            40 => SetPosition,
            50 => OutputTime,
            51 => JumpToTime,
            52 => Previous,
            53 => Next,
            60 => GetVolume,
            61 => SetVolume,
            62 => GetBalance,
            63 => SetBalance,
            70 => GetSkin,
            71 => SetSkin,
            80 => MainWindowToggle,
            81 => PlaylistWindowToggle,
            82 => EqualizerWindowToggle,
            83 => IsMainWindow,
            84 => IsPlaylistWindow,
            85 => IsEqualizerWindow,
            86 => ShowPreferences,
            87 => SetAlwaysOnTop,
            90 => ToggleRepeat,
            91 => IsRepeat,
            92 => ToggleShuffle,
            93 => IsShuffle,
            100 => GetEqualizer,
            101 => SetEqualizer,
            102 => GetPreamp,
            103 => SetPreamp,
            104 => GetBand,
            105 => SetBand,
            110 => GetInfo,
            _ => return None,
        })
    }
}

/// One protocol frame, request or reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub command: Command,
    pub payload: Vec<u8>,
}

impl Frame {
    pub fn new(command: Command, payload: Vec<u8>) -> Self {
        Frame { command, payload }
    }

    pub fn empty(command: Command) -> Self {
        Frame::new(command, Vec::new())
    }

    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&PROTOCOL_VERSION.to_le_bytes())?;
        w.write_all(&(self.command as u16).to_le_bytes())?;
        w.write_all(&(self.payload.len() as u32).to_le_bytes())?;
        w.write_all(&self.payload)
    }

    /// Reads one frame. Version mismatches and unknown command codes come
    /// back as `InvalidData` so callers can tell protocol trouble from plain
    /// connectivity failure.
    pub fn read_from<R: Read>(r: &mut R) -> io::Result<Frame> {
        let mut header = [0u8; 8];
        r.read_exact(&mut header)?;
        let version = u16::from_le_bytes([header[0], header[1]]);
        if version != PROTOCOL_VERSION {
            return Err(invalid_data(format!(
                "unsupported protocol version {version} (expected {PROTOCOL_VERSION})"
            )));
        }
        let code = u16::from_le_bytes([header[2], header[3]]);
        let command = Command::from_code(code)
            .ok_or_else(|| invalid_data(format!("unknown command code {code}")))?;
        let len = u32::from_le_bytes([header[4], header[5], header[6], header[7]]) as usize;
        if len > MAX_PAYLOAD {
            return Err(invalid_data(format!(
                "payload length {len} exceeds limit {MAX_PAYLOAD}"
            )));
        }
        let mut payload = vec![0u8; len];
        r.read_exact(&mut payload)?;
        Ok(Frame { command, payload })
    }
}

fn invalid_data(msg: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg)
}

/// Builds a frame payload.
#[derive(Debug, Default)]
pub struct PayloadWriter(Vec<u8>);

impl PayloadWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_u32(mut self, v: u32) -> Self {
        self.0.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn put_i32(mut self, v: i32) -> Self {
        self.0.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn put_f32(mut self, v: f32) -> Self {
        self.0.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn put_bool(self, v: bool) -> Self {
        self.put_u32(v as u32)
    }

    /// Length-prefixed string, for list entries.
    pub fn put_str(mut self, s: &str) -> Self {
        self = self.put_u32(s.len() as u32);
        self.0.extend_from_slice(s.as_bytes());
        self
    }

    /// Raw string bytes; only valid as the final payload field.
    pub fn put_str_raw(mut self, s: &str) -> Self {
        self.0.extend_from_slice(s.as_bytes());
        self
    }

    pub fn finish(self) -> Vec<u8> {
        self.0
    }
}

/// Walks a frame payload. Truncated or malformed payloads surface as
/// `InvalidData`.
#[derive(Debug)]
pub struct PayloadReader<'a> {
    buf: &'a [u8],
}

impl<'a> PayloadReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        PayloadReader { buf }
    }

    fn take(&mut self, n: usize) -> io::Result<&'a [u8]> {
        if self.buf.len() < n {
            return Err(invalid_data(format!(
                "truncated payload: wanted {n} more bytes, have {}",
                self.buf.len()
            )));
        }
        let (head, tail) = self.buf.split_at(n);
        self.buf = tail;
        Ok(head)
    }

    pub fn u32(&mut self) -> io::Result<u32> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn i32(&mut self) -> io::Result<i32> {
        let b = self.take(4)?;
        Ok(i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn f32(&mut self) -> io::Result<f32> {
        let b = self.take(4)?;
        Ok(f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn bool(&mut self) -> io::Result<bool> {
        Ok(self.u32()? != 0)
    }

    /// Length-prefixed string, for list entries.
    pub fn str(&mut self) -> io::Result<String> {
        let len = self.u32()? as usize;
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|e| invalid_data(format!("bad utf-8: {e}")))
    }

    /// The remainder of the payload as one string.
    pub fn rest_str(&mut self) -> io::Result<String> {
        let bytes = std::mem::take(&mut self.buf);
        String::from_utf8(bytes.to_vec()).map_err(|e| invalid_data(format!("bad utf-8: {e}")))
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}
