pub mod cli;
pub mod config;
pub mod error;
pub mod remote;
pub mod wire;

pub use error::{Error, Result};
pub use remote::{ControlSurface, Equalizer, PlaybackInfo, PlaylistEntry, RemoteSession, Session};
pub use wire::SocketControl;
