use std::io;

use thiserror::Error;

use crate::remote::Session;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the remote facade and its control transport.
///
/// Playlist positions, volume levels and balance are deliberately *not*
/// validated here: the player owns those ranges and whatever it answers for
/// an out-of-range value is passed back unchanged.
#[derive(Error, Debug)]
pub enum Error {
    /// `add` was called with zero paths.
    #[error("add requires at least one path")]
    EmptyAdd,

    /// Equalizer band index outside `0..10`.
    #[error("equalizer band {0} out of range (valid 0..=9)")]
    BandOutOfRange(usize),

    /// The control socket for the session could not be reached or the
    /// round trip failed mid-call. No call prechecks liveness, so this is
    /// also how an absent player instance shows up.
    #[error("player session {session} unreachable: {source}")]
    Transport {
        session: Session,
        #[source]
        source: io::Error,
    },

    /// The player answered with a frame this client cannot make sense of.
    #[error("protocol error: {0}")]
    Protocol(String),
}
