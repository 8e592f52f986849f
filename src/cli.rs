use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Remote control for a running Amp player instance.
#[derive(Parser, Debug)]
#[command(name = "amp-remote", version, about)]
pub struct Args {
    /// Player session to address (overrides the config file)
    #[arg(long, short = 's', global = true)]
    pub session: Option<u32>,

    /// Directory holding the player control sockets
    #[arg(long, global = true)]
    pub socket_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Persist --session and --socket-dir to the config file as the new
    /// defaults before running the command
    #[arg(long, global = true)]
    pub save_defaults: bool,

    #[command(subcommand)]
    pub command: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Start playback
    Play,
    /// Pause playback
    Pause,
    /// Stop playback
    Stop,
    /// Toggle between play and pause
    Toggle,
    /// Skip to the next playlist entry
    Next,
    /// Go back to the previous playlist entry
    Prev,
    /// Ask the player process to exit
    Quit,
    /// Print player state, current track and timing
    Status,
    /// Print the playlist with positions
    Playlist,
    /// Load files into the playlist (replaces it unless --enqueue)
    Add {
        #[arg(required = true)]
        paths: Vec<String>,
        /// Append instead of replacing the playlist
        #[arg(long, short = 'e')]
        enqueue: bool,
    },
    /// Append a URL to the playlist
    AddUrl { url: String },
    /// Remove the playlist entry at a position
    Delete { position: u32 },
    /// Clear the playlist
    Clear,
    /// Jump to a playlist position
    Goto { position: u32 },
    /// Seek within the current track, in seconds
    Seek { seconds: u64 },
    /// Print the main volume, or set it
    Volume { level: Option<i32> },
    /// Print the balance, or set it
    Balance { value: Option<i32> },
    /// Print the loaded skin path, or set it
    Skin { path: Option<String> },
    /// Print the equalizer state, or adjust it
    Eq {
        #[command(subcommand)]
        command: Option<EqCmd>,
    },
    /// Print window visibility, or show/hide one window
    Windows {
        #[command(subcommand)]
        command: Option<WindowCmd>,
    },
    /// Toggle repeat and report the new state
    Repeat,
    /// Toggle shuffle and report the new state
    Shuffle,
    /// Report whether the addressed instance is running
    Running,
    /// Print the player's control protocol version
    Version,
}

#[derive(Subcommand, Debug)]
pub enum EqCmd {
    /// Set the preamp gain in dB
    Preamp { value: f32 },
    /// Set one band's gain in dB (bands 0-9)
    Band { index: usize, value: f32 },
}

#[derive(Subcommand, Debug)]
pub enum WindowCmd {
    /// Show or hide the main window
    Main {
        #[arg(action = clap::ArgAction::Set)]
        visible: bool,
    },
    /// Show or hide the playlist window
    Playlist {
        #[arg(action = clap::ArgAction::Set)]
        visible: bool,
    },
    /// Show or hide the equalizer window
    Equalizer {
        #[arg(action = clap::ArgAction::Set)]
        visible: bool,
    },
}
