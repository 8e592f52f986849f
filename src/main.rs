use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use amp_remote::cli::{Args, Cmd, EqCmd, WindowCmd};
use amp_remote::config::Config;
use amp_remote::wire::DEFAULT_SOCKET_DIR;
use amp_remote::{RemoteSession, SocketControl};

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = Config::load();
    let session = args.session.unwrap_or(config.session);
    let socket_dir = args.socket_dir.or(config.socket_dir);
    if args.save_defaults {
        Config {
            session,
            socket_dir: socket_dir.clone(),
        }
        .save()?;
    }
    let socket_dir = socket_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_SOCKET_DIR));

    let remote = RemoteSession::with_session(SocketControl::new(socket_dir), session);
    run(&remote, args.command)
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(remote: &RemoteSession<SocketControl>, command: Cmd) -> Result<()> {
    match command {
        Cmd::Play => remote.play()?,
        Cmd::Pause => remote.pause()?,
        Cmd::Stop => remote.stop()?,
        Cmd::Toggle => remote.play_pause()?,
        Cmd::Next => remote.next()?,
        Cmd::Prev => remote.previous()?,
        Cmd::Quit => remote.quit()?,
        Cmd::Status => status(remote)?,
        Cmd::Playlist => playlist(remote)?,
        Cmd::Add { paths, enqueue } => remote.add(&paths, enqueue)?,
        Cmd::AddUrl { url } => remote.add_url(&url)?,
        Cmd::Delete { position } => remote.delete(position)?,
        Cmd::Clear => remote.clear()?,
        Cmd::Goto { position } => remote.set_position(position)?,
        Cmd::Seek { seconds } => remote.jump_to_time(Duration::from_secs(seconds))?,
        Cmd::Volume { level: Some(level) } => remote.set_volume(level)?,
        Cmd::Volume { level: None } => println!("{}", remote.volume()?),
        Cmd::Balance { value: Some(value) } => remote.set_balance(value)?,
        Cmd::Balance { value: None } => println!("{}", remote.balance()?),
        Cmd::Skin { path: Some(path) } => remote.set_skin(&path)?,
        Cmd::Skin { path: None } => println!("{}", remote.skin()?),
        Cmd::Eq { command } => eq(remote, command)?,
        Cmd::Windows { command } => windows(remote, command)?,
        Cmd::Repeat => {
            remote.toggle_repeat()?;
            println!("repeat {}", on_off(remote.is_repeat()?));
        }
        Cmd::Shuffle => {
            remote.toggle_shuffle()?;
            println!("shuffle {}", on_off(remote.is_shuffle()?));
        }
        Cmd::Running => {
            if remote.is_running() {
                println!("running");
            } else {
                println!("not running");
                std::process::exit(1);
            }
        }
        Cmd::Version => println!("{}", remote.version()?),
    }
    Ok(())
}

fn status(remote: &RemoteSession<SocketControl>) -> Result<()> {
    let state = if remote.is_playing()? {
        "playing"
    } else if remote.is_paused()? {
        "paused"
    } else {
        "stopped"
    };
    let position = remote.position()?;
    let title = remote.current_title()?;
    let elapsed = remote.output_time()?;
    let length = remote.current_duration()?;

    println!("[{state}] #{position}  {title}");
    match length {
        Some(length) => println!("  {} / {}", format_time(elapsed), format_time(length)),
        None => println!("  {} / --:--", format_time(elapsed)),
    }
    let (left, right) = remote.stereo_volume()?;
    println!(
        "  volume {left}/{right}  balance {}  repeat {}  shuffle {}",
        remote.balance()?,
        on_off(remote.is_repeat()?),
        on_off(remote.is_shuffle()?),
    );
    Ok(())
}

fn playlist(remote: &RemoteSession<SocketControl>) -> Result<()> {
    let current = remote.position()?;
    for (position, entry) in remote.playlist()?.into_iter().enumerate() {
        let marker = if position as u32 == current { '>' } else { ' ' };
        let length = entry
            .duration
            .map(format_time)
            .unwrap_or_else(|| "--:--".to_string());
        println!("{marker}{position:4}  {:>6}  {}", length, entry.title);
    }
    Ok(())
}

fn eq(remote: &RemoteSession<SocketControl>, command: Option<EqCmd>) -> Result<()> {
    match command {
        None => {
            let eq = remote.equalizer()?;
            println!("preamp {:+.1} dB", eq.preamp);
            for (index, band) in eq.bands.iter().enumerate() {
                println!("band {index}  {band:+.1} dB");
            }
        }
        Some(EqCmd::Preamp { value }) => remote.set_preamp(value)?,
        Some(EqCmd::Band { index, value }) => remote.set_band(index, value)?,
    }
    Ok(())
}

fn windows(remote: &RemoteSession<SocketControl>, command: Option<WindowCmd>) -> Result<()> {
    match command {
        None => {
            println!("main      {}", on_off(remote.is_main_window_visible()?));
            println!("playlist  {}", on_off(remote.is_playlist_window_visible()?));
            println!("equalizer {}", on_off(remote.is_equalizer_window_visible()?));
        }
        Some(WindowCmd::Main { visible }) => remote.set_main_window_visible(visible)?,
        Some(WindowCmd::Playlist { visible }) => remote.set_playlist_window_visible(visible)?,
        Some(WindowCmd::Equalizer { visible }) => remote.set_equalizer_window_visible(visible)?,
    }
    Ok(())
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}

fn format_time(time: Duration) -> String {
    let total = time.as_secs();
    format!("{}:{:02}", total / 60, total % 60)
}
