//! CLI command implementations

use crate::output::{format_plan, format_snapshot, OutputFormat};
use anyhow::Context;
use clipdeck_core::{
    event::parse_script, HeadlessDecoder, HeadlessScreen, MediaFormat, MountedPlayer,
    PlayerCallbacks, PlayerConfig, PlayerEvent, SourceDescriptor, VideoPlayer,
};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::info;

/// Arguments of the `simulate` command
pub struct SimulateArgs {
    pub source: String,
    pub local: bool,
    pub format: Option<String>,
    pub drm: Option<String>,
    pub config: Option<PathBuf>,
    pub script: PathBuf,
    pub plan: bool,
}

/// Host notifications collected between steps
#[derive(Clone, Default)]
struct Notifications(Arc<Mutex<Vec<String>>>);

impl Notifications {
    fn push(&self, note: String) {
        self.0.lock().unwrap_or_else(|e| e.into_inner()).push(note);
    }

    fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.0.lock().unwrap_or_else(|e| e.into_inner()))
    }

    fn callbacks(&self) -> PlayerCallbacks {
        let (error, progress, duration, ended, paused, playing) = (
            self.clone(),
            self.clone(),
            self.clone(),
            self.clone(),
            self.clone(),
            self.clone(),
        );
        PlayerCallbacks::new()
            .on_error(move |e| error.push(format!("on_error: {}", e)))
            .on_progress_time(move |t| progress.push(format!("on_progress_time: {:.2}", t)))
            .on_duration_known(move |d| duration.push(format!("on_duration_known: {:.2}", d)))
            .on_ended(move || ended.push("on_ended".to_string()))
            .on_paused(move || paused.push("on_paused".to_string()))
            .on_playing(move || playing.push("on_playing".to_string()))
    }
}

fn build_source(args: &SimulateArgs) -> anyhow::Result<SourceDescriptor> {
    let mut source = if args.local {
        SourceDescriptor::local(args.source.clone())
    } else {
        SourceDescriptor::remote(args.source.clone())
            .with_context(|| format!("invalid source URL '{}'", args.source))?
    };

    if let Some(format) = &args.format {
        source = source.with_format(format.parse::<MediaFormat>()?);
    }
    if let Some(drm) = &args.drm {
        source = source
            .with_drm_license(drm)
            .with_context(|| format!("invalid DRM license URL '{}'", drm))?;
    }
    source.validate()?;
    Ok(source)
}

/// Replay an event script against a headless player
pub async fn simulate(args: SimulateArgs, format: &str) -> anyhow::Result<()> {
    let format = OutputFormat::from(format);
    clipdeck_core::init();

    let config = match &args.config {
        Some(path) => PlayerConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PlayerConfig::default(),
    };
    let source = build_source(&args)?;

    let script = std::fs::read_to_string(&args.script)
        .with_context(|| format!("reading script {}", args.script.display()))?;
    let events = parse_script(&script).context("parsing event script")?;

    info!(events = events.len(), uri = %source.uri, "Starting simulation");

    let notifications = Notifications::default();
    let player = VideoPlayer::mount(
        config,
        source,
        HeadlessDecoder::new(),
        HeadlessScreen::default(),
        notifications.callbacks(),
    )?;

    let mounted = MountedPlayer::spawn(player);
    let handle = mounted.handle();
    let listeners = mounted.listeners().clone();

    println!(
        "{}",
        format_snapshot(0, "mount", &handle.snapshot(), None, &notifications.take(), format)
    );

    for (index, event) in events.into_iter().enumerate() {
        let step = index + 1;
        let name = event.name();

        let outcome = match event {
            PlayerEvent::HardwareBack => {
                let action = listeners.back.press().await;
                Some(format!("back: {:?}", action))
            }
            PlayerEvent::ConnectivityChanged { connected } => {
                listeners.connectivity.notify(connected).await?;
                None
            }
            PlayerEvent::DimensionsChanged { dimensions } => {
                listeners.dimensions.notify(dimensions).await?;
                None
            }
            other => match handle.dispatch(other).await {
                Ok(_) => None,
                Err(e) => Some(format!("rejected: {}", e)),
            },
        };

        let snapshot = handle.snapshot();
        let notes = notifications.take();

        println!(
            "{}",
            format_snapshot(step, name, &snapshot, outcome.as_deref(), &notes, format)
        );
    }

    let player = mounted.unmount().await?;

    if args.plan {
        println!("{}", format_plan(&player.render_plan(), format));
    }

    Ok(())
}

/// Print the default configuration
pub fn defaults() {
    println!("{}", PlayerConfig::default().to_json());
}
