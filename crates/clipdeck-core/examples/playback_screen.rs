//! Playback screen walkthrough
//!
//! Mounts a player on headless collaborators, drives it through a short
//! session on the runtime, and prints what the overlay would show.
//!
//! Run with: cargo run --example playback_screen -p clipdeck-core

use clipdeck_core::{
    format_time, HeadlessDecoder, HeadlessScreen, MountedPlayer, PlayerCallbacks, PlayerConfig,
    PlayerEvent, SourceDescriptor, VideoPlayer,
};

#[tokio::main]
async fn main() -> clipdeck_core::Result<()> {
    clipdeck_core::init();

    let config = PlayerConfig {
        playback_rates: vec![0.5, 1.0, 1.5],
        colors: clipdeck_core::ControlColors::default()
            .with_loading("#F3983E")
            .with_thumb("#F3983E")
            .with_tracks("#fff", "grey"),
        ..Default::default()
    };

    let callbacks = PlayerCallbacks::new()
        .on_duration_known(|d| println!("duration: {}", format_time(d)))
        .on_error(|e| println!("error: {}", e))
        .on_ended(|| println!("ended"));

    let source = SourceDescriptor::remote(
        "http://commondatastorage.googleapis.com/gtv-videos-bucket/sample/WhatCarCanYouGetForAGrand.mp4",
    )?;

    let player = VideoPlayer::mount(
        config,
        source,
        HeadlessDecoder::new(),
        HeadlessScreen::default(),
        callbacks,
    )?;

    let mounted = MountedPlayer::spawn(player);
    let handle = mounted.handle();
    let listeners = mounted.listeners().clone();

    handle.dispatch(PlayerEvent::Loaded { duration: 596.0 }).await?;
    handle.dispatch(PlayerEvent::SkipForward).await?;
    handle.dispatch(PlayerEvent::ToggleSpeedMenu).await?;
    handle.dispatch(PlayerEvent::SelectRate { rate: 1.5 }).await?;

    listeners.connectivity.notify(false).await?;
    println!("offline overlay: {}", handle.snapshot().overlay);
    listeners.connectivity.notify(true).await?;

    handle.dispatch(PlayerEvent::ToggleFullscreen).await?;
    println!("back press: {:?}", listeners.back.press().await);

    let next = SourceDescriptor::remote(
        "http://commondatastorage.googleapis.com/gtv-videos-bucket/sample/Sintel.mp4",
    )?;
    handle.dispatch(PlayerEvent::ChangeSource { source: next }).await?;
    handle.dispatch(PlayerEvent::Loaded { duration: 888.0 }).await?;
    handle.dispatch(PlayerEvent::Ended).await?;

    let player = mounted.unmount().await?;
    let plan = player.render_plan();
    println!("final overlay: {}", plan.mode);
    if let Some(seek_bar) = plan.seek_bar {
        println!("seek bar: {} / {}", seek_bar.elapsed_label, seek_bar.duration_label);
    }

    println!("\nDecoder commands:");
    for command in player.decoder().log().entries() {
        println!("  {:?}", command);
    }

    Ok(())
}
