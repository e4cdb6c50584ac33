//! Output formatting for CLI

use clipdeck_core::{format_time, PlayerSnapshot, RenderPlan};
use serde::Serialize;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Text,
        }
    }
}

fn to_json<T: Serialize>(data: &T) -> String {
    serde_json::to_string(data).unwrap_or_else(|_| "{}".to_string())
}

/// State after one applied event, with the outcome and host notifications
/// it produced. JSON prints one object per line.
pub fn format_snapshot(
    step: usize,
    event: &str,
    snapshot: &PlayerSnapshot,
    outcome: Option<&str>,
    notes: &[String],
    format: OutputFormat,
) -> String {
    match format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "step": step,
                "event": event,
                "outcome": outcome,
                "notifications": notes,
                "snapshot": snapshot,
            });
            value.to_string()
        }
        OutputFormat::Text => {
            let playback = &snapshot.playback;
            let ui = &snapshot.ui;
            let mut lines = vec![format!(
                "{:>3}. {:<22} {} {}/{} {}x{}{} | overlay={} controls={}{}{}",
                step,
                event,
                if playback.paused { "paused " } else { "playing" },
                format_time(playback.current_time),
                format_time(playback.duration),
                playback.playback_rate,
                if playback.muted { " muted" } else { "" },
                if ui.fullscreen() { " fullscreen" } else { "" },
                snapshot.overlay,
                if ui.controls_visible() { "on" } else { "off" },
                if ui.speed_menu_visible() { " speed-menu" } else { "" },
                if snapshot.awaiting_load { " awaiting-load" } else { "" },
            )];
            for note in outcome.into_iter().chain(notes.iter().map(String::as_str)) {
                lines.push(format!("       -> {}", note));
            }
            lines.join("\n")
        }
    }
}

/// Render plan summary
pub fn format_plan(plan: &RenderPlan, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(plan),
        OutputFormat::Text => {
            let mut lines = vec![
                format!("Render plan ({})", plan.mode),
                format!("  surface height: {:.0}", plan.surface_height),
            ];
            if plan.offline_banner {
                lines.push("  offline banner".to_string());
            }
            if let Some(spinner) = &plan.spinner {
                lines.push(format!("  spinner: {} @{}", spinner.color, spinner.size));
            }
            for button in [&plan.fullscreen_toggle, &plan.play_pause, &plan.mute_button]
                .into_iter()
                .flatten()
            {
                lines.push(format!("  button: {} @{}", button.icon, button.size));
            }
            if let Some((rewind, forward)) = &plan.skip_buttons {
                lines.push(format!("  skip: {} / {}", rewind.icon, forward.icon));
            }
            if let Some(label) = &plan.speed_button {
                lines.push(format!("  speed: {}", label));
            }
            if !plan.speed_menu.is_empty() {
                let options: Vec<String> = plan
                    .speed_menu
                    .iter()
                    .map(|o| if o.selected { format!("[{}]", o.label) } else { o.label.clone() })
                    .collect();
                lines.push(format!("  speed menu: {}", options.join(" ")));
            }
            if let Some(bar) = &plan.seek_bar {
                lines.push(format!(
                    "  seek bar: {} / {} (thumb {})",
                    bar.elapsed_label, bar.duration_label, bar.thumb_color
                ));
            }
            lines.join("\n")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clipdeck_core::{
        HeadlessDecoder, HeadlessScreen, PlayerCallbacks, PlayerConfig, SourceDescriptor,
        VideoPlayer,
    };

    fn mounted_snapshot() -> PlayerSnapshot {
        let player = VideoPlayer::mount(
            PlayerConfig::default(),
            SourceDescriptor::remote("https://cdn.example.com/video.mp4").unwrap(),
            HeadlessDecoder::new(),
            HeadlessScreen::default(),
            PlayerCallbacks::default(),
        )
        .unwrap();
        player.snapshot()
    }

    #[test]
    fn test_snapshot_json_line() {
        let notes = vec!["on_paused".to_string()];
        let line = format_snapshot(
            0,
            "mount",
            &mounted_snapshot(),
            Some("rejected"),
            &notes,
            OutputFormat::Json,
        );
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["step"], 0);
        assert_eq!(value["event"], "mount");
        assert_eq!(value["outcome"], "rejected");
        assert_eq!(value["notifications"][0], "on_paused");
        assert_eq!(value["snapshot"]["awaiting_load"], true);
        assert!(!line.contains('\n'));
    }

    #[test]
    fn test_snapshot_text_lists_notes() {
        let notes = vec!["on_ended".to_string()];
        let text = format_snapshot(3, "ended", &mounted_snapshot(), None, &notes, OutputFormat::Text);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("awaiting-load"));
        assert_eq!(lines[1].trim(), "-> on_ended");
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::from("JSON"), OutputFormat::Json);
        assert_eq!(OutputFormat::from("table"), OutputFormat::Text);
    }
}
