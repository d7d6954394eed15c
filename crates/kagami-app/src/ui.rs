use std::sync::Arc;

use kagami_config::Config;
use kagami_types::{ContainerKind, RenderUpdate, ViewCommand};
use kanal::AsyncReceiver;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

/// Terminal presenter: one stdout line per view change. This is the
/// whole "page" for the terminal frontend; a richer frontend would
/// consume the same commands.
pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<ViewCommand>,
    config: Arc<RwLock<Config>>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let (max_body_chars, show_images) = {
        let config = config.read().await;
        (config.ui.max_body_chars, config.ui.show_images)
    };
    let color = atty::is(atty::Stream::Stdout);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Presenter stopping");
                return Ok(());
            }
            command = app_to_ui_rx.recv() => {
                present(&command?, max_body_chars, show_images, color);
            }
        }
    }
}

fn present(command: &ViewCommand, max_body_chars: usize, show_images: bool, color: bool) {
    match command {
        ViewCommand::SetStatus(text) => {
            println!("{}", paint(&format!("status: {}", text), "36", color));
        }
        ViewCommand::Apply(update) => {
            if update.container == ContainerKind::DebugImages && !show_images {
                return;
            }
            print_update(update, max_body_chars, color);
        }
    }
}

fn print_update(update: &RenderUpdate, max_body_chars: usize, color: bool) {
    if update.created && !update.shell.is_empty() {
        println!("{}", paint(&update.shell, "1", color));
    }

    let mut line = String::new();
    line.push_str(update.container.name());
    if let Some(section) = &update.section {
        line.push_str(&format!(" [{}]", section));
    }
    line.push(' ');
    line.push_str(&truncate(&update.body, max_body_chars));

    // Output fragments bake their time in; the other kinds get it here.
    if update.container != ContainerKind::OutputTexts
        && let Some(time) = &update.time
    {
        line.push_str(&format!("  @ {}", time.display));
    }

    println!("{}", line);
}

fn paint(text: &str, code: &str, enabled: bool) -> String {
    if enabled {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}

fn truncate(input: &str, max: usize) -> String {
    if input.chars().count() <= max {
        return input.to_string();
    }
    let prefix: String = input.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", prefix)
}

#[cfg(test)]
mod tests {
    use super::truncate;

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly-10", 10), "exactly-10");
        assert_eq!(truncate("0123456789ab", 10), "0123456...");

        // Multibyte text must not split inside a character.
        let kana = "あいうえおかきくけこさし";
        let cut = truncate(kana, 10);
        assert_eq!(cut.chars().count(), 10);
        assert!(cut.ends_with("..."));
    }
}
