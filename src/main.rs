use clap::Parser;
use livedash::app::{resolve_config, Dashboard};
use livedash::core::config::DashboardConfig;
use livedash::error::DashError;
use livedash::layout::{LayoutCompositor, Region};
use livedash::widgets::{CounterWidget, StatsWidget};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use std::path::PathBuf;
use std::process::ExitCode;

mod logging;

#[derive(Parser)]
#[command(name = "livedash")]
#[command(about = "Live keyboard-driven terminal dashboard demo", long_about = None)]
#[command(version)]
struct Cli {
    /// Target frame rate (overrides the settings file)
    #[arg(long)]
    fps: Option<u32>,

    /// Input poll interval in milliseconds
    #[arg(long)]
    poll_ms: Option<u64>,

    /// Settings file to use instead of the per-user one
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Draw below the prompt instead of switching to the alternate screen
    #[arg(long)]
    inline: bool,
}

impl Cli {
    fn apply(&self, config: &mut DashboardConfig) {
        if let Some(fps) = self.fps {
            config.target_fps = fps;
        }
        if let Some(poll_ms) = self.poll_ms {
            config.input_poll_ms = poll_ms;
        }
        if self.inline {
            config.alternate_screen = false;
        }
    }
}

/// Footer legend entries as (before, key, after): "di[v]ide".
const CONTROLS: &[(&str, char, &str)] = &[
    ("", 'i', "ncrement"),
    ("", 'd', "ecrement"),
    ("", 'r', "eset"),
    ("", 'm', "ultiply×2"),
    ("di", 'v', "ide"),
    ("", 'q', "uit"),
];

fn header() -> Text<'static> {
    Text::from(Line::from(Span::styled(
        "⚡ Extensible Terminal UI",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )))
}

fn controls() -> Text<'static> {
    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let mut spans = Vec::new();
    for (i, (before, key, after)) in CONTROLS.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::raw(*before));
        spans.push(Span::styled(format!("[{key}]"), key_style));
        spans.push(Span::raw(*after));
    }
    Text::from(Line::from(spans))
}

fn layout(compositor: &mut LayoutCompositor) -> Result<(), DashError> {
    compositor.declare(Region::new("root").split_column([
        Region::new("header").length(3),
        Region::new("main"),
        Region::new("stats").length(5),
        Region::new("footer").length(3),
    ]))?;
    compositor.place_static("header", header(), "bright_blue")?;
    compositor.place("footer", controls(), "Controls", "yellow")
}

fn build(config: DashboardConfig) -> Result<Dashboard, DashError> {
    let mut dashboard = Dashboard::new(config);
    dashboard.setup_layout(layout)?;
    dashboard.add_widget("counter", CounterWidget::new(), "main", "Counter", "green")?;
    dashboard.add_widget("stats", StatsWidget::new(), "stats", "Statistics", "blue")?;
    dashboard.set_post_frame_hook(|ctx| {
        let (frames, elapsed) = (ctx.frame_count(), ctx.elapsed());
        if let Some(stats) = ctx.widget_mut::<StatsWidget>("stats") {
            stats.update_frames(frames, elapsed);
        }
    });
    Ok(dashboard)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _logging = logging::init();

    let mut config = resolve_config(cli.config.as_deref());
    cli.apply(&mut config);
    let farewell = config.farewell.clone();

    let result = build(config).and_then(Dashboard::run);
    match result {
        Ok(summary) => {
            if !farewell.is_empty() {
                println!("{farewell}");
            }
            let code = u8::try_from(summary.exit_code()).unwrap_or(1);
            ExitCode::from(code)
        }
        Err(err) => {
            tracing::error!(error = %err, "dashboard failed");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
