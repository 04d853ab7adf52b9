// SPDX-License-Identifier: GPL-3.0-only

//! Terminal telemetry display
//!
//! Runs the engine task on a tokio runtime and draws the latest snapshot
//! with ratatui. Rendering only reads the [`ViewModel`]; every text, color
//! and highlight decision was already made by the engine.

use crate::config::Config;
use crate::constants::timing;
use crate::engine::formatting::Surface;
use crate::engine::{
    EngineHandle, EngineSettings, FieldView, LogicalField, Notification, NotificationSender,
    View, ViewModel,
};
use crate::replay::ReplayEntry;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Paragraph, Widget},
};
use std::io::{self, stdout};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, warn};

/// Where notifications come from
pub enum Source {
    /// Timestamped script played back in real time
    Script(Vec<ReplayEntry>),
    /// JSON lines on stdin
    Stdin,
}

/// Run the terminal telemetry display
pub fn run(config: &Config, source: Source) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let engine = {
        let _guard = runtime.enter();
        EngineHandle::spawn(EngineSettings::from(config), config.channel_capacity)
    };
    let feeder = match source {
        Source::Script(entries) => runtime.spawn(play_script(engine.sender(), entries)),
        Source::Stdin => runtime.spawn(read_stdin(engine.sender())),
    };

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let result = run_app(&mut terminal, &engine, config.surface);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    feeder.abort();
    runtime.block_on(engine.shutdown());
    // A pending stdin read would otherwise block runtime drop
    runtime.shutdown_background();

    result
}

async fn play_script(sender: NotificationSender, entries: Vec<ReplayEntry>) {
    let start = Instant::now();
    let count = entries.len();
    for entry in entries {
        sleep_until(start + entry.offset()).await;
        if sender.notify(entry.notification).await.is_err() {
            return;
        }
    }
    info!(entries = count, "Script finished");
}

async fn read_stdin(sender: NotificationSender) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "Failed to read stdin");
                break;
            }
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<Notification>(line) {
            Ok(notification) => {
                if sender.notify(notification).await.is_err() {
                    return;
                }
            }
            // Logging to the terminal would tear the display
            Err(e) => debug!(error = %e, "Skipping malformed notification"),
        }
    }
    debug!("Stdin closed");
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    engine: &EngineHandle,
    mut surface: Surface,
) -> Result<(), Box<dyn std::error::Error>> {
    let snapshots = engine.subscribe();
    let mut show_help = false;

    loop {
        let vm = snapshots.borrow().clone();

        terminal.draw(|f| {
            let area = f.area();

            // Reserve bottom line for status
            let display_area = Rect {
                height: area.height.saturating_sub(1),
                ..area
            };
            match surface {
                Surface::Handheld => f.render_widget(HandheldWidget { vm: &vm }, display_area),
                Surface::Overlay => f.render_widget(OverlayWidget { vm: &vm }, display_area),
            }

            let status_area = Rect {
                x: area.x,
                y: area.height.saturating_sub(1),
                width: area.width,
                height: 1,
            };
            let message = if show_help {
                build_help_message()
            } else {
                build_status_message(&vm, surface)
            };
            f.render_widget(StatusBar { message: &message }, status_area);
        })?;

        if event::poll(timing::RENDER_POLL_INTERVAL)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            // Ctrl+C to quit
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                break;
            }

            // 's' to switch surface
            if key.code == KeyCode::Char('s') {
                surface = match surface {
                    Surface::Handheld => Surface::Overlay,
                    Surface::Overlay => Surface::Handheld,
                };
            }

            if key.code == KeyCode::Char('h') {
                show_help = !show_help;
            }

            if key.code == KeyCode::Char('q') {
                break;
            }
        }
    }

    Ok(())
}

fn build_status_message(vm: &ViewModel, surface: Surface) -> String {
    let time = chrono::Local::now().format("%H:%M:%S");
    let surface = match surface {
        Surface::Handheld => "handheld",
        Surface::Overlay => "overlay",
    };
    format!(
        "{} | {} | #{} | 's' surface | 'h' help | 'q' quit",
        time, surface, vm.revision
    )
}

fn build_help_message() -> String {
    "s: Switch surface | h: Toggle help | q/Ctrl+C: Quit".to_string()
}

fn tally_color(vm: &ViewModel) -> Color {
    let (r, g, b) = vm.tally.color();
    Color::Rgb(r, g, b)
}

/// Lines centered vertically and horizontally in `area`
fn render_centered(lines: Vec<Line<'_>>, area: Rect, buf: &mut Buffer) {
    let height = (lines.len() as u16).min(area.height);
    let top = area.y + area.height.saturating_sub(height) / 2;
    let inner = Rect {
        y: top,
        height,
        ..area
    };
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(inner, buf);
}

fn render_tally_strip(vm: &ViewModel, area: Rect, buf: &mut Buffer) {
    Paragraph::new(vm.tally.display_name())
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::White).bg(tally_color(vm)))
        .render(area, buf);
}

/// Camera screen of the handheld surface
struct HandheldWidget<'a> {
    vm: &'a ViewModel,
}

impl HandheldWidget<'_> {
    fn tile(field: &FieldView) -> Paragraph<'_> {
        let mut style = Style::default();
        if field.highlighted {
            style = style.add_modifier(Modifier::REVERSED);
        }
        let block = if field.selected {
            Block::bordered()
        } else {
            Block::new()
        };
        Paragraph::new(field.text.as_str())
            .style(style)
            .alignment(Alignment::Center)
            .block(block)
    }

    fn render_camera(&self, area: Rect, buf: &mut Buffer) {
        let vm = self.vm;
        let [tally, top, bottom, footer, choices] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        render_tally_strip(vm, tally, buf);

        let rows = [
            (
                top,
                [
                    LogicalField::Aperture,
                    LogicalField::ShutterSpeed,
                    LogicalField::ExposureCompensation,
                ],
            ),
            (
                bottom,
                [
                    LogicalField::Iso,
                    LogicalField::WhiteBalance,
                    LogicalField::Focus,
                ],
            ),
        ];
        for (row, fields) in rows {
            let cells: [Rect; 3] = Layout::horizontal([Constraint::Ratio(1, 3); 3]).areas(row);
            for (cell, field) in cells.into_iter().zip(fields) {
                let view = vm.field(field);
                Self::tile(&view).render(cell, buf);
            }
        }

        let footer_text = [
            LogicalField::AutoExposure,
            LogicalField::Camera,
            LogicalField::SwitcherInput,
        ]
        .into_iter()
        .map(|field| vm.text(field))
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" | ");
        Paragraph::new(footer_text)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray))
            .render(footer, buf);

        // Values the selector can step through
        if let Some(mode) = &vm.selected_mode
            && !vm.selected_choices.is_empty()
        {
            Paragraph::new(format!("{}: {}", mode, vm.selected_choices.join(" ")))
                .alignment(Alignment::Center)
                .render(choices, buf);
        }
    }
}

impl Widget for HandheldWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.vm.view {
            View::CameraOnline => self.render_camera(area, buf),
            View::AuxMultiview => render_centered(
                vec![Line::from("Multiview"), Line::from(self.vm.camera_name.as_str())],
                area,
                buf,
            ),
            View::CameraOffline => {
                let mut lines = vec![
                    Line::from(self.vm.camera_name.as_str()),
                    Line::from("Camera offline"),
                ];
                if !self.vm.status_text.is_empty() {
                    lines.push(Line::from(self.vm.status_text.as_str()));
                }
                render_centered(lines, area, buf);
            }
        }
    }
}

/// Broadcast overlay surface
struct OverlayWidget<'a> {
    vm: &'a ViewModel,
}

impl Widget for OverlayWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let vm = self.vm;
        let [tally, _, panel] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(5),
        ])
        .areas(area);

        render_tally_strip(vm, tally, buf);

        // The info panel belongs to the camera screen only
        if !vm.overlay_visible || vm.view != View::CameraOnline {
            return;
        }

        let settings = [
            LogicalField::Aperture,
            LogicalField::ShutterSpeed,
            LogicalField::ExposureCompensation,
            LogicalField::Iso,
            LogicalField::WhiteBalanceOverlay,
            LogicalField::Focus,
        ]
        .into_iter()
        .map(|field| vm.text(field))
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("  ");

        let title = match vm.text(LogicalField::SwitcherInput) {
            "" => vm.camera_name.clone(),
            input => format!("{} ({})", vm.camera_name, input),
        };
        let lines = vec![
            Line::from(vm.text(LogicalField::Camera)),
            Line::from(vm.text(LogicalField::AutoExposure)),
            Line::from(settings),
        ];
        Paragraph::new(lines)
            .block(Block::bordered().title(title))
            .style(Style::default().fg(Color::White).bg(Color::Black))
            .render(panel, buf);
    }
}

/// Status bar widget
struct StatusBar<'a> {
    message: &'a str,
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Fill background
        for x in area.x..area.x + area.width {
            if let Some(cell) = buf.cell_mut((x, area.y)) {
                cell.set_char(' ');
                cell.set_bg(Color::DarkGray);
            }
        }

        let text: String = self.message.chars().take(area.width as usize).collect();
        buf.set_string(
            area.x,
            area.y,
            text,
            Style::default().fg(Color::White).bg(Color::DarkGray),
        );
    }
}
