// src/gui.rs
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use eframe::egui;
use egui::Color32;
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};

use crate::drivers::{FileTailer, MonitorPipeline, SampleTable, TickSchedule};
use crate::types::TickFrame;

/// How long the failure banner stays up before the window closes itself.
pub const CLOSE_AFTER_FAILURE: Duration = Duration::from_secs(10);

/// One legend entry: column name, color and its unbroken segments.
struct Series<'a> {
    name: &'a str,
    color: Color32,
    runs: Vec<Vec<[f64; 2]>>,
}

/// Drawing settings owned by the app and handed to every redraw.
pub struct RenderContext {
    pub palette: Vec<Color32>,
    pub marker_radius: f32,
    pub line_width: f32,
    pub x_label: String,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self {
            // matplotlib "tab10"
            palette: vec![
                Color32::from_rgb(31, 119, 180),
                Color32::from_rgb(255, 127, 14),
                Color32::from_rgb(44, 160, 44),
                Color32::from_rgb(214, 39, 40),
                Color32::from_rgb(148, 103, 189),
                Color32::from_rgb(140, 86, 75),
                Color32::from_rgb(227, 119, 194),
                Color32::from_rgb(127, 127, 127),
                Color32::from_rgb(188, 189, 34),
                Color32::from_rgb(23, 190, 207),
            ],
            marker_radius: 2.0,
            line_width: 1.0,
            x_label: "sample index".to_owned(),
        }
    }
}

impl RenderContext {
    fn color(&self, index: usize) -> Color32 {
        if self.palette.is_empty() {
            return Color32::WHITE;
        }
        self.palette[index % self.palette.len()]
    }

    /// Every column, including ones with no plottable value.
    fn series<'a>(&self, table: &'a SampleTable) -> Vec<Series<'a>> {
        table
            .columns()
            .as_slice()
            .iter()
            .enumerate()
            .map(|(idx, name)| Series {
                name,
                color: self.color(idx),
                runs: table.runs(idx),
            })
            .collect()
    }

    /// Plots every column against row index, lines plus markers.
    pub fn draw(&self, ui: &mut egui::Ui, frame: &TickFrame) {
        let series = self.series(&frame.table);
        Plot::new("samples")
            .legend(Legend::default())
            .x_axis_label(self.x_label.clone())
            .auto_bounds_x()
            .auto_bounds_y()
            .show(ui, |plot_ui| {
                for Series { name, color, runs } in series {
                    if runs.is_empty() {
                        // keeps the legend entry for an all-missing column
                        plot_ui.line(
                            Line::new(PlotPoints::new(Vec::new()))
                                .name(name)
                                .color(color),
                        );
                        continue;
                    }
                    // Same name and color merge into one legend entry.
                    for run in runs {
                        plot_ui.line(
                            Line::new(PlotPoints::new(run.clone()))
                                .name(name)
                                .color(color)
                                .width(self.line_width),
                        );
                        plot_ui.points(
                            Points::new(PlotPoints::new(run))
                                .name(name)
                                .color(color)
                                .radius(self.marker_radius),
                        );
                    }
                }
            });
    }
}

pub struct MonitorApp {
    pipeline: MonitorPipeline<FileTailer>,
    schedule: TickSchedule,
    render: RenderContext,
    latest: Option<TickFrame>,
    failure: Option<String>,
    failed_at: Option<Instant>,
    // 致命错误回传给 main，用于退出码
    outcome: Arc<Mutex<Option<String>>>,
}

impl MonitorApp {
    pub fn new(
        pipeline: MonitorPipeline<FileTailer>,
        schedule: TickSchedule,
        outcome: Arc<Mutex<Option<String>>>,
    ) -> Self {
        Self {
            pipeline,
            schedule,
            render: RenderContext::default(),
            latest: None,
            failure: None,
            failed_at: None,
            outcome,
        }
    }

    fn run_due_tick(&mut self) {
        if self.pipeline.is_halted() || !self.schedule.due(Instant::now()) {
            return;
        }
        match self.pipeline.tick() {
            Ok(frame) => self.latest = Some(frame),
            Err(err) => {
                let msg = err.to_string();
                if let Ok(mut slot) = self.outcome.lock() {
                    *slot = Some(msg.clone());
                }
                self.failure = Some(msg);
                self.failed_at = Some(Instant::now());
            }
        }
    }

    /// Time left before a halted app closes its window, if it has halted.
    fn close_in(&self, now: Instant) -> Option<Duration> {
        self.failed_at
            .map(|at| CLOSE_AFTER_FAILURE.saturating_sub(now.saturating_duration_since(at)))
    }
}

impl eframe::App for MonitorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.run_due_tick();
        let now = Instant::now();
        let close_in = self.close_in(now);
        match close_in {
            None => ctx.request_repaint_after(self.schedule.until_next(now)),
            Some(left) if left.is_zero() => {
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
            Some(_) => ctx.request_repaint_after(Duration::from_secs(1)),
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| match &self.latest {
                Some(frame) => ui.heading(frame.tick.to_string()),
                None => ui.heading("waiting for first read"),
            });
            if let Some(msg) = &self.failure {
                let secs = close_in.unwrap_or_default().as_secs();
                ui.colored_label(
                    Color32::RED,
                    format!("Stopped: {msg} (closing in {secs}s)"),
                );
            }
            if let Some(frame) = &self.latest {
                self.render.draw(ui, frame);
            }
        });
    }
}
