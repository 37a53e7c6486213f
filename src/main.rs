// src/main.rs
mod config;
mod drivers;
mod gui;
mod types;
use std::sync::{Arc, Mutex};
use anyhow::{anyhow, bail, Context};
use clap::Parser;
use eframe::egui;
use config::{Cli, MonitorConfig, RunMode};
use drivers::{render_tick_png, FileTailer, MonitorPipeline, PlotStyle, TickSchedule};
fn build_pipeline(config: &MonitorConfig) -> anyhow::Result<MonitorPipeline<FileTailer>> {
    let tailer = FileTailer::new(&config.path, config.window_bound)?;
    Ok(MonitorPipeline::new(tailer, config.columns.clone()))
}
// 无界面：读一次，打印 JSON
fn print_once(config: &MonitorConfig) -> anyhow::Result<()> {
    let mut pipeline = build_pipeline(config)?;
    let frame = pipeline.tick()?;
    println!("{}", frame.to_json()?);
    Ok(())
}
// 无界面：读一次，输出 PNG
fn write_snapshot(config: &MonitorConfig, target: &std::path::Path) -> anyhow::Result<()> {
    let mut pipeline = build_pipeline(config)?;
    let frame = pipeline.tick()?;
    let png = render_tick_png(&frame, &PlotStyle::default())?;
    std::fs::write(target, png)
        .with_context(|| format!("failed to write snapshot to {}", target.display()))?;
    log::info!("tick {} written to {}", frame.tick, target.display());
    Ok(())
}
fn run_window(config: &MonitorConfig, fullscreen: bool) -> anyhow::Result<()> {
    let pipeline = build_pipeline(config)?;
    let schedule = TickSchedule::new(config.interval)?;
    let outcome = Arc::new(Mutex::new(None));
    let app = gui::MonitorApp::new(pipeline, schedule, Arc::clone(&outcome));
    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([1000.0, 600.0])
        .with_fullscreen(fullscreen)
        .with_title(format!("tailscope - {}", config.path.display()));
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native("tailscope", options, Box::new(move |_cc| Box::new(app)))
        .map_err(|e| anyhow!("display failed: {e}"))?;
    let failure = outcome.lock().ok().and_then(|mut slot| slot.take());
    if let Some(msg) = failure {
        bail!(msg);
    }
    Ok(())
}
// 入口函数
fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = MonitorConfig::from_cli(cli).context("invalid configuration")?;
    log::info!(
        "tailing {} (last {} lines, {} columns {:?}, every {:?})",
        config.path.display(),
        config.window_bound,
        config.columns.len(),
        config.columns.as_slice(),
        config.interval
    );
    match &config.mode {
        RunMode::PrintOnce => print_once(&config),
        RunMode::Snapshot(target) => write_snapshot(&config, target),
        RunMode::Window { fullscreen } => run_window(&config, *fullscreen),
    }
}
