use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;
use mag_capture::{capture_region, MonitorSource, XcapBackend};
use mag_display::{CameraController, SpatialArrangement};
use rmagnifier::app::{window_geometry, MagnifierApp, MagnifierSetup};
use rmagnifier::args::Args;
use rmagnifier::config::AppConfig;
use tracing::{debug, info, warn};

fn init_logging(verbose: bool) -> Result<()> {
    let log_level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "rmagnifier={0},mag_display={0},mag_capture=info,platform_input=info",
                    log_level
                )
                .into()
            }),
        )
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging first
    init_logging(args.verbose)?;

    info!("Starting rmagnifier {}", env!("CARGO_PKG_VERSION"));

    let mut config = AppConfig::load_or_default(args.config.as_deref());
    config.apply_args(&args);

    // Monitor layout
    let backend = XcapBackend::new().context("Failed to enumerate monitors")?;
    let monitors = backend.monitors()?;
    let main_monitor = backend.main_monitor()?;
    let arrangement = SpatialArrangement::resolve(monitors, main_monitor)
        .context("Failed to resolve monitor layout")?;

    for line in arrangement.summary().lines() {
        debug!("{}", line);
    }

    if args.list_monitors {
        println!("{}", arrangement.summary());
        return Ok(());
    }

    let selection = arrangement.select(args.monitor.as_deref());
    if let Some(reason) = &selection.fallback {
        warn!(
            "{}; using rightmost monitor (spatial index {})",
            reason, selection.spatial_index
        );
    }
    let target = *arrangement.descriptor(selection.system_index)?;
    info!(
        "Opening on monitor {} (system {}): {}x{} at ({}, {})",
        selection.spatial_index,
        target.system_index,
        target.resolution.width,
        target.resolution.height,
        target.position.x,
        target.position.y
    );

    let scale_factor = backend.scale_factor(target.system_index).unwrap_or_else(|e| {
        warn!("{}; assuming a scale factor of 1.0", e);
        1.0
    });
    let (window_position, window_size) = window_geometry(&target, scale_factor);
    debug!(
        "Window {}x{} points at ({}, {}), scale {:.2}",
        window_size.x, window_size.y, window_position.x, window_position.y, scale_factor
    );

    // Capture happens before the window exists so it never shows up in the snapshot
    let (desktop_origin, desktop_size) = arrangement.virtual_desktop();
    let frame = capture_region(&backend, desktop_origin, desktop_size)
        .context("Failed to capture the desktop")?;
    drop(backend);

    let origin = target.position.to_vec2() - desktop_origin.to_vec2();
    let camera = CameraController::new(config.camera, origin)
        .context("Invalid camera configuration")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("rmagnifier")
            .with_inner_size(window_size)
            .with_position(window_position)
            .with_icon(load_icon().unwrap_or_else(|_| create_fallback_icon())),
        vsync: true,
        renderer: eframe::Renderer::Glow,
        centered: false,
        ..Default::default()
    };

    let setup = MagnifierSetup {
        config,
        frame,
        camera,
    };

    info!("Launching magnifier window");
    match eframe::run_native(
        "rmagnifier",
        options,
        Box::new(move |cc| Box::new(MagnifierApp::new(&cc.egui_ctx, setup))),
    ) {
        Ok(()) => {
            info!("Application exited normally");
            Ok(())
        }
        Err(e) => {
            warn!("Application exited with error: {}", e);
            Err(anyhow::anyhow!("{}", e))
        }
    }
}

fn load_icon() -> Result<egui::IconData> {
    let icon_path = std::env::current_exe()?
        .parent()
        .unwrap_or_else(|| std::path::Path::new("."))
        .join("assets")
        .join("icon.png");

    let image = image::open(&icon_path)
        .with_context(|| format!("Failed to load icon from {}", icon_path.display()))?;
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(egui::IconData {
        rgba: rgba.into_raw(),
        width,
        height,
    })
}

/// A 32x32 magnifying glass: a ring with a handle to the bottom right.
fn create_fallback_icon() -> egui::IconData {
    const SIZE: u32 = 32;
    let mut rgba = vec![0u8; (SIZE * SIZE * 4) as usize];

    for y in 0..SIZE {
        for x in 0..SIZE {
            let idx = ((y * SIZE + x) * 4) as usize;
            let (fx, fy) = (x as f32 - 13.0, y as f32 - 13.0);
            let distance = (fx * fx + fy * fy).sqrt();

            let ring = (8.0..=11.0).contains(&distance);
            let handle = x >= 20 && y >= 20 && x.abs_diff(y) <= 2;

            if ring || handle {
                rgba[idx..idx + 4].copy_from_slice(&[41, 98, 255, 255]);
            } else if distance < 8.0 {
                rgba[idx..idx + 4].copy_from_slice(&[220, 235, 255, 255]);
            }
        }
    }

    egui::IconData {
        rgba,
        width: SIZE,
        height: SIZE,
    }
}
