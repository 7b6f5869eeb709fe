use rand::SeedableRng;
use rand::rngs::StdRng;
use stablefluid::{AnalysisRecorder, ImageExporter, MacFluid, Renderer, RunConfig};
use std::fs;
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    let config = if args.len() > 1 {
        log::info!("loading config from {}", args[1]);
        RunConfig::load(Path::new(&args[1]))?
    } else {
        RunConfig::default()
    };

    run_headless(&config)?;
    Ok(())
}

fn run_headless(config: &RunConfig) -> Result<(), Box<dyn std::error::Error>> {
    log::info!(
        "running {} frames on a {}x{} grid (dt {})",
        config.frames,
        config.size,
        config.size,
        config.dt
    );

    let mut simulation = MacFluid::with_params(config.size, config.params)?;
    let mut rng = StdRng::seed_from_u64(config.seed);
    simulation.randomize_velocity(&mut rng, config.initial_turbulence)?;

    let exporter = ImageExporter::with_renderer(
        Renderer::new(config.image_size, config.image_size).with_velocity_scale(config.force),
    );
    let mut recorder = AnalysisRecorder::new();

    if config.export_every > 0 {
        fs::create_dir_all(&config.output_dir)?;
    }

    // Source sits near the bottom and pushes upward.
    let center = config.size / 2 + 1;
    let source_y = (config.size * 3 / 4).max(1);

    for frame in 0..config.frames {
        if frame < config.inject_frames {
            simulation.add_density_brush(center, source_y, config.brush_radius, 1.0)?;
            simulation.add_force(
                center,
                source_y,
                glam::Vec2::new(0.0, -config.force),
                config.brush_radius as f32 + 1.0,
            )?;
        }

        simulation.simulate(config.dt);
        let metrics = recorder.record_frame(&simulation, frame);

        if config.export_every > 0 && frame % config.export_every == 0 {
            metrics.log_summary();
            let density_path = config.output_dir.join(format!("density_{:04}.png", frame));
            let velocity_path = config.output_dir.join(format!("velocity_{:04}.png", frame));
            exporter.export_density_png(&simulation, &density_path)?;
            exporter.export_velocity_png(&simulation, &velocity_path)?;
        }
    }

    recorder.log_trends();

    fs::create_dir_all(&config.output_dir)?;
    let metrics_path = config.output_dir.join("metrics.json");
    exporter.export_metrics_json(&recorder, &metrics_path)?;
    log::info!("metrics written to {}", metrics_path.display());

    Ok(())
}
