use stablefluid::{AnalysisRecorder, FluidData, FluidError, FluidMetrics, ImpulseMode, MacFluid, RunConfig};

/// Hand-built fields for exact metric checks.
struct StaticFluid {
    size: usize,
    density: Vec<f32>,
    velocity_x: Vec<f32>,
    velocity_y: Vec<f32>,
}

impl StaticFluid {
    fn uniform(size: usize, density: f32, vx: f32) -> Self {
        let stride = size + 2;
        let mut fluid = Self {
            size,
            density: vec![0.0; stride * stride],
            velocity_x: vec![0.0; stride * stride],
            velocity_y: vec![0.0; stride * stride],
        };
        for y in 1..=size {
            for x in 1..=size {
                fluid.density[y * stride + x] = density;
                fluid.velocity_x[y * stride + x] = vx;
            }
        }
        fluid
    }
}

impl FluidData for StaticFluid {
    fn size(&self) -> usize { self.size }
    fn density(&self) -> &[f32] { &self.density }
    fn velocity_x(&self) -> &[f32] { &self.velocity_x }
    fn velocity_y(&self) -> &[f32] { &self.velocity_y }
}

#[test]
fn test_metrics_on_uniform_field() {
    let fluid = StaticFluid::uniform(4, 0.5, 0.0);
    let metrics = FluidMetrics::analyze(&fluid, 3);

    assert_eq!(metrics.frame, 3);
    assert!((metrics.total_mass - 8.0).abs() < 1e-6);
    assert!((metrics.avg_density - 0.5).abs() < 1e-6);
    assert_eq!(metrics.max_density, 0.5);
    assert_eq!(metrics.total_kinetic_energy, 0.0);
    assert_eq!(metrics.divergence_norm, 0.0);
    assert_eq!(metrics.vorticity, 0.0);
}

#[test]
fn test_metrics_kinetic_energy() {
    let fluid = StaticFluid::uniform(4, 0.5, 2.0);
    let metrics = FluidMetrics::analyze(&fluid, 0);

    // 16 cells of ½·0.5·2².
    assert!((metrics.total_kinetic_energy - 16.0).abs() < 1e-5);
    assert_eq!(metrics.max_velocity, 2.0);
    assert!((metrics.avg_velocity - 2.0).abs() < 1e-6);
}

#[test]
fn test_metrics_match_simulation_state() {
    let mut sim = MacFluid::new(12).unwrap();
    sim.add_density_brush(6, 6, 1, 1.0).unwrap();
    sim.add_velocity(6, 6, 4.0, 0.0).unwrap();
    sim.simulate(0.1);

    let metrics = FluidMetrics::analyze(&sim, 1);
    assert!((metrics.total_mass - sim.density().interior_sum()).abs() < 1e-4);
    let divergence = stablefluid::solver::divergence_norm(sim.velocity_x(), sim.velocity_y());
    assert!((metrics.divergence_norm - divergence).abs() < 1e-5);
    assert!(metrics.max_velocity > 0.0);
}

#[test]
fn test_recorder_serializes_history() {
    let mut sim = MacFluid::new(6).unwrap();
    let mut recorder = AnalysisRecorder::new();
    sim.add_density(3, 3, 1.0).unwrap();
    for frame in 0..3 {
        sim.simulate(0.1);
        recorder.record_frame(&sim, frame);
    }
    assert_eq!(recorder.metrics_history.len(), 3);

    let json = serde_json::to_value(&recorder).unwrap();
    let history = json["metrics_history"].as_array().unwrap();
    assert_eq!(history.len(), 3);
    assert_eq!(history[2]["frame"], 2);
    assert!(history[0]["total_mass"].as_f64().unwrap() > 0.0);
}

#[test]
fn test_config_defaults_fill_missing_keys() {
    let config = RunConfig::from_json(r#"{ "size": 32, "params": { "velocity_impulse": "overwrite" } }"#).unwrap();
    assert_eq!(config.size, 32);
    assert_eq!(config.frames, RunConfig::default().frames);
    assert_eq!(config.params.velocity_impulse, ImpulseMode::Overwrite);
    assert_eq!(config.params.viscosity, RunConfig::default().params.viscosity);
}

#[test]
fn test_config_round_trips_through_json() {
    let config = RunConfig::default();
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(RunConfig::from_json(&json).unwrap(), config);
}

#[test]
fn test_config_rejects_bad_values() {
    assert!(matches!(RunConfig::from_json(r#"{ "size": 0 }"#), Err(FluidError::InvalidSize(0))));
    assert!(matches!(
        RunConfig::from_json(r#"{ "dt": -0.1 }"#),
        Err(FluidError::InvalidParameter { name: "dt", .. })
    ));
    assert!(matches!(
        RunConfig::from_json(r#"{ "params": { "diffusion_rate": -1.0 } }"#),
        Err(FluidError::InvalidParameter { name: "diffusion_rate", .. })
    ));
    assert!(matches!(RunConfig::from_json("{ not json"), Err(FluidError::Config(_))));

    let turbulent = RunConfig {
        initial_turbulence: f32::INFINITY,
        ..RunConfig::default()
    };
    assert!(matches!(
        turbulent.validate(),
        Err(FluidError::InvalidParameter { name: "initial_turbulence", .. })
    ));
}
