use clap::Parser;
use fire_spread_core::{
    save_spread_points, FirePoint, PropagationEngine, Region, RegionSet, SimulationConfig,
    UniformNdvi, Weather,
};

/// Fire spread simulation demo with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "fire-spread-demo")]
#[command(about = "Wildfire spread propagation demo", long_about = None)]
struct Args {
    /// Ignition longitude in WGS84 degrees
    #[arg(short = 'x', long, default_value_t = 90.0)]
    longitude: f64,

    /// Ignition latitude in WGS84 degrees
    #[arg(short = 'y', long, default_value_t = 55.0)]
    latitude: f64,

    /// Temperature in °C
    #[arg(short, long, default_value_t = 30.0)]
    temperature: f64,

    /// Relative humidity in %
    #[arg(long, default_value_t = 20.0)]
    humidity: f64,

    /// Wind speed in m/s
    #[arg(short, long, default_value_t = 8.0)]
    wind_speed: f64,

    /// Wind direction in degrees (0 = North, clockwise)
    #[arg(long, default_value_t = 45.0)]
    wind_direction: f64,

    /// Number of simulation steps
    #[arg(short, long, default_value_t = 10)]
    steps: u32,

    /// Minimum risk score required for spreading
    #[arg(short, long, default_value_t = 0.4)]
    risk_threshold: f64,

    /// Base spread distance per step in degrees
    #[arg(short, long, default_value_t = 0.2)]
    max_distance: f64,

    /// Candidates sampled per burning point
    #[arg(long, default_value_t = 16)]
    samples_per_point: u32,

    /// Uniform vegetation index across the scenario
    #[arg(short, long, default_value_t = 0.5)]
    ndvi: f64,

    /// Minimum vegetation index considered burnable
    #[arg(long, default_value_t = 0.15)]
    ndvi_floor: f64,

    /// Half-width of the monitored square region, in degrees
    #[arg(long, default_value_t = 10.0)]
    region_half_width: f64,

    /// Master seed for reproducible runs
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Output path for the spread-point JSON export
    #[arg(short, long, default_value = "spread_points.json")]
    output: String,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    println!("=== Fire Spread Demo ===\n");

    let weather = Weather::new(
        args.temperature,
        args.humidity,
        args.wind_speed,
        args.wind_direction,
    );
    let ignition = FirePoint::ignition(args.longitude, args.latitude, weather);
    println!(
        "Ignition at ({:.4}, {:.4}): T={:.1}°C, H={:.0}%, wind {:.1} m/s @ {:.0}°, risk {:.3}",
        ignition.x(),
        ignition.y(),
        args.temperature,
        args.humidity,
        args.wind_speed,
        args.wind_direction,
        ignition.risk_score()
    );

    let regions = RegionSet::new(vec![Region::rectangle(
        "demo-region",
        args.longitude - args.region_half_width,
        args.latitude - args.region_half_width,
        args.longitude + args.region_half_width,
        args.latitude + args.region_half_width,
    )
    .with_weather(weather)]);

    let config = SimulationConfig {
        steps: args.steps,
        risk_threshold: args.risk_threshold,
        max_distance: args.max_distance,
        samples_per_point: args.samples_per_point,
        ndvi_floor: args.ndvi_floor,
        seed: args.seed,
        ..SimulationConfig::default()
    };
    let engine = PropagationEngine::new(config);
    let ndvi = UniformNdvi::new(args.ndvi);

    let output = match engine.run(&[ignition], &ndvi, &regions) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("Simulation failed: {e}");
            std::process::exit(1);
        }
    };

    let stats = output.stats;
    println!("\nRun finished: {:?} after {} steps", output.termination, stats.steps_run);
    println!("  Points processed:   {}", stats.points_processed);
    println!("  Below threshold:    {}", stats.points_below_threshold);
    println!("  Candidates drawn:   {}", stats.candidates_generated);
    println!("  Rejected (fuel):    {}", stats.rejected_no_fuel);
    println!("  Rejected (dup):     {}", stats.rejected_duplicate);
    println!("  Rejected (region):  {}", stats.rejected_outside_regions);
    println!("  Spread points:      {}", output.points.len());

    if let Err(e) = save_spread_points(&output, &args.output) {
        eprintln!("Export failed: {e}");
        std::process::exit(1);
    }
    println!("\nSaved fire spread results to {}", args.output);
}
