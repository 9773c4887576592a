mod attenuation;
mod color;
mod config;
mod error;
mod geometry;
mod materials;
mod plan;
mod render;
mod request;


use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};

// Re-export public API
pub use attenuation::{AttenuationAlgorithm, Friis, RouterCoefficient, damping_to_string, precompute_routers};
pub use color::{Rgb, apply_zone_colors, compute_zones, signal_color, zone_grid_to_string};
pub use config::{EngineConfig, GridLayout};
pub use error::{ZoneError, ZoneResult};
pub use geometry::{Point, Segment, segments_intersect};
pub use materials::{Band, DampingValue, Material, damping_for};
pub use plan::{FloorPlan, Router, Wall};
pub use render::save_ppm;
pub use request::{ErrorBody, ZoneRequest, ZoneResponse, handle_request};

/// Wi-Fi coverage heatmaps for floor plans
#[derive(Parser, Debug)]
#[command(name = "wifi-zones", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Evaluate pixels on the calling thread only
    #[arg(long, global = true)]
    sequential: bool,

    /// Pixels per row
    #[arg(long, global = true, default_value_t = 350, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    width: usize,

    /// Rows per floor
    #[arg(long, global = true, default_value_t = 150, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    floor_rows: usize,

    /// Rows between the same position on adjacent floors
    #[arg(long, global = true, default_value_t = 160, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    floor_stride: usize,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Read a zone request (JSON) and print the response
    Zones {
        /// Request file, stdin when omitted
        input: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Compute zones for a request and save the heatmap as PPM
    Render {
        input: PathBuf,
        output: PathBuf,
        /// Image pixels per plan pixel
        #[arg(long, default_value_t = 2)]
        scale: usize,
    },
    /// Print a request skeleton holding blank floors
    Blank {
        #[arg(long, default_value_t = 1)]
        floors: usize,
    },
    /// Time sequential against parallel evaluation
    Benchmark {
        #[arg(long, default_value_t = 5)]
        iterations: usize,
    },
}

impl Cli {
    fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            layout: GridLayout {
                width: self.width,
                floor_rows: self.floor_rows,
                floor_stride: self.floor_stride.max(self.floor_rows),
                ..GridLayout::default()
            },
            parallel: !self.sequential,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        if err.is_client_error() {
            let body = serde_json::to_string(&ErrorBody::from(&err)).unwrap_or_default();
            println!("{}", body);
            std::process::exit(2);
        }
        log::error!("{}", err);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> ZoneResult<()> {
    let config = cli.engine_config();
    match &cli.command {
        Command::Zones { input, output } => run_zones(input.as_ref(), output.as_ref(), config),
        Command::Render { input, output, scale } => run_render(input, output, *scale, config),
        Command::Blank { floors } => run_blank(*floors, &config.layout),
        Command::Benchmark { iterations } => {
            run_benchmark(*iterations, &config.layout);
            Ok(())
        }
    }
}

fn read_request(input: Option<&PathBuf>) -> ZoneResult<ZoneRequest> {
    let body = match input {
        Some(path) => fs::read_to_string(path)?,
        None => io::read_to_string(io::stdin())?,
    };
    ZoneRequest::from_json(&body)
}

fn run_zones(input: Option<&PathBuf>, output: Option<&PathBuf>, config: EngineConfig) -> ZoneResult<()> {
    let request = read_request(input)?;
    let response = handle_request(&request, config)?;
    let body = serde_json::to_string(&response)?;

    match output {
        Some(path) => fs::write(path, body)?,
        None => writeln!(io::stdout(), "{}", body)?,
    }
    Ok(())
}

fn run_render(input: &PathBuf, output: &PathBuf, scale: usize, config: EngineConfig) -> ZoneResult<()> {
    let request = read_request(Some(input))?;
    let response = handle_request(&request, config)?;
    save_ppm(&response.pixels, config.layout.width, &output.to_string_lossy(), scale)?;
    log::info!("heatmap written to {}", output.display());
    Ok(())
}

fn run_blank(floors: usize, layout: &GridLayout) -> ZoneResult<()> {
    let mut plan = FloorPlan::empty(layout, plan::BLANK_COLOR);
    for _ in 1..floors {
        plan.add_floor(layout);
    }

    let skeleton = serde_json::json!({
        "pixels": plan.pixels,
        "routers": [],
        "walls": [],
        "receiver_coef": plan.receiver_coef,
        "wall_scale": plan.wall_scale,
    });
    writeln!(io::stdout(), "{}", skeleton)?;
    Ok(())
}

/// A two-floor office: concrete core, glass front, drywall partitions.
fn benchmark_plan(layout: &GridLayout) -> FloorPlan {
    let mut plan = FloorPlan::empty(layout, plan::BLANK_COLOR);
    plan.add_floor(layout);

    let stride = layout.floor_stride as i64;
    let width = layout.width as i64;
    for floor in 0..2 {
        let top = 10 + floor * stride;
        plan.walls.push(Wall::new(Point::new(0, top + 20), Point::new(width - 1, top + 20), Material::DoubleGlass, 2.0));
        plan.walls.push(Wall::new(Point::new(width / 2, top + 20), Point::new(width / 2, top + 140), Material::Concrete, 14.0));
        plan.walls.push(Wall::new(Point::new(width / 4, top + 60), Point::new(width / 4, top + 140), Material::Drywall, 3.0));
    }
    plan.routers.push(Router::new(width / 3, 90, 3.0, Band::Ghz5));
    plan.routers.push(Router::new(2 * width / 3, stride + 90, 3.0, Band::Ghz2_4));
    plan.receiver_coef = 4.0;
    plan.wall_scale = 3.6231884057971016;
    plan
}

fn run_benchmark(iterations: usize, layout: &GridLayout) {
    use std::time::Instant;

    let iterations = iterations.max(1);
    let plan = benchmark_plan(layout);

    println!("=== Zone Computation Benchmark ===\n");
    println!(
        "Grid: {} pixels ({} floors), {} routers, {} walls",
        plan.pixels.len(),
        plan.floor_count(layout),
        plan.routers.len(),
        plan.walls.len()
    );
    println!("-----------------------");

    let mut timings = Vec::new();
    for parallel in [false, true] {
        let config = EngineConfig { layout: *layout, parallel };
        let start = Instant::now();
        for _ in 0..iterations {
            let _ = compute_zones(&plan, config);
        }
        let avg_ms = start.elapsed().as_secs_f64() * 1000.0 / iterations as f64;
        timings.push(avg_ms);
    }

    println!("  Sequential: {:.3} ms/iter", timings[0]);
    println!("  Parallel:   {:.3} ms/iter", timings[1]);
    println!("  Speedup: {:.2}x", timings[0] / timings[1]);
}
