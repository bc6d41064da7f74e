//! bubblemesh CLI - remesh a triangle mesh toward a uniform edge length.
//!
//! Usage: bubblemesh <COMMAND> [OPTIONS] <INPUT> [OUTPUT]
//!
//! Run `bubblemesh --help` for available commands. Set `RUST_LOG=debug` to
//! see per-iteration statistics.

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use nalgebra::Point3;

use bubblemesh::algo::length::ConstantLength;
use bubblemesh::algo::remesh::{
    self, FlipCriterion, RemeshInput, RemeshOptions, RemeshStats, Remesher,
};
use bubblemesh::geometry::{FeatureCurve, Polyline, TriangleSurface};
use bubblemesh::io;
use bubblemesh::mesh::HalfEdgeMesh;

#[derive(Parser)]
#[command(name = "bubblemesh")]
#[command(author, version, about = "Feature-preserving isotropic remeshing", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display mesh information
    Info {
        /// Input mesh file
        input: PathBuf,
    },

    /// Remesh toward a target edge length, using the input as target surface
    Remesh {
        /// Input mesh file
        input: PathBuf,

        /// Output mesh file
        output: PathBuf,

        /// Target edge length (default: current average edge length)
        #[arg(short, long)]
        target_length: Option<f64>,

        /// Number of remesh steps to run
        #[arg(short, long, default_value = "10")]
        steps: usize,

        /// Iterations per step
        #[arg(short, long, default_value = "1")]
        iterations: usize,

        /// Pull toward the input surface (0 = minimal surface)
        #[arg(long, default_value = "0.8")]
        pull: f64,

        /// Edge flip criterion
        #[arg(long, value_enum, default_value = "angle")]
        flip: FlipMethod,

        /// Smoothing strength
        #[arg(long, default_value = "0.8")]
        smoothing: f64,

        /// Split/collapse hysteresis
        #[arg(long, default_value = "0.15")]
        length_tolerance: f64,

        /// Distance within which vertices snap to fixed points and curves
        #[arg(long, default_value = "0.01")]
        proximity: f64,

        /// Fixed point as x,y,z (repeatable)
        #[arg(long = "fix", value_parser = parse_point)]
        fixed: Vec<Point3<f64>>,

        /// Pin every boundary vertex in place
        #[arg(long)]
        pin_boundary: bool,

        /// Let boundary vertices slide along the original boundary
        #[arg(long, conflicts_with = "pin_boundary")]
        feature_boundary: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FlipMethod {
    /// Regularize valences
    Valence,
    /// Delaunay angle criterion
    Angle,
}

impl From<FlipMethod> for FlipCriterion {
    fn from(m: FlipMethod) -> Self {
        match m {
            FlipMethod::Valence => FlipCriterion::Valence,
            FlipMethod::Angle => FlipCriterion::Angle,
        }
    }
}

fn parse_point(s: &str) -> Result<Point3<f64>, String> {
    let coords = s
        .split(',')
        .map(|c| c.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| e.to_string())?;
    match coords[..] {
        [x, y, z] => Ok(Point3::new(x, y, z)),
        _ => Err(format!("expected x,y,z but got {:?}", s)),
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Info { input } => cmd_info(&input)?,

        Commands::Remesh {
            input,
            output,
            target_length,
            steps,
            iterations,
            pull,
            flip,
            smoothing,
            length_tolerance,
            proximity,
            fixed,
            pin_boundary,
            feature_boundary,
        } => {
            let options = RemeshOptions::default()
                .with_iterations(iterations)
                .with_pull(pull)
                .with_flip(flip.into())
                .with_smoothing_strength(smoothing)
                .with_length_tolerance(length_tolerance)
                .with_proximity_tolerance(proximity);
            let constraints = Constraints {
                fixed,
                pin_boundary,
                feature_boundary,
            };
            cmd_remesh(&input, &output, target_length, steps, options, constraints)?;
        }
    }

    Ok(())
}

fn cmd_info(input: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let mesh: HalfEdgeMesh = io::load(input)?;

    println!("File: {}", input.display());
    println!("Vertices: {}", mesh.vertex_count());
    println!("Edges: {}", mesh.edge_count());
    println!("Faces: {}", mesh.face_count());
    println!("Surface area: {:.6}", mesh.surface_area());

    if let Some((min, max)) = mesh.bounding_box() {
        println!(
            "Bounding box: ({:.3}, {:.3}, {:.3}) to ({:.3}, {:.3}, {:.3})",
            min.x, min.y, min.z, max.x, max.y, max.z
        );
    }

    let (mut shortest, mut longest) = (f64::MAX, 0.0_f64);
    for e in mesh.edge_ids() {
        let len = mesh.edge_length(e);
        shortest = shortest.min(len);
        longest = longest.max(len);
    }
    println!("Average edge length: {:.6}", remesh::average_edge_length(&mesh));
    println!("Edge length range: [{:.6}, {:.6}]", shortest, longest);

    let loops = Polyline::boundary_loops(&mesh);
    if loops.is_empty() {
        println!("Topology: Closed (no boundary)");
    } else {
        let boundary = mesh.vertex_ids().filter(|&v| mesh.is_boundary_vertex(v)).count();
        println!("Topology: Open ({} loops, {} boundary vertices)", loops.len(), boundary);
    }

    Ok(())
}

struct Constraints {
    fixed: Vec<Point3<f64>>,
    pin_boundary: bool,
    feature_boundary: bool,
}

fn cmd_remesh(
    input: &PathBuf,
    output: &PathBuf,
    target_length: Option<f64>,
    steps: usize,
    options: RemeshOptions,
    constraints: Constraints,
) -> Result<(), Box<dyn std::error::Error>> {
    let mesh: HalfEdgeMesh = io::load(input)?;
    println!("Loaded: {} vertices, {} faces", mesh.vertex_count(), mesh.face_count());

    let avg_edge = remesh::average_edge_length(&mesh);
    let target = target_length.unwrap_or(avg_edge);
    println!("Current average edge length: {:.6}", avg_edge);
    println!("Target edge length: {:.6}", target);

    let mut fixed = constraints.fixed;
    if constraints.pin_boundary {
        fixed.extend(
            mesh.vertex_ids()
                .filter(|&v| mesh.is_boundary_vertex(v))
                .map(|v| *mesh.position(v)),
        );
    }
    let curves: Vec<Box<dyn FeatureCurve>> = if constraints.feature_boundary {
        Polyline::boundary_loops(&mesh)
            .into_iter()
            .map(|c| Box::new(c) as Box<dyn FeatureCurve>)
            .collect()
    } else {
        Vec::new()
    };

    let surface = TriangleSurface::from_mesh(&mesh);
    let input = RemeshInput::new(mesh, surface, ConstantLength(target))
        .with_fixed_points(fixed)
        .with_curves(curves);
    let mut remesher = Remesher::new(input, options)?;
    info!(
        "{} fixed points, {} feature curves",
        remesher.tracker().num_fixed_points(),
        remesher.tracker().num_curves()
    );

    println!("Running {} remesh steps...", steps);
    let start = Instant::now();
    let mut total = RemeshStats::default();
    for _ in 0..steps {
        total += remesher.step()?;
    }
    let elapsed = start.elapsed();

    let mesh = remesher.into_mesh();
    println!(
        "Edits: {} splits, {} collapses, {} flips",
        total.splits, total.collapses, total.flips
    );
    println!(
        "Result: {} vertices, {} faces (avg edge: {:.6})",
        mesh.vertex_count(),
        mesh.face_count(),
        remesh::average_edge_length(&mesh)
    );
    io::save(&mesh, output)?;
    println!("Saved: {} ({:.2?})", output.display(), elapsed);

    Ok(())
}
