use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use physutil::api::{
    convex_hull, point_cloud, polygon_area, star_polygon, triangulate, with_hole, CloudCfg,
    CloudShape, Polynomial, ReplayToken, StarCfg, TriCfg, MAX_DEGREE,
};
use serde::Serialize;
use tracing_subscriber::fmt::SubscriberBuilder;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Run the physutil kernels on generated inputs")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Clone, Copy, ValueEnum)]
enum Shape {
    Cube,
    Ball,
    Sphere,
}

impl From<Shape> for CloudShape {
    fn from(s: Shape) -> Self {
        match s {
            Shape::Cube => CloudShape::Cube,
            Shape::Ball => CloudShape::Ball,
            Shape::Sphere => CloudShape::Sphere,
        }
    }
}

#[derive(Subcommand)]
enum Action {
    /// Convex hull of a random point cloud
    Hull {
        #[arg(long, default_value_t = 256)]
        count: usize,
        #[arg(long, value_enum, default_value_t = Shape::Ball)]
        shape: Shape,
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
    /// Triangulate a random star polygon, optionally with a scaled hole
    Triangulate {
        #[arg(long, default_value_t = 24)]
        vertices: usize,
        #[arg(long)]
        hole: bool,
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
    /// Real roots of a polynomial on [start, end]
    Roots {
        /// Coefficients, highest degree first
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        coeffs: Vec<f64>,
        #[arg(long, allow_hyphen_values = true)]
        start: f64,
        #[arg(long, allow_hyphen_values = true)]
        end: f64,
        /// Bisection halvings for degree five and up
        #[arg(long)]
        iters: Option<usize>,
    },
    /// Print a small version JSON block
    Report,
}

#[derive(Serialize)]
struct HullSummary {
    points: usize,
    triangles: usize,
    vertices: usize,
    closed: bool,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Hull { count, shape, seed } => hull(count, shape, seed),
        Action::Triangulate {
            vertices,
            hole,
            seed,
        } => tri(vertices, hole, seed),
        Action::Roots {
            coeffs,
            start,
            end,
            iters,
        } => roots(&coeffs, start, end, iters),
        Action::Report => report(),
    }
}

fn hull(count: usize, shape: Shape, seed: u64) -> Result<()> {
    tracing::info!(count, seed, "hull");
    let cfg = CloudCfg {
        count,
        shape: shape.into(),
        radius: 1.0,
    };
    let pts = point_cloud(cfg, ReplayToken::new(seed, 0));
    let h = convex_hull(pts.as_slice()).context("convex hull failed")?;
    let summary = HullSummary {
        points: count,
        triangles: h.len(),
        vertices: h.vertex_indices().len(),
        closed: h.is_closed(),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn tri(vertices: usize, hole: bool, seed: u64) -> Result<()> {
    tracing::info!(vertices, hole, seed, "triangulate");
    let cfg = StarCfg {
        vertex_count: vertices,
        ..StarCfg::default()
    };
    let outer = star_polygon(cfg, ReplayToken::new(seed, 0));
    let v = if hole {
        with_hole(&outer, 0.3)
    } else {
        outer.into_iter().map(Some).collect()
    };
    let t = triangulate(&v, TriCfg::default()).context("triangulation failed")?;
    let obj = serde_json::json!({
        "vertices": v.iter().flatten().count(),
        "method": format!("{:?}", t.method),
        "triangles": t.len(),
        "input_area": polygon_area(&v),
        "output_area": t.area(&v),
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

fn roots(coeffs: &[f64], start: f64, end: f64, iters: Option<usize>) -> Result<()> {
    tracing::info!(degree = coeffs.len().saturating_sub(1), start, end, "roots");
    if coeffs.is_empty() || coeffs.len() > MAX_DEGREE + 1 {
        bail!(
            "expected 1..={} coefficients, got {}",
            MAX_DEGREE + 1,
            coeffs.len()
        );
    }
    let Some(p) = Polynomial::from_highest_first(coeffs) else {
        bail!("invalid coefficient list");
    };
    let found = match iters {
        Some(k) => p.find_roots_iters(start, end, k),
        None => p.find_roots(start, end),
    };
    let obj = serde_json::json!({
        "coeffs": coeffs,
        "interval": [start, end],
        "roots": &found[..],
        "sturm_count": p.num_roots(start, end),
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

fn report() -> Result<()> {
    let rev = option_env!("GIT_COMMIT").unwrap_or("unknown");
    let obj = serde_json::json!({
        "code_rev": rev,
        "version": physutil::VERSION,
        "max_degree": MAX_DEGREE,
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
