//! Print a few samples from each kernel for quick sanity on counts.
//!
//! Usage:
//!   cargo run -p physutil --example kernels_tour -- hull
//!   cargo run -p physutil --example kernels_tour -- tri
//!   cargo run -p physutil --example kernels_tour -- roots
//!
//! - hull: triangle and vertex counts for growing ball clouds.
//! - tri: method and area error for star polygons with and without a hole.
//! - roots: roots of a few products of linear factors.

use physutil::api::{
    convex_hull, point_cloud, polygon_area, star_polygon, triangulate, with_hole, CloudCfg,
    Polynomial, ReplayToken, StarCfg, TriCfg,
};

fn main() {
    let mode = std::env::args().nth(1).unwrap_or_else(|| "hull".to_string());
    match mode.as_str() {
        "hull" => show_hull(),
        "tri" => show_tri(),
        "roots" => show_roots(),
        _ => {
            eprintln!("usage: kernels_tour [hull|tri|roots]");
        }
    }
}

fn show_hull() {
    for count in [16, 64, 256, 1024] {
        let cfg = CloudCfg {
            count,
            ..CloudCfg::default()
        };
        let pts = point_cloud(cfg, ReplayToken::new(2025, 0));
        match convex_hull(pts.as_slice()) {
            Ok(h) => println!(
                "n={count:5} triangles={:5} vertices={:5}",
                h.len(),
                h.vertex_indices().len()
            ),
            Err(e) => println!("n={count:5} error: {e}"),
        }
    }
}

fn show_tri() {
    for index in 0..5 {
        let outer = star_polygon(StarCfg::default(), ReplayToken::new(2025, index));
        let plain: Vec<_> = outer.iter().copied().map(Some).collect();
        for (label, v) in [("plain", plain), ("hole", with_hole(&outer, 0.3))] {
            let want = polygon_area(&v);
            match triangulate(&v, TriCfg::default()) {
                Ok(t) => println!(
                    "#{index} {label:5} {:?} triangles={} rel_area_err={:.2e}",
                    t.method,
                    t.len(),
                    (t.area(&v) - want).abs() / want
                ),
                Err(e) => println!("#{index} {label:5} error: {e}"),
            }
        }
    }
}

fn show_roots() {
    let samples: [&[f64]; 3] = [&[1.0, 2.0], &[-1.0, 0.5, 3.0], &[-2.0, -1.0, 1.0, 2.5, 4.0]];
    for rs in samples {
        let p = rs
            .iter()
            .fold(Polynomial::new([1.0]), |p, &r| p * Polynomial::new([-r, 1.0]));
        let roots = p.find_roots(-10.0, 10.0);
        println!("want {rs:?} got {:?} (sturm {})", &roots[..], p.num_roots(-10.0, 10.0));
    }
}
