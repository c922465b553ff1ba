//! Command-line tools for building route line meshes outside of a renderer: convert directions
//! responses or raw points into mesh JSON, and replay moving waypoints through the updater.

#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod simulate;

use std::str::FromStr;

use anyhow::Result;
use instant::Instant;
use structopt::StructOpt;

use abstutil::{elapsed_seconds, prettyprint_time, prettyprint_usize};
use geom::{Distance, GPSBounds, LonLat, Mesh, Projection, Pt2D, WebMercator};
use route_line::{RenderSink, RouteLineOptions, RoutePipeline, RouteResponse};

#[derive(StructOpt)]
#[structopt(name = "route_line", about = "Builds ribbon meshes for route lines")]
enum Command {
    /// Builds the route line for a directions response. The response should look like the Mapbox
    /// Directions API's, with `geometries=geojson`.
    BuildMesh {
        /// The path to a JSON directions response
        #[structopt(long)]
        input: String,
        /// The path to JSON route line options. Defaults are used if this is missing.
        #[structopt(long)]
        options: Option<String>,
        /// The map zoom level, which scales the line's width
        #[structopt(long, default_value = "16")]
        zoom: f64,
        /// How to flatten coordinates: "mercator" (centered on the route) or "bounds"
        #[structopt(long, default_value = "mercator")]
        projection: ProjectionKind,
        /// Write the mesh as JSON here
        #[structopt(long)]
        output: Option<String>,
    },
    /// Builds a ribbon directly from planar points.
    Ribbon {
        /// The path to a JSON list of points, like `[[0, 0], [10, 0], [10, 10]]`
        #[structopt(long)]
        points: String,
        /// Half of the ribbon's width
        #[structopt(long)]
        width: f64,
        /// Write the mesh as JSON here
        #[structopt(long)]
        output: Option<String>,
    },
    /// Moves waypoints around on a fixed schedule and reports how often the route line is
    /// rebuilt. Waypoints are connected with straight lines.
    Simulate {
        /// The path to a JSON list of `[longitude, latitude]` waypoints
        #[structopt(long)]
        waypoints: String,
        /// The path to JSON route line options
        #[structopt(long)]
        options: Option<String>,
        /// How many update intervals to simulate
        #[structopt(long, default_value = "10")]
        ticks: usize,
        /// Nudge every waypoint once every this many ticks
        #[structopt(long, default_value = "3")]
        move_every: usize,
    },
}

#[derive(Clone, Copy)]
enum ProjectionKind {
    Mercator,
    Bounds,
}

impl FromStr for ProjectionKind {
    type Err = anyhow::Error;

    fn from_str(x: &str) -> Result<Self> {
        match x {
            "mercator" => Ok(ProjectionKind::Mercator),
            "bounds" => Ok(ProjectionKind::Bounds),
            _ => bail!("Unknown projection {}; use mercator or bounds", x),
        }
    }
}

fn main() -> Result<()> {
    abstutil::logger::setup();

    match Command::from_args() {
        Command::BuildMesh {
            input,
            options,
            zoom,
            projection,
            output,
        } => build_mesh(input, load_options(options)?, zoom, projection, output),
        Command::Ribbon {
            points,
            width,
            output,
        } => ribbon(points, width, output),
        Command::Simulate {
            waypoints,
            options,
            ticks,
            move_every,
        } => simulate::run(waypoints, load_options(options)?, ticks, move_every),
    }
}

fn load_options(path: Option<String>) -> Result<RouteLineOptions> {
    let opts = match path {
        Some(path) => abstutil::read_json(&path)?,
        None => RouteLineOptions::default(),
    };
    opts.validate()?;
    Ok(opts)
}

/// Stands in for a renderer, just counting what it's asked to do.
#[derive(Default)]
struct LoggingSink {
    installs: usize,
    releases: usize,
}

impl RenderSink for LoggingSink {
    fn install(&mut self, mesh: &Mesh, layer: usize) {
        self.installs += 1;
        debug!(
            "Installing mesh #{} with {} vertices on layer {}",
            self.installs,
            mesh.vertices().len(),
            layer
        );
    }

    fn release(&mut self) {
        self.releases += 1;
    }
}

fn build_mesh(
    input: String,
    opts: RouteLineOptions,
    zoom: f64,
    projection: ProjectionKind,
    output: Option<String>,
) -> Result<()> {
    let response = RouteResponse::parse(&fs_err::read_to_string(&input)?)?;
    let pts = match response.first_route() {
        Some(route) => route.points()?,
        None => bail!("{} doesn't have any routes", input),
    };
    if pts.is_empty() {
        bail!("The first route in {} is empty", input);
    }

    match projection {
        ProjectionKind::Mercator => build_with(
            WebMercator::new(LonLat::center(&pts), 1.0),
            response,
            opts,
            zoom,
            output,
        ),
        ProjectionKind::Bounds => {
            build_with(GPSBounds::from(&pts), response, opts, zoom, output)
        }
    }
}

fn build_with<P: Projection>(
    projection: P,
    response: RouteResponse,
    opts: RouteLineOptions,
    zoom: f64,
    output: Option<String>,
) -> Result<()> {
    let start = Instant::now();
    let mut pipeline = RoutePipeline::new(projection, LoggingSink::default(), opts)?;
    if !pipeline.rebuild_from_response(Some(response), zoom)? {
        bail!("Nothing to build");
    }
    match pipeline.mesh() {
        Some(mesh) => finish(mesh, start, output),
        None => bail!("The pipeline didn't keep a mesh"),
    }
}

fn ribbon(points: String, width: f64, output: Option<String>) -> Result<()> {
    let raw: Vec<[f64; 2]> = abstutil::read_json(&points)?;
    if raw.iter().flatten().any(|x| !x.is_finite()) {
        bail!("{} has a coordinate that isn't a finite number", points);
    }
    let pts: Vec<Pt2D> = raw.into_iter().map(Pt2D::from).collect();
    if pts.len() < 2 {
        bail!("{} only has {} points; need at least 2", points, pts.len());
    }
    if let Some(idx) = pts.windows(2).position(|pair| pair[0] == pair[1]) {
        bail!("Points {} and {} in {} are the same", idx, idx + 1, points);
    }
    if width <= 0.0 || !width.is_finite() {
        bail!("--width must be positive, not {}", width);
    }

    let start = Instant::now();
    let mesh = Mesh::ribbon(&pts, Distance::meters(width));
    finish(&mesh, start, output)
}

fn finish(mesh: &Mesh, start: Instant, output: Option<String>) -> Result<()> {
    let bounds = mesh.get_bounds();
    info!(
        "Built {} vertices ({} for corners) and {} triangles in {}",
        prettyprint_usize(mesh.vertices().len()),
        prettyprint_usize(mesh.corner_vertices().len()),
        prettyprint_usize(mesh.num_triangles()),
        prettyprint_time(elapsed_seconds(start))
    );
    info!(
        "Footprint is {:.1} x {:.1} around {}",
        bounds.width(),
        bounds.height(),
        bounds.center()
    );
    if let Some(path) = output {
        abstutil::write_json(&path, mesh)?;
        info!("Wrote {}", path);
    }
    Ok(())
}
