use anyhow::{Context, Result};

use geom::{LonLat, Mesh, Projection};

use crate::{RouteLineOptions, RouteResponse};

/// Whatever draws the route line. It displays exactly one mesh at a time, and only borrows it;
/// the pipeline keeps ownership.
pub trait RenderSink {
    /// Starts displaying a freshly built mesh. Any previous mesh was already released.
    fn install(&mut self, mesh: &Mesh, layer: usize);
    /// Stops displaying the current mesh, which is about to be dropped.
    fn release(&mut self);
}

/// Owns the mesh for one route line. Every rebuild replaces the whole mesh; nothing is updated
/// incrementally.
pub struct RoutePipeline<P: Projection, S: RenderSink> {
    projection: P,
    sink: S,
    opts: RouteLineOptions,
    current: Option<Mesh>,
    num_rebuilds: usize,
}

impl<P: Projection, S: RenderSink> RoutePipeline<P, S> {
    pub fn new(projection: P, sink: S, opts: RouteLineOptions) -> Result<Self> {
        opts.validate().context("bad route line options")?;
        Ok(Self {
            projection,
            sink,
            opts,
            current: None,
            num_rebuilds: 0,
        })
    }

    /// Projects the route, builds a new mesh, and swaps it in. The old mesh is released only
    /// after the new one exists, so if anything goes wrong, the old one stays up.
    pub fn rebuild(&mut self, raw: &[LonLat], zoom: f64) -> Result<()> {
        let width = self.opts.width_at_zoom(zoom)?;

        let mut pts = self
            .projection
            .project_all(raw)
            .context("projecting the route")?;
        // Route geometry sometimes repeats a point, which would make an empty segment
        pts.dedup();
        if pts.len() < 2 {
            bail!(
                "Route with {} points only has {} distinct points after projecting",
                raw.len(),
                pts.len()
            );
        }

        let mesh = Mesh::ribbon(&pts, width);
        debug!(
            "Built a route line with {} vertices and {} triangles, half-width {}",
            mesh.vertices().len(),
            mesh.num_triangles(),
            width
        );

        if let Some(old) = self.current.take() {
            self.sink.release();
            drop(old);
        }
        let mesh = self.current.insert(mesh);
        self.sink.install(mesh, self.opts.layer);
        self.num_rebuilds += 1;
        Ok(())
    }

    /// Rebuilds using the first route of a response. A missing response or one without any routes
    /// leaves the current mesh alone. Returns true if the mesh was rebuilt.
    pub fn rebuild_from_response(
        &mut self,
        response: Option<RouteResponse>,
        zoom: f64,
    ) -> Result<bool> {
        let response = match response {
            Some(r) => r,
            None => {
                warn!("No directions response; keeping the current route line");
                return Ok(false);
            }
        };
        let route = match response.first_route() {
            Some(r) => r,
            None => {
                warn!(
                    "Directions response ({}) has no routes; keeping the current route line",
                    response.code.as_deref().unwrap_or("no code")
                );
                return Ok(false);
            }
        };
        info!(
            "Got a route of {} taking {}",
            route.distance(),
            route.duration()
        );
        let pts = route.points()?;
        self.rebuild(&pts, zoom)?;
        Ok(true)
    }

    /// Releases the current mesh, if there is one.
    pub fn clear(&mut self) {
        if self.current.take().is_some() {
            self.sink.release();
        }
    }

    pub fn mesh(&self) -> Option<&Mesh> {
        self.current.as_ref()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn options(&self) -> &RouteLineOptions {
        &self.opts
    }

    pub fn num_rebuilds(&self) -> usize {
        self.num_rebuilds
    }
}
