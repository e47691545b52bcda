//! Recursive Whitted-style tracer.
//!
//! Each pixel casts one primary ray through its center. The nearest hit is
//! shaded with ambient light plus the Phong contribution of every light that
//! a shadow ray can reach, then mirror and refracted rays are traced
//! recursively until the depth budget runs out. Pixels whose primary ray
//! hits nothing keep the buffer's initial transparent black.

use std::sync::atomic::{AtomicU64, Ordering};

use image::{Rgba, RgbaImage};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use rayon::prelude::*;

use crate::config::TracerConfig;
use crate::hittable::{HitRecord, HittableList, ObjectTransform};
use crate::light::Light;
use crate::material::{reflect, refract, Color};
use crate::ray::Ray;
use crate::scene::Scene;
use crate::shading::{self, SurfacePoint};
use crate::texture::NO_TEXTURE;

/// Distance secondary ray origins are pushed off the surface.
pub const SURFACE_OFFSET: f32 = 0.001;

/// Read-only state shared by every ray of one render.
#[derive(Debug)]
pub struct TraceContext<'a> {
    scene: &'a Scene,
    transforms: Vec<ObjectTransform>,
}

impl<'a> TraceContext<'a> {
    /// Precompute the per-primitive transform table of `scene`.
    pub fn new(scene: &'a Scene) -> Self {
        Self {
            scene,
            transforms: ObjectTransform::table(scene.primitives()),
        }
    }

    /// Scene being traced.
    pub fn scene(&self) -> &'a Scene {
        self.scene
    }

    fn world(&self) -> HittableList<'_> {
        HittableList::new(self.scene.primitives(), &self.transforms)
    }
}

/// Ray counts gathered during the most recent render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraceCounts {
    /// Camera rays cast.
    pub primary_rays: u64,
    /// Camera rays that hit a primitive.
    pub primary_hits: u64,
    /// Shadow rays cast toward lights.
    pub shadow_rays: u64,
    /// Shadow rays that found an occluder.
    pub occluded_shadow_rays: u64,
    /// Reflected and refracted rays cast.
    pub secondary_rays: u64,
}

#[derive(Debug, Default)]
struct TraceStats {
    primary_rays: AtomicU64,
    primary_hits: AtomicU64,
    shadow_rays: AtomicU64,
    occluded_shadow_rays: AtomicU64,
    secondary_rays: AtomicU64,
}

impl TraceStats {
    fn counters(&self) -> [&AtomicU64; 5] {
        [
            &self.primary_rays,
            &self.primary_hits,
            &self.shadow_rays,
            &self.occluded_shadow_rays,
            &self.secondary_rays,
        ]
    }

    fn reset(&self) {
        for counter in self.counters() {
            counter.store(0, Ordering::Relaxed);
        }
    }

    fn snapshot(&self) -> TraceCounts {
        TraceCounts {
            primary_rays: self.primary_rays.load(Ordering::Relaxed),
            primary_hits: self.primary_hits.load(Ordering::Relaxed),
            shadow_rays: self.shadow_rays.load(Ordering::Relaxed),
            occluded_shadow_rays: self.occluded_shadow_rays.load(Ordering::Relaxed),
            secondary_rays: self.secondary_rays.load(Ordering::Relaxed),
        }
    }
}

fn bump(counter: &AtomicU64) {
    counter.fetch_add(1, Ordering::Relaxed);
}

/// Whitted ray tracer.
#[derive(Debug, Default)]
pub struct RayTracer {
    config: TracerConfig,
    stats: TraceStats,
}

impl RayTracer {
    /// Create a tracer with the given settings.
    pub fn new(config: TracerConfig) -> Self {
        Self {
            config,
            stats: TraceStats::default(),
        }
    }

    /// Active settings.
    pub fn config(&self) -> &TracerConfig {
        &self.config
    }

    /// Ray counts of the most recent render (or traces since then).
    pub fn stats(&self) -> TraceCounts {
        self.stats.snapshot()
    }

    /// Render the scene into a row-major RGBA buffer of `width x height` pixels.
    ///
    /// The result is identical whether rows are rendered sequentially or on
    /// the rayon pool: rows are independent and the scene is read-only.
    pub fn render(&self, scene: &Scene) -> RgbaImage {
        self.stats.reset();
        let context = TraceContext::new(scene);
        let (width, height) = (scene.width(), scene.height());
        let mut image = RgbaImage::new(width, height);

        info!(
            "Rendering {}x{} ({} primitives, {} lights, depth budget {}, {})",
            width,
            height,
            scene.primitives().len(),
            scene.lights().len(),
            self.config.max_depth,
            if self.config.parallel {
                format!("{} threads", rayon::current_num_threads())
            } else {
                "single thread".to_string()
            }
        );
        let generation_start = std::time::Instant::now();
        let pb = self.progress_bar(height);

        let render_row = |(j, row): (usize, &mut [u8])| {
            for i in 0..width {
                if let Some(color) = self.trace_primary(&context, i, j as u32) {
                    let offset = i as usize * 4;
                    row[offset..offset + 4].copy_from_slice(&to_rgba(color).0);
                }
            }
            pb.inc(1);
        };

        let row_bytes = width as usize * 4;
        if self.config.parallel {
            image.par_chunks_mut(row_bytes).enumerate().for_each(render_row);
        } else {
            image.chunks_mut(row_bytes).enumerate().for_each(render_row);
        }

        pb.finish();
        info!("Image rendered in {:.2?}", generation_start.elapsed());
        let counts = self.stats();
        debug!(
            "Rays: {} primary ({} hits), {} shadow ({} occluded), {} secondary",
            counts.primary_rays,
            counts.primary_hits,
            counts.shadow_rays,
            counts.occluded_shadow_rays,
            counts.secondary_rays
        );

        image
    }

    /// Color of the primary ray through pixel `(i, j)`, or `None` on a miss.
    pub fn trace_primary(&self, context: &TraceContext, i: u32, j: u32) -> Option<Color> {
        let ray = context.scene().camera().get_ray(i, j);
        bump(&self.stats.primary_rays);
        let hit = context.world().hit(&ray)?;
        bump(&self.stats.primary_hits);
        Some(self.shade_hit(context, &ray, &hit, self.config.max_depth))
    }

    /// Color carried back along a secondary ray with `depth` bounces left.
    ///
    /// A depth of zero contributes nothing and casts no ray.
    pub fn trace_ray(&self, context: &TraceContext, ray: &Ray, depth: u32) -> Color {
        if depth == 0 {
            return Color::ZERO;
        }
        bump(&self.stats.secondary_rays);
        match context.world().hit(ray) {
            Some(hit) => self.shade_hit(context, ray, &hit, depth - 1),
            None => Color::ZERO,
        }
    }

    /// Local illumination at a hit plus the recursive terms.
    fn shade_hit(&self, context: &TraceContext, ray: &Ray, hit: &HitRecord, depth: u32) -> Color {
        let scene = context.scene();
        let globals = scene.globals();
        let primitive = context.world().primitive(hit.index);
        let material = primitive.material();

        let surface = SurfacePoint {
            position: hit.point,
            normal: hit.normal,
            to_camera: (-ray.direction).normalize(),
        };
        let texture_color = if self.config.enable_texture_map {
            primitive
                .texture_color(hit.object_point)
                .unwrap_or(NO_TEXTURE)
        } else {
            NO_TEXTURE
        };

        let mut illumination = shading::ambient(material, globals);
        for light in scene.lights() {
            if self.config.enable_shadows && self.in_shadow(context, light, hit) {
                continue;
            }
            illumination += shading::shade(&surface, material, light, globals, texture_color);
        }

        if self.config.enable_reflection && material.is_reflective() {
            let reflected = Ray::new(
                hit.point + SURFACE_OFFSET * hit.normal,
                reflect(ray.direction, hit.normal),
            );
            illumination +=
                material.reflective * globals.ks * self.trace_ray(context, &reflected, depth);
        }

        if self.config.enable_refraction && material.is_transparent() {
            let direction =
                refract(ray.direction.normalize(), hit.normal, 1.0 / material.ior).normalize();
            let refracted = Ray::new(hit.point + SURFACE_OFFSET * direction, direction);
            illumination +=
                material.transparent * globals.ks * self.trace_ray(context, &refracted, depth);
        }

        illumination
    }

    /// Whether anything blocks the path from the hit toward `light`.
    fn in_shadow(&self, context: &TraceContext, light: &Light, hit: &HitRecord) -> bool {
        let direction = light.direction_to_light(hit.point);
        let shadow_ray = Ray::new(hit.point + SURFACE_OFFSET * direction, direction);
        bump(&self.stats.shadow_rays);
        let occluded = context.world().occluded(&shadow_ray);
        if occluded {
            bump(&self.stats.occluded_shadow_rays);
        }
        occluded
    }

    fn progress_bar(&self, rows: u32) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(rows as u64);
        if let Ok(style) = ProgressStyle::default_bar().template("{bar:40} {pos}/{len} rows ETA: {eta}") {
            pb.set_style(style);
        }
        pb
    }
}

/// Clamp to `[0, 1]` and quantize to 8 bits, always fully opaque.
pub fn to_rgba(color: Color) -> Rgba<u8> {
    let quantize = |c: f32| (255.0 * c.clamp(0.0, 1.0)) as u8;
    Rgba([quantize(color.x), quantize(color.y), quantize(color.z), 255])
}
