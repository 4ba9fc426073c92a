//! Paper-and-ribbon confetti engine

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::{Pattern, PatternFactory};
use crate::consts::{DEFAULT_PAPER_COUNT, DEFAULT_RIBBON_COUNT, DEFAULT_SPEED};
use crate::palette::{self, ColorPair};
use crate::sim::{ConfettiPaper, ConfettiRibbon, RibbonGeometry};
use crate::surface::SharedSurface;

/// Confetti configuration. Every field has a default matching the shipped
/// look, so hosts usually override one or two and leave the rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfettiOptions {
    /// Frames per virtual second; the fixed timestep is `1 / speed`
    pub speed: f32,
    /// Explicit fixed-timestep override. The simulation always advances by
    /// this constant virtual step per frame, never by wall-clock deltas.
    pub duration: Option<f32>,
    pub paper_count: usize,
    /// Divide `paper_count` by the device pixel ratio, rounded, so dense
    /// displays are not also dense with paper
    pub scale_paper_count_by_pixel_ratio: bool,
    pub ribbon_count: usize,
    /// Front/back pairs the entities draw from
    pub color_palette: Vec<ColorPair>,
    pub ribbon: RibbonGeometry,
    /// Seed for the engine's RNG; equal seeds reproduce identical runs
    pub seed: u64,
}

impl Default for ConfettiOptions {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            duration: None,
            paper_count: DEFAULT_PAPER_COUNT,
            scale_paper_count_by_pixel_ratio: true,
            ribbon_count: DEFAULT_RIBBON_COUNT,
            color_palette: palette::default_palette(),
            ribbon: RibbonGeometry::default(),
            seed: 0,
        }
    }
}

impl ConfettiOptions {
    /// The fixed virtual timestep advanced each frame
    pub fn timestep(&self) -> f32 {
        self.duration.unwrap_or(1.0 / self.speed)
    }
}

/// The confetti pattern: falling rotating papers plus flowing ribbons. Owns
/// its populations, palette, and RNG; captures the surface dimensions at
/// construction (the manager rebuilds the pattern whenever they change).
pub struct Confetti {
    surface: SharedSurface,
    bounds: Vec2,
    timestep: f32,
    papers: Vec<ConfettiPaper>,
    ribbons: Vec<ConfettiRibbon>,
    palette: Vec<ColorPair>,
    rng: Pcg32,
}

impl Confetti {
    pub fn new(surface: SharedSurface, options: &ConfettiOptions) -> Self {
        let (width, height, ratio) = {
            let surface = surface.borrow();
            let (width, height) = surface.backing_size();
            (width, height, surface.pixel_ratio())
        };
        let bounds = Vec2::new(width, height);

        let mut rng = Pcg32::seed_from_u64(options.seed);
        let palette = if options.color_palette.is_empty() {
            palette::default_palette()
        } else {
            options.color_palette.clone()
        };

        let mut paper_count = options.paper_count;
        if options.scale_paper_count_by_pixel_ratio && ratio > 0.0 {
            paper_count = (paper_count as f32 / ratio).round() as usize;
        }

        let papers = (0..paper_count)
            .map(|_| ConfettiPaper::new(&mut rng, bounds, &palette))
            .collect();
        let ribbons = (0..options.ribbon_count)
            .map(|_| ConfettiRibbon::new(&mut rng, bounds, &palette, options.ribbon.clone()))
            .collect::<Vec<_>>();

        log::info!(
            "confetti built: {}x{}, {} papers, {} ribbons",
            width,
            height,
            paper_count,
            ribbons.len()
        );

        Self {
            surface,
            bounds,
            timestep: options.timestep(),
            papers,
            ribbons,
            palette,
            rng,
        }
    }

    /// Factory for `SurfaceManager::set_pattern`
    pub fn factory(options: ConfettiOptions) -> PatternFactory {
        Box::new(move |surface| Box::new(Confetti::new(surface, &options)))
    }

    pub fn paper_count(&self) -> usize {
        self.papers.len()
    }

    pub fn ribbon_count(&self) -> usize {
        self.ribbons.len()
    }
}

impl Pattern for Confetti {
    fn render(&mut self) {
        let mut surface = self.surface.borrow_mut();
        if !surface.is_ready() {
            return;
        }
        surface.clear();

        let dt = self.timestep;
        for paper in &mut self.papers {
            paper.update(dt, &mut self.rng, self.bounds);
            paper.draw(&mut *surface);
        }
        for ribbon in &mut self.ribbons {
            ribbon.update(dt, &mut self.rng, self.bounds, &self.palette);
            ribbon.draw(&mut *surface);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{ManualScheduler, PatternDriver};
    use crate::test_support::RecordingSurface;
    use std::rc::Rc;

    fn options(papers: usize, ribbons: usize) -> ConfettiOptions {
        ConfettiOptions {
            paper_count: papers,
            ribbon_count: ribbons,
            seed: 11,
            ..ConfettiOptions::default()
        }
    }

    #[test]
    fn empty_engine_still_clears_and_reschedules() {
        let recording = RecordingSurface::shared(300, 200);
        let scheduler = Rc::new(ManualScheduler::new());
        let confetti = Confetti::new(recording.clone(), &options(0, 0));

        let driver = PatternDriver::new(Box::new(confetti), scheduler.clone());
        driver.start();
        assert!(scheduler.fire_next());

        assert_eq!(recording.borrow().clears, 1);
        assert!(recording.borrow().polygons.is_empty());
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn render_clears_then_draws_every_entity() {
        let recording = RecordingSurface::shared(300, 200);
        let mut opts = options(3, 2);
        opts.ribbon.particle_count = 4;
        let mut confetti = Confetti::new(recording.clone(), &opts);

        confetti.render();

        // 3 paper quads, then per ribbon: capped first and last segments
        // (2 triangles each), one interior quad
        let surface = recording.borrow();
        assert_eq!(surface.clears, 1);
        assert_eq!(surface.polygons.len(), 3 + 2 * 5);
        assert_eq!(surface.polygons[0].0.len(), 4);
    }

    #[test]
    fn paper_count_scales_down_with_pixel_ratio() {
        let recording = RecordingSurface::shared_with_ratio(300, 200, 2.0);
        let confetti = Confetti::new(recording, &options(50, 0));
        assert_eq!(confetti.paper_count(), 25);
    }

    #[test]
    fn paper_count_scaling_can_be_disabled() {
        let recording = RecordingSurface::shared_with_ratio(300, 200, 2.0);
        let mut opts = options(50, 0);
        opts.scale_paper_count_by_pixel_ratio = false;
        let confetti = Confetti::new(recording, &opts);
        assert_eq!(confetti.paper_count(), 50);
    }

    #[test]
    fn timestep_derives_from_speed_unless_overridden() {
        let opts = ConfettiOptions::default();
        assert!((opts.timestep() - 1.0 / 50.0).abs() < 1e-6);

        let opts = ConfettiOptions {
            duration: Some(0.1),
            ..ConfettiOptions::default()
        };
        assert!((opts.timestep() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn equal_seeds_render_identical_frames() {
        let a = RecordingSurface::shared(300, 200);
        let b = RecordingSurface::shared(300, 200);
        let mut first = Confetti::new(a.clone(), &options(5, 2));
        let mut second = Confetti::new(b.clone(), &options(5, 2));

        for _ in 0..3 {
            first.render();
            second.render();
        }
        assert_eq!(a.borrow().polygons, b.borrow().polygons);
    }

    #[test]
    fn empty_palette_falls_back_to_the_built_in_pairs() {
        let recording = RecordingSurface::shared(300, 200);
        let mut opts = options(1, 0);
        opts.color_palette = Vec::new();
        let mut confetti = Confetti::new(recording.clone(), &opts);
        confetti.render();
        let surface = recording.borrow();
        let drawn = &surface.polygons[0].1;
        let defaults = palette::default_palette();
        assert!(defaults.iter().any(|p| p.front == *drawn || p.back == *drawn));
    }

    #[test]
    fn unready_surface_skips_the_whole_frame() {
        let recording = RecordingSurface::shared(300, 200);
        recording.borrow_mut().ready = false;
        let mut confetti = Confetti::new(recording.clone(), &options(2, 1));

        let paper_position = confetti.papers[0].position;
        confetti.render();

        let surface = recording.borrow();
        assert_eq!(surface.clears, 0);
        assert!(surface.polygons.is_empty());
        // The simulation does not advance either
        assert_eq!(confetti.papers[0].position, paper_position);
    }

    #[test]
    fn options_round_trip_through_json() {
        let opts = ConfettiOptions {
            speed: 60.0,
            paper_count: 12,
            seed: 99,
            ..ConfettiOptions::default()
        };
        let json = serde_json::to_string(&opts).unwrap();
        let back: ConfettiOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back.speed, 60.0);
        assert_eq!(back.paper_count, 12);
        assert_eq!(back.seed, 99);
        assert_eq!(back.ribbon.particle_count, opts.ribbon.particle_count);
    }

    #[test]
    fn partial_json_keeps_defaults_for_missing_fields() {
        let opts: ConfettiOptions = serde_json::from_str(r#"{"paper_count": 7}"#).unwrap();
        assert_eq!(opts.paper_count, 7);
        assert_eq!(opts.ribbon_count, DEFAULT_RIBBON_COUNT);
        assert!((opts.speed - DEFAULT_SPEED).abs() < 1e-6);
    }
}
