// ============================================================================
// CRATE CONFIGURATION & IMPORTS
// ============================================================================

//! Concentric progress rings rendered on a 2D surface.
//!
//! A [`RingSet`] lays out N concentric rings from one shared configuration,
//! polls each ring's callbacks on a fixed interval, and repaints the whole
//! surface every tick. Rings may carry a text label connected to the arc by
//! a three-point leader line.
//!
//! The drawing surface and the label host are collaborators expressed as
//! traits ([`DrawSurface`], [`LabelHost`]); the crate ships a software
//! rasterizer ([`PixelCanvas`]) implementing both, plus a windowed driver
//! built on `winit`/`pixels`.

// External crate imports
use bon::Builder;
use thiserror::Error;

// Standard library imports
use std::f64::consts::{FRAC_PI_6, FRAC_PI_8, TAU};
use std::time::{Duration, Instant};

pub mod canvas;
pub mod display;

pub use canvas::PixelCanvas;

// ============================================================================
// COLOR CONFIGURATION
// ============================================================================

/// Color of a ring's fill, outline, or label text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Opaque color.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn as_tuple(self) -> (u8, u8, u8, u8) {
        (self.r, self.g, self.b, self.a)
    }
}

/// A point on the drawing surface, in px from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

// ============================================================================
// ERRORS & LISTENER TYPES
// ============================================================================

#[derive(Debug, Error)]
pub enum RingSetError {
    #[error("arc width must be positive, got {0}")]
    ArcWidth(f64),
    #[error("gap width must not be negative, got {0}")]
    GapWidth(f64),
    #[error("surface has zero area ({width}x{height})")]
    EmptySurface { width: u32, height: u32 },
    #[error("font data could not be parsed")]
    InvalidFont,
    #[error(transparent)]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error(transparent)]
    Window(#[from] winit::error::OsError),
    #[error(transparent)]
    Render(#[from] pixels::Error),
}

/// Error type surfaced by progress/info sources.
///
/// A failing source is logged and skipped for the tick; it never stops the
/// other rings from painting.
pub type SourceError = Box<dyn std::error::Error + Send + Sync>;

/// Callback polled every tick for a ring's fractional completion.
///
/// The returned value is expected in `[0, 1]` but is deliberately not
/// clamped: out-of-range values pass straight into the angle formula and
/// produce wrapped or overdrawn arcs.
pub type ProgressSource = Box<dyn FnMut() -> Result<f64, SourceError>>;

/// Callback polled every tick for a ring's label text.
pub type InfoSource = Box<dyn FnMut() -> Result<String, SourceError>>;

// ============================================================================
// COLLABORATOR TRAITS
// ============================================================================

/// 2D drawing contract required by the renderer.
///
/// Angles are radians measured clockwise from 12 o'clock. Coordinates are
/// surface-relative; a host whose surface sits at a screen offset applies
/// that offset itself.
pub trait DrawSurface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Clear the entire surface. Labels owned by the host are unaffected.
    fn clear(&mut self);

    /// Fill and outline a ring segment ("donut slice") swept clockwise from
    /// `start_angle` by `sweep` radians.
    #[allow(clippy::too_many_arguments)]
    fn fill_ring_sector(
        &mut self,
        center: Point,
        inner_radius: f64,
        outer_radius: f64,
        start_angle: f64,
        sweep: f64,
        fill: Color,
        outline: Color,
    );

    /// Stroke an open polyline through `points` in order.
    fn stroke_polyline(&mut self, points: &[Point], color: Color);

    /// Called once at the end of every tick, after all rings have painted.
    fn commit(&mut self) {}
}

/// Handle to a text element created by a [`LabelHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelId(pub usize);

/// Host for absolutely-positioned styled text elements.
///
/// One element is created per labeled ring; its position and color are fixed
/// for its lifetime and only the text content changes afterwards.
pub trait LabelHost {
    fn create_label(&mut self, position: Point, color: Color) -> LabelId;
    fn set_label_text(&mut self, id: LabelId, text: &str);
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Layout configuration shared by every ring in a set. Immutable once the
/// [`RingSet`] is constructed.
#[derive(Debug, Clone, Builder)]
pub struct RingSetConfig {
    /// Inner radius of the innermost ring, in px.
    #[builder(default = 75.0)]
    pub min_radius: f64,
    /// Radial width of each ring, in px.
    #[builder(default = 20.0)]
    pub arc_width: f64,
    /// Distance between adjacent rings, in px.
    #[builder(default = 5.0)]
    pub gap_width: f64,
    /// X coordinate of the shared center; defaults to the surface midpoint.
    pub center_x: Option<f64>,
    /// Y coordinate of the shared center; defaults to the surface midpoint.
    pub center_y: Option<f64>,
    /// Leader-line angle of the first ring, clockwise from 12 o'clock.
    #[builder(default = FRAC_PI_6)]
    pub info_line_base_angle: f64,
    /// Angle between the leader lines of consecutive rings.
    #[builder(default = FRAC_PI_8)]
    pub info_line_angle_interval: f64,
}

impl Default for RingSetConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Parameters for one ring, passed to [`RingSet::add_entry`].
#[derive(Builder)]
pub struct RingSpec {
    /// Fill color of the arc and its label text.
    pub fill: Color,
    /// Outline color of the arc and leader line; defaults to `fill`.
    pub outline: Option<Color>,
    /// Polled every tick for the ring's completion.
    pub progress: ProgressSource,
    /// Polled every tick for the label text. Without it the ring has no
    /// leader line and no label, permanently.
    pub info: Option<InfoSource>,
}

/// Tick interval used by the demo and recommended as a starting point.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(33);

// Leader-line and label geometry, frozen at ring construction.
const MID_LINE_RADIUS: f64 = 250.0;
const END_SEGMENT_LENGTH: f64 = 50.0;
const LABEL_PADDING: f64 = 20.0;
const LABEL_RAISE: f64 = 8.0;

// ============================================================================
// RING SET (LAYOUT + SCHEDULING)
// ============================================================================

#[derive(Debug, Clone, Copy)]
struct Schedule {
    interval: Duration,
    next_due: Instant,
}

/// Owns the surface, the ordered ring list, and the repaint schedule.
///
/// Insertion order is draw order is layout order: the index of a ring
/// determines its radius and leader-line angle, so callers add entries in a
/// stable visual order.
pub struct RingSet<S> {
    surface: S,
    config: RingSetConfig,
    center: Point,
    rings: Vec<Ring>,
    schedule: Option<Schedule>,
}

impl<S: DrawSurface + LabelHost> RingSet<S> {
    /// Validate the configuration, resolve center defaults from the surface
    /// dimensions, and take ownership of the surface.
    pub fn new(surface: S, config: RingSetConfig) -> Result<Self, RingSetError> {
        if config.arc_width <= 0.0 {
            return Err(RingSetError::ArcWidth(config.arc_width));
        }
        if config.gap_width < 0.0 {
            return Err(RingSetError::GapWidth(config.gap_width));
        }
        if surface.width() == 0 || surface.height() == 0 {
            return Err(RingSetError::EmptySurface {
                width: surface.width(),
                height: surface.height(),
            });
        }

        let center = Point::new(
            config.center_x.unwrap_or(surface.width() as f64 / 2.0),
            config.center_y.unwrap_or(surface.height() as f64 / 2.0),
        );

        Ok(Self {
            surface,
            config,
            center,
            rings: Vec::new(),
            schedule: None,
        })
    }

    /// Append a ring. Radius and leader-line angle derive from the current
    /// ring count; returns `&mut Self` so entries chain fluently.
    pub fn add_entry(&mut self, spec: RingSpec) -> &mut Self {
        let index = self.rings.len();
        let (inner_radius, outer_radius) = ring_radii(&self.config, index);
        let angle =
            self.config.info_line_base_angle + index as f64 * self.config.info_line_angle_interval;

        let info = spec.info.map(|source| {
            let leader = leader_points(self.center, angle, inner_radius, outer_radius);
            let end = leader[2];
            let label = self.surface.create_label(
                Point::new(end.x + LABEL_PADDING, end.y - LABEL_RAISE),
                spec.fill,
            );
            InfoChannel {
                source,
                leader,
                label,
            }
        });

        self.rings.push(Ring {
            inner_radius,
            outer_radius,
            fill: spec.fill,
            outline: spec.outline.unwrap_or(spec.fill),
            progress_source: spec.progress,
            info,
            progress: 0.0,
        });

        self
    }

    /// Begin ticking every `interval`. Starting while already running
    /// replaces the previous schedule; there is never more than one.
    pub fn start(&mut self, interval: Duration) -> &mut Self {
        self.schedule = Some(Schedule {
            interval,
            next_due: Instant::now() + interval,
        });
        self
    }

    /// Cancel the schedule. Idempotent; stopping a set that was never
    /// started is a no-op. Rings and their labels stay resident.
    pub fn stop(&mut self) {
        self.schedule = None;
    }

    pub fn is_running(&self) -> bool {
        self.schedule.is_some()
    }

    /// Pump for the host's periodic-timer facility: runs one tick if the
    /// schedule is due at `now` and reschedules the next. The interval is
    /// "at least N ms", not hard real-time.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(schedule) = &mut self.schedule else {
            return false;
        };
        if now < schedule.next_due {
            return false;
        }
        schedule.next_due = now + schedule.interval;
        self.tick();
        true
    }

    /// One synchronous pass: clear the surface, then refresh and repaint
    /// every ring in insertion order. A failing source skips that ring's
    /// remaining work for the tick; the others still paint.
    fn tick(&mut self) {
        self.surface.clear();
        let center = self.center;
        for (index, ring) in self.rings.iter_mut().enumerate() {
            if let Err(err) = ring.refresh() {
                log::warn!("ring {index}: progress source failed: {err}");
                continue;
            }
            ring.paint_arc(&mut self.surface, center);
            if let Err(err) = ring.paint_label(&mut self.surface) {
                log::warn!("ring {index}: info source failed: {err}");
            }
        }
        self.surface.commit();
    }

    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Host-side access to the surface, e.g. to install a font before
    /// starting. The renderer itself only touches the surface inside a tick.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

// ============================================================================
// RING (RENDERING UNIT)
// ============================================================================

/// Label machinery for a ring constructed with an info source. Rings
/// without one never acquire it.
struct InfoChannel {
    source: InfoSource,
    leader: [Point; 3],
    label: LabelId,
}

/// One concentric annular progress indicator.
pub struct Ring {
    inner_radius: f64,
    outer_radius: f64,
    fill: Color,
    outline: Color,
    progress_source: ProgressSource,
    info: Option<InfoChannel>,
    progress: f64,
}

impl Ring {
    /// Poll the progress source and store the result, unclamped.
    fn refresh(&mut self) -> Result<(), SourceError> {
        self.progress = (self.progress_source)()?;
        Ok(())
    }

    /// Draw the filled, outlined ring segment: from 12 o'clock, sweeping
    /// clockwise by `progress * 2π`. Zero progress is a degenerate slice,
    /// full progress a complete annulus.
    fn paint_arc<S: DrawSurface>(&self, surface: &mut S, center: Point) {
        surface.fill_ring_sector(
            center,
            self.inner_radius,
            self.outer_radius,
            0.0,
            sweep_angle(self.progress),
            self.fill,
            self.outline,
        );
    }

    /// Stroke the leader line and update the label text. No-op for rings
    /// without an info source.
    fn paint_label<S: DrawSurface + LabelHost>(
        &mut self,
        surface: &mut S,
    ) -> Result<(), SourceError> {
        let Some(info) = self.info.as_mut() else {
            return Ok(());
        };
        surface.stroke_polyline(&info.leader, self.outline);
        let text = (info.source)()?;
        surface.set_label_text(info.label, &text);
        Ok(())
    }

    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    pub fn outer_radius(&self) -> f64 {
        self.outer_radius
    }

    /// Last value observed from the progress source.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn has_label(&self) -> bool {
        self.info.is_some()
    }

    pub fn fill(&self) -> Color {
        self.fill
    }

    pub fn outline(&self) -> Color {
        self.outline
    }
}

// ============================================================================
// GEOMETRY
// ============================================================================

/// Inner and outer radius of the ring at `index`.
fn ring_radii(config: &RingSetConfig, index: usize) -> (f64, f64) {
    let inner = config.min_radius + index as f64 * (config.gap_width + config.arc_width);
    (inner, inner + config.arc_width)
}

/// Angular extent of the filled arc. Deliberately linear in `progress` with
/// no clamping; callers own the `[0, 1]` contract.
fn sweep_angle(progress: f64) -> f64 {
    progress * TAU
}

/// The three leader-line points: start on the ring's mid-arc radius, mid at
/// a fixed radius, end offset horizontally by the sign of `sin(angle)`.
fn leader_points(center: Point, angle: f64, inner_radius: f64, outer_radius: f64) -> [Point; 3] {
    let arc_distance = (inner_radius + outer_radius) / 2.0;
    let (sin_a, cos_a) = (angle.sin(), angle.cos());

    let start = Point::new(
        center.x + sin_a * arc_distance,
        center.y - cos_a * arc_distance,
    );
    let mid = Point::new(
        center.x + sin_a * MID_LINE_RADIUS,
        center.y - cos_a * MID_LINE_RADIUS,
    );
    let end_offset = if sin_a < 0.0 {
        -END_SEGMENT_LENGTH
    } else {
        END_SEGMENT_LENGTH
    };
    let end = Point::new(mid.x + end_offset, mid.y);

    [start, mid, end]
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Clear,
        Sector {
            inner: f64,
            outer: f64,
            start: f64,
            sweep: f64,
        },
        Polyline(Vec<Point>),
        Commit,
    }

    struct RecordedLabel {
        position: Point,
        color: Color,
        texts: Vec<String>,
    }

    /// Records every draw call instead of rasterizing.
    struct RecordingSurface {
        width: u32,
        height: u32,
        calls: Vec<Call>,
        labels: Vec<RecordedLabel>,
    }

    impl RecordingSurface {
        fn new(width: u32, height: u32) -> Self {
            Self {
                width,
                height,
                calls: Vec::new(),
                labels: Vec::new(),
            }
        }

        fn sectors(&self) -> Vec<(f64, f64, f64)> {
            self.calls
                .iter()
                .filter_map(|call| match call {
                    Call::Sector {
                        inner,
                        outer,
                        sweep,
                        ..
                    } => Some((*inner, *outer, *sweep)),
                    _ => None,
                })
                .collect()
        }

        fn count(&self, wanted: fn(&Call) -> bool) -> usize {
            self.calls.iter().filter(|call| wanted(call)).count()
        }
    }

    impl DrawSurface for RecordingSurface {
        fn width(&self) -> u32 {
            self.width
        }

        fn height(&self) -> u32 {
            self.height
        }

        fn clear(&mut self) {
            self.calls.push(Call::Clear);
        }

        fn fill_ring_sector(
            &mut self,
            _center: Point,
            inner_radius: f64,
            outer_radius: f64,
            start_angle: f64,
            sweep: f64,
            _fill: Color,
            _outline: Color,
        ) {
            self.calls.push(Call::Sector {
                inner: inner_radius,
                outer: outer_radius,
                start: start_angle,
                sweep,
            });
        }

        fn stroke_polyline(&mut self, points: &[Point], _color: Color) {
            self.calls.push(Call::Polyline(points.to_vec()));
        }

        fn commit(&mut self) {
            self.calls.push(Call::Commit);
        }
    }

    impl LabelHost for RecordingSurface {
        fn create_label(&mut self, position: Point, color: Color) -> LabelId {
            self.labels.push(RecordedLabel {
                position,
                color,
                texts: Vec::new(),
            });
            LabelId(self.labels.len() - 1)
        }

        fn set_label_text(&mut self, id: LabelId, text: &str) {
            self.labels[id.0].texts.push(text.to_string());
        }
    }

    fn fixed_progress(value: f64) -> ProgressSource {
        Box::new(move || Ok(value))
    }

    fn ring_set() -> RingSet<RecordingSurface> {
        RingSet::new(RecordingSurface::new(600, 600), RingSetConfig::default()).unwrap()
    }

    fn tick_once(set: &mut RingSet<RecordingSurface>) {
        set.start(Duration::from_millis(1));
        set.poll(Instant::now() + Duration::from_millis(5));
        set.stop();
    }

    #[test]
    fn radii_follow_index_formula_without_overlap() {
        let mut set = ring_set();
        for _ in 0..4 {
            set.add_entry(
                RingSpec::builder()
                    .fill(Color::new(0xff, 0xff, 0xff))
                    .progress(fixed_progress(0.0))
                    .build(),
            );
        }

        for (i, ring) in set.rings().iter().enumerate() {
            let expected_inner = 75.0 + i as f64 * 25.0;
            assert_eq!(ring.inner_radius(), expected_inner);
            assert_eq!(ring.outer_radius(), expected_inner + 20.0);
        }
        for pair in set.rings().windows(2) {
            assert!(pair[0].outer_radius() <= pair[1].inner_radius());
        }
    }

    #[test]
    fn three_ring_scenario_radii_and_sweeps() {
        let mut set = ring_set();
        for value in [0.0, 0.5, 1.0] {
            set.add_entry(
                RingSpec::builder()
                    .fill(Color::new(0x00, 0xff, 0x00))
                    .progress(fixed_progress(value))
                    .build(),
            );
        }
        tick_once(&mut set);

        let sectors = set.surface().sectors();
        assert_eq!(
            sectors,
            vec![
                (75.0, 95.0, 0.0),
                (100.0, 120.0, PI),
                (125.0, 145.0, TAU),
            ]
        );
    }

    #[test]
    fn out_of_range_progress_passes_through_unclamped() {
        let mut set = ring_set();
        set.add_entry(
            RingSpec::builder()
                .fill(Color::new(0xff, 0x00, 0x00))
                .progress(fixed_progress(1.5))
                .build(),
        );
        set.add_entry(
            RingSpec::builder()
                .fill(Color::new(0xff, 0x00, 0x00))
                .progress(fixed_progress(-0.25))
                .build(),
        );
        tick_once(&mut set);

        let sectors = set.surface().sectors();
        assert_eq!(sectors[0].2, 1.5 * TAU);
        assert_eq!(sectors[1].2, -0.25 * TAU);
        assert_eq!(set.rings()[0].progress(), 1.5);
    }

    #[test]
    fn add_entry_chains_on_the_same_manager() {
        let mut set = ring_set();
        set.add_entry(
            RingSpec::builder()
                .fill(Color::new(0x10, 0x20, 0x30))
                .progress(fixed_progress(0.1))
                .build(),
        )
        .add_entry(
            RingSpec::builder()
                .fill(Color::new(0x40, 0x50, 0x60))
                .progress(fixed_progress(0.2))
                .build(),
        );

        assert_eq!(set.rings().len(), 2);
        assert!(set.rings()[0].inner_radius() < set.rings()[1].inner_radius());
    }

    #[test]
    fn leader_end_offset_follows_sign_of_sin() {
        let center = Point::new(300.0, 300.0);

        let right = leader_points(center, FRAC_PI_6, 75.0, 95.0);
        assert_eq!(right[2].x - right[1].x, END_SEGMENT_LENGTH);
        assert_eq!(right[2].y, right[1].y);

        let left = leader_points(center, -FRAC_PI_6, 75.0, 95.0);
        assert_eq!(left[2].x - left[1].x, -END_SEGMENT_LENGTH);

        // start sits on the mid-arc radius, mid on the fixed one
        let arc_distance = (75.0 + 95.0) / 2.0;
        let dx = right[0].x - center.x;
        let dy = right[0].y - center.y;
        assert!((dx.hypot(dy) - arc_distance).abs() < 1e-9);
        let dx = right[1].x - center.x;
        let dy = right[1].y - center.y;
        assert!((dx.hypot(dy) - MID_LINE_RADIUS).abs() < 1e-9);
    }

    #[test]
    fn restart_replaces_the_previous_schedule() {
        let mut set = ring_set();
        set.add_entry(
            RingSpec::builder()
                .fill(Color::new(0xff, 0xff, 0xff))
                .progress(fixed_progress(0.5))
                .build(),
        );

        let t0 = Instant::now();
        set.start(Duration::from_millis(33));
        set.start(Duration::from_millis(10));

        for ms in 0..=100 {
            set.poll(t0 + Duration::from_millis(ms));
        }

        // a surviving 33ms schedule would tick at most 3 times
        let ticks = set.surface().count(|call| matches!(call, Call::Clear));
        assert!(ticks >= 8, "expected ~10 ticks at 10ms, got {ticks}");
    }

    #[test]
    fn stop_halts_all_future_ticks() {
        let mut set = ring_set();
        set.add_entry(
            RingSpec::builder()
                .fill(Color::new(0xff, 0xff, 0xff))
                .progress(fixed_progress(0.5))
                .build(),
        );

        set.start(Duration::from_millis(10));
        assert!(set.is_running());
        set.poll(Instant::now() + Duration::from_millis(20));
        let painted = set.surface().calls.len();
        assert!(painted > 0);

        set.stop();
        assert!(!set.is_running());
        assert!(!set.poll(Instant::now() + Duration::from_secs(3600)));
        assert_eq!(set.surface().calls.len(), painted);

        // repeated stop, and stop before start, are no-ops
        set.stop();
        let mut fresh = ring_set();
        fresh.stop();
    }

    #[test]
    fn poll_does_nothing_before_the_interval_elapses() {
        let mut set = ring_set();
        let t0 = Instant::now();
        set.start(Duration::from_millis(33));
        assert!(!set.poll(t0 + Duration::from_millis(1)));
        assert!(set.poll(t0 + Duration::from_millis(60)));
    }

    #[test]
    fn labelless_ring_never_touches_the_label_host() {
        let mut set = ring_set();
        set.add_entry(
            RingSpec::builder()
                .fill(Color::new(0xff, 0xff, 0xff))
                .progress(fixed_progress(0.5))
                .build(),
        );
        tick_once(&mut set);
        tick_once(&mut set);

        assert!(!set.rings()[0].has_label());
        assert!(set.surface().labels.is_empty());
        assert_eq!(set.surface().count(|c| matches!(c, Call::Polyline(_))), 0);
    }

    #[test]
    fn labeled_ring_creates_one_element_and_updates_it_per_tick() {
        let mut set = ring_set();
        set.add_entry(
            RingSpec::builder()
                .fill(Color::rgba(0x00, 0xff, 0xff, 0x80))
                .progress(fixed_progress(0.5))
                .info(Box::new(|| Ok("42% of 46MB memoria.pdf".to_string())))
                .build(),
        );
        for _ in 0..3 {
            tick_once(&mut set);
        }

        let expected = {
            let leader = leader_points(set.center(), FRAC_PI_6, 75.0, 95.0);
            Point::new(leader[2].x + LABEL_PADDING, leader[2].y - LABEL_RAISE)
        };
        let labels = &set.surface().labels;
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].position, expected);
        assert_eq!(labels[0].color, Color::rgba(0x00, 0xff, 0xff, 0x80));
        assert_eq!(labels[0].texts.len(), 3);
        assert_eq!(labels[0].texts[0], "42% of 46MB memoria.pdf");
        assert_eq!(set.surface().count(|c| matches!(c, Call::Polyline(_))), 3);
    }

    #[test]
    fn failing_source_skips_its_ring_but_not_the_others() {
        let mut set = ring_set();
        set.add_entry(
            RingSpec::builder()
                .fill(Color::new(0xff, 0x00, 0x00))
                .progress(Box::new(|| Err("gauge offline".into())))
                .build(),
        )
        .add_entry(
            RingSpec::builder()
                .fill(Color::new(0x00, 0xff, 0x00))
                .progress(fixed_progress(0.75))
                .build(),
        );
        tick_once(&mut set);

        let sectors = set.surface().sectors();
        assert_eq!(sectors.len(), 1);
        assert_eq!(sectors[0].0, 100.0);
        assert_eq!(set.surface().count(|c| matches!(c, Call::Commit)), 1);
    }

    #[test]
    fn construction_rejects_invalid_config() {
        let bad_arc = RingSetConfig::builder().arc_width(0.0).build();
        assert!(matches!(
            RingSet::new(RecordingSurface::new(600, 600), bad_arc),
            Err(RingSetError::ArcWidth(_))
        ));

        let bad_gap = RingSetConfig::builder().gap_width(-1.0).build();
        assert!(matches!(
            RingSet::new(RecordingSurface::new(600, 600), bad_gap),
            Err(RingSetError::GapWidth(_))
        ));

        assert!(matches!(
            RingSet::new(RecordingSurface::new(0, 600), RingSetConfig::default()),
            Err(RingSetError::EmptySurface { .. })
        ));
    }

    #[test]
    fn center_defaults_to_surface_midpoint() {
        let set = RingSet::new(RecordingSurface::new(200, 100), RingSetConfig::default()).unwrap();
        assert_eq!(set.center(), Point::new(100.0, 50.0));

        let explicit = RingSetConfig::builder()
            .center_x(120.0)
            .center_y(80.0)
            .build();
        let set = RingSet::new(RecordingSurface::new(200, 100), explicit).unwrap();
        assert_eq!(set.center(), Point::new(120.0, 80.0));
    }

    #[test]
    fn outline_defaults_to_fill_color() {
        let mut set = ring_set();
        let fill = Color::rgba(0xff, 0xff, 0x00, 0x80);
        set.add_entry(
            RingSpec::builder()
                .fill(fill)
                .progress(fixed_progress(0.5))
                .build(),
        )
        .add_entry(
            RingSpec::builder()
                .fill(fill)
                .outline(Color::new(0x00, 0x00, 0x00))
                .progress(fixed_progress(0.5))
                .build(),
        );

        assert_eq!(set.rings()[0].outline(), fill);
        assert_eq!(set.rings()[1].outline(), Color::new(0x00, 0x00, 0x00));
    }

    #[test]
    fn sweep_angle_is_linear_in_progress() {
        assert_eq!(sweep_angle(0.0), 0.0);
        assert_eq!(sweep_angle(0.5), PI);
        assert_eq!(sweep_angle(1.0), TAU);
    }
}
