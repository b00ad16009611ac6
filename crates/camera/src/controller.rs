//! The camera controller.
//!
//! A [`Camera`] owns the tracking, zoom and shake state and steps it once
//! per tick. Hosts drive it with strictly alternating update and draw
//! stages:
//!
//! ```text
//! begin_update -> (game logic: notify_target, request_zoom, ...) -> end_update
//! begin_draw   -> (render using the DrawPlan and placements)     -> end_draw
//! ```
//!
//! `end_update` flushes the camera: zoom, then tracking, then shake, then
//! the camera area. Every mutator is rejected while drawing.

use pixcam_common::{
    ensure, AreaF64, EngineConfig, PixcamError, PixcamResult, Point2D, Rect, ScalingFilter,
    StrategyConfig, TickClock, TicksDuration,
};
use pixcam_motion::{
    build_shaker, build_tracker, build_zoomer, BoxedShaker, BoxedTracker, BoxedZoomer,
    Environment,
};

use crate::convert::{self, Margins};
use crate::projection::{self, DrawPlan, Placement, Sprite};
use crate::redraw::RedrawState;
use crate::shake::ShakeEnvelope;

/// Lowest zoom level the camera accepts.
pub const MIN_ZOOM: f64 = 0.005;

/// Highest zoom level the camera accepts.
pub const MAX_ZOOM: f64 = 500.0;

/// Largest absolute world coordinate accepted for targets and positions.
pub const MAX_COORDINATE: f64 = 1.0e9;

/// Stage of the host loop the camera is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Between stages.
    Idle,
    /// Between `begin_update` and `end_update`.
    Updating,
    /// Between `begin_draw` and `end_draw`.
    Drawing,
}

/// Pixel-art camera: tracking, zoom, screen shake and projection.
pub struct Camera {
    phase: Phase,
    clock: TickClock,
    updates_per_second: u32,
    last_flush_tick: Option<u64>,

    logical_width: u32,
    logical_height: u32,
    display_width: u32,
    display_height: u32,
    prev_canvas_width: u32,
    prev_canvas_height: u32,
    filter: ScalingFilter,
    stretching: bool,
    redraw: RedrawState,

    area: Rect,
    area_f64: AreaF64,

    current: Point2D,
    target: Point2D,
    prev_speed: Point2D,

    zoom_current: f64,
    zoom_target: f64,

    shake: ShakeEnvelope,
    shake_offset: Point2D,
    shake_was_active: bool,

    strategies: StrategyConfig,
    tracker: Option<BoxedTracker>,
    zoomer: Option<BoxedZoomer>,
    shaker: Option<BoxedShaker>,
}

impl Camera {
    /// Create a camera at the origin from a validated configuration.
    pub fn new(config: &EngineConfig) -> PixcamResult<Self> {
        config.validate()?;
        validate_zoom(config.initial_zoom)?;

        let mut camera = Self {
            phase: Phase::Idle,
            clock: TickClock::new(config.timing.tick_rate)?,
            updates_per_second: config.timing.updates_per_second,
            last_flush_tick: None,
            logical_width: config.resolution.width,
            logical_height: config.resolution.height,
            display_width: 0,
            display_height: 0,
            prev_canvas_width: 0,
            prev_canvas_height: 0,
            filter: config.presentation.filter,
            stretching: config.presentation.stretching,
            redraw: RedrawState::new(config.presentation.redraw_managed),
            area: Rect::default(),
            area_f64: AreaF64::default(),
            current: Point2D::ZERO,
            target: Point2D::ZERO,
            prev_speed: Point2D::ZERO,
            zoom_current: config.initial_zoom,
            zoom_target: config.initial_zoom,
            shake: ShakeEnvelope::default(),
            shake_offset: Point2D::ZERO,
            shake_was_active: false,
            strategies: config.strategies,
            tracker: None,
            zoomer: None,
            shaker: None,
        };
        camera.update_area()?;

        tracing::debug!(
            width = camera.logical_width,
            height = camera.logical_height,
            zoom = camera.zoom_current,
            tracker = ?camera.strategies.tracker,
            zoomer = ?camera.strategies.zoomer,
            shaker = ?camera.strategies.shaker,
            "Camera created"
        );
        Ok(camera)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Snapshot of the values strategies depend on, at the current zoom.
    pub fn environment(&self) -> Environment {
        Environment::new(self.logical_width, self.logical_height)
            .with_zoom(self.zoom_current)
            .with_updates_per_second(self.updates_per_second)
            .with_ticks_per_update(self.clock.rate())
    }

    // ---- update stage ----

    /// Enter the update stage, advancing the tick clock. Returns the new tick.
    pub fn begin_update(&mut self) -> PixcamResult<u64> {
        match self.phase {
            Phase::Idle => {}
            Phase::Updating => return Err(PixcamError::phase("update already in progress")),
            Phase::Drawing => return Err(PixcamError::phase("can't begin update during draw stage")),
        }
        self.phase = Phase::Updating;
        Ok(self.clock.advance())
    }

    /// Flush the camera and leave the update stage.
    pub fn end_update(&mut self) -> PixcamResult<()> {
        if self.phase != Phase::Updating {
            return Err(PixcamError::phase("end_update called outside update stage"));
        }
        let result = self.flush();
        self.redraw.clear_layout_changed();
        self.phase = Phase::Idle;
        result
    }

    /// Step zoom, tracking and shake, then recompute the camera area.
    /// Only the first call within a tick has any effect.
    pub fn flush(&mut self) -> PixcamResult<()> {
        self.ensure_not_drawing("flush camera coordinates")?;
        let tick = self.clock.now();
        if self.last_flush_tick == Some(tick) {
            return Ok(());
        }
        self.last_flush_tick = Some(tick);

        let zoomed = self.update_zoom();
        self.update_tracking();
        self.update_shake();
        let placed = self.update_area();

        tracing::trace!(
            tick,
            x = self.current.x,
            y = self.current.y,
            zoom = self.zoom_current,
            "Camera flushed"
        );
        zoomed.and(placed)
    }

    /// Step the zoomer. A step that overshoots the band edge while heading
    /// for the target lands on the edge and re-anchors the zoomer there.
    /// Non-finite zooms and steps leaving the band away from the target
    /// leave the zoom unchanged and are reported.
    fn update_zoom(&mut self) -> PixcamResult<()> {
        let env = self.environment();
        let kind = self.strategies.zoomer;
        let zoomer = self.zoomer.get_or_insert_with(|| build_zoomer(kind));
        let change = zoomer.update(&env, self.zoom_current, self.zoom_target);
        let mut zoom = self.zoom_current + change;
        let in_band = (MIN_ZOOM..=MAX_ZOOM).contains(&zoom);
        let towards_target = (self.zoom_target - self.zoom_current) * change >= 0.0;
        if !zoom.is_finite() || !(in_band || towards_target) {
            tracing::warn!(
                current = self.zoom_current,
                target = self.zoom_target,
                change,
                "Zoomer left the valid zoom range"
            );
            return Err(PixcamError::numerical_instability(format!(
                "zoom went from {} to {zoom} (target {}), outside [{MIN_ZOOM}, {MAX_ZOOM}]",
                self.zoom_current, self.zoom_target
            )));
        }
        if !in_band {
            let edge = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
            tracing::debug!(zoom, edge, target = self.zoom_target, "Zoom landed on band edge");
            zoomer.reset(edge);
            zoom = edge;
        }
        self.redraw.note_motion(zoom != self.zoom_current);
        self.zoom_current = zoom;
        Ok(())
    }

    fn update_tracking(&mut self) {
        let env = self.environment();
        let kind = self.strategies.tracker;
        let tracker = self.tracker.get_or_insert_with(|| build_tracker(kind));
        self.prev_speed = tracker.update(&env, self.current, self.target, self.prev_speed);
        self.current += self.prev_speed;
        self.redraw.note_motion(!self.prev_speed.is_zero());
    }

    fn update_shake(&mut self) {
        let env = self.environment();
        let (kind, seed) = (self.strategies.shaker, self.strategies.shaker_seed);
        let shaker = self.shaker.get_or_insert_with(|| build_shaker(kind, seed));

        if !self.shake.is_shaking() {
            if self.shake_was_active {
                shaker.shake_offsets(&env, 0.0);
                self.shake_was_active = false;
                self.redraw.note_motion(!self.shake_offset.is_zero());
                self.shake_offset = Point2D::ZERO;
                tracing::debug!("Shake finished");
            }
            return;
        }

        let offsets = shaker.shake_offsets(&env, self.shake.activity());
        self.shake.advance(self.clock.rate());
        self.redraw.note_motion(offsets != self.shake_offset);
        self.shake_offset = offsets;
        self.shake_was_active = true;
    }

    /// Recompute the camera area. On failure the previous area is kept.
    fn update_area(&mut self) -> PixcamResult<()> {
        let (area, rect) = viewport(self.current + self.shake_offset, self.zoom_current, self.resolution())?;
        self.area_f64 = area;
        self.area = rect;
        Ok(())
    }

    // ---- tracking ----

    /// Set the position the tracker moves the camera towards.
    pub fn notify_target(&mut self, x: f64, y: f64) -> PixcamResult<()> {
        self.ensure_not_drawing("notify tracking coordinates")?;
        validate_coordinates("target", x, y)?;
        self.target = Point2D::new(x, y);
        Ok(())
    }

    /// Move the camera to `(x, y)` instantly.
    pub fn reset_position(&mut self, x: f64, y: f64) -> PixcamResult<()> {
        self.ensure_not_drawing("reset camera coordinates")?;
        validate_coordinates("camera", x, y)?;
        let position = Point2D::new(x, y);
        let (area, rect) = viewport(position + self.shake_offset, self.zoom_current, self.resolution())?;
        self.redraw.note_motion(position != self.current);
        self.target = position;
        self.current = position;
        self.area_f64 = area;
        self.area = rect;
        Ok(())
    }

    /// Current camera center, without shake.
    pub fn position(&self) -> Point2D {
        self.current
    }

    pub fn target(&self) -> Point2D {
        self.target
    }

    /// Replace the tracker. `None` restores the configured default.
    pub fn set_tracker(&mut self, tracker: Option<BoxedTracker>) -> PixcamResult<()> {
        self.ensure_not_drawing("set tracker")?;
        self.tracker = tracker;
        Ok(())
    }

    // ---- zoom ----

    /// Set the zoom level the zoomer moves towards.
    pub fn request_zoom(&mut self, level: f64) -> PixcamResult<()> {
        self.ensure_not_drawing("zoom")?;
        validate_zoom(level)?;
        self.zoom_target = level;
        Ok(())
    }

    /// Jump to a zoom level instantly.
    pub fn reset_zoom(&mut self, level: f64) -> PixcamResult<()> {
        self.ensure_not_drawing("reset zoom")?;
        validate_zoom(level)?;
        let (area, rect) = viewport(self.current + self.shake_offset, level, self.resolution())?;
        self.redraw.note_motion(level != self.zoom_current);
        self.zoom_current = level;
        self.zoom_target = level;
        let kind = self.strategies.zoomer;
        self.zoomer
            .get_or_insert_with(|| build_zoomer(kind))
            .reset(level);
        self.area_f64 = area;
        self.area = rect;
        Ok(())
    }

    /// Current and target zoom levels.
    pub fn zoom(&self) -> (f64, f64) {
        (self.zoom_current, self.zoom_target)
    }

    /// Replace the zoomer. `None` restores the configured default.
    pub fn set_zoomer(&mut self, zoomer: Option<BoxedZoomer>) -> PixcamResult<()> {
        self.ensure_not_drawing("set zoomer")?;
        self.zoomer = zoomer.map(|mut zoomer| {
            zoomer.reset(self.zoom_current);
            zoomer
        });
        Ok(())
    }

    // ---- shake ----

    /// Start a continuous shake that reaches full strength after
    /// `fade_in` ticks and lasts until [`end_shake`](Self::end_shake).
    pub fn start_shake(&mut self, fade_in: TicksDuration) -> PixcamResult<()> {
        self.ensure_not_drawing("start shake")?;
        self.shake.start(fade_in);
        tracing::debug!(fade_in, "Shake started");
        Ok(())
    }

    /// Stop the current shake, fading out over `fade_out` ticks.
    pub fn end_shake(&mut self, fade_out: TicksDuration) -> PixcamResult<()> {
        self.ensure_not_drawing("end shake")?;
        self.shake.end(fade_out);
        tracing::debug!(fade_out, "Shake ending");
        Ok(())
    }

    /// Start a shake with a fixed duration. Replaces any ongoing shake.
    pub fn trigger_shake(
        &mut self,
        fade_in: TicksDuration,
        duration: TicksDuration,
        fade_out: TicksDuration,
    ) -> PixcamResult<()> {
        self.ensure_not_drawing("trigger shake")?;
        self.shake.trigger(fade_in, duration, fade_out);
        tracing::debug!(fade_in, duration, fade_out, "Shake triggered");
        Ok(())
    }

    pub fn is_shaking(&self) -> bool {
        self.shake.is_shaking()
    }

    /// Current shake level in `[0, 1]`.
    pub fn shake_activity(&self) -> f64 {
        self.shake.activity()
    }

    pub fn shake_offset(&self) -> Point2D {
        self.shake_offset
    }

    /// Replace the shaker. `None` restores the configured default.
    pub fn set_shaker(&mut self, shaker: Option<BoxedShaker>) -> PixcamResult<()> {
        self.ensure_not_drawing("set shaker")?;
        self.shaker = shaker;
        Ok(())
    }

    // ---- camera area ----

    /// Logical area visible through the camera, rounded outward.
    pub fn area(&self) -> Rect {
        self.area
    }

    /// Exact logical area visible through the camera.
    pub fn area_f64(&self) -> AreaF64 {
        self.area_f64
    }

    // ---- resolution and timing ----

    pub fn set_resolution(&mut self, width: u32, height: u32) -> PixcamResult<()> {
        self.ensure_not_drawing("change resolution")?;
        ensure(
            width >= 1 && height >= 1,
            format!("game resolution must be at least (1, 1), got ({width}, {height})"),
        )?;
        if (width, height) != (self.logical_width, self.logical_height) {
            let (area, rect) = viewport(self.current + self.shake_offset, self.zoom_current, (width, height))?;
            self.logical_width = width;
            self.logical_height = height;
            self.area_f64 = area;
            self.area = rect;
            self.redraw.request();
            tracing::debug!(width, height, "Resolution changed");
        }
        Ok(())
    }

    pub fn resolution(&self) -> (u32, u32) {
        (self.logical_width, self.logical_height)
    }

    /// Ticks advanced on each update, within `[1, 256]`.
    pub fn set_tick_rate(&mut self, rate: u32) -> PixcamResult<()> {
        self.ensure_not_drawing("change tick rate")?;
        self.clock.set_rate(rate)?;
        tracing::debug!(rate, "Tick rate changed");
        Ok(())
    }

    pub fn tick_rate(&self) -> u32 {
        self.clock.rate()
    }

    pub fn tick_now(&self) -> u64 {
        self.clock.now()
    }

    pub fn set_updates_per_second(&mut self, updates_per_second: u32) -> PixcamResult<()> {
        self.ensure_not_drawing("change updates per second")?;
        ensure(updates_per_second > 0, "updates per second must be > 0")?;
        self.updates_per_second = updates_per_second;
        Ok(())
    }

    pub fn updates_per_second(&self) -> u32 {
        self.updates_per_second
    }

    // ---- presentation ----

    /// Compute the high-resolution display size for a window measured in
    /// device-independent pixels.
    pub fn layout(&mut self, window_width: u32, window_height: u32, device_scale: f64) -> PixcamResult<(u32, u32)> {
        self.ensure_not_drawing("change layout")?;
        ensure(
            device_scale.is_finite() && device_scale > 0.0,
            format!("device scale must be a positive number, got {device_scale}"),
        )?;
        let width = (f64::from(window_width) * device_scale) as u32;
        let height = (f64::from(window_height) * device_scale) as u32;
        if (width, height) != (self.display_width, self.display_height) {
            self.display_width = width;
            self.display_height = height;
            self.redraw.mark_layout_changed();
            tracing::debug!(width, height, "Layout changed");
        }
        Ok((width, height))
    }

    /// True from a layout or canvas size change until the end of the next update.
    pub fn layout_has_changed(&self) -> bool {
        self.redraw.layout_changed()
    }

    pub fn set_scaling_filter(&mut self, filter: ScalingFilter) -> PixcamResult<()> {
        self.ensure_not_drawing("change scaling filter")?;
        if filter != self.filter {
            self.filter = filter;
            self.redraw.request();
            tracing::debug!(%filter, "Scaling filter changed");
        }
        Ok(())
    }

    pub fn scaling_filter(&self) -> ScalingFilter {
        self.filter
    }

    /// Allow the logical canvas to fill the display, ignoring its aspect ratio.
    pub fn set_stretching(&mut self, enabled: bool) -> PixcamResult<()> {
        self.ensure_not_drawing("change stretching mode")?;
        if enabled != self.stretching {
            self.stretching = enabled;
            self.redraw.request();
            if !enabled {
                self.redraw.schedule_clear();
            }
            tracing::debug!(enabled, "Stretching changed");
        }
        Ok(())
    }

    pub fn stretching(&self) -> bool {
        self.stretching
    }

    // ---- redraws ----

    /// With managed redraws, the logical canvas is only projected when
    /// the camera moved or a redraw was requested.
    pub fn set_redraw_managed(&mut self, managed: bool) -> PixcamResult<()> {
        self.ensure_not_drawing("change redraw management")?;
        self.redraw.set_managed(managed);
        Ok(())
    }

    pub fn redraw_managed(&self) -> bool {
        self.redraw.is_managed()
    }

    pub fn request_redraw(&mut self) -> PixcamResult<()> {
        self.ensure_not_drawing("request redraw")?;
        self.redraw.request();
        Ok(())
    }

    pub fn redraw_pending(&self) -> bool {
        self.redraw.pending()
    }

    /// Clear the canvases on the next draw. Allowed at any stage.
    pub fn schedule_clear(&mut self) {
        self.redraw.schedule_clear();
    }

    // ---- coordinate conversion ----

    /// Screen coordinates to `[0, 1]²` within the active display area.
    pub fn to_relative_coords(&self, x: i32, y: i32) -> Point2D {
        let display = self.margin_reference();
        convert::to_relative(x, y, display, self.margins(display))
    }

    /// Screen coordinates to logical world coordinates.
    pub fn to_logical_coords(&self, x: i32, y: i32) -> Point2D {
        convert::to_logical(self.to_relative_coords(x, y), &self.area_f64)
    }

    /// While drawing, margins follow the canvas being drawn to; otherwise
    /// the last layout.
    fn margin_reference(&self) -> (u32, u32) {
        if self.phase == Phase::Drawing {
            (self.prev_canvas_width, self.prev_canvas_height)
        } else {
            (self.display_width, self.display_height)
        }
    }

    fn margins(&self, display: (u32, u32)) -> Margins {
        if self.stretching {
            Margins::NONE
        } else {
            Margins::fit(display, (self.logical_width, self.logical_height))
        }
    }

    // ---- draw stage ----

    /// Enter the draw stage for a display canvas of the given size.
    pub fn begin_draw(&mut self, canvas_width: u32, canvas_height: u32) -> PixcamResult<DrawPlan> {
        match self.phase {
            Phase::Idle => {}
            Phase::Updating => return Err(PixcamError::phase("can't begin draw during update stage")),
            Phase::Drawing => return Err(PixcamError::phase("draw already in progress")),
        }

        if (canvas_width, canvas_height) != (self.prev_canvas_width, self.prev_canvas_height) {
            self.prev_canvas_width = canvas_width;
            self.prev_canvas_height = canvas_height;
            self.redraw.mark_layout_changed();
            tracing::debug!(canvas_width, canvas_height, "Display canvas size changed");
        }
        self.phase = Phase::Drawing;

        let canvas = (canvas_width, canvas_height);
        let active = self.margins(canvas).active_rect(canvas);
        let logical_canvas = (
            u32::try_from(self.area.width()).unwrap_or(0),
            u32::try_from(self.area.height()).unwrap_or(0),
        );
        let source = projection::source_quad(&self.area_f64, logical_canvas);
        let texel_unit = projection::texel_unit(
            (f64::from(logical_canvas.0), f64::from(logical_canvas.1)),
            (f64::from(active.width()), f64::from(active.height())),
        );

        let plan = DrawPlan {
            logical_canvas,
            active,
            source,
            texel_unit,
            filter: self.filter,
            clear: self.redraw.take_clear(),
            project: self.redraw.pending(),
        };
        tracing::trace!(?plan, "Draw planned");
        Ok(plan)
    }

    /// Leave the draw stage, marking the projection up to date.
    pub fn end_draw(&mut self) -> PixcamResult<()> {
        if self.phase != Phase::Drawing {
            return Err(PixcamError::phase("end_draw called outside draw stage"));
        }
        self.redraw.complete();
        self.phase = Phase::Idle;
        Ok(())
    }

    /// Place a `width` x `height` sprite at logical `(x, y)` directly on a
    /// high-resolution `target`. Returns `None` when the sprite is outside
    /// the camera area. Only valid while drawing.
    pub fn hi_res_placement(
        &self,
        target: Rect,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        flip: bool,
    ) -> PixcamResult<Option<Placement>> {
        if self.phase != Phase::Drawing {
            return Err(PixcamError::phase("can't place high resolution draws outside draw stage"));
        }
        let sprite = Sprite {
            x,
            y,
            width,
            height,
            flip,
        };
        Ok(projection::place(
            &self.area_f64,
            self.zoom_current,
            (self.logical_width, self.logical_height),
            target,
            sprite,
        ))
    }

    fn ensure_not_drawing(&self, operation: &'static str) -> PixcamResult<()> {
        if self.phase == Phase::Drawing {
            return Err(PixcamError::draw_stage(operation));
        }
        Ok(())
    }
}

fn validate_coordinates(what: &str, x: f64, y: f64) -> PixcamResult<()> {
    ensure(
        x.abs() <= MAX_COORDINATE && y.abs() <= MAX_COORDINATE,
        format!("{what} coordinates must be within [-{MAX_COORDINATE}, {MAX_COORDINATE}], got ({x}, {y})"),
    )
}

/// Exact and covering areas of a view centered at `center`.
fn viewport(center: Point2D, zoom: f64, (width, height): (u32, u32)) -> PixcamResult<(AreaF64, Rect)> {
    let area = AreaF64::centered(center, f64::from(width) / zoom, f64::from(height) / zoom);
    match area.covering_rect() {
        Some(rect) => Ok((area, rect)),
        None => {
            tracing::warn!(?area, "Camera area left integer coordinates");
            Err(PixcamError::numerical_instability(format!(
                "camera area {area:?} doesn't fit in integer coordinates"
            )))
        }
    }
}

fn validate_zoom(level: f64) -> PixcamResult<()> {
    ensure(
        level.is_finite() && (MIN_ZOOM..=MAX_ZOOM).contains(&level),
        format!("zoom level must be within [{MIN_ZOOM}, {MAX_ZOOM}], got {level}"),
    )
}

impl std::fmt::Debug for Camera {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Camera")
            .field("phase", &self.phase)
            .field("tick", &self.clock.now())
            .field("position", &self.current)
            .field("target", &self.target)
            .field("zoom", &(self.zoom_current, self.zoom_target))
            .field("shake", &self.shake)
            .field("area", &self.area)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixcam_common::logging::init_test_logging;
    use pixcam_common::TrackerKind;
    use pixcam_motion::tracker::Frozen;

    fn camera() -> Camera {
        init_test_logging();
        Camera::new(&EngineConfig::default()).unwrap()
    }

    fn step(camera: &mut Camera) {
        camera.begin_update().unwrap();
        camera.end_update().unwrap();
    }

    #[test]
    fn test_initial_area_is_centered_at_origin() {
        let camera = camera();
        assert_eq!(camera.area(), Rect::new(-160, -90, 160, 90));
        assert_eq!(camera.zoom(), (1.0, 1.0));
        assert_eq!(camera.phase(), Phase::Idle);
    }

    #[test]
    fn test_invalid_initial_zoom() {
        let mut config = EngineConfig::default();
        config.initial_zoom = 1000.0;
        assert!(Camera::new(&config).is_err());
    }

    #[test]
    fn test_flush_is_idempotent_within_tick() {
        let mut camera = camera();
        camera.notify_target(100.0, 0.0).unwrap();
        camera.begin_update().unwrap();
        camera.flush().unwrap();
        let after_first = camera.position();
        camera.flush().unwrap();
        camera.end_update().unwrap();
        assert_eq!(camera.position(), after_first);
        assert!(after_first.x > 0.0);
    }

    #[test]
    fn test_phase_errors() {
        let mut camera = camera();
        assert!(matches!(camera.end_update(), Err(PixcamError::Phase { .. })));
        assert!(matches!(camera.end_draw(), Err(PixcamError::Phase { .. })));
        camera.begin_update().unwrap();
        assert!(matches!(camera.begin_update(), Err(PixcamError::Phase { .. })));
        assert!(matches!(camera.begin_draw(320, 180), Err(PixcamError::Phase { .. })));
        camera.end_update().unwrap();

        let target = Rect::from_size(320, 180);
        assert!(camera.hi_res_placement(target, 0.0, 0.0, 4.0, 4.0, false).is_err());
    }

    #[test]
    fn test_mutators_rejected_while_drawing() {
        let mut camera = camera();
        camera.begin_draw(1280, 720).unwrap();
        assert!(matches!(
            camera.notify_target(1.0, 1.0),
            Err(PixcamError::DrawStage { operation: "notify tracking coordinates" })
        ));
        assert!(camera.request_zoom(2.0).is_err());
        assert!(camera.start_shake(10).is_err());
        assert!(camera.set_resolution(64, 64).is_err());
        assert!(camera.set_tracker(Some(Box::new(Frozen))).is_err());
        assert!(camera.flush().is_err());
        assert!(camera.begin_update().is_err());
        camera.schedule_clear();
        camera.end_draw().unwrap();
        assert!(camera.notify_target(1.0, 1.0).is_ok());
    }

    #[test]
    fn test_zoom_validation() {
        let mut camera = camera();
        assert!(camera.request_zoom(0.0).is_err());
        assert!(camera.request_zoom(-2.0).is_err());
        assert!(camera.request_zoom(f64::NAN).is_err());
        assert!(camera.request_zoom(501.0).is_err());
        assert!(camera.reset_zoom(f64::INFINITY).is_err());
        assert_eq!(camera.zoom(), (1.0, 1.0));

        camera.reset_zoom(2.0).unwrap();
        assert_eq!(camera.zoom(), (2.0, 2.0));
        assert_eq!(camera.area(), Rect::new(-80, -45, 80, 45));
    }

    #[test]
    fn test_reset_position_moves_instantly() {
        let mut camera = camera();
        camera.reset_position(50.5, -10.0).unwrap();
        assert_eq!(camera.position(), Point2D::new(50.5, -10.0));
        assert_eq!(camera.target(), Point2D::new(50.5, -10.0));
        assert_eq!(camera.area(), Rect::new(-110, -100, 211, 80));
        step(&mut camera);
        assert_eq!(camera.position(), Point2D::new(50.5, -10.0));
    }

    #[test]
    fn test_coordinates_outside_integer_range_are_rejected() {
        let mut camera = camera();
        camera.reset_position(10.0, 10.0).unwrap();
        let before = (camera.area(), camera.area_f64());

        for (x, y) in [(3.0e9, -3.0e9), (f64::NAN, 0.0), (0.0, f64::NEG_INFINITY)] {
            assert!(matches!(
                camera.reset_position(x, y),
                Err(PixcamError::InvalidParameter { .. })
            ));
            assert!(camera.notify_target(x, y).is_err());
        }
        assert_eq!(camera.position(), Point2D::new(10.0, 10.0));
        assert_eq!(camera.target(), Point2D::new(10.0, 10.0));
        assert_eq!((camera.area(), camera.area_f64()), before);

        camera.reset_zoom(MIN_ZOOM).unwrap();
        camera.reset_position(MAX_COORDINATE, -MAX_COORDINATE).unwrap();
        let (area, exact) = (camera.area(), camera.area_f64());
        assert!(f64::from(area.min_x) <= exact.min_x && f64::from(area.max_x) >= exact.max_x);
        assert!(f64::from(area.min_y) <= exact.min_y && f64::from(area.max_y) >= exact.max_y);
    }

    #[test]
    fn test_oversized_viewport_keeps_previous_state() {
        let mut camera = camera();
        camera.reset_zoom(MIN_ZOOM).unwrap();
        let before = camera.area();
        assert!(matches!(
            camera.set_resolution(30_000_000, 180),
            Err(PixcamError::NumericalInstability { .. })
        ));
        assert_eq!(camera.resolution(), (320, 180));
        assert_eq!(camera.area(), before);

        camera.set_resolution(12_000_000, 180).unwrap();
        assert!(camera.reset_position(MAX_COORDINATE, 0.0).is_err());
        assert_eq!(camera.position(), Point2D::ZERO);
    }

    #[test]
    fn test_managed_redraws() {
        let mut config = EngineConfig::default();
        config.presentation.redraw_managed = true;
        config.strategies.tracker = TrackerKind::Instant;
        let mut camera = Camera::new(&config).unwrap();

        let plan = camera.begin_draw(1280, 720).unwrap();
        assert!(plan.project);
        camera.end_draw().unwrap();

        step(&mut camera);
        let plan = camera.begin_draw(1280, 720).unwrap();
        assert!(!plan.project);
        camera.end_draw().unwrap();

        camera.notify_target(3.0, 0.0).unwrap();
        step(&mut camera);
        assert!(camera.redraw_pending());
        camera.begin_draw(1280, 720).unwrap();
        camera.end_draw().unwrap();
        assert!(!camera.redraw_pending());

        camera.request_redraw().unwrap();
        assert!(camera.redraw_pending());
    }

    #[test]
    fn test_stretching_schedules_clear() {
        let mut camera = camera();
        camera.set_stretching(true).unwrap();
        let plan = camera.begin_draw(1000, 500).unwrap();
        assert!(!plan.clear);
        assert_eq!(plan.active, Rect::from_size(1000, 500));
        camera.end_draw().unwrap();

        camera.set_stretching(false).unwrap();
        let plan = camera.begin_draw(1000, 500).unwrap();
        assert!(plan.clear);
        assert_eq!(plan.active, Rect::new(55, 0, 945, 500));
        camera.end_draw().unwrap();

        let plan = camera.begin_draw(1000, 500).unwrap();
        assert!(!plan.clear);
        camera.end_draw().unwrap();
    }

    #[test]
    fn test_layout_change_lasts_until_update_end() {
        let mut camera = camera();
        assert_eq!(camera.layout(640, 360, 2.0).unwrap(), (1280, 720));
        assert!(camera.layout_has_changed());
        assert_eq!(camera.layout(640, 360, 2.0).unwrap(), (1280, 720));
        camera.begin_update().unwrap();
        assert!(camera.layout_has_changed());
        camera.end_update().unwrap();
        assert!(!camera.layout_has_changed());
        assert!(camera.layout(640, 360, 0.0).is_err());
    }

    #[test]
    fn test_coordinate_conversion() {
        let mut camera = camera();
        camera.layout(800, 600, 1.0).unwrap();
        assert_eq!(camera.to_relative_coords(400, 300), Point2D::new(0.5, 0.5));
        assert_eq!(camera.to_logical_coords(400, 300), Point2D::ZERO);
        assert_eq!(camera.to_logical_coords(0, 0), Point2D::new(-160.0, -90.0));

        camera.reset_zoom(2.0).unwrap();
        assert_eq!(camera.to_logical_coords(800, 525), Point2D::new(80.0, 45.0));
    }

    #[test]
    fn test_draw_plan() {
        let mut camera = camera();
        camera.set_scaling_filter(ScalingFilter::Nearest).unwrap();
        camera.reset_position(0.25, 0.0).unwrap();
        let plan = camera.begin_draw(1280, 720).unwrap();
        assert_eq!(plan.logical_canvas, (321, 180));
        assert_eq!(plan.active, Rect::from_size(1280, 720));
        assert_eq!(plan.source.left, 0.25);
        assert_eq!(plan.source.width(), 320.0);
        assert_eq!(plan.filter, ScalingFilter::Nearest);
        assert!(camera.layout_has_changed());

        let placement = camera
            .hi_res_placement(plan.active, 0.25, 0.0, 8.0, 8.0, false)
            .unwrap()
            .unwrap();
        assert_eq!(placement.destination.left, 640.0);
        assert_eq!(placement.destination.top, 360.0);
        assert_eq!(placement.destination.width(), 32.0);
        camera.end_draw().unwrap();
    }

    #[test]
    fn test_every_scaling_filter_requests_a_redraw() {
        let mut camera = camera();
        camera.set_redraw_managed(true).unwrap();
        camera.begin_draw(1280, 720).unwrap();
        camera.end_draw().unwrap();

        for filter in ScalingFilter::ALL.into_iter().rev() {
            camera.set_scaling_filter(filter).unwrap();
            assert!(camera.redraw_pending(), "{filter}");
            let plan = camera.begin_draw(1280, 720).unwrap();
            assert_eq!(plan.filter, filter);
            assert!(plan.project);
            camera.end_draw().unwrap();
        }
        camera.set_scaling_filter(ScalingFilter::AaSamplingSoft).unwrap();
        assert!(!camera.redraw_pending());
    }

    #[test]
    fn test_resolution_change_updates_area() {
        let mut camera = camera();
        assert!(camera.set_resolution(0, 10).is_err());
        camera.set_resolution(64, 48).unwrap();
        assert_eq!(camera.resolution(), (64, 48));
        assert_eq!(camera.area(), Rect::new(-32, -24, 32, 24));
    }

    #[test]
    fn test_tick_rate() {
        let mut camera = camera();
        camera.set_tick_rate(4).unwrap();
        assert!(camera.set_tick_rate(0).is_err());
        assert_eq!(camera.begin_update().unwrap(), 4);
        camera.end_update().unwrap();
        assert_eq!(camera.tick_now(), 4);
        assert_eq!(camera.environment().ticks_per_second(), 240.0);
    }
}
