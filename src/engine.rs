//! The canvas engine context.
//!
//! `CanvasEngine` owns the page buffer, the edit history and the tool, page
//! and gesture state. Every method takes `&self`, so one engine can be shared
//! between the input thread and the display thread behind an `Arc`.
//!
//! # Locking
//!
//! Locks are always taken in the order `input -> history -> buffer`. The
//! buffer lock covers exactly one snapshot/paint/snapshot span or one
//! snapshot restore. Listeners run after every lock is released.
//!
//! # Example
//!
//! ```rust,no_run
//! use inkpage::{CanvasEngine, EngineConfig, TouchPoint, ToolKind};
//!
//! let engine = CanvasEngine::new(EngineConfig::default())?;
//! engine.initialize(1404, 1872, None)?;
//!
//! let points = [TouchPoint::new(10.0, 10.0), TouchPoint::new(12.0, 11.0)];
//! engine.apply_stroke(&points, ToolKind::Pen)?;
//! engine.undo()?;
//! # Ok::<(), inkpage::CanvasError>(())
//! ```
use std::sync::{Arc, OnceLock};

use image::RgbaImage;
use log::{debug, info, warn};
use parking_lot::Mutex;

use crate::command::{CommandKind, EditHistory, EditRecord, SequenceGuard};
use crate::config::EngineConfig;
use crate::error::{CanvasError, CanvasResult};
use crate::event::{CanvasEvent, CanvasListener, EventBus};
use crate::geometry::{Region, TouchPoint};
use crate::input::EraseBatcher;
use crate::raster::{self, PixelBuffer, SharedBuffer};
use crate::renderer;
use crate::state::{GestureState, PageState};
use crate::stroke::StrokePath;
use crate::tools::{ToolKind, ToolState};
use crate::util::time::{Clock, SystemClock};

#[derive(Debug)]
struct InputState {
    gesture: GestureState,
    eraser: EraseBatcher,
}

pub struct CanvasEngine {
    config: EngineConfig,
    background: Option<Arc<RgbaImage>>,
    clock: Arc<dyn Clock>,
    buffer: OnceLock<SharedBuffer>,
    history: Mutex<EditHistory>,
    tools: Mutex<ToolState>,
    page: Mutex<PageState>,
    input: Mutex<InputState>,
    sequence: Mutex<SequenceGuard>,
    events: EventBus,
}

impl std::fmt::Debug for CanvasEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasEngine")
            .field("config", &self.config)
            .field("initialized", &self.is_initialized())
            .field("has_background", &self.background.is_some())
            .field("tool", &self.tools.lock().current())
            .field("page", &self.page.lock().index())
            .field("gesture", &self.input.lock().gesture)
            .field("events", &self.events)
            .finish()
    }
}

impl CanvasEngine {
    /// Creates an engine without a buffer; call [`CanvasEngine::initialize`]
    /// before drawing.
    pub fn new(config: EngineConfig) -> CanvasResult<Self> {
        config.validate()?;

        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let eraser = EraseBatcher::new(
            config.erase_flush_points,
            config.erase_flush_interval(),
            clock.now(),
        );

        Ok(Self {
            background: None,
            buffer: OnceLock::new(),
            history: Mutex::new(EditHistory::with_limit(config.max_history)),
            tools: Mutex::new(ToolState::new(&config)),
            page: Mutex::new(PageState::default()),
            input: Mutex::new(InputState {
                gesture: GestureState::Idle,
                eraser,
            }),
            sequence: Mutex::new(SequenceGuard::new()),
            events: EventBus::new(),
            clock,
            config,
        })
    }

    /// Reference image shown beneath the page when compositing
    pub fn with_background(mut self, background: RgbaImage) -> Self {
        self.background = Some(Arc::new(background));
        self
    }

    /// Replace the time source used for erase batching
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.input.get_mut().eraser.reset(clock.now());
        self.clock = clock;
        self
    }

    /// Page index the engine starts on
    pub fn with_page_index(mut self, index: usize) -> Self {
        *self.page.get_mut() = PageState::new(index);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn subscribe(&self, listener: impl CanvasListener + 'static) {
        self.events.subscribe(Box::new(listener));
    }

    /// Allocate the white page buffer and draw `initial_page` into it.
    ///
    /// Must be called exactly once, with the surface's pixel size.
    pub fn initialize(&self, width: u32, height: u32, initial_page: Option<&RgbaImage>) -> CanvasResult<()> {
        if self.is_initialized() {
            return Err(CanvasError::AlreadyInitialized);
        }

        let mut pixels = PixelBuffer::new(width, height)?;
        if let Some(page) = initial_page {
            pixels.draw_page(page);
        }
        self.buffer
            .set(pixels.into_shared())
            .map_err(|_| CanvasError::AlreadyInitialized)?;

        info!("Initialized {}x{} canvas", width, height);
        self.events.emit(CanvasEvent::BufferChanged { region: None });
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.buffer.get().is_some()
    }

    /// Handle to the live buffer for display consumers
    pub fn shared_buffer(&self) -> Option<SharedBuffer> {
        self.buffer.get().cloned()
    }

    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.buffer.get().map(|buffer| {
            let pixels = buffer.lock();
            (pixels.width(), pixels.height())
        })
    }

    fn buffer(&self) -> CanvasResult<&SharedBuffer> {
        self.buffer.get().ok_or(CanvasError::Uninitialized)
    }

    /// Copy of the current page pixels
    pub fn page_image(&self) -> CanvasResult<RgbaImage> {
        Ok(self.buffer()?.lock().image().clone())
    }

    /// Page pixels multiplied over the background, ready for display
    pub fn composite(&self) -> CanvasResult<RgbaImage> {
        let page = self.page_image()?;
        Ok(renderer::composite(&page, self.background.as_deref()))
    }

    /// Paint one batch of samples with `tool` and record it for undo.
    ///
    /// Returns the region that changed, or `None` when the batch was empty or
    /// fell entirely outside the page.
    pub fn apply_stroke(&self, points: &[TouchPoint], tool: ToolKind) -> CanvasResult<Option<Region>> {
        let buffer = self.buffer()?;
        let Some(path) = StrokePath::build(points, self.config.jump_threshold) else {
            debug!("Ignoring empty {} stroke", tool.name());
            return Ok(None);
        };
        let paint = *self.tools.lock().paint_for(tool);

        let region = {
            let mut history = self.history.lock();
            let (region, record) = {
                let mut pixels = buffer.lock();
                let Some(region) = path.region(
                    paint.width,
                    self.config.region_margin,
                    pixels.width(),
                    pixels.height(),
                ) else {
                    warn!("Ignoring {} stroke outside the page: {:?}", tool.name(), path.bounds());
                    return Ok(None);
                };

                let before = pixels.snapshot(&region);
                raster::stroke_path(&mut pixels, &path, &paint, &region, self.config.curve_tolerance);
                let after = pixels.snapshot(&region);
                (region, EditRecord::new(region, before, after))
            };
            history.push(record);
            region
        };

        debug!("{} stroke of {} points in {:?}", tool.name(), points.len(), region);
        self.events.emit(CanvasEvent::BufferChanged { region: Some(region) });
        self.notify_undo_state();
        Ok(Some(region))
    }

    /// Revert the most recent edit. Returns false when there was nothing to undo.
    pub fn undo(&self) -> CanvasResult<bool> {
        let buffer = self.buffer()?;
        let region = {
            let mut history = self.history.lock();
            let mut pixels = buffer.lock();
            history.undo(&mut pixels)
        };
        self.after_restore("undo", region);
        Ok(region.is_some())
    }

    /// Re-apply the most recently undone edit. Returns false when there was
    /// nothing to redo.
    pub fn redo(&self) -> CanvasResult<bool> {
        let buffer = self.buffer()?;
        let region = {
            let mut history = self.history.lock();
            let mut pixels = buffer.lock();
            history.redo(&mut pixels)
        };
        self.after_restore("redo", region);
        Ok(region.is_some())
    }

    fn after_restore(&self, action: &str, region: Option<Region>) {
        match region {
            Some(region) => {
                debug!("{} restored {:?}", action, region);
                self.events.emit(CanvasEvent::BufferChanged { region: Some(region) });
                self.notify_undo_state();
                self.events.emit(CanvasEvent::RefreshRequested);
            }
            None => debug!("Nothing to {}", action),
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.lock().can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.lock().can_redo()
    }

    /// Ask the display layer to repaint the whole page
    pub fn refresh(&self) -> CanvasResult<()> {
        self.buffer()?;
        self.events.emit(CanvasEvent::BufferChanged { region: None });
        self.events.emit(CanvasEvent::RefreshRequested);
        Ok(())
    }

    /// [`CanvasEngine::undo`] that runs at most once per `token`
    pub fn undo_seq(&self, token: u64) -> CanvasResult<bool> {
        if !self.accept(CommandKind::Undo, token) {
            return Ok(false);
        }
        self.undo()
    }

    /// [`CanvasEngine::redo`] that runs at most once per `token`
    pub fn redo_seq(&self, token: u64) -> CanvasResult<bool> {
        if !self.accept(CommandKind::Redo, token) {
            return Ok(false);
        }
        self.redo()
    }

    /// [`CanvasEngine::refresh`] that runs at most once per `token`
    pub fn refresh_seq(&self, token: u64) -> CanvasResult<bool> {
        if !self.accept(CommandKind::Refresh, token) {
            return Ok(false);
        }
        self.refresh()?;
        Ok(true)
    }

    fn accept(&self, kind: CommandKind, token: u64) -> bool {
        let accepted = self.sequence.lock().accept(kind, token);
        if !accepted {
            debug!("Ignoring stale {:?} command #{}", kind, token);
        }
        accepted
    }

    pub fn current_tool(&self) -> ToolKind {
        self.tools.lock().current()
    }

    /// Switch between pen and eraser. Returns false when `tool` is already
    /// current.
    pub fn set_tool(&self, tool: ToolKind) -> bool {
        if !self.tools.lock().set_tool(tool) {
            return false;
        }
        info!("Switched to {}", tool.name());
        self.events.emit(CanvasEvent::ToolChanged { tool });
        self.events.emit(CanvasEvent::RefreshRequested);
        true
    }

    pub fn page_index(&self) -> usize {
        self.page.lock().index()
    }

    /// Switch to page `index`, replacing the buffer with the image `loader`
    /// returns for it (blank when it returns `None`) and discarding history.
    ///
    /// Returns false when `index` is already current. The loader runs
    /// without any engine lock held.
    pub fn set_page<F>(&self, index: usize, loader: F) -> CanvasResult<bool>
    where
        F: FnOnce(usize) -> Option<RgbaImage>,
    {
        let buffer = self.buffer()?;
        if !self.page.lock().set(index) {
            return Ok(false);
        }

        let page = loader(index);
        {
            let mut input = self.input.lock();
            let dropped = input.eraser.len();
            input.eraser.reset(self.clock.now());
            if dropped > 0 {
                debug!("Dropped {} pending erase points on page change", dropped);
            }
        }
        {
            let mut history = self.history.lock();
            let mut pixels = buffer.lock();
            pixels.clear();
            if let Some(page) = &page {
                pixels.draw_page(page);
            }
            history.clear();
        }

        info!("Switched to page {} ({})", index, if page.is_some() { "loaded" } else { "blank" });
        self.events.emit(CanvasEvent::PageChanged { index });
        self.events.emit(CanvasEvent::BufferChanged { region: None });
        self.notify_undo_state();
        self.events.emit(CanvasEvent::RefreshRequested);
        Ok(true)
    }

    fn notify_undo_state(&self) {
        let (can_undo, can_redo) = {
            let history = self.history.lock();
            (history.can_undo(), history.can_redo())
        };
        self.events.emit(CanvasEvent::UndoStateChanged { can_undo, can_redo });
    }

    pub fn gesture_state(&self) -> GestureState {
        self.input.lock().gesture
    }

    /// Move the gesture machine to `next`, ending an active gesture first.
    /// Returns erase samples still pending from the gesture that ended.
    fn transition(&self, next: GestureState) -> Vec<TouchPoint> {
        let mut input = self.input.lock();
        let now = self.clock.now();

        let mut pending = Vec::new();
        if !input.gesture.can_transition_to(next) {
            debug!("Ending {} gesture before {}", input.gesture.name(), next.name());
        }
        if input.gesture.is_erasing() {
            pending = input.eraser.take(now);
        }
        if next.is_erasing() {
            input.eraser.reset(now);
        }
        input.gesture = next;
        pending
    }

    fn flush_erase(&self, points: Vec<TouchPoint>) -> CanvasResult<Option<Region>> {
        if points.is_empty() {
            return Ok(None);
        }
        self.apply_stroke(&points, ToolKind::Eraser)
    }

    /// Pen touched down
    pub fn begin_draw(&self) -> CanvasResult<()> {
        self.buffer()?;
        let pending = self.transition(GestureState::Drawing);
        self.flush_erase(pending)?;
        Ok(())
    }

    /// A batch of pen samples, painted with the current tool.
    ///
    /// Batches may arrive after the pen lifted; they are ignored only while
    /// an erase gesture is active.
    pub fn draw_batch(&self, points: &[TouchPoint]) -> CanvasResult<Option<Region>> {
        if self.gesture_state().is_erasing() {
            debug!("Ignoring draw batch during erase gesture");
            return Ok(None);
        }

        let tool = self.current_tool();
        let region = self.apply_stroke(points, tool)?;
        // E-ink panels tend to drop eraser updates; force a repaint.
        if tool == ToolKind::Eraser {
            self.events.emit(CanvasEvent::RefreshRequested);
        }
        Ok(region)
    }

    /// Pen lifted
    pub fn end_draw(&self) {
        let mut input = self.input.lock();
        if input.gesture.is_drawing() {
            input.gesture = GestureState::Idle;
        } else {
            debug!("Ignoring end_draw in {} state", input.gesture.name());
        }
    }

    /// Eraser touched down at `point`
    pub fn begin_erase(&self, point: TouchPoint) -> CanvasResult<()> {
        self.buffer()?;
        let pending = self.transition(GestureState::Erasing);
        self.flush_erase(pending)?;

        self.input.lock().eraser.push(point);
        self.events.emit(CanvasEvent::BufferChanged { region: None });
        Ok(())
    }

    /// One eraser sample. Pending samples are painted once the batch is full
    /// or the last flush is older than the flush interval.
    pub fn erase_move(&self, point: TouchPoint) -> CanvasResult<Option<Region>> {
        let batch = {
            let mut input = self.input.lock();
            if !input.gesture.is_erasing() {
                debug!("Ignoring erase sample in {} state", input.gesture.name());
                return Ok(None);
            }
            input.eraser.push(point);
            let now = self.clock.now();
            if input.eraser.needs_flush(now) {
                input.eraser.take(now)
            } else {
                Vec::new()
            }
        };
        self.flush_erase(batch)
    }

    /// Complete eraser sample list from the device.
    ///
    /// The list repeats samples already delivered through
    /// [`CanvasEngine::erase_move`], so only the pending samples are painted.
    /// Ignored outside an erase gesture.
    pub fn erase_batch(&self, points: &[TouchPoint]) -> CanvasResult<Option<Region>> {
        let batch = {
            let mut input = self.input.lock();
            if !input.gesture.is_erasing() {
                debug!(
                    "Ignoring erase list of {} points in {} state",
                    points.len(),
                    input.gesture.name()
                );
                return Ok(None);
            }
            input.eraser.take(self.clock.now())
        };
        debug!("Erase list of {} points, flushing {} pending", points.len(), batch.len());
        self.flush_erase(batch)
    }

    /// Eraser lifted; paints whatever is still pending
    pub fn end_erase(&self) -> CanvasResult<Option<Region>> {
        if !self.gesture_state().is_erasing() {
            debug!("Ignoring end_erase outside an erase gesture");
            return Ok(None);
        }
        let pending = self.transition(GestureState::Idle);
        self.flush_erase(pending)
    }
}
