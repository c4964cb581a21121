//! Frame driving: the two-state loop that keeps an animation redrawing once
//! per host frame, and the [`Stage`] that owns one mount of an animation.

use std::fmt::Debug;

use log::{debug, info, trace};

use crate::graphics::Canvas;
use crate::simulation::{PerformanceTracker, SurfaceSize};

/// Host display loop: hands out one-shot frame callbacks.
pub trait FrameScheduler {
    type Handle: Copy + Eq + Debug;

    /// Requests a single callback on the next display frame.
    fn request_frame(&mut self) -> Self::Handle;

    fn cancel_frame(&mut self, handle: Self::Handle);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Scheduler whose callbacks are delivered explicitly by the caller, for
/// headless runs and tests.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    queued: Vec<FrameHandle>,
    cancelled: Vec<FrameHandle>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns every callback that is due.
    pub fn take_due(&mut self) -> Vec<FrameHandle> {
        std::mem::take(&mut self.queued)
    }

    pub fn queued(&self) -> &[FrameHandle] {
        &self.queued
    }

    pub fn cancelled(&self) -> &[FrameHandle] {
        &self.cancelled
    }

    pub fn requested_count(&self) -> u64 {
        self.next_id
    }
}

impl FrameScheduler for ManualScheduler {
    type Handle = FrameHandle;

    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_id);
        self.next_id += 1;
        self.queued.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.queued.retain(|queued| *queued != handle);
        self.cancelled.push(handle);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Running,
    Stopped,
}

pub struct FrameDriver<S: FrameScheduler> {
    scheduler: S,
    state: DriverState,
    pending: Option<S::Handle>,
}

impl<S: FrameScheduler> FrameDriver<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            state: DriverState::Stopped,
            pending: None,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn pending(&self) -> Option<S::Handle> {
        self.pending
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Enters `Running` and schedules the first frame.
    pub fn start(&mut self) {
        if self.state == DriverState::Running {
            return;
        }

        self.state = DriverState::Running;
        self.pending = Some(self.scheduler.request_frame());
    }

    /// Accepts a callback from the host. Returns whether the frame should be
    /// drawn: callbacks after `stop`, or for a handle other than the pending
    /// one, are ignored.
    pub fn begin_frame(&mut self, handle: S::Handle) -> bool {
        if self.state == DriverState::Stopped {
            trace!("ignoring frame callback {:?} after stop", handle);
            return false;
        }

        match self.pending {
            Some(pending) if pending == handle => {
                self.pending = None;
                true
            }
            _ => {
                trace!("ignoring unexpected frame callback {:?}", handle);
                false
            }
        }
    }

    /// Re-schedules after a drawn frame if still running.
    pub fn end_frame(&mut self) {
        if self.state == DriverState::Running && self.pending.is_none() {
            self.pending = Some(self.scheduler.request_frame());
        }
    }

    /// Enters `Stopped` and cancels the pending callback.
    pub fn stop(&mut self) {
        if self.state == DriverState::Stopped {
            return;
        }

        self.state = DriverState::Stopped;
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
    }
}

/// Values measured by the stage and handed to the animation each frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInfo {
    pub fps: f32,
}

/// Something that can be advanced and redrawn once per frame.
pub trait Animation {
    fn update(&mut self);

    fn render(&self, canvas: &mut dyn Canvas, frame: &FrameInfo);

    fn resize(&mut self, _size: SurfaceSize) {}

    fn scroll(&mut self, _scroll_y: f32) {}
}

impl<A: Animation + ?Sized> Animation for Box<A> {
    fn update(&mut self) {
        (**self).update();
    }

    fn render(&self, canvas: &mut dyn Canvas, frame: &FrameInfo) {
        (**self).render(canvas, frame);
    }

    fn resize(&mut self, size: SurfaceSize) {
        (**self).resize(size);
    }

    fn scroll(&mut self, scroll_y: f32) {
        (**self).scroll(scroll_y);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    #[error("drawing context unavailable: {0}")]
    ContextUnavailable(String),
    #[error("drawing surface has zero area ({width}x{height})")]
    ZeroSize { width: u32, height: u32 },
}

/// One mount of an animation component onto a drawing surface.
pub struct Stage<A: Animation, C: Canvas, S: FrameScheduler> {
    animation: A,
    canvas: C,
    driver: FrameDriver<S>,
    tracker: PerformanceTracker,
    frames_drawn: u64,
}

impl<A: Animation, C: Canvas, S: FrameScheduler> Stage<A, C, S> {
    /// Attaches the animation and starts the frame loop. If the drawing
    /// surface could not be acquired nothing starts and `None` is returned.
    pub fn mount(mut animation: A, canvas: Result<C, SurfaceError>, scheduler: S) -> Option<Self> {
        let canvas = canvas.and_then(|canvas| {
            let size = canvas.size();
            if size.width == 0 || size.height == 0 {
                Err(SurfaceError::ZeroSize {
                    width: size.width,
                    height: size.height,
                })
            } else {
                Ok(canvas)
            }
        });
        let canvas = match canvas {
            Ok(canvas) => canvas,
            Err(e) => {
                debug!("not starting animation: {}", e);
                return None;
            }
        };

        let size = canvas.size();
        animation.resize(size);

        let mut driver = FrameDriver::new(scheduler);
        driver.start();
        info!("animation mounted on a {}x{} surface", size.width, size.height);

        Some(Self {
            animation,
            canvas,
            driver,
            tracker: PerformanceTracker::new(60),
            frames_drawn: 0,
        })
    }

    /// Host frame callback: update then render, then re-schedule. Returns
    /// whether a frame was drawn.
    pub fn on_frame(&mut self, handle: S::Handle) -> bool {
        if !self.driver.begin_frame(handle) {
            return false;
        }

        self.tracker.tick();
        self.animation.update();
        let frame = FrameInfo {
            fps: self.tracker.fps(),
        };
        self.animation.render(&mut self.canvas, &frame);
        self.frames_drawn += 1;

        self.driver.end_frame();
        true
    }

    /// Viewport size change: match the canvas to it. Not debounced.
    pub fn on_resize(&mut self, size: SurfaceSize) {
        debug!("resizing surface to {}x{}", size.width, size.height);
        self.canvas.resize(size);
        self.animation.resize(size);
    }

    pub fn on_scroll(&mut self, scroll_y: f32) {
        self.animation.scroll(scroll_y);
    }

    pub fn unmount(&mut self) {
        if self.driver.state() == DriverState::Running {
            info!("animation unmounted after {} frames", self.frames_drawn);
        }
        self.driver.stop();
    }

    pub fn is_running(&self) -> bool {
        self.driver.state() == DriverState::Running
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    pub fn fps(&self) -> f32 {
        self.tracker.fps()
    }

    pub fn animation(&self) -> &A {
        &self.animation
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    pub fn driver(&self) -> &FrameDriver<S> {
        &self.driver
    }

    pub fn scheduler(&self) -> &S {
        self.driver.scheduler()
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        self.driver.scheduler_mut()
    }
}

impl<A: Animation, C: Canvas, S: FrameScheduler> Drop for Stage<A, C, S> {
    fn drop(&mut self) {
        self.unmount();
    }
}
