use std::cell::RefCell;
use std::rc::Rc;

use traffic_canvas::{
    graphics::{Canvas, RecordingCanvas},
    Animation, DriverState, FrameDriver, FrameHandle, FrameInfo, FrameScheduler, ManualScheduler,
    ParticleScene, SceneConfig, Stage, SurfaceError, SurfaceSize, TrafficScene,
};

/// Scheduler that stays observable after the stage owning it is dropped.
#[derive(Clone, Default)]
struct SharedScheduler(Rc<RefCell<ManualScheduler>>);

impl FrameScheduler for SharedScheduler {
    type Handle = FrameHandle;

    fn request_frame(&mut self) -> FrameHandle {
        self.0.borrow_mut().request_frame()
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.0.borrow_mut().cancel_frame(handle)
    }
}

/// Records the order of calls it receives.
#[derive(Default)]
struct Probe {
    events: Rc<RefCell<Vec<String>>>,
}

impl Animation for Probe {
    fn update(&mut self) {
        self.events.borrow_mut().push("update".to_string());
    }

    fn render(&self, _canvas: &mut dyn Canvas, _frame: &FrameInfo) {
        self.events.borrow_mut().push("render".to_string());
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.events.borrow_mut().push(format!("resize {}x{}", size.width, size.height));
    }

    fn scroll(&mut self, scroll_y: f32) {
        self.events.borrow_mut().push(format!("scroll {}", scroll_y));
    }
}

fn canvas(width: u32, height: u32) -> Result<RecordingCanvas, SurfaceError> {
    Ok(RecordingCanvas::new(SurfaceSize::new(width, height)))
}

fn run_due<A: Animation>(stage: &mut Stage<A, RecordingCanvas, ManualScheduler>) -> usize {
    let due = stage.scheduler_mut().take_due();
    due.into_iter().filter(|handle| stage.on_frame(*handle)).count()
}

#[test]
fn test_driver_start_schedules_once() {
    let mut driver = FrameDriver::new(ManualScheduler::new());
    assert_eq!(driver.state(), DriverState::Stopped);

    driver.start();
    driver.start();

    assert_eq!(driver.state(), DriverState::Running);
    assert_eq!(driver.scheduler().queued().len(), 1);
    assert_eq!(driver.scheduler().requested_count(), 1);
}

#[test]
fn test_driver_ignores_unknown_and_stale_handles() {
    let mut driver = FrameDriver::new(ManualScheduler::new());
    driver.start();
    let handle = driver.scheduler_mut().take_due()[0];

    assert!(!driver.begin_frame(FrameHandle(999)));
    assert!(driver.begin_frame(handle));
    // Already consumed.
    assert!(!driver.begin_frame(handle));

    driver.end_frame();
    let next = driver.pending().unwrap();
    driver.stop();

    assert_eq!(driver.state(), DriverState::Stopped);
    assert!(!driver.begin_frame(next));
    assert_eq!(driver.scheduler().cancelled(), &[next]);
    assert!(driver.scheduler().queued().is_empty());
}

#[test]
fn test_end_frame_after_stop_does_not_reschedule() {
    let mut driver = FrameDriver::new(ManualScheduler::new());
    driver.start();
    let handle = driver.scheduler_mut().take_due()[0];
    assert!(driver.begin_frame(handle));

    driver.stop();
    driver.end_frame();

    assert_eq!(driver.pending(), None);
    assert_eq!(driver.scheduler().requested_count(), 1);
}

#[test]
fn test_mount_without_surface_is_a_no_op() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let probe = Probe { events: events.clone() };
    let scheduler = SharedScheduler::default();

    let stage = Stage::mount(
        probe,
        Err::<RecordingCanvas, _>(SurfaceError::ContextUnavailable("no 2d context".to_string())),
        scheduler.clone(),
    );

    assert!(stage.is_none());
    assert!(events.borrow().is_empty());
    assert_eq!(scheduler.0.borrow().requested_count(), 0);
}

#[test]
fn test_mount_rejects_zero_sized_surface() {
    let scene = TrafficScene::new(&SceneConfig::default(), SurfaceSize::new(0, 0));
    let stage = Stage::mount(scene, canvas(0, 600), ManualScheduler::new());
    assert!(stage.is_none());
}

#[test]
fn test_each_frame_updates_then_renders() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let probe = Probe { events: events.clone() };
    let mut stage = Stage::mount(probe, canvas(800, 600), ManualScheduler::new()).unwrap();

    assert!(stage.is_running());
    for _ in 0..3 {
        assert_eq!(run_due(&mut stage), 1);
    }

    assert_eq!(stage.frames_drawn(), 3);
    assert_eq!(
        *events.borrow(),
        vec!["resize 800x600", "update", "render", "update", "render", "update", "render"]
    );
    // One pending callback for the next frame.
    assert_eq!(stage.scheduler().queued().len(), 1);
}

#[test]
fn test_unmount_cancels_pending_frame() {
    let mut stage = Stage::mount(Probe::default(), canvas(800, 600), ManualScheduler::new()).unwrap();
    run_due(&mut stage);
    let pending = stage.scheduler().queued().to_vec();

    stage.unmount();

    assert!(!stage.is_running());
    assert_eq!(stage.scheduler().cancelled(), pending.as_slice());
    assert!(stage.scheduler().queued().is_empty());
    assert_eq!(run_due(&mut stage), 0);
}

#[test]
fn test_stale_callback_after_unmount_draws_nothing() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let probe = Probe { events: events.clone() };
    let mut stage = Stage::mount(probe, canvas(800, 600), ManualScheduler::new()).unwrap();
    let handle = stage.scheduler().queued()[0];

    stage.unmount();
    // The host delivered the callback anyway.
    assert!(!stage.on_frame(handle));

    assert_eq!(stage.frames_drawn(), 0);
    assert_eq!(*events.borrow(), vec!["resize 800x600"]);
}

#[test]
fn test_drop_stops_the_loop() {
    let scheduler = SharedScheduler::default();
    {
        let stage = Stage::mount(Probe::default(), canvas(800, 600), scheduler.clone()).unwrap();
        assert!(stage.is_running());
    }

    let inner = scheduler.0.borrow();
    assert_eq!(inner.requested_count(), 1);
    assert_eq!(inner.cancelled().len(), 1);
    assert!(inner.queued().is_empty());
}

#[test]
fn test_resize_reaches_canvas_and_animation() {
    let config = SceneConfig::default();
    let scene = TrafficScene::new(&config, SurfaceSize::new(800, 600));
    let mut stage = Stage::mount(scene, canvas(800, 600), ManualScheduler::new()).unwrap();

    stage.on_resize(SurfaceSize::new(1024, 768));

    assert_eq!(stage.canvas().size(), SurfaceSize::new(1024, 768));
    assert_eq!(stage.animation().state().surface, SurfaceSize::new(1024, 768));
    // The loop keeps going at the new size.
    assert_eq!(run_due(&mut stage), 1);
}

#[test]
fn test_scroll_drives_particle_parallax() {
    let config = SceneConfig::default();
    let scene = ParticleScene::new(&config, SurfaceSize::new(800, 600));
    let mut stage = Stage::mount(scene, canvas(800, 600), ManualScheduler::new()).unwrap();

    stage.on_scroll(400.0);
    run_due(&mut stage);

    let field = stage.animation().field();
    assert!((field.offset_y - 400.0 * config.particles.parallax).abs() < 1e-4);
    assert!((field.rotation_x - config.particles.spin_x).abs() < 1e-7);
    assert!((field.rotation_y - config.particles.spin_y).abs() < 1e-7);
}

#[test]
fn test_traffic_stage_advances_simulation() {
    let mut config = SceneConfig::default();
    config.random.seed = Some(21);
    let scene = TrafficScene::new(&config, SurfaceSize::new(1200, 600));
    let mut stage = Stage::mount(scene, canvas(1200, 600), ManualScheduler::new()).unwrap();

    for _ in 0..10 {
        run_due(&mut stage);
    }

    assert_eq!(stage.animation().state().frame, 10);
    assert_eq!(stage.animation().state().len(), 8);
}
