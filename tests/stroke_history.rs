use std::sync::Arc;
use std::thread;

use image::Rgba;
use inkpage::{CanvasEngine, CanvasError, CanvasEvent, EngineConfig, Region, ToolKind, TouchPoint};
use parking_lot::Mutex;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

// Helper to create an initialized 100x100 engine
fn create_engine() -> CanvasEngine {
    let _ = env_logger::builder().is_test(true).try_init();
    let engine = CanvasEngine::new(EngineConfig::default()).unwrap();
    engine.initialize(100, 100, None).unwrap();
    engine
}

fn points(coords: &[(f32, f32)]) -> Vec<TouchPoint> {
    coords.iter().copied().map(TouchPoint::from).collect()
}

fn is_dark(pixel: Rgba<u8>) -> bool {
    pixel.0[0] < 128
}

#[test]
fn test_three_point_pen_stroke_example() {
    let engine = create_engine();
    let region = engine
        .apply_stroke(&points(&[(10.0, 10.0), (12.0, 11.0), (14.0, 9.0)]), ToolKind::Pen)
        .unwrap()
        .unwrap();

    // Painted outline is [8.5, 15.5] x [7.5, 12.5]; rounded out and padded by 5.
    assert_eq!(region, Region::new(3, 2, 21, 18));
    assert!(is_dark(engine.page_image().unwrap().get_pixel(12, 11).to_owned()));

    assert!(engine.undo().unwrap());
    let page = engine.page_image().unwrap();
    for y in region.top..region.bottom {
        for x in region.left..region.right {
            assert_eq!(*page.get_pixel(x, y), WHITE);
        }
    }
}

#[test]
fn test_undo_then_redo_is_byte_exact() {
    let engine = create_engine();
    let blank = engine.page_image().unwrap();

    engine
        .apply_stroke(&points(&[(20.0, 20.0), (40.0, 35.0), (60.0, 30.0)]), ToolKind::Pen)
        .unwrap();
    let first = engine.page_image().unwrap();
    engine
        .apply_stroke(&points(&[(25.0, 50.0), (45.0, 30.0), (70.0, 45.0)]), ToolKind::Pen)
        .unwrap();
    let second = engine.page_image().unwrap();

    assert!(engine.undo().unwrap());
    assert_eq!(engine.page_image().unwrap(), first);
    assert!(engine.undo().unwrap());
    assert_eq!(engine.page_image().unwrap(), blank);

    assert!(engine.redo().unwrap());
    assert_eq!(engine.page_image().unwrap(), first);
    assert!(engine.redo().unwrap());
    assert_eq!(engine.page_image().unwrap(), second);
}

#[test]
fn test_new_stroke_clears_redo() {
    let engine = create_engine();
    engine.apply_stroke(&points(&[(10.0, 10.0), (20.0, 20.0)]), ToolKind::Pen).unwrap();
    engine.apply_stroke(&points(&[(30.0, 30.0), (40.0, 40.0)]), ToolKind::Pen).unwrap();
    engine.undo().unwrap();
    assert!(engine.can_redo());

    engine.apply_stroke(&points(&[(50.0, 50.0), (60.0, 60.0)]), ToolKind::Pen).unwrap();
    assert!(!engine.can_redo());
    assert!(!engine.redo().unwrap());
}

#[test]
fn test_can_undo_and_redo_track_stacks() {
    let engine = create_engine();
    assert!(!engine.can_undo());
    assert!(!engine.can_redo());
    assert!(!engine.undo().unwrap());
    assert!(!engine.redo().unwrap());

    engine.apply_stroke(&points(&[(10.0, 10.0), (20.0, 20.0)]), ToolKind::Pen).unwrap();
    assert!(engine.can_undo());
    assert!(!engine.can_redo());

    engine.undo().unwrap();
    assert!(!engine.can_undo());
    assert!(engine.can_redo());
}

#[test]
fn test_stroke_passes_through_every_point() {
    let engine = create_engine();
    let coords = [(20.0, 20.0), (30.0, 25.0), (40.0, 22.0), (55.0, 40.0), (80.0, 45.0)];
    engine.apply_stroke(&points(&coords), ToolKind::Pen).unwrap();

    let page = engine.page_image().unwrap();
    for (x, y) in coords {
        assert!(is_dark(*page.get_pixel(x as u32, y as u32)), "no ink at ({x}, {y})");
    }
}

#[test]
fn test_vertical_jump_sample_is_not_painted() {
    let engine = create_engine();
    let region = engine
        .apply_stroke(&points(&[(20.0, 20.0), (20.0, 60.0), (30.0, 22.0)]), ToolKind::Pen)
        .unwrap()
        .unwrap();

    assert!(region.bottom < 60);
    assert_eq!(*engine.page_image().unwrap().get_pixel(20, 60), WHITE);
}

#[test]
fn test_region_stays_inside_buffer() {
    let engine = create_engine();
    let region = engine
        .apply_stroke(&points(&[(1.0, 1.0), (99.0, 20.0), (98.0, 1.0)]), ToolKind::Eraser)
        .unwrap()
        .unwrap();
    assert_eq!((region.left, region.top, region.right), (0, 0, 100));
    assert!(region.bottom <= 100);
}

#[test]
fn test_single_point_records_minimal_region() {
    let engine = create_engine();
    let blank = engine.page_image().unwrap();
    let region = engine
        .apply_stroke(&points(&[(50.0, 50.0)]), ToolKind::Pen)
        .unwrap()
        .unwrap();

    assert!(region.width() >= 1 && region.height() >= 1);
    assert!(region.contains(50, 50));
    assert!(engine.can_undo());
    assert_eq!(engine.page_image().unwrap(), blank);
}

#[test]
fn test_empty_and_offpage_strokes_are_ignored() {
    let engine = create_engine();
    assert_eq!(engine.apply_stroke(&[], ToolKind::Pen).unwrap(), None);
    assert_eq!(
        engine
            .apply_stroke(&points(&[(-100.0, -100.0), (-90.0, -100.0)]), ToolKind::Pen)
            .unwrap(),
        None
    );
    assert!(!engine.can_undo());
}

#[test]
fn test_far_horizontal_sample_keeps_on_page_part() {
    let engine = create_engine();
    let region = engine
        .apply_stroke(&points(&[(50.0, 50.0), (1e20, 50.0)]), ToolKind::Pen)
        .unwrap()
        .unwrap();

    assert_eq!(region.right, 100);
    assert!(region.contains(50, 50));
    let page = engine.page_image().unwrap();
    assert!(is_dark(*page.get_pixel(50, 50)));
    assert!(is_dark(*page.get_pixel(99, 50)));
    assert!(engine.can_undo());
}

#[test]
fn test_requires_initialization() {
    let engine = CanvasEngine::new(EngineConfig::default()).unwrap();
    assert!(matches!(
        engine.apply_stroke(&points(&[(1.0, 1.0)]), ToolKind::Pen),
        Err(CanvasError::Uninitialized)
    ));
    assert!(matches!(engine.undo(), Err(CanvasError::Uninitialized)));
    assert!(matches!(engine.refresh(), Err(CanvasError::Uninitialized)));
    assert!(!engine.can_undo());

    assert!(matches!(
        engine.initialize(0, 10, None),
        Err(CanvasError::InvalidDimensions { width: 0, height: 10 })
    ));
    engine.initialize(10, 10, None).unwrap();
    assert!(matches!(
        engine.initialize(10, 10, None),
        Err(CanvasError::AlreadyInitialized)
    ));
    assert_eq!(engine.dimensions(), Some((10, 10)));
}

#[test]
fn test_stale_commands_are_ignored() {
    let engine = create_engine();
    engine.apply_stroke(&points(&[(10.0, 10.0), (20.0, 20.0)]), ToolKind::Pen).unwrap();
    engine.apply_stroke(&points(&[(30.0, 30.0), (40.0, 40.0)]), ToolKind::Pen).unwrap();

    assert!(engine.undo_seq(1).unwrap());
    assert!(!engine.undo_seq(1).unwrap());
    assert!(engine.can_undo());

    assert!(engine.redo_seq(1).unwrap());
    assert!(!engine.redo_seq(1).unwrap());
    assert!(engine.undo_seq(2).unwrap());
    assert!(engine.can_redo());

    assert!(engine.refresh_seq(7).unwrap());
    assert!(!engine.refresh_seq(7).unwrap());
}

#[test]
fn test_stroke_notifies_listeners_outside_the_lock() {
    let engine = create_engine();
    let buffer = engine.shared_buffer().unwrap();
    let events = Arc::new(Mutex::new(Vec::new()));
    let unlocked = Arc::new(Mutex::new(true));

    let recorded = events.clone();
    let observed = unlocked.clone();
    engine.subscribe(move |event: &CanvasEvent| {
        let free = buffer.try_lock().is_some();
        *observed.lock() &= free;
        recorded.lock().push(event.clone());
    });

    let region = engine
        .apply_stroke(&points(&[(10.0, 10.0), (20.0, 20.0)]), ToolKind::Pen)
        .unwrap();
    engine.undo().unwrap();

    assert!(*unlocked.lock());
    assert_eq!(
        *events.lock(),
        vec![
            CanvasEvent::BufferChanged { region },
            CanvasEvent::UndoStateChanged { can_undo: true, can_redo: false },
            CanvasEvent::BufferChanged { region },
            CanvasEvent::UndoStateChanged { can_undo: false, can_redo: true },
            CanvasEvent::RefreshRequested,
        ]
    );
}

#[test]
fn test_concurrent_strokes_and_undo_stay_consistent() {
    let engine = Arc::new(create_engine());
    let blank = engine.page_image().unwrap();

    let drawer = {
        let engine = engine.clone();
        thread::spawn(move || {
            for i in 0..40 {
                let y = 5.0 + (i % 18) as f32 * 5.0;
                engine
                    .apply_stroke(&points(&[(5.0, y), (50.0, y + 2.0), (95.0, y)]), ToolKind::Pen)
                    .unwrap();
            }
        })
    };
    for _ in 0..40 {
        engine.undo().unwrap();
        thread::yield_now();
    }
    drawer.join().unwrap();

    while engine.undo().unwrap() {}
    assert_eq!(engine.page_image().unwrap(), blank);
}

#[test]
fn test_history_limit_from_config() {
    let _ = env_logger::builder().is_test(true).try_init();
    let config = EngineConfig {
        max_history: Some(2),
        ..EngineConfig::default()
    };
    let engine = CanvasEngine::new(config).unwrap();
    engine.initialize(50, 50, None).unwrap();

    for i in 0..3 {
        let y = 10.0 + i as f32 * 10.0;
        engine.apply_stroke(&points(&[(5.0, y), (45.0, y)]), ToolKind::Pen).unwrap();
    }
    assert!(engine.undo().unwrap());
    assert!(engine.undo().unwrap());
    assert!(!engine.undo().unwrap());
}
