//! End-to-end editing scenarios through the library API.
//!
//! Drives a `Session` the way a front end would: commands in, snapshots and
//! events out, with projects saved to and loaded from disk.

use image::Rgba;
use spritekit::color::{Pixel, TRANSPARENT};
use spritekit::command::{Command, Event};
use spritekit::edit::Tool;
use spritekit::project;
use spritekit::session::Session;
use spritekit::sprite::Sprite;

const RED: Pixel = Rgba([255, 0, 0, 255]);
const GREEN: Pixel = Rgba([0, 255, 0, 255]);

fn pen(session: &mut Session, x: i32, y: i32, color: Pixel) {
    session.select_tool(Tool::Pen);
    session.select_color(color);
    session.point_input(x, y).unwrap();
}

// ============================================================================
// Save / load
// ============================================================================

#[test]
fn test_two_by_two_roundtrip() {
    let mut session = Session::new(2).unwrap();
    pen(&mut session, 0, 0, RED);
    pen(&mut session, 1, 1, GREEN);

    let json = project::serialize(session.sprite()).unwrap();
    let sprite = project::deserialize(json.as_bytes()).unwrap();

    assert_eq!(sprite.get_color(0, 0).unwrap(), RED);
    assert_eq!(sprite.get_color(1, 1).unwrap(), GREEN);
    assert_eq!(sprite.get_color(1, 0).unwrap(), TRANSPARENT);
    assert_eq!(sprite.get_color(0, 1).unwrap(), TRANSPARENT);
}

#[test]
fn test_roundtrip_through_disk_keeps_every_frame() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("nested").join("walk.ssp");

    let mut session = Session::new(4).unwrap();
    pen(&mut session, 3, 0, RED);
    session.duplicate_frame(0).unwrap();
    session.select_frame(1).unwrap();
    pen(&mut session, 0, 3, GREEN);
    session.add_frame();
    session.save_project(&path).unwrap();

    let loaded = project::load(&path).unwrap();
    assert_eq!(loaded.frame_count(), 3);
    assert_eq!(loaded.current_index(), 0);
    for (index, frame) in session.sprite().frames().iter().enumerate() {
        assert_eq!(loaded.frame_at(index).unwrap(), frame);
    }
}

#[test]
fn test_handwritten_document_is_column_major() {
    // Record 1 is pixel (0, 1), record 2 is pixel (1, 0)
    let doc = r#"[[
        {"red": 0, "green": 0, "blue": 0, "alpha": 0},
        {"red": 255, "green": 0, "blue": 0, "alpha": 255},
        {"red": 0, "green": 255, "blue": 0, "alpha": 255},
        {"red": 0, "green": 0, "blue": 0, "alpha": 0}
    ]]"#;
    let sprite = project::deserialize(doc.as_bytes()).unwrap();
    assert_eq!(sprite.width(), 2);
    assert_eq!(sprite.get_color(0, 1).unwrap(), RED);
    assert_eq!(sprite.get_color(1, 0).unwrap(), GREEN);
}

// ============================================================================
// Tools
// ============================================================================

#[test]
fn test_fill_inside_outline() {
    let mut session = Session::new(5).unwrap();
    session.select_color(RED);
    for i in 0..5 {
        session.point_input(i, 2).unwrap();
    }

    session.select_tool(Tool::Fill);
    session.select_color(GREEN);
    session.point_input(0, 0).unwrap();

    let sprite = session.sprite();
    for x in 0..5 {
        assert_eq!(sprite.get_color(x, 2).unwrap(), RED);
        assert_eq!(sprite.get_color(x, 4).unwrap(), TRANSPARENT);
    }
    // The up-right diagonal never crosses a full row
    assert_eq!(sprite.get_color(4, 0).unwrap(), GREEN);
    assert_eq!(sprite.get_color(0, 1).unwrap(), GREEN);
}

#[test]
fn test_eraser_and_eyedropper() {
    let mut session = Session::new(3).unwrap();
    pen(&mut session, 1, 1, RED);

    session.select_tool(Tool::Eyedropper);
    session.select_color(GREEN);
    session.point_input(1, 1).unwrap();
    assert_eq!(session.color(), RED);

    session.select_tool(Tool::Eraser);
    session.point_input(1, 1).unwrap();
    assert_eq!(session.sprite().get_color(1, 1).unwrap(), TRANSPARENT);
}

// ============================================================================
// Frames and animation
// ============================================================================

#[test]
fn test_animation_visits_frames_in_order() {
    let mut session = Session::new(1).unwrap();
    pen(&mut session, 0, 0, RED);
    session.add_frame();
    session.add_frame();
    session.select_frame(2).unwrap();
    pen(&mut session, 0, 0, GREEN);

    let colors: Vec<Pixel> =
        (0..6).map(|_| *session.tick_animation().image.get_pixel(0, 0)).collect();
    assert_eq!(colors, vec![RED, TRANSPARENT, GREEN, RED, TRANSPARENT, GREEN]);
}

#[test]
fn test_delete_never_empties_sprite() {
    let mut sprite = Sprite::new(2).unwrap();
    sprite.add_frame();
    sprite.delete_frame(1).unwrap();
    assert!(sprite.delete_frame(0).is_err());
    assert_eq!(sprite.frame_count(), 1);
}

// ============================================================================
// Command queue
// ============================================================================

#[test]
fn test_command_script_session() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("script.ssp");
    let mut session = Session::new(16).unwrap();

    let commands = vec![
        Command::NewProject { width: 2 },
        Command::SelectColor { color: "#FF0000".to_string() },
        Command::Point { x: 0, y: 0 },
        Command::Save { path: path.clone() },
        Command::NewProject { width: 8 },
        Command::Load { path: path.clone() },
    ];
    let events: Vec<Event> = commands.into_iter().flat_map(|c| session.execute(c)).collect();

    assert!(events.iter().all(|e| !matches!(e, Event::Rejected { .. })), "{:?}", events);
    assert!(events.contains(&Event::Loaded { width: 2, frame_count: 1 }));
    assert_eq!(session.sprite().get_color(0, 0).unwrap(), RED);
}
