use super::*;
use crate::foundation::core::CanvasSize;

fn opts() -> EditorOpts {
    EditorOpts {
        canvas: CanvasSize::new(64, 64).unwrap(),
        ..EditorOpts::default()
    }
}

fn editor() -> Editor {
    Editor::new(opts()).unwrap()
}

fn stroke(ed: &mut Editor, y: f64) {
    ed.set_width(6.0);
    ed.pointer_logical(PointerEvent::Down { x: 10.0, y }).unwrap();
    ed.pointer_logical(PointerEvent::Move { x: 30.0, y }).unwrap();
    ed.pointer_logical(PointerEvent::Move { x: 50.0, y }).unwrap();
    ed.pointer_logical(PointerEvent::Up { x: 50.0, y }).unwrap();
}

fn composite_px(ed: &Editor, x: u32, y: u32) -> [u8; 4] {
    ed.composite().unwrap().pixel(x, y).unwrap()
}

#[test]
fn new_editor_is_ready_with_one_blank_frame() {
    let ed = editor();
    assert_eq!(ed.frames().len(), 1);
    assert!(ed.is_ready());
    assert!(!ed.is_loading());
    assert_eq!(ed.title(), DEFAULT_TITLE);
    assert_eq!(composite_px(&ed, 5, 5), [255, 255, 255, 255]);
}

#[test]
fn invalid_opts_are_rejected() {
    let bad = EditorOpts {
        ghost_opacity: 1.5,
        ..opts()
    };
    assert!(matches!(
        Editor::new(bad).unwrap_err(),
        FlipbookError::Validation(_)
    ));
}

#[test]
fn saving_an_untouched_frame_commits_absent() {
    let mut ed = editor();
    ed.save_current_frame().unwrap();
    assert!(ed.frames().active_frame().is_blank());
}

#[test]
fn saving_ink_commits_png_payload() {
    let mut ed = editor();
    stroke(&mut ed, 32.0);
    ed.save_current_frame().unwrap();
    let data = ed.frames().active_frame().data.clone().unwrap();
    assert!(data.as_str().starts_with("data:image/png;base64,"));
}

#[test]
fn add_frame_shows_previous_frame_as_ghost() {
    let mut ed = editor();
    stroke(&mut ed, 32.0);
    assert_eq!(ed.add_new_frame().unwrap(), 1);
    assert_eq!(ed.active_index(), 1);
    assert!(!ed.frames().get(0).unwrap().is_blank());

    // New frame's model is blank and ready at once; only the ghost is loading.
    assert!(ed.is_ready());
    assert!(ed.is_loading());
    let loads = ed.take_pending_loads();
    assert_eq!(loads.len(), 1);
    assert_eq!(loads[0].ticket.slot, LoadSlot::Ghost);
    assert_eq!(loads[0].ticket.generation, ed.generation());

    for req in loads {
        assert!(ed.complete_load(req.decode()).unwrap());
    }
    let px = composite_px(&ed, 30, 32);
    assert!((170..=186).contains(&px[0]), "ghost pixel {px:?}");
    assert_eq!(px[3], 255);
    assert!(is_blank(ed.model().unwrap()));
}

#[test]
fn onion_skin_off_issues_no_ghost_load() {
    let mut ed = Editor::new(EditorOpts {
        onion_skin: false,
        ..opts()
    })
    .unwrap();
    stroke(&mut ed, 32.0);
    ed.add_new_frame().unwrap();
    assert!(ed.take_pending_loads().is_empty());
    assert_eq!(composite_px(&ed, 30, 32), [255, 255, 255, 255]);

    ed.set_onion_skin(true);
    ed.run_pending_loads().unwrap();
    assert!(composite_px(&ed, 30, 32)[0] < 200);
}

#[test]
fn switching_to_active_frame_does_nothing() {
    let mut ed = editor();
    stroke(&mut ed, 32.0);
    let generation = ed.generation();
    assert!(!ed.switch_frame(0).unwrap());
    assert_eq!(ed.generation(), generation);
    // No save happened either.
    assert!(ed.frames().active_frame().is_blank());
}

#[test]
fn switching_back_reloads_saved_image() {
    let mut ed = editor();
    stroke(&mut ed, 32.0);
    ed.add_new_frame().unwrap();
    ed.run_pending_loads().unwrap();

    assert!(ed.switch_frame(0).unwrap());
    assert!(ed.model().is_none());
    assert!(!ed.is_ready());
    ed.run_pending_loads().unwrap();
    assert!(ed.is_ready());
    assert!(ed.model().unwrap().pixel(30, 32).unwrap()[3] > 200);
    assert_eq!(composite_px(&ed, 30, 32)[0], 0);
}

#[test]
fn out_of_range_switch_is_validation_error() {
    let mut ed = editor();
    assert!(matches!(
        ed.switch_frame(3).unwrap_err(),
        FlipbookError::Validation(_)
    ));
}

#[test]
fn stale_load_is_discarded() {
    let mut ed = editor();
    stroke(&mut ed, 32.0);
    ed.add_new_frame().unwrap();
    ed.run_pending_loads().unwrap();

    ed.switch_frame(0).unwrap();
    let stale = ed.take_pending_loads();
    ed.switch_frame(1).unwrap();
    let ghost_before = ed.take_pending_loads();

    for req in stale {
        assert!(!ed.complete_load(req.decode()).unwrap());
    }
    // Frame 1 still shows its own (blank) model.
    assert!(is_blank(ed.model().unwrap()));
    for req in ghost_before {
        assert!(ed.complete_load(req.decode()).unwrap());
    }
}

#[test]
fn delete_only_frame_is_noop() {
    let mut ed = editor();
    assert!(!ed.delete_current_frame().unwrap());
    assert_eq!(ed.frames().len(), 1);
}

#[test]
fn delete_drops_active_frame_without_saving() {
    let mut ed = editor();
    stroke(&mut ed, 32.0);
    ed.add_new_frame().unwrap();
    let second = ed.frames().active_frame().id.clone();
    stroke(&mut ed, 20.0);
    assert!(ed.delete_current_frame().unwrap());
    assert_eq!(ed.frames().len(), 1);
    assert_eq!(ed.active_index(), 0);
    assert!(ed.frames().frames().iter().all(|f| f.id != second));
    // Frame 0 is reloaded from its saved image.
    assert!(ed.model().is_none());
    ed.run_pending_loads().unwrap();
    assert!(ed.model().unwrap().pixel(30, 20).unwrap()[3] == 0);
}

#[test]
fn clear_cancels_pending_model_load() {
    let mut ed = editor();
    stroke(&mut ed, 32.0);
    ed.add_new_frame().unwrap();
    ed.run_pending_loads().unwrap();
    ed.switch_frame(0).unwrap();
    let loads = ed.take_pending_loads();

    ed.clear_current_frame().unwrap();
    assert!(ed.frames().active_frame().is_blank());
    assert!(is_blank(ed.model().unwrap()));
    for req in loads {
        assert!(!ed.complete_load(req.decode()).unwrap());
    }
    assert!(is_blank(ed.model().unwrap()));
    assert_eq!(composite_px(&ed, 30, 32), [255, 255, 255, 255]);
}

#[test]
fn empty_submission_is_rejected() {
    let mut ed = editor();
    ed.add_new_frame().unwrap();
    assert!(matches!(
        ed.prepare_submission().unwrap_err(),
        FlipbookError::Validation(_)
    ));
}

#[test]
fn blank_title_is_rejected() {
    let mut ed = editor();
    stroke(&mut ed, 32.0);
    ed.set_title("   ");
    assert!(matches!(
        ed.prepare_submission().unwrap_err(),
        FlipbookError::Validation(_)
    ));
}

#[test]
fn submission_skips_blank_middle_frame() {
    let mut ed = editor();
    stroke(&mut ed, 20.0);
    ed.add_new_frame().unwrap();
    ed.add_new_frame().unwrap();
    stroke(&mut ed, 40.0);
    ed.set_title(" Hop ");

    let ids: Vec<String> = ed.frames().frames().iter().map(|f| f.id.clone()).collect();
    let sub = ed.prepare_submission().unwrap();
    assert_eq!(sub.title, "Hop");
    assert_eq!(sub.frames.len(), 2);
    assert_eq!(sub.frames[0].id, ids[0]);
    assert_eq!(sub.frames[1].id, ids[2]);
    assert_eq!(Some(&sub.thumbnail), sub.frames[0].data.as_ref());
}

fn stored(payloads: Vec<FrameData>) -> Animation {
    let now = chrono::Utc::now();
    Animation {
        id: "a1".to_string(),
        user_id: "u1".to_string(),
        title: "Stored".to_string(),
        thumbnail: payloads[0].clone(),
        frames: payloads
            .into_iter()
            .enumerate()
            .map(|(i, data)| Frame {
                id: format!("f{i}"),
                data: Some(data),
            })
            .collect(),
        created_at: now,
        updated_at: now,
        is_liked: None,
        like_count: 0,
    }
}

#[test]
fn model_decode_failure_keeps_saved_data() {
    let bad = FrameData::new("data:image/png;base64,AAAA");
    let mut ed = Editor::open(&stored(vec![bad.clone()]), opts()).unwrap();
    assert_eq!(ed.animation_id(), Some("a1"));
    assert!(matches!(
        ed.run_pending_loads().unwrap_err(),
        FlipbookError::Codec(_)
    ));
    assert!(ed.model().is_none());
    ed.save_current_frame().unwrap();
    assert_eq!(ed.frames().active_frame().data.as_ref(), Some(&bad));
}

#[test]
fn failed_model_load_does_not_drop_ghost_load() {
    let good = encode_surface(&Surface::new_filled(opts().canvas, Rgba8::BLACK)).unwrap();
    let bad = FrameData::new("data:image/png;base64,AAAA");
    let mut ed = Editor::open(&stored(vec![good, bad.clone()]), opts()).unwrap();
    ed.run_pending_loads().unwrap();

    ed.switch_frame(1).unwrap();
    assert!(matches!(
        ed.run_pending_loads().unwrap_err(),
        FlipbookError::Codec(_)
    ));
    assert!(!ed.is_loading());
    assert!(ed.take_pending_loads().is_empty());
    assert!(ed.model().is_none());
    assert_eq!(ed.frames().active_frame().data.as_ref(), Some(&bad));

    // The ghost was applied; it shows as soon as the model is usable again.
    ed.clear_current_frame().unwrap();
    let px = composite_px(&ed, 5, 5);
    assert!((170..=186).contains(&px[0]), "ghost pixel {px:?}");
}

#[test]
fn tool_change_cancels_shape_preview() {
    let mut ed = editor();
    ed.set_tool(Tool::Rectangle);
    ed.pointer_logical(PointerEvent::Down { x: 10.0, y: 10.0 }).unwrap();
    ed.pointer_logical(PointerEvent::Move { x: 40.0, y: 40.0 }).unwrap();
    assert!(composite_px(&ed, 25, 10)[0] < 100);

    ed.set_tool(Tool::Pencil);
    assert_eq!(composite_px(&ed, 25, 10), [255, 255, 255, 255]);
    assert!(!ed.tool().drawing);
    ed.pointer_logical(PointerEvent::Up { x: 40.0, y: 40.0 }).unwrap();
    assert!(is_blank(ed.model().unwrap()));
}

#[test]
fn viewport_scales_client_coordinates() {
    let mut ed = editor();
    ed.set_viewport(Viewport {
        left: 100.0,
        top: 50.0,
        rendered_width: 32.0,
        rendered_height: 32.0,
    });
    ed.set_width(4.0);
    ed.pointer(PointerEvent::Down { x: 116.0, y: 66.0 }).unwrap();
    ed.pointer(PointerEvent::Up { x: 116.0, y: 66.0 }).unwrap();
    // Client (116, 66) is logical (32, 32).
    assert!(ed.model().unwrap().pixel(32, 32).unwrap()[3] > 200);
}

#[test]
fn teardown_drops_surfaces_and_pending_loads() {
    let mut ed = editor();
    stroke(&mut ed, 32.0);
    ed.add_new_frame().unwrap();
    let loads = ed.take_pending_loads();
    ed.teardown();
    assert!(ed.composite().is_none());
    for req in loads {
        assert!(!ed.complete_load(req.decode()).unwrap());
    }
    ed.pointer_logical(PointerEvent::Down { x: 1.0, y: 1.0 }).unwrap();
    ed.save_current_frame().unwrap();
}

#[test]
fn frame_operations_after_teardown_change_nothing() {
    let mut ed = editor();
    stroke(&mut ed, 32.0);
    ed.add_new_frame().unwrap();
    ed.teardown();
    let before = ed.frames().clone();
    let generation = ed.generation();

    assert_eq!(ed.add_new_frame().unwrap(), 1);
    assert!(!ed.switch_frame(0).unwrap());
    assert!(!ed.delete_current_frame().unwrap());

    assert_eq!(ed.frames(), &before);
    assert_eq!(ed.generation(), generation);
    assert!(ed.take_pending_loads().is_empty());
    assert!(ed.composite().is_none());
}

#[test]
fn preview_frames_include_unsaved_active_frame() {
    let mut ed = editor();
    stroke(&mut ed, 20.0);
    ed.add_new_frame().unwrap();
    ed.add_new_frame().unwrap();
    stroke(&mut ed, 40.0);
    let frames = ed.preview_frames().unwrap();
    assert_eq!(frames.len(), 2);
    assert_eq!(Some(&frames[1]), ed.frames().get(2).unwrap().data.as_ref());
}
