use super::*;
use crate::foundation::core::PhysicalConfig;

fn small_table() -> GeometryTable {
    GeometryTable::build(&PhysicalConfig::new(4, 2, 1.0).unwrap())
}

fn scene_with(cells: &[(usize, usize, usize, Rgb8)]) -> Scene {
    let mut scene = Scene::new(8, 32, 8);
    for &(column, layer, row, color) in cells {
        scene.set(column, layer, row, Some(color));
    }
    scene
}

#[test]
fn single_center_voxel_yields_one_frame() {
    let scene = scene_with(&[(4, 0, 4, Rgb8::WHITE)]);
    let timeline = compile_timeline(&scene, &small_table());

    assert_eq!(timeline.len(), 1);
    let frame = &timeline.frames()[0];
    assert_eq!(frame.offset, Tick(0));
    assert_eq!(frame.delay, Tick(0));
    assert_eq!(
        frame.activations,
        vec![Activation {
            pixel: ArmPixel {
                side: Side::Near,
                radius: 0
            },
            layer: 0,
            color: Rgb8::WHITE,
        }]
    );
}

#[test]
fn empty_scene_yields_empty_timeline() {
    let timeline = compile_timeline(&Scene::new(8, 32, 8), &small_table());
    assert!(timeline.is_empty());
    assert_eq!(timeline.stats().activations, 0);
    assert_eq!(timeline.tail(), timeline.sweep());
}

#[test]
fn color_only_changes_leave_schedule_untouched() {
    let cells = [(6, 3, 6), (2, 3, 2), (4, 10, 6), (0, 31, 4)];
    let red: Vec<_> = cells
        .iter()
        .map(|&(c, l, r)| (c, l, r, Rgb8::new(200, 0, 0)))
        .collect();
    let blue: Vec<_> = cells
        .iter()
        .map(|&(c, l, r)| (c, l, r, Rgb8::new(0, 0, 90)))
        .collect();

    let table = small_table();
    let a = compile_timeline(&scene_with(&red), &table);
    let b = compile_timeline(&scene_with(&blue), &table);

    assert_eq!(a.len(), b.len());
    for (fa, fb) in a.frames().iter().zip(b.frames()) {
        assert_eq!(fa.offset, fb.offset);
        assert_eq!(fa.delay, fb.delay);
        let pa: Vec<_> = fa.activations.iter().map(|x| (x.pixel, x.layer)).collect();
        let pb: Vec<_> = fb.activations.iter().map(|x| (x.pixel, x.layer)).collect();
        assert_eq!(pa, pb);
    }
}

#[test]
fn delays_are_offset_differences_and_close_the_sweep() {
    // (2,2) fires at 1250 and (0,2) at 2500 on the near end.
    let scene = scene_with(&[(6, 0, 6, Rgb8::WHITE), (4, 1, 6, Rgb8::WHITE)]);
    let timeline = compile_timeline(&scene, &small_table());

    let schedule: Vec<_> = timeline
        .frames()
        .iter()
        .map(|f| (f.offset.0, f.delay.0))
        .collect();
    assert_eq!(schedule, vec![(1250, 1250), (2500, 1250)]);
    assert_eq!(timeline.tail(), Tick(2500));
    assert_eq!(timeline.pass_ticks(), timeline.sweep());
    assert_eq!(timeline.max_delay(), Tick(1250));
}

#[test]
fn two_passes_span_one_rotation() {
    for rpm in [60.0, 180.0, 1500.0] {
        let cfg = PhysicalConfig::from_rpm(24, 2, rpm).unwrap();
        let table = GeometryTable::build(&cfg);
        let timeline = compile_timeline(&Scene::demo(24, 32), &table);
        assert!(!timeline.is_empty());
        assert!(timeline.frames().iter().all(|f| f.delay <= timeline.sweep()));

        let rotation = timeline.pass_ticks().0 * 2;
        let expected = cfg.rotation_period().0;
        assert!(
            rotation.abs_diff(expected) <= 1,
            "rpm {rpm}: {rotation} vs {expected}"
        );
    }
}

#[test]
fn opposite_cells_merge_into_one_frame_on_both_ends() {
    let scene = scene_with(&[(6, 2, 6, Rgb8::WHITE), (2, 2, 2, Rgb8::WHITE)]);
    let timeline = compile_timeline(&scene, &small_table());
    assert_eq!(timeline.len(), 1);

    let panel = timeline.frames()[0].panel_activations();
    let xs: Vec<_> = panel.iter().map(|p| (p.x, p.y)).collect();
    assert!(xs.contains(&(3, 2)));
    assert!(xs.contains(&(PANEL_WIDTH as i32 - 1 - 3, 2)));
}

#[test]
fn cells_the_table_never_samples_are_ignored() {
    // Odd columns fall between grid steps; column 9 is outside the 8-wide grid.
    let mut scene = Scene::new(10, 2, 10);
    scene.set(5, 0, 5, Some(Rgb8::WHITE));
    scene.set(9, 1, 0, Some(Rgb8::WHITE));
    assert!(compile_timeline(&scene, &small_table()).is_empty());

    let ragged = Scene::from_json_str("[[[null]],[[[1,1,1]]]]").unwrap();
    assert!(compile_timeline(&ragged, &small_table()).is_empty());
}

#[test]
fn black_voxels_are_scheduled_but_unlit() {
    let scene = scene_with(&[(4, 0, 4, Rgb8::BLACK)]);
    let timeline = compile_timeline(&scene, &small_table());
    assert_eq!(timeline.len(), 1);
    assert!(!timeline.frames()[0].activations[0].color.is_lit());
}

#[test]
fn from_frames_recomputes_delays_and_validates_order() {
    let frame = |offset| Frame {
        offset: Tick(offset),
        activations: vec![],
        delay: Tick(999),
    };
    let timeline = Timeline::from_frames(vec![frame(10), frame(40)], Tick(100)).unwrap();
    let delays: Vec<_> = timeline.frames().iter().map(|f| f.delay.0).collect();
    assert_eq!(delays, vec![10, 30]);
    assert_eq!(timeline.tail(), Tick(60));

    assert!(Timeline::from_frames(vec![frame(40), frame(10)], Tick(100)).is_err());
    assert!(Timeline::from_frames(vec![frame(10), frame(10)], Tick(100)).is_err());
    assert!(Timeline::from_frames(vec![frame(150)], Tick(100)).is_err());
}

#[test]
fn timeline_json_round_trips() {
    let scene = scene_with(&[(6, 0, 6, Rgb8::new(1, 2, 3))]);
    let timeline = compile_timeline(&scene, &small_table());
    let text = timeline.to_json_string().unwrap();
    let back: Timeline = serde_json::from_str(&text).unwrap();
    assert_eq!(back, timeline);
}
