use gyre::{
    DrawOp, Easing, FixedWidth, HexColor, Label, LabelText, Point, PointerEvent, RingId, RingSpec,
    Viewport, Wheel,
};
use std::f64::consts::{FRAC_PI_2, PI};

fn learner_wheel() -> Vec<RingSpec> {
    let segments = |labels: &[&str]| labels.iter().map(|&l| Label::from(l)).collect::<Vec<_>>();
    let white = HexColor::white();
    vec![
        RingSpec::new(1, 48.0, white).fixed().with_label("Learner"),
        RingSpec::new(2, 96.0, white).draggable().with_segments(vec![
            Label::Stacked(vec![LabelText::new("Learning"), LabelText::new("Prior")]),
            Label::from("Interests"),
            Label::Stacked(vec![LabelText::new("Care Plan"), LabelText::new("IEP")]),
            Label::Stacked(vec![LabelText::new("Aspirations"), LabelText::new("Future")]),
        ]),
        RingSpec::new(3, 144.0, white).draggable().with_segments(segments(&[
            "Attitudes",
            "Knowledge",
            "Skills",
            "Understanding",
        ])),
        RingSpec::new(4, 192.0, white).draggable().with_segments(segments(&[
            "Numeracy",
            "Personal",
            "Working Life",
            "Healthy Living",
            "Literacy",
        ])),
        RingSpec::new(5, 240.0, white).draggable().with_segments(segments(&[
            "The Arts",
            "Languages",
            "Soc. & Env.",
            "Moral/Religious",
            "Guidance",
            "English",
            "Science",
            "Design & Tech",
            "Health & PE",
            "Maths",
        ])),
        RingSpec::new(6, 288.0, white).draggable().with_segments(segments(&[
            "FETAC",
            "JCSP",
            "Leaving Cert",
            "ICT/EAL",
            "In-house Certification",
            "Primary Curriculum",
            "Junior Cert",
        ])),
        RingSpec::new(7, 336.0, white)
            .with_rotation(FRAC_PI_2)
            .with_segments(segments(&[
                "Diversity",
                "Collaboration/Partnership",
                "Progression",
                "Equality",
                "Continuity",
                "Flexibility",
                "Personalised Learning",
            ])),
    ]
}

fn wheel() -> Wheel {
    let mut wheel = Wheel::new(learner_wheel(), Easing::default()).unwrap();
    wheel.set_viewport(Viewport::new(Point::new(400.0, 400.0), 1.0));
    wheel
}

fn canvas(angle: f64, distance: f64) -> Point {
    Point::new(400.0 + distance * angle.cos(), 400.0 + distance * angle.sin())
}

fn rotation(wheel: &Wheel, id: u32) -> f64 {
    wheel.model().get(RingId::new(id)).unwrap().rotation()
}

#[test]
fn test_segment_counts() {
    let wheel = wheel();
    let counts: Vec<_> = wheel
        .model()
        .rings()
        .iter()
        .map(|r| r.segments().len())
        .collect();
    assert_eq!(counts, vec![0, 4, 4, 5, 10, 7, 7]);
}

#[test]
fn test_text_radius_is_band_middle() {
    let wheel = wheel();
    let radii: Vec<_> = wheel.model().rings()[1..]
        .iter()
        .map(|r| r.text_radius())
        .collect();
    assert_eq!(radii, vec![72.0, 120.0, 168.0, 216.0, 264.0, 312.0]);
}

#[test]
fn test_full_gesture_then_settle() {
    let mut wheel = wheel();

    assert!(wheel.handle(PointerEvent::Start(canvas(0.0, 200.0))));
    for step in 1..=10 {
        wheel.handle(PointerEvent::Move(canvas(step as f64 * 0.1, 210.0)));
        wheel.tick();
    }
    assert!((rotation(&wheel, 5) - 1.0).abs() < 1e-9);
    assert!(wheel.handle(PointerEvent::End));

    let released = rotation(&wheel, 5);
    for _ in 0..100 {
        wheel.tick();
    }
    assert_eq!(rotation(&wheel, 5), released);
    assert!(wheel.is_settled());
}

#[test]
fn test_release_without_drag_is_noop() {
    let mut wheel = wheel();
    assert!(!wheel.handle(PointerEvent::End));
    assert!(!wheel.handle(PointerEvent::Move(canvas(1.0, 100.0))));
    assert!(wheel.model().rings().iter().skip(1).all(|r| r.rotation() == r.target_rotation()));
}

#[test]
fn test_outermost_ring_only_spins_programmatically() {
    let mut wheel = wheel();
    assert!(!wheel.handle(PointerEvent::Start(canvas(0.0, 320.0))));
    assert!(!wheel.interaction().is_dragging());
    assert_eq!(rotation(&wheel, 7), FRAC_PI_2);

    assert!(wheel.spin(RingId::new(7), PI));
    assert!(!wheel.spin(RingId::new(1), PI));
    for _ in 0..200 {
        wheel.tick();
    }
    assert_eq!(rotation(&wheel, 7), PI);
    assert_eq!(rotation(&wheel, 1), 0.0);
}

#[test]
fn test_reset_returns_to_initial_orientation() {
    let mut wheel = wheel();
    wheel.handle(PointerEvent::Start(canvas(0.0, 120.0)));
    wheel.handle(PointerEvent::Move(canvas(2.0, 120.0)));
    wheel.handle(PointerEvent::End);
    wheel.spin(RingId::new(7), 0.0);

    wheel.reset();
    for _ in 0..200 {
        wheel.tick();
    }
    assert_eq!(rotation(&wheel, 3), 0.0);
    assert_eq!(rotation(&wheel, 7), FRAC_PI_2);
}

#[test]
fn test_resized_canvas_keeps_hit_testing() {
    let mut wheel = wheel();
    wheel.resize(400.0, 300.0, 0.9);
    let viewport = wheel.viewport();
    assert_eq!(viewport.center, Point::new(200.0, 150.0));

    // Middle of ring 3's band, in scaled canvas pixels.
    let p = Point::new(200.0 + 120.0 * viewport.scale, 150.0);
    assert!(wheel.handle(PointerEvent::Start(p)));
    assert_eq!(wheel.interaction().active_ring(), Some(RingId::new(3)));
}

#[test]
fn test_frame_emits_every_glyph() {
    let wheel = wheel();
    let ops = wheel.frame(&FixedWidth(7.0));
    let circles = ops.iter().filter(|op| matches!(op, DrawOp::FillCircle { .. })).count();
    let labels = ops.iter().filter(|op| matches!(op, DrawOp::CenterLabel { .. })).count();
    let glyphs = ops.iter().filter(|op| matches!(op, DrawOp::Glyph { .. })).count();

    let expected: usize = learner_wheel()
        .iter()
        .flat_map(|spec| spec.segments.iter())
        .flat_map(|label| label.lines())
        .map(|line| line.chars().count())
        .sum();
    assert_eq!((circles, labels), (7, 1));
    assert_eq!(glyphs, expected);
}

#[test]
fn test_invalid_easing_rejected() {
    assert!(Wheel::new(learner_wheel(), Easing { factor: 2.0, snap_threshold: 0.001 }).is_err());
}
