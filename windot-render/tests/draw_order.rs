use windot_core::{DevicePoint, DotParams, MatchKind};
use windot_render::{Color, DotPlot, DotPlotOptions, DrawCommand, Plot, RecordingSurface};

fn long_sequence(len: usize) -> Vec<u8> {
    b"ACGTTGCA".iter().cycle().take(len).copied().collect()
}

fn record(plot: &Plot<DotPlot>) -> RecordingSurface {
    let mut surface = RecordingSurface::new();
    plot.execute(&mut surface).unwrap();
    surface
}

#[test]
fn axes_tics_titles_then_markers() {
    let seq = long_sequence(250);
    let options = DotPlotOptions {
        params: DotParams::new(8, 8),
        ..DotPlotOptions::default()
    }
    .with_names(Some("one".into()), Some("two".into()));
    let plot = Plot::setup(DotPlot::new(&seq, &seq, options).unwrap(), 1.0).unwrap();
    let surface = record(&plot);

    let kinds: Vec<u8> = surface
        .commands
        .iter()
        .map(|c| match c {
            DrawCommand::Begin { .. } => 0,
            DrawCommand::Line { .. } => 1,
            DrawCommand::Text { .. } => 2,
            DrawCommand::Oval { .. } => 3,
            DrawCommand::Rectangle { .. } => 4,
        })
        .collect();
    assert_eq!(kinds[0], 0);
    let mut sorted = kinds.clone();
    sorted.sort();
    assert_eq!(kinds, sorted, "commands drawn out of order");

    // last diagonal match is at 242, so content spans 250 units: two tics per axis
    let dims = plot.geometry().dimensions;
    assert_eq!(dims.width, 250);
    assert_eq!(surface.lines().count(), 2 + 2 + 2);
    assert_eq!(surface.texts(), vec!["x = one", "y = two"]);
}

#[test]
fn tics_are_centred_on_multiples_of_100() {
    let seq = long_sequence(120);
    let options = DotPlotOptions {
        params: DotParams::new(8, 8),
        ..DotPlotOptions::default()
    };
    let plot = Plot::setup(DotPlot::new(&seq, &seq, options).unwrap(), 1.0).unwrap();
    let g = plot.geometry().clone();
    let surface = record(&plot);
    let lines: Vec<_> = surface.lines().cloned().collect();

    // x axis, y axis, one x tic, one y tic
    assert_eq!(lines.len(), 4);
    assert_eq!(
        lines[2],
        DrawCommand::Line {
            from: DevicePoint::new(g.origin_x + 99, g.origin_y + 3),
            to: DevicePoint::new(g.origin_x + 99, g.origin_y + 15),
            width: 3,
            color: Color::BLACK
        }
    );
    assert_eq!(
        lines[3],
        DrawCommand::Line {
            from: DevicePoint::new(g.origin_x - 3, g.origin_y - 101),
            to: DevicePoint::new(g.origin_x - 15, g.origin_y - 101),
            width: 3,
            color: Color::BLACK
        }
    );
}

#[test]
fn marker_style_follows_match_kind() {
    let seq1 = b"ACGT-ACGT";
    let seq2 = b"AC-GT-ACG";
    let options = DotPlotOptions {
        params: DotParams::new(1, 1),
        primary_color: Color::rgb(0, 0, 255),
        ..DotPlotOptions::default()
    };
    let plot = Plot::setup(DotPlot::new(seq1, seq2, options).unwrap(), 1.0).unwrap();
    let surface = record(&plot);

    let points = &plot.content().matches().points;
    let ovals: Vec<_> = surface.ovals().collect();
    assert_eq!(ovals.len(), points.len());
    for (point, oval) in points.iter().zip(ovals) {
        let DrawCommand::Oval { style, .. } = oval else {
            panic!("expected oval");
        };
        match point.kind {
            MatchKind::Primary => assert_eq!((style.fill, style.outline), (Color::rgb(0, 0, 255), Color::BLACK)),
            MatchKind::Secondary => assert_eq!((style.fill, style.outline), (Color::RED, Color::RED)),
        }
    }
    assert!(!plot.content().matches().secondary().is_empty());
}

#[test]
fn detection_is_independent_of_scale() {
    let seq = long_sequence(64);
    let options = DotPlotOptions {
        params: DotParams::new(4, 3),
        ..DotPlotOptions::default()
    };
    let small = Plot::setup(DotPlot::new(&seq, &seq, options.clone()).unwrap(), 0.5).unwrap();
    let large = Plot::setup(DotPlot::new(&seq, &seq, options).unwrap(), 3.0).unwrap();
    assert_eq!(small.content().matches(), large.content().matches());
    assert!(large.canvas_size().0 > small.canvas_size().0);
}

#[test]
fn markers_stay_on_canvas_at_any_scale() {
    let seq = long_sequence(10);
    for (scale, with_axes) in [(0.5, false), (2.0, false), (2.0, true), (1.5, true)] {
        let options = DotPlotOptions {
            params: DotParams::new(1, 1),
            with_axes,
            ..DotPlotOptions::default()
        };
        let plot = Plot::setup(DotPlot::new(&seq, &seq, options).unwrap(), scale).unwrap();
        let (w, h) = plot.canvas_size();
        let surface = record(&plot);

        let inside = |p: &DevicePoint| p.x >= 0 && p.y >= 0 && p.x < w as i64 && p.y < h as i64;
        let mut count = 0;
        for oval in surface.ovals() {
            let DrawCommand::Oval { corner1, corner2, .. } = oval else {
                panic!("expected oval");
            };
            assert!(
                inside(corner1) && inside(corner2),
                "marker {:?}-{:?} outside {}x{} canvas at scale {}",
                corner1,
                corner2,
                w,
                h,
                scale
            );
            count += 1;
        }
        assert_eq!(count, plot.content().matches().len());
    }
}

#[test]
fn first_row_markers_sit_at_the_top_at_any_scale() {
    let seq = long_sequence(10);
    let options = DotPlotOptions {
        params: DotParams::new(1, 1),
        with_axes: false,
        ..DotPlotOptions::default()
    };
    let plot = Plot::setup(DotPlot::new(&seq, &seq, options).unwrap(), 2.0).unwrap();
    let g = plot.geometry().clone();
    let surface = record(&plot);

    // content height 23 is 11.5 logical units; row 0 tops out at 10.5
    let first = surface.ovals().next().cloned().unwrap();
    let DrawCommand::Oval { corner1, corner2, .. } = first else {
        panic!("expected oval");
    };
    assert_eq!(corner1, DevicePoint::new(g.origin_x, g.origin_y - 21));
    assert_eq!(corner2, DevicePoint::new(g.origin_x, g.origin_y - 17));
}
