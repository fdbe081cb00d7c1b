#![cfg(feature = "raster")]

use windot_core::DotParams;
use windot_render::{render_to_file, DotPlot, DotPlotOptions, ExportOptions, Plot};

fn diagonal_plot() -> Plot<DotPlot> {
    let seq: Vec<u8> = b"ACGTTGCAAGCTTACG".iter().cycle().take(120).copied().collect();
    let options = DotPlotOptions {
        params: DotParams::new(4, 4),
        ..DotPlotOptions::default()
    };
    Plot::setup(DotPlot::new(&seq, &seq, options).unwrap(), 1.0).unwrap()
}

fn histogram(png_bytes: &[u8]) -> (u32, u32, [u32; 256]) {
    let img = image::load_from_memory(png_bytes).unwrap().to_rgba8();
    let mut hist = [0u32; 256];
    for p in img.pixels() {
        // bucket by red channel; markers and axes are black
        hist[p[0] as usize] += 1;
    }
    (img.width(), img.height(), hist)
}

#[test]
fn png_histogram_is_stable() {
    let plot = diagonal_plot();
    let dir = tempfile::tempdir().unwrap();
    let f1 = dir.path().join("d1.png");
    let f2 = dir.path().join("d2.png");

    render_to_file(&plot, &f1, &ExportOptions::default()).unwrap();
    render_to_file(&plot, &f2, &ExportOptions::default()).unwrap();

    let h1 = histogram(&std::fs::read(&f1).unwrap());
    let h2 = histogram(&std::fs::read(&f2).unwrap());
    assert_eq!(h1, h2, "PNG histograms differ between identical renders");
}

#[test]
fn png_matches_canvas_and_has_ink() {
    let plot = diagonal_plot();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plot.png");
    render_to_file(&plot, &path, &ExportOptions::default()).unwrap();

    let (w, h, hist) = histogram(&std::fs::read(&path).unwrap());
    assert_eq!((w, h), plot.canvas_size());
    assert!(hist[0] > 0, "no black pixels drawn");
    assert!(hist[255] > hist[0], "background should dominate");
}
