use std::sync::Arc;
use std::thread;

use drop_gen::{render, uniform, DropSpec};
use tensiometer::{
    analyze, AnalysisConfig, Analyzer, DetectorConfig, Measurement, MeasurementError, RawImage,
    MEASUREMENT_FAILED,
};
use tensiometer_common::MeasurementInputs;

fn sharp_analyzer() -> Analyzer {
    Analyzer::new(AnalysisConfig {
        detector: DetectorConfig {
            blur_sigma: 0.0,
            ..DetectorConfig::default()
        },
        ..AnalysisConfig::default()
    })
}

fn parse_mn_per_m(message: &str) -> f64 {
    message
        .strip_prefix("Surface Tension: ")
        .and_then(|rest| rest.strip_suffix(" mN/m"))
        .and_then(|value| value.parse().ok())
        .unwrap_or_else(|| panic!("unexpected result text: {}", message))
}

#[test]
fn measures_ellipse_against_pipette_reference() {
    // 80px wide, 40px tall silhouette
    let spec = DropSpec::droplet_only(200, 200, 40, 20);
    let image = RawImage::from_gray(render(&spec)).unwrap();

    let result = sharp_analyzer().analyze(&image, "2.0", "").unwrap();
    assert_eq!(result, "Surface Tension: 19.6 mN/m");
}

#[test]
fn fallback_scale_without_pipette() {
    let spec = DropSpec::droplet_only(200, 200, 40, 20);
    let image = RawImage::from_gray(render(&spec)).unwrap();

    for pipet in ["", "  ", "n/a", "0", "-1"] {
        let m = sharp_analyzer()
            .measure(&image, &MeasurementInputs::parse(pipet, ""))
            .unwrap();
        assert_eq!(m.dimensions.scale_mm_per_px, 0.01);
        assert!((m.dimensions.width_mm - 0.8).abs() < 1e-9);
        assert!((m.dimensions.height_mm - 0.4).abs() < 1e-9);
    }
}

#[test]
fn density_changes_result() {
    let spec = DropSpec::droplet_only(200, 200, 40, 20);
    let image = RawImage::from_gray(render(&spec)).unwrap();
    let analyzer = sharp_analyzer();

    let water = analyzer.measure(&image, &MeasurementInputs::parse("2.0", "")).unwrap();
    let oil = analyzer.measure(&image, &MeasurementInputs::parse("2.0", "900")).unwrap();

    assert_eq!(water.tension.density_kg_m3, 1000.0);
    assert_eq!(oil.tension.density_kg_m3, 900.0);
    assert!((oil.tension.newtons_per_meter / water.tension.newtons_per_meter - 0.9).abs() < 1e-9);
}

#[test]
fn default_pipeline_on_pendant_drop() {
    let spec = DropSpec::default();
    let image = RawImage::from_gray(render(&spec)).unwrap();

    let (min_x, max_x, min_y, max_y) = spec.silhouette_extent();
    let aspect = (max_y - min_y) as f64 / (max_x - min_x) as f64;
    // pipette = 1mm means the silhouette width is 1mm
    let expected = 1000.0 * 9.81 * 0.001 * (0.001 * aspect) * 1000.0;

    let measured = parse_mn_per_m(&analyze(&image, "1.0", "1000").unwrap());
    assert!(
        (measured - expected).abs() / expected < 0.05,
        "measured {} expected {}",
        measured,
        expected
    );
}

#[test]
fn light_droplet_on_dark_backdrop() {
    let spec = DropSpec {
        dark_on_light: false,
        ..DropSpec::droplet_only(200, 200, 40, 20)
    };
    let image = RawImage::from_gray(render(&spec)).unwrap();

    let analyzer = Analyzer::new(AnalysisConfig {
        detector: DetectorConfig {
            dark_on_light: false,
            blur_sigma: 0.0,
            ..DetectorConfig::default()
        },
        ..AnalysisConfig::default()
    });
    assert_eq!(analyzer.analyze(&image, "2.0", "").unwrap(), "Surface Tension: 19.6 mN/m");
}

#[test]
fn featureless_image_reports_failure() {
    let image = RawImage::from_gray(uniform(160, 120, 180)).unwrap();

    assert!(matches!(analyze(&image, "1.0", "1000"), Err(MeasurementError::NoContourFound)));
    assert_eq!(
        Analyzer::default().analyze_or_message(&image, "1.0", "1000"),
        MEASUREMENT_FAILED
    );
}

#[test]
fn undecodable_bytes_report_failure() {
    let err = RawImage::decode(&[0x89, 0x50, 0x4e, 0x47, 0x00]).unwrap_err();
    assert!(matches!(err, MeasurementError::DecodeFailure(_)));
}

#[test]
fn repeated_runs_are_identical() {
    let image = RawImage::from_gray(render(&DropSpec::default())).unwrap();
    let analyzer = Analyzer::default();

    let first = analyzer.analyze(&image, "1.2", "998").unwrap();
    for _ in 0..3 {
        assert_eq!(analyzer.analyze(&image, "1.2", "998").unwrap(), first);
    }
}

#[test]
fn concurrent_calls_share_one_analyzer() {
    let analyzer = Arc::new(Analyzer::default());
    let image = Arc::new(RawImage::from_gray(render(&DropSpec::default())).unwrap());
    let expected = analyzer.analyze(&image, "1.0", "").unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let analyzer = Arc::clone(&analyzer);
            let image = Arc::clone(&image);
            thread::spawn(move || analyzer.analyze(&image, "1.0", "").unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn decodes_png_file_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("droplet.png");
    render(&DropSpec::droplet_only(200, 200, 40, 20)).save(&path).unwrap();

    let image = RawImage::open(&path).unwrap();
    assert_eq!((image.width(), image.height()), (200, 200));
    assert_eq!(sharp_analyzer().analyze(&image, "2.0", "").unwrap(), "Surface Tension: 19.6 mN/m");
}

#[test]
fn measurement_report_serializes() {
    let image = RawImage::from_gray(render(&DropSpec::droplet_only(200, 200, 40, 20))).unwrap();
    let m = sharp_analyzer()
        .measure(&image, &MeasurementInputs::parse("2.0", "1000"))
        .unwrap();

    let json = serde_json::to_string(&m).unwrap();
    let back: Measurement = serde_json::from_str(&json).unwrap();
    assert_eq!(back.message, "Surface Tension: 19.6 mN/m");
    assert_eq!(back.image_width, 200);
    assert!(back.contour_points > 0);
}
