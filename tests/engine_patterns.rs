use image::{Rgb, RgbImage};
use image_life::game_of_life::io::parse_cells_from_string;
use image_life::{Cell, LifeEngine, LiveSet, SeedError, SeedLoader, Settings};
use tempfile::tempdir;

fn cells(coords: &[(i64, i64)]) -> LiveSet {
    coords.iter().copied().map(Cell::from).collect()
}

#[test]
fn beacon_has_period_two() {
    let beacon = parse_cells_from_string("1100\n1100\n0011\n0011\n").unwrap();
    let mut engine = LifeEngine::from_cells(beacon.iter().copied());

    engine.step();
    assert_eq!(engine.population(), 6);

    engine.step();
    assert_eq!(*engine.alive(), beacon);
}

#[test]
fn glider_keeps_travelling() {
    let glider = cells(&[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)]);
    let mut engine = LifeEngine::from_cells(glider.iter().copied());

    for lap in 1..=5i64 {
        engine.step_n(4);
        let expected: LiveSet = glider.iter().map(|cell| cell.offset(lap, lap)).collect();
        assert_eq!(*engine.alive(), expected);
    }
}

#[test]
fn image_seed_runs_as_blinker() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("seed.png");

    let mut canvas = RgbImage::new(32, 32);
    for x in 20..23 {
        canvas.put_pixel(x, 9, Rgb([255, 255, 255]));
    }
    canvas.put_pixel(2, 2, Rgb([250, 250, 250]));
    canvas.save(&path).unwrap();

    let mut settings = Settings::default();
    settings.seed.image_path = path;

    let mut engine = image_life::seed_from_settings(&settings).unwrap();
    assert_eq!(*engine.alive(), cells(&[(0, 0), (1, 0), (2, 0)]));

    engine.step();
    assert_eq!(*engine.alive(), cells(&[(1, -1), (1, 0), (1, 1)]));
}

#[test]
fn unreadable_seed_is_reported() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("seed.png");
    std::fs::write(&path, b"\x89PNG but not really").unwrap();

    let err = SeedLoader::load(&path, 1, true).unwrap_err();
    assert!(matches!(err, SeedError::ImageDecode { .. }));
    assert!(err.to_string().contains("seed.png"));
}
