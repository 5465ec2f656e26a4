use std::io::Cursor;

use plot3d_q::ndarray::{Array2, Array3};
use plot3d_q::{
    read_plot3d_q, Dimensionality, Endian, FloatPrecision, FreeStreamScalars, GridDescriptor,
    HeaderWidth, MultiBlockDataset, Plot3dConfig, Plot3dFile,
};

fn sample_3d() -> MultiBlockDataset {
    let mut ds = MultiBlockDataset::new(Dimensionality::Three);
    let extents = [(5, 4, 3), (2, 6, 1)];
    for (g, &(ni, nj, nk)) in extents.iter().enumerate() {
        let scalars = FreeStreamScalars::new(0.25 + g as f64, 1.25, 2.5e6, 0.5 * g as f64);
        ds.push_grid(GridDescriptor::new_3d(ni, nj, nk).unwrap(), scalars).unwrap();
        // every value exactly representable in f32
        for v in 0..ds.nvar() {
            let data = Array3::from_shape_fn((ni, nj, nk), |(i, j, k)| {
                (g * 1000 + v * 100 + i * 16 + j * 4 + k) as f64 * 0.25
            });
            ds.set_variable(&data, g, v).unwrap();
        }
    }
    ds
}

#[test]
fn write_then_read_reproduces_dataset_for_every_layout() {
    let dir = tempfile::tempdir().unwrap();
    let original = sample_3d();

    for endian in [Endian::Little, Endian::Big] {
        for header_width in [HeaderWidth::Four, HeaderWidth::Eight] {
            for precision in [FloatPrecision::F32, FloatPrecision::F64] {
                let config = Plot3dConfig::default()
                    .with_endian(endian)
                    .with_header_width(header_width)
                    .with_precision(precision);
                let path = dir
                    .path()
                    .join(format!("{endian:?}_{header_width:?}_{precision:?}.q"));

                original.write(&path, &config).unwrap();
                let mut round = MultiBlockDataset::default();
                round.read(&path, &config).unwrap();

                assert_eq!(round, original, "layout {config:?}");
            }
        }
    }
}

#[test]
fn file_size_matches_record_layout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("size.q");
    let config = Plot3dConfig::default();
    sample_3d().write(&path, &config).unwrap();

    let framing = 2 * 4;
    let header = framing + 4;
    let dims = framing + 2 * 3 * 4;
    let grid0 = (framing + 4 * 8) + (framing + 5 * 4 * 3 * 5 * 8);
    let grid1 = (framing + 4 * 8) + (framing + 2 * 6 * 5 * 8);
    let size = std::fs::metadata(&path).unwrap().len() as usize;
    assert_eq!(size, header + dims + grid0 + grid1);
}

#[test]
fn scalars_survive_per_grid() {
    let original = sample_3d();
    let config = Plot3dConfig::default().with_precision(FloatPrecision::F32);
    let mut bytes = Vec::new();
    original.write_to(&mut bytes, &config).unwrap();

    let mut round = MultiBlockDataset::default();
    round.read_from(Cursor::new(bytes), &config).unwrap();
    assert_eq!(round.scalars(0).unwrap().mach, 0.25);
    assert_eq!(round.scalars(1).unwrap().mach, 1.25);
    assert_eq!(round.scalars(1).unwrap().reynolds, 2.5e6);
    assert_eq!(round.scalars(1).unwrap().time, 0.5);
}

#[test]
fn two_d_scenario_set_to_ones_survives_rewrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scenario.q");
    let config = Plot3dConfig::default().with_dimensionality(Dimensionality::Two);

    let mut ds = MultiBlockDataset::new(Dimensionality::Two);
    ds.push_grid(GridDescriptor::new_2d(4, 3).unwrap(), FreeStreamScalars::default()).unwrap();
    for v in 0..4 {
        let data = Array2::from_elem((4, 3), v as f64 + 0.5);
        ds.set_variable(&data, 0, v).unwrap();
    }
    ds.write(&path, &config).unwrap();

    let grids = read_plot3d_q(&path, &config).unwrap();
    assert_eq!(grids[0].data().len(), 48);

    let mut p3d = Plot3dFile::new(config);
    p3d.read_file(&path).unwrap();
    let mut x = p3d.get_var(0, 0).unwrap();
    assert_eq!(x.shape(), &[4, 3]);
    x.fill(1.0);
    p3d.set_var(&x, 0, 0).unwrap();
    p3d.write_file(&path).unwrap();

    p3d.read_file(&path).unwrap();
    assert!(p3d.get_var(0, 0).unwrap().iter().all(|&v| v == 1.0));
    assert!(p3d.get_var(0, 1).unwrap().iter().all(|&v| v == 1.5));
}

#[test]
fn successful_read_replaces_previous_grids() {
    let dir = tempfile::tempdir().unwrap();
    let three = dir.path().join("three.q");
    let two = dir.path().join("two.q");
    let config3 = Plot3dConfig::default();
    let config2 = config3.with_dimensionality(Dimensionality::Two);

    sample_3d().write(&three, &config3).unwrap();
    let mut small = MultiBlockDataset::new(Dimensionality::Two);
    let descriptor = GridDescriptor::new_2d(3, 3).unwrap();
    small.push_grid(descriptor, FreeStreamScalars::default()).unwrap();
    small.write(&two, &config2).unwrap();

    let mut ds = MultiBlockDataset::default();
    ds.read(&three, &config3).unwrap();
    assert_eq!(ds.ngrids(), 2);
    ds.read(&two, &config2).unwrap();
    assert_eq!(ds.ngrids(), 1);
    assert_eq!(ds.nvar(), 4);
    assert_eq!(ds.summary().grids[0].extents, vec![3, 3]);
}
