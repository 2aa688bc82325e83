//! End-to-end reconstruction: solved geometry -> paths -> coordinates

use floating_cuts::{
    build_paths, level, resolve_all, resolve_guillotine, resolve_non_guillotine, Cut, CutError,
    GuillotinePosition, NonGuillotinePosition, Path, PathStep, Placement, Point,
};
use test_case::test_case;
use test_helpers::*;

#[test]
fn scenario_a_top_half_of_horizontal_cut() {
    let solved = guillotine(1, &[(0, 100, 50, Cut::Horizontal), (3, 100, 30, Cut::None)]);
    let occupancy = one_item_in(&[3], solved.len());

    let paths = build_paths(&occupancy, &solved).expect("paths build");
    assert_eq!(paths.len(), 1);
    assert_eq!(
        paths.paths()[0].steps(),
        &[PathStep {
            position: GuillotinePosition::Top,
            node: 3,
            parent: 0,
            length: 100,
            width: 30,
        }]
    );

    let origin = resolve_guillotine(&paths.paths()[0], plate(), false);
    assert_eq!(origin, Point::new(0, 20));
}

#[test_case(2, 20, 50, false, Point::new(80, 0) ; "right piece upright plate")]
#[test_case(2, 20, 100, true, Point::new(30, 0) ; "right piece rotated plate")]
#[test_case(3, 50, 30, true, Point::new(0, 70) ; "top piece rotated plate")]
#[test_case(1, 20, 100, true, Point::new(0, 0) ; "left piece rotated plate")]
fn scenario_b_rotation_only_changes_initial_box(
    node: usize,
    length: u32,
    width: u32,
    rotated: bool,
    expected: Point,
) {
    let solved = guillotine(1, &[(node, length, width, Cut::None)]);
    let path = Path::from_node(node, &solved).expect("path builds");
    assert_eq!(resolve_guillotine(&path, plate(), rotated), expected);
}

#[test]
fn scenario_c_top_left_corner() {
    let solved = non_guillotine(1, &[(0, 100, 50, Cut::Split), (1, 40, 20, Cut::None)]);
    let path = Path::from_node(1, &solved).expect("path builds");

    assert_eq!(path.steps()[0].position, NonGuillotinePosition::TopLeft);
    let origin = resolve_non_guillotine(&path, plate(), &solved).expect("resolves");
    assert_eq!(origin, Point::new(0, 30));
}

#[test]
fn rotated_non_guillotine_batch_is_rejected() {
    let solved = non_guillotine(1, &[(0, 100, 50, Cut::Split), (1, 40, 20, Cut::None)]);
    let occupancy = one_item_in(&[1], solved.len());
    let paths = build_paths(&occupancy, &solved).expect("paths build");

    assert!(matches!(
        resolve_all(&paths, plate(), true, &solved),
        Err(CutError::InvalidConfig(_))
    ));
    assert_eq!(
        resolve_all(&paths, plate(), false, &solved),
        Ok(vec![Point::new(0, 30)])
    );
}

#[test]
fn scenario_d_center_offsets_by_siblings() {
    let solved = non_guillotine(
        1,
        &[
            (0, 100, 50, Cut::Split),
            (1, 30, 15, Cut::None),
            (4, 25, 35, Cut::None),
            (5, 40, 10, Cut::None),
        ],
    );
    let path = Path::from_node(5, &solved).expect("path builds");
    let origin = resolve_non_guillotine(&path, plate(), &solved).expect("resolves");
    assert_eq!(origin, Point::new(30, 35));
}

#[test]
fn scenario_d_center_below_a_corner() {
    // center of the top-left corner of the plate
    let solved = non_guillotine(
        2,
        &[
            (0, 100, 50, Cut::Split),
            (1, 60, 30, Cut::Split),
            (6, 20, 10, Cut::None),
            (9, 15, 12, Cut::None),
            (10, 25, 8, Cut::None),
        ],
    );
    let path = Path::from_node(10, &solved).expect("path builds");
    assert_eq!(path.len(), 2);
    let origin = resolve_non_guillotine(&path, plate(), &solved).expect("resolves");
    assert_eq!(origin, Point::new(20, 32));
}

#[test_case(2, Point::new(60, 30) ; "top right")]
#[test_case(3, Point::new(60, 0) ; "bottom right")]
#[test_case(4, Point::new(0, 0) ; "bottom left")]
fn non_guillotine_corners(node: usize, expected: Point) {
    let solved = non_guillotine(1, &[(0, 100, 50, Cut::Split), (node, 40, 20, Cut::None)]);
    let path = Path::from_node(node, &solved).expect("path builds");
    assert_eq!(resolve_non_guillotine(&path, plate(), &solved), Ok(expected));
}

#[test]
fn root_placement_resolves_to_origin() {
    let solved = guillotine(2, &[(0, 100, 50, Cut::None)]);
    let path = Path::from_node(0, &solved).expect("root path");
    assert!(path.is_empty());
    assert_eq!(resolve_guillotine(&path, plate(), true), Point::new(0, 0));

    let solved = non_guillotine(2, &[(0, 100, 50, Cut::None)]);
    let path = Path::from_node(0, &solved).expect("root path");
    assert_eq!(resolve_non_guillotine(&path, plate(), &solved), Ok(Point::new(0, 0)));
}

#[test]
fn center_without_sibling_geometry_is_inconsistent() {
    let solved = non_guillotine(1, &[(0, 100, 50, Cut::Split), (5, 40, 10, Cut::None)]);
    let path = Path::from_node(5, &solved).expect("path builds");
    assert_eq!(
        resolve_non_guillotine(&path, plate(), &solved),
        Err(CutError::InconsistentGeometry { node: 5, sibling: 1 })
    );
}

#[test]
fn full_pipeline_over_two_level_layout() {
    let solved = two_level_guillotine();
    let occupancy = floating_cuts::Occupancy::from_pairs(2, solved.len(), [(0, 13), (0, 14), (1, 4)])
        .expect("occupancy");

    let paths = build_paths(&occupancy, &solved).expect("paths build");
    for (_, node, path) in paths.iter() {
        assert_eq!(path.len(), level::<GuillotinePosition>(node));
    }

    let origins = resolve_all(&paths, plate(), false, &solved).expect("resolves");
    assert_eq!(
        origins,
        vec![Point::new(0, 20), Point::new(60, 20), Point::new(0, 0)]
    );

    let placements = Placement::from_paths(&paths, &origins);
    assert_eq!(placements[2].item, 1);
    assert_eq!(placements[2].node, 4);
    assert_eq!(placements[2].repetitions, 1);
}

#[test]
fn decisions_thresholded_into_paths() {
    let solved = two_level_guillotine();
    let mut row = vec![0.0; solved.len()];
    row[13] = 0.9999;
    row[14] = 0.4;
    let occupancy = floating_cuts::Occupancy::from_decisions(&[row]);

    let paths = build_paths(&occupancy, &solved).expect("paths build");
    assert_eq!(paths.nodes(), &[13]);
}

#[test]
fn missing_geometry_on_path_is_reported() {
    let solved = guillotine(2, &[(0, 100, 50, Cut::Vertical), (5, 10, 10, Cut::None)]);
    let occupancy = one_item_in(&[5], solved.len());
    assert_eq!(
        build_paths(&occupancy, &solved),
        Err(CutError::MissingGeometry { node: 1 })
    );
}
