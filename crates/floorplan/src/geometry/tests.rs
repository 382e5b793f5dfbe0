use super::*;
use nalgebra::vector;

#[test]
fn same_points_absorbs_round_off() {
    let a = vector![1.0, 2.0];
    let b = vector![1.0 + 1e-9, 2.0 - 1e-9];
    assert!(same_points(a, b));
    assert!(!same_points(a, vector![1.0, 2.001]));
}

#[test]
fn canonical_order_is_lexicographic() {
    let a = vector![5.0, 0.0];
    let b = vector![0.0, 3.0];
    assert_eq!(min_vertex(a, b), b);
    assert_eq!(order_vertices(a, b), (b, a));
    // vertical segment: ties on x fall back to y
    let c = vector![2.0, 9.0];
    let d = vector![2.0 + 1e-9, 1.0];
    assert_eq!(min_vertex(c, d), d);
}

#[test]
fn position_and_membership_on_segment() {
    let p0 = vector![0.0, 0.0];
    let p1 = vector![10.0, 0.0];
    assert!((point_position_on_segment(p0, p1, vector![2.5, 3.0]) - 0.25).abs() < 1e-12);
    assert!((point_position_on_segment(p1, p0, vector![2.5, 0.0]) - 0.75).abs() < 1e-12);
    assert!(is_point_on_segment(p0, p1, vector![10.0, 0.0]));
    assert!(is_point_on_segment(p0, p1, vector![4.0, 1e-8]));
    assert!(!is_point_on_segment(p0, p1, vector![4.0, 0.1]));
    assert!(!is_point_on_segment(p0, p1, vector![10.5, 0.0]));
}

#[test]
fn crossing_segments_report_point() {
    let hit = classify_segments(
        vector![0.0, 0.0],
        vector![10.0, 10.0],
        vector![0.0, 10.0],
        vector![10.0, 0.0],
    );
    let p = hit.point().expect("crossing");
    assert!(same_points(p, vector![5.0, 5.0]));
}

#[test]
fn touching_point_is_snapped_to_endpoint() {
    // T-junction: q ends exactly in the middle of p
    let hit = classify_segments(
        vector![0.0, 0.0],
        vector![10.0, 0.0],
        vector![4.0, 5.0],
        vector![4.0, 1e-9],
    );
    assert_eq!(hit, SegmentIntersection::Point(vector![4.0, 1e-9]));
}

#[test]
fn parallel_and_disjoint_cases() {
    // parallel, distinct lines
    assert!(classify_segments(
        vector![0.0, 0.0],
        vector![10.0, 0.0],
        vector![0.0, 1.0],
        vector![10.0, 1.0],
    )
    .is_none());
    // same line, separated ranges
    assert!(classify_segments(
        vector![0.0, 0.0],
        vector![1.0, 0.0],
        vector![2.0, 0.0],
        vector![3.0, 0.0],
    )
    .is_none());
    // non-parallel but not reaching each other
    assert!(classify_segments(
        vector![0.0, 0.0],
        vector![1.0, 0.0],
        vector![5.0, -1.0],
        vector![5.0, 1.0],
    )
    .is_none());
}

#[test]
fn colinear_overlap_and_touch() {
    let overlap = classify_segments(
        vector![0.0, 0.0],
        vector![10.0, 0.0],
        vector![15.0, 0.0],
        vector![5.0, 0.0],
    );
    assert_eq!(overlap, SegmentIntersection::Colinear);
    let touch = classify_segments(
        vector![0.0, 0.0],
        vector![0.0, 10.0],
        vector![0.0, 10.0],
        vector![0.0, 20.0],
    );
    assert_eq!(touch, SegmentIntersection::Colinear);
}

#[test]
fn signed_area_orientation() {
    let ccw = [
        vector![0.0, 0.0],
        vector![10.0, 0.0],
        vector![10.0, 10.0],
        vector![0.0, 10.0],
    ];
    assert!((polygon_signed_area(&ccw) - 100.0).abs() < 1e-12);
    let mut cw = ccw;
    cw.reverse();
    assert!((polygon_signed_area(&cw) + 100.0).abs() < 1e-12);
}
