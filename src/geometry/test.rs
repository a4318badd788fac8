use super::*;

#[test]
fn conv_output_side_is_input_minus_filter_plus_one() {
    assert_eq!(conv_output_side(4, 2), 3);
    assert_eq!(conv_output_side(28, 5), 24);
    assert_eq!(conv_output_side(5, 5), 1);
    assert_eq!(conv_output_side(4, 5), 0);
    assert_eq!(conv_output_side(4, 0), 0);
}

#[test]
fn max_pool_output_side_keeps_windows_inside_the_plane() {
    assert_eq!(max_pool_output_side(3, 2, 1), 2);
    assert_eq!(max_pool_output_side(24, 2, 2), 12);
    // Trailing rows that do not fill a window are dropped
    assert_eq!(max_pool_output_side(5, 2, 2), 2);
    assert_eq!(max_pool_output_side(6, 3, 2), 2);
    assert_eq!(max_pool_output_side(1, 1, 1), 1);
    assert_eq!(max_pool_output_side(3, 4, 1), 0);
    assert_eq!(max_pool_output_side(3, 2, 0), 0);
}

#[test]
fn every_pooling_read_stays_inside_the_plane() {
    for plane in 1..16 {
        for window in 1..=plane {
            for stride in 1..5 {
                let out = max_pool_output_side(plane, window, stride);
                assert!(out >= 1);
                // Last window ends inside the plane, the next one would not
                assert!((out - 1) * stride + window - 1 < plane);
                assert!(out * stride + window - 1 >= plane);
            }
        }
    }
}

#[test]
fn geometry_derives_output_sides() {
    let geometry = ConvGeometry::new(28, 5, 6, 2, 2).unwrap();
    assert_eq!(geometry.input_side(), 28);
    assert_eq!(geometry.filter_side(), 5);
    assert_eq!(geometry.num_kernels(), 6);
    assert_eq!(geometry.pool_window(), 2);
    assert_eq!(geometry.pool_stride(), 2);
    assert_eq!(geometry.conv_output_side(), 24);
    assert_eq!(geometry.pool_output_side(), 12);
    assert_eq!(geometry.num_in(), 28 * 28);
    assert_eq!(geometry.num_out(), 6 * 12 * 12);
    assert_eq!(geometry.num_weights(), 6 * 26);
    assert!(geometry.check_extents(24, 12).is_ok());
}

#[test]
fn geometry_of_filter_as_large_as_input_is_a_single_position() {
    let geometry = ConvGeometry::new(3, 3, 1, 1, 1).unwrap();
    assert_eq!(geometry.conv_output_side(), 1);
    assert_eq!(geometry.pool_output_side(), 1);
}

#[test]
fn geometry_rejects_zero_extents() {
    assert_eq!(
        ConvGeometry::new(0, 1, 1, 1, 1),
        Err(GeometryError::ZeroExtent { name: "input side" })
    );
    assert_eq!(
        ConvGeometry::new(4, 2, 0, 1, 1),
        Err(GeometryError::ZeroExtent {
            name: "kernel count"
        })
    );
    assert_eq!(
        ConvGeometry::new(4, 2, 1, 2, 0),
        Err(GeometryError::ZeroExtent {
            name: "max-pool stride"
        })
    );
}

#[test]
fn geometry_rejects_oversized_filter_and_window() {
    assert_eq!(
        ConvGeometry::new(4, 5, 1, 1, 1),
        Err(GeometryError::FilterExceedsInput {
            filter: 5,
            input: 4
        })
    );
    assert_eq!(
        ConvGeometry::new(4, 2, 1, 4, 1),
        Err(GeometryError::WindowExceedsPlane {
            window: 4,
            plane: 3
        })
    );
}

#[test]
fn mismatched_extents_are_reported() {
    let geometry = ConvGeometry::new(4, 2, 1, 2, 1).unwrap();
    let err = geometry.check_extents(3, 3).unwrap_err();
    assert_eq!(
        err,
        GeometryError::ExtentMismatch {
            name: "max-pool output side",
            expected: 2,
            actual: 3
        }
    );
    assert_eq!(err.to_string(), "max-pool output side is 3, expected 2");
    assert!(geometry.check_extents(4, 2).is_err());
}

#[test]
fn geometry_displays_the_layer_chain() {
    let geometry = ConvGeometry::new(4, 2, 1, 2, 1).unwrap();
    assert_eq!(
        geometry.to_string(),
        "4x4 -> conv 2x2 (1 kernels) -> 3x3 -> max-pool 2x2/1 -> 2x2"
    );
}
