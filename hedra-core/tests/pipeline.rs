use hedra_core::math::{vector4_transform, Vector3, Vector4};
use hedra_core::projection::{projection, src_to_srt, sru_to_src, WorldReference};
use hedra_core::{Camera, Rect};

fn reference_chain() -> WorldReference {
    let camera = Camera::new(
        Vector3::new(25.0, 15.0, 80.0),
        Vector3::new(20.0, 10.0, 25.0),
        Vector3::new(0.0, 1.0, 0.0),
        40.0,
    );
    WorldReference::new(
        &camera,
        Rect::new(0.0, 0.0, 16.0, 12.0),
        Rect::new(0.0, 0.0, 319.0, 239.0),
    )
}

#[test]
fn view_matrix_first_element() {
    let chain = reference_chain();
    assert!((chain.view[(0, 0)] - 0.995893).abs() < 1e-4);
}

#[test]
fn composed_matrix_maps_reference_vertex() {
    let chain = reference_chain();
    let p = vector4_transform(Vector4::new(21.2, 0.7, 42.3, 1.0), chain.matrix());
    assert!((p.x - -7.40073).abs() < 1e-4, "x = {}", p.x);
    assert!((p.y - 448.77577).abs() < 1e-4, "y = {}", p.y);
    assert!((p.z - -39.02426).abs() < 1e-4, "z = {}", p.z);
    assert!((p.w - 0.97560).abs() < 1e-4, "w = {}", p.w);
}

#[test]
fn composition_order_is_viewport_projection_view() {
    let chain = reference_chain();
    let camera = Camera::new(
        Vector3::new(25.0, 15.0, 80.0),
        Vector3::new(20.0, 10.0, 25.0),
        Vector3::new(0.0, 1.0, 0.0),
        40.0,
    );
    let point = Vector4::new(21.2, 0.7, 42.3, 1.0);
    let step = vector4_transform(point, sru_to_src(&camera));
    let step = vector4_transform(step, projection(40.0));
    let step = vector4_transform(
        step,
        src_to_srt(Rect::new(0.0, 0.0, 16.0, 12.0), Rect::new(0.0, 0.0, 319.0, 239.0), true),
    );
    let composed = vector4_transform(point, chain.matrix());
    assert!((step - composed).norm() < 1e-9);
}
