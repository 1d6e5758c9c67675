use hedra_core::document::{from_json, to_json};
use hedra_core::math::vector3_equals;
use hedra_core::{Material, Mesh, PipelineModel, Scene, ShadingModel};

fn sample_scene() -> Scene {
    let mut scene = Scene::new(120, 90);
    scene.settings.pipeline = PipelineModel::Smith;
    scene.settings.shading = ShadingModel::Gouraud;

    let cube = scene.add_mesh(Mesh::cube(1.5).expect("cube"));
    let sphere = scene.add_mesh(Mesh::uv_sphere(1.0, 10, 6).expect("sphere"));
    scene.mesh_mut(sphere).expect("exists").material = Material::grey(0.2, 0.6, 0.9, 32.0);
    scene
        .translate_mesh(cube, hedra_core::math::Vector3::new(-2.0, 0.5, 0.0))
        .expect("exists");
    scene.select(sphere).expect("exists");
    scene
}

#[test]
fn meshes_survive_json_round_trip() {
    let original = sample_scene();
    let json = to_json(&original.to_document()).expect("serialize");
    let restored = Scene::from_document(&from_json(&json).expect("parse")).expect("load");

    assert_eq!(restored.meshes().len(), original.meshes().len());
    for (a, b) in original.meshes().iter().zip(restored.meshes()) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.name, b.name);
        assert_eq!(a.num_vertices(), b.num_vertices());
        for (va, vb) in a.vertices().iter().zip(b.vertices()) {
            assert_eq!(va.id, vb.id);
            assert!(vector3_equals(va.point(), vb.point()));
        }
        let faces_a: Vec<_> = a.faces().iter().map(|f| f.vertices.clone()).collect();
        let faces_b: Vec<_> = b.faces().iter().map(|f| f.vertices.clone()).collect();
        assert_eq!(faces_a, faces_b);

        assert!(vector3_equals(a.material.ka, b.material.ka));
        assert!(vector3_equals(a.material.kd, b.material.kd));
        assert!(vector3_equals(a.material.ks, b.material.ks));
        assert!((a.material.shininess - b.material.shininess).abs() < 1e-12);
    }
}

#[test]
fn document_survives_second_trip_unchanged() {
    let doc = sample_scene().to_document();
    let again = Scene::from_document(&doc).expect("load").to_document();
    assert_eq!(doc, again);
}

#[test]
fn restored_scene_renders_the_same() {
    let mut original = sample_scene();
    let mut restored = Scene::from_document(&original.to_document()).expect("load");
    let a = original.render().color_buffer().to_vec();
    let b = restored.render().color_buffer().to_vec();
    assert_eq!(a, b);
}
