use std::f64::consts::FRAC_PI_2;

use hedra_core::math::Vector3;
use hedra_core::{Mesh, NormalPolicy, PipelineModel, RenderSettings, Rgba, Scene, ShadingModel};

fn lit(scene: &Scene) -> usize {
    scene
        .buffers()
        .color_buffer()
        .iter()
        .filter(|c| !c.is_transparent())
        .count()
}

fn three_objects(settings: RenderSettings) -> Scene {
    let mut scene = Scene::new(96, 72);
    scene.settings = settings;
    scene.camera.position = Vector3::new(4.0, 3.0, 9.0);
    let cube = scene.add_mesh(Mesh::cube(1.5).expect("cube"));
    let pyramid = scene.add_mesh(Mesh::pyramid(1.5, 2.0).expect("pyramid"));
    let sphere = scene.add_mesh(Mesh::uv_sphere(0.8, 12, 8).expect("sphere"));
    scene.translate_mesh(cube, Vector3::new(-2.0, 0.0, 0.0)).expect("exists");
    scene.translate_mesh(sphere, Vector3::new(2.0, 0.0, 0.0)).expect("exists");
    scene.rotate_mesh(pyramid, Vector3::new(0.0, 0.4, 0.0)).expect("exists");
    scene
}

#[test]
fn every_mode_draws_every_object() {
    for pipeline in [PipelineModel::WorldReference, PipelineModel::Smith] {
        for shading in [ShadingModel::Flat, ShadingModel::Gouraud, ShadingModel::Phong] {
            let mut scene = three_objects(RenderSettings {
                pipeline,
                shading,
                ..RenderSettings::default()
            });
            scene.render();
            assert!(lit(&scene) > 0);
            for mesh in &scene.frame().meshes {
                assert!(mesh.faces_drawn > 0, "{:?}/{:?} mesh {}", pipeline, shading, mesh.mesh);
            }
        }
    }
}

#[test]
fn rendering_twice_gives_the_same_frame() {
    let mut scene = three_objects(RenderSettings::high_quality());
    let first: Vec<Rgba> = scene.render().color_buffer().to_vec();
    let second: Vec<Rgba> = scene.render().color_buffer().to_vec();
    assert_eq!(first, second);
}

#[test]
fn pipelines_cover_similar_areas() {
    let mut a = three_objects(RenderSettings {
        pipeline: PipelineModel::WorldReference,
        ..RenderSettings::default()
    });
    let mut b = three_objects(RenderSettings {
        pipeline: PipelineModel::Smith,
        ..RenderSettings::default()
    });
    a.render();
    b.render();
    let (la, lb) = (lit(&a) as f64, lit(&b) as f64);
    assert!((la - lb).abs() / la.max(lb) < 0.05, "{} vs {}", la, lb);
}

#[test]
fn normal_policy_changes_smooth_shading() {
    let settings = RenderSettings {
        shading: ShadingModel::Gouraud,
        ..RenderSettings::default()
    };
    let mut foley = three_objects(settings);
    let mut average = three_objects(settings);
    average.set_normal_policy(NormalPolicy::Average);
    let a = foley.render().color_buffer().to_vec();
    let b = average.render().color_buffer().to_vec();
    assert_ne!(a, b);
}

#[test]
fn ppm_dump_matches_buffer_size() {
    let mut scene = three_objects(RenderSettings::preview());
    let ppm = scene.render().to_ppm();
    let header = format!("P6\n{} {}\n255\n", 96, 72);
    assert_eq!(ppm.len(), header.len() + 96 * 72 * 3);
}

#[test]
fn full_window_quad_fills_every_pixel() {
    for pipeline in [PipelineModel::WorldReference, PipelineModel::Smith] {
        for clipping in [true, false] {
            let mut scene = Scene::new(40, 30);
            scene.settings = RenderSettings {
                pipeline,
                clipping,
                ..RenderSettings::default()
            };
            // Face the camera on +z, far wider than the window.
            let quad = scene.add_mesh(Mesh::plane(200.0, 200.0, 1).expect("plane"));
            scene.rotate_mesh(quad, Vector3::new(FRAC_PI_2, 0.0, 0.0)).expect("exists");

            scene.render();
            assert_eq!(
                lit(&scene),
                40 * 30,
                "{:?} clipping={} left pixels uncovered",
                pipeline,
                clipping
            );
        }
    }
}
