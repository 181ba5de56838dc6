//! Simple ray tracer example.
//!
//! Builds a small scene in code (mirror floor, glass ball, a quadric and a
//! spotlight) and saves it as a plain PPM.

use lumen_renderer::{
    render, save_image, Camera, Color, DVec3, ImageFormat, Light, Object, Plane, PpmFormat,
    Quadric, RenderConfig, Scene, Sphere, Surface,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Lumen Ray Tracer - Simple Example");
    println!("=================================");

    let start = std::time::Instant::now();
    let scene = build_scene()?;
    println!("Scene built in {:?}", start.elapsed());

    let (width, height) = (640, 480);
    let config = RenderConfig::default().with_parallel(true);

    println!("Rendering {}x{} @ depth {}...", width, height, config.max_depth);

    let start = std::time::Instant::now();
    let image = render(&scene, width, height, &config)?;
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.ppm";
    save_image(filename, &image, ImageFormat::Ppm(PpmFormat::Plain))?;
    println!("Saved to {}", filename);

    Ok(())
}

fn build_scene() -> Result<Scene, Box<dyn std::error::Error>> {
    let camera = Camera::new(
        1.6,
        1.2,
        DVec3::new(0.0, 1.5, -6.0),
        DVec3::new(0.0, -0.15, 1.0),
        DVec3::Y,
        1.5,
    )?;
    let mut scene = Scene::new(camera);

    // Ground
    scene.add_object(Object::new(
        Plane::new(DVec3::ZERO, DVec3::Y)?,
        Surface::new(Color::new(0.6, 0.6, 0.6)).with_reflectivity(0.3),
    ));

    // Back wall
    scene.add_object(Object::new(
        Plane::new(DVec3::new(0.0, 0.0, 8.0), -DVec3::Z)?,
        Surface::new(Color::new(0.3, 0.4, 0.7)),
    ));

    // Glass ball in front, red ball behind it
    scene.add_object(Object::new(
        Sphere::new(DVec3::new(-0.8, 1.0, 0.0), 1.0)?,
        Surface::new(Color::ONE)
            .with_specular(Color::ONE, 80.0)
            .with_refraction(0.8, 1.5),
    ));
    scene.add_object(Object::new(
        Sphere::new(DVec3::new(1.2, 0.7, 2.5), 0.7)?,
        Surface::new(Color::new(0.8, 0.15, 0.1)).with_specular(Color::splat(0.6), 30.0),
    ));

    // Ellipsoid 4(x - 2.5)² + (y - 1)² + 4(z - 4)² = 1 standing on the floor
    scene.add_object(Object::new(
        Quadric {
            a: 4.0,
            b: 1.0,
            c: 4.0,
            g: -20.0,
            h: -2.0,
            i: -32.0,
            j: 89.0,
            ..Default::default()
        },
        Surface::new(Color::new(0.2, 0.7, 0.3)).with_reflectivity(0.2),
    ));

    scene.add_light(Light::point(
        DVec3::new(-4.0, 6.0, -3.0),
        Color::splat(0.9),
        [1.0, 0.0, 0.005],
    ));
    scene.add_light(
        Light::point(DVec3::new(3.0, 5.0, 0.0), Color::new(1.0, 0.9, 0.7), [1.0, 0.02, 0.0])
            .with_spotlight(DVec3::new(-0.3, -1.0, 0.4), 40.0, 2.0),
    );

    println!("Created {} objects, {} lights", scene.objects.len(), scene.lights.len());
    Ok(scene)
}
