//! Demo host: builds a small scene (a shader group over two quads) and runs
//! the init/update/draw lifecycle against the headless backend.

use scene_engine::prelude::*;

fn builtin_shader() -> ShaderProgram {
    ShaderProgram::new(
        include_str!("../shaders/basic.vert"),
        include_str!("../shaders/basic.frag"),
    )
}

fn load_shader(config: &SceneConfig) -> ShaderProgram {
    match &config.shader {
        Some(paths) => match ShaderSource::from_config(paths) {
            Ok(source) => ShaderProgram::from_source(source),
            Err(err) => {
                log::error!("falling back to built-in shaders: {}", err);
                builtin_shader()
            }
        },
        None => builtin_shader(),
    }
}

fn main() {
    scene_engine::foundation::logging::init();

    let config = match SceneConfig::from_toml_file("config.toml") {
        Ok(config) => config,
        Err(err) => {
            log::debug!("using default config ({})", err);
            SceneConfig::default()
        }
    };

    let mut scene = Scene::new();

    let lit = scene.spawn_with_payload("lit", Payload::ShaderProgram(load_shader(&config)));
    scene.attach(scene.root(), lit).expect("attach shader group");

    let red = ImageData::solid_color(64, 64, [200, 60, 60, 255]);
    let left = scene.spawn_with_payload(
        "left",
        Payload::TexturedQuad(TexturedQuad::from_image(red).with_params(config.texture)),
    );
    // Loaded from disk; a missing file logs an error and the quad draws
    // untextured, which is exactly the behavior worth demonstrating.
    let right = scene.spawn_with_payload(
        "right",
        Payload::TexturedQuad(TexturedQuad::new("assets/right.png")),
    );
    scene.attach(lit, left).expect("attach left quad");
    scene.attach(lit, right).expect("attach right quad");
    scene.set_translation_xy(left, -1.5, 0.0);
    scene.set_translation_xy(right, 1.5, 0.0);
    scene.set_uniform_scale(left, 0.5);

    let mut backend = HeadlessBackend::new();
    scene.init(&mut backend);
    log::info!("shader group program: {:?}", scene.shader_program(lit));

    for frame in 0..3 {
        scene.set_rotation(left, frame as f32 * 30.0, Vec3::z());
        scene.update();
        scene.draw(&mut backend);
    }

    println!(
        "{} | {} backend calls, {} quads drawn",
        scene.node(lit).expect("lit node"),
        backend.calls().len(),
        backend.drawn_quads(),
    );
}
