use shader_lab::demo::TimeMode;
use shader_lab::demos::Demo;
use shader_lab::uniforms::UniformSet;

#[test]
fn every_demo_builds_a_config() {
    for demo in Demo::all() {
        let config = demo.config();
        assert!(!config.name.is_empty());
        assert!(
            !config.meshes.is_empty() || config.model.is_some(),
            "demo '{}' has nothing to draw",
            config.name
        );
    }
}

#[test]
fn shaders_expose_both_entry_points() {
    for demo in Demo::all() {
        let config = demo.config();
        assert!(
            config.shader.contains("fn vs_main"),
            "demo '{}' shader is missing vs_main",
            config.name
        );
        assert!(
            config.shader.contains("fn fs_main"),
            "demo '{}' shader is missing fs_main",
            config.name
        );
    }
}

#[test]
fn declared_uniforms_appear_in_the_shader() {
    for demo in Demo::all() {
        let config = demo.config();
        for decl in &config.uniforms {
            assert!(
                config.shader.contains(decl.name),
                "demo '{}' declares {} but its shader never names it",
                config.name,
                decl.name
            );
        }
    }
}

#[test]
fn uniform_names_are_unique_per_demo() {
    for demo in Demo::all() {
        let config = demo.config();
        let mut names: Vec<&str> = config.uniforms.iter().map(|d| d.name).collect();
        names.sort_unstable();
        let before = names.len();
        names.dedup();
        assert_eq!(before, names.len(), "demo '{}' repeats a uniform", config.name);
    }
}

#[test]
fn scaled_time_references_a_declared_uniform() {
    for demo in Demo::all() {
        let config = demo.config();
        if let TimeMode::Scaled { uniform, .. } = config.time {
            let set = UniformSet::new(config.uniforms.clone());
            assert!(
                set.float(uniform).is_some(),
                "demo '{}' scales time by unknown uniform {}",
                config.name,
                uniform
            );
        }
    }
}

#[test]
fn helpers_track_declared_uniforms() {
    for demo in Demo::all() {
        let config = demo.config();
        let set = UniformSet::new(config.uniforms.clone());
        for helper in &config.helpers {
            assert!(
                set.vec3(helper.color_uniform).is_some(),
                "demo '{}' helper color {} is not declared",
                config.name,
                helper.color_uniform
            );
            assert!(
                set.vec3(helper.position_uniform).is_some(),
                "demo '{}' helper position {} is not declared",
                config.name,
                helper.position_uniform
            );
        }
    }
}

#[test]
fn shader_bind_groups_follow_the_fixed_convention() {
    // Group 0 carries frame uniforms, group 1 the demo parameters,
    // group 2 the samplers and textures. A demo with textures but no
    // parameters (fresnel) keeps its textures at group 2; the renderer
    // fills group 1 with an empty group rather than compacting.
    for demo in Demo::all() {
        let config = demo.config();
        let has_params = !config.uniforms.is_empty();
        let has_textures = config.has_textures();

        assert!(
            config.shader.contains("@group(0)"),
            "demo '{}' shader never binds frame uniforms",
            config.name
        );
        assert_eq!(
            config.shader.contains("@group(1)"),
            has_params,
            "demo '{}' shader group 1 usage does not match its parameter declarations",
            config.name
        );
        assert_eq!(
            config.shader.contains("@group(2)"),
            has_textures,
            "demo '{}' shader group 2 usage does not match its texture declarations",
            config.name
        );
    }
}

#[test]
fn model_files_are_gltf_binaries() {
    for demo in Demo::all() {
        let config = demo.config();
        if let Some(model) = &config.model {
            assert!(
                model.file.ends_with(".glb") || model.file.ends_with(".gltf"),
                "demo '{}' references unexpected model file {}",
                config.name,
                model.file
            );
        }
    }
}

#[test]
fn environment_binding_implies_a_background() {
    // The material's environment map is the background cubemap; a demo
    // cannot bind one without loading one.
    for demo in Demo::all() {
        let config = demo.config();
        if config.environment_map {
            assert!(
                config.background.is_some(),
                "demo '{}' binds an environment map without a cubemap",
                config.name
            );
        }
    }
}

#[test]
fn ranged_uniform_defaults_sit_inside_their_range() {
    use shader_lab::uniforms::UniformValue;

    for demo in Demo::all() {
        let config = demo.config();
        for decl in &config.uniforms {
            let Some(range) = decl.range else { continue };
            match decl.value {
                UniformValue::Float(v) => {
                    assert!(
                        v >= range.min && v <= range.max,
                        "demo '{}' default for {} is outside its range",
                        config.name,
                        decl.name
                    );
                }
                UniformValue::Vec3(v) => {
                    for component in v.to_array() {
                        assert!(component >= range.min && component <= range.max);
                    }
                }
                UniformValue::Color(_) => {}
            }
        }
    }
}
