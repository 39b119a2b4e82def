use crate::uniforms::{UniformSet, UniformValue};

/// Draws the parameter panel: one widget per ranged/colored uniform,
/// grouped into collapsing sections. Edits land in the uniform set before
/// this function returns, so the next packed upload sees them.
pub fn controls_window(ctx: &egui::Context, demo_name: &str, uniforms: &mut UniformSet) {
    let has_controls = uniforms
        .entries()
        .iter()
        .any(|e| e.decl.range.is_some() || matches!(e.decl.value, UniformValue::Color(_)));
    if !has_controls {
        return;
    }

    // Consecutive entries sharing a group render under one section.
    let mut runs: Vec<(Option<&'static str>, Vec<usize>)> = Vec::new();
    for (index, entry) in uniforms.entries().iter().enumerate() {
        match runs.last_mut() {
            Some((group, indices)) if *group == entry.decl.group => indices.push(index),
            _ => runs.push((entry.decl.group, vec![index])),
        }
    }

    egui::Window::new(demo_name)
        .default_pos(egui::pos2(10.0, 80.0))
        .resizable(false)
        .show(ctx, |ui| {
            for (group, indices) in runs {
                match group {
                    Some(name) => {
                        egui::CollapsingHeader::new(name)
                            .default_open(true)
                            .show(ui, |ui| {
                                for index in indices {
                                    widget_for(ui, uniforms, index);
                                }
                            });
                    }
                    None => {
                        for index in indices {
                            widget_for(ui, uniforms, index);
                        }
                    }
                }
            }
        });
}

fn widget_for(ui: &mut egui::Ui, uniforms: &mut UniformSet, index: usize) {
    let entry = &mut uniforms.entries_mut()[index];
    let name = entry.decl.name;
    let range = entry.decl.range;

    match &mut entry.decl.value {
        UniformValue::Float(value) => {
            if let Some(range) = range {
                ui.add(
                    egui::Slider::new(value, range.min..=range.max)
                        .step_by(range.step as f64)
                        .clamping(egui::SliderClamping::Always)
                        .text(name),
                );
            }
        }
        UniformValue::Color(rgb) => {
            ui.horizontal(|ui| {
                ui.color_edit_button_rgb(rgb);
                ui.label(name);
            });
        }
        UniformValue::Vec3(value) => {
            if let Some(range) = range {
                ui.label(name);
                for (axis, component) in ["x", "y", "z"].iter().zip([
                    &mut value.x,
                    &mut value.y,
                    &mut value.z,
                ]) {
                    ui.add(
                        egui::Slider::new(component, range.min..=range.max)
                            .step_by(range.step as f64)
                            .clamping(egui::SliderClamping::Always)
                            .text(*axis),
                    );
                }
            }
        }
    }
}

/// FPS readout in the window corner.
pub fn fps_overlay(ctx: &egui::Context, fps: f32) {
    egui::Window::new("FPS")
        .title_bar(false)
        .resizable(false)
        .fixed_pos(egui::pos2(10.0, 10.0))
        .frame(egui::Frame::NONE)
        .show(ctx, |ui| {
            ui.label(
                egui::RichText::new(format!("{:.0}", fps))
                    .size(32.0)
                    .color(egui::Color32::from_rgb(74, 158, 255)),
            );
            ui.label(
                egui::RichText::new("FPS")
                    .size(12.0)
                    .color(egui::Color32::GRAY),
            );
        });
}
