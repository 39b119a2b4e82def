use std::sync::Arc;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::camera::OrbitCamera;
use crate::cli::Cli;
use crate::frame::FrameClock;
use crate::renderer::DemoRenderer;

const INITIAL_WIDTH: u32 = 800;
const INITIAL_HEIGHT: u32 = 600;

/// Drag state for the orbit camera. Presses consumed by the panel are
/// ignored, but releases always clear, so a drag that ends over the
/// panel cannot leave a button stuck down.
#[derive(Debug, Default, Clone, Copy)]
struct PointerButtons {
    left: bool,
    right: bool,
}

impl PointerButtons {
    fn apply(&mut self, button: MouseButton, pressed: bool, consumed: bool) {
        let down = pressed && !consumed;
        match button {
            MouseButton::Left => self.left = down,
            MouseButton::Right => self.right = down,
            _ => {}
        }
    }
}

/// winit application shell: owns the window, the renderer, the camera,
/// and the frame clock. The per-frame loop lives in `redraw`.
pub struct App {
    cli: Cli,
    window: Option<Arc<Window>>,
    renderer: Option<DemoRenderer>,
    camera: OrbitCamera,
    clock: FrameClock,

    buttons: PointerButtons,
    last_cursor: Option<(f64, f64)>,
}

impl App {
    pub fn new(cli: Cli) -> Self {
        let config = cli.demo.config();
        let mut camera = OrbitCamera::from_eye(config.camera.eye, config.camera.target);
        if let Some((min_polar, max_polar)) = config.camera.polar_limits {
            camera.set_polar_limits(min_polar, max_polar);
        }
        camera.set_aspect(INITIAL_WIDTH as f32, INITIAL_HEIGHT as f32);

        Self {
            cli,
            window: None,
            renderer: None,
            camera,
            clock: FrameClock::new(),
            buttons: PointerButtons::default(),
            last_cursor: None,
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(renderer)) = (&self.window, &mut self.renderer) else {
            return;
        };
        let frame = self.clock.tick();

        self.camera.update(frame.delta);

        match renderer.render(window, &self.camera, &frame, self.clock.fps()) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                renderer.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("out of GPU memory, exiting");
                event_loop.exit();
            }
            Err(err) => log::warn!("surface error: {err:?}"),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let config = self.cli.demo.config();
        let attributes = Window::default_attributes()
            .with_title(format!("shader-lab: {}", config.name))
            .with_inner_size(LogicalSize::new(INITIAL_WIDTH, INITIAL_HEIGHT));

        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                log::error!("failed to create window: {err}");
                event_loop.exit();
                return;
            }
        };

        let renderer = pollster::block_on(DemoRenderer::new(
            window.clone(),
            config,
            self.cli.assets.clone(),
            self.cli.no_ui,
        ));
        match renderer {
            Ok(renderer) => {
                self.renderer = Some(renderer);
                self.window = Some(window);
            }
            Err(err) => {
                log::error!("failed to initialize renderer: {err}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // The panel sees events first; pointer input it consumes never
        // reaches the orbit camera.
        let consumed = match (&self.window, &mut self.renderer) {
            (Some(window), Some(renderer)) => renderer.handle_event(window, &event),
            _ => false,
        };

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => event_loop.exit(),

            WindowEvent::Resized(physical_size) => {
                if let (Some(window), Some(renderer)) = (&self.window, &mut self.renderer) {
                    let scale_factor = window.scale_factor();
                    let logical = physical_size.to_logical::<f64>(scale_factor);
                    let (width, height) = (logical.width.round() as u32, logical.height.round() as u32);
                    renderer.resize(width, height, scale_factor);
                    self.camera.set_aspect(width as f32, height as f32);
                }
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if let (Some(window), Some(renderer)) = (&self.window, &mut self.renderer) {
                    let logical = window.inner_size().to_logical::<f64>(scale_factor);
                    renderer.resize(
                        logical.width.round() as u32,
                        logical.height.round() as u32,
                        scale_factor,
                    );
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                self.buttons
                    .apply(button, state == ElementState::Pressed, consumed);
            }

            WindowEvent::CursorMoved { position, .. } => {
                if let Some((last_x, last_y)) = self.last_cursor {
                    let dx = (position.x - last_x) as f32;
                    let dy = (position.y - last_y) as f32;
                    if !consumed {
                        if self.buttons.left {
                            self.camera.rotate(dx, dy);
                        }
                        if self.buttons.right {
                            self.camera.pan(dx, dy);
                        }
                    }
                }
                self.last_cursor = Some((position.x, position.y));
            }

            WindowEvent::MouseWheel { delta, .. } if !consumed => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 50.0,
                };
                self.camera.zoom(scroll);
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consumed_press_never_starts_a_drag() {
        let mut buttons = PointerButtons::default();
        buttons.apply(MouseButton::Left, true, true);
        assert!(!buttons.left);
    }

    #[test]
    fn release_clears_even_when_consumed() {
        let mut buttons = PointerButtons::default();
        buttons.apply(MouseButton::Left, true, false);
        assert!(buttons.left);
        // Release lands on the panel; the drag still ends.
        buttons.apply(MouseButton::Left, false, true);
        assert!(!buttons.left);
    }

    #[test]
    fn buttons_track_independently() {
        let mut buttons = PointerButtons::default();
        buttons.apply(MouseButton::Left, true, false);
        buttons.apply(MouseButton::Right, true, false);
        buttons.apply(MouseButton::Left, false, false);
        assert!(!buttons.left);
        assert!(buttons.right);
    }
}
