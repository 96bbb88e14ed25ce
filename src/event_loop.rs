use {
    crate::{
        layout::{self, DiskSpec},
        render_state::RenderState,
        scene::Scene,
    },
    log::{error, info, warn},
    nalgebra::Point2,
    std::{sync::mpsc::Receiver, time::Instant},
    winit::{
        event::{ElementState, Event, KeyboardInput, MouseButton, VirtualKeyCode, WindowEvent},
        event_loop::{ControlFlow, EventLoop},
        window::{Fullscreen, Window},
    },
};

/// Frame counter for the window title.
struct FrameRate {
    frames: u32,
    since: Instant,
}

impl FrameRate {
    fn new() -> Self {
        FrameRate { frames: 0, since: Instant::now() }
    }

    /// Counts a frame, returning frames per second about once a second.
    fn tick(&mut self) -> Option<f32> {
        self.frames += 1;
        let elapsed = self.since.elapsed().as_secs_f32();
        if elapsed < 1.0 {
            return None;
        }
        let fps = self.frames as f32 / elapsed;
        *self = FrameRate::new();
        Some(fps)
    }
}

pub fn start(
    window: Window,
    event_loop: EventLoop<()>,
    layout_receiver: Receiver<Vec<DiskSpec>>,
    mut scene: Scene,
    mut render_state: RenderState,
) -> Result<(), Box<dyn std::error::Error>> {
    let start = Instant::now();
    let mut frame_rate = FrameRate::new();
    let mut fullscreen = false;
    let mut cursor = Point2::origin();
    let mut drag_start: Option<Point2<f32>> = None;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;
        match event {
            Event::RedrawRequested(_) => {
                // every disk is stepped exactly once before each draw
                scene.update(start.elapsed().as_secs_f64());
                render_state.sync_disks(scene.disks());
                render_state.update();
                match render_state.render() {
                    Ok(_) => {}
                    // The system is out of memory, we should probably quit
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        error!("out of GPU memory");
                        *control_flow = ControlFlow::Exit
                    }
                    // Lost surfaces get reconfigured, the rest resolve by the next frame
                    Err(wgpu::SurfaceError::Lost) => render_state.resize(render_state.size),
                    Err(e) => warn!("render error: {:?}", e),
                }
                if let Some(fps) = frame_rate.tick() {
                    if !fullscreen {
                        let size = window.inner_size();
                        window.set_title(&format!(
                            "gateway {} X {} fps: {:.0}",
                            size.width, size.height, fps
                        ));
                    }
                }
            }
            Event::MainEventsCleared => {
                window.request_redraw();
            }
            Event::WindowEvent { ref event, window_id } if window_id == window.id() => {
                match event {
                    WindowEvent::CloseRequested
                    | WindowEvent::KeyboardInput {
                        input:
                            KeyboardInput {
                                state: ElementState::Pressed,
                                virtual_keycode: Some(VirtualKeyCode::Escape),
                                ..
                            },
                        ..
                    } => *control_flow = ControlFlow::Exit,
                    WindowEvent::KeyboardInput {
                        input:
                            KeyboardInput {
                                state: ElementState::Pressed,
                                virtual_keycode: Some(VirtualKeyCode::F),
                                ..
                            },
                        ..
                    } => {
                        fullscreen = !fullscreen;
                        info!("fullscreen: {}", fullscreen);
                        window.set_fullscreen(fullscreen.then(|| Fullscreen::Borderless(None)));
                        window.set_cursor_visible(!fullscreen);
                    }
                    WindowEvent::KeyboardInput { .. } => {
                        render_state.input(event);
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        cursor = render_state.screen_to_world(position.x, position.y);
                        scene.set_viewer(Some(cursor));
                    }
                    WindowEvent::MouseInput { state, button: MouseButton::Left, .. } => {
                        match state {
                            ElementState::Pressed => drag_start = Some(cursor),
                            ElementState::Released => {
                                if let Some(center) = drag_start.take() {
                                    let spec = DiskSpec::dragged(center, cursor);
                                    // pasteable into a layout file
                                    info!("{}", layout::format_spec(&spec));
                                    scene.add_disk(&spec);
                                }
                            }
                        }
                    }
                    WindowEvent::CursorLeft { .. } => {
                        scene.set_viewer(None);
                    }
                    WindowEvent::Resized(physical_size) => {
                        render_state.resize(*physical_size);
                    }
                    WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
                        render_state.resize(**new_inner_size);
                    }
                    evt => {
                        warn!("Unhandled {:?}", evt);
                    }
                }
            }
            Event::UserEvent(()) => {
                if let Ok(specs) = layout_receiver.try_recv() {
                    info!("reloading layout with {} disks", specs.len());
                    scene.set_layout(&specs);
                }
            }
            _ => {}
        }
    })
}
