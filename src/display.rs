//! Windowed driver for a [`RingSet`] backed by a [`PixelCanvas`].
//!
//! Opens a fixed-size window, lets the winit event loop act as the periodic
//! timer, and blits the canvas frame after every tick.

use pixels::{Pixels, SurfaceTexture};
use std::time::Instant;
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use crate::{DrawSurface, PixelCanvas, RingSet, RingSetError};

impl RingSet<PixelCanvas> {
    /// Run until the window is closed. The schedule set up with
    /// [`RingSet::start`] keeps ticking inside the event loop; a set that
    /// was never started just shows its cleared canvas.
    pub fn show(mut self, title: &str) -> Result<(), RingSetError> {
        let width = self.surface().width();
        let height = self.surface().height();

        let event_loop = EventLoop::new()?;
        let window = WindowBuilder::new()
            .with_title(title)
            .with_inner_size(LogicalSize::new(width as f64, height as f64))
            .with_resizable(false)
            .build(&event_loop)?;
        let window = std::sync::Arc::new(window);

        let size = window.inner_size();
        let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
        let mut pixels = Pixels::new(width, height, surface_texture)?;

        let window_clone = window.clone();
        let mut first_frame = true;

        event_loop.run(move |event, window_target| {
            window_target.set_control_flow(ControlFlow::Poll);
            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => {
                        window_target.exit();
                    }
                    WindowEvent::RedrawRequested => {
                        pixels.frame_mut().copy_from_slice(self.surface().frame());
                        if let Err(err) = pixels.render() {
                            log::error!("render failed: {err}");
                            window_target.exit();
                        }
                    }
                    _ => {}
                },
                Event::AboutToWait => {
                    if self.poll(Instant::now()) || first_frame {
                        first_frame = false;
                        window_clone.request_redraw();
                    }
                }
                _ => {}
            }
        })?;

        Ok(())
    }
}
