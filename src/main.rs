use clap::Parser;
use log::{error, info};
use winit::{
    dpi::PhysicalSize,
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::{CursorIcon, WindowBuilder},
};

mod colour;
mod config;
mod display;
mod drag;
mod input;
mod mandelbrot;
mod pixel;
mod render;
mod screen;
mod session;
mod sink;
mod viewport;

use config::Config;
use display::Display;
use input::Translator;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = Config::parse();
    info!("{:?}", config);

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title("Mandelbrot")
        .with_inner_size(PhysicalSize::new(config.width, config.height))
        .build(&event_loop)?;

    let mut display = Display::new(&window)?;
    let mut session = config.session().unwrap_or_else(|error| error.exit());
    // The window manager may not honour the requested size.
    session.resize(display.size());

    let mut translator = Translator::default();

    event_loop.run(move |event, _, control_flow| {
        control_flow.set_wait();
        match event {
            Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
                WindowEvent::CloseRequested => {
                    control_flow.set_exit();
                }
                WindowEvent::Resized(size) => {
                    if let Some(size) = screen::Size::try_new(size.width, size.height) {
                        display.resize(size);
                        if session.resize(size) {
                            window.request_redraw();
                        }
                    }
                }
                event => {
                    if let Some(input) = translator.translate(&event) {
                        if session.handle(input) {
                            window.request_redraw();
                        }
                        window.set_cursor_icon(if session.is_dragging() {
                            CursorIcon::Grabbing
                        } else {
                            CursorIcon::Default
                        });
                    }
                }
            },
            Event::RedrawRequested(window_id) if window_id == window.id() => {
                if let Err(err) = session.redraw(&mut display) {
                    error!("{:#}", err);
                    control_flow.set_exit_with_code(1);
                }
            }
            _ => {}
        }
    });
}
