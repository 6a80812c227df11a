use anyhow::Result;
use log::{debug, error, info};
use std::sync::Arc;
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

mod core;
mod engine;
mod game;

use crate::core::config::{GameConfig, CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::engine::assets::AssetLoader;
use crate::engine::game_loop::GameLoop;
use crate::engine::input::{Action, InputManager};
use crate::engine::renderer::{Canvas, Renderer};
use crate::game::{stage, Stage};

/// Ticks between frame rate log lines
const FPS_LOG_TICKS: u64 = 600;

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Aozora...");

    let config = GameConfig::from_env();
    let (width, height) = config.window_size();

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Aozora")
            .with_inner_size(winit::dpi::LogicalSize::new(width, height))
            .with_resizable(true)
            .build(&event_loop)?,
    );

    info!("Window created successfully");

    let mut renderer = pollster::block_on(Renderer::new(
        window.clone(),
        CANVAS_WIDTH as u32,
        CANVAS_HEIGHT as u32,
    ))?;
    let mut canvas = Canvas::new(CANVAS_WIDTH as u32, CANVAS_HEIGHT as u32);

    let loader = AssetLoader::new(&config.asset_dir);
    info!("Loading assets from {}", loader.base_path().display());
    let mut stage = Stage::new(&config, &loader, &mut fastrand::Rng::new())?;
    let mut input = InputManager::default();
    let mut game_loop = GameLoop::new();

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    info!("Close requested, shutting down...");
                    elwt.exit();
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    input.process_keyboard_event(&event);

                    if input.just_pressed(Action::Quit) {
                        info!("Quit requested, shutting down...");
                        elwt.exit();
                    } else if input.just_pressed(Action::Pause) {
                        game_loop.toggle_pause();
                        if game_loop.is_paused() {
                            stage::draw_pause_overlay(&mut canvas);
                            window.request_redraw();
                        }
                    }
                    input.update();
                }
                WindowEvent::Focused(false) => {
                    input.reset();
                }
                WindowEvent::Resized(physical_size) => {
                    info!("Window resized to {:?}", physical_size);
                    renderer.resize(physical_size);
                }
                WindowEvent::RedrawRequested => {
                    if game_loop.begin_frame() {
                        stage.update(input.controls());
                        stage.render(&mut canvas);
                        if game_loop.frame_count() % FPS_LOG_TICKS == 0 {
                            debug!(
                                "{} ticks in {:.1}s, {:.1} fps",
                                stage.frame_count(),
                                game_loop.elapsed().as_secs_f32(),
                                game_loop.fps()
                            );
                        }
                    }
                    // Present the last drawn canvas even without a tick so a
                    // paused or resized window keeps its picture
                    if let Err(e) = renderer.present(&canvas) {
                        error!("Render error: {}", e);
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                // Request redraw on next frame
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
