use anyhow::Result;
use glam::Vec2;
use log::{debug, info};
use tokio::runtime::Runtime;

use crate::config::Config;
use crate::core::FrameIterator;
use crate::map::MapState;
use crate::scene::{SceneController, SceneGraph, SceneStatus};

/// Frame rate of the window-less loop
pub const HEADLESS_FPS: u32 = 60;

/// Runs the full pipeline without a window and logs the character's walk.
///
/// Returns the final scene status; pipeline failures are reported through it
/// rather than as an error.
pub fn run(config: &Config, runtime: &Runtime) -> Result<SceneStatus> {
    let (width, height) = config.window_size;
    let mut controller = config.scene_controller(Vec2::new(width as f32, height as f32));
    let mut map = MapState::new(config.map.clone());

    runtime.block_on(prepare(config, &mut controller, &mut map))?;

    if !controller.is_animating() {
        info!("Nothing to animate: {}", controller.status().label());
        return Ok(controller.status().clone());
    }

    walk(&mut controller, config.frames);
    controller.teardown();

    Ok(SceneStatus::Animating)
}

/// Fetch the route and the model, in that order, and hand both to the controller
async fn prepare(config: &Config, controller: &mut SceneController<SceneGraph>, map: &mut MapState) -> Result<()> {
    let fetcher = config.route_fetcher()?;
    let loader = config.model_loader()?;

    let route = match fetcher.fetch(&config.origin, &config.destination).await {
        Ok(route) => route,
        Err(e) => {
            controller.report_failure(&e);
            return Ok(());
        }
    };

    let ticket = controller.set_route(&route, map);
    let result = loader.load(&config.model).await;
    if let Ok(model) = &result {
        info!("Model ready: {} triangles", model.triangle_count());
    }
    controller.attach_model(ticket, result);

    Ok(())
}

/// Ticks the controller at a fixed rate, logging the pose once per second
fn walk(controller: &mut SceneController<SceneGraph>, frames: u64) {
    info!("Walking for {} frames", frames);

    for frame in FrameIterator::with_rate(HEADLESS_FPS).take(frames as usize) {
        controller.tick(frame.instant);
        controller.scene_mut().take_redraw_request();

        let Some(character) = controller.character() else {
            continue;
        };
        if frame.number % HEADLESS_FPS as u64 == 0 {
            let progress = controller.pose_at(frame.instant).map(|p| p.progress).unwrap_or(0.0);
            info!(
                "t={:.1}s progress={:.3} position=({:.1}, {:.1}, {:.1})",
                frame.time, progress, character.position.x, character.position.y, character.position.z
            );
        } else {
            debug!("frame {} dt={:.4}", frame.number, frame.delta);
        }
    }
}
