//! Interactive SDL window that shows the live render and lets the user fly
//! the camera around.

use std::error::Error;

use sdl2::{event::Event, keyboard::Keycode, pixels::PixelFormatEnum, rect::Rect};

use crate::{
    frame::BYTES_PER_PIXEL, render::render_into, vector, Camera, CameraConfig, FrameBuffer,
    Hit, RenderOptions,
};

const MOUSE_SENSITIVITY: f64 = 0.12;
const MOVEMENT_SPEED: f64 = 0.05;
const MAX_PITCH: f64 = 89.0;
const FRAME_WAIT_MS: u32 = 16;

pub fn run<W>(config: CameraConfig, world: &W, options: RenderOptions) -> Result<(), Box<dyn Error>>
where
    W: Hit + Sync + ?Sized,
{
    let mut camera = Camera::new(config);
    let (width, height) = (camera.image_width(), camera.image_height());

    let sdl2_context = sdl2::init()?;
    let mut canvas = sdl2_context
        .video()?
        .window("raytracer", width as u32, height as u32)
        .position_centered()
        .build()?
        .into_canvas()
        .build()?;
    let texture_creator = canvas.texture_creator();
    let mut texture = texture_creator.create_texture_streaming(
        PixelFormatEnum::RGB24,
        width as u32,
        height as u32,
    )?;
    let mut events = sdl2_context.event_pump()?;

    let mut frame = FrameBuffer::new(width, height)?;
    let forward = vector::unit(camera.config().look_at - camera.config().look_from);
    let mut pitch = forward.y.asin().to_degrees();
    let mut yaw = forward.z.atan2(forward.x).to_degrees();
    let mut dirty = true;

    'main: loop {
        if dirty {
            render_into(&camera, world, &options, frame.pixel_data_mut())?;
            texture.update(
                Rect::new(0, 0, width as u32, height as u32),
                frame.pixel_data(),
                width * BYTES_PER_PIXEL,
            )?;
            canvas.copy(&texture, None, None)?;
            canvas.present();
            dirty = false;
        }

        let Some(event) = events.wait_event_timeout(FRAME_WAIT_MS) else {
            continue;
        };
        let mut config = camera.config().clone();
        let (right, up, back) = camera.basis();
        match event {
            Event::Quit { .. }
            | Event::KeyDown {
                keycode: Some(Keycode::Escape),
                ..
            } => break 'main,
            Event::KeyDown {
                keycode: Some(key), ..
            } => {
                let step = match key {
                    Keycode::W => -back,
                    Keycode::S => back,
                    Keycode::A => -right,
                    Keycode::D => right,
                    Keycode::Space => up,
                    Keycode::LShift => -up,
                    _ => continue,
                };
                config.translate(MOVEMENT_SPEED * step);
            }
            Event::MouseMotion {
                mousestate,
                xrel,
                yrel,
                ..
            } if mousestate.left() => {
                yaw += xrel as f64 * MOUSE_SENSITIVITY;
                pitch = (pitch - yrel as f64 * MOUSE_SENSITIVITY).clamp(-MAX_PITCH, MAX_PITCH);
                config.look_along(yaw, pitch);
            }
            _ => continue,
        }

        log::debug!(
            "camera moved to {:?} looking at {:?}",
            config.look_from,
            config.look_at
        );
        camera.set_config(config);
        dirty = true;
    }
    Ok(())
}
