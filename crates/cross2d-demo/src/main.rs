use anyhow::Result;

use cross2d::coords::{Color, Vec2};
use cross2d::logging::{init_logging, LoggingConfig};
use cross2d::render::{PrimitiveType, RenderCtx, Vertex, VertexArray};
use cross2d::renderer::{Renderer, RendererConfig};
use cross2d::time::FramePacer;

const WIDTH: u32 = 800;
const HEIGHT: u32 = 600;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let mut renderer: Renderer = Renderer::with_config(RendererConfig {
        title: "cross2d demo".to_string(),
        clear_color: Color::from_rgba8(24, 24, 32, 255),
        ..RendererConfig::default()
    });

    if !renderer.initialize(WIDTH, HEIGHT) {
        log::error!("no GPU available, nothing to show");
        return Ok(());
    }

    let device = renderer.device().clone();
    let mut triangle = VertexArray::new(&device, PrimitiveType::Triangles);
    triangle.append(Vertex::colored(Vec2::new(0.0, -120.0), Color::RED));
    triangle.append(Vertex::colored(Vec2::new(104.0, 60.0), Color::GREEN));
    triangle.append(Vertex::colored(Vec2::new(-104.0, 60.0), Color::BLUE));
    let corners: Vec<Vec2> = triangle.vertices().iter().map(|v| v.position).collect();

    // Square outline; the last vertex closes the strip.
    let mut outline = VertexArray::new(&device, PrimitiveType::LineStrip);
    for (x, y) in [(40.0, 40.0), (200.0, 40.0), (200.0, 200.0), (40.0, 200.0), (40.0, 40.0)] {
        outline.append(Vertex::colored(Vec2::new(x, y), Color::WHITE));
    }

    let mut pacer = FramePacer::new(60);
    let mut angle = 0.0_f32;

    while renderer.poll_events() {
        let frame = pacer.tick();
        angle += frame.dt;

        let (sin, cos) = angle.sin_cos();
        for (i, c) in corners.iter().enumerate() {
            triangle[i].position = Vec2::new(c.x * cos - c.y * sin, c.x * sin + c.y * cos);
        }

        let center = renderer.size().to_vec2() * 0.5;
        let mut scene = |ctx: &mut RenderCtx<'_>| {
            let color = ctx.shaders().color();
            ctx.draw_at(&mut triangle, color, center);
            ctx.draw(&mut outline, color);
        };
        renderer.flip(true, &mut scene);

        renderer.delay(pacer.remaining_ms());
    }

    log::info!("{} frames", pacer.tick().frame_index);
    Ok(())
}
