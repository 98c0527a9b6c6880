use glam::{Mat4, Vec2};
use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::canvas::{Canvas, Circle, Line};
use ratatui::widgets::Block;
use ratatui::{Frame, Terminal};

use savanna_data::{Color4f, SpriteId};
use savanna_engine::{
    Atlas, AtlasFrame, FrameShape, Result, Sprite, SpriteBatch, SpriteInstance, SpriteStore,
};

fn tui_color(color: Color4f) -> Color {
    let (r, g, b) = color.to_rgb8();
    Color::Rgb(r, g, b)
}

/// Draws the committed sprites and debug lines of `store` into `area`.
///
/// The canvas spans the world `(0, 0)..bounds` with y pointing down, as the
/// simulation sees it.
pub fn draw_scene(frame: &mut Frame, area: Rect, store: &SpriteStore, bounds: Vec2, status: &[String]) {
    let title = status.first().cloned().unwrap_or_default();
    let footer = status.iter().skip(1).cloned().collect::<Vec<_>>().join(" | ");
    let block = Block::bordered()
        .title(Span::styled(title, Style::default().fg(Color::White)))
        .title_bottom(Span::styled(footer, Style::default().fg(Color::DarkGray)));

    let flip = |y: f32| f64::from(bounds.y - y);
    // Sprites that were never placed have a zero transform and stay hidden.
    let sprites: Vec<(&SpriteInstance, &AtlasFrame)> = store
        .instances
        .values()
        .filter(|instance| instance.scale().x > 0.0)
        .filter_map(|instance| store.atlas.frame(&instance.frame).map(|f| (instance, f)))
        .collect();

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([0.0, f64::from(bounds.x)])
        .y_bounds([0.0, f64::from(bounds.y)])
        .paint(|ctx| {
            for (instance, atlas_frame) in sprites.iter().filter(|(_, f)| f.shape == FrameShape::Disc) {
                let position = instance.position();
                ctx.draw(&Circle {
                    x: f64::from(position.x),
                    y: flip(position.y),
                    radius: f64::from(instance.scale().x * 0.5),
                    color: tui_color(instance.color),
                });
                ctx.print(
                    f64::from(position.x),
                    flip(position.y),
                    Span::styled(
                        atlas_frame.glyph.to_string(),
                        Style::default().fg(tui_color(instance.color)),
                    ),
                );
            }
            ctx.layer();

            for line in &store.committed_lines {
                ctx.draw(&Line::new(
                    f64::from(line.from.x),
                    flip(line.from.y),
                    f64::from(line.to.x),
                    flip(line.to.y),
                    tui_color(line.color),
                ));
            }
            ctx.layer();

            for (instance, atlas_frame) in sprites.iter().filter(|(_, f)| f.shape == FrameShape::Glyph) {
                let position = instance.position();
                ctx.print(
                    f64::from(position.x),
                    flip(position.y),
                    Span::styled(
                        atlas_frame.glyph.to_string(),
                        Style::default().fg(tui_color(instance.color)),
                    ),
                );
            }
        });

    frame.render_widget(canvas, area);
}

/// [`SpriteBatch`] that draws onto a ratatui terminal.
pub struct TerminalSprites<B: Backend> {
    pub terminal: Terminal<B>,
    pub store: SpriteStore,
    pub bounds: Vec2,
    status: Vec<String>,
}

impl<B: Backend> TerminalSprites<B> {
    pub fn new(terminal: Terminal<B>, atlas: Atlas, bounds: Vec2) -> Self {
        Self {
            terminal,
            store: SpriteStore::new(atlas),
            bounds,
            status: Vec::new(),
        }
    }
}

impl<B: Backend> SpriteBatch for TerminalSprites<B> {
    fn load_atlas(&mut self, atlas: Atlas) {
        self.store.atlas = atlas;
    }

    fn add_sprite(&mut self, frame: &str, color: Color4f) -> Result<Sprite> {
        self.store.add(frame, color)
    }

    fn remove_sprite(&mut self, id: SpriteId) -> Result<()> {
        self.store.remove(id)
    }

    fn transform_sprite(&mut self, id: SpriteId, transform: Mat4) -> Result<()> {
        self.store.transform(id, transform)
    }

    fn color_sprite(&mut self, id: SpriteId, color: Color4f) -> Result<()> {
        self.store.color(id, color)
    }

    fn update_sprites(&mut self, t: f64, _dt: f32) {
        self.store.time = t;
    }

    fn commit_sprites(&mut self) {
        self.store.commit();
    }

    fn render_sprites(&mut self) -> Result<()> {
        let Self {
            terminal,
            store,
            bounds,
            status,
        } = self;
        terminal.draw(|frame| {
            let area = frame.area();
            draw_scene(frame, area, store, *bounds, status);
        })?;
        Ok(())
    }

    fn atlas_frame(&self, name: &str) -> Option<&AtlasFrame> {
        self.store.atlas.frame(name)
    }

    fn debug_line(&mut self, from: Vec2, to: Vec2, color: Color4f) {
        self.store.line(from, to, color);
    }

    fn status_text(&mut self, lines: &[String]) {
        self.status = lines.to_vec();
    }
}
