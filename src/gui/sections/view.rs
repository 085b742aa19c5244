use super::layout::{SlideLayout, dot_centers};
use super::model::Slide;
use super::motion::Pose;
use super::{BUTTON_HEIGHT, DOT_RADIUS, REFERENCE_HEIGHT, SUBTITLE_FONT_SIZE, TITLE_FONT_SIZE};
use crate::geometry::Rect;
use crate::gui::background::{Canvas, DrawError};
use crate::gui::presentation::Presentation;
use crate::gui::theme::ThemeColors;
use cairo::Context;
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use palette::Srgba;
use std::f64::consts::PI;

const BUTTON_LABEL: &str = "SEE MORE";

struct SlideRenderer<'a> {
    slide: &'a Slide,
    layout: SlideLayout,
    pose: Pose,
    scale: f64,
}

impl<'a> SlideRenderer<'a> {
    fn new(slide: &'a Slide, layout: SlideLayout, pose: Pose, scale: f64) -> Self {
        Self {
            slide,
            layout,
            pose,
            scale,
        }
    }

    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        if self.pose.opacity > 0.0 {
            self.draw_text_column(cr, colors)?;
        }
        if self.pose.image_opacity > 0.0 {
            self.draw_image_column(cr, colors)?;
        }
        Ok(())
    }

    fn draw_text_column(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let text = self.layout.text;

        cr.save()?;
        cr.translate(0.0, self.pose.offset_y);
        cr.push_group();

        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        cr.set_font_size(TITLE_FONT_SIZE * self.scale);
        set_source(cr, colors.title);
        let y = draw_paragraph(
            cr,
            &self.slide.section.title,
            text.x,
            text.y,
            text.width,
            1.15,
        )?;

        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Normal);
        cr.set_font_size(SUBTITLE_FONT_SIZE * self.scale);
        set_source(cr, colors.subtitle);
        draw_paragraph(
            cr,
            &self.slide.section.subtitle,
            text.x,
            y + 16.0 * self.scale,
            text.width,
            1.5,
        )?;

        self.draw_button(cr, colors)?;

        cr.pop_group_to_source()?;
        cr.paint_with_alpha(self.pose.opacity)?;
        cr.restore()
    }

    fn draw_button(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let button = self.layout.button;
        set_source(cr, colors.accent);
        rounded_rect(cr, button, 6.0);
        cr.fill()?;

        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        cr.set_font_size(14.0);
        set_source(cr, colors.accent_text);
        if let Ok(ext) = cr.text_extents(BUTTON_LABEL) {
            cr.move_to(
                button.x + (button.width - ext.width()) / 2.0 - ext.x_bearing(),
                button.y + BUTTON_HEIGHT / 2.0 + ext.height() / 2.0,
            );
            cr.show_text(BUTTON_LABEL)?;
        }
        Ok(())
    }

    fn draw_image_column(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let image = self.layout.image;

        cr.save()?;
        cr.translate(self.pose.image_offset_x, 0.0);
        cr.push_group();

        match &self.slide.pixbuf {
            Some(pixbuf) => draw_pixbuf(cr, pixbuf, image)?,
            None => {
                set_source(cr, colors.placeholder);
                rounded_rect(cr, image, 8.0);
                cr.fill()?;
            }
        }

        cr.pop_group_to_source()?;
        cr.paint_with_alpha(self.pose.image_opacity)?;
        cr.restore()
    }
}

fn draw_pixbuf(cr: &Context, pixbuf: &Pixbuf, frame: Rect) -> Result<(), cairo::Error> {
    // fit inside the frame, keeping aspect
    let (pw, ph) = (pixbuf.width() as f64, pixbuf.height() as f64);
    if pw <= 0.0 || ph <= 0.0 {
        return Ok(());
    }
    let scale = (frame.width / pw).min(frame.height / ph);
    let (w, h) = (pw * scale, ph * scale);

    cr.save()?;
    rounded_rect(cr, frame, 8.0);
    cr.clip();
    cr.translate(
        frame.x + (frame.width - w) / 2.0,
        frame.y + (frame.height - h) / 2.0,
    );
    cr.scale(scale, scale);
    cr.set_source_pixbuf(pixbuf, 0.0, 0.0);
    cr.paint()?;
    cr.restore()
}

/// Greedy word wrap; returns the y just below the last line.
fn draw_paragraph(
    cr: &Context,
    text: &str,
    x: f64,
    top: f64,
    max_width: f64,
    line_height: f64,
) -> Result<f64, cairo::Error> {
    let advance = cr.font_extents()?.height() * line_height;
    let ascent = cr.font_extents()?.ascent();
    let mut y = top;
    for line in wrap_lines(cr, text, max_width)? {
        cr.move_to(x, y + ascent);
        cr.show_text(&line)?;
        y += advance;
    }
    Ok(y)
}

fn wrap_lines(cr: &Context, text: &str, max_width: f64) -> Result<Vec<String>, cairo::Error> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let candidate = if line.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", line, word)
        };
        if !line.is_empty() && cr.text_extents(&candidate)?.x_advance() > max_width {
            lines.push(std::mem::replace(&mut line, word.to_string()));
        } else {
            line = candidate;
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    Ok(lines)
}

fn rounded_rect(cr: &Context, rect: Rect, radius: f64) {
    let r = radius.min(rect.width / 2.0).min(rect.height / 2.0).max(0.0);
    let (x, y, w, h) = (rect.x, rect.y, rect.width, rect.height);
    cr.new_sub_path();
    cr.arc(x + w - r, y + r, r, -PI / 2.0, 0.0);
    cr.arc(x + w - r, y + h - r, r, 0.0, PI / 2.0);
    cr.arc(x + r, y + h - r, r, PI / 2.0, PI);
    cr.arc(x + r, y + r, r, PI, 3.0 * PI / 2.0);
    cr.close_path();
}

fn set_source(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

pub fn draw(
    cr: &Context,
    presentation: &Presentation,
    colors: &ThemeColors,
) -> Result<(), DrawError> {
    let viewport = presentation.viewport();
    let now = presentation.now();
    let scale = (viewport.height / REFERENCE_HEIGHT).clamp(0.6, 1.2);

    for slide in presentation.slides() {
        let pose = slide.motion.sample(now);
        if !pose.is_visible() {
            continue;
        }
        let layout = SlideLayout::compute(viewport, slide.section.image_position);
        SlideRenderer::new(slide, layout, pose, scale).draw(cr, colors)?;
    }

    draw_dots(cr, presentation, colors)
}

fn draw_dots(
    cr: &Context,
    presentation: &Presentation,
    colors: &ThemeColors,
) -> Result<(), DrawError> {
    let navigator = presentation.navigator();
    let mut canvas = cr.clone();
    for (i, center) in dot_centers(presentation.viewport(), navigator.count())
        .into_iter()
        .enumerate()
    {
        if navigator.is_active(i) {
            canvas.fill_circle(center, DOT_RADIUS, colors.accent)?;
            let (r, g, b, _) = colors.accent.into_components();
            canvas.stroke_circle(
                center,
                DOT_RADIUS + 3.0,
                1.0,
                Srgba::new(r, g, b, 0.4),
            )?;
        } else {
            canvas.fill_circle(center, DOT_RADIUS, colors.dot_idle)?;
        }
    }
    Ok(())
}
