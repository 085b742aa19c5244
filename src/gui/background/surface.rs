use super::canvas::{Canvas, DrawError};
use super::background_color;
use crate::geometry::Viewport;
use cairo::{Context, Format, ImageSurface};

/// Off-screen image the background accumulates into between frames, so the trail fill can
/// composite over the previous frame instead of starting from an empty widget.
pub struct Backbuffer {
    surface: ImageSurface,
}

impl Backbuffer {
    pub fn new(viewport: Viewport) -> Result<Self, DrawError> {
        if viewport.is_empty() {
            return Err(DrawError::SurfaceUnavailable);
        }
        let surface = ImageSurface::create(
            Format::ARgb32,
            viewport.width.ceil() as i32,
            viewport.height.ceil() as i32,
        )?;
        let buffer = Self { surface };
        buffer.draw(|canvas| canvas.clear(background_color(1.0)))?;
        Ok(buffer)
    }

    pub fn draw<F>(&self, f: F) -> Result<(), DrawError>
    where
        F: FnOnce(&mut dyn Canvas) -> Result<(), DrawError>,
    {
        let mut cr = Context::new(&self.surface)?;
        f(&mut cr)?;
        self.surface.flush();
        Ok(())
    }

    pub fn paint_onto(&self, cr: &Context) -> Result<(), DrawError> {
        cr.set_source_surface(&self.surface, 0.0, 0.0)?;
        cr.paint()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_viewport_has_no_surface() {
        assert!(matches!(
            Backbuffer::new(Viewport::new(0.0, 10.0)),
            Err(DrawError::SurfaceUnavailable)
        ));
    }

    #[test]
    fn test_new_buffer_is_opaque_background() {
        let buffer = Backbuffer::new(Viewport::new(4.0, 3.0)).unwrap();
        let Backbuffer { mut surface } = buffer;
        assert_eq!(surface.width(), 4);
        assert_eq!(surface.height(), 3);

        let data = surface.data().unwrap();
        // ARGB32 is native-endian; alpha lives in the high byte
        let pixel = u32::from_ne_bytes([data[0], data[1], data[2], data[3]]);
        assert_eq!(pixel >> 24, 0xff);
        assert!((pixel & 0xff) > ((pixel >> 16) & 0xff));
    }
}
