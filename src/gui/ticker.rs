use gtk::prelude::*;
use gtk4 as gtk;

/// Owns a widget's frame-clock callback; dropping it cancels the callback.
#[derive(Default)]
pub struct FrameTicker {
    id: Option<gtk::TickCallbackId>,
}

impl FrameTicker {
    /// Calls `on_frame` with the frame time in seconds, then redraws the widget.
    pub fn start<W, F>(&mut self, widget: &W, on_frame: F)
    where
        W: IsA<gtk::Widget>,
        F: Fn(f64) + 'static,
    {
        self.stop();
        let id = widget.add_tick_callback(move |widget, clock| {
            on_frame(clock.frame_time() as f64 / 1_000_000.0);
            widget.queue_draw();
            glib::ControlFlow::Continue
        });
        self.id = Some(id);
    }

    pub fn stop(&mut self) {
        if let Some(id) = self.id.take() {
            id.remove();
        }
    }
}

impl Drop for FrameTicker {
    fn drop(&mut self) {
        self.stop();
    }
}
