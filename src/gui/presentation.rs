use crate::config::{BackgroundConfig, Config, Link};
use crate::geometry::{Point, Viewport};
use crate::gui::background::{self, Animator, DrawError, Frame};
use crate::gui::sections::layout::dot_at;
use crate::gui::sections::{self, NavAction, NavKey, Navigator, Section, Slide, SlideLayout};
use crate::gui::theme::ThemeColors;
use cairo::Context;

#[derive(Debug, Clone, PartialEq)]
pub enum ClickAction {
    None,
    Selected(usize),
    Open(Link),
}

/// Everything the stage shows: the sections, where we are in them, and the background.
pub struct Presentation {
    slides: Vec<Slide>,
    navigator: Navigator,
    animator: Animator,
    background: BackgroundConfig,
    viewport: Viewport,
    wheel_scale: f64,
    now: f64,
    clock_started: bool,
}

impl Presentation {
    pub fn new(config: &Config, viewport: Viewport) -> Self {
        let navigator = Navigator::new(config.sections.len(), config.navigation.wheel_threshold);
        let animator = Animator::new(
            background::from_config(&config.background, viewport),
            viewport,
        );

        let mut presentation = Self {
            slides: Vec::new(),
            navigator,
            animator,
            background: config.background.clone(),
            viewport,
            wheel_scale: config.navigation.wheel_scale,
            now: 0.0,
            clock_started: false,
        };
        presentation.slides = presentation.build_slides(config);
        presentation
    }

    fn build_slides(&self, config: &Config) -> Vec<Slide> {
        config
            .sections
            .iter()
            .enumerate()
            .map(|(i, cfg)| Slide::new(Section::from(cfg), &self.navigator.style(i)))
            .collect()
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn start(&mut self) {
        self.animator.start();
    }

    pub fn stop(&mut self) {
        self.animator.stop();
    }

    /// One frame-clock tick at `now` seconds.
    pub fn frame(&mut self, now: f64) -> Frame {
        self.now = now;
        if !self.clock_started {
            self.clock_started = true;
            self.restyle();
        }

        match self.animator.tick() {
            Ok(frame) => frame,
            Err(e) => {
                log::debug!("Background frame skipped: {}", e);
                Frame::Blank
            }
        }
    }

    fn restyle(&mut self) {
        for (i, slide) in self.slides.iter_mut().enumerate() {
            let style = self.navigator.style(i);
            slide.motion.retarget(&style, slide.section.image_position, self.now);
        }
        self.animator.scrolled(self.navigator.scroll_fraction());
    }

    fn after(&mut self, action: NavAction) -> NavAction {
        if action.changed {
            log::debug!("Section {}", self.navigator.current());
            self.restyle();
        }
        action
    }

    pub fn key(&mut self, key: NavKey) -> NavAction {
        let action = self.navigator.handle_key(key);
        self.after(action)
    }

    /// `delta_y` in GTK scroll units; one wheel notch is 1.0.
    pub fn wheel(&mut self, delta_y: f64) -> NavAction {
        let action = self.navigator.handle_wheel(delta_y * self.wheel_scale);
        self.after(action)
    }

    pub fn go_to(&mut self, index: usize) -> NavAction {
        let changed = self.navigator.go_to(index);
        self.after(NavAction::new(true, changed))
    }

    pub fn click(&mut self, point: Point) -> ClickAction {
        if let Some(index) = dot_at(self.viewport, self.navigator.count(), point) {
            self.go_to(index);
            return ClickAction::Selected(index);
        }

        // only the active section takes pointer input
        self.slides
            .iter()
            .enumerate()
            .filter(|(i, _)| self.navigator.style(*i).accepts_pointer)
            .find_map(|(_, slide)| {
                let offset = slide.motion.sample(self.now).offset_y;
                let button = SlideLayout::compute(self.viewport, slide.section.image_position)
                    .button
                    .translated(0.0, offset);
                button
                    .contains(point)
                    .then(|| slide.section.link.clone())
                    .flatten()
            })
            .map(ClickAction::Open)
            .unwrap_or(ClickAction::None)
    }

    pub fn pointer_moved(&mut self, point: Point) {
        let fraction = self.viewport.fraction_of(point);
        self.animator.pointer_moved(fraction);
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.animator.resize(viewport);
    }

    pub fn reload(&mut self, config: &Config) {
        self.navigator.set_count(config.sections.len());
        self.navigator.set_wheel_threshold(config.navigation.wheel_threshold);
        self.wheel_scale = config.navigation.wheel_scale;
        self.slides = self.build_slides(config);

        if config.background != self.background {
            self.background = config.background.clone();
            self.animator.replace(background::from_config(&self.background, self.viewport));
        }
        self.restyle();
    }

    pub fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), DrawError> {
        self.animator.paint(cr)?;
        sections::draw(cr, self, colors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackgroundKind;
    use crate::gui::background::Phase;
    use crate::gui::sections::layout::dot_centers;

    const VIEWPORT: Viewport = Viewport {
        width: 1344.0,
        height: 800.0,
    };

    fn config() -> Config {
        let mut config = Config::builtin().unwrap();
        config.background.particles = 16;
        config.background.seed = Some(4);
        config.sections[0].link = Some(Link::new("https://example.org/one"));
        config.sections[1].link = Some(Link::new("https://example.org/two"));
        config
    }

    fn running() -> Presentation {
        let mut p = Presentation::new(&config(), VIEWPORT);
        p.start();
        p.frame(100.0);
        p.frame(102.0);
        p
    }

    fn button_center(p: &Presentation, index: usize) -> Point {
        let b = SlideLayout::compute(VIEWPORT, p.slides()[index].section.image_position).button;
        Point::new(b.x + b.width / 2.0, b.y + b.height / 2.0)
    }

    #[test]
    fn test_first_section_enters_on_first_frame() {
        let mut p = Presentation::new(&config(), VIEWPORT);
        p.start();
        assert!(!p.slides()[0].motion.sample(0.0).is_visible());

        assert_eq!(p.frame(100.0), Frame::Drawn);
        let settled = p.slides()[0].motion.sample(101.0);
        assert_eq!(settled.opacity, 1.0);
        assert_eq!(settled.offset_y, 0.0);
        assert!(!p.slides()[1].motion.sample(101.0).is_visible());
    }

    #[test]
    fn test_wheel_notch_is_scaled() {
        let mut p = running();
        assert!(p.wheel(1.0).changed);
        assert_eq!(p.navigator().current(), 1);
        assert!(!p.wheel(0.3).changed);
        assert!(p.wheel(-1.0).changed);
        assert_eq!(p.navigator().current(), 0);
    }

    #[test]
    fn test_keys_drive_sections() {
        let mut p = running();
        p.key(NavKey::PageDown);
        p.key(NavKey::Space);
        assert_eq!(p.navigator().current(), 2);

        p.frame(110.0);
        assert_eq!(p.slides()[2].motion.sample(111.0).opacity, 1.0);
        assert_eq!(p.slides()[0].motion.sample(111.0).opacity, 0.0);
    }

    #[test]
    fn test_click_dot_selects() {
        let mut p = running();
        let dot = dot_centers(VIEWPORT, 4)[3];
        assert_eq!(p.click(dot), ClickAction::Selected(3));
        assert_eq!(p.navigator().current(), 3);
    }

    #[test]
    fn test_click_active_button_opens_link() {
        let mut p = running();
        let center = button_center(&p, 0);
        assert_eq!(p.click(center), ClickAction::Open(Link::new("https://example.org/one")));
    }

    #[test]
    fn test_inactive_section_ignores_clicks() {
        let mut p = running();
        // section 1 puts its text column on the right, away from section 0's button
        let center = button_center(&p, 1);
        assert_eq!(p.click(center), ClickAction::None);
    }

    #[test]
    fn test_reload_reclamps_and_swaps_background() {
        let mut p = running();
        p.go_to(3);

        let mut smaller = config();
        smaller.sections.truncate(2);
        smaller.background.kind = BackgroundKind::Grid;
        p.reload(&smaller);

        assert_eq!(p.navigator().count(), 2);
        assert_eq!(p.navigator().current(), 1);
        assert_eq!(p.slides().len(), 2);
        assert_eq!(p.frame(120.0), Frame::Drawn);
    }

    #[test]
    fn test_stop_halts_frames() {
        let mut p = running();
        p.stop();
        assert_eq!(p.animator().phase(), Phase::Stopped);
        let frames = p.animator().frames();
        assert_eq!(p.frame(200.0), Frame::Halted);
        assert_eq!(p.animator().frames(), frames);
    }
}
