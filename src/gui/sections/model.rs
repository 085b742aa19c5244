use crate::config::{ImagePath, ImagePosition, Link, SectionConfig};
use crate::gui::sections::{IMAGE_SIZE, SLIDE_DISTANCE, SectionMotion};
use gdk_pixbuf::Pixbuf;
use strum::{Display as StrumDisplay, EnumString};

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: String,
    pub subtitle: String,
    pub image: ImagePath,
    pub image_position: ImagePosition,
    pub link: Option<Link>,
}

impl From<&SectionConfig> for Section {
    fn from(cfg: &SectionConfig) -> Self {
        Self {
            title: cfg.title.clone(),
            subtitle: cfg.subtitle.clone(),
            image: cfg.image.clone(),
            image_position: cfg.image_position,
            link: cfg.link.clone().filter(|l| !l.is_blank()),
        }
    }
}

/// Keys that move between sections, by logical name.
///
/// Accepts DOM names (`"PageDown"`, `" "`) as well as GDK key names (`"Page_Down"`, `"space"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, StrumDisplay)]
pub enum NavKey {
    #[strum(serialize = "PageDown", serialize = "Page_Down", serialize = "Next")]
    PageDown,
    #[strum(serialize = " ", serialize = "space", serialize = "Space")]
    Space,
    #[strum(serialize = "ArrowDown", serialize = "Down", serialize = "KP_Down")]
    ArrowDown,
    #[strum(serialize = "PageUp", serialize = "Page_Up", serialize = "Prior")]
    PageUp,
    #[strum(serialize = "ArrowUp", serialize = "Up", serialize = "KP_Up")]
    ArrowUp,
}

impl NavKey {
    pub fn from_name(name: &str) -> Option<Self> {
        name.parse().ok()
    }

    pub fn command(&self) -> NavCommand {
        match self {
            Self::PageDown | Self::Space | Self::ArrowDown => NavCommand::Advance,
            Self::PageUp | Self::ArrowUp => NavCommand::Retreat,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    Advance,
    Retreat,
    GoTo(usize),
}

/// Result of feeding an input event to the navigator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavAction {
    /// The event was ours; default handling (scrolling) must not run.
    pub consumed: bool,
    pub changed: bool,
}

impl NavAction {
    pub fn new(consumed: bool, changed: bool) -> Self {
        Self { consumed, changed }
    }
}

/// Render targets for one section relative to the current index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionStyle {
    pub active: bool,
    /// `+1` below the current section, `-1` at or above it.
    pub direction: f64,
    pub opacity: f64,
    pub offset_y: f64,
    pub accepts_pointer: bool,
}

impl SectionStyle {
    pub fn hidden_offset(&self) -> f64 {
        SLIDE_DISTANCE * self.direction
    }
}

#[derive(Debug, Clone)]
pub struct Navigator {
    current: usize,
    count: usize,
    wheel_threshold: f64,
}

impl Navigator {
    pub fn new(count: usize, wheel_threshold: f64) -> Self {
        Self {
            current: 0,
            count,
            wheel_threshold,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn count(&self) -> usize {
        self.count
    }

    fn last(&self) -> usize {
        self.count.saturating_sub(1)
    }

    pub fn is_active(&self, index: usize) -> bool {
        index == self.current
    }

    pub fn advance(&mut self) -> bool {
        self.set_current((self.current + 1).min(self.last()))
    }

    pub fn retreat(&mut self) -> bool {
        self.set_current(self.current.saturating_sub(1))
    }

    pub fn go_to(&mut self, index: usize) -> bool {
        self.set_current(index.min(self.last()))
    }

    fn set_current(&mut self, index: usize) -> bool {
        let changed = self.current != index;
        self.current = index;
        changed
    }

    /// Changes the number of sections, pulling the current index back into range.
    pub fn set_count(&mut self, count: usize) -> bool {
        self.count = count;
        self.set_current(self.current.min(self.last()))
    }

    pub fn set_wheel_threshold(&mut self, threshold: f64) {
        self.wheel_threshold = threshold;
    }

    pub fn apply(&mut self, command: NavCommand) -> bool {
        match command {
            NavCommand::Advance => self.advance(),
            NavCommand::Retreat => self.retreat(),
            NavCommand::GoTo(index) => self.go_to(index),
        }
    }

    pub fn handle_key(&mut self, key: NavKey) -> NavAction {
        NavAction::new(true, self.apply(key.command()))
    }

    pub fn handle_key_name(&mut self, name: &str) -> NavAction {
        NavKey::from_name(name)
            .map(|key| self.handle_key(key))
            .unwrap_or_default()
    }

    /// One step per event past the threshold, regardless of how far past.
    pub fn wheel_command(&self, delta_y: f64) -> Option<NavCommand> {
        if delta_y > self.wheel_threshold {
            Some(NavCommand::Advance)
        } else if delta_y < -self.wheel_threshold {
            Some(NavCommand::Retreat)
        } else {
            None
        }
    }

    pub fn handle_wheel(&mut self, delta_y: f64) -> NavAction {
        match self.wheel_command(delta_y) {
            Some(command) => NavAction::new(true, self.apply(command)),
            None => NavAction::default(),
        }
    }

    pub fn style(&self, index: usize) -> SectionStyle {
        let active = self.is_active(index);
        let direction = if index > self.current { 1.0 } else { -1.0 };
        SectionStyle {
            active,
            direction,
            opacity: if active { 1.0 } else { 0.0 },
            offset_y: if active { 0.0 } else { SLIDE_DISTANCE * direction },
            accepts_pointer: active,
        }
    }

    /// Progress through the sections in `[0, 1]`.
    pub fn scroll_fraction(&self) -> f64 {
        if self.count < 2 {
            return 0.0;
        }
        self.current as f64 / self.last() as f64
    }
}

pub struct Slide {
    pub section: Section,
    pub pixbuf: Option<Pixbuf>,
    pub motion: SectionMotion,
}

impl Slide {
    pub fn new(section: Section, style: &SectionStyle) -> Self {
        let pixbuf = Self::load_image(&section.image);
        let motion = SectionMotion::hidden(style, section.image_position);
        Self {
            section,
            pixbuf,
            motion,
        }
    }

    fn load_image(path: &ImagePath) -> Option<Pixbuf> {
        if path.is_blank() {
            return None;
        }
        Pixbuf::from_file_at_scale(path.as_str(), IMAGE_SIZE, IMAGE_SIZE, true)
            .inspect_err(|e| log::error!("Failed to load image '{}': {}", path, e))
            .ok()
    }
}
