use super::model::SectionStyle;
use super::{IMAGE_DELAY_SECS, IMAGE_SLIDE_DISTANCE, TRANSITION_SECS};
use crate::config::ImagePosition;

/// A single animated scalar, eased from `from` to `to` over `duration` seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: f64,
    to: f64,
    start: f64,
    duration: f64,
    delay: f64,
}

impl Tween {
    pub fn settled(value: f64) -> Self {
        Self {
            from: value,
            to: value,
            start: 0.0,
            duration: 0.0,
            delay: 0.0,
        }
    }

    pub fn value_at(&self, now: f64) -> f64 {
        if self.duration <= 0.0 {
            return self.to;
        }
        let t = ((now - self.start - self.delay) / self.duration).clamp(0.0, 1.0);
        self.from + (self.to - self.from) * ease_out(t)
    }

    #[cfg(test)]
    pub fn is_settled(&self, now: f64) -> bool {
        now >= self.start + self.delay + self.duration
    }

    /// Heads for `to` starting from wherever the value is at `now`.
    pub fn retarget(&mut self, to: f64, now: f64, duration: f64, delay: f64) {
        if to == self.to {
            return;
        }
        self.from = self.value_at(now);
        self.to = to;
        self.start = now;
        self.duration = duration;
        self.delay = delay;
    }
}

fn ease_out(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

/// Sampled animation state of one section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub opacity: f64,
    pub offset_y: f64,
    pub image_opacity: f64,
    pub image_offset_x: f64,
}

impl Pose {
    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0 || self.image_opacity > 0.0
    }
}

#[derive(Debug, Clone)]
pub struct SectionMotion {
    opacity: Tween,
    offset_y: Tween,
    image_opacity: Tween,
    image_offset_x: Tween,
}

impl SectionMotion {
    /// Every section begins hidden and animates in once styled.
    pub fn hidden(style: &SectionStyle, image_position: ImagePosition) -> Self {
        Self {
            opacity: Tween::settled(0.0),
            offset_y: Tween::settled(style.hidden_offset()),
            image_opacity: Tween::settled(0.0),
            image_offset_x: Tween::settled(IMAGE_SLIDE_DISTANCE * image_position.sign()),
        }
    }

    pub fn retarget(&mut self, style: &SectionStyle, image_position: ImagePosition, now: f64) {
        let image_x = if style.active {
            0.0
        } else {
            IMAGE_SLIDE_DISTANCE * image_position.sign()
        };
        self.opacity.retarget(style.opacity, now, TRANSITION_SECS, 0.0);
        self.offset_y.retarget(style.offset_y, now, TRANSITION_SECS, 0.0);
        self.image_opacity
            .retarget(style.opacity, now, TRANSITION_SECS, IMAGE_DELAY_SECS);
        self.image_offset_x
            .retarget(image_x, now, TRANSITION_SECS, IMAGE_DELAY_SECS);
    }

    pub fn sample(&self, now: f64) -> Pose {
        Pose {
            opacity: self.opacity.value_at(now),
            offset_y: self.offset_y.value_at(now),
            image_opacity: self.image_opacity.value_at(now),
            image_offset_x: self.image_offset_x.value_at(now),
        }
    }

    #[cfg(test)]
    pub fn is_settled(&self, now: f64) -> bool {
        [
            &self.opacity,
            &self.offset_y,
            &self.image_opacity,
            &self.image_offset_x,
        ]
        .iter()
        .all(|t| t.is_settled(now))
    }
}
