//! Tick-driven frame sequences and blink toggles.

/// Sequence of frame numbers, each shown for a fixed number of ticks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Animation {
    frames: &'static [u8],
    frame_ticks: u32,
    looping: bool,
    index: usize,
    timer: u32,
    completed: bool,
}

impl Animation {
    pub(crate) const fn new(frames: &'static [u8], frame_ticks: u32, looping: bool) -> Self {
        Self {
            frames,
            frame_ticks,
            looping,
            index: 0,
            timer: 0,
            completed: false,
        }
    }

    /// Advances one tick. A finished one-shot animation stays on its last frame.
    pub(crate) fn update(&mut self) {
        if self.completed || self.frames.is_empty() {
            return;
        }
        self.timer += 1;
        if self.timer < self.frame_ticks {
            return;
        }
        self.timer = 0;
        self.index += 1;
        if self.index >= self.frames.len() {
            if self.looping {
                self.index = 0;
            } else {
                self.index = self.frames.len() - 1;
                self.completed = true;
            }
        }
    }

    pub(crate) fn frame(&self) -> u8 {
        self.frames.get(self.index).copied().unwrap_or(1)
    }

    pub(crate) const fn is_completed(&self) -> bool {
        self.completed
    }
}

/// Visibility toggle flipping every `period` ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Blink {
    period: u32,
    timer: u32,
    on: bool,
}

impl Blink {
    pub(crate) const fn new(period: u32) -> Self {
        Self {
            period,
            timer: 0,
            on: true,
        }
    }

    pub(crate) fn update(&mut self) {
        self.timer += 1;
        if self.timer >= self.period {
            self.timer = 0;
            self.on = !self.on;
        }
    }

    pub(crate) const fn is_on(&self) -> bool {
        self.on
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_shot_animation_completes_on_last_frame() {
        let mut animation = Animation::new(&[1, 2, 3], 2, false);
        let mut seen = vec![animation.frame()];
        for _ in 0..6 {
            animation.update();
            seen.push(animation.frame());
        }
        assert_eq!(seen, vec![1, 1, 2, 2, 3, 3, 3]);
        assert!(animation.is_completed());
    }

    #[test]
    fn looping_animation_wraps() {
        let mut animation = Animation::new(&[1, 2], 1, true);
        animation.update();
        animation.update();
        assert_eq!(animation.frame(), 1);
        assert!(!animation.is_completed());
    }

    #[test]
    fn blink_flips_every_period() {
        let mut blink = Blink::new(3);
        let mut states = Vec::new();
        for _ in 0..6 {
            blink.update();
            states.push(blink.is_on());
        }
        assert_eq!(states, vec![true, true, false, false, false, true]);
    }
}
