use serde::Serialize;

use crate::types::event::Event;

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Debug)]
pub enum CarouselState {
    Idle,
    /// A translate animation is running, navigation is ignored until it ends.
    Animating,
}

#[derive(Clone, PartialEq, Eq, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    pub event: Event,
    /// Duplicate placed at either end of the track for the wraparound.
    pub is_clone: bool,
}

/// Looping slide track.
///
/// With more than one event the track is `[last, 1..=N, first]` where both
/// ends are clones; real slides live at indices `1..=N`. Reaching a clone
/// snaps, without animation, to the real slide it duplicates.
#[derive(Clone, PartialEq, Eq, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Carousel {
    pub slides: Vec<Slide>,
    pub current_index: usize,
    pub state: CarouselState,
    /// Whether the last move of the track should be animated.
    pub animated: bool,
}

impl Carousel {
    /// `None` when there is nothing to show.
    pub fn new(events: &[Event]) -> Option<Self> {
        let (first, last) = match (events.first(), events.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return None,
        };
        let real_slides = events.iter().map(|event| Slide {
            event: event.to_owned(),
            is_clone: false,
        });
        let (slides, current_index) = if events.len() > 1 {
            let slides = std::iter::once(Slide {
                event: last.to_owned(),
                is_clone: true,
            })
            .chain(real_slides)
            .chain(std::iter::once(Slide {
                event: first.to_owned(),
                is_clone: true,
            }))
            .collect();
            (slides, 1)
        } else {
            (real_slides.collect(), 0)
        };
        Some(Carousel {
            slides,
            current_index,
            state: CarouselState::Idle,
            animated: false,
        })
    }
    /// Number of real (non clone) slides.
    pub fn len(&self) -> usize {
        self.slides.iter().filter(|slide| !slide.is_clone).count()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Prev/next buttons, dots and the auto-advance timer exist only when
    /// there is something to rotate.
    pub fn has_controls(&self) -> bool {
        self.len() > 1
    }
    pub fn is_transitioning(&self) -> bool {
        self.state == CarouselState::Animating
    }
    /// Dot of the real slide being displayed.
    pub fn active_dot(&self) -> Option<usize> {
        if !self.has_controls() {
            return None;
        }
        let len = self.len();
        Some(match self.current_index {
            0 => len - 1,
            index if index > len => 0,
            index => index - 1,
        })
    }
    /// Horizontal offset of the track, as a percentage of one slide.
    pub fn translate_percent(&self) -> usize {
        self.current_index * 100
    }
    pub fn next(&mut self) -> bool {
        if !self.has_controls() {
            return false;
        }
        self.animate_to(self.current_index + 1)
    }
    pub fn prev(&mut self) -> bool {
        if !self.has_controls() || self.current_index == 0 {
            return false;
        }
        self.animate_to(self.current_index - 1)
    }
    /// Jumps to the real slide behind `dot`.
    pub fn select(&mut self, dot: usize) -> bool {
        if !self.has_controls() || dot >= self.len() || dot + 1 == self.current_index {
            return false;
        }
        self.animate_to(dot + 1)
    }
    /// Handles the end of the translate animation.
    pub fn transition_end(&mut self) -> bool {
        if self.state != CarouselState::Animating {
            return false;
        }
        let len = self.len();
        if self.current_index == len + 1 {
            self.snap_to(1);
        } else if self.current_index == 0 {
            self.snap_to(len);
        } else {
            self.state = CarouselState::Idle;
        }
        true
    }
    fn animate_to(&mut self, index: usize) -> bool {
        if self.state == CarouselState::Animating || index >= self.slides.len() {
            return false;
        }
        self.state = CarouselState::Animating;
        self.current_index = index;
        self.animated = true;
        true
    }
    /// An instant jump produces no further transition end, so the lock is
    /// released right away.
    fn snap_to(&mut self, index: usize) {
        self.current_index = index;
        self.animated = false;
        self.state = CarouselState::Idle;
    }
}
