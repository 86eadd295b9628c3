use tracing::debug;

use crate::deck::Deck;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideState {
    Active,
    Inactive,
}

/// Emitted after every successful transition, including a re-render of the
/// slide that was already current.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideChange {
    pub from: usize,
    pub to: usize,
    pub total: usize,
    pub title: Option<String>,
}

impl SlideChange {
    /// 1-based position of the new slide.
    pub fn current(&self) -> usize {
        self.to + 1
    }

    pub fn counter(&self) -> String {
        format!("{}/{}", self.current(), self.total)
    }

    pub fn progress(&self) -> f32 {
        self.current() as f32 / self.total as f32
    }

    pub fn can_go_previous(&self) -> bool {
        self.to > 0
    }

    pub fn can_go_next(&self) -> bool {
        self.to + 1 < self.total
    }

    /// Screen reader text for the new slide.
    pub fn announcement(&self) -> String {
        let title = self
            .title
            .clone()
            .unwrap_or_else(|| format!("Slide {}", self.current()));
        format!("{title}, slide {} of {}", self.current(), self.total)
    }
}

/// The slide-index state machine. Every mutation goes through [`Navigator::go_to`].
#[derive(Debug)]
pub struct Navigator {
    deck: Deck,
    current: usize,
    states: Vec<SlideState>,
}

impl Navigator {
    pub fn new(deck: Deck) -> Self {
        let mut states = vec![SlideState::Inactive; deck.slide_count()];
        states[0] = SlideState::Active;
        Self {
            deck,
            current: 0,
            states,
        }
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.deck.slide_count()
    }

    pub fn slide_state(&self, index: usize) -> Option<SlideState> {
        self.states.get(index).copied()
    }

    pub fn active_slides(&self) -> impl Iterator<Item = usize> + '_ {
        self.states
            .iter()
            .enumerate()
            .filter(|(_, s)| **s == SlideState::Active)
            .map(|(i, _)| i)
    }

    /// Current position as a change record, used to render the initial frame.
    pub fn snapshot(&self) -> SlideChange {
        self.change(self.current, self.current)
    }

    /// Move to `index`. Out-of-range requests are ignored and return `None`.
    pub fn go_to(&mut self, index: usize) -> Option<SlideChange> {
        if index >= self.total() {
            debug!(index, total = self.total(), "ignoring out-of-range slide request");
            return None;
        }

        let from = self.current;
        self.states[from] = SlideState::Inactive;
        self.current = index;
        self.states[index] = SlideState::Active;

        debug!(from, to = index, "slide transition");
        Some(self.change(from, index))
    }

    pub fn next(&mut self) -> Option<SlideChange> {
        if self.current + 1 >= self.total() {
            return None;
        }
        self.go_to(self.current + 1)
    }

    pub fn previous(&mut self) -> Option<SlideChange> {
        let index = self.current.checked_sub(1)?;
        self.go_to(index)
    }

    pub fn first(&mut self) -> Option<SlideChange> {
        self.go_to(0)
    }

    pub fn last(&mut self) -> Option<SlideChange> {
        self.go_to(self.total() - 1)
    }

    fn change(&self, from: usize, to: usize) -> SlideChange {
        SlideChange {
            from,
            to,
            total: self.total(),
            title: self.deck.slide(to).and_then(|s| s.title.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::Slide;

    fn deck(n: usize) -> Deck {
        let slides = (0..n)
            .map(|i| Slide::new(Some(&format!("Title {i}")), format!("# Title {i}")))
            .collect();
        Deck::new(slides).unwrap()
    }

    fn assert_single_active(nav: &Navigator) {
        let active: Vec<usize> = nav.active_slides().collect();
        assert_eq!(active, vec![nav.current_index()]);
    }

    #[test]
    fn test_starts_on_first_slide() {
        let nav = Navigator::new(deck(3));
        assert_eq!(nav.current_index(), 0);
        assert_single_active(&nav);
    }

    #[test]
    fn test_index_stays_in_bounds() {
        // Deterministic pseudo-random walks over several deck sizes.
        for n in 1..=8 {
            let mut nav = Navigator::new(deck(n));
            let mut seed: u32 = 0x9e37_79b9 ^ n as u32;
            for _ in 0..200 {
                seed ^= seed << 13;
                seed ^= seed >> 17;
                seed ^= seed << 5;
                if seed % 2 == 0 {
                    nav.next();
                } else {
                    nav.previous();
                }
                assert!(nav.current_index() < n);
                assert_single_active(&nav);
            }
        }
    }

    #[test]
    fn test_go_to_out_of_range_is_noop() {
        let mut nav = Navigator::new(deck(4));
        nav.go_to(2);
        assert!(nav.go_to(4).is_none());
        assert!(nav.go_to(usize::MAX).is_none());
        assert_eq!(nav.current_index(), 2);
        assert_single_active(&nav);
    }

    #[test]
    fn test_boundaries_are_noops() {
        let mut nav = Navigator::new(deck(3));
        assert!(nav.previous().is_none());
        assert_eq!(nav.current_index(), 0);

        nav.last();
        assert!(nav.next().is_none());
        assert_eq!(nav.current_index(), 2);
    }

    #[test]
    fn test_go_to_same_index_still_emits() {
        let mut nav = Navigator::new(deck(3));
        nav.go_to(1);
        let change = nav.go_to(1).unwrap();
        assert_eq!(change.from, 1);
        assert_eq!(change.to, 1);
        assert_eq!(nav.current_index(), 1);
        assert_single_active(&nav);
    }

    #[test]
    fn test_five_slide_walkthrough() {
        let mut nav = Navigator::new(deck(5));
        let mut change = None;
        for _ in 0..3 {
            change = nav.next();
        }
        let change = change.unwrap();
        assert_eq!(nav.current_index(), 3);
        assert!(change.can_go_previous());
        assert!(change.can_go_next());

        nav.next();
        let change = nav.next();
        assert!(change.is_none(), "already on the last slide");
        assert_eq!(nav.current_index(), 4);
        assert!(!nav.snapshot().can_go_next());
        assert!(nav.snapshot().can_go_previous());
    }

    #[test]
    fn test_single_slide_deck() {
        let mut nav = Navigator::new(deck(1));
        assert!(nav.next().is_none());
        assert!(nav.previous().is_none());
        let snap = nav.snapshot();
        assert!(!snap.can_go_next());
        assert!(!snap.can_go_previous());
        assert_eq!(snap.progress(), 1.0);
    }

    #[test]
    fn test_change_presentation_fields() {
        let mut nav = Navigator::new(deck(4));
        let change = nav.go_to(1).unwrap();
        assert_eq!(change.counter(), "2/4");
        assert_eq!(change.progress(), 0.5);
        assert_eq!(change.announcement(), "Title 1, slide 2 of 4");
    }

    #[test]
    fn test_announcement_falls_back_to_position() {
        let deck = Deck::new(vec![Slide::new(None, "a"), Slide::new(None, "b")]).unwrap();
        let mut nav = Navigator::new(deck);
        let change = nav.next().unwrap();
        assert_eq!(change.announcement(), "Slide 2, slide 2 of 2");
    }

    #[test]
    fn test_first_and_last() {
        let mut nav = Navigator::new(deck(6));
        assert_eq!(nav.last().unwrap().to, 5);
        assert_eq!(nav.first().unwrap().to, 0);
        assert_eq!(nav.slide_state(0), Some(SlideState::Active));
        assert_eq!(nav.slide_state(5), Some(SlideState::Inactive));
        assert_eq!(nav.slide_state(6), None);
    }
}
