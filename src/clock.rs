use super::{
    geometry::{Polygon, Rect},
    hand::{HandKind, HandState, Surface, rotate_and_place, update_hand_state},
    time_state::{HandAngles, TimeState},
};

/// Consumer of the draw list produced by [`Clock::render`].
pub trait Painter {
    fn draw_face(&mut self, bounds: Rect);
    fn fill_polygon(&mut self, kind: HandKind, polygon: &Polygon);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Padding {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Padding {
    pub fn uniform(amount: u32) -> Self {
        Self {
            left: amount,
            right: amount,
            top: amount,
            bottom: amount,
        }
    }
}

/// Everything that survives a surface teardown. Geometry is rebuilt on resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockState {
    pub elapsed_seconds: i64,
}

pub struct Clock {
    time: TimeState,
    surface: Surface,
    hands: [HandState; 3],
    needs_redraw: bool,
}

impl Clock {
    pub fn new(time: TimeState) -> Self {
        let mut clock = Self {
            time,
            surface: Surface::default(),
            hands: [HandState::default(); 3],
            needs_redraw: false,
        };
        clock.update_hands();
        clock.rotate_hands();
        clock
    }

    pub fn on_resize(&mut self, width: u32, height: u32, padding: Padding) {
        self.surface = Surface::new(
            width.saturating_sub(padding.left.saturating_add(padding.right)),
            height.saturating_sub(padding.top.saturating_add(padding.bottom)),
        );
        log::debug!(
            "Clock resized to {}x{}",
            self.surface.width,
            self.surface.height
        );

        self.update_hands();
        self.rotate_hands();
        self.needs_redraw = true;
    }

    pub fn on_tick(&mut self) {
        self.time.tick();
        self.rotate_hands();
        self.needs_redraw = true;
    }

    /// Returns whether a redraw was requested since the last call.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    pub fn render<P: Painter>(&self, painter: &mut P) {
        painter.draw_face(self.surface.bounds());
        for kind in HandKind::ALL {
            painter.fill_polygon(kind, &self.hands[kind.index()].polygon);
        }
    }

    pub fn save_state(&self) -> ClockState {
        ClockState {
            elapsed_seconds: self.time.snapshot(),
        }
    }

    pub fn restore_state(&mut self, state: ClockState) {
        self.time.restore(state.elapsed_seconds);
        self.rotate_hands();
        self.needs_redraw = true;
    }

    pub fn angles(&self) -> HandAngles {
        self.time.current_angles()
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn hand(&self, kind: HandKind) -> &HandState {
        &self.hands[kind.index()]
    }

    fn update_hands(&mut self) {
        for kind in HandKind::ALL {
            self.hands[kind.index()] = update_hand_state(&kind.spec(), &self.surface);
        }
    }

    fn rotate_hands(&mut self) {
        let angles = self.time.current_angles();
        for kind in HandKind::ALL {
            let angle = angles.degrees(kind);
            let hand = &mut self.hands[kind.index()];
            hand.angle_degrees = angle;
            hand.polygon = rotate_and_place(hand, angle, &self.surface);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    #[derive(Debug, PartialEq)]
    enum DrawCall {
        Face(Rect),
        Hand(HandKind, Polygon),
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<DrawCall>,
    }

    impl Painter for Recorder {
        fn draw_face(&mut self, bounds: Rect) {
            self.calls.push(DrawCall::Face(bounds));
        }

        fn fill_polygon(&mut self, kind: HandKind, polygon: &Polygon) {
            self.calls.push(DrawCall::Hand(kind, *polygon));
        }
    }

    fn polygons(clock: &Clock) -> Vec<Polygon> {
        HandKind::ALL.iter().map(|k| clock.hand(*k).polygon).collect()
    }

    #[test]
    fn render_paints_face_then_hands_in_order() {
        let mut clock = Clock::new(TimeState::new(3661));
        clock.on_resize(400, 600, Padding::default());

        let mut recorder = Recorder::default();
        clock.render(&mut recorder);

        assert_eq!(recorder.calls.len(), 4);
        assert_eq!(recorder.calls[0], DrawCall::Face(Rect::from_size(400, 600)));
        let kinds: Vec<_> = recorder.calls[1..]
            .iter()
            .map(|call| match call {
                DrawCall::Hand(kind, _) => *kind,
                DrawCall::Face(_) => panic!("face drawn twice"),
            })
            .collect();
        assert_eq!(kinds, HandKind::ALL);
    }

    #[test]
    fn padding_shrinks_surface() {
        let mut clock = Clock::new(TimeState::new(0));
        clock.on_resize(
            440,
            640,
            Padding {
                left: 10,
                right: 30,
                top: 25,
                bottom: 15,
            },
        );
        assert_eq!(clock.surface(), Surface::new(400, 600));
        assert_eq!(clock.hand(HandKind::Second).length(), 330);
    }

    #[test]
    fn oversized_padding_saturates() {
        let mut clock = Clock::new(TimeState::new(0));
        clock.on_resize(10, 10, Padding::uniform(8));
        assert_eq!(clock.surface(), Surface::default());
    }

    #[test]
    fn tick_only_rotates() {
        let mut clock = Clock::new(TimeState::new(0));
        clock.on_resize(400, 600, Padding::default());
        let before = *clock.hand(HandKind::Second);

        clock.on_tick();
        let after = clock.hand(HandKind::Second);

        assert_eq!(after.rect, before.rect);
        assert_eq!(after.half_width, before.half_width);
        assert_eq!(after.angle_degrees, 6.0);
        assert_ne!(after.polygon, before.polygon);
    }

    #[test]
    fn resize_and_tick_commute() {
        let mut a = Clock::new(TimeState::new(3599));
        a.on_resize(300, 300, Padding::default());
        a.on_resize(400, 600, Padding::default());
        a.on_tick();

        let mut b = Clock::new(TimeState::new(3599));
        b.on_resize(300, 300, Padding::default());
        b.on_tick();
        b.on_resize(400, 600, Padding::default());

        assert_eq!(a.angles(), b.angles());
        assert_eq!(polygons(&a), polygons(&b));
    }

    #[test]
    fn redraw_requested_once_per_update() {
        let mut clock = Clock::new(TimeState::new(0));
        assert!(!clock.take_redraw());

        clock.on_resize(100, 100, Padding::default());
        clock.on_tick();
        assert!(clock.take_redraw());
        assert!(!clock.take_redraw());

        clock.on_tick();
        assert!(clock.take_redraw());
    }

    #[test]
    fn state_survives_recreation() {
        let mut clock = Clock::new(TimeState::new(45000));
        clock.on_resize(400, 600, Padding::default());
        clock.on_tick();
        let saved = clock.save_state();

        let mut recreated = Clock::new(TimeState::new(0));
        recreated.restore_state(saved);
        recreated.on_resize(400, 600, Padding::default());

        assert_eq!(recreated.save_state(), saved);
        assert_eq!(polygons(&recreated), polygons(&clock));
    }

    #[test]
    fn restore_rejects_negative_seconds() {
        let mut clock = Clock::new(TimeState::new(99));
        clock.restore_state(ClockState {
            elapsed_seconds: -1,
        });
        assert_eq!(clock.save_state().elapsed_seconds, 0);
        assert_eq!(clock.angles(), HandAngles::default());
    }

    #[test]
    fn unsized_clock_renders_points() {
        let clock = Clock::new(TimeState::new(12_345));
        let mut recorder = Recorder::default();
        clock.render(&mut recorder);

        assert_eq!(recorder.calls[0], DrawCall::Face(Rect::default()));
        for call in &recorder.calls[1..] {
            let DrawCall::Hand(_, polygon) = call else {
                panic!("expected a hand");
            };
            for p in polygon.points {
                assert!(p.distance_to(&Point::new(0.0, 0.0)) < 1e-3);
            }
        }
    }
}
