//! Scripted contacts on a manual clock.

use std::cell::RefCell;
use std::rc::Rc;
use swipetap_core::{
    AdapterKind, Clock, Dispatch, GestureEngine, GestureEvent, GestureKind, GestureOptions,
    InputEvent, InputPhase, ManualClock, Millis, Point, TouchRecord,
};

/// A gesture event and the engine time it was emitted at.
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    /// Emission time.
    pub at: Millis,
    /// The emitted event.
    pub event: GestureEvent,
}

impl Recorded {
    /// Kind of the recorded event.
    pub const fn kind(&self) -> GestureKind {
        self.event.kind()
    }
}

/// Test harness for driving a gesture engine.
pub struct Harness {
    engine: GestureEngine,
    clock: ManualClock,
    recorded: Rc<RefCell<Vec<Recorded>>>,
    last_dispatch: Dispatch,
}

impl Harness {
    /// Create a harness with default options, starting at t = 0.
    pub fn new(kind: AdapterKind) -> Self {
        Self::with_options(kind, GestureOptions::default())
    }

    /// Create a harness with custom options.
    pub fn with_options(kind: AdapterKind, options: GestureOptions) -> Self {
        let clock = ManualClock::default();
        let engine = GestureEngine::with_clock(kind, options, Rc::new(clock.clone()));
        let recorded = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&recorded);
        let time = clock.clone();
        engine.on_any(move |event| {
            sink.borrow_mut().push(Recorded {
                at: time.now(),
                event: event.clone(),
            });
        });

        Self {
            engine,
            clock,
            recorded,
            last_dispatch: Dispatch::default(),
        }
    }

    // === Time ===

    /// Current harness time.
    pub fn now(&self) -> Millis {
        self.engine.now()
    }

    /// Advance to `t`, firing every deadline up to and including `t`.
    pub fn at(&mut self, t: Millis) -> &mut Self {
        self.advance_to(t);
        self
    }

    /// Advance to `t`, firing every deadline up to and including `t`.
    ///
    /// Each deadline fires with the clock set to exactly its due time.
    pub fn advance_to(&mut self, t: Millis) {
        while let Some(due) = self.engine.next_deadline().filter(|due| *due <= t) {
            self.clock.set(due);
            self.engine.poll_timers();
        }
        self.clock.set(t);
    }

    /// Advance by `dt` ms.
    pub fn advance_by(&mut self, dt: Millis) -> &mut Self {
        let target = self.now() + dt;
        self.advance_to(target);
        self
    }

    // === Event Simulation ===

    /// Feed a raw input event at the current time.
    pub fn dispatch(&mut self, event: &InputEvent) -> &mut Self {
        self.last_dispatch = self.engine.handle_event(event);
        self
    }

    /// `pointerdown` for `id` at (x, y).
    pub fn pointer_down(&mut self, id: i32, x: f64, y: f64) -> &mut Self {
        self.dispatch(&InputEvent::pointer(InputPhase::Start, id, Point::new(x, y)))
    }

    /// `pointermove` for `id` to (x, y).
    pub fn pointer_move(&mut self, id: i32, x: f64, y: f64) -> &mut Self {
        self.dispatch(&InputEvent::pointer(InputPhase::Move, id, Point::new(x, y)))
    }

    /// `pointerup` for `id` at (x, y).
    pub fn pointer_up(&mut self, id: i32, x: f64, y: f64) -> &mut Self {
        self.dispatch(&InputEvent::pointer(InputPhase::End, id, Point::new(x, y)))
    }

    /// `pointercancel` for `id` at (x, y).
    pub fn pointer_cancel(&mut self, id: i32, x: f64, y: f64) -> &mut Self {
        self.dispatch(&InputEvent::pointer(InputPhase::Cancel, id, Point::new(x, y)))
    }

    /// `touchstart`; `touches` lists every touch still down, as `(id, x, y)`.
    pub fn touch_start(&mut self, touches: &[(i32, f64, f64)]) -> &mut Self {
        self.dispatch(&touch_event(InputPhase::Start, touches))
    }

    /// `touchmove` with every touch still down.
    pub fn touch_move(&mut self, touches: &[(i32, f64, f64)]) -> &mut Self {
        self.dispatch(&touch_event(InputPhase::Move, touches))
    }

    /// `touchend` with the touches remaining after the release.
    pub fn touch_end(&mut self, touches: &[(i32, f64, f64)]) -> &mut Self {
        self.dispatch(&touch_event(InputPhase::End, touches))
    }

    /// `touchcancel` with the touches remaining after the cancellation.
    pub fn touch_cancel(&mut self, touches: &[(i32, f64, f64)]) -> &mut Self {
        self.dispatch(&touch_event(InputPhase::Cancel, touches))
    }

    /// `mousedown` at (x, y).
    pub fn mouse_down(&mut self, x: f64, y: f64) -> &mut Self {
        self.dispatch(&InputEvent::mouse(InputPhase::Start, Point::new(x, y)))
    }

    /// `mousemove` to (x, y).
    pub fn mouse_move(&mut self, x: f64, y: f64) -> &mut Self {
        self.dispatch(&InputEvent::mouse(InputPhase::Move, Point::new(x, y)))
    }

    /// `mouseup` at (x, y).
    pub fn mouse_up(&mut self, x: f64, y: f64) -> &mut Self {
        self.dispatch(&InputEvent::mouse(InputPhase::End, Point::new(x, y)))
    }

    // === Scripts ===

    /// Press and release the primary contact at `point` after `hold` ms.
    ///
    /// Uses the event family of the engine's adapter.
    pub fn tap_at(&mut self, point: Point, hold: Millis) -> &mut Self {
        self.press(point).advance_by(hold);
        self.release(point)
    }

    /// Drag the primary contact from `from` to `to` in a straight line over
    /// `duration` ms with `samples` moves, then release.
    pub fn swipe(&mut self, from: Point, to: Point, duration: Millis, samples: u32) -> &mut Self {
        self.press(from);
        let steps = samples.max(1);
        for i in 1..=steps {
            let t = f64::from(i) / f64::from(steps);
            self.advance_by(duration / f64::from(steps));
            let p = Point::new(from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t);
            self.drag(p);
        }
        self.release(to)
    }

    /// Start the primary contact.
    pub fn press(&mut self, point: Point) -> &mut Self {
        match self.engine.kind() {
            AdapterKind::Pointer => self.pointer_down(1, point.x, point.y),
            AdapterKind::Touch | AdapterKind::TouchAndMouse => {
                self.touch_start(&[(0, point.x, point.y)])
            }
            AdapterKind::Mouse => self.mouse_down(point.x, point.y),
        }
    }

    /// Move the primary contact.
    pub fn drag(&mut self, point: Point) -> &mut Self {
        match self.engine.kind() {
            AdapterKind::Pointer => self.pointer_move(1, point.x, point.y),
            AdapterKind::Touch | AdapterKind::TouchAndMouse => {
                self.touch_move(&[(0, point.x, point.y)])
            }
            AdapterKind::Mouse => self.mouse_move(point.x, point.y),
        }
    }

    /// Release the primary contact.
    pub fn release(&mut self, point: Point) -> &mut Self {
        match self.engine.kind() {
            AdapterKind::Pointer => self.pointer_up(1, point.x, point.y),
            AdapterKind::Touch | AdapterKind::TouchAndMouse => self.touch_end(&[]),
            AdapterKind::Mouse => self.mouse_up(point.x, point.y),
        }
    }

    // === Queries ===

    /// Everything emitted so far, pointer-family events included.
    pub fn recorded(&self) -> Vec<Recorded> {
        self.recorded.borrow().clone()
    }

    /// Recognized gestures only (no pointer-family events).
    pub fn gestures(&self) -> Vec<Recorded> {
        self.recorded
            .borrow()
            .iter()
            .filter(|r| !r.kind().is_pointer_family())
            .cloned()
            .collect()
    }

    /// Kinds of the recognized gestures, in emission order.
    pub fn kinds(&self) -> Vec<GestureKind> {
        self.gestures().iter().map(Recorded::kind).collect()
    }

    /// Number of recorded events of `kind`.
    pub fn count(&self, kind: GestureKind) -> usize {
        self.recorded
            .borrow()
            .iter()
            .filter(|r| r.kind() == kind)
            .count()
    }

    /// Forget everything recorded so far.
    pub fn clear(&mut self) -> &mut Self {
        self.recorded.borrow_mut().clear();
        self
    }

    /// The dispatch returned for the most recent input event.
    pub const fn last_dispatch(&self) -> &Dispatch {
        &self.last_dispatch
    }

    /// The engine under test.
    pub const fn engine(&self) -> &GestureEngine {
        &self.engine
    }

    /// Mutable access to the engine under test.
    pub fn engine_mut(&mut self) -> &mut GestureEngine {
        &mut self.engine
    }

    // === Assertions ===

    /// Assert the recognized gestures so far, in order.
    pub fn assert_gestures(&self, expected: &[GestureKind]) -> &Self {
        let kinds = self.kinds();
        assert_eq!(kinds, expected, "Expected gestures {expected:?}, got {kinds:?}");
        self
    }

    /// Assert how many events of `kind` were recorded.
    pub fn assert_count(&self, kind: GestureKind, expected: usize) -> &Self {
        let actual = self.count(kind);
        assert_eq!(
            actual, expected,
            "Expected {expected} {kind} event(s), found {actual}"
        );
        self
    }
}

fn touch_event(phase: InputPhase, touches: &[(i32, f64, f64)]) -> InputEvent {
    InputEvent::touch(
        phase,
        touches
            .iter()
            .map(|&(id, x, y)| TouchRecord::new(id, Point::new(x, y)))
            .collect(),
    )
}
