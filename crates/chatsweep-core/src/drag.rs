//! Drag-select gesture tracking.

use chatsweep_protocols::{Point, Rect};

/// Transient rectangle between pointer-down and pointer-up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragRectangle {
    pub origin: Point,
    pub current: Point,
}

impl DragRectangle {
    pub fn new(origin: Point) -> Self {
        Self {
            origin,
            current: origin,
        }
    }

    /// Normalized bounds, independent of drag direction.
    pub fn bounds(&self) -> Rect {
        Rect::from_points(self.origin, self.current)
    }

    pub fn travel(&self) -> f64 {
        self.origin.distance(&self.current)
    }
}

/// Turns pointer down/move/up into drag rectangles.
///
/// A press that never travels beyond the click threshold is a click; it
/// produces no rectangle and leaves item clicks to toggle. A press that
/// does travel suppresses the click the browser fires on release.
#[derive(Debug, Clone)]
pub struct DragSelectController {
    click_threshold: f64,
    active: Option<DragRectangle>,
    dragging: bool,
    suppress_click: bool,
}

impl DragSelectController {
    pub fn new(click_threshold: f64) -> Self {
        Self {
            click_threshold: click_threshold.max(0.0),
            active: None,
            dragging: false,
            suppress_click: false,
        }
    }

    pub fn is_tracking(&self) -> bool {
        self.active.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn current(&self) -> Option<&DragRectangle> {
        self.active.as_ref()
    }

    /// Begin tracking unless the press landed in the toolbar or outside the
    /// content area. Returns `true` when tracking started.
    pub fn pointer_down(&mut self, point: Point, in_toolbar: bool, in_content: bool) -> bool {
        self.suppress_click = false;
        if in_toolbar || !in_content {
            self.active = None;
            self.dragging = false;
            return false;
        }
        self.active = Some(DragRectangle::new(point));
        self.dragging = false;
        true
    }

    /// Update the rectangle. Returns its bounds once the press has become a
    /// drag, `None` while it is still a potential click or not tracking.
    pub fn pointer_move(&mut self, point: Point) -> Option<Rect> {
        let rect = self.active.as_mut()?;
        rect.current = point;
        if !self.dragging && rect.travel() > self.click_threshold {
            self.dragging = true;
        }
        self.dragging.then(|| rect.bounds())
    }

    /// Stop tracking. Returns the finished rectangle if the gesture was a drag.
    pub fn pointer_up(&mut self, point: Point) -> Option<DragRectangle> {
        let mut rect = self.active.take()?;
        rect.current = point;
        let was_drag = self.dragging || rect.travel() > self.click_threshold;
        self.dragging = false;
        self.suppress_click = was_drag;
        was_drag.then_some(rect)
    }

    /// Whether the next item click ends a drag and must be ignored. Resets the flag.
    pub fn take_click_suppression(&mut self) -> bool {
        std::mem::take(&mut self.suppress_click)
    }

    pub fn reset(&mut self) {
        self.active = None;
        self.dragging = false;
        self.suppress_click = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_in_toolbar_is_ignored() {
        let mut drag = DragSelectController::new(4.0);
        assert!(!drag.pointer_down(Point::new(5.0, 5.0), true, true));
        assert!(!drag.is_tracking());
        assert_eq!(drag.pointer_move(Point::new(50.0, 50.0)), None);
    }

    #[test]
    fn test_press_outside_content_is_ignored() {
        let mut drag = DragSelectController::new(4.0);
        assert!(!drag.pointer_down(Point::new(5.0, 5.0), false, false));
        assert!(!drag.is_tracking());
    }

    #[test]
    fn test_small_travel_stays_click() {
        let mut drag = DragSelectController::new(4.0);
        drag.pointer_down(Point::new(10.0, 10.0), false, true);
        assert_eq!(drag.pointer_move(Point::new(12.0, 11.0)), None);
        assert!(drag.pointer_up(Point::new(12.0, 11.0)).is_none());
        assert!(!drag.take_click_suppression());
    }

    #[test]
    fn test_drag_reports_normalized_bounds() {
        let mut drag = DragSelectController::new(4.0);
        drag.pointer_down(Point::new(100.0, 200.0), false, true);
        let rect = drag.pointer_move(Point::new(20.0, 40.0)).unwrap();
        assert_eq!(rect, Rect::new(20.0, 40.0, 100.0, 200.0));
        assert!(drag.is_dragging());

        // Stays a drag even when the pointer comes back near the origin.
        assert!(drag.pointer_move(Point::new(101.0, 201.0)).is_some());
    }

    #[test]
    fn test_drag_suppresses_following_click_once() {
        let mut drag = DragSelectController::new(4.0);
        drag.pointer_down(Point::new(0.0, 0.0), false, true);
        drag.pointer_move(Point::new(0.0, 80.0));
        let finished = drag.pointer_up(Point::new(0.0, 80.0)).unwrap();
        assert_eq!(finished.bounds().height(), 80.0);
        assert!(!drag.is_tracking());

        assert!(drag.take_click_suppression());
        assert!(!drag.take_click_suppression());
    }

    #[test]
    fn test_new_press_clears_stale_suppression() {
        let mut drag = DragSelectController::new(4.0);
        drag.pointer_down(Point::new(0.0, 0.0), false, true);
        drag.pointer_move(Point::new(0.0, 80.0));
        drag.pointer_up(Point::new(0.0, 80.0));

        drag.pointer_down(Point::new(5.0, 5.0), false, true);
        drag.pointer_up(Point::new(5.0, 5.0));
        assert!(!drag.take_click_suppression());
    }

    #[test]
    fn test_up_without_down() {
        let mut drag = DragSelectController::new(4.0);
        assert!(drag.pointer_up(Point::new(1.0, 1.0)).is_none());
    }

    #[test]
    fn test_reset() {
        let mut drag = DragSelectController::new(4.0);
        drag.pointer_down(Point::new(0.0, 0.0), false, true);
        drag.pointer_move(Point::new(50.0, 50.0));
        drag.reset();
        assert!(!drag.is_tracking());
        assert!(!drag.is_dragging());
    }
}
