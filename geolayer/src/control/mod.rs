//! Turning user taps into point geometries.
//!
//! Gesture recognition is done by the host. It reports a recognized tap as a [`TouchEvent`] together with its
//! [`TapKind`]. The [`TapDispatcher`] converts the tap position into a geographic point using the
//! [`ScreenProjection`] of the current view and hands a [`Geometry::Point`] to every listener registered for that
//! kind of tap, in registration order.
//!
//! A double tap made with two fingers that land next to each other (within [`TAP_COALESCE_TOLERANCE_PX`] on both
//! axes) is treated as one single tap at the position of the first finger.

use std::fmt::{Debug, Formatter};

use geolayer_types::cartesian::Pixel;
use geolayer_types::projection::ScreenProjection;
use geolayer_types::Geometry;

/// Maximum distance in pixels (on each axis) between two touches of a double tap for them to count as one tap.
pub const TAP_COALESCE_TOLERANCE_PX: i32 = 5;

/// Id of a touch. Valid and unique only until the touch is ended.
pub type TouchId = u64;

/// One finger on the screen.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TouchPoint {
    /// Id of the touch.
    pub touch_id: TouchId,
    /// Position of the touch on the screen in pixels from the top-left corner.
    pub position: Pixel,
}

/// Touches that took part in a recognized tap, in the order they started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TouchEvent {
    touches: Vec<TouchPoint>,
}

impl TouchEvent {
    /// Creates an event from the list of touches.
    pub fn new(touches: Vec<TouchPoint>) -> Self {
        Self { touches }
    }

    /// Creates a one-finger event (e.g. a mouse click).
    pub fn single(position: Pixel) -> Self {
        Self::new(vec![TouchPoint {
            touch_id: 0,
            position,
        }])
    }

    /// The touch that started first.
    pub fn primary(&self) -> Option<&TouchPoint> {
        self.touches.first()
    }

    /// All touches of the event.
    pub fn touches(&self) -> &[TouchPoint] {
        &self.touches
    }
}

/// Kind of a recognized tap.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TapKind {
    /// Single tap.
    Single,
    /// Double tap.
    Double,
}

/// Resolves which listeners receive a tap and at which screen position.
///
/// Returns `None` if the event has no touches.
pub fn route_tap(kind: TapKind, event: &TouchEvent) -> Option<(TapKind, Pixel)> {
    let primary = event.primary()?;

    match (kind, event.touches()) {
        (TapKind::Double, [first, second, ..]) if are_close(first.position, second.position) => {
            Some((TapKind::Single, first.position))
        }
        _ => Some((kind, primary.position)),
    }
}

fn are_close(a: Pixel, b: Pixel) -> bool {
    (a.x - b.x).abs() <= TAP_COALESCE_TOLERANCE_PX && (a.y - b.y).abs() <= TAP_COALESCE_TOLERANCE_PX
}

/// Receives point geometries created from user taps.
pub trait TapListener {
    /// Handle the tap.
    fn on_tap(&self, geometry: &Geometry);
}

impl<T: Fn(&Geometry)> TapListener for T {
    fn on_tap(&self, geometry: &Geometry) {
        self(geometry)
    }
}

/// Handle of a registered listener, used to remove it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Ordered list of tap listeners.
#[derive(Default)]
pub struct TapListeners {
    next_id: u64,
    listeners: Vec<(ListenerId, Box<dyn TapListener>)>,
}

impl TapListeners {
    /// Adds the listener to the end of the list.
    pub fn add(&mut self, listener: impl TapListener + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes the listener. Returns false if there is no listener with this id.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let len = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != len
    }

    /// Calls every listener with the geometry in registration order. Returns the number of listeners called.
    pub fn dispatch(&self, geometry: &Geometry) -> usize {
        for (_, listener) in &self.listeners {
            listener.on_tap(geometry);
        }

        self.listeners.len()
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Returns true if no listeners are registered.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl Debug for TapListeners {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TapListeners")
            .field("len", &self.listeners.len())
            .finish()
    }
}

/// Separate listener lists for single and double taps.
#[derive(Debug, Default)]
pub struct TapDispatcher {
    single_tap: TapListeners,
    double_tap: TapListeners,
}

impl TapDispatcher {
    /// Listeners of the given kind of taps.
    pub fn listeners(&self, kind: TapKind) -> &TapListeners {
        match kind {
            TapKind::Single => &self.single_tap,
            TapKind::Double => &self.double_tap,
        }
    }

    /// Mutable access to the listeners of the given kind of taps.
    pub fn listeners_mut(&mut self, kind: TapKind) -> &mut TapListeners {
        match kind {
            TapKind::Single => &mut self.single_tap,
            TapKind::Double => &mut self.double_tap,
        }
    }

    /// Converts the tap into a point and gives it to the listeners chosen by [`route_tap`].
    ///
    /// Returns the number of listeners called. Nothing is dispatched if the event has no touches or the tap position
    /// cannot be converted into a geographic point.
    pub fn dispatch<P: ScreenProjection + ?Sized>(
        &self,
        kind: TapKind,
        event: &TouchEvent,
        projection: &P,
    ) -> usize {
        let Some((target, position)) = route_tap(kind, event) else {
            return 0;
        };

        let Some(point) = projection.from_pixel(position) else {
            log::warn!("Tap at pixel {position:?} is outside of the map");
            return 0;
        };

        if target != kind {
            log::debug!("Two-finger double tap at {position:?} is handled as a single tap");
        }

        self.listeners(target).dispatch(&Geometry::point(point))
    }
}
