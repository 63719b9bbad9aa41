//! Browser event conversion: `web_sys` events to [`InputEvent`]s.
//!
//! Positions are client coordinates.

use swipetap_core::event::parse_type_name;
use swipetap_core::{InputEvent, InputFamily, InputPhase, Point, TouchRecord};
use wasm_bindgen::JsCast;
use web_sys::{MouseEvent, PointerEvent, TouchEvent};

/// Convert a native event, if its type is one the engine handles.
pub fn to_input_event(event: &web_sys::Event) -> Option<InputEvent> {
    let (family, phase) = parse_type_name(&event.type_())?;
    match family {
        InputFamily::Pointer => event
            .dyn_ref::<PointerEvent>()
            .map(|e| pointer_to_input(e, phase)),
        InputFamily::Touch => event
            .dyn_ref::<TouchEvent>()
            .map(|e| touch_to_input(e, phase)),
        InputFamily::Mouse => event
            .dyn_ref::<MouseEvent>()
            .map(|e| mouse_to_input(e, phase)),
    }
}

/// Client position of a mouse or pointer event.
pub fn client_point(event: &MouseEvent) -> Point {
    Point::new(f64::from(event.client_x()), f64::from(event.client_y()))
}

/// Convert a `PointerEvent`.
pub fn pointer_to_input(event: &PointerEvent, phase: InputPhase) -> InputEvent {
    InputEvent::pointer(phase, event.pointer_id(), client_point(event))
}

/// Convert a `MouseEvent`.
pub fn mouse_to_input(event: &MouseEvent, phase: InputPhase) -> InputEvent {
    InputEvent::mouse(phase, client_point(event))
}

/// Convert a `TouchEvent`, keeping the touches still on the surface.
pub fn touch_to_input(event: &TouchEvent, phase: InputPhase) -> InputEvent {
    InputEvent::touch(phase, touch_records(event))
}

/// `event.touches` in browser order.
pub fn touch_records(event: &TouchEvent) -> Vec<TouchRecord> {
    let touches = event.touches();
    (0..touches.length())
        .filter_map(|i| touches.get(i))
        .map(|touch| {
            TouchRecord::new(
                touch.identifier(),
                Point::new(f64::from(touch.client_x()), f64::from(touch.client_y())),
            )
        })
        .collect()
}
