//! Selection of the native event family to listen to.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fatal environment errors, raised before any engine is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EnvironmentError {
    /// iOS Safari always exposes touch events; without them nothing works.
    #[error("iOS browser without touch event support")]
    IosWithoutTouch,
    /// No pointer, touch or mouse events.
    #[error("no supported input event family (pointer, touch or mouse)")]
    Unsupported,
}

/// Native event families the host exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Supports {
    /// `onpointerdown` is available.
    pub pointer: bool,
    /// `ontouchstart` is available.
    pub touch: bool,
    /// `onmousedown` is available.
    pub mouse: bool,
}

/// What adapter selection looks at.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Environment {
    /// `navigator.userAgent`
    pub user_agent: String,
    /// Feature flags.
    pub supports: Supports,
}

impl Environment {
    /// Create an environment description.
    #[must_use]
    pub fn new(user_agent: impl Into<String>, supports: Supports) -> Self {
        Self {
            user_agent: user_agent.into(),
            supports,
        }
    }
}

/// Which adapter drives the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AdapterKind {
    /// Pointer events.
    Pointer,
    /// Touch events.
    Touch,
    /// Mouse events.
    Mouse,
    /// Touch and mouse events together.
    TouchAndMouse,
}

/// True for iOS / iPadOS Safari-family user agents.
#[must_use]
pub fn is_ios(user_agent: &str) -> bool {
    user_agent.contains("like Mac OS X")
}

/// True for Android user agents.
#[must_use]
pub fn is_android(user_agent: &str) -> bool {
    user_agent.contains("Android")
}

/// Pick the adapter for `env`. Evaluated once per engine.
pub fn detect_adapter_kind(env: &Environment) -> Result<AdapterKind, EnvironmentError> {
    let supports = env.supports;
    // Mobile Safari also reports mouse support, but never fires mouse events
    // for touches.
    if is_ios(&env.user_agent) {
        return if supports.touch {
            Ok(AdapterKind::Touch)
        } else {
            Err(EnvironmentError::IosWithoutTouch)
        };
    }
    if supports.pointer {
        return Ok(AdapterKind::Pointer);
    }
    // Android fires both touch and mouse events for one touch.
    if is_android(&env.user_agent) {
        return Ok(AdapterKind::Touch);
    }
    match (supports.mouse, supports.touch) {
        (true, true) => Ok(AdapterKind::TouchAndMouse),
        (true, false) => Ok(AdapterKind::Mouse),
        (false, true) => Ok(AdapterKind::Touch),
        (false, false) => Err(EnvironmentError::Unsupported),
    }
}

/// Safari 13 (WebKit 605) drops rapid consecutive `pointerup`s unless some
/// `touchend` listener is registered.
#[must_use]
pub fn needs_touchend_workaround(env: &Environment) -> bool {
    env.user_agent.contains("AppleWebKit/605") && env.supports.pointer && env.supports.touch
}

#[cfg(test)]
mod tests {
    use super::*;

    const IPHONE: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 13_3 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/13.0.4 Mobile/15E148 Safari/604.1";
    const ANDROID: &str = "Mozilla/5.0 (Linux; Android 10; Pixel 3) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/80.0 Mobile Safari/537.36";
    const DESKTOP: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:120.0) Gecko/20100101 Firefox/120.0";

    const fn supports(pointer: bool, touch: bool, mouse: bool) -> Supports {
        Supports {
            pointer,
            touch,
            mouse,
        }
    }

    #[test]
    fn test_ios_uses_touch_even_with_pointer() {
        let env = Environment::new(IPHONE, supports(true, true, true));
        assert_eq!(detect_adapter_kind(&env), Ok(AdapterKind::Touch));
    }

    #[test]
    fn test_ios_without_touch_fails() {
        let env = Environment::new(IPHONE, supports(true, false, true));
        assert_eq!(
            detect_adapter_kind(&env),
            Err(EnvironmentError::IosWithoutTouch)
        );
    }

    #[test]
    fn test_pointer_preferred() {
        let env = Environment::new(DESKTOP, supports(true, true, true));
        assert_eq!(detect_adapter_kind(&env), Ok(AdapterKind::Pointer));
        let env = Environment::new(ANDROID, supports(true, true, true));
        assert_eq!(detect_adapter_kind(&env), Ok(AdapterKind::Pointer));
    }

    #[test]
    fn test_android_without_pointer_forces_touch() {
        let env = Environment::new(ANDROID, supports(false, true, true));
        assert_eq!(detect_adapter_kind(&env), Ok(AdapterKind::Touch));
    }

    #[test]
    fn test_touch_and_mouse() {
        let env = Environment::new(DESKTOP, supports(false, true, true));
        assert_eq!(detect_adapter_kind(&env), Ok(AdapterKind::TouchAndMouse));
    }

    #[test]
    fn test_single_family_fallbacks() {
        let env = Environment::new(DESKTOP, supports(false, false, true));
        assert_eq!(detect_adapter_kind(&env), Ok(AdapterKind::Mouse));
        let env = Environment::new(DESKTOP, supports(false, true, false));
        assert_eq!(detect_adapter_kind(&env), Ok(AdapterKind::Touch));
    }

    #[test]
    fn test_nothing_supported() {
        let env = Environment::new(DESKTOP, Supports::default());
        assert_eq!(
            detect_adapter_kind(&env),
            Err(EnvironmentError::Unsupported)
        );
    }

    #[test]
    fn test_touchend_workaround() {
        assert!(needs_touchend_workaround(&Environment::new(
            IPHONE,
            supports(true, true, true)
        )));
        assert!(!needs_touchend_workaround(&Environment::new(
            IPHONE,
            supports(false, true, true)
        )));
        assert!(!needs_touchend_workaround(&Environment::new(
            ANDROID,
            supports(true, true, true)
        )));
    }
}
