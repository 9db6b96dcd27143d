//! Lazily rendered failure messages.
//!
//! Most expectations pass, so matchers never format their messages up front.
//! A [`Message`] holds a thunk and only produces text when it is displayed.

use std::fmt;
use std::rc::Rc;

/// A deferred string.
///
/// Building a `Message` captures the arguments but does no formatting; the
/// text is produced each time the message is displayed. Clones share the
/// same thunk.
#[derive(Clone)]
pub struct Message<'a> {
    render: Rc<dyn Fn() -> String + 'a>,
}

impl<'a> Message<'a> {
    /// Wrap a closure that renders the message text.
    #[must_use]
    pub fn lazy<F>(render: F) -> Self
    where
        F: Fn() -> String + 'a,
    {
        Self {
            render: Rc::new(render),
        }
    }

    /// A message whose text is already known.
    #[must_use]
    pub fn from_static(text: &'static str) -> Self {
        Self::lazy(move || text.to_string())
    }

    /// Render the message.
    #[must_use]
    pub fn render(&self) -> String {
        (self.render)()
    }
}

impl fmt::Display for Message<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl fmt::Debug for Message<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Message").field(&self.render()).finish()
    }
}

/// Build a [`Message`] the way `format!` builds a `String`, except that the
/// formatting happens only when the message is read.
///
/// Arguments are moved into the thunk, so pass references (or cheap clones)
/// for anything the caller still needs.
///
/// ```
/// use expecto_core::{errorf, Value};
///
/// let actual = Value::from(3);
/// let msg = errorf!("Expected '{}' but was '{}'", 4, &actual);
/// assert_eq!(msg.to_string(), "Expected '4' but was '3'");
/// ```
#[macro_export]
macro_rules! errorf {
    ($($arg:tt)*) => {
        $crate::Message::lazy(move || ::std::format!($($arg)*))
    };
}
