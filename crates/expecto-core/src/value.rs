//! Dynamic values handed to matchers.
//!
//! Matchers compare values whose concrete type is not known in advance, so
//! every argument is lifted into [`Value`], a closed tagged union. Coercions
//! (`crate::coerce`) are plain `match`es over its variants.

use std::fmt;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// Custom equality capability.
///
/// When the actual value of an equality check is an [`Value::Object`], its
/// `equals` decides the outcome instead of structural comparison.
pub trait Equality: fmt::Debug + Send + Sync {
    /// Whether `self` is equal to `other`.
    fn equals(&self, other: &Value) -> bool;

    /// Name reported in type errors.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Iteration capability.
///
/// Collection matchers call `iterate` once and coerce the returned value
/// again, so an implementation may hand back a list, a stream, or another
/// iterable.
pub trait Iterable: fmt::Debug + Send + Sync {
    /// Start a fresh iteration over the elements.
    fn iterate(&self) -> Value;

    /// Name reported in type errors.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// A pointer-like value: an address plus the pointee's type name.
///
/// Address `0` is a typed null, the equivalent of a non-empty container that
/// holds a null payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ref {
    addr: usize,
    pointee: &'static str,
}

impl Ref {
    /// Identity of a borrowed value.
    #[must_use]
    pub fn of<T: ?Sized>(value: &T) -> Self {
        Self {
            addr: std::ptr::from_ref(value).cast::<()>().addr(),
            pointee: std::any::type_name::<T>(),
        }
    }

    /// Identity of a raw pointer; a null pointer becomes a typed null.
    #[must_use]
    pub fn from_ptr<T: ?Sized>(ptr: *const T) -> Self {
        Self {
            addr: ptr.cast::<()>().addr(),
            pointee: std::any::type_name::<T>(),
        }
    }

    /// Identity of the allocation behind an `Arc`.
    #[must_use]
    pub fn from_arc<T: ?Sized>(value: &Arc<T>) -> Self {
        Self::from_ptr(Arc::as_ptr(value))
    }

    /// A typed null pointer to `T`.
    #[must_use]
    pub fn null<T>() -> Self {
        Self::from_ptr(std::ptr::null::<T>())
    }

    /// The address, `0` for a typed null.
    #[must_use]
    pub const fn addr(&self) -> usize {
        self.addr
    }

    /// Type name of the pointee.
    #[must_use]
    pub const fn pointee(&self) -> &'static str {
        self.pointee
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        self.addr == 0
    }
}

/// Errors raised while draining a [`Stream`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DrainError {
    #[error("stream was not closed within {0:?}")]
    Timeout(Duration),
}

/// A closable channel of values.
///
/// Collection matchers drain the stream in receive order until every sender
/// has been dropped. Without a timeout that wait is unbounded: a stream
/// whose senders stay alive blocks the matcher forever.
#[derive(Debug, Clone)]
pub struct Stream {
    rx: Arc<Mutex<Receiver<Value>>>,
    timeout: Option<Duration>,
}

impl Stream {
    /// A stream that drains until the channel closes.
    #[must_use]
    pub fn new(rx: Receiver<Value>) -> Self {
        Self {
            rx: Arc::new(Mutex::new(rx)),
            timeout: None,
        }
    }

    /// A stream that gives up when no element or close arrives within
    /// `timeout`.
    #[must_use]
    pub fn with_timeout(rx: Receiver<Value>, timeout: Duration) -> Self {
        Self {
            rx: Arc::new(Mutex::new(rx)),
            timeout: Some(timeout),
        }
    }

    /// Create a channel and wrap its receiving end.
    #[must_use]
    pub fn channel() -> (Sender<Value>, Self) {
        let (tx, rx) = mpsc::channel();
        (tx, Self::new(rx))
    }

    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Receive every remaining element.
    ///
    /// # Errors
    /// Returns `DrainError::Timeout` if a timeout is set and the channel
    /// stays open and silent for longer than that.
    pub fn drain(&self) -> Result<Vec<Value>, DrainError> {
        let rx = self.rx.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(timeout) = self.timeout else {
            return Ok(rx.iter().collect());
        };

        let mut items = Vec::new();
        loop {
            match rx.recv_timeout(timeout) {
                Ok(item) => items.push(item),
                Err(RecvTimeoutError::Disconnected) => return Ok(items),
                Err(RecvTimeoutError::Timeout) => return Err(DrainError::Timeout(timeout)),
            }
        }
    }

    fn same(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.rx, &other.rx)
    }
}

/// A dynamically typed value.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    Int(i64),
    Uint(u64),
    F32(f32),
    F64(f64),
    Char(char),
    Str(String),
    Ref(Ref),
    List(Vec<Value>),
    Stream(Stream),
    Iter(Arc<dyn Iterable>),
    Object(Arc<dyn Equality>),
}

impl Value {
    /// Wrap a value that has its own equality.
    #[must_use]
    pub fn object<T: Equality + 'static>(value: T) -> Self {
        Self::Object(Arc::new(value))
    }

    /// Wrap a value that can be iterated.
    #[must_use]
    pub fn iterable<T: Iterable + 'static>(value: T) -> Self {
        Self::Iter(Arc::new(value))
    }

    /// Name of the runtime type, used in error messages.
    #[must_use]
    pub fn type_name(&self) -> String {
        match self {
            Self::Nil => "nil".into(),
            Self::Bool(_) => "bool".into(),
            Self::Int(_) => "int".into(),
            Self::Uint(_) => "uint".into(),
            Self::F32(_) => "f32".into(),
            Self::F64(_) => "f64".into(),
            Self::Char(_) => "char".into(),
            Self::Str(_) => "string".into(),
            Self::Ref(r) => format!("*{}", r.pointee()),
            Self::List(_) => "list".into(),
            Self::Stream(_) => "stream".into(),
            Self::Iter(it) => it.type_name().into(),
            Self::Object(obj) => obj.type_name().into(),
        }
    }
}

/// Structural equality.
///
/// Numbers compare by value within their family (integers across
/// signedness, floats across widths). Lists compare element-wise with
/// `coerce::are_equal`, so nested objects keep their custom equality.
/// Streams and iterables are only equal to themselves.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Nil, Self::Nil) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Uint(a), Self::Uint(b)) => a == b,
            (Self::Int(a), Self::Uint(b)) | (Self::Uint(b), Self::Int(a)) => {
                i128::from(*a) == i128::from(*b)
            }
            (Self::F32(a), Self::F32(b)) => a == b,
            (Self::F64(a), Self::F64(b)) => a == b,
            (Self::F32(a), Self::F64(b)) | (Self::F64(b), Self::F32(a)) => f64::from(*a) == *b,
            (Self::Char(a), Self::Char(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Ref(a), Self::Ref(b)) => {
                a.addr() == b.addr() && (!a.is_null() || a.pointee() == b.pointee())
            }
            (Self::List(a), Self::List(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b)
                        .all(|(x, y)| crate::coerce::are_equal(x, y))
            }
            (Self::Stream(a), Self::Stream(b)) => a.same(b),
            (Self::Iter(a), Self::Iter(b)) => Arc::ptr_eq(a, b),
            (Self::Object(a), Self::Object(_)) => crate::coerce::object_equals(a, other),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => f.write_str("<nil>"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Uint(v) => write!(f, "{v}"),
            Self::F32(v) => write!(f, "{v}"),
            Self::F64(v) => write!(f, "{v}"),
            Self::Char(v) => write!(f, "{v}"),
            Self::Str(v) => f.write_str(v),
            Self::Ref(r) if r.is_null() => f.write_str("<nil>"),
            Self::Ref(r) => write!(f, "{:#x}", r.addr()),
            Self::List(items) => DisplayList(items).fmt(f),
            Self::Stream(_) => f.write_str("<stream>"),
            Self::Iter(it) => write!(f, "{it:?}"),
            Self::Object(obj) => write!(f, "{obj:?}"),
        }
    }
}

/// Renders a slice of values as `[a b c]`.
#[derive(Debug, Clone, Copy)]
pub struct DisplayList<'a>(pub &'a [Value]);

impl fmt::Display for DisplayList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{item}")?;
        }
        f.write_str("]")
    }
}

macro_rules! impl_from {
    ($variant:ident: $ty:ty) => {
        impl From<$ty> for Value {
            fn from(v: $ty) -> Self {
                Self::$variant(v)
            }
        }
    };
    ($variant:ident as $target:ty: $($ty:ty),+) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::$variant(<$target>::from(v))
                }
            }
        )+
    };
}

impl_from!(Int as i64: i8, i16, i32, i64);
impl_from!(Uint as u64: u8, u16, u32, u64);
impl_from!(F64: f64);
impl_from!(F32: f32);
impl_from!(Bool: bool);
impl_from!(Char: char);
impl_from!(Str: String);
impl_from!(Str as String: &str);

impl From<isize> for Value {
    fn from(v: isize) -> Self {
        i64::try_from(v).map_or_else(|_| Self::Int(i64::MAX), Self::Int)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        u64::try_from(v).map_or_else(|_| Self::Uint(u64::MAX), Self::Uint)
    }
}

impl From<Ref> for Value {
    fn from(v: Ref) -> Self {
        Self::Ref(v)
    }
}

impl From<Stream> for Value {
    fn from(v: Stream) -> Self {
        Self::Stream(v)
    }
}

impl From<Receiver<Self>> for Value {
    fn from(rx: Receiver<Self>) -> Self {
        Self::Stream(Stream::new(rx))
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Nil, Into::into)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Self>, const N: usize> From<[T; N]> for Value {
    fn from(items: [T; N]) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Self>> FromIterator<T> for Value {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::List(iter.into_iter().map(Into::into).collect())
    }
}
