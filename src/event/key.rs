use std::borrow::{Borrow, Cow};
use std::fmt;

use crate::shared::BusError;

/// A payload type that can be posted on an [`EventBus`](super::EventBus)
///
/// The key is the sole routing identity: registration and posting both read
/// it from here, so a listener registered for `T` always sees posts of `T`.
/// Two types declaring the same key share one event source.
///
/// Most types implement this through [`impl_event!`](crate::impl_event),
/// which uses the unqualified type name as the key.
pub trait Event: Send + Sync + 'static {
    /// Routing key for this payload type
    const KEY: &'static str;
}

/// Implements [`Event`] for one or more types
///
/// ```
/// use eventbus::{impl_event, Event};
///
/// struct PlayerJoined;
/// struct Tick;
/// struct Renamed;
///
/// impl_event!(PlayerJoined, Tick);
/// impl_event!(Renamed => "player.renamed");
///
/// assert_eq!(<PlayerJoined as Event>::KEY, "PlayerJoined");
/// assert_eq!(<Renamed as Event>::KEY, "player.renamed");
/// ```
#[macro_export]
macro_rules! impl_event {
    ($ty:ty => $key:expr) => {
        impl $crate::Event for $ty {
            const KEY: &'static str = $key;
        }
    };
    ($($ty:ident),+ $(,)?) => {
        $(
            impl $crate::Event for $ty {
                const KEY: &'static str = stringify!($ty);
            }
        )+
    };
}

impl_event!(String, bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

/// Identity used to route a posted value to its event source
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventKey(Cow<'static, str>);

impl EventKey {
    /// Key of the payload type `T`
    pub fn of<T: Event>() -> Self {
        Self(Cow::Borrowed(T::KEY))
    }

    /// Explicit key chosen by the caller
    ///
    /// Blank keys are rejected since they can never be derived from a type.
    pub fn new(key: impl Into<Cow<'static, str>>) -> Result<Self, BusError> {
        let key = key.into();
        Self::validate(&key)?;
        Ok(Self(key))
    }

    /// Rejects blank keys without allocating a new key
    pub fn validate(key: &str) -> Result<(), BusError> {
        if key.trim().is_empty() {
            return Err(BusError::InvalidKey(key.to_string()));
        }
        Ok(())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for EventKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EventKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
