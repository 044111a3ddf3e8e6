use derivative::Derivative;
use serde::Serialize;

#[derive(Derivative, Clone, PartialEq, Eq, Serialize, Debug)]
#[derivative(Default)]
#[serde(tag = "type", content = "content")]
pub enum Loadable<R, E> {
    #[derivative(Default)]
    Loading,
    Ready(R),
    Err(E),
}

impl<R, E> Loadable<R, E> {
    #[inline]
    pub fn is_loading(&self) -> bool {
        matches!(self, Loadable::Loading)
    }
    #[inline]
    pub fn is_ready(&self) -> bool {
        matches!(self, Loadable::Ready(_))
    }
    #[inline]
    pub fn is_err(&self) -> bool {
        matches!(self, Loadable::Err(_))
    }
    #[inline]
    pub fn as_ref(&self) -> Loadable<&R, &E> {
        match self {
            Loadable::Loading => Loadable::Loading,
            Loadable::Ready(ready) => Loadable::Ready(ready),
            Loadable::Err(error) => Loadable::Err(error),
        }
    }
    #[inline]
    pub fn as_mut(&mut self) -> Loadable<&mut R, &mut E> {
        match self {
            Loadable::Loading => Loadable::Loading,
            Loadable::Ready(ready) => Loadable::Ready(ready),
            Loadable::Err(error) => Loadable::Err(error),
        }
    }
    #[inline]
    pub fn ready(self) -> Option<R> {
        match self {
            Loadable::Ready(ready) => Some(ready),
            _ => None,
        }
    }
}
