//! Route selection for one output channel.

use serde::{Deserialize, Serialize};

/// Source channel selected for an output channel.
///
/// Any value outside `[0, channels)` mutes the output; `-1` is the
/// canonical mute value written by the control surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Route(pub i64);

impl Route {
    pub const MUTE: Route = Route(-1);

    /// Route output `ch` from input `ch`.
    pub const fn identity(ch: usize) -> Self {
        Route(ch as i64)
    }

    /// Source channel index when the route is valid for `channels` inputs.
    #[inline]
    pub fn source(self, channels: usize) -> Option<usize> {
        usize::try_from(self.0).ok().filter(|&src| src < channels)
    }

    pub fn is_mute(self, channels: usize) -> bool {
        self.source(channels).is_none()
    }
}

impl Default for Route {
    fn default() -> Self {
        Route::MUTE
    }
}

impl From<i64> for Route {
    fn from(value: i64) -> Self {
        Route(value)
    }
}

impl From<Route> for i64 {
    fn from(route: Route) -> Self {
        route.0
    }
}
