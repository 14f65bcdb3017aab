//! Navigation requests
//!
//! The wizard does not own the destination form; it only asks the host to
//! go there. Hosts plug in a [`Navigator`].

use crate::models::AppealType;
use crate::DEFAULT_FORM_ROUTE;
use std::collections::VecDeque;
use std::fmt;
use tracing::info;

/// Destinations the wizard can request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Blank appeal form pre-set to the chosen appeal type
    NewAppealForm { appeal_type: AppealType },
}

impl Route {
    /// Path plus query string, rooted at `form_route`
    pub fn to_url(&self, form_route: &str) -> String {
        match self {
            Route::NewAppealForm { appeal_type } => {
                format!("{}?type={}", form_route, appeal_type.as_str())
            }
        }
    }

    /// Appeal type carried as the `type` query parameter
    pub fn appeal_type(&self) -> AppealType {
        match self {
            Route::NewAppealForm { appeal_type } => *appeal_type,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_url(DEFAULT_FORM_ROUTE))
    }
}

/// Host-side router
pub trait Navigator {
    /// Request a route change. The wizard does not wait for the outcome.
    fn navigate(&mut self, route: Route);
}

/// Collects requests so a host event loop can act on them after the
/// current input has been handled
#[derive(Debug, Default)]
pub struct NavigationQueue {
    pending: VecDeque<Route>,
}

impl NavigationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the oldest pending request
    pub fn pop(&mut self) -> Option<Route> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Navigator for NavigationQueue {
    fn navigate(&mut self, route: Route) {
        info!(route = %route, "navigation requested");
        self.pending.push_back(route);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_url_carries_type_parameter() {
        let route = Route::NewAppealForm {
            appeal_type: AppealType::SecondInstance,
        };
        assert_eq!(route.to_url("/forms/appeal"), "/forms/appeal?type=second_instance");
        assert_eq!(route.to_string(), "/appeals/new?type=second_instance");
        assert_eq!(route.appeal_type(), AppealType::SecondInstance);
    }

    #[test]
    fn test_queue_is_fifo() {
        let mut queue = NavigationQueue::new();
        assert!(queue.is_empty());

        queue.navigate(Route::NewAppealForm {
            appeal_type: AppealType::PriorDefense,
        });
        queue.navigate(Route::NewAppealForm {
            appeal_type: AppealType::FirstInstance,
        });
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pop().map(|r| r.appeal_type()), Some(AppealType::PriorDefense));
        assert_eq!(queue.pop().map(|r| r.appeal_type()), Some(AppealType::FirstInstance));
        assert!(queue.pop().is_none());
    }
}
