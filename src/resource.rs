//! Status channel for fetch-driven views.

/// Lifecycle of a single fetch-driven value.
///
/// `Loading` and `Failed` keep whatever was shown before so a failed
/// refresh never blanks the view.
#[derive(Debug, Clone, PartialEq)]
pub enum Resource<T> {
    Idle,
    Loading { previous: Option<T> },
    Ready(T),
    Failed { message: String, previous: Option<T> },
}

impl<T> Default for Resource<T> {
    fn default() -> Self {
        Resource::Idle
    }
}

impl<T> Resource<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, Resource::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Resource::Loading { .. })
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Resource::Ready(_))
    }

    /// Latest data available, including data retained across loading/failure
    pub fn data(&self) -> Option<&T> {
        match self {
            Resource::Ready(value) => Some(value),
            Resource::Loading { previous } | Resource::Failed { previous, .. } => {
                previous.as_ref()
            }
            Resource::Idle => None,
        }
    }

    pub fn data_mut(&mut self) -> Option<&mut T> {
        match self {
            Resource::Ready(value) => Some(value),
            Resource::Loading { previous } | Resource::Failed { previous, .. } => {
                previous.as_mut()
            }
            Resource::Idle => None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            Resource::Ready(value) => Some(value),
            Resource::Loading { previous } | Resource::Failed { previous, .. } => previous,
            Resource::Idle => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Resource::Failed { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn start(&mut self) {
        let previous = std::mem::take(self).into_data();
        *self = Resource::Loading { previous };
    }

    pub fn resolve(&mut self, value: T) {
        *self = Resource::Ready(value);
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        let previous = std::mem::take(self).into_data();
        *self = Resource::Failed {
            message: message.into(),
            previous,
        };
    }

    /// Drop the error but keep any data
    pub fn dismiss_error(&mut self) {
        if let Resource::Failed { .. } = self {
            *self = match std::mem::take(self).into_data() {
                Some(value) => Resource::Ready(value),
                None => Resource::Idle,
            };
        }
    }

    pub fn clear(&mut self) {
        *self = Resource::Idle;
    }
}

/// Identifies one dispatched request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

/// Issues tickets; only the most recently issued one is current
#[derive(Debug, Default, Clone)]
pub struct TicketCounter {
    current: u64,
}

impl TicketCounter {
    pub fn issue(&mut self) -> Ticket {
        self.current += 1;
        Ticket(self.current)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.current
    }

    /// Make every outstanding ticket stale
    pub fn invalidate(&mut self) {
        self.current += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_keeps_previous_data() {
        let mut resource = Resource::Ready(vec![1, 2]);
        resource.start();
        assert!(resource.is_loading());
        assert_eq!(resource.data(), Some(&vec![1, 2]));

        resource.fail("boom");
        assert_eq!(resource.error(), Some("boom"));
        assert_eq!(resource.data(), Some(&vec![1, 2]));

        resource.dismiss_error();
        assert_eq!(resource, Resource::Ready(vec![1, 2]));
    }

    #[test]
    fn test_dismiss_error_without_data_goes_idle() {
        let mut resource: Resource<u8> = Resource::Idle;
        resource.start();
        resource.fail("nope");
        resource.dismiss_error();
        assert!(resource.is_idle());
    }

    #[test]
    fn test_only_latest_ticket_is_current() {
        let mut counter = TicketCounter::default();
        let first = counter.issue();
        let second = counter.issue();
        assert!(!counter.is_current(first));
        assert!(counter.is_current(second));

        counter.invalidate();
        assert!(!counter.is_current(second));
    }
}
