//! Client and time window types.

use serde::{Deserialize, Serialize};

use crate::error::{Result, RoutingError};
use crate::measure::{Duration, Load};

/// A time window constraint on the start of service at a client.
///
/// Service may start no later than `latest`. Arriving before `earliest` is
/// allowed, but the vehicle then waits.
///
/// # Examples
///
/// ```
/// use u_timewarp::models::TimeWindow;
///
/// let tw = TimeWindow::new(100, 200).unwrap();
/// assert!(tw.contains(150));
/// assert!(!tw.contains(250));
/// assert_eq!(tw.waiting_time(40), 60);
/// assert_eq!(tw.lateness(230), 30);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    earliest: Duration,
    latest: Duration,
}

impl TimeWindow {
    /// Upper bound used for windows that never close.
    ///
    /// Kept well below `Duration::MAX` so segment arithmetic on top of it
    /// cannot overflow.
    pub const HORIZON: Duration = Duration::MAX / 4;

    /// Creates a new time window.
    ///
    /// Fails if `earliest > latest`, `earliest` is negative or `latest`
    /// exceeds [`TimeWindow::HORIZON`].
    pub fn new(earliest: Duration, latest: Duration) -> Result<Self> {
        let tw = Self { earliest, latest };
        tw.validate()?;
        Ok(tw)
    }

    fn validate(&self) -> Result<()> {
        if self.earliest < 0 || self.earliest > self.latest {
            return Err(RoutingError::InvalidTimeWindow {
                earliest: self.earliest,
                latest: self.latest,
            });
        }
        if self.latest > Self::HORIZON {
            return Err(RoutingError::BeyondHorizon {
                field: "time window end",
                value: self.latest,
            });
        }
        Ok(())
    }

    /// A window open from time zero until [`TimeWindow::HORIZON`].
    pub fn unbounded() -> Self {
        Self {
            earliest: 0,
            latest: Self::HORIZON,
        }
    }

    /// Earliest allowable service start.
    pub fn earliest(&self) -> Duration {
        self.earliest
    }

    /// Latest allowable service start.
    pub fn latest(&self) -> Duration {
        self.latest
    }

    /// Returns `true` if service may start at `time`.
    pub fn contains(&self, time: Duration) -> bool {
        time >= self.earliest && time <= self.latest
    }

    /// Waiting incurred when arriving at `arrival`.
    pub fn waiting_time(&self, arrival: Duration) -> Duration {
        (self.earliest - arrival).max(0)
    }

    /// Time warp incurred when arriving at `arrival`.
    pub fn lateness(&self, arrival: Duration) -> Duration {
        (arrival - self.latest).max(0)
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// A client (or depot) location.
///
/// Location 0 is conventionally the depot. Besides its coordinates a client
/// carries a demand, a service duration, a time window on the start of
/// service, and a release time before which no route visiting it may leave
/// the depot.
///
/// # Examples
///
/// ```
/// use u_timewarp::models::{Client, TimeWindow};
///
/// let c = Client::new(41, 49)
///     .with_demand(10)
///     .with_service_duration(15)
///     .with_time_window(TimeWindow::new(0, 100).unwrap());
/// assert_eq!(c.demand(), 10);
/// assert_eq!(c.time_window().latest(), 100);
/// assert_eq!(c.release_time(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    x: i64,
    y: i64,
    #[serde(default)]
    demand: Load,
    #[serde(default)]
    service_duration: Duration,
    #[serde(default)]
    time_window: TimeWindow,
    #[serde(default)]
    release_time: Duration,
}

impl Client {
    /// Creates a client at the given coordinates with no demand, no service
    /// time, an unbounded window and release time zero.
    pub fn new(x: i64, y: i64) -> Self {
        Self {
            x,
            y,
            demand: 0,
            service_duration: 0,
            time_window: TimeWindow::unbounded(),
            release_time: 0,
        }
    }

    /// Creates a depot at the given coordinates.
    pub fn depot(x: i64, y: i64) -> Self {
        Self::new(x, y)
    }

    /// Sets the demand.
    pub fn with_demand(mut self, demand: Load) -> Self {
        self.demand = demand;
        self
    }

    /// Sets the service duration.
    pub fn with_service_duration(mut self, duration: Duration) -> Self {
        self.service_duration = duration;
        self
    }

    /// Sets the time window.
    pub fn with_time_window(mut self, tw: TimeWindow) -> Self {
        self.time_window = tw;
        self
    }

    /// Sets the release time.
    pub fn with_release_time(mut self, release_time: Duration) -> Self {
        self.release_time = release_time;
        self
    }

    /// X-coordinate.
    pub fn x(&self) -> i64 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> i64 {
        self.y
    }

    pub fn demand(&self) -> Load {
        self.demand
    }

    pub fn service_duration(&self) -> Duration {
        self.service_duration
    }

    pub fn time_window(&self) -> &TimeWindow {
        &self.time_window
    }

    pub fn release_time(&self) -> Duration {
        self.release_time
    }

    /// Euclidean distance to another client, rounded to the nearest integer.
    pub fn distance_to(&self, other: &Client) -> i64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt().round() as i64
    }

    /// Checks that every time measure is non-negative and within
    /// [`TimeWindow::HORIZON`].
    ///
    /// Deserialized clients skip [`TimeWindow::new`], so the window is
    /// checked again here.
    pub(crate) fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("service duration", self.service_duration),
            ("release time", self.release_time),
        ] {
            if value < 0 {
                return Err(RoutingError::Negative { field, value });
            }
            if value > TimeWindow::HORIZON {
                return Err(RoutingError::BeyondHorizon { field, value });
            }
        }
        self.time_window.validate()
    }
}
