//! # Run configuration
//!
//! [`AlmagestEnv`] is the immutable configuration handed to
//! [`Almagest::new`](crate::almagest::Almagest::new): where the observer stands, which civil
//! time zone events are rendered in, and which bodies the scheduler tracks.
//!
//! Nothing here reads files or the host environment. An external loader parses its own
//! format and builds the value, or deserializes it directly through `serde`.
//!
//! ## Usage
//!
//! ```rust
//! use almagest::constants::Body;
//! use almagest::env_state::AlmagestEnv;
//! use almagest::observers::Observer;
//! use almagest::time::zone::{DstRule, TimeZone};
//!
//! let boston = Observer::new(
//!     42.3333_f64.to_radians(),
//!     (-71.0833_f64).to_radians(),
//!     0.0,
//!     Some("Boston".into()),
//! )?;
//! let env = AlmagestEnv::new(
//!     boston,
//!     TimeZone::new("EST", -5.0, "EDT", DstRule::UnitedStates),
//!     vec![Body::Sun, Body::Moon],
//! );
//! assert_eq!(env.bodies.len(), 2);
//! # Ok::<(), almagest::almagest_errors::AlmagestError>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::{constants::Body, observers::Observer, time::zone::TimeZone};

/// Observer, time zone and tracked bodies.
///
/// The default is an observer at Greenwich, UTC, and every body of [`Body::ALL`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlmagestEnv {
    pub observer: Observer,
    pub time_zone: TimeZone,
    pub bodies: Vec<Body>,
}

impl Default for AlmagestEnv {
    fn default() -> Self {
        AlmagestEnv::new(Observer::default(), TimeZone::utc(), Body::ALL.to_vec())
    }
}

impl AlmagestEnv {
    /// Build a configuration. Duplicate bodies are dropped, first occurrence kept.
    pub fn new(observer: Observer, time_zone: TimeZone, bodies: Vec<Body>) -> Self {
        let mut unique = Vec::with_capacity(bodies.len());
        for body in bodies {
            if !unique.contains(&body) {
                unique.push(body);
            }
        }

        AlmagestEnv {
            observer,
            time_zone,
            bodies: unique,
        }
    }
}

#[cfg(test)]
mod env_state_test {
    use super::*;
    use crate::time::zone::DstRule;

    #[test]
    fn test_default_env() {
        let env = AlmagestEnv::default();
        assert_eq!(env.bodies, Body::ALL.to_vec());
        assert_eq!(env.time_zone, TimeZone::utc());
        assert_eq!(env.observer, Observer::default());
    }

    #[test]
    fn test_duplicate_bodies_dropped() {
        let env = AlmagestEnv::new(
            Observer::default(),
            TimeZone::new("CET", 1.0, "CEST", DstRule::EuropeanUnion),
            vec![Body::Moon, Body::Sun, Body::Moon, Body::Mars, Body::Sun],
        );
        assert_eq!(env.bodies, vec![Body::Moon, Body::Sun, Body::Mars]);
    }
}
