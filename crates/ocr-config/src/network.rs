//! Network profiles: protocol timing deltas per network class
//!
//! All deltas are nanoseconds. `alpha_ppb` is never part of a stored profile;
//! callers supply it per build and it is merged in with
//! [`NetworkParams::with_alpha_ppb`].
//!
//! Lookups by raw index saturate: any index at or beyond the end of the table
//! resolves to the first (slow) profile. This is the documented fallback for
//! unknown network classes, not an error path.

use crate::{OcrConfigError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const SECOND_NS: u64 = 1_000_000_000;

const fn secs(n: u64) -> u64 {
    n * SECOND_NS
}

/// Named latency/throughput class selecting a row of the profile table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum NetworkClass {
    /// Long heartbeat, conservative rounds
    Slow = 0,
    /// Slow rounds with a one minute heartbeat
    Moderate,
    /// Short rounds and heartbeat
    Fast,
    /// Very short intervals for test networks
    Testnet,
    /// Deviation-driven reporting with a daily heartbeat
    OnDemand,
    /// Default mainnet profile
    Mainnet,
}

impl NetworkClass {
    /// Every class in table order
    pub const ALL: [NetworkClass; 6] = [
        NetworkClass::Slow,
        NetworkClass::Moderate,
        NetworkClass::Fast,
        NetworkClass::Testnet,
        NetworkClass::OnDemand,
        NetworkClass::Mainnet,
    ];

    /// Position of this class in the profile table
    pub fn index(self) -> usize {
        self as usize
    }

    /// Stable lower-case name
    pub fn name(self) -> &'static str {
        match self {
            NetworkClass::Slow => "slow",
            NetworkClass::Moderate => "moderate",
            NetworkClass::Fast => "fast",
            NetworkClass::Testnet => "testnet",
            NetworkClass::OnDemand => "on-demand",
            NetworkClass::Mainnet => "mainnet",
        }
    }
}

impl fmt::Display for NetworkClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NetworkClass {
    type Err = OcrConfigError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        NetworkClass::ALL
            .into_iter()
            .find(|class| class.name() == wanted)
            .ok_or_else(|| {
                OcrConfigError::validation("network", format!("unknown network class '{s}'"))
            })
    }
}

/// Protocol timing parameters for one network class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkParams {
    /// Time before a follower starts a new epoch without progress
    pub delta_progress: u64,
    /// Interval for resending the latest new-epoch message
    pub delta_resend: u64,
    /// Round length
    pub delta_round: u64,
    /// Grace period for slow oracles within a round
    pub delta_grace: u64,
    /// Maximum time between reports (heartbeat)
    pub delta_c: u64,
    /// Deviation threshold in parts per billion
    #[serde(default, rename = "alphaPPB")]
    pub alpha_ppb: u64,
    /// Minimum delay between transmission stages
    pub delta_stage: u64,
}

impl NetworkParams {
    /// Copy of these params with the caller's deviation threshold merged in
    pub fn with_alpha_ppb(self, alpha_ppb: u64) -> Self {
        Self { alpha_ppb, ..self }
    }

    /// The seven values in on-chain order
    ///
    /// `deltaProgress, deltaResend, deltaRound, deltaGrace, deltaC, alphaPPB, deltaStage`
    pub fn packed(&self) -> [u64; 7] {
        [
            self.delta_progress,
            self.delta_resend,
            self.delta_round,
            self.delta_grace,
            self.delta_c,
            self.alpha_ppb,
            self.delta_stage,
        ]
    }
}

/// Built-in profiles, indexed by [`NetworkClass`]
pub static DEFAULT_PROFILES: [NetworkParams; 6] = [
    // slow
    NetworkParams {
        delta_progress: secs(23),
        delta_resend: secs(10),
        delta_round: secs(20),
        delta_grace: secs(15),
        delta_c: secs(10 * 60),
        alpha_ppb: 0,
        delta_stage: secs(20),
    },
    // moderate
    NetworkParams {
        delta_progress: secs(23),
        delta_resend: secs(10),
        delta_round: secs(20),
        delta_grace: secs(15),
        delta_c: secs(60),
        alpha_ppb: 0,
        delta_stage: secs(5),
    },
    // fast
    NetworkParams {
        delta_progress: secs(8),
        delta_resend: secs(5),
        delta_round: secs(5),
        delta_grace: secs(3),
        delta_c: secs(10),
        alpha_ppb: 0,
        delta_stage: secs(5),
    },
    // testnet
    NetworkParams {
        delta_progress: secs(2),
        delta_resend: secs(2),
        delta_round: secs(1),
        delta_grace: SECOND_NS / 2,
        delta_c: secs(1),
        alpha_ppb: 0,
        delta_stage: secs(5),
    },
    // on-demand
    NetworkParams {
        delta_progress: secs(23),
        delta_resend: secs(10),
        delta_round: secs(20),
        delta_grace: secs(15),
        delta_c: secs(24 * 60 * 60),
        alpha_ppb: 0,
        delta_stage: secs(60),
    },
    // mainnet
    NetworkParams {
        delta_progress: secs(35),
        delta_resend: secs(17),
        delta_round: secs(30),
        delta_grace: secs(12),
        delta_c: secs(60 * 60),
        alpha_ppb: 0,
        delta_stage: secs(60),
    },
];

/// Clamp a table index: anything out of range selects entry 0
pub fn clamp_profile_index(index: usize, len: usize) -> usize {
    if index < len {
        index
    } else {
        0
    }
}

/// Look up the built-in profile for a network class
pub fn lookup_profile(class: NetworkClass) -> NetworkParams {
    lookup_profile_index(class.index())
}

/// Look up a built-in profile by raw index, falling back to slow
pub fn lookup_profile_index(index: usize) -> NetworkParams {
    DEFAULT_PROFILES[clamp_profile_index(index, DEFAULT_PROFILES.len())]
}

/// Ordered profile table
///
/// Defaults to [`DEFAULT_PROFILES`]; a deployment whose contract expects a
/// different set of network classes can supply its own rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<NetworkParams>", into = "Vec<NetworkParams>")]
pub struct ProfileTable {
    profiles: Vec<NetworkParams>,
}

impl ProfileTable {
    /// Create a table from ordered rows; the table must not be empty
    pub fn new(profiles: Vec<NetworkParams>) -> Result<Self> {
        if profiles.is_empty() {
            return Err(OcrConfigError::validation(
                "profiles",
                "profile table must contain at least one entry",
            ));
        }
        Ok(Self { profiles })
    }

    /// Profile at `index`, or the first profile when out of range
    pub fn lookup(&self, index: usize) -> NetworkParams {
        self.profiles[clamp_profile_index(index, self.profiles.len())]
    }

    /// Profile for a network class
    pub fn lookup_class(&self, class: NetworkClass) -> NetworkParams {
        self.lookup(class.index())
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Always false; construction rejects empty tables
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Rows in table order
    pub fn iter(&self) -> impl Iterator<Item = &NetworkParams> {
        self.profiles.iter()
    }
}

impl Default for ProfileTable {
    fn default() -> Self {
        Self {
            profiles: DEFAULT_PROFILES.to_vec(),
        }
    }
}

impl TryFrom<Vec<NetworkParams>> for ProfileTable {
    type Error = OcrConfigError;

    fn try_from(profiles: Vec<NetworkParams>) -> Result<Self> {
        Self::new(profiles)
    }
}

impl From<ProfileTable> for Vec<NetworkParams> {
    fn from(table: ProfileTable) -> Self {
        table.profiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slow_profile_constants() {
        let slow = lookup_profile(NetworkClass::Slow);
        assert_eq!(slow.delta_progress, 23_000_000_000);
        assert_eq!(slow.delta_resend, 10_000_000_000);
        assert_eq!(slow.delta_round, 20_000_000_000);
        assert_eq!(slow.delta_grace, 15_000_000_000);
        assert_eq!(slow.delta_c, 600_000_000_000);
        assert_eq!(slow.delta_stage, 20_000_000_000);
        assert_eq!(slow.alpha_ppb, 0);
    }

    #[test]
    fn test_testnet_grace_is_half_second() {
        assert_eq!(lookup_profile(NetworkClass::Testnet).delta_grace, 500_000_000);
    }

    #[test]
    fn test_last_index_is_distinct_and_out_of_range_falls_back() {
        let last = lookup_profile_index(DEFAULT_PROFILES.len() - 1);
        assert_eq!(last, lookup_profile(NetworkClass::Mainnet));
        assert_ne!(last, lookup_profile_index(0));

        let slow = lookup_profile_index(0);
        assert_eq!(lookup_profile_index(DEFAULT_PROFILES.len()), slow);
        assert_eq!(lookup_profile_index(255), slow);
        assert_eq!(lookup_profile_index(usize::MAX), slow);
    }

    #[test]
    fn test_profiles_are_distinct() {
        for (i, a) in DEFAULT_PROFILES.iter().enumerate() {
            for b in DEFAULT_PROFILES.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_alpha_merge_and_packing() {
        let params = lookup_profile(NetworkClass::Fast).with_alpha_ppb(10_000_000);
        assert_eq!(
            params.packed(),
            [
                secs(8),
                secs(5),
                secs(5),
                secs(3),
                secs(10),
                10_000_000,
                secs(5)
            ]
        );
    }

    #[test]
    fn test_network_class_names() {
        for class in NetworkClass::ALL {
            assert_eq!(class.name().parse::<NetworkClass>().unwrap(), class);
        }
        assert_eq!("On_Demand".parse::<NetworkClass>().unwrap(), NetworkClass::OnDemand);
        assert!("warp".parse::<NetworkClass>().unwrap_err().is_validation());
        assert_eq!(NetworkClass::Testnet.index(), 3);
    }

    #[test]
    fn test_custom_table() {
        assert!(ProfileTable::new(Vec::new()).unwrap_err().is_validation());

        let fast = lookup_profile(NetworkClass::Fast);
        let table = ProfileTable::new(vec![fast]).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup(0), fast);
        assert_eq!(table.lookup_class(NetworkClass::Mainnet), fast);

        let default_table = ProfileTable::default();
        assert_eq!(default_table.len(), 6);
        assert_eq!(
            default_table.lookup_class(NetworkClass::Moderate),
            lookup_profile(NetworkClass::Moderate)
        );
    }

    #[test]
    fn test_table_serde_rejects_empty() {
        let json = serde_json::to_string(&ProfileTable::default()).unwrap();
        let restored: ProfileTable = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, ProfileTable::default());

        assert!(serde_json::from_str::<ProfileTable>("[]").is_err());
    }
}
