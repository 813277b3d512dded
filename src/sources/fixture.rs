//! Fixed sample breach set used when no live service is configured

use super::traits::*;
use crate::breach::RawBreachRecord;
use crate::error::LookupError;
use crate::query::SearchQuery;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde_json::json;
use std::sync::Mutex;

/// Default chance that a lookup returns a sample record
pub const DEFAULT_HIT_RATE: f64 = 0.7;

/// Offline source that answers from two well-known sample breaches
pub struct FixtureBreachSet {
    samples: Vec<RawBreachRecord>,
    hit_rate: f64,
    rng: Mutex<StdRng>,
}

impl FixtureBreachSet {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Deterministic sequence of answers for a given seed
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            samples: sample_breaches(),
            hit_rate: DEFAULT_HIT_RATE,
            rng: Mutex::new(rng),
        }
    }

    /// Set the probability of returning a record, clamped to `0.0..=1.0`
    pub fn with_hit_rate(mut self, hit_rate: f64) -> Self {
        self.hit_rate = if hit_rate.is_finite() {
            hit_rate.clamp(0.0, 1.0)
        } else {
            DEFAULT_HIT_RATE
        };
        self
    }

    pub fn hit_rate(&self) -> f64 {
        self.hit_rate
    }

    pub fn samples(&self) -> &[RawBreachRecord] {
        &self.samples
    }

    /// Draw zero or one sample record
    pub fn draw(&self) -> Vec<RawBreachRecord> {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());

        if !rng.gen_bool(self.hit_rate) {
            return Vec::new();
        }

        self.samples
            .choose(&mut *rng)
            .cloned()
            .into_iter()
            .collect()
    }
}

impl Default for FixtureBreachSet {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LookupSource for FixtureBreachSet {
    fn name(&self) -> &str {
        "fixture"
    }

    async fn lookup(&self, _query: &SearchQuery) -> Result<Vec<RawBreachRecord>, LookupError> {
        Ok(self.draw())
    }
}

fn sample_breaches() -> Vec<RawBreachRecord> {
    let samples = [
        json!({
            "Title": "Adobe",
            "Domain": "adobe.com",
            "BreachDate": "2013-10-04",
            "Description": "In October 2013, 153 million Adobe accounts were breached with each containing an internal ID, username, email, <em>encrypted</em> password and a password hint in plain text. The password cryptography was poorly done and many were quickly resolved back to plain text. The unencrypted hints also <a href=\"https://www.troyhunt.com/adobe-credentials-and-serious/\" target=\"_blank\" rel=\"noopener\">disclosed much about the passwords</a> adding further to the risk that hundreds of millions of Adobe customers already faced.",
            "IsVerified": true,
            "PwnCount": 152445165u64,
            "DataClasses": ["Email addresses", "Password hints", "Passwords", "Usernames"],
            "LogoPath": "https://haveibeenpwned.com/Content/Images/PwnedLogos/Adobe.png"
        }),
        json!({
            "Title": "Canva",
            "Domain": "canva.com",
            "BreachDate": "2019-05-24",
            "Description": "In May 2019, the graphic design tool website <a href=\"https://support.canva.com/contact/customer-support/may-24-security-incident-faqs/\" target=\"_blank\" rel=\"noopener\">Canva suffered a data breach</a> that impacted 137 million subscribers. The exposed data included email addresses, usernames, names, cities of residence and passwords stored as bcrypt hashes for users not using social logins.",
            "IsVerified": true,
            "PwnCount": 137272116u64,
            "DataClasses": ["Email addresses", "Geographic locations", "Names", "Passwords", "Usernames"],
            "LogoPath": "https://haveibeenpwned.com/Content/Images/PwnedLogos/Canva.png"
        }),
    ];

    samples
        .into_iter()
        .filter_map(|value| serde_json::from_value(value).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_load() {
        let fixture = FixtureBreachSet::with_seed(1);
        let titles: Vec<_> = fixture
            .samples()
            .iter()
            .filter_map(|r| r.title.as_deref())
            .collect();
        assert_eq!(titles, vec!["Adobe", "Canva"]);
    }

    #[test]
    fn test_same_seed_same_answers() {
        let a = FixtureBreachSet::with_seed(42);
        let b = FixtureBreachSet::with_seed(42);

        for _ in 0..20 {
            assert_eq!(a.draw(), b.draw());
        }
    }

    #[test]
    fn test_hit_rate_extremes() {
        let always = FixtureBreachSet::with_seed(7).with_hit_rate(1.0);
        let never = FixtureBreachSet::with_seed(7).with_hit_rate(0.0);

        for _ in 0..50 {
            assert_eq!(always.draw().len(), 1);
            assert!(never.draw().is_empty());
        }

        assert_eq!(FixtureBreachSet::new().with_hit_rate(3.0).hit_rate(), 1.0);
        assert_eq!(
            FixtureBreachSet::new().with_hit_rate(f64::NAN).hit_rate(),
            DEFAULT_HIT_RATE
        );
    }

    #[test]
    fn test_hit_rate_is_roughly_seventy_percent() {
        let fixture = FixtureBreachSet::with_seed(2024);
        let hits = (0..2000).filter(|_| !fixture.draw().is_empty()).count();
        assert!((1200..1600).contains(&hits), "hits = {}", hits);
    }

    #[tokio::test]
    async fn test_lookup_never_fails() {
        let fixture = FixtureBreachSet::new();
        for _ in 0..100 {
            let records = tokio_test::assert_ok!(
                fixture.lookup(&SearchQuery::email("alice@example.com")).await
            );
            assert!(records.len() <= 1);
        }
    }
}
