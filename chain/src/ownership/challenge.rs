//! Ownership challenges.
//!
//! A challenge is the string `"{address}:{issued_at}:{tag}"`. Nothing is
//! stored server-side: the issue time travels inside the message the
//! client signs and is re-extracted on submission.

use std::fmt;

use crate::ledger::ChainError;

/// Separator between the three challenge fields.
pub const FIELD_SEPARATOR: char = ':';

/// A parsed or freshly issued ownership challenge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Challenge {
    pub address: String,
    pub issued_at: u64,
    pub tag: String,
}

impl Challenge {
    /// Builds the challenge for `address` issued at `now`.
    pub fn issue(address: impl Into<String>, now: u64, tag: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            issued_at: now,
            tag: tag.into(),
        }
    }

    /// Parses a message previously produced by [`Challenge::issue`].
    ///
    /// A message that does not split into exactly three fields is an
    /// [`ChainError::IncorrectMessageFormat`]; a timestamp that is not a
    /// positive integer is an [`ChainError::IncorrectTime`].
    pub fn parse(message: &str) -> Result<Self, ChainError> {
        let fields: Vec<&str> = message.split(FIELD_SEPARATOR).collect();
        let [address, issued_at, tag] = fields.as_slice() else {
            return Err(ChainError::IncorrectMessageFormat(message.to_string()));
        };

        let issued_at = match issued_at.parse::<u64>() {
            Ok(ts) if ts > 0 => ts,
            _ => {
                return Err(ChainError::IncorrectTime(format!(
                    "challenge timestamp {issued_at:?} is not a positive integer"
                )));
            }
        };

        Ok(Self {
            address: (*address).to_string(),
            issued_at,
            tag: (*tag).to_string(),
        })
    }

    /// Seconds elapsed between issuance and `now`.
    ///
    /// Negative when the challenge claims to come from the future.
    pub fn elapsed(&self, now: u64) -> i128 {
        i128::from(now) - i128::from(self.issued_at)
    }

    /// Fails with [`ChainError::IncorrectTime`] once `window_secs` or more
    /// have passed since issuance.
    pub fn check_window(&self, now: u64, window_secs: u64) -> Result<(), ChainError> {
        let elapsed = self.elapsed(now);
        if elapsed >= i128::from(window_secs) {
            return Err(ChainError::IncorrectTime(format!(
                "challenge issued {elapsed}s ago, validity window is {window_secs}s"
            )));
        }
        Ok(())
    }

    /// The exact string the client has to sign.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Challenge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{sep}{}{sep}{}",
            self.address,
            self.issued_at,
            self.tag,
            sep = FIELD_SEPARATOR
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: u64 = 1_700_000_000;

    #[test]
    fn issued_message_has_expected_shape() {
        let c = Challenge::issue("addr1", T, "starRegistry");
        assert_eq!(c.message(), "addr1:1700000000:starRegistry");
    }

    #[test]
    fn parse_inverts_issue() {
        let c = Challenge::issue("addr1", T, "starRegistry");
        assert_eq!(Challenge::parse(&c.message()).expect("parses"), c);
    }

    #[test]
    fn parse_rejects_wrong_field_count() {
        for msg in ["", "addr1", "addr1:1700000000", "a:1700000000:starRegistry:extra"] {
            let err = Challenge::parse(msg).unwrap_err();
            assert!(
                matches!(err, ChainError::IncorrectMessageFormat(_)),
                "unexpected error for {msg:?}: {err:?}"
            );
        }
    }

    #[test]
    fn parse_rejects_bad_timestamps_as_incorrect_time() {
        for msg in ["a:now:starRegistry", "a:0:starRegistry", "a:-5:starRegistry", "a::t"] {
            let err = Challenge::parse(msg).unwrap_err();
            assert!(
                matches!(err, ChainError::IncorrectTime(_)),
                "unexpected error for {msg:?}: {err:?}"
            );
        }
    }

    #[test]
    fn window_is_exclusive_at_the_upper_bound() {
        let c = Challenge::issue("addr1", T, "starRegistry");
        assert!(c.check_window(T, 300).is_ok());
        assert!(c.check_window(T + 299, 300).is_ok());
        assert!(matches!(
            c.check_window(T + 300, 300),
            Err(ChainError::IncorrectTime(_))
        ));
        assert!(c.check_window(T + 10_000, 300).is_err());
    }

    #[test]
    fn future_challenges_pass_the_window() {
        let c = Challenge::issue("addr1", T + 60, "starRegistry");
        assert_eq!(c.elapsed(T), -60);
        assert!(c.check_window(T, 300).is_ok());
    }
}
