//! Known-answer checks runnable from the command line.

use std::fmt;

use crate::codec::{decode_base58, decode_hex, encode_base58, encode_hex};
use crate::config::SearchConfig;
use crate::crypto::{
    checksum, private_key_to_address, private_key_to_public_point, public_key_hash_to_address,
    public_point_to_public_key_hash, DEFAULT_VERSION,
};
use crate::error::Result;
use crate::search::{CancelHandle, VanitySearch};

const ALPHABET_HEX: &str =
    "000111D38E5FC9071FFCD20B4A763CC9AE4F252BB4E48FD66A835E252ADA93FF480D6DD43DC62A641155A5";
const ALPHABET_BASE58: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// One check: what was computed against what was expected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub name: &'static str,
    pub actual: String,
    pub expected: String,
}

impl CheckOutcome {
    pub fn passed(&self) -> bool {
        self.actual == self.expected
    }
}

impl fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.passed() {
            write!(f, "<{}>\n -- PASS: {} == {}", self.name, self.actual, self.expected)
        } else {
            write!(f, "<{}>\n -- FAIL: {} != {}", self.name, self.actual, self.expected)
        }
    }
}

/// All outcomes of one self-test run.
#[derive(Debug, Clone, Default)]
pub struct SelfTestReport {
    pub outcomes: Vec<CheckOutcome>,
}

impl SelfTestReport {
    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(CheckOutcome::passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.passed())
    }
}

impl fmt::Display for SelfTestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for outcome in &self.outcomes {
            writeln!(f, "{}", outcome)?;
        }
        Ok(())
    }
}

type Check = fn(&SearchConfig, &CancelHandle) -> Result<String>;

/// Runs every check, including a short vanity search for `1B`.
///
/// The search runs through `cancel`, so an interrupt fails that check
/// instead of hanging. A check whose computation fails is reported with the
/// error text as its actual value.
pub fn perform_tests(config: &SearchConfig, cancel: &CancelHandle) -> SelfTestReport {
    let checks: [(&'static str, &str, Check); 11] = [
        ("Hexadecimal encode/decode", "000000", |_, _| {
            Ok(encode_hex(&decode_hex("000000")?))
        }),
        ("Base-58 encode/decode", "1111111111111111111114oLvT2", |_, _| {
            Ok(encode_base58(&decode_base58("1111111111111111111114oLvT2")?))
        }),
        ("Base-58 to hex, leading 0's/1's", ALPHABET_HEX, |_, _| {
            Ok(encode_hex(&decode_base58(ALPHABET_BASE58)?))
        }),
        ("Hex to base-58, leading 0's/1's", ALPHABET_BASE58, |_, _| {
            Ok(encode_base58(&decode_hex(ALPHABET_HEX)?))
        }),
        ("Checksum computation", "E51600D4", |_, _| {
            Ok(encode_hex(&checksum(&decode_hex("aa")?)))
        }),
        (
            "Public point computation",
            "0479BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798\
             483ADA7726A3C4655DA4FBFC0E1108A8FD17B448A68554199C47D08FFB10D4B8",
            |_, _| Ok(private_key_to_public_point(&decode_hex("01")?, false)?.to_hex()),
        ),
        (
            "Public key computation from point",
            "59EC04C8998D69E15E3E9386A8FB6456C9F7892B",
            |_, _| {
                let point = decode_base58("11111111111111111111LDo1Uoe")?;
                Ok(public_point_to_public_key_hash(&point).to_hex())
            },
        ),
        (
            "Public key computation from private key",
            "91B24BF9F5288532960AC687ABB035127B1D28A5",
            |_, _| {
                let point = private_key_to_public_point(&decode_hex("01")?, false)?;
                Ok(public_point_to_public_key_hash(point.as_bytes()).to_hex())
            },
        ),
        ("Address computation from zero hash", "1111111111111111111114oLvT2", |_, _| {
            let hash = decode_hex("0000000000000000000000000000000000000000")?;
            Ok(public_key_hash_to_address(&hash, DEFAULT_VERSION)?.to_base58())
        }),
        (
            "Address computation from private key",
            "1EHNa6Q4Jz2uvNExL497mE43ikXhwF6kZm",
            |_, _| Ok(private_key_to_address(&decode_hex("01")?, false)?.to_base58()),
        ),
        ("Vanity address search", "1B", |config, cancel| {
            let result = cancel.run(VanitySearch::new("1B", true, config.clone())?)?;
            let address = private_key_to_address(result.private_key.as_bytes(), true)?;
            Ok(address.to_base58().chars().take(2).collect())
        }),
    ];

    let outcomes = checks
        .into_iter()
        .map(|(name, expected, check)| CheckOutcome {
            name,
            actual: check(config, cancel).unwrap_or_else(|e| format!("error: {}", e)),
            expected: expected.to_string(),
        })
        .collect();

    SelfTestReport { outcomes }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_checks_pass() {
        let report = perform_tests(&SearchConfig::default().with_workers(2), &CancelHandle::new());
        assert_eq!(report.outcomes.len(), 11);
        let failures: Vec<_> = report.failures().collect();
        assert!(failures.is_empty(), "failed checks: {:?}", failures);
        assert!(report.all_passed());
    }

    #[test]
    fn test_outcome_rendering() {
        let pass = CheckOutcome {
            name: "Example",
            actual: "AB".into(),
            expected: "AB".into(),
        };
        assert_eq!(pass.to_string(), "<Example>\n -- PASS: AB == AB");

        let fail = CheckOutcome {
            name: "Example",
            actual: "AB".into(),
            expected: "CD".into(),
        };
        assert!(!fail.passed());
        assert_eq!(fail.to_string(), "<Example>\n -- FAIL: AB != CD");
    }
}
