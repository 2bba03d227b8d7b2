//! Execution of command-line operations.
//!
//! Each command maps onto one core operation or a short composition of them
//! and produces the lines to print.

use crate::codec::{decode_base58, decode_hex, encode_base58, encode_hex, unescape, Charset};
use crate::config::{Command, SearchConfig};
use crate::crypto::{
    checksum, generate_private_key, hash256, private_key_to_address,
    private_key_to_public_key_hash, private_key_to_public_point, public_key_hash_to_address,
    public_point_to_address, public_point_to_public_key_hash, PrivateKey,
};
use crate::error::Result;
use crate::search::{CancelHandle, VanitySearch};
use crate::selftest::perform_tests;

/// Shared state a command may need.
#[derive(Debug, Clone)]
pub struct Context {
    /// Settings for vanity searches and key generation
    pub search: SearchConfig,
    /// Lets an interrupt (e.g. Ctrl-C) stop a running search
    pub cancel: CancelHandle,
}

impl Context {
    pub fn new(search: SearchConfig) -> Self {
        Self {
            search,
            cancel: CancelHandle::new(),
        }
    }
}

/// Runs `command` and returns its output lines.
///
/// `InteractiveMode` is shell control and produces no output here.
pub fn execute(command: &Command, context: &Context) -> Result<Vec<String>> {
    let lines = match command {
        Command::Checksum { value } => {
            let sum = checksum(&decode_hex(value)?);
            vec![format!("Computed checksum: {}", encode_hex(&sum))]
        }
        Command::PrivateKeyToPublicPoint {
            private_key,
            compressed,
        } => {
            let point = private_key_to_public_point(&decode_hex(private_key)?, *compressed)?;
            vec![format!("Public point: {}", point.to_hex())]
        }
        Command::PublicPointToPublicKey { public_point } => {
            let hash = public_point_to_public_key_hash(&decode_hex(public_point)?);
            vec![format!("Public key: {}", hash.to_hex())]
        }
        Command::PublicKeyToAddress {
            public_key,
            address_version,
        } => {
            let address = public_key_hash_to_address(&decode_hex(public_key)?, *address_version)?;
            vec![format!("Address: {}", address)]
        }
        Command::PublicPointToAddress { public_point } => {
            let address = public_point_to_address(&decode_hex(public_point)?);
            vec![format!("Address: {}", address)]
        }
        Command::PrivateKeyToPublicKey {
            private_key,
            compressed,
        } => {
            let hash = private_key_to_public_key_hash(&decode_hex(private_key)?, *compressed)?;
            vec![format!("Public key: {}", hash.to_hex())]
        }
        Command::PrivateKeyToAddress {
            private_key,
            compressed,
        } => {
            let address = private_key_to_address(&decode_hex(private_key)?, *compressed)?;
            vec![format!("Address: {}", address)]
        }
        Command::GenerateRandom { compressed } => {
            let private_key = generate_private_key(context.search.entropy);
            keyset(&private_key, *compressed)?
        }
        Command::GenerateFromHash { hash, compressed } => {
            let private_key = PrivateKey::from_bytes(decode_hex(hash)?);
            keyset(&private_key, *compressed)?
        }
        Command::GenerateFromStringSha256 {
            text,
            charset,
            compressed,
        } => {
            let charset: Charset = charset.parse()?;
            let bytes = charset.encode(&unescape(text));
            let private_key = PrivateKey::from_bytes(hash256(&bytes).to_vec());
            keyset(&private_key, *compressed)?
        }
        Command::FindVanityAddress { prefix, compressed } => {
            let search = VanitySearch::new(prefix, *compressed, context.search.clone())?;
            let result = context.cancel.run(search)?;
            vec![
                format!("Vanity address private key: {}", result.private_key.to_hex()),
                format!("Vanity address: {}", result.address),
                format!("Keys tried: {}", result.attempts),
            ]
        }
        Command::EncodeBase58 { value } => {
            vec![format!(
                "Base-58 encoded value: {}",
                encode_base58(&decode_hex(value)?)
            )]
        }
        Command::EncodeHex { value } => {
            vec![format!(
                "Hexadecimal encoded value: {}",
                encode_hex(&decode_base58(value)?)
            )]
        }
        Command::PerformTests => perform_tests(&context.search, &context.cancel)
            .outcomes
            .iter()
            .map(ToString::to_string)
            .collect(),
        Command::InteractiveMode => Vec::new(),
    };

    Ok(lines)
}

fn keyset(private_key: &PrivateKey, compressed: bool) -> Result<Vec<String>> {
    let address = private_key_to_address(private_key.as_bytes(), compressed)?;
    Ok(vec![
        format!("Private key: {}", private_key.to_hex()),
        format!("Address: {}", address),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn run(command: Command) -> Result<Vec<String>> {
        execute(&command, &Context::new(SearchConfig::default().with_workers(2)))
    }

    #[test]
    fn test_checksum_command() {
        let lines = run(Command::Checksum { value: "aa".into() }).unwrap();
        assert_eq!(lines, vec!["Computed checksum: E51600D4"]);
    }

    #[test]
    fn test_derivation_commands() {
        let lines = run(Command::PrivateKeyToAddress {
            private_key: "01".into(),
            compressed: false,
        })
        .unwrap();
        assert_eq!(lines, vec!["Address: 1EHNa6Q4Jz2uvNExL497mE43ikXhwF6kZm"]);

        let lines = run(Command::PrivateKeyToPublicKey {
            private_key: "01".into(),
            compressed: false,
        })
        .unwrap();
        assert_eq!(lines, vec!["Public key: 91B24BF9F5288532960AC687ABB035127B1D28A5"]);

        let lines = run(Command::PublicKeyToAddress {
            public_key: "0000000000000000000000000000000000000000".into(),
            address_version: 0,
        })
        .unwrap();
        assert_eq!(lines, vec!["Address: 1111111111111111111114oLvT2"]);
    }

    #[test]
    fn test_point_commands_agree() {
        let point = run(Command::PrivateKeyToPublicPoint {
            private_key: "01".into(),
            compressed: true,
        })
        .unwrap();
        let point_hex = point[0].trim_start_matches("Public point: ").to_string();
        assert_eq!(
            point_hex,
            "0279BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798"
        );

        let address = run(Command::PublicPointToAddress {
            public_point: point_hex,
        })
        .unwrap();
        assert_eq!(address, vec!["Address: 1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH"]);
    }

    #[test]
    fn test_generate_from_hash() {
        let lines = run(Command::GenerateFromHash {
            hash: "0000000000000000000000000000000000000000000000000000000000000001".into(),
            compressed: true,
        })
        .unwrap();
        assert_eq!(
            lines,
            vec![
                "Private key: 0000000000000000000000000000000000000000000000000000000000000001",
                "Address: 1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH",
            ]
        );
    }

    #[test]
    fn test_generate_from_string() {
        let lines = run(Command::GenerateFromStringSha256 {
            text: "".into(),
            charset: "UTF-8".into(),
            compressed: true,
        })
        .unwrap();
        assert_eq!(
            lines[0],
            "Private key: E3B0C44298FC1C149AFBF4C8996FB92427AE41E4649B934CA495991B7852B855"
        );

        let escaped = run(Command::GenerateFromStringSha256 {
            text: "a\\sb".into(),
            charset: "US-ASCII".into(),
            compressed: true,
        })
        .unwrap();
        let plain = run(Command::GenerateFromStringSha256 {
            text: "a b".into(),
            charset: "UTF-8".into(),
            compressed: true,
        })
        .unwrap();
        assert_eq!(escaped, plain);

        assert!(matches!(
            run(Command::GenerateFromStringSha256 {
                text: "x".into(),
                charset: "KOI8-R".into(),
                compressed: true,
            }),
            Err(Error::UnsupportedCharset(_))
        ));
    }

    #[test]
    fn test_generate_random() {
        let lines = run(Command::GenerateRandom { compressed: true }).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].len(), "Private key: ".len() + 64);
        assert!(lines[1].starts_with("Address: 1"));
    }

    #[test]
    fn test_codec_commands() {
        assert_eq!(
            run(Command::EncodeBase58 { value: "000000".into() }).unwrap(),
            vec!["Base-58 encoded value: 111"]
        );
        assert_eq!(
            run(Command::EncodeHex { value: "111".into() }).unwrap(),
            vec!["Hexadecimal encoded value: 000000"]
        );
        assert!(run(Command::EncodeHex { value: "0".into() })
            .unwrap_err()
            .is_format_error());
        assert!(run(Command::EncodeBase58 { value: "abc".into() })
            .unwrap_err()
            .is_format_error());
    }

    #[test]
    fn test_vanity_command() {
        let lines = run(Command::FindVanityAddress {
            prefix: "1B".into(),
            compressed: true,
        })
        .unwrap();
        assert!(lines[1].starts_with("Vanity address: 1B"));

        assert!(matches!(
            run(Command::FindVanityAddress {
                prefix: "2B".into(),
                compressed: true,
            }),
            Err(Error::UnreachablePrefix(_))
        ));
    }

    #[test]
    fn test_errors_are_typed() {
        assert!(matches!(
            run(Command::PublicKeyToAddress {
                public_key: "00".repeat(19),
                address_version: 0,
            }),
            Err(Error::InvalidLength { expected: 20, actual: 19 })
        ));
        assert!(matches!(
            run(Command::PrivateKeyToAddress {
                private_key: "00".into(),
                compressed: true,
            }),
            Err(Error::InvalidKey(_))
        ));
    }
}
