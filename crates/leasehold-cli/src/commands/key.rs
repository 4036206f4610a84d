//! `leasehold key`: show which encryption key the store would use.

use clap::Args;
use leasehold_secrets::EncryptionKey;

/// Key command arguments.
#[derive(Args)]
pub struct KeyArgs {
    /// Print the raw key instead of its fingerprint
    #[arg(long)]
    pub reveal: bool,
}

/// Run the key command.
pub fn run(args: KeyArgs) -> anyhow::Result<()> {
    let key = EncryptionKey::from_env();
    print!("{}", describe(&key, args.reveal));
    Ok(())
}

/// Render the key report.
pub fn describe(key: &EncryptionKey, reveal: bool) -> String {
    let mut report = format!(
        "source:      {}\nfingerprint: {}\n",
        key.source().as_str(),
        key.fingerprint()
    );
    if reveal {
        report.push_str(&format!("key:         {}\n", key.expose()));
    }
    if key.is_default() {
        report.push_str("warning:     built-in placeholder key; set LEASEHOLD_ENCRYPTION_KEY\n");
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_hides_key_by_default() {
        let key = EncryptionKey::explicit("hunter2-but-longer");
        let report = describe(&key, false);
        assert!(report.contains("explicit"));
        assert!(report.contains(&key.fingerprint()));
        assert!(!report.contains("hunter2-but-longer"));
    }

    #[test]
    fn test_describe_reveal() {
        let key = EncryptionKey::explicit("hunter2-but-longer");
        assert!(describe(&key, true).contains("hunter2-but-longer"));
    }

    #[test]
    fn test_describe_warns_on_default() {
        let key = EncryptionKey::resolve(|_| None);
        assert!(describe(&key, false).contains("placeholder"));
    }
}
