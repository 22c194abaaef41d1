//! Protocol-number generation.

use chrono::Utc;
use rand::Rng as _;

/// Prefix on every protocol number handed to a submitter.
pub const PROTOCOL_PREFIX: &str = "PAN";

/// `PAN-<millis>-<4-digit suffix>`.
///
/// The suffix is random, so the output alone is only probabilistically
/// unique; the pipeline checks candidates against the store before using
/// one.
pub fn generate_protocol() -> String {
  let suffix = rand::thread_rng().gen_range(0..10_000u32);
  format!(
    "{PROTOCOL_PREFIX}-{}-{suffix:04}",
    Utc::now().timestamp_millis()
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn protocol_matches_expected_shape() {
    let shape = regex_lite::Regex::new(r"^PAN-\d+-\d{4}$").unwrap();
    for _ in 0..100 {
      let protocol = generate_protocol();
      assert!(shape.is_match(&protocol), "protocol {protocol:?}");
    }
  }
}
