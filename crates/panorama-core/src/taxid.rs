//! Check-digit verification for the two national tax-ID formats.
//!
//! CPF carries 9 payload digits and 2 check digits computed by a two-stage
//! mod-11 scheme with descending weights. CNPJ carries 12 payload digits and
//! 2 check digits computed over fixed weight tables. Both formats reject a
//! sequence of identical digits, which would otherwise checksum cleanly.

const CNPJ_WEIGHTS_1: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
const CNPJ_WEIGHTS_2: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// Keep only decimal digits; punctuation is allowed anywhere in the input.
fn digits(s: &str) -> Vec<u32> {
  s.chars().filter_map(|c| c.to_digit(10)).collect()
}

fn all_same(ds: &[u32]) -> bool {
  ds.windows(2).all(|w| w[0] == w[1])
}

/// Mod-11 check digit with weights `first_weight, first_weight - 1, ...`;
/// a raw result of 10 or 11 collapses to 0.
fn mod11_descending(ds: &[u32], first_weight: u32) -> u32 {
  let sum: u32 = ds
    .iter()
    .enumerate()
    .map(|(i, d)| d * (first_weight - i as u32))
    .sum();
  let digit = 11 - (sum % 11);
  if digit >= 10 { 0 } else { digit }
}

/// Mod-11 check digit over an explicit weight table; a remainder below 2
/// collapses to 0.
fn mod11_weighted(ds: &[u32], weights: &[u32]) -> u32 {
  let sum: u32 = ds.iter().zip(weights).map(|(d, w)| d * w).sum();
  if sum % 11 < 2 { 0 } else { 11 - sum % 11 }
}

/// `true` if `cpf` contains exactly 11 digits and both check digits match.
pub fn valid_cpf(cpf: &str) -> bool {
  let ds = digits(cpf);
  if ds.len() != 11 || all_same(&ds) {
    return false;
  }
  mod11_descending(&ds[..9], 10) == ds[9]
    && mod11_descending(&ds[..10], 11) == ds[10]
}

/// `true` if `cnpj` contains exactly 14 digits and both check digits match.
pub fn valid_cnpj(cnpj: &str) -> bool {
  let ds = digits(cnpj);
  if ds.len() != 14 || all_same(&ds) {
    return false;
  }
  mod11_weighted(&ds[..12], &CNPJ_WEIGHTS_1) == ds[12]
    && mod11_weighted(&ds[..13], &CNPJ_WEIGHTS_2) == ds[13]
}

// ─── Tests ───────────────────────────────────────────────────────────────────
