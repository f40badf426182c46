//! CNPJ formatting and check-digit validation
//!
//! A CNPJ is a 14-digit Brazilian company tax identifier whose last two
//! digits are mod-11 check digits. Displayed form: `NN.NNN.NNN/NNNN-NN`.

/// Digits in an unmasked CNPJ
const CNPJ_DIGITS: usize = 14;

/// Apply the display mask to an arbitrary input string.
///
/// Non-digit characters are stripped, at most 14 digits are kept, and the
/// literal separators `.`, `.`, `/`, `-` are inserted before digit
/// positions 2, 5, 8 and 12. Safe on partial input and idempotent, so it
/// can be run on every keystroke; output never exceeds 18 characters.
pub fn format(input: &str) -> String {
    let mut out = String::with_capacity(18);
    for (i, c) in input
        .chars()
        .filter(char::is_ascii_digit)
        .take(CNPJ_DIGITS)
        .enumerate()
    {
        match i {
            2 | 5 => out.push('.'),
            8 => out.push('/'),
            12 => out.push('-'),
            _ => {}
        }
        out.push(c);
    }
    out
}

/// Validate a CNPJ, masked or not.
///
/// The input must contain exactly 14 digits once formatting characters are
/// stripped, must not be a degenerate all-equal sequence, and both check
/// digits must match the mod-11 computation.
pub fn is_valid(cnpj: &str) -> bool {
    let digits: Vec<u32> = cnpj.chars().filter_map(|c| c.to_digit(10)).collect();

    if digits.len() != CNPJ_DIGITS {
        return false;
    }
    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    digits[12] == check_digit(&digits[..12], 5) && digits[13] == check_digit(&digits[..13], 6)
}

/// Mod-11 check digit over a digit prefix.
///
/// Weights start at `start_weight` and decrement each step; a weight that
/// would drop below 2 resets to 9.
fn check_digit(digits: &[u32], start_weight: u32) -> u32 {
    let mut weight = start_weight;
    let mut sum = 0;
    for &digit in digits {
        sum += digit * weight;
        weight = if weight == 2 { 9 } else { weight - 1 };
    }
    match sum % 11 {
        remainder if remainder < 2 => 0,
        remainder => 11 - remainder,
    }
}
