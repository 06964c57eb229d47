//! Deterministic Swedish identifier formats and name pools.
//!
//! Checksum-bearing identifiers used across the BRF domain:
//!
//! - organisationsnummer for cooperatives (`7696XX-XXXC`, Luhn mod-10)
//! - personnummer for members (`YYMMDD-NNNC`, Luhn mod-10)
//! - bankgiro numbers (`XXXX-XXXC`, Luhn mod-10)
//! - OCR payment references (value digits + length digit + check digit)
//! - postnummer (`NNN NN`)
//! - lägenhetsnummer per the Lantmäteriet floor/position convention
//!
//! Every generated value is driven exclusively by the caller's [`SeededRng`],
//! so identical seeds reproduce identical identifiers.

use crate::rng::SeededRng;

/// Name words for cooperative naming ("Brf Eken", "Brf Solhöjden", ...).
pub const BRF_NAME_WORDS: &[&str] = &[
    "Eken",
    "Björken",
    "Linden",
    "Tallbacken",
    "Granliden",
    "Utsikten",
    "Sjöstaden",
    "Kullen",
    "Rosenhill",
    "Solhöjden",
    "Strandängen",
    "Måsen",
    "Videt",
    "Aspudden",
    "Körsbärsdalen",
    "Vintergatan",
    "Norrskenet",
    "Hamnkranen",
    "Tegelbruket",
    "Kvarnberget",
];

/// Cities used for cooperative locales.
pub const CITIES: &[&str] = &[
    "Stockholm",
    "Göteborg",
    "Malmö",
    "Uppsala",
    "Västerås",
    "Örebro",
    "Linköping",
    "Helsingborg",
    "Norrköping",
    "Lund",
];

/// First names for member records.
pub const FIRST_NAMES: &[&str] = &[
    "Erik", "Anna", "Lars", "Maria", "Karl", "Eva", "Anders", "Kristina", "Johan", "Birgitta",
    "Per", "Elisabeth", "Nils", "Ingrid", "Mikael", "Sofia",
];

/// Last names for member records.
pub const LAST_NAMES: &[&str] = &[
    "Andersson",
    "Johansson",
    "Karlsson",
    "Nilsson",
    "Eriksson",
    "Larsson",
    "Olsson",
    "Persson",
    "Svensson",
    "Gustafsson",
    "Pettersson",
    "Jonsson",
    "Lindberg",
    "Jansson",
    "Lundgren",
    "Berg",
];

/// Common BRF counterparties for financial records.
pub const COUNTERPARTIES: &[&str] = &[
    "Vattenfall",
    "E.ON",
    "Fortum",
    "Stockholm Exergi",
    "HSB Service",
    "Riksbyggen",
    "Bravida",
    "Securitas",
    "Anticimex",
    "Ragn-Sells",
];

/// Luhn mod-10 check digit for the digit characters of `payload`.
///
/// Non-digit characters (hyphens, spaces) are ignored.
pub fn luhn_check_digit(payload: &str) -> u32 {
    let digits: Vec<u32> = payload.chars().filter_map(|c| c.to_digit(10)).collect();
    let mut sum = 0;
    for (i, digit) in digits.iter().rev().enumerate() {
        let mut value = *digit;
        // The digit immediately left of the check position is doubled.
        if i % 2 == 0 {
            value *= 2;
            if value > 9 {
                value -= 9;
            }
        }
        sum += value;
    }
    (10 - sum % 10) % 10
}

/// Check a full number (payload + trailing check digit) against Luhn mod-10.
pub fn luhn_valid(number: &str) -> bool {
    let digits: Vec<u32> = number.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() < 2 {
        return false;
    }
    let mut sum = 0;
    for (i, digit) in digits.iter().rev().enumerate() {
        let mut value = *digit;
        if i % 2 == 1 {
            value *= 2;
            if value > 9 {
                value -= 9;
            }
        }
        sum += value;
    }
    sum % 10 == 0
}

/// Exactly `count` random digits, leading zeros allowed.
fn random_digits(rng: &mut SeededRng, count: usize) -> String {
    (0..count)
        .map(|_| char::from(b'0' + rng.random_int(0, 9) as u8))
        .collect()
}

/// A BRF organisationsnummer: `7696XX-XXXC` with a valid check digit.
///
/// The 7696 prefix is the Bolagsverket series for bostadsrättsföreningar.
pub fn organisationsnummer(rng: &mut SeededRng) -> String {
    let payload = format!("7696{}", random_digits(rng, 5));
    let check = luhn_check_digit(&payload);
    format!("{}-{}{}", &payload[..6], &payload[6..], check)
}

/// A synthetic personnummer: `YYMMDD-NNNC` with a valid check digit.
///
/// Birth years span 1940-2005 and days stop at 28, so every generated date
/// is a real calendar date.
pub fn personnummer(rng: &mut SeededRng) -> String {
    let year = rng.random_int(1940, 2005);
    let month = rng.random_int(1, 12);
    let day = rng.random_int(1, 28);
    let serial = random_digits(rng, 3);

    let payload = format!("{:02}{:02}{:02}{}", year % 100, month, day, serial);
    let check = luhn_check_digit(&payload);
    format!("{}-{}{}", &payload[..6], &payload[6..], check)
}

/// An 8-digit bankgiro number: `XXXX-XXXC` with a valid check digit.
pub fn bankgiro(rng: &mut SeededRng) -> String {
    let first = char::from(b'1' + rng.random_int(0, 8) as u8);
    let payload = format!("{first}{}", random_digits(rng, 6));
    let check = luhn_check_digit(&payload);
    format!("{}-{}{}", &payload[..4], &payload[4..], check)
}

/// An OCR payment reference: value digits, a length digit, and a Luhn check
/// digit (Bankgirot "hard control" format).
pub fn ocr_reference(rng: &mut SeededRng) -> String {
    let base = random_digits(rng, 8);
    // Length digit counts the full reference including itself and the check.
    let length_digit = (base.len() + 2) % 10;
    let with_length = format!("{base}{length_digit}");
    let check = luhn_check_digit(&with_length);
    format!("{with_length}{check}")
}

/// A postnummer: `NNN NN`, never starting with 0.
pub fn postnummer(rng: &mut SeededRng) -> String {
    let first = char::from(b'1' + rng.random_int(0, 8) as u8);
    let rest = random_digits(rng, 4);
    format!("{first}{} {}", &rest[..2], &rest[2..])
}

/// A lägenhetsnummer per the Lantmäteriet convention: two floor digits
/// (10 = entry level) followed by two position digits.
pub fn lagenhetsnummer(floor: u32, position: u32) -> String {
    format!("{:02}{:02}", 10 + floor, position)
}

/// ASCII-fold Swedish letters for use in email addresses.
pub fn ascii_fold(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| match c {
            'å' | 'ä' => 'a',
            'ö' => 'o',
            'é' => 'e',
            other => other,
        })
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luhn_known_vector() {
        // Classic Luhn test number: payload 7992739871 has check digit 3.
        assert_eq!(luhn_check_digit("7992739871"), 3);
        assert!(luhn_valid("79927398713"));
        assert!(!luhn_valid("79927398710"));
    }

    #[test]
    fn test_luhn_ignores_separators() {
        assert_eq!(luhn_check_digit("7992-739-871"), 3);
        assert!(luhn_valid("7992739-8713"));
    }

    #[test]
    fn test_luhn_rejects_too_short() {
        assert!(!luhn_valid("7"));
        assert!(!luhn_valid(""));
    }

    #[test]
    fn test_organisationsnummer_format_and_checksum() {
        let mut rng = SeededRng::new("org");
        for _ in 0..100 {
            let org = organisationsnummer(&mut rng);
            assert_eq!(org.len(), 11);
            assert!(org.starts_with("7696"));
            assert_eq!(&org[6..7], "-");
            assert!(luhn_valid(&org), "bad checksum in {org}");
        }
    }

    #[test]
    fn test_personnummer_format_and_checksum() {
        let mut rng = SeededRng::new("pnr");
        for _ in 0..100 {
            let pnr = personnummer(&mut rng);
            assert_eq!(pnr.len(), 11);
            assert!(luhn_valid(&pnr), "bad checksum in {pnr}");

            let month: u32 = pnr[2..4].parse().unwrap();
            let day: u32 = pnr[4..6].parse().unwrap();
            assert!((1..=12).contains(&month));
            assert!((1..=28).contains(&day));
        }
    }

    #[test]
    fn test_bankgiro_format_and_checksum() {
        let mut rng = SeededRng::new("bg");
        for _ in 0..100 {
            let bg = bankgiro(&mut rng);
            assert_eq!(bg.len(), 9);
            assert_eq!(&bg[4..5], "-");
            assert!(!bg.starts_with('0'));
            assert!(luhn_valid(&bg), "bad checksum in {bg}");
        }
    }

    #[test]
    fn test_ocr_reference_checksum_and_length_digit() {
        let mut rng = SeededRng::new("ocr");
        for _ in 0..100 {
            let ocr = ocr_reference(&mut rng);
            assert_eq!(ocr.len(), 10);
            assert!(luhn_valid(&ocr), "bad checksum in {ocr}");
            // Length digit is second to last: full length mod 10.
            let length_digit: usize = ocr[8..9].parse().unwrap();
            assert_eq!(length_digit, ocr.len() % 10);
        }
    }

    #[test]
    fn test_postnummer_format() {
        let mut rng = SeededRng::new("postal");
        for _ in 0..100 {
            let postal = postnummer(&mut rng);
            assert_eq!(postal.len(), 6);
            assert_eq!(&postal[3..4], " ");
            assert!(!postal.starts_with('0'));
            assert!(postal
                .chars()
                .all(|c| c.is_ascii_digit() || c == ' '));
        }
    }

    #[test]
    fn test_lagenhetsnummer_floor_encoding() {
        assert_eq!(lagenhetsnummer(0, 1), "1001");
        assert_eq!(lagenhetsnummer(2, 3), "1203");
        assert_eq!(lagenhetsnummer(9, 12), "1912");
    }

    #[test]
    fn test_ascii_fold() {
        assert_eq!(ascii_fold("Åsa Björk"), "asabjork");
        assert_eq!(ascii_fold("Östen"), "osten");
        assert_eq!(ascii_fold("Erik"), "erik");
    }

    #[test]
    fn test_helpers_are_deterministic() {
        let mut a = SeededRng::new("det");
        let mut b = SeededRng::new("det");
        for _ in 0..20 {
            assert_eq!(organisationsnummer(&mut a), organisationsnummer(&mut b));
            assert_eq!(personnummer(&mut a), personnummer(&mut b));
            assert_eq!(ocr_reference(&mut a), ocr_reference(&mut b));
        }
    }
}
