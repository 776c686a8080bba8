//! The IBAN value type, its validation, and generation of new IBANs.
//!
//! An [`Iban`] is produced by [`Iban::parse`], which only normalizes its
//! input; validity is a query ([`Iban::validate`] / [`Iban::is_valid`]),
//! not a precondition. Each instance borrows its country's
//! [`Specification`] from the caller's [`SpecificationTable`]; an unknown
//! country simply leaves that reference empty and surfaces later as
//! [`ValidationError::InvalidCountry`].
//!
//! New IBANs are built through the [`IbanDraft`] two-phase constructor:
//! a draft holds country code and BBAN, [`IbanDraft::seal`] computes the
//! check digits and yields the finished, immutable [`Iban`]. The
//! higher-level [`Iban::generate`] (from account components) and
//! [`Iban::random`] (synthesized from the country's structure) both go
//! through it.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use num_bigint::BigUint;
use rand::seq::SliceRandom;
use tracing::{debug, trace};

use crate::checksum;
use crate::error::{IbanError, ValidationError};
use crate::specification::{Specification, SpecificationTable};

/// An International Bank Account Number.
///
/// Holds the compact form (upper-cased, separators stripped) and a shared
/// reference to the country's specification. Logically immutable; equality,
/// ordering and hashing consider the compact form only.
#[derive(Clone)]
pub struct Iban<'spec> {
    compact: String,
    country: String,
    specification: Option<&'spec Specification>,
}

impl<'spec> Iban<'spec> {
    /// Parse an IBAN from compact or human-formatted text.
    ///
    /// Strips whitespace, dashes and control characters, upper-cases the
    /// remainder, and looks the country up in `table`. Pure normalization:
    /// this never fails, and garbage input yields an `Iban` whose
    /// [`validate`](Self::validate) reports what is wrong with it.
    pub fn parse(table: &'spec SpecificationTable, raw: &str) -> Iban<'spec> {
        let compact: String = raw
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && !c.is_control())
            .flat_map(char::to_uppercase)
            .collect();
        let country: String = compact.chars().take(2).collect();
        let specification = table.get(&country);
        Iban { compact, country, specification }
    }

    /// Parse and validate in one step.
    ///
    /// Returns [`IbanError::Invalid`] carrying the formatted IBAN and its
    /// full list of validation findings when anything is wrong.
    pub fn parse_strict(table: &'spec SpecificationTable, raw: &str) -> Result<Iban<'spec>, IbanError> {
        let iban = Self::parse(table, raw);
        let errors = iban.validate();
        if errors.is_empty() {
            Ok(iban)
        } else {
            Err(IbanError::Invalid { formatted: iban.formatted(), errors })
        }
    }

    /// Generate an IBAN from a country code and its account components,
    /// computing the check digits.
    ///
    /// The component count must equal the number of fields the country
    /// defines (see [`Specification::component_lengths`]). A component
    /// longer than its field is an error (nothing is silently truncated),
    /// while shorter components are zero-left-padded to the field width.
    ///
    /// ```
    /// # use iso_iban::{FieldRange, Iban, Specification, SpecificationTable};
    /// # let mut table = SpecificationTable::new();
    /// # table.insert(Specification::new(
    /// #     "Switzerland", "CH", "CH2!n5!n12!c", 21, "5!n12!c", 17,
    /// #     Some(FieldRange::new(4, 8)), None,
    /// # )?);
    /// let iban = Iban::generate(&table, "CH", &["123", "9876B"])?;
    /// assert_eq!(iban.formatted(), "CH76 0012 3000 0000 9876 B");
    /// # Ok::<(), iso_iban::IbanError>(())
    /// ```
    pub fn generate(
        table: &'spec SpecificationTable,
        country: &str,
        components: &[&str],
    ) -> Result<Iban<'spec>, IbanError> {
        let country = country.to_ascii_uppercase();
        let specification = table
            .get(&country)
            .ok_or_else(|| IbanError::UnknownCountry { country: country.clone() })?;

        let lengths = specification.component_lengths();
        if components.len() != lengths.len() {
            return Err(IbanError::ComponentCount {
                country,
                expected: lengths.len(),
                actual: components.len(),
            });
        }

        let mut bban = String::with_capacity(specification.bban_length());
        for (index, (component, &width)) in components.iter().zip(&lengths).enumerate() {
            if component.len() > width {
                return Err(IbanError::ComponentLength {
                    country,
                    index,
                    expected: width,
                    actual: component.len(),
                });
            }
            for _ in 0..width - component.len() {
                bban.push('0');
            }
            bban.push_str(component);
        }

        debug!(%country, components = components.len(), "generating IBAN");
        IbanDraft::new(table, &country, &bban).seal()
    }

    /// Generate a random, structurally and checksum-valid IBAN.
    ///
    /// Picks a country uniformly from `countries`, or from the whole table
    /// when the slice is empty, then synthesizes content for every token of
    /// that country's structure. Intended for ad hoc testing and seeding.
    pub fn random(
        table: &'spec SpecificationTable,
        countries: &[&str],
    ) -> Result<Iban<'spec>, IbanError> {
        let mut rng = rand::thread_rng();
        let country = if countries.is_empty() {
            let known: Vec<&str> = table.countries().collect();
            known.choose(&mut rng).copied().ok_or(IbanError::EmptyTable)?.to_string()
        } else {
            countries
                .choose(&mut rng)
                .copied()
                .ok_or(IbanError::EmptyTable)?
                .to_ascii_uppercase()
        };
        let specification = table
            .get(&country)
            .ok_or_else(|| IbanError::UnknownCountry { country: country.clone() })?;

        // The synthesized string carries the country literal and random
        // check digits; keep its BBAN and let the draft compute real digits.
        let synthesized = specification.compiled().fill_random(&mut rng);
        let bban = synthesized.get(4..).unwrap_or("");

        debug!(%country, "generating random IBAN");
        IbanDraft::new(table, &country, bban).seal()
    }

    /// The compact machine form, e.g. `"CH351234598765432109A"`.
    pub fn compact(&self) -> &str {
        &self.compact
    }

    /// The 2-letter country code (the first two characters of the compact
    /// form; possibly unknown to the specification table).
    pub fn country_code(&self) -> &str {
        &self.country
    }

    /// The specification for this IBAN's country, if the table knows it.
    pub fn specification(&self) -> Option<&'spec Specification> {
        self.specification
    }

    /// The two check digits (characters 3 and 4).
    pub fn checksum_digits(&self) -> &str {
        self.compact.get(2..4).unwrap_or("")
    }

    /// The Basic Bank Account Number: everything after the check digits.
    pub fn bban(&self) -> &str {
        self.compact.get(4..).unwrap_or("")
    }

    /// The bank identifier, if the country defines its position.
    pub fn bank_code(&self) -> Option<&str> {
        self.specification
            .and_then(Specification::bank_range)
            .and_then(|range| range.slice(&self.compact))
    }

    /// The branch identifier, if the country defines its position.
    pub fn branch_code(&self) -> Option<&str> {
        self.specification
            .and_then(Specification::branch_range)
            .and_then(|range| range.slice(&self.compact))
    }

    /// The account identifier: the compact form after the last of the bank
    /// and branch fields, or after the check digits when the country
    /// defines neither (or is unknown).
    pub fn account_code(&self) -> &str {
        let last_field_end = self
            .specification
            .into_iter()
            .flat_map(|spec| [spec.bank_range(), spec.branch_range()])
            .flatten()
            .map(|range| range.to)
            .max()
            .unwrap_or(3)
            .max(3);
        self.compact.get(last_field_end + 1..).unwrap_or("")
    }

    /// The human-readable form: the compact form in groups of four
    /// characters, the final group unpadded.
    pub fn formatted(&self) -> String {
        let mut out = String::with_capacity(self.compact.len() + self.compact.len() / 4);
        for (i, character) in self.compact.chars().enumerate() {
            if i > 0 && i % 4 == 0 {
                out.push(' ');
            }
            out.push(character);
        }
        out
    }

    /// The numeric form of the full rearrangement: the first four characters
    /// moved to the end, then transliterated. `None` for compact forms
    /// shorter than five characters or containing unmappable characters
    /// (including `??` check-digit placeholders).
    pub fn numeric(&self) -> Option<BigUint> {
        if self.compact.len() < 5 {
            return None;
        }
        let body = self.compact.get(4..)?;
        let head = self.compact.get(..4)?;
        checksum::numerify(&format!("{body}{head}")).ok()
    }

    /// Decompose the compact form into one substring per structure token.
    /// Empty when the country is unknown or the structure does not match.
    pub fn components(&self) -> Vec<&str> {
        self.specification
            .and_then(|spec| spec.compiled().decompose(&self.compact))
            .unwrap_or_default()
    }

    /// Run every validation and return the findings, in fixed order:
    /// characters, country, checksum, length, format.
    ///
    /// The tests are independent, so a caller sees every defect at once, with
    /// one exception: the checksum is only evaluated when the characters are
    /// valid, since it has no meaning over an unmappable string. Calling
    /// this repeatedly returns the same result; nothing is mutated.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        let characters_ok = self.has_valid_characters();
        if !characters_ok {
            errors.push(ValidationError::InvalidCharacters);
        }
        if self.specification.is_none() {
            errors.push(ValidationError::InvalidCountry);
        }
        if characters_ok && !self.has_valid_checksum() {
            errors.push(ValidationError::InvalidChecksum);
        }
        if !self.has_valid_length() {
            errors.push(ValidationError::InvalidLength);
        }
        if !self.has_valid_format() {
            errors.push(ValidationError::InvalidFormat);
        }
        errors
    }

    /// Whether [`validate`](Self::validate) finds nothing.
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Compact form matches `[A-Z]{2}(\d\d|\?\?)[A-Z0-9]*`: two country
    /// letters, two check digits (or the `??` draft placeholder), then
    /// uppercase alphanumerics.
    fn has_valid_characters(&self) -> bool {
        let bytes = self.compact.as_bytes();
        if bytes.len() < 4 {
            return false;
        }
        if !bytes[0].is_ascii_uppercase() || !bytes[1].is_ascii_uppercase() {
            return false;
        }
        let check = &bytes[2..4];
        if !(check == b"??" || check.iter().all(|b| b.is_ascii_digit())) {
            return false;
        }
        bytes[4..]
            .iter()
            .all(|b| b.is_ascii_digit() || b.is_ascii_uppercase())
    }

    fn has_valid_checksum(&self) -> bool {
        if self.compact.len() < 5 {
            return false;
        }
        let (Some(body), Some(head)) = (self.compact.get(4..), self.compact.get(..4)) else {
            return false;
        };
        let rearranged = format!("{body}{head}");
        checksum::mod97(&rearranged).map_or(false, |remainder| remainder == 1)
    }

    fn has_valid_length(&self) -> bool {
        self.specification
            .map_or(false, |spec| self.compact.len() == spec.iban_length())
    }

    fn has_valid_format(&self) -> bool {
        self.specification
            .map_or(false, |spec| spec.compiled().is_match(&self.compact))
    }
}

impl fmt::Display for Iban<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.compact)
    }
}

impl fmt::Debug for Iban<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Iban({})", self.formatted())
    }
}

impl PartialEq for Iban<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.compact == other.compact
    }
}

impl Eq for Iban<'_> {}

impl PartialOrd for Iban<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Iban<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compact.cmp(&other.compact)
    }
}

impl Hash for Iban<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.compact.hash(state);
    }
}

/// An IBAN whose check digits have not been computed yet.
///
/// The two-phase constructor behind [`Iban::generate`] and [`Iban::random`]:
/// a draft exposes only country code and BBAN, and [`seal`](Self::seal)
/// turns it into a finished [`Iban`]. The distinction is in the types, so
/// there is no "check digits must still be a placeholder" precondition to
/// trip over, and no in-place mutation of a finished IBAN anywhere.
#[derive(Debug, Clone)]
pub struct IbanDraft<'spec> {
    country: String,
    bban: String,
    specification: Option<&'spec Specification>,
}

impl<'spec> IbanDraft<'spec> {
    /// Create a draft from a country code and BBAN (both upper-cased).
    ///
    /// The country does not have to be known to the table; sealing works
    /// regardless, and validation of the result reports the unknown country.
    pub fn new(table: &'spec SpecificationTable, country: &str, bban: &str) -> IbanDraft<'spec> {
        let country = country.to_ascii_uppercase();
        let bban = bban.to_ascii_uppercase();
        let specification = table.get(&country);
        IbanDraft { country, bban, specification }
    }

    /// The draft's 2-letter country code.
    pub fn country_code(&self) -> &str {
        &self.country
    }

    /// The draft's BBAN.
    pub fn bban(&self) -> &str {
        &self.bban
    }

    /// Compute the check digits and assemble the finished IBAN.
    ///
    /// Fails with [`IbanError::InvalidCharacter`] if the BBAN or country
    /// code contains characters outside the IBAN alphabet.
    pub fn seal(self) -> Result<Iban<'spec>, IbanError> {
        let digits = checksum::check_digits(&self.bban, &self.country)?;
        let compact = format!("{}{}{}", self.country, digits, self.bban);
        trace!(iban = %compact, "sealed IBAN draft");
        Ok(Iban {
            compact,
            country: self.country,
            specification: self.specification,
        })
    }
}

impl SpecificationTable {
    /// [`Iban::parse`] against this table.
    pub fn parse<'spec>(&'spec self, raw: &str) -> Iban<'spec> {
        Iban::parse(self, raw)
    }

    /// [`Iban::parse_strict`] against this table.
    pub fn parse_strict<'spec>(&'spec self, raw: &str) -> Result<Iban<'spec>, IbanError> {
        Iban::parse_strict(self, raw)
    }

    /// [`Iban::generate`] against this table.
    pub fn generate<'spec>(
        &'spec self,
        country: &str,
        components: &[&str],
    ) -> Result<Iban<'spec>, IbanError> {
        Iban::generate(self, country, components)
    }

    /// [`Iban::random`] against this table.
    pub fn random<'spec>(&'spec self, countries: &[&str]) -> Result<Iban<'spec>, IbanError> {
        Iban::random(self, countries)
    }
}
