//! SWIFT structure descriptor compilation and matching.
//!
//! Every country registers its IBAN layout as a compact descriptor string,
//! e.g. `"CH2!n5!n12!c"`: a sequence of literal uppercase runs and
//! `<length>['!']<class>` tokens, where the class is one of
//!
//! - `n`: digits `0-9`
//! - `a`: uppercase letters `A-Z`
//! - `c`: alphanumeric `A-Za-z0-9`
//! - `e`: blank space
//!
//! A trailing `!` makes the length exact; without it the length is an upper
//! bound (`{0,length}`).
//!
//! Descriptors compile to a token sequence matched by a direct scan with
//! bounded backtracking. Inputs are at most 34 characters and descriptors
//! a handful of tokens, so the worst case stays trivially small, and there
//! is no regex engine to backtrack catastrophically on the unbounded-length
//! class tokens.

use rand::Rng;

use crate::error::IbanError;

/// A character class of the descriptor grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// `n`: digits `0-9`.
    Digit,
    /// `a`: uppercase letters `A-Z`.
    Upper,
    /// `c`: alphanumeric `A-Za-z0-9`.
    Alnum,
    /// `e`: blank space.
    Blank,
}

impl CharClass {
    /// Whether `byte` belongs to this class.
    pub fn matches(self, byte: u8) -> bool {
        match self {
            CharClass::Digit => byte.is_ascii_digit(),
            CharClass::Upper => byte.is_ascii_uppercase(),
            CharClass::Alnum => byte.is_ascii_alphanumeric(),
            CharClass::Blank => byte == b' ',
        }
    }

    /// Draw one character belonging to this class.
    ///
    /// `c` is sampled from uppercase letters and digits only: the class
    /// accepts lowercase on input, but compact IBANs are upper-cased, so a
    /// lowercase sample would only exercise the normalizer.
    fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> char {
        const DIGITS: &[u8] = b"0123456789";
        const UPPER: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
        const ALNUM: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

        let set = match self {
            CharClass::Digit => DIGITS,
            CharClass::Upper => UPPER,
            CharClass::Alnum => ALNUM,
            CharClass::Blank => return ' ',
        };
        set[rng.gen_range(0..set.len())] as char
    }
}

/// One token of a compiled structure descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureToken {
    /// A run of uppercase letters matched verbatim (e.g. the country code).
    Literal(String),
    /// A character-class run.
    Class {
        /// The character class.
        class: CharClass,
        /// Exact length if `fixed`, otherwise the upper bound.
        length: usize,
        /// Whether the descriptor carried the `!` exact-length marker.
        fixed: bool,
    },
}

impl StructureToken {
    /// The maximum number of characters this token can consume.
    fn max_length(&self) -> usize {
        match self {
            StructureToken::Literal(literal) => literal.len(),
            StructureToken::Class { length, .. } => *length,
        }
    }
}

/// A compiled structure descriptor.
///
/// Serves both as the anchored whole-string matcher and as the grouped
/// decomposer: a successful match yields one span per token, in declaration
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Structure {
    descriptor: String,
    tokens: Vec<StructureToken>,
}

impl Structure {
    /// Compile a descriptor.
    ///
    /// Any residue that is neither an uppercase run nor `<digits>['!']<nace>`
    /// is a malformed specification, an error of whoever assembled the
    /// specification table, raised at load time rather than when IBANs are
    /// validated.
    pub fn parse(descriptor: &str) -> Result<Self, IbanError> {
        let bytes = descriptor.as_bytes();
        let mut tokens = Vec::new();
        let mut i = 0;

        while i < bytes.len() {
            let start = i;

            if bytes[i].is_ascii_uppercase() {
                // Maximal literal run.
                while i < bytes.len() && bytes[i].is_ascii_uppercase() {
                    i += 1;
                }
                tokens.push(StructureToken::Literal(descriptor[start..i].to_string()));
                continue;
            }

            if bytes[i].is_ascii_digit() {
                while i < bytes.len() && bytes[i].is_ascii_digit() {
                    i += 1;
                }
                let length: usize = descriptor[start..i].parse().map_err(|_| {
                    IbanError::MalformedStructure {
                        descriptor: descriptor.to_string(),
                        position: start,
                    }
                })?;
                let fixed = bytes.get(i) == Some(&b'!');
                if fixed {
                    i += 1;
                }
                let class = match bytes.get(i) {
                    Some(b'n') => CharClass::Digit,
                    Some(b'a') => CharClass::Upper,
                    Some(b'c') => CharClass::Alnum,
                    Some(b'e') => CharClass::Blank,
                    _ => {
                        return Err(IbanError::MalformedStructure {
                            descriptor: descriptor.to_string(),
                            position: i,
                        })
                    }
                };
                i += 1;
                tokens.push(StructureToken::Class { class, length, fixed });
                continue;
            }

            return Err(IbanError::MalformedStructure {
                descriptor: descriptor.to_string(),
                position: i,
            });
        }

        Ok(Structure {
            descriptor: descriptor.to_string(),
            tokens,
        })
    }

    /// The descriptor this structure was compiled from.
    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    /// The compiled token sequence.
    pub fn tokens(&self) -> &[StructureToken] {
        &self.tokens
    }

    /// Sum of the maximum token lengths: the length of a fully populated
    /// match. For registry descriptors (all tokens fixed) this equals the
    /// registered IBAN length.
    pub fn max_length(&self) -> usize {
        self.tokens.iter().map(StructureToken::max_length).sum()
    }

    /// Whether `input` matches the structure in full, start to end.
    pub fn is_match(&self, input: &str) -> bool {
        self.match_spans(input).is_some()
    }

    /// Decompose `input` into one captured substring per token, in
    /// declaration order. `None` if the anchored match fails.
    pub fn decompose<'i>(&self, input: &'i str) -> Option<Vec<&'i str>> {
        let spans = self.match_spans(input)?;
        Some(spans.iter().map(|&(from, to)| &input[from..to]).collect())
    }

    /// Synthesize a string matching this structure: literals verbatim,
    /// class tokens filled to their (maximum) length with random members.
    pub fn fill_random<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let mut out = String::with_capacity(self.max_length());
        for token in &self.tokens {
            match token {
                StructureToken::Literal(literal) => out.push_str(literal),
                StructureToken::Class { class, length, .. } => {
                    for _ in 0..*length {
                        out.push(class.sample(rng));
                    }
                }
            }
        }
        out
    }

    fn match_spans(&self, input: &str) -> Option<Vec<(usize, usize)>> {
        if !input.is_ascii() {
            return None;
        }
        let mut spans = Vec::with_capacity(self.tokens.len());
        if match_at(&self.tokens, input.as_bytes(), 0, 0, &mut spans) {
            Some(spans)
        } else {
            None
        }
    }
}

/// Match tokens `ti..` against `input[pos..]`, anchored at the end.
///
/// Greedy with backtracking: a variable-length class token first consumes
/// its longest available run and gives characters back only if the remaining
/// tokens cannot be placed.
fn match_at(
    tokens: &[StructureToken],
    input: &[u8],
    ti: usize,
    pos: usize,
    spans: &mut Vec<(usize, usize)>,
) -> bool {
    let Some(token) = tokens.get(ti) else {
        return pos == input.len();
    };

    match token {
        StructureToken::Literal(literal) => {
            if input[pos..].starts_with(literal.as_bytes()) {
                spans.push((pos, pos + literal.len()));
                if match_at(tokens, input, ti + 1, pos + literal.len(), spans) {
                    return true;
                }
                spans.pop();
            }
            false
        }
        StructureToken::Class { class, length, fixed } => {
            let mut run = 0;
            while run < *length && pos + run < input.len() && class.matches(input[pos + run]) {
                run += 1;
            }
            let min = if *fixed { *length } else { 0 };
            for take in (min..=run).rev() {
                spans.push((pos, pos + take));
                if match_at(tokens, input, ti + 1, pos + take, spans) {
                    return true;
                }
                spans.pop();
            }
            false
        }
    }
}
