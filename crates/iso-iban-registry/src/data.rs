//! Embedded ISO 13616 registry data.
//!
//! One row per country: BBAN structure and total length as registered with
//! SWIFT, plus bank/branch identifier positions. Positions are 1-based
//! relative to the BBAN, exactly as the registry prints them; they are
//! shifted onto compact-IBAN offsets when the table is built.

/// One row of the embedded registry.
pub(crate) struct RawSpecification {
    pub name: &'static str,
    pub code: &'static str,
    pub bban_structure: &'static str,
    pub iban_length: usize,
    /// Bank identifier positions within the BBAN, 1-based inclusive.
    pub bank: Option<(usize, usize)>,
    /// Branch identifier positions within the BBAN, 1-based inclusive.
    pub branch: Option<(usize, usize)>,
}

const fn row(
    name: &'static str,
    code: &'static str,
    bban_structure: &'static str,
    iban_length: usize,
    bank: Option<(usize, usize)>,
    branch: Option<(usize, usize)>,
) -> RawSpecification {
    RawSpecification { name, code, bban_structure, iban_length, bank, branch }
}

pub(crate) const SPECIFICATIONS: &[RawSpecification] = &[
    row("Albania", "AL", "8!n16!c", 28, Some((1, 8)), None),
    row("Andorra", "AD", "4!n4!n12!c", 24, Some((1, 4)), Some((5, 8))),
    row("Austria", "AT", "5!n11!n", 20, Some((1, 5)), None),
    row("Azerbaijan", "AZ", "4!a20!c", 28, Some((1, 4)), None),
    row("Bahrain", "BH", "4!a14!c", 22, Some((1, 4)), None),
    row("Belgium", "BE", "3!n7!n2!n", 16, Some((1, 3)), None),
    row("Bosnia and Herzegovina", "BA", "3!n3!n8!n2!n", 20, Some((1, 3)), Some((4, 6))),
    row("Brazil", "BR", "8!n5!n10!n1!a1!c", 29, Some((1, 8)), Some((9, 13))),
    row("Bulgaria", "BG", "4!a4!n2!n8!c", 22, Some((1, 4)), Some((5, 8))),
    row("Costa Rica", "CR", "4!n14!n", 22, Some((1, 4)), None),
    row("Croatia", "HR", "7!n10!n", 21, Some((1, 7)), None),
    row("Cyprus", "CY", "3!n5!n16!c", 28, Some((1, 3)), Some((4, 8))),
    row("Czech Republic", "CZ", "4!n6!n10!n", 24, Some((1, 4)), None),
    row("Denmark", "DK", "4!n9!n1!n", 18, Some((1, 4)), None),
    row("Dominican Republic", "DO", "4!c20!n", 28, Some((1, 4)), None),
    row("Estonia", "EE", "2!n2!n11!n1!n", 20, Some((1, 2)), None),
    row("Faroe Islands", "FO", "4!n9!n1!n", 18, Some((1, 4)), None),
    row("Finland", "FI", "3!n11!n", 18, Some((1, 3)), None),
    row("France", "FR", "5!n5!n11!c2!n", 27, Some((1, 5)), Some((6, 10))),
    row("Georgia", "GE", "2!a16!n", 22, Some((1, 2)), None),
    row("Germany", "DE", "8!n10!n", 22, Some((1, 8)), None),
    row("Gibraltar", "GI", "4!a15!c", 23, Some((1, 4)), None),
    row("Greece", "GR", "3!n4!n16!c", 27, Some((1, 3)), Some((4, 7))),
    row("Greenland", "GL", "4!n9!n1!n", 18, Some((1, 4)), None),
    row("Guatemala", "GT", "4!c20!c", 28, Some((1, 4)), None),
    row("Hungary", "HU", "3!n4!n1!n15!n1!n", 28, Some((1, 3)), Some((4, 7))),
    row("Iceland", "IS", "4!n2!n6!n10!n", 26, Some((1, 4)), None),
    row("Ireland", "IE", "4!a6!n8!n", 22, Some((1, 4)), Some((5, 10))),
    row("Israel", "IL", "3!n3!n13!n", 23, Some((1, 3)), Some((4, 6))),
    row("Italy", "IT", "1!a5!n5!n12!c", 27, Some((2, 6)), Some((7, 11))),
    row("Jordan", "JO", "4!a4!n18!c", 30, Some((1, 4)), Some((5, 8))),
    row("Kazakhstan", "KZ", "3!n13!c", 20, Some((1, 3)), None),
    row("Kosovo", "XK", "4!n10!n2!n", 20, Some((1, 2)), Some((3, 4))),
    row("Kuwait", "KW", "4!a22!c", 30, Some((1, 4)), None),
    row("Latvia", "LV", "4!a13!c", 21, Some((1, 4)), None),
    row("Lebanon", "LB", "4!n20!c", 28, Some((1, 4)), None),
    row("Liechtenstein", "LI", "5!n12!c", 21, Some((1, 5)), None),
    row("Lithuania", "LT", "5!n11!n", 20, Some((1, 5)), None),
    row("Luxembourg", "LU", "3!n13!c", 20, Some((1, 3)), None),
    row("Malta", "MT", "4!a5!n18!c", 31, Some((1, 4)), Some((5, 9))),
    row("Mauritania", "MR", "5!n5!n11!n2!n", 27, Some((1, 5)), Some((6, 10))),
    row("Mauritius", "MU", "4!a2!n2!n12!n3!n3!a", 30, Some((1, 6)), Some((7, 8))),
    row("Moldova", "MD", "2!c18!c", 24, Some((1, 2)), None),
    row("Monaco", "MC", "5!n5!n11!c2!n", 27, Some((1, 5)), Some((6, 10))),
    row("Montenegro", "ME", "3!n13!n2!n", 22, Some((1, 3)), None),
    row("Netherlands", "NL", "4!a10!n", 18, Some((1, 4)), None),
    row("North Macedonia", "MK", "3!n10!c2!n", 19, Some((1, 3)), None),
    row("Norway", "NO", "4!n6!n1!n", 15, Some((1, 4)), None),
    row("Pakistan", "PK", "4!a16!c", 24, Some((1, 4)), None),
    row("Palestine", "PS", "4!a21!c", 29, Some((1, 4)), None),
    row("Poland", "PL", "8!n16!n", 28, Some((1, 8)), None),
    row("Portugal", "PT", "4!n4!n11!n2!n", 25, Some((1, 4)), None),
    row("Qatar", "QA", "4!a21!c", 29, Some((1, 4)), None),
    row("Romania", "RO", "4!a16!c", 24, Some((1, 4)), None),
    row("San Marino", "SM", "1!a5!n5!n12!c", 27, Some((2, 6)), Some((7, 11))),
    row("Saudi Arabia", "SA", "2!n18!c", 24, Some((1, 2)), None),
    row("Serbia", "RS", "3!n13!n2!n", 22, Some((1, 3)), None),
    row("Slovakia", "SK", "4!n6!n10!n", 24, Some((1, 4)), None),
    row("Slovenia", "SI", "5!n8!n2!n", 19, Some((1, 5)), None),
    row("Spain", "ES", "4!n4!n1!n1!n10!n", 24, Some((1, 4)), Some((5, 8))),
    row("Sweden", "SE", "3!n16!n1!n", 24, Some((1, 3)), None),
    row("Switzerland", "CH", "5!n12!c", 21, Some((1, 5)), None),
    row("Timor-Leste", "TL", "3!n14!n2!n", 23, Some((1, 3)), None),
    row("Tunisia", "TN", "2!n3!n13!n2!n", 24, Some((1, 2)), Some((3, 5))),
    row("Turkey", "TR", "5!n1!c16!c", 26, Some((1, 5)), None),
    row("United Arab Emirates", "AE", "3!n16!n", 23, Some((1, 3)), None),
    row("United Kingdom", "GB", "4!a6!n8!n", 22, Some((1, 4)), Some((5, 10))),
    row("Virgin Islands", "VG", "4!a16!n", 24, Some((1, 4)), None),
];
