use std::fmt;

/// Canonical field the column detector maps real headers onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    /// Subject's name. Required on every kept row.
    Name,
    /// Email address.
    Email,
    /// Phone number.
    Phone,
    /// Title, program or qualification.
    Title,
    /// Registration or creation date.
    Date,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Field {
    /// Number of variants in the Field enum.
    pub const COUNT: usize = 5;

    /// All fields in detection order.
    pub const ALL: [Field; Field::COUNT] = [
        Field::Name,
        Field::Email,
        Field::Phone,
        Field::Title,
        Field::Date,
    ];

    /// Returns the index for this field (0-4), suitable for array indexing.
    /// Matches the position in [`Field::ALL`].
    #[inline]
    pub const fn as_index(&self) -> usize {
        match self {
            Field::Name => 0,
            Field::Email => 1,
            Field::Phone => 2,
            Field::Title => 3,
            Field::Date => 4,
        }
    }

    /// Lowercase canonical name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Title => "title",
            Field::Date => "date",
        }
    }

    /// Column name under which the normalized value is emitted.
    pub const fn normalized_key(&self) -> &'static str {
        match self {
            Field::Name => "normalized_name",
            Field::Email => "normalized_email",
            Field::Phone => "normalized_phone",
            Field::Title => "normalized_title",
            Field::Date => "normalized_date",
        }
    }
}

/// The five normalized column names, in detection order.
pub const NORMALIZED_KEYS: [&str; Field::COUNT] = [
    Field::Name.normalized_key(),
    Field::Email.normalized_key(),
    Field::Phone.normalized_key(),
    Field::Title.normalized_key(),
    Field::Date.normalized_key(),
];
