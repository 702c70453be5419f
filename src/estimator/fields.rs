//! Canonical attribute fields understood by the prediction service.

/// One project attribute the form collects and the service predicts.
///
/// The set is fixed by the service contract. `ALL` fixes the display order
/// for the form grid and the results view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CanonicalField {
    ClientRevenue,
    NumberOfUsers,
    Ricefw,
    DurationMonths,
    CountriesMarket,
    EstimatedEffort,
}

impl CanonicalField {
    /// Every field, in display order.
    pub const ALL: [CanonicalField; 6] = [
        CanonicalField::ClientRevenue,
        CanonicalField::NumberOfUsers,
        CanonicalField::Ricefw,
        CanonicalField::DurationMonths,
        CanonicalField::CountriesMarket,
        CanonicalField::EstimatedEffort,
    ];

    /// The field name exactly as the service spells it, doubling as the
    /// on-screen label.
    pub fn wire_name(self) -> &'static str {
        match self {
            CanonicalField::ClientRevenue => "Client Revenue(in GBP (Billion))",
            CanonicalField::NumberOfUsers => "Number of Users",
            CanonicalField::Ricefw => "RICEFW",
            CanonicalField::DurationMonths => "Duration (Months)",
            CanonicalField::CountriesMarket => "Countries/Market",
            CanonicalField::EstimatedEffort => "Estimated Effort (man days)",
        }
    }

    /// Reverse lookup from a wire name; `None` for keys outside the contract.
    pub fn from_wire_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.wire_name() == name)
    }
}

/// The target whose reliability the results view surfaces.
pub const EFFORT_TARGET: CanonicalField = CanonicalField::EstimatedEffort;
