use serde::{Deserialize, Serialize};

/// Smallest number of phones a request may declare.
pub const MIN_DECLARATIONS: usize = 1;
/// Largest number of phones a request may declare.
pub const MAX_DECLARATIONS: usize = 10;
/// Highest price accepted for one phone, in its declared currency.
pub const MAX_DECLARED_PRICE: f64 = 1_000_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "EUR")]
    Eur,
    #[serde(rename = "MAD")]
    Mad,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Packaging {
    Opened,
    Sealed,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonalUse {
    Yes,
    No,
    Unsure,
}

/// Channel through which the phones enter the country.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportMode {
    /// Carried in the traveller's luggage.
    #[serde(alias = "voyageur")]
    Traveller,
    /// Sent as a parcel.
    #[serde(alias = "envoi")]
    Shipment,
}

/// One declared phone, already validated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneDeclaration {
    pub price: f64,
    pub currency: Currency,
    pub packaging: Packaging,
    pub personal_use: PersonalUse,
}

impl PhoneDeclaration {
    pub fn new(
        price: f64,
        currency: Currency,
        packaging: Packaging,
        personal_use: PersonalUse,
    ) -> Self {
        Self {
            price,
            currency,
            packaging,
            personal_use,
        }
    }

    pub fn price_in_mad(&self, exchange_rate_eur_to_mad: f64) -> f64 {
        match self.currency {
            Currency::Eur => self.price * exchange_rate_eur_to_mad,
            Currency::Mad => self.price,
        }
    }
}

/// Raised when a request would hold a phone count outside the accepted range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("a request must declare between 1 and 10 phones, found {found}")]
pub struct DeclarationCountError {
    pub found: usize,
}

/// Validated estimation input. Only constructible with 1 to 10 declarations.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateRequest {
    import_mode: ImportMode,
    phones: Vec<PhoneDeclaration>,
}

impl EstimateRequest {
    pub fn new(
        import_mode: ImportMode,
        phones: Vec<PhoneDeclaration>,
    ) -> Result<Self, DeclarationCountError> {
        if !(MIN_DECLARATIONS..=MAX_DECLARATIONS).contains(&phones.len()) {
            return Err(DeclarationCountError {
                found: phones.len(),
            });
        }

        Ok(Self {
            import_mode,
            phones,
        })
    }

    pub fn import_mode(&self) -> ImportMode {
        self.import_mode
    }

    pub fn phones(&self) -> &[PhoneDeclaration] {
        &self.phones
    }
}
