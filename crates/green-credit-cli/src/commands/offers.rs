use clap::Args;
use serde::Deserialize;
use serde_json::Value;

use green_credit_core::offers::offer::{self, CreditOffer};
use green_credit_core::offers::validation;

use crate::input;

/// Arguments for offer commands
#[derive(Args)]
pub struct OfferArgs {
    /// Path to JSON file with one offer, an array, or {"creditOffers": [...]}
    #[arg(long)]
    pub input: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OfferInput {
    Many(Vec<CreditOffer>),
    Wrapped {
        #[serde(alias = "creditOffers")]
        offers: Vec<CreditOffer>,
    },
    One(CreditOffer),
}

impl OfferArgs {
    fn load(&self) -> Result<Vec<CreditOffer>, Box<dyn std::error::Error>> {
        let parsed: OfferInput = input::load(self.input.as_deref(), "one or more credit offers")?;
        Ok(match parsed {
            OfferInput::Many(offers) | OfferInput::Wrapped { offers } => offers,
            OfferInput::One(offer) => vec![offer],
        })
    }
}

pub fn run_offer_terms(args: OfferArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let offers = args.load()?;
    let terms = offers
        .iter()
        .map(offer::offer_terms)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(serde_json::to_value(terms)?)
}

pub fn run_validate_offers(args: OfferArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let offers = args.load()?;
    let result = validation::validate_offers(&offers)?;
    if result.result.rejected > 0 {
        log::warn!("{} of {} offers rejected", result.result.rejected, offers.len());
    }
    Ok(serde_json::to_value(result)?)
}
