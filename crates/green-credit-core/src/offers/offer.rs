use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::time_value::flat_monthly_payment;
use crate::{types::*, GreenCreditError, GreenCreditResult};

/// Product a green credit would finance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductData {
    #[serde(alias = "nombre")]
    pub name: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub img_link: String,
    #[serde(alias = "precio")]
    pub price: Money,
    #[serde(default, alias = "categoria")]
    pub category: String,
}

/// A pre-approved credit proposed to a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditOffer {
    #[serde(alias = "prestamo")]
    pub principal: Money,
    #[serde(alias = "interes")]
    pub annual_interest_rate: Percent,
    #[serde(alias = "meses_originales")]
    pub term_months: u32,
    #[serde(default, alias = "descripcion")]
    pub description: String,
    /// What the client currently spends per month in the category; also
    /// the most they can redirect to a credit payment.
    #[serde(alias = "gasto_inicial_mes")]
    pub initial_monthly_expense: Money,
    /// Expected monthly spend after the upgrade, excluding the credit payment.
    #[serde(alias = "gasto_final_mes")]
    pub final_monthly_expense: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductData>,
}

/// Figures shown on an offer card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferTerms {
    pub title: String,
    pub principal: Money,
    pub annual_interest_rate: Percent,
    pub term_months: u32,
    pub monthly_payment: Money,
    pub monthly_savings: Money,
    /// Whole percent of the current expense saved; zero when there is no
    /// current expense.
    pub savings_percentage: Decimal,
}

impl CreditOffer {
    /// Product name, or the first sentence of the description.
    pub fn title(&self) -> String {
        match &self.product {
            Some(p) if !p.name.is_empty() => p.name.clone(),
            _ => self
                .description
                .split('.')
                .next()
                .unwrap_or_default()
                .trim()
                .to_string(),
        }
    }

    pub fn monthly_savings(&self) -> Money {
        self.initial_monthly_expense - self.final_monthly_expense
    }

    pub fn validate(&self) -> GreenCreditResult<()> {
        if self.principal <= Decimal::ZERO {
            return Err(GreenCreditError::InvalidInput {
                field: "principal".into(),
                reason: "Credit amount must be positive".into(),
            });
        }
        if self.annual_interest_rate < Decimal::ZERO {
            return Err(GreenCreditError::InvalidInput {
                field: "annual_interest_rate".into(),
                reason: "Interest rate cannot be negative".into(),
            });
        }
        Ok(())
    }
}

/// Card figures for an offer: flat monthly payment and savings share.
pub fn offer_terms(offer: &CreditOffer) -> GreenCreditResult<OfferTerms> {
    offer.validate()?;
    let monthly_payment =
        flat_monthly_payment(offer.principal, offer.annual_interest_rate, offer.term_months)?;
    let monthly_savings = offer.monthly_savings();
    let savings_percentage = if offer.initial_monthly_expense > Decimal::ZERO {
        round_half_up(monthly_savings / offer.initial_monthly_expense * dec!(100))
    } else {
        Decimal::ZERO
    };

    Ok(OfferTerms {
        title: offer.title(),
        principal: offer.principal,
        annual_interest_rate: offer.annual_interest_rate,
        term_months: offer.term_months,
        monthly_payment,
        monthly_savings,
        savings_percentage,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solar_offer() -> CreditOffer {
        CreditOffer {
            principal: dec!(60000),
            annual_interest_rate: dec!(6),
            term_months: 24,
            description: "Sistema de paneles solares. Reduce tu recibo de luz.".into(),
            initial_monthly_expense: dec!(2000),
            final_monthly_expense: dec!(800),
            product: None,
        }
    }

    #[test]
    fn test_offer_terms() {
        let terms = offer_terms(&solar_offer()).unwrap();
        assert_eq!(terms.title, "Sistema de paneles solares");
        // 60000 × 1.06 / 24
        assert_eq!(terms.monthly_payment, dec!(2650));
        assert_eq!(terms.monthly_savings, dec!(1200));
        assert_eq!(terms.savings_percentage, dec!(60));
    }

    #[test]
    fn test_title_prefers_product_name() {
        let mut offer = solar_offer();
        offer.product = Some(ProductData {
            name: "Panel Solar 450W Monocristalino".into(),
            link: String::new(),
            img_link: String::new(),
            price: dec!(60000),
            category: "Luz".into(),
        });
        assert_eq!(offer.title(), "Panel Solar 450W Monocristalino");
    }

    #[test]
    fn test_no_current_expense_zero_percentage() {
        let mut offer = solar_offer();
        offer.initial_monthly_expense = Decimal::ZERO;
        offer.final_monthly_expense = Decimal::ZERO;
        assert_eq!(offer_terms(&offer).unwrap().savings_percentage, Decimal::ZERO);
    }

    #[test]
    fn test_zero_term_is_error() {
        let mut offer = solar_offer();
        offer.term_months = 0;
        assert!(matches!(
            offer_terms(&offer),
            Err(GreenCreditError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn test_backend_field_names() {
        let json = r#"{"prestamo":400000,"interes":7.5,"meses_originales":60,
            "descripcion":"Auto eléctrico","gasto_inicial_mes":5000,"gasto_final_mes":1500,
            "product":{"nombre":"Auto Eléctrico","precio":400000,"categoria":"Transporte"}}"#;
        let offer: CreditOffer = serde_json::from_str(json).unwrap();
        assert_eq!(offer.term_months, 60);
        assert_eq!(offer.title(), "Auto Eléctrico");
    }
}
