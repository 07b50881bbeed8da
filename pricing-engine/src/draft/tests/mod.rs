use super::*;
use shared::models::category::index_categories;
use shared::models::{AttributeKey, AttributeValue, AttributeValueType, CatalogProduct, Category, CategoryAttribute};
use shared::order::PaymentMethod;

mod test_payments;

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

fn test_rates() -> Vec<ExchangeRate> {
    let effective = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    vec![
        ExchangeRate {
            currency: Currency::Usd,
            rate: 36.5,
            effective_date: effective,
            is_active: true,
        },
        ExchangeRate {
            currency: Currency::Eur,
            rate: 40.0,
            effective_date: effective,
            is_active: true,
        },
    ]
}

fn select_value(id: &str, adjustment: f64) -> AttributeValue {
    AttributeValue {
        id: id.to_string(),
        label: id.to_string(),
        price_adjustment: adjustment,
        price_adjustment_currency: Currency::Bs,
        product_id: None,
    }
}

/// Cake shop fixture: a "tortas" category whose products bundle a
/// referenced filling product, plus a capped per-product discount.
fn test_context() -> DraftContext {
    let tortas = Category {
        name: "tortas".to_string(),
        attributes: vec![
            CategoryAttribute {
                key: AttributeKey::new("size", "Size"),
                value_type: AttributeValueType::Select,
                values: vec![select_value("medium", 0.0), select_value("large", 200.0)],
            },
            CategoryAttribute {
                key: AttributeKey::new("extra-height", "Extra height"),
                value_type: AttributeValueType::Number,
                values: vec![],
            },
            CategoryAttribute {
                key: AttributeKey::new("filling", "Filling"),
                value_type: AttributeValueType::ProductRef,
                values: vec![AttributeValue {
                    id: "std-filling".to_string(),
                    label: "Standard filling".to_string(),
                    price_adjustment: 0.0,
                    price_adjustment_currency: Currency::Bs,
                    product_id: Some("filling-1".to_string()),
                }],
            },
        ],
        max_discount: 100.0,
        max_discount_currency: Currency::Bs,
    };
    let rellenos = Category {
        name: "rellenos".to_string(),
        attributes: vec![CategoryAttribute {
            key: AttributeKey::new("flavor", "Flavor"),
            value_type: AttributeValueType::Select,
            values: vec![select_value("chocolate", 0.0), select_value("pistachio", 20.0)],
        }],
        max_discount: 0.0,
        max_discount_currency: Currency::Bs,
    };

    let catalog = Catalog::new(vec![
        CatalogProduct {
            id: "torta-1".to_string(),
            name: "Torta tres leches".to_string(),
            price: 450.0,
            price_currency: Currency::Bs,
            category: "tortas".to_string(),
            attributes: HashMap::new(),
        },
        CatalogProduct {
            id: "torta-usd".to_string(),
            name: "Imported cake".to_string(),
            price: 10.0,
            price_currency: Currency::Usd,
            category: "tortas".to_string(),
            attributes: HashMap::new(),
        },
        CatalogProduct {
            id: "filling-1".to_string(),
            name: "Standard filling".to_string(),
            price: 50.0,
            price_currency: Currency::Bs,
            category: "rellenos".to_string(),
            attributes: HashMap::new(),
        },
    ]);

    DraftContext::new(catalog, index_categories(vec![tortas, rellenos]), test_rates())
}

fn new_draft() -> OrderDraft {
    OrderDraft::new(test_context(), as_of())
}

fn payment(method: PaymentMethod, amount: f64, currency: Currency) -> PaymentInput {
    PaymentInput {
        method,
        amount,
        currency,
        reference: None,
        account: None,
        cash_received: None,
        note: None,
    }
}
