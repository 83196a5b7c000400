use core::str::FromStr;

use rust_decimal::Decimal;
use serde_json::{Map, Value};

use catalog_core::{DomainError, DomainResult, ProductId};

use crate::category::Category;

/// A catalog item.
///
/// `id` is `None` until the entity has been persisted; the data store assigns
/// it and it never changes afterwards. Every other field is mutable and is
/// replaced wholesale by [`Product::apply_json`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    id: Option<ProductId>,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub available: bool,
    pub category: Category,
}

impl Product {
    /// Build a not-yet-persisted product.
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        price: Decimal,
        available: bool,
        category: Category,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            description,
            price,
            available,
            category,
        }
    }

    /// Rebuild an entity from a stored row.
    pub fn rehydrate(
        id: ProductId,
        name: String,
        description: Option<String>,
        price: Decimal,
        available: bool,
        category: Category,
    ) -> Self {
        Self {
            id: Some(id),
            name,
            description,
            price,
            available,
            category,
        }
    }

    pub fn id(&self) -> Option<ProductId> {
        self.id
    }

    pub(crate) fn assign_id(&mut self, id: ProductId) {
        self.id = Some(id);
    }

    /// JSON mapping with keys `id, name, description, price, available, category`.
    ///
    /// `price` is rendered as a decimal string and `category` by name.
    pub fn to_json(&self) -> Value {
        serde_json::json!({
            "id": self.id,
            "name": self.name,
            "description": self.description,
            "price": self.price.to_string(),
            "available": self.available,
            "category": self.category.as_str(),
        })
    }

    /// Build a new, unpersisted product from a JSON mapping.
    ///
    /// Any `id` in the payload is ignored.
    pub fn from_json(data: &Value) -> DomainResult<Self> {
        let fields = ProductFields::parse(data)?;
        Ok(fields.into_product(None))
    }

    /// Replace every mutable field from a JSON mapping, keeping `id`.
    ///
    /// The entity is left untouched when validation fails.
    pub fn apply_json(&mut self, data: &Value) -> DomainResult<()> {
        let fields = ProductFields::parse(data)?;
        *self = fields.into_product(self.id);
        Ok(())
    }
}

/// Validated payload fields, parsed before any entity is mutated.
struct ProductFields {
    name: String,
    description: Option<String>,
    price: Decimal,
    available: bool,
    category: Category,
}

impl ProductFields {
    fn parse(data: &Value) -> DomainResult<Self> {
        let obj = data.as_object().ok_or_else(|| {
            DomainError::validation("Invalid product: body of request contained bad or no data")
        })?;

        let name = match required(obj, "name")? {
            Value::String(s) if !s.is_empty() => s.clone(),
            Value::String(_) => {
                return Err(DomainError::validation("Invalid product: name must not be empty"));
            }
            other => return Err(type_error("string", "name", other)),
        };

        let description = match obj.get("description") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => return Err(type_error("string", "description", other)),
        };

        let price = parse_price(required(obj, "price")?)?;

        let available = match required(obj, "available")? {
            Value::Bool(b) => *b,
            other => return Err(type_error("boolean", "available", other)),
        };

        let category = match required(obj, "category")? {
            Value::String(s) => Category::from_str(s)
                .map_err(|_| DomainError::validation(format!("Invalid attribute: category {s}")))?,
            other => return Err(type_error("string", "category", other)),
        };

        Ok(Self {
            name,
            description,
            price,
            available,
            category,
        })
    }

    fn into_product(self, id: Option<ProductId>) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            available: self.available,
            category: self.category,
        }
    }
}

fn required<'a>(obj: &'a Map<String, Value>, key: &str) -> DomainResult<&'a Value> {
    match obj.get(key) {
        None | Some(Value::Null) => Err(DomainError::validation(format!(
            "Invalid product: missing {key}"
        ))),
        Some(v) => Ok(v),
    }
}

fn parse_price(value: &Value) -> DomainResult<Decimal> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        // serde_json prints floats in shortest round-trip form, so "9.99" stays "9.99".
        Value::Number(n) => n.to_string(),
        other => return Err(type_error("decimal", "price", other)),
    };

    exact_decimal(&text)
        .ok_or_else(|| DomainError::validation(format!("Invalid attribute: price {text}")))
}

/// Parse without rounding; `None` when the value does not fit a `Decimal` exactly.
fn exact_decimal(text: &str) -> Option<Decimal> {
    match text.split_once(['e', 'E']) {
        None => Decimal::from_str_exact(text).ok(),
        Some((base, _)) => {
            // `from_scientific` rounds an over-long base, so check it separately.
            Decimal::from_str_exact(base).ok()?;
            Decimal::from_scientific(text).ok()
        }
    }
}

fn type_error(expected: &str, field: &str, got: &Value) -> DomainError {
    DomainError::validation(format!(
        "Invalid type for {expected} [{field}]: {}",
        json_type_name(got)
    ))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
